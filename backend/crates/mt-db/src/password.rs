use crate::{DbError, Result};

use mt_core::ErrorLocation;

use std::panic::Location;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

/// Hash a password using Argon2id.
#[track_caller]
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| DbError::PasswordHash {
            location: ErrorLocation::from(Location::caller()),
        })
}

/// Verify a password against a stored hash.
#[track_caller]
pub fn verify_password(password: &str, hash: &str) -> Result<()> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| DbError::InvalidCredentials {
        location: ErrorLocation::from(Location::caller()),
    })?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| DbError::InvalidCredentials {
            location: ErrorLocation::from(Location::caller()),
        })
}
