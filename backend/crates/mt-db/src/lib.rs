pub mod connection;
pub mod directory;
pub mod error;
pub mod password;
pub mod repositories;
pub mod sqlite_directory;


pub use connection::pool::{open_in_memory_pool, open_pool};
pub use directory::{Directory, RecordScope};
pub use error::{DbError, Result};
pub use repositories::account_repository::AccountRepository;
pub use repositories::profile_repository::ProfileRepository;
pub use repositories::record_repository::RecordRepository;
pub use sqlite_directory::SqliteDirectory;

/// Minimum password length accepted by [`SqliteDirectory::create_account`].
pub const MIN_PASSWORD_LENGTH: usize = 6;
