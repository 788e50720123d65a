use crate::{Identity, UserProfile};

use uuid::Uuid;

#[test]
fn test_user_profile_new_is_not_recovered() {
    let id = Uuid::new_v4();
    let profile = UserProfile::new(id, "owner@example.com".to_string(), "12가3456".to_string());

    assert_eq!(profile.identity_id, id);
    assert_eq!(profile.email, "owner@example.com");
    assert_eq!(profile.car_identifier, "12가3456");
    assert!(!profile.is_recovered);
    assert_eq!(profile.created_at, profile.updated_at);
}

#[test]
fn test_user_profile_recovered_uses_email_local_part() {
    let identity = Identity {
        id: Uuid::new_v4(),
        email: "Kim.Driver@Example.com".to_string(),
    };

    let profile = UserProfile::recovered(&identity);

    assert_eq!(profile.identity_id, identity.id);
    assert_eq!(profile.car_identifier, "kim.driver");
    assert!(profile.is_recovered);
}

#[test]
fn test_user_profile_recovered_with_blank_local_part_gets_fallback() {
    let identity = Identity {
        id: Uuid::new_v4(),
        email: "@example.com".to_string(),
    };

    let profile = UserProfile::recovered(&identity);

    assert_eq!(profile.car_identifier, crate::normalize::FALLBACK_CAR_IDENTIFIER);
    assert!(profile.is_recovered);
}
