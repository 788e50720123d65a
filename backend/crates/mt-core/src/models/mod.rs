pub mod identity;
pub mod maintenance_record;
pub mod new_record;
pub mod record_status;
pub mod user_profile;
