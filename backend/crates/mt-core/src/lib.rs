pub mod error;
pub mod models;
pub mod normalize;
pub mod search;

#[cfg(test)]
mod tests;

pub use error::{CoreError, CoreResult};
pub use error_location::ErrorLocation;
pub use models::identity::Identity;
pub use models::maintenance_record::MaintenanceRecord;
pub use models::new_record::NewRecord;
pub use models::record_status::RecordStatus;
pub use models::user_profile::UserProfile;
pub use normalize::{normalize_car_identifier, normalize_email, placeholder_car_identifier};
pub use search::SearchQuery;
