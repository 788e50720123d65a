mod new_record;
mod record_status;
mod user_profile;
