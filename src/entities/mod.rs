pub mod prelude;

pub mod friends;
pub mod interest;
pub mod user_has_interest;
pub mod user_info;
pub mod user_settings;
