pub use super::friends::Entity as Friends;
pub use super::interest::Entity as Interest;
pub use super::user_has_interest::Entity as UserHasInterest;
pub use super::user_info::Entity as UserInfo;
pub use super::user_settings::Entity as UserSettings;
