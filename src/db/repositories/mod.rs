pub mod account;
pub mod friend;
pub mod interest;
pub mod profile;
pub mod search;
pub mod variant;
