pub mod account;
pub mod interest;
pub mod profile;
pub mod search;
