pub mod validation;

pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, Authenticator};
pub use auth_service_impl::SeaOrmAuthenticator;

pub mod user_service;
pub mod user_service_impl;
pub use user_service::{RegistrationRequest, UserDirectory, UserError};
pub use user_service_impl::SeaOrmUserDirectory;

pub mod friend_service;
pub mod friend_service_impl;
pub use friend_service::{FriendError, FriendGraph};
pub use friend_service_impl::SeaOrmFriendGraph;

pub mod generator;
pub use generator::{GenerationMode, GenerationReport, GeneratorError, NameCorpus, UserGenerator};
