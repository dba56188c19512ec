pub mod resource_service;
pub mod user_service;

pub use resource_service::{ResourceError, ResourceService};
pub use user_service::{UserError, UserService};
