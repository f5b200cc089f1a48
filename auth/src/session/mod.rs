pub mod errors;
pub mod store;

pub use errors::SessionError;
pub use store::Session;
pub use store::SessionConfig;
pub use store::SessionStore;
