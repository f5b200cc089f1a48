pub mod authenticator;
pub mod errors;
pub mod guard;
pub mod models;
pub mod ports;
pub mod service;

#[cfg(test)]
pub(crate) mod mocks;
