// src/integrations/mod.rs
//
// External Integrations Module

pub mod auth;

pub use auth::client::{AuthGateway, AuthSession, RestAuthGateway};

#[cfg(test)]
pub use auth::client::MockAuthGateway;
