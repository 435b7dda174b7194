// src/remote/mod.rs
//
// Remote data service access
//
// Provides:
// - HTTP transport with api key + session token headers
// - Query builder for the REST filter syntax
// - Wire helpers shared by repositories

pub mod client;
pub mod query;
pub mod wire;

pub use client::RestClient;
pub use query::{contains_pattern, Order, Query};
pub use wire::OneOrMany;
