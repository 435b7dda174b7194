pub mod entity;

pub use entity::{Profile, User};
