//! Domain models for the contact API

pub mod address;
pub mod contact;
pub mod user;

pub use address::*;
pub use contact::*;
pub use user::*;
