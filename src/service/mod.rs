//! Business logic layer

pub mod address;
pub mod contact;
pub mod credential;
pub mod user;

pub use address::AddressService;
pub use contact::ContactService;
pub use user::UserService;
