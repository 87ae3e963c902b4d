//! Application state trait for dependency injection
//!
//! Handlers and middleware are generic over [`HasServices`], so the same
//! router runs against the MySQL-backed `AppState` in production and against
//! in-memory repositories in tests.

use crate::repository::{AddressRepository, ContactRepository, UserRepository};
use crate::service::{AddressService, ContactService, UserService};

/// Trait for application state that provides access to all services.
pub trait HasServices: Clone + Send + Sync + 'static {
    /// The user repository type
    type UserRepo: UserRepository;
    /// The contact repository type
    type ContactRepo: ContactRepository;
    /// The address repository type
    type AddressRepo: AddressRepository;

    /// Get the user service
    fn user_service(
        &self,
    ) -> &UserService<Self::UserRepo, Self::ContactRepo, Self::AddressRepo>;

    /// Get the contact service
    fn contact_service(&self) -> &ContactService<Self::ContactRepo, Self::AddressRepo>;

    /// Get the address service
    fn address_service(&self) -> &AddressService<Self::AddressRepo, Self::ContactRepo>;

    /// Check if the backing store is reachable
    fn check_ready(&self) -> impl std::future::Future<Output = bool> + Send;
}
