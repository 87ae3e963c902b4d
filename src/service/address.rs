//! Address business logic. Every call resolves the owner chain
//! address -> contact -> user before touching an address.

use crate::domain::{Address, AddressInput, Contact, User};
use crate::error::{AppError, Result};
use crate::repository::{AddressRepository, ContactRepository};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

pub struct AddressService<R: AddressRepository, C: ContactRepository> {
    repo: Arc<R>,
    contact_repo: Arc<C>,
}

impl<R: AddressRepository, C: ContactRepository> AddressService<R, C> {
    pub fn new(repo: Arc<R>, contact_repo: Arc<C>) -> Self {
        Self { repo, contact_repo }
    }

    async fn owned_contact(&self, user: &User, contact_id: i64) -> Result<Contact> {
        self.contact_repo
            .find_by_id(contact_id)
            .await?
            .filter(|contact| contact.user_id == user.id)
            .ok_or_else(|| AppError::NotFound("Contact is not found".to_string()))
    }

    async fn owned_address(&self, user: &User, contact_id: i64, id: i64) -> Result<Address> {
        let contact = self.owned_contact(user, contact_id).await?;
        self.repo
            .find_by_id(id)
            .await?
            .filter(|address| address.contact_id == contact.id)
            .ok_or_else(|| AppError::NotFound("Address is not found".to_string()))
    }

    pub async fn create(
        &self,
        user: &User,
        contact_id: i64,
        input: AddressInput,
    ) -> Result<Address> {
        input.validate()?;
        let contact = self.owned_contact(user, contact_id).await?;
        self.repo.create(contact.id, &input).await
    }

    pub async fn get(&self, user: &User, contact_id: i64, id: i64) -> Result<Address> {
        self.owned_address(user, contact_id, id).await
    }

    pub async fn list(&self, user: &User, contact_id: i64) -> Result<Vec<Address>> {
        let contact = self.owned_contact(user, contact_id).await?;
        self.repo.list_by_contact(contact.id).await
    }

    pub async fn update(
        &self,
        user: &User,
        contact_id: i64,
        id: i64,
        input: AddressInput,
    ) -> Result<Address> {
        input.validate()?;
        let address = self.owned_address(user, contact_id, id).await?;
        self.repo.update(address.id, &input).await
    }

    pub async fn delete(&self, user: &User, contact_id: i64, id: i64) -> Result<()> {
        let address = self.owned_address(user, contact_id, id).await?;
        self.repo.delete(address.id).await?;
        info!(user_id = user.id, contact_id, address_id = address.id, "Address deleted");
        Ok(())
    }
}
