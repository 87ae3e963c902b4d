//! Contact business logic, scoped to the authenticated owner

use crate::domain::{
    Contact, ContactInput, ContactPage, SearchContactInput, User, MAX_PAGE_SIZE,
};
use crate::error::{AppError, Result};
use crate::repository::{AddressRepository, ContactRepository};
use sqlx::MySqlPool;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

pub struct ContactService<R: ContactRepository, A: AddressRepository> {
    repo: Arc<R>,
    address_repo: Arc<A>,
    /// Database pool for transactional cascade deletes
    pool: Option<MySqlPool>,
}

impl<R: ContactRepository, A: AddressRepository> ContactService<R, A> {
    pub fn new(repo: Arc<R>, address_repo: Arc<A>) -> Self {
        Self {
            repo,
            address_repo,
            pool: None,
        }
    }

    /// Set the database pool for transactional cascade deletes
    pub fn with_pool(mut self, pool: MySqlPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub async fn create(&self, user: &User, input: ContactInput) -> Result<Contact> {
        input.validate()?;
        self.repo.create(user.id, &input).await
    }

    /// Fetch a contact owned by `user`. Contacts of other users are reported
    /// as not found.
    pub async fn get(&self, user: &User, id: i64) -> Result<Contact> {
        self.repo
            .find_by_id(id)
            .await?
            .filter(|contact| contact.user_id == user.id)
            .ok_or_else(|| AppError::NotFound("Contact is not found".to_string()))
    }

    pub async fn update(&self, user: &User, id: i64, input: ContactInput) -> Result<Contact> {
        input.validate()?;
        let contact = self.get(user, id).await?;
        self.repo.update(contact.id, &input).await
    }

    /// Delete a contact together with its addresses, in one transaction when
    /// a database pool is set
    pub async fn delete(&self, user: &User, id: i64) -> Result<()> {
        let contact = self.get(user, id).await?;

        if let Some(ref pool) = self.pool {
            let mut tx = pool.begin().await?;

            sqlx::query("DELETE FROM addresses WHERE contact_id = ?")
                .bind(contact.id)
                .execute(tx.as_mut())
                .await?;

            let result = sqlx::query("DELETE FROM contacts WHERE id = ?")
                .bind(contact.id)
                .execute(tx.as_mut())
                .await?;
            if result.rows_affected() == 0 {
                return Err(AppError::NotFound("Contact is not found".to_string()));
            }

            tx.commit().await?;
        } else {
            self.address_repo.delete_by_contact(contact.id).await?;
            self.repo.delete(contact.id).await?;
        }

        info!(user_id = user.id, contact_id = contact.id, "Contact deleted");
        Ok(())
    }

    /// Search the owner's contacts. A page past the end yields no contacts
    /// but the same paging totals.
    pub async fn search(&self, user: &User, input: SearchContactInput) -> Result<ContactPage> {
        input.validate()?;

        let filter = input.filter();
        let page = input.page;
        let size = input.size.min(MAX_PAGE_SIZE);
        let offset = (page - 1).saturating_mul(size);

        let contacts = self.repo.search(user.id, &filter, offset, size).await?;
        let total = self.repo.count(user.id, &filter).await?;

        Ok(ContactPage {
            contacts,
            page,
            size,
            total,
        })
    }
}
