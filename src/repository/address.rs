//! Address repository

use crate::domain::{Address, AddressInput};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AddressRepository: Send + Sync {
    async fn create(&self, contact_id: i64, input: &AddressInput) -> Result<Address>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Address>>;
    async fn list_by_contact(&self, contact_id: i64) -> Result<Vec<Address>>;
    async fn update(&self, id: i64, input: &AddressInput) -> Result<Address>;
    async fn delete(&self, id: i64) -> Result<()>;
    async fn delete_by_contact(&self, contact_id: i64) -> Result<u64>;
}

pub struct AddressRepositoryImpl {
    pool: MySqlPool,
}

impl AddressRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AddressRepository for AddressRepositoryImpl {
    async fn create(&self, contact_id: i64, input: &AddressInput) -> Result<Address> {
        let result = sqlx::query(
            r#"
            INSERT INTO addresses (contact_id, street, city, province, country, postal_code, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, NOW(), NOW())
            "#,
        )
        .bind(contact_id)
        .bind(&input.street)
        .bind(&input.city)
        .bind(&input.province)
        .bind(&input.country)
        .bind(&input.postal_code)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_id() as i64;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create address")))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Address>> {
        let address = sqlx::query_as::<_, Address>(
            r#"
            SELECT id, contact_id, street, city, province, country, postal_code, created_at, updated_at
            FROM addresses
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(address)
    }

    async fn list_by_contact(&self, contact_id: i64) -> Result<Vec<Address>> {
        let addresses = sqlx::query_as::<_, Address>(
            r#"
            SELECT id, contact_id, street, city, province, country, postal_code, created_at, updated_at
            FROM addresses
            WHERE contact_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(contact_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(addresses)
    }

    async fn update(&self, id: i64, input: &AddressInput) -> Result<Address> {
        sqlx::query(
            r#"
            UPDATE addresses
            SET street = ?, city = ?, province = ?, country = ?, postal_code = ?, updated_at = NOW()
            WHERE id = ?
            "#,
        )
        .bind(&input.street)
        .bind(&input.city)
        .bind(&input.province)
        .bind(&input.country)
        .bind(&input.postal_code)
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Address {} not found", id)))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM addresses WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Address {} not found", id)));
        }

        Ok(())
    }

    async fn delete_by_contact(&self, contact_id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM addresses WHERE contact_id = ?")
            .bind(contact_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
