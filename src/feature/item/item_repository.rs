//! Types and functions for storing and loading items from the database.

use crate::infra::{database::DbPool, pagination::Page, validation::Valid};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{instrument, Instrument};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// The lowest price an item may have, in minor currency units.
pub const MIN_PRICE: i64 = 99;

/// A zero price counts as missing; anything else must reach [`MIN_PRICE`].
fn validate_price(price: i64) -> Result<(), ValidationError> {
    if price == 0 {
        return Err(ValidationError::new("required").with_message("cannot be blank".into()));
    }
    if price < MIN_PRICE {
        return Err(
            ValidationError::new("range").with_message("must be no less than 99".into()),
        );
    }
    Ok(())
}

/// A new item, before storage has assigned it an id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema, Validate)]
pub struct NewItem {
    /// The item's name.
    #[schema(example = "Widget")]
    #[validate(length(min = 1, message = "cannot be blank"))]
    pub name: String,
    /// The item's price in minor currency units.
    #[schema(example = 150)]
    #[validate(custom(function = "validate_price"))]
    pub price: i64,
    /// The item's manufacturer.
    #[schema(example = "Acme")]
    #[validate(length(min = 1, message = "cannot be blank"))]
    pub manufacturer: String,
}

/// An existing item.
#[derive(
    Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema, Validate, sqlx::FromRow,
)]
pub struct Item {
    /// The item's id.
    pub id: Uuid,
    /// The item's name.
    #[schema(example = "Widget")]
    #[validate(length(min = 1, message = "cannot be blank"))]
    pub name: String,
    /// The item's price in minor currency units.
    #[schema(example = 150)]
    #[validate(custom(function = "validate_price"))]
    pub price: i64,
    /// The item's manufacturer.
    #[schema(example = "Acme")]
    #[validate(length(min = 1, message = "cannot be blank"))]
    pub manufacturer: String,
}

/// Reasons a repository operation can fail.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// No row matched.
    #[error("item not found")]
    NotFound,
    /// The database rejected or could not run the statement.
    #[error("{0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => RepositoryError::NotFound,
            e => RepositoryError::Database(e),
        }
    }
}

/// Anything that can store items.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Lists one page of items, ordered by id.
    async fn list_items(&self, page: Page) -> Result<Vec<Item>, RepositoryError>;

    /// Fetches an item.
    async fn get_item(&self, id: Uuid) -> Result<Item, RepositoryError>;

    /// Creates a new item with a storage-generated id.
    async fn create_item(&self, new_item: Valid<NewItem>) -> Result<Item, RepositoryError>;

    /// Replaces every field but the id, returning the item as given.
    async fn update_item(&self, item: Valid<Item>) -> Result<Item, RepositoryError>;

    /// Deletes an item. Deleting a missing item is not an error.
    async fn delete_item(&self, id: Uuid) -> Result<Uuid, RepositoryError>;
}

/// An item repository backed by Postgres.
#[derive(Clone, Debug)]
pub struct PgItemRepository {
    db: DbPool,
}

impl PgItemRepository {
    /// Creates a new repository.
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    #[instrument(skip(self))]
    async fn list_items(&self, page: Page) -> Result<Vec<Item>, RepositoryError> {
        tracing::info!("Listing items");
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, price, manufacturer FROM item
            ORDER BY id
            LIMIT $1
            OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.db)
        .instrument(tracing::info_span!("fetch_all"))
        .await?;
        tracing::info!("Listed {} items", items.len());
        Ok(items)
    }

    #[instrument(skip(self))]
    async fn get_item(&self, id: Uuid) -> Result<Item, RepositoryError> {
        tracing::info!("Reading item");
        let item = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, price, manufacturer FROM item
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .instrument(tracing::info_span!("fetch_optional"))
        .await?;
        tracing::info!("Found item: {:?}", item);
        item.ok_or(RepositoryError::NotFound)
    }

    #[instrument(skip(self))]
    async fn create_item(&self, new_item: Valid<NewItem>) -> Result<Item, RepositoryError> {
        let new_item = new_item.into_inner();
        tracing::info!("Creating item {:?}", new_item);
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO item (name, price, manufacturer)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&new_item.name)
        .bind(new_item.price)
        .bind(&new_item.manufacturer)
        .fetch_one(&self.db)
        .await?;
        let item = Item {
            id,
            name: new_item.name,
            price: new_item.price,
            manufacturer: new_item.manufacturer,
        };
        tracing::info!("Created item {:?}", item);
        Ok(item)
    }

    #[instrument(skip(self))]
    async fn update_item(&self, item: Valid<Item>) -> Result<Item, RepositoryError> {
        let item = item.into_inner();
        tracing::info!("Updating item {:?}", item);
        let mut tx = self.db.begin().await?;
        let result = sqlx::query(
            r#"
            UPDATE item
            SET name = $1, price = $2, manufacturer = $3
            WHERE id = $4
            "#,
        )
        .bind(&item.name)
        .bind(item.price)
        .bind(&item.manufacturer)
        .bind(item.id)
        .execute(&mut *tx)
        .await;

        match result {
            Ok(done) if done.rows_affected() == 0 => {
                tracing::warn!("Item not found");
                tx.rollback().await?;
                Err(RepositoryError::NotFound)
            }
            Ok(_) => {
                tx.commit().await?;
                tracing::info!("Updated item");
                Ok(item)
            }
            Err(e) => {
                tracing::warn!("Rolling back update: {}", e);
                if let Err(rollback) = tx.rollback().await {
                    tracing::error!("Rollback failed: {}", rollback);
                }
                Err(e.into())
            }
        }
    }

    #[instrument(skip(self))]
    async fn delete_item(&self, id: Uuid) -> Result<Uuid, RepositoryError> {
        tracing::info!("Deleting item {:?}", id);
        let rows = sqlx::query(
            r#"
            DELETE FROM item
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.db)
        .await?;
        tracing::info!("Deleted {} item(s)", rows.rows_affected());
        Ok(id)
    }
}
