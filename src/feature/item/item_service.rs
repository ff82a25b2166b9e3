//! A service for interacting with items.
//!
//! Validates input before anything is written and translates repository
//! failures into [`ServiceError`]s where callers need a coarse tag.

use super::item_repository::{Item, ItemRepository, NewItem, RepositoryError};
use crate::infra::{
    pagination::Page,
    validation::{Valid, ValidationFailure},
};
use async_trait::async_trait;
use std::fmt;
use tracing::instrument;
use uuid::Uuid;

/// Coarse classification of a [`ServiceError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ServiceErrorCode {
    /// The item does not exist (anymore).
    ItemNotFound,
    /// The item failed validation.
    InvalidItem,
    /// Anything else, usually a database failure.
    UnknownException,
}

impl fmt::Display for ServiceErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ItemNotFound => "ItemNotFound",
            Self::InvalidItem => "InvalidItem",
            Self::UnknownException => "UnknownException",
        };
        f.write_str(name)
    }
}

/// A tagged failure from [`ItemService::update_item`] or [`ItemService::remove_item`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ServiceError {
    code: ServiceErrorCode,
    message: String,
}

impl ServiceError {
    /// Creates a new service error.
    pub fn new(message: impl Into<String>, code: ServiceErrorCode) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn code(&self) -> ServiceErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Why [`ItemService::add_item`] failed.
#[derive(Debug, thiserror::Error)]
pub enum AddItemError {
    /// The new item failed validation; nothing was written.
    #[error("{0}")]
    Invalid(#[from] ValidationFailure),
    /// The repository failed.
    #[error("{0}")]
    Repository(#[from] RepositoryError),
}

/// Item operations as seen by the HTTP layer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemService: Send + Sync {
    /// Lists one page of items.
    async fn get_items(&self, page: Page) -> Result<Vec<Item>, RepositoryError>;

    /// Fetches one item.
    async fn get_item_by_id(&self, id: Uuid) -> Result<Item, RepositoryError>;

    /// Validates and stores a new item.
    async fn add_item(&self, new_item: NewItem) -> Result<Item, AddItemError>;

    /// Validates and replaces an existing item.
    async fn update_item(&self, item: Item) -> Result<Item, ServiceError>;

    /// Removes an item.
    async fn remove_item(&self, id: Uuid) -> Result<Uuid, ServiceError>;
}

/// The [`ItemService`] used in production.
#[derive(Clone, Debug)]
pub struct CartService<R> {
    repository: R,
}

impl<R: ItemRepository> CartService<R> {
    /// Creates a service on top of a repository.
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: ItemRepository> ItemService for CartService<R> {
    #[instrument(skip(self))]
    async fn get_items(&self, page: Page) -> Result<Vec<Item>, RepositoryError> {
        self.repository.list_items(page).await
    }

    #[instrument(skip(self))]
    async fn get_item_by_id(&self, id: Uuid) -> Result<Item, RepositoryError> {
        self.repository.get_item(id).await
    }

    #[instrument(skip(self))]
    async fn add_item(&self, new_item: NewItem) -> Result<Item, AddItemError> {
        let new_item = Valid::new(new_item)?;
        Ok(self.repository.create_item(new_item).await?)
    }

    #[instrument(skip(self))]
    async fn update_item(&self, item: Item) -> Result<Item, ServiceError> {
        let item = Valid::new(item)
            .map_err(|e| ServiceError::new(e.message(), ServiceErrorCode::InvalidItem))?;
        self.repository.update_item(item).await.map_err(|e| match e {
            RepositoryError::NotFound => {
                ServiceError::new(e.to_string(), ServiceErrorCode::ItemNotFound)
            }
            e => ServiceError::new(e.to_string(), ServiceErrorCode::UnknownException),
        })
    }

    #[instrument(skip(self))]
    async fn remove_item(&self, id: Uuid) -> Result<Uuid, ServiceError> {
        self.repository
            .delete_item(id)
            .await
            .map_err(|e| ServiceError::new(e.to_string(), ServiceErrorCode::UnknownException))
    }
}
