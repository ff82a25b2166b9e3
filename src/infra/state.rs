//! Global application state.
//!
//! Used for access to common resources such as the
//! database pool and the item service.

use super::database::DbPool;
use crate::feature::item::{
    item_repository::PgItemRepository,
    item_service::{CartService, ItemService},
};
use axum::extract::FromRef;
use std::sync::Arc;

/// The item service as handlers see it.
pub type DynItemService = Arc<dyn ItemService>;

/// Global application state.
#[derive(Clone, FromRef)]
pub struct AppState {
    db: DbPool,
    items: DynItemService,
}

impl AppState {
    /// Constructs a new [`AppState`] backed by Postgres.
    pub fn new(db: DbPool) -> Self {
        let items = Arc::new(CartService::new(PgItemRepository::new(db.clone())));
        Self::with_item_service(db, items)
    }

    /// Constructs a new [`AppState`] with a custom item service.
    pub fn with_item_service(db: DbPool, items: DynItemService) -> Self {
        Self { db, items }
    }

    /// Returns the database pool.
    pub fn db(&self) -> &DbPool {
        &self.db
    }
}
