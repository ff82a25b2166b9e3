//! OpenAPI configuration.

use crate::feature::{
    health::health_api,
    item::{item_api, item_repository},
};
use utoipa::OpenApi;

/// OpenApi configuration.
#[derive(OpenApi)]
#[openapi(
    info(title = "Shopping cart service"),
    paths(
        item_api::list_items,
        item_api::get_item,
        item_api::create_item,
        item_api::update_item,
        item_api::delete_item,
        health_api::health,
    ),
    components(
        schemas(
            item_repository::NewItem,
            item_repository::Item,
            item_api::ItemData,
            item_api::ItemList,
            item_api::ItemForm,
            item_api::UpdateItemRequest,
            health_api::Pong,
            crate::infra::error::ErrorBody
        )
    )
)]
#[derive(Clone, Copy, Debug)]
pub struct ApiDoc;
