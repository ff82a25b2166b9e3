//! The item API implementation.

use super::{
    item_repository::{Item, RepositoryError},
    item_service::{AddItemError, ServiceError, ServiceErrorCode},
};
use crate::{
    feature::item::item_repository::NewItem,
    infra::{
        error::{ApiError, ApiResult, ClientError, ErrorBody, InternalError},
        extract::{Form, Json, Query},
        pagination::PaginationParams,
        state::{AppState, DynItemService},
    },
};
use axum::{extract::State, Router};
use axum_extra::routing::{RouterExt, TypedPath};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;
use uuid::Uuid;

/// The item API endpoints.
pub fn routes() -> Router<AppState> {
    Router::new()
        .typed_get(list_items)
        .typed_post(create_item)
        .typed_get(get_item)
        .typed_put(update_item)
        .typed_delete(delete_item)
}

#[derive(Deserialize, TypedPath)]
#[typed_path("/items", rejection(ClientError))]
pub struct Items;

#[derive(Deserialize, TypedPath)]
#[typed_path("/items/:id", rejection(ClientError))]
pub struct ItemsId(Uuid);

/// A single item in the response envelope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ItemData {
    pub data: Item,
}

/// A page of items in the response envelope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ItemList {
    pub data: Vec<Item>,
}

/// The url-encoded form accepted when creating an item.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ItemForm {
    #[schema(example = "Widget")]
    pub name: String,
    /// Must parse as an integer.
    #[schema(example = "150")]
    pub price: String,
    #[schema(example = "Acme")]
    pub manufacturer: String,
}

/// The JSON body accepted when updating an item. The price is sent as a string.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateItemRequest {
    #[schema(example = "Widget2")]
    pub name: String,
    /// Must parse as an integer.
    #[schema(example = "200")]
    pub price: String,
    #[schema(example = "Acme")]
    pub manufacturer: String,
}

fn parse_price(raw: &str) -> Result<i64, ClientError> {
    raw.parse()
        .map_err(|_| ClientError::BadRequest(format!("invalid price: {raw:?}")))
}

impl From<RepositoryError> for ApiError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => ApiError::ClientError(ClientError::NotFound),
            RepositoryError::Database(e) => ApiError::InternalError(InternalError::SqlxError(e)),
        }
    }
}

impl From<AddItemError> for ApiError {
    fn from(e: AddItemError) -> Self {
        match e {
            AddItemError::Invalid(failure) => failure.into(),
            AddItemError::Repository(e) => e.into(),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e.code() {
            ServiceErrorCode::InvalidItem => {
                ApiError::ClientError(ClientError::BadRequest(e.message().to_string()))
            }
            ServiceErrorCode::ItemNotFound => ApiError::ClientError(ClientError::NotFound),
            ServiceErrorCode::UnknownException => {
                ApiError::InternalError(InternalError::Other(e.to_string()))
            }
        }
    }
}

/// Lists items, one page at a time.
#[utoipa::path(
    get,
    path = "/items",
    params(PaginationParams),
    responses(
        (status = 200, description = "Success", body = ItemList),
        (status = 500, description = "Internal error", body = ErrorBody),
    )
)]
#[instrument(skip_all)]
pub async fn list_items(
    _: Items,
    State(items): State<DynItemService>,
    Query(query): Query<Vec<(String, String)>>,
) -> ApiResult<Json<ItemList>> {
    let params: PaginationParams = query.into_iter().collect();
    let data = items.get_items(params.page()).await?;
    Ok(Json(ItemList { data }))
}

/// Gets an item.
#[utoipa::path(
    get,
    path = "/items/{id}",
    params(("id" = Uuid, Path, description = "The item's id")),
    responses(
        (status = 200, description = "Ok", body = ItemData),
        (status = 400, description = "Bad Request", body = ErrorBody),
        (status = 404, description = "Not Found", body = ErrorBody),
        (status = 500, description = "Internal Server Error", body = ErrorBody),
    )
)]
#[instrument(skip(items))]
pub async fn get_item(
    ItemsId(id): ItemsId,
    State(items): State<DynItemService>,
) -> ApiResult<Json<ItemData>> {
    let data = items.get_item_by_id(id).await?;
    Ok(Json(ItemData { data }))
}

/// Creates a new item.
#[utoipa::path(
    post,
    path = "/items",
    request_body(content = ItemForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Created", body = ItemData),
        (status = 400, description = "Bad Request", body = ErrorBody),
        (status = 500, description = "Internal Server Error", body = ErrorBody),
    )
)]
#[instrument(skip(items))]
pub async fn create_item(
    _: Items,
    State(items): State<DynItemService>,
    Form(form): Form<ItemForm>,
) -> ApiResult<(StatusCode, Json<ItemData>)> {
    let new_item = NewItem {
        price: parse_price(&form.price)?,
        name: form.name,
        manufacturer: form.manufacturer,
    };
    let data = items.add_item(new_item).await?;
    Ok((StatusCode::CREATED, Json(ItemData { data })))
}

/// Updates an item.
#[utoipa::path(
    put,
    path = "/items/{id}",
    params(("id" = Uuid, Path, description = "The item's id")),
    request_body = UpdateItemRequest,
    responses(
        (status = 200, description = "Ok", body = ItemData),
        (status = 400, description = "Bad Request", body = ErrorBody),
        (status = 404, description = "Not Found", body = ErrorBody),
        (status = 409, description = "Conflict", body = ErrorBody),
        (status = 500, description = "Internal Server Error", body = ErrorBody),
    )
)]
#[instrument(skip(items))]
pub async fn update_item(
    ItemsId(id): ItemsId,
    State(items): State<DynItemService>,
    Json(request): Json<UpdateItemRequest>,
) -> ApiResult<Json<ItemData>> {
    let price = parse_price(&request.price)?;

    // Not transactional with the update below; concurrent writers race.
    let existing = items.get_item_by_id(id).await?;
    if existing.id != id {
        tracing::warn!("Stored item {} does not match requested {}", existing.id, id);
        return Err(ClientError::Conflict.into());
    }

    let item = Item {
        id,
        name: request.name,
        price,
        manufacturer: request.manufacturer,
    };
    let data = items.update_item(item).await?;
    Ok(Json(ItemData { data }))
}

/// Deletes an item.
#[utoipa::path(
    delete,
    path = "/items/{id}",
    params(("id" = Uuid, Path, description = "The item's id")),
    responses(
        (status = 200, description = "Ok", body = String, example = json!("OK")),
        (status = 400, description = "Bad Request", body = ErrorBody),
        (status = 500, description = "Internal Server Error", body = ErrorBody),
    )
)]
#[instrument(skip(items))]
pub async fn delete_item(
    ItemsId(id): ItemsId,
    State(items): State<DynItemService>,
) -> ApiResult<Json<&'static str>> {
    items.remove_item(id).await?;
    Ok(Json("OK"))
}
