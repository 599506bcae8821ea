use actix_web::{web, HttpResponse};
use serde_json::{Map, Value};

use crate::api::common;
use crate::database::{Collection, DocumentStore};
use crate::utils::error::ApiError;

#[utoipa::path(
    get,
    path = "/menu",
    tag = "Menu",
    responses((status = 200, description = "All menu items"))
)]
pub async fn list_menu(store: web::Data<dyn DocumentStore>) -> Result<HttpResponse, ApiError> {
    log::info!("🍽️  GET /menu");
    common::list_all(store.get_ref(), Collection::Menu).await
}

#[utoipa::path(
    post,
    path = "/menu",
    tag = "Menu",
    request_body(content = Object, description = "Free-form JSON object"),
    responses((status = 200, description = "Insert outcome", body = crate::database::InsertOutcome))
)]
pub async fn create_menu_item(
    store: web::Data<dyn DocumentStore>,
    body: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, ApiError> {
    log::info!("📝 POST /menu");
    common::insert(store.get_ref(), Collection::Menu, body.into_inner()).await
}

#[utoipa::path(
    delete,
    path = "/menu/{id}",
    tag = "Menu",
    params(("id" = String, Path, description = "Menu item object id (24 hex chars)")),
    responses(
        (status = 200, description = "Delete outcome, deletedCount 0 when nothing matched", body = crate::database::DeleteOutcome),
        (status = 400, description = "Malformed id")
    )
)]
pub async fn delete_menu_item(
    store: web::Data<dyn DocumentStore>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    log::info!("🗑️  DELETE /menu/{}", id);
    common::delete_by_id(store.get_ref(), Collection::Menu, &id).await
}
