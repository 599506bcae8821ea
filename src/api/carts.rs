use actix_web::{web, HttpResponse};
use serde_json::{Map, Value};

use crate::api::common;
use crate::database::{Collection, DocumentStore};
use crate::models::OwnerQuery;
use crate::services::auth_service::Claims;
use crate::utils::error::ApiError;

#[utoipa::path(
    post,
    path = "/carts",
    tag = "Carts",
    request_body(content = Object, description = "Free-form JSON object"),
    responses((status = 200, description = "Insert outcome", body = crate::database::InsertOutcome))
)]
pub async fn add_to_cart(
    store: web::Data<dyn DocumentStore>,
    body: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, ApiError> {
    log::info!("🛒 POST /carts");
    common::insert(store.get_ref(), Collection::Cart, body.into_inner()).await
}

#[utoipa::path(
    get,
    path = "/carts",
    tag = "Carts",
    params(OwnerQuery),
    responses(
        (status = 200, description = "Caller's cart entries"),
        (status = 400, description = "Email parameter missing or empty"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Email does not match the token"),
        (status = 404, description = "Cart is empty")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_cart(
    claims: web::ReqData<Claims>,
    store: web::Data<dyn DocumentStore>,
    query: web::Query<OwnerQuery>,
) -> Result<HttpResponse, ApiError> {
    log::info!("🛒 GET /carts - email: {:?}", query.email);
    common::list_owned(
        store.get_ref(),
        Collection::Cart,
        &claims,
        &query,
        "No cart records found for the provided email.",
    )
    .await
}

/// DELETE /carts/{id} - Cart ids are object ids like every other collection
#[utoipa::path(
    delete,
    path = "/carts/{id}",
    tag = "Carts",
    params(("id" = String, Path, description = "Cart entry object id (24 hex chars)")),
    responses(
        (status = 200, description = "Delete outcome", body = crate::database::DeleteOutcome),
        (status = 400, description = "Malformed id")
    )
)]
pub async fn remove_from_cart(
    store: web::Data<dyn DocumentStore>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    log::info!("🗑️  DELETE /carts/{}", id);
    common::delete_by_id(store.get_ref(), Collection::Cart, &id).await
}
