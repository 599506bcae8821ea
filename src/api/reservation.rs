use actix_web::{web, HttpResponse};
use serde_json::{Map, Value};

use crate::api::common;
use crate::database::{Collection, DocumentStore};
use crate::models::OwnerQuery;
use crate::services::auth_service::Claims;
use crate::utils::error::ApiError;

#[utoipa::path(
    post,
    path = "/reservation",
    tag = "Reservation",
    request_body(content = Object, description = "Free-form JSON object"),
    responses((status = 200, description = "Insert outcome", body = crate::database::InsertOutcome))
)]
pub async fn create_reservation(
    store: web::Data<dyn DocumentStore>,
    body: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, ApiError> {
    log::info!("📅 POST /reservation");
    common::insert(store.get_ref(), Collection::Reservation, body.into_inner()).await
}

#[utoipa::path(
    get,
    path = "/reservation",
    tag = "Reservation",
    params(OwnerQuery),
    responses(
        (status = 200, description = "Caller's reservations"),
        (status = 400, description = "Email parameter missing or empty"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Email does not match the token"),
        (status = 404, description = "No reservations for this email")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_reservations(
    claims: web::ReqData<Claims>,
    store: web::Data<dyn DocumentStore>,
    query: web::Query<OwnerQuery>,
) -> Result<HttpResponse, ApiError> {
    log::info!("📅 GET /reservation - email: {:?}", query.email);
    common::list_owned(
        store.get_ref(),
        Collection::Reservation,
        &claims,
        &query,
        "No reservation records found for the provided email.",
    )
    .await
}

#[utoipa::path(
    delete,
    path = "/reservation/{id}",
    tag = "Reservation",
    params(("id" = String, Path, description = "Reservation object id (24 hex chars)")),
    responses(
        (status = 200, description = "Delete outcome", body = crate::database::DeleteOutcome),
        (status = 400, description = "Malformed id")
    )
)]
pub async fn delete_reservation(
    store: web::Data<dyn DocumentStore>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    log::info!("🗑️  DELETE /reservation/{}", id);
    common::delete_by_id(store.get_ref(), Collection::Reservation, &id).await
}
