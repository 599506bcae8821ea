use actix_web::{web, HttpResponse};
use serde_json::{Map, Value};

use crate::api::common;
use crate::database::{Collection, DocumentStore};
use crate::models::OwnerQuery;
use crate::services::auth_service::Claims;
use crate::utils::error::ApiError;

/// GET /reviews - Public wall of every review (no `email` in the query)
///
/// The OpenAPI entry also covers [`list_own_reviews`], which shares the path.
#[utoipa::path(
    get,
    path = "/reviews",
    tag = "Reviews",
    params(("email" = Option<String>, Query, description = "When present, lists only the caller's reviews and requires a bearer token")),
    responses(
        (status = 200, description = "All reviews, or the caller's reviews when `email` is given"),
        (status = 400, description = "Email parameter empty"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Email does not match the token"),
        (status = 404, description = "No reviews for this email")
    )
)]
pub async fn list_reviews(store: web::Data<dyn DocumentStore>) -> Result<HttpResponse, ApiError> {
    log::info!("⭐ GET /reviews");
    common::list_all(store.get_ref(), Collection::Reviews).await
}

/// GET /reviews?email= - The caller's own reviews
///
/// Routed here whenever the query string has an `email` key; requires a token.
pub async fn list_own_reviews(
    claims: web::ReqData<Claims>,
    store: web::Data<dyn DocumentStore>,
    query: web::Query<OwnerQuery>,
) -> Result<HttpResponse, ApiError> {
    log::info!("⭐ GET /reviews - email: {:?}", query.email);
    common::list_owned(
        store.get_ref(),
        Collection::Reviews,
        &claims,
        &query,
        "No reviews found for the provided email.",
    )
    .await
}

#[utoipa::path(
    post,
    path = "/reviews",
    tag = "Reviews",
    request_body(content = Object, description = "Free-form JSON object"),
    responses((status = 200, description = "Insert outcome", body = crate::database::InsertOutcome))
)]
pub async fn create_review(
    store: web::Data<dyn DocumentStore>,
    body: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, ApiError> {
    log::info!("📝 POST /reviews");
    common::insert(store.get_ref(), Collection::Reviews, body.into_inner()).await
}
