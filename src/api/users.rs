use actix_web::{web, HttpResponse};
use mongodb::bson::{self, doc};
use serde_json::{Map, Value};

use crate::api::common;
use crate::database::{Collection, DocumentStore, StoreError};
use crate::models::{AdminStatus, MessageResponse, Role, User};
use crate::services::auth_service::Claims;
use crate::utils::error::ApiError;

/// GET /users - Every user document (admin only)
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_users(store: web::Data<dyn DocumentStore>) -> Result<HttpResponse, ApiError> {
    log::info!("👥 GET /users");
    common::list_all(store.get_ref(), Collection::Users).await
}

/// POST /users - Registers the posted user unless the email is already known
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body(content = Object, description = "Free-form JSON object"),
    responses(
        (status = 200, description = "Insert outcome, or a message when the email already exists", body = MessageResponse)
    )
)]
pub async fn create_user(
    store: web::Data<dyn DocumentStore>,
    body: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let email = body.get("email").cloned().unwrap_or(Value::Null);
    log::info!("📝 POST /users - email: {}", email);

    let email = bson::to_bson(&email).map_err(StoreError::from)?;
    if store.find_one(Collection::Users, doc! { "email": email }).await?.is_some() {
        log::info!("ℹ️  User already exists");
        return Ok(HttpResponse::Ok().json(MessageResponse {
            message: "User already exists.".to_string(),
        }));
    }

    common::insert(store.get_ref(), Collection::Users, body).await
}

/// PATCH /users/admin/{id} - Grants the admin role
#[utoipa::path(
    patch,
    path = "/users/admin/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User object id (24 hex chars)")),
    responses(
        (status = 200, description = "Update outcome", body = crate::database::UpdateOutcome),
        (status = 400, description = "Malformed id")
    )
)]
pub async fn promote_user(
    store: web::Data<dyn DocumentStore>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    log::info!("👑 PATCH /users/admin/{}", id);

    let object_id = common::parse_object_id(&id)?;
    let outcome = store
        .update_one(
            Collection::Users,
            doc! { "_id": object_id },
            doc! { "role": Role::Admin.as_str() },
        )
        .await?;

    log::info!("✅ Matched {}, modified {}", outcome.matched_count, outcome.modified_count);
    Ok(HttpResponse::Ok().json(outcome))
}

/// DELETE /users/admin/{id} - Removes a user (their carts, reviews and reservations stay)
#[utoipa::path(
    delete,
    path = "/users/admin/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User object id (24 hex chars)")),
    responses(
        (status = 200, description = "Delete outcome", body = crate::database::DeleteOutcome),
        (status = 400, description = "Malformed id")
    )
)]
pub async fn delete_user(
    store: web::Data<dyn DocumentStore>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    log::info!("🗑️  DELETE /users/admin/{}", id);
    common::delete_by_id(store.get_ref(), Collection::Users, &id).await
}

/// GET /users/admin/{email} - Whether the caller is an admin
///
/// Only answers for the caller's own email; asking about anybody else yields
/// `{ admin: false }` without touching the store.
#[utoipa::path(
    get,
    path = "/users/admin/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "Email to check; must be the caller's")),
    responses(
        (status = 200, description = "Admin flag", body = AdminStatus),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn admin_status(
    claims: web::ReqData<Claims>,
    store: web::Data<dyn DocumentStore>,
    email: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let email = email.into_inner();
    log::info!("🔎 GET /users/admin/{}", email);

    if claims.email != email {
        log::warn!("⚠️  {} asked about admin status of {}", claims.email, email);
        return Ok(HttpResponse::Ok().json(AdminStatus { admin: false }));
    }

    let admin = store
        .find_one(Collection::Users, doc! { "email": &email })
        .await?
        .map(|document| User::from_document(&document).is_admin())
        .unwrap_or(false);

    Ok(HttpResponse::Ok().json(AdminStatus { admin }))
}
