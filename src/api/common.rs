//! Shapes shared by every resource group: list, insert, delete-by-id, owner-scoped list.

use actix_web::{guard::GuardContext, HttpResponse};
use mongodb::bson::{doc, oid::ObjectId};
use serde_json::{Map, Value};

use crate::database::{document_to_json, json_to_document, Collection, DocumentStore};
use crate::models::OwnerQuery;
use crate::services::auth_service::Claims;
use crate::utils::error::ApiError;

pub const MISSING_EMAIL: &str = "Email parameter is missing or empty.";

pub fn parse_object_id(id: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(id).map_err(|_| ApiError::InvalidId(id.to_string()))
}

pub async fn list_all(store: &dyn DocumentStore, collection: Collection) -> Result<HttpResponse, ApiError> {
    let documents = store.find_all(collection).await?;
    log::info!("✅ {} {} documents", documents.len(), collection.name());
    Ok(HttpResponse::Ok().json(documents.into_iter().map(document_to_json).collect::<Vec<_>>()))
}

pub async fn insert(
    store: &dyn DocumentStore,
    collection: Collection,
    body: Map<String, Value>,
) -> Result<HttpResponse, ApiError> {
    // Values BSON cannot hold, such as integers above i64::MAX, are a bad request
    let document = json_to_document(&body).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let outcome = store.insert_one(collection, document).await?;
    log::info!("✅ Inserted into {}: {}", collection.name(), outcome.inserted_id);
    Ok(HttpResponse::Ok().json(outcome))
}

/// Deletes by `_id`. A miss is still a 200 carrying `deletedCount: 0`.
pub async fn delete_by_id(store: &dyn DocumentStore, collection: Collection, id: &str) -> Result<HttpResponse, ApiError> {
    let object_id = parse_object_id(id)?;
    let outcome = store.delete_one(collection, doc! { "_id": object_id }).await?;
    log::info!("🗑️  Deleted {} document(s) from {}", outcome.deleted_count, collection.name());
    Ok(HttpResponse::Ok().json(outcome))
}

/// Lists the caller's own documents in `collection`.
///
/// The queried email must be present and equal to the token email; an empty
/// result is reported as 404 with `empty_message`.
pub async fn list_owned(
    store: &dyn DocumentStore,
    collection: Collection,
    claims: &Claims,
    query: &OwnerQuery,
    empty_message: &str,
) -> Result<HttpResponse, ApiError> {
    let email = query
        .email
        .as_deref()
        .filter(|email| !email.is_empty())
        .ok_or_else(|| ApiError::BadRequest(MISSING_EMAIL.to_string()))?;

    if email != claims.email {
        log::warn!("⛔ {} asked for {} of {}", claims.email, collection.name(), email);
        return Err(ApiError::Forbidden);
    }

    let documents = store.find(collection, doc! { "email": email }).await.map_err(|e| {
        log::error!("❌ Error fetching {} data: {}", collection.name(), e);
        ApiError::from(e)
    })?;

    if documents.is_empty() {
        return Err(ApiError::NotFound(empty_message.to_string()));
    }

    log::info!("✅ {} {} documents for {}", documents.len(), collection.name(), email);
    Ok(HttpResponse::Ok().json(documents.into_iter().map(document_to_json).collect::<Vec<_>>()))
}

/// Route guard: the query string carries an `email` key (possibly empty).
pub fn has_email_query(ctx: &GuardContext<'_>) -> bool {
    ctx.head()
        .uri
        .query()
        .map(|query| query.split('&').any(|pair| pair.split('=').next() == Some("email")))
        .unwrap_or(false)
}
