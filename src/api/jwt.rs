use actix_web::{web, HttpResponse};
use serde_json::{Map, Value};

use crate::models::TokenResponse;
use crate::services::auth_service::TokenSigner;
use crate::utils::error::ApiError;

/// POST /jwt - Signs the posted payload into a one-hour access token.
///
/// Trust-on-request: the email in the payload is not checked against the
/// users collection.
#[utoipa::path(
    post,
    path = "/jwt",
    tag = "Auth",
    request_body(content = Object, description = "Free-form JSON object"),
    responses(
        (status = 200, description = "Signed access token", body = TokenResponse),
        (status = 400, description = "Body is not a JSON object")
    )
)]
pub async fn issue_token(
    signer: web::Data<TokenSigner>,
    payload: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();
    log::info!(
        "🔐 POST /jwt - email: {}",
        payload.get("email").and_then(Value::as_str).unwrap_or("N/A")
    );

    let token = signer.issue(payload)?;
    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}
