use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use mongodb::bson::doc;
use std::future::{ready, Ready};
use std::rc::Rc;

use crate::database::{Collection, DocumentStore};
use crate::models::User;
use crate::services::auth_service::Claims;
use crate::utils::error::ApiError;

/// Lets the request through only when the authenticated user has the admin role.
///
/// Reads the [`Claims`] left by [`super::auth::AuthMiddleware`], so it must be
/// registered *before* it (actix runs the last `.wrap()` first).
pub struct AdminGate;

impl<S, B> Transform<S, ServiceRequest> for AdminGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AdminGateService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminGateService {
            service: Rc::new(service),
        }))
    }
}

pub struct AdminGateService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AdminGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            match require_admin(&req).await {
                Ok(()) => {
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(e) => {
                    log::warn!("⛔ {} {} rejected: {}", req.method(), req.path(), e);
                    Ok(req.error_response(e).map_into_right_body())
                }
            }
        })
    }
}

async fn require_admin(req: &ServiceRequest) -> Result<(), ApiError> {
    let email = req
        .extensions()
        .get::<Claims>()
        .map(|claims| claims.email.clone())
        .ok_or(ApiError::MissingToken)?;

    let store = req
        .app_data::<web::Data<dyn DocumentStore>>()
        .cloned()
        .ok_or(ApiError::Internal("document store not registered"))?;

    let user = store
        .find_one(Collection::Users, doc! { "email": &email })
        .await?
        .map(|document| User::from_document(&document));

    match user {
        Some(user) if user.is_admin() => {
            log::debug!("👑 Admin access for {}", user.email.as_deref().unwrap_or(&email));
            Ok(())
        }
        _ => Err(ApiError::Forbidden),
    }
}
