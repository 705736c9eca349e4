use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{self, HeaderValue},
    Error, HttpMessage, ResponseError,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::token::TokenService;
use crate::error::{AppError, MSG_ACCESS_DENIED};

/// Rejects requests without a valid session token before they reach a handler.
///
/// - no credential in `Authorization` → 403
/// - credential present but not verifiable → 401
/// - otherwise the token's [`Claims`](crate::auth::Claims) are stored in the request extensions
pub struct AuthGate {
    tokens: TokenService,
}

impl AuthGate {
    pub fn new(tokens: TokenService) -> Self {
        Self { tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthGateService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateService {
            service,
            tokens: self.tokens.clone(),
        }))
    }
}

pub struct AuthGateService<S> {
    service: S,
    tokens: TokenService,
}

/// Returns the second space-separated segment of the header, if non-empty.
///
/// The scheme word itself is not checked.
pub fn bearer_credential(value: Option<&HeaderValue>) -> Option<&str> {
    value
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(' ').nth(1))
        .filter(|token| !token.is_empty())
}

impl<S, B> Service<ServiceRequest> for AuthGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let outcome = match bearer_credential(req.headers().get(header::AUTHORIZATION)) {
            None => Err(AppError::Forbidden(MSG_ACCESS_DENIED.into())),
            Some(token) => self.tokens.verify(token).map_err(|e| {
                log::warn!("rejected token on {} {}: {}", req.method(), req.path(), e);
                AppError::from(e)
            }),
        };

        match outcome {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(app_err) => {
                log::debug!("auth gate denied {} {}", req.method(), req.path());
                let response = req
                    .into_response(app_err.error_response())
                    .map_into_right_body();
                Box::pin(async move { Ok(response) })
            }
        }
    }
}
