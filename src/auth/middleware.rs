use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{Header, AUTHORIZATION},
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use actix_web_httpauth::headers::authorization::{Authorization, Bearer};
use futures::future::LocalBoxFuture;

use crate::{
    auth::{Claims, JwtService},
    errors::{AppError, AppResult},
};

/// Outcome of resolving the caller's bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    Anonymous,
    Authenticated(Claims),
    /// A token was sent but could not be resolved to a user.
    Invalid(String),
}

impl Session {
    pub fn resolve(req: &ServiceRequest) -> Self {
        if !req.headers().contains_key(AUTHORIZATION) {
            return Session::Anonymous;
        }

        let Some(jwt_service) = req.app_data::<web::Data<JwtService>>() else {
            return Session::Invalid("JWT service not configured".to_string());
        };

        let token = match Authorization::<Bearer>::parse(req) {
            Ok(header) => header.into_scheme().token().to_string(),
            Err(_) => return Session::Invalid("Invalid authorization header format".to_string()),
        };

        match jwt_service.validate_token(&token) {
            Ok(claims) => Session::Authenticated(claims),
            Err(e) => Session::Invalid(e.to_string()),
        }
    }

    /// The signed-in user, `None` for anonymous callers, an error when lookup failed.
    pub fn user(&self) -> AppResult<Option<&Claims>> {
        match self {
            Session::Anonymous => Ok(None),
            Session::Authenticated(claims) => Ok(Some(claims)),
            Session::Invalid(reason) => Err(AppError::Unauthorized(reason.clone())),
        }
    }
}

/// Resolves the session for every request. Never rejects on its own; handlers
/// decide whether a session is required.
pub struct SessionMiddleware;

impl<S, B> Transform<S, ServiceRequest> for SessionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct SessionMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for SessionMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        let session = Session::resolve(&req);
        if let Session::Invalid(reason) = &session {
            log::debug!("Session lookup failed: {}", reason);
        }
        req.extensions_mut().insert(session);

        Box::pin(async move { service.call(req).await })
    }
}

/// Session of the current request, whatever its state.
pub struct CurrentSession(pub Session);

impl FromRequest for CurrentSession {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let session = req
            .extensions()
            .get::<Session>()
            .cloned()
            .unwrap_or_else(|| Session::Invalid("Session middleware not installed".to_string()));

        ready(Ok(CurrentSession(session)))
    }
}

// Extractor for handlers that require a signed-in user
pub struct AuthenticatedUser(pub Claims);

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let claims = match req.extensions().get::<Session>() {
            Some(Session::Authenticated(claims)) => Ok(claims.clone()),
            Some(Session::Invalid(reason)) => Err(AppError::Unauthorized(reason.clone())),
            _ => Err(AppError::Unauthorized("Not authenticated".to_string())),
        };

        ready(claims.map(AuthenticatedUser))
    }
}
