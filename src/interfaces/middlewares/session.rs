use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::Method,
    web, Error, HttpMessage,
};
use futures_util::future::{ok, LocalBoxFuture, Ready};
use std::{rc::Rc, task::{Context, Poll}};

use crate::{
    constants::{API_AUTH_PREFIX, AUTH_ROUTES, PUBLIC_ROUTES},
    errors::SessionError,
    utils::redirect::redirect_to,
    AppState,
};

/// Resolves the visitor's session once per request and gates non-public routes.
pub struct SessionMiddleware;

impl<S> Transform<S, ServiceRequest> for SessionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(SessionMiddlewareService {
            service: Rc::new(service),
        })
    }
}

pub struct SessionMiddlewareService<S> {
    service: Rc<S>,
}

impl<S> Service<ServiceRequest> for SessionMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            if req.method() == Method::OPTIONS {
                return service.call(req).await;
            }

            let state = req.app_data::<web::Data<AppState>>()
                .cloned()
                .ok_or_else(|| {
                    tracing::error!("AppState missing in session middleware");
                    SessionError::MissingSessionService
                })?;

            let session = state.session_service.resolve(req.request());
            let path = req.path().to_string();
            let signed_in = session.is_some();

            if let Some(session) = session {
                req.extensions_mut().insert(session);
            }

            match route_access(&path, signed_in) {
                RouteAccess::Allow => service.call(req).await,
                RouteAccess::AlreadySignedIn => {
                    let response = redirect_to(&state.config.login_redirect);
                    Ok(req.into_response(response))
                }
                RouteAccess::SignInRequired => {
                    tracing::debug!(%path, "No session, redirecting");
                    let response = redirect_to(&state.config.unauthorized_redirect);
                    Ok(req.into_response(response))
                }
            }
        })
    }
}

#[derive(Debug, PartialEq)]
enum RouteAccess {
    Allow,
    AlreadySignedIn,
    SignInRequired,
}

fn route_access(path: &str, signed_in: bool) -> RouteAccess {
    if AUTH_ROUTES.contains(&path) {
        return if signed_in { RouteAccess::AlreadySignedIn } else { RouteAccess::Allow };
    }

    if is_public_route(path) || signed_in {
        RouteAccess::Allow
    } else {
        RouteAccess::SignInRequired
    }
}

fn is_public_route(path: &str) -> bool {
    PUBLIC_ROUTES.contains(&path) || is_under(path, API_AUTH_PREFIX)
}

/// `prefix` itself or anything below it, but not `/api/authors`.
pub(crate) fn is_under(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_routes_need_no_session() {
        for path in ["/", "/tos", "/privacy-policy", "/api/webhook", "/api/auth/session"] {
            assert_eq!(route_access(path, false), RouteAccess::Allow, "{path}");
        }
    }

    #[test]
    fn login_sends_signed_in_visitors_on() {
        assert_eq!(route_access("/login", false), RouteAccess::Allow);
        assert_eq!(route_access("/login", true), RouteAccess::AlreadySignedIn);
    }

    #[test]
    fn private_routes_require_a_session() {
        assert_eq!(route_access("/launch", false), RouteAccess::SignInRequired);
        assert_eq!(route_access("/api/directories", false), RouteAccess::SignInRequired);
        assert_eq!(route_access("/api/authors", false), RouteAccess::SignInRequired);
        assert_eq!(route_access("/launch", true), RouteAccess::Allow);
    }

    #[test]
    fn prefix_match_respects_segments() {
        assert!(is_under("/admin", "/admin"));
        assert!(is_under("/admin/api/users", "/admin"));
        assert!(!is_under("/administrator", "/admin"));
    }
}
