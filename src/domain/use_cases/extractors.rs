use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::{
    entities::session::Session,
    errors::{AppError, SessionError},
};

/// Session resolved by the session middleware, if any.
#[derive(Debug)]
pub struct MaybeSession(pub Option<Session>);

impl FromRequest for MaybeSession {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(MaybeSession(req.extensions().get::<Session>().cloned())))
    }
}

/// Signed-in visitor. Returns 401 when no session was resolved.
#[derive(Debug)]
pub struct CurrentSession(pub Session);

impl FromRequest for CurrentSession {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        match req.extensions().get::<Session>() {
            Some(session) => ready(Ok(CurrentSession(session.clone()))),
            None => ready(Err(SessionError::MissingSession.into())),
        }
    }
}

/// Signed-in administrator.
/// Returns 401 without a session and 403 for any other role.
#[derive(Debug)]
pub struct AdminSession(pub Session);

impl FromRequest for AdminSession {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        match req.extensions().get::<Session>() {
            Some(session) if session.is_admin() => ready(Ok(AdminSession(session.clone()))),
            Some(_) => ready(Err(AppError::ForbiddenAccess.into())),
            None => ready(Err(SessionError::MissingSession.into())),
        }
    }
}
