use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use futures_util::future::{ok, LocalBoxFuture, Ready};
use std::{rc::Rc, task::{Context, Poll}};

use crate::{entities::session::Session, utils::redirect::redirect_to, AppState};

/// Admin area gate: anything but an `ADMIN` session is redirected away.
///
/// Relies on [`SessionMiddleware`](super::session::SessionMiddleware) having
/// put the session into the request extensions.
pub struct AdminGate;

impl<S> Transform<S, ServiceRequest> for AdminGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = AdminGateService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AdminGateService {
            service: Rc::new(service),
        })
    }
}

pub struct AdminGateService<S> {
    service: Rc<S>,
}

impl<S> Service<ServiceRequest> for AdminGateService<S>
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
            let is_admin = req.extensions()
                .get::<Session>()
                .is_some_and(Session::is_admin);

            if is_admin {
                return service.call(req).await;
            }

            tracing::warn!(path = %req.path(), "Admin access denied");

            let target = req.app_data::<web::Data<AppState>>()
                .map(|state| state.config.unauthorized_redirect.clone())
                .unwrap_or_else(|| "/".to_string());

            Ok(req.into_response(redirect_to(&target)))
        })
    }
}
