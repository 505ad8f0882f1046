use crate::services::token_service;
use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage, HttpResponse,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

/// Bearer-token gate for protected routes. The `Authorization` header
/// carries the raw token with no scheme prefix; clients of the original
/// API send it unprefixed and that contract is kept.
///
/// Missing header rejects with 401, failed verification with 400. On
/// success the decoded claims are attached to the request extensions.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
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
        let token = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let token = match token {
            Some(token) => token,
            None => {
                log::warn!("Rejected {} {}: no token", req.method(), req.path());
                let response = HttpResponse::Unauthorized().json(serde_json::json!({
                    "error": "Access denied. Token missing."
                }));
                return Box::pin(async move {
                    Ok(req.into_response(response).map_into_right_body())
                });
            }
        };

        match token_service::verify(&token) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                Box::pin(async move {
                    let res = fut.await?;
                    Ok(res.map_into_left_body())
                })
            }
            Err(e) => {
                log::warn!("Rejected {} {}: {}", req.method(), req.path(), e);
                let response = HttpResponse::BadRequest().json(serde_json::json!({
                    "error": "Invalid token."
                }));
                Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn protected_handler(
        hits: Arc<AtomicUsize>,
    ) -> impl Fn() -> LocalBoxFuture<'static, HttpResponse> + Clone + 'static {
        move || {
            let hits = hits.clone();
            Box::pin(async move {
                hits.fetch_add(1, Ordering::SeqCst);
                HttpResponse::Ok().json(serde_json::json!({ "ok": true }))
            })
        }
    }

    #[actix_web::test]
    async fn missing_token_is_401_and_handler_never_runs() {
        std::env::set_var("JWT_SECRET", "test-secret");
        let hits = Arc::new(AtomicUsize::new(0));
        let app = test::init_service(App::new().service(
            web::resource("/protected")
                .wrap(AuthMiddleware)
                .route(web::get().to(protected_handler(hits.clone()))),
        ))
        .await;

        let req = test::TestRequest::get().uri("/protected").to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), 401);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[actix_web::test]
    async fn invalid_token_is_400_and_handler_never_runs() {
        std::env::set_var("JWT_SECRET", "test-secret");
        let hits = Arc::new(AtomicUsize::new(0));
        let app = test::init_service(App::new().service(
            web::resource("/protected")
                .wrap(AuthMiddleware)
                .route(web::get().to(protected_handler(hits.clone()))),
        ))
        .await;

        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header(("Authorization", "definitely-not-a-jwt"))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), 400);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[actix_web::test]
    async fn valid_token_admits_the_request() {
        std::env::set_var("JWT_SECRET", "test-secret");
        let hits = Arc::new(AtomicUsize::new(0));
        let app = test::init_service(App::new().service(
            web::resource("/protected")
                .wrap(AuthMiddleware)
                .route(web::get().to(protected_handler(hits.clone()))),
        ))
        .await;

        let token = token_service::issue("65f0c0ffee0ddba11ca7ab1e", "a@b.com").unwrap();

        // Raw token, no "Bearer " prefix
        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header(("Authorization", token))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), 200);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
