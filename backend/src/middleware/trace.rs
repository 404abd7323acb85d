//! Tracing middleware attaching a request-scoped trace identifier.
//!
//! Each request runs inside an `http_request` span carrying its
//! [`TraceId`], method and path. An upstream `trace-id` header holding a UUID
//! is adopted; otherwise a fresh one is generated. The identifier is echoed
//! in the response header and a completion event records status and latency.

use std::task::{Context, Poll};
use std::time::Instant;

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{Instrument, error, info, info_span};

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Tracing middleware adding a `trace-id` header to every response.
///
/// Handlers can read the identifier via [`TraceId::current`].
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::Trace;
///
/// let app = App::new().wrap(Trace);
/// ```
#[derive(Clone)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware { service }))
    }
}

/// Service wrapper produced by [`Trace`].
pub struct TraceMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let upstream = req
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok());
        let trace_id = TraceId::from_header_or_generate(upstream);
        let span = info_span!(
            "http_request",
            trace_id = %trace_id,
            method = %req.method(),
            path = %req.path(),
        );
        let started = Instant::now();
        let fut = span.in_scope(|| self.service.call(req));

        Box::pin(
            TraceId::scope(trace_id, async move {
                let mut res = fut.await?;
                match HeaderValue::from_str(&trace_id.to_string()) {
                    Ok(value) => {
                        res.response_mut()
                            .headers_mut()
                            .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
                    }
                    Err(error) => {
                        error!(%error, "failed to encode trace identifier header");
                    }
                }
                let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
                info!(
                    status = res.status().as_u16(),
                    latency_ms,
                    "request completed"
                );
                Ok(res)
            })
            .instrument(span),
        )
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{App, HttpResponse, test as actix_test, web};
    use rstest::rstest;

    use super::*;

    async fn trace_header(request: actix_test::TestRequest) -> (String, String) {
        let app = actix_test::init_service(App::new().wrap(Trace).route(
            "/",
            web::get().to(|| async {
                let id = TraceId::current().expect("trace id in scope");
                HttpResponse::Ok().body(id.to_string())
            }),
        ))
        .await;
        let res = actix_test::call_service(&app, request.uri("/").to_request()).await;
        let header = res
            .headers()
            .get(TRACE_ID_HEADER)
            .expect("trace id header")
            .to_str()
            .expect("header is ascii")
            .to_owned();
        let body = actix_test::read_body(res).await;
        let body = String::from_utf8(body.to_vec()).expect("utf8 body");
        (header, body)
    }

    #[rstest]
    #[actix_web::test]
    async fn handler_sees_the_identifier_it_returns() {
        let (header, body) = trace_header(actix_test::TestRequest::get()).await;

        assert!(header.parse::<TraceId>().is_ok());
        assert_eq!(header, body);
    }

    #[rstest]
    #[actix_web::test]
    async fn upstream_identifier_is_adopted() {
        let upstream = "6f1c2a8e-3b4d-4f5a-9c7e-1d2b3a4c5e6f";

        let (header, _) =
            trace_header(actix_test::TestRequest::get().insert_header((TRACE_ID_HEADER, upstream)))
                .await;

        assert_eq!(header, upstream);
    }

    #[rstest]
    #[actix_web::test]
    async fn garbage_upstream_identifier_is_replaced() {
        let (header, _) =
            trace_header(actix_test::TestRequest::get().insert_header((TRACE_ID_HEADER, "abc"))).await;

        assert_ne!(header, "abc");
        assert!(header.parse::<TraceId>().is_ok());
    }
}
