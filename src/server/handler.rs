// src/server/handler.rs
use hyper::{header, Body, Method, Request, Response, StatusCode};
use serde::Serialize;
use serde_json::json;
use std::convert::Infallible;
use std::sync::Arc;
use tower::Service;
use tracing::{error, info_span, Instrument};
use uuid::Uuid;

use crate::health::{HealthAggregator, HealthRecord};

/// Routes `/` and `/health`. Every outcome becomes a JSON response; no
/// error ever reaches hyper.
#[derive(Clone)]
pub struct RequestHandler {
    aggregator: Arc<HealthAggregator>,
    name: Arc<str>,
}

impl RequestHandler {
    pub fn new(aggregator: Arc<HealthAggregator>, name: impl Into<Arc<str>>) -> Self {
        Self {
            aggregator,
            name: name.into(),
        }
    }

    pub async fn handle(&self, req: Request<Body>) -> Response<Body> {
        let known = matches!(req.uri().path(), "/" | "/health");
        if !known {
            return error_response(StatusCode::NOT_FOUND, "not found");
        }
        if req.method() != Method::GET {
            return error_response(StatusCode::METHOD_NOT_ALLOWED, "method not allowed");
        }

        if req.uri().path() == "/" {
            self.root()
        } else {
            self.health().await
        }
    }

    fn root(&self) -> Response<Body> {
        let body = json!({
            "name": &*self.name,
            "status": "running",
            "endpoints": {
                "/": "Bot information",
                "/health": "Health check",
            },
        });
        json_response(StatusCode::OK, &body)
    }

    async fn health(&self) -> Response<Body> {
        let aggregator = self.aggregator.clone();
        let evaluation = async move { aggregator.evaluate().await };

        match tokio::spawn(evaluation.in_current_span()).await {
            Ok(record) => health_response(&record),
            Err(e) => {
                error!("Health check failed: {}", e);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
            }
        }
    }
}

/// 200 for a healthy record, 503 otherwise.
pub fn health_response(record: &HealthRecord) -> Response<Body> {
    let status = if record.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    json_response(status, record)
}

fn error_response(status: StatusCode, message: &str) -> Response<Body> {
    json_response(status, &json!({ "status": "error", "message": message }))
}

fn json_response<T: Serialize + ?Sized>(status: StatusCode, body: &T) -> Response<Body> {
    let (status, body) = match serde_json::to_vec(body) {
        Ok(bytes) => (status, bytes),
        Err(e) => {
            error!("Failed to serialize response: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                br#"{"status":"error","message":"serialization failed"}"#.to_vec(),
            )
        }
    };

    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );
    response
}

impl Service<Request<Body>> for RequestHandler {
    type Response = Response<Body>;
    type Error = Infallible;
    type Future = futures::future::BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &mut self,
        _cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        std::task::Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let handler = self.clone();
        let span = info_span!(
            "request",
            id = %Uuid::new_v4(),
            method = %req.method(),
            path = %req.uri().path()
        );
        let response = async move { Ok::<_, Infallible>(handler.handle(req).await) };
        Box::pin(response.instrument(span))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::ser::Error as _;

    struct Broken;

    impl Serialize for Broken {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("unrepresentable"))
        }
    }

    async fn body_json(response: Response<Body>) -> serde_json::Value {
        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_error_response_carries_status_and_message() {
        let response = error_response(StatusCode::INTERNAL_SERVER_ERROR, "task panicked");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        let body = body_json(response).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "task panicked");
    }

    #[tokio::test]
    async fn test_serialization_failure_becomes_500() {
        let response = json_response(StatusCode::OK, &Broken);

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "serialization failed");
    }
}
