//! Middleware for CORS, request logging and panic recovery

use axum::{
    extract::Request,
    http::{HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use std::any::Any;
use tower_http::cors::{self, AllowOrigin, CorsLayer};
use tracing::{error, info};

use crate::config::ApiConfig;
use crate::error::{INTERNAL_SERVER_ERROR, error_body};

/// Request logging middleware
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let client_ip = get_client_ip(&request);

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    info!(
        method = %method,
        uri = %uri,
        status = %status,
        duration_ms = duration.as_millis(),
        client_ip = %client_ip,
        "Request processed"
    );

    response
}

/// CORS layer factory
pub fn create_cors_layer(config: &ApiConfig) -> CorsLayer {
    if !config.cors.enabled {
        return CorsLayer::new();
    }

    let layer = CorsLayer::new()
        .allow_methods(cors::Any)
        .allow_headers(cors::Any);

    if config.cors.allowed_origins.iter().any(|origin| origin == "*") {
        layer.allow_origin(cors::Any)
    } else {
        let origins = config
            .cors
            .allowed_origins
            .iter()
            .filter_map(|origin| HeaderValue::from_str(origin).ok());
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

/// Turn a handler panic into the generic 500 body
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!("Handler panicked: {}", detail);

    error_body(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR)
}

/// Extract client IP from request
fn get_client_ip(request: &Request) -> String {
    // Try X-Forwarded-For first (common in load balancers/proxies)
    if let Some(forwarded_for) = request.headers().get("X-Forwarded-For")
        && let Ok(forwarded_str) = forwarded_for.to_str()
        && let Some(first_ip) = forwarded_str.split(',').next()
    {
        return first_ip.trim().to_string();
    }

    if let Some(real_ip) = request.headers().get("X-Real-IP")
        && let Ok(real_ip_str) = real_ip.to_str()
    {
        return real_ip_str.to_string();
    }

    "unknown".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request_with(header: &str, value: &str) -> Request {
        Request::builder()
            .uri("/stocks")
            .header(header, value)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn test_client_ip_from_forwarded_for() {
        let request = request_with("X-Forwarded-For", "10.0.0.1, 10.0.0.2");
        assert_eq!(get_client_ip(&request), "10.0.0.1");
    }

    #[test]
    fn test_client_ip_from_real_ip() {
        let request = request_with("X-Real-IP", "192.168.1.9");
        assert_eq!(get_client_ip(&request), "192.168.1.9");
    }

    #[test]
    fn test_client_ip_unknown() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        assert_eq!(get_client_ip(&request), "unknown");
    }

    #[test]
    fn test_handle_panic_is_500() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
