use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

/// Emits one `request_completed` event per request.
///
/// Level follows the status class. Command routes also log the guild and
/// channel they addressed; other routes log `-` for both.
pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;
            let duration_us = start.elapsed().as_micros() as u64;

            let line = match &result {
                Ok(res) => CompletedRequest::from_response(res, method, path, duration_us),
                Err(err) => CompletedRequest {
                    method,
                    path,
                    status: err.as_response_error().status_code(),
                    duration_us,
                    trace_id: UNKNOWN.to_string(),
                    channel: None,
                },
            };
            line.emit();

            result
        })
    }
}

const UNKNOWN: &str = "unknown";

struct CompletedRequest {
    method: String,
    path: String,
    status: StatusCode,
    duration_us: u64,
    trace_id: String,
    /// `(guild_id, channel_id)` for command routes.
    channel: Option<(String, String)>,
}

impl CompletedRequest {
    fn from_response<B>(
        res: &ServiceResponse<B>,
        method: String,
        path: String,
        duration_us: u64,
    ) -> Self {
        let req = res.request();
        // Routing has run by now, so path params are resolved.
        let info = req.match_info();
        let channel = info
            .get("guild_id")
            .zip(info.get("channel_id"))
            .map(|(g, c)| (g.to_string(), c.to_string()));
        let trace_id = req
            .extensions()
            .get::<String>()
            .cloned()
            .unwrap_or_else(|| UNKNOWN.to_string());

        Self {
            method,
            path,
            status: res.status(),
            duration_us,
            trace_id,
            channel,
        }
    }

    fn emit(&self) {
        let status_code = self.status.as_u16();
        let (guild_id, channel_id) = match &self.channel {
            Some((g, c)) => (g.as_str(), c.as_str()),
            None => ("-", "-"),
        };
        let method = self.method.as_str();
        let path = self.path.as_str();
        let trace_id = self.trace_id.as_str();
        let duration_us = self.duration_us;

        if self.status.is_server_error() {
            error!(http.method = %method, url.path = %path, http.status_code = status_code, duration_us, trace_id = %trace_id, guild_id, channel_id, message = "request_completed");
        } else if self.status.is_client_error() {
            warn!(http.method = %method, url.path = %path, http.status_code = status_code, duration_us, trace_id = %trace_id, guild_id, channel_id, message = "request_completed");
        } else {
            info!(http.method = %method, url.path = %path, http.status_code = status_code, duration_us, trace_id = %trace_id, guild_id, channel_id, message = "request_completed");
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;
    use actix_web::HttpResponse;

    use super::*;

    #[test]
    fn command_route_logs_its_channel_and_trace() {
        let req = TestRequest::post()
            .uri("/api/uno/g1/c1")
            .param("guild_id", "g1")
            .param("channel_id", "c1")
            .to_srv_request();
        req.extensions_mut().insert("trace-123".to_string());
        let res = req.into_response(HttpResponse::BadRequest().finish());

        let line =
            CompletedRequest::from_response(&res, "POST".into(), "/api/uno/g1/c1".into(), 7);

        assert_eq!(line.status, StatusCode::BAD_REQUEST);
        assert_eq!(line.trace_id, "trace-123");
        assert_eq!(line.channel, Some(("g1".to_string(), "c1".to_string())));
    }

    #[test]
    fn other_routes_have_no_channel() {
        let res = TestRequest::get()
            .uri("/health")
            .to_srv_request()
            .into_response(HttpResponse::Ok().finish());

        let line = CompletedRequest::from_response(&res, "GET".into(), "/health".into(), 3);

        assert_eq!(line.trace_id, UNKNOWN);
        assert!(line.channel.is_none());
    }
}
