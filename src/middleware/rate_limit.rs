use axum::{
    http::Request,
    response::{IntoResponse, Response},
};
use governor::{clock::QuantaInstant, middleware::NoOpMiddleware};
use std::{net::IpAddr, sync::Arc, time::Duration};
use tower_governor::{
    errors::GovernorError,
    governor::{GovernorConfig, GovernorConfigBuilder},
    key_extractor::KeyExtractor,
};

use crate::error::AppError;

/// Keys requests by client IP as reported by the reverse proxy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IpKeyExtractor;

impl KeyExtractor for IpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        Ok(client_ip(req.headers()))
    }
}

/// `cf-connecting-ip`, then the first `x-forwarded-for` hop, then loopback.
/// Requests without either header share one bucket.
fn client_ip(headers: &axum::http::HeaderMap) -> IpAddr {
    let header = |name: &str| headers.get(name).and_then(|h| h.to_str().ok());

    header("cf-connecting-ip")
        .and_then(|s| s.trim().parse::<IpAddr>().ok())
        .or_else(|| {
            header("x-forwarded-for")
                .and_then(|s| s.split(',').next())
                .and_then(|s| s.trim().parse::<IpAddr>().ok())
        })
        .unwrap_or(IpAddr::from([127, 0, 0, 1]))
}

pub type LoginConfig = GovernorConfig<IpKeyExtractor, NoOpMiddleware<QuantaInstant>>;

/// 5 login attempts per 15 minutes per IP.
///
/// Every call builds a fresh limiter, so each router keeps its own buckets.
pub fn create_login_config() -> Arc<LoginConfig> {
    Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(IpKeyExtractor)
            .period(Duration::from_secs(180)) // 180s * 5 = 15 mins
            .burst_size(5)
            .finish()
            .expect("period and burst size are non-zero"),
    )
}

/// Renders a governor rejection in the usual `{ success: false, message }`
/// envelope, keeping the `retry-after` style headers governor attaches.
pub fn rejection(err: GovernorError) -> Response {
    match err {
        GovernorError::TooManyRequests { wait_time, headers } => {
            tracing::warn!(wait_secs = wait_time, "login rate limit hit");
            let mut response = AppError::TooManyRequests {
                wait_secs: wait_time,
            }
            .into_response();
            if let Some(headers) = headers {
                response.headers_mut().extend(headers);
            }
            response
        }
        GovernorError::UnableToExtractKey => {
            AppError::Internal("unable to extract rate limit key".into()).into_response()
        }
        GovernorError::Other { code, msg, .. } => {
            AppError::Internal(format!("rate limiter rejected request ({code}): {msg:?}"))
                .into_response()
        }
    }
}
