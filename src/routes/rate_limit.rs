use axum::extract::ConnectInfo;
use axum::http::{HeaderMap, Request};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tower_governor::{key_extractor::KeyExtractor, GovernorError};

/// Keys the rate limiter on the client IP.
///
/// Forwarding headers are only honoured when the service sits behind a proxy
/// that sets them (`TRUST_FORWARDED_HEADERS`); otherwise a client could pick
/// its own bucket. Requests with no peer address share the loopback bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientIpKeyExtractor {
    pub trust_forwarded_headers: bool,
}

impl KeyExtractor for ClientIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        if self.trust_forwarded_headers {
            if let Some(ip) = forwarded_ip(req.headers()) {
                return Ok(ip);
            }
        }

        Ok(req
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map_or(IpAddr::V4(Ipv4Addr::LOCALHOST), |info| info.0.ip()))
    }
}

/// First hop of `X-Forwarded-For`, else `X-Real-IP`.
fn forwarded_ip(headers: &HeaderMap) -> Option<IpAddr> {
    let header_str = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());

    header_str("x-forwarded-for")
        .and_then(|chain| chain.split(',').next())
        .and_then(|first| first.trim().parse().ok())
        .or_else(|| header_str("x-real-ip").and_then(|ip| ip.trim().parse().ok()))
}
