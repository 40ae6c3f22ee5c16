//! 客户端 IP 提取
//!
//! 默认使用 TCP 连接地址（无法伪造）；只有连接来自配置的可信代理时，
//! 才采用 X-Forwarded-For / X-Real-IP 中的地址。

use std::net::{IpAddr, SocketAddr};

use actix_web::HttpRequest;
use actix_web::http::header::HeaderMap;
use tracing::debug;

/// Trusted reverse proxies (single IPs or CIDR blocks), shared as app data
#[derive(Clone, Debug, Default)]
pub struct TrustedProxies(pub Vec<String>);

impl TrustedProxies {
    pub fn new(proxies: Vec<String>) -> Self {
        Self(proxies)
    }

    pub fn contains(&self, ip: &str) -> bool {
        is_trusted_proxy(ip, &self.0)
    }
}

/// 检查 IP 是否在可信代理列表中
pub fn is_trusted_proxy(ip: &str, trusted_proxies: &[String]) -> bool {
    let Some(ip_addr) = parse_ip(ip) else {
        return false;
    };

    trusted_proxies.iter().any(|proxy| {
        if proxy.contains('/') {
            ip_in_cidr(&ip_addr, proxy)
        } else {
            proxy.parse::<IpAddr>().is_ok_and(|p| p == ip_addr)
        }
    })
}

/// CIDR 检查
pub fn ip_in_cidr(ip: &IpAddr, cidr: &str) -> bool {
    let Some((network, prefix_len)) = cidr.split_once('/') else {
        return false;
    };

    let Ok(prefix_len): Result<u8, _> = prefix_len.parse() else {
        return false;
    };

    let Ok(network_addr) = network.parse::<IpAddr>() else {
        return false;
    };

    match (ip, network_addr) {
        (IpAddr::V4(ip), IpAddr::V4(net)) => {
            if prefix_len > 32 {
                return false;
            }
            let mask = u32::MAX.checked_shl(32 - prefix_len as u32).unwrap_or(0);
            (u32::from_be_bytes(ip.octets()) & mask) == (u32::from_be_bytes(net.octets()) & mask)
        }
        (IpAddr::V6(ip), IpAddr::V6(net)) => {
            if prefix_len > 128 {
                return false;
            }
            let mask = u128::MAX.checked_shl(128 - prefix_len as u32).unwrap_or(0);
            (u128::from_be_bytes(ip.octets()) & mask) == (u128::from_be_bytes(net.octets()) & mask)
        }
        _ => false,
    }
}

/// Accepts "ip" or "ip:port" (including "[v6]:port")
fn parse_ip(raw: &str) -> Option<IpAddr> {
    raw.parse::<SocketAddr>()
        .map(|s| s.ip())
        .or_else(|_| raw.parse::<IpAddr>())
        .ok()
}

/// 从 HttpRequest 提取客户端 IP
///
/// 返回值不带端口号；无法确定时返回 None。
pub fn extract_client_ip(req: &HttpRequest, trusted: &TrustedProxies) -> Option<String> {
    let peer = req.peer_addr().map(|addr| addr.ip().to_string());

    match peer {
        Some(peer_ip) if trusted.contains(&peer_ip) => {
            let forwarded = extract_forwarded_ip_from_headers(req.headers());
            debug!("Trusted proxy {} forwarded for {:?}", peer_ip, forwarded);
            Some(forwarded.unwrap_or(peer_ip))
        }
        Some(peer_ip) => Some(peer_ip),
        None => None,
    }
}

/// 从 HeaderMap 提取转发的 IP（X-Forwarded-For 第一个地址，其次 X-Real-IP）
pub fn extract_forwarded_ip_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|h| h.to_str().ok())
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        })
        .map(|ip| parse_ip(&ip).map(|a| a.to_string()).unwrap_or(ip))
}
