pub mod categories;
pub mod orders;
pub mod products;
pub mod users;

use axum::http::HeaderMap;

/// Absolute base URL of the inbound request: forwarded scheme when a proxy
/// supplied one, plus the Host header. Stored image URLs are derived from
/// this, so they are always absolute.
pub fn request_base_url(headers: &HeaderMap, host: &str) -> String {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");
    format!("{scheme}://{host}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_defaults_to_http() {
        let headers = HeaderMap::new();
        assert_eq!(request_base_url(&headers, "localhost:3000"), "http://localhost:3000");
    }

    #[test]
    fn base_url_honors_forwarded_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-proto", "https".parse().unwrap());
        assert_eq!(request_base_url(&headers, "shop.example.com"), "https://shop.example.com");
    }
}
