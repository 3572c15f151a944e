use crate::models::{Proxy, ProxyType};
use crate::parser::ParseError;
use crate::utils::url::{host_of, query_params, remark_of, username_of};

use super::common::parse_link_url;

/// Parse a Trojan link into a Proxy object
///
/// Format: `trojan://password@server[:port]?sni=example.com&allowInsecure=1#name`
pub fn explode_trojan(trojan: &str) -> Result<Proxy, ParseError> {
    let url = parse_link_url(trojan, "trojan", &["trojan"])?;

    let password = username_of(&url);
    if password.is_empty() {
        return Err(ParseError::MissingPassword);
    }

    let server = host_of(&url);
    if server.is_empty() {
        return Err(ParseError::MissingServer);
    }
    let port = url.port().unwrap_or(443);

    let params = query_params(&url);
    let param = |key: &str| params.get(key).filter(|v| !v.is_empty()).cloned();

    // Check for both "sni" and "peer" parameters
    let sni = param("sni")
        .or_else(|| param("peer"))
        .unwrap_or_else(|| server.clone());

    let skip_cert_verify = params
        .get("allowInsecure")
        .is_some_and(|s| s == "1" || s.eq_ignore_ascii_case("true"));

    let mut node = Proxy::new(ProxyType::Trojan, server, port);
    node.password = password;
    node.sni = sni;
    node.skip_cert_verify = skip_cert_verify;

    Ok(node.with_name(&remark_of(&url)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explode_trojan_defaults() {
        let node = explode_trojan("trojan://pw@host").unwrap();

        assert_eq!(node.proxy_type, ProxyType::Trojan);
        assert_eq!(node.password, "pw");
        assert_eq!(node.server, "host");
        assert_eq!(node.port, 443);
        assert_eq!(node.sni, "host");
        assert!(!node.skip_cert_verify);
        assert_eq!(node.name, "trojan-host-443");
    }

    #[test]
    fn test_explode_trojan_params() {
        let node = explode_trojan(
            "trojan://p%40ss@1.2.3.4:8443?security=tls&type=tcp&peer=cdn.example.com&allowInsecure=TRUE#JP%20Trojan",
        )
        .unwrap();

        assert_eq!(node.password, "p@ss");
        assert_eq!(node.port, 8443);
        assert_eq!(node.sni, "cdn.example.com");
        assert!(node.skip_cert_verify);
        assert_eq!(node.name, "JP Trojan");

        let node = explode_trojan("trojan://pw@h:443?sni=a.com&peer=b.com&allowInsecure=0").unwrap();
        assert_eq!(node.sni, "a.com");
        assert!(!node.skip_cert_verify);
    }

    #[test]
    fn test_explode_trojan_missing_password() {
        assert_eq!(
            explode_trojan("trojan://example.com:443").unwrap_err().to_string(),
            "missing password"
        );
    }
}
