use crate::models::{Proxy, ProxyType};
use crate::parser::ParseError;
use crate::utils::url::{host_of, query_params, remark_of, username_of};

use super::common::parse_link_url;

/// Parse a Hysteria2 link into a Proxy object (handles both hysteria2:// and hy2://)
///
/// Format: `hysteria2://auth@server[:port]?sni=example.com&obfs=salamander&obfs-password=xxx#name`
pub fn explode_hysteria2(hysteria2: &str) -> Result<Proxy, ParseError> {
    let url = parse_link_url(hysteria2, "hysteria2", &["hysteria2", "hy2"])?;

    let password = username_of(&url);
    if password.is_empty() {
        return Err(ParseError::MissingAuth);
    }

    let server = host_of(&url);
    if server.is_empty() {
        return Err(ParseError::MissingServer);
    }
    let port = url.port().unwrap_or(443);

    let mut params = query_params(&url);

    let sni = params
        .remove("sni")
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| server.clone());
    let skip_cert_verify = params
        .get("insecure")
        .is_some_and(|s| s == "1" || s.eq_ignore_ascii_case("true"));

    let mut node = Proxy::new(ProxyType::Hysteria2, server, port);
    node.password = password;
    node.sni = sni;
    node.skip_cert_verify = skip_cert_verify;
    node.obfs = params.remove("obfs").unwrap_or_default();
    node.obfs_password = params.remove("obfs-password").unwrap_or_default();

    Ok(node.with_name(&remark_of(&url)))
}
