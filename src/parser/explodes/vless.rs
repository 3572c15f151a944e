use crate::models::{Proxy, ProxyType};
use crate::parser::ParseError;
use crate::utils::url::{host_of, query_params, remark_of, username_of};

use super::common::parse_link_url;

/// Parse a VLESS link into a Proxy object
///
/// Format: `vless://uuid@server:port?type=ws&security=tls&encryption=none#name`
pub fn explode_vless(vless: &str) -> Result<Proxy, ParseError> {
    let url = parse_link_url(vless, "vless", &["vless"])?;

    let uuid = username_of(&url);
    if uuid.is_empty() {
        return Err(ParseError::MissingUuid);
    }

    let server = host_of(&url);
    if server.is_empty() {
        return Err(ParseError::MissingServer);
    }

    // VLESS has no conventional default port
    let port = url.port().ok_or(ParseError::MissingPort)?;

    let params = query_params(&url);
    let param = |key: &str| params.get(key).filter(|v| !v.is_empty()).cloned();

    let mut node = Proxy::new(ProxyType::Vless, server, port);
    node.uuid = uuid;
    node.network = param("type").unwrap_or_else(|| "tcp".to_string());
    node.tls = matches!(params.get("security").map(String::as_str), Some("tls" | "reality"));
    node.cipher = param("encryption").unwrap_or_else(|| "none".to_string());

    Ok(node.with_name(&remark_of(&url)))
}
