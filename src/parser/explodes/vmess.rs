use serde_json::{Map, Value};

use crate::models::{Proxy, ProxyType};
use crate::parser::ParseError;
use crate::utils::base64::decode_base64_compat;

use super::common::parse_port;

/// Project a JSON value onto its string form.
///
/// Share-link generators disagree on whether numbers and flags are quoted, so
/// `443`, `443.0` and `"443"` all read as `"443"`. Missing or null fields read
/// as an empty string.
pub fn json_scalar_to_string(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                let f = n.as_f64().unwrap_or_default();
                if f.is_finite() && f.fract() == 0.0 {
                    format!("{:.0}", f)
                } else {
                    f.to_string()
                }
            }
        }
        Some(other) => other.to_string(),
    }
}

/// Parse a VMess link into a Proxy object
///
/// Format: `vmess://base64({"add": ..., "port": ..., "id": ..., ...})`
pub fn explode_vmess(vmess: &str) -> Result<Proxy, ParseError> {
    let payload = vmess.strip_prefix("vmess://").unwrap_or(vmess);
    if payload.is_empty() {
        return Err(ParseError::EmptyVmessPayload);
    }

    let decoded = decode_base64_compat(payload).map_err(|_| ParseError::InvalidBase64("vmess"))?;
    let json: Map<String, Value> =
        serde_json::from_slice(&decoded).map_err(|_| ParseError::InvalidVmessJson)?;

    let field = |key: &str| json_scalar_to_string(json.get(key)).trim().to_string();

    let server = field("add");
    let port = field("port");
    let uuid = field("id");
    if server.is_empty() || port.is_empty() || uuid.is_empty() {
        return Err(ParseError::MissingVmessFields);
    }
    let port = parse_port(&port)?;

    let aid = field("aid");
    let alter_id = if aid.is_empty() {
        0
    } else {
        aid.parse::<u32>().map_err(|_| ParseError::InvalidAlterId)?
    };

    let network = field("net");
    let cipher = field("scy");

    let mut node = Proxy::new(ProxyType::VMess, server, port);
    node.uuid = uuid;
    node.alter_id = alter_id;
    node.network = if network.is_empty() { "tcp".to_string() } else { network };
    node.tls = field("tls").eq_ignore_ascii_case("tls");
    node.cipher = if cipher.is_empty() { "auto".to_string() } else { cipher };

    Ok(node.with_name(&field("ps")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
    use base64::Engine;
    use serde_json::json;

    fn vmess_link(value: &Value) -> String {
        format!("vmess://{}", STANDARD.encode(value.to_string()))
    }

    #[test]
    fn test_explode_vmess_standard() {
        let link = vmess_link(&json!({
            "v": "2",
            "ps": "HK Node",
            "add": "hk.example.com",
            "port": "443",
            "id": "b831381d-6324-4d53-ad4f-8cda48b30811",
            "aid": "0",
            "net": "ws",
            "tls": "tls",
            "scy": "aes-128-gcm"
        }));
        let node = explode_vmess(&link).unwrap();

        assert_eq!(node.proxy_type, ProxyType::VMess);
        assert_eq!(node.name, "HK Node");
        assert_eq!(node.server, "hk.example.com");
        assert_eq!(node.port, 443);
        assert_eq!(node.uuid, "b831381d-6324-4d53-ad4f-8cda48b30811");
        assert_eq!(node.alter_id, 0);
        assert_eq!(node.network, "ws");
        assert!(node.tls);
        assert_eq!(node.cipher, "aes-128-gcm");
    }

    #[test]
    fn test_explode_vmess_numeric_fields_and_defaults() {
        let payload = json!({"add": "1.2.3.4", "port": 8080.0, "id": "id", "aid": 64, "tls": "TLS"});
        let link = format!("vmess://{}", URL_SAFE_NO_PAD.encode(payload.to_string()));
        let node = explode_vmess(&link).unwrap();

        assert_eq!(node.port, 8080);
        assert_eq!(node.alter_id, 64);
        assert_eq!(node.network, "tcp");
        assert_eq!(node.cipher, "auto");
        assert!(node.tls);
        assert_eq!(node.name, "vmess-1.2.3.4-8080");
    }

    #[test]
    fn test_explode_vmess_errors() {
        assert_eq!(explode_vmess("vmess://"), Err(ParseError::EmptyVmessPayload));
        assert_eq!(
            explode_vmess("vmess://!!!!").unwrap_err().to_string(),
            "invalid vmess base64"
        );

        let not_json = format!("vmess://{}", STANDARD.encode("hello world"));
        assert_eq!(
            explode_vmess(&not_json).unwrap_err().to_string(),
            "invalid vmess JSON"
        );

        let missing = vmess_link(&json!({"add": "h", "port": "443"}));
        assert_eq!(explode_vmess(&missing), Err(ParseError::MissingVmessFields));

        let bad_aid = vmess_link(&json!({"add": "h", "port": 443, "id": "x", "aid": "abc"}));
        assert_eq!(
            explode_vmess(&bad_aid).unwrap_err().to_string(),
            "invalid alterId"
        );

        let bad_port = vmess_link(&json!({"add": "h", "port": "http", "id": "x"}));
        assert_eq!(explode_vmess(&bad_port), Err(ParseError::InvalidPort));
    }

    #[test]
    fn test_json_scalar_to_string() {
        assert_eq!(json_scalar_to_string(Some(&json!("a"))), "a");
        assert_eq!(json_scalar_to_string(Some(&json!(443))), "443");
        assert_eq!(json_scalar_to_string(Some(&json!(443.0))), "443");
        assert_eq!(json_scalar_to_string(Some(&json!(1.5))), "1.5");
        assert_eq!(json_scalar_to_string(Some(&json!(true))), "true");
        assert_eq!(json_scalar_to_string(Some(&Value::Null)), "");
        assert_eq!(json_scalar_to_string(None), "");
    }
}
