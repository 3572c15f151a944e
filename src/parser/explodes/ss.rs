use std::collections::BTreeMap;

use url::Url;

use crate::models::{Proxy, ProxyType};
use crate::parser::ParseError;
use crate::utils::base64::decode_base64_compat;
use crate::utils::url::{host_of, query_params, remark_of, username_of};

use super::common::{parse_link_url, parse_port};

/// Parse a Shadowsocks link into a Proxy object
///
/// Two shapes are accepted:
/// * SIP002: `ss://base64(method:password)@server:port/?plugin=...#name`
/// * legacy: `ss://base64(method:password@server:port)#name`
pub fn explode_ss(ss: &str) -> Result<Proxy, ParseError> {
    let url = parse_link_url(ss, "ss", &["ss"])?;

    let (method, password, server, port) = if has_userinfo(ss) && url.has_host() {
        parse_sip002(&url)?
    } else {
        parse_legacy(ss)?
    };

    if server.is_empty() {
        return Err(ParseError::MissingServer);
    }

    let (plugin, plugin_opts) = match plugin_spec(&url) {
        Some(spec) => parse_plugin(&spec),
        None => (String::new(), BTreeMap::new()),
    };

    let mut node = Proxy::new(ProxyType::Shadowsocks, server, port);
    node.cipher = method;
    node.password = password;
    node.plugin = plugin;
    node.plugin_opts = plugin_opts;

    Ok(node.with_name(&remark_of(&url)))
}

/// Whether the authority carries a user-info part, even an empty one.
fn has_userinfo(ss: &str) -> bool {
    let rest = ss.strip_prefix("ss://").unwrap_or(ss);
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    rest[..end].contains('@')
}

/// `base64(method:password)` in the user-info, address in the authority.
fn parse_sip002(url: &Url) -> Result<(String, String, String, u16), ParseError> {
    let decoded = decode_base64_compat(&username_of(url))
        .map_err(|_| ParseError::InvalidBase64("ss userinfo"))?;
    let decoded = String::from_utf8_lossy(&decoded);

    let (method, password) = decoded
        .split_once(':')
        .ok_or(ParseError::InvalidSsUserInfo)?;

    let port = url.port().ok_or(ParseError::MissingPort)?;

    Ok((method.to_string(), password.to_string(), host_of(url), port))
}

/// The whole payload is `base64(method:password@server:port)`.
fn parse_legacy(ss: &str) -> Result<(String, String, String, u16), ParseError> {
    let mut payload = ss.strip_prefix("ss://").unwrap_or(ss);
    if let Some(pos) = payload.find('#') {
        payload = &payload[..pos];
    }
    if let Some(pos) = payload.find('?') {
        payload = &payload[..pos];
    }

    let decoded =
        decode_base64_compat(payload).map_err(|_| ParseError::InvalidBase64("ss"))?;
    let decoded = String::from_utf8_lossy(&decoded);

    // Passwords may contain '@'; the address never does
    let (user_part, host_part) = decoded.rsplit_once('@').ok_or(ParseError::InvalidSsFormat)?;
    let (method, password) = user_part
        .split_once(':')
        .ok_or(ParseError::InvalidSsMethodPassword)?;
    let (server, port) = host_part
        .rsplit_once(':')
        .ok_or(ParseError::InvalidSsServerPort)?;

    Ok((
        method.to_string(),
        password.to_string(),
        server.to_string(),
        parse_port(port)?,
    ))
}

/// The raw plugin specification, e.g. `obfs-local;obfs=http;obfs-host=example.com`.
///
/// Falls back to the raw query text for links whose plugin string is not
/// form-encoded.
fn plugin_spec(url: &Url) -> Option<String> {
    if let Some(plugin) = query_params(url).remove("plugin").filter(|p| !p.is_empty()) {
        return Some(plugin);
    }

    let raw = url.query()?.strip_prefix("plugin=")?;
    urlencoding::decode(&raw.replace('+', " "))
        .ok()
        .map(|cow| cow.into_owned())
        .filter(|p| !p.is_empty())
}

/// Split a plugin specification into the Clash plugin name and its options.
///
/// `obfs-local`/`simple-obfs` become `obfs`; the `obfs` and `obfs-host`
/// option keys become `mode` and `host`.
pub fn parse_plugin(spec: &str) -> (String, BTreeMap<String, String>) {
    let mut segments = spec.split(';');

    let plugin = match segments.next().unwrap_or_default() {
        "obfs-local" | "simple-obfs" => "obfs".to_string(),
        other => other.to_string(),
    };

    let mut opts = BTreeMap::new();
    for (key, value) in segments.filter_map(|segment| segment.split_once('=')) {
        let key = match key {
            "obfs" => "mode",
            "obfs-host" => "host",
            other => other,
        };
        opts.insert(key.to_string(), value.to_string());
    }

    (plugin, opts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explode_ss_sip002_format() {
        // base64("aes-256-gcm:password")
        let node = explode_ss("ss://YWVzLTI1Ni1nY206cGFzc3dvcmQ=@1.2.3.4:8388#Node1").unwrap();

        assert_eq!(node.proxy_type, ProxyType::Shadowsocks);
        assert_eq!(node.name, "Node1");
        assert_eq!(node.server, "1.2.3.4");
        assert_eq!(node.port, 8388);
        assert_eq!(node.cipher, "aes-256-gcm");
        assert_eq!(node.password, "password");
        assert!(node.plugin.is_empty());
        assert!(node.plugin_opts.is_empty());
    }

    #[test]
    fn test_explode_ss_legacy_format() {
        // base64("chacha20-ietf-poly1305:password@127.0.0.1:8080")
        let node = explode_ss("ss://Y2hhY2hhMjAtaWV0Zi1wb2x5MTMwNTpwYXNzd29yZEAxMjcuMC4wLjE6ODA4MA==").unwrap();

        assert_eq!(node.server, "127.0.0.1");
        assert_eq!(node.port, 8080);
        assert_eq!(node.cipher, "chacha20-ietf-poly1305");
        assert_eq!(node.password, "password");
        assert_eq!(node.name, "ss-127.0.0.1-8080");
    }

    #[test]
    fn test_explode_ss_legacy_with_fragment() {
        // base64("aes-128-gcm:p@ss:word@example.com:443"), unpadded
        let node =
            explode_ss("ss://YWVzLTEyOC1nY206cEBzczp3b3JkQGV4YW1wbGUuY29tOjQ0Mw#Legacy%20Node").unwrap();

        assert_eq!(node.cipher, "aes-128-gcm");
        assert_eq!(node.password, "p@ss:word");
        assert_eq!(node.server, "example.com");
        assert_eq!(node.port, 443);
        assert_eq!(node.name, "Legacy Node");
    }

    #[test]
    fn test_explode_ss_with_plugin() {
        let node = explode_ss(
            "ss://Y2hhY2hhMjAtaWV0Zi1wb2x5MTMwNTpwYXNzd29yZA==@example.com:8388/?plugin=obfs-local;obfs=http;obfs-host=cdn.example.com#Example%20Plugin",
        )
        .unwrap();

        assert_eq!(node.plugin, "obfs");
        assert_eq!(node.plugin_opts.get("mode").map(String::as_str), Some("http"));
        assert_eq!(
            node.plugin_opts.get("host").map(String::as_str),
            Some("cdn.example.com")
        );
        assert_eq!(node.name, "Example Plugin");
    }

    #[test]
    fn test_explode_ss_with_encoded_plugin() {
        let node = explode_ss(
            "ss://YWVzLTI1Ni1nY206cGFzc3dvcmQ=@1.2.3.4:8388?plugin=v2ray-plugin%3Bmode%3Dwebsocket%3Btls#N",
        )
        .unwrap();

        assert_eq!(node.plugin, "v2ray-plugin");
        assert_eq!(node.plugin_opts.len(), 1);
        assert_eq!(
            node.plugin_opts.get("mode").map(String::as_str),
            Some("websocket")
        );
    }

    #[test]
    fn test_explode_ss_errors() {
        // base64("aes-256-gcm")
        assert_eq!(
            explode_ss("ss://YWVzLTI1Ni1nY20@1.2.3.4:8388"),
            Err(ParseError::InvalidSsUserInfo)
        );
        assert_eq!(
            explode_ss("ss://YWVzLTI1Ni1nY206cGFzc3dvcmQ=@1.2.3.4"),
            Err(ParseError::MissingPort)
        );
        // base64("aes-256-gcm:password")
        assert_eq!(
            explode_ss("ss://YWVzLTI1Ni1nY206cGFzc3dvcmQ="),
            Err(ParseError::InvalidSsFormat)
        );
        // base64("password@example.com:443")
        assert_eq!(
            explode_ss("ss://cGFzc3dvcmRAZXhhbXBsZS5jb206NDQz"),
            Err(ParseError::InvalidSsMethodPassword)
        );
        // base64("aes-256-gcm:password@example.com")
        assert_eq!(
            explode_ss("ss://YWVzLTI1Ni1nY206cGFzc3dvcmRAZXhhbXBsZS5jb20"),
            Err(ParseError::InvalidSsServerPort)
        );
        assert_eq!(
            explode_ss("ss://@1.2.3.4:8388").unwrap_err().to_string(),
            "invalid ss userinfo format"
        );
        assert_eq!(
            explode_ss("ss://!!!").unwrap_err().to_string(),
            "invalid ss base64"
        );
    }

    #[test]
    fn test_parse_plugin() {
        let (plugin, opts) = parse_plugin("simple-obfs;obfs=tls;obfs-host=a.com;fast-open=true;junk");
        assert_eq!(plugin, "obfs");
        assert_eq!(opts.len(), 3);
        assert_eq!(opts["mode"], "tls");
        assert_eq!(opts["host"], "a.com");
        assert_eq!(opts["fast-open"], "true");

        let (plugin, opts) = parse_plugin("v2ray-plugin");
        assert_eq!(plugin, "v2ray-plugin");
        assert!(opts.is_empty());
    }
}
