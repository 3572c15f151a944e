//! Clash proxy entry rendering
//!
//! Every proxy is rendered as a single YAML flow-mapping line suitable for a
//! `proxies:` list, plus one quoted line for a proxy group's member list.

use std::borrow::Cow;
use std::fmt::Display;

use crate::models::{Proxy, ProxyType};

/// Quote `value` as a double-quoted scalar.
///
/// `"`, `\` and control characters are escaped and printable Unicode is kept
/// raw, so the result reads back to exactly `value`.
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if needs_escape(c) => quoted.push_str(&format!("\\u{:04X}", c as u32)),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// C0, DEL and C1 controls, plus the BOM and noncharacters YAML rejects.
fn needs_escape(c: char) -> bool {
    c.is_control() || matches!(c, '\u{FEFF}' | '\u{FFFE}' | '\u{FFFF}')
}

/// Whether a plain `value` would be read back as something other than a string.
fn resolves_to_non_string(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    if matches!(
        lower.as_str(),
        "~" | "null" | "true" | "false" | "yes" | "no" | "on" | "off" | "y" | "n"
    ) {
        return true;
    }

    let unsigned = lower.trim_start_matches(['+', '-']);
    value.parse::<f64>().is_ok()
        || matches!(unsigned, ".inf" | ".nan")
        || ["0x", "0o", "0b"].iter().any(|p| unsigned.starts_with(p))
}

/// Whether `value` can appear unquoted inside a flow mapping.
fn is_plain_safe(value: &str) -> bool {
    const INDICATORS: &[char] = &['!', '&', '*', '|', '>', '%', '@', '`', '?', '-', ':'];

    let Some(first) = value.chars().next() else {
        return false;
    };
    if first.is_whitespace() || INDICATORS.contains(&first) {
        return false;
    }
    if value.ends_with(char::is_whitespace) || value.ends_with(':') || value.contains(": ") {
        return false;
    }
    if resolves_to_non_string(value) {
        return false;
    }
    !value
        .chars()
        .any(|c| matches!(c, ',' | '[' | ']' | '{' | '}' | '#' | '"' | '\'') || needs_escape(c))
}

/// Render a string scalar, quoting it only when it would break the mapping.
fn scalar(value: &str) -> Cow<'_, str> {
    if is_plain_safe(value) {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(quote(value))
    }
}

/// Builder for a single-line `{key: value, ...}` mapping.
#[derive(Debug, Default)]
struct FlowMap {
    fields: Vec<String>,
}

impl FlowMap {
    fn new() -> Self {
        Self::default()
    }

    /// Append a string field.
    fn string(mut self, key: &str, value: &str) -> Self {
        self.fields.push(format!("{}: {}", scalar(key), scalar(value)));
        self
    }

    /// Append a number, bool or nested mapping verbatim.
    fn raw(mut self, key: &str, value: impl Display) -> Self {
        self.fields.push(format!("{}: {}", scalar(key), value));
        self
    }

    fn render(&self) -> String {
        format!("{{{}}}", self.fields.join(", "))
    }
}

/// Name, type, server and port, shared by every proxy type.
fn common_fields(proxy: &Proxy) -> FlowMap {
    FlowMap::new()
        .string("name", &proxy.name)
        .raw("type", proxy.proxy_type.as_str())
        .string("server", &proxy.server)
        .raw("port", proxy.port)
}

fn vmess_fields(proxy: &Proxy) -> FlowMap {
    common_fields(proxy)
        .string("uuid", &proxy.uuid)
        .raw("alterId", proxy.alter_id)
        .string("cipher", &proxy.cipher)
        .string("network", &proxy.network)
        .raw("tls", proxy.tls)
        .raw("udp", true)
}

fn vless_fields(proxy: &Proxy) -> FlowMap {
    common_fields(proxy)
        .string("uuid", &proxy.uuid)
        .string("cipher", &proxy.cipher)
        .string("network", &proxy.network)
        .raw("tls", proxy.tls)
        .raw("udp", true)
}

fn ss_fields(proxy: &Proxy) -> FlowMap {
    let map = common_fields(proxy)
        .string("cipher", &proxy.cipher)
        .string("password", &proxy.password)
        .raw("udp", true);

    // A plugin without options is dropped entirely
    if proxy.plugin.is_empty() || proxy.plugin_opts.is_empty() {
        return map;
    }

    let opts = proxy
        .plugin_opts
        .iter()
        .fold(FlowMap::new(), |opts, (key, value)| opts.string(key, value));
    map.string("plugin", &proxy.plugin)
        .raw("plugin-opts", opts.render())
}

fn trojan_fields(proxy: &Proxy) -> FlowMap {
    let mut map = common_fields(proxy)
        .string("password", &proxy.password)
        .raw("udp", true)
        .string("sni", &proxy.sni);
    if proxy.skip_cert_verify {
        map = map.raw("skip-cert-verify", true);
    }
    map
}

fn hysteria2_fields(proxy: &Proxy) -> FlowMap {
    let mut map = common_fields(proxy)
        .string("password", &proxy.password)
        .string("sni", &proxy.sni);
    if proxy.skip_cert_verify {
        map = map.raw("skip-cert-verify", true);
    }
    if !proxy.obfs.is_empty() {
        map = map.string("obfs", &proxy.obfs);
        if !proxy.obfs_password.is_empty() {
            map = map.string("obfs-password", &proxy.obfs_password);
        }
    }
    map
}

/// Render a proxy as one `- {name: ..., type: ..., ...}` line.
pub fn format_proxy_line(proxy: &Proxy) -> String {
    let map = match proxy.proxy_type {
        ProxyType::VMess => vmess_fields(proxy),
        ProxyType::Shadowsocks => ss_fields(proxy),
        ProxyType::Trojan => trojan_fields(proxy),
        ProxyType::Hysteria2 => hysteria2_fields(proxy),
        ProxyType::Vless => vless_fields(proxy),
    };
    format!("- {}", map.render())
}

/// Render a proxy name as a group member line, e.g. `- "HK 01"`.
pub fn format_group_line(name: &str) -> String {
    format!("- {}", quote(name))
}
