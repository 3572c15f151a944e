//! Proxy model definitions
//!
//! Contains the normalized record every link parser produces and every
//! formatter consumes.

use std::collections::BTreeMap;

/// Represents the type of a proxy.
///
/// The set is closed: every share-link scheme the converter understands maps
/// onto exactly one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProxyType {
    Vless,
    VMess,
    Shadowsocks,
    Trojan,
    Hysteria2,
}

impl ProxyType {
    /// Link prefixes recognised by the dispatcher, in lookup order.
    const PREFIXES: [(&'static str, ProxyType); 6] = [
        ("vless://", ProxyType::Vless),
        ("vmess://", ProxyType::VMess),
        ("ss://", ProxyType::Shadowsocks),
        ("trojan://", ProxyType::Trojan),
        ("hysteria2://", ProxyType::Hysteria2),
        ("hy2://", ProxyType::Hysteria2),
    ];

    /// The `type` tag used in the generated Clash entry.
    pub fn as_str(self) -> &'static str {
        match self {
            ProxyType::Vless => "vless",
            ProxyType::VMess => "vmess",
            ProxyType::Shadowsocks => "ss",
            ProxyType::Trojan => "trojan",
            ProxyType::Hysteria2 => "hysteria2",
        }
    }

    /// Determine the proxy type from the scheme prefix of a share link.
    pub fn from_link(link: &str) -> Option<ProxyType> {
        Self::PREFIXES
            .iter()
            .find(|(prefix, _)| link.starts_with(prefix))
            .map(|(_, proxy_type)| *proxy_type)
    }
}

impl std::fmt::Display for ProxyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a single parsed proxy node.
///
/// Fields that do not apply to `proxy_type` stay at their zero value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proxy {
    pub name: String,
    pub proxy_type: ProxyType,
    pub server: String,
    pub port: u16,

    /// VLESS/VMess identity
    pub uuid: String,
    /// VMess legacy alterId
    pub alter_id: u32,
    /// Encryption method; meaning depends on the proxy type
    pub cipher: String,
    /// Transport network, VLESS/VMess only
    pub network: String,
    pub tls: bool,
    pub udp: bool,

    /// SS/Trojan/Hysteria2 credential
    pub password: String,
    /// SS plugin name
    pub plugin: String,
    /// SS plugin options, keys already mapped to Clash names
    pub plugin_opts: BTreeMap<String, String>,

    pub sni: String,
    pub skip_cert_verify: bool,

    /// Hysteria2 obfuscation type
    pub obfs: String,
    pub obfs_password: String,
}

impl Proxy {
    /// Create an empty record of the given type at `server:port`.
    ///
    /// UDP is enabled for every supported type.
    pub fn new(proxy_type: ProxyType, server: impl Into<String>, port: u16) -> Self {
        Proxy {
            name: String::new(),
            proxy_type,
            server: server.into(),
            port,
            uuid: String::new(),
            alter_id: 0,
            cipher: String::new(),
            network: String::new(),
            tls: false,
            udp: true,
            password: String::new(),
            plugin: String::new(),
            plugin_opts: BTreeMap::new(),
            sni: String::new(),
            skip_cert_verify: false,
            obfs: String::new(),
            obfs_password: String::new(),
        }
    }

    /// Set the display name, falling back to `{type}-{server}-{port}` when
    /// `name` is empty.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = if name.is_empty() {
            self.default_name()
        } else {
            name.to_string()
        };
        self
    }

    /// Synthetic name used when a link carries no remark.
    pub fn default_name(&self) -> String {
        format!("{}-{}-{}", self.proxy_type, self.server, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_link_prefixes() {
        assert_eq!(ProxyType::from_link("vless://a@b:1"), Some(ProxyType::Vless));
        assert_eq!(ProxyType::from_link("vmess://abc"), Some(ProxyType::VMess));
        assert_eq!(ProxyType::from_link("ss://abc"), Some(ProxyType::Shadowsocks));
        assert_eq!(ProxyType::from_link("trojan://pw@h"), Some(ProxyType::Trojan));
        assert_eq!(ProxyType::from_link("hysteria2://pw@h"), Some(ProxyType::Hysteria2));
        assert_eq!(ProxyType::from_link("hy2://pw@h"), Some(ProxyType::Hysteria2));
        assert_eq!(ProxyType::from_link("ssr://abc"), None);
        assert_eq!(ProxyType::from_link("notaurl"), None);
    }

    #[test]
    fn test_default_name() {
        let proxy = Proxy::new(ProxyType::Hysteria2, "example.com", 443).with_name("");
        assert_eq!(proxy.name, "hysteria2-example.com-443");

        let proxy = Proxy::new(ProxyType::Shadowsocks, "1.2.3.4", 8388).with_name("Node");
        assert_eq!(proxy.name, "Node");
        assert!(proxy.udp);
    }
}
