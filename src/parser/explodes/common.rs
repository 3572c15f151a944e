use log::debug;
use url::Url;

use crate::models::{Proxy, ProxyType};
use crate::parser::ParseError;

/// Parse a single share link into a Proxy object
///
/// The parser is picked from the link's scheme prefix; links with any other
/// prefix are rejected without being parsed.
pub fn explode(link: &str) -> Result<Proxy, ParseError> {
    let proxy_type = ProxyType::from_link(link).ok_or(ParseError::UnsupportedScheme)?;
    debug!("Parsing {} link", proxy_type);

    match proxy_type {
        ProxyType::Vless => super::vless::explode_vless(link),
        ProxyType::VMess => super::vmess::explode_vmess(link),
        ProxyType::Shadowsocks => super::ss::explode_ss(link),
        ProxyType::Trojan => super::trojan::explode_trojan(link),
        ProxyType::Hysteria2 => super::hysteria2::explode_hysteria2(link),
    }
}

/// Parse `link` as a URL and check that its scheme is one of `schemes`.
///
/// `kind` names the link type in error messages.
pub(super) fn parse_link_url(
    link: &str,
    kind: &'static str,
    schemes: &[&str],
) -> Result<Url, ParseError> {
    let url = Url::parse(link).map_err(|_| ParseError::InvalidUrl(kind))?;
    if !schemes.contains(&url.scheme()) {
        return Err(ParseError::InvalidScheme(kind));
    }
    Ok(url)
}

/// Parse a decimal port number.
pub(super) fn parse_port(port: &str) -> Result<u16, ParseError> {
    port.parse::<u16>().map_err(|_| ParseError::InvalidPort)
}
