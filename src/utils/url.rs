//! URL decoding helpers shared by the share-link parsers

use std::collections::HashMap;

use url::{Host, Url};

/// Decodes a percent-encoded string
///
/// # Arguments
/// * `input` - The URL-encoded string to decode
///
/// # Returns
/// * String containing the decoded input
/// * Returns the original string if decoding fails
///
/// # Examples
/// ```
/// use link2clash::utils::url::url_decode;
///
/// let decoded = url_decode("Hello%20World%21");
/// assert_eq!(decoded, "Hello World!");
/// ```
pub fn url_decode(input: &str) -> String {
    urlencoding::decode(input)
        .map(|cow| cow.into_owned())
        .unwrap_or_else(|_| input.to_string())
}

/// Hostname of the URL without IPv6 brackets, empty when absent.
pub fn host_of(url: &Url) -> String {
    match url.host() {
        Some(Host::Domain(domain)) => url_decode(domain),
        Some(Host::Ipv4(addr)) => addr.to_string(),
        Some(Host::Ipv6(addr)) => addr.to_string(),
        None => String::new(),
    }
}

/// Percent-decoded username of the user-info component.
pub fn username_of(url: &Url) -> String {
    url_decode(url.username())
}

/// Form-decoded query parameters. For repeated keys the first value wins.
pub fn query_params(url: &Url) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for (key, value) in url.query_pairs() {
        params
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }
    params
}

/// Display name carried in the fragment, percent-decoded.
pub fn remark_of(url: &Url) -> String {
    url.fragment().map(url_decode).unwrap_or_default()
}
