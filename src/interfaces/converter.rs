use log::{debug, info};

use crate::generator::{format_group_line, format_proxy_line};
use crate::models::{ConvertError, ConvertResponse};
use crate::parser::explode;

/// Split raw input into link tokens
///
/// Tokens are separated by `,`, `，` (full-width comma), `\n` or `\r`.
/// Surrounding whitespace is trimmed and empty tokens are dropped; order is
/// preserved.
pub fn split_tokens(input: &str) -> Vec<String> {
    input
        .split(|c: char| matches!(c, ',' | '\n' | '\r' | '，'))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Convert already split tokens
///
/// A link that fails to parse is recorded in `errors` with its 1-based
/// position and never stops the rest of the batch.
pub fn convert_tokens(tokens: &[String]) -> ConvertResponse {
    let mut proxies = Vec::with_capacity(tokens.len());
    let mut groups = Vec::with_capacity(tokens.len());
    let mut errors = Vec::new();

    for (i, token) in tokens.iter().enumerate() {
        match explode(token) {
            Ok(proxy) => {
                proxies.push(format_proxy_line(&proxy));
                groups.push(format_group_line(&proxy.name));
            }
            Err(e) => {
                debug!("Failed to convert link #{}: {}", i + 1, e);
                errors.push(ConvertError {
                    index: i + 1,
                    value: token.clone(),
                    message: e.to_string(),
                });
            }
        }
    }

    info!(
        "Converted {} of {} links ({} failed)",
        proxies.len(),
        tokens.len(),
        errors.len()
    );

    ConvertResponse {
        proxy_lines: proxies.join("\n"),
        group_lines: groups.join("\n"),
        errors,
    }
}

/// Split and convert a raw batch of links.
pub fn convert(input: &str) -> ConvertResponse {
    convert_tokens(&split_tokens(input))
}
