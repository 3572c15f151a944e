use thiserror::Error;

/// Why a single share link could not be parsed.
///
/// The `Display` text is what ends up in the per-link error list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unsupported scheme")]
    UnsupportedScheme,

    #[error("invalid {0} URL")]
    InvalidUrl(&'static str),

    #[error("invalid {0} scheme")]
    InvalidScheme(&'static str),

    #[error("missing uuid")]
    MissingUuid,

    #[error("missing password")]
    MissingPassword,

    #[error("missing auth/password")]
    MissingAuth,

    #[error("missing server")]
    MissingServer,

    #[error("missing port")]
    MissingPort,

    #[error("invalid port")]
    InvalidPort,

    #[error("empty vmess payload")]
    EmptyVmessPayload,

    /// Base64 payload could not be decoded; carries the payload kind.
    #[error("invalid {0} base64")]
    InvalidBase64(&'static str),

    #[error("invalid vmess JSON")]
    InvalidVmessJson,

    #[error("missing required vmess fields")]
    MissingVmessFields,

    #[error("invalid alterId")]
    InvalidAlterId,

    #[error("invalid ss userinfo format")]
    InvalidSsUserInfo,

    #[error("invalid ss format")]
    InvalidSsFormat,

    #[error("invalid ss method:password")]
    InvalidSsMethodPassword,

    #[error("invalid ss server:port")]
    InvalidSsServerPort,
}
