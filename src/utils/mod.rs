pub mod base64;
pub mod url;

// Re-export common utilities
pub use self::base64::decode_base64_compat;
pub use self::url::url_decode;
