pub mod generator;
pub mod interfaces;
pub mod models;
pub mod parser;
pub mod settings;
pub mod utils;
#[cfg(feature = "web-api")]
pub mod web_handlers;

// Re-export the main proxy types for easier access
pub use models::{ConvertError, ConvertResponse, Proxy, ProxyType};

// Re-export the conversion entry points
pub use interfaces::{convert, convert_tokens, split_tokens};
pub use parser::ParseError;
pub use settings::Settings;
