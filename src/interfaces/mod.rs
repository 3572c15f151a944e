pub mod converter;

pub use converter::{convert, convert_tokens, split_tokens};
