pub mod error;
pub mod explodes;

pub use error::ParseError;
pub use explodes::explode;
