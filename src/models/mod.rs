//! Core data models for the application
//!
//! This module contains the primary data structures used throughout the application,
//! separated from the logic that operates on them.
//!
//! # Usage
//!
//! ```rust
//! use link2clash::models::{Proxy, ProxyType};
//!
//! let proxy = Proxy::new(ProxyType::Trojan, "example.com", 443).with_name("");
//! assert_eq!(proxy.name, "trojan-example.com-443");
//! ```

mod convert;
mod proxy;

pub use convert::*;
pub use proxy::*;
