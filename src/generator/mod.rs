pub mod clash;

// Re-export format converters
pub use clash::{format_group_line, format_proxy_line};
