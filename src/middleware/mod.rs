//! Middleware module
//!
//! This module contains the checks every inbound event passes through:
//! role authorization, rate limiting and keyword filtering.

pub mod auth;
pub mod keyword_filter;
pub mod rate_limit;

// Re-export commonly used middleware
pub use auth::AuthMiddleware;
pub use keyword_filter::KeywordFilter;
pub use rate_limit::{RateLimitConfig, RateLimitVerdict, RateWindow};
