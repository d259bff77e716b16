//! State management module
//!
//! This module holds the in-memory moderation state and the clock it is
//! read against.

pub mod clock;
pub mod store;

// Re-export commonly used state components
pub use clock::{Clock, SystemClock, ManualClock};
pub use store::{ModerationStore, ChatToggles, MuteStatus, MemberKey};
