//! Rust client for the ZikTok shorts service.

pub mod client;
pub mod shorts;

pub use client::{ApiError, ZikTokClient};
pub use shorts::{Channel, ChannelShorts, ShortVideo};
