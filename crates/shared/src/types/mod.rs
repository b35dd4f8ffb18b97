//! Common types used across the application.

pub mod id;
pub mod money;
pub mod period;

pub use id::*;
pub use money::{format_money, format_percent, ratio_percent, round_half_up};
pub use period::{DateRange, parse_iso_date};
