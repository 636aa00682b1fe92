//! Battery entity detection and device family classification

pub mod categorize;
pub mod filter;

pub use categorize::{categorize, categorize_devices};
pub use filter::{find_battery_entities, BATTERY_PATTERNS};
