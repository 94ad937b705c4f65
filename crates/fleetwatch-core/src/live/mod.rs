// ── Simulated live feed ──
//
// `tick` is the pure state transition; `feed` drives it from a timer.

mod feed;
mod tick;

pub(crate) use feed::{FeedControl, live_feed_task};
pub use tick::{advance_vessel, tick};
