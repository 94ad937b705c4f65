// ── Snapshot store ──
//
// Immutable fleet snapshots published through a `watch` channel.

mod data_store;
mod refresh;

pub use data_store::DataStore;
pub(crate) use data_store::flatten;
