// ── Fleet data sources ──
//
// A source produces the complete fleet collection on demand. The session
// calls it once at start and again on every refresh; results replace the
// store contents wholesale.

mod mock;

pub use mock::MockFleetSource;

use crate::error::CoreError;
use crate::model::Fleet;

/// Producer of complete fleet collections.
///
/// Live series may come back with any window; the store resizes them to
/// the session's `live_window` on every load.
pub trait FleetSource: Send + Sync {
    fn load(&self) -> Result<Vec<Fleet>, CoreError>;
}

/// Serves the same fleet collection on every load.
#[derive(Debug, Clone, Default)]
pub struct StaticFleetSource {
    fleets: Vec<Fleet>,
}

impl StaticFleetSource {
    pub fn new(fleets: Vec<Fleet>) -> Self {
        Self { fleets }
    }
}

impl FleetSource for StaticFleetSource {
    fn load(&self) -> Result<Vec<Fleet>, CoreError> {
        Ok(self.fleets.clone())
    }
}
