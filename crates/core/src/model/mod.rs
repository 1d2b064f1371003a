pub mod job;
pub mod lane;
pub mod snapshot;

use serde::{Deserialize, Serialize};

pub use job::{Job, JobId, LaneId, NextJob, link_lanes};
pub use lane::LaneMap;
pub use snapshot::{JobRecord, LaneRecord, SnapshotError, TimelineFrame, TimelineSnapshot};

/// How much detail jobs are drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Shapes plus labels and elapsed-time overlays.
    #[default]
    Standard,
    /// Shapes only.
    Compact,
}
