use serde::{Deserialize, Serialize};

/// Lifecycle state of a build job, as reported by the build system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobStatus {
    Queued,
    Building,
    Success,
    /// Finished by pulling the result from a cache.
    SuccessCached,
    Failed,
    Skipped,
    Aborted,
}

impl JobStatus {
    pub fn is_building(self) -> bool {
        matches!(self, Self::Building)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Queued => write!(f, "queued"),
            Self::Building => write!(f, "building"),
            Self::Success => write!(f, "success"),
            Self::SuccessCached => write!(f, "success (cached)"),
            Self::Failed => write!(f, "failed"),
            Self::Skipped => write!(f, "skipped"),
            Self::Aborted => write!(f, "aborted"),
        }
    }
}
