use std::collections::HashMap;

use buildlane_protocol::{Point, Rect};

use crate::model::JobId;

/// Screen rectangles of the jobs drawn in the latest render pass, used for
/// tooltips and selection.
///
/// The renderer clears it at the start of every pass, so it never reports a
/// job that is no longer on screen.
#[derive(Debug, Clone, Default)]
pub struct BoundsMap {
    entries: HashMap<JobId, Rect>,
}

impl BoundsMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn insert(&mut self, job: JobId, rect: Rect) {
        self.entries.insert(job, rect);
    }

    pub fn get(&self, job: JobId) -> Option<Rect> {
        self.entries.get(&job).copied()
    }

    pub fn contains(&self, job: JobId) -> bool {
        self.entries.contains_key(&job)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (JobId, Rect)> + '_ {
        self.entries.iter().map(|(id, rect)| (*id, *rect))
    }

    /// The job under `point`. Ties (touching borrowed widths) go to the
    /// lowest id so the answer is stable between passes.
    pub fn hit_test(&self, point: Point) -> Option<JobId> {
        self.entries
            .iter()
            .filter(|(_, rect)| rect.contains(point))
            .map(|(id, _)| *id)
            .min()
    }

    /// Entries ordered by job id, for export.
    pub fn to_sorted_vec(&self) -> Vec<(JobId, Rect)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by_key(|(id, _)| *id);
        entries
    }
}
