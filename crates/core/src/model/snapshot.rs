//! JSON snapshot of a build timeline, as exported by the build monitor.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use buildlane_protocol::theme::{self, ThemeMode};
use buildlane_protocol::{JobPaints, JobStatus};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::job::{Job, JobId, LaneId, link_lanes};
use super::lane::LaneMap;
use super::DisplayMode;
use crate::viewport::Viewport;

const DEFAULT_HEADER_WIDTH: f64 = 120.0;
const DEFAULT_JOB_HEIGHT: f64 = 20.0;
const DEFAULT_LANE_SPACING: f64 = 2.0;
const BORDER_THICKNESS: f64 = 1.0;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("job {0} appears more than once")]
    DuplicateJob(JobId),
    #[error("job {id} has an invalid interval [{start}, {end}]")]
    InvalidInterval { id: JobId, start: f64, end: f64 },
    #[error("viewport window [{start}, {end}] at scale {scaling} is invalid")]
    InvalidViewport { start: f64, end: f64, scaling: f64 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: JobId,
    pub name: String,
    pub lane: LaneId,
    pub start: f64,
    pub end: f64,
    pub status: JobStatus,
    #[serde(default)]
    pub elapsed_seconds: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaneRecord {
    pub id: LaneId,
    pub top: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineSnapshot {
    pub viewport: Viewport,
    #[serde(default)]
    pub mode: DisplayMode,
    #[serde(default = "default_header_width")]
    pub header_width: f64,
    #[serde(default = "default_job_height")]
    pub job_height: f64,
    /// Explicit lane placement. When empty, lanes are stacked in id order.
    #[serde(default)]
    pub lanes: Vec<LaneRecord>,
    pub jobs: Vec<JobRecord>,
}

fn default_header_width() -> f64 {
    DEFAULT_HEADER_WIDTH
}

fn default_job_height() -> f64 {
    DEFAULT_JOB_HEIGHT
}

/// Everything one render pass needs, owned.
#[derive(Debug, Clone)]
pub struct TimelineFrame {
    pub jobs: Vec<Job>,
    pub lanes: LaneMap,
    pub viewport: Viewport,
    pub mode: DisplayMode,
}

impl TimelineSnapshot {
    pub fn from_json(data: &[u8]) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_slice(data)?)
    }

    /// Validate the records, resolve paints from the status palette and link
    /// each job to its successor on the same lane.
    pub fn into_frame(self, theme_mode: ThemeMode) -> Result<TimelineFrame, SnapshotError> {
        let vp = self.viewport;
        if !(vp.start.is_finite() && vp.end.is_finite() && vp.end >= vp.start)
            || !(vp.scaling.is_finite() && vp.scaling > 0.0)
        {
            return Err(SnapshotError::InvalidViewport {
                start: vp.start,
                end: vp.end,
                scaling: vp.scaling,
            });
        }

        let lanes = if self.lanes.is_empty() {
            let ids: BTreeSet<LaneId> = self.jobs.iter().map(|j| j.lane).collect();
            LaneMap::stacked(
                ids,
                self.job_height + DEFAULT_LANE_SPACING,
                self.header_width,
                self.job_height,
            )
        } else {
            let mut map = LaneMap::new(self.header_width, self.job_height);
            for lane in &self.lanes {
                map.insert(lane.id, lane.top);
            }
            map
        };

        let mut palette: HashMap<JobStatus, Arc<JobPaints>> = HashMap::new();
        let mut seen = HashSet::with_capacity(self.jobs.len());
        let mut jobs = Vec::with_capacity(self.jobs.len());

        for record in self.jobs {
            if !seen.insert(record.id) {
                return Err(SnapshotError::DuplicateJob(record.id));
            }
            if !(record.start.is_finite() && record.end.is_finite()) || record.end < record.start
            {
                return Err(SnapshotError::InvalidInterval {
                    id: record.id,
                    start: record.start,
                    end: record.end,
                });
            }

            let paints = palette
                .entry(record.status)
                .or_insert_with(|| {
                    Arc::new(
                        theme::status_colors(record.status, theme_mode)
                            .to_paints(BORDER_THICKNESS),
                    )
                })
                .clone();

            let mut job = Job::new(
                record.id,
                record.name,
                record.lane,
                record.start,
                record.end,
                paints,
            )
            .with_status(record.status);
            job.elapsed_seconds = record.elapsed_seconds;
            jobs.push(job);
        }

        link_lanes(&mut jobs);

        Ok(TimelineFrame {
            jobs,
            lanes,
            viewport: self.viewport,
            mode: self.mode,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "viewport": { "start": 0, "end": 10, "scaling": 10 },
        "jobs": [
            { "id": 1, "name": "a.cpp", "lane": 0, "start": 0, "end": 4, "status": "success" },
            { "id": 2, "name": "b.cpp", "lane": 1, "start": 1, "end": 6, "status": "building", "elapsed_seconds": 5 },
            { "id": 3, "name": "c.cpp", "lane": 0, "start": 4, "end": 9, "status": "success" }
        ]
    }"#;

    #[test]
    fn builds_frame_with_defaults() {
        let frame = TimelineSnapshot::from_json(SNAPSHOT.as_bytes())
            .and_then(|s| s.into_frame(ThemeMode::Dark))
            .expect("snapshot should convert");

        assert_eq!(frame.jobs.len(), 3);
        assert_eq!(frame.mode, DisplayMode::Standard);
        assert!((frame.lanes.header_width - DEFAULT_HEADER_WIDTH).abs() < f64::EPSILON);
        assert_eq!(frame.lanes.top(LaneId(0)), Some(0.0));
        assert_eq!(frame.lanes.top(LaneId(1)), Some(22.0));
        assert_eq!(frame.jobs[0].next.map(|n| n.id), Some(JobId(3)));
        assert!(frame.jobs[1].status.is_building());
        assert!((frame.jobs[1].elapsed_seconds - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn jobs_with_same_status_share_paints() {
        let frame = TimelineSnapshot::from_json(SNAPSHOT.as_bytes())
            .and_then(|s| s.into_frame(ThemeMode::Light))
            .expect("snapshot should convert");
        assert!(Arc::ptr_eq(&frame.jobs[0].paints, &frame.jobs[2].paints));
        assert!(!Arc::ptr_eq(&frame.jobs[0].paints, &frame.jobs[1].paints));
    }

    #[test]
    fn explicit_lanes_are_used() {
        let json = r#"{
            "viewport": { "start": 0, "end": 10, "scaling": 10 },
            "lanes": [ { "id": 7, "top": 64 } ],
            "jobs": []
        }"#;
        let frame = TimelineSnapshot::from_json(json.as_bytes())
            .and_then(|s| s.into_frame(ThemeMode::Dark))
            .expect("snapshot should convert");
        assert_eq!(frame.lanes.top(LaneId(7)), Some(64.0));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let json = r#"{
            "viewport": { "start": 0, "end": 10, "scaling": 10 },
            "jobs": [
                { "id": 1, "name": "a", "lane": 0, "start": 0, "end": 1, "status": "success" },
                { "id": 1, "name": "b", "lane": 0, "start": 1, "end": 2, "status": "success" }
            ]
        }"#;
        let result = TimelineSnapshot::from_json(json.as_bytes())
            .and_then(|s| s.into_frame(ThemeMode::Dark));
        assert!(matches!(result, Err(SnapshotError::DuplicateJob(JobId(1)))));
    }

    #[test]
    fn rejects_reversed_interval() {
        let json = r#"{
            "viewport": { "start": 0, "end": 10, "scaling": 10 },
            "jobs": [ { "id": 4, "name": "a", "lane": 0, "start": 5, "end": 1, "status": "failed" } ]
        }"#;
        let result = TimelineSnapshot::from_json(json.as_bytes())
            .and_then(|s| s.into_frame(ThemeMode::Dark));
        assert!(matches!(
            result,
            Err(SnapshotError::InvalidInterval { id: JobId(4), .. })
        ));
    }

    #[test]
    fn rejects_zero_scaling() {
        let json = r#"{ "viewport": { "start": 0, "end": 10, "scaling": 0 }, "jobs": [] }"#;
        let result = TimelineSnapshot::from_json(json.as_bytes())
            .and_then(|s| s.into_frame(ThemeMode::Dark));
        assert!(matches!(result, Err(SnapshotError::InvalidViewport { .. })));
    }
}
