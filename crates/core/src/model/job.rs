use std::collections::HashMap;
use std::sync::Arc;

use buildlane_protocol::{JobPaints, JobStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub u64);

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifies a lane, i.e. one execution core of a build worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LaneId(pub u32);

/// The job after another one on the same lane, with the start offset needed
/// for width borrowing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NextJob {
    pub id: JobId,
    pub start: f64,
}

/// A build job as the renderer sees it: a time interval on one lane.
#[derive(Debug, Clone)]
pub struct Job {
    pub id: JobId,
    pub name: String,
    pub lane: LaneId,
    /// Offset in seconds from the start of the build.
    pub start: f64,
    /// Offset in seconds; for a running job this is "now".
    pub end: f64,
    /// The job that follows this one on the same lane. Only used to borrow
    /// drawing width for very short jobs.
    pub next: Option<NextJob>,
    pub status: JobStatus,
    /// Seconds spent building so far. Meaningful while `Building`.
    pub elapsed_seconds: f64,
    /// Shared with every other job in the same visual state.
    pub paints: Arc<JobPaints>,
}

impl Job {
    pub fn new(
        id: JobId,
        name: impl Into<String>,
        lane: LaneId,
        start: f64,
        end: f64,
        paints: Arc<JobPaints>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            lane,
            start,
            end,
            next: None,
            status: JobStatus::Success,
            elapsed_seconds: 0.0,
            paints,
        }
    }

    pub fn building(mut self, elapsed_seconds: f64) -> Self {
        self.status = JobStatus::Building;
        self.elapsed_seconds = elapsed_seconds;
        self
    }

    pub fn with_status(mut self, status: JobStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_next(mut self, id: JobId, start: f64) -> Self {
        self.next = Some(NextJob { id, start });
        self
    }
}

/// Point every job at the job that starts after it on the same lane.
///
/// Jobs keep their order in the slice; ties on start time are broken by id so
/// the result is deterministic.
pub fn link_lanes(jobs: &mut [Job]) {
    let mut by_lane: HashMap<LaneId, Vec<usize>> = HashMap::new();
    for (index, job) in jobs.iter().enumerate() {
        by_lane.entry(job.lane).or_default().push(index);
    }

    for indices in by_lane.values_mut() {
        indices.sort_by(|&a, &b| {
            jobs[a]
                .start
                .total_cmp(&jobs[b].start)
                .then(jobs[a].id.cmp(&jobs[b].id))
        });

        for pair in indices.windows(2) {
            let next = NextJob {
                id: jobs[pair[1]].id,
                start: jobs[pair[1]].start,
            };
            jobs[pair[0]].next = Some(next);
        }
        if let Some(&last) = indices.last() {
            jobs[last].next = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildlane_protocol::{Color, Paint};

    fn paints() -> Arc<JobPaints> {
        Arc::new(JobPaints {
            background: Paint::solid(Color::hex(0x202020)),
            border: None,
            foreground: Paint::solid(Color::hex(0xffffff)),
        })
    }

    #[test]
    fn links_jobs_within_each_lane() {
        let p = paints();
        let mut jobs = vec![
            Job::new(JobId(1), "b", LaneId(0), 5.0, 8.0, Arc::clone(&p)),
            Job::new(JobId(2), "x", LaneId(1), 0.0, 3.0, Arc::clone(&p)),
            Job::new(JobId(3), "a", LaneId(0), 0.0, 5.0, Arc::clone(&p)),
            Job::new(JobId(4), "c", LaneId(0), 8.0, 9.0, Arc::clone(&p)),
        ];
        link_lanes(&mut jobs);

        assert_eq!(
            jobs[2].next,
            Some(NextJob {
                id: JobId(1),
                start: 5.0
            })
        );
        assert_eq!(jobs[0].next.map(|n| n.id), Some(JobId(4)));
        assert_eq!(jobs[3].next, None);
        assert_eq!(jobs[1].next, None);
    }

    #[test]
    fn relinking_clears_stale_next() {
        let p = paints();
        let mut jobs = vec![Job::new(JobId(1), "a", LaneId(0), 0.0, 1.0, p).with_next(JobId(9), 3.0)];
        link_lanes(&mut jobs);
        assert_eq!(jobs[0].next, None);
    }

    #[test]
    fn building_sets_status_and_elapsed() {
        let job = Job::new(JobId(1), "cc", LaneId(0), 0.0, 4.7, paints()).building(4.7);
        assert!(job.status.is_building());
        assert!((job.elapsed_seconds - 4.7).abs() < f64::EPSILON);
    }
}
