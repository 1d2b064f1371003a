use std::collections::HashMap;

use super::job::LaneId;

/// Vertical placement of lanes, built by the layout owner and read-only to
/// the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct LaneMap {
    tops: HashMap<LaneId, f64>,
    /// Width of the lane header column; job x-coordinates start after it.
    pub header_width: f64,
    /// Height of a job rectangle within its lane.
    pub job_height: f64,
}

impl LaneMap {
    pub fn new(header_width: f64, job_height: f64) -> Self {
        Self {
            tops: HashMap::new(),
            header_width,
            job_height,
        }
    }

    /// Lanes stacked top to bottom in iteration order, `row_height` apart.
    pub fn stacked(
        lanes: impl IntoIterator<Item = LaneId>,
        row_height: f64,
        header_width: f64,
        job_height: f64,
    ) -> Self {
        let mut map = Self::new(header_width, job_height);
        for (row, lane) in lanes.into_iter().enumerate() {
            map.insert(lane, row as f64 * row_height);
        }
        map
    }

    pub fn insert(&mut self, lane: LaneId, top: f64) {
        self.tops.insert(lane, top);
    }

    pub fn top(&self, lane: LaneId) -> Option<f64> {
        self.tops.get(&lane).copied()
    }

    pub fn len(&self) -> usize {
        self.tops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tops.is_empty()
    }

    /// Bottom edge of the lowest lane.
    pub fn content_height(&self) -> f64 {
        self.tops
            .values()
            .map(|top| top + self.job_height)
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stacked_lanes_are_row_height_apart() {
        let map = LaneMap::stacked([LaneId(3), LaneId(1), LaneId(2)], 20.0, 100.0, 18.0);
        assert_eq!(map.top(LaneId(3)), Some(0.0));
        assert_eq!(map.top(LaneId(1)), Some(20.0));
        assert_eq!(map.top(LaneId(2)), Some(40.0));
        assert_eq!(map.top(LaneId(9)), None);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn content_height_covers_last_lane() {
        let map = LaneMap::stacked([LaneId(0), LaneId(1)], 20.0, 0.0, 18.0);
        assert!((map.content_height() - 38.0).abs() < f64::EPSILON);
        assert!(LaneMap::new(0.0, 18.0).content_height().abs() < f64::EPSILON);
    }
}
