// src/viewer/gesture.rs
use super::Direction;

/// Recognizes horizontal swipes from a touch start / touch end pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeTracker {
    threshold: f64,
    start: Option<(f64, f64)>,
}

impl SwipeTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            start: None,
        }
    }

    pub fn start(&mut self, x: f64, y: f64) {
        self.start = Some((x, y));
    }

    pub fn cancel(&mut self) {
        self.start = None;
    }

    // Finger moving left pages forward.
    pub fn end(&mut self, x: f64, y: f64) -> Option<Direction> {
        let (start_x, start_y) = self.start.take()?;
        let dx = start_x - x;
        let dy = start_y - y;

        if dx.abs() > dy.abs() && dx.abs() > self.threshold {
            Some(if dx > 0.0 {
                Direction::Next
            } else {
                Direction::Previous
            })
        } else {
            None
        }
    }
}
