//! Wall-clock lap timer.

use std::time::{Duration, Instant};

/// Starts on construction; [`lap`](Self::lap) returns the time elapsed since
/// construction or the previous lap, whichever was later, and resets.
#[derive(Debug)]
pub struct Timer {
    begin: Instant,
}

impl Timer {
    /// Starts the timer.
    #[must_use]
    pub fn start() -> Self {
        Self {
            begin: Instant::now(),
        }
    }

    /// Returns the elapsed time since start or the last lap and resets.
    pub fn lap(&mut self) -> Duration {
        let now = Instant::now();
        let lap_duration = now.duration_since(self.begin);
        self.begin = now;
        lap_duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lap_resets_the_baseline() {
        let mut timer = Timer::start();
        std::thread::sleep(Duration::from_millis(2));
        let first = timer.lap();
        let second = timer.lap();
        assert!(first >= Duration::from_millis(2));
        assert!(second < first);
    }
}
