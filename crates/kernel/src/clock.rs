use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Monotonic time source for the scheduler.
pub trait Clock {
    /// Time elapsed since an arbitrary fixed origin.
    fn now(&mut self) -> Duration;
    fn sleep(&mut self, duration: Duration);
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&mut self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Scripted clock for deterministic loops.
///
/// Each [`Clock::now`] call returns the current time and then advances it by the next
/// scripted step, so consecutive readings are exactly the scripted intervals apart.
/// Once the script runs out, time only moves when the loop sleeps.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    time: Duration,
    steps: VecDeque<Duration>,
    slept: Vec<Duration>,
}

impl ManualClock {
    pub fn new(steps: impl IntoIterator<Item = Duration>) -> Self {
        Self {
            time: Duration::ZERO,
            steps: steps.into_iter().collect(),
            slept: Vec::new(),
        }
    }

    /// Every sleep requested so far.
    pub fn slept(&self) -> &[Duration] {
        &self.slept
    }

    pub fn remaining_steps(&self) -> usize {
        self.steps.len()
    }
}

impl Clock for ManualClock {
    fn now(&mut self) -> Duration {
        let reading = self.time;
        self.time += self.steps.pop_front().unwrap_or(Duration::ZERO);
        reading
    }

    fn sleep(&mut self, duration: Duration) {
        self.slept.push(duration);
        self.time += duration;
    }
}
