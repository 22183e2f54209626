use std::time::Duration;

/// Ring buffer of recent frame durations for average/min/max reporting.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    history: Vec<Duration>,
    index: usize,
    filled: bool,
}

impl FrameTimer {
    /// `capacity` is clamped to at least one slot.
    pub fn new(capacity: usize) -> Self {
        Self {
            history: vec![Duration::ZERO; capacity.max(1)],
            index: 0,
            filled: false,
        }
    }

    pub fn record(&mut self, frame: Duration) {
        self.history[self.index] = frame;
        self.index = (self.index + 1) % self.history.len();
        if self.index == 0 {
            self.filled = true;
        }
    }

    pub fn count(&self) -> usize {
        if self.filled {
            self.history.len()
        } else {
            self.index
        }
    }

    fn samples(&self) -> &[Duration] {
        &self.history[..self.count()]
    }

    pub fn average(&self) -> Duration {
        match self.count() {
            0 => Duration::ZERO,
            n => self.samples().iter().sum::<Duration>() / n as u32,
        }
    }

    pub fn max(&self) -> Duration {
        self.samples().iter().copied().max().unwrap_or(Duration::ZERO)
    }

    pub fn min(&self) -> Duration {
        self.samples().iter().copied().min().unwrap_or(Duration::ZERO)
    }
}

/// Ticks and renders completed during the last full second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopRates {
    pub ticks_per_second: u32,
    pub renders_per_second: u32,
}

/// Counts ticks and renders and publishes [`LoopRates`] once per second of loop time.
#[derive(Debug, Clone, Default)]
pub struct FrameCounter {
    elapsed: Duration,
    ticks: u32,
    renders: u32,
    last: Option<LoopRates>,
}

impl FrameCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_ticks(&mut self, ticks: u32) {
        self.ticks += ticks;
    }

    pub fn add_render(&mut self) {
        self.renders += 1;
    }

    /// Accumulate loop time. Returns the rates when a full second has passed.
    pub fn advance(&mut self, passed: Duration) -> Option<LoopRates> {
        self.elapsed += passed;
        if self.elapsed < Duration::from_secs(1) {
            return None;
        }
        self.elapsed -= Duration::from_secs(1);
        let rates = LoopRates {
            ticks_per_second: std::mem::take(&mut self.ticks),
            renders_per_second: std::mem::take(&mut self.renders),
        };
        tracing::debug!(
            tps = rates.ticks_per_second,
            fps = rates.renders_per_second,
            "loop rates"
        );
        self.last = Some(rates);
        Some(rates)
    }

    /// Most recently published rates.
    pub fn last(&self) -> Option<LoopRates> {
        self.last
    }
}
