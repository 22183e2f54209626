use std::time::{Duration, Instant};

use orrery_common::TimingConfig;

use crate::clock::Clock;
use crate::error::EngineError;
use crate::stats::{FrameCounter, FrameTimer, LoopRates};

/// Lifecycle of a [`Scheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Not looping. The initial state, and the state after a close or stop request.
    Stopped,
    /// Between `start` and the next close or stop request.
    Running,
}

/// What the scheduler needs from the environment it runs in.
pub trait LoopHost {
    /// The window asked to close.
    fn close_requested(&self) -> bool;
    /// The game or host asked the loop to stop.
    fn stop_requested(&self) -> bool;
    /// Poll input devices and advance the input latch.
    fn poll_input(&mut self);
    /// Publish the fixed step length, in seconds, for this tick.
    fn set_delta(&mut self, delta: f32);
    /// Show the frame just rendered.
    fn present(&mut self);
    /// Release the window and input devices.
    fn cleanup(&mut self);
}

/// Game callbacks. `handle_input` and `update` run once per tick, `render` at most once
/// per loop iteration.
pub trait Game<H: LoopHost> {
    /// React to the input latched for this tick.
    fn handle_input(&mut self, host: &mut H) -> Result<(), EngineError>;
    /// Advance the simulation by one fixed step.
    fn update(&mut self, host: &mut H) -> Result<(), EngineError>;
    /// Draw the state left by the latest update.
    fn render(&mut self, host: &mut H) -> Result<(), EngineError>;
}

/// Outcome of one loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Iteration {
    /// Fixed steps run this iteration.
    pub ticks: u32,
    /// Whether the game rendered and the host presented.
    pub rendered: bool,
}

/// Totals for a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoopSummary {
    pub ticks: u64,
    pub renders: u64,
    /// Clock time between the first and last reading.
    pub elapsed: Duration,
    /// Mean over the frame timer's window.
    pub average_render: Duration,
    /// Last published per-second rates; `None` for runs shorter than a second.
    pub rates: Option<LoopRates>,
}

/// Accumulator-based fixed-timestep loop.
///
/// Elapsed time is banked in `unprocessed`; every whole `fixed_frame_time` in the bank
/// runs one tick. The game renders once after any iteration that ticked, and the loop
/// sleeps instead when none did.
#[derive(Debug)]
pub struct Scheduler<C> {
    clock: C,
    state: RunState,
    cleaned_up: bool,
    fixed_frame_time: f64,
    idle_sleep: Duration,
    unprocessed: f64,
    counter: FrameCounter,
    timer: FrameTimer,
    summary: LoopSummary,
}

impl<C: Clock> Scheduler<C> {
    /// A stopped scheduler stepping at `timing.ticks_per_second`.
    pub fn new(clock: C, timing: &TimingConfig) -> Self {
        Self {
            clock,
            state: RunState::Stopped,
            cleaned_up: true,
            fixed_frame_time: timing.fixed_frame_time(),
            idle_sleep: timing.idle_sleep(),
            unprocessed: 0.0,
            counter: FrameCounter::new(),
            timer: FrameTimer::new(timing.stats_window),
            summary: LoopSummary::default(),
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Seconds of elapsed time not yet consumed by a tick.
    pub fn unprocessed(&self) -> f64 {
        self.unprocessed
    }

    /// Length of one tick in seconds.
    pub fn fixed_frame_time(&self) -> f64 {
        self.fixed_frame_time
    }

    /// The time source, for inspecting scripted clocks after a run.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Totals for the current or most recent run.
    pub fn summary(&self) -> LoopSummary {
        self.summary
    }

    /// Move to `Running`. Returns `false`, changing nothing, if already running.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.state = RunState::Running;
        self.cleaned_up = false;
        self.unprocessed = 0.0;
        self.summary = LoopSummary::default();
        tracing::info!(tick_seconds = self.fixed_frame_time, "scheduler started");
        true
    }

    /// Request a stop. The loop exits at its next check.
    pub fn stop(&mut self) {
        if self.is_running() {
            tracing::info!("scheduler stopping");
        }
        self.state = RunState::Stopped;
    }

    /// Dispose the host's resources. Runs at most once per start and only while stopped.
    pub fn cleanup<H: LoopHost>(&mut self, host: &mut H) -> Result<(), EngineError> {
        if self.is_running() {
            return Err(EngineError::CleanupWhileRunning);
        }
        if !self.cleaned_up {
            host.cleanup();
            self.cleaned_up = true;
            tracing::info!("scheduler cleaned up");
        }
        Ok(())
    }

    /// Bank `passed`, run every tick it pays for, then render once if anything ticked.
    ///
    /// A close or stop request seen during a tick moves the scheduler to `Stopped`. The
    /// ticks already banked for this iteration still run and the iteration still renders;
    /// [`Scheduler::run`] exits at its next check.
    pub fn iterate<H, G>(
        &mut self,
        passed: Duration,
        host: &mut H,
        game: &mut G,
    ) -> Result<Iteration, EngineError>
    where
        H: LoopHost,
        G: Game<H>,
    {
        self.unprocessed += passed.as_secs_f64();

        let mut ticks = 0;
        while self.unprocessed > self.fixed_frame_time {
            self.unprocessed -= self.fixed_frame_time;
            host.set_delta(self.fixed_frame_time as f32);
            if host.close_requested() || host.stop_requested() {
                self.stop();
            }
            host.poll_input();
            game.handle_input(host)?;
            game.update(host)?;
            ticks += 1;
        }
        self.counter.add_ticks(ticks);
        self.summary.ticks += u64::from(ticks);

        let rendered = ticks > 0;
        if rendered {
            let started = Instant::now();
            game.render(host)?;
            host.present();
            self.timer.record(started.elapsed());
            self.counter.add_render();
            self.summary.renders += 1;
        }

        if let Some(rates) = self.counter.advance(passed) {
            self.summary.rates = Some(rates);
        }
        Ok(Iteration { ticks, rendered })
    }

    /// Start and drive the loop until the host asks to close or stop, then clean up.
    ///
    /// An error from the game stops the loop; cleanup still runs before it is returned.
    pub fn run<H, G>(&mut self, host: &mut H, game: &mut G) -> Result<LoopSummary, EngineError>
    where
        H: LoopHost,
        G: Game<H>,
    {
        self.start();
        let began = self.clock.now();
        let mut last = began;

        let outcome = loop {
            if !self.is_running() {
                break Ok(());
            }
            let now = self.clock.now();
            let passed = now.saturating_sub(last);
            last = now;

            match self.iterate(passed, host, game) {
                Ok(Iteration { rendered: false, .. }) => self.clock.sleep(self.idle_sleep),
                Ok(_) => {}
                Err(err) => {
                    tracing::error!(%err, "game loop aborted");
                    break Err(err);
                }
            }
        };

        self.stop();
        self.cleanup(host)?;
        outcome?;

        self.summary.elapsed = last.saturating_sub(began);
        self.summary.average_render = self.timer.average();
        tracing::info!(
            ticks = self.summary.ticks,
            renders = self.summary.renders,
            elapsed = ?self.summary.elapsed,
            "scheduler finished"
        );
        Ok(self.summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn timing(ticks_per_second: f64) -> TimingConfig {
        TimingConfig {
            ticks_per_second,
            ..TimingConfig::default()
        }
    }

    /// Host that asks to close on the `close_after`-th close check.
    #[derive(Debug, Default)]
    struct TestHost {
        close_after: Option<usize>,
        stop: bool,
        close_checks: std::cell::Cell<usize>,
        polls: usize,
        presents: usize,
        cleanups: usize,
        delta: f32,
        events: Vec<&'static str>,
    }

    impl LoopHost for TestHost {
        fn close_requested(&self) -> bool {
            let n = self.close_checks.get() + 1;
            self.close_checks.set(n);
            self.close_after.is_some_and(|limit| n >= limit)
        }
        fn stop_requested(&self) -> bool {
            self.stop
        }
        fn poll_input(&mut self) {
            self.polls += 1;
            self.events.push("poll");
        }
        fn set_delta(&mut self, delta: f32) {
            self.delta = delta;
        }
        fn present(&mut self) {
            self.presents += 1;
            self.events.push("present");
        }
        fn cleanup(&mut self) {
            self.cleanups += 1;
        }
    }

    #[derive(Debug, Default)]
    struct CountingGame {
        inputs: usize,
        updates: usize,
        renders: usize,
        fail_on_update: Option<usize>,
        stop_on_update: Option<usize>,
    }

    impl Game<TestHost> for CountingGame {
        fn handle_input(&mut self, host: &mut TestHost) -> Result<(), EngineError> {
            self.inputs += 1;
            host.events.push("input");
            Ok(())
        }
        fn update(&mut self, host: &mut TestHost) -> Result<(), EngineError> {
            self.updates += 1;
            host.events.push("update");
            if self.stop_on_update == Some(self.updates) {
                host.stop = true;
            }
            if self.fail_on_update == Some(self.updates) {
                return Err(orrery_math::StackError::Underflow.into());
            }
            Ok(())
        }
        fn render(&mut self, host: &mut TestHost) -> Result<(), EngineError> {
            self.renders += 1;
            host.events.push("render");
            Ok(())
        }
    }

    fn running(tps: f64) -> Scheduler<ManualClock> {
        let mut scheduler = Scheduler::new(ManualClock::default(), &timing(tps));
        assert!(scheduler.start());
        scheduler
    }

    #[test]
    fn sixteen_ms_frames_at_ten_ms_ticks() {
        let mut scheduler = running(100.0);
        let mut host = TestHost::default();
        let mut game = CountingGame::default();

        let ticks: Vec<u32> = (0..3)
            .map(|_| scheduler.iterate(ms(16), &mut host, &mut game).unwrap().ticks)
            .collect();

        assert_eq!(ticks, vec![1, 2, 1]);
        assert_eq!(game.updates, 4);
        assert_eq!(game.inputs, 4);
        assert_eq!(game.renders, 3);
        assert_eq!(host.presents, 3);
        assert!((scheduler.unprocessed() - 0.008).abs() < 1e-9);
        assert!((host.delta - 0.01).abs() < 1e-7);
    }

    #[test]
    fn no_tick_means_no_render() {
        let mut scheduler = running(100.0);
        let mut host = TestHost::default();
        let mut game = CountingGame::default();
        let it = scheduler.iterate(ms(5), &mut host, &mut game).unwrap();
        assert_eq!(it, Iteration { ticks: 0, rendered: false });
        assert_eq!(game.renders, 0);
        assert_eq!(host.polls, 0);
    }

    #[test]
    fn exactly_one_step_waits_for_more_time() {
        let mut scheduler = running(4.0);
        let mut host = TestHost::default();
        let mut game = CountingGame::default();
        // The bank must exceed the step, not merely reach it.
        let it = scheduler.iterate(ms(250), &mut host, &mut game).unwrap();
        assert_eq!(it.ticks, 0);
        let it = scheduler.iterate(ms(1), &mut host, &mut game).unwrap();
        assert_eq!(it.ticks, 1);
    }

    #[test]
    fn ticks_complete_before_render() {
        let mut scheduler = running(100.0);
        let mut host = TestHost::default();
        let mut game = CountingGame::default();
        scheduler.iterate(ms(25), &mut host, &mut game).unwrap();
        assert_eq!(
            host.events,
            vec!["poll", "input", "update", "poll", "input", "update", "render", "present"]
        );
    }

    #[test]
    fn close_request_finishes_banked_ticks_then_stops() {
        let mut scheduler = running(100.0);
        let mut host = TestHost {
            close_after: Some(1),
            ..TestHost::default()
        };
        let mut game = CountingGame::default();
        let it = scheduler.iterate(ms(35), &mut host, &mut game).unwrap();

        assert_eq!(it, Iteration { ticks: 3, rendered: true });
        assert_eq!(game.updates, 3);
        assert_eq!(game.renders, 1);
        assert_eq!(scheduler.state(), RunState::Stopped);
        assert!((scheduler.unprocessed() - 0.005).abs() < 1e-9);
    }

    #[test]
    fn stop_requested_by_game_ends_run_at_next_iteration() {
        let clock = ManualClock::new(std::iter::repeat_n(ms(16), 16));
        let mut scheduler = Scheduler::new(clock, &timing(100.0));
        let mut host = TestHost::default();
        let mut game = CountingGame {
            stop_on_update: Some(1),
            ..CountingGame::default()
        };

        let summary = scheduler.run(&mut host, &mut game).unwrap();

        // 16 ms pays for one tick, whose update asks to stop. The next iteration banks
        // 22 ms: the first tick sees the request, both ticks still run, then the loop exits.
        assert_eq!(game.updates, 3);
        assert_eq!(game.renders, 2);
        assert_eq!(summary.ticks, 3);
        assert_eq!(host.cleanups, 1);
        assert_eq!(scheduler.state(), RunState::Stopped);
    }

    #[test]
    fn run_exits_on_close_and_cleans_up_once() {
        let clock = ManualClock::new([ms(16), ms(16), ms(16), ms(16)]);
        let mut scheduler = Scheduler::new(clock, &timing(100.0));
        let mut host = TestHost {
            close_after: Some(4),
            ..TestHost::default()
        };
        let mut game = CountingGame::default();

        let summary = scheduler.run(&mut host, &mut game).unwrap();

        // First reading is the origin, so the iterations see 16, 16 and 16 ms.
        assert_eq!(game.updates, 4);
        assert_eq!(game.renders, 3);
        assert_eq!(summary.ticks, 4);
        assert_eq!(summary.renders, 3);
        assert_eq!(host.cleanups, 1);
        assert!(!scheduler.is_running());

        scheduler.cleanup(&mut host).unwrap();
        assert_eq!(host.cleanups, 1);
    }

    #[test]
    fn run_sleeps_when_idle() {
        // 2 ms per reading at 100 tps: a few idle iterations before the first tick.
        let clock = ManualClock::new(std::iter::repeat_n(ms(2), 64));
        let mut scheduler = Scheduler::new(clock, &timing(100.0));
        let mut host = TestHost {
            close_after: Some(1),
            ..TestHost::default()
        };
        let mut game = CountingGame::default();

        scheduler.run(&mut host, &mut game).unwrap();
        assert_eq!(game.updates, 1);
        assert_eq!(game.renders, 1);
        assert!(!scheduler.clock().slept().is_empty());
        assert!(scheduler.clock().slept().iter().all(|d| *d == ms(1)));
    }

    #[test]
    fn cleanup_while_running_is_rejected() {
        let mut scheduler = running(60.0);
        let mut host = TestHost::default();
        let err = scheduler.cleanup(&mut host).unwrap_err();
        assert!(matches!(err, EngineError::CleanupWhileRunning));
        assert_eq!(host.cleanups, 0);
    }

    #[test]
    fn start_twice_is_a_no_op() {
        let mut scheduler = running(60.0);
        assert!(!scheduler.start());
        assert!(scheduler.is_running());
    }

    #[test]
    fn game_error_aborts_after_cleanup() {
        let clock = ManualClock::new(std::iter::repeat_n(ms(16), 16));
        let mut scheduler = Scheduler::new(clock, &timing(100.0));
        let mut host = TestHost::default();
        let mut game = CountingGame {
            fail_on_update: Some(2),
            ..CountingGame::default()
        };

        let err = scheduler.run(&mut host, &mut game).unwrap_err();
        assert!(matches!(err, EngineError::Stack(_)));
        assert_eq!(host.cleanups, 1);
        assert_eq!(game.renders, 1);
        assert!(!scheduler.is_running());
    }
}
