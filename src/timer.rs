use std::fmt;
use std::time::Duration;
use log::*;

pub const DEFAULT_DURATION: u32 = 15 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle(u32),
    Running(u32),
    Expired,
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Timer was not running, nothing changed
    Ignored,
    Running(u32),
    /// Reached zero on this tick. Reported once per countdown.
    Expired,
}

/// Countdown in whole seconds. Ticks only count while running.
#[derive(Debug, Clone)]
pub struct Countdown {
    state: TimerState,
    duration: u32,
}

impl Default for Countdown {
    fn default() -> Self {
        Countdown::new(DEFAULT_DURATION)
    }
}

impl Countdown {
    pub fn new(duration: u32) -> Self {
        Countdown { state: TimerState::Idle(duration), duration }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn remaining(&self) -> u32 {
        match self.state {
            TimerState::Idle(r) | TimerState::Running(r) => r,
            TimerState::Expired => 0,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running(_))
    }

    pub fn start(&mut self) {
        match self.state {
            TimerState::Idle(r) => self.state = TimerState::Running(r),
            TimerState::Running(_) => debug!("Timer already running"),
            TimerState::Expired => debug!("Timer expired, reset before starting"),
        }
    }

    pub fn stop(&mut self) {
        if let TimerState::Running(r) = self.state {
            self.state = TimerState::Idle(r);
        }
    }

    pub fn reset(&mut self, duration: u32) {
        self.state = TimerState::Idle(duration);
    }

    pub fn reset_default(&mut self) {
        self.reset(self.duration);
    }

    pub fn tick(&mut self) -> Tick {
        match self.state {
            TimerState::Running(r) => {
                let r = r.saturating_sub(1);
                if r == 0 {
                    info!("Timer expired");
                    self.state = TimerState::Expired;
                    Tick::Expired
                } else {
                    self.state = TimerState::Running(r);
                    Tick::Running(r)
                }
            }
            _ => Tick::Ignored,
        }
    }

    /// `MM:SS`, zero padded. Minutes are not wrapped into hours.
    pub fn display(&self) -> String {
        format_remaining(self.remaining())
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

pub fn format_remaining(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Drives a [`Countdown`] on a fixed interval from a single loop.
pub struct Ticker<W> {
    interval: Duration,
    wait: W,
}

impl Ticker<fn(Duration)> {
    pub fn every(interval: Duration) -> Self {
        Ticker { interval, wait: std::thread::sleep }
    }
}

impl<W: FnMut(Duration)> Ticker<W> {
    pub fn with_wait(interval: Duration, wait: W) -> Self {
        Ticker { interval, wait }
    }

    /// Starts `timer` and ticks it until it expires or `on_tick` returns false.
    /// On early exit the timer is stopped, keeping what is left.
    pub fn run<F>(&mut self, timer: &mut Countdown, mut on_tick: F) -> TimerState
    where
        F: FnMut(&Countdown, Tick) -> bool,
    {
        timer.start();
        while timer.is_running() {
            (self.wait)(self.interval);
            let tick = timer.tick();
            if !on_tick(timer, tick) {
                timer.stop();
                break;
            }
        }
        timer.state()
    }
}
