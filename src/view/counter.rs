//! Counter tween: the displayed stat steps one unit at a time from its
//! previous value to the target, spread evenly over a fixed duration.

use std::time::Duration;

/// Displayed value after `elapsed` of an animation from `previous` to `target`.
///
/// Clamped to `target` once `elapsed >= duration`.
pub fn tween(previous: i64, target: i64, elapsed: Duration, duration: Duration) -> i64 {
    let steps = (target - previous).unsigned_abs();
    if steps == 0 || elapsed >= duration || duration.is_zero() {
        return target;
    }

    let done = (elapsed.as_nanos() * u128::from(steps) / duration.as_nanos()) as i64;
    previous + done * (target - previous).signum()
}

/// Frame iterator over a tween, one frame per unit step.
#[derive(Debug, Clone)]
pub struct CounterTween {
    current: i64,
    target: i64,
    step_delay: Duration,
}

impl CounterTween {
    pub fn new(previous: i64, target: i64, duration: Duration) -> Self {
        let steps = (target - previous).unsigned_abs().max(1);
        Self {
            current: previous,
            target,
            step_delay: duration / u32::try_from(steps).unwrap_or(u32::MAX),
        }
    }

    /// Time between consecutive frames.
    pub fn step_delay(&self) -> Duration {
        self.step_delay
    }
}

impl Iterator for CounterTween {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        if self.current == self.target {
            return None;
        }
        self.current += (self.target - self.current).signum();
        Some(self.current)
    }
}
