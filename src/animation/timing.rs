use crate::animation::transfer::TransferFn;

/// Slack used when deciding whether an offered `dt` reaches the end of a duration; keeps
/// accumulated float error from leaving a sliver of time for an extra tick.
pub const TIME_EPSILON: f64 = 1e-9;

/// Per-instruction time accounting.
///
/// A negative `duration` runs indefinitely: every offered `dt` is consumed and the timing
/// never completes.
#[derive(Clone, Copy, Debug)]
pub struct Timing {
    duration: f64,
    time_used: f64,
    total_time_used: f64,
    transfer: TransferFn,
}

impl Timing {
    pub fn new(duration: f64, transfer: TransferFn) -> Self {
        Self {
            duration,
            time_used: 0.0,
            total_time_used: 0.0,
            transfer,
        }
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn transfer(&self) -> TransferFn {
        self.transfer
    }

    /// Time consumed by the latest [`Timing::update`].
    pub fn time_used(&self) -> f64 {
        self.time_used
    }

    pub fn total_time_used(&self) -> f64 {
        self.total_time_used
    }

    pub fn time_left(&self) -> f64 {
        if self.is_indefinite() {
            f64::INFINITY
        } else {
            self.duration - self.total_time_used
        }
    }

    pub fn is_indefinite(&self) -> bool {
        self.duration < 0.0
    }

    pub fn is_complete(&self) -> bool {
        !self.is_indefinite() && self.total_time_used >= self.duration
    }

    /// Transfer-adjusted fraction of the duration elapsed; 1 for instantaneous timings.
    pub fn alpha(&self) -> f64 {
        if self.duration > 0.0 {
            self.transfer.apply(self.total_time_used / self.duration)
        } else if self.is_indefinite() {
            0.0
        } else {
            1.0
        }
    }

    /// Consume up to `dt` and return the amount used.
    pub fn update(&mut self, dt: f64) -> f64 {
        let dt = dt.max(0.0);
        let left = self.time_left();
        if left - dt > TIME_EPSILON {
            self.total_time_used += dt;
            self.time_used = dt;
        } else {
            self.time_used = left.clamp(0.0, dt);
            self.total_time_used = self.duration;
        }
        self.time_used
    }

    /// Forget all consumed time.
    pub fn reset(&mut self) {
        self.time_used = 0.0;
        self.total_time_used = 0.0;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timing.rs"]
mod tests;
