//! Simulated download progress.
//!
//! The panel's pull endpoint is fire-and-accept and exposes no transfer
//! telemetry, so the orchestrator fabricates a plausible progress curve
//! purely for user feedback: larger increments early, smaller near
//! completion, reaching exactly 100 within a bounded number of ticks. The
//! numbers must never be mistaken for, or substituted by, real byte counts.
//!
//! The simulator is a pure lazy sequence - it never sleeps. The orchestrator
//! owns the wall-clock cadence, which keeps exact tick sequences assertable
//! in tests via a fixed seed.

use std::time::Duration;

/// One simulated progress tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulatedTick {
    /// Completion percentage, 0..=100, strictly increasing across ticks.
    pub percent: u8,
    /// `total_estimate * percent / 100`.
    pub downloaded_estimate: u64,
    /// The static size estimate this curve is scaled to.
    pub total_estimate: u64,
    /// Human-readable rate for this tick (e.g., "4.2 MB/s").
    pub speed_label: String,
}

/// Small deterministic generator; xorshift64.
///
/// Seedable so tests can assert exact tick sequences. Not for anything
/// security-sensitive.
#[derive(Clone, Debug)]
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    const fn new(seed: u64) -> Self {
        // A zero state would be a fixed point; nudge it.
        Self {
            state: if seed == 0 { 0x9e37_79b9_7f4a_7c15 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform-ish value in `lo..=hi`.
    fn next_in(&mut self, lo: u64, hi: u64) -> u64 {
        lo + self.next_u64() % (hi - lo + 1)
    }
}

/// Lazy, seedable sequence of simulated progress ticks.
///
/// Exhausted once it has produced a 100% tick; a new run needs a new
/// simulator.
#[derive(Clone, Debug)]
pub struct ProgressSimulator {
    percent: u8,
    total_estimate: u64,
    ticks_remaining: u32,
    last_estimate: u64,
    tick_interval: Duration,
    rng: XorShift64,
    exhausted: bool,
}

impl ProgressSimulator {
    /// Create a simulator for one run.
    ///
    /// `tick_count` bounds the sequence length: the final tick is forced to
    /// 100 so the curve always terminates within the duration budget.
    #[must_use]
    pub fn new(total_estimate: u64, tick_count: u32, tick_interval: Duration, seed: u64) -> Self {
        Self {
            percent: 0,
            total_estimate,
            ticks_remaining: tick_count.max(1),
            last_estimate: 0,
            tick_interval,
            rng: XorShift64::new(seed),
            exhausted: false,
        }
    }

    /// Produce the next tick, or `None` once 100% has been reported.
    pub fn next_tick(&mut self) -> Option<SimulatedTick> {
        if self.exhausted {
            return None;
        }

        let remaining = 100 - self.percent;
        let step = if self.ticks_remaining <= 1 {
            remaining
        } else {
            // Take a random share of what remains: big strides at the start
            // of the curve, a crawl near the end.
            let share = self.rng.next_in(4, 18);
            let step = (u64::from(remaining) * share / 100).max(1);
            u8::try_from(step).unwrap_or(remaining).min(remaining)
        };

        self.percent += step;
        self.ticks_remaining -= 1;
        if self.percent >= 100 {
            self.percent = 100;
            self.exhausted = true;
        }

        let downloaded_estimate = self.total_estimate * u64::from(self.percent) / 100;
        let delta = downloaded_estimate.saturating_sub(self.last_estimate);
        self.last_estimate = downloaded_estimate;

        let secs = self.tick_interval.as_secs_f64();
        #[allow(clippy::cast_precision_loss)]
        let speed = if secs > 0.0 { delta as f64 / secs } else { 0.0 };

        Some(SimulatedTick {
            percent: self.percent,
            downloaded_estimate,
            total_estimate: self.total_estimate,
            speed_label: format_speed(speed),
        })
    }
}

/// Format a byte count for display ("52.4 MB").
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];

    #[allow(clippy::cast_precision_loss)]
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

/// Format a transfer rate for display ("4.2 MB/s").
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_speed(bytes_per_sec: f64) -> String {
    format!("{}/s", format_bytes(bytes_per_sec.max(0.0) as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(mut sim: ProgressSimulator) -> Vec<SimulatedTick> {
        let mut ticks = Vec::new();
        while let Some(tick) = sim.next_tick() {
            ticks.push(tick);
        }
        ticks
    }

    #[test]
    fn test_sequence_is_strictly_increasing_and_ends_at_100() {
        let sim = ProgressSimulator::new(50 << 20, 60, Duration::from_millis(500), 42);
        let ticks = drain(sim);

        assert!(!ticks.is_empty());
        for pair in ticks.windows(2) {
            assert!(pair[1].percent > pair[0].percent);
        }
        assert_eq!(ticks.last().unwrap().percent, 100);
    }

    #[test]
    fn test_bounded_by_tick_count() {
        for seed in [1, 7, 42, 1234, u64::MAX] {
            let sim = ProgressSimulator::new(1 << 20, 20, Duration::from_millis(100), seed);
            assert!(drain(sim).len() <= 20, "seed {seed} overran the budget");
        }
    }

    #[test]
    fn test_exhausted_after_completion() {
        let mut sim = ProgressSimulator::new(1 << 20, 3, Duration::from_millis(100), 9);
        while sim.next_tick().is_some() {}
        assert!(sim.next_tick().is_none());
        assert!(sim.next_tick().is_none());
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let a = drain(ProgressSimulator::new(
            10 << 20,
            30,
            Duration::from_millis(250),
            777,
        ));
        let b = drain(ProgressSimulator::new(
            10 << 20,
            30,
            Duration::from_millis(250),
            777,
        ));
        assert_eq!(a, b);
    }

    #[test]
    fn test_estimate_tracks_percent() {
        let total = 100 << 20;
        let sim = ProgressSimulator::new(total, 40, Duration::from_millis(500), 5);
        for tick in drain(sim) {
            assert_eq!(
                tick.downloaded_estimate,
                total * u64::from(tick.percent) / 100
            );
            assert_eq!(tick.total_estimate, total);
        }
    }

    #[test]
    fn test_single_tick_budget_jumps_to_100() {
        let mut sim = ProgressSimulator::new(1 << 20, 1, Duration::from_millis(100), 3);
        let tick = sim.next_tick().unwrap();
        assert_eq!(tick.percent, 100);
        assert!(sim.next_tick().is_none());
    }

    #[test]
    fn test_zero_seed_still_advances() {
        let ticks = drain(ProgressSimulator::new(
            1 << 20,
            10,
            Duration::from_millis(100),
            0,
        ));
        assert_eq!(ticks.last().unwrap().percent, 100);
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(52 << 20), "52.0 MB");
        assert_eq!(format_bytes(3 << 30), "3.0 GB");
    }

    #[test]
    fn test_format_speed() {
        assert_eq!(format_speed(2.0 * 1024.0 * 1024.0), "2.0 MB/s");
        assert_eq!(format_speed(0.0), "0 B/s");
        assert_eq!(format_speed(-5.0), "0 B/s");
    }
}
