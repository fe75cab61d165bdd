use tracing::debug;

use crate::variant::ShaderVariant;

/// Turntable rotation for preview shapes, in radians per second.
pub const SPIN_SPEED: f64 = 0.5;

/// Seconds between automatic shader changes.
pub const DEFAULT_CYCLE_INTERVAL: f64 = 3.0;

const MIN_CYCLE_INTERVAL: f64 = 0.1;

/// Y-axis rotation of a spinning preview.
///
/// Fed the absolute elapsed time each frame. Frames that repeat or go back
/// in time are ignored, so replays never add rotation twice.
#[derive(Debug, Clone, PartialEq)]
pub struct Spin {
    pub spinning: bool,
    angle: f64,
    last_elapsed: Option<f64>,
}

impl Spin {
    pub fn new(spinning: bool) -> Self {
        Self {
            spinning,
            angle: 0.0,
            last_elapsed: None,
        }
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Advance to `elapsed` seconds. Stale, replayed and non-finite frames
    /// leave the angle unchanged.
    pub fn update(&mut self, elapsed: f64) -> f64 {
        if !elapsed.is_finite() {
            return self.angle;
        }
        let delta = match self.last_elapsed {
            Some(last) if elapsed <= last => return self.angle,
            Some(last) => elapsed - last,
            None => elapsed,
        };
        self.last_elapsed = Some(elapsed);
        if self.spinning {
            self.angle += delta * SPIN_SPEED;
        }
        self.angle
    }
}

/// Timer that steps a preview through the shader variants.
///
/// The variant shown at time `t` depends only on `t`, the start variant and
/// the interval. After [`ShaderCycler::stop`] no tick has any effect.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderCycler {
    start: ShaderVariant,
    interval: f64,
    steps: u64,
    running: bool,
}

impl ShaderCycler {
    pub fn new(start: ShaderVariant, interval: f64) -> Self {
        Self {
            start,
            interval: interval.max(MIN_CYCLE_INTERVAL),
            steps: 0,
            running: true,
        }
    }

    pub fn current(&self) -> ShaderVariant {
        let offset = (self.steps % ShaderVariant::ALL.len() as u64) as u8;
        ShaderVariant::from_index(self.start.index() + offset)
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns the new variant when an interval boundary was crossed since
    /// the last tick.
    pub fn tick(&mut self, elapsed: f64) -> Option<ShaderVariant> {
        if !self.running || !elapsed.is_finite() || elapsed < 0.0 {
            return None;
        }
        let steps = (elapsed / self.interval).floor() as u64;
        if steps <= self.steps {
            return None;
        }
        self.steps = steps;
        let variant = self.current();
        debug!(elapsed, variant = variant.label(), "shader cycled");
        Some(variant)
    }

    pub fn stop(&mut self) {
        self.running = false;
    }
}

impl Default for ShaderCycler {
    fn default() -> Self {
        Self::new(ShaderVariant::Standard, DEFAULT_CYCLE_INTERVAL)
    }
}
