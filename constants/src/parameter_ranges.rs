/// Inclusive numeric range with a snapping step, as bound by a control slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ParameterRange {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// Snap `value` to the nearest step above `min`, then clamp into the range.
    /// Non-finite input collapses to `min`.
    pub fn clamp_and_snap(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.min;
        }

        let snapped = if self.step > 0.0 {
            let steps = ((value - self.min) / self.step).round();
            self.min + steps * self.step
        } else {
            value
        };

        snapped.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

pub const COUNT_RANGE: ParameterRange = ParameterRange::new(0.0, 100_000.0, 100.0);
pub const SIZE_RANGE: ParameterRange = ParameterRange::new(0.001, 0.1, 0.001);
pub const RADIUS_RANGE: ParameterRange = ParameterRange::new(0.01, 20.0, 0.01);
pub const BRANCHES_RANGE: ParameterRange = ParameterRange::new(2.0, 20.0, 1.0);
pub const SPIN_RANGE: ParameterRange = ParameterRange::new(-5.0, 5.0, 0.001);
pub const RANDOMNESS_RANGE: ParameterRange = ParameterRange::new(0.0, 2.0, 0.001);
pub const RANDOMNESS_POWER_RANGE: ParameterRange = ParameterRange::new(1.0, 10.0, 0.002);
