// Duration fitting and value scaling.
//
// Rhythms are written as relative weights ("long, short" = [6, 5]) and then
// fitted to a target length in beats. Loudness is written on a 0-10 level
// scale and mapped linearly onto MIDI velocity.

use crate::note::MAX_MIDI_VALUE;

/// Scale `values` so they sum to `overall_length`, keeping proportions.
///
/// Panics if the values sum to zero.
pub fn fit(values: &[f64], overall_length: f64) -> Vec<f64> {
    let total: f64 = values.iter().sum();
    assert!(total != 0.0, "fit: weights must not sum to zero");
    values.iter().map(|v| v * overall_length / total).collect()
}

/// Fit a rhythm so it averages one eighth note (half a beat) per value.
pub fn fit_eighths(values: &[f64]) -> Vec<f64> {
    fit(values, values.len() as f64 / 2.0)
}

/// Linear map from one interval onto another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    from_min: f64,
    from_max: f64,
    to_min: f64,
    to_max: f64,
}

impl Window {
    /// Panics if the source interval is empty.
    pub fn new(from_min: f64, from_max: f64, to_min: f64, to_max: f64) -> Self {
        assert!(from_min != from_max, "Window: source interval is empty");
        Window {
            from_min,
            from_max,
            to_min,
            to_max,
        }
    }

    /// Map `n`. Values outside the source interval extrapolate.
    pub fn apply(&self, n: f64) -> f64 {
        self.to_min + (n - self.from_min) * (self.to_max - self.to_min) / (self.from_max - self.from_min)
    }
}

/// The level scale: 0 is silent, 10 is full velocity.
pub const LEVEL_WINDOW: Window = Window {
    from_min: 0.0,
    from_max: 10.0,
    to_min: 0.0,
    to_max: MAX_MIDI_VALUE as f64,
};

/// MIDI velocity for a 0-10 level, truncated toward zero and clamped to
/// 0-127 so out-of-range levels still produce a playable note.
pub fn velocity_from_level(level: f64) -> u8 {
    let scaled = LEVEL_WINDOW.apply(level);
    if scaled.is_nan() {
        return 0;
    }
    scaled.trunc().clamp(0.0, f64::from(MAX_MIDI_VALUE)) as u8
}
