// Chromatic sweep: dense overlapping ramps for exercising a player.
//
// Several identical chromatic ramps follow each other with a very short
// onset spacing and long, overlapping notes, so dozens of notes sound at
// once. Velocity is given directly in MIDI units.

use serde::{Deserialize, Serialize};

use crate::note::{Composition, Note, fold_pitch};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromaticSweepParams {
    pub bpm: f64,
    pub sweeps: usize,
    /// Semitones per sweep.
    pub span: usize,
    pub base_pitch: i32,
    pub onsets_per_beat: f64,
    pub duration: f64,
    pub velocity: u8,
    pub channel: u8,
}

impl Default for ChromaticSweepParams {
    fn default() -> Self {
        ChromaticSweepParams {
            bpm: 60.0,
            sweeps: 3,
            span: 60,
            base_pitch: 30,
            onsets_per_beat: 40.0,
            duration: 4.0,
            velocity: 60,
            channel: 0,
        }
    }
}

pub fn compose(params: &ChromaticSweepParams) -> Composition {
    let mut comp = Composition::new(params.bpm);
    let steps = (0..params.sweeps).flat_map(|_| 0..params.span);
    for (index, step) in steps.enumerate() {
        comp.push(Note::new(
            fold_pitch(params.base_pitch.saturating_add(step as i32)),
            params.velocity.min(127),
            params.channel,
            index as f64 / params.onsets_per_beat,
            params.duration,
        ));
    }
    comp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_ramps_of_sixty() {
        let comp = compose(&ChromaticSweepParams::default());
        assert_eq!(comp.len(), 180);
        assert_eq!(comp.notes[0].pitch, 30);
        assert_eq!(comp.notes[59].pitch, 89);
        assert_eq!(comp.notes[60].pitch, 30);
        assert!(comp.is_time_ordered());
        assert!(comp.validate().is_ok());
    }

    #[test]
    fn onsets_are_a_fortieth_apart() {
        let comp = compose(&ChromaticSweepParams::default());
        assert_eq!(comp.notes[1].time, 1.0 / 40.0);
        assert_eq!(comp.notes[179].time, 179.0 / 40.0);
        assert_eq!(comp.end_beat(), 179.0 / 40.0 + 4.0);
    }
}
