// Broken chords: a major-triad figure in steady eighths, doubled in octaves.

use serde::{Deserialize, Serialize};

use crate::note::{Composition, Note, fold_pitch};
use crate::pattern::{SurroundRule, surround, transpose_pattern};
use crate::timing::velocity_from_level;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrokenChordsParams {
    pub bpm: f64,
    pub figure: Vec<i32>,
    pub repeats: usize,
    pub octave_pattern: Vec<i32>,
    pub surround: SurroundRule,
    pub duration: f64,
    pub level: f64,
    pub legato: f64,
    /// Every pitch is played once per doubling, at the same onset.
    pub doublings: Vec<i32>,
    pub channel: u8,
}

impl Default for BrokenChordsParams {
    fn default() -> Self {
        BrokenChordsParams {
            bpm: 250.0,
            figure: vec![0, 4, 7, 12, 7, 4],
            repeats: 100,
            octave_pattern: vec![0, 0, 12, 12, 0, 0, -12],
            surround: SurroundRule::lower_third(),
            duration: 0.5,
            level: 6.0,
            legato: 1.0,
            doublings: vec![60, 72],
            channel: 1,
        }
    }
}

pub fn compose(params: &BrokenChordsParams) -> Composition {
    let figure: Vec<i32> = params
        .figure
        .iter()
        .copied()
        .cycle()
        .take(params.figure.len() * params.repeats)
        .collect();
    let pitches = transpose_pattern(&figure, &params.octave_pattern);
    let pitches = surround(&pitches, &params.surround);

    let velocity = velocity_from_level(params.level);
    let mut comp = Composition::new(params.bpm);
    let mut time = 0.0;
    for &pitch in &pitches {
        for &doubling in &params.doublings {
            comp.push(Note::new(
                fold_pitch(pitch.saturating_add(doubling)),
                velocity,
                params.channel,
                time,
                params.duration * params.legato,
            ));
        }
        time += params.duration;
    }
    comp
}
