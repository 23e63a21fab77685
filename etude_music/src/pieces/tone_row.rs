// Tone row fragments.
//
// A random ordering of the twelve pitch classes is fixed up front. Each
// phrase reads a random window of the row (wrapping around), occasionally
// under a new transposition, at a random even pace, followed by a random
// pause.

use etude_prng::EtudeRng;
use serde::{Deserialize, Serialize};

use crate::note::{Composition, Note, fold_pitch};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToneRowParams {
    pub bpm: f64,
    /// Row pitches are `row_low..=row_high`, shuffled.
    pub row_low: i32,
    pub row_high: i32,
    pub phrases: usize,
    /// Chance per phrase of picking a new transposition.
    pub retranspose_odds: f64,
    /// Transpositions are drawn from `0..max_transposition`.
    pub max_transposition: i32,
    /// Window start and window length are each drawn from `0..max_window`.
    pub max_window: usize,
    pub min_note_duration: f64,
    pub note_duration_spread: f64,
    pub min_gap: f64,
    pub gap_spread: f64,
    pub velocity: u8,
    pub channel: u8,
}

impl Default for ToneRowParams {
    fn default() -> Self {
        ToneRowParams {
            bpm: 120.0,
            row_low: 48,
            row_high: 59,
            phrases: 4000,
            retranspose_odds: 0.2,
            max_transposition: 12,
            max_window: 20,
            min_note_duration: 0.2,
            note_duration_spread: 0.2,
            min_gap: 0.5,
            gap_spread: 1.0,
            velocity: 70,
            channel: 0,
        }
    }
}

pub fn compose(params: &ToneRowParams, rng: &mut EtudeRng) -> Composition {
    let mut row: Vec<i32> = (params.row_low..=params.row_high).collect();
    assert!(!row.is_empty(), "tone row: row_low must not exceed row_high");
    rng.shuffle(&mut row);
    log::debug!("Row: {row:?}");

    let mut comp = Composition::new(params.bpm);
    let mut transposition = 0;
    let mut time = 0.0;
    for _ in 0..params.phrases {
        if rng.random_bool(params.retranspose_odds) {
            transposition = rng.range_i32(0, params.max_transposition);
        }
        let start = rng.range_usize(0, params.max_window);
        let length = rng.range_usize(0, params.max_window);
        let duration = params.min_note_duration + rng.next_f64() * params.note_duration_spread;
        for i in start..start + length {
            comp.push(Note::new(
                fold_pitch(row[i % row.len()].saturating_add(transposition)),
                params.velocity.min(127),
                params.channel,
                time,
                duration,
            ));
            time += duration;
        }
        time += params.min_gap + rng.next_f64() * params.gap_spread;
    }
    comp
}
