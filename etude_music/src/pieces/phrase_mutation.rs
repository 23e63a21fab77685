// Phrase mutation: a short random phrase that drifts as it repeats.
//
// Four distinct low pitches with random lengths form a phrase. Every
// repetition nudges each pitch by a semitone (or leaves it), and each note
// only sounds with the repetition's odds, so alternate passes thin out while
// the timeline keeps its place.

use etude_prng::EtudeRng;
use serde::{Deserialize, Serialize};

use crate::note::{Composition, Note, fold_pitch};
use crate::pattern::nth;
use crate::timing::velocity_from_level;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhraseMutationParams {
    pub bpm: f64,
    pub phrase_len: usize,
    /// Starting pitches are drawn without repeats from `[pitch_low, pitch_high)`.
    pub pitch_low: i32,
    pub pitch_high: i32,
    /// Note lengths in beats to choose from.
    pub durations: Vec<f64>,
    pub level: f64,
    pub repetitions: usize,
    /// Probability that a note sounds, cycled per repetition.
    pub odds: Vec<f64>,
    /// Per-repetition pitch drift, chosen uniformly (repeats weight a step).
    pub drift: Vec<i32>,
    pub legato: f64,
    pub transposition: i32,
    pub channel: u8,
}

impl Default for PhraseMutationParams {
    fn default() -> Self {
        PhraseMutationParams {
            bpm: 300.0,
            phrase_len: 4,
            pitch_low: 30,
            pitch_high: 60,
            durations: vec![0.5, 0.6, 0.7],
            level: 6.0,
            repetitions: 40,
            odds: vec![1.0, 0.7, 1.0, 0.3],
            drift: vec![-1, 0, 0, 1],
            legato: 1.0,
            transposition: 23,
            channel: 1,
        }
    }
}

struct PhraseNote {
    pitch: i32,
    duration: f64,
}

pub fn compose(params: &PhraseMutationParams, rng: &mut EtudeRng) -> Composition {
    let starts = rng.sample_distinct(params.pitch_low, params.pitch_high, params.phrase_len);
    let mut phrase: Vec<PhraseNote> = starts
        .into_iter()
        .map(|pitch| PhraseNote {
            pitch,
            duration: *rng.choice(&params.durations),
        })
        .collect();

    let velocity = velocity_from_level(params.level);
    let mut comp = Composition::new(params.bpm);
    let mut time = 0.0;
    for rep in 0..params.repetitions {
        let odds = nth(rep, &params.odds);
        for note in &mut phrase {
            note.pitch += *rng.choice(&params.drift);
            if rng.random_bool(odds) {
                comp.push(Note::new(
                    fold_pitch(note.pitch.saturating_add(params.transposition)),
                    velocity,
                    params.channel,
                    time,
                    note.duration * params.legato,
                ));
            }
            time += note.duration;
        }
    }
    comp
}
