// Arpeggio study: a four-chord progression climbed through thirteen keys.
//
// The progression (I maj7, ii min7, iii min, IV maj7) is repeated a semitone
// higher each time, arpeggiated up and down, decorated with chromatic lower
// neighbours, and spread over three octaves by a seven-step octave pattern.
// The rhythm alternates long and short eighths with a slow sine swell on the
// velocity.

use serde::{Deserialize, Serialize};

use crate::chord::{Chord, ChordQuality};
use crate::note::{Composition, Note, fold_pitch};
use crate::pattern::{
    SurroundRule, arpeggios, nth, progression_transpositions, surround, transpose_pattern,
};
use crate::timing::{fit_eighths, velocity_from_level};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArpeggioStudyParams {
    pub bpm: f64,
    pub progression: Vec<Chord>,
    /// The progression is played at 0, 1, ... `keys - 1` semitones up.
    pub keys: u32,
    pub surround: SurroundRule,
    pub octave_pattern: Vec<i32>,
    /// Relative note lengths, fitted to eighths.
    pub rhythm: Vec<f64>,
    /// 0-10 levels, cycled.
    pub levels: Vec<f64>,
    /// Depth of the sine swell added to the level.
    pub swell: f64,
    /// Fraction of each slot the note actually sounds.
    pub legato: f64,
    pub transposition: i32,
    pub channel: u8,
}

impl Default for ArpeggioStudyParams {
    fn default() -> Self {
        ArpeggioStudyParams {
            bpm: 200.0,
            progression: vec![
                Chord::new(0, ChordQuality::Major7Open),
                Chord::new(2, ChordQuality::Minor7),
                Chord::new(4, ChordQuality::Minor),
                Chord::new(5, ChordQuality::Major7Open),
            ],
            keys: 13,
            surround: SurroundRule::lower_neighbour(),
            octave_pattern: vec![0, 0, 12, 12, 0, 0, -12],
            rhythm: vec![6.0, 5.0],
            levels: vec![6.0, 6.5],
            swell: 0.5,
            legato: 0.9,
            transposition: 48,
            channel: 1,
        }
    }
}

pub fn compose(params: &ArpeggioStudyParams) -> Composition {
    let degrees: Vec<i32> = (0..params.keys as i32).collect();
    let chords = progression_transpositions(&params.progression, &degrees);
    let pitches = surround(&arpeggios(&chords), &params.surround);
    let pitches = transpose_pattern(&pitches, &params.octave_pattern);
    let durations = fit_eighths(&params.rhythm);

    let mut comp = Composition::new(params.bpm);
    let mut time = 0.0;
    for (i, &pitch) in pitches.iter().enumerate() {
        let duration = nth(i, &durations);
        let level = nth(i, &params.levels) + (i as f64 / 2.0).sin() * params.swell;
        comp.push(Note::new(
            fold_pitch(pitch.saturating_add(params.transposition)),
            velocity_from_level(level),
            params.channel,
            time,
            duration * params.legato,
        ));
        time += duration;
    }
    comp
}
