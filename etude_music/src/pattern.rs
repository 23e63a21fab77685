// Pitch-list transforms.
//
// Every piece builds its melody by chaining these: expand chords into
// arpeggios, repeat material at several transpositions, decorate notes with
// lead-ins, and overlay a cyclic octave pattern. All of them are linear
// passes over short lists and return new vectors.

use serde::{Deserialize, Serialize};

use crate::chord::Chord;

/// Cyclic indexing: `items[n % items.len()]`.
///
/// Panics if `items` is empty.
pub fn nth<T: Copy>(n: usize, items: &[T]) -> T {
    assert!(!items.is_empty(), "nth: cannot cycle through an empty list");
    items[n % items.len()]
}

pub fn transposed(notes: &[i32], amount: i32) -> Vec<i32> {
    notes.iter().map(|n| n + amount).collect()
}

/// Concatenate the chord tones of a progression. Even-indexed chords rise,
/// odd-indexed chords fall, so the line zig-zags through the changes.
pub fn arpeggios(chords: &[Chord]) -> Vec<i32> {
    let mut out = Vec::new();
    for (i, chord) in chords.iter().enumerate() {
        let mut tones = chord.tones();
        if i % 2 == 1 {
            tones.reverse();
        }
        out.extend(tones);
    }
    out
}

/// Which notes get a lead-in, and from how far away.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurroundRule {
    /// Length of the repeating window over note indices.
    pub period: usize,
    /// Positions within the window whose notes are decorated.
    pub positions: Vec<usize>,
    /// Lead note offset from the decorated note, in semitones.
    pub lead_offset: i32,
}

impl SurroundRule {
    /// Chromatic lower neighbour on the 1st and 3rd of every six notes.
    pub fn lower_neighbour() -> Self {
        SurroundRule {
            period: 6,
            positions: vec![0, 2],
            lead_offset: -1,
        }
    }

    /// Major third below on the 2nd, 5th and 7th of every nine notes.
    pub fn lower_third() -> Self {
        SurroundRule {
            period: 9,
            positions: vec![1, 4, 6],
            lead_offset: -4,
        }
    }

    fn decorates(&self, index: usize) -> bool {
        self.period > 0 && self.positions.contains(&(index % self.period))
    }
}

/// Insert a lead note before each decorated note. If the note already
/// emitted just before would repeat the lead note, it is pushed down a
/// semitone so the approach never restrikes the same pitch.
pub fn surround(notes: &[i32], rule: &SurroundRule) -> Vec<i32> {
    let mut out = Vec::with_capacity(notes.len() * 2);
    for (i, &note) in notes.iter().enumerate() {
        if rule.decorates(i) {
            let lead = note + rule.lead_offset;
            if let Some(last) = out.last_mut() {
                if *last == lead {
                    *last -= 1;
                }
            }
            out.push(lead);
        }
        out.push(note);
    }
    out
}

/// The whole list once per degree, degree-major.
pub fn repeat_notes_transposed(notes: &[i32], degrees: &[i32]) -> Vec<i32> {
    degrees
        .iter()
        .flat_map(|&degree| notes.iter().map(move |&n| n + degree))
        .collect()
}

/// The whole progression once per degree, degree-major.
pub fn progression_transpositions(progression: &[Chord], degrees: &[i32]) -> Vec<Chord> {
    degrees
        .iter()
        .flat_map(|&degree| progression.iter().map(move |c| c.transposed(degree)))
        .collect()
}

/// Add `pattern[i % pattern.len()]` to note `i`. An empty pattern leaves the
/// notes unchanged.
pub fn transpose_pattern(notes: &[i32], pattern: &[i32]) -> Vec<i32> {
    if pattern.is_empty() {
        return notes.to_vec();
    }
    notes
        .iter()
        .zip(pattern.iter().cycle())
        .map(|(n, d)| n + d)
        .collect()
}
