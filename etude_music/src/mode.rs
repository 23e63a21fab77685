// Scales and modal chords.
//
// Two pitch vocabularies live here:
// - The major pentatonic scale of any key, plus a random register picker,
//   used by the scale-walk piece.
// - Four diatonic modes (Dorian, Lydian, Mixolydian, Aeolian), each with a
//   characteristic four-note chord and the degree of the parent major scale
//   it starts on. Re-rooting a chord into another mode while keeping the
//   parent scale is the basis of the reharmonization piece.
//
// Pitch classes are `u8` in 0..12 (0 = C). Voicings are `i32` because they
// drop below the reference octave.

use std::fmt;
use std::str::FromStr;

use etude_prng::EtudeRng;
use serde::{Deserialize, Serialize};

use crate::error::EtudeError;

/// Major pentatonic intervals from the key.
const PENTATONIC: [u8; 5] = [0, 2, 4, 7, 9];

/// Octaves `random_octave` chooses from.
const OCTAVES: [i32; 5] = [3, 4, 5, 6, 7];

/// Pitch classes of the major pentatonic scale on `key`, sorted ascending.
pub fn pentatonic_scale(key: u8) -> [u8; 5] {
    let mut pcs = PENTATONIC.map(|i| (i + key % 12) % 12);
    pcs.sort_unstable();
    pcs
}

/// Base pitch (C of the octave) of a randomly chosen register, 36..=84.
pub fn random_octave(rng: &mut EtudeRng) -> i32 {
    rng.choice(&OCTAVES) * 12
}

/// A diatonic mode, as used for four-note modal chords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    Dorian,
    Lydian,
    Mixolydian,
    Aeolian,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Lydian, Mode::Mixolydian, Mode::Dorian, Mode::Aeolian];

    /// Chord tones in semitones above the chord root.
    pub fn chord_shape(self) -> [u8; 4] {
        match self {
            Mode::Dorian => [0, 3, 7, 9],
            Mode::Lydian => [0, 4, 6, 11],
            Mode::Mixolydian => [0, 4, 9, 10],
            Mode::Aeolian => [0, 3, 7, 8],
        }
    }

    /// Semitones from the parent major scale's tonic to this mode's final.
    pub fn parent_root(self) -> u8 {
        match self {
            Mode::Dorian => 2,
            Mode::Lydian => 5,
            Mode::Mixolydian => 7,
            Mode::Aeolian => 9,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Dorian => "dorian",
            Mode::Lydian => "lydian",
            Mode::Mixolydian => "mixolydian",
            Mode::Aeolian => "aeolian",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = EtudeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dorian" | "dor" => Ok(Mode::Dorian),
            "lydian" | "lyd" => Ok(Mode::Lydian),
            "mixolydian" | "mix" => Ok(Mode::Mixolydian),
            "aeolian" | "aeol" => Ok(Mode::Aeolian),
            _ => Err(EtudeError::UnknownMode(s.to_string())),
        }
    }
}

/// A modal chord: a root pitch class plus the mode that shapes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalChord {
    pub root_pc: u8,
    pub mode: Mode,
}

impl ModalChord {
    pub fn new(root_pc: u8, mode: Mode) -> Self {
        ModalChord {
            root_pc: root_pc % 12,
            mode,
        }
    }

    /// The chord in `new_mode` that shares this chord's parent major scale.
    /// E.g. C Lydian (parent G major) becomes E Aeolian.
    pub fn relative_to(self, new_mode: Mode) -> ModalChord {
        let root = i32::from(new_mode.parent_root()) - i32::from(self.mode.parent_root())
            + i32::from(self.root_pc);
        ModalChord::new(root.rem_euclid(12) as u8, new_mode)
    }

    /// Close-position chord tones reduced to pitch classes, with the first
    /// tone dropped two octaves as a bass note.
    pub fn voicing(self) -> Vec<i32> {
        let mut tones: Vec<i32> = self
            .mode
            .chord_shape()
            .iter()
            .map(|&n| (i32::from(n) + i32::from(self.root_pc)).rem_euclid(12))
            .collect();
        tones[0] -= 24;
        tones
    }
}
