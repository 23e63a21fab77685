// Chord qualities and rooted chords.
//
// A chord is a root (an arithmetic pitch, not a pitch class: progressions are
// transposed freely) plus a quality giving semitone offsets above the root.
// Qualities parse from and print as the short symbols used in configs and
// on the command line ("maj7", "min", "hdim7", ...).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EtudeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChordQuality {
    Major,
    Minor,
    Diminished,
    Augmented,
    Suspended,
    Dominant7,
    Major7,
    /// Major seventh spread over a ninth: root, third, sixth, ninth.
    Major7Open,
    /// Minor triad with an added second below the third.
    Minor7,
    Diminished7,
    HalfDiminished7,
    Major6,
    Minor6,
}

impl ChordQuality {
    pub const ALL: [ChordQuality; 13] = [
        ChordQuality::Major,
        ChordQuality::Minor,
        ChordQuality::Diminished,
        ChordQuality::Augmented,
        ChordQuality::Suspended,
        ChordQuality::Dominant7,
        ChordQuality::Major7,
        ChordQuality::Major7Open,
        ChordQuality::Minor7,
        ChordQuality::Diminished7,
        ChordQuality::HalfDiminished7,
        ChordQuality::Major6,
        ChordQuality::Minor6,
    ];

    /// Semitone offsets above the root, lowest first.
    pub fn intervals(self) -> &'static [i32] {
        match self {
            ChordQuality::Major => &[0, 4, 7],
            ChordQuality::Minor => &[0, 3, 7],
            ChordQuality::Diminished => &[0, 3, 6],
            ChordQuality::Augmented => &[0, 4, 8],
            ChordQuality::Suspended => &[0, 5, 7],
            ChordQuality::Dominant7 => &[0, 4, 7, 10],
            ChordQuality::Major7 => &[0, 4, 7, 11],
            ChordQuality::Major7Open => &[0, 4, 9, 14],
            ChordQuality::Minor7 => &[0, 2, 3, 7],
            ChordQuality::Diminished7 => &[0, 3, 6, 9],
            ChordQuality::HalfDiminished7 => &[0, 3, 6, 10],
            ChordQuality::Major6 => &[0, 4, 7, 9],
            ChordQuality::Minor6 => &[0, 3, 7, 9],
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            ChordQuality::Major => "maj",
            ChordQuality::Minor => "min",
            ChordQuality::Diminished => "dim",
            ChordQuality::Augmented => "aug",
            ChordQuality::Suspended => "sus",
            ChordQuality::Dominant7 => "7",
            ChordQuality::Major7 => "maj7",
            ChordQuality::Major7Open => "maj7open",
            ChordQuality::Minor7 => "min7",
            ChordQuality::Diminished7 => "dim7",
            ChordQuality::HalfDiminished7 => "hdim7",
            ChordQuality::Major6 => "maj6",
            ChordQuality::Minor6 => "min6",
        }
    }
}

impl fmt::Display for ChordQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for ChordQuality {
    type Err = EtudeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChordQuality::ALL
            .into_iter()
            .find(|q| q.symbol() == s)
            .ok_or_else(|| EtudeError::UnknownChordQuality(s.to_string()))
    }
}

/// A chord on a specific root pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chord {
    pub root: i32,
    pub quality: ChordQuality,
}

impl Chord {
    pub fn new(root: i32, quality: ChordQuality) -> Self {
        Chord { root, quality }
    }

    /// Chord tones from the root upward.
    pub fn tones(&self) -> Vec<i32> {
        self.quality.intervals().iter().map(|i| i + self.root).collect()
    }

    pub fn transposed(&self, amount: i32) -> Chord {
        Chord::new(self.root + amount, self.quality)
    }
}
