// The catalogue of pieces.
//
// Each submodule is one self-contained generator with its own parameter
// struct (defaults reproduce the piece as designed) and a `compose` function.
// `Piece` names them for the command line and dispatches to the right one;
// `PieceParams` bundles every parameter struct so a config file can retune
// any piece.
//
// Deterministic pieces ignore the RNG. Randomized pieces draw only from the
// `EtudeRng` they are handed, so a seed fully reproduces their output.

pub mod arpeggio_study;
pub mod broken_chords;
pub mod chromatic_sweep;
pub mod phrase_mutation;
pub mod reharmonization;
pub mod scale_walk;
pub mod tone_row;

use std::fmt;
use std::str::FromStr;

use etude_prng::EtudeRng;
use serde::{Deserialize, Serialize};

use crate::error::EtudeError;
use crate::note::Composition;

use arpeggio_study::ArpeggioStudyParams;
use broken_chords::BrokenChordsParams;
use chromatic_sweep::ChromaticSweepParams;
use phrase_mutation::PhraseMutationParams;
use reharmonization::ReharmonizationParams;
use scale_walk::ScaleWalkParams;
use tone_row::ToneRowParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Piece {
    ArpeggioStudy,
    PhraseMutation,
    BrokenChords,
    ChromaticSweep,
    Reharmonization,
    ToneRow,
    ScaleWalk,
}

impl Piece {
    pub const ALL: [Piece; 7] = [
        Piece::ArpeggioStudy,
        Piece::PhraseMutation,
        Piece::BrokenChords,
        Piece::ChromaticSweep,
        Piece::Reharmonization,
        Piece::ToneRow,
        Piece::ScaleWalk,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Piece::ArpeggioStudy => "arpeggio-study",
            Piece::PhraseMutation => "phrase-mutation",
            Piece::BrokenChords => "broken-chords",
            Piece::ChromaticSweep => "chromatic-sweep",
            Piece::Reharmonization => "reharmonization",
            Piece::ToneRow => "tone-row",
            Piece::ScaleWalk => "scale-walk",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Piece::ArpeggioStudy => {
                "maj7 / min7 / min / maj7 arpeggios climbing through 13 keys with lower neighbours"
            }
            Piece::PhraseMutation => "a random four-note phrase that drifts and thins out as it repeats",
            Piece::BrokenChords => "a major-triad figure in eighths, doubled at the octave",
            Piece::ChromaticSweep => "dense overlapping chromatic ramps for stress-testing a player",
            Piece::Reharmonization => "a chain of Lydian chords re-rooted into random relative modes",
            Piece::ToneRow => "random fragments of a shuffled twelve-tone row",
            Piece::ScaleWalk => "a pentatonic walk that changes register every phrase",
        }
    }

    /// Whether output depends on the seed.
    pub fn is_randomized(self) -> bool {
        matches!(
            self,
            Piece::PhraseMutation | Piece::Reharmonization | Piece::ToneRow | Piece::ScaleWalk
        )
    }

    pub fn compose(self, params: &PieceParams, rng: &mut EtudeRng) -> Composition {
        log::debug!("Composing {}", self.name());
        match self {
            Piece::ArpeggioStudy => arpeggio_study::compose(&params.arpeggio_study),
            Piece::PhraseMutation => phrase_mutation::compose(&params.phrase_mutation, rng),
            Piece::BrokenChords => broken_chords::compose(&params.broken_chords),
            Piece::ChromaticSweep => chromatic_sweep::compose(&params.chromatic_sweep),
            Piece::Reharmonization => reharmonization::compose(&params.reharmonization, rng),
            Piece::ToneRow => tone_row::compose(&params.tone_row, rng),
            Piece::ScaleWalk => scale_walk::compose(&params.scale_walk, rng),
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Piece {
    type Err = EtudeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_lowercase().replace('_', "-");
        Piece::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| EtudeError::UnknownPiece(s.to_string()))
    }
}

/// Parameters for every piece.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PieceParams {
    pub arpeggio_study: ArpeggioStudyParams,
    pub phrase_mutation: PhraseMutationParams,
    pub broken_chords: BrokenChordsParams,
    pub chromatic_sweep: ChromaticSweepParams,
    pub reharmonization: ReharmonizationParams,
    pub tone_row: ToneRowParams,
    pub scale_walk: ScaleWalkParams,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_roundtrip() {
        for piece in Piece::ALL {
            assert_eq!(piece.name().parse::<Piece>().unwrap(), piece);
            assert!(!piece.description().is_empty());
        }
        assert_eq!("Tone_Row".parse::<Piece>().unwrap(), Piece::ToneRow);
        assert!(matches!(
            "fugue".parse::<Piece>(),
            Err(EtudeError::UnknownPiece(name)) if name == "fugue"
        ));
    }

    #[test]
    fn deterministic_pieces_ignore_seed() {
        let params = PieceParams::default();
        for piece in Piece::ALL.into_iter().filter(|p| !p.is_randomized()) {
            let a = piece.compose(&params, &mut EtudeRng::new(1));
            let b = piece.compose(&params, &mut EtudeRng::new(2));
            assert_eq!(a, b, "{piece}");
        }
    }

    #[test]
    fn randomized_pieces_depend_on_seed() {
        let params = PieceParams::default();
        for piece in Piece::ALL.into_iter().filter(|p| p.is_randomized()) {
            let a = piece.compose(&params, &mut EtudeRng::new(1));
            let b = piece.compose(&params, &mut EtudeRng::new(2));
            assert_ne!(a, b, "{piece}");
        }
    }
}
