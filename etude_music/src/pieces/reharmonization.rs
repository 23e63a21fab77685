// Modal reharmonization of a chain of Lydian chords.
//
// Each chord of the source progression keeps its parent major scale but is
// re-rooted into another mode, either the one fixed by the pattern slot or
// one picked at random. The reharmonized progression is then looped as block
// chords with a dropped bass.

use etude_prng::EtudeRng;
use serde::{Deserialize, Serialize};

use crate::mode::{ModalChord, Mode};
use crate::note::{Composition, Note, fold_pitch};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReharmonizationParams {
    pub bpm: f64,
    pub progression: Vec<ModalChord>,
    /// Target mode per chord slot; `None` slots pick from `modes`. Slots
    /// past the end of the pattern are treated as `None`.
    pub pattern: Vec<Option<Mode>>,
    pub modes: Vec<Mode>,
    pub choruses: usize,
    pub chord_duration: f64,
    pub transposition: i32,
    pub velocity: u8,
    pub channel: u8,
}

impl Default for ReharmonizationParams {
    fn default() -> Self {
        let progression = [4, 1, 2, 11, 0, 9, 10, 7]
            .into_iter()
            .map(|root| ModalChord::new(root, Mode::Lydian))
            .collect::<Vec<_>>();
        ReharmonizationParams {
            bpm: 120.0,
            pattern: vec![None; progression.len()],
            progression,
            modes: Mode::ALL.to_vec(),
            choruses: 40,
            chord_duration: 2.0,
            transposition: 60,
            velocity: 70,
            channel: 0,
        }
    }
}

/// Re-root every chord of the progression into its slot's mode.
pub fn reharmonize(params: &ReharmonizationParams, rng: &mut EtudeRng) -> Vec<ModalChord> {
    params
        .progression
        .iter()
        .enumerate()
        .map(|(i, chord)| {
            let mode = match params.pattern.get(i).copied().flatten() {
                Some(mode) => mode,
                None => *rng.choice(&params.modes),
            };
            chord.relative_to(mode)
        })
        .collect()
}

pub fn compose(params: &ReharmonizationParams, rng: &mut EtudeRng) -> Composition {
    let chords = reharmonize(params, rng);
    let names: Vec<String> = chords
        .iter()
        .map(|c| format!("{}/{}", c.root_pc, c.mode))
        .collect();
    log::info!("Reharmonized progression: {}", names.join(" "));

    let mut comp = Composition::new(params.bpm);
    let mut time = 0.0;
    for _ in 0..params.choruses {
        for chord in &chords {
            for tone in chord.voicing() {
                comp.push(Note::new(
                    fold_pitch(tone.saturating_add(params.transposition)),
                    params.velocity.min(127),
                    params.channel,
                    time,
                    params.chord_duration,
                ));
            }
            time += params.chord_duration;
        }
    }
    comp
}
