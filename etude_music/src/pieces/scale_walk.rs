// Pentatonic scale walk.
//
// A melody that steps up and down the major pentatonic scale of one key by
// one or two degrees at a time. At the start of every phrase it keeps its
// scale degree but jumps to a freshly chosen register; within a phrase a step
// that would wander more than an octave from the phrase's first note turns
// back.

use etude_prng::EtudeRng;
use serde::{Deserialize, Serialize};

use crate::mode::{pentatonic_scale, random_octave};
use crate::note::{Composition, Note, fold_pitch};
use crate::pattern::nth;
use crate::timing::{fit_eighths, velocity_from_level};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleWalkParams {
    pub bpm: f64,
    /// Pitch class of the key (0 = C).
    pub key: u8,
    pub length: usize,
    pub phrase_len: usize,
    /// Scale-degree steps to choose from.
    pub steps: Vec<i32>,
    pub rhythm: Vec<f64>,
    pub levels: Vec<f64>,
    pub legato: f64,
    pub channel: u8,
}

impl Default for ScaleWalkParams {
    fn default() -> Self {
        ScaleWalkParams {
            bpm: 160.0,
            key: 0,
            length: 64,
            phrase_len: 8,
            steps: vec![-2, -1, 1, 2],
            rhythm: vec![3.0, 2.0, 2.0, 1.0],
            levels: vec![7.0, 5.0, 6.0, 5.0],
            legato: 0.85,
            channel: 0,
        }
    }
}

pub fn compose(params: &ScaleWalkParams, rng: &mut EtudeRng) -> Composition {
    let scale = pentatonic_scale(params.key);
    let degrees = scale.len() as i32;
    let durations = fit_eighths(&params.rhythm);
    let phrase_len = params.phrase_len.max(1);

    let mut comp = Composition::new(params.bpm);
    let mut degree = rng.range_i32(0, degrees);
    let mut anchor = degree;
    let mut register = 0;
    let mut time = 0.0;
    for i in 0..params.length {
        if i % phrase_len == 0 {
            degree = degree.rem_euclid(degrees);
            anchor = degree;
            register = random_octave(rng);
        } else {
            let step = *rng.choice(&params.steps);
            degree = if (degree + step - anchor).abs() > degrees {
                degree - step
            } else {
                degree + step
            };
        }
        let pitch_class = i32::from(scale[degree.rem_euclid(degrees) as usize]);
        let pitch = register + degree.div_euclid(degrees) * 12 + pitch_class;
        let duration = nth(i, &durations);
        comp.push(Note::new(
            fold_pitch(pitch),
            velocity_from_level(nth(i, &params.levels)),
            params.channel,
            time,
            duration * params.legato,
        ));
        time += duration;
    }
    comp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_note_is_in_the_scale() {
        for key in [0u8, 2, 7, 10] {
            let params = ScaleWalkParams {
                key,
                ..ScaleWalkParams::default()
            };
            let comp = compose(&params, &mut EtudeRng::new(u64::from(key)));
            let scale = pentatonic_scale(key);
            assert_eq!(comp.len(), 64);
            for note in &comp.notes {
                assert!(scale.contains(&(note.pitch % 12)), "key {key}: {}", note.pitch);
            }
        }
    }

    #[test]
    fn walk_moves_by_at_most_two_degrees_within_a_phrase() {
        let comp = compose(&ScaleWalkParams::default(), &mut EtudeRng::new(17));
        for phrase in comp.notes.chunks(8) {
            for pair in phrase.windows(2) {
                let leap = (i32::from(pair[1].pitch) - i32::from(pair[0].pitch)).abs();
                // Two pentatonic degrees span at most a fourth.
                assert!(leap <= 5, "leap of {leap}");
                assert_ne!(leap, 0);
            }
        }
    }

    #[test]
    fn register_stays_playable() {
        for seed in 0..50 {
            let comp = compose(&ScaleWalkParams::default(), &mut EtudeRng::new(seed));
            for note in &comp.notes {
                assert!((24..=107).contains(&note.pitch), "pitch {}", note.pitch);
            }
        }
    }

    #[test]
    fn velocities_follow_level_cycle() {
        let comp = compose(&ScaleWalkParams::default(), &mut EtudeRng::new(2));
        let v: Vec<u8> = comp.notes.iter().take(4).map(|n| n.velocity).collect();
        assert_eq!(v, vec![88, 63, 76, 63]);
        assert!(comp.is_time_ordered());
        assert!(comp.validate().is_ok());
    }

    #[test]
    fn bar_of_rhythm_fills_two_beats() {
        let comp = compose(&ScaleWalkParams::default(), &mut EtudeRng::new(2));
        assert!((comp.notes[4].time - 2.0).abs() < 1e-9);
    }
}
