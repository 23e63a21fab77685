// The note model: the single record type every piece produces.
//
// A `Composition` is a flat, ordered list of `Note`s plus a tempo. It is the
// "source of truth" for a run: the JSON file handed to the player and the
// optional MIDI export are both derived from it, never the other way around.
//
// Pieces do their pitch arithmetic in `i32` (transpositions can dip below
// zero mid-pipeline) and convert with `fold_pitch` when building notes, so a
// stored `Note` always carries a valid MIDI pitch. `validate` re-checks every
// field for compositions that arrive from disk.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::EtudeError;

/// Highest MIDI channel number (channels are 0-15).
pub const MAX_CHANNEL: u8 = 15;

/// Highest MIDI data value, used for both pitch and velocity.
pub const MAX_MIDI_VALUE: u8 = 127;

/// One timed musical event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// MIDI pitch number (0-127, 60 = middle C).
    pub pitch: u8,
    /// MIDI velocity (0-127).
    pub velocity: u8,
    /// MIDI channel (0-15).
    pub channel: u8,
    /// Onset, in beats from the start of the piece.
    pub time: f64,
    /// Length in beats.
    pub duration: f64,
}

impl Note {
    pub fn new(pitch: u8, velocity: u8, channel: u8, time: f64, duration: f64) -> Self {
        Note {
            pitch,
            velocity,
            channel,
            time,
            duration,
        }
    }

    /// Beat at which the note stops sounding.
    pub fn end(&self) -> f64 {
        self.time + self.duration
    }
}

/// Bring an arithmetic pitch into the MIDI range by whole octaves, keeping
/// its pitch class.
pub fn fold_pitch(pitch: i32) -> u8 {
    let max = i32::from(MAX_MIDI_VALUE);
    if (0..=max).contains(&pitch) {
        return pitch as u8;
    }
    let pc = pitch.rem_euclid(12);
    if pitch < 0 {
        return pc as u8;
    }
    // Highest octave that still holds this pitch class: 120..=127 for C..G.
    let top = max - max.rem_euclid(12);
    (if top + pc <= max { top + pc } else { top - 12 + pc }) as u8
}

/// Note name with octave, e.g. `C4` for 60 or `F#3` for 54.
pub fn pitch_name(pitch: u8) -> String {
    const NAMES: [&str; 12] = [
        "C", "C#", "D", "Eb", "E", "F", "F#", "G", "Ab", "A", "Bb", "B",
    ];
    let octave = i32::from(pitch / 12) - 1;
    format!("{}{}", NAMES[(pitch % 12) as usize], octave)
}

/// An ordered collection of notes plus a tempo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    /// Tempo in beats per minute.
    pub bpm: f64,
    pub notes: Vec<Note>,
}

impl Composition {
    pub fn new(bpm: f64) -> Self {
        Composition {
            bpm,
            notes: Vec::new(),
        }
    }

    pub fn push(&mut self, note: Note) {
        self.notes.push(note);
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Beat at which the last note stops sounding (0 for an empty piece).
    pub fn end_beat(&self) -> f64 {
        self.notes.iter().map(Note::end).fold(0.0, f64::max)
    }

    pub fn duration_seconds(&self) -> f64 {
        self.end_beat() * 60.0 / self.bpm
    }

    /// Copy with notes stably sorted by onset, the order a player schedules
    /// them in.
    pub fn sorted_by_time(&self) -> Composition {
        let mut notes = self.notes.clone();
        notes.sort_by(|a, b| a.time.total_cmp(&b.time));
        Composition {
            bpm: self.bpm,
            notes,
        }
    }

    /// True when onsets never go backwards within any single channel.
    pub fn is_time_ordered(&self) -> bool {
        let mut last_onset: BTreeMap<u8, f64> = BTreeMap::new();
        for note in &self.notes {
            if let Some(&prev) = last_onset.get(&note.channel) {
                if note.time < prev {
                    return false;
                }
            }
            last_onset.insert(note.channel, note.time);
        }
        true
    }

    /// Check the tempo and every note against the ranges the player accepts.
    /// Reports the first offending note.
    pub fn validate(&self) -> Result<(), EtudeError> {
        if !self.bpm.is_finite() || self.bpm <= 0.0 {
            return Err(EtudeError::InvalidTempo(self.bpm));
        }
        for (index, note) in self.notes.iter().enumerate() {
            let reason = if note.pitch > MAX_MIDI_VALUE {
                Some(format!("pitch {} is outside 0-127", note.pitch))
            } else if note.velocity > MAX_MIDI_VALUE {
                Some(format!("velocity {} is outside 0-127", note.velocity))
            } else if note.channel > MAX_CHANNEL {
                Some(format!("channel {} is outside 0-15", note.channel))
            } else if !note.time.is_finite() || note.time < 0.0 {
                Some(format!("time {} is not a non-negative beat", note.time))
            } else if !note.duration.is_finite() || note.duration < 0.0 {
                Some(format!(
                    "duration {} is not a non-negative length",
                    note.duration
                ))
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(EtudeError::InvalidNote { index, reason });
            }
        }
        Ok(())
    }

    /// One-line description for logs.
    pub fn summary(&self) -> String {
        let low = self.notes.iter().map(|n| n.pitch).min();
        let high = self.notes.iter().map(|n| n.pitch).max();
        let range = match (low, high) {
            (Some(lo), Some(hi)) => format!("{}-{}", pitch_name(lo), pitch_name(hi)),
            _ => "-".to_string(),
        };
        format!(
            "{} notes, {:.1} beats at {} BPM ({:.0}s), range {}",
            self.len(),
            self.end_beat(),
            self.bpm,
            self.duration_seconds(),
            range
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_pitch_keeps_pitch_class() {
        assert_eq!(fold_pitch(60), 60);
        assert_eq!(fold_pitch(-4), 8);
        assert_eq!(fold_pitch(130), 118);
        assert_eq!(fold_pitch(127), 127);
        assert_eq!(fold_pitch(0), 0);
        assert_eq!(fold_pitch(128), 116);
        assert_eq!(fold_pitch(-12), 0);
    }

    #[test]
    fn fold_pitch_handles_extreme_offsets() {
        // i32::MAX is a G, i32::MIN an E.
        assert_eq!(fold_pitch(i32::MAX), 127);
        assert_eq!(fold_pitch(i32::MIN), 4);
        for p in [1_000_000, -1_000_001, i32::MAX - 5, i32::MIN + 3] {
            let folded = fold_pitch(p);
            assert!(folded <= MAX_MIDI_VALUE);
            assert!(folded >= 116 || p < 0, "{p} folded to {folded}");
            assert_eq!(i32::from(folded) % 12, p.rem_euclid(12));
        }
    }

    #[test]
    fn pitch_names() {
        assert_eq!(pitch_name(60), "C4");
        assert_eq!(pitch_name(54), "F#3");
        assert_eq!(pitch_name(0), "C-1");
        assert_eq!(pitch_name(127), "G9");
    }

    #[test]
    fn end_beat_uses_latest_release() {
        let mut comp = Composition::new(120.0);
        comp.push(Note::new(60, 70, 0, 0.0, 4.0));
        comp.push(Note::new(62, 70, 0, 1.0, 0.5));
        assert_eq!(comp.end_beat(), 4.0);
        assert_eq!(comp.duration_seconds(), 2.0);
    }

    #[test]
    fn time_order_is_per_channel() {
        let mut comp = Composition::new(120.0);
        comp.push(Note::new(60, 70, 0, 1.0, 1.0));
        comp.push(Note::new(60, 70, 1, 0.0, 1.0));
        comp.push(Note::new(60, 70, 0, 1.0, 1.0));
        assert!(comp.is_time_ordered());

        comp.push(Note::new(60, 70, 1, -0.5, 1.0));
        assert!(!comp.is_time_ordered());
    }

    #[test]
    fn sorted_by_time_is_stable() {
        let mut comp = Composition::new(90.0);
        comp.push(Note::new(64, 70, 0, 2.0, 1.0));
        comp.push(Note::new(60, 70, 0, 0.0, 1.0));
        comp.push(Note::new(67, 70, 0, 0.0, 1.0));
        let sorted = comp.sorted_by_time();
        let pitches: Vec<u8> = sorted.notes.iter().map(|n| n.pitch).collect();
        assert_eq!(pitches, vec![60, 67, 64]);
        assert_eq!(sorted.bpm, 90.0);
    }

    #[test]
    fn validate_rejects_bad_fields() {
        let mut comp = Composition::new(120.0);
        comp.push(Note::new(60, 70, 0, 0.0, 1.0));
        assert!(comp.validate().is_ok());

        comp.push(Note::new(200, 70, 0, 1.0, 1.0));
        match comp.validate() {
            Err(EtudeError::InvalidNote { index, reason }) => {
                assert_eq!(index, 1);
                assert!(reason.contains("pitch 200"), "{reason}");
            }
            other => panic!("expected InvalidNote, got {other:?}"),
        }

        let mut comp = Composition::new(120.0);
        comp.push(Note::new(60, 70, 16, 0.0, 1.0));
        assert!(matches!(
            comp.validate(),
            Err(EtudeError::InvalidNote { index: 0, .. })
        ));

        let mut comp = Composition::new(120.0);
        comp.push(Note::new(60, 70, 0, f64::NAN, 1.0));
        assert!(comp.validate().is_err());

        let comp = Composition::new(0.0);
        assert!(matches!(comp.validate(), Err(EtudeError::InvalidTempo(_))));
    }

    #[test]
    fn json_field_names_match_player_format() {
        let mut comp = Composition::new(200.0);
        comp.push(Note::new(48, 76, 1, 0.0, 0.5));
        let value = serde_json::to_value(&comp).unwrap();
        assert_eq!(value["bpm"], 200.0);
        let note = &value["notes"][0];
        assert_eq!(note["pitch"], 48);
        assert_eq!(note["velocity"], 76);
        assert_eq!(note["channel"], 1);
        assert_eq!(note["time"], 0.0);
        assert_eq!(note["duration"], 0.5);
    }

    #[test]
    fn summary_mentions_count_and_range() {
        let mut comp = Composition::new(120.0);
        comp.push(Note::new(48, 70, 0, 0.0, 1.0));
        comp.push(Note::new(72, 70, 0, 1.0, 1.0));
        let s = comp.summary();
        assert!(s.starts_with("2 notes"), "{s}");
        assert!(s.contains("C3-C5"), "{s}");
    }
}
