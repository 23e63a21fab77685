// End-to-end checks: every piece composes, survives the JSON file the player
// reads, and exports to a MIDI file that parses back.

use std::path::PathBuf;

use etude_music::midi::write_midi;
use etude_music::output::{read_json, write_json};
use etude_music::pieces::PieceParams;
use etude_music::{Composition, Piece};
use etude_prng::EtudeRng;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("etude-pipeline-{}-{name}", std::process::id()))
}

fn compose(piece: Piece, seed: u64) -> Composition {
    piece.compose(&PieceParams::default(), &mut EtudeRng::new(seed))
}

#[test]
fn every_piece_is_playable() {
    for piece in Piece::ALL {
        let comp = compose(piece, 42);
        assert!(!comp.is_empty(), "{piece} produced no notes");
        comp.validate()
            .unwrap_or_else(|e| panic!("{piece} produced an invalid note: {e}"));
        assert!(comp.is_time_ordered(), "{piece} goes back in time");
        assert!(comp.bpm > 0.0);
        assert!(comp.notes.iter().all(|n| n.duration > 0.0), "{piece}");
    }
}

#[test]
fn same_seed_same_piece() {
    for piece in Piece::ALL {
        assert_eq!(compose(piece, 7), compose(piece, 7), "{piece}");
    }
}

#[test]
fn json_file_roundtrip() {
    for piece in Piece::ALL {
        let comp = compose(piece, 3);
        let path = temp_path(&format!("{piece}.json"));
        write_json(&comp, &path).unwrap();
        let back = read_json(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(back.bpm, comp.bpm, "{piece}");
        assert_eq!(back.len(), comp.len(), "{piece}");
        for (a, b) in comp.notes.iter().zip(&back.notes) {
            assert_eq!(
                (a.pitch, a.velocity, a.channel),
                (b.pitch, b.velocity, b.channel)
            );
            assert!((a.time - b.time).abs() < 1e-9, "{piece}: {a:?} vs {b:?}");
            assert!((a.duration - b.duration).abs() < 1e-9, "{piece}: {a:?} vs {b:?}");
        }
    }
}

#[test]
fn json_uses_player_field_names() {
    let comp = compose(Piece::ArpeggioStudy, 0);
    let value = serde_json::to_value(&comp).unwrap();
    let first = &value["notes"][0];
    for field in ["pitch", "velocity", "channel", "time", "duration"] {
        assert!(first.get(field).is_some(), "missing {field}");
    }
    assert!(value["bpm"].is_number());
}

#[test]
fn midi_export_parses_back() {
    for piece in Piece::ALL {
        let comp = compose(piece, 11);
        let path = temp_path(&format!("{piece}.mid"));
        write_midi(&comp, &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let smf = midly::Smf::parse(&bytes).unwrap();
        let note_ons = smf
            .tracks
            .iter()
            .flatten()
            .filter(|e| {
                matches!(
                    e.kind,
                    midly::TrackEventKind::Midi {
                        message: midly::MidiMessage::NoteOn { .. },
                        ..
                    }
                )
            })
            .count();
        assert_eq!(note_ons, comp.len(), "{piece}");
    }
}
