// Standard MIDI File export.
//
// Writes a composition as SMF Format 1 (multi-track) so it can be opened in
// a DAW or notation program without the player. Track 0 carries the tempo;
// each MIDI channel used by the piece gets its own track. Beats map to ticks
// at `TICKS_PER_BEAT`, rounded to the nearest tick.
//
// Uses the `midly` crate for encoding.

use std::collections::BTreeMap;
use std::path::Path;

use midly::{
    Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
    num::{u4, u7, u15, u24, u28},
};

use crate::error::EtudeError;
use crate::note::{Composition, MAX_CHANNEL};

/// Ticks per beat (quarter note) in MIDI output.
pub const TICKS_PER_BEAT: u16 = 480;

/// Largest tempo value (microseconds per beat) a tempo event can hold.
const MAX_TEMPO_MICROS: u32 = 0x00FF_FFFF;

const TRACK_NAMES: [&[u8]; 16] = [
    b"Channel 1", b"Channel 2", b"Channel 3", b"Channel 4",
    b"Channel 5", b"Channel 6", b"Channel 7", b"Channel 8",
    b"Channel 9", b"Channel 10", b"Channel 11", b"Channel 12",
    b"Channel 13", b"Channel 14", b"Channel 15", b"Channel 16",
];

/// Convert a composition to MIDI and write it to a file.
pub fn write_midi(comp: &Composition, path: &Path) -> Result<(), EtudeError> {
    let bytes = composition_to_bytes(comp)?;
    std::fs::write(path, &bytes).map_err(|e| EtudeError::io(path, e))?;
    log::info!("Wrote MIDI file {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

/// Encode a composition as SMF bytes.
pub fn composition_to_bytes(comp: &Composition) -> Result<Vec<u8>, EtudeError> {
    comp.validate()?;
    let smf = composition_to_smf(comp);
    let mut buf = Vec::new();
    smf.write_std(&mut buf)
        .map_err(|e| EtudeError::io("<midi buffer>", e))?;
    Ok(buf)
}

fn beat_to_tick(beat: f64) -> u32 {
    (beat * f64::from(TICKS_PER_BEAT)).round() as u32
}

fn tempo_micros(bpm: f64) -> u32 {
    ((60_000_000.0 / bpm).round() as u32).clamp(1, MAX_TEMPO_MICROS)
}

/// A note event at an absolute tick.
struct Timed {
    tick: u32,
    on: bool,
    key: u8,
    vel: u8,
}

/// Convert a (validated) composition to an in-memory SMF.
fn composition_to_smf(comp: &Composition) -> Smf<'static> {
    let mut smf = Smf::new(Header::new(
        Format::Parallel,
        Timing::Metrical(u15::new(TICKS_PER_BEAT)),
    ));

    let tempo_track: Track<'static> = vec![
        TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::Tempo(u24::new(tempo_micros(comp.bpm)))),
        },
        TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
        },
    ];
    smf.tracks.push(tempo_track);

    let mut by_channel: BTreeMap<u8, Vec<Timed>> = BTreeMap::new();
    for note in &comp.notes {
        let events = by_channel.entry(note.channel.min(MAX_CHANNEL)).or_default();
        let on_tick = beat_to_tick(note.time);
        // A note shorter than a tick still holds for one, so its release
        // cannot sort ahead of its own attack.
        let off_tick = beat_to_tick(note.end()).max(on_tick + 1);
        events.push(Timed {
            tick: on_tick,
            on: true,
            key: note.pitch,
            vel: note.velocity,
        });
        events.push(Timed {
            tick: off_tick,
            on: false,
            key: note.pitch,
            vel: 0,
        });
    }

    for (channel, mut events) in by_channel {
        // Releases sort ahead of attacks on the same tick so a repeated
        // pitch is not cut off by its own previous note.
        events.sort_by_key(|e| (e.tick, e.on));

        let midi_channel = u4::new(channel);
        let mut track: Track<'static> = Vec::with_capacity(events.len() + 2);
        track.push(TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::TrackName(TRACK_NAMES[channel as usize])),
        });

        let mut last_tick = 0;
        for event in events {
            let message = if event.on {
                MidiMessage::NoteOn {
                    key: u7::new(event.key),
                    vel: u7::new(event.vel),
                }
            } else {
                MidiMessage::NoteOff {
                    key: u7::new(event.key),
                    vel: u7::new(event.vel),
                }
            };
            track.push(TrackEvent {
                delta: u28::new(event.tick - last_tick),
                kind: TrackEventKind::Midi {
                    channel: midi_channel,
                    message,
                },
            });
            last_tick = event.tick;
        }

        track.push(TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
        });
        smf.tracks.push(track);
    }

    smf
}
