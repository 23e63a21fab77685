// Etude: algorithmic note-sequence generators.
//
// Each piece is a small pure pipeline: build a list of pitches with chord and
// pattern transforms, assign timing and velocity, collect the result into a
// `Composition`, write it as JSON, and hand the file to an external player
// process. Playback itself is entirely the player's business.
//
// Architecture:
// - note.rs: `Note` and `Composition`, pitch folding, range validation
// - chord.rs: chord qualities and rooted chords
// - mode.rs: pentatonic scales, random registers, modal chords and re-rooting
// - pattern.rs: pitch-list transforms (arpeggios, surround, cyclic transposition)
// - timing.rs: duration fitting and the level-to-velocity window
// - pieces/: one generator per piece, plus the `Piece` catalogue
// - output.rs: JSON composition files
// - player.rs: launching the external player
// - midi.rs: Standard MIDI File export
// - config.rs: JSON run configuration
// - error.rs: `EtudeError`
//
// Randomized pieces draw from an `etude_prng::EtudeRng`, so output is
// reproducible given a seed.

pub mod chord;
pub mod config;
pub mod error;
pub mod midi;
pub mod mode;
pub mod note;
pub mod output;
pub mod pattern;
pub mod pieces;
pub mod player;
pub mod timing;

pub use error::EtudeError;
pub use note::{Composition, Note};
pub use pieces::Piece;
