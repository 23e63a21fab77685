// JSON composition files.
//
// The player reads `{ "bpm": ..., "notes": [ {pitch, velocity, channel,
// time, duration}, ... ] }`. Files are pretty-printed with two-space
// indentation so they stay diffable. Compositions are validated on the way
// out and on the way in; a bad note never reaches the player.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::EtudeError;
use crate::note::Composition;

/// Where compositions go when nothing else is configured.
pub const DEFAULT_OUTPUT: &str = "notes.json";

pub fn write_json(comp: &Composition, path: &Path) -> Result<(), EtudeError> {
    comp.validate()?;
    let file = File::create(path).map_err(|e| EtudeError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, comp).map_err(|source| EtudeError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writer
        .write_all(b"\n")
        .and_then(|()| writer.flush())
        .map_err(|e| EtudeError::io(path, e))?;
    log::info!("Wrote {} notes to {}", comp.len(), path.display());
    Ok(())
}

pub fn read_json(path: &Path) -> Result<Composition, EtudeError> {
    let text = fs::read_to_string(path).map_err(|e| EtudeError::io(path, e))?;
    let comp: Composition = serde_json::from_str(&text).map_err(|source| EtudeError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    comp.validate()?;
    log::debug!("Read {} notes from {}", comp.len(), path.display());
    Ok(comp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::Note;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("etude-output-{}-{name}", std::process::id()))
    }

    #[test]
    fn written_file_reads_back() {
        let path = temp_path("roundtrip.json");
        let mut comp = Composition::new(250.0);
        comp.push(Note::new(60, 76, 1, 0.0, 0.5));
        comp.push(Note::new(72, 76, 1, 0.5, 0.5));
        write_json(&comp, &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n  \"bpm\": 250.0,\n  \"notes\": ["), "{text}");

        let back = read_json(&path).unwrap();
        assert_eq!(back, comp);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn invalid_composition_is_not_written() {
        let path = temp_path("invalid.json");
        let mut comp = Composition::new(120.0);
        comp.push(Note::new(60, 200, 0, 0.0, 1.0));
        assert!(matches!(
            write_json(&comp, &path),
            Err(EtudeError::InvalidNote { index: 0, .. })
        ));
        assert!(!path.exists());
    }

    #[test]
    fn reading_checks_ranges_and_syntax() {
        let path = temp_path("hand-written.json");
        fs::write(
            &path,
            r#"{"bpm": 120, "notes": [{"pitch": 60, "velocity": 70, "channel": 20, "time": 0, "duration": 1}]}"#,
        )
        .unwrap();
        assert!(matches!(
            read_json(&path),
            Err(EtudeError::InvalidNote { index: 0, .. })
        ));

        fs::write(&path, "{\"bpm\": 120, \"notes\": [").unwrap();
        assert!(matches!(read_json(&path), Err(EtudeError::Json { .. })));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_file_reports_path() {
        let path = temp_path("does-not-exist.json");
        let err = read_json(&path).unwrap_err();
        assert!(err.to_string().contains("does-not-exist.json"), "{err}");
    }
}
