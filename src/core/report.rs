use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::models::{InterpretedMetadata, Prediction};

pub const EXIF_HEADING: &str = "EXIF Metadata:";
pub const ANALYSIS_HEADING: &str = "AI Analysis:";
pub const NO_ANALYSIS: &str = "No analysis results found.";

/// Renders the output pane: the EXIF section, a blank line, then the analysis section.
pub fn render(metadata: &InterpretedMetadata, analysis: Option<&[Prediction]>) -> String {
    let mut text = String::new();
    text.push_str(EXIF_HEADING);
    text.push('\n');
    for (key, value) in metadata.iter() {
        text.push_str(&format!("{key}: {value}\n"));
    }

    text.push('\n');
    text.push_str(ANALYSIS_HEADING);
    text.push('\n');
    match analysis {
        Some(predictions) if !predictions.is_empty() => {
            for prediction in predictions {
                text.push_str(&format!("{prediction}\n"));
            }
        }
        _ => text.push_str(NO_ANALYSIS),
    }

    text
}

/// Writes `text` verbatim; the file is closed when this returns, on success or failure.
pub fn save(path: &Path, text: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(text.as_bytes())?;
    file.flush()
}

/// Appends `.txt` when the chosen name has no extension.
pub fn with_default_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension("txt")
    }
}
