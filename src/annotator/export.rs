//! Plain-text export of an annotation list
//!
//! Per image: the file name, the rectangle count, then one line per
//! rectangle rendered from a template with `{x}`, `{y}`, `{w}` and `{h}`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use super::store::{AnnotationList, PixelRect};

/// Fill the placeholders of `format` from one rectangle
pub fn format_rect(format: &str, rect: &PixelRect) -> String {
    format
        .replace("{x}", &rect.x.to_string())
        .replace("{y}", &rect.y.to_string())
        .replace("{w}", &rect.width.to_string())
        .replace("{h}", &rect.height.to_string())
}

pub fn export_lines(list: &AnnotationList, format: &str, mut writer: impl Write) -> Result<()> {
    for (file, rects) in list.iter() {
        writeln!(writer, "{file}")?;
        writeln!(writer, "{}", rects.len())?;
        for rect in rects {
            writeln!(writer, "{}", format_rect(format, rect))?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Export to a file, replacing it
pub fn export_to_file(list: &AnnotationList, format: &str, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    export_lines(list, format, BufWriter::new(file))
        .with_context(|| format!("Failed to write export file: {}", path.display()))?;
    log::info!("Exported {} images to {}", list.len(), path.display());
    Ok(())
}
