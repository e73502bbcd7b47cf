use std::path::Path;

use anyhow::{Context, Result};

/// Whether `name` ends in one of `extensions` (e.g. `".png"`), ignoring case
pub fn has_image_extension(name: &str, extensions: &[String]) -> bool {
    let Some(dot) = name.rfind('.') else {
        return false;
    };
    let ext = &name[dot..];
    extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
}

/// File names (not paths) of the images directly inside `folder`, sorted
pub fn list_images(folder: &Path, extensions: &[String]) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(folder)
        .with_context(|| format!("Failed to read image folder: {}", folder.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            log::warn!("Skipping non UTF-8 file name in {}", folder.display());
            continue;
        };
        if has_image_extension(&name, extensions) {
            files.push(name);
        }
    }
    files.sort();

    log::debug!("Found {} images in {}", files.len(), folder.display());
    Ok(files)
}
