use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::RgbaImage;

/// Name of the `n`th (1-based) crop of an image
pub fn crop_file_name(stem: &str, n: usize) -> String {
    format!("{stem}_ROI_{n}.png")
}

/// Write each crop as `<stem>_ROI_<n>.png` into `dir`, returning the paths
pub fn save_crops(images: &[RgbaImage], dir: &Path, stem: &str) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create crop dir: {}", dir.display()))?;

    let mut written = Vec::with_capacity(images.len());
    for (i, image) in images.iter().enumerate() {
        let path = dir.join(crop_file_name(stem, i + 1));
        image
            .save(&path)
            .with_context(|| format!("Failed to save crop: {}", path.display()))?;
        written.push(path);
    }
    log::info!("Saved {} crops of {stem} to {}", written.len(), dir.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_from_one() {
        let dir = tempfile::tempdir().unwrap();
        let crops = vec![RgbaImage::new(4, 3), RgbaImage::new(2, 2)];
        let paths = save_crops(&crops, dir.path(), "photo").unwrap();

        assert_eq!(paths[0].file_name().unwrap(), "photo_ROI_1.png");
        assert_eq!(paths[1].file_name().unwrap(), "photo_ROI_2.png");
        let reloaded = image::open(&paths[0]).unwrap();
        assert_eq!((reloaded.width(), reloaded.height()), (4, 3));
    }
}
