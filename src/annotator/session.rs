//! Folder annotation session
//!
//! Walks the images of one folder, showing each in a [`RoiEditor`] with the
//! rectangles stored for it. Every Created, Modified or Deleted event writes
//! the editor's rectangles back into the [`AnnotationList`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::export;
use super::files;
use super::preview;
use super::store::{ANNOTATIONS_FILE, AnnotationList, PixelRect};
use crate::capture::image::SourceImage;
use crate::config::RoiSelectConfig;
use crate::domain::{ControlMode, Size};
use crate::session::{EditorOptions, Key, PointerEvent, RoiEditor, RoiEvent};

pub struct AnnotatorSession {
    folder: PathBuf,
    files: Vec<String>,
    current: Option<usize>,
    list: AnnotationList,
    editor: RoiEditor,
    config: RoiSelectConfig,
}

impl AnnotatorSession {
    /// Open `folder` and show its first image, if it has any
    pub fn open(folder: &Path, config: RoiSelectConfig, viewport: Size) -> Result<Self> {
        let files = files::list_images(folder, &config.image_extensions)?;
        let mut list = AnnotationList::load_folder(folder);
        for file in &files {
            list.ensure(file);
        }

        let mut editor = RoiEditor::new(EditorOptions::from(&config));
        editor.register_type(&config.default_type, config.default_color, "Default annotation")?;
        editor.set_viewport_size(viewport);

        let mut session = Self {
            folder: folder.to_path_buf(),
            files,
            current: None,
            list,
            editor,
            config,
        };
        if !session.files.is_empty() {
            session.go_to(0)?;
        }
        log::info!(
            "Opened {} with {} images",
            session.folder.display(),
            session.files.len()
        );
        Ok(session)
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_file(&self) -> Option<&str> {
        self.current.map(|i| self.files[i].as_str())
    }

    pub fn editor(&self) -> &RoiEditor {
        &self.editor
    }

    /// Direct editor access; call [`Self::process_events`] afterwards
    pub fn editor_mut(&mut self) -> &mut RoiEditor {
        &mut self.editor
    }

    pub fn annotations(&self) -> &AnnotationList {
        &self.list
    }

    /// Show image `index`, storing the current image's rectangles first.
    ///
    /// Returns false for an out-of-range index or the image already shown.
    pub fn go_to(&mut self, index: usize) -> Result<bool> {
        if index >= self.files.len() || Some(index) == self.current {
            return Ok(false);
        }
        self.store_current();

        let path = self.folder.join(&self.files[index]);
        let image = SourceImage::open(&path)?;
        self.current = Some(index);
        self.editor.set_source_image(Some(image));
        self.load_rectangles(index);
        Ok(true)
    }

    pub fn next(&mut self) -> Result<bool> {
        match self.current {
            Some(i) => self.go_to(i + 1),
            None => Ok(false),
        }
    }

    pub fn previous(&mut self) -> Result<bool> {
        match self.current {
            Some(i) if i > 0 => self.go_to(i - 1),
            _ => Ok(false),
        }
    }

    fn load_rectangles(&mut self, index: usize) {
        let file = &self.files[index];
        let rects = self.list.check_out(file);
        let type_name = self.config.default_type.clone();

        self.editor.begin_update();
        self.editor.clear_rois(None);
        for rect in &rects {
            if let Err(err) = self.editor.add_roi(&type_name, (*rect).into()) {
                log::warn!("Skipping stored rectangle of {file}: {err}");
            }
        }
        self.editor.end_update();
        // Loading is not an edit
        self.editor.drain_events();
        log::debug!("Loaded {} rectangles for {file}", rects.len());

        if self.config.mode == ControlMode::Configuration
            && let Err(err) = self.editor.start_creating(&type_name)
        {
            log::warn!("Cannot enter create mode: {err}");
        }
    }

    /// Copy the editor's rectangles into the list under the current file
    fn store_current(&mut self) {
        let Some(index) = self.current else {
            return;
        };
        let rects: Vec<PixelRect> = self
            .editor
            .rois()
            .iter()
            .map(|roi| PixelRect::round(roi.original_rect))
            .collect();
        self.list.check_in(&self.files[index], rects);
    }

    /// Drain editor events, storing the rectangles when anything changed
    pub fn process_events(&mut self) -> Vec<RoiEvent> {
        let events = self.editor.drain_events();
        if events.iter().any(RoiEvent::is_mutation) {
            self.store_current();
        }
        events
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> Vec<RoiEvent> {
        self.editor.handle_pointer(event);
        self.process_events()
    }

    pub fn handle_key(&mut self, key: &Key) -> Vec<RoiEvent> {
        self.editor.handle_key(key);
        self.process_events()
    }

    /// Write `annotations.json` into the folder
    pub fn save(&mut self) -> Result<()> {
        self.store_current();
        self.list.save(&self.folder.join(ANNOTATIONS_FILE))
    }

    /// Save the list and remember the folder in the config
    pub fn close(mut self) -> Result<RoiSelectConfig> {
        self.save()?;
        self.config.last_folder = Some(self.folder.clone());
        Ok(self.config)
    }

    pub fn export(&mut self, path: &Path) -> Result<()> {
        self.store_current();
        export::export_to_file(&self.list, &self.config.export_line_format, path)
    }

    /// Save crops of the current image's rectangles into `dir`
    pub fn save_current_crops(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let file = self.current_file().context("No image loaded")?;
        let stem = Path::new(file)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(file);
        let crops: Vec<_> = (0..self.editor.len())
            .filter_map(|i| self.editor.roi_image(i))
            .collect();
        preview::save_crops(&crops, dir, stem)
    }
}
