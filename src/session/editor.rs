//! Interactive ROI editor
//!
//! Consumes pointer and keyboard input in display coordinates, keeps the
//! rectangle set and type registry consistent, and queues [`RoiEvent`]s for
//! the host to drain. Nothing here draws; see [`crate::render`].

use crate::capture::image::SourceImage;
use crate::config::{RoiColor, RoiSelectConfig};
use crate::domain::{
    Anchor, ControlMode, CoordinateTransform, CursorIcon, Point, RectF, RoiRectangle,
    RoiSnapshot, Size,
};
use crate::error::Result;
use crate::session::messages::{EditorCommand, Key, PointerButton, PointerEvent, RoiEvent};
use crate::session::registry::RoiTypeRegistry;
use crate::session::shortcuts;
use crate::session::state::InteractionState;
use crate::session::store::{RoiId, RoiStore};

/// Behavior knobs taken from the configuration
#[derive(Clone, Debug, PartialEq)]
pub struct EditorOptions {
    /// Minimum normalized width and height of a drawn ROI
    pub min_roi_size: f32,
    pub mode: ControlMode,
    /// Re-enter create mode for the same type after each draw
    pub auto_continue: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            min_roi_size: 10.0,
            mode: ControlMode::Configuration,
            auto_continue: false,
        }
    }
}

impl From<&RoiSelectConfig> for EditorOptions {
    fn from(config: &RoiSelectConfig) -> Self {
        Self {
            min_roi_size: config.min_roi_size,
            mode: config.mode,
            auto_continue: config.auto_continue,
        }
    }
}

pub struct RoiEditor {
    pub(super) registry: RoiTypeRegistry,
    pub(super) store: RoiStore,
    pub(super) transform: CoordinateTransform,
    pub(super) source: Option<SourceImage>,
    viewport: Size,
    options: EditorOptions,
    state: InteractionState,
    selected: Option<RoiId>,
    hovered: Option<RoiId>,
    cursor: CursorIcon,
    last_pointer: Point,
    events: Vec<RoiEvent>,
    update_depth: u32,
    redraw_requested: bool,
}

impl RoiEditor {
    pub fn new(options: EditorOptions) -> Self {
        Self {
            registry: RoiTypeRegistry::new(),
            store: RoiStore::new(),
            transform: CoordinateTransform::default(),
            source: None,
            viewport: Size::default(),
            options,
            state: InteractionState::Idle,
            selected: None,
            hovered: None,
            cursor: CursorIcon::Default,
            last_pointer: Point::default(),
            events: Vec::new(),
            update_depth: 0,
            redraw_requested: false,
        }
    }

    // ========================================================================
    // Type management
    // ========================================================================

    pub fn register_type(&mut self, name: &str, color: RoiColor, description: &str) -> Result<()> {
        self.registry.register(name, color, description)
    }

    /// Limit how many ROIs of a type may exist; `None` lifts the limit
    pub fn set_max_count(&mut self, name: &str, max_count: Option<usize>) -> Result<()> {
        self.registry.set_max_count(name, max_count)
    }

    /// Show or hide a type along with every ROI of it
    pub fn set_type_visible(&mut self, name: &str, visible: bool) -> Result<()> {
        self.registry.set_visible(name, visible)?;
        for roi in self.store.iter_mut().filter(|r| r.type_name == name) {
            roi.visible = visible;
        }
        self.request_redraw();
        Ok(())
    }

    pub fn types(&self) -> &RoiTypeRegistry {
        &self.registry
    }

    // ========================================================================
    // Image and viewport
    // ========================================================================

    /// Replace the displayed image.
    ///
    /// Existing ROIs keep their original-space bounds and are re-projected.
    pub fn set_source_image(&mut self, image: Option<SourceImage>) {
        self.source = image;
        self.abort_gesture();
        self.update_transform();
    }

    pub fn source_image(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    /// Resize the viewport, re-projecting existing ROIs
    pub fn set_viewport_size(&mut self, size: Size) {
        if size == self.viewport {
            return;
        }
        self.viewport = size;
        self.abort_gesture();
        self.update_transform();
    }

    pub fn viewport_size(&self) -> Size {
        self.viewport
    }

    pub fn transform(&self) -> &CoordinateTransform {
        &self.transform
    }

    fn update_transform(&mut self) {
        let previous = self.transform;
        let source_size = self.source.as_ref().map(SourceImage::size).unwrap_or_default();
        self.transform.calculate(source_size, self.viewport);

        if previous != self.transform {
            for roi in self.store.iter_mut() {
                let original = previous.rect_to_original(roi.bounds());
                roi.set_bounds(self.transform.rect_to_display(original));
            }
            log::debug!(
                "Transform updated: scale {:.4}, offset ({:.1}, {:.1})",
                self.transform.scale(),
                self.transform.offset_x(),
                self.transform.offset_y()
            );
        }
        self.request_redraw();
    }

    /// Boundary that drags and resizes are clamped to, when an image is set
    fn clamp_bounds(&self) -> Option<RectF> {
        if self.transform.source_size().is_empty() {
            None
        } else {
            Some(self.transform.image_display_rect())
        }
    }

    // ========================================================================
    // ROI commands
    // ========================================================================

    /// Enter create mode for `type_name`, evicting the oldest ROIs of a type
    /// that is already at capacity.
    pub fn start_creating(&mut self, type_name: &str) -> Result<()> {
        self.registry.require(type_name)?;
        self.evict_for(type_name);
        log::debug!("Creating ROI of type {type_name}");
        self.state = InteractionState::Creating {
            type_name: type_name.to_string(),
            provisional: None,
        };
        self.cursor = CursorIcon::Crosshair;
        self.request_redraw();
        Ok(())
    }

    /// Leave create mode, dropping any half-drawn rectangle
    pub fn cancel_creating(&mut self) {
        if self.state.is_creating() {
            log::debug!("Creation cancelled");
            self.state = InteractionState::Idle;
            self.cursor = CursorIcon::Default;
            self.request_redraw();
        }
    }

    /// Add a ROI given in original-image coordinates.
    ///
    /// Returns the new index, or `None` when the type is at capacity.
    pub fn add_roi(&mut self, type_name: &str, original: RectF) -> Result<Option<usize>> {
        let ty = self.registry.require(type_name)?;
        if !ty.can_create() {
            log::debug!("Type {type_name} is at capacity, ROI not added");
            return Ok(None);
        }
        let color = ty.color;
        let display = self.transform.rect_to_display(original.normalized());
        let mut roi = RoiRectangle::new(display, type_name, color);
        roi.visible = ty.visible;
        Ok(Some(self.commit(roi)))
    }

    /// Remove the ROI at `index`; out-of-range indices are ignored
    pub fn remove_roi(&mut self, index: usize) -> bool {
        self.remove_at(index)
    }

    /// Remove all ROIs, or only those of one type. No events are raised.
    pub fn clear_rois(&mut self, type_name: Option<&str>) {
        match type_name {
            Some(name) => {
                let removed = self.store.remove_type(name);
                self.registry.reset_count(name);
                log::debug!("Cleared {removed} ROIs of type {name}");
            }
            None => {
                self.store.clear();
                self.registry.reset_all_counts();
                log::debug!("Cleared all ROIs");
            }
        }
        self.resolve_references();
        self.request_redraw();
    }

    /// Move a ROI to new original-image bounds
    pub fn update_roi(&mut self, index: usize, original: RectF) -> bool {
        let display = self.transform.rect_to_display(original.normalized());
        let Some(roi) = self.store.get_mut(index) else {
            return false;
        };
        roi.set_bounds(display);
        self.emit_at(index, RoiEvent::Modified);
        self.request_redraw();
        true
    }

    /// Select or deselect a ROI programmatically, keeping a single selection
    pub fn highlight_roi(&mut self, index: usize, highlight: bool) -> bool {
        let Some(id) = self.store.id_at(index) else {
            return false;
        };
        if highlight {
            self.select(Some(id));
        } else if self.selected == Some(id) {
            self.select(None);
        }
        self.request_redraw();
        true
    }

    /// Attach host data to a ROI
    pub fn set_roi_tag(&mut self, index: usize, tag: Option<String>) -> bool {
        match self.store.get_mut(index) {
            Some(roi) => {
                roi.tag = tag;
                true
            }
            None => false,
        }
    }

    /// Remove the selected ROI, if any
    pub fn delete_selected(&mut self) -> bool {
        match self.selected_index() {
            Some(index) => self.remove_roi(index),
            None => false,
        }
    }

    /// Escape behavior: abort a draw, otherwise drop the selection along
    /// with any drag or resize acting on it
    pub fn cancel(&mut self) {
        if self.state.is_creating() {
            self.cancel_creating();
        } else {
            self.abort_gesture();
            self.select(None);
            self.request_redraw();
        }
    }

    // ========================================================================
    // Batch updates and redraw requests
    // ========================================================================

    /// Suspend redraw requests until the matching [`Self::end_update`]
    pub fn begin_update(&mut self) {
        self.update_depth += 1;
    }

    /// Close a batch; the outermost close requests a single redraw
    pub fn end_update(&mut self) {
        self.update_depth = self.update_depth.saturating_sub(1);
        if self.update_depth == 0 {
            self.redraw_requested = true;
        }
    }

    pub fn is_updating(&self) -> bool {
        self.update_depth > 0
    }

    fn request_redraw(&mut self) {
        if self.update_depth == 0 {
            self.redraw_requested = true;
        }
    }

    /// Whether the host should repaint; clears the request
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    // ========================================================================
    // Events and status
    // ========================================================================

    /// Hand queued events to the host, oldest first
    pub fn drain_events(&mut self) -> Vec<RoiEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn cursor(&self) -> CursorIcon {
        self.cursor
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn set_mode(&mut self, mode: ControlMode) {
        if mode == ControlMode::Display {
            self.abort_gesture();
            self.cancel_creating();
        }
        self.options.mode = mode;
        self.request_redraw();
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Position of the selected ROI
    pub fn selected_index(&self) -> Option<usize> {
        self.selected.and_then(|id| self.store.index_of(id))
    }

    /// Position of the ROI under the pointer while idle
    pub fn hovered_index(&self) -> Option<usize> {
        self.hovered.and_then(|id| self.store.index_of(id))
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Feed one pointer event. Ignored in display mode.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        if self.options.mode == ControlMode::Display {
            return;
        }
        match event {
            PointerEvent::Pressed { position, button } => {
                if button == PointerButton::Primary {
                    self.pointer_pressed(position);
                }
            }
            PointerEvent::Moved {
                position,
                primary_held,
            } => self.pointer_moved(position, primary_held),
            PointerEvent::Released { position, button } => {
                if button == PointerButton::Primary {
                    self.pointer_released(position);
                }
            }
        }
    }

    /// Feed one key press; returns true if it was consumed
    pub fn handle_key(&mut self, key: &Key) -> bool {
        if self.options.mode == ControlMode::Display {
            return false;
        }
        match shortcuts::handle_key_event(key, self.selected_index().is_some()) {
            Some(EditorCommand::DeleteSelected) => {
                self.delete_selected();
                true
            }
            Some(EditorCommand::Cancel) => {
                self.cancel();
                true
            }
            None => false,
        }
    }

    fn pointer_pressed(&mut self, p: Point) {
        self.last_pointer = p;

        if let InteractionState::Creating {
            type_name,
            provisional,
        } = &mut self.state
        {
            if let Some(ty) = self.registry.get(type_name) {
                *provisional = Some(RoiRectangle::new(
                    RectF::new(p.x, p.y, 0.0, 0.0),
                    type_name.clone(),
                    ty.color,
                ));
            }
            self.request_redraw();
            return;
        }

        match self.store.topmost_at(p) {
            Some(index) => {
                let Some(id) = self.store.id_at(index) else {
                    return;
                };
                self.select(Some(id));
                let anchor = self
                    .store
                    .get(index)
                    .map(|roi| roi.hit_anchor(p))
                    .unwrap_or_default();
                self.state = if anchor == Anchor::None {
                    InteractionState::Dragging { target: id }
                } else {
                    InteractionState::Resizing { target: id, anchor }
                };
                self.cursor = anchor.cursor();
                log::debug!("ROI {index} grabbed with anchor {anchor:?}");
                self.emit_at(index, RoiEvent::Selected);
            }
            None => {
                self.select(None);
                self.state = InteractionState::Idle;
            }
        }
        self.request_redraw();
    }

    fn pointer_moved(&mut self, p: Point, primary_held: bool) {
        // Deltas are relative to the previous sample, not the gesture start
        let dx = p.x - self.last_pointer.x;
        let dy = p.y - self.last_pointer.y;
        let bounds = self.clamp_bounds();

        match &mut self.state {
            InteractionState::Creating { provisional, .. } => {
                if let Some(roi) = provisional.as_mut()
                    && primary_held
                {
                    roi.width = p.x - roi.x;
                    roi.height = p.y - roi.y;
                    self.request_redraw();
                }
            }
            InteractionState::Dragging { target } => {
                let target = *target;
                if primary_held && let Some(roi) = self.store.by_id_mut(target) {
                    roi.resize(Anchor::None, dx, dy);
                    if let Some(bounds) = bounds {
                        roi.clamp_to_bounds(bounds);
                    }
                    self.last_pointer = p;
                    self.request_redraw();
                }
            }
            InteractionState::Resizing { target, anchor } => {
                let (target, anchor) = (*target, *anchor);
                if primary_held && let Some(roi) = self.store.by_id_mut(target) {
                    roi.resize(anchor, dx, dy);
                    roi.normalize();
                    if let Some(bounds) = bounds {
                        roi.clamp_to_bounds(bounds);
                    }
                    self.last_pointer = p;
                    self.request_redraw();
                }
            }
            InteractionState::Idle => self.hover(p),
        }
    }

    /// Cursor feedback only; never changes the interaction state
    fn hover(&mut self, p: Point) {
        let hit = self.store.topmost_at(p);
        self.hovered = hit.and_then(|index| self.store.id_at(index));
        self.cursor = match hit.and_then(|index| self.store.get(index)) {
            Some(roi) => roi.hit_anchor(p).cursor(),
            None => CursorIcon::Default,
        };
    }

    fn pointer_released(&mut self, _p: Point) {
        match std::mem::take(&mut self.state) {
            InteractionState::Creating {
                type_name,
                provisional: Some(mut roi),
            } => {
                roi.normalize();
                let min = self.options.min_roi_size;
                if roi.width >= min && roi.height >= min {
                    self.commit_drawn(&type_name, roi);
                } else {
                    log::debug!(
                        "Discarded {:.1}x{:.1} draw, below minimum {min}",
                        roi.width,
                        roi.height
                    );
                }
                self.cursor = CursorIcon::Default;
                if self.options.auto_continue && self.registry.contains(&type_name) {
                    self.evict_for(&type_name);
                    self.state = InteractionState::Creating {
                        type_name,
                        provisional: None,
                    };
                    self.cursor = CursorIcon::Crosshair;
                }
                self.request_redraw();
            }
            state @ InteractionState::Creating {
                provisional: None, ..
            } => {
                // Release without a press in the canvas
                self.state = state;
            }
            InteractionState::Dragging { target } | InteractionState::Resizing { target, .. } => {
                if let Some(index) = self.store.index_of(target) {
                    self.emit_at(index, RoiEvent::Modified);
                }
                self.cursor = CursorIcon::Default;
            }
            InteractionState::Idle => {}
        }
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Commit an interactively drawn rectangle, making room if the type
    /// filled up while the draw was open
    fn commit_drawn(&mut self, type_name: &str, roi: RoiRectangle) {
        self.evict_for(type_name);
        match self.registry.get(type_name) {
            Some(ty) if ty.can_create() => {
                let index = self.commit(roi);
                log::debug!("ROI {index} created for type {type_name}");
            }
            Some(_) => log::info!("Type {type_name} holds no ROIs, draw discarded"),
            None => log::warn!("Type {type_name} vanished during draw"),
        }
    }

    fn commit(&mut self, roi: RoiRectangle) -> usize {
        self.registry.increment(&roi.type_name);
        self.store.push(roi);
        let index = self.store.len() - 1;
        self.emit_at(index, RoiEvent::Created);
        self.request_redraw();
        index
    }

    /// Remove oldest ROIs of a finite-capacity type until one more fits
    fn evict_for(&mut self, type_name: &str) {
        let Some(max) = self.registry.get(type_name).and_then(|t| t.max_count) else {
            return;
        };
        while self.store.count_of_type(type_name) >= max {
            let Some(oldest) = self.store.oldest_of_type(type_name) else {
                break;
            };
            log::debug!("Evicting ROI {oldest} of type {type_name} (capacity {max})");
            self.remove_at(oldest);
        }
    }

    fn remove_at(&mut self, index: usize) -> bool {
        let Some(snapshot) = self.snapshot(index) else {
            return false;
        };
        let Some((id, roi)) = self.store.remove(index) else {
            return false;
        };
        self.registry.decrement(&roi.type_name);
        if self.selected == Some(id) {
            self.selected = None;
        }
        if self.state.target() == Some(id) {
            self.state = InteractionState::Idle;
            self.cursor = CursorIcon::Default;
        }
        self.resolve_references();
        self.events.push(RoiEvent::Deleted(snapshot));
        self.request_redraw();
        true
    }

    fn emit_at(&mut self, index: usize, event: fn(RoiSnapshot) -> RoiEvent) {
        if let Some(snapshot) = self.snapshot(index) {
            self.events.push(event(snapshot));
        }
    }

    /// Make every rectangle's flag agree with `id`
    fn select(&mut self, id: Option<RoiId>) {
        self.selected = id.filter(|&id| self.store.index_of(id).is_some());
        let selected_index = self.selected_index();
        for (index, roi) in self.store.iter_mut().enumerate() {
            roi.selected = Some(index) == selected_index;
        }
    }

    /// Drop ids that no longer resolve after a bulk mutation
    fn resolve_references(&mut self) {
        if self.selected.is_some_and(|id| self.store.index_of(id).is_none()) {
            self.selected = None;
        }
        if self.hovered.is_some_and(|id| self.store.index_of(id).is_none()) {
            self.hovered = None;
        }
        if let Some(target) = self.state.target()
            && self.store.index_of(target).is_none()
        {
            self.state = InteractionState::Idle;
            self.cursor = CursorIcon::Default;
        }
    }

    /// End a drag/resize or half-drawn rectangle when the geometry under it
    /// changes; create mode itself survives
    fn abort_gesture(&mut self) {
        match &mut self.state {
            InteractionState::Creating { provisional, .. } => *provisional = None,
            InteractionState::Dragging { .. } | InteractionState::Resizing { .. } => {
                self.state = InteractionState::Idle;
                self.cursor = CursorIcon::Default;
            }
            InteractionState::Idle => {}
        }
    }
}

impl Default for RoiEditor {
    fn default() -> Self {
        Self::new(EditorOptions::default())
    }
}
