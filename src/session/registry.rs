//! Named ROI types with colors and cardinality limits

use crate::config::RoiColor;
use crate::domain::RoiType;
use crate::error::{Result, RoiError};

/// Type table kept in registration order
#[derive(Clone, Debug, Default)]
pub struct RoiTypeRegistry {
    types: Vec<RoiType>,
}

impl RoiTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a type, or update color and description of an existing one.
    ///
    /// Re-registering never touches the count, limit or visibility.
    pub fn register(&mut self, name: &str, color: RoiColor, description: &str) -> Result<()> {
        if name.is_empty() {
            return Err(RoiError::InvalidArgument(
                "type name must not be empty".to_string(),
            ));
        }
        match self.get_mut(name) {
            Some(existing) => {
                existing.color = color;
                existing.description = description.to_string();
            }
            None => self.types.push(RoiType::new(name, color, description)),
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&RoiType> {
        self.types.iter().find(|t| t.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut RoiType> {
        self.types.iter_mut().find(|t| t.name == name)
    }

    /// Look up a type or fail naming it
    pub fn require(&self, name: &str) -> Result<&RoiType> {
        self.get(name)
            .ok_or_else(|| RoiError::UnknownType(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn can_create(&self, name: &str) -> bool {
        self.get(name).is_some_and(RoiType::can_create)
    }

    /// Set the limit; `None` removes it
    pub fn set_max_count(&mut self, name: &str, max_count: Option<usize>) -> Result<()> {
        let ty = self
            .get_mut(name)
            .ok_or_else(|| RoiError::UnknownType(name.to_string()))?;
        ty.max_count = max_count;
        Ok(())
    }

    pub fn set_visible(&mut self, name: &str, visible: bool) -> Result<()> {
        let ty = self
            .get_mut(name)
            .ok_or_else(|| RoiError::UnknownType(name.to_string()))?;
        ty.visible = visible;
        Ok(())
    }

    pub(crate) fn increment(&mut self, name: &str) {
        if let Some(ty) = self.get_mut(name) {
            ty.current_count += 1;
        }
    }

    pub(crate) fn decrement(&mut self, name: &str) {
        if let Some(ty) = self.get_mut(name) {
            ty.current_count = ty.current_count.saturating_sub(1);
        }
    }

    pub(crate) fn reset_count(&mut self, name: &str) {
        if let Some(ty) = self.get_mut(name) {
            ty.current_count = 0;
        }
    }

    pub(crate) fn reset_all_counts(&mut self) {
        for ty in &mut self.types {
            ty.current_count = 0;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoiType> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
