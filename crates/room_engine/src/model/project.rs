//! The ordered element list
//!
//! Append order is kept for the lifetime of the project; export walks the
//! elements in this order, so it is part of the determinism contract.

use super::{Color, DesignElement, ElementId, ElementKind};
use crate::foundation::math::Vec3;

/// Element-model errors
#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    /// An element with this id already exists
    #[error("Element id '{0}' is already in use")]
    DuplicateId(ElementId),

    /// No element with this id
    #[error("Unknown element '{0}'")]
    UnknownElement(ElementId),

    /// Light-only property applied to another kind
    #[error("Element '{0}' is not a light")]
    NotALight(ElementId),

    /// Drag payload could not be decoded
    #[error("Invalid drop payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

/// A named, ordered sequence of design elements
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Project {
    /// Display name
    pub name: String,
    elements: Vec<DesignElement>,
}

impl Project {
    /// Create an empty project
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            elements: Vec::new(),
        }
    }

    /// Append a fully populated element
    pub fn add(&mut self, element: DesignElement) -> Result<(), ProjectError> {
        if self.contains(&element.id) {
            return Err(ProjectError::DuplicateId(element.id));
        }
        log::info!("Added {} '{}' to project '{}'", element.kind.as_str(), element.id, self.name);
        self.elements.push(element);
        Ok(())
    }

    /// Decode a library drag payload and append it
    ///
    /// Nothing is mutated unless the payload decodes and its id is free.
    pub fn accept_drop(&mut self, payload: &str) -> Result<ElementId, ProjectError> {
        let element: DesignElement = serde_json::from_str(payload).map_err(|e| {
            log::warn!("Rejected drop payload: {}", e);
            ProjectError::InvalidPayload(e)
        })?;
        let id = element.id.clone();
        self.add(element)?;
        Ok(id)
    }

    /// Remove an element by id, returning it
    pub fn remove(&mut self, id: &ElementId) -> Result<DesignElement, ProjectError> {
        let index = self
            .elements
            .iter()
            .position(|e| &e.id == id)
            .ok_or_else(|| ProjectError::UnknownElement(id.clone()))?;
        let removed = self.elements.remove(index);
        log::info!("Removed '{}' from project '{}'", id, self.name);
        Ok(removed)
    }

    /// Look up an element
    pub fn get(&self, id: &ElementId) -> Option<&DesignElement> {
        self.elements.iter().find(|e| &e.id == id)
    }

    /// Look up an element mutably
    pub fn get_mut(&mut self, id: &ElementId) -> Option<&mut DesignElement> {
        self.elements.iter_mut().find(|e| &e.id == id)
    }

    fn require_mut(&mut self, id: &ElementId) -> Result<&mut DesignElement, ProjectError> {
        self.get_mut(id).ok_or_else(|| ProjectError::UnknownElement(id.clone()))
    }

    fn require_light(&mut self, id: &ElementId) -> Result<&mut DesignElement, ProjectError> {
        let element = self.require_mut(id)?;
        if element.kind == ElementKind::Light {
            Ok(element)
        } else {
            Err(ProjectError::NotALight(id.clone()))
        }
    }

    /// Whether an element with this id exists
    pub fn contains(&self, id: &ElementId) -> bool {
        self.get(id).is_some()
    }

    /// Set an element's position
    pub fn update_position(&mut self, id: &ElementId, position: Vec3) -> Result<(), ProjectError> {
        self.require_mut(id)?.position = position;
        Ok(())
    }

    /// Set an element's rotation
    pub fn update_rotation(&mut self, id: &ElementId, rotation: Vec3) -> Result<(), ProjectError> {
        self.require_mut(id)?.rotation = rotation;
        Ok(())
    }

    /// Set a light's intensity
    pub fn update_light_intensity(&mut self, id: &ElementId, intensity: f32) -> Result<(), ProjectError> {
        self.require_light(id)?.intensity = Some(intensity);
        Ok(())
    }

    /// Set a light's color
    pub fn update_light_color(&mut self, id: &ElementId, color: Color) -> Result<(), ProjectError> {
        self.require_light(id)?.color = Some(color);
        Ok(())
    }

    /// Elements in append order
    pub fn elements(&self) -> &[DesignElement] {
        &self.elements
    }

    /// Iterate elements in append order
    pub fn iter(&self) -> std::slice::Iter<'_, DesignElement> {
        self.elements.iter()
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the project has no elements
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<'a> IntoIterator for &'a Project {
    type Item = &'a DesignElement;
    type IntoIter = std::slice::Iter<'a, DesignElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
