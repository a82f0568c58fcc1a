//! Furniture library and drag-from-library factories
//!
//! Each catalogue entry knows how to build a fully populated element. The
//! viewport receives new elements as JSON drag payloads, the same shape the
//! project accepts in [`super::Project::accept_drop`].

use super::{Color, DesignElement, ElementKind, IdGenerator, Subtype};
use crate::foundation::math::Vec3;

/// Spawn height of a new wall (half its height, so it stands on the floor)
pub const WALL_SPAWN_HEIGHT: f32 = 1.2;

/// Spawn height of a new ceiling light
pub const LIGHT_SPAWN_HEIGHT: f32 = 3.0;

/// Default intensity for new lights
pub const DEFAULT_LIGHT_INTENSITY: f32 = 1.0;

/// A catalogue entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LibraryItem {
    /// Catalogue key
    pub key: &'static str,
    /// Display name
    pub name: &'static str,
    /// Element kind produced
    pub kind: ElementKind,
    /// Element subtype produced
    pub subtype: Option<Subtype>,
    /// Uniform spawn scale
    pub scale: f32,
}

/// The built-in catalogue
pub const FURNITURE_LIBRARY: [LibraryItem; 7] = [
    LibraryItem { key: "wall", name: "Wall", kind: ElementKind::Wall, subtype: None, scale: 1.0 },
    LibraryItem { key: "light-1", name: "Ceiling Light", kind: ElementKind::Light, subtype: Some(Subtype::Light), scale: 1.0 },
    LibraryItem { key: "sofa-1", name: "Modern Sofa", kind: ElementKind::Furniture, subtype: Some(Subtype::Sofa), scale: 1.0 },
    LibraryItem { key: "chair-1", name: "Dining Chair", kind: ElementKind::Furniture, subtype: Some(Subtype::Chair), scale: 1.0 },
    LibraryItem { key: "table-1", name: "Coffee Table", kind: ElementKind::Furniture, subtype: Some(Subtype::Table), scale: 1.0 },
    LibraryItem { key: "bed-1", name: "Queen Bed", kind: ElementKind::Furniture, subtype: Some(Subtype::Bed), scale: 1.0 },
    LibraryItem { key: "lamp-1", name: "Floor Lamp", kind: ElementKind::Furniture, subtype: Some(Subtype::Lamp), scale: 1.0 },
];

/// Find a catalogue entry by key
pub fn find(key: &str) -> Option<&'static LibraryItem> {
    FURNITURE_LIBRARY.iter().find(|item| item.key == key)
}

impl LibraryItem {
    fn id_prefix(&self) -> &'static str {
        match (self.kind, self.subtype) {
            (ElementKind::Furniture, Some(subtype)) => subtype.as_str(),
            (kind, _) => kind.as_str(),
        }
    }

    /// Build a new element for this entry
    pub fn instantiate(&self, ids: &mut IdGenerator) -> DesignElement {
        let element = DesignElement::new(ids.next_id(self.id_prefix()), self.kind, self.subtype)
            .with_scale(Vec3::repeat(self.scale));

        match self.kind {
            ElementKind::Wall => element.with_position(Vec3::new(0.0, WALL_SPAWN_HEIGHT, 0.0)),
            ElementKind::Light => element
                .with_position(Vec3::new(0.0, LIGHT_SPAWN_HEIGHT, 0.0))
                .with_color(Color::WHITE)
                .with_intensity(DEFAULT_LIGHT_INTENSITY),
            _ => element.with_color(Color::WHITE),
        }
    }

    /// Build a new element and encode it as a drag payload
    pub fn drag_payload(&self, ids: &mut IdGenerator) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.instantiate(ids))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Project;

    #[test]
    fn test_wall_factory() {
        let mut ids = IdGenerator::new();
        let wall = find("wall").unwrap().instantiate(&mut ids);
        assert_eq!(wall.id.as_str(), "wall-1");
        assert_eq!(wall.kind, ElementKind::Wall);
        assert_eq!(wall.position, Vec3::new(0.0, 1.2, 0.0));
        assert!(wall.color.is_none());
    }

    #[test]
    fn test_light_factory() {
        let mut ids = IdGenerator::new();
        let light = find("light-1").unwrap().instantiate(&mut ids);
        assert_eq!(light.id.as_str(), "light-1");
        assert_eq!(light.subtype, Some(Subtype::Light));
        assert_eq!(light.position, Vec3::new(0.0, 3.0, 0.0));
        assert_eq!(light.color, Some(Color::WHITE));
        assert_eq!(light.intensity, Some(1.0));
    }

    #[test]
    fn test_furniture_factory() {
        let mut ids = IdGenerator::new();
        let bed = find("bed-1").unwrap().instantiate(&mut ids);
        assert_eq!(bed.id.as_str(), "bed-1");
        assert_eq!(bed.kind, ElementKind::Furniture);
        assert_eq!(bed.position, Vec3::zeros());
        assert_eq!(bed.scale, Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(bed.color, Some(Color::WHITE));
    }

    #[test]
    fn test_drag_payload_drops_into_project() {
        let mut ids = IdGenerator::new();
        let mut project = Project::new("p");
        for item in &FURNITURE_LIBRARY {
            let payload = item.drag_payload(&mut ids).unwrap();
            project.accept_drop(&payload).unwrap();
        }
        assert_eq!(project.len(), FURNITURE_LIBRARY.len());
    }
}
