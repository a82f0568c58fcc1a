//! Design elements: the unit of placement

use serde::{Deserialize, Serialize};

use super::{Color, ElementId};
use crate::assets::AssetHandle;
use crate::foundation::math::{Transform, Vec3};

/// What an element is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Free-standing furniture (parametric or imported)
    Furniture,
    /// Wall panel
    Wall,
    /// Window
    Window,
    /// Door
    Door,
    /// Point light
    Light,
}

impl ElementKind {
    /// Walls and furniture cannot be dragged below the floor; lights can
    pub fn clamps_to_floor(self) -> bool {
        !matches!(self, Self::Light)
    }

    /// Whether a modifier-drag rotates instead of translating
    pub fn supports_rotation(self) -> bool {
        !matches!(self, Self::Light)
    }

    /// Lowercase name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Furniture => "furniture",
            Self::Wall => "wall",
            Self::Window => "window",
            Self::Door => "door",
            Self::Light => "light",
        }
    }
}

/// Concrete model of a furniture or light element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Subtype {
    /// Three-seat sofa
    Sofa,
    /// Dining chair
    Chair,
    /// Coffee table
    Table,
    /// Queen bed
    Bed,
    /// Floor lamp (with its own light)
    Lamp,
    /// Ceiling light
    Light,
    /// Imported asset
    CustomAsset,
}

impl Subtype {
    /// Kebab-case name, also used as the id prefix
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sofa => "sofa",
            Self::Chair => "chair",
            Self::Table => "table",
            Self::Bed => "bed",
            Self::Lamp => "lamp",
            Self::Light => "light",
            Self::CustomAsset => "custom-asset",
        }
    }
}

/// A placed object with its transform and type tags
///
/// Transforms are always complete: a freshly built element sits at the
/// origin with zero rotation and unit scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignElement {
    /// Unique id within the project
    pub id: ElementId,
    /// Element category
    pub kind: ElementKind,
    /// Concrete model (required for furniture and lights)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<Subtype>,
    /// World position
    pub position: Vec3,
    /// Euler rotation in radians (XYZ order)
    pub rotation: Vec3,
    /// Non-uniform scale
    pub scale: Vec3,
    /// Imported asset backing a `custom-asset` element
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_reference: Option<AssetHandle>,
    /// Tint for lights and some furniture
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    /// Light intensity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<f32>,
}

impl DesignElement {
    /// Create an element at the origin with identity rotation and unit scale
    pub fn new(id: ElementId, kind: ElementKind, subtype: Option<Subtype>) -> Self {
        Self {
            id,
            kind,
            subtype,
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            asset_reference: None,
            color: None,
            intensity: None,
        }
    }

    /// Builder: set position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Builder: set rotation
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder: set scale
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Builder: set color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Builder: set light intensity
    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = Some(intensity);
        self
    }

    /// Builder: attach an imported asset
    pub fn with_asset(mut self, asset: AssetHandle) -> Self {
        self.asset_reference = Some(asset);
        self
    }

    /// The element's transform
    pub fn transform(&self) -> Transform {
        Transform {
            position: self.position,
            rotation: self.rotation,
            scale: self.scale,
        }
    }

    /// Whether this is a light element
    pub fn is_light(&self) -> bool {
        self.kind == ElementKind::Light
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_element_has_complete_transform() {
        let element = DesignElement::new("sofa-1".into(), ElementKind::Furniture, Some(Subtype::Sofa));
        assert_eq!(element.position, Vec3::zeros());
        assert_eq!(element.rotation, Vec3::zeros());
        assert_eq!(element.scale, Vec3::new(1.0, 1.0, 1.0));
        assert!(element.asset_reference.is_none());
    }

    #[test]
    fn test_kind_asymmetries() {
        assert!(ElementKind::Wall.clamps_to_floor());
        assert!(ElementKind::Furniture.clamps_to_floor());
        assert!(!ElementKind::Light.clamps_to_floor());
        assert!(ElementKind::Wall.supports_rotation());
        assert!(!ElementKind::Light.supports_rotation());
    }

    #[test]
    fn test_json_shape() {
        let element = DesignElement::new("light-2".into(), ElementKind::Light, Some(Subtype::Light))
            .with_position(Vec3::new(0.0, 3.0, 0.0))
            .with_color(Color::WHITE)
            .with_intensity(1.0);
        let json = serde_json::to_value(&element).unwrap();
        assert_eq!(json["id"], "light-2");
        assert_eq!(json["kind"], "light");
        assert_eq!(json["subtype"], "light");
        assert_eq!(json["color"], "#ffffff");
        assert!(json.get("assetReference").is_none());

        let custom: Subtype = serde_json::from_str("\"custom-asset\"").unwrap();
        assert_eq!(custom, Subtype::CustomAsset);
    }
}
