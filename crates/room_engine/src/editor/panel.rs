//! Property panel editing for the selected element
//!
//! Field text is applied leniently, the way a form input behaves: bad
//! numbers become zero instead of failing. Every edit goes through the same
//! [`Project`] mutation entry points the gesture machine uses.

use crate::foundation::math::{constants, Vec3};
use crate::model::{Color, DesignElement, ElementId, Project, ProjectError};

use super::EditorError;

/// Upper bound of the intensity slider
pub const INTENSITY_MAX: f32 = 2.0;

/// Intensity slider step
pub const INTENSITY_STEP: f32 = 0.1;

/// Rotation added by the rotate button (about Y)
pub const ROTATE_STEP: f32 = constants::FRAC_PI_4;

/// Position component edited by a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// X component
    X,
    /// Y component
    Y,
    /// Z component
    Z,
}

impl Axis {
    fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

/// Editor for one element, borrowed from the session
#[derive(Debug)]
pub struct PropertyPanel<'a> {
    project: &'a mut Project,
    id: ElementId,
}

impl<'a> PropertyPanel<'a> {
    /// Bind a panel to an element that must exist in `project`
    pub fn new(project: &'a mut Project, id: ElementId) -> Result<Self, ProjectError> {
        if !project.contains(&id) {
            return Err(ProjectError::UnknownElement(id));
        }
        Ok(Self { project, id })
    }

    /// The element being edited
    pub fn element(&self) -> Option<&DesignElement> {
        self.project.get(&self.id)
    }

    /// Id of the element being edited
    pub fn id(&self) -> &ElementId {
        &self.id
    }

    /// Apply a position field, returning the new position
    pub fn set_position_field(&mut self, axis: Axis, text: &str) -> Result<Vec3, EditorError> {
        let mut position = self.current()?.position;
        position[axis.index()] = parse_lenient(text);
        self.project.update_position(&self.id, position)?;
        Ok(position)
    }

    /// Add [`ROTATE_STEP`] about Y, returning the new rotation
    pub fn rotate_step(&mut self) -> Result<Vec3, EditorError> {
        let mut rotation = self.current()?.rotation;
        rotation.y += ROTATE_STEP;
        self.project.update_rotation(&self.id, rotation)?;
        Ok(rotation)
    }

    /// Set a light's intensity from the slider, returning the stored value
    pub fn set_intensity(&mut self, value: f32) -> Result<f32, EditorError> {
        let intensity = snap_intensity(value);
        self.project.update_light_intensity(&self.id, intensity)?;
        Ok(intensity)
    }

    /// Set a light's intensity from field text
    pub fn set_intensity_field(&mut self, text: &str) -> Result<f32, EditorError> {
        self.set_intensity(parse_lenient(text))
    }

    /// Set a light's color from `#rrggbb` text
    pub fn set_color(&mut self, text: &str) -> Result<Color, EditorError> {
        let color = Color::from_hex(text)?;
        self.project.update_light_color(&self.id, color)?;
        Ok(color)
    }

    fn current(&self) -> Result<&DesignElement, ProjectError> {
        self.project
            .get(&self.id)
            .ok_or_else(|| ProjectError::UnknownElement(self.id.clone()))
    }
}

fn parse_lenient(text: &str) -> f32 {
    text.trim()
        .parse::<f32>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

fn snap_intensity(value: f32) -> f32 {
    if !value.is_finite() {
        return 0.0;
    }
    let steps = (value.clamp(0.0, INTENSITY_MAX) / INTENSITY_STEP).round();
    steps * INTENSITY_STEP
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ElementKind, Subtype};
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    fn project() -> Project {
        let mut project = Project::new("panel");
        project
            .add(DesignElement::new("chair-1".into(), ElementKind::Furniture, Some(Subtype::Chair)))
            .unwrap();
        project
            .add(
                DesignElement::new("light-1".into(), ElementKind::Light, Some(Subtype::Light))
                    .with_position(Vec3::new(0.0, 3.0, 0.0))
                    .with_intensity(1.0),
            )
            .unwrap();
        project
    }

    #[test]
    fn test_position_field_is_lenient() {
        let mut project = project();
        let mut panel = PropertyPanel::new(&mut project, "chair-1".into()).unwrap();
        panel.set_position_field(Axis::X, " 1.5 ").unwrap();
        panel.set_position_field(Axis::Z, "-2").unwrap();
        let position = panel.set_position_field(Axis::Y, "abc").unwrap();
        assert_relative_eq!(position, Vec3::new(1.5, 0.0, -2.0), epsilon = EPSILON);

        panel.set_position_field(Axis::X, "NaN").unwrap();
        assert_eq!(project.get(&"chair-1".into()).unwrap().position.x, 0.0);
    }

    #[test]
    fn test_rotate_adds_eighth_turn() {
        let mut project = project();
        let mut panel = PropertyPanel::new(&mut project, "chair-1".into()).unwrap();
        panel.rotate_step().unwrap();
        let rotation = panel.rotate_step().unwrap();
        assert_relative_eq!(rotation.y, constants::PI / 2.0, epsilon = EPSILON);
        assert_eq!(rotation.x, 0.0);
        assert_eq!(rotation.z, 0.0);
    }

    #[test]
    fn test_intensity_clamped_and_snapped() {
        let mut project = project();
        let mut panel = PropertyPanel::new(&mut project, "light-1".into()).unwrap();
        assert_relative_eq!(panel.set_intensity(0.74).unwrap(), 0.7, epsilon = EPSILON);
        assert_relative_eq!(panel.set_intensity(5.0).unwrap(), 2.0, epsilon = EPSILON);
        assert_relative_eq!(panel.set_intensity(-1.0).unwrap(), 0.0, epsilon = EPSILON);
        assert_relative_eq!(panel.set_intensity_field("1.26").unwrap(), 1.3, epsilon = EPSILON);
        assert_relative_eq!(panel.set_intensity_field("bright").unwrap(), 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_light_only_edits_rejected_for_furniture() {
        let mut project = project();
        let mut panel = PropertyPanel::new(&mut project, "chair-1".into()).unwrap();
        assert!(matches!(
            panel.set_intensity(1.0),
            Err(EditorError::Project(ProjectError::NotALight(_)))
        ));
        assert!(matches!(
            panel.set_color("#ff0000"),
            Err(EditorError::Project(ProjectError::NotALight(_)))
        ));
        let chair = project.get(&"chair-1".into()).unwrap();
        assert!(chair.intensity.is_none());
        assert!(chair.color.is_none());
    }

    #[test]
    fn test_color_field() {
        let mut project = project();
        let mut panel = PropertyPanel::new(&mut project, "light-1".into()).unwrap();
        assert_eq!(panel.set_color("#FFA500").unwrap(), Color::rgb(0xff, 0xa5, 0x00));
        assert!(matches!(panel.set_color("orange"), Err(EditorError::Color(_))));
        assert_eq!(
            project.get(&"light-1".into()).unwrap().color,
            Some(Color::rgb(0xff, 0xa5, 0x00))
        );
    }

    #[test]
    fn test_unknown_element() {
        let mut project = project();
        assert!(matches!(
            PropertyPanel::new(&mut project, "ghost-1".into()),
            Err(ProjectError::UnknownElement(_))
        ));
    }
}
