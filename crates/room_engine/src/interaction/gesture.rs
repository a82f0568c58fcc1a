//! Gesture state and pointer events

use crate::foundation::math::{Vec2, Vec3};
use crate::input::Modifiers;
use crate::model::ElementId;
use crate::spatial::Plane;

/// Per-element gesture state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    /// No gesture on this element
    #[default]
    Idle,
    /// Translating along a plane anchored at gesture start
    Dragging {
        /// Horizontal plane through the element's position at gesture start
        plane: Plane,
    },
    /// Rotating about Y by horizontal pointer travel
    Rotating {
        /// Element rotation at gesture start
        start_rotation: Vec3,
        /// Pointer NDC x at gesture start
        start_ndc_x: f32,
    },
}

impl GestureState {
    /// Whether a drag or rotation is in progress
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// What the pointer went down on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerTarget {
    /// An element's hit region
    Element(ElementId),
    /// The named ground surface
    Ground,
    /// Empty space (sky, outside the ground)
    Nothing,
}

/// A pointer event delivered by the viewport host
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    /// Button pressed
    Down {
        /// Hit-test result
        target: PointerTarget,
        /// Pointer position in NDC
        ndc: Vec2,
        /// Modifiers held
        modifiers: Modifiers,
    },
    /// Pointer moved
    Move {
        /// Pointer position in NDC
        ndc: Vec2,
    },
    /// Button released
    Up,
    /// Pointer left the viewport
    Leave,
}

/// A transform mutation pushed to the project during a gesture
#[derive(Debug, Clone, PartialEq)]
pub enum TransformCommit {
    /// New position from a drag
    Position {
        /// Element moved
        id: ElementId,
        /// New position
        position: Vec3,
    },
    /// New rotation from a rotate gesture
    Rotation {
        /// Element rotated
        id: ElementId,
        /// New Euler rotation
        rotation: Vec3,
    },
}
