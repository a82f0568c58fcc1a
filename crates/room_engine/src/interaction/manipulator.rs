//! The gesture state machine
//!
//! Pointer events are queued as they arrive and dispatched in order on the
//! update tick. Pointer moves only record the latest sample; the active
//! gesture is applied once per tick from that sample (and once more just
//! before a gesture ends, so the last movement is never lost).
//!
//! Only one element can be in a non-idle [`GestureState`] at a time. The
//! [`InteractionContext`] gesture token enforces it: a pointer-down while
//! another gesture is running is ignored rather than preempting it.

use std::collections::{BTreeMap, VecDeque};

use super::context::InteractionContext;
use super::gesture::{GestureState, PointerEvent, PointerTarget, TransformCommit};
use crate::config::InteractionConfig;
use crate::foundation::math::{Vec2, Vec3};
use crate::input::{ModifierKey, Modifiers};
use crate::model::{ElementId, Project};
use crate::render::{ray_from_pointer, Camera};
use crate::spatial::{intersect_plane, plane_from_normal_and_point};

/// Turns pointer events into element transform updates
#[derive(Debug)]
pub struct Manipulator {
    gestures: BTreeMap<ElementId, GestureState>,
    pending: VecDeque<PointerEvent>,
    latest: Option<Vec2>,
    moved: bool,
    rotate_modifier: ModifierKey,
    rotation_per_ndc: f32,
    floor_height: f32,
}

impl Default for Manipulator {
    fn default() -> Self {
        Self::new(&InteractionConfig::default())
    }
}

impl Manipulator {
    /// Create a manipulator with the given tuning
    pub fn new(config: &InteractionConfig) -> Self {
        Self {
            gestures: BTreeMap::new(),
            pending: VecDeque::new(),
            latest: None,
            moved: false,
            rotate_modifier: config.rotate_modifier,
            rotation_per_ndc: config.rotation_per_ndc,
            floor_height: config.floor_height,
        }
    }

    /// Gesture state of an element (idle if it has none)
    pub fn gesture_state(&self, id: &ElementId) -> GestureState {
        self.gestures.get(id).copied().unwrap_or_default()
    }

    /// Number of elements currently dragging or rotating
    pub fn active_count(&self) -> usize {
        self.gestures.values().filter(|state| state.is_active()).count()
    }

    /// Queue an event for the next tick
    pub fn push_event(&mut self, event: PointerEvent) {
        self.pending.push_back(event);
    }

    /// Dispatch queued events and apply the active gesture
    ///
    /// Returns every transform pushed to the project, in order.
    pub fn tick(
        &mut self,
        context: &mut InteractionContext,
        project: &mut Project,
        camera: &Camera,
    ) -> Vec<TransformCommit> {
        let mut commits = Vec::new();
        while let Some(event) = self.pending.pop_front() {
            commits.extend(self.dispatch(event, context, project, camera));
        }
        commits.extend(self.apply_motion(context, project, camera));
        commits
    }

    /// Handle one event immediately
    pub fn dispatch(
        &mut self,
        event: PointerEvent,
        context: &mut InteractionContext,
        project: &mut Project,
        camera: &Camera,
    ) -> Option<TransformCommit> {
        match event {
            PointerEvent::Down { target, ndc, modifiers } => {
                self.pointer_down(target, ndc, modifiers, context, project);
                None
            }
            PointerEvent::Move { ndc } => {
                self.latest = Some(ndc);
                self.moved = true;
                None
            }
            PointerEvent::Up | PointerEvent::Leave => {
                let commit = self.apply_motion(context, project, camera);
                self.end_gesture(context);
                commit
            }
        }
    }

    fn pointer_down(
        &mut self,
        target: PointerTarget,
        ndc: Vec2,
        modifiers: Modifiers,
        context: &mut InteractionContext,
        project: &Project,
    ) {
        let id = match target {
            PointerTarget::Element(id) => id,
            PointerTarget::Ground => {
                self.end_gesture(context);
                context.clear_selection();
                return;
            }
            PointerTarget::Nothing => return,
        };

        if let Some(active) = context.active_gesture() {
            log::debug!("Ignoring pointer-down on '{}' while '{}' is being manipulated", id, active);
            return;
        }
        let Some(element) = project.get(&id) else {
            log::warn!("Pointer-down on unknown element '{}'", id);
            return;
        };

        let state = if self.rotate_modifier.is_held(modifiers) && element.kind.supports_rotation() {
            GestureState::Rotating {
                start_rotation: element.rotation,
                start_ndc_x: ndc.x,
            }
        } else {
            GestureState::Dragging {
                plane: plane_from_normal_and_point(Vec3::y(), element.position),
            }
        };

        context.select(Some(id.clone()));
        if context.begin_gesture(id.clone()) {
            log::debug!("Gesture started on '{}': {:?}", id, state);
            self.gestures.insert(id, state);
            self.latest = Some(ndc);
            self.moved = false;
        }
    }

    /// End the active gesture, if any
    ///
    /// Safe to call repeatedly; orbit is re-enabled only by the call that
    /// actually ends a gesture.
    pub fn end_gesture(&mut self, context: &mut InteractionContext) -> Option<ElementId> {
        let ended = context.end_gesture()?;
        self.gestures.remove(&ended);
        self.moved = false;
        log::debug!("Gesture ended on '{}'", ended);
        Some(ended)
    }

    /// Forget an element that has been removed from the project
    pub fn forget(&mut self, id: &ElementId, context: &mut InteractionContext) {
        if context.active_gesture() == Some(id) {
            self.end_gesture(context);
        }
        self.gestures.remove(id);
    }

    fn apply_motion(
        &mut self,
        context: &mut InteractionContext,
        project: &mut Project,
        camera: &Camera,
    ) -> Option<TransformCommit> {
        if !self.moved {
            return None;
        }
        self.moved = false;

        let id = context.active_gesture()?.clone();
        let ndc = self.latest?;
        let state = self.gesture_state(&id);

        let Some(element) = project.get(&id) else {
            self.end_gesture(context);
            return None;
        };

        let commit = match state {
            GestureState::Idle => return None,
            GestureState::Dragging { plane } => {
                let ray = ray_from_pointer(ndc, camera)?;
                let mut position = intersect_plane(&ray, &plane)?;
                if element.kind.clamps_to_floor() {
                    position.y = position.y.max(self.floor_height);
                }
                TransformCommit::Position { id, position }
            }
            GestureState::Rotating { start_rotation, start_ndc_x } => {
                let mut rotation = start_rotation;
                rotation.y = start_rotation.y + (ndc.x - start_ndc_x) * self.rotation_per_ndc;
                TransformCommit::Rotation { id, rotation }
            }
        };

        let applied = match &commit {
            TransformCommit::Position { id, position } => project.update_position(id, *position),
            TransformCommit::Rotation { id, rotation } => project.update_rotation(id, *rotation),
        };
        match applied {
            Ok(()) => {
                log::trace!("Committed {:?}", commit);
                Some(commit)
            }
            Err(e) => {
                log::warn!("Dropping gesture update: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::PI;
    use crate::model::{DesignElement, ElementKind, Subtype};
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-4;

    fn top_down_camera() -> Camera {
        let mut camera = Camera::perspective(Vec3::new(0.0, 10.0, 0.001), 60.0, 1.0, 0.1, 100.0);
        camera.set_target(Vec3::zeros());
        camera
    }

    fn setup(elements: Vec<DesignElement>) -> (Manipulator, InteractionContext, Project) {
        let mut project = Project::new("test");
        for element in elements {
            project.add(element).unwrap();
        }
        (Manipulator::default(), InteractionContext::new(), project)
    }

    fn down(id: &str, ndc: Vec2, modifiers: Modifiers) -> PointerEvent {
        PointerEvent::Down {
            target: PointerTarget::Element(id.into()),
            ndc,
            modifiers,
        }
    }

    #[test]
    fn test_drag_follows_pointer_on_anchor_plane() {
        let wall = DesignElement::new("wall-1".into(), ElementKind::Wall, None).with_position(Vec3::new(0.0, 1.2, 0.0));
        let (mut manipulator, mut context, mut project) = setup(vec![wall]);
        let camera = top_down_camera();

        manipulator.push_event(down("wall-1", Vec2::zeros(), Modifiers::empty()));
        manipulator.push_event(PointerEvent::Move { ndc: Vec2::new(0.2, 0.0) });
        let commits = manipulator.tick(&mut context, &mut project, &camera);

        assert_eq!(commits.len(), 1);
        let position = project.get(&"wall-1".into()).unwrap().position;
        assert_relative_eq!(position.y, 1.2, epsilon = EPSILON);
        assert!(position.x > 0.0);
        assert!(!context.orbit_enabled());
        assert!(context.is_selected(&"wall-1".into()));
    }

    #[test]
    fn test_wall_clamped_to_floor_but_light_is_not() {
        let wall = DesignElement::new("wall-1".into(), ElementKind::Wall, None).with_position(Vec3::new(0.0, -1.0, 0.0));
        let light = DesignElement::new("light-1".into(), ElementKind::Light, Some(Subtype::Light))
            .with_position(Vec3::new(0.0, -1.0, 0.0));
        let (mut manipulator, mut context, mut project) = setup(vec![wall, light]);
        let camera = top_down_camera();

        for id in ["wall-1", "light-1"] {
            manipulator.push_event(down(id, Vec2::zeros(), Modifiers::empty()));
            manipulator.push_event(PointerEvent::Move { ndc: Vec2::new(0.1, 0.1) });
            manipulator.push_event(PointerEvent::Up);
            manipulator.tick(&mut context, &mut project, &camera);
        }

        assert_relative_eq!(project.get(&"wall-1".into()).unwrap().position.y, 0.0, epsilon = EPSILON);
        assert_relative_eq!(project.get(&"light-1".into()).unwrap().position.y, -1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_rotate_wall_by_half_ndc() {
        let wall = DesignElement::new("wall-1".into(), ElementKind::Wall, None);
        let (mut manipulator, mut context, mut project) = setup(vec![wall]);
        let camera = top_down_camera();

        manipulator.push_event(down("wall-1", Vec2::new(-0.25, 0.0), Modifiers::ALT));
        manipulator.push_event(PointerEvent::Move { ndc: Vec2::new(0.25, 0.4) });
        manipulator.tick(&mut context, &mut project, &camera);

        let wall = project.get(&"wall-1".into()).unwrap();
        assert_relative_eq!(wall.rotation.y, 0.5 * PI, epsilon = EPSILON);
        assert_relative_eq!(wall.rotation.x, 0.0, epsilon = EPSILON);
        assert_relative_eq!(wall.position, Vec3::zeros(), epsilon = EPSILON);
    }

    #[test]
    fn test_rotation_keeps_other_axes() {
        let chair = DesignElement::new("chair-1".into(), ElementKind::Furniture, Some(Subtype::Chair))
            .with_rotation(Vec3::new(0.1, 0.2, 0.3));
        let (mut manipulator, mut context, mut project) = setup(vec![chair]);
        let camera = top_down_camera();

        manipulator.push_event(down("chair-1", Vec2::zeros(), Modifiers::ALT));
        manipulator.push_event(PointerEvent::Move { ndc: Vec2::new(-0.5, 0.0) });
        manipulator.tick(&mut context, &mut project, &camera);

        let rotation = project.get(&"chair-1".into()).unwrap().rotation;
        assert_relative_eq!(rotation, Vec3::new(0.1, 0.2 - 0.5 * PI, 0.3), epsilon = EPSILON);
    }

    #[test]
    fn test_light_with_modifier_drags() {
        let light = DesignElement::new("light-1".into(), ElementKind::Light, Some(Subtype::Light))
            .with_position(Vec3::new(0.0, 3.0, 0.0));
        let (mut manipulator, mut context, mut project) = setup(vec![light]);
        let camera = top_down_camera();

        manipulator.push_event(down("light-1", Vec2::zeros(), Modifiers::ALT));
        manipulator.tick(&mut context, &mut project, &camera);
        assert!(matches!(
            manipulator.gesture_state(&"light-1".into()),
            GestureState::Dragging { .. }
        ));
    }

    #[test]
    fn test_up_and_leave_end_gesture_once() {
        let sofa = DesignElement::new("sofa-1".into(), ElementKind::Furniture, Some(Subtype::Sofa));
        let (mut manipulator, mut context, mut project) = setup(vec![sofa]);
        let camera = top_down_camera();

        manipulator.push_event(down("sofa-1", Vec2::zeros(), Modifiers::empty()));
        manipulator.tick(&mut context, &mut project, &camera);
        assert!(!context.orbit_enabled());

        manipulator.push_event(PointerEvent::Up);
        manipulator.push_event(PointerEvent::Leave);
        manipulator.tick(&mut context, &mut project, &camera);

        assert!(context.orbit_enabled());
        assert!(context.active_gesture().is_none());
        assert_eq!(manipulator.gesture_state(&"sofa-1".into()), GestureState::Idle);
        // Selection survives the end of the gesture
        assert!(context.is_selected(&"sofa-1".into()));
    }

    #[test]
    fn test_second_pointer_down_does_not_preempt() {
        let a = DesignElement::new("a".into(), ElementKind::Furniture, Some(Subtype::Bed));
        let b = DesignElement::new("b".into(), ElementKind::Furniture, Some(Subtype::Table));
        let (mut manipulator, mut context, mut project) = setup(vec![a, b]);
        let camera = top_down_camera();

        manipulator.push_event(down("a", Vec2::zeros(), Modifiers::empty()));
        manipulator.push_event(down("b", Vec2::zeros(), Modifiers::ALT));
        manipulator.tick(&mut context, &mut project, &camera);

        assert_eq!(manipulator.active_count(), 1);
        assert!(manipulator.gesture_state(&"a".into()).is_active());
        assert!(!manipulator.gesture_state(&"b".into()).is_active());
        assert!(context.is_selected(&"a".into()));
    }

    #[test]
    fn test_parallel_ray_means_no_movement() {
        let sofa = DesignElement::new("sofa-1".into(), ElementKind::Furniture, Some(Subtype::Sofa))
            .with_position(Vec3::new(1.0, 0.0, 1.0));
        let (mut manipulator, mut context, mut project) = setup(vec![sofa]);
        // Camera level with the drag plane, looking along it
        let mut camera = Camera::perspective(Vec3::new(0.0, 0.0, 10.0), 60.0, 1.0, 0.1, 100.0);
        camera.set_target(Vec3::new(0.0, 0.0, 0.0));

        manipulator.push_event(down("sofa-1", Vec2::zeros(), Modifiers::empty()));
        manipulator.push_event(PointerEvent::Move { ndc: Vec2::zeros() });
        let commits = manipulator.tick(&mut context, &mut project, &camera);

        assert!(commits.is_empty());
        assert_eq!(project.get(&"sofa-1".into()).unwrap().position, Vec3::new(1.0, 0.0, 1.0));
        assert!(manipulator.gesture_state(&"sofa-1".into()).is_active());
    }

    #[test]
    fn test_ground_click_clears_selection_and_restores_orbit() {
        let sofa = DesignElement::new("sofa-1".into(), ElementKind::Furniture, Some(Subtype::Sofa));
        let (mut manipulator, mut context, mut project) = setup(vec![sofa]);
        let camera = top_down_camera();

        manipulator.push_event(down("sofa-1", Vec2::zeros(), Modifiers::empty()));
        manipulator.push_event(PointerEvent::Down {
            target: PointerTarget::Ground,
            ndc: Vec2::new(0.9, 0.9),
            modifiers: Modifiers::empty(),
        });
        manipulator.tick(&mut context, &mut project, &camera);

        assert!(context.selected().is_none());
        assert!(context.orbit_enabled());
        assert_eq!(manipulator.active_count(), 0);
    }
}
