//! Session-wide interaction state

use crate::model::ElementId;

/// Selection and camera-orbit state for one editing session
///
/// Written only from the update tick. The viewport host reads
/// [`Self::orbit_input_active`] to decide whether its orbit control should
/// respond to the pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionContext {
    selected: Option<ElementId>,
    orbit_enabled: bool,
    ar_mode: bool,
    active_gesture: Option<ElementId>,
}

impl Default for InteractionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionContext {
    /// Nothing selected, orbit enabled, desktop mode
    pub fn new() -> Self {
        Self {
            selected: None,
            orbit_enabled: true,
            ar_mode: false,
            active_gesture: None,
        }
    }

    /// Currently selected element
    pub fn selected(&self) -> Option<&ElementId> {
        self.selected.as_ref()
    }

    /// Whether `id` is the selected element
    pub fn is_selected(&self, id: &ElementId) -> bool {
        self.selected.as_ref() == Some(id)
    }

    /// Replace the selection
    pub fn select(&mut self, id: Option<ElementId>) {
        if self.selected != id {
            log::debug!("Selection changed: {:?} -> {:?}", self.selected, id);
        }
        self.selected = id;
    }

    /// Whether camera orbit is allowed (no gesture in progress)
    pub fn orbit_enabled(&self) -> bool {
        self.orbit_enabled
    }

    /// Whether the desktop orbit control should respond right now
    pub fn orbit_input_active(&self) -> bool {
        self.orbit_enabled && !self.ar_mode
    }

    /// Whether the immersive/AR surface is active
    pub fn ar_mode(&self) -> bool {
        self.ar_mode
    }

    /// Switch between desktop and AR surfaces, returning the new mode
    pub fn toggle_ar_mode(&mut self) -> bool {
        self.ar_mode = !self.ar_mode;
        log::info!("AR mode {}", if self.ar_mode { "enabled" } else { "disabled" });
        self.ar_mode
    }

    /// Element holding the gesture token, if any
    pub fn active_gesture(&self) -> Option<&ElementId> {
        self.active_gesture.as_ref()
    }

    /// Take the gesture token for `id` and suspend orbit
    ///
    /// Fails (returns `false`) while another gesture holds the token.
    pub fn begin_gesture(&mut self, id: ElementId) -> bool {
        if self.active_gesture.is_some() {
            return false;
        }
        self.active_gesture = Some(id);
        self.orbit_enabled = false;
        true
    }

    /// Release the gesture token and re-enable orbit
    ///
    /// Idempotent: only the call that actually releases the token re-enables
    /// orbit and returns the element id.
    pub fn end_gesture(&mut self) -> Option<ElementId> {
        let ended = self.active_gesture.take()?;
        self.orbit_enabled = true;
        Some(ended)
    }

    /// Background click: drop the selection and make sure orbit is back on
    pub fn clear_selection(&mut self) {
        self.select(None);
        self.orbit_enabled = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let context = InteractionContext::new();
        assert!(context.orbit_enabled());
        assert!(context.orbit_input_active());
        assert!(context.selected().is_none());
        assert!(context.active_gesture().is_none());
    }

    #[test]
    fn test_gesture_token_is_exclusive() {
        let mut context = InteractionContext::new();
        assert!(context.begin_gesture("a".into()));
        assert!(!context.orbit_enabled());
        assert!(!context.begin_gesture("b".into()));
        assert_eq!(context.active_gesture().map(ElementId::as_str), Some("a"));
    }

    #[test]
    fn test_end_gesture_is_idempotent() {
        let mut context = InteractionContext::new();
        context.begin_gesture("a".into());
        assert_eq!(context.end_gesture().map(|id| id.to_string()), Some("a".to_string()));
        assert!(context.orbit_enabled());
        assert!(context.end_gesture().is_none());
        assert!(context.orbit_enabled());
    }

    #[test]
    fn test_ar_mode_blocks_orbit_input() {
        let mut context = InteractionContext::new();
        assert!(context.toggle_ar_mode());
        assert!(context.orbit_enabled());
        assert!(!context.orbit_input_active());
        assert!(!context.toggle_ar_mode());
        assert!(context.orbit_input_active());
    }
}
