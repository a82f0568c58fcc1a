//! Pointer state in screen and normalized device coordinates

use crate::foundation::math::Vec2;

/// Viewport-relative pointer tracking
///
/// Holds the viewport size so pixel positions reported by the host can be
/// converted to NDC.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportPointer {
    /// Pointer X in pixels from the left edge
    pub screen_x: f64,
    /// Pointer Y in pixels from the top edge
    pub screen_y: f64,
    /// Viewport width in pixels
    pub width: u32,
    /// Viewport height in pixels
    pub height: u32,
}

impl ViewportPointer {
    /// Create pointer tracking for a viewport of the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            screen_x: 0.0,
            screen_y: 0.0,
            width,
            height,
        }
    }

    /// Update pointer position from a host event
    pub fn update_position(&mut self, x: f64, y: f64) {
        self.screen_x = x;
        self.screen_y = y;
    }

    /// Resize the viewport
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Convert the current position to NDC (Y flipped so up is positive)
    ///
    /// `x` grows to the right and `y` grows upward, both in `[-1, 1]` inside
    /// the viewport. Returns `None` for a zero-sized viewport.
    pub fn to_ndc(&self) -> Option<Vec2> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let x = (self.screen_x / f64::from(self.width)) * 2.0 - 1.0;
        let y = 1.0 - (self.screen_y / f64::from(self.height)) * 2.0;
        #[allow(clippy::cast_possible_truncation)]
        Some(Vec2::new(x as f32, y as f32))
    }
}
