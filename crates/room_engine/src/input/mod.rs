//! Input handling
//!
//! Pointer positions arrive from the viewport host in pixels and are turned
//! into normalized device coordinates here; keyboard state only matters as
//! gesture modifiers.

pub mod pointer;

pub use pointer::ViewportPointer;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Keyboard modifiers held while a pointer event fires
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Modifiers: u8 {
        /// Shift key
        const SHIFT = 1 << 0;
        /// Control key
        const CONTROL = 1 << 1;
        /// Alt / Option key
        const ALT = 1 << 2;
        /// Meta / Command / Windows key
        const META = 1 << 3;
    }
}

/// A single modifier key, used to name the rotate modifier in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifierKey {
    /// Shift key
    Shift,
    /// Control key
    Control,
    /// Alt / Option key
    Alt,
    /// Meta key
    Meta,
}

impl ModifierKey {
    /// The flag corresponding to this key
    pub fn flag(self) -> Modifiers {
        match self {
            Self::Shift => Modifiers::SHIFT,
            Self::Control => Modifiers::CONTROL,
            Self::Alt => Modifiers::ALT,
            Self::Meta => Modifiers::META,
        }
    }

    /// Whether this key is held in `modifiers`
    pub fn is_held(self, modifiers: Modifiers) -> bool {
        modifiers.contains(self.flag())
    }
}
