//! Editing core for 16-segment display fonts.
//!
//! Segments are toggled per character code, animated through
//! [`animator::SecondOrderAnimator`], and exported as hex lookup tables.

pub mod animator;
pub mod clipboard;
pub mod config;
pub mod controller;
pub mod curves;
pub mod error;
pub mod export;
pub mod geometry;
pub mod glyph;
pub mod palette;
pub mod persist;

pub use animator::{Curve, SecondOrderAnimator};
pub use controller::{Button, Flow, Input, InteractionController, Layout};
pub use error::{Error, Result};
pub use glyph::{Glyph, GlyphStore};
