use crate::animator::Curve;

/// Snap thresholds for animators whose resting value is drawn directly, where
/// a half-percent creep would still be visible.
pub const FINE_SNAP: (f32, f32) = (0.0001, 0.0001);

impl Curve {
    /// Critically damped; the selected character scrolls without overshoot.
    pub const CHARACTER: Self = Self::from_parts(4.0, 1.0, 0.0);

    /// Slow with a soft bounce, for the help panel sliding over the glyph.
    pub const HELP: Self = Self::from_parts(3.0, 0.4, 0.0);

    /// Quick fade of segment outlines while the pointer hovers the editor.
    pub const OUTLINE: Self = Self::from_parts(6.5, 1.0, 0.0);

    /// Springy pop of a pressed button.
    pub const BUTTON_SIZE: Self = Self::from_parts(5.0, 0.4, 0.0);

    /// Long colour tail after a button press.
    pub const BUTTON_COLOR: Self = Self::from_parts(0.9, 1.0, 0.0);
}

/// Every curve the editor animates with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Curves {
    pub character: Curve,
    pub help: Curve,
    pub outline: Curve,
    pub button_size: Curve,
    pub button_color: Curve,
}

impl Default for Curves {
    fn default() -> Self {
        Self {
            character: Curve::CHARACTER,
            help: Curve::HELP,
            outline: Curve::OUTLINE,
            button_size: Curve::BUTTON_SIZE,
            button_color: Curve::BUTTON_COLOR,
        }
    }
}
