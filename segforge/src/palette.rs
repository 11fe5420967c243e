//! Editor colours and perceptual blending between them.

use std::f32::consts::PI;

use ratatui::style::Color;

pub type Rgb = (u8, u8, u8);

pub const BACKGROUND: Rgb = (24, 24, 24);
pub const SEGMENT_ON: Rgb = (0, 24, 204);
pub const SEGMENT_OUTLINE: Rgb = (2, 173, 230);
pub const NEON: Rgb = (2, 225, 245);
pub const LABEL: Rgb = (128, 128, 128);
pub const VALUE: Rgb = (225, 225, 225);
pub const VALUE_BRIGHT: Rgb = (255, 255, 255);
pub const BUTTON_IDLE: Rgb = (225, 225, 225);
pub const BUTTON_ACTIVE: Rgb = (74, 247, 152);

const ACHROMATIC: f32 = 1e-4;

pub fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Mix `from` toward `to` in Oklch. `t` is clamped to `[0, 1]`, so springy
/// inputs that overshoot do not push the colour past either end.
pub fn blend(from: Rgb, to: Rgb, t: f32) -> Color {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let mixed = Oklch::from_rgb(from).lerp(Oklch::from_rgb(to), t);
    color(mixed.to_rgb())
}

/// Perceptual lightness, chroma and hue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklch {
    pub l: f32,
    pub c: f32,
    pub h: f32,
}

impl Oklch {
    pub fn from_rgb((r, g, b): Rgb) -> Self {
        let [r, g, b] = [r, g, b].map(|v| decode_srgb(f32::from(v) / 255.0));

        let l = (0.4122214708 * r + 0.5363325363 * g + 0.0514459929 * b).cbrt();
        let m = (0.2119034982 * r + 0.6806995451 * g + 0.1073969566 * b).cbrt();
        let s = (0.0883024619 * r + 0.2817188376 * g + 0.6299787005 * b).cbrt();

        let lightness = 0.2104542553 * l + 0.7936177850 * m - 0.0040720468 * s;
        let a = 1.9779984951 * l - 2.4285922050 * m + 0.4505937099 * s;
        let b = 0.0259040371 * l + 0.7827717662 * m - 0.8086757660 * s;

        let c = a.hypot(b);
        let h = if c < 1e-8 { 0.0 } else { b.atan2(a) };

        Self { l: lightness, c, h }
    }

    pub fn to_rgb(self) -> Rgb {
        let a = self.c * self.h.cos();
        let b = self.c * self.h.sin();

        let l = (self.l + 0.3963377774 * a + 0.2158037573 * b).powi(3);
        let m = (self.l - 0.1055613458 * a - 0.0638541728 * b).powi(3);
        let s = (self.l - 0.0894841775 * a - 1.2914855480 * b).powi(3);

        let r = 4.0767416621 * l - 3.3077115913 * m + 0.2309699292 * s;
        let g = -1.2684380046 * l + 2.6097574011 * m - 0.3413193965 * s;
        let b = -0.0041960863 * l - 0.7034186147 * m + 1.7076147010 * s;

        let to_u8 = |v: f32| (encode_srgb(v.clamp(0.0, 1.0)) * 255.0 + 0.5) as u8;
        (to_u8(r), to_u8(g), to_u8(b))
    }

    /// Hue takes the shorter way round. A grey end borrows the other end's
    /// hue, since its own is noise.
    pub fn lerp(self, other: Oklch, t: f32) -> Oklch {
        let from_h = if self.c < ACHROMATIC { other.h } else { self.h };
        let to_h = if other.c < ACHROMATIC { from_h } else { other.h };
        let mut dh = to_h - from_h;

        if dh > PI {
            dh -= 2.0 * PI;
        } else if dh < -PI {
            dh += 2.0 * PI;
        }

        Oklch {
            l: self.l + (other.l - self.l) * t,
            c: self.c + (other.c - self.c) * t,
            h: from_h + dh * t,
        }
    }
}

fn decode_srgb(v: f32) -> f32 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

fn encode_srgb(v: f32) -> f32 {
    if v <= 0.0031308 {
        v * 12.92
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel_delta(a: Rgb, b: Rgb) -> u8 {
        a.0.abs_diff(b.0).max(a.1.abs_diff(b.1)).max(a.2.abs_diff(b.2))
    }

    #[test]
    fn editor_colours_survive_conversion() {
        for rgb in [
            BACKGROUND,
            SEGMENT_ON,
            SEGMENT_OUTLINE,
            NEON,
            LABEL,
            BUTTON_IDLE,
            BUTTON_ACTIVE,
        ] {
            let back = Oklch::from_rgb(rgb).to_rgb();
            assert!(channel_delta(rgb, back) <= 1, "{rgb:?} came back as {back:?}");
        }
    }

    #[test]
    fn blend_endpoints() {
        let Color::Rgb(r, g, b) = blend(BUTTON_IDLE, BUTTON_ACTIVE, 0.0) else {
            panic!("expected rgb");
        };
        assert!(channel_delta((r, g, b), BUTTON_IDLE) <= 1);

        let Color::Rgb(r, g, b) = blend(BUTTON_IDLE, BUTTON_ACTIVE, 1.0) else {
            panic!("expected rgb");
        };
        assert!(channel_delta((r, g, b), BUTTON_ACTIVE) <= 1);
    }

    #[test]
    fn blend_clamps_overshoot() {
        assert_eq!(
            blend(BUTTON_IDLE, BUTTON_ACTIVE, -0.3),
            blend(BUTTON_IDLE, BUTTON_ACTIVE, 0.0)
        );
        assert_eq!(
            blend(BUTTON_IDLE, BUTTON_ACTIVE, 1.7),
            blend(BUTTON_IDLE, BUTTON_ACTIVE, 1.0)
        );
        assert_eq!(
            blend(BUTTON_IDLE, BUTTON_ACTIVE, f32::NAN),
            blend(BUTTON_IDLE, BUTTON_ACTIVE, 0.0)
        );
    }

    #[test]
    fn midpoint_is_between() {
        let Color::Rgb(r, _, _) = blend(BUTTON_IDLE, BUTTON_ACTIVE, 0.5) else {
            panic!("expected rgb");
        };
        assert!(r < BUTTON_IDLE.0 && r > BUTTON_ACTIVE.0, "red channel {r}");
    }

    #[test]
    fn grey_has_no_chroma() {
        assert!(Oklch::from_rgb(LABEL).c < 1e-4);
    }
}
