use std::fmt;

use crate::geometry::SEGMENT_COUNT;

pub const GLYPH_COUNT: usize = 256;

/// On/off state of every segment of one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    segments: [bool; SEGMENT_COUNT],
}

impl Default for Glyph {
    fn default() -> Self {
        Self::filled()
    }
}

impl Glyph {
    pub const fn filled() -> Self {
        Self {
            segments: [true; SEGMENT_COUNT],
        }
    }

    pub const fn cleared() -> Self {
        Self {
            segments: [false; SEGMENT_COUNT],
        }
    }

    /// Bit `i` of `packed` becomes segment `i`.
    pub fn from_packed(packed: u16) -> Self {
        let mut segments = [false; SEGMENT_COUNT];

        for (i, segment) in segments.iter_mut().enumerate() {
            *segment = packed & (1u16 << i) != 0;
        }

        Self { segments }
    }

    pub fn segments(&self) -> &[bool; SEGMENT_COUNT] {
        &self.segments
    }

    pub fn is_on(&self, segment: usize) -> bool {
        self.segments[segment]
    }

    pub fn packed(&self) -> u16 {
        self.segments
            .iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .fold(0, |acc, (i, _)| acc | (1u16 << i))
    }

    pub fn is_blank(&self) -> bool {
        self.segments.iter().all(|on| !on)
    }
}

impl fmt::Display for Glyph {
    /// Segment 0 first, one `1`/`0` per segment.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for on in self.segments {
            f.write_str(if on { "1" } else { "0" })?;
        }

        Ok(())
    }
}

/// Segment table for all 256 character codes.
///
/// Indexed by `u8` so a code can never fall outside the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphStore {
    glyphs: [Glyph; GLYPH_COUNT],
}

impl Default for GlyphStore {
    fn default() -> Self {
        Self {
            glyphs: [Glyph::filled(); GLYPH_COUNT],
        }
    }
}

impl GlyphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default store with `text` applied on top, see [`GlyphStore::load_from`].
    pub fn parse(text: &str) -> Self {
        let mut store = Self::default();
        store.load_from(text);
        store
    }

    pub fn glyph(&self, code: u8) -> &Glyph {
        &self.glyphs[usize::from(code)]
    }

    pub fn set_glyph(&mut self, code: u8, glyph: Glyph) {
        self.glyphs[usize::from(code)] = glyph;
    }

    /// Glyphs in ascending code order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Glyph)> {
        (0..=u8::MAX).zip(self.glyphs.iter())
    }

    /// Panics if `segment` is not below [`SEGMENT_COUNT`].
    pub fn toggle_segment(&mut self, code: u8, segment: usize) {
        let slot = &mut self.glyphs[usize::from(code)].segments[segment];
        *slot = !*slot;
    }

    pub fn clear(&mut self, code: u8) {
        self.set_glyph(code, Glyph::cleared());
    }

    pub fn fill(&mut self, code: u8) {
        self.set_glyph(code, Glyph::filled());
    }

    /// Blank glyphs fill; anything else clears.
    pub fn toggle_uniform(&mut self, code: u8) {
        if self.glyph(code).is_blank() {
            self.fill(code);
        } else {
            self.clear(code);
        }
    }

    pub fn packed_value(&self, code: u8) -> u16 {
        self.glyph(code).packed()
    }

    /// Applies the line-per-glyph text format.
    ///
    /// Line `i` sets glyph `i`; character `j` of it sets segment `j` on when it
    /// is `1` and off otherwise. Segments past the end of a short line, and
    /// glyphs past the last line, keep their current state. Extra lines and
    /// characters are ignored.
    pub fn load_from(&mut self, text: &str) {
        // Split on `\n` alone: a stray `\r` is a character like any other
        // and reads as off.
        for (glyph, line) in self.glyphs.iter_mut().zip(text.split('\n')) {
            for (segment, c) in glyph.segments.iter_mut().zip(line.chars()) {
                *segment = c == '1';
            }
        }
    }

    /// 256 lines of 16 `1`/`0` characters, newline separated, no trailing
    /// newline.
    pub fn save_to(&self) -> String {
        let mut out = String::with_capacity(GLYPH_COUNT * (SEGMENT_COUNT + 1));

        for (i, glyph) in self.glyphs.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&glyph.to_string());
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_all_on() {
        let store = GlyphStore::new();

        for (_, glyph) in store.iter() {
            assert_eq!(glyph.packed(), 0xFFFF);
        }
    }

    #[test]
    fn packed_bit_positions() {
        let mut store = GlyphStore::new();

        store.clear(7);
        assert_eq!(store.packed_value(7), 0x0000);

        store.toggle_segment(7, 0);
        assert_eq!(store.packed_value(7), 0x0001);

        store.toggle_segment(7, 0);
        store.toggle_segment(7, 15);
        assert_eq!(store.packed_value(7), 0x8000);

        store.fill(7);
        assert_eq!(store.packed_value(7), 0xFFFF);
    }

    #[test]
    fn packed_is_bijective() {
        for packed in [0u16, 1, 0x8000, 0x00FF, 0xA5A5, 0x1234, 0xFFFF] {
            assert_eq!(Glyph::from_packed(packed).packed(), packed);
        }
    }

    #[test]
    fn toggle_uniform_cycles() {
        let mut store = GlyphStore::new();
        store.clear(0);

        store.toggle_uniform(0);
        assert_eq!(store.packed_value(0), 0xFFFF);

        store.toggle_uniform(0);
        assert_eq!(store.packed_value(0), 0x0000);
    }

    #[test]
    fn toggle_uniform_on_mixed_clears() {
        let mut store = GlyphStore::new();
        store.set_glyph(1, Glyph::from_packed(0b1001));

        store.toggle_uniform(1);
        assert_eq!(store.packed_value(1), 0x0000);
    }

    #[test]
    fn toggle_touches_one_glyph() {
        let mut store = GlyphStore::new();
        store.toggle_segment(200, 3);

        assert!(!store.glyph(200).is_on(3));
        assert!(store.glyph(199).is_on(3));
        assert!(store.glyph(201).is_on(3));
    }

    #[test]
    fn save_format() {
        let mut store = GlyphStore::new();
        store.set_glyph(0, Glyph::from_packed(0b101));

        let text = store.save_to();
        let lines: Vec<&str> = text.split('\n').collect();

        assert_eq!(lines.len(), GLYPH_COUNT);
        assert!(lines.iter().all(|l| l.len() == SEGMENT_COUNT));
        assert_eq!(lines[0], "1010000000000000");
        assert_eq!(lines[1], "1111111111111111");
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn load_inverts_save() {
        let mut store = GlyphStore::new();

        for code in 0..=u8::MAX {
            let packed = u16::from(code).wrapping_mul(257) ^ 0x5A3C;
            store.set_glyph(code, Glyph::from_packed(packed));
        }

        assert_eq!(GlyphStore::parse(&store.save_to()), store);
    }

    #[test]
    fn short_lines_keep_defaults() {
        let store = GlyphStore::parse("0\n00x");

        assert_eq!(store.packed_value(0), 0xFFFE);
        // `x` is not `1`, so it reads as off.
        assert_eq!(store.packed_value(1), 0xFFF8);
        assert_eq!(store.packed_value(2), 0xFFFF);
        assert_eq!(store.packed_value(255), 0xFFFF);
    }

    #[test]
    fn empty_text_is_default() {
        assert_eq!(GlyphStore::parse(""), GlyphStore::new());
    }

    #[test]
    fn crlf_and_overlong_input() {
        let store = GlyphStore::parse("00000000000000001111\r\n0000000000000000\r\n");

        assert_eq!(store.packed_value(0), 0x0000);
        assert_eq!(store.packed_value(1), 0x0000);
        assert_eq!(store.packed_value(2), 0xFFFF);
    }

    #[test]
    fn carriage_return_reads_as_off() {
        let store = GlyphStore::parse("0101\r\n");

        assert!(!store.glyph(0).is_on(4));
        assert_eq!(store.packed_value(0), 0xFFEA);
        assert_eq!(store.packed_value(1), 0xFFFF);
    }
}
