//! Lookup-table text for pasting into firmware sources.

use std::fmt::Write;

use crate::glyph::GlyphStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// `0xABCD` per line.
    Hex,
    /// `0xABCD,  # c` per line, for Python-style sources.
    HashComment,
    /// `0xABCD,  // c` per line, for C-style sources.
    SlashComment,
}

impl ExportFormat {
    pub fn render(self, store: &GlyphStore) -> String {
        match self {
            ExportFormat::Hex => hex_only(store),
            ExportFormat::HashComment => hex_with_hash_comment(store),
            ExportFormat::SlashComment => hex_with_slash_comment(store),
        }
    }
}

pub fn hex_only(store: &GlyphStore) -> String {
    let mut out = String::new();

    for (code, glyph) in store.iter() {
        if code > 0 {
            out.push('\n');
        }
        let _ = write!(out, "0x{:04X}", glyph.packed());
    }

    out
}

pub fn hex_with_hash_comment(store: &GlyphStore) -> String {
    commented(store, "#")
}

pub fn hex_with_slash_comment(store: &GlyphStore) -> String {
    commented(store, "//")
}

/// Character shown in a comment for `code`; control codes show as a space.
pub fn printable(code: u8) -> char {
    char::from(code.max(b' '))
}

/// The last separator comma becomes a space so the final entry closes the
/// literal list cleanly.
fn commented(store: &GlyphStore, marker: &str) -> String {
    let mut out = String::new();

    for (code, glyph) in store.iter() {
        if code > 0 {
            out.push('\n');
        }
        let _ = write!(out, "0x{:04X},  {marker} {}", glyph.packed(), printable(code));
    }

    if let Some(last) = out.rfind(',') {
        out.replace_range(last..=last, " ");
    }

    out
}
