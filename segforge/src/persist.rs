use std::io;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::glyph::GlyphStore;

/// A missing file yields the default store.
pub fn load(path: &Path) -> Result<GlyphStore> {
    match std::fs::read_to_string(path) {
        Ok(text) => {
            info!(path = %path.display(), "loaded glyph table");
            Ok(GlyphStore::parse(&text))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no glyph table yet, using defaults");
            Ok(GlyphStore::new())
        }
        Err(e) => Err(Error::io(path, e)),
    }
}

pub fn save(path: &Path, store: &GlyphStore) -> Result<()> {
    std::fs::write(path, store.save_to()).map_err(|e| Error::io(path, e))?;
    info!(path = %path.display(), "saved glyph table");
    Ok(())
}
