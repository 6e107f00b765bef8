//! System font discovery and installation into egui
//!
//! egui ships only its bundled fonts, so families are discovered by scanning
//! the usual font directories. A family is named after its file stem
//! (`DejaVuSans-Bold.ttf` → `DejaVuSans-Bold`).

use eframe::egui::{self, FontData, FontDefinitions, FontFamily};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const FONT_EXTENSIONS: &[&str] = &["ttf", "otf"];
const MAX_SCAN_DEPTH: usize = 6;

#[derive(Debug, Default, Clone)]
pub struct FontCatalog {
    families: BTreeMap<String, PathBuf>,
}

impl FontCatalog {
    /// Scan the platform font directories
    pub fn scan() -> Self {
        let mut roots = vec![
            PathBuf::from("/usr/share/fonts"),
            PathBuf::from("/usr/local/share/fonts"),
        ];
        if let Some(dir) = dirs::font_dir() {
            roots.push(dir);
        }
        if let Some(home) = dirs::home_dir() {
            roots.push(home.join(".fonts"));
        }
        let catalog = Self::scan_dirs(&roots);
        info!(families = catalog.families.len(), "Discovered system fonts");
        catalog
    }

    pub fn scan_dirs(dirs: &[PathBuf]) -> Self {
        let mut families = BTreeMap::new();
        for dir in dirs {
            collect_fonts(dir, 0, &mut families);
        }
        Self { families }
    }

    /// Family names, sorted
    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.families.keys().map(String::as_str)
    }

    pub fn contains(&self, family: &str) -> bool {
        self.families.contains_key(family)
    }

    pub fn path(&self, family: &str) -> Option<&Path> {
        self.families.get(family).map(PathBuf::as_path)
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}

fn collect_fonts(dir: &Path, depth: usize, out: &mut BTreeMap<String, PathBuf>) {
    if depth > MAX_SCAN_DEPTH {
        return;
    }
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_fonts(&path, depth + 1, out);
        } else if let Some(family) = family_name(&path) {
            // First match wins
            out.entry(family).or_insert(path);
        }
    }
}

fn family_name(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    if !FONT_EXTENSIONS.contains(&ext.as_str()) {
        return None;
    }
    path.file_stem()?.to_str().map(str::to_string)
}

/// Install `family` as a named egui font and return the family to render
/// with. Unknown or unreadable families fall back to the proportional font.
pub fn install(ctx: &egui::Context, catalog: &FontCatalog, family: &str) -> FontFamily {
    let mut defs = FontDefinitions::default();

    let installed = catalog.path(family).and_then(|path| {
        fs::read(path)
            .inspect_err(|e| warn!(family, path = %path.display(), error = %e, "Failed to read font"))
            .ok()
    });

    let Some(bytes) = installed else {
        debug!(family, "Font family not available, using default proportional font");
        ctx.set_fonts(defs);
        return FontFamily::Proportional;
    };

    defs.font_data
        .insert(family.to_string(), FontData::from_owned(bytes).into());
    // Keep the bundled fonts behind it for glyphs the family lacks
    let mut chain = vec![family.to_string()];
    chain.extend(
        defs.families
            .get(&FontFamily::Proportional)
            .cloned()
            .unwrap_or_default(),
    );
    let named = FontFamily::Name(family.into());
    defs.families.insert(named.clone(), chain);
    ctx.set_fonts(defs);

    info!(family, "Installed button font");
    named
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_scan_dirs_finds_nested_fonts_only() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("truetype").join("dejavu");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("Arial.ttf"), b"").unwrap();
        fs::write(nested.join("DejaVuSans-Bold.OTF"), b"").unwrap();
        fs::write(nested.join("fonts.dir"), b"").unwrap();

        let catalog = FontCatalog::scan_dirs(&[dir.path().to_path_buf()]);
        let families: Vec<&str> = catalog.families().collect();
        assert_eq!(families, vec!["Arial", "DejaVuSans-Bold"]);
        assert!(catalog.contains("Arial"));
        assert_eq!(catalog.path("DejaVuSans-Bold"), Some(nested.join("DejaVuSans-Bold.OTF").as_path()));
    }

    #[test]
    fn test_scan_missing_dir_is_empty() {
        let catalog = FontCatalog::scan_dirs(&[PathBuf::from("/nonexistent/fonts")]);
        assert!(catalog.is_empty());
    }
}
