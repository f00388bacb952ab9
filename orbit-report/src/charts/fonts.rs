//! Font registration for chart text
//!
//! plotters draws text through a process-wide font registry. A TrueType file
//! is registered once per family name during setup; renderers only ask
//! whether a family is available and skip text when it is not.

use crate::config::ChartStyle;
use crate::types::{ReportError, Result};
use once_cell::sync::Lazy;
use plotters::style::FontStyle;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Common locations of a sans-serif TrueType font
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static REGISTERED: Lazy<Mutex<HashSet<String>>> = Lazy::new(|| Mutex::new(HashSet::new()));

/// Whether text in `family` can be drawn
pub fn is_registered(family: &str) -> bool {
    REGISTERED
        .lock()
        .map(|set| set.contains(family))
        .unwrap_or(false)
}

/// Font file to use for `style`: the configured path, else the first system font found
pub fn locate_font(style: &ChartStyle) -> Option<PathBuf> {
    if let Some(path) = &style.font_path {
        return Some(path.clone());
    }
    SYSTEM_FONTS
        .iter()
        .map(Path::new)
        .find(|p| p.is_file())
        .map(Path::to_path_buf)
}

/// Register the font for `style.font_family`
///
/// Returns `Ok(true)` when text can be drawn, `Ok(false)` when text is
/// disabled or no font was found. A configured font path that cannot be read
/// or parsed is an error.
pub fn register(style: &ChartStyle) -> Result<bool> {
    if !style.draw_text {
        return Ok(false);
    }
    if is_registered(&style.font_family) {
        return Ok(true);
    }

    let path = match locate_font(style) {
        Some(path) => path,
        None => return Ok(false),
    };

    let bytes = std::fs::read(&path)
        .map_err(|e| ReportError::Font(format!("{}: {}", path.display(), e)))?;

    let mut registered = REGISTERED
        .lock()
        .map_err(|_| ReportError::Font("font registry poisoned".into()))?;
    if registered.contains(&style.font_family) {
        return Ok(true);
    }

    // The registry keeps the bytes for the rest of the process.
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    plotters::style::register_font(&style.font_family, FontStyle::Normal, bytes)
        .map_err(|_| ReportError::Font(format!("{}: not a usable TrueType font", path.display())))?;
    registered.insert(style.font_family.clone());

    log::debug!("Registered font '{}' from {:?}", style.font_family, path);
    Ok(true)
}

/// Style with text turned off when no font could be registered
pub fn resolve_style(style: &ChartStyle) -> Result<ChartStyle> {
    let mut resolved = style.clone();
    if style.draw_text && !register(style)? {
        log::warn!("No TrueType font found; charts will be rendered without text");
        resolved.draw_text = false;
    }
    Ok(resolved)
}
