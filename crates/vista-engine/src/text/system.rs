use super::{FontId, FontSystem};

/// Regular sans-serif fonts tried in order by [`load_system_font`].
pub const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Loads the first readable and parsable candidate font.
pub fn load_system_font(fonts: &mut FontSystem) -> Option<FontId> {
    SYSTEM_FONT_CANDIDATES.iter().find_map(|path| {
        let bytes = std::fs::read(path).ok()?;
        match fonts.load_font(&bytes) {
            Ok(id) => {
                log::debug!("loaded font {path}");
                Some(id)
            }
            Err(err) => {
                log::warn!("{path}: {err}");
                None
            }
        }
    })
}
