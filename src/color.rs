//! Hex color handling for the persisted `#RRGGBB` strings

use eframe::egui::Color32;

/// Color parsed from a settings string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexColor {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl HexColor {
    /// Parse `#RRGGBB` or `#AARRGGBB`; the `#` is optional
    pub fn parse(hex: &str) -> Option<Self> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }

        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            6 => Some(Self {
                r: byte(0)?,
                g: byte(2)?,
                b: byte(4)?,
                a: 0xFF,
            }),
            8 => Some(Self {
                a: byte(0)?,
                r: byte(2)?,
                g: byte(4)?,
                b: byte(6)?,
            }),
            _ => None,
        }
    }

    /// `Color32` stores premultiplied alpha; settings hold the straight value
    pub fn from_color32(color: Color32) -> Self {
        let [r, g, b, a] = color.to_srgba_unmultiplied();
        Self { r, g, b, a }
    }

    pub fn to_color32(self) -> Color32 {
        Color32::from_rgba_unmultiplied(self.r, self.g, self.b, self.a)
    }

    /// Opaque colors use the short form, anything else keeps its alpha
    pub fn to_hex_string(self) -> String {
        if self.a == 0xFF {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.a, self.r, self.g, self.b)
        }
    }
}

/// Parse a settings color, falling back when the stored string is garbage
pub fn color32_or(hex: &str, fallback: &str) -> Color32 {
    HexColor::parse(hex)
        .or_else(|| HexColor::parse(fallback))
        .map(HexColor::to_color32)
        .unwrap_or(Color32::BLACK)
}
