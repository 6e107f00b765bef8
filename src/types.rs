//! Domain types for type safety and clarity

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Physical screen rectangle of one monitor
/// Also the persisted shape of `fullscreen_monitor`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonitorRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl MonitorRect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Half-open containment: the right and bottom edges belong to the neighbour
    pub fn contains(&self, px: i32, py: i32) -> bool {
        let right = self.x as i64 + self.width as i64;
        let bottom = self.y as i64 + self.height as i64;
        px >= self.x && (px as i64) < right && py >= self.y && (py as i64) < bottom
    }
}

/// Windowed size and position, persisted as `WxH+X+Y`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WindowGeometry {
    pub width: u32,
    pub height: u32,
    pub x: i32,
    pub y: i32,
}

impl WindowGeometry {
    pub fn new(width: u32, height: u32, x: i32, y: i32) -> Self {
        Self { width, height, x, y }
    }
}

impl Default for WindowGeometry {
    fn default() -> Self {
        Self::new(600, 600, 100, 100)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid window geometry '{0}', expected WIDTHxHEIGHT+X+Y")]
pub struct GeometryParseError(String);

impl FromStr for WindowGeometry {
    type Err = GeometryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || GeometryParseError(s.to_string());
        let s = s.trim();

        let (width, rest) = s.split_once('x').ok_or_else(err)?;
        // Offsets start at the first sign after the height
        let offset_at = rest.find(['+', '-']).ok_or_else(err)?;
        let (height, offsets) = rest.split_at(offset_at);
        let (x, y) = split_offsets(offsets).ok_or_else(err)?;

        Ok(Self {
            width: width.parse().map_err(|_| err())?,
            height: height.parse().map_err(|_| err())?,
            x,
            y,
        })
    }
}

/// Split `+X+Y`, `+-X+-Y` or `-X-Y` into two signed offsets
fn split_offsets(s: &str) -> Option<(i32, i32)> {
    let (x, rest) = parse_offset(s)?;
    let (y, rest) = parse_offset(rest)?;
    rest.is_empty().then_some((x, y))
}

fn parse_offset(s: &str) -> Option<(i32, &str)> {
    let (negative, s) = if let Some(r) = s.strip_prefix("+-") {
        (true, r)
    } else if let Some(r) = s.strip_prefix('+') {
        (false, r)
    } else if let Some(r) = s.strip_prefix('-') {
        (true, r)
    } else {
        return None;
    };

    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let value: i32 = s[..end].parse().ok()?;
    Some((if negative { -value } else { value }, &s[end..]))
}

impl fmt::Display for WindowGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

impl TryFrom<String> for WindowGeometry {
    type Error = GeometryParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WindowGeometry> for String {
    fn from(geometry: WindowGeometry) -> Self {
        geometry.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monitor_contains_half_open() {
        let m = MonitorRect::new(1920, 0, 1280, 1024);
        assert!(m.contains(1920, 0));
        assert!(m.contains(3199, 1023));
        assert!(!m.contains(3200, 10));
        assert!(!m.contains(1919, 10));
        assert!(!m.contains(2000, 1024));
    }

    #[test]
    fn test_monitor_contains_negative_origin() {
        let m = MonitorRect::new(-1280, -200, 1280, 1024);
        assert!(m.contains(-1, -200));
        assert!(!m.contains(0, 0));
    }

    #[test]
    fn test_geometry_parse_default_form() {
        let g: WindowGeometry = "600x600+100+100".parse().unwrap();
        assert_eq!(g, WindowGeometry::default());
    }

    #[test]
    fn test_geometry_parse_negative_offsets() {
        let g: WindowGeometry = "800x450+-1270+-5".parse().unwrap();
        assert_eq!(g, WindowGeometry::new(800, 450, -1270, -5));

        let g: WindowGeometry = "800x450-10-20".parse().unwrap();
        assert_eq!((g.x, g.y), (-10, -20));
    }

    #[test]
    fn test_geometry_parse_rejects_malformed() {
        assert!("600x600".parse::<WindowGeometry>().is_err());
        assert!("600+100+100".parse::<WindowGeometry>().is_err());
        assert!("axb+1+2".parse::<WindowGeometry>().is_err());
        assert!("600x600+1+2+3".parse::<WindowGeometry>().is_err());
    }

    #[test]
    fn test_geometry_display_matches_persisted_form() {
        assert_eq!(WindowGeometry::new(1024, 768, -5, 40).to_string(), "1024x768+-5+40");
    }

    #[test]
    fn test_geometry_serde_as_string() {
        let json = serde_json::to_string(&WindowGeometry::default()).unwrap();
        assert_eq!(json, "\"600x600+100+100\"");
        let back: WindowGeometry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, WindowGeometry::default());
    }
}
