use serde::{Deserialize, Serialize};

/// An opaque RGB color.
///
/// The palette constants are the web colors of the coaching material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Base-layer and outline ink (`#000000`).
    pub const INK: Color = Color::new(0, 0, 0);
    /// Marker label text (`#ffffff`).
    pub const WHITE: Color = Color::new(255, 255, 255);
    /// Default player fill (`#007bff`).
    pub const BLUE: Color = Color::new(0, 123, 255);
    /// Default arrow stroke (`#dc3545`).
    pub const RED: Color = Color::new(220, 53, 69);
    /// Default path stroke (`#28a745`).
    pub const GREEN: Color = Color::new(40, 167, 69);
    /// Cone fill (`#ffc107`).
    pub const AMBER: Color = Color::new(255, 193, 7);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a `#rrggbb` hex string.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::INK
    }
}

/// Line rendering mode for paths and outlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
}

impl LineStyle {
    /// Dash pattern as (on, off) lengths, or `None` for a solid line.
    pub fn dash_pattern(&self) -> Option<[f64; 2]> {
        match self {
            LineStyle::Solid => None,
            LineStyle::Dashed => Some([5.0, 5.0]),
            LineStyle::Dotted => Some([2.0, 2.0]),
        }
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        LineStyle::Solid
    }
}

/// The complete stroke description handed to a surface for one draw call.
///
/// Surfaces hold no stroke state between calls; a dashed stroke in one call
/// cannot leak into the next.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f64,
    pub line_style: LineStyle,
}

impl StrokeStyle {
    pub fn solid(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            line_style: LineStyle::Solid,
        }
    }

    pub fn with_line_style(mut self, line_style: LineStyle) -> Self {
        self.line_style = line_style;
        self
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        StrokeStyle::solid(Color::INK, 2.0)
    }
}

/// Appearance of a player marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStyle {
    /// Fill color, default `#007bff`.
    pub color: Color,
    /// Circle radius, default 12.
    pub size: f64,
    /// Short text centered just below the circle center.
    pub label: Option<String>,
    /// Jersey number, drawn below the label in a smaller size.
    pub number: Option<u32>,
}

impl PlayerStyle {
    pub fn labeled(label: &str) -> Self {
        Self {
            label: Some(label.to_string()),
            ..Self::default()
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn with_number(mut self, number: u32) -> Self {
        self.number = Some(number);
        self
    }
}

impl Default for PlayerStyle {
    fn default() -> Self {
        Self {
            color: Color::BLUE,
            size: 12.0,
            label: None,
            number: None,
        }
    }
}

/// Appearance of a movement arrow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrowStyle {
    /// Stroke color, default `#dc3545`.
    pub color: Color,
    /// Stroke width, default 2.
    pub width: f64,
    /// Length of each arrowhead stroke, default 8.
    pub head_size: f64,
}

impl ArrowStyle {
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn with_head_size(mut self, head_size: f64) -> Self {
        self.head_size = head_size;
        self
    }
}

impl Default for ArrowStyle {
    fn default() -> Self {
        Self {
            color: Color::RED,
            width: 2.0,
            head_size: 8.0,
        }
    }
}

/// Appearance of a skating or passing path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathStyle {
    /// Stroke color, default `#28a745`.
    pub color: Color,
    /// Stroke width, default 2.
    pub width: f64,
    /// Solid, dashed (5 on / 5 off), or dotted (2 on / 2 off).
    pub line_style: LineStyle,
}

impl PathStyle {
    pub fn dashed() -> Self {
        Self {
            line_style: LineStyle::Dashed,
            ..Self::default()
        }
    }

    /// The stroke record this style resolves to for a single draw call.
    pub fn stroke(&self) -> StrokeStyle {
        StrokeStyle {
            color: self.color,
            width: self.width,
            line_style: self.line_style,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn with_line_style(mut self, line_style: LineStyle) -> Self {
        self.line_style = line_style;
        self
    }
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            color: Color::GREEN,
            width: 2.0,
            line_style: LineStyle::Solid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex_round_trip() {
        let c = Color::from_hex("#007bff").unwrap();
        assert_eq!(c, Color::BLUE);
        assert_eq!(c.to_hex(), "#007bff");
        assert!(Color::from_hex("007bff").is_none());
        assert!(Color::from_hex("#07bff").is_none());
    }

    #[test]
    fn test_line_style_dash_patterns() {
        assert!(LineStyle::Solid.dash_pattern().is_none());
        assert_eq!(LineStyle::Dashed.dash_pattern(), Some([5.0, 5.0]));
        assert_eq!(LineStyle::Dotted.dash_pattern(), Some([2.0, 2.0]));
    }

    #[test]
    fn test_player_style_defaults() {
        let style = PlayerStyle::default();
        assert_eq!(style.color, Color::BLUE);
        assert!((style.size - 12.0).abs() < 1e-10);
        assert!(style.label.is_none());
        assert!(style.number.is_none());
    }

    #[test]
    fn test_style_deserialize_fills_defaults() {
        let style: PlayerStyle = serde_json::from_str(r#"{"label": "P1"}"#).unwrap();
        assert_eq!(style.label.as_deref(), Some("P1"));
        assert_eq!(style.color, Color::BLUE);
        assert!((style.size - 12.0).abs() < 1e-10);

        let arrow: ArrowStyle = serde_json::from_str("{}").unwrap();
        assert!((arrow.head_size - 8.0).abs() < 1e-10);
        assert_eq!(arrow.color, Color::RED);
    }
}
