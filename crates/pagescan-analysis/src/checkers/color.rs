//! CSS color parsing and WCAG contrast math.
//!
//! Supports the forms the style snapshot actually carries: `#rgb`,
//! `#rrggbb`, `#rrggbbaa`, `rgb()`/`rgba()`, and a handful of keywords.
//! Parsing is total; anything else yields `None` and the caller treats the
//! contrast as unverifiable.

use once_cell::sync::Lazy;
use regex::Regex;

/// sRGB color with alpha, components in 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

static RGB_FN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(?:,\s*([0-9.]+)\s*)?\)$")
        .expect("static regex")
});

/// Parse a CSS color string.
pub fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim().to_ascii_lowercase();
    match value.as_str() {
        "transparent" => return Some(Color { r: 0.0, g: 0.0, b: 0.0, a: 0.0 }),
        "black" => return Some(rgb(0, 0, 0)),
        "white" => return Some(rgb(255, 255, 255)),
        "red" => return Some(rgb(255, 0, 0)),
        "green" => return Some(rgb(0, 128, 0)),
        "blue" => return Some(rgb(0, 0, 255)),
        "gray" | "grey" => return Some(rgb(128, 128, 128)),
        _ => {}
    }

    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }

    let captures = RGB_FN.captures(&value)?;
    let r: u16 = captures[1].parse().ok()?;
    let g: u16 = captures[2].parse().ok()?;
    let b: u16 = captures[3].parse().ok()?;
    if r > 255 || g > 255 || b > 255 {
        return None;
    }
    let a = match captures.get(4) {
        Some(m) => m.as_str().parse::<f64>().ok()?.clamp(0.0, 1.0),
        None => 1.0,
    };
    Some(Color {
        r: r as f64 / 255.0,
        g: g as f64 / 255.0,
        b: b as f64 / 255.0,
        a,
    })
}

fn parse_hex(hex: &str) -> Option<Color> {
    let expand = |c: char| -> Option<u8> {
        let d = c.to_digit(16)? as u8;
        Some(d * 16 + d)
    };
    match hex.len() {
        3 => {
            let mut chars = hex.chars();
            let r = expand(chars.next()?)?;
            let g = expand(chars.next()?)?;
            let b = expand(chars.next()?)?;
            Some(rgb(r, g, b))
        }
        6 | 8 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            let a = if hex.len() == 8 {
                u8::from_str_radix(&hex[6..8], 16).ok()? as f64 / 255.0
            } else {
                1.0
            };
            let mut color = rgb(r, g, b);
            color.a = a;
            Some(color)
        }
        _ => None,
    }
}

fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color {
        r: r as f64 / 255.0,
        g: g as f64 / 255.0,
        b: b as f64 / 255.0,
        a: 1.0,
    }
}

/// WCAG relative luminance of an sRGB color.
pub fn relative_luminance(color: Color) -> f64 {
    let channel = |c: f64| {
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    0.2126 * channel(color.r) + 0.7152 * channel(color.g) + 0.0722 * channel(color.b)
}

/// WCAG contrast ratio between two colors, in 1.0..=21.0.
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}
