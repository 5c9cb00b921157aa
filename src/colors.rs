//! Color values parsed from component tokens

use crate::tokens::Token;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    pub const TRANSPARENT: Rgba = Rgba {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };
}

impl From<csscolorparser::Color> for Rgba {
    fn from(color: csscolorparser::Color) -> Self {
        Self {
            r: color.r as f32,
            g: color.g as f32,
            b: color.b as f32,
            a: color.a as f32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", content = "rgba", rename_all = "kebab-case")]
pub enum Color {
    CurrentColor,
    Rgba(Rgba),
}

impl Color {
    pub const BLACK: Color = Color::Rgba(Rgba::BLACK);
    pub const TRANSPARENT: Color = Color::Rgba(Rgba::TRANSPARENT);
}

const COLOR_FUNCTIONS: &[&str] = &["rgb", "rgba", "hsl", "hsla", "hwb"];

/// Parses a color token: named colors, `#hex`, functional notations and
/// `currentColor`. Returns `None` for anything else.
pub fn parse_color(token: &Token) -> Option<Color> {
    match token {
        Token::Ident(name) => {
            let name = name.to_ascii_lowercase();
            if name == "currentcolor" {
                return Some(Color::CurrentColor);
            }
            // the color parser also accepts bare hex digits, which are not named colors
            if name.chars().all(|c| c.is_ascii_hexdigit()) {
                return None;
            }
            parse_str(&name)
        }
        Token::Hash(value) => {
            if !matches!(value.len(), 3 | 4 | 6 | 8) {
                return None;
            }
            parse_str(&format!("#{}", value))
        }
        Token::Function { name, .. } if COLOR_FUNCTIONS.contains(&name.as_str()) => {
            parse_str(&token.to_string())
        }
        _ => None,
    }
}

pub fn parse_color_str(css: &str) -> Option<Color> {
    let tokens = crate::tokens::remove_whitespace(&crate::tokens::tokenize(css));
    match tokens.as_slice() {
        [token] => parse_color(token),
        _ => None,
    }
}

fn parse_str(css: &str) -> Option<Color> {
    csscolorparser::parse(css)
        .ok()
        .map(|color| Color::Rgba(color.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_colors() {
        assert_eq!(
            parse_color(&Token::ident("red")),
            Some(Color::Rgba(Rgba {
                r: 1.0,
                g: 0.0,
                b: 0.0,
                a: 1.0
            }))
        );
        assert_eq!(parse_color(&Token::ident("currentColor")), Some(Color::CurrentColor));
        assert_eq!(parse_color(&Token::ident("transparent")), Some(Color::TRANSPARENT));
        assert_eq!(parse_color(&Token::ident("solid")), None);
        assert_eq!(parse_color(&Token::ident("fed")), None);
    }

    #[test]
    fn test_hash_and_functions() {
        assert_eq!(parse_color_str("#f00"), parse_color_str("red"));
        assert_eq!(parse_color_str("rgb(255, 0, 0)"), parse_color_str("red"));
        assert!(parse_color_str("#12345").is_none());
        assert!(parse_color_str("calc(1px)").is_none());
        match parse_color_str("rgba(0, 0, 255, 0.5)") {
            Some(Color::Rgba(rgba)) => assert!((rgba.a - 0.5).abs() < 1e-6),
            other => panic!("Expected rgba color, got {:?}", other),
        }
    }
}
