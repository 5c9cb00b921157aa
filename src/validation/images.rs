// FILE: src/validation/images.rs

use super::helpers::{get_angle, get_keyword, get_length, get_url, parse_position};
use crate::colors::{parse_color, Color};
use crate::core::values::{
    Center, ColorStop, Dimension, GradientDirection, GradientSize, Image, LinearGradient, Point,
    RadialGradient, Reference,
};
use crate::error::{Result, ValidationError};
use crate::tokens::{remove_whitespace, split_on_comma, Token};
use std::f32::consts::PI;

/// Parses an `<image>`: a url or a (repeating) linear or radial gradient.
///
/// `Ok(None)` means the token is not an image at all; malformed color stops
/// are reported as errors.
pub fn get_image(token: &Token, base_url: &str) -> Result<Option<Image>> {
    if let Some(reference) = get_url(token, base_url)? {
        return Ok(match reference {
            Reference::External(url) => Some(Image::Url { url }),
            _ => None,
        });
    }

    let (name, args) = match token {
        Token::Function { name, args } => (name.as_str(), args),
        _ => return Ok(None),
    };
    let arguments = split_on_comma(&remove_whitespace(args));
    match name {
        "linear-gradient" | "repeating-linear-gradient" => {
            let (direction, stops) = parse_linear_gradient_parameters(&arguments);
            if stops.is_empty() {
                return Ok(None);
            }
            Ok(Some(Image::LinearGradient(LinearGradient {
                stops: parse_color_stops(stops)?,
                direction,
                repeating: name == "repeating-linear-gradient",
            })))
        }
        "radial-gradient" | "repeating-radial-gradient" => {
            let parameters =
                parse_radial_gradient_parameters(&arguments).unwrap_or_else(|| RadialParameters {
                    shape: "ellipse".to_string(),
                    size: GradientSize::Keyword("farthest-corner".to_string()),
                    center: default_center(),
                    stops: &arguments,
                });
            if parameters.stops.is_empty() {
                return Ok(None);
            }
            Ok(Some(Image::RadialGradient(RadialGradient {
                stops: parse_color_stops(parameters.stops)?,
                shape: parameters.shape,
                size: parameters.size,
                center: parameters.center,
                repeating: name == "repeating-radial-gradient",
            })))
        }
        _ => Ok(None),
    }
}

fn default_center() -> Center {
    Center::top_left(Point(Dimension::percent(50.0), Dimension::percent(50.0)))
}

fn direction_keywords(keywords: &[Option<String>]) -> Option<GradientDirection> {
    let words: Vec<&str> = keywords.iter().map(|k| k.as_deref()).collect::<Option<_>>()?;
    let angle = |a: f32| Some(GradientDirection::Angle(a));
    let corner = |c: &str| Some(GradientDirection::Corner(c.to_string()));
    match words.as_slice() {
        ["to", "top"] => angle(0.0),
        ["to", "right"] => angle(PI / 2.0),
        ["to", "bottom"] => angle(PI),
        ["to", "left"] => angle(PI * 3.0 / 2.0),
        ["to", "top", "left"] | ["to", "left", "top"] => corner("top_left"),
        ["to", "top", "right"] | ["to", "right", "top"] => corner("top_right"),
        ["to", "bottom", "left"] | ["to", "left", "bottom"] => corner("bottom_left"),
        ["to", "bottom", "right"] | ["to", "right", "bottom"] => corner("bottom_right"),
        _ => None,
    }
}

fn parse_linear_gradient_parameters(arguments: &[Vec<Token>]) -> (GradientDirection, &[Vec<Token>]) {
    let first = &arguments[0];
    if let [single] = first.as_slice() {
        if let Some(angle) = get_angle(single) {
            return (GradientDirection::Angle(angle), &arguments[1..]);
        }
    } else {
        let keywords: Vec<Option<String>> = first.iter().map(get_keyword).collect();
        if let Some(direction) = direction_keywords(&keywords) {
            return (direction, &arguments[1..]);
        }
    }
    // "to bottom"
    (GradientDirection::Angle(PI), arguments)
}

struct RadialParameters<'a> {
    shape: String,
    size: GradientSize,
    center: Center,
    stops: &'a [Vec<Token>],
}

fn parse_radial_gradient_parameters(arguments: &[Vec<Token>]) -> Option<RadialParameters<'_>> {
    let mut shape: Option<String> = None;
    let mut size: Option<GradientSize> = None;
    let mut size_shape: Option<&str> = None;
    let mut position: Option<Center> = None;

    let first = &arguments[0];
    let mut i = 0;
    while i < first.len() {
        let token = &first[i];
        i += 1;
        let keyword = get_keyword(token);
        match keyword.as_deref() {
            Some("at") => {
                position = Some(parse_position(&first[i..])?);
                break;
            }
            Some(k @ ("circle" | "ellipse")) if shape.is_none() => shape = Some(k.to_string()),
            Some(k @ ("closest-corner" | "farthest-corner" | "closest-side" | "farthest-side"))
                if size.is_none() =>
            {
                size = Some(GradientSize::Keyword(k.to_string()))
            }
            _ => {
                if size.is_none() && i < first.len() {
                    let length1 = get_length(token, true, true);
                    let length2 = get_length(&first[i], true, true);
                    if let (Some(l1), Some(l2)) = (length1, length2) {
                        size = Some(GradientSize::Explicit(Point(l1, l2)));
                        size_shape = Some("ellipse");
                        i += 1;
                    }
                }
                if size.is_none() {
                    let length = get_length(token, true, false)?;
                    size = Some(GradientSize::Explicit(Point(length, length)));
                    size_shape = Some("circle");
                }
            }
        }
    }

    if shape.as_deref() == Some("circle") && size_shape == Some("ellipse") {
        return None;
    }
    Some(RadialParameters {
        shape: shape
            .or_else(|| size_shape.map(str::to_string))
            .unwrap_or_else(|| "ellipse".to_string()),
        size: size.unwrap_or_else(|| GradientSize::Keyword("farthest-corner".to_string())),
        center: position.unwrap_or_else(default_center),
        stops: &arguments[1..],
    })
}

fn parse_color_stops(stops: &[Vec<Token>]) -> Result<Vec<ColorStop>> {
    stops.iter().map(|stop| parse_color_stop(stop)).collect()
}

fn parse_color_stop(tokens: &[Token]) -> Result<ColorStop> {
    match tokens {
        [color] => match parse_color(color) {
            Some(Color::CurrentColor) => Ok(ColorStop {
                color: Color::BLACK,
                position: None,
            }),
            Some(color) => Ok(ColorStop {
                color,
                position: None,
            }),
            None => Err(ValidationError::InvalidValue),
        },
        [color, position] => match (parse_color(color), get_length(position, true, true)) {
            (Some(color), Some(position)) => Ok(ColorStop {
                color,
                position: Some(position),
            }),
            _ => Err(ValidationError::InvalidValue),
        },
        _ => Err(ValidationError::InvalidValue),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::units::Unit;
    use crate::tokens::tokenize;

    fn image(css: &str) -> Result<Option<Image>> {
        let tokens = remove_whitespace(&tokenize(css));
        get_image(&tokens[0], "https://example.org/doc/")
    }

    #[test]
    fn test_url_image() {
        assert_eq!(
            image("url(a.png)").unwrap(),
            Some(Image::Url {
                url: "https://example.org/doc/a.png".to_string()
            })
        );
        assert_eq!(image("url(#frag)").unwrap(), None);
        assert_eq!(image("none").unwrap(), None);
    }

    #[test]
    fn test_linear_gradient() {
        match image("linear-gradient(to right top, red, blue 20%)").unwrap() {
            Some(Image::LinearGradient(gradient)) => {
                assert_eq!(gradient.direction, GradientDirection::Corner("top_right".to_string()));
                assert_eq!(gradient.stops.len(), 2);
                assert_eq!(gradient.stops[1].position, Some(Dimension::percent(20.0)));
                assert!(!gradient.repeating);
            }
            other => panic!("Expected linear gradient, got {:?}", other),
        }
        match image("repeating-linear-gradient(red, currentColor)").unwrap() {
            Some(Image::LinearGradient(gradient)) => {
                assert_eq!(gradient.direction, GradientDirection::Angle(PI));
                assert_eq!(gradient.stops[1].color, Color::BLACK);
                assert!(gradient.repeating);
            }
            other => panic!("Expected linear gradient, got {:?}", other),
        }
        assert!(image("linear-gradient(red, nocolor)").is_err());
        assert_eq!(image("linear-gradient(90deg)").unwrap(), None);
    }

    #[test]
    fn test_radial_gradient() {
        match image("radial-gradient(circle 10px at left top, red, blue)").unwrap() {
            Some(Image::RadialGradient(gradient)) => {
                assert_eq!(gradient.shape, "circle");
                assert_eq!(
                    gradient.size,
                    GradientSize::Explicit(Point(Dimension::px(10.0), Dimension::px(10.0)))
                );
                assert_eq!(
                    gradient.center.pos,
                    Point(Dimension::percent(0.0), Dimension::percent(0.0))
                );
            }
            other => panic!("Expected radial gradient, got {:?}", other),
        }
        match image("radial-gradient(10px 20%, red, blue)").unwrap() {
            Some(Image::RadialGradient(gradient)) => {
                assert_eq!(gradient.shape, "ellipse");
                assert_eq!(
                    gradient.size,
                    GradientSize::Explicit(Point(
                        Dimension::new(10.0, Unit::Px),
                        Dimension::percent(20.0)
                    ))
                );
            }
            other => panic!("Expected radial gradient, got {:?}", other),
        }
        // no shape or size: every argument is a color stop
        match image("radial-gradient(red, blue)").unwrap() {
            Some(Image::RadialGradient(gradient)) => {
                assert_eq!(gradient.stops.len(), 2);
                assert_eq!(gradient.size, GradientSize::Keyword("farthest-corner".to_string()));
            }
            other => panic!("Expected radial gradient, got {:?}", other),
        }
        // circle with an ellipse size falls back to treating it as a stop
        assert!(image("radial-gradient(circle 10px 20px, red)").is_err());
    }
}
