// FILE: src/validation/helpers.rs

use crate::core::units::{resolution_to_dppx, Unit};
use crate::core::values::{AttrData, AttrFallback, Center, Dimension, Point, Reference};
use crate::error::{Result, ValidationError};
use crate::tokens::{parse_function, remove_whitespace, split_on_comma, Token};

const ZERO_PERCENT: Dimension = Dimension::percent(0.0);
const FIFTY_PERCENT: Dimension = Dimension::percent(50.0);
const HUNDRED_PERCENT: Dimension = Dimension::percent(100.0);

/// Lowercase name of an identifier token.
pub fn get_keyword(token: &Token) -> Option<String> {
    token.keyword()
}

pub fn get_single_keyword(tokens: &[Token]) -> Option<String> {
    match tokens {
        [token] => get_keyword(token),
        _ => None,
    }
}

/// The single keyword of `tokens`, if it is one of `allowed`.
pub fn single_keyword(tokens: &[Token], allowed: &[&str]) -> Option<String> {
    get_single_keyword(tokens).filter(|k| allowed.contains(&k.as_str()))
}

pub fn keyword_in(token: &Token, allowed: &[&str]) -> Option<String> {
    get_keyword(token).filter(|k| allowed.contains(&k.as_str()))
}

/// Identifier value with its original case.
pub fn get_custom_ident(token: &Token) -> Option<String> {
    token.as_ident().map(str::to_string)
}

/// Parses a `<length>`, and a `<percentage>` when allowed. A unitless zero is
/// always accepted.
pub fn get_length(token: &Token, negative: bool, percentage: bool) -> Option<Dimension> {
    match token {
        Token::Percentage(n) if percentage && (negative || n.value >= 0.0) => {
            Some(Dimension::percent(n.value))
        }
        Token::Dimension { value, unit } if negative || value.value >= 0.0 => {
            Unit::length(unit).map(|unit| Dimension::new(value.value, unit))
        }
        Token::Number(n) if n.value == 0.0 => Some(Dimension::scalar(0.0)),
        _ => None,
    }
}

/// Value in radians of an `<angle>` token.
pub fn get_angle(token: &Token) -> Option<f32> {
    match token {
        Token::Dimension { value, unit } => Unit::angle(unit)
            .and_then(Unit::to_radians)
            .map(|factor| value.value * factor),
        _ => None,
    }
}

/// Value in dppx of a `<resolution>` token.
pub fn get_resolution(token: &Token) -> Option<f32> {
    match token {
        Token::Dimension { value, unit } => resolution_to_dppx(unit).map(|f| value.value * f),
        _ => None,
    }
}

/// Applies `parse` to each comma-separated part; any failing part fails the list.
pub fn comma_separated_list<T>(
    tokens: &[Token],
    mut parse: impl FnMut(&[Token]) -> Option<T>,
) -> Option<Vec<T>> {
    split_on_comma(tokens)
        .iter()
        .map(|part| parse(&remove_whitespace(part)))
        .collect()
}

/// Drops optional commas between tokens. Leading, trailing or doubled
/// commas are invalid.
pub fn split_on_optional_comma(tokens: &[Token]) -> Option<Vec<Token>> {
    let mut out = Vec::new();
    for part in split_on_comma(tokens) {
        if part.is_empty() {
            return None;
        }
        out.extend(part);
    }
    Some(out)
}

fn position_percentage(keyword: &str) -> Option<Dimension> {
    match keyword {
        "top" | "left" => Some(ZERO_PERCENT),
        "center" => Some(FIFTY_PERCENT),
        "bottom" | "right" => Some(HUNDRED_PERCENT),
        _ => None,
    }
}

fn is_one_of(keyword: &Option<String>, allowed: &[&str]) -> bool {
    keyword.as_deref().map_or(false, |k| allowed.contains(&k))
}

/// Parses a one or two token position into (horizontal, vertical).
pub fn parse_2d_position(tokens: &[Token]) -> Option<Point> {
    let center = Token::ident("center");
    let (token1, token2) = match tokens {
        [single] => (single, &center),
        [first, second] => (first, second),
        _ => return None,
    };

    let length1 = get_length(token1, true, true);
    let length2 = get_length(token2, true, true);
    if let (Some(l1), Some(l2)) = (length1, length2) {
        return Some(Point(l1, l2));
    }
    let keyword1 = get_keyword(token1);
    let keyword2 = get_keyword(token2);
    const HORIZONTAL: &[&str] = &["left", "center", "right"];
    const VERTICAL: &[&str] = &["top", "center", "bottom"];

    let percent = |k: &Option<String>| k.as_deref().and_then(position_percentage);
    if let (Some(l1), true) = (length1, is_one_of(&keyword2, VERTICAL)) {
        return Some(Point(l1, percent(&keyword2)?));
    }
    if let (Some(l2), true) = (length2, is_one_of(&keyword1, HORIZONTAL)) {
        return Some(Point(percent(&keyword1)?, l2));
    }
    if is_one_of(&keyword1, HORIZONTAL) && is_one_of(&keyword2, VERTICAL) {
        return Some(Point(percent(&keyword1)?, percent(&keyword2)?));
    }
    if is_one_of(&keyword1, VERTICAL) && is_one_of(&keyword2, HORIZONTAL) {
        // stored in (horizontal, vertical) order
        return Some(Point(percent(&keyword2)?, percent(&keyword1)?));
    }
    None
}

fn center(origin_x: &str, origin_y: &str, x: Dimension, y: Dimension) -> Center {
    Center {
        origin_x: origin_x.to_string(),
        origin_y: origin_y.to_string(),
        pos: Point(x, y),
    }
}

/// Parses `background-position` and `object-position` values, with the
/// optional edge offsets of the 3 and 4 token forms.
pub fn parse_position(tokens: &[Token]) -> Option<Center> {
    if let Some(point) = parse_2d_position(tokens) {
        return Some(Center::top_left(point));
    }

    match tokens {
        [t1, t2, t3, t4] => {
            let keyword1 = get_keyword(t1);
            let keyword2 = get_keyword(t3);
            let length1 = get_length(t2, true, true)?;
            let length2 = get_length(t4, true, true)?;
            let (k1, k2) = (keyword1?, keyword2?);
            match (k1.as_str(), k2.as_str()) {
                ("left" | "right", "top" | "bottom") => Some(center(&k1, &k2, length1, length2)),
                ("top" | "bottom", "left" | "right") => Some(center(&k2, &k1, length2, length1)),
                _ => None,
            }
        }
        [t1, t2, t3] => {
            let (length, keyword, other) = match get_length(t3, true, true) {
                Some(length) => (length, get_keyword(t2), get_keyword(t1)),
                None => (get_length(t2, true, true)?, get_keyword(t1), get_keyword(t3)),
            };
            let keyword = keyword?;
            let other = other?;
            match (other.as_str(), keyword.as_str()) {
                ("center", "top" | "bottom") => {
                    Some(center("left", &keyword, FIFTY_PERCENT, length))
                }
                ("center", "left" | "right") => {
                    Some(center(&keyword, "top", length, FIFTY_PERCENT))
                }
                ("top" | "bottom", "left" | "right") => {
                    Some(center(&keyword, &other, length, ZERO_PERCENT))
                }
                ("left" | "right", "top" | "bottom") => {
                    Some(center(&other, &keyword, ZERO_PERCENT, length))
                }
                _ => None,
            }
        }
        _ => None,
    }
}

/// Resolves `url` against `base_url`. Relative references need a base.
pub fn join_url(base_url: &str, url: &str) -> Result<String> {
    if let Ok(absolute) = url::Url::parse(url) {
        return Ok(absolute.to_string());
    }
    if base_url.is_empty() {
        return Err(ValidationError::invalid(format!(
            "Relative URI reference without a base URI: {}",
            url
        )));
    }
    url::Url::parse(base_url)
        .and_then(|base| base.join(url))
        .map(|joined| joined.to_string())
        .map_err(|e| ValidationError::invalid(format!("invalid url : {} ({})", url, e)))
}

fn url_reference(value: &str, base_url: &str) -> Result<Reference> {
    match value.strip_prefix('#') {
        Some(fragment) => Ok(Reference::Internal(fragment.to_string())),
        None => join_url(base_url, value).map(Reference::External),
    }
}

/// Parses `url(…)`, `url("…")` and `attr(<name> url)`.
pub fn get_url(token: &Token, base_url: &str) -> Result<Option<Reference>> {
    match token {
        Token::Url(value) => url_reference(value, base_url).map(Some),
        Token::Function { name, .. } if name == "attr" => Ok(check_attr_function(token, Some("url"))
            .map(|attr| Reference::Attr(attr.name))),
        Token::Function { name, .. } if name == "url" => match parse_function(token) {
            Some((_, args)) if matches!(args.len(), 1 | 2) => match &args[0] {
                Token::String(value) => url_reference(value, base_url).map(Some),
                _ => Ok(None),
            },
            _ => Ok(None),
        },
        _ => Ok(None),
    }
}

/// Default value used when an `attr()` is missing, per type or unit.
pub fn attr_fallback(type_or_unit: &str) -> Option<AttrFallback> {
    match type_or_unit {
        "string" => Some(AttrFallback::String(String::new())),
        "color" => Some(AttrFallback::String("currentcolor".to_string())),
        "url" => Some(AttrFallback::String("about:invalid".to_string())),
        "integer" | "number" | "%" => Some(AttrFallback::Dimension(Dimension::scalar(0.0))),
        unit => Unit::length(unit)
            .or_else(|| Unit::angle(unit))
            .map(|unit| AttrFallback::Dimension(Dimension::new(0.0, unit))),
    }
}

/// Parses `attr(<name> [<type-or-unit> [<fallback>]])`, restricted to
/// `allowed_type` when given.
pub fn check_attr_function(token: &Token, allowed_type: Option<&str>) -> Option<AttrData> {
    let (name, args) = parse_function(token)?;
    if name != "attr" || !(1..=3).contains(&args.len()) {
        return None;
    }
    let attr_name = args[0].as_ident()?.to_string();
    let (type_or_unit, fallback) = match args.get(1) {
        None => ("string".to_string(), AttrFallback::String(String::new())),
        Some(second) => {
            let type_or_unit = second.as_ident()?.to_string();
            let default = attr_fallback(&type_or_unit)?;
            let fallback = match args.get(2) {
                None => default,
                Some(Token::String(value)) => AttrFallback::String(value.clone()),
                Some(_) => return None,
            };
            (type_or_unit, fallback)
        }
    };
    match allowed_type {
        Some(allowed) if allowed != type_or_unit => None,
        _ => Some(AttrData {
            name: attr_name,
            type_or_unit,
            fallback,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::tokenize;
    use std::f32::consts::PI;

    fn tokens(css: &str) -> Vec<Token> {
        remove_whitespace(&tokenize(css))
    }

    #[test]
    fn test_get_length() {
        let t = tokens("-1em 20% 0 3 -5%");
        assert_eq!(get_length(&t[0], true, false), Some(Dimension::new(-1.0, Unit::Em)));
        assert_eq!(get_length(&t[0], false, false), None);
        assert_eq!(get_length(&t[1], false, false), None);
        assert_eq!(get_length(&t[1], false, true), Some(Dimension::percent(20.0)));
        assert_eq!(get_length(&t[2], false, false), Some(Dimension::scalar(0.0)));
        assert_eq!(get_length(&t[3], true, true), None);
        assert_eq!(get_length(&t[4], false, true), None);
    }

    #[test]
    fn test_get_angle_and_resolution() {
        let t = tokens("180deg 0.5turn 96dpi 2dppx 3px");
        assert!((get_angle(&t[0]).unwrap() - PI).abs() < 1e-5);
        assert!((get_angle(&t[1]).unwrap() - PI).abs() < 1e-5);
        assert_eq!(get_resolution(&t[2]), Some(1.0));
        assert_eq!(get_resolution(&t[3]), Some(2.0));
        assert_eq!(get_angle(&t[4]), None);
    }

    #[test]
    fn test_parse_2d_position() {
        assert_eq!(
            parse_2d_position(&tokens("left")),
            Some(Point(ZERO_PERCENT, FIFTY_PERCENT))
        );
        assert_eq!(
            parse_2d_position(&tokens("bottom right")),
            Some(Point(HUNDRED_PERCENT, HUNDRED_PERCENT))
        );
        assert_eq!(
            parse_2d_position(&tokens("10px top")),
            Some(Point(Dimension::px(10.0), ZERO_PERCENT))
        );
        assert_eq!(parse_2d_position(&tokens("top 10px")), None);
        assert_eq!(parse_2d_position(&tokens("left left left")), None);
    }

    #[test]
    fn test_parse_position() {
        assert_eq!(
            parse_position(&tokens("center left")),
            Some(Center::top_left(Point(ZERO_PERCENT, FIFTY_PERCENT)))
        );
        assert_eq!(
            parse_position(&tokens("bottom 10% right 20%")),
            Some(center(
                "right",
                "bottom",
                Dimension::percent(20.0),
                Dimension::percent(10.0)
            ))
        );
        assert_eq!(
            parse_position(&tokens("right 10px top")),
            Some(center("right", "top", Dimension::px(10.0), ZERO_PERCENT))
        );
        assert_eq!(
            parse_position(&tokens("center bottom 5px")),
            Some(center("left", "bottom", FIFTY_PERCENT, Dimension::px(5.0)))
        );
        assert_eq!(parse_position(&tokens("left 10px right")), None);
    }

    #[test]
    fn test_get_url() {
        let base = "https://example.org/foo/";
        assert_eq!(
            get_url(&tokens("url(bar.png)")[0], base).unwrap(),
            Some(Reference::External("https://example.org/foo/bar.png".to_string()))
        );
        assert_eq!(
            get_url(&tokens("url(\"#top\")")[0], base).unwrap(),
            Some(Reference::Internal("top".to_string()))
        );
        assert_eq!(
            get_url(&tokens("attr(href url)")[0], base).unwrap(),
            Some(Reference::Attr("href".to_string()))
        );
        assert_eq!(get_url(&tokens("attr(href)")[0], base).unwrap(), None);
        assert!(get_url(&tokens("url(bar.png)")[0], "").is_err());
        assert!(get_url(&tokens("url(http://a.b/c)")[0], "").unwrap().is_some());
    }

    #[test]
    fn test_check_attr_function() {
        let attr = check_attr_function(&tokens("attr(title)")[0], Some("string")).unwrap();
        assert_eq!(attr.name, "title");
        assert_eq!(attr.fallback, AttrFallback::String(String::new()));

        let attr = check_attr_function(&tokens("attr(size px)")[0], None).unwrap();
        assert_eq!(attr.fallback, AttrFallback::Dimension(Dimension::px(0.0)));

        let attr = check_attr_function(&tokens("attr(x string \"dflt\")")[0], None).unwrap();
        assert_eq!(attr.fallback, AttrFallback::String("dflt".to_string()));

        assert!(check_attr_function(&tokens("attr(x unknown)")[0], None).is_none());
        assert!(check_attr_function(&tokens("attr(x color)")[0], Some("string")).is_none());
        assert!(check_attr_function(&tokens("attr(x string 3)")[0], None).is_none());
    }

    #[test]
    fn test_split_on_optional_comma() {
        assert_eq!(split_on_optional_comma(&tokens("a, b c")).unwrap().len(), 3);
        assert!(split_on_optional_comma(&tokens("a,,b")).is_none());
        assert!(split_on_optional_comma(&tokens(", a")).is_none());
    }
}
