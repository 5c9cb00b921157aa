// FILE: src/validation/grid.rs

use super::helpers::{get_keyword, get_length};
use crate::core::units::Unit;
use crate::core::values::{
    CssProperty, DimOrKeyword, Dimension, GridAreas, GridDims, GridLine, GridSpec, GridTemplate,
    RepeatCount,
};
use crate::tokens::{parse_function, tokenize, Token};
use std::collections::HashSet;

/// `<inflexible-breadth>`: `auto`, `min-content`, `max-content` or a
/// non-negative length-percentage.
fn parse_inflexible_breadth(token: &Token) -> Option<DimOrKeyword> {
    match get_keyword(token) {
        Some(keyword) => match keyword.as_str() {
            "auto" | "min-content" | "max-content" => Some(DimOrKeyword::Keyword(keyword)),
            _ => None,
        },
        None => get_length(token, false, true).map(DimOrKeyword::from),
    }
}

/// `<track-breadth>`: an inflexible breadth or a non-negative `fr` value.
fn parse_track_breadth(token: &Token) -> Option<DimOrKeyword> {
    if let Token::Dimension { value, unit } = token {
        if unit == "fr" && value.value >= 0.0 {
            return Some(Dimension::new(value.value, Unit::Fr).into());
        }
    }
    parse_inflexible_breadth(token)
}

pub fn parse_track_size(token: &Token) -> Option<GridDims> {
    if let Some(breadth) = parse_track_breadth(token) {
        return Some(GridDims::Value(breadth));
    }
    let (name, args) = parse_function(token)?;
    match (name, args.as_slice()) {
        ("minmax", [min, max]) => Some(GridDims::MinMax(
            parse_inflexible_breadth(min)?,
            parse_track_breadth(max)?,
        )),
        ("fit-content", [length]) => get_length(length, false, true).map(GridDims::FitContent),
        _ => None,
    }
}

fn parse_fixed_size(token: &Token) -> Option<GridDims> {
    if let Some(length) = get_length(token, false, true) {
        return Some(GridDims::Value(length.into()));
    }
    let (name, args) = parse_function(token)?;
    let (min, max) = match (name, args.as_slice()) {
        ("minmax", [min, max]) => (min, max),
        _ => return None,
    };
    if let Some(length) = get_length(min, false, true) {
        if let Some(breadth) = parse_track_breadth(max) {
            return Some(GridDims::MinMax(length.into(), breadth));
        }
    }
    let fixed = get_length(max, false, true)?;
    let min = match get_length(min, false, true) {
        Some(length) => length.into(),
        None => match get_keyword(min)?.as_str() {
            keyword @ ("min-content" | "max-content" | "auto") => DimOrKeyword::keyword(keyword),
            _ => return None,
        },
    };
    Some(GridDims::MinMax(min, fixed.into()))
}

/// `[<ident>*]`. An empty block gives an empty list.
pub fn parse_line_names(token: &Token) -> Option<Vec<String>> {
    match token {
        Token::SquareBracketsBlock(inner) => inner
            .iter()
            .filter(|t| !t.is_whitespace())
            .map(|t| t.as_ident().map(str::to_string))
            .collect(),
        _ => None,
    }
}

/// `grid-auto-columns` and `grid-auto-rows`: a list of track sizes.
pub fn grid_auto(tokens: &[Token]) -> Option<CssProperty> {
    if tokens.is_empty() {
        return None;
    }
    tokens
        .iter()
        .map(parse_track_size)
        .collect::<Option<Vec<_>>>()
        .map(CssProperty::GridAuto)
}

pub fn grid_auto_flow(tokens: &[Token]) -> Option<Vec<String>> {
    let keywords: Vec<String> = tokens.iter().map(get_keyword).collect::<Option<_>>()?;
    let words: Vec<&str> = keywords.iter().map(String::as_str).collect();
    match words.as_slice() {
        ["row"] | ["column"] => Some(keywords),
        ["dense"] => Some(vec!["dense".to_string(), "row".to_string()]),
        ["dense", "row" | "column"] | ["row" | "column", "dense"] => Some(keywords),
        _ => None,
    }
}

fn parse_repeat(token: &Token, accept_auto_fit: bool) -> Option<RepeatCount> {
    if let Token::Number(number) = token {
        return match number.int_value {
            Some(count) if count >= 1 => Some(RepeatCount::Count(count as u32)),
            _ => None,
        };
    }
    match get_keyword(token)?.as_str() {
        "auto-fill" => Some(RepeatCount::AutoFill),
        "auto-fit" if accept_auto_fit => Some(RepeatCount::AutoFit),
        _ => None,
    }
}

/// Line names and name repeats following the `subgrid` keyword.
fn parse_subgrid(tokens: &[Token]) -> Option<Vec<GridSpec>> {
    let mut subgrid = Vec::new();
    for token in tokens {
        if let Some(names) = parse_line_names(token) {
            subgrid.push(GridSpec::Names(names));
            continue;
        }
        let (name, args) = parse_function(token)?;
        if name != "repeat" || args.len() < 2 {
            return None;
        }
        let count = parse_repeat(&args[0], false)?;
        let names = args[1..].iter().filter_map(parse_line_names).collect();
        subgrid.push(GridSpec::NameRepeat { count, names });
    }
    Some(subgrid)
}

/// Parses a `<track-list>` or `<auto-track-list>`, inserting empty line
/// names so that names and sizes alternate.
fn parse_track_list(tokens: &[Token]) -> Option<Vec<GridSpec>> {
    let mut specs = Vec::new();
    let mut includes_auto_repeat = false;
    let mut includes_track = false;
    let mut last_is_line_name = false;

    for token in tokens {
        if let Some(names) = parse_line_names(token) {
            if last_is_line_name {
                return None;
            }
            last_is_line_name = true;
            specs.push(GridSpec::Names(names));
            continue;
        }
        if let Some(fixed) = parse_fixed_size(token) {
            if !last_is_line_name {
                specs.push(GridSpec::Names(Vec::new()));
            }
            last_is_line_name = false;
            specs.push(GridSpec::Track(fixed));
            continue;
        }
        if let Some(track) = parse_track_size(token) {
            if !last_is_line_name {
                specs.push(GridSpec::Names(Vec::new()));
            }
            last_is_line_name = false;
            specs.push(GridSpec::Track(track));
            includes_track = true;
            continue;
        }

        let (name, args) = parse_function(token)?;
        if name != "repeat" || args.len() < 2 {
            return None;
        }
        let count = parse_repeat(&args[0], true)?;
        if count.is_auto() {
            if includes_auto_repeat {
                return None;
            }
            includes_auto_repeat = true;
        }

        let mut repeated = Vec::new();
        let mut repeat_last_is_line_name = false;
        for arg in &args[1..] {
            if let Some(names) = parse_line_names(arg) {
                if repeat_last_is_line_name {
                    return None;
                }
                repeated.push(GridSpec::Names(names));
                repeat_last_is_line_name = true;
                continue;
            }
            let size = match parse_fixed_size(arg) {
                Some(fixed) => fixed,
                None => {
                    let track = parse_track_size(arg)?;
                    includes_track = true;
                    track
                }
            };
            if !repeat_last_is_line_name {
                repeated.push(GridSpec::Names(Vec::new()));
            }
            repeat_last_is_line_name = false;
            repeated.push(GridSpec::Track(size));
        }
        if !last_is_line_name {
            specs.push(GridSpec::Names(Vec::new()));
        }
        last_is_line_name = false;
        if !repeat_last_is_line_name {
            repeated.push(GridSpec::Names(Vec::new()));
        }
        specs.push(GridSpec::Repeat {
            count,
            specs: repeated,
        });
    }

    if includes_auto_repeat && includes_track {
        return None;
    }
    if !last_is_line_name {
        specs.push(GridSpec::Names(Vec::new()));
    }
    Some(specs)
}

/// `grid-template-columns` and `grid-template-rows`.
pub fn grid_template(tokens: &[Token]) -> Option<GridTemplate> {
    let first = tokens.first()?;
    if tokens.len() == 1 && first.is_keyword("none") {
        return Some(GridTemplate::None);
    }
    if first.is_keyword("subgrid") {
        return parse_subgrid(&tokens[1..]).map(GridTemplate::Subgrid);
    }
    parse_track_list(tokens).map(GridTemplate::Tracks)
}

fn parse_area_row(value: &str) -> Option<Vec<String>> {
    let mut row = Vec::new();
    let mut last_is_dot = false;
    for token in tokenize(value) {
        match token {
            Token::Ident(name) => {
                row.push(name);
                last_is_dot = false;
            }
            Token::Literal(ref dot) if dot == "." => {
                if !last_is_dot {
                    row.push(String::new());
                    last_is_dot = true;
                }
            }
            Token::Whitespace => last_is_dot = false,
            _ => return None,
        }
    }
    if row.is_empty() {
        None
    } else {
        Some(row)
    }
}

/// `grid-template-areas`: `none` or one string per row. Rows must have the
/// same length and each named area must be a single rectangle. Null cells
/// (`.`) are stored as empty names.
pub fn grid_template_areas(tokens: &[Token]) -> Option<GridAreas> {
    if tokens.len() == 1 && tokens[0].is_keyword("none") {
        return Some(GridAreas::None);
    }
    let rows = tokens
        .iter()
        .map(|token| token.as_string().and_then(parse_area_row))
        .collect::<Option<Vec<_>>>()?;
    let width = rows.first()?.len();
    if rows.iter().any(|row| row.len() != width) {
        return None;
    }

    let mut covered: HashSet<(usize, usize)> = HashSet::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for (y, row) in rows.iter().enumerate() {
        for (x, area) in row.iter().enumerate() {
            if area.is_empty() || covered.contains(&(x, y)) {
                continue;
            }
            if !seen.insert(area.as_str()) {
                return None;
            }
            let mut end_x = x + 1;
            while end_x < row.len() && row[end_x] == *area {
                end_x += 1;
            }
            for next_y in y..rows.len() {
                if rows[next_y][x..end_x].iter().all(|cell| cell == area) {
                    covered.extend((x..end_x).map(|cx| (cx, next_y)));
                } else {
                    break;
                }
            }
        }
    }
    Some(GridAreas::Rows(rows))
}

/// `grid-[row|column]-[start|end]`: `auto`, `<custom-ident>`,
/// `[<integer> && <custom-ident>?]` or `[span && [<integer> || <custom-ident>]]`.
pub fn grid_line(tokens: &[Token]) -> Option<GridLine> {
    if let [token] = tokens {
        if let Some(keyword) = get_keyword(token) {
            return match keyword.as_str() {
                "auto" => Some(GridLine::Auto),
                "span" => None,
                _ => Some(GridLine::ident(&keyword)),
            };
        }
        return match token.as_int() {
            Some(number) if number != 0 => Some(GridLine::Line {
                span: false,
                ident: None,
                number: Some(number),
            }),
            _ => None,
        };
    }

    let mut span = false;
    let mut ident: Option<String> = None;
    let mut number: Option<i32> = None;
    for token in tokens {
        if let Some(keyword) = get_keyword(token) {
            match keyword.as_str() {
                "auto" => return None,
                "span" if !span => span = true,
                "span" => return None,
                _ if ident.is_none() => ident = Some(keyword),
                _ => return None,
            }
        } else {
            match token.as_int() {
                Some(value) if value != 0 && number.is_none() => number = Some(value),
                _ => return None,
            }
        }
    }

    let valid = if span {
        number.map_or(true, |n| n > 0) && (ident.is_some() || number.is_some())
    } else {
        number.is_some()
    };
    if valid {
        Some(GridLine::Line {
            span,
            ident,
            number,
        })
    } else {
        None
    }
}
