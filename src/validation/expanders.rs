// FILE: src/validation/expanders.rs

use super::content::list_style_type;
use super::declarations::validate_longhand;
use super::fonts;
use super::grid;
use super::helpers::{get_keyword, get_single_keyword, keyword_in, parse_position};
use super::longhands::{
    self, block_ellipsis, flex_basis, flex_factor, single_background_image,
    single_background_repeat, single_background_size, single_box, validate_value,
};
use crate::colors::Color;
use crate::core::properties::{KnownProp, Shorthand};
use crate::core::values::{
    BgSize, Center, CssProperty, DefaultKind, DimOrKeyword, Dimension, GridAreas, GridDims,
    GridLine, GridTemplate, Image, Point, ValidatedProperty,
};
use crate::error::{Result, ValidationError};
use crate::tokens::{split_on_comma, split_on_literal, tokens_have_var, Token};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// One longhand produced by a shorthand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedProperty {
    pub name: KnownProp,
    pub value: ValidatedProperty,
}

/// What a splitter assigns to a longhand: tokens still to validate, or a
/// value it already built.
#[derive(Debug, Clone)]
enum Part {
    Tokens(Vec<Token>),
    Value(CssProperty),
}

type Parts = Vec<(KnownProp, Part)>;

/// Expands a shorthand into every one of its longhands, in the order of
/// `Shorthand::longhands`.
///
/// Values containing `var()` are kept as pending tokens for each longhand,
/// a lone `initial` or `inherit` applies to all of them, and longhands the
/// value does not mention get their initial value.
pub fn expand(shorthand: Shorthand, tokens: &[Token], base_url: &str) -> Result<Vec<NamedProperty>> {
    let longhands = shorthand.longhands();

    if tokens_have_var(tokens) {
        log::debug!("Deferring expansion of {} until variables are substituted", shorthand);
        let pending: Arc<[Token]> = tokens.into();
        return Ok(longhands
            .iter()
            .map(|&name| NamedProperty {
                name,
                value: ValidatedProperty::Pending(Arc::clone(&pending)),
            })
            .collect());
    }

    if let Some(kind) = DefaultKind::from_tokens(tokens) {
        return Ok(longhands
            .iter()
            .map(|&name| NamedProperty {
                name,
                value: ValidatedProperty::Default(kind),
            })
            .collect());
    }

    let mut values: HashMap<KnownProp, ValidatedProperty> = HashMap::new();
    for (name, part) in split(shorthand, tokens, base_url)? {
        if !shorthand.contains(name) {
            return Err(ValidationError::expansion(format!(
                "unknown expanded property {}",
                name
            )));
        }
        if values.contains_key(&name) {
            return Err(ValidationError::expansion(format!(
                "got multiple {} values in a {} shorthand",
                label(name, shorthand),
                shorthand
            )));
        }
        let value = match part {
            Part::Tokens(tokens) => validate_longhand(name, &tokens, base_url)?,
            Part::Value(value) => ValidatedProperty::Resolved(value),
        };
        values.insert(name, value);
    }

    log::debug!("Expanded {} into {} longhands", shorthand, values.len());
    Ok(longhands
        .iter()
        .map(|&name| NamedProperty {
            name,
            value: values
                .remove(&name)
                .unwrap_or(ValidatedProperty::Default(DefaultKind::Initial)),
        })
        .collect())
}

/// Expands `shorthand` again once its variables have been substituted and
/// returns the value it gives to `prop`.
pub fn expand_validate_pending(
    prop: KnownProp,
    shorthand: Shorthand,
    tokens: &[Token],
    base_url: &str,
) -> Result<ValidatedProperty> {
    expand(shorthand, tokens, base_url)?
        .into_iter()
        .find(|named| named.name == prop)
        .map(|named| named.value)
        .ok_or_else(|| {
            ValidationError::expansion(format!("{} is not a longhand of {}", prop, shorthand))
        })
}

/// Name of `prop` relative to the shorthand, used in duplicate errors.
fn label(prop: KnownProp, shorthand: Shorthand) -> &'static str {
    let full = prop.name();
    let short = full
        .strip_prefix(shorthand.name())
        .and_then(|rest| rest.strip_prefix('-'))
        .unwrap_or(full);
    match shorthand {
        Shorthand::Border => short.rsplit('-').next().unwrap_or(short),
        _ => short,
    }
}

fn split(shorthand: Shorthand, tokens: &[Token], base_url: &str) -> Result<Parts> {
    use Shorthand::*;

    match shorthand {
        Margin | Padding | BorderWidth | BorderStyle | BorderColor | Bleed => {
            four_sides(shorthand, tokens)
        }
        BorderRadius => border_radius(tokens),
        Border => {
            let mut parts = Parts::new();
            for side in [BorderTop, BorderRight, BorderBottom, BorderLeft] {
                parts.extend(border_side(side, tokens)?);
            }
            Ok(parts)
        }
        BorderTop | BorderRight | BorderBottom | BorderLeft | Outline | ColumnRule => {
            border_side(shorthand, tokens)
        }
        Background => background(tokens, base_url),
        Font => font(tokens),
        FontVariant => Ok(expand_font_variant(tokens)?
            .into_iter()
            .map(|(name, tokens)| (name, Part::Tokens(tokens)))
            .collect()),
        ListStyle => list_style(tokens, base_url),
        TextDecoration => text_decoration(tokens),
        Flex => flex(tokens),
        FlexFlow => flex_flow(tokens),
        Columns => columns(tokens),
        LineClamp => line_clamp(tokens),
        TextAlign => text_align(tokens),
        WordWrap => Ok(vec![(KnownProp::OverflowWrap, Part::Tokens(tokens.to_vec()))]),
        PageBreakBefore => page_break(KnownProp::BreakBefore, tokens),
        PageBreakAfter => page_break(KnownProp::BreakAfter, tokens),
        PageBreakInside => page_break_inside(tokens),
        BorderImage => border_image(tokens, base_url),
        Gap => gap(tokens),
        GridTemplate => {
            let (rows, columns, areas) = grid_template(tokens).ok_or(ValidationError::InvalidValue)?;
            Ok(vec![
                (KnownProp::GridTemplateRows, Part::Value(CssProperty::GridTemplate(rows))),
                (KnownProp::GridTemplateColumns, Part::Value(CssProperty::GridTemplate(columns))),
                (KnownProp::GridTemplateAreas, Part::Value(CssProperty::GridAreas(areas))),
            ])
        }
        Grid => grid_shorthand(tokens),
        GridRow | GridColumn | GridArea => grid_lines(shorthand, tokens),
    }
}

fn one(token: &Token) -> Vec<Token> {
    vec![token.clone()]
}

/// Applies the 1 to 4 value rule: top, right, bottom, left, with missing
/// sides copied from their opposite.
fn four_values<T: Clone>(values: &[T]) -> Result<[T; 4]> {
    match values {
        [all] => Ok([all.clone(), all.clone(), all.clone(), all.clone()]),
        [vertical, horizontal] => Ok([
            vertical.clone(),
            horizontal.clone(),
            vertical.clone(),
            horizontal.clone(),
        ]),
        [top, horizontal, bottom] => Ok([
            top.clone(),
            horizontal.clone(),
            bottom.clone(),
            horizontal.clone(),
        ]),
        [top, right, bottom, left] => Ok([top.clone(), right.clone(), bottom.clone(), left.clone()]),
        _ => Err(ValidationError::expansion(format!(
            "expected 1 to 4 token components got {}",
            values.len()
        ))),
    }
}

fn four_sides(shorthand: Shorthand, tokens: &[Token]) -> Result<Parts> {
    let sides = four_values(tokens)?;
    Ok(shorthand
        .longhands()
        .iter()
        .zip(sides.iter())
        .map(|(&name, token)| (name, Part::Tokens(one(token))))
        .collect())
}

fn border_radius(tokens: &[Token]) -> Result<Parts> {
    let mut horizontal = Vec::new();
    let mut vertical = Vec::new();
    let mut after_slash = false;
    for (index, token) in tokens.iter().enumerate() {
        if token.is_literal("/") {
            if after_slash {
                return Err(ValidationError::expansion("expected only one '/' separator"));
            }
            if index == tokens.len() - 1 {
                return Err(ValidationError::expansion("expected value after '/' separator"));
            }
            after_slash = true;
        } else if after_slash {
            vertical.push(token.clone());
        } else {
            horizontal.push(token.clone());
        }
    }
    if vertical.is_empty() {
        vertical = horizontal.clone();
    }

    let horizontal = four_values(&horizontal)?;
    let vertical = four_values(&vertical)?;
    Ok(Shorthand::BorderRadius
        .longhands()
        .iter()
        .enumerate()
        .map(|(i, &name)| {
            (
                name,
                Part::Tokens(vec![horizontal[i].clone(), vertical[i].clone()]),
            )
        })
        .collect())
}

/// Assigns each token to the width, style or color longhand of one side,
/// trying color first, then width, then style.
fn border_side(side: Shorthand, tokens: &[Token]) -> Result<Parts> {
    let (width, style, color) = match side.longhands() {
        [width, style, color] => (*width, *style, *color),
        _ => return Err(ValidationError::InvalidValue),
    };
    tokens
        .iter()
        .map(|token| {
            let single = std::slice::from_ref(token);
            let name = if crate::colors::parse_color(token).is_some() {
                color
            } else if validate_value(width, single, "").is_ok() {
                width
            } else if validate_value(style, single, "").is_ok() {
                style
            } else {
                return Err(ValidationError::InvalidValue);
            };
            Ok((name, Part::Tokens(one(token))))
        })
        .collect()
}

// ----- background -----

#[derive(Debug, Default)]
struct Layer {
    color: Option<Color>,
    image: Option<Image>,
    repeat: Option<[String; 2]>,
    attachment: Option<String>,
    position: Option<Center>,
    size: Option<BgSize>,
    clip: Option<String>,
    origin: Option<String>,
}

fn set_once<T>(slot: &mut Option<T>, value: T, name: &str) -> Result<()> {
    if slot.is_some() {
        return Err(ValidationError::expansion(format!(
            "got multiple {} values in a background shorthand",
            name
        )));
    }
    *slot = Some(value);
    Ok(())
}

/// Parses one comma-separated layer; only the last layer may set a color.
fn background_layer(tokens: &[Token], final_layer: bool, base_url: &str) -> Result<Layer> {
    let mut layer = Layer::default();
    let mut rest = tokens;

    while let Some(token) = rest.first() {
        let single = std::slice::from_ref(token);

        let pair = &rest[..rest.len().min(2)];
        if let Some(repeat) = single_background_repeat(pair) {
            set_once(&mut layer.repeat, repeat, "repeat")?;
            rest = &rest[pair.len()..];
            continue;
        }

        if final_layer {
            if let Some(CssProperty::Color(color)) = longhands::color(single) {
                set_once(&mut layer.color, color, "color")?;
                rest = &rest[1..];
                continue;
            }
        }

        if let Some(image) = single_background_image(single, base_url)? {
            set_once(&mut layer.image, image, "image")?;
            rest = &rest[1..];
            continue;
        }

        if let Some(repeat) = single_background_repeat(single) {
            set_once(&mut layer.repeat, repeat, "repeat")?;
            rest = &rest[1..];
            continue;
        }

        if let Some(attachment) = keyword_in(token, &["scroll", "fixed", "local"]) {
            set_once(&mut layer.attachment, attachment, "attachment")?;
            rest = &rest[1..];
            continue;
        }

        let position = (1..=rest.len().min(4))
            .rev()
            .find_map(|n| parse_position(&rest[..n]).map(|position| (position, n)));
        if let Some((position, used)) = position {
            set_once(&mut layer.position, position, "position")?;
            rest = &rest[used..];
            if rest.first().map_or(false, |t| t.is_literal("/")) {
                let after = &rest[1..];
                let size = (1..=after.len().min(2))
                    .rev()
                    .find_map(|n| single_background_size(&after[..n]).map(|size| (size, n)));
                if let Some((size, used)) = size {
                    set_once(&mut layer.size, size, "size")?;
                    rest = &after[used..];
                }
            }
            continue;
        }

        if let Some(origin) = single_box(single) {
            set_once(&mut layer.origin, origin.clone(), "origin")?;
            rest = &rest[1..];
            match rest.first().and_then(|t| single_box(std::slice::from_ref(t))) {
                Some(clip) => {
                    set_once(&mut layer.clip, clip, "clip")?;
                    rest = &rest[1..];
                }
                None => set_once(&mut layer.clip, origin, "clip")?,
            }
            continue;
        }

        return Err(ValidationError::InvalidValue);
    }
    Ok(layer)
}

fn background(tokens: &[Token], base_url: &str) -> Result<Parts> {
    let layers = split_on_comma(tokens);
    let count = layers.len();

    let mut images = Vec::with_capacity(count);
    let mut repeats = Vec::with_capacity(count);
    let mut attachments = Vec::with_capacity(count);
    let mut positions = Vec::with_capacity(count);
    let mut sizes = Vec::with_capacity(count);
    let mut clips = Vec::with_capacity(count);
    let mut origins = Vec::with_capacity(count);
    let mut color = Color::TRANSPARENT;

    for (i, layer_tokens) in layers.iter().enumerate() {
        if layer_tokens.is_empty() {
            return Err(ValidationError::InvalidValue);
        }
        let layer = background_layer(layer_tokens, i + 1 == count, base_url)?;
        if let Some(layer_color) = layer.color {
            color = layer_color;
        }
        images.push(layer.image.unwrap_or(Image::None));
        repeats.push(
            layer
                .repeat
                .unwrap_or_else(|| ["repeat".to_string(), "repeat".to_string()]),
        );
        attachments.push(layer.attachment.unwrap_or_else(|| "scroll".to_string()));
        positions.push(layer.position.unwrap_or_else(|| {
            Center::top_left(Point(Dimension::percent(0.0), Dimension::percent(0.0)))
        }));
        sizes.push(
            layer
                .size
                .unwrap_or_else(|| BgSize::Explicit(DimOrKeyword::auto(), DimOrKeyword::auto())),
        );
        clips.push(layer.clip.unwrap_or_else(|| "border-box".to_string()));
        origins.push(layer.origin.unwrap_or_else(|| "padding-box".to_string()));
    }

    Ok(vec![
        (KnownProp::BackgroundImage, Part::Value(CssProperty::Images(images))),
        (KnownProp::BackgroundRepeat, Part::Value(CssProperty::Repeats(repeats))),
        (KnownProp::BackgroundAttachment, Part::Value(CssProperty::Keywords(attachments))),
        (KnownProp::BackgroundPosition, Part::Value(CssProperty::Centers(positions))),
        (KnownProp::BackgroundSize, Part::Value(CssProperty::Sizes(sizes))),
        (KnownProp::BackgroundClip, Part::Value(CssProperty::Keywords(clips))),
        (KnownProp::BackgroundOrigin, Part::Value(CssProperty::Keywords(origins))),
        (KnownProp::BackgroundColor, Part::Value(CssProperty::Color(color))),
    ])
}

// ----- fonts -----

const SYSTEM_FONTS: &[&str] = &[
    "caption",
    "icon",
    "menu",
    "message-box",
    "small-caption",
    "status-bar",
];

/// `font`: optional style, small-caps, weight and stretch in any order,
/// then a mandatory size, an optional `/ <line-height>` and a mandatory
/// family list.
fn font(tokens: &[Token]) -> Result<Parts> {
    if get_single_keyword(tokens).map_or(false, |k| SYSTEM_FONTS.contains(&k.as_str())) {
        return Err(ValidationError::expansion("system fonts are not supported"));
    }

    let mut parts = Parts::new();
    let mut rest = tokens;
    for _ in 0..4 {
        let token = rest.first().ok_or(ValidationError::InvalidValue)?;
        let single = std::slice::from_ref(token);
        let keyword = get_keyword(token);
        let name = if keyword.as_deref() == Some("normal") {
            None
        } else if fonts::font_style(single).is_some() {
            Some(KnownProp::FontStyle)
        } else if keyword.as_deref() == Some("small-caps") {
            Some(KnownProp::FontVariantCaps)
        } else if fonts::font_weight(single).is_some() {
            Some(KnownProp::FontWeight)
        } else if fonts::font_stretch(single).is_some() {
            Some(KnownProp::FontStretch)
        } else {
            break;
        };
        if let Some(name) = name {
            parts.push((name, Part::Tokens(one(token))));
        }
        rest = &rest[1..];
    }

    let size = rest.first().ok_or(ValidationError::InvalidValue)?;
    if fonts::font_size(std::slice::from_ref(size)).is_none() {
        return Err(ValidationError::invalid(
            "font-size is mandatory for short font attribute",
        ));
    }
    parts.push((KnownProp::FontSize, Part::Tokens(one(size))));
    rest = &rest[1..];

    if let [slash, line_height, ..] = rest {
        if slash.is_literal("/") {
            if validate_value(KnownProp::LineHeight, std::slice::from_ref(line_height), "").is_err() {
                return Err(ValidationError::InvalidValue);
            }
            parts.push((KnownProp::LineHeight, Part::Tokens(one(line_height))));
            rest = &rest[2..];
        }
    }

    if rest.is_empty() {
        return Err(ValidationError::invalid(
            "font-family is mandatory for short font attribute",
        ));
    }
    if fonts::font_family(rest).is_none() {
        return Err(ValidationError::InvalidValue);
    }
    parts.push((KnownProp::FontFamily, Part::Tokens(rest.to_vec())));
    Ok(parts)
}

/// Groups the tokens of a `font-variant` value by the longhand accepting
/// them. Also used by the `@font-face` descriptor.
pub fn expand_font_variant(tokens: &[Token]) -> Result<Vec<(KnownProp, Vec<Token>)>> {
    type Check = fn(&[Token]) -> Option<CssProperty>;
    const FEATURES: &[(KnownProp, Check)] = &[
        (KnownProp::FontVariantAlternates, fonts::font_variant_alternates),
        (KnownProp::FontVariantCaps, fonts::font_variant_caps),
        (KnownProp::FontVariantEastAsian, fonts::font_variant_east_asian),
        (KnownProp::FontVariantLigatures, fonts::font_variant_ligatures),
        (KnownProp::FontVariantNumeric, fonts::font_variant_numeric),
        (KnownProp::FontVariantPosition, fonts::font_variant_position),
    ];

    if let Some(keyword) = single_keyword_of(tokens, &["normal", "none"]) {
        return Ok(FEATURES
            .iter()
            .map(|&(name, _)| {
                let value = if name == KnownProp::FontVariantLigatures {
                    keyword.as_str()
                } else {
                    "normal"
                };
                (name, vec![Token::ident(value)])
            })
            .collect());
    }

    let mut groups: Vec<(KnownProp, Vec<Token>)> = Vec::new();
    for token in tokens {
        if token.is_keyword("normal") {
            return Err(ValidationError::invalid("normal not allowed in font-variant lists"));
        }
        let single = std::slice::from_ref(token);
        let name = FEATURES
            .iter()
            .find(|(_, check)| check(single).is_some())
            .map(|&(name, _)| name)
            .ok_or_else(|| ValidationError::invalid("font variant not supported"))?;
        match groups.iter_mut().find(|(group, _)| *group == name) {
            Some((_, group_tokens)) => group_tokens.push(token.clone()),
            None => groups.push((name, one(token))),
        }
    }
    groups.sort_by_key(|(name, _)| FEATURES.iter().position(|(feature, _)| feature == name));
    Ok(groups)
}

fn single_keyword_of(tokens: &[Token], allowed: &[&str]) -> Option<String> {
    get_single_keyword(tokens).filter(|k| allowed.contains(&k.as_str()))
}

// ----- lists and text -----

/// `list-style`: `none` goes to the type, then to the image, whichever is
/// not set otherwise.
fn list_style(tokens: &[Token], base_url: &str) -> Result<Parts> {
    let mut parts = Parts::new();
    let mut type_specified = false;
    let mut image_specified = false;
    let mut none_count = 0;

    for token in tokens {
        let single = std::slice::from_ref(token);
        if token.is_keyword("none") {
            none_count += 1;
            continue;
        }
        let name = if validate_value(KnownProp::ListStyleImage, single, base_url).is_ok() {
            image_specified = true;
            KnownProp::ListStyleImage
        } else if keyword_in(token, &["inside", "outside"]).is_some() {
            KnownProp::ListStylePosition
        } else if list_style_type(single).is_some() {
            type_specified = true;
            KnownProp::ListStyleType
        } else {
            return Err(ValidationError::InvalidValue);
        };
        parts.push((name, Part::Tokens(one(token))));
    }

    let none = || Part::Tokens(vec![Token::ident("none")]);
    if !type_specified && none_count > 0 {
        parts.push((KnownProp::ListStyleType, none()));
        none_count -= 1;
    }
    if !image_specified && none_count > 0 {
        parts.push((KnownProp::ListStyleImage, none()));
        none_count -= 1;
    }
    if none_count > 0 {
        return Err(ValidationError::InvalidValue);
    }
    Ok(parts)
}

fn text_decoration(tokens: &[Token]) -> Result<Parts> {
    let mut line = Vec::new();
    let mut style: Option<&Token> = None;
    let mut color: Option<&Token> = None;
    let mut none_in_line = false;

    for token in tokens {
        match get_keyword(token).as_deref() {
            Some(keyword @ ("none" | "underline" | "overline" | "line-through" | "blink")) => {
                if none_in_line {
                    return Err(ValidationError::InvalidValue);
                }
                none_in_line = keyword == "none";
                line.push(token.clone());
            }
            Some("solid" | "double" | "dotted" | "dashed" | "wavy") => {
                if style.replace(token).is_some() {
                    return Err(ValidationError::InvalidValue);
                }
            }
            _ => {
                if crate::colors::parse_color(token).is_none() || color.replace(token).is_some() {
                    return Err(ValidationError::InvalidValue);
                }
            }
        }
    }

    let mut parts = Parts::new();
    if !line.is_empty() {
        parts.push((KnownProp::TextDecorationLine, Part::Tokens(line)));
    }
    if let Some(color) = color {
        parts.push((KnownProp::TextDecorationColor, Part::Tokens(one(color))));
    }
    if let Some(style) = style {
        parts.push((KnownProp::TextDecorationStyle, Part::Tokens(one(style))));
    }
    Ok(parts)
}

fn text_align(tokens: &[Token]) -> Result<Parts> {
    let keyword = get_single_keyword(tokens).ok_or(ValidationError::InvalidValue)?;
    let all = if keyword == "justify-all" {
        "justify".to_string()
    } else {
        keyword.clone()
    };
    let last = if keyword == "justify" {
        "start".to_string()
    } else {
        all.clone()
    };
    Ok(vec![
        (KnownProp::TextAlignAll, Part::Tokens(vec![Token::ident(all)])),
        (KnownProp::TextAlignLast, Part::Tokens(vec![Token::ident(last)])),
    ])
}

fn line_clamp(tokens: &[Token]) -> Result<Parts> {
    let ident = |value: &str| Part::Tokens(vec![Token::ident(value)]);
    match tokens {
        [token] if token.is_keyword("none") => Ok(vec![
            (KnownProp::MaxLines, ident("none")),
            (KnownProp::Continue, ident("auto")),
            (KnownProp::BlockEllipsis, ident("none")),
        ]),
        [token] if token.as_int().is_some() => Ok(vec![
            (KnownProp::MaxLines, Part::Tokens(one(token))),
            (KnownProp::Continue, ident("discard")),
            (KnownProp::BlockEllipsis, ident("auto")),
        ]),
        [lines, ellipsis]
            if lines.as_int().map_or(false, |n| n != 0)
                && block_ellipsis(std::slice::from_ref(ellipsis)).is_some() =>
        {
            Ok(vec![
                (KnownProp::MaxLines, Part::Tokens(one(lines))),
                (KnownProp::Continue, ident("discard")),
                (KnownProp::BlockEllipsis, Part::Tokens(one(ellipsis))),
            ])
        }
        _ => Err(ValidationError::InvalidValue),
    }
}

// ----- flex and columns -----

/// `flex`: up to two flex factors and a basis. A unitless zero is a flex
/// factor unless two factors were already given.
fn flex(tokens: &[Token]) -> Result<Parts> {
    if get_single_keyword(tokens).as_deref() == Some("none") {
        return Ok(vec![
            (KnownProp::FlexGrow, Part::Value(CssProperty::Float(0.0))),
            (KnownProp::FlexShrink, Part::Value(CssProperty::Float(0.0))),
            (KnownProp::FlexBasis, Part::Value(CssProperty::value_keyword("auto"))),
        ]);
    }

    let mut grow: Option<f32> = None;
    let mut shrink: Option<f32> = None;
    let mut basis: Option<&Token> = None;
    for token in tokens {
        let single = std::slice::from_ref(token);
        let forced_factor = matches!(token, Token::Number(n) if n.value == 0.0)
            && !(grow.is_some() && shrink.is_some());
        if basis.is_none() && !forced_factor && flex_basis(single).is_some() {
            basis = Some(token);
            continue;
        }
        let factor = flex_factor(single).ok_or(ValidationError::InvalidValue)?;
        if grow.is_none() {
            grow = Some(factor);
        } else if shrink.is_none() {
            shrink = Some(factor);
        } else {
            return Err(ValidationError::InvalidValue);
        }
    }

    let basis = match basis {
        Some(token) => Part::Tokens(one(token)),
        None => Part::Value(CssProperty::dimension(0.0, crate::core::units::Unit::Px)),
    };
    Ok(vec![
        (KnownProp::FlexGrow, Part::Value(CssProperty::Float(grow.unwrap_or(1.0)))),
        (KnownProp::FlexShrink, Part::Value(CssProperty::Float(shrink.unwrap_or(1.0)))),
        (KnownProp::FlexBasis, basis),
    ])
}

fn flex_flow(tokens: &[Token]) -> Result<Parts> {
    let is_direction = |t: &Token| validate_value(KnownProp::FlexDirection, std::slice::from_ref(t), "").is_ok();
    let is_wrap = |t: &Token| validate_value(KnownProp::FlexWrap, std::slice::from_ref(t), "").is_ok();
    match tokens {
        [token] if is_direction(token) => Ok(vec![(KnownProp::FlexDirection, Part::Tokens(one(token)))]),
        [token] if is_wrap(token) => Ok(vec![(KnownProp::FlexWrap, Part::Tokens(one(token)))]),
        [first, second] => {
            let (direction, wrap) = if is_direction(first) && is_wrap(second) {
                (first, second)
            } else if is_direction(second) && is_wrap(first) {
                (second, first)
            } else {
                return Err(ValidationError::InvalidValue);
            };
            Ok(vec![
                (KnownProp::FlexDirection, Part::Tokens(one(direction))),
                (KnownProp::FlexWrap, Part::Tokens(one(wrap))),
            ])
        }
        _ => Err(ValidationError::InvalidValue),
    }
}

fn columns(tokens: &[Token]) -> Result<Parts> {
    let ordered: Vec<&Token> = match tokens {
        [first, second] if first.is_keyword("auto") => vec![second, first],
        _ => tokens.iter().collect(),
    };

    let mut parts = Parts::new();
    let mut last: Option<KnownProp> = None;
    for token in &ordered {
        let single = std::slice::from_ref(*token);
        let name = if last != Some(KnownProp::ColumnWidth)
            && validate_value(KnownProp::ColumnWidth, single, "").is_ok()
        {
            KnownProp::ColumnWidth
        } else if validate_value(KnownProp::ColumnCount, single, "").is_ok() {
            KnownProp::ColumnCount
        } else {
            return Err(ValidationError::InvalidValue);
        };
        last = Some(name);
        parts.push((name, Part::Tokens(one(token))));
    }

    if let [_] = ordered.as_slice() {
        let other = if last == Some(KnownProp::ColumnWidth) {
            KnownProp::ColumnCount
        } else {
            KnownProp::ColumnWidth
        };
        parts.push((other, Part::Tokens(vec![Token::ident("auto")])));
    }
    Ok(parts)
}

fn gap(tokens: &[Token]) -> Result<Parts> {
    let (row, column) = match tokens {
        [both] => (both, both),
        [row, column] => (row, column),
        _ => return Err(ValidationError::InvalidValue),
    };
    Ok(vec![
        (KnownProp::RowGap, Part::Tokens(one(row))),
        (KnownProp::ColumnGap, Part::Tokens(one(column))),
    ])
}

// ----- legacy break properties -----

fn page_break(prop: KnownProp, tokens: &[Token]) -> Result<Parts> {
    match get_single_keyword(tokens).as_deref() {
        Some("auto" | "left" | "right" | "avoid") => Ok(vec![(prop, Part::Tokens(tokens.to_vec()))]),
        Some("always") => Ok(vec![(prop, Part::Tokens(vec![Token::ident("page")]))]),
        _ => Err(ValidationError::InvalidValue),
    }
}

fn page_break_inside(tokens: &[Token]) -> Result<Parts> {
    match get_single_keyword(tokens).as_deref() {
        Some("auto" | "avoid") => Ok(vec![(KnownProp::BreakInside, Part::Tokens(tokens.to_vec()))]),
        _ => Err(ValidationError::InvalidValue),
    }
}

// ----- border-image -----

/// Takes the longest run of tokens at the start of `rest` that `prop`
/// accepts.
fn take_run(prop: KnownProp, rest: &[Token]) -> Option<usize> {
    let mut taken = 0;
    while taken < rest.len() && validate_value(prop, &rest[..=taken], "").is_ok() {
        taken += 1;
    }
    if taken == 0 {
        None
    } else {
        Some(taken)
    }
}

/// `border-image`: `<source> || <slice> [/ <width>? [/ <outset>]?]? || <repeat>`.
fn border_image(tokens: &[Token], base_url: &str) -> Result<Parts> {
    let mut parts = Parts::new();
    let mut rest = tokens;

    while let Some(token) = rest.first() {
        let single = std::slice::from_ref(token);
        if validate_value(KnownProp::BorderImageSource, single, base_url).is_ok() {
            parts.push((KnownProp::BorderImageSource, Part::Tokens(one(token))));
            rest = &rest[1..];
        } else if let Some(n) = take_run(KnownProp::BorderImageRepeat, rest) {
            parts.push((KnownProp::BorderImageRepeat, Part::Tokens(rest[..n].to_vec())));
            rest = &rest[n..];
        } else if validate_value(KnownProp::BorderImageSlice, single, "").is_ok() || token.is_keyword("fill") {
            let mut n = 1;
            while n < rest.len() && validate_value(KnownProp::BorderImageSlice, &rest[..=n], "").is_ok() {
                n += 1;
            }
            parts.push((KnownProp::BorderImageSlice, Part::Tokens(rest[..n].to_vec())));
            rest = &rest[n..];

            // slices / widths / outsets
            match rest.first() {
                Some(t) if t.is_literal("/") => rest = &rest[1..],
                _ => continue,
            }
            if rest.is_empty() {
                return Err(ValidationError::InvalidValue);
            }
            if let Some(n) = take_run(KnownProp::BorderImageWidth, rest) {
                parts.push((KnownProp::BorderImageWidth, Part::Tokens(rest[..n].to_vec())));
                rest = &rest[n..];
                match rest.first() {
                    Some(t) if t.is_literal("/") => rest = &rest[1..],
                    _ => continue,
                }
            } else if rest[0].is_literal("/") {
                rest = &rest[1..];
            } else {
                return Err(ValidationError::InvalidValue);
            }
            let n = take_run(KnownProp::BorderImageOutset, rest).ok_or(ValidationError::InvalidValue)?;
            parts.push((KnownProp::BorderImageOutset, Part::Tokens(rest[..n].to_vec())));
            rest = &rest[n..];
        } else {
            return Err(ValidationError::InvalidValue);
        }
    }
    Ok(parts)
}

// ----- grid -----

/// `grid-template`: `none` or `<rows> / <columns>`.
fn grid_template(tokens: &[Token]) -> Option<(GridTemplate, GridTemplate, GridAreas)> {
    if get_single_keyword(tokens).as_deref() == Some("none") {
        return Some((GridTemplate::None, GridTemplate::None, GridAreas::None));
    }
    match split_on_literal(tokens, "/").as_slice() {
        [rows, columns] => Some((
            grid::grid_template(rows)?,
            grid::grid_template(columns)?,
            GridAreas::None,
        )),
        _ => None,
    }
}

/// `[auto-flow && dense?] <grid-auto-*>?`: returns whether `dense` was
/// given and the remaining track sizes.
fn auto_flow(tokens: &[Token]) -> Option<(bool, &[Token])> {
    let mut auto_flow = false;
    let mut dense = false;
    let mut used = 0;
    for token in tokens {
        if token.is_keyword("auto-flow") && !auto_flow {
            auto_flow = true;
        } else if token.is_keyword("dense") && !dense {
            dense = true;
        } else {
            break;
        }
        used += 1;
    }
    if auto_flow {
        Some((dense, &tokens[used..]))
    } else {
        None
    }
}

fn grid_auto_value(tokens: &[Token]) -> Option<CssProperty> {
    if tokens.is_empty() {
        return Some(CssProperty::GridAuto(vec![GridDims::auto()]));
    }
    grid::grid_auto(tokens)
}

fn grid_shorthand(tokens: &[Token]) -> Result<Parts> {
    let value = |prop: KnownProp, value: CssProperty| (prop, Part::Value(value));
    let auto_tracks = || CssProperty::GridAuto(vec![GridDims::auto()]);

    if let Some((rows, columns, areas)) = grid_template(tokens) {
        return Ok(vec![
            value(KnownProp::GridTemplateRows, CssProperty::GridTemplate(rows)),
            value(KnownProp::GridTemplateColumns, CssProperty::GridTemplate(columns)),
            value(KnownProp::GridTemplateAreas, CssProperty::GridAreas(areas)),
            value(KnownProp::GridAutoRows, auto_tracks()),
            value(KnownProp::GridAutoColumns, auto_tracks()),
            value(KnownProp::GridAutoFlow, CssProperty::keywords(&["row"])),
        ]);
    }

    let sides = split_on_literal(tokens, "/");
    let (rows, columns) = match sides.as_slice() {
        [rows, columns] => (rows, columns),
        _ => return Err(ValidationError::InvalidValue),
    };
    let flow = |direction: &str, dense: bool| {
        let mut keywords = vec![direction.to_string()];
        if dense {
            keywords.push("dense".to_string());
        }
        CssProperty::Keywords(keywords)
    };

    match (auto_flow(rows), auto_flow(columns)) {
        (Some((dense, auto_rows)), None) => {
            let auto_rows = grid_auto_value(auto_rows).ok_or(ValidationError::InvalidValue)?;
            let columns = grid::grid_template(columns).ok_or(ValidationError::InvalidValue)?;
            Ok(vec![
                value(KnownProp::GridTemplateRows, CssProperty::GridTemplate(GridTemplate::None)),
                value(KnownProp::GridTemplateColumns, CssProperty::GridTemplate(columns)),
                value(KnownProp::GridTemplateAreas, CssProperty::GridAreas(GridAreas::None)),
                value(KnownProp::GridAutoRows, auto_rows),
                value(KnownProp::GridAutoColumns, auto_tracks()),
                value(KnownProp::GridAutoFlow, flow("row", dense)),
            ])
        }
        (None, Some((dense, auto_columns))) => {
            let auto_columns = grid_auto_value(auto_columns).ok_or(ValidationError::InvalidValue)?;
            let rows = grid::grid_template(rows).ok_or(ValidationError::InvalidValue)?;
            Ok(vec![
                value(KnownProp::GridTemplateRows, CssProperty::GridTemplate(rows)),
                value(KnownProp::GridTemplateColumns, CssProperty::GridTemplate(GridTemplate::None)),
                value(KnownProp::GridTemplateAreas, CssProperty::GridAreas(GridAreas::None)),
                value(KnownProp::GridAutoRows, auto_tracks()),
                value(KnownProp::GridAutoColumns, auto_columns),
                value(KnownProp::GridAutoFlow, flow("column", dense)),
            ])
        }
        _ => Err(ValidationError::InvalidValue),
    }
}

/// `grid-row`, `grid-column` and `grid-area`: grid lines separated by `/`.
/// A missing line copies its companion when that is a bare identifier,
/// and is `auto` otherwise.
fn grid_lines(shorthand: Shorthand, tokens: &[Token]) -> Result<Parts> {
    let longhands = shorthand.longhands();
    let groups = split_on_literal(tokens, "/");
    if groups.len() > longhands.len() {
        return Err(ValidationError::InvalidValue);
    }
    let mut lines = groups
        .iter()
        .map(|group| grid::grid_line(group))
        .collect::<Option<Vec<GridLine>>>()
        .ok_or(ValidationError::InvalidValue)?;

    while lines.len() < longhands.len() {
        let index = lines.len();
        let companion = match (longhands.len(), index) {
            (4, 1) => 0,
            (4, _) => index - 2,
            _ => index - 1,
        };
        let line = if lines[companion].is_custom_ident() {
            lines[companion].clone()
        } else {
            GridLine::Auto
        };
        lines.push(line);
    }

    Ok(longhands
        .iter()
        .zip(lines)
        .map(|(&name, line)| (name, Part::Value(CssProperty::GridLine(line))))
        .collect())
}
