// FILE: src/validation/longhands.rs

use super::content;
use super::fonts;
use super::grid;
use super::helpers::{
    comma_separated_list, get_angle, get_keyword, get_length, get_resolution,
    get_single_keyword, get_url, keyword_in, parse_2d_position, parse_position, single_keyword,
};
use super::images::get_image;
use crate::colors::{parse_color, Color};
use crate::core::constants::page_size;
use crate::core::properties::KnownProp;
use crate::core::units::Unit;
use crate::core::values::{
    BgSize, CascadedProperty, CssProperty, DefaultKind, DimOrKeyword, Dimension, Image,
    ImageOrientation, KeywordOr, Marks, Point, Position, Reference, TaggedInt, TaggedString,
    Transform,
};
use crate::error::{OrInvalid, Result, ValidationError};
use crate::tokens::{parse_function, Token};
use std::collections::BTreeSet;

pub const BORDER_STYLES: &[&str] = &[
    "none", "hidden", "dotted", "dashed", "double", "inset", "outset", "groove", "ridge", "solid",
];

const OUTLINE_STYLES: &[&str] = &[
    "none", "dotted", "dashed", "double", "inset", "outset", "groove", "ridge", "solid",
];

const BOXES: &[&str] = &["border-box", "padding-box", "content-box"];

const DECORATION_LINES: &[&str] = &["underline", "overline", "line-through", "blink"];

/// Validates the value of a longhand.
///
/// `color: currentColor` is the only value that validates to a CSS-wide
/// keyword: it means the inherited color.
pub fn validate_known(prop: KnownProp, tokens: &[Token], base_url: &str) -> Result<CascadedProperty> {
    if prop == KnownProp::Color {
        if let [token] = tokens {
            if parse_color(token) == Some(Color::CurrentColor) {
                return Ok(CascadedProperty::Default(DefaultKind::Inherit));
            }
        }
    }
    validate_value(prop, tokens, base_url).map(CascadedProperty::Value)
}

/// Validates a longhand and returns its typed value. `tokens` must not
/// contain whitespace.
pub fn validate_value(prop: KnownProp, tokens: &[Token], base_url: &str) -> Result<CssProperty> {
    use KnownProp::*;

    match prop {
        Color | BackgroundColor | BorderTopColor | BorderRightColor | BorderBottomColor
        | BorderLeftColor | ColumnRuleColor | TextDecorationColor => color(tokens).or_invalid(),
        OutlineColor => outline_color(tokens).or_invalid(),

        BackgroundAttachment => keywords_list(tokens, &["scroll", "fixed", "local"]).or_invalid(),
        BackgroundClip | BackgroundOrigin => keywords_list(tokens, BOXES).or_invalid(),
        BackgroundImage => background_image(tokens, base_url)?.or_invalid(),
        BackgroundPosition => background_position(tokens).or_invalid(),
        BackgroundRepeat => background_repeat(tokens).or_invalid(),
        BackgroundSize => background_size(tokens).or_invalid(),

        BorderCollapse => keyword(tokens, &["separate", "collapse"]).or_invalid(),
        BorderSpacing => border_dims(tokens, true, false).or_invalid(),
        BorderTopStyle | BorderRightStyle | BorderBottomStyle | BorderLeftStyle
        | ColumnRuleStyle => keyword(tokens, BORDER_STYLES).or_invalid(),
        OutlineStyle => keyword(tokens, OUTLINE_STYLES).or_invalid(),
        BorderTopWidth | BorderRightWidth | BorderBottomWidth | BorderLeftWidth
        | ColumnRuleWidth | OutlineWidth => border_width(tokens).or_invalid(),
        BorderTopLeftRadius | BorderTopRightRadius | BorderBottomRightRadius
        | BorderBottomLeftRadius => border_dims(tokens, false, true).or_invalid(),
        BorderImageSource => border_image_source(tokens, base_url)?.or_invalid(),
        BorderImageSlice => border_image_slice(tokens).or_invalid(),
        BorderImageWidth => border_image_width(tokens).or_invalid(),
        BorderImageOutset => border_image_outset(tokens).or_invalid(),
        BorderImageRepeat => border_image_repeat(tokens).or_invalid(),

        ColumnWidth => length_or_keyword(tokens, false, false, &["auto"]).or_invalid(),
        ColumnCount => column_count(tokens).or_invalid(),
        ColumnGap | RowGap => length_or_keyword(tokens, false, false, &["normal"]).or_invalid(),
        ColumnFill => keyword(tokens, &["auto", "balance"]).or_invalid(),
        ColumnSpan => keyword(tokens, &["all", "none"]).or_invalid(),

        Top | Right | Bottom | Left | MarginTop | MarginRight | MarginBottom | MarginLeft => {
            length_or_keyword(tokens, true, true, &["auto"]).or_invalid()
        }
        PaddingTop | PaddingRight | PaddingBottom | PaddingLeft => {
            length_or_keyword(tokens, false, true, &[]).or_invalid()
        }
        Width | Height | MinWidth | MinHeight => {
            length_or_keyword(tokens, false, true, &["auto"]).or_invalid()
        }
        MaxWidth | MaxHeight => max_width_height(tokens).or_invalid(),
        BoxSizing => keyword(tokens, BOXES).or_invalid(),
        Display => display(tokens).or_invalid(),
        Float => keyword(tokens, &["left", "right", "footnote", "none"]).or_invalid(),
        Clear => keyword(tokens, &["left", "right", "both", "none"]).or_invalid(),
        Clip => clip(tokens).or_invalid(),
        Position => position(tokens).or_invalid(),
        ZIndex => z_index(tokens).or_invalid(),
        Overflow => keyword(tokens, &["auto", "visible", "hidden", "scroll"]).or_invalid(),
        Visibility => keyword(tokens, &["visible", "hidden", "collapse"]).or_invalid(),
        Opacity => opacity(tokens).or_invalid(),
        Direction => keyword(tokens, &["ltr", "rtl"]).or_invalid(),
        UnicodeBidi => keyword(
            tokens,
            &["normal", "embed", "isolate", "bidi-override", "isolate-override", "plaintext"],
        )
        .or_invalid(),

        CaptionSide => keyword(tokens, &["top", "bottom"]).or_invalid(),
        EmptyCells => keyword(tokens, &["show", "hide"]).or_invalid(),
        TableLayout => keyword(tokens, &["fixed", "auto"]).or_invalid(),

        Content => content::content(tokens, base_url)?.or_invalid(),
        CounterIncrement => content::counters(tokens, 1)?.or_invalid(),
        CounterReset | CounterSet => content::counters(tokens, 0)?.or_invalid(),
        Quotes => content::quotes(tokens).or_invalid(),
        ListStyleImage => list_style_image(tokens, base_url)?.or_invalid(),
        ListStylePosition => keyword(tokens, &["inside", "outside"]).or_invalid(),
        ListStyleType => content::list_style_type(tokens)
            .map(CssProperty::CounterStyle)
            .or_invalid(),

        FontFamily => fonts::font_family(tokens).or_invalid(),
        FontFeatureSettings => fonts::font_feature_settings(tokens).or_invalid(),
        FontKerning => fonts::font_kerning(tokens).or_invalid(),
        FontLanguageOverride => fonts::font_language_override(tokens).or_invalid(),
        FontSize => fonts::font_size(tokens).or_invalid(),
        FontStretch => fonts::font_stretch(tokens).or_invalid(),
        FontStyle => fonts::font_style(tokens).or_invalid(),
        FontVariantAlternates => fonts::font_variant_alternates(tokens).or_invalid(),
        FontVariantCaps => fonts::font_variant_caps(tokens).or_invalid(),
        FontVariantEastAsian => fonts::font_variant_east_asian(tokens).or_invalid(),
        FontVariantLigatures => fonts::font_variant_ligatures(tokens).or_invalid(),
        FontVariantNumeric => fonts::font_variant_numeric(tokens).or_invalid(),
        FontVariantPosition => fonts::font_variant_position(tokens).or_invalid(),
        FontVariationSettings => fonts::font_variation_settings(tokens).or_invalid(),
        FontWeight => fonts::font_weight(tokens).or_invalid(),

        LetterSpacing | WordSpacing => {
            length_or_keyword(tokens, true, false, &["normal"]).or_invalid()
        }
        LineHeight => line_height(tokens).or_invalid(),
        OverflowWrap => keyword(tokens, &["anywhere", "normal", "break-word"]).or_invalid(),
        TabSize => tab_size(tokens).or_invalid(),
        TextAlignAll => {
            keyword(tokens, &["left", "right", "center", "justify", "start", "end"]).or_invalid()
        }
        TextAlignLast => keyword(
            tokens,
            &["auto", "left", "right", "center", "justify", "start", "end"],
        )
        .or_invalid(),
        TextDecorationLine => text_decoration_line(tokens).or_invalid(),
        TextDecorationStyle => {
            keyword(tokens, &["solid", "double", "dotted", "dashed", "wavy"]).or_invalid()
        }
        TextIndent => length_or_keyword(tokens, true, true, &[]).or_invalid(),
        TextOverflow => keyword(tokens, &["clip", "ellipsis"]).or_invalid(),
        TextTransform => keyword(
            tokens,
            &["none", "uppercase", "lowercase", "capitalize", "full-width"],
        )
        .or_invalid(),
        VerticalAlign => length_or_keyword(
            tokens,
            true,
            true,
            &["baseline", "middle", "sub", "super", "text-top", "text-bottom", "top", "bottom"],
        )
        .or_invalid(),
        WhiteSpace => {
            keyword(tokens, &["normal", "pre", "nowrap", "pre-wrap", "pre-line"]).or_invalid()
        }
        WordBreak => keyword(tokens, &["normal", "break-all"]).or_invalid(),
        Hyphens => keyword(tokens, &["none", "manual", "auto"]).or_invalid(),
        HyphenateCharacter => hyphenate_character(tokens).or_invalid(),
        HyphenateLimitChars => hyphenate_limit_chars(tokens).or_invalid(),
        HyphenateLimitZone => length_or_keyword(tokens, false, true, &[]).or_invalid(),
        BlockEllipsis => block_ellipsis(tokens)
            .map(CssProperty::TaggedString)
            .or_invalid(),
        MaxLines => max_lines(tokens).map(CssProperty::TaggedInt).or_invalid(),
        Continue => keyword(tokens, &["auto", "discard"]).or_invalid(),

        ImageOrientation => image_orientation(tokens).or_invalid(),
        ImageRendering => keyword(tokens, &["auto", "crisp-edges", "pixelated"]).or_invalid(),
        ImageResolution => image_resolution(tokens).or_invalid(),
        ObjectFit => {
            keyword(tokens, &["fill", "contain", "cover", "none", "scale-down"]).or_invalid()
        }
        ObjectPosition => object_position(tokens).or_invalid(),

        Page => page(tokens).or_invalid(),
        Size => size(tokens).map(CssProperty::Point).or_invalid(),
        BleedTop | BleedRight | BleedBottom | BleedLeft => {
            length_or_keyword(tokens, true, false, &["auto"]).or_invalid()
        }
        Marks => marks(tokens).or_invalid(),
        BreakBefore | BreakAfter => keyword(
            tokens,
            &[
                "auto",
                "avoid",
                "avoid-page",
                "page",
                "left",
                "right",
                "recto",
                "verso",
                "avoid-column",
                "column",
                "always",
            ],
        )
        .or_invalid(),
        BreakInside => {
            keyword(tokens, &["auto", "avoid", "avoid-page", "avoid-column"]).or_invalid()
        }
        BoxDecorationBreak => keyword(tokens, &["slice", "clone"]).or_invalid(),
        MarginBreak => keyword(tokens, &["auto", "keep", "discard"]).or_invalid(),
        Orphans | Widows => orphans_widows(tokens).or_invalid(),
        FootnoteDisplay => keyword(tokens, &["block", "inline", "compact"]).or_invalid(),
        FootnotePolicy => keyword(tokens, &["auto", "line", "block"]).or_invalid(),
        BookmarkLabel => content::bookmark_label(tokens, base_url)?.or_invalid(),
        BookmarkLevel => bookmark_level(tokens).or_invalid(),
        BookmarkState => keyword(tokens, &["open", "closed"]).or_invalid(),
        StringSet => content::string_set(tokens, base_url)?.or_invalid(),

        Transform => transform(tokens),
        TransformOrigin => transform_origin(tokens).or_invalid(),

        FlexBasis => flex_basis(tokens).or_invalid(),
        FlexDirection => {
            keyword(tokens, &["row", "row-reverse", "column", "column-reverse"]).or_invalid()
        }
        FlexGrow | FlexShrink => flex_factor(tokens).map(CssProperty::Float).or_invalid(),
        FlexWrap => keyword(tokens, &["nowrap", "wrap", "wrap-reverse"]).or_invalid(),
        Order => order(tokens).or_invalid(),
        JustifyContent => justify_content(tokens).or_invalid(),
        JustifyItems => justify_items(tokens).or_invalid(),
        JustifySelf => justify_self(tokens).or_invalid(),
        AlignItems => align_items(tokens).or_invalid(),
        AlignSelf => align_self(tokens).or_invalid(),
        AlignContent => align_content(tokens).or_invalid(),

        GridAutoColumns | GridAutoRows => grid::grid_auto(tokens).or_invalid(),
        GridAutoFlow => grid::grid_auto_flow(tokens)
            .map(CssProperty::Keywords)
            .or_invalid(),
        GridTemplateColumns | GridTemplateRows => grid::grid_template(tokens)
            .map(CssProperty::GridTemplate)
            .or_invalid(),
        GridTemplateAreas => grid::grid_template_areas(tokens)
            .map(CssProperty::GridAreas)
            .or_invalid(),
        GridRowStart | GridRowEnd | GridColumnStart | GridColumnEnd => grid::grid_line(tokens)
            .map(CssProperty::GridLine)
            .or_invalid(),

        Anchor => anchor(tokens).or_invalid(),
        Link => link(tokens, base_url)?.or_invalid(),
        Lang => lang(tokens).or_invalid(),
        Appearance => keyword(tokens, &["auto", "none"]).or_invalid(),
    }
}

fn single(tokens: &[Token]) -> Option<&Token> {
    match tokens {
        [token] => Some(token),
        _ => None,
    }
}

fn keyword(tokens: &[Token], allowed: &[&str]) -> Option<CssProperty> {
    single_keyword(tokens, allowed).map(CssProperty::Keyword)
}

fn keywords_list(tokens: &[Token], allowed: &[&str]) -> Option<CssProperty> {
    comma_separated_list(tokens, |part| single_keyword(part, allowed)).map(CssProperty::Keywords)
}

/// A single length (with the given sign and percentage rules) or one of
/// `keywords`.
fn length_or_keyword(
    tokens: &[Token],
    negative: bool,
    percentage: bool,
    keywords: &[&str],
) -> Option<CssProperty> {
    let token = single(tokens)?;
    if let Some(length) = get_length(token, negative, percentage) {
        return Some(CssProperty::Value(length.into()));
    }
    keyword_in(token, keywords).map(|k| CssProperty::Value(DimOrKeyword::Keyword(k)))
}

// ----- colors -----

pub fn color(tokens: &[Token]) -> Option<CssProperty> {
    parse_color(single(tokens)?).map(CssProperty::Color)
}

fn outline_color(tokens: &[Token]) -> Option<CssProperty> {
    let token = single(tokens)?;
    if token.is_keyword("invert") {
        return Some(CssProperty::Color(Color::CurrentColor));
    }
    parse_color(token).map(CssProperty::Color)
}

// ----- backgrounds -----

pub fn single_background_image(tokens: &[Token], base_url: &str) -> Result<Option<Image>> {
    let token = match single(tokens) {
        Some(token) => token,
        None => return Ok(None),
    };
    if token.is_keyword("none") {
        return Ok(Some(Image::None));
    }
    get_image(token, base_url)
}

fn background_image(tokens: &[Token], base_url: &str) -> Result<Option<CssProperty>> {
    let mut images = Vec::new();
    for part in crate::tokens::split_on_comma(tokens) {
        match single_background_image(&crate::tokens::remove_whitespace(&part), base_url)? {
            Some(image) => images.push(image),
            None => return Ok(None),
        }
    }
    Ok(Some(CssProperty::Images(images)))
}

fn background_position(tokens: &[Token]) -> Option<CssProperty> {
    comma_separated_list(tokens, parse_position).map(CssProperty::Centers)
}

fn object_position(tokens: &[Token]) -> Option<CssProperty> {
    let mut centers = comma_separated_list(tokens, parse_position)?;
    if centers.is_empty() {
        return None;
    }
    Some(CssProperty::Center(centers.swap_remove(0)))
}

/// One `<repeat-style>`, as (horizontal, vertical).
pub fn single_background_repeat(tokens: &[Token]) -> Option<[String; 2]> {
    const STYLES: &[&str] = &["no-repeat", "repeat", "space", "round"];
    let keywords: Vec<String> = tokens.iter().map(get_keyword).collect::<Option<_>>()?;
    match keywords.as_slice() {
        [k] if k == "repeat-x" => Some(["repeat".to_string(), "no-repeat".to_string()]),
        [k] if k == "repeat-y" => Some(["no-repeat".to_string(), "repeat".to_string()]),
        [k] if STYLES.contains(&k.as_str()) => Some([k.clone(), k.clone()]),
        [h, v] if STYLES.contains(&h.as_str()) && STYLES.contains(&v.as_str()) => {
            Some([h.clone(), v.clone()])
        }
        _ => None,
    }
}

fn background_repeat(tokens: &[Token]) -> Option<CssProperty> {
    comma_separated_list(tokens, single_background_repeat).map(CssProperty::Repeats)
}

/// One `<bg-size>`.
pub fn single_background_size(tokens: &[Token]) -> Option<BgSize> {
    let dim_or_auto = |token: &Token| match get_length(token, false, true) {
        Some(length) => Some(DimOrKeyword::from(length)),
        None if token.is_keyword("auto") => Some(DimOrKeyword::auto()),
        None => None,
    };
    match tokens {
        [token] => match get_keyword(token).as_deref() {
            Some(k @ ("contain" | "cover")) => Some(BgSize::Keyword(k.to_string())),
            Some("auto") => Some(BgSize::Explicit(DimOrKeyword::auto(), DimOrKeyword::auto())),
            _ => get_length(token, false, true)
                .map(|length| BgSize::Explicit(length.into(), DimOrKeyword::auto())),
        },
        [width, height] => Some(BgSize::Explicit(dim_or_auto(width)?, dim_or_auto(height)?)),
        _ => None,
    }
}

fn background_size(tokens: &[Token]) -> Option<CssProperty> {
    comma_separated_list(tokens, single_background_size).map(CssProperty::Sizes)
}

/// A single `<box>` keyword.
pub fn single_box(tokens: &[Token]) -> Option<String> {
    single_keyword(tokens, BOXES)
}

fn list_style_image(tokens: &[Token], base_url: &str) -> Result<Option<CssProperty>> {
    let token = match single(tokens) {
        Some(token) => token,
        None => return Ok(None),
    };
    if matches!(token, Token::Function { .. }) && token.function_name() != Some("url") {
        return Ok(None);
    }
    if token.is_keyword("none") {
        return Ok(Some(CssProperty::Image(Image::None)));
    }
    Ok(match get_url(token, base_url)? {
        Some(Reference::External(url)) => Some(CssProperty::Image(Image::Url { url })),
        _ => None,
    })
}

// ----- borders -----

fn border_dims(tokens: &[Token], negative: bool, percentage: bool) -> Option<CssProperty> {
    let lengths = tokens
        .iter()
        .map(|token| get_length(token, negative, percentage))
        .collect::<Option<Vec<_>>>()?;
    match lengths.as_slice() {
        [length] => Some(CssProperty::Point(Point(*length, *length))),
        [horizontal, vertical] => Some(CssProperty::Point(Point(*horizontal, *vertical))),
        _ => None,
    }
}

fn border_width(tokens: &[Token]) -> Option<CssProperty> {
    length_or_keyword(tokens, false, false, &["thin", "medium", "thick"])
}

fn border_image_source(tokens: &[Token], base_url: &str) -> Result<Option<CssProperty>> {
    Ok(single_background_image(tokens, base_url)?.map(CssProperty::Image))
}

fn non_negative_number(token: &Token) -> Option<f32> {
    token.as_number().map(|n| n.value).filter(|&v| v >= 0.0)
}

/// `border-image-slice`: 1 to 4 numbers or percentages, with an optional
/// `fill` keyword first or last.
fn border_image_slice(tokens: &[Token]) -> Option<CssProperty> {
    let mut values = Vec::new();
    let mut fill = false;
    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::Percentage(p) if p.value >= 0.0 => {
                values.push(Dimension::percent(p.value).into())
            }
            Token::Number(n) if n.value >= 0.0 => values.push(Dimension::scalar(n.value).into()),
            _ if token.is_keyword("fill") && !fill && (i == 0 || i == tokens.len() - 1) => {
                fill = true;
                values.push(DimOrKeyword::keyword("fill"));
            }
            _ => return None,
        }
    }
    let count = values.len();
    if (fill && (2..=5).contains(&count)) || (!fill && (1..=4).contains(&count)) {
        Some(CssProperty::Values(values))
    } else {
        None
    }
}

fn border_image_width(tokens: &[Token]) -> Option<CssProperty> {
    let values = tokens
        .iter()
        .map(|token| {
            if token.is_keyword("auto") {
                Some(DimOrKeyword::auto())
            } else if let Some(number) = non_negative_number(token) {
                Some(Dimension::scalar(number).into())
            } else {
                get_length(token, false, true).map(DimOrKeyword::from)
            }
        })
        .collect::<Option<Vec<_>>>()?;
    if (1..=4).contains(&values.len()) {
        Some(CssProperty::Values(values))
    } else {
        None
    }
}

fn border_image_outset(tokens: &[Token]) -> Option<CssProperty> {
    let values = tokens
        .iter()
        .map(|token| match non_negative_number(token) {
            Some(number) => Some(Dimension::scalar(number).into()),
            None => get_length(token, false, false).map(DimOrKeyword::from),
        })
        .collect::<Option<Vec<_>>>()?;
    if (1..=4).contains(&values.len()) {
        Some(CssProperty::Values(values))
    } else {
        None
    }
}

fn border_image_repeat(tokens: &[Token]) -> Option<CssProperty> {
    if !(1..=2).contains(&tokens.len()) {
        return None;
    }
    tokens
        .iter()
        .map(|token| keyword_in(token, &["stretch", "repeat", "round", "space"]))
        .collect::<Option<Vec<_>>>()
        .map(CssProperty::Keywords)
}

// ----- box model -----

fn max_width_height(tokens: &[Token]) -> Option<CssProperty> {
    let token = single(tokens)?;
    if let Some(length) = get_length(token, false, true) {
        return Some(CssProperty::Value(length.into()));
    }
    if token.is_keyword("none") {
        return Some(CssProperty::dimension(f32::INFINITY, Unit::Px));
    }
    None
}

/// `display`: legacy single keywords, or `<display-outside> ||
/// <display-inside> || list-item`.
fn display(tokens: &[Token]) -> Option<CssProperty> {
    let to_display =
        |values: &[&str]| Some(CssProperty::Display(values.iter().map(|v| v.to_string()).collect()));
    if let Some(keyword) = get_single_keyword(tokens) {
        match keyword.as_str() {
            "none" | "table-caption" | "table-row-group" | "table-cell" | "table-header-group"
            | "table-footer-group" | "table-row" | "table-column-group" | "table-column" => {
                return to_display(&[keyword.as_str()]);
            }
            "inline-table" | "inline-flex" | "inline-grid" => {
                return to_display(&["inline", &keyword["inline-".len()..]]);
            }
            "inline-block" => return to_display(&["inline", "flow-root"]),
            _ => {}
        }
    }

    let mut outside: Option<String> = None;
    let mut inside: Option<String> = None;
    let mut list_item = false;
    for token in tokens {
        let value = get_keyword(token)?;
        match value.as_str() {
            "block" | "inline" if outside.is_none() => outside = Some(value),
            "flow" | "flow-root" | "table" | "flex" | "grid" if inside.is_none() => {
                inside = Some(value)
            }
            "list-item" if !list_item => list_item = true,
            _ => return None,
        }
    }
    let outside = outside.unwrap_or_else(|| "block".to_string());
    let inside = inside.unwrap_or_else(|| "flow".to_string());
    if list_item {
        if inside == "flow" || inside == "flow-root" {
            return to_display(&[outside.as_str(), inside.as_str(), "list-item"]);
        }
        return None;
    }
    to_display(&[outside.as_str(), inside.as_str()])
}

/// `clip`: `auto` or `rect(<top>, <right>, <bottom>, <left>)`.
fn clip(tokens: &[Token]) -> Option<CssProperty> {
    let token = single(tokens)?;
    if token.is_keyword("auto") {
        return Some(CssProperty::Values(Vec::new()));
    }
    let (name, args) = parse_function(token)?;
    if name != "rect" || args.len() != 4 {
        return None;
    }
    args.iter()
        .map(|arg| {
            if arg.is_keyword("auto") {
                Some(DimOrKeyword::auto())
            } else {
                get_length(arg, true, false).map(DimOrKeyword::from)
            }
        })
        .collect::<Option<Vec<_>>>()
        .map(CssProperty::Values)
}

/// `position`, including `running(<custom-ident>)`.
fn position(tokens: &[Token]) -> Option<CssProperty> {
    let token = single(tokens)?;
    if let Token::Function { name, args } = token {
        if name == "running" {
            if let [Token::Ident(ident)] = args.as_slice() {
                return Some(CssProperty::Position(Position::Running(ident.clone())));
            }
        }
        return None;
    }
    single_keyword(tokens, &["static", "relative", "absolute", "fixed"])
        .map(|k| CssProperty::Position(Position::Keyword(k)))
}

fn z_index(tokens: &[Token]) -> Option<CssProperty> {
    let token = single(tokens)?;
    if token.is_keyword("auto") {
        return Some(CssProperty::IntOrKeyword(KeywordOr::keyword("auto")));
    }
    token
        .as_int()
        .map(|value| CssProperty::IntOrKeyword(KeywordOr::Values(value)))
}

fn opacity(tokens: &[Token]) -> Option<CssProperty> {
    match single(tokens)? {
        Token::Number(n) => Some(CssProperty::Float(n.value.clamp(0.0, 1.0))),
        Token::Percentage(p) => Some(CssProperty::Float((p.value / 100.0).clamp(0.0, 1.0))),
        _ => None,
    }
}

fn column_count(tokens: &[Token]) -> Option<CssProperty> {
    let token = single(tokens)?;
    if token.is_keyword("auto") {
        return Some(CssProperty::IntOrKeyword(KeywordOr::keyword("auto")));
    }
    match token.as_int() {
        Some(count) if count >= 1 => Some(CssProperty::IntOrKeyword(KeywordOr::Values(count))),
        _ => None,
    }
}

fn orphans_widows(tokens: &[Token]) -> Option<CssProperty> {
    match single(tokens)?.as_int() {
        Some(value) if value >= 1 => Some(CssProperty::Int(value)),
        _ => None,
    }
}

// ----- text -----

fn line_height(tokens: &[Token]) -> Option<CssProperty> {
    let token = single(tokens)?;
    if token.is_keyword("normal") {
        return Some(CssProperty::value_keyword("normal"));
    }
    match token {
        Token::Number(n) if n.value >= 0.0 => Some(CssProperty::dimension(n.value, Unit::Scalar)),
        Token::Percentage(p) if p.value >= 0.0 => Some(CssProperty::dimension(p.value, Unit::Percent)),
        Token::Dimension { .. } => get_length(token, false, false).map(|l| CssProperty::Value(l.into())),
        _ => None,
    }
}

/// `tab-size`: a non-negative integer (a multiple of the space width) or a length.
fn tab_size(tokens: &[Token]) -> Option<CssProperty> {
    let token = single(tokens)?;
    if let Token::Number(n) = token {
        if n.int_value.is_some() && n.value >= 0.0 {
            return Some(CssProperty::dimension(n.value, Unit::Scalar));
        }
    }
    get_length(token, false, false).map(|l| CssProperty::Value(l.into()))
}

/// `text-decoration-line`: `none` or a set of distinct line keywords.
pub fn text_decoration_line(tokens: &[Token]) -> Option<CssProperty> {
    if get_single_keyword(tokens).as_deref() == Some("none") {
        return Some(CssProperty::Decorations(BTreeSet::new()));
    }
    let mut lines = BTreeSet::new();
    for token in tokens {
        let keyword = keyword_in(token, DECORATION_LINES)?;
        if !lines.insert(keyword) {
            return None;
        }
    }
    if lines.is_empty() {
        None
    } else {
        Some(CssProperty::Decorations(lines))
    }
}

fn hyphenate_character(tokens: &[Token]) -> Option<CssProperty> {
    match single(tokens)? {
        Token::String(value) => Some(CssProperty::Keyword(value.clone())),
        token if token.is_keyword("auto") => Some(CssProperty::keyword("\u{2010}")),
        _ => None,
    }
}

/// `hyphenate-limit-chars`: up to three integers or `auto`, defaulting to
/// 5, 2 and 2. With two values the second also sets the third.
fn hyphenate_limit_chars(tokens: &[Token]) -> Option<CssProperty> {
    let value = |token: &Token, default: i32| -> Option<i32> {
        if token.is_keyword("auto") {
            Some(default)
        } else {
            token.as_int()
        }
    };
    let limits = match tokens {
        [total] => [value(total, 5)?, 2, 2],
        [total, left] => {
            let left = value(left, 2)?;
            [value(total, 5)?, left, left]
        }
        [total, left, right] => [value(total, 5)?, value(left, 2)?, value(right, 2)?],
        _ => return None,
    };
    Some(CssProperty::Ints3(limits))
}

pub fn block_ellipsis(tokens: &[Token]) -> Option<TaggedString> {
    match single(tokens)? {
        Token::String(value) => Some(TaggedString::String(value.clone())),
        token => match get_keyword(token)?.as_str() {
            "none" => Some(TaggedString::None),
            "auto" => Some(TaggedString::Auto),
            _ => None,
        },
    }
}

pub fn max_lines(tokens: &[Token]) -> Option<TaggedInt> {
    let token = single(tokens)?;
    if let Some(lines) = token.as_int() {
        return Some(TaggedInt::Int(lines));
    }
    if token.is_keyword("none") {
        return Some(TaggedInt::None);
    }
    None
}

// ----- images -----

/// `image-orientation`: `none`, `from-image`, or `<angle> || flip`.
fn image_orientation(tokens: &[Token]) -> Option<CssProperty> {
    if let Some(keyword) = single_keyword(tokens, &["none", "from-image"]) {
        return Some(CssProperty::ImageOrientation(ImageOrientation::Keyword(keyword)));
    }
    let mut angle: Option<f32> = None;
    let mut flip = false;
    for token in tokens {
        if token.is_keyword("flip") {
            if flip {
                return None;
            }
            flip = true;
        } else if angle.is_none() {
            angle = Some(get_angle(token)?);
        } else {
            return None;
        }
    }
    if angle.is_none() && !flip {
        return None;
    }
    Some(CssProperty::ImageOrientation(ImageOrientation::Angle {
        angle: angle.unwrap_or(0.0),
        flip,
    }))
}

fn image_resolution(tokens: &[Token]) -> Option<CssProperty> {
    get_resolution(single(tokens)?).map(|dppx| CssProperty::dimension(dppx, Unit::Dppx))
}

// ----- paged media -----

fn page(tokens: &[Token]) -> Option<CssProperty> {
    match single(tokens)? {
        Token::Ident(name) if name.eq_ignore_ascii_case("auto") => Some(CssProperty::keyword("auto")),
        Token::Ident(name) => Some(CssProperty::Keyword(name.clone())),
        _ => None,
    }
}

fn a4() -> Point {
    page_size("a4").unwrap_or(Point(
        Dimension::new(210.0, Unit::Mm),
        Dimension::new(297.0, Unit::Mm),
    ))
}

/// `size`: one or two lengths, `auto`, an orientation, a page size name,
/// or a page size with an orientation.
pub fn size(tokens: &[Token]) -> Option<Point> {
    let lengths: Option<Vec<Dimension>> = tokens.iter().map(|t| get_length(t, false, false)).collect();
    if let Some(lengths) = lengths {
        match lengths.as_slice() {
            [length] => return Some(Point(*length, *length)),
            [width, height] => return Some(Point(*width, *height)),
            _ => {}
        }
    }

    let keywords: Vec<String> = tokens.iter().map(get_keyword).collect::<Option<_>>()?;
    let landscape = |Point(width, height): Point| Point(height, width);
    match keywords.as_slice() {
        [keyword] => match keyword.as_str() {
            "auto" | "portrait" => Some(a4()),
            "landscape" => Some(landscape(a4())),
            name => page_size(name),
        },
        [first, second] => {
            let (orientation, name) = if first == "portrait" || first == "landscape" {
                (first, second)
            } else if second == "portrait" || second == "landscape" {
                (second, first)
            } else {
                return None;
            };
            let portrait = page_size(name)?;
            if orientation == "portrait" {
                Some(portrait)
            } else {
                Some(landscape(portrait))
            }
        }
        _ => None,
    }
}

fn marks(tokens: &[Token]) -> Option<CssProperty> {
    let keywords: Vec<String> = tokens.iter().map(get_keyword).collect::<Option<_>>()?;
    let words: Vec<&str> = keywords.iter().map(String::as_str).collect();
    let marks = match words.as_slice() {
        ["crop", "cross"] | ["cross", "crop"] => Marks {
            crop: true,
            cross: true,
        },
        ["crop"] => Marks {
            crop: true,
            cross: false,
        },
        ["cross"] => Marks {
            crop: false,
            cross: true,
        },
        ["none"] => Marks::default(),
        _ => return None,
    };
    Some(CssProperty::Marks(marks))
}

fn bookmark_level(tokens: &[Token]) -> Option<CssProperty> {
    let token = single(tokens)?;
    match token.as_int() {
        Some(level) if level >= 1 => Some(CssProperty::TaggedInt(TaggedInt::Int(level))),
        Some(_) => None,
        None if token.is_keyword("none") => Some(CssProperty::TaggedInt(TaggedInt::None)),
        None => None,
    }
}

// ----- transforms -----

fn transform(tokens: &[Token]) -> Result<CssProperty> {
    if get_single_keyword(tokens).as_deref() == Some("none") {
        return Ok(CssProperty::Transforms(Vec::new()));
    }
    tokens
        .iter()
        .map(transform_function)
        .collect::<Result<Vec<_>>>()
        .map(CssProperty::Transforms)
}

fn transform_function(token: &Token) -> Result<Transform> {
    let (name, args) = parse_function(token).or_invalid()?;
    let scalar = Dimension::scalar;
    let zero = Dimension::px(0.0);
    let transform = |name: &str, args: Vec<Dimension>| -> Result<Transform> {
        Ok(Transform {
            name: name.to_string(),
            args,
        })
    };

    match args.as_slice() {
        [arg] => {
            let angle = get_angle(arg);
            let length = get_length(arg, true, true);
            let number = arg.as_number().map(|n| n.value);
            match (name, angle, length, number) {
                ("rotate", Some(a), _, _) => transform("rotate", vec![scalar(a)]),
                ("skewx" | "skew", Some(a), _, _) => transform("skew", vec![scalar(a), zero]),
                ("skewy", Some(a), _, _) => transform("skew", vec![zero, scalar(a)]),
                ("translatex" | "translate", _, Some(l), _) => transform("translate", vec![l, zero]),
                ("translatey", _, Some(l), _) => transform("translate", vec![zero, l]),
                ("scalex", _, _, Some(n)) => transform("scale", vec![scalar(n), scalar(1.0)]),
                ("scaley", _, _, Some(n)) => transform("scale", vec![scalar(1.0), scalar(n)]),
                ("scale", _, _, Some(n)) => transform("scale", vec![scalar(n), scalar(n)]),
                _ => Err(ValidationError::InvalidValue),
            }
        }
        [_, _] if name == "scale" => {
            let numbers = numbers(&args).or_invalid()?;
            transform("scale", numbers)
        }
        [first, second] if name == "translate" => {
            let x = get_length(first, true, true).or_invalid()?;
            let y = get_length(second, true, true).or_invalid()?;
            transform("translate", vec![x, y])
        }
        [_, _, _, _, _, _] if name == "matrix" => {
            let numbers = numbers(&args).or_invalid()?;
            transform("matrix", numbers)
        }
        _ => Err(ValidationError::InvalidValue),
    }
}

fn numbers(args: &[Token]) -> Option<Vec<Dimension>> {
    args.iter()
        .map(|arg| arg.as_number().map(|n| Dimension::scalar(n.value)))
        .collect()
}

fn transform_origin(tokens: &[Token]) -> Option<CssProperty> {
    // the z component of 3D origins is ignored
    let tokens = if tokens.len() == 3 { &tokens[..2] } else { tokens };
    parse_2d_position(tokens).map(CssProperty::Point)
}

// ----- flex and alignment -----

pub fn flex_basis(tokens: &[Token]) -> Option<CssProperty> {
    length_or_keyword(tokens, false, true, &["auto", "content"])
}

pub fn flex_factor(tokens: &[Token]) -> Option<f32> {
    single(tokens)?.as_number().map(|n| n.value)
}

fn order(tokens: &[Token]) -> Option<CssProperty> {
    single(tokens)?.as_int().map(CssProperty::Int)
}

fn keywords(values: &[&str]) -> Option<CssProperty> {
    Some(CssProperty::keywords(values))
}

/// Shared grammar of the `justify-*` and `align-*` properties:
/// a single keyword, `<overflow-position> <position>`, or a baseline position.
fn alignment(tokens: &[Token], single_words: &[&str], positions: &[&str], baseline: bool) -> Option<CssProperty> {
    let words: Vec<String> = tokens.iter().map(get_keyword).collect::<Option<_>>()?;
    match words.as_slice() {
        [word] if baseline && word == "baseline" => keywords(&["first", "baseline"]),
        [word] if single_words.contains(&word.as_str()) => keywords(&[word.as_str()]),
        [overflow, position]
            if (overflow == "safe" || overflow == "unsafe")
                && positions.contains(&position.as_str()) =>
        {
            keywords(&[overflow.as_str(), position.as_str()])
        }
        [first, second]
            if baseline
                && ((first == "baseline" && (second == "first" || second == "last"))
                    || (second == "baseline" && (first == "first" || first == "last"))) =>
        {
            keywords(&[first.as_str(), second.as_str()])
        }
        _ => None,
    }
}

fn justify_content(tokens: &[Token]) -> Option<CssProperty> {
    alignment(
        tokens,
        &[
            "center", "space-between", "space-around", "space-evenly", "stretch", "normal",
            "flex-start", "flex-end", "start", "end", "left", "right",
        ],
        &["center", "start", "end", "flex-start", "flex-end", "left", "right"],
        false,
    )
}

fn justify_items(tokens: &[Token]) -> Option<CssProperty> {
    if let Some(legacy) = legacy_alignment(tokens) {
        return Some(legacy);
    }
    alignment(
        tokens,
        &[
            "normal", "stretch", "center", "start", "end", "self-start", "self-end", "flex-start",
            "flex-end", "left", "right", "legacy",
        ],
        &[
            "center", "start", "end", "self-start", "self-end", "flex-start", "flex-end", "left",
            "right",
        ],
        true,
    )
}

/// `legacy` combined with `left`, `right` or `center`, in either order.
fn legacy_alignment(tokens: &[Token]) -> Option<CssProperty> {
    let words: Vec<String> = tokens.iter().map(get_keyword).collect::<Option<_>>()?;
    let is_side = |w: &String| w == "left" || w == "right" || w == "center";
    match words.as_slice() {
        [first, second]
            if (first == "legacy" && is_side(second)) || (second == "legacy" && is_side(first)) =>
        {
            keywords(&[first.as_str(), second.as_str()])
        }
        _ => None,
    }
}

fn justify_self(tokens: &[Token]) -> Option<CssProperty> {
    alignment(
        tokens,
        &[
            "auto", "normal", "stretch", "center", "start", "end", "self-start", "self-end",
            "flex-start", "flex-end", "left", "right",
        ],
        &[
            "center", "start", "end", "self-start", "self-end", "flex-start", "flex-end", "left",
            "right",
        ],
        true,
    )
}

const SELF_POSITIONS: &[&str] = &[
    "center", "start", "end", "self-start", "self-end", "flex-start", "flex-end",
];

fn align_items(tokens: &[Token]) -> Option<CssProperty> {
    alignment(
        tokens,
        &[
            "normal", "stretch", "center", "start", "end", "self-start", "self-end", "flex-start",
            "flex-end",
        ],
        SELF_POSITIONS,
        true,
    )
}

fn align_self(tokens: &[Token]) -> Option<CssProperty> {
    alignment(
        tokens,
        &[
            "auto", "normal", "stretch", "center", "start", "end", "self-start", "self-end",
            "flex-start", "flex-end",
        ],
        SELF_POSITIONS,
        true,
    )
}

fn align_content(tokens: &[Token]) -> Option<CssProperty> {
    alignment(
        tokens,
        &[
            "center", "space-between", "space-around", "space-evenly", "stretch", "normal",
            "flex-start", "flex-end", "start", "end",
        ],
        &["center", "start", "end", "flex-start", "flex-end"],
        true,
    )
}

// ----- links and anchors -----

fn attr_name(token: &Token) -> Option<String> {
    match parse_function(token)? {
        ("attr", args) => match args.as_slice() {
            [Token::Ident(name)] => Some(name.clone()),
            _ => None,
        },
        _ => None,
    }
}

fn anchor(tokens: &[Token]) -> Option<CssProperty> {
    let token = single(tokens)?;
    if token.is_keyword("none") {
        return Some(CssProperty::Reference(Reference::None));
    }
    attr_name(token).map(|name| CssProperty::Reference(Reference::Attr(name)))
}

fn link(tokens: &[Token], base_url: &str) -> Result<Option<CssProperty>> {
    let token = match single(tokens) {
        Some(token) => token,
        None => return Ok(None),
    };
    if token.is_keyword("none") {
        return Ok(Some(CssProperty::Reference(Reference::None)));
    }
    if let Some(reference) = get_url(token, base_url)? {
        return Ok(Some(CssProperty::Reference(reference)));
    }
    Ok(attr_name(token).map(|name| CssProperty::Reference(Reference::Attr(name))))
}

fn lang(tokens: &[Token]) -> Option<CssProperty> {
    let token = single(tokens)?;
    if token.is_keyword("none") {
        return Some(CssProperty::Reference(Reference::None));
    }
    if let Token::String(value) = token {
        return Some(CssProperty::Reference(Reference::String(value.clone())));
    }
    attr_name(token).map(|name| CssProperty::Reference(Reference::Attr(name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::Rgba;
    use crate::core::values::Center;
    use crate::tokens::{remove_whitespace, tokenize};

    const BASE: &str = "https://example.org/foo/";

    fn validate(prop: KnownProp, css: &str) -> Result<CssProperty> {
        validate_value(prop, &remove_whitespace(&tokenize(css)), BASE)
    }

    fn invalid(prop: KnownProp, css: &str) -> bool {
        validate(prop, css).is_err()
    }

    #[test]
    fn test_color() {
        assert_eq!(
            validate(KnownProp::BackgroundColor, "#f00").unwrap(),
            CssProperty::Color(Color::Rgba(Rgba {
                r: 1.0,
                g: 0.0,
                b: 0.0,
                a: 1.0
            }))
        );
        assert!(invalid(KnownProp::Color, "red blue"));
        assert_eq!(
            validate_known(KnownProp::Color, &tokenize("currentColor"), BASE).unwrap(),
            CascadedProperty::Default(DefaultKind::Inherit)
        );
        assert_eq!(
            validate(KnownProp::OutlineColor, "invert").unwrap(),
            CssProperty::Color(Color::CurrentColor)
        );
    }

    #[test]
    fn test_lengths() {
        assert_eq!(
            validate(KnownProp::MarginTop, "-1em").unwrap(),
            CssProperty::dimension(-1.0, Unit::Em)
        );
        assert!(invalid(KnownProp::PaddingTop, "-1em"));
        assert!(invalid(KnownProp::PaddingTop, "auto"));
        assert_eq!(
            validate(KnownProp::Width, "0").unwrap(),
            CssProperty::dimension(0.0, Unit::Scalar)
        );
        assert!(invalid(KnownProp::Width, "3"));
        assert_eq!(
            validate(KnownProp::MaxWidth, "none").unwrap(),
            CssProperty::dimension(f32::INFINITY, Unit::Px)
        );
        assert!(invalid(KnownProp::BorderTopWidth, "10%"));
        assert_eq!(
            validate(KnownProp::BorderTopWidth, "thick").unwrap(),
            CssProperty::value_keyword("thick")
        );
    }

    #[test]
    fn test_opacity_zero_is_a_value() {
        assert_eq!(validate(KnownProp::Opacity, "0").unwrap(), CssProperty::Float(0.0));
        assert_eq!(validate(KnownProp::Opacity, "150%").unwrap(), CssProperty::Float(1.0));
        assert_eq!(validate(KnownProp::Opacity, "-2").unwrap(), CssProperty::Float(0.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            validate(KnownProp::Display, "inline-flex").unwrap(),
            CssProperty::Display(vec!["inline".to_string(), "flex".to_string()])
        );
        assert_eq!(
            validate(KnownProp::Display, "list-item").unwrap(),
            CssProperty::Display(vec![
                "block".to_string(),
                "flow".to_string(),
                "list-item".to_string()
            ])
        );
        assert_eq!(
            validate(KnownProp::Display, "inline flow-root").unwrap(),
            CssProperty::Display(vec!["inline".to_string(), "flow-root".to_string()])
        );
        assert!(invalid(KnownProp::Display, "flex list-item"));
        assert!(invalid(KnownProp::Display, "block inline"));
    }

    #[test]
    fn test_backgrounds() {
        assert_eq!(
            validate(KnownProp::BackgroundRepeat, "repeat-x, space round").unwrap(),
            CssProperty::Repeats(vec![
                ["repeat".to_string(), "no-repeat".to_string()],
                ["space".to_string(), "round".to_string()],
            ])
        );
        assert_eq!(
            validate(KnownProp::BackgroundSize, "contain, 10px auto").unwrap(),
            CssProperty::Sizes(vec![
                BgSize::Keyword("contain".to_string()),
                BgSize::Explicit(Dimension::px(10.0).into(), DimOrKeyword::auto()),
            ])
        );
        assert_eq!(
            validate(KnownProp::BackgroundImage, "none, url(a.png)").unwrap(),
            CssProperty::Images(vec![
                Image::None,
                Image::Url {
                    url: "https://example.org/foo/a.png".to_string()
                }
            ])
        );
        assert!(invalid(KnownProp::BackgroundClip, "border-box,"));
        assert_eq!(
            validate(KnownProp::BackgroundPosition, "left 10px top 15px").unwrap(),
            CssProperty::Centers(vec![Center {
                origin_x: "left".to_string(),
                origin_y: "top".to_string(),
                pos: Point(Dimension::px(10.0), Dimension::px(15.0)),
            }])
        );
    }

    #[test]
    fn test_border_image() {
        assert_eq!(
            validate(KnownProp::BorderImageSlice, "10% fill 3").unwrap_err().is_grammar_mismatch(),
            true
        );
        assert_eq!(
            validate(KnownProp::BorderImageSlice, "10% 3 fill").unwrap(),
            CssProperty::Values(vec![
                Dimension::percent(10.0).into(),
                Dimension::scalar(3.0).into(),
                DimOrKeyword::keyword("fill"),
            ])
        );
        assert!(invalid(KnownProp::BorderImageWidth, "1 2 3 4 5"));
        assert!(invalid(KnownProp::BorderImageOutset, "10%"));
        assert!(invalid(KnownProp::BorderImageRepeat, "stretch round space"));
    }

    #[test]
    fn test_text_decoration_line() {
        let expected: BTreeSet<String> = ["overline", "blink", "line-through"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            validate(KnownProp::TextDecorationLine, "overline blink line-through").unwrap(),
            CssProperty::Decorations(expected)
        );
        assert!(invalid(KnownProp::TextDecorationLine, "underline underline"));
        assert!(invalid(KnownProp::TextDecorationLine, "none underline"));
    }

    #[test]
    fn test_size() {
        assert_eq!(
            validate(KnownProp::Size, "a5 landscape").unwrap(),
            CssProperty::Point(Point(
                Dimension::new(210.0, Unit::Mm),
                Dimension::new(148.0, Unit::Mm)
            ))
        );
        assert_eq!(
            validate(KnownProp::Size, "letter").unwrap(),
            CssProperty::Point(Point(
                Dimension::new(8.5, Unit::In),
                Dimension::new(11.0, Unit::In)
            ))
        );
        assert_eq!(
            validate(KnownProp::Size, "10px 20px").unwrap(),
            CssProperty::Point(Point(Dimension::px(10.0), Dimension::px(20.0)))
        );
        assert!(invalid(KnownProp::Size, "a4 a5"));
    }

    #[test]
    fn test_transform() {
        assert_eq!(
            validate(KnownProp::Transform, "translate(10px) scale(2, 3)").unwrap(),
            CssProperty::Transforms(vec![
                Transform {
                    name: "translate".to_string(),
                    args: vec![Dimension::px(10.0), Dimension::px(0.0)]
                },
                Transform {
                    name: "scale".to_string(),
                    args: vec![Dimension::scalar(2.0), Dimension::scalar(3.0)]
                },
            ])
        );
        assert!(invalid(KnownProp::Transform, "rotate(10px)"));
        assert!(invalid(KnownProp::Transform, "matrix(1, 2)"));
        assert_eq!(
            validate(KnownProp::Transform, "none").unwrap(),
            CssProperty::Transforms(vec![])
        );
    }

    #[test]
    fn test_alignment() {
        assert_eq!(
            validate(KnownProp::AlignItems, "baseline").unwrap(),
            CssProperty::keywords(&["first", "baseline"])
        );
        assert_eq!(
            validate(KnownProp::JustifyItems, "right legacy").unwrap(),
            CssProperty::keywords(&["right", "legacy"])
        );
        assert_eq!(
            validate(KnownProp::JustifyContent, "safe center").unwrap(),
            CssProperty::keywords(&["safe", "center"])
        );
        assert!(invalid(KnownProp::JustifyContent, "baseline"));
        assert!(invalid(KnownProp::AlignSelf, "safe left"));
    }

    #[test]
    fn test_misc() {
        assert_eq!(
            validate(KnownProp::Position, "running(header)").unwrap(),
            CssProperty::Position(Position::Running("header".to_string()))
        );
        assert_eq!(
            validate(KnownProp::HyphenateLimitChars, "10 auto").unwrap(),
            CssProperty::Ints3([10, 2, 2])
        );
        match validate(KnownProp::ImageOrientation, "90deg flip").unwrap() {
            CssProperty::ImageOrientation(ImageOrientation::Angle { angle, flip }) => {
                assert!((angle - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
                assert!(flip);
            }
            other => panic!("Expected an angle, got {:?}", other),
        }
        assert_eq!(
            validate(KnownProp::Link, "url(#chapter)").unwrap(),
            CssProperty::Reference(Reference::Internal("chapter".to_string()))
        );
        assert_eq!(
            validate(KnownProp::Lang, "attr(xml:lang)").unwrap_err().is_grammar_mismatch(),
            true
        );
        assert_eq!(
            validate(KnownProp::Lang, "attr(lang)").unwrap(),
            CssProperty::Reference(Reference::Attr("lang".to_string()))
        );
        assert_eq!(
            validate(KnownProp::Clip, "rect(1px, auto, 3px, 4px)").unwrap(),
            CssProperty::Values(vec![
                Dimension::px(1.0).into(),
                DimOrKeyword::auto(),
                Dimension::px(3.0).into(),
                Dimension::px(4.0).into(),
            ])
        );
        assert_eq!(
            validate(KnownProp::MaxLines, "3").unwrap(),
            CssProperty::TaggedInt(TaggedInt::Int(3))
        );
        assert!(invalid(KnownProp::Orphans, "0"));
        assert_eq!(
            validate(KnownProp::TabSize, "4").unwrap(),
            CssProperty::dimension(4.0, Unit::Scalar)
        );
    }

    #[test]
    fn test_every_property_has_a_validator() {
        // initial values round-trip for the properties taking plain keywords
        for &prop in KnownProp::ALL {
            if let CssProperty::Keyword(keyword) = crate::core::registry::Registry::global().initial_value(prop) {
                if prop == KnownProp::HyphenateCharacter {
                    continue;
                }
                let result = validate(prop, keyword);
                assert!(result.is_ok(), "{}: {} rejected", prop, keyword);
            }
        }
    }
}
