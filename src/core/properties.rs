// FILE: src/core/properties.rs

use crate::core::values::PropertyKind;
use serde::{Serialize, Serializer};
use std::fmt;

/// Declares every longhand once: variant, CSS name and value family.
///
/// Discriminants start at 1; 0 is never a valid property.
macro_rules! known_properties {
    (
        $first:ident => $first_name:literal : $first_kind:ident,
        $($variant:ident => $name:literal : $kind:ident,)*
    ) => {
        /// Longhand property IDs
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u16)]
        pub enum KnownProp {
            $first = 1,
            $($variant,)*
        }

        impl KnownProp {
            pub const ALL: &'static [KnownProp] = &[
                KnownProp::$first,
                $(KnownProp::$variant,)*
            ];

            pub fn name(self) -> &'static str {
                match self {
                    KnownProp::$first => $first_name,
                    $(KnownProp::$variant => $name,)*
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $first_name => Some(KnownProp::$first),
                    $($name => Some(KnownProp::$variant),)*
                    _ => None,
                }
            }

            /// Value family every value stored for this property belongs to.
            pub fn kind(self) -> PropertyKind {
                match self {
                    KnownProp::$first => PropertyKind::$first_kind,
                    $(KnownProp::$variant => PropertyKind::$kind,)*
                }
            }
        }
    };
}

known_properties! {
    // colors
    Color => "color": Color,
    BackgroundColor => "background-color": Color,
    BorderTopColor => "border-top-color": Color,
    BorderRightColor => "border-right-color": Color,
    BorderBottomColor => "border-bottom-color": Color,
    BorderLeftColor => "border-left-color": Color,
    ColumnRuleColor => "column-rule-color": Color,
    OutlineColor => "outline-color": Color,
    TextDecorationColor => "text-decoration-color": Color,

    // backgrounds
    BackgroundAttachment => "background-attachment": Keywords,
    BackgroundClip => "background-clip": Keywords,
    BackgroundImage => "background-image": Images,
    BackgroundOrigin => "background-origin": Keywords,
    BackgroundPosition => "background-position": Centers,
    BackgroundRepeat => "background-repeat": Repeats,
    BackgroundSize => "background-size": Sizes,

    // borders
    BorderCollapse => "border-collapse": Keyword,
    BorderSpacing => "border-spacing": Point,
    BorderTopStyle => "border-top-style": Keyword,
    BorderRightStyle => "border-right-style": Keyword,
    BorderBottomStyle => "border-bottom-style": Keyword,
    BorderLeftStyle => "border-left-style": Keyword,
    BorderTopWidth => "border-top-width": Value,
    BorderRightWidth => "border-right-width": Value,
    BorderBottomWidth => "border-bottom-width": Value,
    BorderLeftWidth => "border-left-width": Value,
    BorderTopLeftRadius => "border-top-left-radius": Point,
    BorderTopRightRadius => "border-top-right-radius": Point,
    BorderBottomRightRadius => "border-bottom-right-radius": Point,
    BorderBottomLeftRadius => "border-bottom-left-radius": Point,
    BorderImageSource => "border-image-source": Image,
    BorderImageSlice => "border-image-slice": Values,
    BorderImageWidth => "border-image-width": Values,
    BorderImageOutset => "border-image-outset": Values,
    BorderImageRepeat => "border-image-repeat": Keywords,
    OutlineStyle => "outline-style": Keyword,
    OutlineWidth => "outline-width": Value,

    // multi-column
    ColumnWidth => "column-width": Value,
    ColumnCount => "column-count": IntOrKeyword,
    ColumnGap => "column-gap": Value,
    RowGap => "row-gap": Value,
    ColumnRuleStyle => "column-rule-style": Keyword,
    ColumnRuleWidth => "column-rule-width": Value,
    ColumnFill => "column-fill": Keyword,
    ColumnSpan => "column-span": Keyword,

    // box model
    Top => "top": Value,
    Right => "right": Value,
    Bottom => "bottom": Value,
    Left => "left": Value,
    MarginTop => "margin-top": Value,
    MarginRight => "margin-right": Value,
    MarginBottom => "margin-bottom": Value,
    MarginLeft => "margin-left": Value,
    PaddingTop => "padding-top": Value,
    PaddingRight => "padding-right": Value,
    PaddingBottom => "padding-bottom": Value,
    PaddingLeft => "padding-left": Value,
    Width => "width": Value,
    Height => "height": Value,
    MinWidth => "min-width": Value,
    MinHeight => "min-height": Value,
    MaxWidth => "max-width": Value,
    MaxHeight => "max-height": Value,
    BoxSizing => "box-sizing": Keyword,
    Display => "display": Display,
    Float => "float": Keyword,
    Clear => "clear": Keyword,
    Clip => "clip": Values,
    Position => "position": Position,
    ZIndex => "z-index": IntOrKeyword,
    Overflow => "overflow": Keyword,
    Visibility => "visibility": Keyword,
    Opacity => "opacity": Float,
    Direction => "direction": Keyword,
    UnicodeBidi => "unicode-bidi": Keyword,

    // tables
    CaptionSide => "caption-side": Keyword,
    EmptyCells => "empty-cells": Keyword,
    TableLayout => "table-layout": Keyword,

    // generated content and lists
    Content => "content": Content,
    CounterIncrement => "counter-increment": Counters,
    CounterReset => "counter-reset": Counters,
    CounterSet => "counter-set": Counters,
    Quotes => "quotes": Quotes,
    ListStyleImage => "list-style-image": Image,
    ListStylePosition => "list-style-position": Keyword,
    ListStyleType => "list-style-type": CounterStyle,

    // fonts
    FontFamily => "font-family": Keywords,
    FontFeatureSettings => "font-feature-settings": Counters,
    FontKerning => "font-kerning": Keyword,
    FontLanguageOverride => "font-language-override": Keyword,
    FontSize => "font-size": Value,
    FontStretch => "font-stretch": Keyword,
    FontStyle => "font-style": Keyword,
    FontVariantAlternates => "font-variant-alternates": Keyword,
    FontVariantCaps => "font-variant-caps": Keyword,
    FontVariantEastAsian => "font-variant-east-asian": KeywordList,
    FontVariantLigatures => "font-variant-ligatures": KeywordList,
    FontVariantNumeric => "font-variant-numeric": KeywordList,
    FontVariantPosition => "font-variant-position": Keyword,
    FontVariationSettings => "font-variation-settings": VariationSettings,
    FontWeight => "font-weight": IntOrKeyword,

    // text
    LetterSpacing => "letter-spacing": Value,
    LineHeight => "line-height": Value,
    OverflowWrap => "overflow-wrap": Keyword,
    TabSize => "tab-size": Value,
    TextAlignAll => "text-align-all": Keyword,
    TextAlignLast => "text-align-last": Keyword,
    TextDecorationLine => "text-decoration-line": Decorations,
    TextDecorationStyle => "text-decoration-style": Keyword,
    TextIndent => "text-indent": Value,
    TextOverflow => "text-overflow": Keyword,
    TextTransform => "text-transform": Keyword,
    VerticalAlign => "vertical-align": Value,
    WhiteSpace => "white-space": Keyword,
    WordBreak => "word-break": Keyword,
    WordSpacing => "word-spacing": Value,
    Hyphens => "hyphens": Keyword,
    HyphenateCharacter => "hyphenate-character": Keyword,
    HyphenateLimitChars => "hyphenate-limit-chars": Ints3,
    HyphenateLimitZone => "hyphenate-limit-zone": Value,
    BlockEllipsis => "block-ellipsis": TaggedString,
    MaxLines => "max-lines": TaggedInt,
    Continue => "continue": Keyword,

    // images
    ImageOrientation => "image-orientation": ImageOrientation,
    ImageRendering => "image-rendering": Keyword,
    ImageResolution => "image-resolution": Value,
    ObjectFit => "object-fit": Keyword,
    ObjectPosition => "object-position": Center,

    // paged media and fragmentation
    Page => "page": Keyword,
    Size => "size": Point,
    BleedTop => "bleed-top": Value,
    BleedRight => "bleed-right": Value,
    BleedBottom => "bleed-bottom": Value,
    BleedLeft => "bleed-left": Value,
    Marks => "marks": Marks,
    BreakBefore => "break-before": Keyword,
    BreakAfter => "break-after": Keyword,
    BreakInside => "break-inside": Keyword,
    BoxDecorationBreak => "box-decoration-break": Keyword,
    MarginBreak => "margin-break": Keyword,
    Orphans => "orphans": Int,
    Widows => "widows": Int,
    FootnoteDisplay => "footnote-display": Keyword,
    FootnotePolicy => "footnote-policy": Keyword,
    BookmarkLabel => "bookmark-label": ContentList,
    BookmarkLevel => "bookmark-level": TaggedInt,
    BookmarkState => "bookmark-state": Keyword,
    StringSet => "string-set": StringSet,

    // transforms
    Transform => "transform": Transforms,
    TransformOrigin => "transform-origin": Point,

    // flexbox and alignment
    FlexBasis => "flex-basis": Value,
    FlexDirection => "flex-direction": Keyword,
    FlexGrow => "flex-grow": Float,
    FlexShrink => "flex-shrink": Float,
    FlexWrap => "flex-wrap": Keyword,
    Order => "order": Int,
    JustifyContent => "justify-content": Keywords,
    JustifyItems => "justify-items": Keywords,
    JustifySelf => "justify-self": Keywords,
    AlignItems => "align-items": Keywords,
    AlignSelf => "align-self": Keywords,
    AlignContent => "align-content": Keywords,

    // grid
    GridAutoColumns => "grid-auto-columns": GridAuto,
    GridAutoRows => "grid-auto-rows": GridAuto,
    GridAutoFlow => "grid-auto-flow": Keywords,
    GridTemplateColumns => "grid-template-columns": GridTemplate,
    GridTemplateRows => "grid-template-rows": GridTemplate,
    GridTemplateAreas => "grid-template-areas": GridAreas,
    GridRowStart => "grid-row-start": GridLine,
    GridRowEnd => "grid-row-end": GridLine,
    GridColumnStart => "grid-column-start": GridLine,
    GridColumnEnd => "grid-column-end": GridLine,

    // proprietary and misc
    Anchor => "anchor": Reference,
    Link => "link": Reference,
    Lang => "lang": Reference,
    Appearance => "appearance": Keyword,
}

impl KnownProp {
    /// Position in dense tables indexed by property.
    pub fn index(self) -> usize {
        self as usize - 1
    }
}

impl fmt::Display for KnownProp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for KnownProp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

macro_rules! shorthands {
    ($($variant:ident => $name:literal [$($longhand:ident),+ $(,)?],)+) => {
        /// Shorthand property IDs, each with its longhands in expansion order.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Shorthand {
            $($variant,)+
        }

        impl Shorthand {
            pub const ALL: &'static [Shorthand] = &[$(Shorthand::$variant,)+];

            pub fn name(self) -> &'static str {
                match self {
                    $(Shorthand::$variant => $name,)+
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Shorthand::$variant),)+
                    _ => None,
                }
            }

            pub fn longhands(self) -> &'static [KnownProp] {
                match self {
                    $(Shorthand::$variant => &[$(KnownProp::$longhand),+],)+
                }
            }
        }
    };
}

shorthands! {
    Margin => "margin" [MarginTop, MarginRight, MarginBottom, MarginLeft],
    Padding => "padding" [PaddingTop, PaddingRight, PaddingBottom, PaddingLeft],
    BorderWidth => "border-width" [BorderTopWidth, BorderRightWidth, BorderBottomWidth, BorderLeftWidth],
    BorderStyle => "border-style" [BorderTopStyle, BorderRightStyle, BorderBottomStyle, BorderLeftStyle],
    BorderColor => "border-color" [BorderTopColor, BorderRightColor, BorderBottomColor, BorderLeftColor],
    Bleed => "bleed" [BleedTop, BleedRight, BleedBottom, BleedLeft],
    BorderRadius => "border-radius" [
        BorderTopLeftRadius, BorderTopRightRadius, BorderBottomRightRadius, BorderBottomLeftRadius,
    ],
    Border => "border" [
        BorderTopWidth, BorderTopStyle, BorderTopColor,
        BorderRightWidth, BorderRightStyle, BorderRightColor,
        BorderBottomWidth, BorderBottomStyle, BorderBottomColor,
        BorderLeftWidth, BorderLeftStyle, BorderLeftColor,
    ],
    BorderTop => "border-top" [BorderTopWidth, BorderTopStyle, BorderTopColor],
    BorderRight => "border-right" [BorderRightWidth, BorderRightStyle, BorderRightColor],
    BorderBottom => "border-bottom" [BorderBottomWidth, BorderBottomStyle, BorderBottomColor],
    BorderLeft => "border-left" [BorderLeftWidth, BorderLeftStyle, BorderLeftColor],
    Outline => "outline" [OutlineWidth, OutlineStyle, OutlineColor],
    ColumnRule => "column-rule" [ColumnRuleWidth, ColumnRuleStyle, ColumnRuleColor],
    Background => "background" [
        BackgroundImage, BackgroundRepeat, BackgroundAttachment, BackgroundPosition,
        BackgroundSize, BackgroundClip, BackgroundOrigin, BackgroundColor,
    ],
    Font => "font" [
        FontStyle, FontVariantCaps, FontWeight, FontStretch, FontSize, LineHeight, FontFamily,
    ],
    FontVariant => "font-variant" [
        FontVariantAlternates, FontVariantCaps, FontVariantEastAsian,
        FontVariantLigatures, FontVariantNumeric, FontVariantPosition,
    ],
    ListStyle => "list-style" [ListStyleImage, ListStylePosition, ListStyleType],
    TextDecoration => "text-decoration" [TextDecorationLine, TextDecorationStyle, TextDecorationColor],
    Flex => "flex" [FlexGrow, FlexShrink, FlexBasis],
    FlexFlow => "flex-flow" [FlexDirection, FlexWrap],
    Columns => "columns" [ColumnWidth, ColumnCount],
    LineClamp => "line-clamp" [MaxLines, Continue, BlockEllipsis],
    TextAlign => "text-align" [TextAlignAll, TextAlignLast],
    WordWrap => "word-wrap" [OverflowWrap],
    PageBreakBefore => "page-break-before" [BreakBefore],
    PageBreakAfter => "page-break-after" [BreakAfter],
    PageBreakInside => "page-break-inside" [BreakInside],
    BorderImage => "border-image" [
        BorderImageSource, BorderImageSlice, BorderImageWidth, BorderImageOutset, BorderImageRepeat,
    ],
    Gap => "gap" [RowGap, ColumnGap],
    GridTemplate => "grid-template" [GridTemplateRows, GridTemplateColumns, GridTemplateAreas],
    Grid => "grid" [
        GridTemplateRows, GridTemplateColumns, GridTemplateAreas,
        GridAutoRows, GridAutoColumns, GridAutoFlow,
    ],
    GridRow => "grid-row" [GridRowStart, GridRowEnd],
    GridColumn => "grid-column" [GridColumnStart, GridColumnEnd],
    GridArea => "grid-area" [GridRowStart, GridColumnStart, GridRowEnd, GridColumnEnd],
}

impl Shorthand {
    pub fn contains(self, prop: KnownProp) -> bool {
        self.longhands().contains(&prop)
    }
}

impl fmt::Display for Shorthand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Shorthand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Key of a declaration: a known longhand or a `--custom` property.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum PropKey {
    Known(KnownProp),
    Custom(String),
}

impl PropKey {
    pub fn as_known(&self) -> Option<KnownProp> {
        match self {
            PropKey::Known(prop) => Some(*prop),
            PropKey::Custom(_) => None,
        }
    }
}

impl From<KnownProp> for PropKey {
    fn from(prop: KnownProp) -> Self {
        PropKey::Known(prop)
    }
}

impl fmt::Display for PropKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropKey::Known(prop) => f.write_str(prop.name()),
            PropKey::Custom(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_discriminants_start_at_one() {
        assert_eq!(KnownProp::ALL[0] as u16, 1);
        for (i, prop) in KnownProp::ALL.iter().enumerate() {
            assert_eq!(prop.index(), i);
        }
    }

    #[test]
    fn test_names_unique_and_round_trip() {
        let mut seen = HashSet::new();
        for &prop in KnownProp::ALL {
            assert!(seen.insert(prop.name()), "duplicate name {}", prop.name());
            assert_eq!(KnownProp::from_name(prop.name()), Some(prop));
        }
        assert_eq!(KnownProp::from_name("margin"), None);
        assert_eq!(KnownProp::from_name("Color"), None);
    }

    #[test]
    fn test_shorthands() {
        assert_eq!(Shorthand::from_name("border-radius"), Some(Shorthand::BorderRadius));
        assert_eq!(Shorthand::Border.longhands().len(), 12);
        assert!(Shorthand::Font.contains(KnownProp::LineHeight));
        for &shorthand in Shorthand::ALL {
            assert_eq!(Shorthand::from_name(shorthand.name()), Some(shorthand));
            assert!(KnownProp::from_name(shorthand.name()).is_none());
        }
    }

    #[test]
    fn test_prop_key_display() {
        assert_eq!(PropKey::from(KnownProp::MarginTop).to_string(), "margin-top");
        assert_eq!(PropKey::Custom("--x".to_string()).to_string(), "--x");
    }
}
