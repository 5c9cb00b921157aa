// FILE: src/core/initial.rs

use crate::colors::Color;
use crate::core::constants::page_size;
use crate::core::properties::KnownProp;
use crate::core::units::Unit;
use crate::core::values::*;
use std::collections::BTreeSet;

fn px(value: f32) -> CssProperty {
    CssProperty::dimension(value, Unit::Px)
}

fn zero_point() -> CssProperty {
    CssProperty::Point(Point(Dimension::px(0.0), Dimension::px(0.0)))
}

/// Initial value of a longhand.
///
/// The match is exhaustive so a property added to the table without an
/// initial value does not compile.
pub fn initial_value(prop: KnownProp) -> CssProperty {
    use KnownProp::*;

    match prop {
        Color => CssProperty::Color(crate::colors::Color::BLACK),
        BackgroundColor => CssProperty::Color(crate::colors::Color::TRANSPARENT),
        BorderTopColor | BorderRightColor | BorderBottomColor | BorderLeftColor
        | ColumnRuleColor | OutlineColor | TextDecorationColor => {
            CssProperty::Color(current_color())
        }

        BackgroundAttachment => CssProperty::keywords(&["scroll"]),
        BackgroundClip => CssProperty::keywords(&["border-box"]),
        BackgroundImage => CssProperty::Images(vec![Image::None]),
        BackgroundOrigin => CssProperty::keywords(&["padding-box"]),
        BackgroundPosition => CssProperty::Centers(vec![Center::top_left(Point(
            Dimension::percent(0.0),
            Dimension::percent(0.0),
        ))]),
        BackgroundRepeat => {
            CssProperty::Repeats(vec![["repeat".to_string(), "repeat".to_string()]])
        }
        BackgroundSize => CssProperty::Sizes(vec![BgSize::Explicit(
            DimOrKeyword::auto(),
            DimOrKeyword::auto(),
        )]),

        BorderCollapse => CssProperty::keyword("separate"),
        BorderSpacing => zero_point(),
        BorderTopStyle | BorderRightStyle | BorderBottomStyle | BorderLeftStyle | OutlineStyle
        | ColumnRuleStyle => CssProperty::keyword("none"),
        BorderTopWidth | BorderRightWidth | BorderBottomWidth | BorderLeftWidth | OutlineWidth
        | ColumnRuleWidth => px(3.0),
        BorderTopLeftRadius | BorderTopRightRadius | BorderBottomRightRadius
        | BorderBottomLeftRadius => zero_point(),
        BorderImageSource => CssProperty::Image(Image::None),
        BorderImageSlice => CssProperty::Values(vec![Dimension::percent(100.0).into()]),
        BorderImageWidth => CssProperty::Values(vec![Dimension::scalar(1.0).into()]),
        BorderImageOutset => CssProperty::Values(vec![Dimension::scalar(0.0).into()]),
        BorderImageRepeat => CssProperty::keywords(&["stretch"]),

        ColumnWidth => CssProperty::value_keyword("auto"),
        ColumnCount => CssProperty::IntOrKeyword(KeywordOr::keyword("auto")),
        ColumnGap => CssProperty::dimension(1.0, Unit::Em),
        RowGap => CssProperty::value_keyword("normal"),
        ColumnFill => CssProperty::keyword("balance"),
        ColumnSpan => CssProperty::keyword("none"),

        Top | Right | Bottom | Left => CssProperty::value_keyword("auto"),
        MarginTop | MarginRight | MarginBottom | MarginLeft => px(0.0),
        PaddingTop | PaddingRight | PaddingBottom | PaddingLeft => px(0.0),
        Width | Height | MinWidth | MinHeight => CssProperty::value_keyword("auto"),
        MaxWidth | MaxHeight => px(f32::INFINITY),
        BoxSizing => CssProperty::keyword("content-box"),
        Display => CssProperty::Display(vec!["inline".to_string(), "flow".to_string()]),
        Float | Clear => CssProperty::keyword("none"),
        Clip => CssProperty::Values(Vec::new()),
        Position => CssProperty::Position(crate::core::values::Position::Keyword(
            "static".to_string(),
        )),
        ZIndex => CssProperty::IntOrKeyword(KeywordOr::keyword("auto")),
        Overflow => CssProperty::keyword("visible"),
        Visibility => CssProperty::keyword("visible"),
        Opacity => CssProperty::Float(1.0),
        Direction => CssProperty::keyword("ltr"),
        UnicodeBidi => CssProperty::keyword("normal"),

        CaptionSide => CssProperty::keyword("top"),
        EmptyCells => CssProperty::keyword("show"),
        TableLayout => CssProperty::keyword("auto"),

        Content => CssProperty::Content(KeywordOr::keyword("normal")),
        CounterIncrement | CounterReset | CounterSet => {
            CssProperty::Counters(KeywordOr::Values(Vec::new()))
        }
        Quotes => CssProperty::Quotes(KeywordOr::Values(QuotePairs {
            open: vec!["\u{201c}".to_string(), "\u{2018}".to_string()],
            close: vec!["\u{201d}".to_string(), "\u{2019}".to_string()],
        })),
        ListStyleImage => CssProperty::Image(Image::None),
        ListStylePosition => CssProperty::keyword("outside"),
        ListStyleType => CssProperty::CounterStyle(CounterStyle::name("disc")),

        FontFamily => CssProperty::keywords(&["serif"]),
        FontFeatureSettings => CssProperty::Counters(KeywordOr::keyword("normal")),
        FontKerning => CssProperty::keyword("auto"),
        FontLanguageOverride => CssProperty::keyword("normal"),
        FontSize => px(16.0),
        FontStretch | FontStyle | FontVariantAlternates | FontVariantCaps
        | FontVariantPosition => CssProperty::keyword("normal"),
        FontVariantEastAsian | FontVariantLigatures | FontVariantNumeric => {
            CssProperty::KeywordList(KeywordOr::keyword("normal"))
        }
        FontVariationSettings => CssProperty::VariationSettings(KeywordOr::keyword("normal")),
        FontWeight => CssProperty::IntOrKeyword(KeywordOr::Values(400)),

        LetterSpacing => CssProperty::value_keyword("normal"),
        LineHeight => CssProperty::value_keyword("normal"),
        OverflowWrap => CssProperty::keyword("normal"),
        TabSize => CssProperty::dimension(8.0, Unit::Scalar),
        TextAlignAll => CssProperty::keyword("start"),
        TextAlignLast => CssProperty::keyword("auto"),
        TextDecorationLine => CssProperty::Decorations(BTreeSet::new()),
        TextDecorationStyle => CssProperty::keyword("solid"),
        TextIndent => px(0.0),
        TextOverflow => CssProperty::keyword("clip"),
        TextTransform => CssProperty::keyword("none"),
        VerticalAlign => CssProperty::value_keyword("baseline"),
        WhiteSpace => CssProperty::keyword("normal"),
        WordBreak => CssProperty::keyword("normal"),
        WordSpacing => px(0.0),
        Hyphens => CssProperty::keyword("manual"),
        HyphenateCharacter => CssProperty::keyword("-"),
        HyphenateLimitChars => CssProperty::Ints3([5, 2, 2]),
        HyphenateLimitZone => px(0.0),
        BlockEllipsis => CssProperty::TaggedString(TaggedString::None),
        MaxLines => CssProperty::TaggedInt(TaggedInt::None),
        Continue => CssProperty::keyword("auto"),

        ImageOrientation => CssProperty::ImageOrientation(
            crate::core::values::ImageOrientation::Keyword("from-image".to_string()),
        ),
        ImageRendering => CssProperty::keyword("auto"),
        ImageResolution => CssProperty::dimension(1.0, Unit::Dppx),
        ObjectFit => CssProperty::keyword("fill"),
        ObjectPosition => CssProperty::Center(crate::core::values::Center::top_left(Point(
            Dimension::percent(50.0),
            Dimension::percent(50.0),
        ))),

        Page => CssProperty::keyword("auto"),
        Size => CssProperty::Point(page_size("a4").unwrap_or(A4_FALLBACK)),
        BleedTop | BleedRight | BleedBottom | BleedLeft => CssProperty::value_keyword("auto"),
        Marks => CssProperty::Marks(crate::core::values::Marks::default()),
        BreakBefore | BreakAfter | BreakInside => CssProperty::keyword("auto"),
        BoxDecorationBreak => CssProperty::keyword("slice"),
        MarginBreak => CssProperty::keyword("auto"),
        Orphans | Widows => CssProperty::Int(2),
        FootnoteDisplay => CssProperty::keyword("block"),
        FootnotePolicy => CssProperty::keyword("auto"),
        BookmarkLabel => CssProperty::ContentList(vec![ContentItem::content("text")]),
        BookmarkLevel => CssProperty::TaggedInt(TaggedInt::None),
        BookmarkState => CssProperty::keyword("open"),
        StringSet => CssProperty::StringSet(KeywordOr::keyword("none")),

        Transform => CssProperty::Transforms(Vec::new()),
        TransformOrigin => CssProperty::Point(Point(
            Dimension::percent(50.0),
            Dimension::percent(50.0),
        )),

        FlexBasis => CssProperty::value_keyword("auto"),
        FlexDirection => CssProperty::keyword("row"),
        FlexGrow => CssProperty::Float(0.0),
        FlexShrink => CssProperty::Float(1.0),
        FlexWrap => CssProperty::keyword("nowrap"),
        Order => CssProperty::Int(0),
        JustifyContent | JustifyItems | AlignItems | AlignContent => {
            CssProperty::keywords(&["normal"])
        }
        JustifySelf | AlignSelf => CssProperty::keywords(&["auto"]),

        GridAutoColumns | GridAutoRows => CssProperty::GridAuto(vec![GridDims::auto()]),
        GridAutoFlow => CssProperty::keywords(&["row"]),
        GridTemplateColumns | GridTemplateRows => CssProperty::GridTemplate(GridTemplate::None),
        GridTemplateAreas => CssProperty::GridAreas(GridAreas::None),
        GridRowStart | GridRowEnd | GridColumnStart | GridColumnEnd => {
            CssProperty::GridLine(GridLine::Auto)
        }

        Anchor | Link | Lang => CssProperty::Reference(Reference::None),
        Appearance => CssProperty::keyword("none"),
    }
}

const A4_FALLBACK: Point = Point(
    Dimension::new(210.0, Unit::Mm),
    Dimension::new(297.0, Unit::Mm),
);

fn current_color() -> Color {
    Color::CurrentColor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_values_match_kind() {
        for &prop in KnownProp::ALL {
            let value = initial_value(prop);
            assert_eq!(
                value.kind(),
                prop.kind(),
                "initial value of {} has the wrong family",
                prop
            );
        }
    }

    #[test]
    fn test_some_initial_values() {
        assert_eq!(initial_value(KnownProp::Opacity), CssProperty::Float(1.0));
        assert_eq!(
            initial_value(KnownProp::Size),
            CssProperty::Point(A4_FALLBACK)
        );
        assert_eq!(
            initial_value(KnownProp::BorderTopColor),
            CssProperty::Color(Color::CurrentColor)
        );
        assert_eq!(
            initial_value(KnownProp::ColumnGap),
            CssProperty::dimension(1.0, Unit::Em)
        );
        assert_eq!(initial_value(KnownProp::HyphenateCharacter), CssProperty::keyword("-"));
        match initial_value(KnownProp::Quotes) {
            CssProperty::Quotes(KeywordOr::Values(pairs)) => {
                assert_eq!(pairs.open, vec!["\u{201c}", "\u{2018}"]);
                assert_eq!(pairs.close, vec!["\u{201d}", "\u{2019}"]);
            }
            other => panic!("unexpected quotes initial value: {:?}", other),
        }
    }
}
