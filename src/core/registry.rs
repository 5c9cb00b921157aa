// FILE: src/core/registry.rs

use crate::core::initial::initial_value;
use crate::core::properties::{KnownProp, Shorthand};
use crate::core::values::CssProperty;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

/// Prefix of the properties owned by this engine.
pub const PROPRIETARY_PREFIX: &str = "-weasy-";

const INHERITED: &[KnownProp] = {
    use KnownProp::*;
    &[
        BorderCollapse,
        BorderSpacing,
        CaptionSide,
        Color,
        Direction,
        EmptyCells,
        FontFamily,
        FontFeatureSettings,
        FontKerning,
        FontLanguageOverride,
        FontSize,
        FontStretch,
        FontStyle,
        FontVariantAlternates,
        FontVariantCaps,
        FontVariantEastAsian,
        FontVariantLigatures,
        FontVariantNumeric,
        FontVariantPosition,
        FontVariationSettings,
        FontWeight,
        Hyphens,
        HyphenateCharacter,
        HyphenateLimitChars,
        HyphenateLimitZone,
        ImageRendering,
        ImageResolution,
        Lang,
        LetterSpacing,
        LineHeight,
        Link,
        ListStyleImage,
        ListStylePosition,
        ListStyleType,
        Orphans,
        OverflowWrap,
        Quotes,
        TabSize,
        TextAlignAll,
        TextAlignLast,
        TextIndent,
        TextTransform,
        Visibility,
        WhiteSpace,
        Widows,
        WordBreak,
        WordSpacing,
    ]
};

// Properties applying to the table wrapper box rather than the table box.
const TABLE_WRAPPER_BOX: &[KnownProp] = {
    use KnownProp::*;
    &[
        Bottom,
        BreakAfter,
        BreakBefore,
        BreakInside,
        Clear,
        CounterIncrement,
        CounterReset,
        CounterSet,
        Float,
        Left,
        MarginTop,
        MarginBottom,
        MarginLeft,
        MarginRight,
        Opacity,
        Overflow,
        Position,
        Right,
        Top,
        Transform,
        TransformOrigin,
        VerticalAlign,
        ZIndex,
    ]
};

// Properties whose initial value is not the computed value of `initial`.
const INITIAL_NOT_COMPUTED: &[KnownProp] = {
    use KnownProp::*;
    &[
        Display,
        ColumnGap,
        BleedTop,
        BleedLeft,
        BleedBottom,
        BleedRight,
        OutlineWidth,
        OutlineColor,
        ColumnRuleWidth,
        ColumnRuleColor,
        BorderTopWidth,
        BorderLeftWidth,
        BorderBottomWidth,
        BorderRightWidth,
        BorderTopColor,
        BorderLeftColor,
        BorderBottomColor,
        BorderRightColor,
    ]
};

const NOT_PRINT_MEDIA: &[&str] = &[
    // Aural media
    "azimuth",
    "cue",
    "cue-after",
    "cue-before",
    "elevation",
    "pause",
    "pause-after",
    "pause-before",
    "pitch-range",
    "pitch",
    "play-during",
    "richness",
    "speak-header",
    "speak-numeral",
    "speak-punctuation",
    "speak",
    "speech-rate",
    "stress",
    "voice-family",
    "volume",
    // Animations, transitions, timelines
    "animation",
    "animation-composition",
    "animation-delay",
    "animation-direction",
    "animation-duration",
    "animation-fill-mode",
    "animation-iteration-count",
    "animation-name",
    "animation-play-state",
    "animation-range",
    "animation-range-end",
    "animation-range-start",
    "animation-timeline",
    "animation-timing-function",
    "timeline-scope",
    "transition",
    "transition-delay",
    "transition-duration",
    "transition-property",
    "transition-timing-function",
    "view-timeline",
    "view-timeline-axis",
    "view-timeline-inset",
    "view-timeline-name",
    "view-transition-name",
    "will-change",
    // Dynamic and interactive
    "caret",
    "caret-color",
    "caret-shape",
    "cursor",
    "field-sizing",
    "pointer-event",
    "resize",
    "touch-action",
    // Browser viewport scrolling
    "overscroll-behavior",
    "overscroll-behavior-block",
    "overscroll-behavior-inline",
    "overscroll-behavior-x",
    "overscroll-behavior-y",
    "scroll-behavior",
    "scroll-margin",
    "scroll-margin-block",
    "scroll-margin-block-end",
    "scroll-margin-block-start",
    "scroll-margin-bottom",
    "scroll-margin-inline",
    "scroll-margin-inline-end",
    "scroll-margin-inline-start",
    "scroll-margin-left",
    "scroll-margin-right",
    "scroll-margin-top",
    "scroll-padding",
    "scroll-padding-block",
    "scroll-padding-block-end",
    "scroll-padding-block-start",
    "scroll-padding-bottom",
    "scroll-padding-inline",
    "scroll-padding-inline-end",
    "scroll-padding-inline-start",
    "scroll-padding-left",
    "scroll-padding-right",
    "scroll-padding-top",
    "scroll-snap-align",
    "scroll-snap-stop",
    "scroll-snap-type",
    "scroll-timeline",
    "scroll-timeline-axis",
    "scroll-timeline-name",
    "scrollbar-color",
    "scrollbar-gutter",
    "scrollbar-width",
];

const PROPRIETARY: &[&str] = &["anchor", "link", "lang"];

const UNSTABLE: &[&str] = &[
    "transform-origin",
    "size",
    "hyphens",
    "hyphenate-character",
    "hyphenate-limit-zone",
    "hyphenate-limit-chars",
    "bookmark-label",
    "bookmark-level",
    "bookmark-state",
    "string-set",
    "column-rule-color",
    "column-rule-style",
    "column-rule-width",
    "column-width",
    "column-span",
    "column-gap",
    "column-fill",
    "column-count",
    "bleed-left",
    "bleed-right",
    "bleed-top",
    "bleed-bottom",
    "marks",
    "continue",
    "max-lines",
];

/// Immutable property tables, built once and shared.
#[derive(Debug)]
pub struct Registry {
    by_name: HashMap<&'static str, KnownProp>,
    shorthands: HashMap<&'static str, Shorthand>,
    inherited: HashSet<KnownProp>,
    table_wrapper: HashSet<KnownProp>,
    initial_not_computed: HashSet<KnownProp>,
    not_print: HashSet<&'static str>,
    proprietary: HashSet<&'static str>,
    unstable: HashSet<&'static str>,
    initial_values: Vec<CssProperty>,
}

static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// Builds the registry tables from the static property lists.
pub fn build_registry() -> Registry {
    let by_name = KnownProp::ALL.iter().map(|&p| (p.name(), p)).collect();
    let shorthands = Shorthand::ALL.iter().map(|&s| (s.name(), s)).collect();
    let initial_values = KnownProp::ALL.iter().map(|&p| initial_value(p)).collect();
    log::debug!(
        "Built property registry: {} longhands, {} shorthands",
        KnownProp::ALL.len(),
        Shorthand::ALL.len()
    );
    Registry {
        by_name,
        shorthands,
        inherited: INHERITED.iter().copied().collect(),
        table_wrapper: TABLE_WRAPPER_BOX.iter().copied().collect(),
        initial_not_computed: INITIAL_NOT_COMPUTED.iter().copied().collect(),
        not_print: NOT_PRINT_MEDIA.iter().copied().collect(),
        proprietary: PROPRIETARY.iter().copied().collect(),
        unstable: UNSTABLE.iter().copied().collect(),
        initial_values,
    }
}

impl Registry {
    pub fn global() -> &'static Registry {
        REGISTRY.get_or_init(build_registry)
    }

    pub fn name_of(&self, prop: KnownProp) -> &'static str {
        prop.name()
    }

    pub fn property_of(&self, name: &str) -> Option<KnownProp> {
        self.by_name.get(name).copied()
    }

    pub fn shorthand_of(&self, name: &str) -> Option<Shorthand> {
        self.shorthands.get(name).copied()
    }

    pub fn is_inherited(&self, prop: KnownProp) -> bool {
        self.inherited.contains(&prop)
    }

    pub fn is_table_wrapper_box_property(&self, prop: KnownProp) -> bool {
        self.table_wrapper.contains(&prop)
    }

    pub fn is_initial_not_computed(&self, prop: KnownProp) -> bool {
        self.initial_not_computed.contains(&prop)
    }

    pub fn is_print_applicable(&self, name: &str) -> bool {
        !self.not_print.contains(name)
    }

    pub fn is_proprietary(&self, name: &str) -> bool {
        self.proprietary.contains(name)
    }

    pub fn is_unstable(&self, name: &str) -> bool {
        self.unstable.contains(name)
    }

    pub fn initial_value(&self, prop: KnownProp) -> &CssProperty {
        &self.initial_values[prop.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        let registry = build_registry();
        for &prop in KnownProp::ALL {
            assert_eq!(registry.property_of(registry.name_of(prop)), Some(prop));
        }
        assert_eq!(registry.property_of("cursor"), None);
    }

    #[test]
    fn test_initial_values_total() {
        let registry = Registry::global();
        for &prop in KnownProp::ALL {
            assert_eq!(registry.initial_value(prop).kind(), prop.kind(), "{}", prop);
        }
    }

    #[test]
    fn test_sets() {
        let registry = Registry::global();
        assert!(registry.is_inherited(KnownProp::Color));
        assert!(registry.is_inherited(KnownProp::FontVariantCaps));
        assert!(!registry.is_inherited(KnownProp::MarginTop));
        assert!(registry.is_table_wrapper_box_property(KnownProp::MarginTop));
        assert!(!registry.is_table_wrapper_box_property(KnownProp::PaddingTop));
        assert!(registry.is_initial_not_computed(KnownProp::Display));
        assert!(!registry.is_print_applicable("cursor"));
        assert!(!registry.is_print_applicable("scroll-margin-top"));
        assert!(registry.is_print_applicable("color"));
        assert!(registry.is_proprietary("link"));
        assert!(registry.is_unstable("max-lines"));
    }

    #[test]
    fn test_shorthand_lookup() {
        let registry = Registry::global();
        assert_eq!(registry.shorthand_of("grid-area"), Some(Shorthand::GridArea));
        assert_eq!(registry.shorthand_of("margin-top"), None);
    }
}
