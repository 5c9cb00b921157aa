// FILE: src/core/values.rs

use crate::colors::Color;
use crate::core::properties::{KnownProp, PropKey, Shorthand};
use crate::core::registry::Registry;
use crate::core::units::Unit;
use crate::error::{Result, ValidationError};
use crate::tokens::Token;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dimension {
    pub value: f32,
    pub unit: Unit,
}

impl Dimension {
    pub const fn new(value: f32, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub const fn px(value: f32) -> Self {
        Self::new(value, Unit::Px)
    }

    pub const fn percent(value: f32) -> Self {
        Self::new(value, Unit::Percent)
    }

    pub const fn scalar(value: f32) -> Self {
        Self::new(value, Unit::Scalar)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

/// A length-like value or one of the keywords a property accepts instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DimOrKeyword {
    Dim(Dimension),
    Keyword(String),
}

impl DimOrKeyword {
    pub fn keyword(keyword: &str) -> Self {
        DimOrKeyword::Keyword(keyword.to_string())
    }

    pub fn auto() -> Self {
        Self::keyword("auto")
    }

    pub fn is_keyword(&self, keyword: &str) -> bool {
        matches!(self, DimOrKeyword::Keyword(k) if k == keyword)
    }

    pub fn as_dimension(&self) -> Option<Dimension> {
        match self {
            DimOrKeyword::Dim(d) => Some(*d),
            DimOrKeyword::Keyword(_) => None,
        }
    }
}

impl From<Dimension> for DimOrKeyword {
    fn from(d: Dimension) -> Self {
        DimOrKeyword::Dim(d)
    }
}

/// Horizontal then vertical component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point(pub Dimension, pub Dimension);

/// A position measured from the given origin edges.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Center {
    pub origin_x: String,
    pub origin_y: String,
    pub pos: Point,
}

impl Center {
    pub fn top_left(pos: Point) -> Self {
        Self {
            origin_x: "left".to_string(),
            origin_y: "top".to_string(),
            pos,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BgSize {
    Keyword(String),
    Explicit(DimOrKeyword, DimOrKeyword),
}

/// A keyword such as `normal` or `none`, or the list of explicit values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeywordOr<T> {
    Keyword(String),
    Values(T),
}

impl<T> KeywordOr<T> {
    pub fn keyword(keyword: &str) -> Self {
        KeywordOr::Keyword(keyword.to_string())
    }

    pub fn is_keyword(&self, keyword: &str) -> bool {
        matches!(self, KeywordOr::Keyword(k) if k == keyword)
    }
}

// ----- images -----

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Image {
    None,
    Url { url: String },
    LinearGradient(LinearGradient),
    RadialGradient(RadialGradient),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorStop {
    pub color: Color,
    pub position: Option<Dimension>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GradientDirection {
    /// Radians, 0 upwards then clockwise.
    Angle(f32),
    Corner(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinearGradient {
    pub stops: Vec<ColorStop>,
    pub direction: GradientDirection,
    pub repeating: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GradientSize {
    Keyword(String),
    Explicit(Point),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadialGradient {
    pub stops: Vec<ColorStop>,
    pub shape: String,
    pub size: GradientSize,
    pub center: Center,
    pub repeating: bool,
}

// ----- generated content -----

/// Target of `url()`, `attr()` or a plain string, as used by links and anchors.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum Reference {
    None,
    Internal(String),
    External(String),
    Attr(String),
    String(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttrFallback {
    String(String),
    Dimension(Dimension),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttrData {
    pub name: String,
    pub type_or_unit: String,
    pub fallback: AttrFallback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum CounterStyle {
    Name { name: String },
    Literal { value: String },
    Symbols { system: String, symbols: Vec<String> },
}

impl CounterStyle {
    pub fn name(name: &str) -> Self {
        CounterStyle::Name {
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ContentItem {
    String {
        value: String,
    },
    Attr(AttrData),
    Counter {
        name: String,
        style: CounterStyle,
    },
    Counters {
        name: String,
        separator: String,
        style: CounterStyle,
    },
    /// `content()` with the element part to copy.
    Content {
        part: String,
    },
    StringRef {
        name: String,
        keyword: String,
    },
    Element {
        name: String,
        keyword: String,
    },
    Url {
        target: Reference,
    },
    Quote {
        open: bool,
        insert: bool,
    },
    TargetCounter {
        link: Box<ContentItem>,
        counter: String,
        style: String,
    },
    TargetCounters {
        link: Box<ContentItem>,
        counter: String,
        separator: Box<ContentItem>,
        style: String,
    },
    TargetText {
        link: Box<ContentItem>,
        keyword: String,
    },
    Leader {
        value: String,
    },
}

impl ContentItem {
    pub fn string(value: &str) -> Self {
        ContentItem::String {
            value: value.to_string(),
        }
    }

    pub fn content(part: &str) -> Self {
        ContentItem::Content {
            part: part.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedContent {
    pub name: String,
    pub content: Vec<ContentItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuotePairs {
    pub open: Vec<String>,
    pub close: Vec<String>,
}

// ----- misc structured values -----

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transform {
    pub name: String,
    pub args: Vec<Dimension>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaggedInt {
    None,
    Auto,
    Int(i32),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaggedString {
    None,
    Auto,
    String(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    Keyword(String),
    /// `running(<custom-ident>)`
    Running(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Marks {
    pub crop: bool,
    pub cross: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageOrientation {
    Keyword(String),
    Angle { angle: f32, flip: bool },
}

// ----- grid -----

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GridDims {
    Value(DimOrKeyword),
    MinMax(DimOrKeyword, DimOrKeyword),
    FitContent(Dimension),
}

impl GridDims {
    pub fn auto() -> Self {
        GridDims::Value(DimOrKeyword::auto())
    }

    pub fn is_flexible(&self) -> bool {
        let is_fr = |d: &DimOrKeyword| matches!(d, DimOrKeyword::Dim(dim) if dim.unit == Unit::Fr);
        match self {
            GridDims::Value(d) => is_fr(d),
            GridDims::MinMax(min, max) => is_fr(min) || is_fr(max),
            GridDims::FitContent(_) => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepeatCount {
    Count(u32),
    AutoFill,
    AutoFit,
}

impl RepeatCount {
    pub fn is_auto(self) -> bool {
        !matches!(self, RepeatCount::Count(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GridSpec {
    Names(Vec<String>),
    Track(GridDims),
    Repeat {
        count: RepeatCount,
        specs: Vec<GridSpec>,
    },
    NameRepeat {
        count: RepeatCount,
        names: Vec<Vec<String>>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GridTemplate {
    None,
    Subgrid(Vec<GridSpec>),
    Tracks(Vec<GridSpec>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GridLine {
    Auto,
    Line {
        span: bool,
        ident: Option<String>,
        number: Option<i32>,
    },
}

impl GridLine {
    pub fn ident(name: &str) -> Self {
        GridLine::Line {
            span: false,
            ident: Some(name.to_string()),
            number: None,
        }
    }

    /// True for a bare `<custom-ident>` line.
    pub fn is_custom_ident(&self) -> bool {
        matches!(
            self,
            GridLine::Line {
                span: false,
                ident: Some(_),
                number: None
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GridAreas {
    None,
    Rows(Vec<Vec<String>>),
}

// ----- the value algebra -----

/// Family tag of a [`CssProperty`] value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PropertyKind {
    Keyword,
    Keywords,
    Value,
    Values,
    Float,
    Int,
    IntOrKeyword,
    Color,
    Point,
    Center,
    Centers,
    Image,
    Images,
    Repeats,
    Sizes,
    Display,
    Counters,
    VariationSettings,
    KeywordList,
    Content,
    ContentList,
    StringSet,
    Quotes,
    CounterStyle,
    Decorations,
    Transforms,
    TaggedInt,
    TaggedString,
    Ints3,
    ImageOrientation,
    Reference,
    Marks,
    Position,
    GridAuto,
    GridLine,
    GridTemplate,
    GridAreas,
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A validated, typed property value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value")]
pub enum CssProperty {
    Keyword(String),
    Keywords(Vec<String>),
    Value(DimOrKeyword),
    Values(Vec<DimOrKeyword>),
    Float(f32),
    Int(i32),
    IntOrKeyword(KeywordOr<i32>),
    Color(Color),
    Point(Point),
    Center(Center),
    Centers(Vec<Center>),
    Image(Image),
    Images(Vec<Image>),
    Repeats(Vec<[String; 2]>),
    Sizes(Vec<BgSize>),
    Display(Vec<String>),
    /// Named integers: counters and OpenType feature tags.
    Counters(KeywordOr<Vec<(String, i32)>>),
    VariationSettings(KeywordOr<Vec<(String, f32)>>),
    KeywordList(KeywordOr<Vec<String>>),
    Content(KeywordOr<Vec<ContentItem>>),
    ContentList(Vec<ContentItem>),
    StringSet(KeywordOr<Vec<NamedContent>>),
    Quotes(KeywordOr<QuotePairs>),
    CounterStyle(CounterStyle),
    Decorations(BTreeSet<String>),
    Transforms(Vec<Transform>),
    TaggedInt(TaggedInt),
    TaggedString(TaggedString),
    Ints3([i32; 3]),
    ImageOrientation(ImageOrientation),
    Reference(Reference),
    Marks(Marks),
    Position(Position),
    GridAuto(Vec<GridDims>),
    GridLine(GridLine),
    GridTemplate(GridTemplate),
    GridAreas(GridAreas),
}

impl CssProperty {
    pub fn keyword(keyword: &str) -> Self {
        CssProperty::Keyword(keyword.to_string())
    }

    pub fn keywords(keywords: &[&str]) -> Self {
        CssProperty::Keywords(keywords.iter().map(|k| k.to_string()).collect())
    }

    pub fn value_keyword(keyword: &str) -> Self {
        CssProperty::Value(DimOrKeyword::keyword(keyword))
    }

    pub fn dimension(value: f32, unit: Unit) -> Self {
        CssProperty::Value(DimOrKeyword::Dim(Dimension::new(value, unit)))
    }

    pub fn kind(&self) -> PropertyKind {
        match self {
            CssProperty::Keyword(_) => PropertyKind::Keyword,
            CssProperty::Keywords(_) => PropertyKind::Keywords,
            CssProperty::Value(_) => PropertyKind::Value,
            CssProperty::Values(_) => PropertyKind::Values,
            CssProperty::Float(_) => PropertyKind::Float,
            CssProperty::Int(_) => PropertyKind::Int,
            CssProperty::IntOrKeyword(_) => PropertyKind::IntOrKeyword,
            CssProperty::Color(_) => PropertyKind::Color,
            CssProperty::Point(_) => PropertyKind::Point,
            CssProperty::Center(_) => PropertyKind::Center,
            CssProperty::Centers(_) => PropertyKind::Centers,
            CssProperty::Image(_) => PropertyKind::Image,
            CssProperty::Images(_) => PropertyKind::Images,
            CssProperty::Repeats(_) => PropertyKind::Repeats,
            CssProperty::Sizes(_) => PropertyKind::Sizes,
            CssProperty::Display(_) => PropertyKind::Display,
            CssProperty::Counters(_) => PropertyKind::Counters,
            CssProperty::VariationSettings(_) => PropertyKind::VariationSettings,
            CssProperty::KeywordList(_) => PropertyKind::KeywordList,
            CssProperty::Content(_) => PropertyKind::Content,
            CssProperty::ContentList(_) => PropertyKind::ContentList,
            CssProperty::StringSet(_) => PropertyKind::StringSet,
            CssProperty::Quotes(_) => PropertyKind::Quotes,
            CssProperty::CounterStyle(_) => PropertyKind::CounterStyle,
            CssProperty::Decorations(_) => PropertyKind::Decorations,
            CssProperty::Transforms(_) => PropertyKind::Transforms,
            CssProperty::TaggedInt(_) => PropertyKind::TaggedInt,
            CssProperty::TaggedString(_) => PropertyKind::TaggedString,
            CssProperty::Ints3(_) => PropertyKind::Ints3,
            CssProperty::ImageOrientation(_) => PropertyKind::ImageOrientation,
            CssProperty::Reference(_) => PropertyKind::Reference,
            CssProperty::Marks(_) => PropertyKind::Marks,
            CssProperty::Position(_) => PropertyKind::Position,
            CssProperty::GridAuto(_) => PropertyKind::GridAuto,
            CssProperty::GridLine(_) => PropertyKind::GridLine,
            CssProperty::GridTemplate(_) => PropertyKind::GridTemplate,
            CssProperty::GridAreas(_) => PropertyKind::GridAreas,
        }
    }
}

// ----- resolution stages -----

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultKind {
    Initial,
    Inherit,
}

impl DefaultKind {
    /// Recognizes a lone `initial` or `inherit` keyword.
    pub fn from_tokens(tokens: &[Token]) -> Option<Self> {
        match tokens {
            [token] => match token.keyword().as_deref() {
                Some("initial") => Some(DefaultKind::Initial),
                Some("inherit") => Some(DefaultKind::Inherit),
                _ => None,
            },
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CascadedProperty {
    Default(DefaultKind),
    Value(CssProperty),
}

/// Output of validation: a typed value, a CSS-wide keyword, or raw tokens
/// waiting for `var()` substitution. Longhands of one shorthand share the
/// same pending token run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidatedProperty {
    Resolved(CssProperty),
    Default(DefaultKind),
    Pending(Arc<[Token]>),
}

impl ValidatedProperty {
    pub fn is_pending(&self) -> bool {
        matches!(self, ValidatedProperty::Pending(_))
    }

    pub fn as_resolved(&self) -> Option<&CssProperty> {
        match self {
            ValidatedProperty::Resolved(value) => Some(value),
            _ => None,
        }
    }

    /// The cascaded form, unless substitution is still pending.
    pub fn to_cascaded(&self) -> Option<CascadedProperty> {
        match self {
            ValidatedProperty::Resolved(value) => Some(CascadedProperty::Value(value.clone())),
            ValidatedProperty::Default(kind) => Some(CascadedProperty::Default(*kind)),
            ValidatedProperty::Pending(_) => None,
        }
    }
}

impl From<CascadedProperty> for ValidatedProperty {
    fn from(cascaded: CascadedProperty) -> Self {
        match cascaded {
            CascadedProperty::Default(kind) => ValidatedProperty::Default(kind),
            CascadedProperty::Value(value) => ValidatedProperty::Resolved(value),
        }
    }
}

impl From<CssProperty> for ValidatedProperty {
    fn from(value: CssProperty) -> Self {
        ValidatedProperty::Resolved(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Declaration {
    pub name: PropKey,
    pub value: ValidatedProperty,
    /// Set only while `value` is pending and came from this shorthand.
    pub shorthand: Option<Shorthand>,
    pub important: bool,
}

/// Every known property mapped to a value, starting from the initial values.
#[derive(Debug, Clone, PartialEq)]
pub struct Properties {
    values: Vec<CssProperty>,
}

impl Properties {
    pub fn initial() -> Self {
        let registry = Registry::global();
        Self {
            values: KnownProp::ALL
                .iter()
                .map(|&prop| registry.initial_value(prop).clone())
                .collect(),
        }
    }

    pub fn get(&self, prop: KnownProp) -> &CssProperty {
        &self.values[prop.index()]
    }

    /// Stores `value`, which must belong to the family registered for `prop`.
    pub fn set(&mut self, prop: KnownProp, value: CssProperty) -> Result<()> {
        if value.kind() != prop.kind() {
            return Err(ValidationError::KindMismatch {
                property: prop.name().to_string(),
                expected: prop.kind().to_string(),
                found: value.kind().to_string(),
            });
        }
        self.values[prop.index()] = value;
        Ok(())
    }
}

impl Default for Properties {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_kind_from_tokens() {
        assert_eq!(
            DefaultKind::from_tokens(&[Token::ident("INHERIT")]),
            Some(DefaultKind::Inherit)
        );
        assert_eq!(
            DefaultKind::from_tokens(&[Token::ident("initial")]),
            Some(DefaultKind::Initial)
        );
        assert_eq!(DefaultKind::from_tokens(&[Token::ident("unset")]), None);
        assert_eq!(
            DefaultKind::from_tokens(&[Token::ident("initial"), Token::ident("x")]),
            None
        );
    }

    #[test]
    fn test_stage_conversions() {
        let value = CssProperty::Float(0.0);
        let validated = ValidatedProperty::from(value.clone());
        assert_eq!(validated.to_cascaded(), Some(CascadedProperty::Value(value)));
        let pending = ValidatedProperty::Pending(vec![Token::ident("x")].into());
        assert!(pending.is_pending());
        assert_eq!(pending.to_cascaded(), None);
        assert_eq!(
            ValidatedProperty::from(CascadedProperty::Default(DefaultKind::Inherit)),
            ValidatedProperty::Default(DefaultKind::Inherit)
        );
    }

    #[test]
    fn test_properties_set_checks_kind() {
        let mut properties = Properties::initial();
        assert_eq!(properties.get(KnownProp::Opacity), &CssProperty::Float(1.0));
        properties.set(KnownProp::Opacity, CssProperty::Float(0.0)).unwrap();
        assert_eq!(properties.get(KnownProp::Opacity), &CssProperty::Float(0.0));

        let err = properties
            .set(KnownProp::Opacity, CssProperty::keyword("auto"))
            .unwrap_err();
        assert!(matches!(err, ValidationError::KindMismatch { .. }));
        assert_eq!(properties.get(KnownProp::Opacity), &CssProperty::Float(0.0));
    }

    #[test]
    fn test_grid_dims_flexible() {
        let fr = GridDims::Value(Dimension::new(1.0, Unit::Fr).into());
        assert!(fr.is_flexible());
        assert!(!GridDims::auto().is_flexible());
        let minmax = GridDims::MinMax(DimOrKeyword::auto(), Dimension::new(2.0, Unit::Fr).into());
        assert!(minmax.is_flexible());
    }
}
