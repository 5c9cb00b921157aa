// FILE: src/validation/descriptors.rs

use super::declarations::validate_longhand;
use super::expanders::{expand_font_variant, NamedProperty};
use super::fonts::{self, FONT_STRETCHES, FONT_STYLES};
use super::helpers::{get_custom_ident, get_keyword, get_single_keyword, get_url};
use crate::core::values::{CssProperty, KeywordOr, Reference};
use crate::error::{OrInvalid, Result, ValidationError};
use crate::tokens::{remove_whitespace, serialize, split_on_comma, RawDeclaration, Token};
use serde::Serialize;

/// A set of at-rule descriptors filled one declaration at a time.
pub trait DescriptorSet: Default {
    /// Validates one descriptor and stores it. Unknown names are an error.
    fn validate_descriptor(&mut self, name: &str, tokens: &[Token], base_url: &str) -> Result<()>;
}

/// Validates the declarations of an at-rule. Invalid descriptors are logged
/// and skipped; `!important` ones and `font-display` are ignored.
pub fn preprocess_descriptors<D: DescriptorSet>(base_url: &str, declarations: &[RawDeclaration]) -> D {
    let mut out = D::default();
    for declaration in declarations {
        if declaration.important || declaration.name == "font-display" {
            continue;
        }
        let tokens = remove_whitespace(&declaration.value);
        if let Err(error) = out.validate_descriptor(&declaration.name, &tokens, base_url) {
            log::warn!(
                "Ignored `{}:{}`, {}.",
                declaration.name,
                serialize(&declaration.value).trim(),
                error
            );
        }
    }
    out
}

// ----- @font-face -----

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum FontSource {
    Local(String),
    Url(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FontFaceDescriptors {
    pub src: Vec<FontSource>,
    pub font_family: Option<String>,
    pub font_style: Option<String>,
    pub font_weight: Option<KeywordOr<i32>>,
    pub font_stretch: Option<String>,
    pub font_feature_settings: Option<KeywordOr<Vec<(String, i32)>>>,
    pub font_variant: Vec<NamedProperty>,
}

impl DescriptorSet for FontFaceDescriptors {
    fn validate_descriptor(&mut self, name: &str, tokens: &[Token], base_url: &str) -> Result<()> {
        match name {
            "font-family" => {
                self.font_family = Some(family_name(tokens, false).or_invalid()?);
            }
            "src" => {
                let sources = split_on_comma(tokens)
                    .iter()
                    .map(|part| font_source(&remove_whitespace(part), base_url))
                    .collect::<Result<Vec<_>>>()?;
                self.src.extend(sources);
            }
            "font-style" => {
                let keyword = get_single_keyword(tokens).unwrap_or_default();
                if !FONT_STYLES.contains(&keyword.as_str()) {
                    return Err(ValidationError::invalid(format!(
                        "unsupported font-style descriptor: {}",
                        keyword
                    )));
                }
                self.font_style = Some(keyword);
            }
            "font-weight" => self.font_weight = Some(font_weight(tokens).or_invalid()?),
            "font-stretch" => {
                let keyword = get_single_keyword(tokens).unwrap_or_default();
                if !FONT_STRETCHES.contains(&keyword.as_str()) {
                    return Err(ValidationError::invalid(format!(
                        "unsupported font-stretch descriptor: {}",
                        keyword
                    )));
                }
                self.font_stretch = Some(keyword);
            }
            "font-feature-settings" => match fonts::font_feature_settings(tokens) {
                Some(CssProperty::Counters(settings)) => self.font_feature_settings = Some(settings),
                _ => return Err(ValidationError::InvalidValue),
            },
            "font-variant" => {
                if matches!(
                    get_single_keyword(tokens).as_deref(),
                    Some("normal" | "none" | "inherit")
                ) {
                    return Ok(());
                }
                self.font_variant = expand_font_variant(tokens)?
                    .into_iter()
                    .map(|(name, tokens)| {
                        validate_longhand(name, &tokens, base_url)
                            .map(|value| NamedProperty { name, value })
                            .map_err(|_| ValidationError::InvalidValue)
                    })
                    .collect::<Result<_>>()?;
            }
            _ => return Err(ValidationError::DescriptorNotSupported),
        }
        Ok(())
    }
}

/// A family name: one string, or identifiers (and whitespace inside
/// `local()`) joined by spaces.
fn family_name(tokens: &[Token], allow_spaces: bool) -> Option<String> {
    if let [Token::String(name)] = tokens {
        return Some(name.clone());
    }
    if tokens.is_empty() {
        return None;
    }
    let mut words = Vec::new();
    for token in tokens {
        match token {
            Token::Ident(word) => words.push(word.as_str()),
            Token::Whitespace if allow_spaces => {}
            _ => return None,
        }
    }
    Some(words.join(" "))
}

/// One `src` entry: `local(<family>)` or `url(...)`, either optionally
/// followed by `format(...)`.
fn font_source(tokens: &[Token], base_url: &str) -> Result<FontSource> {
    let token = match tokens {
        [token] => token,
        [token, format] if format.function_name() == Some("format") => token,
        _ => return Err(ValidationError::InvalidValue),
    };
    if let Token::Function { name, args } = token {
        if name == "local" {
            return family_name(args, true)
                .map(FontSource::Local)
                .or_invalid();
        }
    }
    match get_url(token, base_url)? {
        Some(Reference::External(url)) => Ok(FontSource::Url(url)),
        _ => Err(ValidationError::InvalidValue),
    }
}

fn font_weight(tokens: &[Token]) -> Option<KeywordOr<i32>> {
    let token = match tokens {
        [token] => token,
        _ => return None,
    };
    match get_keyword(token).as_deref() {
        Some(keyword @ ("normal" | "bold")) => Some(KeywordOr::keyword(keyword)),
        Some(_) => None,
        None => token
            .as_int()
            .filter(|weight| (100..=900).contains(weight) && weight % 100 == 0)
            .map(KeywordOr::Values),
    }
}

// ----- @counter-style -----

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum Symbol {
    String(String),
    Url(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CounterSystem {
    Cyclic,
    Numeric,
    Alphabetic,
    Symbolic,
    Additive,
    /// First symbol value.
    Fixed(i32),
    Extends(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CounterRange {
    Auto,
    /// Inclusive bounds; `infinite` is stored as `i32::MIN` or `i32::MAX`.
    Ranges(Vec<[i32; 2]>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CounterStyleDescriptors {
    pub system: Option<CounterSystem>,
    pub negative: Option<[Symbol; 2]>,
    pub prefix: Option<Symbol>,
    pub suffix: Option<Symbol>,
    pub range: Option<CounterRange>,
    pub pad: Option<(i32, Symbol)>,
    pub fallback: Option<String>,
    pub symbols: Vec<Symbol>,
    pub additive_symbols: Vec<(i32, Symbol)>,
}

impl DescriptorSet for CounterStyleDescriptors {
    fn validate_descriptor(&mut self, name: &str, tokens: &[Token], base_url: &str) -> Result<()> {
        match name {
            "system" => self.system = Some(system(tokens).or_invalid()?),
            "negative" => {
                let symbols = symbol_list(tokens, base_url).or_invalid()?;
                self.negative = match symbols.as_slice() {
                    [before] => Some([before.clone(), Symbol::String(String::new())]),
                    [before, after] => Some([before.clone(), after.clone()]),
                    _ => return Err(ValidationError::InvalidValue),
                };
            }
            "prefix" | "suffix" => {
                let symbol = match tokens {
                    [token] => symbol(token, base_url).or_invalid()?,
                    _ => return Err(ValidationError::InvalidValue),
                };
                if name == "prefix" {
                    self.prefix = Some(symbol);
                } else {
                    self.suffix = Some(symbol);
                }
            }
            "range" => self.range = Some(range(tokens).or_invalid()?),
            "pad" => self.pad = Some(pad(tokens, base_url).or_invalid()?),
            "fallback" => {
                let ident = match tokens {
                    [token] => get_custom_ident(token),
                    _ => None,
                };
                match ident {
                    Some(ident) if ident != "none" => self.fallback = Some(ident),
                    _ => return Err(ValidationError::InvalidValue),
                }
            }
            "symbols" => {
                let symbols = symbol_list(tokens, base_url).or_invalid()?;
                if symbols.is_empty() {
                    return Err(ValidationError::InvalidValue);
                }
                self.symbols.extend(symbols);
            }
            "additive-symbols" => {
                let mut symbols: Vec<(i32, Symbol)> = Vec::new();
                for part in split_on_comma(tokens) {
                    let (weight, symbol) = pad(&remove_whitespace(&part), base_url).or_invalid()?;
                    if symbols.last().map_or(false, |(last, _)| *last <= weight) {
                        return Err(ValidationError::InvalidValue);
                    }
                    symbols.push((weight, symbol));
                }
                self.additive_symbols.extend(symbols);
            }
            _ => return Err(ValidationError::DescriptorNotSupported),
        }
        Ok(())
    }
}

/// A `<symbol>`: a string, an identifier or an image url.
fn symbol(token: &Token, base_url: &str) -> Option<Symbol> {
    match token {
        Token::String(value) | Token::Ident(value) => Some(Symbol::String(value.clone())),
        _ => match get_url(token, base_url) {
            Ok(Some(Reference::External(url))) => Some(Symbol::Url(url)),
            _ => None,
        },
    }
}

fn symbol_list(tokens: &[Token], base_url: &str) -> Option<Vec<Symbol>> {
    tokens.iter().map(|token| symbol(token, base_url)).collect()
}

fn system(tokens: &[Token]) -> Option<CounterSystem> {
    let (first, rest) = tokens.split_first()?;
    match (get_keyword(first)?.as_str(), rest) {
        ("cyclic", []) => Some(CounterSystem::Cyclic),
        ("numeric", []) => Some(CounterSystem::Numeric),
        ("alphabetic", []) => Some(CounterSystem::Alphabetic),
        ("symbolic", []) => Some(CounterSystem::Symbolic),
        ("additive", []) => Some(CounterSystem::Additive),
        ("fixed", []) => Some(CounterSystem::Fixed(1)),
        ("fixed", [first_value]) => first_value.as_int().map(CounterSystem::Fixed),
        ("extends", [name]) => get_custom_ident(name).map(CounterSystem::Extends),
        _ => None,
    }
}

fn range(tokens: &[Token]) -> Option<CounterRange> {
    if get_single_keyword(tokens).as_deref() == Some("auto") {
        return Some(CounterRange::Auto);
    }
    let bound = |token: &Token, infinite: i32| {
        if token.is_keyword("infinite") {
            Some(infinite)
        } else {
            token.as_int()
        }
    };
    split_on_comma(tokens)
        .iter()
        .map(|part| match remove_whitespace(part).as_slice() {
            [lower, upper] => {
                let bounds = [bound(lower, i32::MIN)?, bound(upper, i32::MAX)?];
                (bounds[0] <= bounds[1]).then_some(bounds)
            }
            _ => None,
        })
        .collect::<Option<Vec<_>>>()
        .map(CounterRange::Ranges)
}

/// `<integer [0,∞]> && <symbol>`, also the shape of each additive symbol.
fn pad(tokens: &[Token], base_url: &str) -> Option<(i32, Symbol)> {
    let is_weight = |token: &Token| token.as_int().filter(|&n| n >= 0);
    match tokens {
        [first, second] => match (is_weight(first), is_weight(second)) {
            (Some(weight), _) => Some((weight, symbol(second, base_url)?)),
            (None, Some(weight)) => Some((weight, symbol(first, base_url)?)),
            (None, None) => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::properties::KnownProp;
    use crate::core::values::ValidatedProperty;
    use crate::tokens::parse_declaration_list;

    fn font_face(css: &str) -> FontFaceDescriptors {
        preprocess_descriptors("https://example.org/fonts/", &parse_declaration_list(css))
    }

    fn counter_style(css: &str) -> CounterStyleDescriptors {
        preprocess_descriptors("https://example.org/", &parse_declaration_list(css))
    }

    #[test]
    fn test_font_face() {
        let descriptors = font_face(
            "font-family: \"Gentium Plus\"; \
             src: local(Gentium Plus), url(gentium.woff) format(\"woff\"); \
             font-weight: 700; font-style: italic; font-stretch: condensed; \
             font-display: swap",
        );
        assert_eq!(descriptors.font_family.as_deref(), Some("Gentium Plus"));
        assert_eq!(
            descriptors.src,
            vec![
                FontSource::Local("Gentium Plus".to_string()),
                FontSource::Url("https://example.org/fonts/gentium.woff".to_string()),
            ]
        );
        assert_eq!(descriptors.font_weight, Some(KeywordOr::Values(700)));
        assert_eq!(descriptors.font_style.as_deref(), Some("italic"));
        assert_eq!(descriptors.font_stretch.as_deref(), Some("condensed"));
    }

    #[test]
    fn test_font_face_invalid() {
        let descriptors = font_face(
            "font-weight: 650; font-style: slanted; src: foo; unicode-range: U+0-7F; \
             font-family: Foo !important",
        );
        assert_eq!(descriptors, FontFaceDescriptors::default());

        let mut descriptors = FontFaceDescriptors::default();
        let error = descriptors
            .validate_descriptor("size-adjust", &[Token::percentage(90.0)], "")
            .unwrap_err();
        assert_eq!(error.to_string(), "descriptor not supported");
    }

    #[test]
    fn test_font_face_variant_and_features() {
        let descriptors = font_face(
            "font-variant: small-caps oldstyle-nums; font-feature-settings: \"liga\" 0",
        );
        assert_eq!(descriptors.font_variant.len(), 2);
        assert_eq!(descriptors.font_variant[0].name, KnownProp::FontVariantCaps);
        assert_eq!(
            descriptors.font_variant[0].value,
            ValidatedProperty::Resolved(CssProperty::keyword("small-caps"))
        );
        assert_eq!(descriptors.font_variant[1].name, KnownProp::FontVariantNumeric);
        assert_eq!(
            descriptors.font_feature_settings,
            Some(KeywordOr::Values(vec![("liga".to_string(), 0)]))
        );
        assert!(font_face("font-variant: normal").font_variant.is_empty());
    }

    #[test]
    fn test_counter_style_system() {
        assert_eq!(counter_style("system: cyclic").system, Some(CounterSystem::Cyclic));
        assert_eq!(counter_style("system: fixed").system, Some(CounterSystem::Fixed(1)));
        assert_eq!(counter_style("system: fixed -3").system, Some(CounterSystem::Fixed(-3)));
        assert_eq!(
            counter_style("system: extends decimal").system,
            Some(CounterSystem::Extends("decimal".to_string()))
        );
        assert_eq!(counter_style("system: cyclic numeric").system, None);
        assert_eq!(counter_style("system: fixed 1.5").system, None);
    }

    #[test]
    fn test_counter_style_symbols() {
        let descriptors = counter_style(
            "negative: \"(\" \")\"; prefix: \"#\"; suffix: url(dot.png); \
             symbols: A B \"C\"; fallback: upper-roman; pad: 3 \"0\"",
        );
        assert_eq!(
            descriptors.negative,
            Some([Symbol::String("(".to_string()), Symbol::String(")".to_string())])
        );
        assert_eq!(descriptors.prefix, Some(Symbol::String("#".to_string())));
        assert_eq!(
            descriptors.suffix,
            Some(Symbol::Url("https://example.org/dot.png".to_string()))
        );
        assert_eq!(descriptors.symbols.len(), 3);
        assert_eq!(descriptors.fallback.as_deref(), Some("upper-roman"));
        assert_eq!(descriptors.pad, Some((3, Symbol::String("0".to_string()))));

        let descriptors = counter_style("negative: \"-\"; fallback: none; pad: -1 \"0\"");
        assert_eq!(
            descriptors.negative,
            Some([Symbol::String("-".to_string()), Symbol::String(String::new())])
        );
        assert_eq!(descriptors.fallback, None);
        assert_eq!(descriptors.pad, None);
    }

    #[test]
    fn test_counter_style_range_and_additive() {
        assert_eq!(counter_style("range: auto").range, Some(CounterRange::Auto));
        assert_eq!(
            counter_style("range: infinite 0, 5 infinite").range,
            Some(CounterRange::Ranges(vec![[i32::MIN, 0], [5, i32::MAX]]))
        );
        assert_eq!(counter_style("range: 5 1").range, None);

        let descriptors = counter_style("additive-symbols: 10 X, 5 V, 1 I");
        assert_eq!(
            descriptors
                .additive_symbols
                .iter()
                .map(|(weight, _)| *weight)
                .collect::<Vec<_>>(),
            vec![10, 5, 1]
        );
        assert!(counter_style("additive-symbols: 1 I, 5 V")
            .additive_symbols
            .is_empty());
    }
}
