// FILE: src/validation/fonts.rs

use super::helpers::{comma_separated_list, get_keyword, get_length, single_keyword};
use crate::core::constants::font_size_ratio;
use crate::core::values::{CssProperty, DimOrKeyword, KeywordOr};
use crate::tokens::Token;

const LIGATURES_COUPLES: &[&[&str]] = &[
    &["common-ligatures", "no-common-ligatures"],
    &["historical-ligatures", "no-historical-ligatures"],
    &["discretionary-ligatures", "no-discretionary-ligatures"],
    &["contextual", "no-contextual"],
];

const NUMERIC_COUPLES: &[&[&str]] = &[
    &["lining-nums", "oldstyle-nums"],
    &["proportional-nums", "tabular-nums"],
    &["diagonal-fractions", "stacked-fractions"],
    &["ordinal"],
    &["slashed-zero"],
];

const EAST_ASIAN_COUPLES: &[&[&str]] = &[
    &["jis78", "jis83", "jis90", "jis04", "simplified", "traditional"],
    &["full-width", "proportional-width"],
    &["ruby"],
];

pub const FONT_STYLES: &[&str] = &["normal", "italic", "oblique"];

pub const FONT_STRETCHES: &[&str] = &[
    "ultra-condensed",
    "extra-condensed",
    "condensed",
    "semi-condensed",
    "normal",
    "semi-expanded",
    "expanded",
    "extra-expanded",
    "ultra-expanded",
];

pub const FONT_VARIANT_CAPS: &[&str] = &[
    "normal",
    "small-caps",
    "all-small-caps",
    "petite-caps",
    "all-petite-caps",
    "unicase",
    "titling-caps",
];

/// Parses a space-separated keyword list where each keyword belongs to one
/// of `couples` and at most one keyword of each couple may appear.
fn parse_font_variant(tokens: &[Token], couples: &[&[&str]]) -> Option<Vec<String>> {
    let mut values: Vec<String> = Vec::new();
    for token in tokens {
        let ident = token.as_ident()?;
        let couple = couples.iter().find(|couple| couple.contains(&ident))?;
        if values.iter().any(|value| couple.contains(&value.as_str())) {
            return None;
        }
        values.push(ident.to_string());
    }
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

fn keyword_list(tokens: &[Token], keywords: &[&str], couples: &[&[&str]]) -> Option<CssProperty> {
    if let Some(keyword) = single_keyword(tokens, keywords) {
        return Some(CssProperty::KeywordList(KeywordOr::Keyword(keyword)));
    }
    parse_font_variant(tokens, couples).map(|values| CssProperty::KeywordList(KeywordOr::Values(values)))
}

pub fn font_variant_ligatures(tokens: &[Token]) -> Option<CssProperty> {
    keyword_list(tokens, &["normal", "none"], LIGATURES_COUPLES)
}

pub fn font_variant_numeric(tokens: &[Token]) -> Option<CssProperty> {
    keyword_list(tokens, &["normal"], NUMERIC_COUPLES)
}

pub fn font_variant_east_asian(tokens: &[Token]) -> Option<CssProperty> {
    keyword_list(tokens, &["normal"], EAST_ASIAN_COUPLES)
}

pub fn font_variant_position(tokens: &[Token]) -> Option<CssProperty> {
    single_keyword(tokens, &["normal", "sub", "super"]).map(CssProperty::Keyword)
}

pub fn font_variant_caps(tokens: &[Token]) -> Option<CssProperty> {
    single_keyword(tokens, FONT_VARIANT_CAPS).map(CssProperty::Keyword)
}

pub fn font_variant_alternates(tokens: &[Token]) -> Option<CssProperty> {
    single_keyword(tokens, &["normal", "historical-forms"]).map(CssProperty::Keyword)
}

fn family_name(tokens: &[Token]) -> Option<String> {
    match tokens {
        [] => None,
        [Token::String(name)] => Some(name.clone()),
        _ => tokens
            .iter()
            .map(|token| token.as_ident().map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .map(|words| words.join(" ")),
    }
}

/// `font-family`: a comma list of quoted names or space-joined identifiers.
pub fn font_family(tokens: &[Token]) -> Option<CssProperty> {
    comma_separated_list(tokens, family_name).map(CssProperty::Keywords)
}

pub fn font_kerning(tokens: &[Token]) -> Option<CssProperty> {
    single_keyword(tokens, &["auto", "normal", "none"]).map(CssProperty::Keyword)
}

pub fn font_language_override(tokens: &[Token]) -> Option<CssProperty> {
    match tokens {
        [Token::String(value)] => Some(CssProperty::Keyword(value.clone())),
        _ => single_keyword(tokens, &["normal"]).map(CssProperty::Keyword),
    }
}

fn feature_setting(tokens: &[Token]) -> Option<(String, i32)> {
    let (tag, value) = match tokens {
        [tag] => (tag, 1),
        [tag, Token::Ident(switch)] => (tag, if switch == "on" { 1 } else { 0 }),
        [tag, Token::Number(number)] => match number.int_value {
            Some(value) if value >= 0 => (tag, value),
            _ => (tag, 0),
        },
        [tag, _] => (tag, 0),
        _ => return None,
    };
    let tag = tag.as_string()?;
    if tag.chars().count() != 4 || !tag.chars().all(|c| ('\u{20}'..='\u{7f}').contains(&c)) {
        return None;
    }
    Some((tag.to_string(), value))
}

/// `font-feature-settings`: `normal` or a comma list of `<string> [<int> | on | off]`.
pub fn font_feature_settings(tokens: &[Token]) -> Option<CssProperty> {
    if single_keyword(tokens, &["normal"]).is_some() {
        return Some(CssProperty::Counters(KeywordOr::keyword("normal")));
    }
    comma_separated_list(tokens, feature_setting)
        .map(|features| CssProperty::Counters(KeywordOr::Values(features)))
}

pub fn font_variation_settings(tokens: &[Token]) -> Option<CssProperty> {
    if single_keyword(tokens, &["normal"]).is_some() {
        return Some(CssProperty::VariationSettings(KeywordOr::keyword("normal")));
    }
    comma_separated_list(tokens, |part| match part {
        [Token::String(axis), Token::Number(value)] => Some((axis.clone(), value.value)),
        _ => None,
    })
    .map(|axes| CssProperty::VariationSettings(KeywordOr::Values(axes)))
}

pub fn font_size(tokens: &[Token]) -> Option<CssProperty> {
    let token = match tokens {
        [token] => token,
        _ => return None,
    };
    if let Some(length) = get_length(token, false, true) {
        return Some(CssProperty::Value(length.into()));
    }
    let keyword = get_keyword(token)?;
    if font_size_ratio(&keyword).is_some() || keyword == "smaller" || keyword == "larger" {
        return Some(CssProperty::Value(DimOrKeyword::Keyword(keyword)));
    }
    None
}

pub fn font_style(tokens: &[Token]) -> Option<CssProperty> {
    single_keyword(tokens, FONT_STYLES).map(CssProperty::Keyword)
}

pub fn font_stretch(tokens: &[Token]) -> Option<CssProperty> {
    single_keyword(tokens, FONT_STRETCHES).map(CssProperty::Keyword)
}

/// `font-weight`: `normal`, `bold`, `bolder`, `lighter` or a multiple of
/// 100 between 100 and 900.
pub fn font_weight(tokens: &[Token]) -> Option<CssProperty> {
    if let Some(keyword) = single_keyword(tokens, &["normal", "bold", "bolder", "lighter"]) {
        return Some(CssProperty::IntOrKeyword(KeywordOr::Keyword(keyword)));
    }
    match tokens {
        [token] => match token.as_int() {
            Some(weight) if (100..=900).contains(&weight) && weight % 100 == 0 => {
                Some(CssProperty::IntOrKeyword(KeywordOr::Values(weight)))
            }
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::units::Unit;
    use crate::core::values::Dimension;
    use crate::tokens::{remove_whitespace, tokenize};

    fn tokens(css: &str) -> Vec<Token> {
        remove_whitespace(&tokenize(css))
    }

    #[test]
    fn test_font_family() {
        assert_eq!(
            font_family(&tokens("\"Times New Roman\", My Fancy Font, serif")),
            Some(CssProperty::Keywords(vec![
                "Times New Roman".to_string(),
                "My Fancy Font".to_string(),
                "serif".to_string()
            ]))
        );
        assert_eq!(font_family(&tokens("serif,")), None);
        assert_eq!(font_family(&tokens("12px")), None);
    }

    #[test]
    fn test_font_variant_couples() {
        assert_eq!(
            font_variant_ligatures(&tokens("common-ligatures contextual")),
            Some(CssProperty::KeywordList(KeywordOr::Values(vec![
                "common-ligatures".to_string(),
                "contextual".to_string()
            ])))
        );
        assert_eq!(
            font_variant_ligatures(&tokens("common-ligatures no-common-ligatures")),
            None
        );
        assert_eq!(font_variant_numeric(&tokens("ordinal ordinal")), None);
        assert_eq!(font_variant_east_asian(&tokens("jis78 simplified")), None);
        assert!(font_variant_east_asian(&tokens("jis78 full-width ruby")).is_some());
        assert_eq!(
            font_variant_ligatures(&tokens("none")),
            Some(CssProperty::KeywordList(KeywordOr::keyword("none")))
        );
        assert_eq!(font_variant_numeric(&tokens("none")), None);
    }

    #[test]
    fn test_font_feature_settings() {
        assert_eq!(
            font_feature_settings(&tokens("\"liga\" off, \"kern\", \"swsh\" 2")),
            Some(CssProperty::Counters(KeywordOr::Values(vec![
                ("liga".to_string(), 0),
                ("kern".to_string(), 1),
                ("swsh".to_string(), 2),
            ])))
        );
        assert_eq!(font_feature_settings(&tokens("\"ligatures\"")), None);
        assert_eq!(font_feature_settings(&tokens("liga")), None);
    }

    #[test]
    fn test_font_variation_settings() {
        assert_eq!(
            font_variation_settings(&tokens("\"wght\" 700, \"wdth\" 75.5")),
            Some(CssProperty::VariationSettings(KeywordOr::Values(vec![
                ("wght".to_string(), 700.0),
                ("wdth".to_string(), 75.5),
            ])))
        );
        assert_eq!(font_variation_settings(&tokens("\"wght\"")), None);
    }

    #[test]
    fn test_font_size_and_weight() {
        assert_eq!(
            font_size(&tokens("12px")),
            Some(CssProperty::Value(Dimension::new(12.0, Unit::Px).into()))
        );
        assert_eq!(
            font_size(&tokens("x-large")),
            Some(CssProperty::value_keyword("x-large"))
        );
        assert_eq!(font_size(&tokens("-1px")), None);
        assert_eq!(
            font_weight(&tokens("700")),
            Some(CssProperty::IntOrKeyword(KeywordOr::Values(700)))
        );
        assert_eq!(font_weight(&tokens("750")), None);
        assert_eq!(
            font_weight(&tokens("bolder")),
            Some(CssProperty::IntOrKeyword(KeywordOr::keyword("bolder")))
        );
    }
}
