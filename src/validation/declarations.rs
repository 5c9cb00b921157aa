// FILE: src/validation/declarations.rs

use super::expanders::{expand, NamedProperty};
use super::longhands::validate_known;
use crate::core::properties::{KnownProp, PropKey};
use crate::core::registry::{Registry, PROPRIETARY_PREFIX};
use crate::core::values::{Declaration, DefaultKind, ValidatedProperty};
use crate::error::{Result, ValidationError};
use crate::tokens::{remove_whitespace, serialize, tokens_have_var, RawDeclaration, Token};

/// Validates the value of one longhand, accepting the CSS-wide keywords.
pub fn validate_longhand(prop: KnownProp, tokens: &[Token], base_url: &str) -> Result<ValidatedProperty> {
    if let Some(kind) = DefaultKind::from_tokens(tokens) {
        return Ok(ValidatedProperty::Default(kind));
    }
    validate_known(prop, tokens, base_url).map(ValidatedProperty::from)
}

/// Validates a declaration that is not a shorthand.
///
/// Custom properties and values using `var()` are kept as raw tokens.
pub fn validate_non_shorthand(
    name: &str,
    tokens: &[Token],
    base_url: &str,
) -> Result<(PropKey, ValidatedProperty)> {
    if name.starts_with("--") {
        return Ok((
            PropKey::Custom(name.to_string()),
            ValidatedProperty::Pending(tokens.into()),
        ));
    }

    let registry = Registry::global();
    if !registry.is_print_applicable(name) {
        return Err(ValidationError::unsupported(name));
    }
    let prop = registry.property_of(name).ok_or(ValidationError::UnknownProperty)?;

    if tokens_have_var(tokens) {
        return Ok((prop.into(), ValidatedProperty::Pending(tokens.into())));
    }

    Ok((prop.into(), validate_longhand(prop, tokens, base_url)?))
}

/// Validates a single declaration, expanding shorthands. The name must
/// already be normalized.
pub fn validate(name: &str, tokens: &[Token], base_url: &str) -> Result<Vec<Declaration>> {
    validate_declaration(name, tokens, base_url, false)
}

fn validate_declaration(
    name: &str,
    tokens: &[Token],
    base_url: &str,
    important: bool,
) -> Result<Vec<Declaration>> {
    let tokens = remove_whitespace(tokens);
    if tokens.is_empty() {
        return Err(ValidationError::NoValue);
    }

    if let Some(shorthand) = Registry::global().shorthand_of(name) {
        let pending = tokens_have_var(&tokens);
        return Ok(expand(shorthand, &tokens, base_url)?
            .into_iter()
            .map(|NamedProperty { name, value }| Declaration {
                name: name.into(),
                value,
                shorthand: if pending { Some(shorthand) } else { None },
                important,
            })
            .collect());
    }

    let (name, value) = validate_non_shorthand(name, &tokens, base_url)?;
    Ok(vec![Declaration {
        name,
        value,
        shorthand: None,
        important,
    }])
}

/// What to do with a declaration name before validating its value.
enum NameCheck {
    Keep(String),
    Ignore(String),
}

fn normalize_name(raw: &str, value: &str) -> NameCheck {
    let registry = Registry::global();

    let mut name = if raw.starts_with("--") {
        raw.to_string()
    } else {
        raw.to_ascii_lowercase()
    };

    if !registry.is_print_applicable(&name) {
        return NameCheck::Ignore("the property does not apply for the print media".to_string());
    }

    if let Some(unprefixed) = name.strip_prefix(PROPRIETARY_PREFIX) {
        let unprefixed = unprefixed.to_string();
        if registry.is_proprietary(&unprefixed) {
            name = unprefixed;
        } else if registry.is_unstable(&unprefixed) {
            log::warn!(
                "Deprecated `{}:{}`, prefixes on unstable attributes are deprecated, use `{}` instead.",
                raw,
                value,
                unprefixed
            );
            name = unprefixed;
        } else {
            log::warn!(
                "Ignored `{}:{}`, prefix on this attribute is not supported, use `{}` instead.",
                raw,
                value,
                unprefixed
            );
            return NameCheck::Ignore(String::new());
        }
    }

    if name.starts_with('-') && !name.starts_with("--") {
        return NameCheck::Ignore("prefixed selectors are ignored".to_string());
    }
    NameCheck::Keep(name)
}

/// Filters unsupported or invalid declarations and expands shorthands.
///
/// Every ignored declaration is logged as a warning and never affects the
/// others. Values using `var()` are not validated yet; the longhands of a
/// shorthand that uses them remember the shorthand for later expansion.
pub fn preprocess_declarations(base_url: &str, declarations: &[RawDeclaration]) -> Vec<Declaration> {
    let mut out = Vec::new();
    for declaration in declarations {
        let value = serialize(&declaration.value);
        let name = match normalize_name(&declaration.name, value.trim()) {
            NameCheck::Keep(name) => name,
            NameCheck::Ignore(reason) => {
                if !reason.is_empty() {
                    log::warn!("Ignored `{}:{}`, {}.", declaration.name, value.trim(), reason);
                }
                continue;
            }
        };

        match validate_declaration(&name, &declaration.value, base_url, declaration.important) {
            Ok(validated) => out.extend(validated),
            Err(error) => {
                log::warn!("Ignored `{}:{}`, {}.", declaration.name, value.trim(), error);
            }
        }
    }
    log::debug!(
        "Kept {} declarations out of {}",
        out.len(),
        declarations.len()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::properties::Shorthand;
    use crate::core::units::Unit;
    use crate::core::values::CssProperty;
    use crate::tokens::{parse_declaration_list, tokenize};

    fn preprocess(css: &str) -> Vec<Declaration> {
        preprocess_declarations("https://example.org/", &parse_declaration_list(css))
    }

    fn names(declarations: &[Declaration]) -> Vec<String> {
        declarations.iter().map(|d| d.name.to_string()).collect()
    }

    #[test]
    fn test_longhand_and_shorthand() {
        let declarations = preprocess("COLOR: red; margin: 1px 2px !important");
        assert_eq!(
            names(&declarations),
            vec!["color", "margin-top", "margin-right", "margin-bottom", "margin-left"]
        );
        assert!(!declarations[0].important);
        assert!(declarations[1..].iter().all(|d| d.important));
        assert_eq!(
            declarations[2].value,
            ValidatedProperty::Resolved(CssProperty::dimension(2.0, Unit::Px))
        );
    }

    #[test]
    fn test_invalid_declarations_are_dropped() {
        let declarations = preprocess("width: red; foo: 1px; padding: ; height: 2px");
        assert_eq!(names(&declarations), vec!["height"]);
    }

    #[test]
    fn test_prefixes() {
        let declarations = preprocess("-weasy-link: url(#top); -moz-foo: 1; -weasy-foo: 2");
        assert_eq!(names(&declarations), vec!["link"]);

        let declarations = preprocess("-weasy-hyphens: auto");
        assert_eq!(names(&declarations), vec!["hyphens"]);
    }

    #[test]
    fn test_not_print_media() {
        assert!(preprocess("cursor: pointer").is_empty());
    }

    #[test]
    fn test_custom_and_pending() {
        let declarations = preprocess("--Main-Color: blue; border-top: var(--w) solid; width: var(--w)");
        assert_eq!(declarations[0].name, PropKey::Custom("--Main-Color".to_string()));
        assert!(declarations[0].value.is_pending());

        let border: Vec<&Declaration> = declarations
            .iter()
            .filter(|d| d.name.to_string().starts_with("border-top"))
            .collect();
        assert_eq!(border.len(), 3);
        for declaration in border {
            assert!(declaration.value.is_pending());
            assert_eq!(declaration.shorthand, Some(Shorthand::BorderTop));
        }

        let width = declarations.last().unwrap();
        assert_eq!(width.name, PropKey::Known(KnownProp::Width));
        assert!(width.value.is_pending());
        assert_eq!(width.shorthand, None);
    }

    #[test]
    fn test_validate_non_shorthand() {
        let (name, value) = validate_non_shorthand("opacity", &tokenize("inherit"), "").unwrap();
        assert_eq!(name, PropKey::Known(KnownProp::Opacity));
        assert_eq!(value, ValidatedProperty::Default(DefaultKind::Inherit));

        let error = validate_non_shorthand("not-a-property", &tokenize("1"), "").unwrap_err();
        assert_eq!(error.to_string(), "unknown property");
        let error = validate_non_shorthand("cursor", &tokenize("pointer"), "").unwrap_err();
        assert!(matches!(error, ValidationError::UnsupportedProperty { .. }));
        assert!(validate("margin", &[], "").is_err());
    }
}
