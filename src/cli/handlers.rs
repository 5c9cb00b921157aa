// FILE: src/cli/handlers.rs
use crate::cli::{EnhancedCli, OutputFormat, Settings};
use crate::core::{KnownProp, PropertyKind, Registry, Shorthand};
use crate::validation::{preprocess_descriptors, CounterStyleDescriptors, FontFaceDescriptors};
use crate::{
    parse_declaration_list, preprocess_declarations, validate_stylesheet, CssProperty, Declaration,
    EngineInfo, Result, ValidationError,
};
use serde::Serialize;
use std::fmt::Debug;
use std::fs;
use std::io::Read;

fn required<'a>(matches: &'a clap::ArgMatches, name: &str) -> Result<&'a String> {
    matches
        .get_one::<String>(name)
        .ok_or_else(|| ValidationError::invalid_format(format!("Missing argument: {}", name)))
}

/// Reads a file, or stdin when the path is `-`.
fn read_input(input_path: &str) -> Result<String> {
    if input_path == "-" {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        return Ok(content);
    }
    fs::read_to_string(input_path).map_err(|e| ValidationError::FileNotFound {
        path: format!("{}: {}", input_path, e),
    })
}

fn render<T: Serialize + Debug>(value: &T, settings: &Settings) -> Result<String> {
    match settings.format {
        OutputFormat::Json => {
            let json = if settings.pretty {
                serde_json::to_string_pretty(value)
            } else {
                serde_json::to_string(value)
            };
            json.map_err(|e| ValidationError::invalid_format(format!("JSON serialization error: {}", e)))
        }
        OutputFormat::Debug => Ok(format!("{:#?}", value)),
    }
}

// --- CHECK ---
pub fn handle_check_command(cli: &EnhancedCli, matches: &clap::ArgMatches) -> Result<()> {
    let input_path = required(matches, "input")?;
    let settings = cli.build_settings(matches)?;
    let css = read_input(input_path)?;

    let (declarations, stats) = validate_stylesheet(&css, &settings.options);
    println!("{}", render(&declarations, &settings)?);

    if matches.get_flag("stats") {
        eprintln!("📊 Validation Summary:");
        eprintln!("   Declarations: {}", stats.declaration_count);
        eprintln!("   Dropped: {}", stats.dropped_count);
        eprintln!("   Longhands: {}", stats.longhand_count);
        eprintln!("   Pending var(): {}", stats.pending_count);
        eprintln!("   Time: {}ms", stats.validation_time_ms);
    }
    Ok(())
}

// --- PROPERTY ---
/// Runs one `name: value` pair through the same pipeline as a declaration
/// block, so prefixes, print filtering and `!important` behave alike.
pub fn validate_property(name: &str, value: &str, base_url: &str) -> Vec<Declaration> {
    let raw = parse_declaration_list(&format!("{}: {}", name, value));
    preprocess_declarations(base_url, &raw)
}

pub fn handle_property_command(cli: &EnhancedCli, matches: &clap::ArgMatches) -> Result<()> {
    let name = required(matches, "name")?;
    let value = required(matches, "value")?;
    let settings = cli.build_settings(matches)?;

    let declarations = validate_property(name, value, &settings.options.base_url);
    if declarations.is_empty() {
        eprintln!("❌ `{}: {}` was ignored", name, value);
    }
    println!("{}", render(&declarations, &settings)?);
    Ok(())
}

// --- DESCRIPTORS ---
pub fn handle_font_face_command(cli: &EnhancedCli, matches: &clap::ArgMatches) -> Result<()> {
    let input_path = required(matches, "input")?;
    let settings = cli.build_settings(matches)?;
    let css = read_input(input_path)?;

    let descriptors: FontFaceDescriptors =
        preprocess_descriptors(&settings.options.base_url, &parse_declaration_list(&css));
    println!("{}", render(&descriptors, &settings)?);
    Ok(())
}

pub fn handle_counter_style_command(cli: &EnhancedCli, matches: &clap::ArgMatches) -> Result<()> {
    let input_path = required(matches, "input")?;
    let settings = cli.build_settings(matches)?;
    let css = read_input(input_path)?;

    let descriptors: CounterStyleDescriptors =
        preprocess_descriptors(&settings.options.base_url, &parse_declaration_list(&css));
    println!("{}", render(&descriptors, &settings)?);
    Ok(())
}

// --- REGISTRY ---
#[derive(Debug, Serialize)]
pub struct PropertyEntry {
    pub name: &'static str,
    pub kind: PropertyKind,
    pub inherited: bool,
    pub table_wrapper: bool,
    pub initial_not_computed: bool,
    pub initial: CssProperty,
}

#[derive(Debug, Serialize)]
pub struct ShorthandEntry {
    pub name: &'static str,
    pub longhands: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct RegistryListing {
    pub engine: EngineInfo,
    pub properties: Vec<PropertyEntry>,
    pub shorthands: Vec<ShorthandEntry>,
}

pub fn registry_listing(inherited_only: bool) -> RegistryListing {
    let registry = Registry::global();
    let properties = KnownProp::ALL
        .iter()
        .filter(|&&prop| !inherited_only || registry.is_inherited(prop))
        .map(|&prop| PropertyEntry {
            name: prop.name(),
            kind: prop.kind(),
            inherited: registry.is_inherited(prop),
            table_wrapper: registry.is_table_wrapper_box_property(prop),
            initial_not_computed: registry.is_initial_not_computed(prop),
            initial: registry.initial_value(prop).clone(),
        })
        .collect();
    let shorthands = if inherited_only {
        Vec::new()
    } else {
        Shorthand::ALL
            .iter()
            .map(|&shorthand| ShorthandEntry {
                name: shorthand.name(),
                longhands: shorthand.longhands().iter().map(|prop| prop.name()).collect(),
            })
            .collect()
    };
    RegistryListing {
        engine: crate::BUILD_INFO,
        properties,
        shorthands,
    }
}

pub fn handle_registry_command(cli: &EnhancedCli, matches: &clap::ArgMatches) -> Result<()> {
    let settings = cli.build_settings(matches)?;
    let listing = registry_listing(matches.get_flag("inherited"));
    println!("{}", render(&listing, &settings)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PropKey, ValidatedProperty, ValidationOptions};
    use tempfile::TempDir;

    fn json_settings() -> Settings {
        Settings {
            options: ValidationOptions::default(),
            format: OutputFormat::Json,
            pretty: false,
        }
    }

    #[test]
    fn test_registry_listing() {
        let listing = registry_listing(false);
        assert_eq!(listing.engine.name, crate::NAME);
        assert!(listing.engine.supported_features.contains(&"counter-style"));
        assert_eq!(listing.properties.len(), KnownProp::ALL.len());
        assert_eq!(listing.shorthands.len(), Shorthand::ALL.len());
        let color = listing.properties.iter().find(|p| p.name == "color").unwrap();
        assert!(color.inherited);

        let inherited = registry_listing(true);
        assert!(inherited.properties.iter().all(|p| p.inherited));
        assert!(inherited.properties.iter().all(|p| p.name != "margin-top"));
        assert!(inherited.shorthands.is_empty());
    }

    #[test]
    fn test_render_formats() {
        let declarations = validate_property("opacity", "0.5", "");
        let json = render(&declarations, &json_settings()).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains("\"opacity\""));

        let settings = Settings {
            format: OutputFormat::Debug,
            ..json_settings()
        };
        let debug = render(&declarations, &settings).unwrap();
        assert!(debug.contains("Opacity"));
    }

    #[test]
    fn test_property_shares_declaration_pipeline() {
        let declarations = validate_property("-weasy-hyphens", "auto !important", "");
        assert_eq!(declarations.len(), 1);
        assert_eq!(declarations[0].name, PropKey::Known(KnownProp::Hyphens));
        assert!(declarations[0].important);
        assert_eq!(
            declarations[0].value,
            ValidatedProperty::Resolved(CssProperty::Keyword("auto".to_string()))
        );

        let declarations = validate_property("MARGIN-TOP", "1px", "");
        assert_eq!(declarations[0].name, PropKey::Known(KnownProp::MarginTop));
        assert!(!declarations[0].important);

        assert!(validate_property("cursor", "pointer", "").is_empty());
        assert!(validate_property("-moz-box-sizing", "border-box", "").is_empty());
        assert_eq!(validate_property("margin", "1px 2px", "").len(), 4);
    }

    #[test]
    fn test_read_input() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("face.css");
        fs::write(&path, "font-family: Test").unwrap();
        assert_eq!(read_input(path.to_str().unwrap()).unwrap(), "font-family: Test");
        assert!(matches!(
            read_input("/nonexistent/face.css"),
            Err(ValidationError::FileNotFound { .. })
        ));
    }
}
