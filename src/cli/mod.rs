// FILE: src/cli/mod.rs

mod config;
mod handlers;

use crate::error::{Result, ValidationError};
use crate::ValidationOptions;
use clap::{Arg, ArgAction, Command, ValueEnum};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Debug,
}

/// Output settings after merging the configuration file and the flags.
#[derive(Debug, Clone)]
pub struct Settings {
    pub options: ValidationOptions,
    pub format: OutputFormat,
    pub pretty: bool,
}

pub struct EnhancedCli {
    config: config::ConfigFile,
    start_time: Instant,
}

impl Default for EnhancedCli {
    fn default() -> Self {
        Self::new()
    }
}

impl EnhancedCli {
    pub fn new() -> Self {
        Self {
            config: config::ConfigFile::default(),
            start_time: Instant::now(),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        self.start_time = Instant::now();
        let matches = self.build_cli().get_matches();

        if let Some(config_path) = matches.get_one::<String>("config") {
            self.config = config::load(config_path)?;
        }

        self.setup_logging(matches.get_count("verbose"))?;

        let result = match matches.subcommand() {
            Some(("check", sub_matches)) => handlers::handle_check_command(self, sub_matches),
            Some(("property", sub_matches)) => handlers::handle_property_command(self, sub_matches),
            Some(("font-face", sub_matches)) => handlers::handle_font_face_command(self, sub_matches),
            Some(("counter-style", sub_matches)) => {
                handlers::handle_counter_style_command(self, sub_matches)
            }
            Some(("registry", sub_matches)) => handlers::handle_registry_command(self, sub_matches),
            _ => {
                println!("No subcommand specified. Use --help for usage information.");
                Ok(())
            }
        };
        log::debug!("Finished in {}ms", self.start_time.elapsed().as_millis());
        result
    }

    fn build_cli(&self) -> Command {
        let format_arg = || {
            Arg::new("format")
                .short('f')
                .long("format")
                .value_parser(clap::value_parser!(OutputFormat))
                .help("Output format")
        };
        let pretty_arg = || {
            Arg::new("pretty")
                .long("pretty")
                .help("Pretty-print JSON output")
                .action(ArgAction::SetTrue)
        };
        let base_url_arg = || {
            Arg::new("base-url")
                .short('b')
                .long("base-url")
                .value_name("URL")
                .help("Base url for relative url() references")
        };

        Command::new(crate::NAME)
            .version(crate::VERSION)
            .about(crate::DESCRIPTION)
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("FILE")
                    .help("Configuration file path")
                    .action(ArgAction::Set),
            )
            .arg(
                Arg::new("verbose")
                    .short('v')
                    .long("verbose")
                    .help("Increase verbosity (can be used multiple times)")
                    .action(ArgAction::Count),
            )
            .subcommand(
                Command::new("check")
                    .about("Validate a declaration block and print the resulting declarations")
                    .arg(Arg::new("input").help("Input file, or - for stdin").required(true).index(1))
                    .arg(base_url_arg())
                    .arg(format_arg())
                    .arg(pretty_arg())
                    .arg(Arg::new("skip-pending").long("skip-pending").help("Omit declarations waiting for var() substitution").action(ArgAction::SetTrue))
                    .arg(Arg::new("stats").long("stats").help("Show validation statistics").action(ArgAction::SetTrue)),
            )
            .subcommand(
                Command::new("property")
                    .about("Validate or expand a single declaration")
                    .arg(Arg::new("name").help("Property name").required(true).index(1))
                    .arg(Arg::new("value").help("Property value").required(true).index(2))
                    .arg(base_url_arg())
                    .arg(format_arg())
                    .arg(pretty_arg()),
            )
            .subcommand(
                Command::new("font-face")
                    .about("Validate the descriptors of an @font-face rule")
                    .arg(Arg::new("input").help("Input file, or - for stdin").required(true).index(1))
                    .arg(base_url_arg())
                    .arg(format_arg())
                    .arg(pretty_arg()),
            )
            .subcommand(
                Command::new("counter-style")
                    .about("Validate the descriptors of an @counter-style rule")
                    .arg(Arg::new("input").help("Input file, or - for stdin").required(true).index(1))
                    .arg(base_url_arg())
                    .arg(format_arg())
                    .arg(pretty_arg()),
            )
            .subcommand(
                Command::new("registry")
                    .about("List known properties with their flags and initial values")
                    .arg(Arg::new("inherited").long("inherited").help("Only list inherited properties").action(ArgAction::SetTrue))
                    .arg(format_arg())
                    .arg(pretty_arg()),
            )
    }

    fn setup_logging(&self, verbose_count: u8) -> Result<()> {
        let log_level = match verbose_count {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };
        env_logger::Builder::from_default_env()
            .filter_level(log_level)
            .format_timestamp_secs()
            .init();
        Ok(())
    }

    /// Merges the configuration file with the subcommand flags; flags win.
    pub fn build_settings(&self, matches: &clap::ArgMatches) -> Result<Settings> {
        let mut options = ValidationOptions::default();
        if let Some(base_url) = &self.config.base_url {
            options.base_url = base_url.clone();
        }
        if let Ok(Some(base_url)) = matches.try_get_one::<String>("base-url") {
            options.base_url = base_url.clone();
        }
        options.skip_pending = matches.try_get_one::<bool>("skip-pending").ok().flatten().copied().unwrap_or(false)
            || self.config.skip_pending.unwrap_or(false);

        let format = match matches.try_get_one::<OutputFormat>("format").ok().flatten() {
            Some(format) => *format,
            None => match &self.config.output_format {
                Some(name) => OutputFormat::from_str(name, true).map_err(|_| {
                    ValidationError::invalid_format(format!(
                        "Unknown output format: {}. Use json or debug.",
                        name
                    ))
                })?,
                None => OutputFormat::Json,
            },
        };
        let pretty = matches.get_flag("pretty") || self.config.pretty.unwrap_or(false);

        Ok(Settings {
            options,
            format,
            pretty,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(cli: &EnhancedCli, args: &[&str]) -> Result<Settings> {
        let matches = cli.build_cli().try_get_matches_from(args).unwrap();
        let (_, sub_matches) = matches.subcommand().unwrap();
        cli.build_settings(sub_matches)
    }

    #[test]
    fn test_cli_definition() {
        EnhancedCli::new().build_cli().debug_assert();
    }

    #[test]
    fn test_flags_override_config() {
        let mut cli = EnhancedCli::new();
        cli.config = config::ConfigFile {
            base_url: Some("https://config.example/".to_string()),
            output_format: Some("debug".to_string()),
            pretty: None,
            skip_pending: Some(true),
        };

        let settings = settings(&cli, &["csspv", "check", "-", "--pretty"]).unwrap();
        assert_eq!(settings.options.base_url, "https://config.example/");
        assert_eq!(settings.format, OutputFormat::Debug);
        assert!(settings.pretty);
        assert!(settings.options.skip_pending);

        let settings = settings_for_property(&cli);
        assert_eq!(settings.options.base_url, "https://flag.example/");
        assert_eq!(settings.format, OutputFormat::Json);
    }

    fn settings_for_property(cli: &EnhancedCli) -> Settings {
        settings(
            cli,
            &["csspv", "property", "margin", "1px", "-b", "https://flag.example/", "-f", "json"],
        )
        .unwrap()
    }

    #[test]
    fn test_unknown_config_format() {
        let mut cli = EnhancedCli::new();
        cli.config.output_format = Some("yaml".to_string());
        assert!(matches!(
            settings(&cli, &["csspv", "registry"]),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }
}
