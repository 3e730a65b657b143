//! SmartBirds native host.
//!
//! Loads a dataset from a local directory or the asset bucket and prints the
//! annotation bundle of one species (or the species list) as JSON.
//!
//! ```text
//! smartbirds [--config FILE] [--dataset DIR_OR_URL] SPECIES
//! smartbirds [--config FILE] [--dataset DIR_OR_URL] --species-list
//! ```

#[cfg(not(target_arch = "wasm32"))]
mod host {
    use std::path::{Path, PathBuf};
    use std::process::ExitCode;

    use serde::Serialize;
    use smartbirds::catalog::CatalogKind;
    use smartbirds::config::{ConfigError, LogLevel};
    use smartbirds::detail::{DetailOutcome, fetch_detail};
    use smartbirds::source::{DirectorySource, HttpSource};
    use smartbirds::{
        AssetUrls, DatasetConfig, ImageUrls, LookupError, ResourceSource, SpeciesBundle,
        load_species_list,
    };

    const USAGE: &str = "usage: smartbirds [--config FILE] [--dataset DIR_OR_URL] (SPECIES | --species-list)";

    #[derive(Debug, thiserror::Error)]
    enum HostError {
        #[error("{0}")]
        Usage(String),

        #[error(transparent)]
        Config(#[from] ConfigError),

        #[error(transparent)]
        Lookup(#[from] LookupError),

        #[error("Failed to encode output: {0}")]
        Encode(#[from] serde_json::Error),
    }

    enum Command {
        Species(String),
        SpeciesList,
    }

    struct Args {
        config: Option<PathBuf>,
        dataset: Option<String>,
        command: Command,
    }

    fn parse_args(args: &[String]) -> Result<Args, HostError> {
        let mut config = None;
        let mut dataset = None;
        let mut species_list = false;
        let mut query: Option<String> = None;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--config" | "--dataset" => {
                    let Some(value) = args.get(i + 1) else {
                        return Err(HostError::Usage(format!("{} needs a value", args[i])));
                    };
                    if args[i] == "--config" {
                        config = Some(PathBuf::from(value));
                    } else {
                        dataset = Some(value.clone());
                    }
                    i += 1;
                }
                "--species-list" => species_list = true,
                "-h" | "--help" => return Err(HostError::Usage(USAGE.to_string())),
                other => {
                    // Species names may be given unquoted across several args
                    query = Some(match query {
                        Some(q) => format!("{} {}", q, other),
                        None => other.to_string(),
                    });
                }
            }
            i += 1;
        }

        let command = match (species_list, query) {
            (true, None) => Command::SpeciesList,
            (false, Some(query)) => Command::Species(query),
            _ => return Err(HostError::Usage(USAGE.to_string())),
        };

        Ok(Args {
            config,
            dataset,
            command,
        })
    }

    fn load_config(path: Option<&Path>) -> Result<DatasetConfig, HostError> {
        match path {
            Some(path) => Ok(DatasetConfig::load_from_path(path)?),
            None => Ok(DatasetConfig::default()),
        }
    }

    #[derive(Serialize)]
    struct ImageReport<'a> {
        image_id: &'a str,
        urls: ImageUrls,
        has_bounding_box: bool,
        parts: usize,
        attributes: usize,
    }

    #[derive(Serialize)]
    struct SpeciesReport<'a> {
        #[serde(flatten)]
        bundle: &'a SpeciesBundle,
        partial: &'a [CatalogKind],
        image_urls: Vec<ImageReport<'a>>,
    }

    fn species_report(
        source: &impl ResourceSource,
        config: &DatasetConfig,
        query: &str,
    ) -> Result<String, HostError> {
        let DetailOutcome {
            result,
            unavailable,
        } = pollster::block_on(fetch_detail(source, config, query));
        let bundle = result?;

        let assets = AssetUrls::from_config(config);
        let report = SpeciesReport {
            bundle: &bundle,
            partial: &unavailable,
            image_urls: bundle
                .images
                .iter()
                .map(|image| ImageReport {
                    image_id: image.image_id.as_str(),
                    urls: image.urls(&assets),
                    has_bounding_box: image.has_bounding_box(),
                    parts: image.parts.len(),
                    attributes: image.attributes.len(),
                })
                .collect(),
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }

    fn species_list(
        source: &impl ResourceSource,
        config: &DatasetConfig,
    ) -> Result<String, HostError> {
        let site = DirectorySource::new(".");
        let names = pollster::block_on(load_species_list(
            config.view.species_list_origin,
            &site,
            source,
            &config.resources,
        ));
        Ok(serde_json::to_string_pretty(&names)?)
    }

    fn run_with(
        source: &impl ResourceSource,
        config: &DatasetConfig,
        command: &Command,
    ) -> Result<String, HostError> {
        match command {
            Command::Species(query) => species_report(source, config, query),
            Command::SpeciesList => species_list(source, config),
        }
    }

    /// Start logging at the default level so messages emitted while the
    /// config file is read are not lost.
    fn init_logging() {
        // The logger itself passes everything; the global max level filters.
        let _ = env_logger::Builder::new()
            .filter_level(log::LevelFilter::Trace)
            .try_init();
        apply_log_level(LogLevel::default());
    }

    fn apply_log_level(level: LogLevel) {
        log::set_max_level(level.to_level_filter());
    }

    fn is_remote(location: &str) -> bool {
        location.starts_with("http://") || location.starts_with("https://")
    }

    pub fn run() -> ExitCode {
        let raw_args: Vec<String> = std::env::args().skip(1).collect();
        let args = match parse_args(&raw_args) {
            Ok(args) => args,
            Err(e) => {
                eprintln!("{}", e);
                return ExitCode::from(2);
            }
        };

        init_logging();

        let mut config = match load_config(args.config.as_deref()) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}", e);
                return ExitCode::FAILURE;
            }
        };
        if let Some(dataset) = args.dataset {
            config.asset_base_url = dataset;
        }

        apply_log_level(config.log_level);

        let result = if is_remote(&config.asset_base_url) {
            run_with(&HttpSource::new(config.asset_base_url.as_str()), &config, &args.command)
        } else {
            run_with(
                &DirectorySource::new(config.asset_base_url.as_str()),
                &config,
                &args.command,
            )
        };

        match result {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                log::error!("{}", e);
                eprintln!("{}", e);
                ExitCode::FAILURE
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn args(list: &[&str]) -> Vec<String> {
            list.iter().map(|s| s.to_string()).collect()
        }

        #[test]
        fn test_parse_species_query() {
            let parsed =
                parse_args(&args(&["--dataset", "/data", "Black", "footed", "Albatross"])).unwrap();
            assert_eq!(parsed.dataset.as_deref(), Some("/data"));
            assert!(
                matches!(parsed.command, Command::Species(ref q) if q == "Black footed Albatross")
            );
        }

        #[test]
        fn test_parse_species_list() {
            let parsed = parse_args(&args(&["--species-list"])).unwrap();
            assert!(matches!(parsed.command, Command::SpeciesList));
        }

        #[test]
        fn test_parse_rejects_missing_command() {
            assert!(matches!(parse_args(&args(&[])), Err(HostError::Usage(_))));
            assert!(matches!(parse_args(&args(&["--config"])), Err(HostError::Usage(_))));
        }

        #[test]
        fn test_log_level_follows_config_after_init() {
            init_logging();
            assert_eq!(log::max_level(), log::LevelFilter::Info);

            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("smartbirds.json");
            std::fs::write(&path, r#"{ "version": 1, "log_level": "debug" }"#).unwrap();

            let config = load_config(Some(path.as_path())).unwrap();
            apply_log_level(config.log_level);
            assert_eq!(log::max_level(), log::LevelFilter::Debug);
        }

        #[test]
        fn test_remote_detection() {
            assert!(is_remote("https://storage.googleapis.com/smartbirds-assets"));
            assert!(!is_remote("/data/CUB_200_2011"));
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    host::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {}
