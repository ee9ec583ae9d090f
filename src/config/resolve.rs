use crate::config::provenance::{ProvenanceMap, Source};
use crate::config::schema::FileConfig;
use crate::config::{ResolvedConfig, PROJECT_CONFIG_FILE};
use crate::errors::{Result, SnackDepsError};
use crate::output::OutputFormat;
use std::path::{Path, PathBuf};

pub const ENV_FORMAT: &str = "SNACK_DEPS_FORMAT";
pub const ENV_QUIET: &str = "SNACK_DEPS_QUIET";
pub const ENV_INCLUDE: &str = "SNACK_DEPS_INCLUDE";
pub const ENV_EXCLUDE: &str = "SNACK_DEPS_EXCLUDE";
pub const ENV_VERSIONS: &str = "SNACK_DEPS_VERSIONS";

const SETTING_KEYS: &[&str] = &[
    "defaults.format",
    "defaults.quiet",
    "targeting.include",
    "targeting.exclude",
    "extract.versions",
];

/// Values taken from command-line flags. Unset flags leave lower layers alone.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub format: Option<OutputFormat>,
    pub quiet: bool,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub names_only: bool,
}

/// Resolve configuration by applying layers bottom-up:
/// 1. Built-in defaults
/// 2. User config (`<config dir>/snack-deps/config.toml`)
/// 3. Project config (nearest `.snackdeps.toml` walking up from `working_dir`)
/// 4. Environment variables
/// 5. CLI overrides
pub fn resolve_config(working_dir: &Path, cli: &CliOverrides) -> Result<ResolvedConfig> {
    resolve_with_env(working_dir, cli, find_user_config(), |name| {
        std::env::var(name).ok()
    })
}

/// [`resolve_config`] with the user config location and environment supplied.
pub fn resolve_with_env(
    working_dir: &Path,
    cli: &CliOverrides,
    user_config: Option<PathBuf>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ResolvedConfig> {
    let mut config = ResolvedConfig::default();
    let mut prov = ProvenanceMap::new();
    for key in SETTING_KEYS {
        prov.set(*key, Source::Default);
    }

    if let Some(path) = user_config.filter(|p| p.is_file()) {
        let file_config = load_file_config(&path)?;
        apply_file_config(
            &mut config,
            &file_config,
            Source::UserConfig(path.clone()),
            &mut prov,
        )?;
        config.loaded_files.push(path);
    }

    if let Some(path) = find_project_config(working_dir) {
        let file_config = load_file_config(&path)?;
        apply_file_config(
            &mut config,
            &file_config,
            Source::ProjectConfig(path.clone()),
            &mut prov,
        )?;
        config.loaded_files.push(path);
    }

    apply_env_vars(&mut config, &mut prov, env)?;
    apply_cli_overrides(&mut config, cli, &mut prov);

    config.ignore_patterns = crate::config::ignore::load_ignore_file(working_dir);
    config.provenance = prov;

    tracing::debug!(
        files = config.loaded_files.len(),
        ignore_patterns = config.ignore_patterns.len(),
        "resolved configuration"
    );

    Ok(config)
}

fn find_user_config() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("snack-deps").join("config.toml"))
}

fn find_project_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(PROJECT_CONFIG_FILE))
        .find(|path| path.is_file())
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        SnackDepsError::Config(format!("Could not read {}: {e}", path.display()))
    })?;
    FileConfig::from_toml(&content)
        .map_err(|e| SnackDepsError::Config(format!("Invalid config {}: {e}", path.display())))
}

fn parse_format(value: &str, origin: &Source) -> Result<OutputFormat> {
    <OutputFormat as clap::ValueEnum>::from_str(value, true).map_err(|_| {
        SnackDepsError::Config(format!(
            "Invalid format '{value}' from {origin}; expected json or text"
        ))
    })
}

fn parse_bool(value: &str, origin: &Source) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(SnackDepsError::Config(format!(
            "Invalid boolean '{value}' from {origin}"
        ))),
    }
}

fn split_patterns(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

fn apply_file_config(
    config: &mut ResolvedConfig,
    file: &FileConfig,
    source: Source,
    prov: &mut ProvenanceMap,
) -> Result<()> {
    if let Some(ref format) = file.defaults.format {
        config.format = parse_format(format, &source)?;
        prov.set("defaults.format", source.clone());
    }
    if let Some(quiet) = file.defaults.quiet {
        config.quiet = quiet;
        prov.set("defaults.quiet", source.clone());
    }
    if !file.targeting.include.is_empty() {
        config.include = file.targeting.include.clone();
        prov.set("targeting.include", source.clone());
    }
    if !file.targeting.exclude.is_empty() {
        config.exclude = file.targeting.exclude.clone();
        prov.set("targeting.exclude", source.clone());
    }
    if let Some(versions) = file.extract.versions {
        config.extract.versions = versions;
        prov.set("extract.versions", source);
    }
    Ok(())
}

fn apply_env_vars(
    config: &mut ResolvedConfig,
    prov: &mut ProvenanceMap,
    env: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(value) = env(ENV_FORMAT) {
        let source = Source::EnvVar(ENV_FORMAT.to_string());
        config.format = parse_format(&value, &source)?;
        prov.set("defaults.format", source);
    }
    if let Some(value) = env(ENV_QUIET) {
        let source = Source::EnvVar(ENV_QUIET.to_string());
        config.quiet = parse_bool(&value, &source)?;
        prov.set("defaults.quiet", source);
    }
    if let Some(value) = env(ENV_INCLUDE) {
        config.include = split_patterns(&value);
        prov.set("targeting.include", Source::EnvVar(ENV_INCLUDE.to_string()));
    }
    if let Some(value) = env(ENV_EXCLUDE) {
        config.exclude = split_patterns(&value);
        prov.set("targeting.exclude", Source::EnvVar(ENV_EXCLUDE.to_string()));
    }
    if let Some(value) = env(ENV_VERSIONS) {
        let source = Source::EnvVar(ENV_VERSIONS.to_string());
        config.extract.versions = parse_bool(&value, &source)?;
        prov.set("extract.versions", source);
    }
    Ok(())
}

fn apply_cli_overrides(config: &mut ResolvedConfig, cli: &CliOverrides, prov: &mut ProvenanceMap) {
    if let Some(format) = cli.format {
        config.format = format;
        prov.set("defaults.format", Source::CliFlag("--format".to_string()));
    }
    if cli.quiet {
        config.quiet = true;
        prov.set("defaults.quiet", Source::CliFlag("--quiet".to_string()));
    }
    if !cli.include.is_empty() {
        config.include = cli.include.clone();
        prov.set("targeting.include", Source::CliFlag("--include".to_string()));
    }
    if !cli.exclude.is_empty() {
        config.exclude = cli.exclude.clone();
        prov.set("targeting.exclude", Source::CliFlag("--exclude".to_string()));
    }
    if cli.names_only {
        config.extract.versions = false;
        prov.set("extract.versions", Source::CliFlag("--names-only".to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn resolve(dir: &Path, cli: &CliOverrides) -> ResolvedConfig {
        resolve_with_env(dir, cli, None, no_env).unwrap()
    }

    #[test]
    fn defaults_without_any_layer() {
        let tmp = tempfile::tempdir().unwrap();
        let config = resolve(tmp.path(), &CliOverrides::default());
        assert_eq!(config.format, OutputFormat::Json);
        assert!(!config.quiet);
        assert!(config.extract.versions);
        assert!(config.loaded_files.is_empty());
        assert_eq!(config.provenance.get("defaults.format"), Some(&Source::Default));
    }

    #[test]
    fn project_config_found_from_subdirectory() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join(PROJECT_CONFIG_FILE),
            "[defaults]\nformat = \"text\"\n\n[targeting]\nexclude = [\"web-build/**\"]\n",
        )
        .unwrap();
        let nested = tmp.path().join("screens");
        std::fs::create_dir(&nested).unwrap();

        let config = resolve(&nested, &CliOverrides::default());
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.exclude, vec!["web-build/**"]);
        assert_eq!(config.loaded_files, vec![tmp.path().join(PROJECT_CONFIG_FILE)]);
        assert!(matches!(
            config.provenance.get("targeting.exclude"),
            Some(Source::ProjectConfig(_))
        ));
    }

    #[test]
    fn project_overrides_user() {
        let tmp = tempfile::tempdir().unwrap();
        let user = tmp.path().join("user.toml");
        std::fs::write(&user, "[defaults]\nquiet = true\nformat = \"text\"\n").unwrap();
        let project = tmp.path().join("app");
        std::fs::create_dir(&project).unwrap();
        std::fs::write(
            project.join(PROJECT_CONFIG_FILE),
            "[defaults]\nformat = \"json\"\n",
        )
        .unwrap();

        let config =
            resolve_with_env(&project, &CliOverrides::default(), Some(user.clone()), no_env)
                .unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.quiet);
        assert_eq!(
            config.provenance.get("defaults.quiet"),
            Some(&Source::UserConfig(user))
        );
        assert_eq!(config.loaded_files.len(), 2);
    }

    #[test]
    fn env_overrides_files_and_cli_overrides_env() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join(PROJECT_CONFIG_FILE),
            "[extract]\nversions = true\n",
        )
        .unwrap();
        let env: HashMap<&str, &str> = [
            (ENV_FORMAT, "TEXT"),
            (ENV_VERSIONS, "false"),
            (ENV_INCLUDE, "src/**, screens/**"),
        ]
        .into_iter()
        .collect();
        let lookup = |name: &str| env.get(name).map(|v| v.to_string());

        let config =
            resolve_with_env(tmp.path(), &CliOverrides::default(), None, lookup).unwrap();
        assert_eq!(config.format, OutputFormat::Text);
        assert!(!config.extract.versions);
        assert_eq!(config.include, vec!["src/**", "screens/**"]);

        let cli = CliOverrides {
            format: Some(OutputFormat::Json),
            include: vec!["App.js".to_string()],
            ..Default::default()
        };
        let config = resolve_with_env(tmp.path(), &cli, None, lookup).unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.include, vec!["App.js"]);
        assert_eq!(
            config.provenance.get("defaults.format"),
            Some(&Source::CliFlag("--format".to_string()))
        );
    }

    #[test]
    fn names_only_flag_disables_versions() {
        let tmp = tempfile::tempdir().unwrap();
        let cli = CliOverrides {
            names_only: true,
            ..Default::default()
        };
        let config = resolve(tmp.path(), &cli);
        assert!(!config.extract.versions);
        assert!(!config.extract_options().extract_versions);
    }

    #[test]
    fn invalid_values_are_config_errors() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join(PROJECT_CONFIG_FILE),
            "[defaults]\nformat = \"yaml\"\n",
        )
        .unwrap();
        let err = resolve_with_env(tmp.path(), &CliOverrides::default(), None, no_env)
            .unwrap_err();
        assert!(matches!(err, SnackDepsError::Config(_)));

        let empty = tempfile::tempdir().unwrap();
        let err = resolve_with_env(empty.path(), &CliOverrides::default(), None, |name| {
            (name == ENV_QUIET).then(|| "maybe".to_string())
        })
        .unwrap_err();
        assert!(err.to_string().contains("maybe"));
    }

    #[test]
    fn picks_up_ignore_file() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(".snackdepsignore"), "web-build/**\n").unwrap();
        let config = resolve(
            tmp.path(),
            &CliOverrides {
                exclude: vec!["*.test.js".to_string()],
                ..Default::default()
            },
        );
        assert_eq!(config.all_excludes(), vec!["*.test.js", "web-build/**"]);
    }
}
