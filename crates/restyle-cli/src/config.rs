//! Configuration file support for restyle
//!
//! Loads `.restyle.toml` from current directory or parent directories.

use anyhow::{Context, Result};
use restyle_rules::RuleOptions;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Configuration file structure
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rules: RulesConfig,
    pub paths: PathsConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// If set, only these rules will run
    pub enabled: Option<Vec<String>>,
    /// Rules to exclude (applied after enabled)
    pub disabled: Vec<String>,
    /// Per-rule options, keyed by rule name
    pub options: RuleOptions,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Glob patterns to exclude from processing
    pub exclude: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "text", "json" or "diff"
    pub format: Option<String>,
}

impl Config {
    /// Load config from `.restyle.toml` searching from current directory upward
    pub fn load() -> Result<Option<(Config, PathBuf)>> {
        Self::load_from(std::env::current_dir()?)
    }

    /// Load config searching from the given directory upward
    pub fn load_from(start_dir: PathBuf) -> Result<Option<(Config, PathBuf)>> {
        let mut current = Some(start_dir.as_path());

        while let Some(dir) = current {
            let config_path = dir.join(".restyle.toml");
            if config_path.exists() {
                let config = Self::load_path(&config_path)?;
                return Ok(Some((config, config_path)));
            }
            current = dir.parent();
        }

        Ok(None)
    }

    /// Load config from a specific path
    pub fn load_path(path: &Path) -> Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Compute the effective set of enabled rules
    pub fn effective_rules(&self, all_rules: &[&str], cli_rules: &[String]) -> HashSet<String> {
        // CLI rules override config completely
        if !cli_rules.is_empty() {
            return cli_rules.iter().cloned().collect();
        }

        let mut rules: HashSet<String> = match &self.rules.enabled {
            Some(enabled) => enabled.iter().cloned().collect(),
            None => all_rules.iter().map(|s| s.to_string()).collect(),
        };

        for disabled in &self.rules.disabled {
            rules.remove(disabled);
        }

        rules
    }

    /// Check if a path should be excluded based on config patterns
    pub fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        for pattern in &self.paths.exclude {
            if let Ok(glob_pattern) = glob::Pattern::new(pattern) {
                if glob_pattern.matches(&path_str) {
                    return true;
                }
                // Also try matching against just the file/dir name
                if let Some(file_name) = path.file_name() {
                    if glob_pattern.matches(&file_name.to_string_lossy()) {
                        return true;
                    }
                }
            }

            // Simple prefix/contains matching for directory patterns
            if pattern.ends_with('/') {
                let dir_pattern = pattern.trim_end_matches('/');
                if path_str.contains(&format!("/{}/", dir_pattern))
                    || path_str.starts_with(&format!("{}/", dir_pattern))
                {
                    return true;
                }
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use restyle_rules::import_sort::TypeImportHandling;
    use std::fs;
    use tempfile::TempDir;

    fn create_config(dir: &Path, content: &str) {
        fs::write(dir.join(".restyle.toml"), content).unwrap();
    }

    #[test]
    fn test_load_basic_config() {
        let temp = TempDir::new().unwrap();
        create_config(
            temp.path(),
            r#"
[rules]
enabled = ["import_sort", "import_dedupe"]
disabled = ["import_dedupe"]

[paths]
exclude = ["node_modules/", "*.generated.ts"]

[output]
format = "json"
"#,
        );

        let (config, path) = Config::load_from(temp.path().to_path_buf())
            .unwrap()
            .unwrap();

        assert_eq!(path, temp.path().join(".restyle.toml"));
        assert_eq!(
            config.rules.enabled,
            Some(vec!["import_sort".to_string(), "import_dedupe".to_string()])
        );
        assert_eq!(config.rules.disabled, vec!["import_dedupe".to_string()]);
        assert_eq!(
            config.paths.exclude,
            vec!["node_modules/".to_string(), "*.generated.ts".to_string()]
        );
        assert_eq!(config.output.format, Some("json".to_string()));
    }

    #[test]
    fn test_load_rule_options() {
        let temp = TempDir::new().unwrap();
        create_config(
            temp.path(),
            r#"
[rules.options.consistent_chaining]
allow_leading_property_access = false

[rules.options.import_sort]
type_import_handling = "after"
ignore_side_effect_imports = false

[[rules.options.import_sort.path_groups]]
pattern = "^@corp/"
group = "builtin"
"#,
        );

        let (config, _) = Config::load_from(temp.path().to_path_buf())
            .unwrap()
            .unwrap();

        let options = &config.rules.options;
        assert!(!options.consistent_chaining.allow_leading_property_access);
        assert_eq!(
            options.import_sort.type_import_handling,
            TypeImportHandling::After
        );
        assert!(!options.import_sort.ignore_side_effect_imports);
        assert_eq!(options.import_sort.path_groups.len(), 1);
        assert_eq!(options.import_sort.path_groups[0].pattern, "^@corp/");
    }

    #[test]
    fn test_load_empty_config() {
        let temp = TempDir::new().unwrap();
        create_config(temp.path(), "");

        let (config, _) = Config::load_from(temp.path().to_path_buf())
            .unwrap()
            .unwrap();

        assert!(config.rules.enabled.is_none());
        assert!(config.rules.disabled.is_empty());
        assert!(config.paths.exclude.is_empty());
        assert!(config.output.format.is_none());
    }

    #[test]
    fn test_config_found_in_parent() {
        let temp = TempDir::new().unwrap();
        create_config(temp.path(), "[rules]\ndisabled = [\"import_dedupe\"]\n");
        let nested = temp.path().join("src").join("deep");
        fs::create_dir_all(&nested).unwrap();

        let (config, path) = Config::load_from(nested).unwrap().unwrap();
        assert_eq!(path, temp.path().join(".restyle.toml"));
        assert_eq!(config.rules.disabled, vec!["import_dedupe".to_string()]);
    }

    #[test]
    fn test_no_config_found() {
        let temp = TempDir::new().unwrap();
        let result = Config::load_from(temp.path().to_path_buf()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_effective_rules_cli_override() {
        let config = Config::default();
        let all_rules = &["import_sort", "import_dedupe", "consistent_chaining"];
        let cli_rules = vec!["import_sort".to_string()];

        let effective = config.effective_rules(all_rules, &cli_rules);

        assert_eq!(effective.len(), 1);
        assert!(effective.contains("import_sort"));
    }

    #[test]
    fn test_effective_rules_with_disabled() {
        let config = Config {
            rules: RulesConfig {
                enabled: None,
                disabled: vec!["import_dedupe".to_string()],
                options: RuleOptions::default(),
            },
            ..Default::default()
        };
        let all_rules = &["import_sort", "import_dedupe", "consistent_chaining"];

        let effective = config.effective_rules(all_rules, &[]);

        assert_eq!(effective.len(), 2);
        assert!(effective.contains("import_sort"));
        assert!(effective.contains("consistent_chaining"));
        assert!(!effective.contains("import_dedupe"));
    }

    #[test]
    fn test_should_exclude_glob() {
        let config = Config {
            paths: PathsConfig {
                exclude: vec!["*.generated.ts".to_string()],
            },
            ..Default::default()
        };

        assert!(config.should_exclude(Path::new("foo.generated.ts")));
        assert!(!config.should_exclude(Path::new("foo.ts")));
    }

    #[test]
    fn test_should_exclude_directory() {
        let config = Config {
            paths: PathsConfig {
                exclude: vec!["node_modules/".to_string()],
            },
            ..Default::default()
        };

        assert!(config.should_exclude(Path::new("app/node_modules/pkg/index.ts")));
        assert!(config.should_exclude(Path::new("node_modules/pkg/index.ts")));
        assert!(!config.should_exclude(Path::new("src/node_modules.ts")));
    }
}
