use std::{fs, path::{Path, PathBuf}};

use serde::{Deserialize, Serialize};

use crate::error::{LibraryError, Result};

/// Prefix of the environment variables read by [`RecommenderConfig::apply_env_overrides`]
pub const ENV_PREFIX: &str = "BOOKREC_";

/// Relative weight of each similarity metric in the composite score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityWeights {
    /// TF-IDF cosine over descriptions
    pub description: f64,
    /// genre overlap
    pub genres: f64,
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self {
            description: 0.5,
            genres: 0.5,
        }
    }
}

/// Settings for building and querying the recommender.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`BOOKREC_*`)
/// 3. TOML config file
/// 4. Compiled defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    /// CSV dataset of books
    pub books_path: Option<PathBuf>,
    /// stopword list, one word per line
    pub stopwords_path: Option<PathBuf>,
    /// number of recommendations to return
    pub top_n: usize,
    pub weights: SimilarityWeights,
    /// compare genre labels byte for byte
    pub case_sensitive_genres: bool,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            books_path: None,
            stopwords_path: None,
            top_n: 5,
            weights: SimilarityWeights::default(),
            case_sensitive_genres: false,
        }
    }
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub books_path: Option<PathBuf>,
    pub stopwords_path: Option<PathBuf>,
    pub top_n: Option<usize>,
    pub description_weight: Option<f64>,
    pub genres_weight: Option<f64>,
}

impl RecommenderConfig {
    /// Load configuration: defaults, then the optional TOML file, then the
    /// environment, then CLI flags. The result is validated.
    pub fn load(path: Option<&Path>, cli: Option<&CliOverrides>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        if let Some(cli) = cli {
            config.apply_cli_overrides(cli);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| LibraryError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| LibraryError::Config {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Apply `BOOKREC_BOOKS`, `BOOKREC_STOPWORDS` and `BOOKREC_TOP_N`.
    ///
    /// `lookup` resolves a variable name, which keeps tests off the process
    /// environment.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));
        if let Some(books) = var("BOOKS") {
            self.books_path = Some(PathBuf::from(books));
        }
        if let Some(stopwords) = var("STOPWORDS") {
            self.stopwords_path = Some(PathBuf::from(stopwords));
        }
        if let Some(top_n) = var("TOP_N") {
            self.top_n = top_n.trim().parse().map_err(|_| LibraryError::Config {
                path: format!("{ENV_PREFIX}TOP_N"),
                message: format!("expected a positive integer, got {top_n:?}"),
            })?;
        }
        Ok(())
    }

    pub fn apply_cli_overrides(&mut self, cli: &CliOverrides) {
        if let Some(books) = &cli.books_path {
            self.books_path = Some(books.clone());
        }
        if let Some(stopwords) = &cli.stopwords_path {
            self.stopwords_path = Some(stopwords.clone());
        }
        if let Some(top_n) = cli.top_n {
            self.top_n = top_n;
        }
        if let Some(weight) = cli.description_weight {
            self.weights.description = weight;
        }
        if let Some(weight) = cli.genres_weight {
            self.weights.genres = weight;
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(LibraryError::Config {
                path: "top_n".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        for (field, weight) in [
            ("weights.description", self.weights.description),
            ("weights.genres", self.weights.genres),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(LibraryError::Config {
                    path: field.to_string(),
                    message: format!("must be a non-negative number, got {weight}"),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = RecommenderConfig::default();
        assert_eq!(config.top_n, 5);
        assert_eq!(config.weights, SimilarityWeights { description: 0.5, genres: 0.5 });
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = RecommenderConfig::from_toml(
            r#"
            top_n = 10
            books_path = "data/goodreads.csv"

            [weights]
            genres = 0.25
            "#,
        )
        .unwrap();
        assert_eq!(config.top_n, 10);
        assert_eq!(config.books_path, Some(PathBuf::from("data/goodreads.csv")));
        assert_eq!(config.weights.genres, 0.25);
        assert_eq!(config.weights.description, 0.5);
        assert!(!config.case_sensitive_genres);
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let err = RecommenderConfig::from_toml("top_n = \"many\"").unwrap_err();
        assert!(matches!(err, LibraryError::Config { .. }));
    }

    #[test]
    fn env_overrides_file_values() {
        let env: HashMap<String, String> = [
            ("BOOKREC_TOP_N", "3"),
            ("BOOKREC_STOPWORDS", "stop.txt"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        let mut config = RecommenderConfig::from_toml("top_n = 10").unwrap();
        config.apply_env_overrides(|key| env.get(key).cloned()).unwrap();
        assert_eq!(config.top_n, 3);
        assert_eq!(config.stopwords_path, Some(PathBuf::from("stop.txt")));
    }

    #[test]
    fn bad_env_number_is_rejected() {
        let mut config = RecommenderConfig::default();
        let result = config.apply_env_overrides(|key| {
            (key == "BOOKREC_TOP_N").then(|| "lots".to_string())
        });
        assert!(matches!(result, Err(LibraryError::Config { .. })));
    }

    #[test]
    fn cli_overrides_win() {
        let mut config = RecommenderConfig::default();
        config.apply_cli_overrides(&CliOverrides {
            top_n: Some(7),
            genres_weight: Some(1.0),
            ..CliOverrides::default()
        });
        assert_eq!(config.top_n, 7);
        assert_eq!(config.weights.genres, 1.0);
        assert_eq!(config.weights.description, 0.5);
    }

    #[test]
    fn zero_top_n_and_negative_weights_fail_validation() {
        let config = RecommenderConfig { top_n: 0, ..RecommenderConfig::default() };
        assert!(config.validate().is_err());

        let mut config = RecommenderConfig::default();
        config.weights.description = -1.0;
        assert!(config.validate().is_err());
    }
}
