use crate::catalog::walker::DEFAULT_MAX_PARAMETERS;
use crate::catalog::{CategoryPrefixes, WalkOptions};
use crate::tokenizer::special_cases::DEFAULT_SPECIAL_CASES;
use crate::tokenizer::{RuleCascade, SegmentRule, SpecialCases, TokenizerPolicy};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const LOCAL_CONFIG_FILE: &str = ".protoflux-catalog.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Library category holding the ProtoFlux tree.
    pub root_category: String,
    pub max_parameters: usize,
    pub category_prefixes: CategoryPrefixes,
    pub special_cases: Vec<String>,
    pub tokenizer: TokenizerPolicy,
    /// Replaces the policy's rule order when set.
    pub rules: Option<Vec<SegmentRule>>,
    pub dedupe: bool,
}

/// The keys one config file sets. Unset keys leave the layer below alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub root_category: Option<String>,
    pub max_parameters: Option<usize>,
    pub category_prefixes: Option<CategoryPrefixes>,
    pub special_cases: Option<Vec<String>>,
    pub tokenizer: Option<TokenizerPolicy>,
    pub rules: Option<Vec<SegmentRule>>,
    pub dedupe: Option<bool>,
}

impl ConfigFile {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_category: "ProtoFlux".to_string(),
            max_parameters: DEFAULT_MAX_PARAMETERS,
            category_prefixes: CategoryPrefixes::default(),
            special_cases: DEFAULT_SPECIAL_CASES.iter().map(|s| s.to_string()).collect(),
            tokenizer: TokenizerPolicy::default(),
            rules: None,
            dedupe: false,
        }
    }
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global config > defaults
    pub fn load(
        root_category: Option<String>,
        max_parameters: Option<usize>,
        tokenizer: Option<TokenizerPolicy>,
        dedupe: bool,
    ) -> Result<Self> {
        let mut config = Self::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                config = config.merge(ConfigFile::from_file(&global_path)?);
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            config = config.merge(ConfigFile::from_file(&local_path)?);
        }

        config = config.merge(ConfigFile {
            root_category,
            max_parameters,
            tokenizer,
            dedupe: dedupe.then_some(true),
            ..Default::default()
        });

        Ok(config)
    }

    /// Defaults overlaid with a single file.
    pub fn from_file(path: &Path) -> Result<Self> {
        Ok(Self::default().merge(ConfigFile::from_file(path)?))
    }

    fn merge(mut self, file: ConfigFile) -> Self {
        if let Some(root_category) = file.root_category {
            self.root_category = root_category;
        }
        if let Some(max_parameters) = file.max_parameters {
            self.max_parameters = max_parameters;
        }
        if let Some(prefixes) = file.category_prefixes {
            self.category_prefixes = prefixes;
        }
        if let Some(special_cases) = file.special_cases {
            self.special_cases = special_cases;
        }
        if let Some(policy) = file.tokenizer {
            self.tokenizer = policy;
        }
        if let Some(rules) = file.rules {
            self.rules = Some(rules);
        }
        if let Some(dedupe) = file.dedupe {
            self.dedupe = dedupe;
        }
        self
    }

    pub fn tokenizer(&self) -> RuleCascade {
        let cascade = RuleCascade::for_policy(
            self.tokenizer,
            SpecialCases::new(self.special_cases.iter().cloned()),
        );
        match &self.rules {
            Some(rules) => cascade.with_rules(rules.clone()),
            None => cascade,
        }
    }

    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            max_parameters: self.max_parameters,
            prefixes: self.category_prefixes.clone(),
            dedupe: self.dedupe,
        }
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "protoflux-catalog")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
