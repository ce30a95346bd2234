use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const ALBERTA_YAML: &str = include_str!("../regions/alberta.yaml");
const QUEBEC_YAML: &str = include_str!("../regions/quebec.yaml");

/// Language a query is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Fr,
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::En => write!(f, "en"),
            Language::Fr => write!(f, "fr"),
        }
    }
}

/// A run of consecutive queries sharing one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryBlock {
    pub lang: Language,
    pub queries: Vec<String>,
}

/// Search coverage for one province: the broad province-wide queries plus
/// major, medium and rural city lists, each an ordered list of blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionDefinition {
    pub name: String,
    pub slug: String,
    /// Output filename used when `--out` is not given.
    pub default_output: String,
    pub province_wide: Vec<QueryBlock>,
    pub major: Vec<QueryBlock>,
    #[serde(default)]
    pub medium: Vec<QueryBlock>,
    pub rural: Vec<QueryBlock>,
}

impl RegionDefinition {
    /// Total number of queries across every group, ignoring filters.
    #[must_use]
    pub fn query_count(&self) -> usize {
        [&self.province_wide, &self.major, &self.medium, &self.rural]
            .into_iter()
            .flatten()
            .map(|b| b.queries.len())
            .sum()
    }

    /// Languages used anywhere in the definition.
    #[must_use]
    pub fn languages(&self) -> Vec<Language> {
        let mut langs = Vec::new();
        for block in [&self.province_wide, &self.major, &self.medium, &self.rural]
            .into_iter()
            .flatten()
        {
            if !langs.contains(&block.lang) {
                langs.push(block.lang);
            }
        }
        langs
    }
}

/// Parse a region definition from YAML and validate it.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML does not parse or fails validation.
pub fn parse_region(yaml: &str) -> Result<RegionDefinition, ConfigError> {
    let region: RegionDefinition = serde_yaml::from_str(yaml)?;
    validate_region(&region)?;
    Ok(region)
}

/// Load and validate a region definition from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_region(path: &Path) -> Result<RegionDefinition, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RegionFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_region(&content)
}

/// All region definitions compiled into the binary, in a stable order.
///
/// # Errors
///
/// Returns `ConfigError` if an embedded definition is invalid.
pub fn builtin_regions() -> Result<Vec<RegionDefinition>, ConfigError> {
    [ALBERTA_YAML, QUEBEC_YAML]
        .into_iter()
        .map(parse_region)
        .collect()
}

/// Look up a built-in region by slug (case-insensitive).
///
/// # Errors
///
/// Returns [`ConfigError::UnknownRegion`] if no built-in region matches.
pub fn builtin_region(slug: &str) -> Result<RegionDefinition, ConfigError> {
    let wanted = slug.trim().to_lowercase();
    builtin_regions()?
        .into_iter()
        .find(|r| r.slug == wanted)
        .ok_or_else(|| ConfigError::UnknownRegion(slug.to_string()))
}

fn validate_region(region: &RegionDefinition) -> Result<(), ConfigError> {
    if region.name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "region name must be non-empty".to_string(),
        ));
    }

    if region.slug.trim().is_empty() || region.slug != region.slug.to_lowercase() {
        return Err(ConfigError::Validation(format!(
            "region '{}' must have a lowercase, non-empty slug",
            region.name
        )));
    }

    if region.default_output.trim().is_empty() {
        return Err(ConfigError::Validation(format!(
            "region '{}' has an empty default_output",
            region.name
        )));
    }

    // Every selectable group must survive the English-only filter, so each
    // one needs at least one English query.
    for (group, blocks) in [
        ("province_wide", &region.province_wide),
        ("major", &region.major),
        ("rural", &region.rural),
    ] {
        let has_english = blocks
            .iter()
            .any(|b| b.lang == Language::En && !b.queries.is_empty());
        if !has_english {
            return Err(ConfigError::Validation(format!(
                "region '{}' group '{group}' needs at least one English query",
                region.name
            )));
        }
    }

    let mut seen = HashSet::new();
    for block in [
        &region.province_wide,
        &region.major,
        &region.medium,
        &region.rural,
    ]
    .into_iter()
    .flatten()
    {
        for query in &block.queries {
            if query.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "region '{}' contains an empty query",
                    region.name
                )));
            }
            if !seen.insert(query.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "region '{}' repeats query '{query}'",
                    region.name
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "regions_test.rs"]
mod tests;
