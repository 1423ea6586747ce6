//! Mapping from presentation filter hints to category substrings.
//!
//! Source category strings are uncontrolled free text, so prioritization is a
//! lexical containment test. The substrings live here rather than in the
//! ranking code so they can be overridden from a YAML file.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRule {
    /// Filter hint as sent by presentation, e.g. `"Hazardous"`.
    pub name: String,
    /// Lowercase substring a facility category must contain to match.
    pub category_contains: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRules {
    pub filters: Vec<FilterRule>,
}

impl Default for FilterRules {
    fn default() -> Self {
        Self {
            filters: vec![
                FilterRule {
                    name: "Hazardous".to_string(),
                    category_contains: "haz".to_string(),
                },
                FilterRule {
                    name: "Recycle".to_string(),
                    category_contains: "rec".to_string(),
                },
            ],
        }
    }
}

impl FilterRules {
    /// Substring associated with `filter_type`, matched case-insensitively.
    ///
    /// `None` for an absent or unknown filter, which means "show all".
    #[must_use]
    pub fn substring_for(&self, filter_type: Option<&str>) -> Option<&str> {
        let filter_type = filter_type?.trim();
        self.filters
            .iter()
            .find(|rule| rule.name.eq_ignore_ascii_case(filter_type))
            .map(|rule| rule.category_contains.as_str())
    }

    /// Names of all configured filters, in file order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.filters.iter().map(|rule| rule.name.as_str())
    }
}

/// Load and validate filter rules from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_filter_rules(path: &Path) -> Result<FilterRules, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FilterRulesIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_filter_rules(&content)
}

fn parse_filter_rules(content: &str) -> Result<FilterRules, ConfigError> {
    let rules: FilterRules = serde_yaml::from_str(content)?;
    validate_filter_rules(&rules)?;
    Ok(rules)
}

fn validate_filter_rules(rules: &FilterRules) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();

    for rule in &rules.filters {
        if rule.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "filter name must be non-empty".to_string(),
            ));
        }

        if rule.category_contains.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "filter '{}' has an empty category_contains",
                rule.name
            )));
        }

        if !seen_names.insert(rule.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate filter name: '{}'",
                rule.name
            )));
        }
    }

    Ok(())
}
