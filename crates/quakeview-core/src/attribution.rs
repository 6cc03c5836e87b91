//! Contributing-network attribution.
//!
//! Products name their contributor with a short network id (`"us"`, `"ci"`).
//! The lookup table maps ids and aliases to a display title and is either the
//! built-in ANSS table or loaded from a YAML file:
//!
//! ```yaml
//! contributors:
//!   - id: us
//!     title: USGS National Earthquake Information Center, PDE
//!     url: https://earthquake.usgs.gov/contactus/golden/neic.php
//!     aliases: [usauto]
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl Contributor {
    fn matches(&self, id: &str) -> bool {
        self.id.eq_ignore_ascii_case(id) || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(id))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributors {
    pub contributors: Vec<Contributor>,
}

const BUILTIN: &[(&str, &str, &[&str])] = &[
    ("us", "USGS National Earthquake Information Center, PDE", &["usauto"]),
    ("ak", "Alaska Earthquake Center", &[]),
    ("at", "National Tsunami Warning Center", &[]),
    ("ci", "California Integrated Seismic Network: Southern California Seismic Network", &[]),
    ("hv", "Hawaiian Volcano Observatory", &[]),
    ("mb", "Montana Bureau of Mines and Geology", &[]),
    ("nc", "California Integrated Seismic Network: Northern California Seismic System", &["np"]),
    ("nm", "New Madrid Seismic Network", &[]),
    ("nn", "Nevada Seismological Laboratory", &[]),
    ("ok", "Oklahoma Geological Survey", &[]),
    ("pr", "Puerto Rico Seismic Network", &[]),
    ("pt", "Pacific Tsunami Warning Center", &[]),
    ("se", "Center for Earthquake Research and Information", &[]),
    ("tx", "Texas Seismological Network", &[]),
    ("uu", "University of Utah Seismograph Stations", &[]),
    ("uw", "Pacific Northwest Seismic Network", &[]),
];

impl Contributors {
    /// The built-in table of ANSS contributing networks.
    #[must_use]
    pub fn builtin() -> Self {
        let contributors = BUILTIN
            .iter()
            .map(|(id, title, aliases)| Contributor {
                id: (*id).to_string(),
                title: (*title).to_string(),
                url: None,
                aliases: aliases.iter().map(|a| (*a).to_string()).collect(),
            })
            .collect();
        Self { contributors }
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Contributor> {
        self.contributors.iter().find(|c| c.matches(id))
    }

    /// Display title for a network id; unknown ids fall back to the
    /// upper-cased id.
    #[must_use]
    pub fn name(&self, id: &str) -> String {
        self.find(id)
            .map_or_else(|| id.to_uppercase(), |c| c.title.clone())
    }

    /// Short reference such as `"US (USGS National Earthquake Information Center, PDE)"`.
    #[must_use]
    pub fn reference(&self, id: &str) -> String {
        match self.find(id) {
            Some(c) => format!("{} ({})", id.to_uppercase(), c.title),
            None => id.to_uppercase(),
        }
    }
}

/// Load and validate a contributors table from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_contributors(path: &Path) -> Result<Contributors, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ContributorsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let contributors: Contributors =
        serde_yaml::from_str(&content).map_err(ConfigError::ContributorsFileParse)?;

    validate_contributors(&contributors)?;

    Ok(contributors)
}

fn validate_contributors(contributors: &Contributors) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for contributor in &contributors.contributors {
        if contributor.id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "contributor id must be non-empty".to_string(),
            ));
        }

        if contributor.title.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "contributor '{}' has an empty title",
                contributor.id
            )));
        }

        for key in std::iter::once(&contributor.id).chain(&contributor.aliases) {
            if !seen.insert(key.to_lowercase()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate contributor id or alias: '{key}'"
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "attribution_test.rs"]
mod tests;
