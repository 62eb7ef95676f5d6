// SPDX-License-Identifier: MIT

//! Fallback plans for when a rule produces nothing
//!
//! Two scenarios are covered: the user matched no audience, or the
//! configured sources had no content to supply.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::audience::condition::ValidationResult;
use crate::audience::content::TokenizedCopy;
use crate::audience::template::ContentTemplate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackScenario {
    IneligibleAudience,
    EmptySupply,
}

impl FallbackScenario {
    pub const ALL: [FallbackScenario; 2] = [
        FallbackScenario::IneligibleAudience,
        FallbackScenario::EmptySupply,
    ];

    /// Why this fallback triggers
    pub fn default_reason(self) -> &'static str {
        match self {
            FallbackScenario::IneligibleAudience => {
                "User does not match any audience targeting conditions"
            }
            FallbackScenario::EmptySupply => "No content available from configured sources",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackOption {
    CmsContent,
    DefaultTile,
    #[default]
    None,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultTileContent {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FallbackContentConfig {
    pub option: FallbackOption,
    /// Used when `option` is `cms_content`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cms_template: Option<ContentTemplate>,
    /// Used when `option` is `default_tile`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_tile_content: Option<DefaultTileContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokenized_copy: Option<TokenizedCopy>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackScenarioConfig {
    pub scenario: FallbackScenario,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub content: FallbackContentConfig,
    #[serde(default)]
    pub reason: String,
}

impl FallbackScenarioConfig {
    /// A disabled scenario with no fallback content
    pub fn disabled(scenario: FallbackScenario) -> Self {
        Self {
            scenario,
            enabled: false,
            content: FallbackContentConfig::default(),
            reason: scenario.default_reason().to_string(),
        }
    }

    /// Problems with this scenario's content, empty when it is disabled
    pub fn errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !self.enabled {
            return errors;
        }
        match self.content.option {
            FallbackOption::CmsContent if self.content.cms_template.is_none() => {
                errors.push("CMS template required when using CMS content option".to_string());
            }
            FallbackOption::DefaultTile
                if self
                    .content
                    .default_tile_content
                    .as_ref()
                    .map_or(true, |tile| tile.title.is_empty()) =>
            {
                errors.push("Default tile title is required".to_string());
            }
            _ => {}
        }
        errors
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackConfiguration {
    pub ineligible_audience: FallbackScenarioConfig,
    pub empty_supply: FallbackScenarioConfig,
}

impl Default for FallbackConfiguration {
    fn default() -> Self {
        Self {
            ineligible_audience: FallbackScenarioConfig::disabled(
                FallbackScenario::IneligibleAudience,
            ),
            empty_supply: FallbackScenarioConfig::disabled(FallbackScenario::EmptySupply),
        }
    }
}

impl FallbackConfiguration {
    pub fn scenario(&self, scenario: FallbackScenario) -> &FallbackScenarioConfig {
        match scenario {
            FallbackScenario::IneligibleAudience => &self.ineligible_audience,
            FallbackScenario::EmptySupply => &self.empty_supply,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackValidationResult {
    #[serde(flatten)]
    pub validation: ValidationResult,
    pub has_fallbacks: bool,
    pub scenario_errors: BTreeMap<FallbackScenario, Vec<String>>,
}

/// Validate both fallback scenarios
pub fn validate_fallbacks(config: &FallbackConfiguration) -> FallbackValidationResult {
    let mut validation = ValidationResult::default();
    let mut scenario_errors = BTreeMap::new();

    for scenario in FallbackScenario::ALL {
        let errors = config.scenario(scenario).errors();
        validation.errors.extend(errors.iter().cloned());
        scenario_errors.insert(scenario, errors);
    }

    let has_fallbacks = FallbackScenario::ALL
        .into_iter()
        .any(|scenario| config.scenario(scenario).enabled);
    if !has_fallbacks {
        validation
            .warnings
            .push("No fallback scenarios configured - users may see empty content".to_string());
    }

    validation.is_valid = validation.errors.is_empty();
    FallbackValidationResult {
        validation,
        has_fallbacks,
        scenario_errors,
    }
}
