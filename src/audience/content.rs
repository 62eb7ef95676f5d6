// SPDX-License-Identifier: MIT

//! Content source configuration for a rule
//!
//! CMS content is the primary source and must stay enabled. Offering content
//! (targeted leads, product recommendations) is optional and toggled by hand.

use serde::{Deserialize, Serialize};

use crate::audience::condition::ValidationResult;
use crate::audience::template::ContentTemplate;

pub const PRIORITY_RANGE: std::ops::RangeInclusive<i64> = 1..=100;
pub const TOTAL_MAX_YIELD_RANGE: std::ops::RangeInclusive<i64> = 1..=5;

/// Copy with `{{path|fallback}}` tokens and its rendered preview
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenizedCopy {
    pub template: String,
    #[serde(default)]
    pub preview: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CmsContentConfig {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_template: Option<ContentTemplate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokenized_copy: Option<TokenizedCopy>,
    /// Tiles this source may contribute
    pub max_yield: i64,
}

impl Default for CmsContentConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            selected_template: None,
            tokenized_copy: None,
            max_yield: 3,
        }
    }
}

/// One offering source, either targeted leads or product recommendations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OfferingSourceConfig {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_template: Option<ContentTemplate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokenized_copy: Option<TokenizedCopy>,
    pub max_yield: i64,
}

impl Default for OfferingSourceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            selected_template: None,
            tokenized_copy: None,
            max_yield: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OfferingContentConfig {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targeted_lead: Option<OfferingSourceConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_reco: Option<OfferingSourceConfig>,
}

impl OfferingContentConfig {
    /// Whether at least one offering source is switched on
    pub fn has_enabled_source(&self) -> bool {
        [&self.targeted_lead, &self.product_reco]
            .into_iter()
            .flatten()
            .any(|source| source.enabled)
    }
}

/// Where a rule's tiles come from and how many it may produce
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentConfiguration {
    pub cms: CmsContentConfig,
    pub offering: OfferingContentConfig,
    /// Rule ordering, lower runs first
    pub priority: i64,
    pub total_max_yield: i64,
}

impl Default for ContentConfiguration {
    fn default() -> Self {
        Self {
            cms: CmsContentConfig::default(),
            offering: OfferingContentConfig::default(),
            priority: 1,
            total_max_yield: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentValidationResult {
    #[serde(flatten)]
    pub validation: ValidationResult,
    pub has_content: bool,
    /// Rules competing for the same priority; filled in by rule storage
    pub priority_conflicts: Vec<String>,
}

/// Validate a content configuration
pub fn validate_content(config: &ContentConfiguration) -> ContentValidationResult {
    let mut validation = ValidationResult::default();
    let mut has_content = false;

    if config.cms.enabled {
        has_content = true;
        if config.cms.selected_template.is_none() {
            validation.warnings.push("No CMS template selected".to_string());
        }
    } else {
        validation
            .errors
            .push("CMS content source must be enabled as primary content".to_string());
    }

    if config.offering.enabled {
        if config.offering.has_enabled_source() {
            has_content = true;
        } else {
            validation
                .warnings
                .push("Offering content enabled but no sources selected".to_string());
        }
    }

    if !PRIORITY_RANGE.contains(&config.priority) {
        validation
            .errors
            .push("Priority must be between 1 and 100".to_string());
    }
    if !TOTAL_MAX_YIELD_RANGE.contains(&config.total_max_yield) {
        validation
            .errors
            .push("Total max yield must be between 1 and 5 tiles".to_string());
    }

    validation.is_valid = validation.errors.is_empty();
    ContentValidationResult {
        validation,
        has_content,
        priority_conflicts: Vec::new(),
    }
}
