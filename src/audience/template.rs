// SPDX-License-Identifier: MIT

//! Tokenized copy rendering
//!
//! Content templates carry copy such as
//! `{{lead.title|Our pick}} - {{lead.description|Great opportunity}}`.
//! Tokens resolve against sample data for the template's content source.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

use crate::error::{Result, RulesError};

/// Where a content tile's data comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentSourceType {
    #[serde(rename = "CMS")]
    Cms,
    TargetedLead,
    ProductReco,
}

impl ContentSourceType {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentSourceType::Cms => "CMS",
            ContentSourceType::TargetedLead => "TargetedLead",
            ContentSourceType::ProductReco => "ProductReco",
        }
    }
}

impl FromStr for ContentSourceType {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "CMS" => Ok(ContentSourceType::Cms),
            "TargetedLead" => Ok(ContentSourceType::TargetedLead),
            "ProductReco" => Ok(ContentSourceType::ProductReco),
            other => Err(RulesError::UnknownSourceType(other.to_string())),
        }
    }
}

impl std::fmt::Display for ContentSourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A selectable content layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub source_type: ContentSourceType,
    /// Tokens the layout can display
    pub token_fields: Vec<String>,
}

enum TokenValue {
    Text(&'static str),
    List(&'static [&'static str]),
}

impl TokenValue {
    fn render(&self) -> String {
        match self {
            TokenValue::Text(s) => s.to_string(),
            TokenValue::List(items) => items.join(","),
        }
    }
}

type TokenData = HashMap<&'static str, TokenValue>;

static TEMPLATES: Lazy<Vec<ContentTemplate>> = Lazy::new(build_templates);

static CMS_DATA: Lazy<TokenData> = Lazy::new(|| {
    use TokenValue::*;
    HashMap::from([
        ("title", Text("Market Insights for Q4 2025")),
        (
            "summary",
            Text("Key trends and opportunities in the current market landscape"),
        ),
        ("author", Text("Financial Research Team")),
        ("publishDate", Text("2025-09-23")),
        ("readTime", Text("5 min")),
        ("category", Text("Market Analysis")),
        ("headline", Text("Asian Markets Show Strong Recovery")),
        (
            "keyPoints",
            List(&[
                "Tech sector up 12%",
                "Banking resilience noted",
                "Green bonds trending",
            ]),
        ),
        ("source", Text("KPlus Research")),
        ("timestamp", Text("2025-09-23 14:30")),
        (
            "tip",
            Text("Diversify your portfolio across multiple asset classes"),
        ),
        (
            "insight",
            Text("Historical data shows balanced portfolios outperform during volatility"),
        ),
        ("difficulty", Text("Intermediate")),
        ("duration", Text("10 minutes")),
    ])
});

static LEAD_DATA: Lazy<TokenData> = Lazy::new(|| {
    use TokenValue::*;
    HashMap::from([
        ("title", Text("Exclusive REIT Opportunity")),
        (
            "description",
            Text("High-yield commercial real estate investment trust with 8.5% expected returns"),
        ),
        ("expectedReturn", Text("8.5%")),
        ("riskLevel", Text("Moderate")),
        ("minimumInvestment", Text("$50,000")),
        ("deadline", Text("2025-10-15")),
        ("opportunityName", Text("Premium Bangkok Office REIT")),
        (
            "exclusiveDetails",
            Text("Limited to top-tier clients with proven investment track record"),
        ),
        (
            "potentialGains",
            Text("Projected 12-15% total returns over 3 years"),
        ),
        ("clientTier", Text("Platinum")),
        (
            "contactPerson",
            Text("Sarah Chen, Senior Investment Advisor"),
        ),
        (
            "matchReason",
            Text("Matches your preference for real estate and moderate risk tolerance"),
        ),
        ("leadTitle", Text("Tailored Investment Opportunity")),
        (
            "personalizedMessage",
            Text("Based on your portfolio, this REIT complements your current holdings"),
        ),
        ("relevanceScore", Text("94%")),
        ("nextSteps", Text("Schedule consultation within 48 hours")),
    ])
});

static PRODUCT_DATA: Lazy<TokenData> = Lazy::new(|| {
    use TokenValue::*;
    HashMap::from([
        ("productName", Text("KPlus Growth Fund")),
        ("productType", Text("Equity Mutual Fund")),
        ("expectedReturn", Text("7-9%")),
        ("riskRating", Text("Medium")),
        ("minInvestment", Text("$1,000")),
        (
            "features",
            List(&[
                "Professional management",
                "Diversified portfolio",
                "Monthly SIP options",
            ]),
        ),
        ("accountType", Text("High-Yield Savings")),
        ("interestRate", Text("4.25%")),
        (
            "benefits",
            List(&["No minimum balance", "Free transfers", "Mobile banking"]),
        ),
        ("requirements", List(&["Valid ID", "Proof of income"])),
        ("promotionalOffer", Text("Bonus 0.25% for first 6 months")),
        ("planName", Text("KPlus Life Protection Plus")),
        ("coverage", Text("Up to $500,000")),
        ("premium", Text("Starting from $89/month")),
        ("eligibility", Text("Ages 21-65")),
        ("claimProcess", Text("24/7 online claim submission")),
        ("loanType", Text("Personal Loan")),
        ("loanInterestRate", Text("5.99%")),
        ("maxAmount", Text("$100,000")),
        ("tenure", Text("Up to 7 years")),
        ("processingTime", Text("24-48 hours")),
    ])
});

fn token_data(source: ContentSourceType) -> &'static TokenData {
    match source {
        ContentSourceType::Cms => &CMS_DATA,
        ContentSourceType::TargetedLead => &LEAD_DATA,
        ContentSourceType::ProductReco => &PRODUCT_DATA,
    }
}

/// Renders `{{token|fallback}}` copy against sample token data
#[derive(Debug, Clone)]
pub struct TokenRenderer {
    pattern: Regex,
}

impl TokenRenderer {
    pub fn new() -> Result<Self> {
        let pattern = Regex::new(r"\{\{([^}]+)\}\}")
            .map_err(|e| RulesError::config(format!("Failed to compile token regex: {}", e)))?;
        Ok(Self { pattern })
    }

    /// Substitute every token in `template`.
    ///
    /// The lookup key is the last dot-separated segment of the token path.
    /// Empty or missing data falls back to the token's fallback, and a token
    /// with neither is left as written.
    pub fn render(&self, template: &str, source: ContentSourceType) -> String {
        let data = token_data(source);
        self.pattern
            .replace_all(template, |caps: &Captures| {
                let mut parts = caps[1].split('|').map(str::trim);
                let path = parts.next().unwrap_or_default();
                let fallback = parts.next().unwrap_or_default();
                let key = path.rsplit('.').next().unwrap_or_default();

                let value = data.get(key).map(TokenValue::render).unwrap_or_default();
                if !value.is_empty() {
                    value
                } else if !fallback.is_empty() {
                    fallback.to_string()
                } else {
                    caps[0].to_string()
                }
            })
            .into_owned()
    }
}

/// Render tokenized copy with a one-off renderer
pub fn render_tokenized_copy(template: &str, source: ContentSourceType) -> Result<String> {
    Ok(TokenRenderer::new()?.render(template, source))
}

/// The built-in template catalogue
pub fn content_templates() -> &'static [ContentTemplate] {
    &TEMPLATES
}

pub fn template_by_id(id: &str) -> Option<&'static ContentTemplate> {
    TEMPLATES.iter().find(|t| t.id == id)
}

pub fn templates_for(source: ContentSourceType) -> Vec<&'static ContentTemplate> {
    TEMPLATES.iter().filter(|t| t.source_type == source).collect()
}

fn template(
    id: &str,
    name: &str,
    description: &str,
    source_type: ContentSourceType,
    token_fields: &[&str],
) -> ContentTemplate {
    ContentTemplate {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        source_type,
        token_fields: token_fields.iter().map(|t| t.to_string()).collect(),
    }
}

fn build_templates() -> Vec<ContentTemplate> {
    use ContentSourceType::*;
    vec![
        template(
            "cms_article_card",
            "Article Card",
            "Standard article layout with image and summary",
            Cms,
            &["title", "summary", "author", "publishDate", "readTime", "category"],
        ),
        template(
            "cms_news_brief",
            "News Brief",
            "Compact news format with headline and key points",
            Cms,
            &["headline", "keyPoints", "source", "timestamp"],
        ),
        template(
            "cms_educational_tile",
            "Educational Tile",
            "Learning-focused content with tips and insights",
            Cms,
            &["title", "tip", "insight", "difficulty", "duration"],
        ),
        template(
            "lead_premium_showcase",
            "Premium Lead Showcase",
            "Highlighted lead opportunity with premium styling",
            TargetedLead,
            &[
                "title",
                "description",
                "expectedReturn",
                "riskLevel",
                "minimumInvestment",
                "deadline",
            ],
        ),
        template(
            "lead_exclusive_offer",
            "Exclusive Opportunity",
            "VIP-style lead presentation for high-value clients",
            TargetedLead,
            &[
                "opportunityName",
                "exclusiveDetails",
                "potentialGains",
                "clientTier",
                "contactPerson",
            ],
        ),
        template(
            "lead_personalized_match",
            "Personalized Match",
            "Tailored lead based on client profile and preferences",
            TargetedLead,
            &[
                "matchReason",
                "leadTitle",
                "personalizedMessage",
                "relevanceScore",
                "nextSteps",
            ],
        ),
        template(
            "product_investment_card",
            "Investment Product Card",
            "Standard investment product presentation",
            ProductReco,
            &[
                "productName",
                "productType",
                "expectedReturn",
                "riskRating",
                "minInvestment",
                "features",
            ],
        ),
        template(
            "product_savings_offer",
            "Savings Product Offer",
            "Savings account or deposit product layout",
            ProductReco,
            &[
                "accountType",
                "interestRate",
                "benefits",
                "requirements",
                "promotionalOffer",
            ],
        ),
        template(
            "product_insurance_plan",
            "Insurance Plan Card",
            "Insurance product with coverage details",
            ProductReco,
            &[
                "planName",
                "coverage",
                "premium",
                "benefits",
                "eligibility",
                "claimProcess",
            ],
        ),
        template(
            "product_loan_option",
            "Loan Product Option",
            "Loan product with terms and rates",
            ProductReco,
            &[
                "loanType",
                "loanInterestRate",
                "maxAmount",
                "tenure",
                "eligibility",
                "processingTime",
            ],
        ),
    ]
}
