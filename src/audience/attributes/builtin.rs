// SPDX-License-Identifier: MIT

//! Built-in attribute catalogue

use super::types::{AttributeDefinition, AttributeGroup, AttributeType};

fn attr(
    id: &str,
    label: &str,
    attribute_type: AttributeType,
    group: AttributeGroup,
    options: &[&str],
    description: &str,
) -> AttributeDefinition {
    AttributeDefinition {
        id: id.to_string(),
        label: label.to_string(),
        attribute_type,
        group,
        options: options.iter().map(|o| o.to_string()).collect(),
        featured: false,
        description: Some(description.to_string()),
    }
}

pub(crate) fn customer_attributes() -> Vec<AttributeDefinition> {
    use AttributeType::*;
    let group = || AttributeGroup::Customer;
    vec![
        AttributeDefinition {
            featured: true,
            ..attr(
                "targeted_lead",
                "Has Targeted Lead",
                Boolean,
                group(),
                &[],
                "Customer has an active targeted lead recommendation",
            )
        },
        attr(
            "offering_types",
            "Offering Types",
            MultiSelect,
            group(),
            &["Investment", "Loan", "Insurance", "Savings"],
            "Types of financial products the customer is interested in",
        ),
        attr(
            "aum_band",
            "Assets Under Management",
            Enum,
            group(),
            &["<1M", "1–5M", "5–20M", "20M+"],
            "Customer's total assets under management band",
        ),
        attr(
            "risk_band",
            "Risk Profile",
            Enum,
            group(),
            &["Cautious", "Balanced", "Aggressive"],
            "Customer's investment risk tolerance",
        ),
        attr(
            "customer_tier",
            "Customer Tier",
            Enum,
            group(),
            &["Bronze", "Silver", "Gold", "Platinum"],
            "Customer relationship tier based on value and engagement",
        ),
        attr(
            "account_age_months",
            "Account Age (Months)",
            Number,
            group(),
            &[],
            "Number of months since account was opened",
        ),
    ]
}

pub(crate) fn activity_attributes() -> Vec<AttributeDefinition> {
    use AttributeType::*;
    let group = || AttributeGroup::Activity;
    vec![
        attr(
            "last_login_days",
            "Days Since Last Login",
            Number,
            group(),
            &[],
            "Number of days since the user last logged in",
        ),
        attr(
            "page_views_30d",
            "Page Views (30 days)",
            Number,
            group(),
            &[],
            "Total page views in the last 30 days",
        ),
        attr(
            "product_interactions",
            "Product Interactions",
            MultiSelect,
            group(),
            &[
                "Viewed Details",
                "Added to Watchlist",
                "Calculated Returns",
                "Downloaded Brochure",
            ],
            "Types of interactions with products in the last 30 days",
        ),
        attr(
            "has_recent_transaction",
            "Has Recent Transaction",
            Boolean,
            group(),
            &[],
            "Has made a transaction in the last 30 days",
        ),
        attr(
            "session_duration_avg",
            "Average Session Duration (min)",
            Number,
            group(),
            &[],
            "Average session duration in minutes over the last 30 days",
        ),
    ]
}

pub(crate) fn custom_attributes() -> Vec<AttributeDefinition> {
    use AttributeType::*;
    let group = || AttributeGroup::Custom;
    vec![
        attr(
            "marketing_segment",
            "Marketing Segment",
            Enum,
            group(),
            &["High-Value", "Growth", "Retention", "Acquisition"],
            "Custom marketing segmentation",
        ),
        attr(
            "campaign_tags",
            "Campaign Tags",
            MultiSelect,
            group(),
            &["Q4-Promo", "New-Year", "Wealth-Focus", "Digital-First"],
            "Custom campaign targeting tags",
        ),
        attr(
            "custom_score",
            "Custom Score",
            Number,
            group(),
            &[],
            "Custom scoring metric (0-100)",
        ),
        attr(
            "feature_flags",
            "Feature Flags",
            MultiSelect,
            group(),
            &[
                "beta-features",
                "premium-ui",
                "advanced-analytics",
                "mobile-enhanced",
            ],
            "Active feature flags for the user",
        ),
    ]
}

/// Every built-in attribute, customer first, then activity, then custom
pub(crate) fn all_attributes() -> Vec<AttributeDefinition> {
    let mut all = customer_attributes();
    all.extend(activity_attributes());
    all.extend(custom_attributes());
    all
}
