// SPDX-License-Identifier: MIT

//! Sample user roster for interactive condition testing

use once_cell::sync::Lazy;

use super::record::{AttributeSection, UserRecord};

static SAMPLE_USERS: Lazy<Vec<UserRecord>> = Lazy::new(build_sample_users);

/// The built-in roster, in display order
pub fn sample_users() -> &'static [UserRecord] {
    &SAMPLE_USERS
}

pub fn sample_user(user_id: &str) -> Option<&'static UserRecord> {
    SAMPLE_USERS.iter().find(|u| u.user_id == user_id)
}

pub fn users_with_targeted_leads() -> Vec<&'static UserRecord> {
    SAMPLE_USERS.iter().filter(|u| u.has_targeted_lead()).collect()
}

pub fn users_without_targeted_leads() -> Vec<&'static UserRecord> {
    SAMPLE_USERS
        .iter()
        .filter(|u| !u.has_targeted_lead())
        .collect()
}

fn build_sample_users() -> Vec<UserRecord> {
    vec![
        UserRecord {
            customer: AttributeSection::new()
                .with("targeted_lead", false)
                .with("offering_types", vec!["Credit Card"])
                .with("aum_band", "1–5M")
                .with("risk_band", "Balanced")
                .with("customer_tier", "Gold")
                .with("account_age_months", 24i64)
                .with("location", "Shopping Area")
                .with("distance_to_mall", 300i64),
            activity: AttributeSection::new()
                .with("last_login_days", 1i64)
                .with("page_views_30d", 25i64)
                .with(
                    "product_interactions",
                    vec!["Viewed Credit Cards", "Compared Rates"],
                )
                .with("has_recent_transaction", true)
                .with("session_duration_avg", 8.5),
            custom: AttributeSection::new()
                .with("marketing_segment", "Growth")
                .with("campaign_tags", vec!["Shopping-Promo", "Credit-Card"])
                .with("custom_score", 85i64)
                .with(
                    "feature_flags",
                    vec!["location-services", "push-notifications"],
                ),
            ..UserRecord::new("user_001", "Somchai (Near Shopping Mall - Location Based)")
        },
        UserRecord {
            customer: AttributeSection::new()
                .with("targeted_lead", true)
                .with("targeted_lead_type", "Express Loan")
                .with("offering_types", vec!["Loan"])
                .with("aum_band", "5–20M")
                .with("risk_band", "Balanced")
                .with("customer_tier", "Platinum")
                .with("account_age_months", 36i64)
                .with("location", "Bangkok CBD"),
            activity: AttributeSection::new()
                .with("last_login_days", 2i64)
                .with("page_views_30d", 35i64)
                .with(
                    "product_interactions",
                    vec!["Loan Calculator", "Document Upload", "Rate Inquiry"],
                )
                .with("has_recent_transaction", false)
                .with("session_duration_avg", 15.2),
            custom: AttributeSection::new()
                .with("marketing_segment", "High-Intent-Loan")
                .with("campaign_tags", vec!["Express-Loan", "Fast-Approval"])
                .with("custom_score", 95i64)
                .with(
                    "feature_flags",
                    vec!["express-processing", "priority-support"],
                ),
            ..UserRecord::new("user_002", "Niran (Has Express Loan Targeted Lead)")
        },
        UserRecord {
            customer: AttributeSection::new()
                .with("targeted_lead", false)
                .with("offering_types", vec!["Investment", "Mutual Fund"])
                .with("aum_band", "1–5M")
                .with("risk_band", "Moderate")
                .with("customer_tier", "Gold")
                .with("account_age_months", 18i64)
                .with("location", "Sukhumvit")
                .with("product_recommendation", "Mutual Fund"),
            activity: AttributeSection::new()
                .with("last_login_days", 3i64)
                .with("page_views_30d", 22i64)
                .with(
                    "product_interactions",
                    vec!["Fund Performance", "Risk Assessment", "Portfolio Review"],
                )
                .with("has_recent_transaction", true)
                .with("session_duration_avg", 12.8),
            custom: AttributeSection::new()
                .with("marketing_segment", "Investment-Growth")
                .with(
                    "campaign_tags",
                    vec!["Mutual-Fund", "Investment-Education"],
                )
                .with("custom_score", 78i64)
                .with("feature_flags", vec!["investment-tools", "fund-analyzer"]),
            ..UserRecord::new("user_003", "Apinya (Mutual Fund Recommendation)")
        },
        UserRecord {
            customer: AttributeSection::new()
                .with("targeted_lead", false)
                .with("offering_types", vec!["Insurance", "Bancassurance"])
                .with("aum_band", "5–20M")
                .with("risk_band", "Conservative")
                .with("customer_tier", "Platinum")
                .with("account_age_months", 42i64)
                .with("location", "Silom")
                .with("product_recommendation", "Bancassurance"),
            activity: AttributeSection::new()
                .with("last_login_days", 5i64)
                .with("page_views_30d", 18i64)
                .with(
                    "product_interactions",
                    vec![
                        "Insurance Calculator",
                        "Coverage Comparison",
                        "Agent Contact",
                    ],
                )
                .with("has_recent_transaction", false)
                .with("session_duration_avg", 9.5),
            custom: AttributeSection::new()
                .with("marketing_segment", "Protection-Focused")
                .with(
                    "campaign_tags",
                    vec!["Bancassurance", "Family-Protection"],
                )
                .with("custom_score", 82i64)
                .with(
                    "feature_flags",
                    vec!["insurance-advisor", "family-planning"],
                ),
            ..UserRecord::new("user_004", "Kamon (Bancassurance Recommendation)")
        },
        UserRecord {
            customer: AttributeSection::new()
                .with("targeted_lead", false)
                .with("offering_types", vec!["Savings", "Digital Banking"])
                .with("aum_band", "<1M")
                .with("risk_band", "Conservative")
                .with("customer_tier", "Silver")
                .with("account_age_months", 12i64)
                .with("location", "Chatuchak"),
            activity: AttributeSection::new()
                .with("last_login_days", 7i64)
                .with("page_views_30d", 8i64)
                .with(
                    "product_interactions",
                    vec!["Balance Inquiry", "Transfer Money"],
                )
                .with("has_recent_transaction", true)
                .with("session_duration_avg", 4.2),
            custom: AttributeSection::new()
                .with("marketing_segment", "Mass-Market")
                .with("campaign_tags", vec!["Digital-Adoption", "LINE-User"])
                .with("custom_score", 55i64)
                .with("feature_flags", vec!["line-integration", "kplus-rewards"]),
            ..UserRecord::new("user_005", "Ploy (General User - Broadcast Only)")
        },
    ]
}
