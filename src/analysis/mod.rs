//! Simulated listing analysis
//!
//! Deterministic stand-ins for the "Text AI" advisor, the Listing Health
//! Score and the competitor lookup. Every function here is total and pure:
//! the advisor and scorer branch only on the listing length, the snapshot is
//! a fixture.

use serde::{Deserialize, Serialize};

/// Listing length below which the advisor calls the listing short
const ADVICE_SHORT_BELOW: usize = 100;
/// Listing length below which the advisor calls the listing decent
const ADVICE_DECENT_BELOW: usize = 400;

/// (upper length bound, score) pairs, checked in order
const SCORE_BANDS: [(usize, u8); 3] = [(100, 42), (300, 63), (600, 78)];
const SCORE_TOP: u8 = 90;

const SUMMARY_WEAK_BELOW: u8 = 60;
const SUMMARY_SOLID_BELOW: u8 = 80;

pub const ADVICE_SHORT: &str = "Your listing is very short. Consider expanding your title and description with long-tail keywords such as “personalized gift”, “handmade decor”, or “unique Etsy find” to improve discoverability.";
pub const ADVICE_DECENT: &str = "Your listing has a decent foundation, but keyword depth is limited. Add descriptive modifiers, buyer-intent phrases, and clearer benefits to compete with top-ranking Etsy listings.";
pub const ADVICE_STRONG: &str = "Strong listing detected. Your keyword usage and structure align well with high-performing Etsy listings. Consider testing seasonal or niche-specific variations to further increase traffic.";

pub const SUMMARY_WEAK: &str = "Your listing lacks keyword depth and structure.";
pub const SUMMARY_SOLID: &str = "Your listing is solid but could be optimized further.";
pub const SUMMARY_STRONG: &str = "Your listing is well-optimized and competitive.";

pub const SUGGESTIONS: [&str; 4] = [
    "Expand your title with buyer-intent keywords",
    "Add more descriptive tags",
    "Strengthen the first 2 lines of your description",
    "Ensure pricing matches market expectations",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdviceStatus {
    Success,
}

/// Result of the "Text AI" advisor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingAdvice {
    pub status: AdviceStatus,
    pub text: String,
}

/// Result of the Listing Health Score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub score: u8,
    pub summary: String,
    pub suggestions: Vec<String>,
}

/// Metrics for a competitor shop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorSnapshot {
    pub shop_name: String,
    pub listing_count: u32,
    pub monthly_sales: u32,
    pub estimated_revenue: u64,
    pub top_keywords: Vec<String>,
    pub niche_focus: String,
}

/// Listing length as seen by the analyzers, in UTF-16 code units.
/// Characters outside the BMP (most emoji) count as two.
pub fn listing_length(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Run the simulated "Text AI" advisor over a listing
pub fn analyze_listing(text: &str) -> ListingAdvice {
    let len = listing_length(text);
    let text = if len < ADVICE_SHORT_BELOW {
        ADVICE_SHORT
    } else if len < ADVICE_DECENT_BELOW {
        ADVICE_DECENT
    } else {
        ADVICE_STRONG
    };

    ListingAdvice {
        status: AdviceStatus::Success,
        text: text.to_string(),
    }
}

/// Health score for a listing of `len` characters
pub fn health_score(len: usize) -> u8 {
    SCORE_BANDS
        .iter()
        .find(|(below, _)| len < *below)
        .map(|(_, score)| *score)
        .unwrap_or(SCORE_TOP)
}

pub fn health_summary(score: u8) -> &'static str {
    if score < SUMMARY_WEAK_BELOW {
        SUMMARY_WEAK
    } else if score < SUMMARY_SOLID_BELOW {
        SUMMARY_SOLID
    } else {
        SUMMARY_STRONG
    }
}

/// Run the simulated Listing Health Score over a listing
pub fn score_listing(text: &str) -> HealthReport {
    let score = health_score(listing_length(text));
    HealthReport {
        score,
        summary: health_summary(score).to_string(),
        suggestions: SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
    }
}

/// The competitor fixture. Always the same shop.
pub fn competitor_snapshot() -> CompetitorSnapshot {
    CompetitorSnapshot {
        shop_name: "The Vintage Vault Co.".to_string(),
        listing_count: 450,
        monthly_sales: 1200,
        estimated_revenue: 45000,
        top_keywords: vec![
            "vintage jewelry".to_string(),
            "antique decor".to_string(),
            "handmade gifts".to_string(),
        ],
        niche_focus:
            "High-end vintage and repurposed decor targeting collectors and premium buyers."
                .to_string(),
    }
}
