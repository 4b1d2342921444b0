//! Road classification styling rules.
//!
//! One fixed, ordered table of classification tiers replaces per-call
//! membership checks: the first tier whose class list contains the tag wins,
//! and anything unmatched falls through to the theme's default color at the
//! thinnest weight.

use crate::models::Theme;

/// Backend-wide stroke multiplier applied at render time (high-DPI canvas).
pub const STROKE_SCALE: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoadTier {
    Motorway,
    Primary,
    Secondary,
    Tertiary,
    Residential,
    Default,
}

struct TierRule {
    classes: &'static [&'static str],
    tier: RoadTier,
    width: f64,
}

/// Evaluated top to bottom; order is part of the contract.
const TIER_RULES: &[TierRule] = &[
    TierRule {
        classes: &["motorway", "motorway_link"],
        tier: RoadTier::Motorway,
        width: 1.2,
    },
    TierRule {
        classes: &["trunk", "trunk_link", "primary", "primary_link"],
        tier: RoadTier::Primary,
        width: 1.0,
    },
    TierRule {
        classes: &["secondary", "secondary_link"],
        tier: RoadTier::Secondary,
        width: 0.8,
    },
    TierRule {
        classes: &["tertiary", "tertiary_link"],
        tier: RoadTier::Tertiary,
        width: 0.6,
    },
    TierRule {
        classes: &["residential", "living_street", "unclassified"],
        tier: RoadTier::Residential,
        width: 0.4,
    },
];

const DEFAULT_WIDTH: f64 = 0.4;

/// Resolve the tier for a `highway` tag value.
pub fn tier_for_class(highway: &str) -> RoadTier {
    TIER_RULES
        .iter()
        .find(|rule| rule.classes.contains(&highway))
        .map(|rule| rule.tier)
        .unwrap_or(RoadTier::Default)
}

/// Stroke color for a classification under the given theme. Total: every
/// input string resolves to some palette entry.
pub fn color_for_class<'a>(highway: &str, theme: &'a Theme) -> &'a str {
    match tier_for_class(highway) {
        RoadTier::Motorway => &theme.road_motorway,
        RoadTier::Primary => &theme.road_primary,
        RoadTier::Secondary => &theme.road_secondary,
        RoadTier::Tertiary => &theme.road_tertiary,
        RoadTier::Residential => &theme.road_residential,
        RoadTier::Default => &theme.road_default,
    }
}

/// Unscaled stroke weight for a classification. The heaviest tier is the
/// motorway tier; unmatched classes get the thinnest weight.
pub fn width_for_class(highway: &str) -> f64 {
    TIER_RULES
        .iter()
        .find(|rule| rule.classes.contains(&highway))
        .map(|rule| rule.width)
        .unwrap_or(DEFAULT_WIDTH)
}
