//! The prompt parts the router knows about.

use serde::{Deserialize, Serialize};

/// A routed prompt part.
///
/// Parses case-insensitively from its short name (`quality`, `neg`, ...).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AnimaField {
    /// Quality, meta, year and safety tags
    Quality,
    /// Subject count such as `1girl`
    Count,
    /// Character name
    Character,
    /// Appearance tags
    Appearance,
    /// Source series
    Series,
    /// Artist tags
    Artist,
    /// Style tags
    Style,
    /// Background or scene
    Environment,
    /// General tags
    Tags,
    /// Negative prompt
    Neg,
}

impl AnimaField {
    /// Fields joined into the positive prompt, in order.
    pub const POSITIVE_ORDER: [AnimaField; 9] = [
        AnimaField::Quality,
        AnimaField::Count,
        AnimaField::Character,
        AnimaField::Appearance,
        AnimaField::Series,
        AnimaField::Artist,
        AnimaField::Style,
        AnimaField::Environment,
        AnimaField::Tags,
    ];

    /// Key written to the output JSON and used as the plain var name.
    pub fn key(self) -> &'static str {
        match self {
            AnimaField::Quality => "quality_meta_year_safe",
            AnimaField::Count => "count",
            AnimaField::Character => "character",
            AnimaField::Appearance => "appearance",
            AnimaField::Series => "series",
            AnimaField::Artist => "artist",
            AnimaField::Style => "style",
            AnimaField::Environment => "environment",
            AnimaField::Tags => "tags",
            AnimaField::Neg => "neg",
        }
    }

    /// Source keys read from incoming JSON; the first non-empty one wins.
    pub fn source_keys(self) -> &'static [&'static str] {
        match self {
            AnimaField::Quality => &["quality_meta_year_safe", "quality"],
            AnimaField::Character => &["character", "subject"],
            AnimaField::Appearance => &[
                "appearance",
                "Appearance",
                "appearance_tags",
                "features",
                "look",
            ],
            AnimaField::Environment => &["environment", "env", "background", "scene"],
            AnimaField::Neg => &["neg", "negative"],
            AnimaField::Count => &["count"],
            AnimaField::Series => &["series"],
            AnimaField::Artist => &["artist"],
            AnimaField::Style => &["style"],
            AnimaField::Tags => &["tags"],
        }
    }

    /// Localized variable name.
    pub fn localized(self) -> &'static str {
        match self {
            AnimaField::Quality => "质量",
            AnimaField::Count => "人数",
            AnimaField::Character => "角色",
            AnimaField::Appearance => "外观",
            AnimaField::Series => "作品",
            AnimaField::Artist => "画师",
            AnimaField::Style => "风格",
            AnimaField::Environment => "背景",
            AnimaField::Tags => "通用标签",
            AnimaField::Neg => "负面提示词",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn parses_short_names() {
        assert_eq!(AnimaField::from_str("Quality").ok(), Some(AnimaField::Quality));
        assert_eq!(AnimaField::from_str("neg").ok(), Some(AnimaField::Neg));
        assert!(AnimaField::from_str("negative").is_err());
    }

    #[test]
    fn key_is_first_source_key() {
        for field in AnimaField::iter() {
            assert_eq!(field.source_keys()[0], field.key());
        }
    }

    #[test]
    fn positive_order_skips_neg() {
        assert!(!AnimaField::POSITIVE_ORDER.contains(&AnimaField::Neg));
        assert_eq!(AnimaField::POSITIVE_ORDER.len(), AnimaField::iter().count() - 1);
    }
}
