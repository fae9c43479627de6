//! タグの導出とバリデーション
//!
//! 発行先のタグは `元タグ_geoip-YYYY.MM.DD` 形式。日付は呼び出し側から
//! 渡されるため、同じ日・同じ元タグなら常に同じタグになります。

use crate::error::{ImageError, Result};
use chrono::{Datelike, NaiveDate};

/// 元タグと日付から発行先タグを導出
///
/// # Examples
/// - `derive_tag("1.2.3", 2024-03-07)` -> `"1.2.3_geoip-2024.03.07"`
pub fn derive_tag(source_tag: &str, date: NaiveDate) -> String {
    format!(
        "{}_geoip-{}.{:02}.{:02}",
        source_tag,
        date.year(),
        date.month(),
        date.day()
    )
}

/// タグのバリデーション
///
/// Docker タグの制約:
/// - 128文字以下
/// - 英数字、ピリオド、ハイフン、アンダースコアのみ
/// - 先頭はピリオドまたはハイフンではない
pub fn validate_tag(tag: &str) -> Result<()> {
    if tag.is_empty() {
        return Err(ImageError::InvalidTag("(empty)".to_string()));
    }

    if tag.len() > 128 {
        return Err(ImageError::InvalidTag(format!(
            "Tag too long ({} characters, max 128)",
            tag.len()
        )));
    }

    if tag.starts_with('.') || tag.starts_with('-') {
        return Err(ImageError::InvalidTag(tag.to_string()));
    }

    for c in tag.chars() {
        if !c.is_ascii_alphanumeric() && c != '.' && c != '-' && c != '_' {
            return Err(ImageError::InvalidTag(format!(
                "Invalid character '{}' in tag: {}",
                c, tag
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_derive_tag() {
        assert_eq!(
            derive_tag("1.2.3", date(2024, 3, 7)),
            "1.2.3_geoip-2024.03.07"
        );
    }

    #[test]
    fn test_derive_tag_pads_month_and_day() {
        assert_eq!(
            derive_tag("0.34.0", date(2024, 12, 1)),
            "0.34.0_geoip-2024.12.01"
        );
        assert_eq!(
            derive_tag("0.34.0", date(2024, 1, 31)),
            "0.34.0_geoip-2024.01.31"
        );
    }

    #[test]
    fn test_derive_tag_is_deterministic() {
        let first = derive_tag("1.2.3", date(2024, 3, 7));
        let second = derive_tag("1.2.3", date(2024, 3, 7));
        assert_eq!(first, second);
    }

    #[test]
    fn test_derived_tag_is_valid() {
        let tag = derive_tag("0.34.0", date(2024, 3, 7));
        assert!(validate_tag(&tag).is_ok());
    }

    #[test]
    fn test_validate_tag_rejects_empty() {
        assert!(validate_tag("").is_err());
    }

    #[test]
    fn test_validate_tag_rejects_leading_punctuation() {
        assert!(validate_tag(".hidden").is_err());
        assert!(validate_tag("-flag").is_err());
    }

    #[test]
    fn test_validate_tag_rejects_invalid_characters() {
        assert!(validate_tag("v1.0:beta").is_err());
        assert!(validate_tag("v1.0/beta").is_err());
    }

    #[test]
    fn test_validate_tag_rejects_too_long() {
        let tag = "a".repeat(129);
        assert!(validate_tag(&tag).is_err());
    }
}
