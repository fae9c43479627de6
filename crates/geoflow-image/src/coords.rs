//! イメージ座標の抽出
//!
//! 依存チャートの values からイメージ座標を取り出します。
//! フォールバックの順序は固定:
//! - registry: values の image.registry → デフォルト "docker.io"
//! - repository: values の image.repository のみ（デフォルトなし、必須）
//! - tag: values の image.tag → チャートの appVersion
//!
//! 空文字列はどのフィールドでも「無し」として扱います。

use crate::error::{ImageError, Result};
use geoflow_core::ImageCoordinates;

/// registry が指定されていないときのデフォルト
pub const DEFAULT_REGISTRY: &str = "docker.io";

/// values と appVersion からイメージ座標を抽出
pub fn extract_coordinates(
    values: &serde_yaml::Mapping,
    app_version: Option<&str>,
) -> Result<ImageCoordinates> {
    let image = match values.get(serde_yaml::Value::from("image")) {
        None | Some(serde_yaml::Value::Null) => {
            return Err(ImageError::MalformedImageField(
                "missing 'image' section".to_string(),
            ));
        }
        Some(serde_yaml::Value::Mapping(mapping)) => mapping,
        Some(_) => {
            return Err(ImageError::MalformedImageField(
                "'image' is not a mapping".to_string(),
            ));
        }
    };

    let registry = string_field(image, "registry")?
        .unwrap_or(DEFAULT_REGISTRY)
        .to_string();

    let repository = string_field(image, "repository")?
        .ok_or(ImageError::MissingRepository)?
        .to_string();

    let tag = match string_field(image, "tag")? {
        Some(tag) => tag.to_string(),
        None => app_version
            .filter(|version| !version.is_empty())
            .ok_or(ImageError::MissingTag)?
            .to_string(),
    };

    Ok(ImageCoordinates {
        registry,
        repository,
        tag,
    })
}

/// image マッピングから文字列フィールドを取り出す
///
/// 欠落・Null・空文字列は None。文字列以外の値はエラー。
fn string_field<'a>(image: &'a serde_yaml::Mapping, field: &str) -> Result<Option<&'a str>> {
    match image.get(serde_yaml::Value::from(field)) {
        None | Some(serde_yaml::Value::Null) => Ok(None),
        Some(serde_yaml::Value::String(value)) => {
            Ok(if value.is_empty() { None } else { Some(value) })
        }
        Some(_) => Err(ImageError::MalformedImageField(format!(
            "field '{}' is not a string",
            field
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(yaml: &str) -> serde_yaml::Mapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_extract_full_coordinates() {
        let values = values(
            "image:\n  registry: ghcr.io\n  repository: acme/vector\n  tag: \"1.0.0\"\n",
        );

        let coords = extract_coordinates(&values, None).unwrap();
        assert_eq!(coords.registry, "ghcr.io");
        assert_eq!(coords.repository, "acme/vector");
        assert_eq!(coords.tag, "1.0.0");
    }

    #[test]
    fn test_registry_defaults_to_docker_io() {
        let values = values("image:\n  repository: acme/vector\n  tag: \"1.2.3\"\n");

        let coords = extract_coordinates(&values, None).unwrap();
        assert_eq!(coords.registry, "docker.io");
    }

    #[test]
    fn test_tag_falls_back_to_app_version() {
        let values = values("image:\n  repository: acme/vector\n");

        let coords = extract_coordinates(&values, Some("1.2.3")).unwrap();
        assert_eq!(coords.registry, "docker.io");
        assert_eq!(coords.repository, "acme/vector");
        assert_eq!(coords.tag, "1.2.3");
    }

    #[test]
    fn test_values_tag_wins_over_app_version() {
        // 両方ある場合は values のタグが優先
        let values = values("image:\n  repository: acme/vector\n  tag: \"2.0.0\"\n");

        let coords = extract_coordinates(&values, Some("1.2.3")).unwrap();
        assert_eq!(coords.tag, "2.0.0");
    }

    #[test]
    fn test_empty_repository_fails() {
        // 空文字列は欠落と同じ扱い
        let values = values("image:\n  repository: \"\"\n  tag: \"1.2.3\"\n");

        let result = extract_coordinates(&values, None);
        assert!(matches!(result, Err(ImageError::MissingRepository)));
    }

    #[test]
    fn test_no_tag_and_no_app_version_fails() {
        let values = values("image:\n  repository: acme/vector\n");

        let result = extract_coordinates(&values, None);
        assert!(matches!(result, Err(ImageError::MissingTag)));

        let result = extract_coordinates(&values, Some(""));
        assert!(matches!(result, Err(ImageError::MissingTag)));
    }

    #[test]
    fn test_missing_image_section_fails() {
        let values = values("replicas: 2\n");

        let result = extract_coordinates(&values, Some("1.2.3"));
        assert!(matches!(result, Err(ImageError::MalformedImageField(_))));
    }

    #[test]
    fn test_image_not_a_mapping_fails() {
        let values = values("image: timberio/vector:0.34.0\n");

        let result = extract_coordinates(&values, None);
        assert!(matches!(result, Err(ImageError::MalformedImageField(_))));
    }

    #[test]
    fn test_non_string_field_fails() {
        let values = values("image:\n  repository: acme/vector\n  tag: 1\n");

        let result = extract_coordinates(&values, None);
        assert!(matches!(result, Err(ImageError::MalformedImageField(_))));
    }

    #[test]
    fn test_null_tag_falls_back() {
        let values = values("image:\n  repository: acme/vector\n  tag:\n");

        let coords = extract_coordinates(&values, Some("3.1.4")).unwrap();
        assert_eq!(coords.tag, "3.1.4");
    }
}
