//! コンテナイメージの座標
//!
//! registry / repository / tag の3要素でイメージを特定します。

use serde::{Deserialize, Serialize};

/// イメージの座標（registry + repository + tag）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageCoordinates {
    pub registry: String,
    pub repository: String,
    pub tag: String,
}

impl ImageCoordinates {
    pub fn new(
        registry: impl Into<String>,
        repository: impl Into<String>,
        tag: impl Into<String>,
    ) -> Self {
        Self {
            registry: registry.into(),
            repository: repository.into(),
            tag: tag.into(),
        }
    }

    /// pull / push に使う完全なイメージ参照
    ///
    /// # Examples
    /// - `{docker.io, timberio/vector, 0.34.0}` -> `docker.io/timberio/vector:0.34.0`
    pub fn reference(&self) -> String {
        format!("{}/{}:{}", self.registry, self.repository, self.tag)
    }

    /// タグを除いたイメージ名（レジストリ込み）
    pub fn name(&self) -> String {
        format!("{}/{}", self.registry, self.repository)
    }

    /// タグだけを差し替えた座標を返す
    pub fn with_tag(&self, tag: impl Into<String>) -> Self {
        Self {
            registry: self.registry.clone(),
            repository: self.repository.clone(),
            tag: tag.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference() {
        let coords = ImageCoordinates::new("docker.io", "timberio/vector", "0.34.0");
        assert_eq!(coords.reference(), "docker.io/timberio/vector:0.34.0");
    }

    #[test]
    fn test_name_excludes_tag() {
        let coords = ImageCoordinates::new("ghcr.io", "org/app", "v1.0");
        assert_eq!(coords.name(), "ghcr.io/org/app");
    }

    #[test]
    fn test_with_tag() {
        let coords = ImageCoordinates::new("docker.io", "timberio/vector", "0.34.0");
        let derived = coords.with_tag("0.34.0_geoip-2024.03.07");
        assert_eq!(derived.registry, "docker.io");
        assert_eq!(derived.repository, "timberio/vector");
        assert_eq!(derived.tag, "0.34.0_geoip-2024.03.07");
        // 元の座標は変わらない
        assert_eq!(coords.tag, "0.34.0");
    }
}
