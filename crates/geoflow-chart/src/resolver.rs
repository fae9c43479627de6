//! 依存チャートの解決
//!
//! umbrella チャートの形が固定であることを前提に、唯一の依存チャートを
//! 取り出します。依存が0個・2個以上、または名前が想定と違う場合は
//! 推測せずにエラーにします。

use crate::error::{ChartError, Result};
use crate::model::ChartBundle;

/// 唯一の依存チャートを名前で解決
///
/// # Errors
/// - 依存チャートの数が1以外: [`ChartError::DependencyCount`]
/// - 依存チャート名が `expected` と不一致: [`ChartError::DependencyName`]
pub fn resolve_dependency<'a>(chart: &'a ChartBundle, expected: &str) -> Result<&'a ChartBundle> {
    if chart.dependencies.len() != 1 {
        return Err(ChartError::DependencyCount {
            chart: chart.name().to_string(),
            found: chart.dependencies.len(),
        });
    }

    let dependency = &chart.dependencies[0];

    if dependency.name() != expected {
        return Err(ChartError::DependencyName {
            chart: chart.name().to_string(),
            expected: expected.to_string(),
            found: dependency.name().to_string(),
        });
    }

    Ok(dependency)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChartMetadata;

    fn bundle(name: &str, dependencies: Vec<ChartBundle>) -> ChartBundle {
        ChartBundle {
            metadata: ChartMetadata {
                name: name.to_string(),
                version: "0.1.0".to_string(),
                app_version: None,
                description: None,
            },
            values: serde_yaml::Mapping::new(),
            files: vec![],
            dependencies,
        }
    }

    #[test]
    fn test_resolve_single_dependency() {
        let chart = bundle("umbrella", vec![bundle("vector", vec![])]);

        let dependency = resolve_dependency(&chart, "vector").unwrap();
        assert_eq!(dependency.name(), "vector");
    }

    #[test]
    fn test_zero_dependencies_fails() {
        let chart = bundle("umbrella", vec![]);

        let result = resolve_dependency(&chart, "vector");
        assert!(matches!(
            result,
            Err(ChartError::DependencyCount { found: 0, .. })
        ));
    }

    #[test]
    fn test_multiple_dependencies_fail() {
        let chart = bundle(
            "umbrella",
            vec![bundle("vector", vec![]), bundle("redis", vec![])],
        );

        let result = resolve_dependency(&chart, "vector");
        assert!(matches!(
            result,
            Err(ChartError::DependencyCount { found: 2, .. })
        ));
    }

    #[test]
    fn test_wrong_dependency_name_fails() {
        let chart = bundle("umbrella", vec![bundle("fluentd", vec![])]);

        let result = resolve_dependency(&chart, "vector");
        match result {
            Err(ChartError::DependencyName {
                expected, found, ..
            }) => {
                assert_eq!(expected, "vector");
                assert_eq!(found, "fluentd");
            }
            other => panic!("unexpected result: {:?}", other.map(|dep| dep.name().to_string())),
        }
    }
}
