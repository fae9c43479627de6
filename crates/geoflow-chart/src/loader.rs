//! チャートローダー
//!
//! チャートディレクトリを再帰的に読み込んで ChartBundle を生成します。
//! 読み込むのは以下の3種類:
//! 1. Chart.yaml（メタデータ、必須）
//! 2. values.yaml（設定値、省略可）
//! 3. その他の通常ファイル（テンプレート等、生データとして保持）
//!
//! charts/ 以下の各ディレクトリは依存チャートとして再帰的にロードされます。

use crate::error::{ChartError, Result};
use crate::model::{ChartBundle, ChartFile, ChartMetadata};
use std::path::Path;
use tracing::{debug, instrument};

/// チャートメタデータのファイル名
pub const CHART_MANIFEST: &str = "Chart.yaml";
/// 設定値のファイル名
pub const VALUES_FILE: &str = "values.yaml";
/// 依存チャートを格納するディレクトリ名
pub const CHARTS_DIR: &str = "charts";

/// チャートディレクトリを ChartBundle にロード
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_chart(path: impl AsRef<Path>) -> Result<ChartBundle> {
    let path = path.as_ref();

    if !path.is_dir() {
        return Err(ChartError::Load {
            path: path.to_path_buf(),
            message: "ディレクトリではありません".to_string(),
        });
    }

    let metadata = load_metadata(path)?;
    let values = load_values(path)?;
    let files = collect_files(path)?;
    let dependencies = load_dependencies(path)?;

    debug!(
        chart = %metadata.name,
        files = files.len(),
        dependencies = dependencies.len(),
        "Chart loaded"
    );

    Ok(ChartBundle {
        metadata,
        values,
        files,
        dependencies,
    })
}

/// Chart.yaml を読み込んでメタデータを取得
fn load_metadata(chart_dir: &Path) -> Result<ChartMetadata> {
    let manifest_path = chart_dir.join(CHART_MANIFEST);

    let content = std::fs::read_to_string(&manifest_path).map_err(|e| ChartError::Load {
        path: chart_dir.to_path_buf(),
        message: format!("{} を読み込めません: {}", CHART_MANIFEST, e),
    })?;

    serde_yaml::from_str(&content).map_err(|e| ChartError::Yaml {
        path: manifest_path,
        message: e.to_string(),
    })
}

/// values.yaml を読み込む。ファイルが無ければ空のマッピング
fn load_values(chart_dir: &Path) -> Result<serde_yaml::Mapping> {
    let values_path = chart_dir.join(VALUES_FILE);

    if !values_path.exists() {
        return Ok(serde_yaml::Mapping::new());
    }

    let content = std::fs::read_to_string(&values_path)?;
    let value: serde_yaml::Value =
        serde_yaml::from_str(&content).map_err(|e| ChartError::Yaml {
            path: values_path.clone(),
            message: e.to_string(),
        })?;

    match value {
        // 空ファイルやコメントのみのファイルは Null になる
        serde_yaml::Value::Null => Ok(serde_yaml::Mapping::new()),
        serde_yaml::Value::Mapping(mapping) => Ok(mapping),
        _ => Err(ChartError::InvalidValues { path: values_path }),
    }
}

/// チャートルート以下の生ファイルを収集
///
/// Chart.yaml / values.yaml / charts/ は除外。名前の昇順で返します。
fn collect_files(chart_dir: &Path) -> Result<Vec<ChartFile>> {
    let mut files = Vec::new();
    collect_files_recursive(chart_dir, chart_dir, &mut files)?;
    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

fn collect_files_recursive(
    chart_dir: &Path,
    current: &Path,
    files: &mut Vec<ChartFile>,
) -> Result<()> {
    for entry in std::fs::read_dir(current)? {
        let entry = entry?;
        let entry_path = entry.path();
        let file_type = entry.file_type()?;

        if current == chart_dir {
            let file_name = entry.file_name();
            if file_name == CHART_MANIFEST || file_name == VALUES_FILE || file_name == CHARTS_DIR {
                continue;
            }
        }

        if file_type.is_dir() {
            collect_files_recursive(chart_dir, &entry_path, files)?;
        } else if file_type.is_file() {
            let name = entry_path
                .strip_prefix(chart_dir)
                .unwrap_or(&entry_path)
                .components()
                .map(|component| component.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            let data = std::fs::read(&entry_path)?;
            files.push(ChartFile { name, data });
        }
        // シンボリックリンク等はスキップ
    }

    Ok(())
}

/// charts/ 以下の依存チャートをロード
///
/// ディレクトリ形式のみ対応（.tgz アーカイブは未対応）。名前の昇順で返します。
fn load_dependencies(chart_dir: &Path) -> Result<Vec<ChartBundle>> {
    let charts_dir = chart_dir.join(CHARTS_DIR);

    if !charts_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut subdirs = Vec::new();
    for entry in std::fs::read_dir(&charts_dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            subdirs.push(entry.path());
        }
    }
    subdirs.sort();

    let mut dependencies = Vec::new();
    for subdir in subdirs {
        dependencies.push(load_chart(&subdir)?);
    }

    Ok(dependencies)
}
