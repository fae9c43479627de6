//! チャートバンドルのモデル定義

use serde::Deserialize;

/// Chart.yaml のメタデータ
#[derive(Debug, Clone, Deserialize)]
pub struct ChartMetadata {
    pub name: String,
    #[serde(default)]
    pub version: String,
    /// appVersion フィールド。タグのフォールバックとして使われる
    #[serde(rename = "appVersion")]
    pub app_version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// チャート内の生ファイル（Chart.yaml / values.yaml / 依存チャートを除く）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartFile {
    /// チャートルートからの相対名（区切りは `/`）
    pub name: String,
    pub data: Vec<u8>,
}

/// ロード済みのチャートバンドル
///
/// 1回の実行につき1度だけロードされ、以後は変更されません。
#[derive(Debug, Clone)]
pub struct ChartBundle {
    pub metadata: ChartMetadata,
    /// values.yaml の内容。ファイルが無い場合は空のマッピング
    pub values: serde_yaml::Mapping,
    /// 生ファイルの一覧（名前の昇順）
    pub files: Vec<ChartFile>,
    /// charts/ 以下の依存チャート（名前の昇順）
    pub dependencies: Vec<ChartBundle>,
}

impl ChartBundle {
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// appVersion。空文字列は None 扱い
    pub fn app_version(&self) -> Option<&str> {
        self.metadata
            .app_version
            .as_deref()
            .filter(|version| !version.is_empty())
    }

    /// 指定した名前の生ファイルを探す
    pub fn file(&self, name: &str) -> Option<&ChartFile> {
        self.files.iter().find(|file| file.name == name)
    }
}
