use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("チャートを読み込めません: {path}\n理由: {message}")]
    Load { path: PathBuf, message: String },

    #[error("YAMLパースエラー: {path}\n理由: {message}")]
    Yaml { path: PathBuf, message: String },

    #[error("ファイル読み込みエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("values はマッピングである必要があります: {path}")]
    InvalidValues { path: PathBuf },

    #[error("チャート '{chart}' の依存チャートは1つである必要があります（検出: {found}）")]
    DependencyCount { chart: String, found: usize },

    #[error("チャート '{chart}' の依存チャート名が一致しません（期待: {expected}, 実際: {found}）")]
    DependencyName {
        chart: String,
        expected: String,
        found: String,
    },
}

pub type Result<T> = std::result::Result<T, ChartError>;
