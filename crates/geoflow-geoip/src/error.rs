use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeoipError {
    #[error("データベース '{edition}' のダウンロードに失敗しました\n理由: {message}")]
    Download { edition: String, message: String },

    #[error("データベース '{edition}' のチェックサムが一致しません\n期待: {expected}\n実際: {actual}")]
    ChecksumMismatch {
        edition: String,
        expected: String,
        actual: String,
    },

    #[error("チェックサムファイルが不正です: {0}")]
    MalformedChecksum(String),

    #[error("アーカイブの展開に失敗しました: {0}")]
    Archive(String),
}

pub type Result<T> = std::result::Result<T, GeoipError>;
