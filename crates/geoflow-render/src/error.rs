use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("テンプレート '{0}' がチャートに見つかりません")]
    TemplateNotFound(String),

    #[error("テンプレートのパースに失敗しました: {name}\n理由: {message}")]
    Parse { name: String, message: String },

    #[error("テンプレートの実行に失敗しました: {name}\n理由: {message}")]
    Execution { name: String, message: String },

    #[error("ファイル書き込みエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;
