use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Malformed 'image' field in chart values: {0}")]
    MalformedImageField(String),

    #[error("Image repository not found in chart values")]
    MissingRepository,

    #[error("Image tag not found in chart values or appVersion")]
    MissingTag,

    #[error("Invalid image tag: {0}")]
    InvalidTag(String),

    #[error("Docker connection error: {0}")]
    DockerConnection(#[from] bollard::errors::Error),

    #[error("Image build failed: {0}")]
    BuildFailed(String),

    #[error("Failed to publish image '{image}': {message}")]
    PushFailed { image: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ImageError {
    /// ユーザー向けの分かりやすいエラーメッセージ
    pub fn user_message(&self) -> String {
        match self {
            ImageError::MissingRepository => "チャートの values に image.repository がありません\n\
                 \n\
                 repository はデフォルト値で補完しません。\n\
                 依存チャートの values.yaml を確認してください。"
                .to_string(),
            ImageError::PushFailed { image, message } => {
                format!(
                    "イメージの発行に失敗しました: {}\n\
                     理由: {}\n\
                     \n\
                     レジストリの認証情報とネットワークを確認してください。",
                    image, message
                )
            }
            _ => format!("{}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ImageError>;
