use thiserror::Error;

/// パイプライン全体のエラー
///
/// どのエラーも実行の中断を意味し、内部でのリトライは行われません。
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("チャートの読み込みに失敗しました\n{0}")]
    Chart(#[from] geoflow_chart::ChartError),

    #[error("イメージ処理に失敗しました\n{0}")]
    Image(#[from] geoflow_image::ImageError),

    #[error("GeoIPデータベースの取得に失敗しました\n{0}")]
    Geoip(#[from] geoflow_geoip::GeoipError),

    #[error("values のレンダリングに失敗しました\n{0}")]
    Render(#[from] geoflow_render::RenderError),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
