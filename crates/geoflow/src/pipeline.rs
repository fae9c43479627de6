//! 更新パイプライン
//!
//! ロード → 依存解決 → 座標抽出 → タグ導出 → GeoIP取得 → 発行 →
//! レンダリング、を直列に実行します。各ステージは前段の出力にのみ
//! 依存し、発行が完了するまでレンダリングは始まりません。
//! 出力の values が未発行のイメージを指すことはありません。

use crate::error::Result;
use chrono::NaiveDate;
use geoflow_chart::{load_chart, resolve_dependency};
use geoflow_core::ImageCoordinates;
use geoflow_geoip::GeoipFetcher;
use geoflow_image::{ImagePublisher, RegistryCredentials, derive_tag, extract_coordinates};
use geoflow_render::{RenderedValues, ValuesBinding, render_values};
use std::path::PathBuf;
use tracing::{info, instrument};

/// umbrella チャートが依存すべきサブチャート名
const DEPENDENCY_NAME: &str = "vector";

/// イメージに焼き込む GeoIP エディション
const GEOIP_EDITIONS: &[&str] = &["GeoLite2-City"];

/// 更新対象のチャート
pub struct UpdateTarget {
    pub chart_path: PathBuf,
}

/// 発行先の設定
#[derive(Debug, Clone)]
pub struct UpdateOptions {
    /// 発行先レジストリのホスト名
    pub registry: String,
    /// 発行先リポジトリ名
    pub repository: String,
    pub credentials: RegistryCredentials,
}

impl UpdateTarget {
    pub fn new(chart_path: impl Into<PathBuf>) -> Self {
        Self {
            chart_path: chart_path.into(),
        }
    }

    /// チャート状態から新しいイメージを発行し、values ドキュメントを返す
    ///
    /// `today` はタグ導出に使われます。同じ日・同じチャート状態なら
    /// 同じタグになります。
    #[instrument(skip_all, fields(chart = %self.chart_path.display()))]
    pub async fn update_container_image<P, G>(
        &self,
        publisher: &P,
        fetcher: &G,
        options: &UpdateOptions,
        today: NaiveDate,
    ) -> Result<RenderedValues>
    where
        P: ImagePublisher,
        G: GeoipFetcher,
    {
        // 1. チャートのロードと依存解決
        let chart = load_chart(&self.chart_path)?;
        let dependency = resolve_dependency(&chart, DEPENDENCY_NAME)?;

        // 2. 元イメージの座標抽出
        let source = extract_coordinates(&dependency.values, dependency.app_version())?;
        info!(source = %source.reference(), "Source image resolved");

        // 3. 発行先座標の決定
        let tag = derive_tag(&source.tag, today);
        let destination =
            ImageCoordinates::new(&options.registry, &options.repository, &tag);

        // 4. GeoIPデータベースの取得
        let overlay = fetcher.fetch_all(GEOIP_EDITIONS).await?;

        // 5. 発行（完了するまで values は生成しない）
        let published = publisher
            .publish(&source, &overlay, &destination, &options.credentials)
            .await?;
        info!(image = %published, "Image published");

        // 6. values のレンダリング
        let binding = ValuesBinding {
            repository: destination.name(),
            tag: destination.tag.clone(),
        };
        let rendered = render_values(&chart.files, &binding)?;

        Ok(rendered)
    }
}
