//! データベース取得の実装
//!
//! ダウンロードURLにはライセンスキーが含まれるため、URLをログや
//! エラーメッセージに出してはいけません。

use crate::archive::{extract_database, verify_checksum};
use crate::error::{GeoipError, Result};
use geoflow_core::{FileTree, Secret};
use tracing::{debug, info};

/// MaxMind のダウンロードエンドポイント
const DEFAULT_DOWNLOAD_URL: &str = "https://download.maxmind.com/app/geoip_download";

/// データベースの配置先プレフィックス
pub const DEFAULT_INSTALL_PREFIX: &str = "/usr/local";

/// GeoIPデータベース取得のトレイト
#[allow(async_fn_in_trait)]
pub trait GeoipFetcher {
    /// エディションIDで指定されたデータベースをファイルツリーとして取得
    async fn fetch(&self, edition_id: &str) -> Result<FileTree>;

    /// 複数エディションをまとめて取得
    async fn fetch_all(&self, edition_ids: &[&str]) -> Result<FileTree> {
        let mut tree = FileTree::new();
        for edition_id in edition_ids {
            tree.extend(self.fetch(edition_id).await?);
        }
        Ok(tree)
    }
}

/// MaxMind からダウンロードする実装
pub struct MaxmindFetcher {
    license_key: Secret,
    client: reqwest::Client,
    download_url: String,
    install_prefix: String,
}

impl MaxmindFetcher {
    pub fn new(license_key: Secret) -> Self {
        Self {
            license_key,
            client: reqwest::Client::new(),
            download_url: DEFAULT_DOWNLOAD_URL.to_string(),
            install_prefix: DEFAULT_INSTALL_PREFIX.to_string(),
        }
    }

    /// ダウンロードURLを差し替える（テスト用のミラー等）
    pub fn with_download_url(mut self, url: impl Into<String>) -> Self {
        self.download_url = url.into();
        self
    }

    /// 配置先プレフィックスを差し替える
    pub fn with_install_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.install_prefix = prefix.into();
        self
    }

    /// データベースのダウンロードURL（ライセンスキー入り、ログ出力禁止）
    fn database_url(&self, edition_id: &str) -> String {
        format!(
            "{}?edition_id={}&license_key={}&suffix=tar.gz",
            self.download_url,
            edition_id,
            self.license_key.expose()
        )
    }

    async fn download(&self, url: &str, edition_id: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| transport_error(edition_id, e))?;

        if !response.status().is_success() {
            return Err(GeoipError::Download {
                edition: edition_id.to_string(),
                message: format!("HTTP {}", response.status()),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error(edition_id, e))?;
        Ok(body.to_vec())
    }
}

/// 転送エラーをライセンスキー入りURLを剥がしてから変換する
fn transport_error(edition_id: &str, e: reqwest::Error) -> GeoipError {
    GeoipError::Download {
        edition: edition_id.to_string(),
        message: e.without_url().to_string(),
    }
}

impl GeoipFetcher for MaxmindFetcher {
    async fn fetch(&self, edition_id: &str) -> Result<FileTree> {
        info!(edition = edition_id, "Fetching GeoIP database");

        let url = self.database_url(edition_id);
        let tarball = self.download(&url, edition_id).await?;
        debug!(
            edition = edition_id,
            bytes = tarball.len(),
            "Database tarball downloaded"
        );

        let checksum_text_bytes = self
            .download(&format!("{}.sha256", url), edition_id)
            .await?;
        let checksum_text =
            String::from_utf8(checksum_text_bytes).map_err(|e| GeoipError::Download {
                edition: edition_id.to_string(),
                message: format!("チェックサムファイルがUTF-8ではありません: {}", e),
            })?;

        verify_checksum(&tarball, &checksum_text, edition_id)?;
        let database = extract_database(&tarball, edition_id)?;

        let mut tree = FileTree::new();
        tree.insert(
            format!(
                "{}/share/GeoIP/{}.mmdb",
                self.install_prefix, edition_id
            ),
            database,
        );

        info!(edition = edition_id, "GeoIP database verified");
        Ok(tree)
    }
}
