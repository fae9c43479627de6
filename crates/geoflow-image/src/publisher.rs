//! GeoIP 入りイメージの発行
//!
//! 元イメージにオーバーレイを重ねたイメージをビルドし、
//! 発行先レジストリにプッシュします。プッシュが完了するまで
//! 呼び出し側は新しい座標を参照してはいけません。

use crate::context::ContextBuilder;
use crate::error::{ImageError, Result};
use crate::tag::validate_tag;
use bollard::Docker;
use bollard::auth::DockerCredentials;
use bollard::models::PushImageInfo;
use colored::Colorize;
use futures_util::StreamExt;
use geoflow_core::{FileTree, ImageCoordinates, Secret};
use std::io::Write;

/// 発行先レジストリの認証情報
#[derive(Debug, Clone)]
pub struct RegistryCredentials {
    pub username: String,
    pub password: Secret,
}

/// イメージ発行のトレイト
///
/// 実装は「元イメージの pull → オーバーレイ → 発行先への push」を
/// 一括で行い、プッシュに失敗した場合はエラーを返すこと。
#[allow(async_fn_in_trait)]
pub trait ImagePublisher {
    /// オーバーレイ済みイメージを発行先座標にプッシュ
    ///
    /// 成功時は完全なイメージ参照を返す。
    async fn publish(
        &self,
        source: &ImageCoordinates,
        overlay: &FileTree,
        destination: &ImageCoordinates,
        credentials: &RegistryCredentials,
    ) -> Result<String>;
}

/// Docker デーモン経由で発行する実装
pub struct DockerPublisher {
    docker: Docker,
}

impl DockerPublisher {
    pub fn new(docker: Docker) -> Self {
        Self { docker }
    }

    /// ローカルの Docker デーモンに接続して作成
    pub fn connect() -> Result<Self> {
        let docker = Docker::connect_with_local_defaults()?;
        Ok(Self { docker })
    }

    /// オーバーレイ済みイメージをビルド
    async fn build(&self, context_data: Vec<u8>, tag: &str) -> Result<()> {
        tracing::info!("Building image: {}", tag);

        #[allow(deprecated)]
        let options = bollard::image::BuildImageOptions {
            dockerfile: "Dockerfile",
            t: tag,
            rm: true,
            forcerm: true,
            // ベースイメージを常にpull
            pull: true,
            ..Default::default()
        };

        use bytes::Bytes;
        use http_body_util::{Either, Full};
        let body = Full::new(Bytes::from(context_data));

        #[allow(deprecated)]
        let mut stream = self
            .docker
            .build_image(options, None, Some(Either::Left(body)));

        while let Some(msg) = stream.next().await {
            let output = msg.map_err(ImageError::DockerConnection)?;
            handle_build_output(output)?;
        }

        tracing::info!("Successfully built: {}", tag);
        Ok(())
    }

    /// ビルド済みイメージをプッシュ
    async fn push(
        &self,
        destination: &ImageCoordinates,
        credentials: &RegistryCredentials,
    ) -> Result<()> {
        let full_image = destination.reference();

        let docker_credentials = DockerCredentials {
            username: Some(credentials.username.clone()),
            password: Some(credentials.password.expose().to_string()),
            serveraddress: Some(destination.registry.clone()),
            ..Default::default()
        };

        #[allow(deprecated)]
        let options = bollard::image::PushImageOptions::<String> {
            tag: destination.tag.clone(),
        };

        println!("  → {}", full_image.cyan());

        #[allow(deprecated)]
        let mut stream =
            self.docker
                .push_image(&destination.name(), Some(options), Some(docker_credentials));

        let mut last_status = String::new();
        let mut error_message: Option<String> = None;

        while let Some(result) = stream.next().await {
            match result {
                Ok(info) => {
                    if let Some(err) = info.error {
                        error_message = Some(err);
                    } else {
                        handle_push_progress(&info, &mut last_status);
                    }
                }
                Err(e) => {
                    return Err(ImageError::PushFailed {
                        image: full_image,
                        message: e.to_string(),
                    });
                }
            }
        }

        // 最終行の改行
        println!();

        if let Some(err) = error_message {
            return Err(ImageError::PushFailed {
                image: full_image,
                message: err,
            });
        }

        Ok(())
    }
}

impl ImagePublisher for DockerPublisher {
    async fn publish(
        &self,
        source: &ImageCoordinates,
        overlay: &FileTree,
        destination: &ImageCoordinates,
        credentials: &RegistryCredentials,
    ) -> Result<String> {
        validate_tag(&destination.tag)?;

        let context_data = ContextBuilder::create_context(&source.reference(), overlay)?;
        let full_image = destination.reference();

        self.build(context_data, &full_image).await?;
        self.push(destination, credentials).await?;

        Ok(full_image)
    }
}

/// ビルド出力の処理
fn handle_build_output(output: bollard::models::BuildInfo) -> Result<()> {
    if let Some(stream) = output.stream {
        print!("{}", stream);
    }

    if let Some(error) = output.error {
        return Err(ImageError::BuildFailed(error));
    }

    if let Some(error_detail) = output.error_detail {
        let error_msg = error_detail
            .message
            .unwrap_or_else(|| "Unknown build error".to_string());
        return Err(ImageError::BuildFailed(error_msg));
    }

    if let Some(status) = output.status {
        // pull 等のステータスメッセージ
        println!("{}", status.cyan());
    }

    Ok(())
}

/// プッシュ進捗を表示
fn handle_push_progress(info: &PushImageInfo, last_status: &mut String) {
    if let Some(status) = &info.status {
        let progress = info.progress.as_deref().unwrap_or("");

        match status.as_str() {
            "Pushing" => {
                print!("\r  ↑ {} {}     ", status, progress);
                std::io::stdout().flush().ok();
            }
            "Pushed" => {
                println!("\r  {} Pushed                    ", "✓".green());
            }
            "Layer already exists" => {
                println!("\r  {} Layer already exists      ", "✓".green());
            }
            "Preparing" | "Waiting" => {
                // 準備中は表示をスキップ（ノイズ軽減）
            }
            _ => {
                if status != last_status {
                    println!("\r  ℹ {}                    ", status);
                    *last_status = status.clone();
                }
            }
        }
    }
}
