mod error;
mod pipeline;

use clap::{Parser, Subcommand};
use colored::Colorize;
use geoflow_core::Secret;
use geoflow_geoip::MaxmindFetcher;
use geoflow_image::{DockerPublisher, RegistryCredentials};
use pipeline::{UpdateOptions, UpdateTarget};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "geoflow")]
#[command(about = "HelmチャートからGeoIP入りイメージを発行し、valuesを再生成する", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// チャートからイメージを更新して values.yaml を出力
    Update {
        /// umbrella チャートのディレクトリ
        #[arg(long)]
        chart: PathBuf,
        /// 発行先レジストリのホスト名
        #[arg(long)]
        registry: String,
        /// 発行先リポジトリ名
        #[arg(long)]
        repository: String,
        /// レジストリのユーザー名
        #[arg(long)]
        username: String,
        /// レジストリのパスワード（環境変数で渡すこと）
        #[arg(long, env = "GEOFLOW_REGISTRY_PASSWORD", hide_env_values = true)]
        password: String,
        /// MaxMind のライセンスキー（環境変数で渡すこと）
        #[arg(long, env = "GEOFLOW_MAXMIND_LICENSE_KEY", hide_env_values = true)]
        license_key: String,
        /// values.yaml の出力先ディレクトリ
        #[arg(short, long, default_value = "out")]
        output: PathBuf,
    },
    /// バージョンを表示
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt::init();

    match cli.command {
        Commands::Version => {
            println!("geoflow {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Update {
            chart,
            registry,
            repository,
            username,
            password,
            license_key,
            output,
        } => {
            let target = UpdateTarget::new(chart);
            let publisher = DockerPublisher::connect()?;
            let fetcher = MaxmindFetcher::new(Secret::new(license_key));
            let options = UpdateOptions {
                registry,
                repository,
                credentials: RegistryCredentials {
                    username,
                    password: Secret::new(password),
                },
            };
            let today = chrono::Local::now().date_naive();

            let rendered = target
                .update_container_image(&publisher, &fetcher, &options, today)
                .await?;
            let output_path = rendered.write_to(&output)?;

            println!(
                "{} values を書き出しました: {}",
                "✓".green(),
                output_path.display()
            );
            Ok(())
        }
    }
}
