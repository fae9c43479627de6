//! イメージ座標の抽出と GeoIP 入りイメージの発行
//!
//! チャートの values からイメージ座標を取り出し、日付入りタグを導出し、
//! GeoIPデータベースを重ねたイメージをレジストリに発行します。

pub mod context;
pub mod coords;
pub mod error;
pub mod publisher;
pub mod tag;

pub use context::ContextBuilder;
pub use coords::{DEFAULT_REGISTRY, extract_coordinates};
pub use error::{ImageError, Result};
pub use publisher::{DockerPublisher, ImagePublisher, RegistryCredentials};
pub use tag::{derive_tag, validate_tag};
