//! Helmチャートバンドルの読み込み
//!
//! チャートディレクトリをインメモリの [`ChartBundle`] にロードし、
//! umbrella チャートから唯一の依存チャートを解決します。

pub mod error;
pub mod loader;
pub mod model;
pub mod resolver;

pub use error::{ChartError, Result};
pub use loader::load_chart;
pub use model::{ChartBundle, ChartFile, ChartMetadata};
pub use resolver::resolve_dependency;
