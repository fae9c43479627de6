//! geoflow の共有データ型
//!
//! パイプラインの各ステージ間で受け渡される基本型を定義します。
//! 各型は機能ごとにモジュールに分離されています。

mod filetree;
mod image;
mod secret;

// Re-exports
pub use filetree::*;
pub use image::*;
pub use secret::*;
