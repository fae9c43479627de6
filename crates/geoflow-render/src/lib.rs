//! values テンプレートの厳格レンダリング
//!
//! チャートに同梱された `values.tpl.yaml` を、新しいイメージ座標だけを
//! 束縛して実行します。未定義の変数参照はエラーであり、空文字列として
//! 出力されることはありません（テンプレートの typo が壊れたマニフェスト
//! として出荷されるのを防ぐため）。

pub mod error;
pub mod renderer;

pub use error::{RenderError, Result};
pub use renderer::{
    RenderedValues, VALUES_OUTPUT_NAME, VALUES_TEMPLATE_NAME, ValuesBinding, render_values,
};
