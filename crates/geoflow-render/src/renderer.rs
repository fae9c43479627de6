//! テンプレートレンダラー
//!
//! Teraを使用して values テンプレートを展開します。束縛は
//! `{image: {repository, tag}}` のみ。環境・乱数・時刻に触れる
//! ビルトイン関数は失敗する関数で上書きし、レンダリングを
//! 入力のみに依存させます。

use crate::error::{RenderError, Result};
use geoflow_chart::ChartFile;
use std::collections::HashMap;
use std::error::Error as _;
use std::path::{Path, PathBuf};
use tera::Tera;
use tracing::{debug, info};

/// チャート内で探すテンプレートのファイル名
pub const VALUES_TEMPLATE_NAME: &str = "values.tpl.yaml";
/// 出力アーティファクトのファイル名
pub const VALUES_OUTPUT_NAME: &str = "values.yaml";

/// 外部状態に触れるため無効化するビルトイン関数
const FORBIDDEN_FUNCTIONS: &[&str] = &["get_env", "get_random", "now"];

/// テンプレートに束縛する新しいイメージ座標
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValuesBinding {
    /// レジストリ込みのリポジトリ名（例: `ghcr.io/acme/vector`）
    pub repository: String,
    pub tag: String,
}

/// レンダリング済みの values ドキュメント
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedValues {
    content: String,
}

impl RenderedValues {
    pub fn content(&self) -> &str {
        &self.content
    }

    /// 出力ディレクトリに values.yaml として書き出す
    ///
    /// ディレクトリは無ければ作成されます。書き出したパスを返します。
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let output_path = dir.join(VALUES_OUTPUT_NAME);
        std::fs::write(&output_path, &self.content)?;

        info!(path = %output_path.display(), "Rendered values written");
        Ok(output_path)
    }
}

/// チャートの生ファイル一覧からテンプレートを探してレンダリング
pub fn render_values(files: &[ChartFile], binding: &ValuesBinding) -> Result<RenderedValues> {
    let template = files
        .iter()
        .find(|file| file.name == VALUES_TEMPLATE_NAME)
        .ok_or_else(|| RenderError::TemplateNotFound(VALUES_TEMPLATE_NAME.to_string()))?;

    let body = std::str::from_utf8(&template.data).map_err(|e| RenderError::Parse {
        name: VALUES_TEMPLATE_NAME.to_string(),
        message: format!("UTF-8ではありません: {}", e),
    })?;

    render_str(body, binding)
}

/// テンプレート文字列をレンダリング
pub fn render_str(body: &str, binding: &ValuesBinding) -> Result<RenderedValues> {
    let mut tera = Tera::default();

    for &name in FORBIDDEN_FUNCTIONS {
        tera.register_function(name, forbid_function(name));
    }

    tera.add_raw_template(VALUES_OUTPUT_NAME, body)
        .map_err(|e| RenderError::Parse {
            name: VALUES_TEMPLATE_NAME.to_string(),
            message: error_detail(&e),
        })?;

    let mut context = tera::Context::new();
    context.insert(
        "image",
        &serde_json::json!({
            "repository": binding.repository,
            "tag": binding.tag,
        }),
    );

    let content = tera
        .render(VALUES_OUTPUT_NAME, &context)
        .map_err(|e| RenderError::Execution {
            name: VALUES_TEMPLATE_NAME.to_string(),
            message: error_detail(&e),
        })?;

    debug!(bytes = content.len(), "Template rendered");

    Ok(RenderedValues { content })
}

/// 無効化された関数の代わりに登録する、常に失敗する関数
fn forbid_function(
    name: &'static str,
) -> impl tera::Function + 'static {
    move |_args: &HashMap<String, tera::Value>| -> tera::Result<tera::Value> {
        Err(tera::Error::msg(format!(
            "関数 '{}' はこのレンダリングでは使用できません（外部状態へのアクセス禁止）",
            name
        )))
    }
}

/// Teraエラーから詳細情報を抽出
///
/// 未定義変数などの具体的な情報は source チェーンの奥にあることが多い。
fn error_detail(e: &tera::Error) -> String {
    let mut details = vec![e.to_string()];

    let mut source = e.source();
    while let Some(err) = source {
        details.push(err.to_string());
        source = err.source();
    }

    details.join(" | ")
}
