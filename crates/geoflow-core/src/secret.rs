//! シークレット値のラッパー
//!
//! レジストリのパスワードやライセンスキーをログ・Debug出力から守るための型。
//! 値の取り出しは `expose()` の明示的な呼び出しに限定されます。

use std::fmt;

/// ログに出してはいけない値のラッパー
///
/// Debug / Display では常にマスクされます。
#[derive(Clone)]
pub struct Secret(String);

impl Secret {
    /// 新しいシークレットを作成
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// 内部の値を取り出す
    ///
    /// 呼び出し側は取り出した値をログに含めないこと。
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// 値が空かどうか
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(****)")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("****")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expose_returns_inner_value() {
        let secret = Secret::new("hunter2");
        assert_eq!(secret.expose(), "hunter2");
    }

    #[test]
    fn test_debug_masks_value() {
        let secret = Secret::new("hunter2");
        let debug = format!("{:?}", secret);
        assert!(!debug.contains("hunter2"));
        assert_eq!(debug, "Secret(****)");
    }

    #[test]
    fn test_display_masks_value() {
        let secret = Secret::new("hunter2");
        assert_eq!(format!("{}", secret), "****");
    }

    #[test]
    fn test_is_empty() {
        assert!(Secret::new("").is_empty());
        assert!(!Secret::new("x").is_empty());
    }
}
