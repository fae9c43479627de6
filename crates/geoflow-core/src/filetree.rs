//! インメモリのファイルツリー
//!
//! GeoIPデータベースのようにイメージへ重ねるファイル群を、
//! ルートからの相対パスと内容のペアとして保持します。
//! パスは昇順で列挙されるため、同じ内容なら常に同じ順序になります。

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// ルート相対パス -> 内容 のファイル集合
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileTree {
    entries: BTreeMap<PathBuf, Vec<u8>>,
}

impl FileTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// ファイルを追加
    ///
    /// 先頭の `/` は取り除いて相対パスとして格納します。
    /// 同じパスへの再追加は内容を上書きします。
    pub fn insert(&mut self, path: impl AsRef<Path>, data: Vec<u8>) {
        let path = path.as_ref();
        let relative = path.strip_prefix("/").unwrap_or(path);
        self.entries.insert(relative.to_path_buf(), data);
    }

    /// パス昇順でエントリを列挙
    pub fn iter(&self) -> impl Iterator<Item = (&Path, &[u8])> {
        self.entries
            .iter()
            .map(|(path, data)| (path.as_path(), data.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 指定パスの内容を取得
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&[u8]> {
        self.entries.get(path.as_ref()).map(|data| data.as_slice())
    }

    /// 別のツリーを取り込む（同じパスは上書き）
    pub fn extend(&mut self, other: FileTree) {
        self.entries.extend(other.entries);
    }
}
