//! ダウンロードしたアーカイブの検証と展開
//!
//! MaxMind の配布物は `{edition}.tar.gz` と `.sha256` のペア。
//! チェックサムファイルは `sha256sum` 形式（ダイジェスト + ファイル名）で、
//! ファイル名の列は配布側の命名に依存するためダイジェストのみを照合します。

use crate::error::{GeoipError, Result};
use sha2::{Digest, Sha256};
use std::io::Read;

/// tar.gz のチェックサムを検証
///
/// `checksum_text` は `sha256sum` 形式の1行（`<hex>  <filename>`）。
pub fn verify_checksum(data: &[u8], checksum_text: &str, edition: &str) -> Result<()> {
    let expected = checksum_text
        .split_whitespace()
        .next()
        .filter(|token| token.len() == 64 && token.chars().all(|c| c.is_ascii_hexdigit()))
        .ok_or_else(|| GeoipError::MalformedChecksum(checksum_text.trim().to_string()))?
        .to_ascii_lowercase();

    let actual = hex::encode(Sha256::digest(data));

    if actual != expected {
        return Err(GeoipError::ChecksumMismatch {
            edition: edition.to_string(),
            expected,
            actual,
        });
    }

    Ok(())
}

/// tar.gz から `{edition}.mmdb` を取り出す
///
/// 配布物はエディション名+日付のディレクトリに包まれているため、
/// ディレクトリ階層は無視してファイル名だけで探します。
pub fn extract_database(tarball: &[u8], edition: &str) -> Result<Vec<u8>> {
    let database_name = format!("{}.mmdb", edition);

    let decoder = flate2::read::GzDecoder::new(tarball);
    let mut archive = tar::Archive::new(decoder);

    for entry in archive
        .entries()
        .map_err(|e| GeoipError::Archive(e.to_string()))?
    {
        let mut entry = entry.map_err(|e| GeoipError::Archive(e.to_string()))?;
        let path = entry
            .path()
            .map_err(|e| GeoipError::Archive(e.to_string()))?;

        let matches = path
            .file_name()
            .map(|name| name.to_string_lossy() == database_name.as_str())
            .unwrap_or(false);

        if matches {
            let mut data = Vec::new();
            entry
                .read_to_end(&mut data)
                .map_err(|e| GeoipError::Archive(e.to_string()))?;
            return Ok(data);
        }
    }

    Err(GeoipError::Archive(format!(
        "{} がアーカイブに含まれていません",
        database_name
    )))
}
