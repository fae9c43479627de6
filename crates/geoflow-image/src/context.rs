//! ビルドコンテキストの生成
//!
//! 元イメージにファイルツリーを重ねるための tar.gz コンテキストを
//! インメモリで組み立てます。生成される Dockerfile は単一ステージ:
//!
//! ```text
//! FROM <source>
//! COPY rootfs/ /
//! ```

use crate::error::{ImageError, Result};
use flate2::Compression;
use flate2::write::GzEncoder;
use geoflow_core::FileTree;
use std::path::Path;
use tar::Builder;

/// コンテキスト内でオーバーレイを格納するディレクトリ名
const ROOTFS_DIR: &str = "rootfs";

pub struct ContextBuilder;

impl ContextBuilder {
    /// オーバーレイ用のビルドコンテキストを tar.gz アーカイブとして作成
    pub fn create_context(source_reference: &str, overlay: &FileTree) -> Result<Vec<u8>> {
        tracing::debug!(
            source = source_reference,
            files = overlay.len(),
            "Creating build context"
        );

        let dockerfile = format!("FROM {}\nCOPY {}/ /\n", source_reference, ROOTFS_DIR);

        let mut archive_data = Vec::new();
        {
            let encoder = GzEncoder::new(&mut archive_data, Compression::default());
            let mut tar = Builder::new(encoder);

            append_file(&mut tar, Path::new("Dockerfile"), dockerfile.as_bytes())?;
            append_dir(&mut tar, Path::new(ROOTFS_DIR))?;

            for (path, data) in overlay.iter() {
                let context_path = Path::new(ROOTFS_DIR).join(path);
                append_file(&mut tar, &context_path, data)?;
            }

            tar.finish().map_err(ImageError::Io)?;
        }

        tracing::debug!("Build context created: {} bytes", archive_data.len());

        Ok(archive_data)
    }
}

fn append_file<W: std::io::Write>(tar: &mut Builder<W>, path: &Path, data: &[u8]) -> Result<()> {
    let mut header = tar::Header::new_gnu();
    header
        .set_path(path)
        .map_err(|e| ImageError::BuildFailed(format!("Failed to set path {:?}: {}", path, e)))?;
    header.set_size(data.len() as u64);
    header.set_mode(0o644);
    header.set_cksum();

    tar.append(&header, data).map_err(ImageError::Io)
}

fn append_dir<W: std::io::Write>(tar: &mut Builder<W>, path: &Path) -> Result<()> {
    let mut header = tar::Header::new_gnu();
    header
        .set_path(path)
        .map_err(|e| ImageError::BuildFailed(format!("Failed to set path {:?}: {}", path, e)))?;
    header.set_entry_type(tar::EntryType::Directory);
    header.set_size(0);
    header.set_mode(0o755);
    header.set_cksum();

    tar.append(&header, std::io::empty())
        .map_err(ImageError::Io)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Read;

    /// アーカイブを展開して パス -> 内容 のマップにする
    fn unpack(archive: &[u8]) -> HashMap<String, Vec<u8>> {
        let decoder = flate2::read::GzDecoder::new(archive);
        let mut tar = tar::Archive::new(decoder);

        let mut entries = HashMap::new();
        for entry in tar.entries().unwrap() {
            let mut entry = entry.unwrap();
            let path = entry.path().unwrap().to_string_lossy().to_string();
            let mut data = Vec::new();
            entry.read_to_end(&mut data).unwrap();
            entries.insert(path, data);
        }
        entries
    }

    #[test]
    fn test_context_contains_dockerfile() {
        let overlay = FileTree::new();
        let archive =
            ContextBuilder::create_context("docker.io/timberio/vector:0.34.0", &overlay).unwrap();

        let entries = unpack(&archive);
        let dockerfile = String::from_utf8(entries.get("Dockerfile").unwrap().clone()).unwrap();

        assert_eq!(
            dockerfile,
            "FROM docker.io/timberio/vector:0.34.0\nCOPY rootfs/ /\n"
        );
    }

    #[test]
    fn test_context_places_overlay_under_rootfs() {
        let mut overlay = FileTree::new();
        overlay.insert(
            "/usr/local/share/GeoIP/GeoLite2-City.mmdb",
            vec![0xde, 0xad],
        );

        let archive = ContextBuilder::create_context("docker.io/busybox:1.36.1", &overlay).unwrap();

        let entries = unpack(&archive);
        assert_eq!(
            entries.get("rootfs/usr/local/share/GeoIP/GeoLite2-City.mmdb"),
            Some(&vec![0xde, 0xad])
        );
    }

    #[test]
    fn test_context_has_rootfs_dir_even_when_empty() {
        let overlay = FileTree::new();
        let archive = ContextBuilder::create_context("docker.io/busybox:1.36.1", &overlay).unwrap();

        let entries = unpack(&archive);
        assert!(entries.keys().any(|path| path.trim_end_matches('/') == "rootfs"));
    }
}
