//! GeoIPデータベースの取得
//!
//! MaxMind からエディションIDで指定されたデータベースをダウンロードし、
//! チェックサムを検証した上で、イメージに重ねられるファイルツリーとして
//! 返します。

pub mod archive;
pub mod error;
pub mod fetcher;

pub use archive::{extract_database, verify_checksum};
pub use error::{GeoipError, Result};
pub use fetcher::{DEFAULT_INSTALL_PREFIX, GeoipFetcher, MaxmindFetcher};
