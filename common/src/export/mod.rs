//! 探索結果の書き出し（CLI・フロントエンド共通部分）

#[cfg(feature = "excel")]
pub mod excel_core;
