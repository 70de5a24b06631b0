//! art-explorer
//!
//! 名画を起点に類似作品・美術様式をスクロールでたどる探索ツールのCLI側
//! - アップロード画像の受け付けとプレビュー生成
//! - 類似画像検索サービスのクライアント
//! - ローカル画像カタログ
//! - 非同期の選択処理とスクロール再現
//! - JSON/Excel出力

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod explorer;
pub mod export;
pub mod selector;
pub mod similarity;
pub mod simulate;
pub mod upload;
