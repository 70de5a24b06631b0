//! エラー型定義

use crate::types::ExploreMode;
use thiserror::Error;

/// 共通エラー型
///
/// すべて同期的に呼び出し元へ返る。失敗時のViewStateは呼び出し前のまま。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExploreError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid transition: {from} -> {to}")]
    InvalidTransition { from: ExploreMode, to: ExploreMode },

    #[error("Busy: another selection is still loading")]
    Busy,

    #[error("Unknown artwork: {0}")]
    UnknownArtwork(String),

    #[error("Unknown tree node: {0}")]
    UnknownNode(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, ExploreError>;
