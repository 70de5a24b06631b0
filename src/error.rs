use art_explorer_common::ExploreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("探索エラー: {0}")]
    Explore(#[from] ExploreError),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("画像が見つかりません: {0}")]
    NoImagesFound(String),

    #[error("類似度サービスの呼び出しに失敗: {0}")]
    Http(#[from] reqwest::Error),

    #[error("類似度サービスがエラーを返しました ({status}): {detail}")]
    ServiceStatus { status: u16, detail: String },

    #[error("類似度サービスのレスポンスが不正: {0}")]
    ServiceResponse(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("入力が不正: {0}")]
    InvalidInput(String),

    #[error("対話入力エラー: {0}")]
    Prompt(String),
}

impl ExplorerError {
    /// サービスに届かなかった、または応答本文を読み切れなかった（模擬データへの切り替え対象）
    pub fn is_unreachable(&self) -> bool {
        match self {
            ExplorerError::Http(e) => e.is_connect() || e.is_timeout() || e.is_body() || e.is_decode(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExplorerError>;
