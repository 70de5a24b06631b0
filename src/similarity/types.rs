use serde::{Deserialize, Serialize};

/// GET /health
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub index_size: u64,
}

impl HealthResponse {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy" && self.index_size > 0
    }
}

/// 完全一致した入力画像の情報
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputImageInfo {
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub image_path: String,
    pub similarity_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarImage {
    pub rank: u32,
    pub similarity_score: f64,
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub image_path: String,
}

/// POST /find_similar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindSimilarResponse {
    #[serde(default)]
    pub query_image: Option<String>,
    pub has_perfect_match: bool,
    #[serde(default)]
    pub input_image_info: Option<InputImageInfo>,
    pub similar_images: Vec<SimilarImage>,
    pub total_found: usize,
}

/// エラー時の本文（{"detail": "..."}）
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: String,
}
