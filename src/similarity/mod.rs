//! 類似画像検索サービス
//!
//! 埋め込みベクトル検索を行う外部サービスのクライアントと、
//! レスポンスを作品データに変換する処理。

mod client;
mod types;

pub use client::SimilarityClient;
pub use types::{FindSimilarResponse, HealthResponse, InputImageInfo, SimilarImage};

use art_explorer_common::Artwork;
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// 完全一致とみなす類似度
pub const PERFECT_MATCH_SCORE: f64 = 0.99;

/// 画像配信URL（絶対パスはb64:で包む）
pub fn image_url(base_url: &str, image_path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if image_path.starts_with('/') {
        format!("{}/image/b64:{}", base, STANDARD.encode(image_path.as_bytes()))
    } else {
        format!("{}/image/{}", base, image_path)
    }
}

/// 検索結果を作品に変換
pub fn to_artwork(image: &SimilarImage, base_url: &str) -> Artwork {
    let genre = display_label(&image.genre);
    Artwork {
        id: artwork_id(&image.image_path),
        url: image_url(base_url, &image.image_path),
        title: image.title.clone(),
        artist: display_label(&image.artist),
        year: String::new(),
        style: genre.clone(),
        description: String::new(),
        similarity: Some(image.similarity_score.clamp(0.0, 1.0)),
        style_labels: vec![genre],
        source: None,
    }
}

/// 完全一致した入力画像を作品に変換（ルート作品の置き換え用）
pub fn input_to_artwork(info: &InputImageInfo, base_url: &str) -> Artwork {
    let image = SimilarImage {
        rank: 0,
        similarity_score: info.similarity_score,
        title: info.title.clone(),
        artist: info.artist.clone(),
        genre: info.genre.clone(),
        image_path: info.image_path.clone(),
    };
    to_artwork(&image, base_url)
}

impl FindSimilarResponse {
    /// 類似度付きの作品一覧（順位順）
    pub fn artworks(&self, base_url: &str) -> Vec<Artwork> {
        let mut images: Vec<&SimilarImage> = self.similar_images.iter().collect();
        images.sort_by_key(|i| i.rank);
        images.into_iter().map(|i| to_artwork(i, base_url)).collect()
    }

    /// 入力画像がインデックス内の作品と一致した場合、その作品
    pub fn identified_artwork(&self, base_url: &str) -> Option<Artwork> {
        let info = self.input_image_info.as_ref()?;
        if self.has_perfect_match || info.similarity_score >= PERFECT_MATCH_SCORE {
            Some(input_to_artwork(info, base_url))
        } else {
            None
        }
    }
}

/// パスのファイル名部分からID（拡張子なし）
fn artwork_id(image_path: &str) -> String {
    let name = image_path.rsplit('/').next().unwrap_or(image_path);
    let stem = name.rsplit_once('.').map(|(s, _)| s).unwrap_or(name);
    format!("service-{}", stem)
}

/// "claude_monet" → "Claude Monet"
fn display_label(raw: &str) -> String {
    let label = crate::catalog::title_case(&raw.replace(['_', '-'], " "));
    if label.is_empty() { "不明".to_string() } else { label }
}
