//! 作品・探索結果の型定義
//!
//! CLIとフロントエンドで共有される型:
//! - Artwork: 作品1点（シード作品・アップロード作品・検索結果）
//! - ResultBundle: ルート作品から導出した探索結果一式
//! - ExploreMode: 表示モード

use crate::error::{ExploreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 作品データ
///
/// 生成後は変更しない。`year`は自由形式（"1503-1519" など）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artwork {
    pub id: String,
    pub url: String,
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub description: String,
    /// ルート作品に対する類似度（0.0〜1.0）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
    pub style_labels: Vec<String>,
    /// 所蔵元
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Artwork {
    /// 必須フィールドの検証
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(ExploreError::Validation("artwork id is empty".into()));
        }
        if self.title.trim().is_empty() {
            return Err(ExploreError::Validation(format!(
                "artwork '{}' has an empty title",
                self.id
            )));
        }
        if self.artist.trim().is_empty() {
            return Err(ExploreError::Validation(format!(
                "artwork '{}' has an empty artist",
                self.id
            )));
        }
        if self.style_labels.is_empty() {
            return Err(ExploreError::Validation(format!(
                "artwork '{}' has no style labels",
                self.id
            )));
        }
        if self.style_labels.iter().any(|l| l.trim().is_empty()) {
            return Err(ExploreError::Validation(format!(
                "artwork '{}' has a blank style label",
                self.id
            )));
        }
        if let Some(score) = self.similarity {
            if !(0.0..=1.0).contains(&score) {
                return Err(ExploreError::Validation(format!(
                    "artwork '{}' similarity {} is outside [0, 1]",
                    self.id, score
                )));
            }
        }
        Ok(())
    }

    /// 類似度を付与したコピーを返す
    pub fn with_similarity(&self, score: f64) -> Self {
        Self {
            similarity: Some(score),
            ..self.clone()
        }
    }

    /// スタイルラベルを含むか（大文字小文字を区別しない）
    pub fn has_label(&self, label: &str) -> bool {
        self.style_labels
            .iter()
            .any(|l| l.eq_ignore_ascii_case(label))
    }
}

/// スタイル別グループ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleGroup {
    pub style_name: String,
    pub description: String,
    pub artworks: Vec<Artwork>,
}

/// 探索結果一式
///
/// ルート作品の選択ごとに丸ごと作り直す。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultBundle {
    pub root: Artwork,
    pub similarity_title: String,
    pub similarity_description: String,
    /// 類似度の降順
    pub similarity_results: Vec<Artwork>,
    pub style_title: String,
    pub style_description: String,
    pub style_groups: Vec<StyleGroup>,
    /// similarity_results + 全グループの作品（重複あり）
    pub overview: Vec<Artwork>,
}

impl ResultBundle {
    /// スタイル分岐の作品をグループ順に平坦化
    pub fn style_artworks(&self) -> impl Iterator<Item = &Artwork> {
        self.style_groups.iter().flat_map(|g| g.artworks.iter())
    }

    /// スタイル分岐の作品数（平坦化後）
    pub fn style_item_count(&self) -> usize {
        self.style_groups.iter().map(|g| g.artworks.len()).sum()
    }

    /// 不変条件の検証
    pub fn validate(&self) -> Result<()> {
        if self.overview.len() < self.similarity_results.len() {
            return Err(ExploreError::Validation(
                "overview is shorter than similarity results".into(),
            ));
        }

        for artwork in self.similarity_results.iter().chain(self.style_artworks()) {
            if artwork.similarity.is_none() {
                return Err(ExploreError::Validation(format!(
                    "artwork '{}' has no similarity relative to '{}'",
                    artwork.id, self.root.id
                )));
            }
        }

        let sorted = self
            .similarity_results
            .windows(2)
            .all(|w| w[0].similarity >= w[1].similarity);
        if !sorted {
            return Err(ExploreError::Validation(
                "similarity results are not sorted by descending score".into(),
            ));
        }

        let expected = self.similarity_results.len() + self.style_item_count();
        if self.overview.len() != expected {
            return Err(ExploreError::Validation(format!(
                "overview has {} artworks, expected {}",
                self.overview.len(),
                expected
            )));
        }

        let mismatch = self
            .overview
            .iter()
            .zip(self.similarity_results.iter().chain(self.style_artworks()))
            .position(|(shown, source)| shown != source);
        if let Some(position) = mismatch {
            return Err(ExploreError::Validation(format!(
                "overview artwork '{}' at {} does not match the branch results",
                self.overview[position].id, position
            )));
        }

        Ok(())
    }
}

/// 表示モード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExploreMode {
    #[default]
    Selection,
    Similarity,
    Style,
    Overview,
}

impl ExploreMode {
    pub const ALL: [ExploreMode; 4] = [
        ExploreMode::Selection,
        ExploreMode::Similarity,
        ExploreMode::Style,
        ExploreMode::Overview,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExploreMode::Selection => "selection",
            ExploreMode::Similarity => "similarity",
            ExploreMode::Style => "style",
            ExploreMode::Overview => "overview",
        }
    }

    /// ツールバー表示名
    pub fn label(&self) -> &'static str {
        match self {
            ExploreMode::Selection => "分岐入口",
            ExploreMode::Similarity => "類似度",
            ExploreMode::Style => "スタイル",
            ExploreMode::Overview => "一覧",
        }
    }
}

impl fmt::Display for ExploreMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ExploreMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "selection" => Ok(ExploreMode::Selection),
            "similarity" => Ok(ExploreMode::Similarity),
            "style" => Ok(ExploreMode::Style),
            "overview" => Ok(ExploreMode::Overview),
            _ => Err(format!(
                "Unknown mode: {}. Use selection, similarity, style, or overview",
                s
            )),
        }
    }
}

/// 分岐選択（selectionからの遷移先）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    Similarity,
    Style,
}

impl From<Branch> for ExploreMode {
    fn from(branch: Branch) -> Self {
        match branch {
            Branch::Similarity => ExploreMode::Similarity,
            Branch::Style => ExploreMode::Style,
        }
    }
}

impl std::str::FromStr for Branch {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "similarity" => Ok(Branch::Similarity),
            "style" => Ok(Branch::Style),
            _ => Err(format!("Unknown branch: {}. Use similarity or style", s)),
        }
    }
}

/// アップロード画像のハンドル
///
/// 中身はコアでは解釈しない。プレビュー参照を仮作品に付けるだけ。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadHandle {
    pub id: String,
    pub file_name: String,
    pub preview_url: String,
    /// 撮影日など（なければ空）
    #[serde(default)]
    pub captured: String,
}

/// selectRootへの入力
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionInput {
    /// シード作品（idまたはURL）
    Seed(String),
    /// アップロード画像
    Upload(UploadHandle),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Artwork {
        Artwork {
            id: "mona-lisa".to_string(),
            url: "https://example.com/mona.jpg".to_string(),
            title: "モナ・リザ".to_string(),
            artist: "レオナルド・ダ・ヴィンチ".to_string(),
            year: "1503-1519".to_string(),
            style: "ルネサンス".to_string(),
            description: String::new(),
            similarity: Some(1.0),
            style_labels: vec!["ルネサンス".to_string(), "肖像画".to_string()],
            source: Some("ルーヴル美術館".to_string()),
        }
    }

    #[test]
    fn test_artwork_validate_ok() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_artwork_validate_missing_title() {
        let artwork = Artwork {
            title: "  ".to_string(),
            ..sample()
        };
        assert!(matches!(artwork.validate(), Err(ExploreError::Validation(_))));
    }

    #[test]
    fn test_artwork_validate_empty_labels() {
        let artwork = Artwork {
            style_labels: vec![],
            ..sample()
        };
        assert!(matches!(artwork.validate(), Err(ExploreError::Validation(_))));
    }

    #[test]
    fn test_artwork_validate_similarity_range() {
        let artwork = Artwork {
            similarity: Some(1.2),
            ..sample()
        };
        assert!(artwork.validate().is_err());
    }

    #[test]
    fn test_artwork_serialize_camel_case() {
        let json = serde_json::to_string(&sample()).expect("シリアライズ失敗");
        assert!(json.contains("\"styleLabels\""));
        assert!(json.contains("\"id\":\"mona-lisa\""));
    }

    #[test]
    fn test_artwork_deserialize_missing_optional() {
        let json = r#"{
            "id": "x",
            "url": "u",
            "title": "t",
            "artist": "a",
            "styleLabels": ["抽象"]
        }"#;
        let artwork: Artwork = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(artwork.similarity, None);
        assert_eq!(artwork.year, "");
        assert!(artwork.source.is_none());
    }

    #[test]
    fn test_has_label_ignores_case() {
        let artwork = Artwork {
            style_labels: vec!["Abstract".to_string()],
            ..sample()
        };
        assert!(artwork.has_label("abstract"));
        assert!(!artwork.has_label("cubism"));
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("Style".parse::<ExploreMode>(), Ok(ExploreMode::Style));
        assert!("timeline".parse::<ExploreMode>().is_err());
        assert_eq!(ExploreMode::Overview.to_string(), "overview");
    }

    #[test]
    fn test_branch_into_mode() {
        assert_eq!(ExploreMode::from(Branch::Similarity), ExploreMode::Similarity);
        assert_eq!(ExploreMode::from(Branch::Style), ExploreMode::Style);
    }
}
