//! 一覧表示の絞り込み
//!
//! - 一覧グリッド: スタイルラベルごとの件数とラベルでの絞り込み
//! - シード選択: カテゴリでの絞り込み

use crate::types::Artwork;
use serde::Serialize;

/// ラベルと該当件数
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

/// ラベルごとの件数（初出順）
pub fn label_counts(artworks: &[Artwork]) -> Vec<LabelCount> {
    let mut counts: Vec<LabelCount> = Vec::new();
    for artwork in artworks {
        for label in &artwork.style_labels {
            if counts.iter().any(|c| &c.label == label) {
                continue;
            }
            let count = artworks
                .iter()
                .filter(|a| a.style_labels.contains(label))
                .count();
            counts.push(LabelCount {
                label: label.clone(),
                count,
            });
        }
    }
    counts
}

/// 一覧グリッドの絞り込み
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OverviewFilter {
    #[default]
    All,
    /// ラベルの完全一致
    Label(String),
}

impl OverviewFilter {
    pub fn matches(&self, artwork: &Artwork) -> bool {
        match self {
            OverviewFilter::All => true,
            OverviewFilter::Label(label) => artwork.style_labels.contains(label),
        }
    }

    pub fn apply<'a>(&self, artworks: &'a [Artwork]) -> Vec<&'a Artwork> {
        artworks.iter().filter(|a| self.matches(a)).collect()
    }
}

impl std::str::FromStr for OverviewFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty filter".to_string());
        }
        if s.eq_ignore_ascii_case("all") {
            Ok(OverviewFilter::All)
        } else {
            Ok(OverviewFilter::Label(s.to_string()))
        }
    }
}

/// シード作品のカテゴリ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedCategory {
    #[default]
    All,
    Renaissance,
    Impressionism,
    Modern,
    Traditional,
}

impl SeedCategory {
    pub const ALL: [SeedCategory; 5] = [
        SeedCategory::All,
        SeedCategory::Renaissance,
        SeedCategory::Impressionism,
        SeedCategory::Modern,
        SeedCategory::Traditional,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            SeedCategory::All => "all",
            SeedCategory::Renaissance => "renaissance",
            SeedCategory::Impressionism => "impressionism",
            SeedCategory::Modern => "modern",
            SeedCategory::Traditional => "traditional",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SeedCategory::All => "すべて",
            SeedCategory::Renaissance => "ルネサンス",
            SeedCategory::Impressionism => "印象派",
            SeedCategory::Modern => "近代美術",
            SeedCategory::Traditional => "伝統美術",
        }
    }

    /// ラベルに含まれていれば該当とみなす語
    fn keywords(&self) -> &'static [&'static str] {
        match self {
            SeedCategory::All => &[],
            SeedCategory::Renaissance => &["ルネサンス"],
            SeedCategory::Impressionism => &["印象派"],
            SeedCategory::Modern => &["表現主義", "モダニズム"],
            SeedCategory::Traditional => &["浮世絵", "日本美術", "バロック"],
        }
    }

    pub fn matches(&self, artwork: &Artwork) -> bool {
        if *self == SeedCategory::All {
            return true;
        }
        self.keywords().iter().any(|keyword| {
            let keyword = keyword.to_lowercase();
            artwork
                .style_labels
                .iter()
                .any(|label| label.to_lowercase().contains(&keyword))
        })
    }

    pub fn filter<'a>(&self, seeds: &'a [Artwork]) -> Vec<&'a Artwork> {
        seeds.iter().filter(|a| self.matches(a)).collect()
    }
}

impl std::str::FromStr for SeedCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SeedCategory::ALL
            .into_iter()
            .find(|c| c.id().eq_ignore_ascii_case(s) || c.label() == s)
            .ok_or_else(|| {
                format!(
                    "Unknown category: {}. Use all, renaissance, impressionism, modern, or traditional",
                    s
                )
            })
    }
}
