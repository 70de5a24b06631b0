//! 美術様式カタログ
//!
//! 様式の一覧・絞り込み・年表と、様式ごとの縦スクロール探索（セクション列）を扱う。

use crate::error::Result;
use crate::sections::{map_progress_to_index, SectionThresholds};
use crate::types::Artwork;
use serde::{Deserialize, Serialize};

/// 年代フィルタで終端を省略したときの上限
pub const LATEST_YEAR: i32 = 2024;

/// 年表ノードから仮の様式を作るときの期間（年）
pub const ERA_SPAN_YEARS: i32 = 50;

/// 詳細データを持つ様式
pub const FEATURED_STYLES: [&str; 4] = ["high-renaissance", "impressionism", "cubism", "contemporary-art"];

/// 美術様式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtStyle {
    pub id: String,
    pub name: String,
    pub description: String,
    pub period: String,
    pub start_year: i32,
    pub end_year: i32,
    pub region: String,
    pub influence: String,
    pub characteristics: Vec<String>,
    pub representative_work: Artwork,
    pub related_styles: Vec<String>,
    /// 表示色（#RRGGBB）
    pub color: String,
}

impl ArtStyle {
    pub fn is_featured(&self) -> bool {
        FEATURED_STYLES.contains(&self.id.as_str())
    }
}

/// 年表の1時代
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEra {
    pub id: String,
    pub year: i32,
    pub title: String,
    pub description: String,
    /// 詳細のある様式ID（なければ空）
    pub style_ids: Vec<String>,
    pub significance: String,
    pub representative_artists: Vec<String>,
    pub color: String,
}

/// 様式の分岐（派生流派のまとまり）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleBranch {
    pub id: String,
    pub name: String,
    pub description: String,
    pub parent_style: String,
    pub influence: String,
    pub color: String,
}

/// セクションの中身
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "items")]
pub enum SectionContent {
    Masterpieces(Vec<Artwork>),
    SimilarWorks(Vec<Artwork>),
    Timeline(Vec<TimelineEra>),
    StyleBranches(Vec<StyleBranch>),
}

impl SectionContent {
    pub fn len(&self) -> usize {
        match self {
            SectionContent::Masterpieces(items) | SectionContent::SimilarWorks(items) => items.len(),
            SectionContent::Timeline(eras) => eras.len(),
            SectionContent::StyleBranches(branches) => branches.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 縦スクロール探索の1セクション
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterfallSection {
    pub id: String,
    pub title: String,
    pub description: String,
    /// このセクションが有効になる進捗値
    pub scroll_trigger: f64,
    pub content: SectionContent,
}

/// 選択中の様式の探索データ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleExploration {
    pub style: ArtStyle,
    pub sections: Vec<WaterfallSection>,
}

impl StyleExploration {
    pub fn thresholds(&self) -> Result<SectionThresholds> {
        SectionThresholds::from_triggers(self.sections.iter().map(|s| s.scroll_trigger))
    }

    /// 進捗値 → 表示中のセクション番号
    pub fn current_section(&self, progress: f64) -> Result<usize> {
        let thresholds = self.thresholds()?;
        Ok(map_progress_to_index(progress, &thresholds))
    }

    pub fn section_at(&self, progress: f64) -> Result<Option<&WaterfallSection>> {
        let index = self.current_section(progress)?;
        Ok(self.sections.get(index))
    }
}

/// 様式の絞り込み条件
///
/// すべて省略可。省略された条件は常に一致。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleFilter {
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub region: Option<String>,
    /// いずれかを含めば一致（部分一致・大文字小文字無視）
    pub characteristics: Vec<String>,
    /// 名前・説明・特徴の部分一致
    pub search: Option<String>,
}

impl StyleFilter {
    pub fn matches(&self, style: &ArtStyle) -> bool {
        if self.start_year.is_some() || self.end_year.is_some() {
            let start = self.start_year.unwrap_or(0);
            let end = self.end_year.unwrap_or(LATEST_YEAR);
            if style.end_year < start || style.start_year > end {
                return false;
            }
        }

        if let Some(region) = &self.region {
            if &style.region != region {
                return false;
            }
        }

        if !self.characteristics.is_empty() {
            let hit = self.characteristics.iter().any(|wanted| {
                let wanted = wanted.to_lowercase();
                style
                    .characteristics
                    .iter()
                    .any(|c| c.to_lowercase().contains(&wanted))
            });
            if !hit {
                return false;
            }
        }

        if let Some(term) = self.search.as_deref().filter(|t| !t.is_empty()) {
            let term = term.to_lowercase();
            let found = style.name.to_lowercase().contains(&term)
                || style.description.to_lowercase().contains(&term)
                || style
                    .characteristics
                    .iter()
                    .any(|c| c.to_lowercase().contains(&term));
            if !found {
                return false;
            }
        }

        true
    }
}

/// 様式カタログ
#[derive(Debug, Clone)]
pub struct StyleCatalog {
    styles: Vec<ArtStyle>,
    timeline: Vec<TimelineEra>,
    branches: Vec<StyleBranch>,
}

impl Default for StyleCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl StyleCatalog {
    pub fn builtin() -> Self {
        Self {
            styles: builtin_styles(),
            timeline: builtin_timeline(),
            branches: builtin_branches(),
        }
    }

    pub fn styles(&self) -> &[ArtStyle] {
        &self.styles
    }

    pub fn timeline(&self) -> &[TimelineEra] {
        &self.timeline
    }

    pub fn find(&self, id: &str) -> Option<&ArtStyle> {
        self.styles.iter().find(|s| s.id == id)
    }

    pub fn filter(&self, filter: &StyleFilter) -> Vec<&ArtStyle> {
        self.styles.iter().filter(|s| filter.matches(s)).collect()
    }

    /// 地域の一覧（初出順）
    pub fn regions(&self) -> Vec<&str> {
        let mut regions: Vec<&str> = Vec::new();
        for style in &self.styles {
            if !regions.contains(&style.region.as_str()) {
                regions.push(&style.region);
            }
        }
        regions
    }

    /// 年表ノード → 様式
    ///
    /// 詳細のある様式があればそれを、なければ仮の様式を作る。
    pub fn style_for_era(&self, era: &TimelineEra) -> ArtStyle {
        if let Some(style) = era.style_ids.iter().find_map(|id| self.find(id)) {
            return style.clone();
        }

        let artist = era
            .representative_artists
            .first()
            .cloned()
            .unwrap_or_else(|| "作者不詳".to_string());

        ArtStyle {
            id: era.id.clone(),
            name: era.title.clone(),
            description: era.description.clone(),
            period: format!("{}年〜", era.year),
            start_year: era.year,
            end_year: era.year + ERA_SPAN_YEARS,
            region: "世界".to_string(),
            influence: era.significance.clone(),
            characteristics: vec![
                "歴史的様式".to_string(),
                "美術の発展".to_string(),
                "文化的影響".to_string(),
            ],
            representative_work: Artwork {
                id: format!("{}-work", era.id),
                url: format!("{}?w=600", PLACEHOLDER_IMAGE),
                title: format!("{}の代表作", era.title),
                artist,
                year: era.year.to_string(),
                style: era.title.clone(),
                description: format!("{}の特徴をよく示す作品", era.title),
                similarity: Some(1.0),
                style_labels: vec![era.title.clone(), "歴史美術".to_string()],
                source: Some("歴史資料".to_string()),
            },
            related_styles: Vec::new(),
            color: era.color.clone(),
        }
    }

    /// 様式の探索セクションを生成
    ///
    /// 詳細のある様式は4セクション、それ以外は代表作セクションのみ。
    pub fn generate_style_exploration(&self, style: &ArtStyle) -> StyleExploration {
        if !style.is_featured() {
            return StyleExploration {
                style: style.clone(),
                sections: vec![WaterfallSection {
                    id: "masterpiece".to_string(),
                    title: "代表作品".to_string(),
                    description: "この様式の代表作品（簡易版）".to_string(),
                    scroll_trigger: 0.1,
                    content: SectionContent::Masterpieces(vec![style.representative_work.clone()]),
                }],
            };
        }

        let similar: Vec<Artwork> = style
            .related_styles
            .iter()
            .filter_map(|id| self.find(id))
            .map(|s| s.representative_work.clone())
            .collect();

        let branches: Vec<StyleBranch> = self
            .branches
            .iter()
            .filter(|b| b.parent_style == style.id || style.related_styles.contains(&b.parent_style))
            .cloned()
            .collect();

        tracing::debug!(style = %style.id, similar = similar.len(), branches = branches.len(), "style exploration generated");

        StyleExploration {
            style: style.clone(),
            sections: vec![
                WaterfallSection {
                    id: "masterpiece".to_string(),
                    title: "代表作品".to_string(),
                    description: "この様式の古典的な代表作を探る".to_string(),
                    scroll_trigger: 0.1,
                    content: SectionContent::Masterpieces(masterpieces(style)),
                },
                WaterfallSection {
                    id: "similar".to_string(),
                    title: "類似作品".to_string(),
                    description: "関連する様式の作品".to_string(),
                    scroll_trigger: 0.3,
                    content: SectionContent::SimilarWorks(similar),
                },
                WaterfallSection {
                    id: "timeline".to_string(),
                    title: "時代の流れ".to_string(),
                    description: "前後の時代とのつながり".to_string(),
                    scroll_trigger: 0.55,
                    content: SectionContent::Timeline(self.neighbor_eras(style)),
                },
                WaterfallSection {
                    id: "branches".to_string(),
                    title: "派生と影響".to_string(),
                    description: "この様式から広がった流れ".to_string(),
                    scroll_trigger: 0.8,
                    content: SectionContent::StyleBranches(branches),
                },
            ],
        }
    }

    /// 様式に対応する時代と、その前後1時代
    fn neighbor_eras(&self, style: &ArtStyle) -> Vec<TimelineEra> {
        match self
            .timeline
            .iter()
            .position(|era| era.style_ids.contains(&style.id))
        {
            Some(i) => {
                let from = i.saturating_sub(1);
                let to = (i + 2).min(self.timeline.len());
                self.timeline[from..to].to_vec()
            }
            None => self
                .timeline
                .iter()
                .filter(|era| era.year >= style.start_year - 100 && era.year <= style.end_year + 100)
                .cloned()
                .collect(),
        }
    }
}

const PLACEHOLDER_IMAGE: &str = "https://images.unsplash.com/photo-1578662996442-48f60103fc96";

#[allow(clippy::too_many_arguments)]
fn work(id: &str, title: &str, artist: &str, year: &str, style: &str, source: &str, description: &str, labels: &[&str]) -> Artwork {
    Artwork {
        id: id.to_string(),
        url: format!("{}?w=600", PLACEHOLDER_IMAGE),
        title: title.to_string(),
        artist: artist.to_string(),
        year: year.to_string(),
        style: style.to_string(),
        description: description.to_string(),
        similarity: Some(1.0),
        style_labels: labels.iter().map(|l| l.to_string()).collect(),
        source: Some(source.to_string()),
    }
}

fn masterpieces(style: &ArtStyle) -> Vec<Artwork> {
    let mut works = vec![style.representative_work.clone()];
    match style.id.as_str() {
        "high-renaissance" => {
            works.push(work(
                "sistine-chapel", "システィーナ礼拝堂天井画", "ミケランジェロ", "1508-1512", &style.name,
                "システィーナ礼拝堂", "創世記の九場面を描いた大作。", &["盛期ルネサンス", "フレスコ画"],
            ));
            works.push(work(
                "school-of-athens", "アテネの学堂", "ラファエロ・サンティ", "1509-1511", &style.name,
                "ヴァチカン美術館", "古代ギリシャの哲学者たちの集い。", &["盛期ルネサンス", "線遠近法"],
            ));
        }
        "impressionism" => works.push(work(
            "water-lilies", "睡蓮", "クロード・モネ", "1906", &style.name,
            "オランジュリー美術館", "ジヴェルニーの庭の池を描いた連作。", &["印象派", "風景画"],
        )),
        "cubism" => works.push(work(
            "violin-and-candlestick", "ヴァイオリンと燭台", "ジョルジュ・ブラック", "1910", &style.name,
            "サンフランシスコ近代美術館", "分析的キュビスムの代表作。", &["キュビスム", "静物画"],
        )),
        _ => {}
    }
    works
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn builtin_styles() -> Vec<ArtStyle> {
    vec![
        ArtStyle {
            id: "high-renaissance".to_string(),
            name: "盛期ルネサンス".to_string(),
            description: "15〜16世紀イタリア美術の黄金期。調和と均衡、理想化された人物像を追求した。".to_string(),
            period: "15〜16世紀".to_string(),
            start_year: 1500,
            end_year: 1520,
            region: "イタリア".to_string(),
            influence: "古典的美意識の基準を確立し、数百年にわたり美術教育の基礎となった。".to_string(),
            characteristics: strings(&["調和と均衡", "理想化された人物", "スフマート", "線遠近法", "人体解剖学"]),
            representative_work: work(
                "last-supper", "最後の晩餐", "レオナルド・ダ・ヴィンチ", "1495-1498", "盛期ルネサンス",
                "サンタ・マリア・デッレ・グラツィエ修道院", "遠近法と人物の心理描写を革新した宗教画。",
                &["盛期ルネサンス", "宗教画", "遠近法"],
            ),
            related_styles: strings(&["impressionism"]),
            color: "#FFD700".to_string(),
        },
        ArtStyle {
            id: "impressionism".to_string(),
            name: "印象派".to_string(),
            description: "19世紀後半フランスの芸術運動。戸外の光の移ろいを素早い筆致で捉えた。".to_string(),
            period: "19世紀後半".to_string(),
            start_year: 1870,
            end_year: 1890,
            region: "フランス".to_string(),
            influence: "アトリエから戸外へ、歴史画から日常へと主題を移し、近代美術の出発点となった。".to_string(),
            characteristics: strings(&["戸外の光", "素早い筆致", "明るい色彩", "色彩分割", "日常生活"]),
            representative_work: work(
                "impression-sunrise", "印象・日の出", "クロード・モネ", "1872", "印象派",
                "マルモッタン・モネ美術館", "運動の名の由来となったル・アーヴル港の朝景。",
                &["印象派", "風景画", "港"],
            ),
            related_styles: strings(&["high-renaissance", "cubism"]),
            color: "#87CEEB".to_string(),
        },
        ArtStyle {
            id: "cubism".to_string(),
            name: "キュビスム".to_string(),
            description: "20世紀初頭にピカソとブラックが始めた運動。多視点と幾何学化で空間と形を再構成した。".to_string(),
            period: "20世紀初頭".to_string(),
            start_year: 1907,
            end_year: 1920,
            region: "フランス".to_string(),
            influence: "建築・デザイン・彫刻に波及し、抽象美術への道を開いた。".to_string(),
            characteristics: strings(&["多視点", "幾何学化", "空間の再構成", "コラージュ", "形態の分解"]),
            representative_work: work(
                "les-demoiselles", "アヴィニョンの娘たち", "パブロ・ピカソ", "1907", "キュビスム",
                "ニューヨーク近代美術館", "単一視点を打ち破ったキュビスムの出発点。",
                &["キュビスム", "人物画", "幾何学化"],
            ),
            related_styles: strings(&["impressionism", "contemporary-art"]),
            color: "#2E8B57".to_string(),
        },
        ArtStyle {
            id: "contemporary-art".to_string(),
            name: "現代アート".to_string(),
            description: "1980年代以降の多様な実践。インスタレーション・映像・デジタルなど媒体の境界を越える。".to_string(),
            period: "1980年代〜現在".to_string(),
            start_year: 1980,
            end_year: 2024,
            region: "世界".to_string(),
            influence: "美術と技術・社会・政治との結び付きを深め、美術の可能性を定義し直している。".to_string(),
            characteristics: strings(&["インスタレーション", "映像", "デジタルアート", "社会参加", "グローバル化"]),
            representative_work: work(
                "sunflower-seeds", "ひまわりの種", "艾未未", "2010", "現代アート",
                "テート・モダン", "一億粒の手作り陶製ひまわりの種によるインスタレーション。",
                &["現代アート", "インスタレーション", "社会批評"],
            ),
            related_styles: strings(&["cubism"]),
            color: "#FF4500".to_string(),
        },
    ]
}

#[allow(clippy::too_many_arguments)]
fn era(id: &str, year: i32, title: &str, description: &str, styles: &[&str], significance: &str, artists: &[&str], color: &str) -> TimelineEra {
    TimelineEra {
        id: id.to_string(),
        year,
        title: title.to_string(),
        description: description.to_string(),
        style_ids: strings(styles),
        significance: significance.to_string(),
        representative_artists: strings(artists),
        color: color.to_string(),
    }
}

fn builtin_timeline() -> Vec<TimelineEra> {
    vec![
        era("romanesque", 1000, "ロマネスク", "10〜12世紀ヨーロッパの宗教美術", &[], "ゴシック美術の基礎を築いた", &[], "#8B4513"),
        era("gothic", 1150, "ゴシック", "尖頭アーチとステンドグラスの時代", &[], "建築と美術の融合", &["無名の建築家たち"], "#4A90E2"),
        era("early-renaissance", 1400, "初期ルネサンス", "遠近法と人体表現の探究が始まる", &[], "科学的遠近法を確立", &["マザッチオ", "ボッティチェッリ"], "#D4AF37"),
        era("high-renaissance", 1500, "盛期ルネサンス", "ダ・ヴィンチ、ミケランジェロ、ラファエロの時代", &["high-renaissance"], "ルネサンス美術の頂点", &["レオナルド・ダ・ヴィンチ", "ミケランジェロ", "ラファエロ"], "#FFD700"),
        era("baroque", 1600, "バロック", "劇的な明暗と強い感情表現", &[], "宗教と芸術の結合", &["カラヴァッジョ", "ルーベンス", "レンブラント"], "#8B0000"),
        era("realism", 1840, "写実主義", "日常と社会を理想化せずに描く", &[], "印象派への道を開いた", &["クールベ", "ミレー"], "#696969"),
        era("impressionism", 1870, "印象派", "戸外の光と素早い筆致", &["impressionism"], "近代美術の出発点", &["モネ", "ルノワール", "ドガ"], "#87CEEB"),
        era("cubism", 1907, "キュビスム", "多視点による幾何学化", &["cubism"], "20世紀で最も重要な運動のひとつ", &["ピカソ", "ブラック"], "#2E8B57"),
        era("surrealism", 1924, "シュルレアリスム", "夢と無意識の探究", &[], "現代美術とデザインに影響", &["ダリ", "マグリット"], "#FF69B4"),
        era("contemporary-art", 1980, "現代アート", "媒体の境界を越える多様な実践", &["contemporary-art"], "美術の可能性を広げ続けている", &["艾未未", "バンクシー"], "#FF4500"),
    ]
}

fn builtin_branches() -> Vec<StyleBranch> {
    vec![
        StyleBranch {
            id: "renaissance-branches".to_string(),
            name: "ルネサンスの分岐".to_string(),
            description: "ルネサンス期のさまざまな表現形式".to_string(),
            parent_style: "high-renaissance".to_string(),
            influence: "後世の美術の基礎を築いた".to_string(),
            color: "#FFD700".to_string(),
        },
        StyleBranch {
            id: "modern-art-branches".to_string(),
            name: "近代美術の分岐".to_string(),
            description: "20世紀近代美術の諸流派".to_string(),
            parent_style: "cubism".to_string(),
            influence: "近代美術の革命を推し進めた".to_string(),
            color: "#2E8B57".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(styles: &[&ArtStyle]) -> Vec<String> {
        styles.iter().map(|s| s.id.clone()).collect()
    }

    #[test]
    fn test_builtin_styles_valid() {
        let catalog = StyleCatalog::builtin();
        assert_eq!(catalog.styles().len(), 4);
        assert!(catalog.styles().iter().all(|s| s.is_featured()));
        assert!(catalog
            .styles()
            .iter()
            .all(|s| s.representative_work.validate().is_ok()));
    }

    #[test]
    fn test_filter_year_overlap() {
        let catalog = StyleCatalog::builtin();
        let filter = StyleFilter {
            start_year: Some(1800),
            end_year: Some(1900),
            ..Default::default()
        };
        assert_eq!(ids(&catalog.filter(&filter)), vec!["impressionism"]);

        // 終端省略は上限年まで
        let open = StyleFilter {
            start_year: Some(1900),
            ..Default::default()
        };
        assert_eq!(ids(&catalog.filter(&open)), vec!["cubism", "contemporary-art"]);
    }

    #[test]
    fn test_filter_region() {
        let catalog = StyleCatalog::builtin();
        let filter = StyleFilter {
            region: Some("フランス".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&catalog.filter(&filter)), vec!["impressionism", "cubism"]);
    }

    #[test]
    fn test_filter_characteristics_any_match() {
        let catalog = StyleCatalog::builtin();
        let filter = StyleFilter {
            characteristics: vec!["幾何学".to_string(), "スフマート".to_string()],
            ..Default::default()
        };
        assert_eq!(ids(&catalog.filter(&filter)), vec!["high-renaissance", "cubism"]);
    }

    #[test]
    fn test_filter_search() {
        let catalog = StyleCatalog::builtin();
        let filter = StyleFilter {
            search: Some("印象".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&catalog.filter(&filter)), vec!["impressionism"]);

        let empty = StyleFilter {
            search: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(catalog.filter(&empty).len(), 4);
    }

    #[test]
    fn test_regions() {
        let catalog = StyleCatalog::builtin();
        assert_eq!(catalog.regions(), vec!["イタリア", "フランス", "世界"]);
    }

    #[test]
    fn test_featured_exploration_sections() {
        let catalog = StyleCatalog::builtin();
        let style = catalog.find("cubism").expect("cubismがない");
        let exploration = catalog.generate_style_exploration(style);
        assert_eq!(exploration.sections.len(), 4);

        assert_eq!(exploration.current_section(0.05).unwrap(), 0);
        assert_eq!(exploration.current_section(0.3).unwrap(), 1);
        assert_eq!(exploration.current_section(0.6).unwrap(), 2);
        assert_eq!(exploration.current_section(0.95).unwrap(), 3);

        match &exploration.sections[1].content {
            SectionContent::SimilarWorks(works) => {
                let ids: Vec<&str> = works.iter().map(|w| w.id.as_str()).collect();
                assert_eq!(ids, vec!["impression-sunrise", "sunflower-seeds"]);
            }
            other => panic!("想定外のセクション: {:?}", other),
        }
    }

    #[test]
    fn test_timeline_neighbors() {
        let catalog = StyleCatalog::builtin();
        let style = catalog.find("impressionism").unwrap();
        let exploration = catalog.generate_style_exploration(style);
        match &exploration.sections[2].content {
            SectionContent::Timeline(eras) => {
                let ids: Vec<&str> = eras.iter().map(|e| e.id.as_str()).collect();
                assert_eq!(ids, vec!["realism", "impressionism", "cubism"]);
            }
            other => panic!("想定外のセクション: {:?}", other),
        }
    }

    #[test]
    fn test_era_placeholder_style() {
        let catalog = StyleCatalog::builtin();
        let romanesque = &catalog.timeline()[0];
        let style = catalog.style_for_era(romanesque);
        assert_eq!(style.id, "romanesque");
        assert_eq!(style.start_year, 1000);
        assert_eq!(style.end_year, 1050);
        assert_eq!(style.representative_work.artist, "作者不詳");
        assert!(style.representative_work.validate().is_ok());

        let exploration = catalog.generate_style_exploration(&style);
        assert_eq!(exploration.sections.len(), 1);
        assert_eq!(exploration.current_section(0.0).unwrap(), 0);
    }

    #[test]
    fn test_era_with_style_returns_catalog_entry() {
        let catalog = StyleCatalog::builtin();
        let era = catalog
            .timeline()
            .iter()
            .find(|e| e.id == "cubism")
            .unwrap();
        assert_eq!(&catalog.style_for_era(era), catalog.find("cubism").unwrap());
    }

    #[test]
    fn test_section_content_serialize() {
        let content = SectionContent::StyleBranches(vec![]);
        let json = serde_json::to_string(&content).unwrap();
        assert_eq!(json, r#"{"kind":"styleBranches","items":[]}"#);
    }
}
