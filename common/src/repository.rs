//! 作品リポジトリ
//!
//! 固定のシード作品一覧と、ルート作品から探索結果を決定的に生成する関数群。
//! 実際の類似度計算は外部サービスの担当で、ここでの結果はデモ用の模擬データ。
//!
//! I/O・時刻・乱数には依存しない（同じ入力なら常に同じ結果）。

use crate::error::{ExploreError, Result};
use crate::types::{Artwork, ResultBundle, SelectionInput, StyleGroup, UploadHandle};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

/// 類似度分岐に並べる件数
pub const SIMILAR_LIMIT: usize = 5;

/// スタイルグループあたりの最大件数
pub const GROUP_LIMIT: usize = 4;

/// 類似度の上限（ルート自身の1.0と区別する）
const MAX_SCORE: f64 = 0.99;

/// アップロード作品に付けるラベル
pub const UPLOAD_LABEL: &str = "アップロード";

/// 模擬レイテンシ
///
/// リポジトリ自体は同期・即時。待ち時間は呼び出し側が注入する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum LatencyModel {
    #[default]
    None,
    Fixed { millis: u64 },
}

impl LatencyModel {
    /// 0ミリ秒はNone扱い
    pub fn from_millis(millis: u64) -> Self {
        if millis == 0 {
            LatencyModel::None
        } else {
            LatencyModel::Fixed { millis }
        }
    }

    pub fn duration(&self) -> Duration {
        match self {
            LatencyModel::None => Duration::ZERO,
            LatencyModel::Fixed { millis } => Duration::from_millis(*millis),
        }
    }

    pub fn is_none(&self) -> bool {
        self.duration().is_zero()
    }
}

/// 作品リポジトリ
#[derive(Debug, Clone)]
pub struct Repository {
    seeds: Vec<Artwork>,
    pool: Vec<Artwork>,
}

impl Default for Repository {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Repository {
    /// 組み込みの名画6点をシードとするリポジトリ
    pub fn builtin() -> Self {
        Self {
            seeds: builtin_seeds(),
            pool: reference_pool(),
        }
    }

    /// 任意のシード一覧から作成（ローカルカタログ用）
    ///
    /// 空・ID重複・必須項目欠落はエラー。
    pub fn with_seeds(seeds: Vec<Artwork>) -> Result<Self> {
        if seeds.is_empty() {
            return Err(ExploreError::Validation("seed list is empty".into()));
        }

        let mut seen = HashSet::new();
        for seed in &seeds {
            seed.validate()?;
            if !seen.insert(seed.id.as_str()) {
                return Err(ExploreError::Validation(format!(
                    "duplicate seed id: {}",
                    seed.id
                )));
            }
        }

        Ok(Self {
            seeds,
            pool: reference_pool(),
        })
    }

    /// シード作品一覧（表示順）
    pub fn list_seed_artworks(&self) -> &[Artwork] {
        &self.seeds
    }

    /// IDまたはURLでシード作品を検索
    pub fn find_seed(&self, key: &str) -> Option<&Artwork> {
        self.seeds
            .iter()
            .find(|a| a.id == key)
            .or_else(|| self.seeds.iter().find(|a| a.url == key))
    }

    /// 入力からルート作品を決定
    pub fn resolve(&self, input: &SelectionInput) -> Result<Artwork> {
        match input {
            SelectionInput::Seed(key) => self
                .find_seed(key)
                .cloned()
                .ok_or_else(|| ExploreError::UnknownArtwork(key.clone())),
            SelectionInput::Upload(handle) => Ok(placeholder_for_upload(handle)),
        }
    }

    /// ルート作品から探索結果を生成（全域関数）
    pub fn build_result_bundle(&self, root: &Artwork) -> ResultBundle {
        let ranked = self.rank_candidates(root);
        let similar: Vec<Artwork> = ranked.iter().take(SIMILAR_LIMIT).cloned().collect();
        let groups = build_style_groups(root, &ranked);

        tracing::debug!(
            root = %root.id,
            similar = similar.len(),
            groups = groups.len(),
            "built mock result bundle"
        );

        assemble_bundle(root, similar, groups)
    }

    /// 類似度分岐を外部結果で差し替えた探索結果
    ///
    /// スタイル分岐は模擬データのまま。類似度のない作品は除外し、降順に並べ直す。
    pub fn build_with_similar(&self, root: &Artwork, similar: Vec<Artwork>) -> ResultBundle {
        let mut similar: Vec<Artwork> = similar
            .into_iter()
            .filter(|a| a.similarity.is_some())
            .collect();
        sort_by_similarity(&mut similar);

        let ranked = self.rank_candidates(root);
        let groups = build_style_groups(root, &ranked);

        assemble_bundle(root, similar, groups)
    }

    /// ルート以外の候補をスコア付きで降順に並べる（同点はID順）
    fn rank_candidates(&self, root: &Artwork) -> Vec<Artwork> {
        let mut seen = HashSet::new();
        seen.insert(root.id.as_str());

        let mut ranked: Vec<Artwork> = self
            .pool
            .iter()
            .chain(self.seeds.iter())
            .filter(|c| seen.insert(c.id.as_str()))
            .map(|c| c.with_similarity(score(root, c)))
            .collect();

        sort_by_similarity(&mut ranked);
        ranked
    }
}

/// 類似度の降順、同点はID昇順
fn sort_by_similarity(artworks: &mut [Artwork]) {
    artworks.sort_by(|a, b| {
        let sa = a.similarity.unwrap_or(0.0);
        let sb = b.similarity.unwrap_or(0.0);
        sb.total_cmp(&sa).then_with(|| a.id.cmp(&b.id))
    });
}

/// 模擬類似度: ラベルのJaccard係数 + 同一作家ボーナス
fn score(root: &Artwork, candidate: &Artwork) -> f64 {
    let a: HashSet<String> = root.style_labels.iter().map(|l| l.to_lowercase()).collect();
    let b: HashSet<String> = candidate
        .style_labels
        .iter()
        .map(|l| l.to_lowercase())
        .collect();

    let union = a.union(&b).count();
    let jaccard = if union == 0 {
        0.0
    } else {
        a.intersection(&b).count() as f64 / union as f64
    };

    let bonus = if root.artist.trim() == candidate.artist.trim() {
        0.04
    } else {
        0.0
    };

    let raw = (0.5 + 0.45 * jaccard + bonus).min(MAX_SCORE);
    (raw * 100.0).round() / 100.0
}

fn build_style_groups(root: &Artwork, ranked: &[Artwork]) -> Vec<StyleGroup> {
    let mut seen = HashSet::new();
    root.style_labels
        .iter()
        .filter(|label| seen.insert(label.to_lowercase()))
        .filter_map(|label| {
            let artworks: Vec<Artwork> = ranked
                .iter()
                .filter(|c| c.has_label(label))
                .take(GROUP_LIMIT)
                .cloned()
                .collect();

            if artworks.is_empty() {
                return None;
            }

            Some(StyleGroup {
                style_name: label.clone(),
                description: style_description(label),
                artworks,
            })
        })
        .collect()
}

fn assemble_bundle(root: &Artwork, similar: Vec<Artwork>, groups: Vec<StyleGroup>) -> ResultBundle {
    let overview = similar
        .iter()
        .chain(groups.iter().flat_map(|g| g.artworks.iter()))
        .cloned()
        .collect();

    ResultBundle {
        root: root.clone(),
        similarity_title: "類似度で探す".to_string(),
        similarity_description: format!(
            "「{}」の視覚的特徴をもとに見つかった類似作品",
            root.title
        ),
        similarity_results: similar,
        style_title: "スタイルで探す".to_string(),
        style_description: format!("「{}」に関連する美術様式と流派", root.title),
        style_groups: groups,
        overview,
    }
}

/// アップロード画像の仮作品
pub fn placeholder_for_upload(handle: &UploadHandle) -> Artwork {
    let title = handle
        .file_name
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(&handle.file_name)
        .to_string();

    Artwork {
        id: handle.id.clone(),
        url: handle.preview_url.clone(),
        title: if title.trim().is_empty() { "アップロード画像".to_string() } else { title },
        artist: "不明".to_string(),
        year: if handle.captured.is_empty() { "不明".to_string() } else { handle.captured.clone() },
        style: UPLOAD_LABEL.to_string(),
        description: "アップロードされた画像".to_string(),
        similarity: Some(1.0),
        style_labels: vec![UPLOAD_LABEL.to_string()],
        source: None,
    }
}

fn style_description(label: &str) -> String {
    let known = match label {
        "ルネサンス" => "14〜17世紀ヨーロッパの芸術復興運動",
        "肖像画" => "人物の容貌と性格を描き出す表現形式",
        "古典主義" => "調和・均衡・理想美を追求する様式",
        "写実主義" => "対象をありのままに描く態度",
        "ポスト印象派" => "印象派を継ぎつつ構成と感情表現を重んじた潮流",
        "表現主義" => "内面の感情を強い色彩と形態で表す運動",
        "風景画" => "自然や都市の眺めを主題とする絵画",
        "浮世絵" => "江戸時代に栄えた木版画を中心とする風俗画",
        "日本美術" => "日本で育まれた絵画・工芸の伝統",
        "バロック" => "劇的な明暗と動きを特徴とする17世紀の様式",
        "象徴主義" => "観念や夢を象徴的なイメージで描く19世紀末の運動",
        "神話画" => "神話や伝説の場面を描く主題",
        _ => "",
    };

    if known.is_empty() {
        format!("「{}」に関連する作品", label)
    } else {
        known.to_string()
    }
}

#[allow(clippy::too_many_arguments)]
fn artwork(
    id: &str,
    title: &str,
    artist: &str,
    year: &str,
    style: &str,
    url: &str,
    source: &str,
    description: &str,
    labels: &[&str],
) -> Artwork {
    Artwork {
        id: id.to_string(),
        url: url.to_string(),
        title: title.to_string(),
        artist: artist.to_string(),
        year: year.to_string(),
        style: style.to_string(),
        description: description.to_string(),
        similarity: None,
        style_labels: labels.iter().map(|l| l.to_string()).collect(),
        source: Some(source.to_string()),
    }
}

const IMG_A: &str = "https://images.unsplash.com/photo-1578662996442-48f60103fc96";
const IMG_B: &str = "https://images.unsplash.com/photo-1578321272176-b7bbc0679853";
const IMG_C: &str = "https://images.unsplash.com/photo-1578848151706-206b516e2592";

/// 組み込みシード作品
pub fn builtin_seeds() -> Vec<Artwork> {
    let seed = |mut a: Artwork| {
        a.similarity = Some(1.0);
        a
    };

    vec![
        seed(artwork(
            "mona-lisa", "モナ・リザ", "レオナルド・ダ・ヴィンチ", "1503-1519", "ルネサンス",
            &format!("{}?w=400", IMG_A), "ルーヴル美術館",
            "神秘的な微笑みで知られる、世界で最も有名な肖像画のひとつ。",
            &["ルネサンス", "肖像画", "写実主義"],
        )),
        seed(artwork(
            "starry-night", "星月夜", "フィンセント・ファン・ゴッホ", "1889", "ポスト印象派",
            &format!("{}?w=400", IMG_B), "ニューヨーク近代美術館",
            "療養所の窓から見た夜空を描いたゴッホの代表作。",
            &["ポスト印象派", "表現主義", "風景画"],
        )),
        seed(artwork(
            "great-wave", "神奈川沖浪裏", "葛飾北斎", "1831", "浮世絵",
            &format!("{}?w=400", IMG_A), "東京国立博物館",
            "富嶽三十六景の一図。江戸時代を代表する浮世絵。",
            &["浮世絵", "日本美術", "風景画"],
        )),
        seed(artwork(
            "girl-with-pearl", "真珠の耳飾りの少女", "ヨハネス・フェルメール", "1665", "バロック",
            &format!("{}?w=400", IMG_C), "マウリッツハイス美術館",
            "オランダ黄金時代の傑作。",
            &["バロック", "肖像画", "オランダ黄金時代"],
        )),
        seed(artwork(
            "scream", "叫び", "エドヴァルド・ムンク", "1893", "表現主義",
            &format!("{}?w=400", IMG_B), "ノルウェー国立美術館",
            "表現主義を代表する作品。",
            &["表現主義", "象徴主義", "モダニズム"],
        )),
        seed(artwork(
            "birth-of-venus", "ヴィーナスの誕生", "サンドロ・ボッティチェッリ", "1484-1486", "ルネサンス",
            &format!("{}?w=400", IMG_C), "ウフィツィ美術館",
            "ルネサンス期の古典的名作。",
            &["ルネサンス", "神話画", "古典主義"],
        )),
    ]
}

/// 類似候補の参照プール
fn reference_pool() -> Vec<Artwork> {
    vec![
        artwork(
            "similar-1", "自画像", "レオナルド・ダ・ヴィンチ", "1512", "ルネサンス",
            &format!("{}?w=300", IMG_A), "トリノ王立図書館", "晩年の自画像とされる素描。",
            &["ルネサンス", "肖像画", "素描"],
        ),
        artwork(
            "similar-2", "最後の晩餐", "レオナルド・ダ・ヴィンチ", "1495-1498", "ルネサンス",
            &format!("{}?w=300", IMG_C), "サンタ・マリア・デッレ・グラツィエ修道院",
            "修道院食堂の壁画。", &["ルネサンス", "宗教画", "壁画"],
        ),
        artwork(
            "similar-3", "白貂を抱く貴婦人", "レオナルド・ダ・ヴィンチ", "1489-1491", "ルネサンス",
            &format!("{}?w=300", IMG_B), "チャルトリスキ美術館", "肖像画の傑作。",
            &["ルネサンス", "肖像画", "写実主義"],
        ),
        artwork(
            "similar-4", "自画像", "ラファエロ・サンティ", "1506", "ルネサンス",
            &format!("{}?w=300", IMG_A), "ウフィツィ美術館", "ルネサンス三大巨匠の一人の自画像。",
            &["ルネサンス", "肖像画", "写実主義"],
        ),
        artwork(
            "similar-5", "黄金の兜の男", "レンブラント派", "1635", "バロック",
            &format!("{}?w=300", IMG_C), "ベルリン絵画館", "レンブラント工房の肖像画。",
            &["バロック", "肖像画", "写実主義"],
        ),
        artwork(
            "renaissance-1", "アテネの学堂", "ラファエロ・サンティ", "1509-1511", "ルネサンス",
            &format!("{}?w=300", IMG_A), "ヴァチカン美術館", "ラファエロの代表作。",
            &["ルネサンス", "壁画", "古典主義"],
        ),
        artwork(
            "renaissance-2", "アダムの創造", "ミケランジェロ", "1508-1512", "ルネサンス",
            &format!("{}?w=300", IMG_C), "システィーナ礼拝堂", "礼拝堂天井画の一場面。",
            &["ルネサンス", "宗教画", "壁画"],
        ),
        artwork(
            "portrait-1", "アルノルフィーニ夫妻像", "ヤン・ファン・エイク", "1434", "北方ルネサンス",
            &format!("{}?w=300", IMG_B), "ロンドン・ナショナル・ギャラリー", "北方ルネサンスの傑作。",
            &["北方ルネサンス", "肖像画", "油彩"],
        ),
        artwork(
            "portrait-2", "夜警", "レンブラント・ファン・レイン", "1642", "バロック",
            &format!("{}?w=300", IMG_A), "アムステルダム国立美術館", "集団肖像画の傑作。",
            &["バロック", "集団肖像画", "明暗法"],
        ),
        artwork(
            "classical-1", "グランド・オダリスク", "ドミニク・アングル", "1814", "新古典主義",
            &format!("{}?w=300", IMG_C), "ルーヴル美術館", "アングルのオリエンタリズム作品。",
            &["新古典主義", "古典主義", "裸体画"],
        ),
        artwork(
            "post-impressionism-1", "ひまわり", "フィンセント・ファン・ゴッホ", "1888", "ポスト印象派",
            &format!("{}?w=300", IMG_B), "ロンドン・ナショナル・ギャラリー", "連作「ひまわり」の一点。",
            &["ポスト印象派", "静物画", "表現主義"],
        ),
        artwork(
            "post-impressionism-2", "夜のカフェテラス", "フィンセント・ファン・ゴッホ", "1888", "ポスト印象派",
            &format!("{}?w=300", IMG_A), "クレラー・ミュラー美術館", "アルルの夜景。",
            &["ポスト印象派", "風景画"],
        ),
        artwork(
            "ukiyoe-1", "凱風快晴", "葛飾北斎", "1831", "浮世絵",
            &format!("{}?w=300", IMG_C), "東京国立博物館", "通称「赤富士」。",
            &["浮世絵", "日本美術", "風景画"],
        ),
        artwork(
            "ukiyoe-2", "東海道五十三次 日本橋", "歌川広重", "1833", "浮世絵",
            &format!("{}?w=300", IMG_B), "東京国立博物館", "保永堂版の第一図。",
            &["浮世絵", "風景画"],
        ),
        artwork(
            "symbolism-1", "接吻", "グスタフ・クリムト", "1907-1908", "象徴主義",
            &format!("{}?w=300", IMG_A), "オーストリア・ギャラリー", "黄金様式の代表作。",
            &["象徴主義", "モダニズム"],
        ),
        artwork(
            "expressionism-1", "不安", "エドヴァルド・ムンク", "1894", "表現主義",
            &format!("{}?w=300", IMG_C), "ムンク美術館", "「叫び」と同じフィヨルドを背景にした作品。",
            &["表現主義", "象徴主義"],
        ),
    ]
}
