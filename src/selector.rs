//! 対話式の作品選択・探索操作
//!
//! ## 操作
//! - 数字: スクロール位置（0〜100%）
//! - s / t / o: 類似度・スタイル・一覧へ
//! - f <ラベル>: 一覧をラベルで絞り込み（f のみで解除）
//! - a [ノードID]: 表示中の作品を探索ツリーに追加（省略時は直前に追加したノードの下）、m: ツリー表示
//! - b: 分岐入口へ戻る、r: 最初から、q: 終了

use crate::error::{ExplorerError, Result};
use art_explorer_common::overview::{OverviewFilter, SeedCategory};
use art_explorer_common::{Artwork, Branch, ExploreMode};
use dialoguer::{Input, Select};

/// 探索中の操作
#[derive(Debug, Clone, PartialEq)]
pub enum ExploreAction {
    /// 分岐を選ぶ（分岐入口から）
    Branch(Branch),
    /// モードを切り替える
    Mode(ExploreMode),
    /// スクロール位置（0.0〜1.0）
    Scroll(f64),
    /// 一覧の絞り込み
    Filter(OverviewFilter),
    /// 表示中の作品を探索ツリーに追加（親ノードID）
    AddToTree(Option<String>),
    ShowTree,
    /// 別の作品を選び直す
    Reset,
    Quit,
    Unknown(String),
}

/// カテゴリで絞り込んだシード作品
pub fn seed_choices(seeds: &[Artwork], category: SeedCategory) -> Vec<&Artwork> {
    category.filter(seeds)
}

/// 一覧表示用の1行
pub fn format_seed(artwork: &Artwork) -> String {
    let year = if artwork.year.is_empty() { "-" } else { artwork.year.as_str() };
    format!("{} / {} ({}) [{}]", artwork.title, artwork.artist, year, artwork.style_labels.join(", "))
}

/// 対話式でシード作品を選択
pub fn select_seed_interactive(seeds: &[Artwork], category: SeedCategory) -> Result<Option<Artwork>> {
    let choices = seed_choices(seeds, category);
    if choices.is_empty() {
        println!("⚠ 「{}」に該当する作品がありません", category.label());
        return Ok(None);
    }

    let items: Vec<String> = choices.iter().map(|a| format_seed(a)).collect();
    println!("\n🖼  作品を選択してください ({}: {}件)\n", category.label(), choices.len());

    let selection = Select::new()
        .items(&items)
        .default(0)
        .interact_opt()
        .map_err(|e| ExplorerError::Prompt(e.to_string()))?;

    Ok(selection.map(|i| choices[i].clone()))
}

/// 入力文字列を操作に変換
pub fn parse_action(input: &str, mode: ExploreMode) -> ExploreAction {
    let trimmed = input.trim();

    match trimmed {
        "s" => branch_or_mode(Branch::Similarity, mode),
        "t" => branch_or_mode(Branch::Style, mode),
        "o" => ExploreAction::Mode(ExploreMode::Overview),
        "b" => ExploreAction::Mode(ExploreMode::Selection),
        "r" => ExploreAction::Reset,
        "q" | "Q" => ExploreAction::Quit,
        "f" => ExploreAction::Filter(OverviewFilter::All),
        "a" => ExploreAction::AddToTree(None),
        "m" => ExploreAction::ShowTree,
        _ if trimmed.starts_with("a ") => ExploreAction::AddToTree(Some(trimmed[2..].trim().to_string())),
        _ if trimmed.starts_with("f ") => match trimmed[2..].parse::<OverviewFilter>() {
            Ok(filter) => ExploreAction::Filter(filter),
            Err(_) => ExploreAction::Filter(OverviewFilter::All),
        },
        _ => match trimmed.trim_end_matches('%').parse::<f64>() {
            Ok(percent) if (0.0..=100.0).contains(&percent) => ExploreAction::Scroll(percent / 100.0),
            _ => ExploreAction::Unknown(trimmed.to_string()),
        },
    }
}

fn branch_or_mode(branch: Branch, mode: ExploreMode) -> ExploreAction {
    if mode == ExploreMode::Selection {
        ExploreAction::Branch(branch)
    } else {
        ExploreAction::Mode(branch.into())
    }
}

/// 次の操作を読み込む
pub fn read_action(mode: ExploreMode) -> Result<ExploreAction> {
    let prompt = match mode {
        ExploreMode::Selection => "操作 (s:類似度 t:スタイル o:一覧 r:選び直す q:終了)",
        ExploreMode::Overview => "操作 (f <ラベル>:絞り込み s/t:切替 b:分岐入口 r:選び直す q:終了)",
        _ => "スクロール位置% (s/t/o:切替 a:ツリーに追加 m:ツリー b:分岐入口 r:選び直す q:終了)",
    };

    let input: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| ExplorerError::Prompt(e.to_string()))?;

    Ok(parse_action(&input, mode))
}

#[cfg(test)]
mod tests {
    use super::*;
    use art_explorer_common::Repository;

    #[test]
    fn test_seed_choices_by_category() {
        let repo = Repository::builtin();
        let seeds = repo.list_seed_artworks();

        assert_eq!(seed_choices(seeds, SeedCategory::All).len(), seeds.len());
        let renaissance = seed_choices(seeds, SeedCategory::Renaissance);
        assert!(renaissance.iter().any(|a| a.id == "mona-lisa"));
        assert!(renaissance.iter().all(|a| a.id != "great-wave"));
    }

    #[test]
    fn test_format_seed() {
        let repo = Repository::builtin();
        let line = format_seed(repo.find_seed("great-wave").unwrap());
        assert_eq!(line, "神奈川沖浪裏 / 葛飾北斎 (1831) [浮世絵, 日本美術, 風景画]");
    }

    #[test]
    fn test_parse_action_branch_from_selection() {
        assert_eq!(parse_action("s", ExploreMode::Selection), ExploreAction::Branch(Branch::Similarity));
        assert_eq!(parse_action("t", ExploreMode::Selection), ExploreAction::Branch(Branch::Style));
        assert_eq!(parse_action("s", ExploreMode::Style), ExploreAction::Mode(ExploreMode::Similarity));
    }

    #[test]
    fn test_parse_action_scroll() {
        assert_eq!(parse_action("50", ExploreMode::Similarity), ExploreAction::Scroll(0.5));
        assert_eq!(parse_action(" 100% ", ExploreMode::Style), ExploreAction::Scroll(1.0));
        assert_eq!(parse_action("120", ExploreMode::Style), ExploreAction::Unknown("120".into()));
    }

    #[test]
    fn test_parse_action_misc() {
        assert_eq!(parse_action("b", ExploreMode::Overview), ExploreAction::Mode(ExploreMode::Selection));
        assert_eq!(parse_action("r", ExploreMode::Overview), ExploreAction::Reset);
        assert_eq!(parse_action("Q", ExploreMode::Selection), ExploreAction::Quit);
        assert_eq!(parse_action("", ExploreMode::Selection), ExploreAction::Unknown(String::new()));
    }

    #[test]
    fn test_parse_action_filter() {
        assert_eq!(
            parse_action("f 肖像画", ExploreMode::Overview),
            ExploreAction::Filter(OverviewFilter::Label("肖像画".into()))
        );
        assert_eq!(parse_action("f", ExploreMode::Overview), ExploreAction::Filter(OverviewFilter::All));
        assert_eq!(parse_action("f all", ExploreMode::Overview), ExploreAction::Filter(OverviewFilter::All));
        assert_eq!(parse_action("f   ", ExploreMode::Overview), ExploreAction::Filter(OverviewFilter::All));
    }

    #[test]
    fn test_parse_action_tree() {
        assert_eq!(parse_action("a", ExploreMode::Similarity), ExploreAction::AddToTree(None));
        assert_eq!(
            parse_action("a node-2", ExploreMode::Style),
            ExploreAction::AddToTree(Some("node-2".into()))
        );
        assert_eq!(parse_action("m", ExploreMode::Overview), ExploreAction::ShowTree);
    }
}
