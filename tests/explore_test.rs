//! 探索の統合テスト
//!
//! 選択 → 分岐 → スクロール → リセット の一連の流れを検証

use art_explorer::explorer::{Explorer, SimilaritySource};
use art_explorer::export::{self, ExportFormat};
use art_explorer::{catalog, simulate, upload};
use art_explorer_common::{
    Branch, ExplorationController, ExplorationSession, ExplorationTree, ExploreError, ExploreMode, LatencyModel,
    Repository, ScrollTracker, SelectionOutcome,
};
use image::{Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use tempfile::tempdir;

fn builtin_explorer(latency_ms: u64) -> Explorer {
    Explorer::new(
        ExplorationController::new(Repository::builtin()),
        LatencyModel::from_millis(latency_ms),
        SimilaritySource::Repository,
    )
}

/// モナ・リザを選び、類似度分岐を半分までスクロール
#[tokio::test(start_paused = true)]
async fn test_mona_lisa_scenario() {
    let explorer = builtin_explorer(800);
    let controller = explorer.controller();

    let outcome = explorer.select_seed("mona-lisa").await.expect("選択失敗");
    assert_eq!(outcome, SelectionOutcome::Applied);
    assert_eq!(controller.borrow().mode(), ExploreMode::Selection);

    controller.borrow_mut().choose_branch(Branch::Similarity).unwrap();
    assert_eq!(controller.borrow().item_count(ExploreMode::Similarity), 5);

    let mut session = ExplorationSession::new(explorer.controller(), ScrollTracker::new());
    session.activate();
    session.scroll(simulate::metrics_for(0.5, 5, 800.0));
    assert_eq!(controller.borrow().current_index(), 2);

    // 同じ進捗を繰り返しても変わらない
    session.scroll(simulate::metrics_for(0.5, 5, 800.0));
    assert_eq!(controller.borrow().current_index(), 2);

    session.scroll(simulate::metrics_for(1.0, 5, 800.0));
    assert_eq!(controller.borrow().current_index(), 4);
}

/// 結果なしで分岐を選ぶと遷移エラー、状態は変わらない
#[tokio::test(start_paused = true)]
async fn test_branch_without_bundle() {
    let explorer = builtin_explorer(0);
    let controller = explorer.controller();

    let before = controller.borrow().state().clone();
    let result = controller.borrow_mut().choose_branch(Branch::Similarity);

    assert!(matches!(result, Err(ExploreError::InvalidTransition { .. })));
    assert_eq!(controller.borrow().state(), &before);
}

/// 2つの選択が重なったら後の選択が残る（順序によらない）
#[tokio::test(start_paused = true)]
async fn test_overlapping_selections_latest_wins() {
    let explorer = builtin_explorer(800);

    let first = explorer.select_seed("mona-lisa");
    let second = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        explorer.select_seed("great-wave").await
    };
    let (second, first) = tokio::join!(second, first);

    assert_eq!(first.unwrap(), SelectionOutcome::Discarded);
    assert_eq!(second.unwrap(), SelectionOutcome::Applied);
    assert_eq!(explorer.controller().borrow().bundle().unwrap().root.id, "great-wave");
}

/// リセットで初期状態に戻る
#[tokio::test(start_paused = true)]
async fn test_reset_scenario() {
    let explorer = builtin_explorer(0);
    let controller = explorer.controller();

    explorer.select_seed("starry-night").await.unwrap();
    controller.borrow_mut().choose_branch(Branch::Style).unwrap();
    controller.borrow_mut().set_mode(ExploreMode::Overview).unwrap();

    controller.borrow_mut().reset();
    let controller = controller.borrow();
    assert_eq!(controller.mode(), ExploreMode::Selection);
    assert!(controller.bundle().is_none());
    assert_eq!(controller.current_index(), 0);
}

/// アップロード画像から模擬データで探索し、JSON/Excelに出力
#[tokio::test(start_paused = true)]
async fn test_upload_mock_and_export() {
    let dir = tempdir().expect("一時ディレクトリ作成失敗");
    let image_path = dir.path().join("sketch.png");
    RgbImage::from_pixel(64, 48, Rgb([10, 20, 30]))
        .save(&image_path)
        .expect("画像保存失敗");

    let upload = upload::load_upload(&image_path).expect("読み込み失敗");
    let explorer = Explorer::new(
        ExplorationController::default(),
        LatencyModel::from_millis(800),
        SimilaritySource::Mock { threshold: 0.0 },
    )
    .with_rng(StdRng::seed_from_u64(42));

    explorer.select_upload(&upload).await.unwrap();

    let controller = explorer.controller();
    let controller = controller.borrow();
    let bundle = controller.bundle().unwrap();
    assert_eq!(bundle.root.id, upload.handle.id);
    assert_eq!(bundle.root.title, "sketch");
    assert_eq!(bundle.similarity_results.len(), 12);
    assert!(bundle.validate().is_ok());

    let out = dir.path().join("out");
    let written = export::export_bundle(bundle, ExportFormat::Both, &out, "sketch").expect("出力失敗");
    assert_eq!(written.len(), 2);
    assert!(written.iter().all(|p| p.exists()));
}

/// ローカルカタログのシードで探索
#[tokio::test(start_paused = true)]
async fn test_catalog_seed_selection() {
    let dir = tempdir().unwrap();
    let genre = dir.path().join("impressionism");
    std::fs::create_dir_all(&genre).unwrap();
    std::fs::write(genre.join("claude-monet_impression-sunrise-1872.jpg"), b"sunrise").unwrap();
    std::fs::write(genre.join("berthe-morisot_the-cradle-1872.jpg"), b"cradle").unwrap();

    let repo = catalog::load_repository(dir.path()).expect("カタログ読み込み失敗");
    let seed = repo
        .list_seed_artworks()
        .iter()
        .find(|a| a.title == "Impression Sunrise")
        .cloned()
        .unwrap();

    let explorer = Explorer::new(
        ExplorationController::new(repo),
        LatencyModel::None,
        SimilaritySource::Repository,
    );
    assert_eq!(explorer.select_seed(&seed.id).await.unwrap(), SelectionOutcome::Applied);
    assert_eq!(explorer.controller().borrow().bundle().unwrap().root, seed);
}

/// たどった作品を探索ツリーに積む
#[tokio::test(start_paused = true)]
async fn test_tree_from_scrolled_artworks() {
    let explorer = builtin_explorer(0);
    let controller = explorer.controller();
    explorer.select_seed("great-wave").await.unwrap();
    controller.borrow_mut().choose_branch(Branch::Similarity).unwrap();

    let mut tree = ExplorationTree::new(controller.borrow().bundle().unwrap().root.clone());
    let count = controller.borrow().item_count(ExploreMode::Similarity);

    let mut session = ExplorationSession::new(explorer.controller(), ScrollTracker::new());
    session.activate();

    let first = controller.borrow().current_artwork().cloned().unwrap();
    let first_node = tree.add_child(ExplorationTree::ROOT_ID, first.clone()).unwrap();

    session.scroll(simulate::metrics_for(1.0, count, 800.0));
    let last = controller.borrow().current_artwork().cloned().unwrap();
    let last_node = tree.add_child(&first_node, last.clone()).unwrap();

    assert_eq!(tree.root().artwork.id, "great-wave");
    assert_eq!(tree.find(&first_node).unwrap().artwork, first);
    assert_eq!(tree.find(&last_node).unwrap().artwork, last);
    assert_ne!(first.id, last.id);
    assert!(matches!(
        tree.add_child("node-99", last),
        Err(ExploreError::UnknownNode(_))
    ));
}
