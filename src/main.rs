use anyhow::Context;
use art_explorer::explorer::{Explorer, SimilaritySource};
use art_explorer::upload::{self, UploadedImage};
use art_explorer::{catalog, cli, config, export, selector, similarity, simulate};
use art_explorer_common::overview::{label_counts, OverviewFilter, SeedCategory};
use art_explorer_common::{
    Branch, ExplorationController, ExplorationSession, ExplorationTree, ExploreMode, LatencyModel, Repository,
    ScrollTracker, SelectionOutcome, StyleCatalog, StyleFilter,
};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use indicatif::{ProgressBar, ProgressStyle};
use selector::ExploreAction;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 対話画面の仮想的な高さ（px）
const VIEWPORT: f64 = 800.0;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load().context("設定の読み込みに失敗しました")?;

    match cli.command {
        Commands::Seeds { category, catalog } => {
            let repo = build_repository(catalog.as_deref())?;
            let seeds = selector::seed_choices(repo.list_seed_artworks(), category);

            println!("🖼  シード作品 ({}: {}件)\n", category.label(), seeds.len());
            for artwork in seeds {
                println!("  {:<16} {}", artwork.id, selector::format_seed(artwork));
            }
        }

        Commands::Explore { seed, image, catalog, category, mock, policy, export, output } => {
            println!("🎨 art-explorer - 探索\n");

            let repo = build_repository(catalog.as_deref())?;
            let controller = ExplorationController::new(repo).with_policy(policy.unwrap_or(config.overlap_policy));
            let source = similarity_source(&config, mock, 0.5)?;
            let explorer = Explorer::new(controller, config.latency(), source);

            let upload = image.as_deref().map(upload::load_upload).transpose()?;
            run_explore(&explorer, seed, upload, category, export, output).await?;
        }

        Commands::Similar { image, top_k, mock, threshold, export, output } => {
            println!("🔍 art-explorer - 類似検索\n");

            println!("[1/3] 画像を読み込み中...");
            let upload = upload::load_upload(&image)?;
            println!("✔ {} ({}x{}, {})\n", upload.handle.file_name, upload.width, upload.height, upload.mime_type);

            let mut config = config;
            if let Some(k) = top_k {
                config.set_top_k(k)?;
            }
            let latency = if mock || !config.use_service { config.latency() } else { LatencyModel::None };
            let source = similarity_source(&config, mock, threshold)?;
            let explorer = Explorer::new(ExplorationController::default(), latency, source);

            println!("[2/3] 類似作品を検索中...");
            with_spinner("検索中...", explorer.select_upload(&upload)).await?;
            println!("✔ 検索完了\n");

            if let Some(artwork) = explorer.identified_artwork() {
                print_identified(&artwork);
            }

            let controller = explorer.controller();
            let controller = controller.borrow();
            let bundle = controller.bundle().context("探索結果がありません")?;

            println!("[3/3] 結果:");
            for (i, artwork) in bundle.similarity_results.iter().enumerate() {
                println!(
                    "  {:>2}. {} / {}  類似度 {:.2}  [{}]",
                    i + 1,
                    artwork.title,
                    artwork.artist,
                    artwork.similarity.unwrap_or(0.0),
                    artwork.style_labels.join(", ")
                );
            }

            if let Some(format) = export {
                let output = output.unwrap_or_else(|| PathBuf::from("."));
                export::export_bundle(bundle, format, &output, &export::default_stem(bundle))?;
            }

            println!("\n✅ 完了");
        }

        Commands::Health => {
            let client = similarity::SimilarityClient::new(&config.service_url(), config.timeout())?;
            println!("類似度サービス: {}", client.base_url());

            match client.health().await {
                Ok(health) if health.is_healthy() => {
                    println!("✔ 稼働中 (インデックス: {}件)", health.index_size);
                }
                Ok(health) => {
                    println!("⚠ 応答あり (状態: {}, インデックス: {}件)", health.status, health.index_size);
                }
                Err(e) => {
                    println!("✖ 接続できません");
                    return Err(e).context("類似度サービスの状態確認に失敗しました");
                }
            }
        }

        Commands::Styles { style, region, from, to, characteristics, search, progress, timeline } => {
            let catalog = StyleCatalog::builtin();

            if let Some(id) = style {
                let style = catalog
                    .find(&id)
                    .cloned()
                    .or_else(|| catalog.timeline().iter().find(|e| e.id == id).map(|e| catalog.style_for_era(e)))
                    .with_context(|| format!("様式が見つかりません: {}", id))?;
                print_style_exploration(&catalog, &style, progress)?;
            } else {
                let filter = StyleFilter {
                    start_year: from,
                    end_year: to,
                    region,
                    characteristics,
                    search,
                };
                let styles = catalog.filter(&filter);

                println!("🏛  美術様式 ({}件)\n", styles.len());
                for style in styles {
                    let mark = if style.is_featured() { "★" } else { " " };
                    println!("{} {:<20} {} ({}, {})", mark, style.id, style.name, style.period, style.region);
                    println!("    {}", style.characteristics.join(" / "));
                }
                println!("\n地域: {}", catalog.regions().join(", "));
            }

            if timeline {
                println!("\n📜 年表");
                for era in catalog.timeline() {
                    let style = catalog.style_for_era(era);
                    println!("  {:>5}  {:<20} → {}", era.year, era.title, style.name);
                }
            }
        }

        Commands::Catalog { folder, output } => {
            println!("📁 art-explorer - カタログ読み込み\n");

            println!("[1/2] 画像をスキャン中...");
            let artworks = catalog::load_catalog(&folder)?;
            println!("✔ {}点の作品を検出\n", artworks.len());

            println!("[2/2] ジャンル別:");
            for count in label_counts(&artworks) {
                println!("  {:<24} {}点", count.label, count.count);
            }

            if let Some(output) = output {
                if let Some(parent) = output.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&output, serde_json::to_string_pretty(&artworks)?)?;
                println!("\n✔ 作品一覧を保存: {}", output.display());
            }
        }

        Commands::Simulate { seed, mode, steps, viewport } => {
            println!("🧭 art-explorer - スクロール再現\n");

            let mut controller = ExplorationController::default();
            let root = controller
                .repository()
                .find_seed(&seed)
                .cloned()
                .with_context(|| format!("作品が見つかりません: {}", seed))?;
            controller.select_root(root)?;
            match mode {
                ExploreMode::Similarity => controller.choose_branch(Branch::Similarity)?,
                ExploreMode::Style => controller.choose_branch(Branch::Style)?,
                ExploreMode::Overview => controller.set_mode(ExploreMode::Overview)?,
                ExploreMode::Selection => anyhow::bail!("selectionモードはスクロールしません"),
            }

            let count = controller.item_count(mode);
            println!("{} / {}件\n", mode.label(), count);

            let controller = std::rc::Rc::new(std::cell::RefCell::new(controller));
            for frame in simulate::simulate_scroll(controller, steps, viewport) {
                println!(
                    "  {:>5.1}% (平滑 {:>5.1}%)  #{:<2} {:<24} 拡大 {:.2} 透明度 {:.2} 塗り {:.2}",
                    frame.progress * 100.0,
                    frame.smoothed * 100.0,
                    frame.index + 1,
                    frame.title.as_deref().unwrap_or("-"),
                    frame.transforms.image_scale,
                    frame.transforms.image_opacity,
                    frame.indicator
                );
            }
        }

        Commands::Config { set_service_url, set_latency, set_top_k, set_policy, set_use_service, show } => {
            let mut config = config;
            let mut changed = false;

            if let Some(url) = set_service_url {
                config.set_service_url(url)?;
                println!("✔ サービスURLを設定しました");
                changed = true;
            }
            if let Some(latency) = set_latency {
                config.latency_ms = latency;
                println!("✔ 待ち時間を設定しました");
                changed = true;
            }
            if let Some(top_k) = set_top_k {
                config.set_top_k(top_k)?;
                println!("✔ 取得件数を設定しました");
                changed = true;
            }
            if let Some(policy) = set_policy {
                config.overlap_policy = policy;
                println!("✔ 選択の重なり方を設定しました");
                changed = true;
            }
            if let Some(use_service) = set_use_service {
                config.use_service = use_service;
                println!("✔ サービス利用を設定しました");
                changed = true;
            }

            if changed {
                config.save()?;
            }

            if show || !changed {
                println!("設定:");
                println!("  サービスURL: {}", config.service_url());
                println!("  サービス利用: {}", if config.use_service { "する" } else { "しない" });
                println!("  取得件数: {}", config.top_k);
                println!("  待ち時間: {}ms", config.latency_ms);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  選択の重なり方: {:?}", config.overlap_policy);
                println!("  設定ファイル: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn build_repository(catalog: Option<&Path>) -> anyhow::Result<Repository> {
    match catalog {
        Some(folder) => {
            let repo = catalog::load_repository(folder)
                .with_context(|| format!("カタログを読み込めません: {}", folder.display()))?;
            println!("✔ カタログ: {}点\n", repo.list_seed_artworks().len());
            Ok(repo)
        }
        None => Ok(Repository::builtin()),
    }
}

fn similarity_source(config: &Config, mock: bool, threshold: f64) -> anyhow::Result<SimilaritySource> {
    if mock || !config.use_service {
        return Ok(SimilaritySource::Mock { threshold });
    }
    let client = similarity::SimilarityClient::new(&config.service_url(), config.timeout())?;
    Ok(SimilaritySource::Service {
        client,
        top_k: config.top_k,
        fallback_threshold: threshold,
    })
}

async fn with_spinner<F: Future>(message: &str, future: F) -> F::Output {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));

    let output = future.await;
    spinner.finish_and_clear();
    output
}

async fn run_explore(
    explorer: &Explorer,
    mut seed: Option<String>,
    mut upload: Option<UploadedImage>,
    category: SeedCategory,
    export: Option<export::ExportFormat>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    loop {
        let outcome = if let Some(image) = upload.take() {
            with_spinner("類似作品を探しています...", explorer.select_upload(&image)).await?
        } else {
            let key = match seed.take() {
                Some(key) => key,
                None => {
                    let seeds = explorer.controller().borrow().repository().list_seed_artworks().to_vec();
                    match selector::select_seed_interactive(&seeds, category)? {
                        Some(artwork) => artwork.id,
                        None => return Ok(()),
                    }
                }
            };
            with_spinner("探索結果を準備しています...", explorer.select_seed(&key)).await?
        };

        if outcome == SelectionOutcome::Discarded {
            println!("⚠ 選択が取り消されました");
            continue;
        }

        if let Some(artwork) = explorer.identified_artwork() {
            print_identified(&artwork);
        }
        print_bundle_summary(explorer);

        if let Some(format) = export {
            let controller = explorer.controller();
            let controller = controller.borrow();
            let bundle = controller.bundle().context("探索結果がありません")?;
            let output = output.clone().unwrap_or_else(|| PathBuf::from("."));
            export::export_bundle(bundle, format, &output, &export::default_stem(bundle))?;
            println!("\n✅ エクスポート完了");
            return Ok(());
        }

        if !navigate(explorer)? {
            println!("\n✅ 探索終了");
            return Ok(());
        }
    }
}

/// 探索画面の操作ループ。選び直すならtrue
fn navigate(explorer: &Explorer) -> anyhow::Result<bool> {
    let controller = explorer.controller();
    let mut session = ExplorationSession::new(explorer.controller(), ScrollTracker::new());
    session.activate();
    let mut filter = OverviewFilter::All;
    let mut tree = controller.borrow().bundle().map(|b| ExplorationTree::new(b.root.clone()));
    let mut last_node = ExplorationTree::ROOT_ID.to_string();

    loop {
        print_view(&controller.borrow(), &filter);
        let mode = controller.borrow().mode();

        match selector::read_action(mode)? {
            ExploreAction::Branch(branch) => {
                if let Err(e) = controller.borrow_mut().choose_branch(branch) {
                    println!("⚠ {}", e);
                }
            }
            ExploreAction::Mode(mode) => {
                if let Err(e) = controller.borrow_mut().set_mode(mode) {
                    println!("⚠ {}", e);
                }
            }
            ExploreAction::Scroll(progress) => {
                let count = {
                    let controller = controller.borrow();
                    controller.item_count(controller.mode())
                };
                session.scroll(simulate::metrics_for(progress, count, VIEWPORT));
            }
            ExploreAction::Filter(next) => {
                if mode != ExploreMode::Overview {
                    println!("⚠ 絞り込みは一覧表示でのみ使えます");
                }
                filter = next;
            }
            ExploreAction::AddToTree(parent) => {
                let artwork = controller.borrow().current_artwork().cloned();
                match (tree.as_mut(), artwork) {
                    (Some(tree), Some(artwork)) => {
                        let parent = parent.unwrap_or_else(|| last_node.clone());
                        match tree.add_child(&parent, artwork) {
                            Ok(id) => {
                                println!("✔ ツリーに追加しました: {} (親: {})", id, parent);
                                last_node = id;
                            }
                            Err(e) => println!("⚠ {}", e),
                        }
                    }
                    _ => println!("⚠ 追加できる作品がありません（類似度・スタイル表示で使えます）"),
                }
            }
            ExploreAction::ShowTree => {
                if let Some(tree) = &tree {
                    print_tree(tree);
                }
            }
            ExploreAction::Reset => {
                controller.borrow_mut().reset();
                return Ok(true);
            }
            ExploreAction::Quit => {
                if let Some(tree) = tree.as_ref().filter(|t| t.node_count() > 1) {
                    print_tree(tree);
                }
                return Ok(false);
            }
            ExploreAction::Unknown(input) => println!("⚠ 無効な入力です: {}", input),
        }
    }
}

fn print_bundle_summary(explorer: &Explorer) {
    let controller = explorer.controller();
    let controller = controller.borrow();
    let Some(bundle) = controller.bundle() else {
        return;
    };

    println!("✔ {} / {} ({})", bundle.root.title, bundle.root.artist, bundle.root.year);
    println!("  {}: {}件", bundle.similarity_title, bundle.similarity_results.len());
    println!("  {}: {}グループ {}件", bundle.style_title, bundle.style_groups.len(), bundle.style_item_count());
}

fn print_tree(tree: &ExplorationTree) {
    println!("\n🌳 探索ツリー ({}件)", tree.node_count());
    for line in tree.render_lines() {
        println!("  {}", line);
    }
}

fn print_identified(artwork: &art_explorer_common::Artwork) {
    println!("🎯 作品を特定しました: {} / {} [{}]", artwork.title, artwork.artist, artwork.style_labels.join(", "));
    println!("  {}\n", artwork.url);
}

fn print_view(controller: &ExplorationController, filter: &OverviewFilter) {
    let Some(bundle) = controller.bundle() else {
        return;
    };
    let mode = controller.mode();
    let count = controller.item_count(mode);
    println!("\n── {} ──", mode.label());

    match mode {
        ExploreMode::Selection => {
            println!("{}", bundle.root.title);
            println!("  {}", bundle.similarity_description);
            println!("  {}", bundle.style_description);
        }
        ExploreMode::Similarity | ExploreMode::Style => {
            if let Some(group) = controller.current_style_group() {
                println!("【{}】{}", group.style_name, group.description);
            }
            if let Some(artwork) = controller.current_artwork() {
                println!("[{}/{}] {} / {} ({})", controller.current_index() + 1, count, artwork.title, artwork.artist, artwork.year);
                if let Some(score) = artwork.similarity {
                    println!("  類似度 {:.0}%", score * 100.0);
                }
                if !artwork.description.is_empty() {
                    println!("  {}", artwork.description);
                }
            }
        }
        ExploreMode::Overview => {
            for label in label_counts(&bundle.overview) {
                print!("{}({}) ", label.label, label.count);
            }
            println!();
            if let OverviewFilter::Label(label) = filter {
                println!("絞り込み: {}", label);
            }
            let shown = filter.apply(&bundle.overview);
            if shown.is_empty() {
                println!("  該当する作品がありません");
            }
            for artwork in shown {
                println!("  {} / {}", artwork.title, artwork.artist);
            }
        }
    }
}

fn print_style_exploration(
    catalog: &StyleCatalog,
    style: &art_explorer_common::ArtStyle,
    progress: f64,
) -> anyhow::Result<()> {
    use art_explorer_common::styles::SectionContent;

    let exploration = catalog.generate_style_exploration(style);
    let current = exploration.current_section(progress)?;

    println!("🏛  {} ({})", style.name, style.period);
    println!("  {}", style.description);
    println!("  影響: {}\n", style.influence);

    for (i, section) in exploration.sections.iter().enumerate() {
        let mark = if i == current { "▶" } else { " " };
        println!("{} {:>3.0}% {} - {}", mark, section.scroll_trigger * 100.0, section.title, section.description);

        match &section.content {
            SectionContent::Masterpieces(items) | SectionContent::SimilarWorks(items) => {
                for artwork in items {
                    println!("      {} / {} ({})", artwork.title, artwork.artist, artwork.year);
                }
            }
            SectionContent::Timeline(eras) => {
                for era in eras {
                    println!("      {} {}", era.year, era.title);
                }
            }
            SectionContent::StyleBranches(branches) => {
                for branch in branches {
                    println!("      {} - {}", branch.name, branch.description);
                }
            }
        }
    }

    Ok(())
}
