use crate::export::ExportFormat;
use art_explorer_common::overview::SeedCategory;
use art_explorer_common::{ExploreMode, OverlapPolicy};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "art-explorer")]
#[command(about = "名画から類似作品・美術様式をたどるスクロール探索ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// シード作品の一覧
    Seeds {
        /// カテゴリ (all/renaissance/impressionism/modern/traditional)
        #[arg(short, long, default_value = "all")]
        category: SeedCategory,

        /// ローカルカタログのフォルダ（省略時は組み込み作品）
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// 作品を選んで探索（対話式）
    Explore {
        /// シード作品のIDまたはURL（省略時は一覧から選択）
        #[arg(short, long)]
        seed: Option<String>,

        /// アップロードする画像ファイル
        #[arg(short, long, conflicts_with = "seed")]
        image: Option<PathBuf>,

        /// ローカルカタログのフォルダ
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// 一覧のカテゴリ
        #[arg(short, long, default_value = "all")]
        category: SeedCategory,

        /// 類似度サービスを使わず模擬データで探索
        #[arg(long)]
        mock: bool,

        /// 選択の重なり方 (supersede/reject)
        #[arg(long)]
        policy: Option<OverlapPolicy>,

        /// 結果を出力して終了 (json/excel/both)
        #[arg(long)]
        export: Option<ExportFormat>,

        /// 出力ファイル/ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 画像に似た作品を検索
    Similar {
        /// 画像ファイル
        #[arg(required = true)]
        image: PathBuf,

        /// 取得件数 (1-10、省略時は設定値)
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// 模擬データを使う
        #[arg(long)]
        mock: bool,

        /// 模擬データの類似度閾値（0.0-1.0、低いほど多い）
        #[arg(long, default_value = "0.5")]
        threshold: f64,

        /// 結果を出力 (json/excel/both)
        #[arg(long)]
        export: Option<ExportFormat>,

        /// 出力ファイル/ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 類似度サービスの状態確認
    Health,

    /// 美術様式の一覧・詳細
    Styles {
        /// 様式ID（指定すると探索セクションを表示）
        #[arg(long)]
        style: Option<String>,

        /// 地域
        #[arg(long)]
        region: Option<String>,

        /// 開始年（この年以降に終わる様式）
        #[arg(long, allow_hyphen_values = true)]
        from: Option<i32>,

        /// 終了年（この年以前に始まる様式）
        #[arg(long, allow_hyphen_values = true)]
        to: Option<i32>,

        /// 特徴キーワード（複数可）
        #[arg(long = "characteristic")]
        characteristics: Vec<String>,

        /// 名前・説明・特徴の検索語
        #[arg(short, long)]
        search: Option<String>,

        /// セクション表示時のスクロール位置（0.0-1.0）
        #[arg(short, long, default_value = "0.0")]
        progress: f64,

        /// 年表も表示
        #[arg(long)]
        timeline: bool,
    },

    /// ローカル画像フォルダをカタログとして読み込み
    Catalog {
        /// カタログのルートフォルダ（<ジャンル>/<作家>_<タイトル>-<年>.jpg）
        #[arg(required = true)]
        folder: PathBuf,

        /// 出力JSONファイル
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// スクロールを再現して表示位置を確認
    Simulate {
        /// シード作品のIDまたはURL
        #[arg(short, long, default_value = "mona-lisa")]
        seed: String,

        /// 表示モード (similarity/style/overview)
        #[arg(short, long, default_value = "similarity")]
        mode: ExploreMode,

        /// スクロールの刻み数
        #[arg(long, default_value = "10")]
        steps: usize,

        /// 画面の高さ（px）
        #[arg(long, default_value = "800")]
        viewport: f64,
    },

    /// 設定を表示/編集
    Config {
        /// 類似度サービスのURLを設定
        #[arg(long)]
        set_service_url: Option<String>,

        /// 模擬データの待ち時間（ミリ秒、0で待たない）
        #[arg(long)]
        set_latency: Option<u64>,

        /// 取得件数を設定 (1-10)
        #[arg(long)]
        set_top_k: Option<usize>,

        /// 選択の重なり方を設定 (supersede/reject)
        #[arg(long)]
        set_policy: Option<OverlapPolicy>,

        /// 類似度サービスを使うか
        #[arg(long)]
        set_use_service: Option<bool>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
