//! Art Explorer Common Library
//!
//! CLIとフロントエンドで共有される探索ロジック
//! - 作品リポジトリと探索結果の生成
//! - スクロール進捗・セクション番号・表示状態の遷移
//! - 美術様式カタログと模擬データ
//! - たどった作品の探索ツリー

pub mod types;
pub mod error;
pub mod repository;
pub mod progress;
pub mod sections;
pub mod controller;
pub mod session;
pub mod motion;
pub mod styles;
pub mod overview;
pub mod tree;
pub mod mock;
pub mod export;

pub use types::{Artwork, Branch, ExploreMode, ResultBundle, SelectionInput, StyleGroup, UploadHandle};
pub use error::{ExploreError, Result};
pub use repository::{LatencyModel, Repository};
pub use progress::{scroll_progress, ScrollMetrics, ScrollTracker, Subscription};
pub use sections::{map_progress_to_index, SectionThresholds};
pub use controller::{ExplorationController, OverlapPolicy, SelectionOutcome, SelectionTicket, ViewState};
pub use session::ExplorationSession;
pub use styles::{ArtStyle, StyleCatalog, StyleFilter};
pub use tree::{ExplorationTree, TreeNode};
