//! 探索ビューコントローラ
//!
//! ViewStateを唯一所有し、遷移操作だけが状態を変更する。
//!
//! ```text
//!   selection(空) ──select_root──► selection(結果あり)
//!        ▲                            │  ▲
//!        │ reset                      │  │ set_mode(selection)
//!        │                 choose_branch / set_mode
//!        │                            ▼  │
//!        └──────────────── similarity / style / overview
//! ```
//!
//! 失敗した操作は状態を一切変更しない。
//! 非同期の選択は世代番号で管理し、古い結果は捨てる。

use crate::error::{ExploreError, Result};
use crate::repository::Repository;
use crate::sections::{map_progress_to_index, SectionThresholds};
use crate::types::{Artwork, Branch, ExploreMode, ResultBundle, StyleGroup};
use serde::{Deserialize, Serialize};

/// 表示状態
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    pub mode: ExploreMode,
    pub bundle: Option<ResultBundle>,
    pub current_index: usize,
}

/// 選択処理の重複時の方針
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlapPolicy {
    /// 新しい選択が保留中の選択を置き換える（最新が勝つ）
    #[default]
    Supersede,
    /// 保留中は新しい選択をBusyで拒否
    Reject,
}

impl std::str::FromStr for OverlapPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "supersede" | "latest" => Ok(OverlapPolicy::Supersede),
            "reject" => Ok(OverlapPolicy::Reject),
            _ => Err(format!("Unknown policy: {}. Use supersede or reject", s)),
        }
    }
}

/// 保留中の選択を表すチケット
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionTicket {
    generation: u64,
    artwork: Artwork,
}

impl SelectionTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// 結果生成の元になる作品
    pub fn artwork(&self) -> &Artwork {
        &self.artwork
    }
}

/// 非同期選択の解決結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// 状態に反映した
    Applied,
    /// より新しい操作があったため破棄した
    Discarded,
}

/// 遷移ガード（純粋関数）
///
/// selection以外へは結果が必要。分岐選択はselectionからのみ。
pub fn can_set_mode(to: ExploreMode, has_bundle: bool) -> bool {
    to == ExploreMode::Selection || has_bundle
}

pub fn can_choose_branch(from: ExploreMode, has_bundle: bool) -> bool {
    from == ExploreMode::Selection && has_bundle
}

/// 探索ビューコントローラ
#[derive(Debug, Clone)]
pub struct ExplorationController {
    repository: Repository,
    state: ViewState,
    policy: OverlapPolicy,
    /// 選択・リセットのたびに増える世代番号
    generation: u64,
    /// 保留中の選択の世代
    pending: Option<u64>,
}

impl Default for ExplorationController {
    fn default() -> Self {
        Self::new(Repository::builtin())
    }
}

impl ExplorationController {
    pub fn new(repository: Repository) -> Self {
        Self {
            repository,
            state: ViewState::default(),
            policy: OverlapPolicy::default(),
            generation: 0,
            pending: None,
        }
    }

    pub fn with_policy(mut self, policy: OverlapPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn mode(&self) -> ExploreMode {
        self.state.mode
    }

    pub fn bundle(&self) -> Option<&ResultBundle> {
        self.state.bundle.as_ref()
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn policy(&self) -> OverlapPolicy {
        self.policy
    }

    /// 選択処理の実行中か（UIはこの間、再選択を止める）
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// モードごとの表示件数
    pub fn item_count(&self, mode: ExploreMode) -> usize {
        let Some(bundle) = self.state.bundle.as_ref() else {
            return 0;
        };
        match mode {
            ExploreMode::Selection => 0,
            ExploreMode::Similarity => bundle.similarity_results.len(),
            ExploreMode::Style => bundle.style_item_count(),
            ExploreMode::Overview => bundle.overview.len(),
        }
    }

    /// 進捗インジケータを持つモードの件数（それ以外は0）
    fn indexed_count(&self, mode: ExploreMode) -> usize {
        match mode {
            ExploreMode::Similarity | ExploreMode::Style => self.item_count(mode),
            ExploreMode::Selection | ExploreMode::Overview => 0,
        }
    }

    /// 現在位置の作品
    pub fn current_artwork(&self) -> Option<&Artwork> {
        let bundle = self.state.bundle.as_ref()?;
        let index = self.state.current_index;
        match self.state.mode {
            ExploreMode::Similarity => bundle.similarity_results.get(index),
            ExploreMode::Style => bundle.style_artworks().nth(index),
            ExploreMode::Selection | ExploreMode::Overview => None,
        }
    }

    /// styleモードで現在位置を含むグループ
    pub fn current_style_group(&self) -> Option<&StyleGroup> {
        if self.state.mode != ExploreMode::Style {
            return None;
        }
        let bundle = self.state.bundle.as_ref()?;
        let mut remaining = self.state.current_index;
        for group in &bundle.style_groups {
            if remaining < group.artworks.len() {
                return Some(group);
            }
            remaining -= group.artworks.len();
        }
        None
    }

    /// 現在の状態から遷移できるモード
    pub fn valid_destinations(&self) -> Vec<ExploreMode> {
        let has_bundle = self.state.bundle.is_some();
        ExploreMode::ALL
            .into_iter()
            .filter(|m| *m != self.state.mode && can_set_mode(*m, has_bundle))
            .collect()
    }

    fn check_overlap(&self) -> Result<()> {
        if self.pending.is_some() && self.policy == OverlapPolicy::Reject {
            return Err(ExploreError::Busy);
        }
        Ok(())
    }

    fn apply_bundle(&mut self, bundle: ResultBundle) {
        self.state = ViewState {
            mode: ExploreMode::Selection,
            bundle: Some(bundle),
            current_index: 0,
        };
    }

    /// ルート作品を選択（同期版）
    ///
    /// 結果を生成して差し替え、selectionに戻す。保留中の選択は置き換える。
    pub fn select_root(&mut self, artwork: Artwork) -> Result<()> {
        artwork.validate()?;
        self.check_overlap()?;

        let bundle = self.repository.build_result_bundle(&artwork);
        self.generation += 1;
        self.pending = None;
        self.apply_bundle(bundle);

        tracing::debug!(root = %artwork.id, generation = self.generation, "root selected");
        Ok(())
    }

    /// 非同期選択の開始
    ///
    /// 状態は変えずに世代を進め、ローディング中にする。
    pub fn begin_selection(&mut self, artwork: Artwork) -> Result<SelectionTicket> {
        artwork.validate()?;
        self.check_overlap()?;

        if let Some(previous) = self.pending {
            tracing::debug!(previous, "superseding pending selection");
        }

        self.generation += 1;
        self.pending = Some(self.generation);

        tracing::debug!(root = %artwork.id, generation = self.generation, "selection started");
        Ok(SelectionTicket {
            generation: self.generation,
            artwork,
        })
    }

    /// 非同期選択の完了
    ///
    /// チケットが最新でなければ結果を捨てる（状態は変えない）。
    pub fn resolve_selection(&mut self, ticket: SelectionTicket, bundle: ResultBundle) -> SelectionOutcome {
        if self.pending != Some(ticket.generation) {
            tracing::debug!(
                generation = ticket.generation,
                current = self.generation,
                "stale selection discarded"
            );
            return SelectionOutcome::Discarded;
        }

        self.pending = None;
        self.apply_bundle(bundle);
        tracing::debug!(root = %ticket.artwork.id, generation = ticket.generation, "selection applied");
        SelectionOutcome::Applied
    }

    /// 結果生成に失敗した選択を取り下げる
    pub fn abandon_selection(&mut self, ticket: &SelectionTicket) {
        if self.pending == Some(ticket.generation) {
            self.pending = None;
        }
    }

    /// 分岐を選ぶ（selectionからのみ、位置は0に戻す）
    pub fn choose_branch(&mut self, branch: Branch) -> Result<()> {
        let to = ExploreMode::from(branch);
        let from = self.state.mode;
        if !can_choose_branch(from, self.state.bundle.is_some()) {
            return Err(ExploreError::InvalidTransition { from, to });
        }

        self.state.mode = to;
        self.state.current_index = 0;
        tracing::debug!(%from, %to, "branch chosen");
        Ok(())
    }

    /// ツールバーからのモード切替
    ///
    /// 位置はリセットしない。新しいモードの件数を超える場合だけ末尾に寄せる。
    pub fn set_mode(&mut self, mode: ExploreMode) -> Result<()> {
        let from = self.state.mode;
        if !can_set_mode(mode, self.state.bundle.is_some()) {
            return Err(ExploreError::InvalidTransition { from, to: mode });
        }

        self.state.mode = mode;
        let count = self.indexed_count(mode);
        if count > 0 && self.state.current_index >= count {
            self.state.current_index = count - 1;
        }
        tracing::debug!(%from, to = %mode, index = self.state.current_index, "mode switched");
        Ok(())
    }

    /// 初期状態に戻す（保留中の選択も取り消す）
    pub fn reset(&mut self) {
        self.generation += 1;
        self.pending = None;
        self.state = ViewState::default();
        tracing::debug!(generation = self.generation, "controller reset");
    }

    /// スクロール進捗の変化
    ///
    /// 現在モードの件数で等間隔に区切って位置を決める。
    pub fn on_progress_change(&mut self, progress: f64) {
        let count = self.indexed_count(self.state.mode);
        if count == 0 {
            return;
        }
        let thresholds = SectionThresholds::evenly_spaced(count);
        self.state.current_index = map_progress_to_index(progress, &thresholds);
    }
}
