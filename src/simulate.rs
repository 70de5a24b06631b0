//! スクロールの再現
//!
//! 画面の高さと件数から仮想のスクロール量を作り、セッション経由でコントローラに流す。
//! 1件あたり1画面分の高さとする。

use art_explorer_common::motion::{indicator_fill, ArtworkTransforms, Spring, SpringConfig};
use art_explorer_common::{ExplorationController, ExplorationSession, ScrollMetrics, ScrollTracker};
use std::cell::RefCell;
use std::rc::Rc;

/// 1フレームあたりの時間（秒）
const FRAME_SECONDS: f64 = 1.0 / 60.0;

/// 1刻みあたりのフレーム数
const FRAMES_PER_STEP: usize = 6;

/// 再現結果の1コマ
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollFrame {
    pub progress: f64,
    /// バネで平滑化した進捗
    pub smoothed: f64,
    pub index: usize,
    pub title: Option<String>,
    pub indicator: f64,
    pub transforms: ArtworkTransforms,
}

/// 進捗値に対応するスクロール量
pub fn metrics_for(progress: f64, count: usize, viewport: f64) -> ScrollMetrics {
    let viewport = if viewport.is_finite() && viewport > 0.0 { viewport } else { 800.0 };
    let scrollable = viewport * count.max(1) as f64;
    ScrollMetrics::new(progress.clamp(0.0, 1.0) * scrollable, scrollable + viewport, viewport)
}

/// 先頭から末尾まで `steps` 刻みでスクロールする
///
/// 現在モードの件数で区切る。セッションは呼び出しの間だけ有効。
pub fn simulate_scroll(controller: Rc<RefCell<ExplorationController>>, steps: usize, viewport: f64) -> Vec<ScrollFrame> {
    let count = {
        let controller = controller.borrow();
        controller.item_count(controller.mode())
    };

    let mut session = ExplorationSession::new(Rc::clone(&controller), ScrollTracker::new());
    session.activate();
    let mut spring = Spring::new(0.0, SpringConfig::default());

    let steps = steps.max(1);
    let mut frames = Vec::with_capacity(steps + 1);

    for step in 0..=steps {
        let target = step as f64 / steps as f64;
        let progress = session.scroll(metrics_for(target, count, viewport));

        spring.set_target(progress);
        for _ in 0..FRAMES_PER_STEP {
            spring.step(FRAME_SECONDS);
        }

        let controller = controller.borrow();
        let index = controller.current_index();
        frames.push(ScrollFrame {
            progress,
            smoothed: spring.value(),
            index,
            title: controller.current_artwork().map(|a| a.title.clone()),
            indicator: indicator_fill(progress, index, count),
            transforms: ArtworkTransforms::at(progress, index, count),
        });
    }

    session.deactivate();
    frames
}

#[cfg(test)]
mod tests {
    use super::*;
    use art_explorer_common::{progress::scroll_progress, Branch, Repository};

    fn controller_for(seed: &str, branch: Branch) -> Rc<RefCell<ExplorationController>> {
        let mut controller = ExplorationController::new(Repository::builtin());
        let root = controller.repository().find_seed(seed).cloned().unwrap();
        controller.select_root(root).unwrap();
        controller.choose_branch(branch).unwrap();
        Rc::new(RefCell::new(controller))
    }

    #[test]
    fn test_metrics_for_round_trip() {
        for progress in [0.0, 0.25, 0.5, 1.0] {
            let metrics = metrics_for(progress, 5, 800.0);
            assert!((scroll_progress(metrics) - progress).abs() < 1e-12);
        }
        assert_eq!(scroll_progress(metrics_for(2.0, 5, 800.0)), 1.0);
    }

    #[test]
    fn test_simulate_similarity_scroll() {
        let controller = controller_for("mona-lisa", Branch::Similarity);
        assert_eq!(controller.borrow().item_count(controller.borrow().mode()), 5);

        let frames = simulate_scroll(Rc::clone(&controller), 4, 800.0);
        let indices: Vec<usize> = frames.iter().map(|f| f.index).collect();

        assert_eq!(frames.len(), 5);
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
        assert_eq!(frames[2].progress, 0.5);
        assert!(frames.iter().all(|f| f.title.is_some()));
        assert!(frames.iter().all(|f| (0.0..=1.0).contains(&f.smoothed)));
        assert_eq!(frames[4].indicator, 1.0);
    }

    #[test]
    fn test_simulate_keeps_last_position() {
        let controller = controller_for("starry-night", Branch::Style);
        let frames = simulate_scroll(Rc::clone(&controller), 2, 600.0);
        let last = frames.last().unwrap().index;

        // セッション終了後は購読されていない
        assert_eq!(controller.borrow().current_index(), last);
    }
}
