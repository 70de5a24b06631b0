//! 探索セッション
//!
//! コントローラとスクロールトラッカーを結び付ける。
//! 購読はセッションが所有し、`deactivate` かdropで必ず解除される。

use crate::controller::ExplorationController;
use crate::progress::{ScrollMetrics, ScrollTracker, Subscription};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// スクロール駆動の探索ビュー1画面分
pub struct ExplorationSession {
    controller: Rc<RefCell<ExplorationController>>,
    tracker: ScrollTracker,
    subscription: Option<Subscription>,
    /// コントローラ借用中に届いた最新の進捗
    pending: Rc<Cell<Option<f64>>>,
}

impl ExplorationSession {
    pub fn new(controller: Rc<RefCell<ExplorationController>>, tracker: ScrollTracker) -> Self {
        Self {
            controller,
            tracker,
            subscription: None,
            pending: Rc::new(Cell::new(None)),
        }
    }

    pub fn controller(&self) -> Rc<RefCell<ExplorationController>> {
        Rc::clone(&self.controller)
    }

    pub fn tracker(&self) -> &ScrollTracker {
        &self.tracker
    }

    pub fn is_active(&self) -> bool {
        self.subscription.is_some()
    }

    /// 進捗の購読を開始し、現在の進捗を即座に反映する
    ///
    /// 二重に呼んでも購読は1つ。
    pub fn activate(&mut self) {
        if self.subscription.is_some() {
            return;
        }

        let weak: Weak<RefCell<ExplorationController>> = Rc::downgrade(&self.controller);
        let pending = Rc::clone(&self.pending);
        let subscription = self.tracker.subscribe(move |progress| {
            let Some(controller) = weak.upgrade() else {
                return;
            };
            // 進捗から位置は一意に決まるので、保留するのは最新値だけでよい
            match controller.try_borrow_mut() {
                Ok(mut controller) => {
                    pending.set(None);
                    controller.on_progress_change(progress);
                }
                Err(_) => {
                    tracing::debug!(progress, "controller busy, progress deferred");
                    pending.set(Some(progress));
                }
            };
        });
        self.subscription = Some(subscription);

        let progress = self.tracker.progress();
        self.controller.borrow_mut().on_progress_change(progress);
        tracing::debug!(progress, "session activated");
    }

    /// 購読を解除
    pub fn deactivate(&mut self) {
        self.pending.set(None);
        if self.subscription.take().is_some() {
            tracing::debug!("session deactivated");
        }
    }

    /// スクロールイベントを流す
    ///
    /// 保留中の進捗があれば先に反映する。
    pub fn scroll(&self, metrics: ScrollMetrics) -> f64 {
        self.flush_pending();
        let progress = self.tracker.update(metrics);
        self.flush_pending();
        progress
    }

    /// 保留中の進捗をコントローラに反映
    ///
    /// 反映できたら true。コントローラがまだ借用中なら保留のまま。
    pub fn flush_pending(&self) -> bool {
        let Some(progress) = self.pending.get() else {
            return false;
        };
        match self.controller.try_borrow_mut() {
            Ok(mut controller) => {
                self.pending.set(None);
                controller.on_progress_change(progress);
                true
            }
            Err(_) => false,
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Branch, ExploreMode};

    fn prepared() -> Rc<RefCell<ExplorationController>> {
        let mut controller = ExplorationController::default();
        let root = controller
            .repository()
            .find_seed("mona-lisa")
            .cloned()
            .expect("シードがない");
        controller.select_root(root).expect("選択失敗");
        controller.choose_branch(Branch::Similarity).expect("分岐失敗");
        Rc::new(RefCell::new(controller))
    }

    #[test]
    fn test_scroll_drives_index() {
        let controller = prepared();
        let mut session = ExplorationSession::new(Rc::clone(&controller), ScrollTracker::new());
        session.activate();

        session.scroll(ScrollMetrics::new(500.0, 1500.0, 500.0));
        assert_eq!(controller.borrow().current_index(), 2);

        session.scroll(ScrollMetrics::new(1000.0, 1500.0, 500.0));
        assert_eq!(controller.borrow().current_index(), 4);
    }

    #[test]
    fn test_activate_applies_current_progress() {
        let controller = prepared();
        let tracker = ScrollTracker::new();
        tracker.update(ScrollMetrics::new(1000.0, 1500.0, 500.0));

        let mut session = ExplorationSession::new(Rc::clone(&controller), tracker);
        session.activate();
        assert_eq!(controller.borrow().current_index(), 4);
    }

    #[test]
    fn test_inactive_session_ignores_scroll() {
        let controller = prepared();
        let mut session = ExplorationSession::new(Rc::clone(&controller), ScrollTracker::new());
        session.activate();
        session.deactivate();
        assert!(!session.is_active());

        session.scroll(ScrollMetrics::new(1000.0, 1500.0, 500.0));
        assert_eq!(controller.borrow().current_index(), 0);
    }

    #[test]
    fn test_drop_detaches() {
        let controller = prepared();
        let tracker = ScrollTracker::new();
        {
            let mut session = ExplorationSession::new(Rc::clone(&controller), tracker.clone());
            session.activate();
            session.activate();
            assert_eq!(tracker.subscriber_count(), 1);
        }
        assert_eq!(tracker.subscriber_count(), 0);
    }

    #[test]
    fn test_mode_switch_back_to_selection_stops_index_updates() {
        let controller = prepared();
        let mut session = ExplorationSession::new(Rc::clone(&controller), ScrollTracker::new());
        session.activate();
        session.scroll(ScrollMetrics::new(500.0, 1500.0, 500.0));

        controller
            .borrow_mut()
            .set_mode(ExploreMode::Selection)
            .expect("モード切替失敗");
        session.scroll(ScrollMetrics::new(0.0, 1500.0, 500.0));
        assert_eq!(controller.borrow().current_index(), 2);
    }

    #[test]
    fn test_progress_while_controller_borrowed_is_applied_later() {
        let controller = prepared();
        let mut session = ExplorationSession::new(Rc::clone(&controller), ScrollTracker::new());
        session.activate();

        {
            let reading = controller.borrow();
            session.scroll(ScrollMetrics::new(1000.0, 1500.0, 500.0));
            assert_eq!(reading.current_index(), 0);
        }
        assert!(session.has_pending());

        assert!(session.flush_pending());
        assert!(!session.has_pending());
        assert_eq!(controller.borrow().current_index(), 4);
    }

    #[test]
    fn test_deferred_progress_applied_on_next_scroll() {
        let controller = prepared();
        let mut session = ExplorationSession::new(Rc::clone(&controller), ScrollTracker::new());
        session.activate();

        {
            let _reading = controller.borrow();
            session.scroll(ScrollMetrics::new(500.0, 1500.0, 500.0));
        }
        // 同じ進捗は再通知されないが、保留分がここで反映される
        session.scroll(ScrollMetrics::new(500.0, 1500.0, 500.0));
        assert_eq!(controller.borrow().current_index(), 2);
    }
}
