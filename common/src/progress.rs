//! スクロール進捗トラッカー
//!
//! スクロール位置を [0, 1] の進捗値に正規化し、変化時に購読者へ通知する。
//! 購読は `Subscription` の所有で表し、dropで確実に解除される。

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

/// スクロール計測値
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// 現在のスクロール位置
    pub offset: f64,
    /// コンテンツ全体の長さ
    pub content_extent: f64,
    /// ビューポートの長さ
    pub viewport_extent: f64,
}

impl ScrollMetrics {
    pub fn new(offset: f64, content_extent: f64, viewport_extent: f64) -> Self {
        Self {
            offset,
            content_extent,
            viewport_extent,
        }
    }

    /// スクロール可能な距離 max(0, content - viewport)
    pub fn scrollable(&self) -> f64 {
        let total = self.content_extent - self.viewport_extent;
        if total.is_finite() && total > 0.0 {
            total
        } else {
            0.0
        }
    }
}

/// 進捗値を計算
///
/// スクロール可能距離が0なら0。非有限値も0扱い。
pub fn scroll_progress(metrics: ScrollMetrics) -> f64 {
    let total = metrics.scrollable();
    if total == 0.0 || !metrics.offset.is_finite() {
        return 0.0;
    }
    (metrics.offset / total).clamp(0.0, 1.0)
}

type Listener = Rc<RefCell<dyn FnMut(f64)>>;

struct TrackerInner {
    progress: f64,
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
    /// 通知待ちの進捗値（到着順）
    queue: VecDeque<f64>,
    notifying: bool,
}

/// スクロール進捗トラッカー
///
/// UIイベントループと同じスレッドでのみ使う（Rcベース）。
#[derive(Clone)]
pub struct ScrollTracker {
    inner: Rc<RefCell<TrackerInner>>,
}

impl Default for ScrollTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollTracker {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(TrackerInner {
                progress: 0.0,
                next_id: 0,
                listeners: Vec::new(),
                queue: VecDeque::new(),
                notifying: false,
            })),
        }
    }

    /// 直近の進捗値
    pub fn progress(&self) -> f64 {
        self.inner.borrow().progress
    }

    /// スクロール・リサイズ時に呼ぶ
    ///
    /// 値が変わったときだけ購読者に通知する。通知は登録順。
    /// 通知中に呼ばれた場合は値をキューに積み、外側の通知ループが順に配る。
    pub fn update(&self, metrics: ScrollMetrics) -> f64 {
        let progress = scroll_progress(metrics);

        {
            let mut inner = self.inner.borrow_mut();
            if inner.progress == progress {
                return progress;
            }
            inner.progress = progress;
            inner.queue.push_back(progress);
            if inner.notifying {
                return progress;
            }
            inner.notifying = true;
        }

        let _guard = NotifyGuard(&self.inner);
        loop {
            // 借用を解放してから呼ぶ（コールバック内での購読解除・再更新を許す）
            let (value, listeners): (f64, Vec<Listener>) = {
                let mut inner = self.inner.borrow_mut();
                let Some(value) = inner.queue.pop_front() else {
                    break;
                };
                (value, inner.listeners.iter().map(|(_, l)| Rc::clone(l)).collect())
            };

            for listener in listeners {
                let mut callback = listener.borrow_mut();
                (*callback)(value);
            }
        }

        progress
    }

    /// 購読を登録
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(f64) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        let listener: Listener = Rc::new(RefCell::new(callback));
        inner.listeners.push((id, listener));

        Subscription {
            id,
            tracker: Rc::downgrade(&self.inner),
        }
    }

    /// 登録中の購読数
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

/// 通知ループを抜けたら（panic時も）フラグを戻す
struct NotifyGuard<'a>(&'a RefCell<TrackerInner>);

impl Drop for NotifyGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.0.try_borrow_mut() {
            inner.notifying = false;
            inner.queue.clear();
        }
    }
}

/// 購読ハンドル
///
/// dropで解除。トラッカーが先に破棄されていても安全。
#[must_use = "dropping a Subscription detaches the listener immediately"]
pub struct Subscription {
    id: u64,
    tracker: Weak<RefCell<TrackerInner>>,
}

impl Subscription {
    /// 明示的に解除
    pub fn detach(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.tracker.upgrade() {
            if let Ok(mut inner) = inner.try_borrow_mut() {
                inner.listeners.retain(|(id, _)| *id != self.id);
            }
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_basic() {
        assert_eq!(scroll_progress(ScrollMetrics::new(250.0, 1500.0, 500.0)), 0.25);
        assert_eq!(scroll_progress(ScrollMetrics::new(1000.0, 1500.0, 500.0)), 1.0);
    }

    #[test]
    fn test_progress_clamped() {
        assert_eq!(scroll_progress(ScrollMetrics::new(5000.0, 1500.0, 500.0)), 1.0);
        assert_eq!(scroll_progress(ScrollMetrics::new(-20.0, 1500.0, 500.0)), 0.0);
    }

    #[test]
    fn test_progress_no_scrollable_distance() {
        // コンテンツがビューポートより短い → 0
        assert_eq!(scroll_progress(ScrollMetrics::new(100.0, 400.0, 800.0)), 0.0);
        assert_eq!(scroll_progress(ScrollMetrics::new(100.0, 800.0, 800.0)), 0.0);
    }

    #[test]
    fn test_progress_non_finite() {
        assert_eq!(scroll_progress(ScrollMetrics::new(f64::NAN, 1500.0, 500.0)), 0.0);
        assert_eq!(scroll_progress(ScrollMetrics::new(10.0, f64::INFINITY, 500.0)), 0.0);
    }

    #[test]
    fn test_tracker_notifies_on_change_only() {
        let tracker = ScrollTracker::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _sub = tracker.subscribe(move |p| sink.borrow_mut().push(p));

        let m = ScrollMetrics::new(500.0, 1500.0, 500.0);
        assert_eq!(tracker.update(m), 0.5);
        assert_eq!(tracker.update(m), 0.5);
        tracker.update(ScrollMetrics::new(0.0, 1500.0, 500.0));

        assert_eq!(*seen.borrow(), vec![0.5, 0.0]);
        assert_eq!(tracker.progress(), 0.0);
    }

    #[test]
    fn test_subscription_drop_detaches() {
        let tracker = ScrollTracker::new();
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        let sub = tracker.subscribe(move |_| *sink.borrow_mut() += 1);
        assert_eq!(tracker.subscriber_count(), 1);

        tracker.update(ScrollMetrics::new(100.0, 1100.0, 100.0));
        sub.detach();
        assert_eq!(tracker.subscriber_count(), 0);

        tracker.update(ScrollMetrics::new(200.0, 1100.0, 100.0));
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_subscription_outlives_tracker() {
        let tracker = ScrollTracker::new();
        let sub = tracker.subscribe(|_| {});
        drop(tracker);
        drop(sub);
    }

    #[test]
    fn test_listener_may_drop_other_subscription() {
        let tracker = ScrollTracker::new();
        let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let slot = Rc::clone(&victim);
        let _killer = tracker.subscribe(move |_| {
            slot.borrow_mut().take();
        });
        *victim.borrow_mut() = Some(tracker.subscribe(|_| {}));
        assert_eq!(tracker.subscriber_count(), 2);

        tracker.update(ScrollMetrics::new(50.0, 200.0, 100.0));
        assert_eq!(tracker.subscriber_count(), 1);
    }

    #[test]
    fn test_listener_may_update_again() {
        let tracker = ScrollTracker::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let inner_tracker = tracker.clone();
        let sink = Rc::clone(&seen);
        let _rescroll = tracker.subscribe(move |p| {
            sink.borrow_mut().push(p);
            if p > 0.4 {
                // 通知中に先頭へ戻す
                inner_tracker.update(ScrollMetrics::new(0.0, 200.0, 100.0));
            }
        });
        let late = Rc::new(RefCell::new(Vec::new()));
        let late_sink = Rc::clone(&late);
        let _observer = tracker.subscribe(move |p| late_sink.borrow_mut().push(p));

        assert_eq!(tracker.update(ScrollMetrics::new(50.0, 200.0, 100.0)), 0.5);

        // どの購読者にも到着順で届く
        assert_eq!(*seen.borrow(), vec![0.5, 0.0]);
        assert_eq!(*late.borrow(), vec![0.5, 0.0]);
        assert_eq!(tracker.progress(), 0.0);

        tracker.update(ScrollMetrics::new(20.0, 200.0, 100.0));
        assert_eq!(*late.borrow(), vec![0.5, 0.0, 0.2]);
    }
}
