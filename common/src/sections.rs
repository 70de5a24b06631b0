//! セクション番号マッパー
//!
//! 進捗値とセクションごとの閾値から「現在のセクション番号」を求める。

use crate::error::{ExploreError, Result};

/// セクションごとの開始閾値（非減少、各値は [0, 1]）
#[derive(Debug, Clone, PartialEq)]
pub struct SectionThresholds(Vec<f64>);

impl SectionThresholds {
    /// 等間隔 i / n
    ///
    /// n = 0 は1セクション扱い。
    pub fn evenly_spaced(count: usize) -> Self {
        let n = count.max(1);
        Self((0..n).map(|i| i as f64 / n as f64).collect())
    }

    /// 任意の閾値
    pub fn custom(thresholds: Vec<f64>) -> Result<Self> {
        if thresholds.is_empty() {
            return Err(ExploreError::Validation("thresholds are empty".into()));
        }
        if let Some(t) = thresholds.iter().find(|t| !(0.0..=1.0).contains(*t)) {
            return Err(ExploreError::Validation(format!(
                "threshold {} is outside [0, 1]",
                t
            )));
        }
        if thresholds.windows(2).any(|w| w[1] < w[0]) {
            return Err(ExploreError::Validation(
                "thresholds must be non-decreasing".into(),
            ));
        }
        Ok(Self(thresholds))
    }

    /// 閾値列を順に受け取る（セクション定義のscroll_triggerなど）
    pub fn from_triggers<I>(triggers: I) -> Result<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        Self::custom(triggers.into_iter().collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// 進捗値 → セクション番号
///
/// `progress >= t[i]` を満たす最大の i。同値の閾値は大きい番号が勝つ。
/// どれも満たさなければ0。
pub fn map_progress_to_index(progress: f64, thresholds: &SectionThresholds) -> usize {
    if progress.is_nan() {
        return 0;
    }
    thresholds
        .as_slice()
        .partition_point(|t| *t <= progress)
        .saturating_sub(1)
}
