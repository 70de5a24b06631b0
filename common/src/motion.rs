//! スクロール連動の変形値
//!
//! 進捗値から各作品カードの拡大率・不透明度・位置を求める。
//! 描画側はここで得た値をそのまま適用するだけ。

/// 区分線形補間
///
/// `input` は非減少。範囲外は端の値に張り付く。
/// 長さが合わない・空の場合は `output` の先頭（なければ0）。
pub fn interpolate(progress: f64, input: &[f64], output: &[f64]) -> f64 {
    if input.is_empty() || input.len() != output.len() {
        return output.first().copied().unwrap_or(0.0);
    }
    if progress.is_nan() || progress <= input[0] {
        return output[0];
    }

    for i in 0..input.len() - 1 {
        let (a, b) = (input[i], input[i + 1]);
        if progress <= b {
            if b <= a {
                return output[i + 1];
            }
            let t = (progress - a) / (b - a);
            return output[i] + (output[i + 1] - output[i]) * t;
        }
    }

    output[output.len() - 1]
}

/// n件中i番目の担当区間 [start, end)
pub fn section_window(index: usize, count: usize) -> (f64, f64) {
    let n = count.max(1) as f64;
    let i = index.min(count.saturating_sub(1)) as f64;
    (i / n, (i + 1.0) / n)
}

/// 区間内での進み具合（インジケータの塗り）
pub fn indicator_fill(progress: f64, index: usize, count: usize) -> f64 {
    let (start, end) = section_window(index, count);
    if progress.is_nan() {
        return 0.0;
    }
    ((progress - start) / (end - start)).clamp(0.0, 1.0)
}

/// 作品カード1枚分の変形値
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArtworkTransforms {
    pub image_scale: f64,
    pub image_opacity: f64,
    /// 縦方向のずれ（px）
    pub image_y: f64,
    /// 説明文の横方向のずれ（px）
    pub text_x: f64,
    pub text_opacity: f64,
}

impl ArtworkTransforms {
    /// フェード幅（画像）
    const IMAGE_FADE: f64 = 0.1;
    /// フェード幅（説明文）
    const TEXT_FADE: f64 = 0.05;

    pub fn at(progress: f64, index: usize, count: usize) -> Self {
        let (start, end) = section_window(index, count);
        let image_keys = [start - Self::IMAGE_FADE, start, end, end + Self::IMAGE_FADE];

        // 区間が狭いときは内側の2点を中央に寄せる
        let mid = (start + end) / 2.0;
        let text_keys = [
            start - Self::TEXT_FADE,
            (start + Self::TEXT_FADE).min(mid),
            (end - Self::TEXT_FADE).max(mid),
            end + Self::TEXT_FADE,
        ];

        Self {
            image_scale: interpolate(progress, &image_keys, &[0.8, 1.0, 1.0, 0.8]),
            image_opacity: interpolate(progress, &image_keys, &[0.3, 1.0, 1.0, 0.3]),
            image_y: interpolate(progress, &image_keys, &[100.0, 0.0, 0.0, -100.0]),
            text_x: interpolate(progress, &image_keys, &[100.0, 0.0, 0.0, -100.0]),
            text_opacity: interpolate(progress, &text_keys, &[0.0, 1.0, 1.0, 0.0]),
        }
    }
}

/// バネの定数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    /// 目標との差がこれ未満で静止とみなす
    pub rest_delta: f64,
    pub rest_speed: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 30.0,
            mass: 1.0,
            rest_delta: 0.001,
            rest_speed: 0.01,
        }
    }
}

/// 進捗値の平滑化
#[derive(Debug, Clone, PartialEq)]
pub struct Spring {
    config: SpringConfig,
    value: f64,
    velocity: f64,
    target: f64,
}

impl Spring {
    /// 1ステップの最大時間（秒）
    const MAX_STEP: f64 = 1.0 / 120.0;

    pub fn new(initial: f64, config: SpringConfig) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn set_target(&mut self, target: f64) {
        if target.is_finite() {
            self.target = target;
        }
    }

    pub fn is_at_rest(&self) -> bool {
        (self.target - self.value).abs() < self.config.rest_delta
            && self.velocity.abs() < self.config.rest_speed
    }

    /// `dt` 秒進めて現在値を返す
    pub fn step(&mut self, dt: f64) -> f64 {
        if !dt.is_finite() || dt <= 0.0 {
            return self.value;
        }

        let mut remaining = dt;
        while remaining > 0.0 && !self.is_at_rest() {
            let h = remaining.min(Self::MAX_STEP);
            let displacement = self.value - self.target;
            let force = -self.config.stiffness * displacement - self.config.damping * self.velocity;
            self.velocity += force / self.config.mass * h;
            self.value += self.velocity * h;
            remaining -= h;
        }

        if self.is_at_rest() {
            self.value = self.target;
            self.velocity = 0.0;
        }
        self.value
    }
}
