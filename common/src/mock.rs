//! ランダムな模擬類似画像
//!
//! 類似度サービスに接続できないときのデモ用データ。乱数は呼び出し側が渡す。

use crate::types::Artwork;
use rand::Rng;

/// 模擬検索の待ち時間の既定値
pub const MOCK_SEARCH_LATENCY_MS: u64 = 800;

/// 最少件数
pub const MIN_RESULTS: usize = 3;

pub const MOCK_STYLE_LABELS: [&str; 12] = [
    "抽象",
    "幾何学",
    "大胆な色彩",
    "高コントラスト",
    "ミニマリズム",
    "表現主義",
    "キュビスム",
    "シュルレアリスム",
    "ポップアート",
    "印象派",
    "ポスト印象派",
    "写実主義",
];

pub const MOCK_SOURCES: [&str; 9] = [
    "ニューヨーク近代美術館",
    "テート・モダン",
    "ポンピドゥー・センター",
    "グッゲンハイム美術館",
    "ホイットニー美術館",
    "メトロポリタン美術館",
    "ロンドン・ナショナル・ギャラリー",
    "ルーヴル美術館",
    "ウフィツィ美術館",
];

/// 閾値から件数を決める（閾値が低いほど多い）
pub fn result_count(threshold: f64) -> usize {
    let threshold = if threshold.is_finite() {
        threshold.clamp(0.0, 1.0)
    } else {
        0.5
    };
    (((1.0 - threshold) * 12.0).floor() as usize).max(MIN_RESULTS)
}

/// 模擬類似画像を生成（類似度の降順）
pub fn mock_similar_images<R: Rng + ?Sized>(root: &Artwork, threshold: f64, rng: &mut R) -> Vec<Artwork> {
    let count = result_count(threshold);

    let mut images: Vec<Artwork> = (0..count)
        .map(|i| {
            let labels = random_labels(rng);
            let source = MOCK_SOURCES[rng.random_range(0..MOCK_SOURCES.len())];
            let similarity = (1.0 - i as f64 * 0.05 - rng.random::<f64>() * 0.05).clamp(0.5, 0.98);

            Artwork {
                id: format!("mock-{}-{}", root.id, i + 1),
                url: format!("https://picsum.photos/800/600?random={}", i + 10),
                title: format!("類似作品 {}", i + 1),
                artist: "不明".to_string(),
                year: String::new(),
                style: labels[0].clone(),
                description: format!("「{}」に似た作品", root.title),
                similarity: Some(similarity),
                style_labels: labels,
                source: Some(source.to_string()),
            }
        })
        .collect();

    images.sort_by(|a, b| {
        b.similarity
            .unwrap_or(0.0)
            .total_cmp(&a.similarity.unwrap_or(0.0))
    });

    tracing::debug!(root = %root.id, threshold, count, "generated mock similar images");
    images
}

/// 重複のないラベルを1〜3個
fn random_labels<R: Rng + ?Sized>(rng: &mut R) -> Vec<String> {
    let count = rng.random_range(1..=3);
    let mut labels: Vec<String> = Vec::with_capacity(count);
    while labels.len() < count {
        let label = MOCK_STYLE_LABELS[rng.random_range(0..MOCK_STYLE_LABELS.len())];
        if !labels.iter().any(|l| l == label) {
            labels.push(label.to_string());
        }
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::builtin_seeds;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_result_count() {
        assert_eq!(result_count(0.5), 6);
        assert_eq!(result_count(0.0), 12);
        assert_eq!(result_count(0.9), 3);
        assert_eq!(result_count(1.0), 3);
        assert_eq!(result_count(f64::NAN), 6);
    }

    #[test]
    fn test_mock_images_shape() {
        let root = &builtin_seeds()[0];
        let mut rng = StdRng::seed_from_u64(7);
        let images = mock_similar_images(root, 0.3, &mut rng);
        assert_eq!(images.len(), 8);

        for image in &images {
            assert!(image.validate().is_ok());
            let score = image.similarity.unwrap();
            assert!((0.5..=0.98).contains(&score));
            assert!((1..=3).contains(&image.style_labels.len()));
            let mut labels = image.style_labels.clone();
            labels.sort();
            labels.dedup();
            assert_eq!(labels.len(), image.style_labels.len());
        }

        assert!(images
            .windows(2)
            .all(|w| w[0].similarity >= w[1].similarity));
    }

    #[test]
    fn test_mock_images_reproducible_with_seed() {
        let root = &builtin_seeds()[1];
        let a = mock_similar_images(root, 0.5, &mut StdRng::seed_from_u64(42));
        let b = mock_similar_images(root, 0.5, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
