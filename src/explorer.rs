//! 非同期の選択処理
//!
//! 選択開始 → 待ち時間 → 結果生成（サービスまたは模擬データ）→ 反映 の順に進める。
//! コントローラは単一スレッドで共有するので、処理は同じタスク上で並行させる。

use crate::error::{ExplorerError, Result};
use crate::similarity::SimilarityClient;
use crate::upload::UploadedImage;
use art_explorer_common::mock::mock_similar_images;
use art_explorer_common::{
    Artwork, ExplorationController, LatencyModel, ResultBundle, SelectionInput, SelectionOutcome, SelectionTicket,
};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::cell::RefCell;
use std::rc::Rc;

/// 類似度分岐の作り方
#[derive(Debug, Clone)]
pub enum SimilaritySource {
    /// リポジトリの参照プールから選ぶ
    Repository,
    /// ランダムな模擬データ
    Mock { threshold: f64 },
    /// 外部サービス（アップロード画像のみ、失敗時は模擬データ）
    Service {
        client: SimilarityClient,
        top_k: usize,
        fallback_threshold: f64,
    },
}

/// 選択処理のドライバ
pub struct Explorer {
    controller: Rc<RefCell<ExplorationController>>,
    latency: LatencyModel,
    source: SimilaritySource,
    rng: RefCell<Box<dyn RngCore>>,
    /// 直近の検索で特定できた作品（完全一致）
    identified: RefCell<Option<Artwork>>,
}

impl Explorer {
    pub fn new(controller: ExplorationController, latency: LatencyModel, source: SimilaritySource) -> Self {
        Self {
            controller: Rc::new(RefCell::new(controller)),
            latency,
            source,
            rng: RefCell::new(Box::new(StdRng::from_os_rng())),
            identified: RefCell::new(None),
        }
    }

    /// 乱数を差し替える（テスト用に固定シードなど）
    pub fn with_rng<R: RngCore + 'static>(self, rng: R) -> Self {
        Self {
            rng: RefCell::new(Box::new(rng)),
            ..self
        }
    }

    pub fn controller(&self) -> Rc<RefCell<ExplorationController>> {
        Rc::clone(&self.controller)
    }

    pub fn latency(&self) -> LatencyModel {
        self.latency
    }

    /// 直近のアップロード検索で入力画像がインデックス内の作品と一致していれば、その作品
    pub fn identified_artwork(&self) -> Option<Artwork> {
        self.identified.borrow().clone()
    }

    /// シード作品（idまたはURL）を選択
    pub async fn select_seed(&self, key: &str) -> Result<SelectionOutcome> {
        let root = self
            .controller
            .borrow()
            .repository()
            .resolve(&SelectionInput::Seed(key.to_string()))?;
        self.run_selection(root, None).await
    }

    /// アップロード画像を選択
    pub async fn select_upload(&self, upload: &UploadedImage) -> Result<SelectionOutcome> {
        let root = self
            .controller
            .borrow()
            .repository()
            .resolve(&SelectionInput::Upload(upload.handle.clone()))?;
        self.run_selection(root, Some(upload)).await
    }

    async fn run_selection(&self, root: Artwork, query: Option<&UploadedImage>) -> Result<SelectionOutcome> {
        let ticket = self.controller.borrow_mut().begin_selection(root)?;
        self.identified.replace(None);

        if !self.latency.is_none() {
            tokio::time::sleep(self.latency.duration()).await;
        }

        let bundle = match self.build_bundle(&ticket, query).await {
            Ok(bundle) => bundle,
            Err(e) => {
                self.controller.borrow_mut().abandon_selection(&ticket);
                return Err(e);
            }
        };

        let root_id = ticket.artwork().id.clone();
        let outcome = self.controller.borrow_mut().resolve_selection(ticket, bundle);
        if outcome == SelectionOutcome::Applied {
            tracing::info!(root = %root_id, "selection applied");
        }
        Ok(outcome)
    }

    async fn build_bundle(&self, ticket: &SelectionTicket, query: Option<&UploadedImage>) -> Result<ResultBundle> {
        let root = ticket.artwork();

        match (&self.source, query) {
            (SimilaritySource::Service { client, top_k, fallback_threshold }, Some(upload)) => {
                let response = client
                    .find_similar(upload.bytes.clone(), &upload.handle.file_name, upload.mime_type, *top_k)
                    .await;
                match response {
                    Ok(response) => {
                        let similar = response.artworks(client.base_url());
                        tracing::debug!(found = similar.len(), perfect = response.has_perfect_match, "service results");
                        if let Some(artwork) = response.identified_artwork(client.base_url()) {
                            tracing::info!(title = %artwork.title, "input image identified");
                            self.identified.replace(Some(artwork));
                        }
                        Ok(self.controller.borrow().repository().build_with_similar(root, similar))
                    }
                    Err(e) if is_degradable(&e) => {
                        tracing::warn!(error = %e, "similarity service unavailable, using mock results");
                        Ok(self.mock_bundle(root, *fallback_threshold))
                    }
                    Err(e) => Err(e),
                }
            }
            (SimilaritySource::Service { fallback_threshold, .. }, None) => Ok(self.mock_bundle(root, *fallback_threshold)),
            (SimilaritySource::Mock { threshold }, _) => Ok(self.mock_bundle(root, *threshold)),
            (SimilaritySource::Repository, _) => Ok(self.controller.borrow().repository().build_result_bundle(root)),
        }
    }

    fn mock_bundle(&self, root: &Artwork, threshold: f64) -> ResultBundle {
        let similar = {
            let mut rng = self.rng.borrow_mut();
            mock_similar_images(root, threshold, &mut **rng)
        };
        self.controller.borrow().repository().build_with_similar(root, similar)
    }
}

/// 模擬データに切り替えてよいエラー
fn is_degradable(error: &ExplorerError) -> bool {
    match error {
        ExplorerError::ServiceStatus { status, .. } => *status >= 500,
        ExplorerError::ServiceResponse(_) => true,
        other => other.is_unreachable(),
    }
}
