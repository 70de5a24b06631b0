//! アップロード画像の受け付け
//!
//! 画像ファイルを読み、形式チェック・プレビュー生成・ID採番をして
//! コアに渡す不透明なハンドルを作る。

mod exif;

use crate::error::{ExplorerError, Result};
use art_explorer_common::UploadHandle;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::ImageFormat;
use sha2::{Digest, Sha256};
use std::io::Cursor;
use std::path::Path;

/// プレビューの最大辺（px）
pub const PREVIEW_MAX_SIZE: u32 = 256;

/// 受け付ける形式
const ACCEPTED_FORMATS: &[ImageFormat] = &[ImageFormat::Jpeg, ImageFormat::Png, ImageFormat::WebP, ImageFormat::Gif];

/// 読み込んだアップロード画像
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub handle: UploadHandle,
    /// 元のバイト列（サービス送信用）
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
    pub width: u32,
    pub height: u32,
}

/// 画像ファイルを読み込む
pub fn load_upload(path: &Path) -> Result<UploadedImage> {
    if !path.is_file() {
        return Err(ExplorerError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    from_bytes(&file_name, bytes)
}

/// バイト列から作成
pub fn from_bytes(file_name: &str, bytes: Vec<u8>) -> Result<UploadedImage> {
    let format = image::guess_format(&bytes)
        .map_err(|e| ExplorerError::ImageLoad(format!("{}: {}", file_name, e)))?;
    if !ACCEPTED_FORMATS.contains(&format) {
        return Err(ExplorerError::ImageLoad(format!(
            "{}: 対応していない形式です ({:?})",
            file_name, format
        )));
    }

    let image = image::load_from_memory_with_format(&bytes, format)
        .map_err(|e| ExplorerError::ImageLoad(format!("{}: {}", file_name, e)))?;

    let preview_url = preview_data_url(&image)?;
    let captured = exif::extract_date(&bytes)
        .ok()
        .and_then(|date| exif::year_of(&date).map(str::to_string))
        .unwrap_or_default();

    tracing::debug!(file_name, width = image.width(), height = image.height(), "upload accepted");

    Ok(UploadedImage {
        handle: UploadHandle {
            id: upload_id(&bytes),
            file_name: file_name.to_string(),
            preview_url,
            captured,
        },
        mime_type: format.to_mime_type(),
        width: image.width(),
        height: image.height(),
        bytes,
    })
}

/// 内容から決まるID（upload- + SHA-256先頭12桁）
pub fn upload_id(bytes: &[u8]) -> String {
    let digest = hex::encode(Sha256::digest(bytes));
    format!("upload-{}", &digest[..12])
}

/// 縮小PNGのdata URL
fn preview_data_url(image: &image::DynamicImage) -> Result<String> {
    let thumbnail = image.thumbnail(PREVIEW_MAX_SIZE, PREVIEW_MAX_SIZE);
    let mut png = Vec::new();
    thumbnail
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| ExplorerError::ImageLoad(format!("プレビュー生成に失敗: {}", e)))?;
    Ok(format!("data:image/png;base64,{}", STANDARD.encode(&png)))
}
