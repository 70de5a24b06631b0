use crate::error::Result;
use art_explorer_common::ResultBundle;
use std::path::Path;

/// 探索結果をJSONで保存
pub fn write_bundle_json(bundle: &ResultBundle, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(bundle)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// 保存済みの探索結果を読み込む
pub fn read_bundle_json(path: &Path) -> Result<ResultBundle> {
    let content = std::fs::read_to_string(path)?;
    let bundle: ResultBundle = serde_json::from_str(&content)?;
    bundle.validate()?;
    Ok(bundle)
}
