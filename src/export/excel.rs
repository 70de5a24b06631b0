//! Excel生成（CLI版）
//!
//! ブック本体は共通ライブラリで作り、ここではファイルに書き出すだけ。

use crate::error::{ExplorerError, Result};
use art_explorer_common::export::excel_core::generate_bundle_excel_buffer;
use art_explorer_common::ResultBundle;
use std::path::Path;

pub fn generate_excel(bundle: &ResultBundle, output_path: &Path, exported_at: &str) -> Result<()> {
    let buffer = generate_bundle_excel_buffer(bundle, exported_at).map_err(ExplorerError::ExcelGeneration)?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output_path, buffer)?;
    Ok(())
}
