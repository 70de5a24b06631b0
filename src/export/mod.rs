pub mod excel;
pub mod json;

use crate::error::Result;
use art_explorer_common::ResultBundle;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Excel,
    #[default]
    Both,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "both" => Ok(ExportFormat::Both),
            _ => Err(format!("Unknown format: {}. Use json, excel, or both", s)),
        }
    }
}

/// 出力日時（概要シート・ファイル名用）
pub fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M").to_string()
}

/// 既定のファイル名（拡張子なし）
pub fn default_stem(bundle: &ResultBundle) -> String {
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    format!("{}-{}", sanitize(&bundle.root.id), stamp)
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

fn output_path_for_format(output: &Path, stem: &str, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", stem, extension))
    } else {
        output.to_path_buf()
    }
}

fn output_paths_for_both(output: &Path, stem: &str) -> (PathBuf, PathBuf) {
    if output.is_dir() || output.extension().is_none() {
        (
            output.join(format!("{}.json", stem)),
            output.join(format!("{}.xlsx", stem)),
        )
    } else {
        let parent = output.parent().unwrap_or_else(|| Path::new("."));
        let stem = output.file_stem().and_then(|s| s.to_str()).unwrap_or(stem);
        (
            parent.join(format!("{}.json", stem)),
            parent.join(format!("{}.xlsx", stem)),
        )
    }
}

/// 探索結果を書き出し、出力したパスを返す
pub fn export_bundle(bundle: &ResultBundle, format: ExportFormat, output: &Path, stem: &str) -> Result<Vec<PathBuf>> {
    if output.extension().is_none() {
        std::fs::create_dir_all(output)?;
    }

    let exported_at = timestamp();
    let mut written = Vec::new();

    match format {
        ExportFormat::Json => {
            let path = output_path_for_format(output, stem, "json");
            json::write_bundle_json(bundle, &path)?;
            println!("✔ JSON出力: {}", path.display());
            written.push(path);
        }
        ExportFormat::Excel => {
            let path = output_path_for_format(output, stem, "xlsx");
            println!("- Excelを生成中...");
            excel::generate_excel(bundle, &path, &exported_at)?;
            println!("✔ Excel出力: {}", path.display());
            written.push(path);
        }
        ExportFormat::Both => {
            let (json_path, excel_path) = output_paths_for_both(output, stem);

            json::write_bundle_json(bundle, &json_path)?;
            println!("✔ JSON出力: {}", json_path.display());

            println!("- Excelを生成中...");
            excel::generate_excel(bundle, &excel_path, &exported_at)?;
            println!("✔ Excel出力: {}", excel_path.display());

            written.push(json_path);
            written.push(excel_path);
        }
    }

    Ok(written)
}
