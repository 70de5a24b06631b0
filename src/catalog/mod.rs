//! ローカル画像カタログ
//!
//! `<ルート>/<ジャンル>/<作家>_<タイトル>-<制作年>.<拡張子>` のフォルダを走査し、
//! シード作品の一覧を作る。

mod filename;

pub use filename::{parse_filename, title_case, ParsedFilename};

use crate::error::{ExplorerError, Result};
use art_explorer_common::{Artwork, Repository};
use rayon::prelude::*;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// 走査で見つけた画像
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub path: PathBuf,
    pub genre: String,
    pub file_name: String,
}

/// ジャンルフォルダ直下の画像を列挙（ルート直下のファイルは対象外）
pub fn scan_catalog(root: &Path) -> Result<Vec<CatalogEntry>> {
    if !root.is_dir() {
        return Err(ExplorerError::FolderNotFound(root.display().to_string()));
    }

    let mut entries = Vec::new();

    for entry in WalkDir::new(root)
        .min_depth(2)
        .max_depth(2)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() || !is_image_extension(path) {
            continue;
        }

        let genre = path
            .parent()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        entries.push(CatalogEntry {
            path: path.to_path_buf(),
            genre,
            file_name,
        });
    }

    entries.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(entries)
}

/// カタログを作品一覧に変換
///
/// 内容のハッシュは並列に計算する。同じ内容の画像は最初の1件だけ残す。
pub fn load_catalog(root: &Path) -> Result<Vec<Artwork>> {
    let entries = scan_catalog(root)?;
    if entries.is_empty() {
        return Err(ExplorerError::NoImagesFound(root.display().to_string()));
    }

    let hashed: Vec<(CatalogEntry, String)> = entries
        .into_par_iter()
        .map(|entry| -> Result<(CatalogEntry, String)> {
            let bytes = std::fs::read(&entry.path)?;
            let digest = hex::encode(Sha256::digest(&bytes));
            Ok((entry, digest))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut seen = HashSet::new();
    let mut artworks = Vec::with_capacity(hashed.len());
    for (entry, digest) in hashed {
        let id = format!("local-{}", &digest[..12]);
        if !seen.insert(id.clone()) {
            tracing::warn!(path = %entry.path.display(), "duplicate image skipped");
            continue;
        }
        artworks.push(to_artwork(&entry, id));
    }

    tracing::debug!(root = %root.display(), count = artworks.len(), "catalog loaded");

    Ok(artworks)
}

/// カタログをシードとするリポジトリ
pub fn load_repository(root: &Path) -> Result<Repository> {
    let seeds = load_catalog(root)?;
    Ok(Repository::with_seeds(seeds)?)
}

fn to_artwork(entry: &CatalogEntry, id: String) -> Artwork {
    let parsed = parse_filename(&entry.file_name);
    let genre = title_case(&entry.genre.replace(['-', '_'], " "));
    let genre = if genre.is_empty() { "未分類".to_string() } else { genre };
    let title = if parsed.title.is_empty() { entry.file_name.clone() } else { parsed.title };

    Artwork {
        id,
        url: entry.path.display().to_string(),
        title,
        artist: parsed.artist.unwrap_or_else(|| "不明".to_string()),
        year: parsed.year.unwrap_or_default(),
        style: genre.clone(),
        description: String::new(),
        similarity: None,
        style_labels: vec![genre],
        source: None,
    }
}

fn is_image_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, relative: &str, content: &[u8]) {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_scan_catalog_not_found() {
        let result = scan_catalog(Path::new("/nonexistent/catalog"));
        assert!(matches!(result, Err(ExplorerError::FolderNotFound(_))));
    }

    #[test]
    fn test_scan_catalog_genre_folders_only() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "loose.jpg", b"a");
        write(dir.path(), "baroque/rembrandt_night-watch-1642.jpg", b"b");
        write(dir.path(), "baroque/notes.txt", b"c");
        write(dir.path(), "impressionism/claude-monet_impression-sunrise-1872.PNG", b"d");

        let entries = scan_catalog(dir.path()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].genre, "baroque");
        assert_eq!(entries[1].file_name, "claude-monet_impression-sunrise-1872.PNG");
    }

    #[test]
    fn test_load_catalog_builds_artworks() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "high_renaissance/raphael_school-of-athens-1511.jpg", b"athens");
        write(dir.path(), "high_renaissance/zz-copy_of-athens.jpg", b"athens");
        write(dir.path(), "ukiyo-e/hokusai_great-wave_0a1b2c3d.jpg", b"wave");

        let artworks = load_catalog(dir.path()).unwrap();
        assert_eq!(artworks.len(), 2);

        let athens = artworks.iter().find(|a| a.title == "School Of Athens").unwrap();
        assert_eq!(athens.artist, "Raphael");
        assert_eq!(athens.year, "1511");
        assert_eq!(athens.style_labels, vec!["High Renaissance".to_string()]);
        assert!(athens.id.starts_with("local-"));

        let wave = artworks.iter().find(|a| a.artist == "Hokusai").unwrap();
        assert_eq!(wave.title, "Great Wave");
        assert_eq!(wave.style, "Ukiyo E");
    }

    #[test]
    fn test_load_repository_with_unnamed_artist() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "cubism/pablo-picasso_guernica-1937.jpg", b"guernica");
        write(dir.path(), "cubism/_untitled-1910.jpg", b"untitled");

        let repo = load_repository(dir.path()).unwrap();
        assert_eq!(repo.list_seed_artworks().len(), 2);

        let untitled = repo.list_seed_artworks().iter().find(|a| a.title == "Untitled").unwrap();
        assert_eq!(untitled.artist, "不明");
        assert_eq!(untitled.year, "1910");
    }

    #[test]
    fn test_load_catalog_empty() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("empty-genre")).unwrap();
        assert!(matches!(load_catalog(dir.path()), Err(ExplorerError::NoImagesFound(_))));
    }

    #[test]
    fn test_load_repository_resolves_local_seed() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "cubism/pablo-picasso_guernica-1937.jpg", b"guernica");

        let repo = load_repository(dir.path()).unwrap();
        let seed = repo.list_seed_artworks()[0].clone();
        let bundle = repo.build_result_bundle(&seed);
        assert_eq!(bundle.root, seed);
        assert!(bundle.validate().is_ok());
    }
}
