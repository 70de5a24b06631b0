//! カタログ画像のファイル名解析
//!
//! `<作家>_<タイトル>-<制作年>.<拡張子>` 形式（例: `jan-steen_return-of-the-prodigal-son-1670.jpg`）

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref EXTENSION: Regex = Regex::new(r"(?i)\.(jpg|jpeg|png)$").unwrap();
    static ref TRAILING_YEAR: Regex = Regex::new(r"-(\d{4})$").unwrap();
    static ref TRAILING_HASH: Regex = Regex::new(r"_[a-f0-9]{8}$").unwrap();
    static ref TRAILING_NUMBER: Regex = Regex::new(r"-\d+$").unwrap();
}

/// ファイル名から読み取った作品情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFilename {
    pub artist: Option<String>,
    pub title: String,
    pub year: Option<String>,
}

/// ファイル名を解析
pub fn parse_filename(file_name: &str) -> ParsedFilename {
    let base = EXTENSION.replace(file_name, "");
    let parts: Vec<&str> = base.split('_').collect();

    if parts.len() < 2 {
        return ParsedFilename {
            artist: None,
            title: title_case(&base.replace('-', " ")),
            year: None,
        };
    }

    let title_part = parts[1..].join("_");
    let year = TRAILING_YEAR
        .captures(&title_part)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string());

    let title = TRAILING_YEAR.replace(&title_part, "");
    let title = TRAILING_HASH.replace(&title, "");
    let title = TRAILING_NUMBER.replace(&title, "");

    let artist = title_case(&parts[0].replace('-', " "));

    ParsedFilename {
        artist: (!artist.is_empty()).then_some(artist),
        title: title_case(&title.replace(['-', '_'], " ")),
        year,
    }
}

/// 単語ごとに先頭を大文字化
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
