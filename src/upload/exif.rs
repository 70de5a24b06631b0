use std::io::Cursor;

/// EXIFの撮影日時（DateTimeOriginal → DateTime の順）
pub fn extract_date(bytes: &[u8]) -> Result<String, Box<dyn std::error::Error>> {
    let mut cursor = Cursor::new(bytes);
    let exif_reader = exif::Reader::new();
    let exif = exif_reader.read_from_container(&mut cursor)?;

    for tag in [exif::Tag::DateTimeOriginal, exif::Tag::DateTime] {
        if let Some(field) = exif.get_field(tag, exif::In::PRIMARY) {
            return Ok(field.display_value().to_string());
        }
    }

    Err("No date found in EXIF".into())
}

/// 日時文字列の先頭4桁を年として取り出す
pub fn year_of(date: &str) -> Option<&str> {
    let year = date.get(..4)?;
    year.chars().all(|c| c.is_ascii_digit()).then_some(year)
}
