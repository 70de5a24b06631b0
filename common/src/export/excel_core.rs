//! Excel生成（共通ライブラリ）
//!
//! 探索結果をシート3枚（概要・類似度・スタイル）のブックにしてバッファで返す。

use crate::types::{Artwork, ResultBundle};
use rust_xlsxwriter::*;

const HEADERS: [&str; 7] = ["順位", "タイトル", "作家", "制作年", "類似度", "ラベル", "所蔵"];
const COLUMN_WIDTHS: [f64; 7] = [6.0, 28.0, 22.0, 12.0, 8.0, 30.0, 26.0];

struct Formats {
    title: Format,
    label: Format,
    value: Format,
    header: Format,
    group: Format,
    score: Format,
}

impl Formats {
    fn new() -> Self {
        let border = |f: Format| f.set_border(FormatBorder::Hair).set_border_color(Color::RGB(0xAAAAAA));
        Self {
            title: Format::new()
                .set_bold()
                .set_font_size(14.0)
                .set_align(FormatAlign::Left)
                .set_align(FormatAlign::VerticalCenter),
            label: border(
                Format::new()
                    .set_bold()
                    .set_font_size(9.0)
                    .set_font_color(Color::RGB(0x555555))
                    .set_background_color(Color::RGB(0xF5F5F5)),
            ),
            value: border(Format::new().set_font_size(11.0).set_text_wrap()),
            header: border(
                Format::new()
                    .set_bold()
                    .set_background_color(Color::RGB(0xF5F5F5))
                    .set_align(FormatAlign::Center),
            ),
            group: Format::new()
                .set_bold()
                .set_font_color(Color::RGB(0x333333))
                .set_background_color(Color::RGB(0xE8EEF7)),
            score: border(Format::new().set_num_format("0.00")),
        }
    }
}

/// 探索結果のExcelをバッファに生成
///
/// # Arguments
/// * `bundle` - 探索結果
/// * `exported_at` - 概要シートに載せる出力日時
pub fn generate_bundle_excel_buffer(bundle: &ResultBundle, exported_at: &str) -> Result<Vec<u8>, String> {
    let formats = Formats::new();
    let mut workbook = Workbook::new();

    write_summary_sheet(&mut workbook, bundle, exported_at, &formats)?;
    write_similarity_sheet(&mut workbook, bundle, &formats)?;
    write_style_sheet(&mut workbook, bundle, &formats)?;

    workbook
        .save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}

fn write_summary_sheet(workbook: &mut Workbook, bundle: &ResultBundle, exported_at: &str, formats: &Formats) -> Result<(), String> {
    let sheet = workbook.add_worksheet();
    sheet.set_name("概要").map_err(|e| format!("シート名設定エラー: {}", e))?;
    sheet.set_column_width(0, 14.0).map_err(|e| format!("列幅設定エラー: {}", e))?;
    sheet.set_column_width(1, 60.0).map_err(|e| format!("列幅設定エラー: {}", e))?;

    sheet
        .merge_range(0, 0, 0, 1, &bundle.root.title, &formats.title)
        .map_err(|e| format!("セルマージエラー: {}", e))?;

    let root = &bundle.root;
    let similar = bundle.similarity_results.len().to_string();
    let groups = bundle.style_groups.len().to_string();
    let labels = root.style_labels.join(" / ");
    let rows: [(&str, &str); 9] = [
        ("作家", root.artist.as_str()),
        ("制作年", root.year.as_str()),
        ("様式", root.style.as_str()),
        ("ラベル", labels.as_str()),
        ("説明", root.description.as_str()),
        ("画像", root.url.as_str()),
        ("類似作品数", similar.as_str()),
        ("スタイル数", groups.as_str()),
        ("出力日時", exported_at),
    ];

    for (i, (label, value)) in rows.iter().enumerate() {
        let row = i as u32 + 2;
        sheet
            .write_string_with_format(row, 0, *label, &formats.label)
            .map_err(|e| format!("ラベル書き込みエラー: {}", e))?;
        sheet
            .write_string_with_format(row, 1, *value, &formats.value)
            .map_err(|e| format!("値書き込みエラー: {}", e))?;
    }

    Ok(())
}

fn write_similarity_sheet(workbook: &mut Workbook, bundle: &ResultBundle, formats: &Formats) -> Result<(), String> {
    let sheet = workbook.add_worksheet();
    sheet.set_name("類似度").map_err(|e| format!("シート名設定エラー: {}", e))?;
    write_header(sheet, 0, formats)?;

    for (i, artwork) in bundle.similarity_results.iter().enumerate() {
        write_artwork_row(sheet, i as u32 + 1, i + 1, artwork, formats)?;
    }

    Ok(())
}

fn write_style_sheet(workbook: &mut Workbook, bundle: &ResultBundle, formats: &Formats) -> Result<(), String> {
    let sheet = workbook.add_worksheet();
    sheet.set_name("スタイル").map_err(|e| format!("シート名設定エラー: {}", e))?;
    write_header(sheet, 0, formats)?;

    let mut row: u32 = 1;
    for group in &bundle.style_groups {
        let heading = if group.description.is_empty() {
            group.style_name.clone()
        } else {
            format!("{}: {}", group.style_name, group.description)
        };
        sheet
            .merge_range(row, 0, row, HEADERS.len() as u16 - 1, &heading, &formats.group)
            .map_err(|e| format!("セルマージエラー: {}", e))?;
        row += 1;

        for (i, artwork) in group.artworks.iter().enumerate() {
            write_artwork_row(sheet, row, i + 1, artwork, formats)?;
            row += 1;
        }
    }

    Ok(())
}

fn write_header(sheet: &mut Worksheet, row: u32, formats: &Formats) -> Result<(), String> {
    for (col, (header, width)) in HEADERS.iter().zip(COLUMN_WIDTHS).enumerate() {
        let col = col as u16;
        sheet
            .set_column_width(col, width)
            .map_err(|e| format!("列幅設定エラー: {}", e))?;
        sheet
            .write_string_with_format(row, col, *header, &formats.header)
            .map_err(|e| format!("ヘッダー書き込みエラー: {}", e))?;
    }
    Ok(())
}

fn write_artwork_row(sheet: &mut Worksheet, row: u32, rank: usize, artwork: &Artwork, formats: &Formats) -> Result<(), String> {
    let texts = [
        (1u16, artwork.title.as_str()),
        (2, artwork.artist.as_str()),
        (3, if artwork.year.is_empty() { "-" } else { artwork.year.as_str() }),
        (6, artwork.source.as_deref().unwrap_or("-")),
    ];

    sheet
        .write_number_with_format(row, 0, rank as f64, &formats.value)
        .map_err(|e| format!("値書き込みエラー: {}", e))?;
    for (col, text) in texts {
        sheet
            .write_string_with_format(row, col, text, &formats.value)
            .map_err(|e| format!("値書き込みエラー: {}", e))?;
    }
    sheet
        .write_number_with_format(row, 4, artwork.similarity.unwrap_or(0.0), &formats.score)
        .map_err(|e| format!("値書き込みエラー: {}", e))?;
    sheet
        .write_string_with_format(row, 5, artwork.style_labels.join(", "), &formats.value)
        .map_err(|e| format!("値書き込みエラー: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::Repository;

    #[test]
    fn test_generate_bundle_excel_buffer() {
        let repo = Repository::builtin();
        let root = repo.find_seed("great-wave").cloned().unwrap();
        let bundle = repo.build_result_bundle(&root);

        let buffer = generate_bundle_excel_buffer(&bundle, "2026-01-01 00:00").expect("Excel生成失敗");
        // xlsxはzip形式
        assert_eq!(&buffer[..2], b"PK");
    }

    #[test]
    fn test_generate_without_groups() {
        let repo = Repository::builtin();
        let mut root = repo.find_seed("scream").cloned().unwrap();
        root.style_labels = vec!["該当なし".to_string()];
        let bundle = repo.build_result_bundle(&root);
        assert!(bundle.style_groups.is_empty());

        assert!(generate_bundle_excel_buffer(&bundle, "").is_ok());
    }
}
