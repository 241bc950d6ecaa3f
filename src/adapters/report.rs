use crate::domain::model::{LanguageRow, Source, StatsTable};
use crate::domain::ports::{ReportSink, Storage};
use crate::utils::error::Result;
use serde::Serialize;
use std::io::Write;
use zip::write::{SimpleFileOptions, ZipWriter};

const HEADERS: [&str; 4] = [
    "Programming language",
    "Vacancies found",
    "Vacancies processed",
    "Average salary",
];

/// 把統計表以 ASCII 表格印到標準輸出
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalTable;

#[async_trait::async_trait]
impl ReportSink for TerminalTable {
    async fn emit(&self, table: &StatsTable) -> Result<()> {
        println!("{}", render_table(table));
        Ok(())
    }
}

pub fn render_table(table: &StatsTable) -> String {
    let rows: Vec<[String; 4]> = table
        .rows
        .iter()
        .map(|row| {
            [
                row.language.clone(),
                row.stats.vacancies_found.to_string(),
                row.stats.vacancies_processed.to_string(),
                row.stats.average_salary.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let separator = border(&widths, None);
    let mut lines = vec![border(&widths, Some(table.title.as_str()))];
    lines.push(line(&HEADERS.map(str::to_string), &widths, false));
    lines.push(separator.clone());
    for row in &rows {
        lines.push(line(row, &widths, true));
    }
    lines.push(separator);

    if let Some(failure) = &table.failure {
        lines.push(format!("! incomplete: {}", failure));
    }

    lines.join("\n")
}

fn border(widths: &[usize], title: Option<&str>) -> String {
    let mut border = String::from("+");
    for width in widths {
        border.push_str(&"-".repeat(width + 2));
        border.push('+');
    }

    // 標題嵌在上框線裡，放不下就另起一行
    match title {
        Some(title) if title.chars().count() + 2 <= border.chars().count() => {
            let rest: String = border.chars().skip(title.chars().count() + 1).collect();
            format!("+{}{}", title, rest)
        }
        Some(title) => format!("{}\n{}", title, border),
        None => border,
    }
}

fn line(cells: &[String; 4], widths: &[usize; 4], align_numbers: bool) -> String {
    let mut line = String::from("|");
    for (index, (cell, width)) in cells.iter().zip(widths).enumerate() {
        let padding = " ".repeat(width - cell.chars().count());
        if align_numbers && index > 0 {
            line.push_str(&format!(" {}{} |", padding, cell));
        } else {
            line.push_str(&format!(" {}{} |", cell, padding));
        }
    }
    line
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    source: Source,
    title: &'a str,
    generated_at: chrono::DateTime<chrono::Utc>,
    failure: Option<&'a str>,
    languages: &'a [LanguageRow],
}

/// 透過 `Storage` 寫出每個來源的 CSV/JSON 報表，可選擇打包成 ZIP
pub struct FileReport<S: Storage> {
    storage: S,
    formats: Vec<String>,
    compress: bool,
}

impl<S: Storage> FileReport<S> {
    pub fn new(storage: S, formats: Vec<String>, compress: bool) -> Self {
        Self {
            storage,
            formats,
            compress,
        }
    }

    fn render_files(&self, table: &StatsTable) -> Result<Vec<(String, Vec<u8>)>> {
        let slug = table.source.slug();
        let mut files = Vec::new();

        for format in &self.formats {
            match format.as_str() {
                "csv" => files.push((format!("{}.csv", slug), to_csv(table)?)),
                "json" => files.push((format!("{}.json", slug), to_json(table)?)),
                other => tracing::warn!("⚠️ Skipping unsupported output format: {}", other),
            }
        }

        Ok(files)
    }
}

#[async_trait::async_trait]
impl<S: Storage> ReportSink for FileReport<S> {
    async fn emit(&self, table: &StatsTable) -> Result<()> {
        let files = self.render_files(table)?;

        if self.compress {
            let archive_name = format!("{}.zip", table.source.slug());
            let archive = to_zip(&files)?;
            tracing::debug!("Writing {} ({} bytes)", archive_name, archive.len());
            self.storage.write_file(&archive_name, &archive).await?;
            tracing::info!("📦 Report saved: {}", archive_name);
        } else {
            for (name, data) in &files {
                self.storage.write_file(name, data).await?;
                tracing::info!("💾 Report saved: {}", name);
            }
        }

        Ok(())
    }
}

fn to_csv(table: &StatsTable) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["language", "vacancies_found", "vacancies_processed", "average_salary"])?;

    for row in &table.rows {
        writer.write_record([
            row.language.clone(),
            row.stats.vacancies_found.to_string(),
            row.stats.vacancies_processed.to_string(),
            row.stats.average_salary.to_string(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| crate::utils::error::EtlError::IoError(e.into_error()))
}

fn to_json(table: &StatsTable) -> Result<Vec<u8>> {
    let report = JsonReport {
        source: table.source,
        title: &table.title,
        generated_at: chrono::Utc::now(),
        failure: table.failure.as_deref(),
        languages: &table.rows,
    };
    Ok(serde_json::to_vec_pretty(&report)?)
}

fn to_zip(files: &[(String, Vec<u8>)]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

    for (name, data) in files {
        zip.start_file(name.as_str(), SimpleFileOptions::default())?;
        zip.write_all(data)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::LocalStorage;
    use crate::domain::model::{AverageSalary, LanguageStats};
    use std::io::Read;
    use tempfile::TempDir;

    fn sample_table() -> StatsTable {
        let mut table = StatsTable::new(Source::HeadHunter);
        table.push(
            "Python",
            LanguageStats {
                vacancies_found: 1200,
                vacancies_processed: 870,
                average_salary: AverageSalary::Amount(215000),
            },
        );
        table.push(
            "Swift",
            LanguageStats {
                vacancies_found: 3,
                vacancies_processed: 0,
                average_salary: AverageSalary::NotFound,
            },
        );
        table
    }

    #[test]
    fn test_render_table_layout() {
        let rendered = render_table(&sample_table());
        let lines: Vec<&str> = rendered.lines().collect();

        assert!(lines[0].starts_with("+HeadHunter Moscow-"));
        assert!(lines[1].contains("Programming language"));
        assert!(lines[3].starts_with("| Python "));
        assert!(lines[3].contains("   215000 |"));
        assert!(lines[4].contains("not found |"));
        assert_eq!(lines.len(), 6);

        // 每一行寬度一致
        let width = lines[1].chars().count();
        assert!(lines.iter().all(|line| line.chars().count() == width));
    }

    #[test]
    fn test_render_failed_table_notes_failure() {
        let mut table = sample_table();
        table.failure = Some("HeadHunter unavailable while fetching 'Go' page 0: HTTP 503".into());

        let rendered = render_table(&table);
        assert!(rendered.ends_with("! incomplete: HeadHunter unavailable while fetching 'Go' page 0: HTTP 503"));
    }

    #[test]
    fn test_csv_rows_in_table_order() {
        let csv = String::from_utf8(to_csv(&sample_table()).unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "language,vacancies_found,vacancies_processed,average_salary");
        assert_eq!(lines[1], "Python,1200,870,215000");
        assert_eq!(lines[2], "Swift,3,0,not found");
    }

    #[tokio::test]
    async fn test_file_report_writes_csv_and_json() {
        let temp_dir = TempDir::new().unwrap();
        let sink = FileReport::new(
            LocalStorage::new(temp_dir.path()),
            vec!["csv".to_string(), "json".to_string()],
            false,
        );

        sink.emit(&sample_table()).await.unwrap();

        assert!(temp_dir.path().join("headhunter.csv").exists());
        let json: serde_json::Value =
            serde_json::from_slice(&std::fs::read(temp_dir.path().join("headhunter.json")).unwrap())
                .unwrap();
        assert_eq!(json["title"], "HeadHunter Moscow");
        assert_eq!(json["languages"][0]["language"], "Python");
        assert_eq!(json["languages"][0]["stats"]["average_salary"], 215000);
        assert_eq!(json["languages"][1]["stats"]["average_salary"], "not found");
        assert!(json["failure"].is_null());
    }

    #[tokio::test]
    async fn test_file_report_compressed_archive() {
        let temp_dir = TempDir::new().unwrap();
        let sink = FileReport::new(
            LocalStorage::new(temp_dir.path()),
            vec!["csv".to_string(), "json".to_string()],
            true,
        );

        sink.emit(&sample_table()).await.unwrap();

        assert!(!temp_dir.path().join("headhunter.csv").exists());
        let data = std::fs::read(temp_dir.path().join("headhunter.zip")).unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(data)).unwrap();
        assert_eq!(archive.len(), 2);

        let mut csv_content = String::new();
        archive
            .by_name("headhunter.csv")
            .unwrap()
            .read_to_string(&mut csv_content)
            .unwrap();
        assert!(csv_content.contains("Python,1200,870,215000"));
    }
}
