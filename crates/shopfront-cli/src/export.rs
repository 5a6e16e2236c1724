//! `export` command handler.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{Local, NaiveDate};
use shopfront_client::ShopClient;
use shopfront_core::{AppConfig, StoreSettings};
use shopfront_report::{
    export_filename, products_report, render, sales_report, sellers_report, DateRange,
    ExportFormat, ReportError, ReportKind, ReportTable,
};

use crate::source::read_json_array;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ExportArgs {
    pub kind: ReportKind,
    pub file: Option<PathBuf>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub format: ExportFormat,
    pub out: PathBuf,
}

/// Resolve the sales window; without `--start` it covers the month before `end`.
///
/// # Errors
///
/// Returns [`ReportError::InvalidDateRange`] when `end` precedes `start`.
pub(crate) fn resolve_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<DateRange, ReportError> {
    let end = end.unwrap_or(today);
    match start {
        Some(start) => DateRange::new(start, end),
        None => Ok(DateRange::last_month(end)),
    }
}

/// Fetch rows, build the report table and write it to `args.out`.
///
/// An empty data set prints `No data to export` and writes nothing.
///
/// # Errors
///
/// Returns an error if the rows cannot be loaded, the date range is
/// inverted, or the file cannot be written.
pub(crate) async fn run_export(
    args: &ExportArgs,
    settings: &StoreSettings,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let today = Local::now().date_naive();
    let range = resolve_range(args.start, args.end, today)?;

    let built = match args.file.as_deref() {
        Some(path) => build_from_file(args.kind, path, &range)?,
        None => build_from_api(args.kind, &range, config).await?,
    };

    let table = match built {
        Ok(table) => table,
        Err(ReportError::NoData) => {
            println!("{}", ReportError::NoData);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let filename = export_filename(args.kind, &settings.platform_store, args.format, today);
    let path = write_report(&table, args.format, &args.out, &filename)?;
    println!(
        "Exported {} {} rows to {}",
        table.data_rows().count(),
        args.kind,
        path.display()
    );
    Ok(())
}

fn build_from_file(
    kind: ReportKind,
    path: &Path,
    range: &DateRange,
) -> anyhow::Result<Result<ReportTable, ReportError>> {
    Ok(match kind {
        ReportKind::Sales => sales_report(&read_json_array(path)?, range),
        ReportKind::Products => products_report(&read_json_array(path)?),
        ReportKind::Sellers => sellers_report(&read_json_array(path)?),
    })
}

async fn build_from_api(
    kind: ReportKind,
    range: &DateRange,
    config: &AppConfig,
) -> anyhow::Result<Result<ReportTable, ReportError>> {
    let client = ShopClient::from_config(config).context("failed to build API client")?;
    let context = || format!("failed to fetch {kind} export from {}", config.api_url);
    Ok(match kind {
        ReportKind::Sales => sales_report(
            &client
                .export_sales(range.start, range.end)
                .await
                .with_context(context)?,
            range,
        ),
        ReportKind::Products => {
            products_report(&client.export_products().await.with_context(context)?)
        }
        ReportKind::Sellers => {
            sellers_report(&client.export_sellers().await.with_context(context)?)
        }
    })
}

/// Render `table` and write it under `dir`, creating the directory if needed.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub(crate) fn write_report(
    table: &ReportTable,
    format: ExportFormat,
    dir: &Path,
    filename: &str,
) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(filename);
    std::fs::write(&path, render(table, format)?)
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), kind = %table.kind, "report written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn default_range_is_the_month_before_today() {
        let range = resolve_range(None, None, day(2024, 5, 15)).unwrap();
        assert_eq!(range.start, day(2024, 4, 15));
        assert_eq!(range.end, day(2024, 5, 15));
    }

    #[test]
    fn explicit_range_is_validated() {
        let inverted = resolve_range(Some(day(2024, 5, 2)), Some(day(2024, 5, 1)), day(2024, 6, 1));
        assert!(inverted.is_err());

        let range =
            resolve_range(Some(day(2024, 1, 1)), Some(day(2024, 1, 31)), day(2024, 6, 1)).unwrap();
        assert_eq!(range.to_string(), "2024-01-01 to 2024-01-31");
    }

    #[test]
    fn empty_file_yields_no_data() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("sellers.json");
        std::fs::write(&input, "[]").unwrap();
        let range = resolve_range(None, None, day(2024, 5, 15)).unwrap();

        let built = build_from_file(ReportKind::Sellers, &input, &range).unwrap();
        assert_eq!(built, Err(ReportError::NoData));
    }

    #[test]
    fn writes_csv_report_from_file_rows() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("products.json");
        std::fs::write(
            &input,
            r#"[{"asin": "B01", "productName": "Lamp, desk", "category": "Home",
                 "price": 20, "rating": 4.0, "reviewsCount": 3, "salesCount": 5,
                 "stockQuantity": 7, "seller": "MouadVision"}]"#,
        )
        .unwrap();
        let range = resolve_range(None, None, day(2024, 5, 15)).unwrap();
        let table = build_from_file(ReportKind::Products, &input, &range)
            .unwrap()
            .unwrap();

        let out = dir.path().join("exports");
        let path = write_report(&table, ExportFormat::Csv, &out, "report.csv").unwrap();
        let written = std::fs::read_to_string(path).unwrap();

        assert!(written.starts_with('\u{feff}'));
        assert!(written.contains("B01,\"Lamp, desk\",Home,20.00,7,4,3,5,MouadVision,100.00"));
        assert!(written.ends_with("SUMMARY,1 Products,,,7,4.0,,,,100.00"));
    }
}
