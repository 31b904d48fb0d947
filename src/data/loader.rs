//! Dataset Loader Module
//! Builds the combined drought-index table from a directory of per-region
//! VHI files using Polars.

use std::fs;
use std::path::Path;

use log::{info, warn};
use polars::prelude::*;
use thiserror::Error;

/// VHI value meaning "no measurement" in the source files.
pub const VHI_SENTINEL: f64 = -1.0;

/// Markup artifacts embedded in the raw text of the year column.
const OPEN_TAG: &str = "<tt><pre>";
const CLOSE_TAG: &str = "</pre></tt>";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
    #[error("filename {0:?} has no numeric region token")]
    BadRegionToken(String),
}

/// Result of loading a dataset directory.
#[derive(Debug)]
pub struct DatasetLoad {
    /// Combined, deduplicated table of all regions.
    pub table: DataFrame,
    pub files_loaded: usize,
    pub files_skipped: usize,
}

/// Load every region file in `dir` into one combined table.
///
/// A file that fails to parse (bad filename token, unreadable, malformed
/// columns) contributes no rows and does not abort the load; only a
/// directory-level I/O failure is surfaced. Exact duplicate rows shared
/// between source files collapse to a single row.
pub fn load_directory(dir: &Path) -> Result<DatasetLoad, LoaderError> {
    let mut paths: Vec<_> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    paths.sort();

    let mut table = empty_table()?;
    let mut files_loaded = 0;
    let mut files_skipped = 0;

    for path in &paths {
        match parse_region_file(path) {
            Ok(df) => {
                table.vstack_mut(&df)?;
                files_loaded += 1;
            }
            Err(err) => {
                warn!("skipping {}: {err}", path.display());
                files_skipped += 1;
            }
        }
    }

    let table = table
        .lazy()
        .unique_stable(None, UniqueKeepStrategy::First)
        .collect()?;

    info!(
        "loaded {} rows from {} files ({} skipped)",
        table.height(),
        files_loaded,
        files_skipped
    );

    Ok(DatasetLoad {
        table,
        files_loaded,
        files_skipped,
    })
}

/// Parse one per-region file into a table slice tagged with its region id.
///
/// Layout: line 1 is a title, line 2 a column header; data rows follow with
/// eight comma- or whitespace-delimited fields
/// (`year, week, smn, smt, vci, tci, vhi, <ignored>`). The trailing field is
/// discarded and replaced by the region id derived from the filename.
pub fn parse_region_file(path: &Path) -> Result<DataFrame, LoaderError> {
    let region_id = region_id_from_path(path)?;
    let text = fs::read_to_string(path)?;

    let mut years: Vec<i32> = Vec::new();
    let mut weeks: Vec<i32> = Vec::new();
    let mut smn: Vec<f64> = Vec::new();
    let mut smt: Vec<f64> = Vec::new();
    let mut vci: Vec<f64> = Vec::new();
    let mut tci: Vec<f64> = Vec::new();
    let mut vhi: Vec<f64> = Vec::new();

    for line in text.lines().skip(2) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = if line.contains(',') {
            line.split(',').map(str::trim).collect()
        } else {
            line.split_whitespace().collect()
        };
        if fields.len() < 7 {
            continue;
        }

        let year_raw = fields[0].replace(OPEN_TAG, "");
        if year_raw.contains(CLOSE_TAG) {
            continue;
        }
        let Ok(year) = year_raw.trim().parse::<i32>() else {
            continue;
        };
        let Ok(week) = fields[1].parse::<i32>() else {
            continue;
        };
        let Some(metrics) = parse_metrics(&fields[2..7]) else {
            continue;
        };
        if metrics[4] == VHI_SENTINEL {
            continue;
        }

        years.push(year);
        weeks.push(week);
        smn.push(metrics[0]);
        smt.push(metrics[1]);
        vci.push(metrics[2]);
        tci.push(metrics[3]);
        vhi.push(metrics[4]);
    }

    let height = years.len();
    let df = DataFrame::new(vec![
        Column::new("year".into(), years),
        Column::new("week".into(), weeks),
        Column::new("smn".into(), smn),
        Column::new("smt".into(), smt),
        Column::new("vci".into(), vci),
        Column::new("tci".into(), tci),
        Column::new("vhi".into(), vhi),
        Column::new("region_id".into(), vec![region_id; height]),
    ])?;

    Ok(df)
}

/// The region id is the second `_`-delimited token of the filename.
fn region_id_from_path(path: &Path) -> Result<i32, LoaderError> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();

    name.split('_')
        .nth(1)
        .and_then(|token| token.parse::<i32>().ok())
        .ok_or_else(|| LoaderError::BadRegionToken(name.to_string()))
}

fn parse_metrics(fields: &[&str]) -> Option<[f64; 5]> {
    let mut out = [0.0; 5];
    for (slot, token) in out.iter_mut().zip(fields) {
        *slot = token.parse::<f64>().ok()?;
    }
    Some(out)
}

fn empty_table() -> PolarsResult<DataFrame> {
    DataFrame::new(vec![
        Column::new("year".into(), Vec::<i32>::new()),
        Column::new("week".into(), Vec::<i32>::new()),
        Column::new("smn".into(), Vec::<f64>::new()),
        Column::new("smt".into(), Vec::<f64>::new()),
        Column::new("vci".into(), Vec::<f64>::new()),
        Column::new("tci".into(), Vec::<f64>::new()),
        Column::new("vhi".into(), Vec::<f64>::new()),
        Column::new("region_id".into(), Vec::<i32>::new()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const PREAMBLE: &str = "Provincial VHI time series\nyear,week,SMN,SMT,VCI,TCI,VHI,\n";

    fn write_file(dir: &TempDir, name: &str, rows: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, format!("{PREAMBLE}{rows}")).unwrap();
        path
    }

    #[test]
    fn region_token_comes_from_filename() {
        assert_eq!(
            region_id_from_path(Path::new("vhi_7_Kharkiv.csv")).unwrap(),
            7
        );
        assert!(region_id_from_path(Path::new("vhi_x_Kharkiv.csv")).is_err());
        assert!(region_id_from_path(Path::new("plain.csv")).is_err());
    }

    #[test]
    fn sentinel_rows_are_dropped_others_kept() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "vhi_3_Chernivtsi.csv",
            "2000, 1, 0.05,258.1, 40.5, 38.2, 39.3,\n\
             2000, 2, 0.06,258.4, 41.0, -1.0, -1.0,\n\
             2000, 3, 0.07,258.9, 42.2, 39.9, 41.1,\n",
        );

        let df = parse_region_file(&path).unwrap();
        assert_eq!(df.height(), 2);

        let vhi = df.column("vhi").unwrap().f64().unwrap();
        assert!(vhi.into_iter().flatten().all(|v| v != VHI_SENTINEL));

        // Retained rows keep their original field values.
        let vci = df.column("vci").unwrap().f64().unwrap();
        let vci: Vec<f64> = vci.into_iter().flatten().collect();
        assert_eq!(vci, vec![40.5, 42.2]);
    }

    #[test]
    fn markup_is_stripped_from_year_field() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "vhi_5_Dnipropetrovsk.csv",
            "<tt><pre>2005, 1, 0.05,258.1, 40.5, 38.2, 39.3,\n\
             2005, 2, 0.06,258.4, 41.0, 39.0, 40.0,\n\
             </pre></tt>, 3, 0.07,258.9, 42.2, 39.9, 41.1,\n\
             garbage, 4, 0.08,259.0, 43.0, 40.0, 41.5,\n",
        );

        let df = parse_region_file(&path).unwrap();
        assert_eq!(df.height(), 2);

        let years = df.column("year").unwrap().i32().unwrap();
        let years: Vec<i32> = years.into_iter().flatten().collect();
        assert_eq!(years, vec![2005, 2005]);
    }

    #[test]
    fn non_integer_week_drops_row() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "vhi_1_Cherkasy.csv",
            "2001, one, 0.05,258.1, 40.5, 38.2, 39.3,\n\
             2001, 2, 0.06,258.4, 41.0, 39.0, 40.0,\n",
        );

        let df = parse_region_file(&path).unwrap();
        assert_eq!(df.height(), 1);
    }

    #[test]
    fn every_row_is_tagged_with_the_filename_region() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "vhi_14_Luhansk.csv",
            "2001, 1, 0.05,258.1, 40.5, 38.2, 39.3, 99\n\
             2001, 2, 0.06,258.4, 41.0, 39.0, 40.0, 99\n",
        );

        let df = parse_region_file(&path).unwrap();
        let regions = df.column("region_id").unwrap().i32().unwrap();
        assert!(regions.into_iter().flatten().all(|r| r == 14));
    }

    #[test]
    fn bad_region_file_is_skipped_entirely() {
        let dir = TempDir::new().unwrap();
        write_file(
            &dir,
            "vhi_2_Chernihiv.csv",
            "2001, 1, 0.05,258.1, 40.5, 38.2, 39.3,\n",
        );
        write_file(
            &dir,
            "vhi_bad_token.csv",
            "2001, 1, 0.05,258.1, 40.5, 38.2, 39.3,\n",
        );

        let load = load_directory(dir.path()).unwrap();
        assert_eq!(load.files_loaded, 1);
        assert_eq!(load.files_skipped, 1);
        assert_eq!(load.table.height(), 1);

        let regions = load.table.column("region_id").unwrap().i32().unwrap();
        assert!(regions.into_iter().flatten().all(|r| r == 2));
    }

    #[test]
    fn duplicate_rows_across_files_collapse() {
        let dir = TempDir::new().unwrap();
        let row = "2001, 1, 0.05,258.1, 40.5, 38.2, 39.3,\n";
        write_file(&dir, "vhi_6_Donetsk.csv", row);
        write_file(&dir, "vhi_6_Donetsk_copy.csv", row);

        let load = load_directory(dir.path()).unwrap();
        assert_eq!(load.files_loaded, 2);
        assert_eq!(load.table.height(), 1);
    }

    #[test]
    fn same_row_under_different_regions_is_kept() {
        let dir = TempDir::new().unwrap();
        let row = "2001, 1, 0.05,258.1, 40.5, 38.2, 39.3,\n";
        write_file(&dir, "vhi_6_Donetsk.csv", row);
        write_file(&dir, "vhi_8_Kharkiv.csv", row);

        let load = load_directory(dir.path()).unwrap();
        assert_eq!(load.table.height(), 2);
    }

    #[test]
    fn loading_twice_is_idempotent() {
        let dir = TempDir::new().unwrap();
        write_file(
            &dir,
            "vhi_9_Kherson.csv",
            "2001, 1, 0.05,258.1, 40.5, 38.2, 39.3,\n\
             2001, 2, 0.06,258.4, 41.0, 39.0, 40.0,\n",
        );
        write_file(
            &dir,
            "vhi_10_Khmelnytskyi.csv",
            "2002, 1, 0.07,258.9, 42.2, 39.9, 41.1,\n",
        );

        let sort = |df: DataFrame| {
            df.sort(["year", "week", "region_id"], Default::default())
                .unwrap()
        };
        let first = sort(load_directory(dir.path()).unwrap().table);
        let second = sort(load_directory(dir.path()).unwrap().table);
        assert!(first.equals(&second));
    }

    #[test]
    fn empty_directory_yields_empty_table() {
        let dir = TempDir::new().unwrap();
        let load = load_directory(dir.path()).unwrap();
        assert_eq!(load.table.height(), 0);
        assert_eq!(load.files_loaded, 0);
    }
}
