//! Query Module
//! Filtering, sorting and aggregation over the combined drought table.
//! All queries run against an immutable snapshot; nothing here mutates.

use polars::prelude::*;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::regions::REGIONS;

/// Which drought index a query projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexKind {
    Vci,
    Tci,
    Vhi,
}

impl IndexKind {
    pub const ALL: [IndexKind; 3] = [IndexKind::Vci, IndexKind::Tci, IndexKind::Vhi];

    /// Column name in the combined table.
    pub fn column(self) -> &'static str {
        match self {
            IndexKind::Vci => "vci",
            IndexKind::Tci => "tci",
            IndexKind::Vhi => "vhi",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            IndexKind::Vci => "VCI",
            IndexKind::Tci => "TCI",
            IndexKind::Vhi => "VHI",
        }
    }
}

/// Both sort directions requested at once.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("ascending and descending sort both requested")]
pub struct SortConflict;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    Unsorted,
    Ascending,
    Descending,
}

impl SortOrder {
    /// Resolve the two checkbox flags into an ordering.
    ///
    /// Both flags set is ambiguous: the caller shows a warning and applies
    /// neither ordering.
    pub fn resolve(asc: bool, desc: bool) -> Result<SortOrder, SortConflict> {
        match (asc, desc) {
            (true, true) => Err(SortConflict),
            (true, false) => Ok(SortOrder::Ascending),
            (false, true) => Ok(SortOrder::Descending),
            (false, false) => Ok(SortOrder::Unsorted),
        }
    }
}

/// One read query: fixed region, inclusive week/year windows, chosen index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    pub region_id: i32,
    pub week_range: (i32, i32),
    pub year_range: (i32, i32),
    pub index: IndexKind,
    pub sort: SortOrder,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            region_id: 1,
            week_range: (1, 52),
            year_range: (2000, 2021),
            index: IndexKind::Vhi,
            sort: SortOrder::Unsorted,
        }
    }
}

/// Project `[year, week, <index>, region_id]` for one region over the
/// requested week/year windows, optionally sorted by the index value.
pub fn filter_table(df: &DataFrame, params: &QueryParams) -> PolarsResult<DataFrame> {
    let (w0, w1) = params.week_range;
    let (y0, y1) = params.year_range;
    let index_col = params.index.column();

    let mut lazy = df
        .clone()
        .lazy()
        .filter(
            col("region_id")
                .eq(lit(params.region_id))
                .and(col("week").gt_eq(lit(w0)))
                .and(col("week").lt_eq(lit(w1)))
                .and(col("year").gt_eq(lit(y0)))
                .and(col("year").lt_eq(lit(y1))),
        )
        .select([col("year"), col("week"), col(index_col), col("region_id")]);

    lazy = match params.sort {
        SortOrder::Unsorted => lazy,
        SortOrder::Ascending => lazy.sort([index_col], SortMultipleOptions::default()),
        SortOrder::Descending => lazy.sort(
            [index_col],
            SortMultipleOptions::default().with_order_descending(true),
        ),
    };

    lazy.collect()
}

/// Mean of the chosen index grouped by week for the query's region, sorted
/// by week. Returns `[week, mean]` pairs ready for plotting.
pub fn weekly_mean(df: &DataFrame, params: &QueryParams) -> PolarsResult<Vec<[f64; 2]>> {
    let index_col = params.index.column();
    let unsorted = QueryParams {
        sort: SortOrder::Unsorted,
        ..*params
    };

    let grouped = filter_table(df, &unsorted)?
        .lazy()
        .group_by([col("week")])
        .agg([col(index_col).mean()])
        .sort(["week"], SortMultipleOptions::default())
        .collect()?;

    let weeks = grouped.column("week")?.i32()?;
    let means = grouped.column(index_col)?.f64()?;

    Ok(weeks
        .into_iter()
        .zip(means)
        .filter_map(|(week, mean)| Some([week? as f64, mean?]))
        .collect())
}

/// Raw values of the chosen index column.
pub fn index_values(df: &DataFrame, index: IndexKind) -> PolarsResult<Vec<f64>> {
    Ok(df
        .column(index.column())?
        .f64()?
        .into_iter()
        .flatten()
        .collect())
}

/// Values of the chosen index per region over a week/year window, for the
/// boxplot comparison. Regions with no rows in the window are omitted.
pub fn region_distributions(
    df: &DataFrame,
    index: IndexKind,
    week_range: (i32, i32),
    year_range: (i32, i32),
) -> Vec<(i32, Vec<f64>)> {
    REGIONS
        .par_iter()
        .map(|&(region_id, _)| {
            let params = QueryParams {
                region_id,
                week_range,
                year_range,
                index,
                sort: SortOrder::Unsorted,
            };
            let values = filter_table(df, &params)
                .and_then(|sub| index_values(&sub, index))
                .unwrap_or_default();
            (region_id, values)
        })
        .filter(|(_, values)| !values.is_empty())
        .collect()
}
