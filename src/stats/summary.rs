//! Summary Statistics Module
//! Five-number boxplot summaries for the region comparison view.

/// Boxplot statistics for one group of values.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub count: usize,
    pub mean: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
}

impl BoxSummary {
    /// Compute from raw values. Whiskers are the extreme data points within
    /// 1.5 IQR of the quartiles. Returns `None` for an empty slice.
    pub fn from_values(values: &[f64]) -> Option<BoxSummary> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let q1 = percentile(&sorted, 25.0);
        let median = percentile(&sorted, 50.0);
        let q3 = percentile(&sorted, 75.0);
        let iqr = q3 - q1;

        let whisker_low = sorted
            .iter()
            .copied()
            .find(|&v| v >= q1 - 1.5 * iqr)
            .unwrap_or(q1);
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= q3 + 1.5 * iqr)
            .unwrap_or(q3);

        let mean = values.iter().sum::<f64>() / values.len() as f64;

        Some(BoxSummary {
            count: values.len(),
            mean,
            q1,
            median,
            q3,
            whisker_low,
            whisker_high,
        })
    }
}

/// Percentile using linear interpolation (NumPy compatible).
fn percentile(sorted_values: &[f64], p: f64) -> f64 {
    let n = sorted_values.len();
    if n == 0 {
        return f64::NAN;
    }
    if n == 1 {
        return sorted_values[0];
    }

    let rank = (p / 100.0) * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = (rank.ceil() as usize).min(n - 1);
    let frac = rank - lower as f64;

    if lower == upper {
        sorted_values[lower]
    } else {
        sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quartiles_interpolate() {
        let values = [1.0, 2.0, 3.0, 4.0];
        let s = BoxSummary::from_values(&values).unwrap();
        assert_eq!(s.q1, 1.75);
        assert_eq!(s.median, 2.5);
        assert_eq!(s.q3, 3.25);
        assert_eq!(s.mean, 2.5);
        assert_eq!(s.count, 4);
    }

    #[test]
    fn whiskers_exclude_outliers() {
        let mut values: Vec<f64> = (1..=10).map(f64::from).collect();
        values.push(100.0);

        let s = BoxSummary::from_values(&values).unwrap();
        assert_eq!(s.whisker_high, 10.0);
        assert_eq!(s.whisker_low, 1.0);
    }

    #[test]
    fn single_value_degenerates() {
        let s = BoxSummary::from_values(&[7.0]).unwrap();
        assert_eq!(s.median, 7.0);
        assert_eq!(s.whisker_low, 7.0);
        assert_eq!(s.whisker_high, 7.0);
    }

    #[test]
    fn empty_is_none() {
        assert!(BoxSummary::from_values(&[]).is_none());
    }
}
