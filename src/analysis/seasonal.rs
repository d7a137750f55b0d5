use std::collections::BTreeMap;

use chrono::Datelike;
use serde::Serialize;

use super::stats::mean;
use crate::data::model::{Observation, Pollutant};

/// Calendar month, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    /// Months since year 0, used as a continuous plot axis.
    pub fn ordinal(self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }

    pub fn from_ordinal(ordinal: i64) -> Self {
        YearMonth {
            year: ordinal.div_euclid(12) as i32,
            month: ordinal.rem_euclid(12) as u32 + 1,
        }
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Average pollutant levels for one calendar month.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyAverage {
    pub month: YearMonth,
    pub rows: usize,
    /// Indexed like [`Pollutant::ALL`].
    pub means: [f64; 6],
}

impl MonthlyAverage {
    pub fn mean_of(&self, p: Pollutant) -> f64 {
        Pollutant::ALL
            .iter()
            .position(|&q| q == p)
            .map(|i| self.means[i])
            .unwrap_or(f64::NAN)
    }
}

/// Bucket rows by calendar month and average each pollutant.
///
/// Months without rows do not appear in the output.
pub fn monthly_averages(rows: &[&Observation]) -> Vec<MonthlyAverage> {
    let mut buckets: BTreeMap<YearMonth, Vec<&Observation>> = BTreeMap::new();
    for &obs in rows {
        let key = YearMonth {
            year: obs.timestamp.year(),
            month: obs.timestamp.month(),
        };
        buckets.entry(key).or_default().push(obs);
    }

    buckets
        .into_iter()
        .map(|(month, bucket)| MonthlyAverage {
            month,
            rows: bucket.len(),
            means: Pollutant::ALL.map(|p| mean(bucket.iter().map(|obs| obs.pollutant(p)))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::observation;

    #[test]
    fn buckets_are_ordered_and_gaps_absent() {
        let data = vec![
            observation((2013, 5, 3), 0, 30.0),
            observation((2013, 3, 1), 0, 10.0),
            observation((2013, 3, 31), 23, 20.0),
            observation((2014, 1, 1), 0, 7.0),
        ];
        let refs: Vec<&Observation> = data.iter().collect();
        let months = monthly_averages(&refs);

        let keys: Vec<String> = months.iter().map(|m| m.month.to_string()).collect();
        assert_eq!(keys, vec!["2013-03", "2013-05", "2014-01"]);
        assert_eq!(months[0].rows, 2);
        assert_eq!(months[0].mean_of(Pollutant::Pm25), 15.0);
        assert_eq!(months[1].mean_of(Pollutant::O3), 30.0);
    }

    #[test]
    fn missing_values_are_skipped() {
        let mut a = observation((2013, 3, 1), 0, 10.0);
        a.co = f64::NAN;
        let b = observation((2013, 3, 2), 0, 20.0);
        let months = monthly_averages(&[&a, &b]);
        assert_eq!(months[0].mean_of(Pollutant::Co), 20.0);
        assert_eq!(months[0].mean_of(Pollutant::No2), 15.0);
    }

    #[test]
    fn ordinal_round_trips() {
        let ym = YearMonth { year: 2016, month: 12 };
        assert_eq!(YearMonth::from_ordinal(ym.ordinal()), ym);
        assert_eq!(YearMonth::from_ordinal(ym.ordinal() + 1), YearMonth { year: 2017, month: 1 });
    }

    #[test]
    fn empty_subset_has_no_months() {
        assert!(monthly_averages(&[]).is_empty());
    }
}
