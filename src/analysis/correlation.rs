use serde::Serialize;

use super::stats::pearson;
use crate::data::model::{Observation, Pollutant, Variable, Weather};

/// Columns of the correlation matrix: three weather fields, then the pollutants.
pub const MATRIX_VARIABLES: [Variable; 9] = [
    Variable::Weather(Weather::Temp),
    Variable::Weather(Weather::Pres),
    Variable::Weather(Weather::Dewp),
    Variable::Pollutant(Pollutant::Pm25),
    Variable::Pollutant(Pollutant::Pm10),
    Variable::Pollutant(Pollutant::So2),
    Variable::Pollutant(Pollutant::No2),
    Variable::Pollutant(Pollutant::Co),
    Variable::Pollutant(Pollutant::O3),
];

/// Square, symmetric matrix of pairwise correlations.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationMatrix {
    pub variables: Vec<Variable>,
    /// Row-major; `values[i][j]` is the correlation of variable i with j.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values
            .get(i)
            .and_then(|row| row.get(j))
            .copied()
            .unwrap_or(f64::NAN)
    }

    pub fn size(&self) -> usize {
        self.variables.len()
    }
}

/// Pairwise Pearson correlation among `variables` over `rows`.
pub fn correlation_matrix(rows: &[&Observation], variables: &[Variable]) -> CorrelationMatrix {
    let n = variables.len();
    let mut values = vec![vec![f64::NAN; n]; n];
    for i in 0..n {
        for j in i..n {
            let r = pearson(
                rows.iter()
                    .map(|obs| (obs.value(variables[i]), obs.value(variables[j]))),
            );
            values[i][j] = r;
            values[j][i] = r;
        }
    }
    CorrelationMatrix {
        variables: variables.to_vec(),
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::observation;

    fn rows() -> Vec<Observation> {
        (0..24)
            .map(|h| {
                let mut obs = observation((2013, 3, 1), h, 0.0);
                let x = h as f64;
                obs.temp = x;
                obs.pres = 1030.0 - x * 0.5;
                obs.dewp = (x * 1.7).sin();
                obs.pm25 = 10.0 + x * x;
                obs.pm10 = 20.0 + x;
                obs.so2 = (x * 0.3).cos();
                obs.no2 = 5.0 + (x % 5.0);
                obs.co = 300.0 - x;
                obs.o3 = 40.0 + (x % 7.0) * 3.0;
                obs
            })
            .collect()
    }

    #[test]
    fn matrix_is_symmetric_with_unit_diagonal() {
        let data = rows();
        let refs: Vec<&Observation> = data.iter().collect();
        let m = correlation_matrix(&refs, &MATRIX_VARIABLES);

        assert_eq!(m.size(), 9);
        for i in 0..m.size() {
            assert!((m.get(i, i) - 1.0).abs() < 1e-12);
            for j in 0..m.size() {
                assert_eq!(m.get(i, j), m.get(j, i));
                assert!((-1.0..=1.0).contains(&m.get(i, j)));
            }
        }
    }

    #[test]
    fn constant_field_yields_nan_entries() {
        let mut data = rows();
        for obs in &mut data {
            obs.so2 = 4.0;
        }
        let refs: Vec<&Observation> = data.iter().collect();
        let m = correlation_matrix(&refs, &MATRIX_VARIABLES);
        let so2 = MATRIX_VARIABLES
            .iter()
            .position(|v| *v == Variable::Pollutant(Pollutant::So2))
            .unwrap();
        for j in 0..m.size() {
            assert!(m.get(so2, j).is_nan());
        }
    }

    #[test]
    fn empty_subset_is_all_nan() {
        let m = correlation_matrix(&[], &MATRIX_VARIABLES);
        assert!(m.values.iter().flatten().all(|v| v.is_nan()));
    }
}
