use crate::data::model::{Observation, Pollutant, Weather};

/// The three pairwise views shown side by side: PM2.5 against each weather field.
pub const SCATTER_VIEWS: [(Weather, Pollutant); 3] = [
    (Weather::Temp, Pollutant::Pm25),
    (Weather::Pres, Pollutant::Pm25),
    (Weather::Dewp, Pollutant::Pm25),
];

/// `[weather, pollutant]` points, skipping rows with either value missing.
pub fn scatter_points(rows: &[&Observation], x: Weather, y: Pollutant) -> Vec<[f64; 2]> {
    rows.iter()
        .map(|obs| [obs.weather(x), obs.pollutant(y)])
        .filter(|[a, b]| !a.is_nan() && !b.is_nan())
        .collect()
}
