use std::collections::BTreeMap;

use chrono::Timelike;
use serde::Serialize;

use super::stats::mean;
use crate::data::model::{Observation, Pollutant};

/// Summed pollutant averages for one hour of the day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HourlyLevel {
    pub hour: u32,
    pub level: f64,
}

/// Pollution by hour of day, with the busiest hour picked out.
#[derive(Debug, Clone, Serialize)]
pub struct HourlyProfile {
    /// Ascending by hour; only hours present in the data.
    pub levels: Vec<HourlyLevel>,
    pub peak: Option<HourlyLevel>,
}

/// Group rows by hour of day regardless of date, average each pollutant,
/// and sum the six averages into one level per hour.
pub fn hourly_profile(rows: &[&Observation]) -> HourlyProfile {
    let mut by_hour: BTreeMap<u32, Vec<&Observation>> = BTreeMap::new();
    for &obs in rows {
        by_hour.entry(obs.timestamp.hour()).or_default().push(obs);
    }

    let levels: Vec<HourlyLevel> = by_hour
        .into_iter()
        .map(|(hour, bucket)| {
            let level = Pollutant::ALL
                .iter()
                .map(|&p| mean(bucket.iter().map(|obs| obs.pollutant(p))))
                .filter(|m| !m.is_nan())
                .sum();
            HourlyLevel { hour, level }
        })
        .collect();

    let peak = peak_of(&levels);
    HourlyProfile { levels, peak }
}

/// Arg-max over `levels`; the earliest hour wins a tie.
pub fn peak_of(levels: &[HourlyLevel]) -> Option<HourlyLevel> {
    levels.iter().copied().fold(None, |best, candidate| match best {
        Some(b) if candidate.level <= b.level => Some(b),
        _ => Some(candidate),
    })
}
