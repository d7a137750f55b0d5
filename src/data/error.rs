use thiserror::Error;

/// Typed failures raised while turning a CSV file into a dataset.
#[derive(Error, Debug, PartialEq)]
pub enum DataError {
    /// A required header is absent from the file.
    #[error("CSV missing required column '{0}'")]
    MissingColumn(String),

    /// year/month/day/hour do not form a valid date-time.
    #[error("Row {row}: {year}-{month}-{day} hour {hour} is not a valid timestamp")]
    InvalidTimestamp {
        row: usize,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
    },
}
