use serde::Serialize;
use crate::watched::WatchedRecord;

/// Aggregate figures shown above the watched list.
///
/// Averages are taken over the records that carry the field; a list with no
/// values averages to zero.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct WatchedSummary {
    pub count: usize,
    pub avg_imdb_rating: f64,
    pub avg_user_rating: f64,
    pub avg_runtime: f64,
}

impl WatchedSummary {
    pub fn from_records(records: &[WatchedRecord]) -> Self {
        Self {
            count: records.len(),
            avg_imdb_rating: average(records.iter().filter_map(|r| r.imdb_rating)),
            avg_user_rating: average(records.iter().map(|r| f64::from(r.user_rating.value()))),
            avg_runtime: average(records.iter().filter_map(|r| r.runtime_minutes.map(f64::from))),
        }
    }

    /// IMDb average, one decimal.
    pub fn imdb_rating_display(&self) -> String {
        format!("{:.1}", round_to(self.avg_imdb_rating, 1))
    }

    /// User average, one decimal.
    pub fn user_rating_display(&self) -> String {
        format!("{:.1}", round_to(self.avg_user_rating, 1))
    }

    /// Runtime average, whole minutes.
    pub fn runtime_display(&self) -> String {
        format!("{:.0}", round_to(self.avg_runtime, 0))
    }
}

pub fn average<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
