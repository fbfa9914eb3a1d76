//! Numeric helpers for derived run statistics
//!
//! Every derived figure exposed to callers is rounded to one decimal place.

/// Milliseconds per minute
pub const MILLIS_PER_MINUTE: f64 = 60_000.0;

/// Round to one decimal place (half away from zero)
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Convert a millisecond duration to minutes, rounded to one decimal
pub fn millis_to_minutes(millis: i64) -> f64 {
    round1(millis as f64 / MILLIS_PER_MINUTE)
}

/// Arithmetic mean of the values, rounded to one decimal
///
/// Returns `None` for an empty input.
pub fn mean1<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        None
    } else {
        Some(round1(sum / count as f64))
    }
}
