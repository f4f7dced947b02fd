//! Shared ratio helpers.

/// Returns `part / whole * 100`, or `0.0` when `whole` is zero.
#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "Reporting ratios are floating point; task counts stay far below 2^52"
)]
pub(super) fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 * 100.0 / whole as f64
}

/// Returns the arithmetic mean of `total` over `count` samples, or `0.0`
/// when there are none.
#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "Averages are reported as floating point; inputs stay far below 2^52"
)]
pub(super) fn mean(total: i64, count: u64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    total as f64 / count as f64
}
