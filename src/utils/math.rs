//! Mathematical utility functions for drop statistics
//!
//! Rate calculations with zero-division handling, and the rounding helpers
//! used to derive histogram ranges.

/// Calculate percentage safely for usize values, returning 0.0 if total is zero.
///
/// # Examples
/// ```
/// use droplog_reports::utils::math::safe_percentage;
///
/// assert_eq!(safe_percentage(50, 100), 50.0);
/// assert_eq!(safe_percentage(1, 4), 25.0);
/// assert_eq!(safe_percentage(50, 0), 0.0);  // Zero-division guard
/// ```
#[inline]
pub fn safe_percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

/// Chance (in percent) that a single run yields a drop.
///
/// `runs_with_drop` is the number of distinct runs that yielded at least one
/// matching record and `log_count` the number of runs in the window, so the
/// result stays within [0, 100] when a run yields several records.
#[inline]
pub fn drop_chance(runs_with_drop: usize, log_count: usize) -> f64 {
    safe_percentage(runs_with_drop, log_count)
}

/// Average amount dropped per run (not per drop).
#[inline]
pub fn per_run(total_quantity: i64, log_count: usize) -> f64 {
    if log_count == 0 {
        0.0
    } else {
        total_quantity as f64 / log_count as f64
    }
}

/// Round `value` down to the nearest multiple of `step`.
///
/// ```
/// use droplog_reports::utils::math::floor_to_nearest;
/// assert_eq!(floor_to_nearest(1499, 1000), 1000);
/// assert_eq!(floor_to_nearest(2000, 1000), 2000);
/// assert_eq!(floor_to_nearest(-1, 1000), -1000);
/// ```
#[inline]
pub fn floor_to_nearest(value: i64, step: i64) -> i64 {
    value.div_euclid(step) * step
}

/// Round `value` up to the nearest multiple of `step`.
///
/// ```
/// use droplog_reports::utils::math::ceil_to_nearest;
/// assert_eq!(ceil_to_nearest(1001, 1000), 2000);
/// assert_eq!(ceil_to_nearest(2000, 1000), 2000);
/// ```
#[inline]
pub fn ceil_to_nearest(value: i64, step: i64) -> i64 {
    let floored = floor_to_nearest(value, step);
    if floored == value {
        value
    } else {
        floored + step
    }
}
