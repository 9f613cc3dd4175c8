pub const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Hourly rate used when the configuration does not override it.
pub const DEFAULT_RATE_PER_HOUR: i64 = 20;

/// Whole hours billed for a stay, rounding any partial hour up.
///
/// The duration is `exit_time - entry_time` with no guard against a negative
/// value: clock skew yields zero or negative hours. A zero-length stay bills
/// zero hours.
pub fn billable_hours(entry_time: i64, exit_time: i64) -> i64 {
    let elapsed = exit_time - entry_time;
    let whole = elapsed.div_euclid(MILLIS_PER_HOUR);
    if elapsed.rem_euclid(MILLIS_PER_HOUR) > 0 {
        whole + 1
    } else {
        whole
    }
}

/// `ceil((exit - entry) / 1h) * rate_per_hour`, in whole currency units.
pub fn calculate_fee(entry_time: i64, exit_time: i64, rate_per_hour: i64) -> i64 {
    billable_hours(entry_time, exit_time).saturating_mul(rate_per_hour)
}
