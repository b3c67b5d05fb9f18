use recur_scan_core::{days_since_epoch, Transaction};

/// Number of transactions in `history` whose distance in days from `tx`
/// lies within `tolerance` of a whole multiple of `period`.
///
/// Distances shorter than `period - tolerance` are skipped, so the target
/// itself (distance 0) only counts once the tolerance reaches the period.
/// A zero period matches nothing.
pub fn count_days_apart(
    tx: &Transaction,
    history: &[Transaction],
    period: u32,
    tolerance: u32,
) -> usize {
    if period == 0 {
        tracing::debug!("count_days_apart called with a zero period");
        return 0;
    }

    let period = i64::from(period);
    let tolerance = i64::from(tolerance);
    let target_days = days_since_epoch(&tx.date);

    history
        .iter()
        .filter(|t| {
            let distance = (days_since_epoch(&t.date) - target_days).abs();
            if distance < period - tolerance {
                return false;
            }
            let remainder = distance % period;
            remainder <= tolerance || period - remainder <= tolerance
        })
        .count()
}
