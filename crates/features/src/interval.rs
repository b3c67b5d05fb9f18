//! Spacing statistics over the transactions that share a vendor name with
//! the target.

use recur_scan_core::{parse_date, Transaction};

/// Standard deviation (in days) at which the regularity score drops to 0.5.
pub const REGULARITY_SENSITIVITY: f64 = 5.0;

/// Day gaps between chronologically adjacent transactions whose `name`
/// matches `tx.name` exactly. Returns `None` when fewer than `min_count`
/// such transactions exist.
fn same_vendor_gaps(
    tx: &Transaction,
    history: &[Transaction],
    min_count: usize,
) -> Option<Vec<i64>> {
    let mut dates: Vec<_> = history
        .iter()
        .filter(|t| t.name == tx.name)
        .map(|t| parse_date(&t.date))
        .collect();

    if dates.len() < min_count {
        tracing::trace!(
            vendor = %tx.name,
            found = dates.len(),
            needed = min_count,
            "not enough same-vendor transactions"
        );
        return None;
    }

    dates.sort();

    Some(
        dates
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).num_days())
            .collect(),
    )
}

fn mean(values: &[i64]) -> f64 {
    values.iter().sum::<i64>() as f64 / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator); 0.0 below two values.
fn sample_std_dev(values: &[i64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let avg = mean(values);
    let sum_sq: f64 = values
        .iter()
        .map(|&v| {
            let d = v as f64 - avg;
            d * d
        })
        .sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

/// Mean day gap between consecutive same-vendor transactions.
/// 0.0 with fewer than two of them.
pub fn average_gap_days(tx: &Transaction, history: &[Transaction]) -> f64 {
    match same_vendor_gaps(tx, history, 2) {
        Some(gaps) if !gaps.is_empty() => mean(&gaps),
        _ => 0.0,
    }
}

/// Inverse dispersion of same-vendor day gaps, in (0, 1].
///
/// 1.0 means perfectly even spacing; the score halves once the sample
/// standard deviation reaches [`REGULARITY_SENSITIVITY`] days. Requires at
/// least three same-vendor transactions, otherwise 0.0.
pub fn regularity_score(tx: &Transaction, history: &[Transaction]) -> f64 {
    match same_vendor_gaps(tx, history, 3) {
        Some(gaps) if !gaps.is_empty() => {
            1.0 / (1.0 + sample_std_dev(&gaps) / REGULARITY_SENSITIVITY)
        }
        _ => 0.0,
    }
}
