use recur_scan_core::{day_of_month, Transaction};

/// Number of transactions in `history` whose day of month is within
/// `tolerance` days of the target's.
///
/// Only the day number is compared, so the 31st and the 1st are 30 apart
/// even when they are consecutive calendar days.
pub fn count_same_day(tx: &Transaction, history: &[Transaction], tolerance: u32) -> usize {
    let target_day = day_of_month(&tx.date);
    history
        .iter()
        .filter(|t| day_of_month(&t.date).abs_diff(target_day) <= tolerance)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(id: &str, date: &str) -> Transaction {
        Transaction::new(id, "user1", "vendor", 10, date)
    }

    fn history() -> Vec<Transaction> {
        vec![
            tx("1", "2024-01-15"),
            tx("2", "2024-02-15"),
            tx("3", "03/16/2024"),
            tx("4", "2024-04-13"),
            tx("5", "2024-05-20"),
        ]
    }

    #[test]
    fn exact_day_includes_self() {
        let txs = history();
        assert_eq!(count_same_day(&txs[0], &txs, 0), 2);
    }

    #[test]
    fn tolerance_widens_window() {
        let txs = history();
        assert_eq!(count_same_day(&txs[0], &txs, 1), 3);
        assert_eq!(count_same_day(&txs[0], &txs, 2), 4);
        assert_eq!(count_same_day(&txs[0], &txs, 5), 5);
    }

    #[test]
    fn month_end_does_not_wrap() {
        let txs = vec![tx("1", "2024-01-31"), tx("2", "2024-02-01")];
        assert_eq!(count_same_day(&txs[0], &txs, 2), 1);
    }

    #[test]
    fn unparseable_date_counts_as_first() {
        let txs = vec![tx("1", "2024-03-01"), tx("2", "not a date")];
        assert_eq!(count_same_day(&txs[0], &txs, 0), 2);
    }

    #[test]
    fn empty_history() {
        assert_eq!(count_same_day(&tx("1", "2024-01-01"), &[], 2), 0);
    }
}
