use recur_scan_core::Transaction;

/// Number of transactions in `history` whose amount equals `tx.amount`
/// exactly. `tx` itself is counted when it is part of `history`.
pub fn count_same_amount(tx: &Transaction, history: &[Transaction]) -> usize {
    history.iter().filter(|t| t.amount == tx.amount).count()
}

/// Share of `history` with the same amount as `tx`; 0.0 for an empty history.
pub fn percent_same_amount(tx: &Transaction, history: &[Transaction]) -> f64 {
    if history.is_empty() {
        return 0.0;
    }
    count_same_amount(tx, history) as f64 / history.len() as f64
}
