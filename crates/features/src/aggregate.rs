//! Assembles every recurrence feature for one transaction into a single
//! ordered map.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use recur_scan_core::{Transaction, TransactionId};

use crate::amount::{count_same_amount, percent_same_amount};
use crate::calendar::count_same_day;
use crate::interval::{average_gap_days, regularity_score};
use crate::periodic::count_days_apart;
use crate::vendor::RecurringVendors;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl FeatureValue {
    /// Numeric view for classifiers; booleans map to 0.0 / 1.0.
    pub fn as_f64(self) -> f64 {
        match self {
            FeatureValue::Int(v) => v as f64,
            FeatureValue::Float(v) => v,
            FeatureValue::Bool(v) => f64::from(u8::from(v)),
        }
    }
}

impl From<usize> for FeatureValue {
    fn from(value: usize) -> Self {
        FeatureValue::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for FeatureValue {
    fn from(value: f64) -> Self {
        FeatureValue::Float(value)
    }
}

impl From<bool> for FeatureValue {
    fn from(value: bool) -> Self {
        FeatureValue::Bool(value)
    }
}

/// Feature name to value, in the order the features were computed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureMap {
    entries: Vec<(&'static str, FeatureValue)>,
}

impl FeatureMap {
    pub fn get(&self, name: &str) -> Option<FeatureValue> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, FeatureValue)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, name: &'static str, value: FeatureValue) {
        self.entries.push((name, value));
    }
}

impl Serialize for FeatureMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Shared, read-only inputs to feature extractors beyond the transactions.
#[derive(Debug, Clone, Default)]
pub struct FeatureContext {
    pub recurring_vendors: RecurringVendors,
}

type ExtractFn = fn(&FeatureContext, &Transaction, &[Transaction]) -> FeatureValue;

/// A named feature extractor.
#[derive(Clone, Copy)]
pub struct Feature {
    pub name: &'static str,
    pub extract: ExtractFn,
}

impl Feature {
    pub const fn new(name: &'static str, extract: ExtractFn) -> Self {
        Feature { name, extract }
    }
}

impl std::fmt::Debug for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Feature").field("name", &self.name).finish()
    }
}

fn n_same_amount(_: &FeatureContext, tx: &Transaction, all: &[Transaction]) -> FeatureValue {
    count_same_amount(tx, all).into()
}

fn pct_same_amount(_: &FeatureContext, tx: &Transaction, all: &[Transaction]) -> FeatureValue {
    percent_same_amount(tx, all).into()
}

fn avg_days_between(_: &FeatureContext, tx: &Transaction, all: &[Transaction]) -> FeatureValue {
    average_gap_days(tx, all).into()
}

fn time_regularity(_: &FeatureContext, tx: &Transaction, all: &[Transaction]) -> FeatureValue {
    regularity_score(tx, all).into()
}

fn always_recurring(ctx: &FeatureContext, tx: &Transaction, _: &[Transaction]) -> FeatureValue {
    ctx.recurring_vendors.contains(&tx.name).into()
}

fn same_day_exact(_: &FeatureContext, tx: &Transaction, all: &[Transaction]) -> FeatureValue {
    count_same_day(tx, all, 0).into()
}

fn same_day_off_by_1(_: &FeatureContext, tx: &Transaction, all: &[Transaction]) -> FeatureValue {
    count_same_day(tx, all, 1).into()
}

fn same_day_off_by_2(_: &FeatureContext, tx: &Transaction, all: &[Transaction]) -> FeatureValue {
    count_same_day(tx, all, 2).into()
}

fn days_30_exact(_: &FeatureContext, tx: &Transaction, all: &[Transaction]) -> FeatureValue {
    count_days_apart(tx, all, 30, 0).into()
}

fn days_30_off_by_1(_: &FeatureContext, tx: &Transaction, all: &[Transaction]) -> FeatureValue {
    count_days_apart(tx, all, 30, 1).into()
}

fn days_14_exact(_: &FeatureContext, tx: &Transaction, all: &[Transaction]) -> FeatureValue {
    count_days_apart(tx, all, 14, 0).into()
}

fn days_14_off_by_1(_: &FeatureContext, tx: &Transaction, all: &[Transaction]) -> FeatureValue {
    count_days_apart(tx, all, 14, 1).into()
}

fn days_7_exact(_: &FeatureContext, tx: &Transaction, all: &[Transaction]) -> FeatureValue {
    count_days_apart(tx, all, 7, 0).into()
}

fn days_7_off_by_1(_: &FeatureContext, tx: &Transaction, all: &[Transaction]) -> FeatureValue {
    count_days_apart(tx, all, 7, 1).into()
}

/// Every feature, in output order.
pub const FEATURES: &[Feature] = &[
    Feature::new("n_transactions_same_amount", n_same_amount),
    Feature::new("percent_transactions_same_amount", pct_same_amount),
    Feature::new("avg_days_between_transactions", avg_days_between),
    Feature::new("time_regularity_score", time_regularity),
    Feature::new("is_always_recurring", always_recurring),
    Feature::new("same_day_exact", same_day_exact),
    Feature::new("same_day_off_by_1", same_day_off_by_1),
    Feature::new("same_day_off_by_2", same_day_off_by_2),
    Feature::new("30_days_apart_exact", days_30_exact),
    Feature::new("30_days_apart_off_by_1", days_30_off_by_1),
    Feature::new("14_days_apart_exact", days_14_exact),
    Feature::new("14_days_apart_off_by_1", days_14_off_by_1),
    Feature::new("7_days_apart_exact", days_7_exact),
    Feature::new("7_days_apart_off_by_1", days_7_off_by_1),
];

pub fn feature_names() -> impl Iterator<Item = &'static str> {
    FEATURES.iter().map(|f| f.name)
}

#[derive(Debug, Clone, Default)]
pub struct FeatureExtractor {
    context: FeatureContext,
}

impl FeatureExtractor {
    pub fn new(context: FeatureContext) -> Self {
        Self { context }
    }

    pub fn with_vendors(recurring_vendors: RecurringVendors) -> Self {
        Self::new(FeatureContext { recurring_vendors })
    }

    /// Computes every entry of [`FEATURES`] for `tx` against `history`.
    /// `history` must belong to a single user.
    pub fn compute(&self, tx: &Transaction, history: &[Transaction]) -> FeatureMap {
        let mut features = FeatureMap::default();
        for feature in FEATURES {
            features.push(feature.name, (feature.extract)(&self.context, tx, history));
        }
        features
    }

    /// Features for every transaction in `history`, each measured against
    /// the whole history.
    pub fn compute_all(&self, history: &[Transaction]) -> Vec<(TransactionId, FeatureMap)> {
        tracing::debug!(transactions = history.len(), "computing features");
        history
            .iter()
            .map(|tx| (tx.id.clone(), self.compute(tx, history)))
            .collect()
    }
}

/// Features for `tx` using the built-in vendor list.
pub fn compute_features(tx: &Transaction, history: &[Transaction]) -> FeatureMap {
    FeatureExtractor::default().compute(tx, history)
}

pub fn compute_all(history: &[Transaction]) -> Vec<(TransactionId, FeatureMap)> {
    FeatureExtractor::default().compute_all(history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use recur_scan_core::Amount;
    use crate::vendor::is_always_recurring;
    use FeatureValue::{Bool, Float, Int};

    fn tx(id: &str, name: &str, amount: &str, date: &str) -> Transaction {
        Transaction::new(id, "user1", name, amount.parse::<Amount>().unwrap(), date)
    }

    fn history() -> Vec<Transaction> {
        vec![
            tx("1", "vendor1", "100", "2024-01-01"),
            tx("2", "vendor1", "100", "2024-01-02"),
            tx("3", "vendor1", "200", "2024-01-03"),
            tx("4", "Netflix", "15.99", "2024-01-05"),
        ]
    }

    #[test]
    fn keys_are_fixed_and_ordered() {
        let txs = history();
        let features = compute_features(&txs[0], &txs);
        let keys: Vec<_> = features.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                "n_transactions_same_amount",
                "percent_transactions_same_amount",
                "avg_days_between_transactions",
                "time_regularity_score",
                "is_always_recurring",
                "same_day_exact",
                "same_day_off_by_1",
                "same_day_off_by_2",
                "30_days_apart_exact",
                "30_days_apart_off_by_1",
                "14_days_apart_exact",
                "14_days_apart_off_by_1",
                "7_days_apart_exact",
                "7_days_apart_off_by_1",
            ]
        );
        assert_eq!(feature_names().collect::<Vec<_>>(), keys);
    }

    #[test]
    fn small_history_values() {
        let txs = history();
        let f = compute_features(&txs[0], &txs);
        assert_eq!(f.get("n_transactions_same_amount"), Some(Int(2)));
        assert_eq!(f.get("percent_transactions_same_amount"), Some(Float(0.5)));
        assert_eq!(f.get("avg_days_between_transactions"), Some(Float(1.0)));
        assert_eq!(f.get("time_regularity_score"), Some(Float(1.0)));
        assert_eq!(f.get("is_always_recurring"), Some(Bool(false)));
        assert_eq!(f.get("same_day_exact"), Some(Int(1)));
        assert_eq!(f.get("same_day_off_by_1"), Some(Int(2)));
        assert_eq!(f.get("same_day_off_by_2"), Some(Int(3)));
        assert_eq!(f.get("7_days_apart_exact"), Some(Int(0)));
        assert_eq!(f.get("7_days_apart_off_by_1"), Some(Int(0)));
        assert_eq!(f.get("missing"), None);
    }

    #[test]
    fn netflix_is_flagged() {
        let txs = history();
        let f = compute_features(&txs[3], &txs);
        assert_eq!(f.get("is_always_recurring"), Some(Bool(true)));
        assert_eq!(f.get("avg_days_between_transactions"), Some(Float(0.0)));
    }

    #[test]
    fn empty_history_is_total() {
        let t = tx("1", "Hulu", "9.99", "bad date");
        let f = compute_features(&t, &[]);
        assert_eq!(f.len(), FEATURES.len());
        assert_eq!(f.get("percent_transactions_same_amount"), Some(Float(0.0)));
        assert_eq!(f.get("n_transactions_same_amount"), Some(Int(0)));
        assert_eq!(f.get("is_always_recurring"), Some(Bool(true)));
    }

    #[test]
    fn history_of_only_target() {
        let t = tx("1", "Gym", "30", "2024-01-01");
        let all = vec![t.clone()];
        let f = compute_features(&t, &all);
        assert_eq!(f.get("n_transactions_same_amount"), Some(Int(1)));
        assert_eq!(f.get("percent_transactions_same_amount"), Some(Float(1.0)));
        assert_eq!(f.get("same_day_exact"), Some(Int(1)));
        assert_eq!(f.get("30_days_apart_exact"), Some(Int(0)));
    }

    #[test]
    fn monthly_subscription() {
        let txs = vec![
            tx("1", "Gym", "30", "2024-01-01"),
            tx("2", "Gym", "30", "2024-01-31"),
            tx("3", "Gym", "30", "03/01/2024"),
            tx("4", "Gym", "30", "2024-03-31"),
        ];
        let f = compute_features(&txs[0], &txs);
        assert_eq!(f.get("30_days_apart_exact"), Some(Int(3)));
        assert_eq!(f.get("avg_days_between_transactions"), Some(Float(30.0)));
        assert_eq!(f.get("time_regularity_score"), Some(Float(1.0)));
        assert_eq!(f.get("percent_transactions_same_amount"), Some(Float(1.0)));
    }

    #[test]
    fn idempotent() {
        let txs = history();
        let first = compute_features(&txs[1], &txs);
        let second = compute_features(&txs[1], &txs);
        assert_eq!(first, second);
    }

    #[test]
    fn recurring_flag_matches_vendor_lookup() {
        for name in ["NETFLIX", "Netflixx", "Disney+", "", "vendor1"] {
            let t = tx("1", name, "1", "2024-01-01");
            let f = compute_features(&t, &[]);
            let expected = is_always_recurring(&t);
            assert_eq!(f.get("is_always_recurring"), Some(Bool(expected)));
        }
    }

    #[test]
    fn custom_vendor_list() {
        let vendors = RecurringVendors::with_vendors(["vendor1"]);
        let extractor = FeatureExtractor::with_vendors(vendors);
        let txs = history();
        let f = extractor.compute(&txs[0], &txs);
        assert_eq!(f.get("is_always_recurring"), Some(Bool(true)));
    }

    #[test]
    fn compute_all_covers_every_transaction() {
        let txs = history();
        let rows = compute_all(&txs);
        assert_eq!(rows.len(), txs.len());
        assert_eq!(rows[2].0, TransactionId("3".to_string()));
        assert_eq!(rows[2].1, compute_features(&txs[2], &txs));
    }

    #[test]
    fn serializes_as_ordered_object() {
        let txs = history();
        let features = compute_features(&txs[3], &txs);
        let json = serde_json::to_string(&features).unwrap();
        let prefix = r#"{"n_transactions_same_amount":1,"percent_transactions_same_amount":0.25,"#;
        assert!(json.starts_with(prefix));
        assert!(json.contains(r#""is_always_recurring":true"#));
        assert!(json.ends_with(r#""7_days_apart_off_by_1":0}"#));
    }

    #[test]
    fn as_f64_conversions() {
        assert_eq!(FeatureValue::Int(3).as_f64(), 3.0);
        assert_eq!(FeatureValue::Bool(true).as_f64(), 1.0);
        assert_eq!(FeatureValue::Bool(false).as_f64(), 0.0);
        assert_eq!(FeatureValue::Float(0.5).as_f64(), 0.5);
    }
}
