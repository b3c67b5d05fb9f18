use serde::Deserialize;
use std::collections::BTreeSet;
use thiserror::Error;

use recur_scan_core::Transaction;

/// Vendors whose charges are recurring by nature, lowercase.
pub const ALWAYS_RECURRING_VENDORS: &[&str] = &[
    "google storage",
    "netflix",
    "hulu",
    "spotify",
    "amazon prime",
    "disney+",
    "apple music",
    "xbox game pass",
    "youtube premium",
    "adobe creative cloud",
];

#[derive(Debug, Error)]
pub enum VendorListError {
    #[error("Failed to parse vendor list: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Deserialize)]
struct VendorFile {
    #[serde(default)]
    vendors: Vec<String>,
}

/// Case-insensitive exact-match set of always-recurring vendor names:
/// [`ALWAYS_RECURRING_VENDORS`] plus any configured extras.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecurringVendors {
    extra: BTreeSet<String>,
}

impl RecurringVendors {
    /// Default list plus `extra` names.
    pub fn with_vendors<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extra = extra
            .into_iter()
            .map(|v| v.as_ref().to_lowercase())
            .filter(|v| !ALWAYS_RECURRING_VENDORS.contains(&v.as_str()))
            .collect();
        Self { extra }
    }

    /// Reads `vendors = ["..."]` from TOML and appends them to the defaults.
    pub fn from_toml(toml_content: &str) -> Result<Self, VendorListError> {
        let file: VendorFile = toml::from_str(toml_content)?;
        Ok(Self::with_vendors(file.vendors))
    }

    pub fn contains(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        ALWAYS_RECURRING_VENDORS.contains(&name.as_str()) || self.extra.contains(&name)
    }

    pub fn len(&self) -> usize {
        ALWAYS_RECURRING_VENDORS.len() + self.extra.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Whether `tx.name` is one of [`ALWAYS_RECURRING_VENDORS`], ignoring case.
/// Substrings and near-misses do not match.
pub fn is_always_recurring(tx: &Transaction) -> bool {
    RecurringVendors::default().contains(&tx.name)
}
