pub mod aggregate;
pub mod amount;
pub mod calendar;
pub mod interval;
pub mod periodic;
pub mod vendor;

pub use aggregate::{
    compute_all, compute_features, feature_names, Feature, FeatureContext, FeatureExtractor,
    FeatureMap, FeatureValue, FEATURES,
};
pub use amount::{count_same_amount, percent_same_amount};
pub use calendar::count_same_day;
pub use interval::{average_gap_days, regularity_score, REGULARITY_SENSITIVITY};
pub use periodic::count_days_apart;
pub use vendor::{is_always_recurring, RecurringVendors, VendorListError, ALWAYS_RECURRING_VENDORS};
