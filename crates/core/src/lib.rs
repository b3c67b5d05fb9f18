pub mod amount;
pub mod date;
pub mod transaction;

pub use amount::{Amount, AmountError};
pub use date::{
    day_of_month, days_since_epoch, epoch, parse_date, try_parse_date, DateFormat, DATE_FORMATS,
};
pub use transaction::{group_by_user, Transaction, TransactionId, UserId};
