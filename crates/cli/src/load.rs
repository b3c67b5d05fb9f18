use std::io::Read;
use thiserror::Error;

use recur_scan_core::{Amount, AmountError, Transaction};

use crate::config::ScanConfig;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Row {row}: missing column {column}")]
    MissingColumn { row: usize, column: usize },
    #[error("Row {row}: {source}")]
    InvalidAmount {
        row: usize,
        #[source]
        source: AmountError,
    },
}

/// Reads transactions using the column layout in `config`.
///
/// Blank lines are skipped. Dates are kept verbatim; an unparseable date
/// is not an error here.
pub fn load_transactions<R: Read>(
    data: R,
    config: &ScanConfig,
) -> Result<Vec<Transaction>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(config.has_header)
        .delimiter(config.delimiter_byte())
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(data);

    let cols = &config.columns;
    let mut transactions = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        let row = idx + 1;

        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        let field = |column: usize| {
            record
                .get(column)
                .ok_or(LoadError::MissingColumn { row, column })
        };

        let amount = field(cols.amount_column)?
            .parse::<Amount>()
            .map_err(|source| LoadError::InvalidAmount { row, source })?;

        transactions.push(Transaction::new(
            field(cols.id_column)?,
            field(cols.user_id_column)?,
            field(cols.name_column)?,
            amount,
            field(cols.date_column)?,
        ));
    }

    tracing::debug!(rows = transactions.len(), "loaded transactions");
    Ok(transactions)
}
