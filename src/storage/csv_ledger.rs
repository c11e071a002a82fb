use super::dates::parse_date;
use crate::error::{FinanceError, FinanceResult};
use crate::models::rating::NecessityRating;
use crate::models::transaction::{
    Transaction, TransactionType, parse_amount, parse_description, parse_payment_method,
};
use csv::StringRecord;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const CANONICAL_HEADER: [&str; 6] = [
    "Descripción",
    "Monto",
    "Forma de pago",
    "Fecha de transacción",
    "Tipo",
    "Valoración gasto",
];

const DESCRIPTION_ALIASES: &[&str] = &["descripción", "descripcion", "description"];
const AMOUNT_ALIASES: &[&str] = &["monto", "amount"];
const METHOD_ALIASES: &[&str] = &["forma de pago", "payment method", "payment_method", "method"];
const DATE_ALIASES: &[&str] = &["fecha de transacción", "fecha de transaccion", "fecha", "date"];
const TYPE_ALIASES: &[&str] = &["tipo", "type"];
const RATING_ALIASES: &[&str] = &[
    "valoración gasto",
    "valoración",
    "valoracion gasto",
    "valoracion",
    "rating",
];

/// Column positions resolved from a header row.
#[derive(Debug)]
struct ColumnMap {
    description: usize,
    amount: usize,
    payment_method: usize,
    date: usize,
    transaction_type: usize,
    rating: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> FinanceResult<Self> {
        let normalized: Vec<String> = headers
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_lowercase())
            .collect();
        let find = |aliases: &[&str]| {
            normalized
                .iter()
                .position(|h| aliases.contains(&h.as_str()))
        };
        let require = |aliases: &[&str], name: &'static str| {
            find(aliases).ok_or(FinanceError::MissingColumn(name))
        };

        let map = ColumnMap {
            description: require(DESCRIPTION_ALIASES, "Descripción")?,
            amount: require(AMOUNT_ALIASES, "Monto")?,
            payment_method: require(METHOD_ALIASES, "Forma de pago")?,
            date: require(DATE_ALIASES, "Fecha de transacción")?,
            transaction_type: require(TYPE_ALIASES, "Tipo")?,
            rating: find(RATING_ALIASES),
        };
        debug!(?map, "resolved ledger columns");
        Ok(map)
    }

    fn parse_row(&self, record: &StringRecord, line: u64) -> Result<Transaction, String> {
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let description = parse_description(field(self.description))?;
        let amount = parse_amount(field(self.amount))?;
        let payment_method = parse_payment_method(field(self.payment_method))?;
        let date = parse_date(field(self.date))?;
        let transaction_type = TransactionType::parse(field(self.transaction_type))?;

        let rating = match self.rating {
            Some(idx) => NecessityRating::parse_cell(field(idx))?,
            None => None,
        };
        let rating = match (transaction_type, rating) {
            (TransactionType::Income, Some(r)) => {
                warn!(line, rating = r.value(), "ignoring necessity rating on an income row");
                None
            }
            (_, r) => r,
        };

        Ok(Transaction::new(
            description,
            amount,
            payment_method,
            date,
            transaction_type,
            rating,
        ))
    }
}

/// Reads every data row of a headed CSV. The first invalid row aborts the read.
pub fn read_transactions<R: Read>(reader: R) -> FinanceResult<Vec<Transaction>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns = ColumnMap::from_headers(reader.headers()?)?;

    let mut transactions = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result?;
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(index as u64 + 2);
        if record.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        let transaction = columns
            .parse_row(&record, line)
            .map_err(|message| FinanceError::Row { line, message })?;
        transactions.push(transaction);
    }

    Ok(transactions)
}

pub fn read_transactions_from_path(path: &Path) -> FinanceResult<Vec<Transaction>> {
    let file = File::open(path).map_err(|e| FinanceError::io(path, e))?;
    read_transactions(file)
}

pub fn write_transactions<W: Write>(writer: W, transactions: &[Transaction]) -> FinanceResult<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(CANONICAL_HEADER)?;

    for transaction in transactions {
        let date = transaction.date.format("%Y-%m-%d").to_string();
        let amount = transaction.amount.to_string();
        let rating = transaction
            .rating
            .map(|r| r.to_string())
            .unwrap_or_default();
        writer.write_record([
            transaction.description.as_str(),
            amount.as_str(),
            transaction.payment_method.as_str(),
            date.as_str(),
            transaction.transaction_type.ledger_label(),
            rating.as_str(),
        ])?;
    }

    writer.flush().map_err(|e| FinanceError::io("<csv output>", e))?;
    Ok(())
}

/// Writes through a sibling temp file so a failed write never truncates `path`.
pub fn write_transactions_to_path(path: &Path, transactions: &[Transaction]) -> FinanceResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(|e| FinanceError::io(&dir, e))?;
    write_transactions(tmp.as_file_mut(), transactions)?;
    tmp.persist(path).map_err(|e| FinanceError::io(path, e.error))?;
    Ok(())
}

/// The CSV file transactions are recorded in, held in memory in file order.
#[derive(Debug)]
pub struct Ledger {
    path: PathBuf,
    transactions: Vec<Transaction>,
}

impl Ledger {
    /// Loads the ledger at `path`; a missing file is an empty ledger.
    pub fn open(path: impl Into<PathBuf>) -> FinanceResult<Self> {
        let path = path.into();
        let transactions = if path.exists() {
            read_transactions_from_path(&path)?
        } else {
            debug!(path = %path.display(), "ledger file does not exist yet");
            Vec::new()
        };
        Ok(Self { path, transactions })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn push(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    pub fn extend(&mut self, transactions: impl IntoIterator<Item = Transaction>) {
        self.transactions.extend(transactions);
    }

    /// Removes the transaction with 1-based row number `row`.
    pub fn remove(&mut self, row: usize) -> FinanceResult<Transaction> {
        if row == 0 || row > self.transactions.len() {
            return Err(FinanceError::NotFound(row));
        }
        Ok(self.transactions.remove(row - 1))
    }

    pub fn save(&self) -> FinanceResult<()> {
        write_transactions_to_path(&self.path, &self.transactions)?;
        info!(
            path = %self.path.display(),
            count = self.transactions.len(),
            "ledger saved"
        );
        Ok(())
    }
}
