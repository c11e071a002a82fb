use crate::error::FinanceResult;
use crate::storage::csv_ledger::{Ledger, read_transactions_from_path};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy)]
pub enum ImportFormat {
    Csv,
}

/// Appends every row of `path` to the ledger. Nothing is written unless the
/// whole file parses.
pub fn import_transactions_to_ledger(
    ledger: &mut Ledger,
    format: ImportFormat,
    path: &Path,
) -> FinanceResult<usize> {
    let transactions = match format {
        ImportFormat::Csv => read_transactions_from_path(path)?,
    };

    let count = transactions.len();
    if count == 0 {
        return Ok(0);
    }
    ledger.extend(transactions);
    ledger.save()?;
    info!(source = %path.display(), count, "transactions imported");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FinanceError;
    use std::io::Write;
    use tempfile::{NamedTempFile, tempdir};

    fn write_temp_csv(contents: &str) -> NamedTempFile {
        let mut tmp = NamedTempFile::new().expect("Failed to create temp file");
        write!(tmp, "{}", contents).expect("Failed to write test CSV");
        tmp
    }

    #[test]
    fn test_import_csv_to_ledger_success() {
        let dir = tempdir().unwrap();
        let mut ledger = Ledger::open(dir.path().join("ledger.csv")).unwrap();
        let csv_data = "\
Descripción,Monto,Forma de pago,Fecha de transacción,Tipo,Valoración gasto
Sueldo,1500.00,transferencia,2025-11-10,Ingreso,
Café,3.50,efectivo,2025-11-11,Gasto,2
";
        let tmp = write_temp_csv(csv_data);
        let result = import_transactions_to_ledger(&mut ledger, ImportFormat::Csv, tmp.path());

        assert_eq!(result.unwrap(), 2);
        let reopened = Ledger::open(dir.path().join("ledger.csv")).unwrap();
        assert_eq!(reopened.len(), 2);
    }

    #[test]
    fn test_import_csv_invalid_data() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.csv");
        let mut ledger = Ledger::open(&path).unwrap();
        let csv_data = "\
Descripción,Monto,Forma de pago,Fecha de transacción,Tipo
Sueldo,1500.00,transferencia,bad-date,Ingreso
";
        let tmp = write_temp_csv(csv_data);
        let error = import_transactions_to_ledger(&mut ledger, ImportFormat::Csv, tmp.path())
            .unwrap_err()
            .to_string();

        assert!(error.contains("Line 2"));
        assert!(error.contains("Invalid date"));
        assert!(ledger.is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn test_import_nonexistent_file() {
        let dir = tempdir().unwrap();
        let mut ledger = Ledger::open(dir.path().join("ledger.csv")).unwrap();
        let result = import_transactions_to_ledger(
            &mut ledger,
            ImportFormat::Csv,
            Path::new("nonexistent.csv"),
        );

        assert!(matches!(result, Err(FinanceError::Io { .. })));
    }
}
