use crate::config::Settings;
use crate::error::{FinanceError, FinanceResult};
use crate::models::transaction::parse_payment_method;
use std::path::Path;
use tracing::info;

#[derive(Debug, PartialEq, Eq)]
pub enum MethodAdded {
    Added(String),
    AlreadyKnown(String),
}

/// Registers a payment method and persists settings when it is new.
pub fn add_payment_method(
    settings: &mut Settings,
    config_path: &Path,
    raw: &str,
) -> FinanceResult<MethodAdded> {
    let method = parse_payment_method(raw).map_err(FinanceError::Validation)?;
    if !settings.add_payment_method(&method) {
        return Ok(MethodAdded::AlreadyKnown(method));
    }
    settings.save(config_path)?;
    info!(method = %method, "payment method registered");
    Ok(MethodAdded::Added(method))
}

pub fn render_payment_methods(settings: &Settings) -> String {
    let mut out = String::from("Known payment methods:\n");
    for method in &settings.payment_methods {
        out.push_str("  - ");
        out.push_str(method);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_add_new_method_saves_settings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("finlog.json");
        let mut settings = Settings::default();

        let result = add_payment_method(&mut settings, &path, " tarjeta ").unwrap();
        assert_eq!(result, MethodAdded::Added("tarjeta".to_string()));
        assert!(Settings::load(&path).unwrap().knows_payment_method("tarjeta"));
    }

    #[test]
    fn test_add_known_method_does_not_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("finlog.json");
        let mut settings = Settings::default();

        let result = add_payment_method(&mut settings, &path, "efectivo").unwrap();
        assert_eq!(result, MethodAdded::AlreadyKnown("efectivo".to_string()));
        assert!(!path.exists());
    }

    #[test]
    fn test_add_empty_method_rejected() {
        let dir = tempdir().unwrap();
        let mut settings = Settings::default();
        let err = add_payment_method(&mut settings, &dir.path().join("x.json"), "  ").unwrap_err();
        assert_eq!(err.to_string(), "Payment method cannot be empty");
    }

    #[test]
    fn test_render_lists_defaults() {
        let rendered = render_payment_methods(&Settings::default());
        assert!(rendered.contains("  - transferencia\n"));
        assert!(rendered.contains("  - efectivo\n"));
    }
}
