use crate::model::AnnualReport;
use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

/// Path that stands for standard input.
pub const STDIN: &str = "-";

/// Read a file, or standard input for `-`.
pub fn read_input(path: &str) -> Result<String> {
    if path == STDIN {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read standard input")?;
        return Ok(content);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))
}

pub fn load_report(path: &str) -> Result<AnnualReport> {
    let content = read_input(path)?;
    serde_json::from_str(&content).with_context(|| format!("Invalid report JSON in {}", path))
}

/// Write to `path`, or to standard output when there is none.
pub fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(path) => fs::write(path, bytes)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(bytes)
                .and_then(|_| stdout.flush())
                .context("Failed to write standard output")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_partial_report() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.json");
        fs::write(
            &path,
            r#"{"company": {"name": "Exempel AB", "orgNr": "556000-0000"},
                "incomeStatement": {"revenue": {"netSales": {"current": 100}}}}"#,
        )
        .unwrap();

        let report = load_report(path.to_str().unwrap()).unwrap();
        assert_eq!(report.company.org_nr, "556000-0000");
        assert_eq!(report.income_statement.revenue.net_sales.current, Some(100));
        assert_eq!(report.income_statement.revenue.net_sales.previous, None);
        assert!(report.notes.fixed_asset_notes.is_empty());
    }

    #[test]
    fn test_errors_name_the_file() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let err = read_input(missing.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("missing.json"));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        let err = load_report(broken.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_write_output_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.xhtml");
        write_output(Some(&path), b"<html/>").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<html/>");
    }
}
