use crate::error::FieldError;
use crate::field::{BicField, IbanField};
use crate::iban::IbanOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Input row: `kind` is `IBAN` or `BIC` (any case).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRecord {
    pub kind: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub kind: String,
    pub input: String,
    pub normalized: String,
    pub display: String,
    pub valid: bool,
    #[serde(default)]
    pub errors: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckSummary {
    pub total_records: usize,
    pub iban_records: usize,
    pub bic_records: usize,
    pub valid_records: usize,
    pub invalid_records: usize,
    pub unknown_kind: usize,
}

pub fn check_records(
    records: &[CheckRecord],
    options: &IbanOptions,
) -> (Vec<CheckResult>, CheckSummary) {
    let iban_field = IbanField::new(options.clone());
    let bic_field: BicField = BicField::default();
    let mut summary = CheckSummary::default();
    let mut results = Vec::with_capacity(records.len());

    for record in records {
        summary.total_records += 1;
        let kind = record.kind.trim().to_uppercase();
        let (normalized, display, errors) = match kind.as_str() {
            "IBAN" => {
                summary.iban_records += 1;
                match iban_field.clean(&record.value) {
                    Ok(iban) => (
                        iban.to_string(),
                        iban_field.prepare_value(iban.as_str()),
                        Vec::new(),
                    ),
                    Err(errors) => (String::new(), String::new(), messages(&errors)),
                }
            }
            "BIC" => {
                summary.bic_records += 1;
                match bic_field.clean(&record.value) {
                    Ok(bic) => (bic.to_string(), bic_field.prepare_value(bic.as_str()), Vec::new()),
                    Err(errors) => (String::new(), String::new(), messages(&errors)),
                }
            }
            _ => {
                summary.unknown_kind += 1;
                (
                    String::new(),
                    String::new(),
                    vec!["kind must be IBAN or BIC".to_string()],
                )
            }
        };

        let valid = errors.is_empty();
        if valid {
            summary.valid_records += 1;
        } else {
            summary.invalid_records += 1;
            log::debug!("rejected {} '{}': {}", kind, record.value, errors.join("; "));
        }
        results.push(CheckResult {
            kind,
            input: record.value.clone(),
            normalized,
            display,
            valid,
            errors: errors.join("; "),
        });
    }

    (results, summary)
}

pub fn check_csv(
    input: &Path,
    output: Option<&Path>,
    options: &IbanOptions,
) -> Result<(Vec<CheckResult>, CheckSummary), String> {
    let mut reader = csv::Reader::from_path(input).map_err(|err| err.to_string())?;
    let mut records = Vec::new();
    for result in reader.deserialize() {
        let record: CheckRecord = result.map_err(|err| err.to_string())?;
        records.push(record);
    }
    log::info!("Loaded {} record(s) from {}", records.len(), input.display());

    let (results, summary) = check_records(&records, options);
    if let Some(output) = output {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|err| err.to_string())?;
            }
        }
        let mut writer = csv::Writer::from_path(output).map_err(|err| err.to_string())?;
        for result in &results {
            writer.serialize(result).map_err(|err| err.to_string())?;
        }
        writer.flush().map_err(|err| err.to_string())?;
    }
    Ok((results, summary))
}

fn messages(errors: &[FieldError]) -> Vec<String> {
    errors.iter().map(ToString::to_string).collect()
}
