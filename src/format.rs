//! Boundary helpers for turning user input into validator input and back
//! into display form. The validators themselves never normalize.

const IBAN_GROUPING: usize = 4;

/// Upper-case and drop spaces and hyphens, e.g. `nl02 abna-0123` -> `NL02ABNA0123`.
pub fn normalize_iban(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.trim().chars() {
        if ch == ' ' || ch == '-' {
            continue;
        }
        out.extend(ch.to_uppercase());
    }
    out
}

/// BICs are always written in upper case.
pub fn normalize_bic(input: &str) -> String {
    input.trim().to_uppercase()
}

/// Display form of an IBAN: upper-case, a space every four characters.
pub fn display_iban(input: &str) -> String {
    let normalized = normalize_iban(input);
    let mut out = String::with_capacity(normalized.len() + normalized.len() / IBAN_GROUPING);
    for (idx, ch) in normalized.chars().enumerate() {
        if idx > 0 && idx % IBAN_GROUPING == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

pub fn display_bic(input: &str) -> String {
    normalize_bic(input)
}
