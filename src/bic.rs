//! SWIFT-BIC validation (ISO 9362). Structural checks only; BICs carry no
//! checksum.

use crate::error::BicError;
use crate::reference::is_known_country_code;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// Membership source for the country part of a BIC.
pub trait CountryCodes {
    fn contains_code(&self, code: &str) -> bool;
}

/// The built-in ISO 3166-1 alpha-2 list.
#[derive(Debug, Clone, Copy, Default)]
pub struct Iso3166;

impl CountryCodes for Iso3166 {
    fn contains_code(&self, code: &str) -> bool {
        is_known_country_code(code)
    }
}

impl CountryCodes for BTreeSet<String> {
    fn contains_code(&self, code: &str) -> bool {
        self.contains(code)
    }
}

impl CountryCodes for HashSet<String> {
    fn contains_code(&self, code: &str) -> bool {
        self.contains(code)
    }
}

/// An accepted BIC, exactly as the caller supplied it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Bic(String);

impl Bic {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Characters 1-4.
    pub fn institution_code(&self) -> &str {
        self.part(0, 4)
    }

    /// Characters 5-6.
    pub fn country_code(&self) -> &str {
        self.part(4, 6)
    }

    /// Characters 7-8.
    pub fn location_code(&self) -> &str {
        self.part(6, 8)
    }

    /// Characters 9-11, absent for 8-character BICs.
    pub fn branch_code(&self) -> Option<&str> {
        let branch = self.part(8, 11);
        if branch.is_empty() {
            None
        } else {
            Some(branch)
        }
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    // Location and branch accept any character, so slice on char boundaries.
    fn part(&self, start: usize, end: usize) -> &str {
        let offset = |idx: usize| {
            self.0
                .char_indices()
                .nth(idx)
                .map(|(pos, _)| pos)
                .unwrap_or(self.0.len())
        };
        &self.0[offset(start)..offset(end)]
    }
}

impl fmt::Display for Bic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Bic {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validate an upper-cased BIC against the ISO 3166-1 country list.
pub fn validate_bic(candidate: &str) -> Result<Bic, BicError> {
    validate_bic_with(candidate, &Iso3166)
}

pub fn validate_bic_with<C>(candidate: &str, countries: &C) -> Result<Bic, BicError>
where
    C: CountryCodes + ?Sized,
{
    let chars: Vec<char> = candidate.chars().collect();
    if !(chars.len() == 8 || chars.len() == 11) {
        return Err(BicError::InvalidLength {
            actual: chars.len(),
        });
    }

    let institution = &chars[0..4];
    if !institution.iter().all(|ch| ch.is_ascii_uppercase()) {
        return Err(BicError::InvalidInstitutionCode(
            institution.iter().collect(),
        ));
    }

    let country: String = chars[4..6].iter().collect();
    if !countries.contains_code(&country) {
        return Err(BicError::InvalidCountryCode(country));
    }

    Ok(Bic(candidate.to_string()))
}
