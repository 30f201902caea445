//! IBAN validation (ISO 13616, MOD 97-10 per ISO 7064).
//!
//! The effective length table is computed per call from the static
//! reference data, so validation never touches shared mutable state.

use crate::error::IbanError;
use crate::reference::{ACTIVATION_SCHEDULE, IBAN_LENGTHS, NORDEA_IBAN_LENGTHS};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Caller-driven knobs for a single validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IbanOptions {
    /// Date used to evaluate the activation schedule. `None` means today (UTC).
    pub as_of: Option<NaiveDate>,
    /// Only accept these country codes. Applied after unofficial entries are merged.
    pub include_countries: Option<BTreeSet<String>>,
    /// Also accept the unofficial Nordea formats.
    pub allow_unofficial: bool,
}

impl IbanOptions {
    pub fn as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }

    pub fn include_countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_countries = Some(countries.into_iter().map(Into::into).collect());
        self
    }

    pub fn allow_unofficial(mut self, allow: bool) -> Self {
        self.allow_unofficial = allow;
        self
    }

    pub fn effective_date(&self) -> NaiveDate {
        self.as_of.unwrap_or_else(|| Utc::now().date_naive())
    }
}

/// Country code to IBAN length, as in force for one validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveLengths {
    lengths: BTreeMap<&'static str, usize>,
}

impl EffectiveLengths {
    /// Baseline table plus every scheduled activation on or before `as_of`.
    pub fn as_of(as_of: NaiveDate) -> Self {
        let mut lengths: BTreeMap<&'static str, usize> = IBAN_LENGTHS.iter().copied().collect();
        for entry in ACTIVATION_SCHEDULE.iter().filter(|entry| entry.is_active(as_of)) {
            lengths.entry(entry.country).or_insert(entry.length);
        }
        Self { lengths }
    }

    pub fn resolve(options: &IbanOptions) -> Self {
        let mut table = Self::as_of(options.effective_date());
        if options.allow_unofficial {
            table = table.with_unofficial();
        }
        match &options.include_countries {
            Some(include) => table.restrict(include),
            None => table,
        }
    }

    /// Adds the unofficial entries. Official lengths are never replaced.
    pub fn with_unofficial(mut self) -> Self {
        for &(code, len) in NORDEA_IBAN_LENGTHS {
            self.lengths.entry(code).or_insert(len);
        }
        self
    }

    pub fn restrict(mut self, include: &BTreeSet<String>) -> Self {
        self.lengths.retain(|code, _| include.contains(*code));
        self
    }

    pub fn get(&self, country: &str) -> Option<usize> {
        self.lengths.get(country).copied()
    }

    pub fn contains(&self, country: &str) -> bool {
        self.lengths.contains_key(country)
    }

    pub fn min_length(&self) -> Option<usize> {
        self.lengths.values().copied().min()
    }

    pub fn countries(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        self.lengths.iter().map(|(code, len)| (*code, *len))
    }

    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }
}

/// An accepted IBAN, exactly as the caller supplied it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Iban(String);

impl Iban {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn country_code(&self) -> &str {
        &self.0[..2]
    }

    pub fn check_digits(&self) -> &str {
        &self.0[2..4]
    }

    pub fn bban(&self) -> &str {
        &self.0[4..]
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Iban {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Iban {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validate an already normalized (upper-case, no separators) IBAN.
pub fn validate_iban(candidate: &str, options: &IbanOptions) -> Result<Iban, IbanError> {
    validate_iban_with(candidate, &EffectiveLengths::resolve(options))
}

/// Validate against a precomputed length table.
pub fn validate_iban_with(
    candidate: &str,
    lengths: &EffectiveLengths,
) -> Result<Iban, IbanError> {
    let actual = candidate.chars().count();
    if actual < 2 {
        return Err(IbanError::TooShort { actual });
    }
    let country: String = candidate.chars().take(2).collect();

    let expected = lengths
        .get(&country)
        .ok_or_else(|| IbanError::UnknownCountryCode(country.clone()))?;
    if actual != expected {
        return Err(IbanError::WrongLength {
            country,
            expected,
            actual,
        });
    }

    let rearranged = candidate.chars().skip(4).chain(candidate.chars().take(4));
    let digits = transliterate(rearranged)?;

    let valid = if country == "BG" {
        bulgarian_control_matches(&digits)
    } else {
        mod97(&digits) == 1
    };
    if !valid {
        return Err(IbanError::ChecksumFailed);
    }

    Ok(Iban(candidate.to_string()))
}

/// Compute the two check digits for `country` and `bban`.
pub fn check_digits(country: &str, bban: &str) -> Result<String, IbanError> {
    if country.chars().count() != 2 {
        return Err(IbanError::UnknownCountryCode(country.to_string()));
    }
    let digits = transliterate(bban.chars().chain(country.chars()))?;
    let remainder = (mod97(&digits) * 100) % 97;
    Ok(format!("{:02}", 98 - remainder))
}

/// Expand letters to two digits (A=10 .. Z=35). Anything outside `0-9A-Z`
/// is rejected, including non-ASCII letters.
fn transliterate(chars: impl Iterator<Item = char>) -> Result<String, IbanError> {
    let mut out = String::with_capacity(68);
    for ch in chars {
        match ch {
            '0'..='9' => out.push(ch),
            'A'..='Z' => {
                let value = u32::from(ch) - u32::from('A') + 10;
                out.push_str(&value.to_string());
            }
            _ => return Err(IbanError::InvalidCharacter(ch)),
        }
    }
    Ok(out)
}

/// Remainder of a decimal digit string of any length modulo 97.
fn mod97(digits: &str) -> u32 {
    digits
        .bytes()
        .fold(0, |remainder, byte| (remainder * 10 + u32::from(byte - b'0')) % 97)
}

// Bulgarian variant: the trailing two digits are the control number, and the
// rest with "00" appended must leave 98 - control as remainder.
fn bulgarian_control_matches(digits: &str) -> bool {
    if digits.len() < 2 {
        return false;
    }
    let (head, tail) = digits.split_at(digits.len() - 2);
    let control = parse_digits(tail);
    let remainder = (mod97(head) * 100) % 97;
    control == 98 - remainder
}

fn parse_digits(digits: &str) -> u32 {
    digits
        .bytes()
        .fold(0, |acc, byte| acc * 10 + u32::from(byte - b'0'))
}
