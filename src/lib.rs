//! Validation engine for International Bank Account Numbers (ISO 13616)
//! and SWIFT Business Identifier Codes (ISO 9362).
//!
//! [`validate_iban`] and [`validate_bic`] are pure functions: they expect
//! input that is already upper-cased and stripped of separators, and return
//! the unmodified value or the first failure. [`field`] and [`format`] hold
//! the boundary helpers that normalize user input and aggregate errors.

pub mod batch;
pub mod bic;
pub mod error;
pub mod field;
pub mod format;
pub mod generator;
pub mod iban;
pub mod reference;

pub use bic::{validate_bic, validate_bic_with, Bic, CountryCodes, Iso3166};
pub use error::{BicError, FieldError, IbanError};
pub use field::{BicField, FieldStyle, IbanField};
pub use iban::{check_digits, validate_iban, validate_iban_with, EffectiveLengths, Iban, IbanOptions};
