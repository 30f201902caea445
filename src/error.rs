use thiserror::Error;

/// Reasons an IBAN candidate is rejected. Exactly one is reported per call,
/// for the first failing step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IbanError {
    #[error("IBAN is too short to contain a country code.")]
    TooShort { actual: usize },
    #[error("{0} is not a valid Country Code for IBAN.")]
    UnknownCountryCode(String),
    #[error("Wrong IBAN length for country code {country}.")]
    WrongLength {
        country: String,
        expected: usize,
        actual: usize,
    },
    #[error("{0} is not a valid character for IBAN.")]
    InvalidCharacter(char),
    #[error("Not a valid IBAN.")]
    ChecksumFailed,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BicError {
    #[error("A SWIFT-BIC is either 8 or 11 characters long.")]
    InvalidLength { actual: usize },
    #[error("{0} is not a valid SWIFT-BIC Institution Code.")]
    InvalidInstitutionCode(String),
    #[error("{0} is not a valid SWIFT-BIC Country Code.")]
    InvalidCountryCode(String),
}

/// One problem reported by a field wrapper. A field may report several.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("This field is required.")]
    Required,
    #[error(transparent)]
    Iban(#[from] IbanError),
    #[error(transparent)]
    Bic(#[from] BicError),
    #[error("Ensure this value has at most {max} characters (it has {actual}).")]
    TooLong { max: usize, actual: usize },
    #[error("Ensure this value has at least {min} characters (it has {actual}).")]
    TooShort { min: usize, actual: usize },
}
