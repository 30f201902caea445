//! Field wrappers that normalize raw input, run a validator and then the
//! generic length constraints, collecting every problem in order.

use crate::bic::{validate_bic_with, Bic, CountryCodes, Iso3166};
use crate::error::FieldError;
use crate::format::{display_bic, display_iban, normalize_bic, normalize_iban};
use crate::iban::{validate_iban_with, EffectiveLengths, Iban, IbanOptions};
use crate::reference::IBAN_MAX_LENGTH;

pub const BIC_MAX_LENGTH: usize = 11;

/// How a field orders its errors and which constraints it applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldStyle {
    /// Form input: validator error first, then min/max length.
    #[default]
    Form,
    /// Stored value: max length only, reported before the validator error.
    Model,
}

#[derive(Debug, Clone)]
pub struct IbanField {
    pub options: IbanOptions,
    pub style: FieldStyle,
    pub max_length: usize,
    /// Form style only. Defaults to the shortest official length as of the
    /// validation date, regardless of any include-countries filter.
    pub min_length: Option<usize>,
}

impl Default for IbanField {
    fn default() -> Self {
        Self::new(IbanOptions::default())
    }
}

impl IbanField {
    pub fn new(options: IbanOptions) -> Self {
        Self {
            options,
            style: FieldStyle::Form,
            max_length: IBAN_MAX_LENGTH,
            min_length: None,
        }
    }

    pub fn model(options: IbanOptions) -> Self {
        Self {
            style: FieldStyle::Model,
            ..Self::new(options)
        }
    }

    pub fn clean(&self, input: &str) -> Result<Iban, Vec<FieldError>> {
        let value = normalize_iban(input);
        if value.is_empty() {
            return Err(vec![FieldError::Required]);
        }

        let lengths = EffectiveLengths::resolve(&self.options);
        let checked = validate_iban_with(&value, &lengths).map_err(FieldError::from);

        let actual = value.chars().count();
        let mut constraints = Vec::new();
        if actual > self.max_length {
            constraints.push(FieldError::TooLong {
                max: self.max_length,
                actual,
            });
        }
        if self.style == FieldStyle::Form {
            let min = self.min_length.or_else(|| {
                EffectiveLengths::as_of(self.options.effective_date()).min_length()
            });
            if let Some(min) = min.filter(|min| actual < *min) {
                constraints.push(FieldError::TooShort { min, actual });
            }
        }

        collect(self.style, checked, constraints)
    }

    pub fn prepare_value(&self, value: &str) -> String {
        display_iban(value)
    }
}

#[derive(Debug, Clone)]
pub struct BicField<C = Iso3166> {
    pub countries: C,
    pub style: FieldStyle,
    pub max_length: usize,
}

impl Default for BicField<Iso3166> {
    fn default() -> Self {
        Self::new(Iso3166)
    }
}

impl<C: CountryCodes> BicField<C> {
    pub fn new(countries: C) -> Self {
        Self {
            countries,
            style: FieldStyle::Form,
            max_length: BIC_MAX_LENGTH,
        }
    }

    pub fn model(countries: C) -> Self {
        Self {
            style: FieldStyle::Model,
            ..Self::new(countries)
        }
    }

    pub fn clean(&self, input: &str) -> Result<Bic, Vec<FieldError>> {
        let value = normalize_bic(input);
        if value.is_empty() {
            return Err(vec![FieldError::Required]);
        }

        let checked = validate_bic_with(&value, &self.countries).map_err(FieldError::from);

        let actual = value.chars().count();
        let mut constraints = Vec::new();
        if actual > self.max_length {
            constraints.push(FieldError::TooLong {
                max: self.max_length,
                actual,
            });
        }

        collect(self.style, checked, constraints)
    }

    pub fn prepare_value(&self, value: &str) -> String {
        display_bic(value)
    }
}

fn collect<T>(
    style: FieldStyle,
    checked: Result<T, FieldError>,
    constraints: Vec<FieldError>,
) -> Result<T, Vec<FieldError>> {
    match (checked, style) {
        (Ok(value), _) if constraints.is_empty() => Ok(value),
        (Ok(_), _) => Err(constraints),
        (Err(err), FieldStyle::Form) => Err(std::iter::once(err).chain(constraints).collect()),
        (Err(err), FieldStyle::Model) => {
            let mut errors = constraints;
            errors.push(err);
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BicError, IbanError};
    use chrono::NaiveDate;

    fn iban_field() -> IbanField {
        IbanField::new(IbanOptions::default().as_of(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()))
    }

    fn messages(errors: &[FieldError]) -> Vec<String> {
        errors.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn cleans_spaced_input() {
        let field = iban_field();
        for (input, output) in [
            ("NL02 ABNA 0123 4567 89", "NL02ABNA0123456789"),
            ("NL91ABNA0417164300", "NL91ABNA0417164300"),
            ("MU17 BOMM 0101 1010 3030 0200 000M UR", "MU17BOMM0101101030300200000MUR"),
            ("BE68 5390 0754 7034", "BE68539007547034"),
        ] {
            assert_eq!(field.clean(input).unwrap().as_str(), output);
        }
    }

    #[test]
    fn collects_validator_and_length_errors() {
        let errors = iban_field()
            .clean("MU17 BOMM 0101 1010 3030 0200 000M UR12 345")
            .unwrap_err();
        assert_eq!(
            messages(&errors),
            vec![
                "Wrong IBAN length for country code MU.".to_string(),
                "Ensure this value has at most 34 characters (it has 35).".to_string(),
            ]
        );
    }

    #[test]
    fn single_validator_error() {
        let field = iban_field();
        assert_eq!(
            field.clean("NL91 ABNB 0417 1643 00").unwrap_err(),
            vec![FieldError::Iban(IbanError::ChecksumFailed)]
        );
        assert_eq!(
            messages(&field.clean("EG11 0000 6001 8808 0010 0014 553").unwrap_err()),
            vec!["EG is not a valid Country Code for IBAN.".to_string()]
        );
    }

    #[test]
    fn min_length_ignores_the_include_filter() {
        let field = IbanField::new(
            IbanOptions::default()
                .as_of(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
                .include_countries(["NL"]),
        );
        // Norway is excluded but still sets the 15-character floor.
        assert_eq!(
            messages(&field.clean("NO9386011117947").unwrap_err()),
            vec!["NO is not a valid Country Code for IBAN.".to_string()]
        );
        assert_eq!(
            field.clean("NL02ABNA01").unwrap_err(),
            vec![
                FieldError::Iban(IbanError::WrongLength {
                    country: "NL".to_string(),
                    expected: 18,
                    actual: 10,
                }),
                FieldError::TooShort { min: 15, actual: 10 },
            ]
        );
    }

    #[test]
    fn model_style_reports_length_first() {
        let field = IbanField::model(
            IbanOptions::default().as_of(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
        );
        assert_eq!(
            messages(&field.clean("MU17BOMM0101101030300200000MUR12345").unwrap_err()),
            vec![
                "Ensure this value has at most 34 characters (it has 35).".to_string(),
                "Wrong IBAN length for country code MU.".to_string(),
            ]
        );
        assert_eq!(
            field.clean("NL02 ABNA 0123 4567 89").unwrap().as_str(),
            "NL02ABNA0123456789"
        );
    }

    #[test]
    fn model_style_has_no_min_length() {
        let field = IbanField::model(
            IbanOptions::default().as_of(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
        );
        assert_eq!(
            field.clean("NL02ABNA01").unwrap_err(),
            vec![FieldError::Iban(IbanError::WrongLength {
                country: "NL".to_string(),
                expected: 18,
                actual: 10,
            })]
        );
    }

    #[test]
    fn bic_model_style_reports_length_first() {
        let field = BicField::model(Iso3166);
        assert_eq!(
            field.clean("DEUTDEFF5000").unwrap_err(),
            vec![
                FieldError::TooLong { max: 11, actual: 12 },
                FieldError::Bic(BicError::InvalidLength { actual: 12 }),
            ]
        );
        assert_eq!(
            messages(&field.clean("D3UTDEFF").unwrap_err()),
            vec!["D3UT is not a valid SWIFT-BIC Institution Code.".to_string()]
        );
    }

    #[test]
    fn empty_input_is_required() {
        assert_eq!(iban_field().clean("  "), Err(vec![FieldError::Required]));
        let bic: BicField = BicField::default();
        assert_eq!(bic.clean(""), Err(vec![FieldError::Required]));
    }

    #[test]
    fn bic_field_uppercases() {
        let field: BicField = BicField::default();
        assert_eq!(field.clean("deutdeff").unwrap().as_str(), "DEUTDEFF");
        assert_eq!(
            field.clean("CIBCJJH2").unwrap_err(),
            vec![FieldError::Bic(BicError::InvalidCountryCode("JJ".to_string()))]
        );
        assert_eq!(
            messages(&field.clean("D3UTDEFF").unwrap_err()),
            vec!["D3UT is not a valid SWIFT-BIC Institution Code.".to_string()]
        );
        assert_eq!(
            field.clean("DEUTDEFF5000").unwrap_err(),
            vec![
                FieldError::Bic(BicError::InvalidLength { actual: 12 }),
                FieldError::TooLong { max: 11, actual: 12 },
            ]
        );
    }

    #[test]
    fn prepare_value_formats_for_display() {
        assert_eq!(
            iban_field().prepare_value("nl02abna0123456789"),
            "NL02 ABNA 0123 4567 89"
        );
        let bic: BicField = BicField::default();
        assert_eq!(bic.prepare_value("dabadkkk"), "DABADKKK");
    }
}
