//! Seeded synthetic IBANs and BICs for fixtures and demos. Output is
//! reproducible for a given seed.

use crate::iban::{check_digits, EffectiveLengths};
use crate::reference::is_known_country_code;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const DIGITS: &[u8] = b"0123456789";
const UPPER: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const ALPHANUM_UPPER: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate `count` valid IBANs. An empty `countries` draws from the whole
/// effective table.
pub fn generate_ibans(
    lengths: &EffectiveLengths,
    countries: &[String],
    count: usize,
    seed: u64,
) -> Result<Vec<String>, String> {
    let pool: Vec<(String, usize)> = if countries.is_empty() {
        lengths
            .countries()
            .map(|(code, len)| (code.to_string(), len))
            .collect()
    } else {
        countries
            .iter()
            .map(|code| {
                lengths
                    .get(code)
                    .map(|len| (code.clone(), len))
                    .ok_or_else(|| format!("no IBAN format known for country {}", code))
            })
            .collect::<Result<_, _>>()?
    };
    if pool.is_empty() {
        return Err("no countries available for IBAN generation".to_string());
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let (country, length) = pool
            .choose(&mut rng)
            .ok_or_else(|| "empty country pool".to_string())?;
        out.push(generate_iban(&mut rng, country, *length)?);
    }
    Ok(out)
}

/// Generate `count` structurally valid BICs, 8 or 11 characters long.
pub fn generate_bics(countries: &[String], count: usize, seed: u64) -> Result<Vec<String>, String> {
    if let Some(bad) = countries.iter().find(|code| !is_known_country_code(code)) {
        return Err(format!("{} is not an ISO 3166-1 country code", bad));
    }
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let country = if countries.is_empty() {
            "DE".to_string()
        } else {
            countries
                .choose(&mut rng)
                .cloned()
                .unwrap_or_else(|| "DE".to_string())
        };
        out.push(generate_bic_for_country(&mut rng, &country));
    }
    Ok(out)
}

fn generate_iban<R: Rng + ?Sized>(
    rng: &mut R,
    country: &str,
    length: usize,
) -> Result<String, String> {
    let bban = random_from(rng, DIGITS, length.saturating_sub(4));
    let check = check_digits(country, &bban).map_err(|err| err.to_string())?;
    Ok(format!("{}{}{}", country, check, bban))
}

fn generate_bic_for_country<R: Rng + ?Sized>(rng: &mut R, country: &str) -> String {
    let bank = random_from(rng, UPPER, 4);
    let location = random_from(rng, ALPHANUM_UPPER, 2);
    if rng.gen_bool(0.5) {
        let branch = random_from(rng, ALPHANUM_UPPER, 3);
        format!("{}{}{}{}", bank, country, location, branch)
    } else {
        format!("{}{}{}", bank, country, location)
    }
}

fn random_from<R: Rng + ?Sized>(rng: &mut R, charset: &[u8], len: usize) -> String {
    let mut out = String::with_capacity(len);
    for _ in 0..len {
        let idx = rng.gen_range(0..charset.len());
        out.push(char::from(charset[idx]));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bic::validate_bic;
    use crate::iban::validate_iban_with;
    use chrono::NaiveDate;

    fn table() -> EffectiveLengths {
        EffectiveLengths::as_of(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
    }

    #[test]
    fn generated_ibans_validate() {
        let lengths = table();
        let ibans = generate_ibans(&lengths, &[], 200, 7).unwrap();
        assert_eq!(ibans.len(), 200);
        for iban in &ibans {
            assert!(validate_iban_with(iban, &lengths).is_ok(), "{iban}");
        }
    }

    #[test]
    fn same_seed_same_output() {
        let lengths = table();
        let countries = vec!["BG".to_string(), "NL".to_string()];
        let first = generate_ibans(&lengths, &countries, 10, 42).unwrap();
        let second = generate_ibans(&lengths, &countries, 10, 42).unwrap();
        assert_eq!(first, second);
        assert!(first.iter().all(|iban| iban.starts_with("BG") || iban.starts_with("NL")));
    }

    #[test]
    fn unknown_country_is_an_error() {
        let err = generate_ibans(&table(), &["CA".to_string()], 1, 1).unwrap_err();
        assert!(err.contains("CA"));
        assert!(generate_bics(&["JJ".to_string()], 1, 1).is_err());
    }

    #[test]
    fn generated_bics_validate() {
        let bics = generate_bics(&["FR".to_string(), "IT".to_string()], 50, 3).unwrap();
        for bic in &bics {
            assert!(validate_bic(bic).is_ok(), "{bic}");
        }
    }
}
