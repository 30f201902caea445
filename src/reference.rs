//! Static reference data: IBAN lengths per country, the activation schedule
//! for late joiners, the unofficial extension table and ISO 3166-1 codes.
//!
//! Lengths follow the published IBAN registry formats; the French overseas
//! territories have their own codes but share the `FR` length.

use chrono::NaiveDate;

/// Longest IBAN permitted by ISO 13616.
pub const IBAN_MAX_LENGTH: usize = 34;

pub const IBAN_LENGTHS: &[(&str, usize)] = &[
    ("AL", 28),
    ("AD", 24),
    ("AT", 20),
    ("AZ", 28),
    ("BE", 16),
    ("BH", 22),
    ("BA", 20),
    ("BG", 22),
    ("CR", 21),
    ("HR", 21),
    ("CY", 28),
    ("CZ", 24),
    ("DK", 18),
    ("DO", 28),
    ("EE", 20),
    ("FO", 18),
    ("FI", 18),
    ("FR", 27),
    ("GE", 22),
    ("DE", 22),
    ("GI", 23),
    ("GR", 27),
    ("GL", 18),
    ("HU", 28),
    ("IS", 26),
    ("IE", 22),
    ("IL", 23),
    ("IT", 27),
    ("KZ", 20),
    ("KW", 30),
    ("LV", 21),
    ("LB", 28),
    ("LI", 21),
    ("LT", 20),
    ("LU", 20),
    ("MK", 19),
    ("MT", 31),
    ("MR", 27),
    ("MU", 30),
    ("MC", 27),
    ("MD", 24),
    ("ME", 22),
    ("NL", 18),
    ("NO", 15),
    ("PS", 29),
    ("PL", 28),
    ("PK", 24),
    ("PT", 25),
    ("RO", 24),
    ("SM", 27),
    ("SA", 24),
    ("RS", 22),
    ("SK", 24),
    ("SI", 19),
    ("ES", 24),
    ("SE", 24),
    ("CH", 21),
    ("TN", 24),
    ("TR", 26),
    ("AE", 23),
    ("GB", 22),
    ("VG", 24),
    // French Polynesia, French Southern Territories, Mayotte, New Caledonia,
    // Saint Pierre and Miquelon, Wallis and Futuna.
    ("PF", 27),
    ("TF", 27),
    ("YT", 27),
    ("NC", 27),
    ("PM", 27),
    ("WF", 27),
];

/// A country joining the IBAN system on a fixed date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activation {
    pub country: &'static str,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub length: usize,
}

impl Activation {
    pub fn effective_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    pub fn is_active(&self, as_of: NaiveDate) -> bool {
        self.effective_date().is_some_and(|date| date <= as_of)
    }
}

/// Ordered by effective date.
pub const ACTIVATION_SCHEDULE: &[Activation] = &[
    Activation {
        country: "BR",
        year: 2013,
        month: 7,
        day: 1,
        length: 29,
    },
    Activation {
        country: "GT",
        year: 2014,
        month: 7,
        day: 1,
        length: 28,
    },
];

/// Unofficial IBAN formats catalogued by Nordea, used by some countries
/// ahead of official registration.
pub const NORDEA_IBAN_LENGTHS: &[(&str, usize)] = &[
    ("AO", 25),
    ("BJ", 28),
    ("BF", 27),
    ("BI", 16),
    ("CI", 28),
    ("CG", 27),
    ("CM", 27),
    ("CV", 25),
    ("DZ", 24),
    ("EG", 27),
    ("GA", 27),
    ("IR", 26),
    ("MG", 27),
    ("ML", 28),
    ("MZ", 25),
    ("SN", 28),
    ("UA", 29),
];

/// Countries taking part in SEPA that issue IBANs, for use as an
/// include-countries filter.
pub const IBAN_SEPA_COUNTRIES: &[&str] = &[
    "AT", "BE", "BG", "CH", "CY", "CZ", "DE", "DK", "EE", "ES", "FI", "FR", "GB", "GI", "GR",
    "HR", "HU", "IE", "IS", "IT", "LI", "LT", "LU", "LV", "MC", "MT", "NL", "NO", "PL", "PM",
    "PT", "RO", "SE", "SI", "SK", "SM", "YT",
];

pub fn iban_length(country: &str) -> Option<usize> {
    IBAN_LENGTHS
        .iter()
        .find(|(code, _)| *code == country)
        .map(|(_, len)| *len)
}

/// Check whether `code` is an assigned ISO 3166-1 alpha-2 country code.
pub fn is_known_country_code(code: &str) -> bool {
    COUNTRY_CODES.binary_search(&code).is_ok()
}

/// ISO 3166-1 alpha-2, sorted for binary search.
static COUNTRY_CODES: &[&str] = &[
    "AD", "AE", "AF", "AG", "AI", "AL", "AM", "AO", "AQ", "AR", "AS", "AT", "AU", "AW", "AX", "AZ",
    "BA", "BB", "BD", "BE", "BF", "BG", "BH", "BI", "BJ", "BL", "BM", "BN", "BO", "BQ", "BR", "BS",
    "BT", "BV", "BW", "BY", "BZ", "CA", "CC", "CD", "CF", "CG", "CH", "CI", "CK", "CL", "CM", "CN",
    "CO", "CR", "CU", "CV", "CW", "CX", "CY", "CZ", "DE", "DJ", "DK", "DM", "DO", "DZ", "EC", "EE",
    "EG", "EH", "ER", "ES", "ET", "FI", "FJ", "FK", "FM", "FO", "FR", "GA", "GB", "GD", "GE", "GF",
    "GG", "GH", "GI", "GL", "GM", "GN", "GP", "GQ", "GR", "GS", "GT", "GU", "GW", "GY", "HK", "HM",
    "HN", "HR", "HT", "HU", "ID", "IE", "IL", "IM", "IN", "IO", "IQ", "IR", "IS", "IT", "JE", "JM",
    "JO", "JP", "KE", "KG", "KH", "KI", "KM", "KN", "KP", "KR", "KW", "KY", "KZ", "LA", "LB", "LC",
    "LI", "LK", "LR", "LS", "LT", "LU", "LV", "LY", "MA", "MC", "MD", "ME", "MF", "MG", "MH", "MK",
    "ML", "MM", "MN", "MO", "MP", "MQ", "MR", "MS", "MT", "MU", "MV", "MW", "MX", "MY", "MZ", "NA",
    "NC", "NE", "NF", "NG", "NI", "NL", "NO", "NP", "NR", "NU", "NZ", "OM", "PA", "PE", "PF", "PG",
    "PH", "PK", "PL", "PM", "PN", "PR", "PS", "PT", "PW", "PY", "QA", "RE", "RO", "RS", "RU", "RW",
    "SA", "SB", "SC", "SD", "SE", "SG", "SH", "SI", "SJ", "SK", "SL", "SM", "SN", "SO", "SR", "SS",
    "ST", "SV", "SX", "SY", "SZ", "TC", "TD", "TF", "TG", "TH", "TJ", "TK", "TL", "TM", "TN", "TO",
    "TR", "TT", "TV", "TW", "TZ", "UA", "UG", "UM", "US", "UY", "UZ", "VA", "VC", "VE", "VG", "VI",
    "VN", "VU", "WF", "WS", "YE", "YT", "ZA", "ZM", "ZW",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn well_formed(code: &str) -> bool {
        code.len() == 2 && code.chars().all(|ch| ch.is_ascii_uppercase())
    }

    #[test]
    fn length_tables_hold_valid_entries() {
        for (code, len) in IBAN_LENGTHS.iter().chain(NORDEA_IBAN_LENGTHS) {
            assert!(well_formed(code), "bad country key {code}");
            assert!(*len > 4 && *len <= IBAN_MAX_LENGTH, "bad length for {code}");
        }
        for entry in ACTIVATION_SCHEDULE {
            assert!(well_formed(entry.country));
            assert!(entry.length <= IBAN_MAX_LENGTH);
            assert!(entry.effective_date().is_some());
        }
    }

    #[test]
    fn extensions_do_not_shadow_official_entries() {
        for (code, _) in NORDEA_IBAN_LENGTHS {
            assert!(iban_length(code).is_none(), "{code} is already official");
        }
        for entry in ACTIVATION_SCHEDULE {
            assert!(iban_length(entry.country).is_none());
        }
    }

    #[test]
    fn schedule_is_ordered_by_date() {
        for window in ACTIVATION_SCHEDULE.windows(2) {
            assert!(window[0].effective_date() <= window[1].effective_date());
        }
    }

    #[test]
    fn activation_boundary_is_inclusive() {
        let brazil = ACTIVATION_SCHEDULE[0];
        let day = NaiveDate::from_ymd_opt(2013, 7, 1).unwrap();
        assert!(brazil.is_active(day));
        assert!(!brazil.is_active(day.pred_opt().unwrap()));
    }

    #[test]
    fn country_codes_sorted_and_complete() {
        for window in COUNTRY_CODES.windows(2) {
            assert!(window[0] < window[1], "{} >= {}", window[0], window[1]);
        }
        assert_eq!(COUNTRY_CODES.len(), 249);
        assert!(is_known_country_code("ZA"));
        assert!(!is_known_country_code("JJ"));
        assert!(!is_known_country_code("de"));
    }

    #[test]
    fn sepa_countries_all_issue_ibans() {
        for code in IBAN_SEPA_COUNTRIES {
            assert!(iban_length(code).is_some(), "{code} has no IBAN length");
        }
    }
}
