//! ISO 4217 currencies accepted by the gateway.

/// Alpha-3 code to numeric code, the form the `vads_currency` field wants.
pub const SUPPORTED: &[(&str, &str)] = &[
    ("AUD", "036"),
    ("CAD", "124"),
    ("CNY", "156"),
    ("CZK", "203"),
    ("DKK", "208"),
    ("HKD", "344"),
    ("HUF", "348"),
    ("INR", "356"),
    ("JPY", "392"),
    ("KWD", "414"),
    ("MAD", "504"),
    ("NZD", "554"),
    ("NOK", "578"),
    ("SGD", "702"),
    ("ZAR", "710"),
    ("SEK", "752"),
    ("CHF", "756"),
    ("TND", "788"),
    ("GBP", "826"),
    ("USD", "840"),
    ("TRY", "949"),
    ("EUR", "978"),
    ("PLN", "985"),
    ("BRL", "986"),
];

pub fn numeric_code(alpha: &str) -> Option<&'static str> {
    SUPPORTED
        .iter()
        .find(|(a, _)| *a == alpha)
        .map(|(_, n)| *n)
}

pub fn is_supported(numeric: &str) -> bool {
    SUPPORTED.iter().any(|(_, n)| *n == numeric)
}
