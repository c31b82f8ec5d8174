//! Brazilian taxpayer documents: CPF (individuals) and CNPJ (companies).
//!
//! Both end with two modulo-11 check digits. The `is_valid_*` functions are
//! total and answer `false` for anything malformed; the typed wrappers
//! ([`Cpf`], [`Cnpj`], [`Document`]) say why parsing failed and always hold
//! bare digits.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use super::mask::{format_cnpj, format_cpf, only_digits};

pub const CPF_LEN: usize = 11;
pub const CNPJ_LEN: usize = 14;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("expected {expected} digits, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("all digits are identical")]
    RepeatedDigits,
    #[error("check digits do not match")]
    CheckDigitMismatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Cpf,
    Cnpj,
}

impl DocumentKind {
    pub fn digit_count(&self) -> usize {
        match self {
            DocumentKind::Cpf => CPF_LEN,
            DocumentKind::Cnpj => CNPJ_LEN,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::Cpf => "CPF",
            DocumentKind::Cnpj => "CNPJ",
        }
    }

    /// Guess the kind from the digit count alone (no checksum).
    pub fn detect(input: &str) -> Option<Self> {
        match only_digits(input).len() {
            CPF_LEN => Some(DocumentKind::Cpf),
            CNPJ_LEN => Some(DocumentKind::Cnpj),
            _ => None,
        }
    }

    fn check_digit(&self, digits: &[u32]) -> u32 {
        match self {
            DocumentKind::Cpf => cpf_check_digit(digits),
            DocumentKind::Cnpj => cnpj_check_digit(digits),
        }
    }

    /// Strip punctuation and verify both check digits.
    fn verify(&self, input: &str) -> Result<String, DocumentError> {
        let digits = only_digits(input);
        let expected = self.digit_count();

        if digits.len() != expected {
            return Err(DocumentError::InvalidLength {
                expected,
                actual: digits.len(),
            });
        }

        let values: Vec<u32> = digits.chars().filter_map(|c| c.to_digit(10)).collect();

        if values.windows(2).all(|w| w[0] == w[1]) {
            return Err(DocumentError::RepeatedDigits);
        }

        for position in [expected - 2, expected - 1] {
            if self.check_digit(&values[..position]) != values[position] {
                return Err(DocumentError::CheckDigitMismatch);
            }
        }

        Ok(digits)
    }
}

/// CPF check digit over `digits` (9 for the first, 10 for the second).
///
/// Weights run from `len + 1` down to 2; the remainder of `sum * 10 / 11`
/// is the digit, with 10 folded to 0.
fn cpf_check_digit(digits: &[u32]) -> u32 {
    let top = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (top - i as u32))
        .sum();

    match (sum * 10) % 11 {
        10 | 11 => 0,
        rest => rest,
    }
}

/// CNPJ check digit over `digits` (12 for the first, 13 for the second).
///
/// Weights start at `len - 7`, count down to 2 and wrap to 9.
fn cnpj_check_digit(digits: &[u32]) -> u32 {
    let mut weight = digits.len() as u32 - 7;
    let mut sum = 0;

    for d in digits {
        sum += d * weight;
        weight -= 1;
        if weight < 2 {
            weight = 9;
        }
    }

    match sum % 11 {
        rest if rest < 2 => 0,
        rest => 11 - rest,
    }
}

/// Validate a CPF. Punctuation is ignored.
pub fn is_valid_cpf(input: &str) -> bool {
    DocumentKind::Cpf.verify(input).is_ok()
}

/// Validate a CNPJ. Punctuation is ignored.
pub fn is_valid_cnpj(input: &str) -> bool {
    DocumentKind::Cnpj.verify(input).is_ok()
}

/// Validate a field that accepts either a CPF or a CNPJ.
pub fn is_valid_document(input: &str) -> bool {
    Document::parse(input).is_ok()
}

macro_rules! document_newtype {
    ($name:ident, $kind:expr, $mask:path) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            pub fn parse(input: &str) -> Result<Self, DocumentError> {
                $kind.verify(input).map(Self)
            }

            /// Bare digits, no punctuation.
            pub fn digits(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&$mask(&self.0))
            }
        }

        impl FromStr for $name {
            type Err = DocumentError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                Self::parse(&raw).map_err(de::Error::custom)
            }
        }
    };
}

document_newtype!(Cpf, DocumentKind::Cpf, format_cpf);
document_newtype!(Cnpj, DocumentKind::Cnpj, format_cnpj);

/// A validated CPF or CNPJ.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Document {
    Cpf(Cpf),
    Cnpj(Cnpj),
}

impl Document {
    pub fn parse(input: &str) -> Result<Self, DocumentError> {
        match DocumentKind::detect(input) {
            Some(DocumentKind::Cpf) => Cpf::parse(input).map(Document::Cpf),
            Some(DocumentKind::Cnpj) => Cnpj::parse(input).map(Document::Cnpj),
            None => {
                let actual = only_digits(input).len();
                let expected = if actual <= CPF_LEN { CPF_LEN } else { CNPJ_LEN };
                Err(DocumentError::InvalidLength { expected, actual })
            }
        }
    }

    pub fn kind(&self) -> DocumentKind {
        match self {
            Document::Cpf(_) => DocumentKind::Cpf,
            Document::Cnpj(_) => DocumentKind::Cnpj,
        }
    }

    pub fn digits(&self) -> &str {
        match self {
            Document::Cpf(cpf) => cpf.digits(),
            Document::Cnpj(cnpj) => cnpj.digits(),
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Document::Cpf(cpf) => fmt::Display::fmt(cpf, f),
            Document::Cnpj(cnpj) => fmt::Display::fmt(cnpj, f),
        }
    }
}

impl FromStr for Document {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.digits())
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic pseudo-random base digits (no rand in this crate).
    fn base_digits(seed: u32, len: usize) -> Vec<u32> {
        let mut state = seed.wrapping_mul(2_654_435_761).wrapping_add(12_345);
        (0..len)
            .map(|_| {
                state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                (state >> 16) % 10
            })
            .collect()
    }

    fn complete(kind: DocumentKind, mut digits: Vec<u32>) -> String {
        for _ in 0..2 {
            let d = kind.check_digit(&digits);
            digits.push(d);
        }
        digits.iter().map(|d| char::from_digit(*d, 10).unwrap()).collect()
    }

    fn generated(kind: DocumentKind) -> Vec<String> {
        (0..500)
            .map(|seed| base_digits(seed, kind.digit_count() - 2))
            .filter(|base| base.windows(2).any(|w| w[0] != w[1]))
            .map(|base| complete(kind, base))
            .collect()
    }

    fn mutate(doc: &str, index: usize, delta: u32) -> String {
        doc.chars()
            .enumerate()
            .map(|(i, c)| {
                if i == index {
                    let d = c.to_digit(10).unwrap();
                    char::from_digit((d + delta) % 10, 10).unwrap()
                } else {
                    c
                }
            })
            .collect()
    }

    #[test]
    fn test_known_cpfs() {
        assert!(is_valid_cpf("11144477735"));
        assert!(is_valid_cpf("111.444.777-35"));
        assert!(is_valid_cpf("123.456.789-09"));
        assert!(is_valid_cpf("12345678909"));
        assert!(!is_valid_cpf("11144477736"));
        assert!(!is_valid_cpf("11111111111"));
    }

    #[test]
    fn test_repeated_cpf_digits_are_rejected() {
        for d in 0..10 {
            let doc: String = std::iter::repeat(char::from_digit(d, 10).unwrap())
                .take(CPF_LEN)
                .collect();
            assert!(!is_valid_cpf(&doc), "{} must be rejected", doc);
            assert_eq!(Cpf::parse(&doc), Err(DocumentError::RepeatedDigits));
        }
    }

    #[test]
    fn test_generated_cpfs_validate() {
        for doc in generated(DocumentKind::Cpf) {
            assert!(is_valid_cpf(&doc), "{} should be valid", doc);
            assert!(is_valid_cpf(&format_cpf(&doc)));
        }
    }

    #[test]
    fn test_cpf_check_digit_mutations_fail() {
        for doc in generated(DocumentKind::Cpf).iter().take(50) {
            for index in [CPF_LEN - 2, CPF_LEN - 1] {
                for delta in 1..10 {
                    assert!(!is_valid_cpf(&mutate(doc, index, delta)));
                }
            }
        }
    }

    #[test]
    fn test_cpf_wrong_length() {
        assert!(!is_valid_cpf(""));
        assert!(!is_valid_cpf("1114447773"));
        assert!(!is_valid_cpf("111444777350"));
        assert!(!is_valid_cpf("abc.def.ghi-jk"));
        assert_eq!(
            Cpf::parse("123"),
            Err(DocumentError::InvalidLength { expected: 11, actual: 3 })
        );
    }

    #[test]
    fn test_known_cnpjs() {
        assert!(is_valid_cnpj("11444777000161"));
        assert!(is_valid_cnpj("11.222.333/0001-81"));
        assert!(!is_valid_cnpj("11.222.333/0001-82"));
        assert!(!is_valid_cnpj("00000000000000"));
        assert!(!is_valid_cnpj("11144477735"));
    }

    #[test]
    fn test_known_cnpj_matches_formula() {
        let digits: Vec<u32> = "112223330001".chars().map(|c| c.to_digit(10).unwrap()).collect();
        assert_eq!(complete(DocumentKind::Cnpj, digits), "11222333000181");
    }

    #[test]
    fn test_generated_cnpjs_validate() {
        for doc in generated(DocumentKind::Cnpj) {
            assert!(is_valid_cnpj(&doc), "{} should be valid", doc);
            assert!(is_valid_cnpj(&format_cnpj(&doc)));
        }
    }

    #[test]
    fn test_cnpj_check_digit_mutations_fail() {
        for doc in generated(DocumentKind::Cnpj).iter().take(50) {
            for index in [CNPJ_LEN - 2, CNPJ_LEN - 1] {
                for delta in 1..10 {
                    assert!(!is_valid_cnpj(&mutate(doc, index, delta)));
                }
            }
        }
    }

    #[test]
    fn test_document_dispatch() {
        assert!(is_valid_document("111.444.777-35"));
        assert!(is_valid_document("11.444.777/0001-61"));
        assert!(!is_valid_document("1234567890123"));

        let doc = Document::parse("11444777000161").unwrap();
        assert_eq!(doc.kind(), DocumentKind::Cnpj);
        assert_eq!(doc.to_string(), "11.444.777/0001-61");
        assert_eq!(doc.digits(), "11444777000161");

        assert_eq!(
            Document::parse("123456789012"),
            Err(DocumentError::InvalidLength { expected: 14, actual: 12 })
        );
    }

    #[test]
    fn test_detect_kind() {
        assert_eq!(DocumentKind::detect("111.444.777-35"), Some(DocumentKind::Cpf));
        assert_eq!(DocumentKind::detect("11444777000161"), Some(DocumentKind::Cnpj));
        assert_eq!(DocumentKind::detect("123"), None);
    }

    #[test]
    fn test_serde_uses_bare_digits() {
        let cpf: Cpf = "111.444.777-35".parse().unwrap();
        assert_eq!(serde_json::to_string(&cpf).unwrap(), "\"11144477735\"");

        let doc: Document = serde_json::from_str("\"11.222.333/0001-81\"").unwrap();
        assert_eq!(doc.kind(), DocumentKind::Cnpj);

        assert!(serde_json::from_str::<Cnpj>("\"11222333000182\"").is_err());
    }
}
