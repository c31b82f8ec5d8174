//! Input masks for Brazilian form fields.
//!
//! Every mask strips non-digits first and is total: partial input yields a
//! partial mask, never an error. Applying a mask to its own complete output
//! returns the same string.

/// Longest digit run accepted by the currency mask (keeps values inside `i64`).
const MAX_CURRENCY_DIGITS: usize = 15;

const CEP_PATTERN: &str = "#####-###";
const CPF_PATTERN: &str = "###.###.###-##";
const CNPJ_PATTERN: &str = "##.###.###/####-##";

/// Keep only ASCII digits.
pub fn only_digits(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

fn take_digits(input: &str, max: usize) -> String {
    input.chars().filter(char::is_ascii_digit).take(max).collect()
}

/// Fill `pattern` (`#` = digit slot) with `digits`.
///
/// Literal characters are emitted only while digits remain, so a short input
/// produces a progressively growing mask instead of trailing separators.
fn apply_pattern(digits: &str, pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut rest = digits.chars().peekable();

    for slot in pattern.chars() {
        if rest.peek().is_none() {
            break;
        }
        if slot == '#' {
            if let Some(d) = rest.next() {
                out.push(d);
            }
        } else {
            out.push(slot);
        }
    }

    out
}

fn slots(pattern: &str) -> usize {
    pattern.chars().filter(|c| *c == '#').count()
}

/// CEP mask: `01310100` -> `01310-100`.
pub fn format_cep(input: &str) -> String {
    apply_pattern(&take_digits(input, slots(CEP_PATTERN)), CEP_PATTERN)
}

/// Phone mask: `(DD) DDDD-DDDD` for landlines, `(DD) DDDDD-DDDD` for mobiles.
///
/// The subscriber part is split after 4 digits while the number has up to 10
/// digits and after 5 once it reaches 11.
pub fn format_phone(input: &str) -> String {
    let digits = take_digits(input, 11);
    if digits.len() <= 2 {
        return digits;
    }

    let (area, subscriber) = digits.split_at(2);
    let split = if digits.len() == 11 { 5 } else { 4 };

    if subscriber.len() > split {
        let (head, tail) = subscriber.split_at(split);
        format!("({}) {}-{}", area, head, tail)
    } else {
        format!("({}) {}", area, subscriber)
    }
}

/// CPF mask: `NNN.NNN.NNN-NN`.
pub fn format_cpf(input: &str) -> String {
    apply_pattern(&take_digits(input, slots(CPF_PATTERN)), CPF_PATTERN)
}

/// CNPJ mask: `NN.NNN.NNN/NNNN-NN`.
pub fn format_cnpj(input: &str) -> String {
    apply_pattern(&take_digits(input, slots(CNPJ_PATTERN)), CNPJ_PATTERN)
}

/// Mask for a field accepting either document: CPF layout up to 11 digits,
/// CNPJ layout beyond.
pub fn format_document(input: &str) -> String {
    let digits = only_digits(input);
    if digits.len() <= slots(CPF_PATTERN) {
        format_cpf(&digits)
    } else {
        format_cnpj(&digits)
    }
}

/// Number formatting conventions for money.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberLocale {
    #[default]
    PtBr,
    EnUs,
}

impl NumberLocale {
    pub fn thousands_separator(&self) -> char {
        match self {
            NumberLocale::PtBr => '.',
            NumberLocale::EnUs => ',',
        }
    }

    pub fn decimal_separator(&self) -> char {
        match self {
            NumberLocale::PtBr => ',',
            NumberLocale::EnUs => '.',
        }
    }
}

fn group_thousands(value: u64, separator: char) -> String {
    let raw = value.to_string();
    let mut out = String::with_capacity(raw.len() + raw.len() / 3);

    for (i, c) in raw.chars().enumerate() {
        if i > 0 && (raw.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }

    out
}

/// Format integer cents with exactly two fraction digits.
///
/// ```
/// use contracts::shared::mask::{format_currency_with, NumberLocale};
/// assert_eq!(format_currency_with(123456, NumberLocale::EnUs), "1,234.56");
/// ```
pub fn format_currency_with(cents: i64, locale: NumberLocale) -> String {
    let abs = cents.unsigned_abs();
    let sign = if cents < 0 { "-" } else { "" };

    format!(
        "{}{}{}{:02}",
        sign,
        group_thousands(abs / 100, locale.thousands_separator()),
        locale.decimal_separator(),
        abs % 100
    )
}

/// Format integer cents in pt-BR: `123456` -> `1.234,56`.
pub fn format_currency(cents: i64) -> String {
    format_currency_with(cents, NumberLocale::PtBr)
}

/// Currency input mask: typed digits are read as cents.
///
/// `"1"` -> `"0,01"`, `"12345"` -> `"123,45"`. Empty input stays empty.
pub fn mask_currency(input: &str) -> String {
    let digits = take_digits(input, MAX_CURRENCY_DIGITS);
    if digits.is_empty() {
        return String::new();
    }
    match digits.parse::<i64>() {
        Ok(cents) => format_currency(cents),
        Err(_) => String::new(),
    }
}

/// Read cents back from a masked currency string. A leading `-` makes the
/// value negative.
pub fn parse_currency_cents(input: &str) -> Option<i64> {
    let digits = take_digits(input, MAX_CURRENCY_DIGITS);
    if digits.is_empty() {
        return None;
    }
    let cents = digits.parse::<i64>().ok()?;
    if input.trim_start().starts_with('-') {
        Some(-cents)
    } else {
        Some(cents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_digits() {
        assert_eq!(only_digits("123.456.789-09"), "12345678909");
        assert_eq!(only_digits("abc"), "");
        assert_eq!(only_digits("٣٤"), "");
    }

    #[test]
    fn test_format_cep() {
        assert_eq!(format_cep("01310100"), "01310-100");
        assert_eq!(format_cep("01310-100"), "01310-100");
        assert_eq!(format_cep("01310"), "01310");
        assert_eq!(format_cep("013101"), "01310-1");
        assert_eq!(format_cep("0131010099"), "01310-100");
        assert_eq!(format_cep(""), "");
    }

    #[test]
    fn test_format_phone_landline_and_mobile() {
        assert_eq!(format_phone("1134567890"), "(11) 3456-7890");
        assert_eq!(format_phone("11987654321"), "(11) 98765-4321");
        assert_eq!(format_phone("+55 (11) 98765-4321"), "(55) 11987-6543");
    }

    #[test]
    fn test_format_phone_partial() {
        assert_eq!(format_phone(""), "");
        assert_eq!(format_phone("1"), "1");
        assert_eq!(format_phone("11"), "11");
        assert_eq!(format_phone("119"), "(11) 9");
        assert_eq!(format_phone("113456"), "(11) 3456");
        assert_eq!(format_phone("1134567"), "(11) 3456-7");
        assert_eq!(format_phone("119876543210"), "(11) 98765-4321");
    }

    #[test]
    fn test_format_phone_is_idempotent() {
        for raw in ["1134567890", "11987654321", "1134", "119"] {
            let once = format_phone(raw);
            assert_eq!(format_phone(&once), once);
        }
    }

    #[test]
    fn test_format_documents() {
        assert_eq!(format_cpf("11144477735"), "111.444.777-35");
        assert_eq!(format_cpf("1114"), "111.4");
        assert_eq!(format_cnpj("11222333000181"), "11.222.333/0001-81");
        assert_eq!(format_cnpj("112223"), "11.222.3");
        assert_eq!(format_document("11144477735"), "111.444.777-35");
        assert_eq!(format_document("111444777351"), "11.144.477/7351");
        assert_eq!(format_document("11.222.333/0001-81"), "11.222.333/0001-81");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0), "0,00");
        assert_eq!(format_currency(5), "0,05");
        assert_eq!(format_currency(123456), "1.234,56");
        assert_eq!(format_currency(100000000), "1.000.000,00");
        assert_eq!(format_currency(-123456), "-1.234,56");
        assert_eq!(format_currency_with(123456789, NumberLocale::EnUs), "1,234,567.89");
        assert_eq!(format_currency(i64::MIN), "-92.233.720.368.547.758,08");
    }

    #[test]
    fn test_mask_currency() {
        assert_eq!(mask_currency(""), "");
        assert_eq!(mask_currency("1"), "0,01");
        assert_eq!(mask_currency("12345"), "123,45");
        assert_eq!(mask_currency("R$ 1.234,56"), "1.234,56");
        assert_eq!(mask_currency("0001"), "0,01");
        let masked = mask_currency("123456789");
        assert_eq!(mask_currency(&masked), masked);
    }

    #[test]
    fn test_parse_currency_cents() {
        assert_eq!(parse_currency_cents("1.234,56"), Some(123456));
        assert_eq!(parse_currency_cents("-0,50"), Some(-50));
        assert_eq!(parse_currency_cents(""), None);
        assert_eq!(parse_currency_cents(&format_currency(987654)), Some(987654));
    }
}
