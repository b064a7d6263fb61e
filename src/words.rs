//! English spelling of invoice amounts, e.g. `236.00` as "two hundred thirty-six only".

use bigdecimal::{BigDecimal, RoundingMode, Signed, ToPrimitive, Zero};

use crate::error::Error;

const ONES: [&str; 20] = [
    "zero",
    "one",
    "two",
    "three",
    "four",
    "five",
    "six",
    "seven",
    "eight",
    "nine",
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

// Short scale, largest first. u64::MAX is a little over eighteen quintillion.
const SCALES: [(u64, &str); 6] = [
    (1_000_000_000_000_000_000, "quintillion"),
    (1_000_000_000_000_000, "quadrillion"),
    (1_000_000_000_000, "trillion"),
    (1_000_000_000, "billion"),
    (1_000_000, "million"),
    (1_000, "thousand"),
];

/// Spell a number below one thousand. `n` must be non-zero.
fn below_thousand(n: u64, words: &mut Vec<String>) {
    let hundreds = n / 100;
    let rest = n % 100;
    if hundreds > 0 {
        words.push(format!("{} hundred", ONES[hundreds as usize]));
    }
    if rest == 0 {
        return;
    }
    if rest < 20 {
        words.push(ONES[rest as usize].to_string());
    } else if rest % 10 == 0 {
        words.push(TENS[(rest / 10) as usize].to_string());
    } else {
        words.push(format!(
            "{}-{}",
            TENS[(rest / 10) as usize],
            ONES[(rest % 10) as usize]
        ));
    }
}

/// Spell a whole number in English words.
///
/// ```rust
/// use gst_invoice::words::number_to_words;
///
/// assert_eq!(number_to_words(0), "zero");
/// assert_eq!(number_to_words(236), "two hundred thirty-six");
/// assert_eq!(number_to_words(1_000_017), "one million seventeen");
/// ```
pub fn number_to_words(n: u64) -> String {
    if n == 0 {
        return ONES[0].to_string();
    }
    let mut words = Vec::new();
    let mut rest = n;
    for (scale, name) in SCALES {
        let count = rest / scale;
        if count > 0 {
            below_thousand(count, &mut words);
            words.push(name.to_string());
            rest %= scale;
        }
    }
    if rest > 0 {
        below_thousand(rest, &mut words);
    }
    words.join(" ")
}

/// Spell a currency amount the way it is printed on an invoice.
///
/// The amount is first rounded half-up to two decimal places. The rupee part is spelled in
/// words, non-zero paise are appended as "and <n> paise", negative amounts are prefixed with
/// "minus", and the result always ends with "only".
///
/// # Errors
/// Returns an `InvalidAmount` [`Error`] if the rupee part does not fit in a `u64`.
///
/// # Example
/// ```rust
/// use bigdecimal::BigDecimal;
/// use gst_invoice::words::amount_in_words;
///
/// let words = amount_in_words(&BigDecimal::from(236)).unwrap();
/// assert_eq!(words, "two hundred thirty-six only");
/// ```
pub fn amount_in_words(amount: &BigDecimal) -> Result<String, Error> {
    let rounded = amount.with_scale_round(2, RoundingMode::HalfUp);
    let magnitude = rounded.abs();
    let rupees = magnitude.with_scale_round(0, RoundingMode::Down);
    let paise = ((&magnitude - &rupees) * BigDecimal::from(100))
        .to_u64()
        .ok_or_else(|| Error::invalid_amount(format!("cannot spell paise of {rounded}")))?;
    let rupees = rupees
        .to_u64()
        .ok_or_else(|| Error::invalid_amount(format!("{rounded} is too large to spell")))?;

    let mut spelled = String::new();
    if rounded.is_negative() && !rounded.is_zero() {
        spelled.push_str("minus ");
    }
    spelled.push_str(&number_to_words(rupees));
    if paise > 0 {
        spelled.push_str(" and ");
        spelled.push_str(&number_to_words(paise));
        spelled.push_str(" paise");
    }
    spelled.push_str(" only");
    Ok(spelled)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::error::ErrorKind;

    fn words(s: &str) -> String {
        amount_in_words(&BigDecimal::from_str(s).unwrap()).unwrap()
    }

    #[test]
    fn small_numbers() {
        assert_eq!(number_to_words(7), "seven");
        assert_eq!(number_to_words(13), "thirteen");
        assert_eq!(number_to_words(40), "forty");
        assert_eq!(number_to_words(99), "ninety-nine");
        assert_eq!(number_to_words(100), "one hundred");
        assert_eq!(number_to_words(101), "one hundred one");
    }

    #[test]
    fn scales() {
        assert_eq!(number_to_words(1_000), "one thousand");
        assert_eq!(
            number_to_words(1_234),
            "one thousand two hundred thirty-four"
        );
        assert_eq!(
            number_to_words(2_500_300),
            "two million five hundred thousand three hundred"
        );
        assert_eq!(
            number_to_words(u64::MAX),
            "eighteen quintillion four hundred forty-six quadrillion seven hundred forty-four \
             trillion seventy-three billion seven hundred nine million five hundred fifty-one \
             thousand six hundred fifteen"
        );
    }

    #[test]
    fn zero_amount() {
        assert_eq!(words("0"), "zero only");
        assert_eq!(words("0.00"), "zero only");
        assert_eq!(words("-0.001"), "zero only");
    }

    #[test]
    fn whole_and_fractional_amounts() {
        assert_eq!(words("236.00"), "two hundred thirty-six only");
        assert_eq!(words("236.5"), "two hundred thirty-six and fifty paise only");
        assert_eq!(words("1.01"), "one and one paise only");
    }

    #[test]
    fn rounds_half_up_to_paise() {
        assert_eq!(words("10.005"), "ten and one paise only");
        assert_eq!(words("10.004"), "ten only");
        assert_eq!(words("9.999"), "ten only");
    }

    #[test]
    fn negative_amounts() {
        assert_eq!(words("-18"), "minus eighteen only");
        assert_eq!(words("-0.5"), "minus zero and fifty paise only");
    }

    #[test]
    fn too_large_is_invalid_amount() {
        let huge = BigDecimal::from_str("1e30").unwrap();
        let err = amount_in_words(&huge).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidAmount(_)));
    }
}
