use alloy_primitives::U256;

fn scale(decimals: u8) -> U256 {
    U256::from(10u64).pow(U256::from(decimals))
}

/// Converts a decimal string such as `"1.5"` into its fixed-point integer.
///
/// Returns `None` for empty input, anything that is not a plain non-negative decimal, more
/// fractional digits than `decimals`, or a value that does not fit in 256 bits.
pub fn parse_token_amount(amount: impl AsRef<str>, decimals: u8) -> Option<U256> {
    let amount = amount.as_ref().trim();
    let (whole, fraction) = amount.split_once('.').unwrap_or((amount, ""));

    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    if fraction.len() > decimals as usize {
        return None;
    }

    let whole = match whole {
        "" => U256::ZERO,
        digits => U256::from_str_radix(digits, 10).ok()?,
    };
    let fraction = match fraction {
        "" => U256::ZERO,
        digits => {
            let padded = format!("{digits:0<width$}", width = decimals as usize);
            U256::from_str_radix(&padded, 10).ok()?
        }
    };

    whole.checked_mul(scale(decimals))?.checked_add(fraction)
}

/// Formats a fixed-point integer as a decimal string. Trailing zeros are trimmed, but at least
/// one fractional digit is kept (`10.0`, `0.25`).
pub fn display_token_amount(amount: U256, decimals: u8) -> String {
    let factor = scale(decimals);

    let integer_part = amount / factor;
    let fractional_part = amount % factor;

    if decimals == 0 {
        return integer_part.to_string();
    }

    let digits = fractional_part.to_string();
    let fractional_str = format!("{}{digits}", "0".repeat(decimals as usize - digits.len()));
    let trimmed_fractional = fractional_str.trim_end_matches('0');

    if trimmed_fractional.is_empty() {
        format!("{integer_part}.0")
    } else {
        format!("{integer_part}.{trimmed_fractional}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ether(n: u64) -> U256 {
        U256::from(n) * scale(18)
    }

    #[test]
    fn parses_whole_and_fractional_amounts() {
        assert_eq!(parse_token_amount("10", 18), Some(ether(10)));
        assert_eq!(parse_token_amount("1.5", 18), Some(ether(3) / U256::from(2)));
        assert_eq!(parse_token_amount(".5", 1), Some(U256::from(5)));
        assert_eq!(parse_token_amount("7.", 2), Some(U256::from(700)));
        assert_eq!(parse_token_amount(" 2 ", 0), Some(U256::from(2)));
    }

    #[test]
    fn rejects_malformed_amounts() {
        for input in ["", " ", ".", "-1", "1e18", "abc", "1.2.3", "0x10", "1,5"] {
            assert_eq!(parse_token_amount(input, 18), None, "{input:?}");
        }
    }

    #[test]
    fn rejects_more_precision_than_the_token_has() {
        assert_eq!(parse_token_amount("0.123", 2), None);
        assert_eq!(parse_token_amount("0.12", 2), Some(U256::from(12)));
    }

    #[test]
    fn rejects_overflow() {
        assert_eq!(parse_token_amount(U256::MAX.to_string(), 18), None);
    }

    #[test]
    fn displays_like_the_wallet_does() {
        assert_eq!(display_token_amount(ether(10), 18), "10.0");
        assert_eq!(display_token_amount(U256::from(25) * scale(16), 18), "0.25");
        assert_eq!(display_token_amount(U256::from(1), 18), "0.000000000000000001");
        assert_eq!(display_token_amount(U256::from(42), 0), "42");
    }

    proptest! {
        #[test]
        fn displayed_amounts_parse_back(raw in any::<u128>()) {
            let amount = U256::from(raw);
            let shown = display_token_amount(amount, 18);
            prop_assert_eq!(parse_token_amount(&shown, 18), Some(amount));
        }
    }
}
