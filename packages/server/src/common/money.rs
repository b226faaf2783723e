use rust_decimal::{Decimal, RoundingStrategy};

/// Render an amount the way the panel shows it, e.g. `R$ 1.234,56` or `$1,234.56`.
pub fn format_currency(amount: Decimal, currency: &str) -> String {
    match currency {
        "BRL" => format!("R$ {}", group_digits(amount, ',', '.')),
        "USD" => format!("${}", group_digits(amount, '.', ',')),
        "EUR" => format!("€{}", group_digits(amount, ',', '.')),
        other => format!("{} {}", other, group_digits(amount, '.', ',')),
    }
}

/// Percentage change from `old` to `new`, two decimals.
///
/// A zero baseline reports 100 for any growth and 0 otherwise.
pub fn percentage_change(old: Decimal, new: Decimal) -> Decimal {
    if old.is_zero() {
        return if new > Decimal::ZERO {
            Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };
    }
    ((new - old) / old * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn group_digits(amount: Decimal, decimal_sep: char, thousands_sep: char) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(thousands_sep);
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{}{}{}", sign, grouped, decimal_sep, frac_part)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn formats_known_currencies() {
        assert_eq!(format_currency(dec("1234.5"), "BRL"), "R$ 1.234,50");
        assert_eq!(format_currency(dec("1234567.891"), "USD"), "$1,234,567.89");
        assert_eq!(format_currency(dec("999"), "EUR"), "€999,00");
        assert_eq!(format_currency(dec("-42.005"), "GBP"), "GBP -42.01");
    }

    #[test]
    fn percentage_change_handles_zero_baseline() {
        assert_eq!(percentage_change(Decimal::ZERO, dec("10")), dec("100"));
        assert_eq!(percentage_change(Decimal::ZERO, Decimal::ZERO), Decimal::ZERO);
        assert_eq!(percentage_change(dec("200"), dec("150")), dec("-25"));
        assert_eq!(percentage_change(dec("3"), dec("4")), dec("33.33"));
    }
}
