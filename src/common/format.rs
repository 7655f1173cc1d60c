// src/common/format.rs

use rust_decimal::{Decimal, RoundingStrategy};

use crate::{middleware::i18n::Locale, models::authorization::TransactionLimit};

/// Formata um valor em reais no padrão pt-BR: `R$ 1.234,56`.
pub fn format_brl(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();

    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}R$ {grouped},{frac_part}")
}

/// Texto de exibição de um limite de transação.
pub fn format_limit(limit: Option<TransactionLimit>, locale: &Locale) -> String {
    let pt = locale.is_portuguese();
    match limit {
        None => label(pt, "Não disponível", "not available"),
        Some(TransactionLimit::Unlimited) => label(pt, "Ilimitado", "unlimited"),
        Some(TransactionLimit::Blocked) => label(pt, "Bloqueado", "blocked"),
        Some(TransactionLimit::Capped(value)) => format_brl(value),
    }
}

pub fn format_permission(allowed: bool, locale: &Locale) -> String {
    let pt = locale.is_portuguese();
    if allowed {
        label(pt, "Permitido", "permitted")
    } else {
        label(pt, "Bloqueado", "blocked")
    }
}

fn label(pt: bool, pt_text: &str, en_text: &str) -> String {
    let text = if pt { pt_text } else { en_text };
    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::AppError;

    // Caminho completo: número cru -> limite -> texto
    fn from_raw(value: Option<&str>, locale: &Locale) -> Result<String, AppError> {
        let limit = value.map(|text| TransactionLimit::try_from(d(text))).transpose()?;
        Ok(format_limit(limit, locale))
    }

    fn d(text: &str) -> Decimal {
        text.parse().unwrap()
    }

    fn en() -> Locale {
        Locale::default()
    }

    #[test]
    fn limit_policy_table() {
        assert_eq!(from_raw(Some("-1"), &en()).unwrap(), "unlimited");
        assert_eq!(from_raw(Some("0"), &en()).unwrap(), "blocked");
        assert_eq!(from_raw(Some("500"), &en()).unwrap(), "R$ 500,00");
        assert_eq!(from_raw(None, &en()).unwrap(), "not available");
    }

    #[test]
    fn portuguese_labels() {
        let pt = Locale("pt".into());
        assert_eq!(format_limit(Some(TransactionLimit::Unlimited), &pt), "Ilimitado");
        assert_eq!(format_limit(Some(TransactionLimit::Blocked), &pt), "Bloqueado");
        assert_eq!(format_limit(None, &pt), "Não disponível");
        assert_eq!(format_permission(true, &pt), "Permitido");
    }

    #[test]
    fn other_negatives_are_rejected() {
        let err = from_raw(Some("-2"), &en()).unwrap_err();
        assert!(matches!(err, AppError::InvalidLimit(_)));
    }

    #[test]
    fn brl_grouping_and_rounding() {
        assert_eq!(format_brl(d("0.5")), "R$ 0,50");
        assert_eq!(format_brl(d("999")), "R$ 999,00");
        assert_eq!(format_brl(d("1000")), "R$ 1.000,00");
        assert_eq!(format_brl(d("1234567.891")), "R$ 1.234.567,89");
        assert_eq!(format_brl(d("10.005")), "R$ 10,01");
    }
}
