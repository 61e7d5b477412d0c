// src/importer/cleaning.rs

use std::str::FromStr;

use rust_decimal::{prelude::FromPrimitive, Decimal};

use super::sheet::Cell;

// Marcadores que as planilhas usam para "sem valor"
const EMPTY_MARKERS: &[&str] = &["nan", "none", "null"];

fn is_empty_marker(text: &str) -> bool {
    text.is_empty() || EMPTY_MARKERS.iter().any(|marker| text.eq_ignore_ascii_case(marker))
}

/// Texto limpo ou `None` (ausente). Números viram texto sem o ".0" inteiro.
pub fn clean_text(cell: &Cell) -> Option<String> {
    let text = match cell {
        Cell::Empty => return None,
        Cell::Text(s) => s.trim().to_string(),
        Cell::Number(n) => format_number(*n)?,
        Cell::Bool(b) => b.to_string(),
    };

    if is_empty_marker(&text) { None } else { Some(text) }
}

/// Número limpo ou `None`. Nunca falha: lixo vira ausente, não zero.
pub fn clean_number(cell: &Cell) -> Option<Decimal> {
    match cell {
        Cell::Number(n) if n.is_finite() => Decimal::from_f64(*n).filter(|d| !collapsed_to_zero(*d, *n)),
        Cell::Text(s) => parse_decimal(s),
        _ => None,
    }
}

/// Aceita "12", " 3.5 ", "12%", "1e3". O '%' só é removido, sem dividir por 100.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    // Decimal aceita "1_000"; planilha não
    if is_empty_marker(trimmed) || trimmed.contains('_') {
        return None;
    }

    let value = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()?;

    match trimmed.parse::<f64>() {
        Ok(n) if collapsed_to_zero(value, n) => None,
        _ => Some(value),
    }
}

// Valor diferente de zero pequeno demais para Decimal: ausente, nunca 0
fn collapsed_to_zero(value: Decimal, original: f64) -> bool {
    value.is_zero() && original != 0.0
}

fn format_number(n: f64) -> Option<String> {
    if !n.is_finite() {
        return None;
    }
    // RUT digitado como número no Excel chega como 11111111.0
    if n.fract() == 0.0 && n.abs() < 1e15 {
        Some(format!("{}", n as i64))
    } else {
        Some(n.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    #[test]
    fn text_is_trimmed_and_missing_markers_are_absent() {
        assert_eq!(clean_text(&text("  Juan  ")), Some("Juan".into()));
        assert_eq!(clean_text(&text("   ")), None);
        assert_eq!(clean_text(&text("NaN")), None);
        assert_eq!(clean_text(&text("null")), None);
        assert_eq!(clean_text(&Cell::Empty), None);
    }

    #[test]
    fn numbers_are_coerced_to_text() {
        assert_eq!(clean_text(&Cell::Number(11111111.0)), Some("11111111".into()));
        assert_eq!(clean_text(&Cell::Number(2.5)), Some("2.5".into()));
        assert_eq!(clean_text(&Cell::Number(f64::NAN)), None);
        assert_eq!(clean_text(&Cell::Bool(true)), Some("true".into()));
    }

    #[test]
    fn percent_and_whitespace_are_stripped_before_parsing() {
        assert_eq!(clean_number(&text("12%")), Some(Decimal::from(12)));
        assert_eq!(clean_number(&text(" 12 % ")), Some(Decimal::from(12)));
        assert_eq!(clean_number(&text(" 3.5 ")), Decimal::from_str("3.5").ok());
        assert_eq!(clean_number(&text("1e3")), Some(Decimal::from(1000)));
    }

    #[test]
    fn unparsable_or_missing_numbers_are_absent_not_zero() {
        for raw in ["", "  ", "%", "abc", "12abc", "nan", "None"] {
            assert_eq!(clean_number(&text(raw)), None, "input {raw:?}");
        }
        assert_eq!(clean_number(&Cell::Empty), None);
        assert_eq!(clean_number(&Cell::Bool(true)), None);
        assert_eq!(clean_number(&Cell::Number(f64::INFINITY)), None);
        assert_eq!(clean_number(&Cell::Number(f64::NAN)), None);
    }

    #[test]
    fn values_below_decimal_precision_are_absent_not_zero() {
        assert_eq!(clean_number(&Cell::Number(1e-300)), None);
        assert_eq!(clean_number(&text("0.00000000000000000000000000000001")), None);
        assert_eq!(clean_number(&text("1e-40")), None);
        assert_eq!(clean_number(&text("0.000")), Some(Decimal::ZERO));
        assert_eq!(clean_number(&text("-0")), Some(Decimal::ZERO));
    }

    #[test]
    fn underscores_are_not_digit_separators() {
        assert_eq!(clean_number(&text("1_000")), None);
        assert_eq!(clean_number(&text("1_0%")), None);
    }

    #[test]
    fn numeric_cells_keep_their_value() {
        assert_eq!(clean_number(&Cell::Number(12.5)), Decimal::from_str("12.5").ok());
        assert_eq!(clean_number(&Cell::Number(0.0)), Some(Decimal::ZERO));
    }

    #[test]
    fn cleaning_is_idempotent() {
        for raw in ["12%", " 7 ", "0.25", "x", "", "1e2"] {
            let once = clean_number(&text(raw));
            let twice = once.and_then(|d| clean_number(&text(&d.to_string())));
            assert_eq!(once, twice, "input {raw:?}");

            let once = clean_text(&text(raw));
            let twice = once.as_deref().and_then(|s| clean_text(&text(s)));
            assert_eq!(once, twice, "input {raw:?}");
        }
    }
}
