//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Format an amount in Peruvian soles.
///
/// Usage in templates: `{{ order.total_price|money }}`
#[askama::filter_fn]
pub fn money(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format!("S/ {value:.2}"))
}

/// Accent color for an order status badge.
///
/// Usage in templates: `style="color: {{ order.display_status|status_color }}"`
#[askama::filter_fn]
pub fn status_color(
    status: impl Display,
    _env: &dyn askama::Values,
) -> askama::Result<&'static str> {
    Ok(color_for(&status.to_string()))
}

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

fn color_for(status: &str) -> &'static str {
    match status.to_uppercase().as_str() {
        "PAGADO" => "#6c757d",
        "COCINA" => "#FFB500",
        "EMPAQUETAMIENTO" => "#111788",
        "DELIVERY" => "#f61422",
        "ENTREGADO" => "#28a745",
        _ => "#666",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_colors() {
        assert_eq!(color_for("cocina"), "#FFB500");
        assert_eq!(color_for("ENTREGADO"), "#28a745");
        assert_eq!(color_for("Unknown"), "#666");
    }
}
