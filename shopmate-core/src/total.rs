use crate::types::Card;

/// Sum of prices of cards not yet completed, rounded to two decimals.
///
/// Non-finite or negative prices count as zero.
pub fn total_price<'a>(cards: impl IntoIterator<Item = &'a Card>) -> f64 {
    let sum: f64 = cards
        .into_iter()
        .filter(|card| !card.is_completed)
        .map(|card| {
            if card.price.is_finite() && card.price > 0.0 {
                card.price
            } else {
                0.0
            }
        })
        .sum();
    round_cents(sum)
}

pub fn round_cents(value: f64) -> f64 {
    // Adding 0.0 turns a -0.0 into 0.0.
    (value * 100.0).round() / 100.0 + 0.0
}

/// Total as shown in the summary badge, e.g. `40.00 บาท`.
pub fn format_total(total: f64, currency: &str) -> String {
    if currency.is_empty() {
        format!("{:.2}", total)
    } else {
        format!("{:.2} {}", total, currency)
    }
}
