use super::definition::Item;

/// Weight contribution of a single slot: unit weight times count, plus the
/// per-unit `weight` metadata adjustment (attachments, ammo) when present.
pub fn item_weight(item: &Item) -> f64 {
    if item.is_empty() {
        return 0.0;
    }

    let extra = item
        .metadata_value("weight")
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (item.weight + extra) * item.count as f64
}

/// Total container weight, truncated to three decimal places.
pub fn total_weight(items: &[Item]) -> f64 {
    let sum: f64 = items.iter().map(item_weight).sum();
    (sum * 1000.0).floor() / 1000.0
}

/// Fill percentage against a capacity; zero when there is no usable capacity.
pub fn fill_percent(weight: f64, max_weight: Option<f64>) -> f64 {
    match max_weight {
        Some(max) if max > 0.0 => weight / max * 100.0,
        _ => 0.0,
    }
}
