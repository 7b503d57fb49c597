use crate::frequency::FrequencyTable;

/// Bars carry weights as basis points, since bar charts only plot integers
const BAR_SCALE: f64 = 10_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarOrder {
    Alphabetical,
    ByFrequency,
}

/// Upper-cased letter labels with their scaled weights, in the requested order
pub fn letter_bars(table: &FrequencyTable, order: BarOrder) -> Vec<(String, u64)> {
    let entries = match order {
        BarOrder::Alphabetical => table.iter().collect(),
        BarOrder::ByFrequency => table.by_frequency(),
    };
    entries
        .into_iter()
        .map(|(letter, weight)| (letter.to_uppercase().collect(), scale_weight(weight)))
        .collect()
}

pub fn scale_weight(weight: f64) -> u64 {
    (weight * BAR_SCALE).round().max(0.0) as u64
}

/// Largest bar value, never zero so an all-zero chart still has a scale
pub fn chart_ceiling(bars: &[(String, u64)]) -> u64 {
    bars.iter().map(|(_, v)| *v).max().unwrap_or(0).max(1)
}

/// Percentage label for a scaled bar value
pub fn format_percent(scaled: u64) -> String {
    let percent = scaled as f64 / BAR_SCALE * 100.0;
    if (percent - percent.round()).abs() < f64::EPSILON {
        format!("{}", percent.round())
    } else {
        format!("{percent:.1}")
    }
}
