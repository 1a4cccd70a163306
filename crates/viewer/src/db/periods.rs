use super::PrecipitationRow;

/// Display order for the rainfall periods CWA reports. Labels outside this
/// list are shown after it, alphabetically.
pub const PERIOD_ORDER: [&str; 9] = [
    "Now",
    "Past10Min",
    "Past1hr",
    "Past3hr",
    "Past6hr",
    "Past12hr",
    "Past24hr",
    "Past2days",
    "Past3days",
];

fn period_rank(period: &str) -> usize {
    PERIOD_ORDER
        .iter()
        .position(|known| *known == period)
        .unwrap_or(PERIOD_ORDER.len())
}

pub fn order_periods(mut periods: Vec<String>) -> Vec<String> {
    periods.sort_by(|a, b| {
        period_rank(a)
            .cmp(&period_rank(b))
            .then_with(|| a.cmp(b))
    });
    periods.dedup();
    periods
}

/// One reading per period for a single location and observation time: every
/// known period in display order, then any other labels present. A period
/// without a reading maps to `None`. When a period was stored more than
/// once, the latest row wins.
pub fn period_breakdown(rows: &[PrecipitationRow]) -> Vec<(String, Option<f64>)> {
    let mut labels: Vec<String> = PERIOD_ORDER.iter().map(|p| p.to_string()).collect();
    labels.extend(rows.iter().filter_map(|row| row.period.clone()));

    order_periods(labels)
        .into_iter()
        .map(|label| {
            let value = rows
                .iter()
                .rev()
                .find(|row| row.period.as_deref() == Some(label.as_str()))
                .and_then(|row| row.precipitation);
            (label, value)
        })
        .collect()
}
