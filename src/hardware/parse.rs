//! Parsers for device tool output

/// Power readings start at this comma-separated field of an rtl_power row
/// (date, time, low Hz, high Hz, step Hz, samples, dB, dB, ...)
const FIRST_POWER_FIELD: usize = 6;

/// Find "Found <N> device(s)" in enumeration output
pub fn parse_device_count(text: &str) -> Option<u32> {
    text.lines().find_map(|line| {
        let rest = &line[line.find("Found ")? + "Found ".len()..];
        let mut words = rest.split_whitespace();
        let count = words.next()?.parse::<u32>().ok()?;
        words
            .next()
            .filter(|w| w.starts_with("device"))
            .map(|_| count)
    })
}

/// Power readings in dBm from the last non-empty row of a sweep report
///
/// Unparseable cells (e.g. `nan`) are skipped. Returns `None` when the row
/// yields no readings.
pub fn parse_power_sweep(text: &str) -> Option<Vec<f64>> {
    let last = text.lines().rev().find(|l| !l.trim().is_empty())?;

    let readings: Vec<f64> = last
        .split(',')
        .skip(FIRST_POWER_FIELD)
        .filter_map(|field| field.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .collect();

    if readings.is_empty() {
        None
    } else {
        Some(readings)
    }
}
