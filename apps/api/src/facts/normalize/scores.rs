//! Score canonicalizer: every score becomes a percentage string.

/// `"0.925"` → `"92.5%"`, `"92.5"` → `"92.5%"`, `"92%"` → `"92%"`.
///
/// Values in `(0, 1]` are read as fractions, `(1, 1000]` as percentages
/// already. Anything else comes back trimmed and unchanged.
pub fn canonicalize_score(raw: &str) -> String {
    let s = raw.trim();
    if s.is_empty() {
        return String::new();
    }

    let cleaned: String = s
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    let percent = if cleaned.contains('%') {
        cleaned.replace('%', "").parse::<f64>().ok()
    } else {
        cleaned.parse::<f64>().ok().and_then(|n| match n {
            n if n > 0.0 && n <= 1.0 => Some(n * 100.0),
            n if n > 1.0 && n <= 1000.0 => Some(n),
            _ => None,
        })
    };

    percent
        .filter(|p| p.is_finite())
        .map(render_percent)
        .unwrap_or_else(|| s.to_string())
}

/// Zero decimals when integral, otherwise one.
fn render_percent(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}%")
    } else {
        format!("{rounded:.1}%")
    }
}
