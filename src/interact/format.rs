use crate::types::Feature;

/// Format an estimate for display: thousands separators, at most three
/// fraction digits. Missing values read "NA".
pub fn format_estimate(estimate: Option<f64>) -> String {
    let v = match estimate {
        Some(v) if !v.is_nan() => v,
        _ => return "NA".to_string(),
    };
    if v.is_infinite() {
        return if v > 0.0 { "∞".to_string() } else { "-∞".to_string() };
    }

    let fixed = format!("{:.3}", v.abs());
    let (int, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    if v < 0.0 && (int != "0" || !frac.is_empty()) { out.push('-') }
    out.push_str(&group_thousands(int));
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 { out.push(',') }
        out.push(ch);
    }
    out
}

/// The two label lines shown for a feature: "GEOID: ..." and "Estimate: ...".
pub(crate) fn feature_lines(feature: &Feature, prefix: &str) -> [String; 2] {
    [
        format!("GEOID: {}", feature.geoid),
        format!("Estimate: {prefix}{}", format_estimate(feature.value())),
    ]
}

/// Tooltip markup for a feature, lines joined by `<br>`.
pub(crate) fn tooltip_html(feature: &Feature, prefix: &str) -> String {
    let [id, estimate] = feature_lines(feature, prefix);
    format!("{}<br>{}", escape_markup(&id), escape_markup(&estimate))
}

/// Escape text for HTML/XML content and attribute values.
pub(crate) fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
