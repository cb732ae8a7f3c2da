//! Text rendering of class tables and numeric signals

use saliency_domain::ClassDescription;

/// One `name: description` line per class, in input order
pub fn render_class_table(classes: &[ClassDescription]) -> String {
    classes
        .iter()
        .map(|class| format!("{}: {}", class.name, class.description))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Round to `decimals` places and print in shortest form
///
/// Rounding follows the exact binary value, so `1.005` (stored slightly
/// below) becomes `1.0`. Whole numbers keep one decimal (`2.0`).
pub fn render_value(value: f64, decimals: u32) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let rounded: f64 = format!("{:.*}", decimals as usize, value)
        .parse()
        .unwrap_or(value);

    if rounded.fract() == 0.0 {
        format!("{:.1}", rounded)
    } else {
        rounded.to_string()
    }
}

/// Space-separated rounded samples of one signal
pub fn render_signal(samples: &[f64], decimals: u32) -> String {
    samples
        .iter()
        .map(|v| render_value(*v, decimals))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `signal <i>:` blocks (1-based) separated by blank lines
pub fn render_signals(rows: &[Vec<f64>], decimals: u32) -> String {
    rows.iter()
        .enumerate()
        .map(|(i, row)| format!("signal {}:\n{}", i + 1, render_signal(row, decimals)))
        .collect::<Vec<_>>()
        .join("\n\n")
}
