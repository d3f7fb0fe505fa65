//! Horizontal text bar chart for the neighborhood distribution.

const BAR: char = '█';

/// Render `(label, count)` bars in the given order.
///
/// The longest bar spans `width` cells; any non-zero count gets at least one.
pub fn render_bar_chart(entries: &[(String, usize)], width: usize) -> String {
    let label_width = entries
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let max = entries.iter().map(|(_, count)| *count).max().unwrap_or(0);
    let mut out = String::new();
    for (label, count) in entries {
        let cells = if max == 0 {
            0
        } else {
            (count * width).div_ceil(max)
        };
        let padding = label_width - label.chars().count();
        out.push_str(label);
        out.push_str(&" ".repeat(padding));
        out.push_str(" │");
        out.extend(std::iter::repeat_n(BAR, cells));
        out.push_str(&format!(" {count}\n"));
    }
    out
}
