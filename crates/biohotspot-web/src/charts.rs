//! HTML fragments shared by the dashboard panels: tables, CSS bar charts,
//! notice boxes. All caller-supplied text is escaped here.

use html_escape::{encode_double_quoted_attribute, encode_text};

pub fn info_box(message: &str) -> String {
    format!(r#"<div class="alert alert-info">{}</div>"#, encode_text(message))
}

pub fn warning_box(message: &str) -> String {
    format!(r#"<div class="alert alert-warning">{}</div>"#, encode_text(message))
}

/// Plain table; `rows` are already-formatted cell strings.
pub fn table<H: AsRef<str>>(headers: &[H], rows: &[Vec<String>]) -> String {
    let head: String = headers
        .iter()
        .map(|h| format!("<th>{}</th>", encode_text(h.as_ref())))
        .collect();
    let body: String = if rows.is_empty() {
        format!(
            r#"<tr><td colspan="{}" class="text-center text-muted">No rows.</td></tr>"#,
            headers.len().max(1)
        )
    } else {
        rows.iter()
            .map(|row| {
                let cells: String = row.iter().map(|c| format!("<td>{}</td>", encode_text(c))).collect();
                format!("<tr>{cells}</tr>")
            })
            .collect()
    };

    format!(
        r#"<div class="table-container"><table class="table"><thead><tr>{head}</tr></thead><tbody>{body}</tbody></table></div>"#
    )
}

/// Vertical bar chart. Bar height is `value / max(1.0, largest value)`, so
/// probabilities are drawn on a fixed 0–1 axis.
pub fn column_chart(title: &str, x_label: &str, y_label: &str, bars: &[(&str, f64)]) -> String {
    let scale = bars.iter().map(|(_, v)| *v).fold(1.0_f64, f64::max);
    let columns: String = bars
        .iter()
        .map(|(label, value)| {
            let pct = (value / scale * 100.0).clamp(0.0, 100.0);
            format!(
                r#"<div class="col" title="{title}"><span class="col-value">{value:.3}</span><div class="col-bar" style="height:{pct:.1}%"></div><span class="col-label">{label}</span></div>"#,
                title = encode_double_quoted_attribute(&format!("{label}: {value:.3}")),
                label = encode_text(label),
            )
        })
        .collect();

    format!(
        r#"<figure class="chart">
    <figcaption>{}</figcaption>
    <div class="chart-body"><span class="y-label">{}</span><div class="columns">{}</div></div>
    <div class="x-label">{}</div>
</figure>"#,
        encode_text(title),
        encode_text(y_label),
        columns,
        encode_text(x_label)
    )
}

/// Horizontal bar chart scaled to the largest value.
pub fn bar_chart(x_label: &str, bars: &[(&str, f64)]) -> String {
    let scale = bars.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
    let rows: String = bars
        .iter()
        .map(|(label, value)| {
            let pct = if scale > 0.0 { (value / scale * 100.0).clamp(0.0, 100.0) } else { 0.0 };
            format!(
                r#"<div class="hbar-row"><span class="hbar-label">{}</span><div class="hbar-track"><div class="hbar" style="width:{pct:.1}%"></div></div><span class="hbar-value">{value:.3}</span></div>"#,
                encode_text(label)
            )
        })
        .collect();

    format!(
        r#"<figure class="chart">{rows}<div class="x-label">{}</div></figure>"#,
        encode_text(x_label)
    )
}
