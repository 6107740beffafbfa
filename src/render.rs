//! Text rendering of the display rows.

use crate::record::NormalizedMetadata;

/// Render the record as aligned `label  value [badge]` lines.
pub fn render_text(metadata: &NormalizedMetadata) -> String {
    let rows = metadata.rows();
    let width = rows.iter().map(|r| r.label.len()).max().unwrap_or(0);

    let mut out = String::new();
    for row in rows {
        out.push_str(&format!("{:<width$}  {}", row.label, row.value, width = width));
        if let Some(badge) = row.badge {
            out.push_str(&format!(" [{}]", badge));
        }
        out.push('\n');
    }
    out
}
