const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// Format a byte count with base-1024 units.
///
/// The scaled value is rounded to two decimals and printed in its shortest
/// form (`1536 → "1.5 KB"`). Values beyond the TB range stay in TB.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut index = 0;
    let mut whole = bytes;
    while whole >= 1024 && index < UNITS.len() - 1 {
        whole /= 1024;
        index += 1;
    }

    let scaled = bytes as f64 / 1024f64.powi(index as i32);
    format!("{} {}", trim_decimals(&format!("{:.2}", scaled)), UNITS[index])
}

/// `"1.50"` → `"1.5"`, `"1.00"` → `"1"`.
pub(crate) fn trim_decimals(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
