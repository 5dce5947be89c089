const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];
const K: f64 = 1024.0;
/// Upper bound on requested decimals
pub const MAX_DECIMALS: usize = 10;

/// Format a byte count with base-1024 units, e.g. `1536 → "1.5 KB"`.
///
/// Rounds to `decimals` places and drops trailing zeros, so exact multiples
/// print without a fraction (`1024 → "1 KB"`). Sizes beyond terabytes stay
/// in TB. `decimals` is clamped to [`MAX_DECIMALS`].
pub fn format_bytes(bytes: u64, decimals: usize) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let decimals = decimals.min(MAX_DECIMALS);
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= K && unit < UNITS.len() - 1 {
        value /= K;
        unit += 1;
    }

    format!(
        "{} {}",
        trim_fraction(format!("{:.*}", decimals, value)),
        UNITS[unit]
    )
}

/// Compact count for badges: `1234 → "1.2K"`, smaller values verbatim.
pub fn format_stars(count: u64) -> String {
    if count >= 1000 {
        format!("{:.1}K", count as f64 / 1000.0)
    } else {
        count.to_string()
    }
}

fn trim_fraction(mut number: String) -> String {
    if number.contains('.') {
        let trimmed = number.trim_end_matches('0').trim_end_matches('.').len();
        number.truncate(trimmed);
    }
    number
}
