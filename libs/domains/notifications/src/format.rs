//! Number formatting used by the usage and billing templates.

/// Format an integer with `,` thousands separators: `1234567` → `1,234,567`.
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

/// Signed variant of [`thousands`].
pub fn thousands_signed(n: i64) -> String {
    if n < 0 {
        format!("-{}", thousands(n.unsigned_abs()))
    } else {
        thousands(n as u64)
    }
}

/// Compact volume label used for plan names: `100_000` → `100k`, `2_500_000` → `2.5M`.
///
/// At most one decimal is shown and it is truncated, not rounded, so a label
/// never overstates a plan's limit.
pub fn compact_volume(n: u64) -> String {
    const UNITS: [(u64, &str); 3] = [(1_000_000_000, "B"), (1_000_000, "M"), (1_000, "k")];

    for (scale, suffix) in UNITS {
        if n >= scale {
            let whole = n / scale;
            let tenths = (n % scale) * 10 / scale;
            return if tenths == 0 {
                format!("{whole}{suffix}")
            } else {
                format!("{whole}.{tenths}{suffix}")
            };
        }
    }

    n.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1_000), "1,000");
        assert_eq!(thousands(12_345), "12,345");
        assert_eq!(thousands(1_234_567), "1,234,567");
        assert_eq!(thousands(u64::MAX), "18,446,744,073,709,551,615");
    }

    #[test]
    fn test_thousands_signed() {
        assert_eq!(thousands_signed(-1_500), "-1,500");
        assert_eq!(thousands_signed(42), "42");
        assert_eq!(thousands_signed(i64::MIN), "-9,223,372,036,854,775,808");
    }

    #[test]
    fn test_compact_volume() {
        assert_eq!(compact_volume(500), "500");
        assert_eq!(compact_volume(10_000), "10k");
        assert_eq!(compact_volume(100_000), "100k");
        assert_eq!(compact_volume(1_000_000), "1M");
        assert_eq!(compact_volume(2_500_000), "2.5M");
        assert_eq!(compact_volume(999_999), "999.9k");
        assert_eq!(compact_volume(10_000_000_000), "10B");
    }
}
