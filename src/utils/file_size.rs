pub struct FileSizeUtils;

impl FileSizeUtils {
    /// Size in kibibytes with two decimals, e.g. `1.50 KB`.
    pub fn format_kb(size: u64) -> String {
        format!("{:.2} KB", size as f64 / 1024.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_kb() {
        assert_eq!(FileSizeUtils::format_kb(0), "0.00 KB");
        assert_eq!(FileSizeUtils::format_kb(1536), "1.50 KB");
        assert_eq!(FileSizeUtils::format_kb(5 * 1024 * 1024), "5120.00 KB");
    }
}
