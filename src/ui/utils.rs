/// Formats a price with "Trader Precision".
/// - Large (>1000): 2 decimals ($4203.50)
/// - Medium (1-1000): 4 decimals ($12.4829)
/// - Small (<1): 5-8 decimals
pub fn format_price(price: f64) -> String {
    if price == 0.0 {
        return "$0.00".to_string();
    }

    let abs_price = price.abs();
    if abs_price >= 1000.0 {
        format!("${:.2}", price)
    } else if abs_price >= 1.0 {
        format!("${:.4}", price)
    } else if abs_price >= 0.01 {
        format!("${:.5}", price)
    } else {
        format!("${:.8}", price)
    }
}

/// A full-width rule made of `ch`
pub fn rule(ch: char, width: usize) -> String {
    std::iter::repeat_n(ch, width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precision_follows_magnitude() {
        assert_eq!(format_price(4203.5), "$4203.50");
        assert_eq!(format_price(104.25), "$104.2500");
        assert_eq!(format_price(0.5), "$0.50000");
        assert_eq!(format_price(0.0), "$0.00");
    }

    #[test]
    fn rule_has_requested_width() {
        assert_eq!(rule('=', 3), "===");
        assert!(rule('-', 0).is_empty());
    }
}
