/// Format số nguyên với dấu chấm phân tách hàng nghìn
///
/// # Ví dụ
/// ```
/// use backend::shared::format::format_number;
/// assert_eq!(format_number(1234567), "1.234.567");
/// assert_eq!(format_number(42), "42");
/// ```
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Format tiền kiểu Việt Nam: chấm tách nghìn, phẩy thập phân
///
/// 1234567.5 -> "1.234.567,50"
pub fn format_money(value: f64) -> String {
    let negative = value < 0.0;
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::new();
    for (i, ch) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    let int_grouped: String = grouped.chars().rev().collect();

    let sign = if negative { "-" } else { "" };
    format!("{}{},{}", sign, int_grouped, frac_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(42), "42");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1.000");
        assert_eq!(format_number(1234567), "1.234.567");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "0,00");
        assert_eq!(format_money(30.0), "30,00");
        assert_eq!(format_money(1234.56), "1.234,56");
        assert_eq!(format_money(45000.0), "45.000,00");
        assert_eq!(format_money(-1234.5), "-1.234,50");
    }
}
