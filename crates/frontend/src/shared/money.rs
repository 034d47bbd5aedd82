//! Tiền trên form đơn hàng: hiển thị kiểu vi-VN và phân tích chuỗi nhập tay.
//!
//! Giá trị gửi lên server luôn là dạng `to_fixed` ("40.00"); phần hiển thị
//! dùng `format_money` ("40,00"). `parse_money` chấp nhận cả hai quy ước
//! nhóm số vì dữ liệu dán vào form không thống nhất.

/// Hiển thị vi-VN: chấm nhóm nghìn, phẩy thập phân, luôn hai chữ số lẻ
pub fn format_money(value: f64) -> String {
    let negative = value < 0.0;
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some(parts) => parts,
        None => (fixed.as_str(), "00"),
    };

    let digits = int_part.as_bytes();
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, d) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*d as char);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}{},{}", sign, grouped, frac_part)
}

/// Dạng giá trị form gửi lên server: hai chữ số lẻ, dấu chấm ("40.00")
pub fn to_fixed(value: f64) -> String {
    format!("{:.2}", value)
}

/// Phân tích chuỗi tiền người dùng nhập.
///
/// "1.234,56" đọc là 1234,56 (chấm nhóm nghìn chỉ được hiểu vậy khi có
/// phẩy đi kèm), "1,234.56" đọc là 1234,56 (phẩy bị bỏ). Chuỗi rỗng hoặc
/// không phân tích được trả về 0.
pub fn parse_money(raw: &str) -> f64 {
    let v = raw.trim();
    if v.is_empty() {
        return 0.0;
    }

    let normalized = if has_dot_grouping(v) && v.contains(',') {
        v.replace('.', "").replace(',', ".")
    } else {
        v.replace(',', "")
    };

    parse_float_prefix(&normalized).unwrap_or(0.0)
}

/// Số lượng của một dòng món; âm hoặc không phân tích được coi là 0
pub fn parse_quantity(raw: &str) -> i32 {
    match parse_float_prefix(raw.trim()) {
        Some(q) if q > 0.0 => q as i32,
        _ => 0,
    }
}

// Một chấm đứng giữa chữ số và đúng ba chữ số liền sau là dấu nhóm nghìn
fn has_dot_grouping(v: &str) -> bool {
    let b = v.as_bytes();
    for i in 1..b.len() {
        if b[i] == b'.' && b[i - 1].is_ascii_digit() {
            let run = b[i + 1..].iter().take_while(|c| c.is_ascii_digit()).count();
            if run == 3 {
                return true;
            }
        }
    }
    false
}

// Đọc phần đầu là số của chuỗi, bỏ phần đuôi ("50đ" -> 50)
fn parse_float_prefix(v: &str) -> Option<f64> {
    let s = v.trim_start();
    let b = s.as_bytes();
    let mut end = 0;

    if end < b.len() && (b[end] == b'+' || b[end] == b'-') {
        end += 1;
    }

    let mut saw_digit = false;
    while end < b.len() && b[end].is_ascii_digit() {
        saw_digit = true;
        end += 1;
    }
    if end < b.len() && b[end] == b'.' {
        end += 1;
        while end < b.len() && b[end].is_ascii_digit() {
            saw_digit = true;
            end += 1;
        }
    }

    if !saw_digit {
        return None;
    }
    s[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money_vi_vn() {
        assert_eq!(format_money(0.0), "0,00");
        assert_eq!(format_money(30.0), "30,00");
        assert_eq!(format_money(1234.56), "1.234,56");
        assert_eq!(format_money(1234567.8), "1.234.567,80");
        assert_eq!(format_money(45000.0), "45.000,00");
        assert_eq!(format_money(-1234.5), "-1.234,50");
    }

    #[test]
    fn test_to_fixed_is_server_form() {
        assert_eq!(to_fixed(40.0), "40.00");
        assert_eq!(to_fixed(30.3), "30.30");
        assert_eq!(to_fixed(0.0), "0.00");
    }

    #[test]
    fn test_parse_money_vi_vn_grouping() {
        assert_eq!(parse_money("1.234,56"), 1234.56);
        assert_eq!(parse_money("12.345.678,99"), 12345678.99);
    }

    #[test]
    fn test_parse_money_en_grouping() {
        assert_eq!(parse_money("1,234.56"), 1234.56);
        assert_eq!(parse_money("40.00"), 40.0);
    }

    #[test]
    fn test_parse_money_empty_and_garbage() {
        assert_eq!(parse_money(""), 0.0);
        assert_eq!(parse_money("0"), 0.0);
        assert_eq!(parse_money("   "), 0.0);
        assert_eq!(parse_money("abc"), 0.0);
    }

    #[test]
    fn test_parse_money_numeric_prefix() {
        assert_eq!(parse_money("1.234,56 ₫"), 1234.56);
        assert_eq!(parse_money("50đ"), 50.0);
    }

    #[test]
    fn test_parse_money_dot_without_comma_is_decimal() {
        assert_eq!(parse_money("1.234"), 1.234);
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("3"), 3);
        assert_eq!(parse_quantity(""), 0);
        assert_eq!(parse_quantity("-2"), 0);
        assert_eq!(parse_quantity("2.7"), 2);
    }

    #[test]
    fn test_row_total_display() {
        // đơn giá 10.00, số lượng 3: ô thành tiền hiển thị "30,00"
        let total = 10.0 * 3.0;
        assert_eq!(format_money(total), "30,00");
    }
}
