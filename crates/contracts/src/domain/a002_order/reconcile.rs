//! Số học tiền của đơn hàng: thành tiền từng dòng và đối soát thanh toán.
//!
//! Các hàm ở đây thuần túy, không đụng DB hay DOM. Frontend gọi chúng
//! khi người dùng sửa form, backend gọi lại đúng các hàm này khi lưu,
//! nên hai phía không bao giờ lệch nhau về cách tính.

/// Ngưỡng coi một số tiền là 0 (nửa đơn vị hiển thị nhỏ nhất)
const ZERO_EPS: f64 = 0.005;

/// Làm tròn về 2 chữ số thập phân
pub fn round_money(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Số tiền coi như trống / bằng 0
pub fn is_zero_amount(value: f64) -> bool {
    value.abs() < ZERO_EPS
}

/// Thành tiền một dòng món: đơn giá × số lượng.
///
/// Giá âm hoặc số lượng âm bị chặn về 0, khớp validator phía lưu trữ.
pub fn line_total(unit_price: f64, quantity: i32) -> f64 {
    round_money(unit_price.max(0.0) * quantity.max(0) as f64)
}

/// Còn phải trả: tổng món trừ tổng đã trả, không bao giờ âm.
pub fn remaining_to_pay(items_total: f64, payments_total: f64) -> f64 {
    round_money((items_total - payments_total).max(0.0))
}

/// Dòng thanh toán trống/bằng 0 đầu tiên, nếu có
pub fn auto_fill_target(amounts: &[f64]) -> Option<usize> {
    amounts.iter().position(|a| is_zero_amount(*a))
}

/// Điền phần còn thiếu vào dòng trống đầu tiên.
///
/// Tổng đã trả tính trên mọi dòng (dòng trống góp 0), nên sau khi điền
/// tổng thanh toán khớp tổng món, trừ khi khách đã trả dư thì dòng
/// trống nhận 0. Dòng khác 0 không bị đụng tới. Trả về chỉ số dòng đã
/// điền, `None` nếu mọi dòng đều đã có số tiền.
pub fn fill_remaining(items_total: f64, amounts: &mut [f64]) -> Option<usize> {
    let target = auto_fill_target(amounts)?;
    let paid: f64 = amounts.iter().sum();
    amounts[target] = remaining_to_pay(items_total, paid);
    Some(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        assert_eq!(line_total(10.0, 3), 30.0);
        assert_eq!(line_total(45000.0, 2), 90000.0);
        assert_eq!(line_total(10.0, 0), 0.0);
        assert_eq!(line_total(10.0, -2), 0.0);
        assert_eq!(line_total(-10.0, 3), 0.0);
        // 10.1 * 3 = 30.299999... phải về đúng 30.3
        assert_eq!(line_total(10.1, 3), 30.3);
    }

    #[test]
    fn test_remaining_to_pay() {
        assert_eq!(remaining_to_pay(50.0, 10.0), 40.0);
        assert_eq!(remaining_to_pay(50.0, 0.0), 50.0);
        assert_eq!(remaining_to_pay(50.0, 50.0), 0.0);
        // trả dư thì còn lại là 0, không âm
        assert_eq!(remaining_to_pay(50.0, 70.0), 0.0);
    }

    #[test]
    fn test_auto_fill_target() {
        assert_eq!(auto_fill_target(&[]), None);
        assert_eq!(auto_fill_target(&[0.0]), Some(0));
        assert_eq!(auto_fill_target(&[10.0, 0.0, 0.0]), Some(1));
        assert_eq!(auto_fill_target(&[10.0, 20.0]), None);
        // sai số float quanh 0 vẫn coi là trống
        assert_eq!(auto_fill_target(&[0.0001]), Some(0));
    }

    #[test]
    fn test_fill_remaining() {
        // hai món 30 + 20, đã trả 10, dòng trống nhận 40
        let mut amounts = vec![10.0, 0.0];
        assert_eq!(fill_remaining(50.0, &mut amounts), Some(1));
        assert_eq!(amounts, vec![10.0, 40.0]);
        assert_eq!(amounts.iter().sum::<f64>(), 50.0);
    }

    #[test]
    fn test_fill_remaining_never_overwrites() {
        let mut amounts = vec![10.0, 20.0];
        assert_eq!(fill_remaining(500.0, &mut amounts), None);
        assert_eq!(amounts, vec![10.0, 20.0]);
    }

    #[test]
    fn test_fill_remaining_overpaid() {
        let mut amounts = vec![70.0, 0.0];
        assert_eq!(fill_remaining(50.0, &mut amounts), Some(1));
        assert_eq!(amounts[1], 0.0);
    }

    #[test]
    fn test_fill_remaining_twice_is_stable() {
        let mut amounts = vec![0.0];
        fill_remaining(50.0, &mut amounts);
        assert_eq!(amounts, vec![50.0]);
        // gọi lại không còn dòng trống, trạng thái giữ nguyên
        assert_eq!(fill_remaining(50.0, &mut amounts), None);
        assert_eq!(amounts, vec![50.0]);
    }

    #[test]
    fn test_round_money() {
        assert_eq!(round_money(30.299999999999997), 30.3);
        assert_eq!(round_money(0.005), 0.01);
        assert_eq!(round_money(-1.005), -1.0);
    }
}
