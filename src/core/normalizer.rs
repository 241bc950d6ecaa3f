use crate::domain::model::{NormalizedSalary, RawListing, Source};

/// 只有下限時，上限以下限的 +20% 估算
const FROM_ONLY_FACTOR: f64 = 1.2;
/// 只有上限時，下限以上限的 -20% 估算
const TO_ONLY_FACTOR: f64 = 0.8;

/// 把一筆職缺換算成參考幣別的月薪估計值
///
/// 幣別不在來源白名單內、或上下限皆為空/零時回傳 `None`。
pub fn normalize(source: Source, listing: &RawListing) -> NormalizedSalary {
    let currency = listing.currency.as_deref()?;
    if !source.accepts_currency(currency) {
        return None;
    }

    predict_salary(listing.payment_from, listing.payment_to)
}

/// 零與缺值一律視為沒有公布
pub fn predict_salary(payment_from: Option<f64>, payment_to: Option<f64>) -> NormalizedSalary {
    let from = payment_from.filter(|value| *value != 0.0);
    let to = payment_to.filter(|value| *value != 0.0);

    match (from, to) {
        (Some(from), Some(to)) => Some((from + to) / 2.0),
        (Some(from), None) => Some(from * FROM_ONLY_FACTOR),
        (None, Some(to)) => Some(to * TO_ONLY_FACTOR),
        (None, None) => None,
    }
}
