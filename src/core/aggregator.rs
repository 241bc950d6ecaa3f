use crate::domain::model::{AverageSalary, LanguageStats, NormalizedSalary};

/// 把一個 (語言, 來源) 的估計薪資彙總成統計
///
/// 平均值只計算可用的薪資，結果向零截斷而非四捨五入。
pub fn aggregate(found_count: usize, salaries: &[NormalizedSalary]) -> LanguageStats {
    let usable: Vec<f64> = salaries.iter().flatten().copied().collect();

    let average_salary = if usable.is_empty() {
        AverageSalary::NotFound
    } else {
        let mean = usable.iter().sum::<f64>() / usable.len() as f64;
        AverageSalary::Amount(mean.trunc() as i64)
    };

    LanguageStats {
        vacancies_found: found_count,
        vacancies_processed: usable.len(),
        average_salary,
    }
}
