// 記述統計モジュール

use crate::error::{Error, Result};

/// 分位数を計算する内部実装
pub(crate) fn quantile_impl(data: &[f64], q: f64) -> Result<f64> {
    if data.is_empty() {
        return Err(Error::EmptyData(
            "分位数の計算には少なくとも1つのデータが必要です".into(),
        ));
    }
    if !(0.0..=1.0).contains(&q) {
        return Err(Error::InvalidValue(format!(
            "分位点は0から1の範囲でなければなりません: {}",
            q
        )));
    }

    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    Ok(percentile(&sorted, q))
}

/// ソート済みデータのパーセンタイルを線形補間で計算
fn percentile(sorted_data: &[f64], p: f64) -> f64 {
    let n = sorted_data.len();
    let idx = p * (n - 1) as f64;
    let idx_floor = idx.floor() as usize;
    let idx_ceil = idx.ceil() as usize;

    if idx_floor == idx_ceil {
        return sorted_data[idx_floor];
    }

    let weight_ceil = idx - idx_floor as f64;
    let weight_floor = 1.0 - weight_ceil;

    sorted_data[idx_floor] * weight_floor + sorted_data[idx_ceil] * weight_ceil
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantile_basic() {
        let data = vec![3.0, 1.0, 2.0, 5.0, 4.0];
        assert_eq!(quantile_impl(&data, 0.0).unwrap(), 1.0);
        assert_eq!(quantile_impl(&data, 0.5).unwrap(), 3.0);
        assert_eq!(quantile_impl(&data, 1.0).unwrap(), 5.0);
    }

    #[test]
    fn test_quantile_interpolation() {
        // pandasのlinear補間と同じ結果になること
        let data: Vec<f64> = (1..=100).map(|i| i as f64).collect();
        let q05 = quantile_impl(&data, 0.05).unwrap();
        assert!((q05 - 5.95).abs() < 1e-12);
        let q95 = quantile_impl(&data, 0.95).unwrap();
        assert!((q95 - 95.05).abs() < 1e-12);
    }

    #[test]
    fn test_quantile_empty() {
        let data: Vec<f64> = vec![];
        assert!(quantile_impl(&data, 0.5).is_err());
    }

    #[test]
    fn test_quantile_out_of_range() {
        let data = vec![1.0, 2.0];
        assert!(quantile_impl(&data, -0.1).is_err());
        assert!(quantile_impl(&data, 1.1).is_err());
    }
}
