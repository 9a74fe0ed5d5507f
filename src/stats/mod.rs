// tabeval 統計モジュール
//
// 前処理で使用する分位数などの記述統計機能を提供します。

pub mod descriptive;

use crate::error::Result;

/// 分位数を計算
///
/// # 説明
/// 数値データのq分位点（0 <= q <= 1）を線形補間で計算します。
///
/// # 例
/// ```rust
/// use tabeval::stats;
///
/// let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
/// let median = stats::quantile(&data, 0.5).unwrap();
/// assert_eq!(median, 3.0);
/// ```
pub fn quantile<T: AsRef<[f64]>>(data: T, q: f64) -> Result<f64> {
    descriptive::quantile_impl(data.as_ref(), q)
}
