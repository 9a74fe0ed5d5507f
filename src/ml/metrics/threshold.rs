//! 閾値スイープによる評価指標
//!
//! 連続値の回帰問題を「下位p%を正例とみなす」二値分類問題に変換して
//! 評価します。パーセンタイル閾値を1%から99%まで走査してROC曲線を
//! 構成し、台形則でAUCを計算します。

use std::cmp::Ordering;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// 2値分類の混同行列カウント
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionCounts {
    /// 真陰性
    pub tn: usize,
    /// 偽陽性
    pub fp: usize,
    /// 偽陰性
    pub fn_: usize,
    /// 真陽性
    pub tp: usize,
}

impl ConfusionCounts {
    /// カウントの合計（観測数と一致する）
    pub fn total(&self) -> usize {
        self.tn + self.fp + self.fn_ + self.tp
    }
}

/// 閾値適用1回分の評価指標
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdMetrics {
    /// 精度（Accuracy）
    pub accuracy: f64,
    /// 適合率（Precision）
    pub precision: f64,
    /// 再現率（Recall）
    pub recall: f64,
    /// 真陽性率
    pub tpr: f64,
    /// 偽陽性率
    pub fpr: f64,
}

fn validate_inputs(actual: &[f64], predicted: &[f64], p: f64) -> Result<()> {
    if p <= 0.0 || p >= 100.0 {
        return Err(Error::InvalidValue(format!(
            "閾値パーセンテージは0から100の範囲（両端を除く）でなければなりません: {}",
            p
        )));
    }
    if actual.len() != predicted.len() {
        return Err(Error::DimensionMismatch(format!(
            "真の値と予測値の長さが一致しません: {} vs {}",
            actual.len(),
            predicted.len()
        )));
    }
    if actual.is_empty() {
        return Err(Error::EmptyData(
            "空のデータで計算することはできません".to_string(),
        ));
    }
    Ok(())
}

/// 値の下位num_ones件を正例とするラベルベクトルを作成
///
/// 順位付けは安定ソートで行うため、同値の場合は元の並び順が
/// 閾値境界の割り当てを決めます。
fn bottom_rank_labels(values: &[f64], num_ones: usize) -> Vec<bool> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&i, &j| values[i].partial_cmp(&values[j]).unwrap_or(Ordering::Equal));

    let mut labels = vec![false; values.len()];
    for &idx in order.iter().take(num_ones) {
        labels[idx] = true;
    }
    labels
}

/// 閾値pでの混同行列カウントを計算
///
/// 真の値・予測値それぞれについて下位p%を正例としてラベル付けし、
/// 観測ごとのラベル一致から2×2の混同行列を作ります。
///
/// # Arguments
/// * `actual` - 真の値
/// * `predicted` - 予測値
/// * `p` - 閾値パーセンテージ（0と100は除く）
///
/// # Returns
/// * `Result<ConfusionCounts>` - 混同行列カウント
pub fn threshold_confusion(actual: &[f64], predicted: &[f64], p: f64) -> Result<ConfusionCounts> {
    validate_inputs(actual, predicted, p)?;

    let n = actual.len();
    let num_ones = ((p / 100.0) * n as f64) as usize;

    let actual_labels = bottom_rank_labels(actual, num_ones);
    let predicted_labels = bottom_rank_labels(predicted, num_ones);

    let mut counts = ConfusionCounts {
        tn: 0,
        fp: 0,
        fn_: 0,
        tp: 0,
    };
    for (&t, &pr) in actual_labels.iter().zip(predicted_labels.iter()) {
        match (t, pr) {
            (false, false) => counts.tn += 1,
            (false, true) => counts.fp += 1,
            (true, false) => counts.fn_ += 1,
            (true, true) => counts.tp += 1,
        }
    }
    Ok(counts)
}

/// 閾値pでの分類指標を計算
///
/// 回帰の真の値・予測値を下位p%で二値化し、精度・適合率・再現率・
/// 真陽性率・偽陽性率を返します。
///
/// 分母がゼロになる場合（正例が存在しない等）の除算はガードしません。
/// その場合はNaNが返ります。
///
/// # Arguments
/// * `actual` - 真の値
/// * `predicted` - 予測値
/// * `p` - 閾値パーセンテージ（0と100は除く）
///
/// # Returns
/// * `Result<ThresholdMetrics>` - 評価指標
pub fn threshold_metrics(actual: &[f64], predicted: &[f64], p: f64) -> Result<ThresholdMetrics> {
    let c = threshold_confusion(actual, predicted, p)?;
    let (tn, fp, fn_, tp) = (c.tn as f64, c.fp as f64, c.fn_ as f64, c.tp as f64);

    let accuracy = (tp + tn) / (tp + tn + fp + fn_);
    let precision = tp / (tp + fp);
    let recall = tp / (tp + fn_);
    let tpr = recall;
    let fpr = fp / (fp + tn);

    Ok(ThresholdMetrics {
        accuracy,
        precision,
        recall,
        tpr,
        fpr,
    })
}

fn strictly_increasing(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] < w[1])
}

/// ROC点列のfprを狭義単調増加に修復する
///
/// まずfprが等しい連続区間を末尾の点（tpr最大側）に畳み込み、
/// 残った減少違反の点を繰り返し取り除きます。同値区間で末尾を残すのは
/// 意図的な同値解決です: 先頭を残すと完全な予測器の曲線が
/// (0,0)→(1,1)に潰れてAUCが0.5になってしまうため、tprが最大の点を
/// 残して通常のROC階段の上側を保ちます。各パスで少なくとも
/// 1点が除去されるため反復は点数で抑えられますが、念のため上限を
/// 超えた場合はエラーを返します。
fn repair_monotonicity(fprs: &mut Vec<f64>, tprs: &mut Vec<f64>) -> Result<()> {
    let original_len = fprs.len();

    // 等しいfprの連続区間は最後の点だけを残す
    let mut keep: Vec<bool> = (0..fprs.len())
        .map(|i| i + 1 >= fprs.len() || fprs[i + 1] != fprs[i])
        .collect();
    retain_points(fprs, tprs, &keep);

    let mut iterations = 0;
    while !strictly_increasing(fprs) {
        iterations += 1;
        if iterations > original_len {
            return Err(Error::ComputationError(
                "ROC曲線の単調化が収束しませんでした".to_string(),
            ));
        }
        keep = vec![true; fprs.len()];
        for j in 1..fprs.len() {
            if fprs[j] <= fprs[j - 1] {
                keep[j] = false;
            }
        }
        retain_points(fprs, tprs, &keep);
    }

    if fprs.len() < original_len {
        warn!(
            "ROC曲線の単調化により{}点中{}点を除去しました",
            original_len,
            original_len - fprs.len()
        );
    }
    Ok(())
}

fn retain_points(fprs: &mut Vec<f64>, tprs: &mut Vec<f64>, keep: &[bool]) {
    let mut idx = 0;
    fprs.retain(|_| {
        let k = keep[idx];
        idx += 1;
        k
    });
    idx = 0;
    tprs.retain(|_| {
        let k = keep[idx];
        idx += 1;
        k
    });
}

/// 台形則によるAUC計算（xは狭義単調増加であること）
fn trapezoid_auc(xs: &[f64], ys: &[f64]) -> f64 {
    xs.windows(2)
        .zip(ys.windows(2))
        .map(|(x, y)| 0.5 * (x[1] - x[0]) * (y[0] + y[1]))
        .sum()
}

/// 閾値スイープ全体のAUCスコアを計算
///
/// 閾値を1%から99%までの98点で走査し、各点の（偽陽性率, 真陽性率）
/// からROC曲線を構成します。先頭の点は(0, 0)に固定し、終端に(1, 1)を
/// 追加した上でfprを狭義単調増加に修復してから積分します。
///
/// # Arguments
/// * `actual` - 真の値
/// * `predicted` - 予測値
///
/// # Returns
/// * `Result<f64>` - AUCスコア
pub fn auc_overall(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    // np.linspace(1, 100, 99)の最後の点を落とした98点のグリッド
    let step = 99.0 / 98.0;
    let mut fprs: Vec<f64> = Vec::with_capacity(100);
    let mut tprs: Vec<f64> = Vec::with_capacity(100);

    for i in 0..98 {
        let p = 1.0 + i as f64 * step;
        let m = threshold_metrics(actual, predicted, p)?;
        fprs.push(m.fpr);
        tprs.push(m.tpr);
    }

    // 曲線を閉じるため端点を固定する
    fprs[0] = 0.0;
    tprs[0] = 0.0;
    fprs.push(1.0);
    tprs.push(1.0);

    repair_monotonicity(&mut fprs, &mut tprs)?;

    Ok(trapezoid_auc(&fprs, &tprs))
}
