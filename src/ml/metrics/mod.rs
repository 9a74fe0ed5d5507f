//! 機械学習の評価指標モジュール
//!
//! 回帰モデルを分類問題として評価するための指標を提供します。

pub mod threshold;

pub use threshold::{auc_overall, threshold_confusion, threshold_metrics};
pub use threshold::{ConfusionCounts, ThresholdMetrics};
