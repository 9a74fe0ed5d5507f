//! 機械学習関連のユーティリティを提供するモジュール
//!
//! 回帰モデルの閾値スイープ評価、表データの前処理変換器、
//! 学習済みモデルの読み込み機能を提供します。

pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod preprocessing;
