//! tabeval: 表形式モデルの評価指標と前処理ユーティリティ
//!
//! 回帰モデルの予測を「下位p%を正例とみなす」二値分類として評価する
//! 閾値スイープ指標（AUC含む）、表データの前処理変換器
//! （欠損率による列除去、分位点による切り詰め）、および学習済み
//! モデルの読み込み機能を提供します。
//!
//! # Quick Start
//!
//! ```
//! use tabeval::ml::metrics::auc_overall;
//!
//! let actual: Vec<f64> = (0..100).map(|i| i as f64).collect();
//! let auc = auc_overall(&actual, &actual).unwrap();
//! assert!((auc - 1.0).abs() < 1e-9);
//! ```
//!
//! # Modules
//!
//! - [`dataframe`]: 名前付き列のテーブル構造
//! - [`column`]: 欠損値対応の型付き列
//! - [`na`]: 欠損値（NA）型
//! - [`stats`]: 分位数などの記述統計
//! - [`ml`]: 評価指標・前処理変換器・モデル読み込み

pub mod column;
pub mod dataframe;
pub mod error;
pub mod ml;
pub mod na;
pub mod stats;

// Re-export commonly used types
pub use column::{Column, ColumnType};
pub use dataframe::DataFrame;
pub use error::{Error, Result};
pub use na::NA;

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
