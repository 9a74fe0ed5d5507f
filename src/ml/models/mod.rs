//! 学習済みモデルモジュール
//!
//! ファイルシステム上に保存された学習済みモデルの解決と読み込みを
//! 提供します。

pub mod loading;

#[cfg(feature = "automl")]
pub use loading::AutomlCheckpointLoader;
pub use loading::{load_model, JsonFileLoader, LoadedModel, ModelKind, ModelLoader};
