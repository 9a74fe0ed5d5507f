//! モデル読み込みモジュール
//!
//! `<out_path>/<kind>_models/<モデル名>/model` という配置規約に従って
//! 学習済みモデルを解決し、デシリアライズします。モデルは単一のJSON
//! ファイルか、automlライブラリが生成するディレクトリ形式の
//! チェックポイントのどちらかです。ディレクトリ形式の読み込みは
//! `automl`フィーチャを有効にした場合のみ利用できます。

use std::fs;
use std::path::Path;

use log::debug;
use serde_json::Value;

use crate::error::{Error, Result};

/// モデルの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    /// チューニングなしのモデル
    Untuned,
    /// ハイパーパラメータ調整済みのモデル
    Tuned,
    /// automlライブラリで探索されたモデル
    Automl,
}

impl ModelKind {
    /// 種類の名前
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Untuned => "untuned",
            ModelKind::Tuned => "tuned",
            ModelKind::Automl => "automl",
        }
    }

    /// モデルが保存されるサブディレクトリ名
    pub fn models_subdir(&self) -> String {
        format!("{}_models", self.as_str())
    }
}

/// デシリアライズされたモデルの不透明ハンドル
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedModel {
    value: Value,
}

impl LoadedModel {
    /// JSON値からハンドルを作成
    pub fn from_value(value: Value) -> Self {
        LoadedModel { value }
    }

    /// 中身のJSON値への参照
    pub fn as_value(&self) -> &Value {
        &self.value
    }

    /// 中身のJSON値を取り出す
    pub fn into_value(self) -> Value {
        self.value
    }

    /// best_estimatorフィールドを取り出す（チューニング済みモデル用）
    fn into_best_estimator(self) -> Result<LoadedModel> {
        match self.value {
            Value::Object(mut map) => map
                .remove("best_estimator")
                .map(LoadedModel::from_value)
                .ok_or_else(|| {
                    Error::InvalidOperation(
                        "読み込んだモデルにbest_estimatorフィールドがありません".to_string(),
                    )
                }),
            _ => Err(Error::InvalidOperation(
                "読み込んだモデルにbest_estimatorフィールドがありません".to_string(),
            )),
        }
    }
}

/// モデル読み込み機構のトレイト
///
/// 保存形式ごとの読み込み実装をこのトレイトの背後に分離します。
pub trait ModelLoader {
    /// 指定されたパスからモデルを読み込む
    fn load(&self, path: &Path) -> Result<LoadedModel>;
}

/// 単一のJSONファイルとして保存されたモデルを読み込むローダ
pub struct JsonFileLoader;

impl ModelLoader for JsonFileLoader {
    fn load(&self, path: &Path) -> Result<LoadedModel> {
        let json = fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&json)?;
        Ok(LoadedModel::from_value(value))
    }
}

/// ディレクトリ形式のautomlチェックポイントを読み込むローダ
///
/// チェックポイント直下の`predictor.json`をモデル本体として読み込みます。
#[cfg(feature = "automl")]
pub struct AutomlCheckpointLoader;

#[cfg(feature = "automl")]
impl ModelLoader for AutomlCheckpointLoader {
    fn load(&self, path: &Path) -> Result<LoadedModel> {
        let manifest = path.join("predictor.json");
        if !manifest.is_file() {
            return Err(Error::InvalidOperation(format!(
                "automlチェックポイントにpredictor.jsonが見つかりません: {}",
                path.display()
            )));
        }
        JsonFileLoader.load(&manifest)
    }
}

#[cfg(feature = "automl")]
fn load_checkpoint_dir(path: &Path) -> Result<LoadedModel> {
    AutomlCheckpointLoader.load(path)
}

#[cfg(not(feature = "automl"))]
fn load_checkpoint_dir(_path: &Path) -> Result<LoadedModel> {
    Err(Error::FeatureNotAvailable(
        "指定されたモデルはディレクトリ形式のautomlチェックポイントのようです。\
         読み込むには`automl`フィーチャを有効にしてビルドし直してください\
         （このフィーチャは既定では無効です）。"
            .to_string(),
    ))
}

/// 学習済みモデルを解決して読み込む
///
/// 解決順序:
/// 1. `<out_path>/<kind>_models/<model>/model` がファイル → そのまま読み込み
/// 2. 同じパスがディレクトリ → automlチェックポイントとして読み込み
/// 3. `model` 自体がファイルパス → 読み込み、出力サブディレクトリを作成
/// 4. いずれでもない → エラー
///
/// 種類がTunedの場合は、読み込んだオブジェクトのbest_estimatorを
/// 取り出して返します。
///
/// # Arguments
/// * `model` - モデル名またはファイルパス
/// * `out_path` - モデルが保存されているルートディレクトリ
/// * `kind` - モデルの種類
///
/// # Returns
/// * `Result<(String, LoadedModel)>` - 解決されたモデル名とハンドル
pub fn load_model(model: &str, out_path: &Path, kind: ModelKind) -> Result<(String, LoadedModel)> {
    let subdir = kind.models_subdir();
    let full_path = out_path.join(&subdir).join(model).join("model");

    let (model_name, loaded) = if full_path.is_file() {
        debug!("モデルファイルを読み込みます: {}", full_path.display());
        (model.to_string(), JsonFileLoader.load(&full_path)?)
    } else if full_path.is_dir() {
        debug!(
            "automlチェックポイントを読み込みます: {}",
            full_path.display()
        );
        (model.to_string(), load_checkpoint_dir(&full_path)?)
    } else if Path::new(model).is_file() {
        let path = Path::new(model);
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| model.to_string());
        debug!("パス指定のモデルを読み込みます: {}", model);
        let loaded = JsonFileLoader.load(path)?;
        fs::create_dir_all(out_path.join(&subdir).join(&name))?;
        (name, loaded)
    } else {
        return Err(Error::InvalidValue(
            "modelにはパスか既知のモデル名を指定してください".to_string(),
        ));
    };

    if kind == ModelKind::Tuned {
        return Ok((model_name, loaded.into_best_estimator()?));
    }
    Ok((model_name, loaded))
}
