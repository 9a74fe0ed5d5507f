//! 機械学習パイプラインモジュール
//!
//! 学習済みの変換器を連鎖させるためのトレイトとパイプラインを
//! 提供します。変換器の学習（fit）は不変の学習結果構造体を返すため、
//! パイプラインには学習済みのステップだけを追加します。

use crate::dataframe::DataFrame;
use crate::error::Result;

/// 学習済みデータ変換器のトレイト
pub trait Transform {
    /// データを変換する
    fn transform(&self, df: &DataFrame) -> Result<DataFrame>;
}

/// 学習済み変換ステップを連鎖させるパイプライン
#[derive(Default)]
pub struct Pipeline {
    steps: Vec<Box<dyn Transform>>,
}

impl Pipeline {
    /// 新しいパイプラインを作成
    pub fn new() -> Self {
        Pipeline { steps: Vec::new() }
    }

    /// 学習済みステップをパイプラインに追加
    pub fn add_step<T: Transform + 'static>(&mut self, step: T) -> &mut Self {
        self.steps.push(Box::new(step));
        self
    }

    /// パイプラインの全ステップを順に適用して変換
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        let mut result = df.clone();
        for step in &self.steps {
            result = step.transform(&result)?;
        }
        Ok(result)
    }
}
