//! 前処理モジュール
//!
//! 表データに対する前処理変換器を提供します。各変換器のfitは
//! インスタンスを変更せず、学習結果を保持する不変の構造体を返します。
//! 変換はその構造体に対して行います。

use std::collections::HashMap;

use crate::column::Column;
use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::ml::pipeline::Transform;
use crate::na::NA;
use crate::stats;

/// 欠損率の高い列を取り除く変換器
///
/// fit時に各列の欠損率を計算し、しきい値を超えた列を除去対象として
/// 学習します。
#[derive(Debug, Clone)]
pub struct DropMissing {
    /// 欠損率のしきい値（これを超えた列が除去される）
    threshold: f64,
}

impl DropMissing {
    /// 新しいDropMissingを作成
    pub fn new(threshold: f64) -> Self {
        DropMissing { threshold }
    }

    /// しきい値を取得
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// 各列の欠損率を学習し、除去対象の列を決定する
    pub fn fit(&self, df: &DataFrame) -> Result<FittedDropMissing> {
        let rows = df.row_count();
        let mut missing_frac = HashMap::new();
        let mut columns_to_drop = Vec::new();
        let mut columns_to_keep = Vec::new();

        for name in df.column_names() {
            let column = df
                .column(name)
                .ok_or_else(|| Error::ColumnNotFound(name.clone()))?;
            // 行数0の場合は0/0でNaNとなり、NaN > thresholdは偽なので列は残る
            let frac = column.missing_count() as f64 / rows as f64;
            missing_frac.insert(name.clone(), frac);
            if frac > self.threshold {
                columns_to_drop.push(name.clone());
            } else {
                columns_to_keep.push(name.clone());
            }
        }

        Ok(FittedDropMissing {
            missing_frac,
            columns_to_drop,
            columns_to_keep,
        })
    }
}

/// DropMissingの学習結果
#[derive(Debug, Clone)]
pub struct FittedDropMissing {
    missing_frac: HashMap<String, f64>,
    columns_to_drop: Vec<String>,
    columns_to_keep: Vec<String>,
}

impl FittedDropMissing {
    /// fit時に計算した各列の欠損率
    pub fn missing_frac(&self) -> &HashMap<String, f64> {
        &self.missing_frac
    }

    /// 除去対象の列名
    pub fn columns_to_drop(&self) -> &[String] {
        &self.columns_to_drop
    }

    /// 残す列名
    pub fn columns_to_keep(&self) -> &[String] {
        &self.columns_to_keep
    }

    /// 学習した除去対象の列を取り除いたDataFrameを返す
    ///
    /// fit時と異なるテーブルにも適用できますが、除去対象の列が
    /// 存在しない場合はエラーになります。
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        df.drop_columns(&self.columns_to_drop)
    }
}

impl Transform for FittedDropMissing {
    fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        FittedDropMissing::transform(self, df)
    }
}

/// Winsorizerの分位点指定
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WinsorLimits {
    /// 既定の(0.01, 0.99)
    Default,
    /// 対称な指定: fは(f, 1 - f)と解釈される
    Symmetric(f64),
    /// 明示的な(下側, 上側)の分位点ペア
    Bounds(f64, f64),
}

/// 数値列を分位点で切り詰める（ウィンザライズする）変換器
///
/// fit時に各数値列の下側・上側の分位数を計算し、transformで値を
/// その範囲に収めます。欠損値はそのまま残ります。
#[derive(Debug, Clone)]
pub struct Winsorizer {
    limits: WinsorLimits,
}

impl Winsorizer {
    /// 既定の分位点(0.01, 0.99)でWinsorizerを作成
    pub fn new() -> Self {
        Winsorizer {
            limits: WinsorLimits::Default,
        }
    }

    /// 分位点を指定してWinsorizerを作成
    pub fn with_limits(limits: WinsorLimits) -> Self {
        Winsorizer { limits }
    }

    fn resolve_limits(&self) -> Result<(f64, f64)> {
        let (low, high) = match self.limits {
            WinsorLimits::Default => (0.01, 0.99),
            WinsorLimits::Symmetric(f) => (f, 1.0 - f),
            WinsorLimits::Bounds(low, high) => (low, high),
        };
        if !(0.0..=1.0).contains(&low) || !(0.0..=1.0).contains(&high) || low > high {
            return Err(Error::InvalidValue(format!(
                "分位点の組は0から1の範囲かつ下側 <= 上側でなければなりません: ({}, {})",
                low, high
            )));
        }
        Ok((low, high))
    }

    /// 各数値列の切り詰め境界を学習する
    ///
    /// 数値型でない列は対象外です。欠損を除いた値が1つもない数値列も
    /// 境界を計算できないため対象外とし、transformでは素通しになります。
    pub fn fit(&self, df: &DataFrame) -> Result<FittedWinsorizer> {
        let (low_q, high_q) = self.resolve_limits()?;

        let mut columns = Vec::new();
        let mut bounds = HashMap::new();

        for name in df.column_names() {
            let column = df
                .column(name)
                .ok_or_else(|| Error::ColumnNotFound(name.clone()))?;
            if !column.is_numeric() {
                continue;
            }
            let values = match column.numeric_values() {
                Some(v) if !v.is_empty() => v,
                _ => continue,
            };
            let low = stats::quantile(&values, low_q)?;
            let high = stats::quantile(&values, high_q)?;
            columns.push(name.clone());
            bounds.insert(name.clone(), (low, high));
        }

        Ok(FittedWinsorizer {
            quantiles: (low_q, high_q),
            columns,
            bounds,
        })
    }
}

impl Default for Winsorizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Winsorizerの学習結果
#[derive(Debug, Clone)]
pub struct FittedWinsorizer {
    quantiles: (f64, f64),
    columns: Vec<String>,
    bounds: HashMap<String, (f64, f64)>,
}

impl FittedWinsorizer {
    /// 解決済みの分位点ペア
    pub fn quantiles(&self) -> (f64, f64) {
        self.quantiles
    }

    /// 学習対象となった列名
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// 列ごとの(下側境界, 上側境界)
    pub fn bounds(&self) -> &HashMap<String, (f64, f64)> {
        &self.bounds
    }

    /// 学習した境界で各数値列の値を切り詰めたDataFrameを返す
    ///
    /// 切り詰めた列はFloat64列になります。学習対象外の列は変更されず、
    /// 欠損値はそのまま残ります。学習した列がテーブルに存在しない
    /// 場合はエラーになります。
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        let mut result = df.clone();

        for name in &self.columns {
            let column = df
                .column(name)
                .ok_or_else(|| Error::ColumnNotFound(name.clone()))?;
            let values = column.as_f64().ok_or_else(|| {
                Error::InvalidOperation(format!("列は数値型ではありません: {}", name))
            })?;
            let (low, high) = self.bounds[name];

            let clipped: Vec<NA<f64>> = values
                .into_iter()
                .map(|x| x.map(|&v| v.clamp(low, high)))
                .collect();
            result.replace_column(name, Column::Float64(clipped))?;
        }

        Ok(result)
    }
}

impl Transform for FittedWinsorizer {
    fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        FittedWinsorizer::transform(self, df)
    }
}
