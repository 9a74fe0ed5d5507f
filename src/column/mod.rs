//! 列データモジュール
//!
//! DataFrameを構成する型付き列を提供します。各列は欠損値（NA）を
//! サポートします。

use crate::na::NA;

/// 列の型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Float64,
    Int64,
    String,
    Boolean,
}

/// 型付きの列データ
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Float64(Vec<NA<f64>>),
    Int64(Vec<NA<i64>>),
    String(Vec<NA<String>>),
    Boolean(Vec<NA<bool>>),
}

impl Column {
    /// 欠損なしのf64ベクトルから列を作成
    pub fn from_f64(values: Vec<f64>) -> Self {
        Column::Float64(values.into_iter().map(NA::Value).collect())
    }

    /// 欠損なしのi64ベクトルから列を作成
    pub fn from_i64(values: Vec<i64>) -> Self {
        Column::Int64(values.into_iter().map(NA::Value).collect())
    }

    /// 欠損なしの文字列ベクトルから列を作成
    pub fn from_strings(values: Vec<String>) -> Self {
        Column::String(values.into_iter().map(NA::Value).collect())
    }

    /// 列の型を取得
    pub fn column_type(&self) -> ColumnType {
        match self {
            Column::Float64(_) => ColumnType::Float64,
            Column::Int64(_) => ColumnType::Int64,
            Column::String(_) => ColumnType::String,
            Column::Boolean(_) => ColumnType::Boolean,
        }
    }

    /// 数値型の列かどうか
    pub fn is_numeric(&self) -> bool {
        matches!(self, Column::Float64(_) | Column::Int64(_))
    }

    /// 列の長さ
    pub fn len(&self) -> usize {
        match self {
            Column::Float64(v) => v.len(),
            Column::Int64(v) => v.len(),
            Column::String(v) => v.len(),
            Column::Boolean(v) => v.len(),
        }
    }

    /// 列が空かどうか
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 欠損値の個数
    pub fn missing_count(&self) -> usize {
        match self {
            Column::Float64(v) => v.iter().filter(|x| x.is_na()).count(),
            Column::Int64(v) => v.iter().filter(|x| x.is_na()).count(),
            Column::String(v) => v.iter().filter(|x| x.is_na()).count(),
            Column::Boolean(v) => v.iter().filter(|x| x.is_na()).count(),
        }
    }

    /// 数値列をf64ビューとして取得（数値列でない場合はNone）
    pub fn as_f64(&self) -> Option<Vec<NA<f64>>> {
        match self {
            Column::Float64(v) => Some(v.clone()),
            Column::Int64(v) => Some(v.iter().map(|x| x.map(|&i| i as f64)).collect()),
            _ => None,
        }
    }

    /// 数値列の欠損を除いた値のベクトルを取得（数値列でない場合はNone）
    pub fn numeric_values(&self) -> Option<Vec<f64>> {
        self.as_f64().map(|v| {
            v.into_iter()
                .filter_map(|x| Option::<f64>::from(x))
                .collect()
        })
    }
}
