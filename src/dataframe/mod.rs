//! DataFrameモジュール
//!
//! 列名と型付き列の対応を保持する軽量なテーブル構造を提供します。
//! 列の追加順序は保存されます。

use std::collections::HashMap;

use crate::column::Column;
use crate::error::{Error, Result};

/// 名前付き列の集合を保持するテーブル
#[derive(Debug, Clone, Default)]
pub struct DataFrame {
    /// 列の追加順序
    column_order: Vec<String>,
    /// 列名から列データへのマップ
    columns: HashMap<String, Column>,
    /// 行数
    row_count: usize,
}

impl DataFrame {
    /// 新しい空のDataFrameを作成
    pub fn new() -> Self {
        DataFrame {
            column_order: Vec::new(),
            columns: HashMap::new(),
            row_count: 0,
        }
    }

    /// 列を追加
    ///
    /// 最初の列が行数を決定し、以降の列は同じ長さでなければなりません。
    pub fn add_column(&mut self, name: impl Into<String>, column: Column) -> Result<()> {
        let name = name.into();
        if self.columns.contains_key(&name) {
            return Err(Error::DuplicateColumnName(name));
        }
        if self.column_order.is_empty() {
            self.row_count = column.len();
        } else if column.len() != self.row_count {
            return Err(Error::InconsistentRowCount {
                expected: self.row_count,
                found: column.len(),
            });
        }
        self.column_order.push(name.clone());
        self.columns.insert(name, column);
        Ok(())
    }

    /// 列を取得
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    /// 列が存在するかどうか
    pub fn contains_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// 列名の一覧（追加順）
    pub fn column_names(&self) -> &[String] {
        &self.column_order
    }

    /// 行数
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// 列数
    pub fn column_count(&self) -> usize {
        self.column_order.len()
    }

    /// 既存の列を置き換える
    pub fn replace_column(&mut self, name: &str, column: Column) -> Result<()> {
        if !self.columns.contains_key(name) {
            return Err(Error::ColumnNotFound(name.to_string()));
        }
        if column.len() != self.row_count {
            return Err(Error::InconsistentRowCount {
                expected: self.row_count,
                found: column.len(),
            });
        }
        self.columns.insert(name.to_string(), column);
        Ok(())
    }

    /// 指定した列を取り除いた新しいDataFrameを返す
    ///
    /// 存在しない列名を指定した場合はエラーになります。
    pub fn drop_columns(&self, names: &[String]) -> Result<DataFrame> {
        for name in names {
            if !self.columns.contains_key(name) {
                return Err(Error::ColumnNotFound(name.clone()));
            }
        }

        let mut result = DataFrame::new();
        for name in &self.column_order {
            if !names.contains(name) {
                result.add_column(name.clone(), self.columns[name].clone())?;
            }
        }
        Ok(result)
    }
}
