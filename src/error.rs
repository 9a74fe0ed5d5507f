use thiserror::Error;

/// エラー型の定義
#[derive(Error, Debug)]
pub enum Error {
    #[error("列が見つかりません: {0}")]
    ColumnNotFound(String),

    #[error("列名が重複しています: {0}")]
    DuplicateColumnName(String),

    #[error("行数が一致しません: 期待値 {expected}, 実際 {found}")]
    InconsistentRowCount { expected: usize, found: usize },

    #[error("データがありません: {0}")]
    EmptyData(String),

    #[error("次元不一致エラー: {0}")]
    DimensionMismatch(String),

    #[error("計算エラー: {0}")]
    ComputationError(String),

    #[error("無効な操作です: {0}")]
    InvalidOperation(String),

    #[error("無効な値です: {0}")]
    InvalidValue(String),

    #[error("機能が利用できません: {0}")]
    FeatureNotAvailable(String),

    #[error("入出力エラー")]
    Io(#[source] std::io::Error),

    #[error("JSONエラー")]
    Json(#[source] serde_json::Error),
}

/// Resultの型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}
