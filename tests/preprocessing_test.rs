use tabeval::column::Column;
use tabeval::dataframe::DataFrame;
use tabeval::error::Error;
use tabeval::ml::pipeline::Pipeline;
use tabeval::ml::preprocessing::{DropMissing, WinsorLimits, Winsorizer};
use tabeval::na::NA;
use tabeval::stats;

fn df_with_missing() -> DataFrame {
    let mut df = DataFrame::new();
    // 欠損率: full = 0.0, half = 0.5, sparse = 0.75
    df.add_column("full", Column::from_f64(vec![1.0, 2.0, 3.0, 4.0]))
        .unwrap();
    df.add_column(
        "half",
        Column::Float64(vec![NA::Value(1.0), NA::NA, NA::Value(3.0), NA::NA]),
    )
    .unwrap();
    df.add_column(
        "sparse",
        Column::String(vec![
            NA::Value("a".to_string()),
            NA::NA,
            NA::NA,
            NA::NA,
        ]),
    )
    .unwrap();
    df
}

#[test]
fn test_drop_missing_partitions_by_threshold() {
    let df = df_with_missing();
    let fitted = DropMissing::new(0.5).fit(&df).unwrap();

    // しきい値0.5を超えるのはsparseだけ（halfはちょうど0.5なので残る）
    assert_eq!(fitted.columns_to_drop(), &["sparse".to_string()]);
    assert_eq!(
        fitted.columns_to_keep(),
        &["full".to_string(), "half".to_string()]
    );
    assert_eq!(fitted.missing_frac()["half"], 0.5);

    let out = fitted.transform(&df).unwrap();
    assert!(!out.contains_column("sparse"));
    assert!(out.contains_column("full"));
    assert!(out.contains_column("half"));
}

#[test]
fn test_drop_missing_zero_threshold_drops_any_missing() {
    let df = df_with_missing();
    let fitted = DropMissing::new(0.0).fit(&df).unwrap();
    let out = fitted.transform(&df).unwrap();
    assert_eq!(out.column_names(), &["full".to_string()]);
}

#[test]
fn test_drop_missing_applies_to_other_table() {
    let df = df_with_missing();
    let fitted = DropMissing::new(0.5).fit(&df).unwrap();

    // fit時と異なるテーブルにも学習済みの除去対象を適用できる
    let mut other = DataFrame::new();
    other
        .add_column("sparse", Column::from_f64(vec![9.0]))
        .unwrap();
    other.add_column("extra", Column::from_f64(vec![1.0])).unwrap();
    let out = fitted.transform(&other).unwrap();
    assert_eq!(out.column_names(), &["extra".to_string()]);

    // 除去対象の列が存在しない場合はエラー
    let mut missing_col = DataFrame::new();
    missing_col
        .add_column("extra", Column::from_f64(vec![1.0]))
        .unwrap();
    let err = fitted.transform(&missing_col);
    assert!(matches!(err, Err(Error::ColumnNotFound(_))));
}

#[test]
fn test_winsorizer_clips_to_quantile_bounds() {
    let values: Vec<f64> = (1..=100).map(|i| i as f64).collect();
    let mut df = DataFrame::new();
    df.add_column("a", Column::from_f64(values.clone())).unwrap();

    let fitted = Winsorizer::with_limits(WinsorLimits::Bounds(0.05, 0.95))
        .fit(&df)
        .unwrap();
    let out = fitted.transform(&df).unwrap();

    let clipped = out.column("a").unwrap().numeric_values().unwrap();
    let min = clipped.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = clipped.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    // 変換後の最小値・最大値は元データの分位数に一致する
    assert_eq!(min, stats::quantile(&values, 0.05).unwrap());
    assert_eq!(max, stats::quantile(&values, 0.95).unwrap());

    let (low, high) = fitted.bounds()["a"];
    assert!(clipped.iter().all(|&v| v >= low && v <= high));
}

#[test]
fn test_winsorizer_symmetric_and_default_limits() {
    let mut df = DataFrame::new();
    df.add_column("a", Column::from_f64((0..1000).map(|i| i as f64).collect()))
        .unwrap();

    let fitted = Winsorizer::with_limits(WinsorLimits::Symmetric(0.1))
        .fit(&df)
        .unwrap();
    assert_eq!(fitted.quantiles(), (0.1, 0.9));

    let fitted = Winsorizer::new().fit(&df).unwrap();
    assert_eq!(fitted.quantiles(), (0.01, 0.99));
}

#[test]
fn test_winsorizer_invalid_limits() {
    let mut df = DataFrame::new();
    df.add_column("a", Column::from_f64(vec![1.0, 2.0])).unwrap();

    assert!(Winsorizer::with_limits(WinsorLimits::Bounds(0.9, 0.1))
        .fit(&df)
        .is_err());
    assert!(Winsorizer::with_limits(WinsorLimits::Bounds(-0.1, 0.5))
        .fit(&df)
        .is_err());
    assert!(Winsorizer::with_limits(WinsorLimits::Symmetric(0.8))
        .fit(&df)
        .is_err());
}

#[test]
fn test_winsorizer_preserves_missing_and_non_numeric() {
    let mut df = DataFrame::new();
    df.add_column(
        "num",
        Column::Float64(vec![
            NA::Value(-100.0),
            NA::NA,
            NA::Value(1.0),
            NA::Value(2.0),
            NA::Value(3.0),
            NA::Value(100.0),
        ]),
    )
    .unwrap();
    df.add_column(
        "label",
        Column::from_strings(vec![
            "a".to_string(),
            "b".to_string(),
            "c".to_string(),
            "d".to_string(),
            "e".to_string(),
            "f".to_string(),
        ]),
    )
    .unwrap();

    let fitted = Winsorizer::with_limits(WinsorLimits::Bounds(0.2, 0.8))
        .fit(&df)
        .unwrap();
    let out = fitted.transform(&df).unwrap();

    // 欠損値はそのまま残る
    let num = match out.column("num").unwrap() {
        Column::Float64(v) => v.clone(),
        other => panic!("unexpected column type: {:?}", other.column_type()),
    };
    assert!(num[1].is_na());
    assert_eq!(num.iter().filter(|x| x.is_na()).count(), 1);

    // 非数値列は変更されない
    assert_eq!(out.column("label"), df.column("label"));
    // 数値列は境界内に収まる
    let (low, high) = fitted.bounds()["num"];
    for x in num.iter().filter_map(|x| x.value()) {
        assert!(*x >= low && *x <= high);
    }
}

#[test]
fn test_winsorizer_int_column_becomes_float() {
    let mut df = DataFrame::new();
    df.add_column("n", Column::from_i64((0..100).collect())).unwrap();

    let fitted = Winsorizer::with_limits(WinsorLimits::Bounds(0.1, 0.9))
        .fit(&df)
        .unwrap();
    let out = fitted.transform(&df).unwrap();

    assert!(matches!(out.column("n").unwrap(), Column::Float64(_)));
}

#[test]
fn test_winsorizer_missing_fitted_column_errors() {
    let mut df = DataFrame::new();
    df.add_column("a", Column::from_f64(vec![1.0, 2.0, 3.0])).unwrap();
    let fitted = Winsorizer::new().fit(&df).unwrap();

    let mut other = DataFrame::new();
    other.add_column("b", Column::from_f64(vec![1.0])).unwrap();
    assert!(matches!(
        fitted.transform(&other),
        Err(Error::ColumnNotFound(_))
    ));
}

#[test]
fn test_pipeline_chains_fitted_transforms() {
    let mut df = DataFrame::new();
    df.add_column("a", Column::from_f64((0..100).map(|i| i as f64).collect()))
        .unwrap();
    df.add_column(
        "mostly_missing",
        Column::Float64(
            (0..100)
                .map(|i| if i == 0 { NA::Value(1.0) } else { NA::NA })
                .collect(),
        ),
    )
    .unwrap();

    let dropper = DropMissing::new(0.5).fit(&df).unwrap();
    let winsor = Winsorizer::with_limits(WinsorLimits::Bounds(0.05, 0.95))
        .fit(&dropper.transform(&df).unwrap())
        .unwrap();

    let mut pipeline = Pipeline::new();
    pipeline.add_step(dropper).add_step(winsor);

    let out = pipeline.transform(&df).unwrap();
    assert!(!out.contains_column("mostly_missing"));
    let values = out.column("a").unwrap().numeric_values().unwrap();
    assert!(values.iter().all(|&v| (4.95..=94.05).contains(&v)));
}
