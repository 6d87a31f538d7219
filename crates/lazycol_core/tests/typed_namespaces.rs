use lazycol_core::arrays::batch::Batch;
use lazycol_core::arrays::column::Column;
use lazycol_core::arrays::datatype::{DataType, TimeUnit};
use lazycol_core::arrays::scalar::ScalarValue;
use lazycol_core::engine::Engine;
use lazycol_core::engine::reference::ReferenceEngine;
use lazycol_core::expr::{Expr, StrptimeOptions, col};

fn eval(expr: &Expr, column: Column) -> Column {
    logutil::init_test();
    let batch = Batch::try_new([column]).unwrap();
    ReferenceEngine::default()
        .evaluate(expr.handle(), &batch)
        .unwrap()
}

fn strs(values: &[Option<&str>]) -> Column {
    Column::from_strs("s", values.iter().copied())
}

#[test]
fn parsed_datetimes_by_zone() {
    let parsed = col("s")
        .str()
        .to_datetime(
            StrptimeOptions::with_format("%F %T%z"),
            Some(TimeUnit::Milliseconds),
            Some("+01:00"),
        )
        .unwrap();
    let values = [Some("2024-01-05 23:30:00+00:00"), None];

    let out = eval(&parsed.dt().day().unwrap(), strs(&values));
    assert_eq!(&[ScalarValue::Int8(6), ScalarValue::Null], out.values());

    let out = eval(
        &parsed.dt().strftime("%Y-%m-%d %H:%M %:z").unwrap(),
        strs(&values),
    );
    assert_eq!(
        &[ScalarValue::from("2024-01-06 00:30 +01:00"), ScalarValue::Null],
        out.values()
    );
}

#[test]
fn date_parts() {
    let dates = col("s")
        .str()
        .to_date(StrptimeOptions::with_format("%Y-%m-%d"))
        .unwrap();

    let out = eval(
        &dates.dt().weekday().unwrap(),
        strs(&[Some("2024-01-01"), Some("2024-01-07")]),
    );
    assert_eq!(&DataType::Int8, out.datatype());
    assert_eq!(&[ScalarValue::Int8(1), ScalarValue::Int8(7)], out.values());
}

#[test]
fn integer_literal_found_in_inferred_list() {
    let lists = col("s").str().json_extract(None).unwrap();
    let expr = lists.list().contains(1_i32).unwrap();

    let out = eval(&expr, strs(&[Some("[1, 2]"), Some("[3]"), None]));
    assert_eq!(
        &[ScalarValue::Boolean(true), ScalarValue::Boolean(false), ScalarValue::Null],
        out.values()
    );
}

#[test]
fn arrays_from_lists() {
    let arrays = col("s")
        .str()
        .json_extract(None)
        .unwrap()
        .cast(DataType::array(DataType::Int64, 2).unwrap(), true)
        .unwrap();

    let out = eval(
        &arrays.arr().last().unwrap(),
        strs(&[Some("[1, 2]"), Some("[3, 4]")]),
    );
    assert_eq!(&[ScalarValue::Int64(2), ScalarValue::Int64(4)], out.values());

    // Lists of the wrong width fail a strict cast.
    let batch = Batch::try_new([strs(&[Some("[1, 2, 3]")])]).unwrap();
    let err = ReferenceEngine::default()
        .evaluate(arrays.handle(), &batch)
        .unwrap_err();
    assert!(err.is_compute());
}

#[test]
fn categorical_lengths() {
    let cats = col("s").cast(DataType::Categorical, true).unwrap();

    let out = eval(
        &cats.cat().len_chars().unwrap(),
        strs(&[Some("東京"), None]),
    );
    assert_eq!(&[ScalarValue::UInt32(2), ScalarValue::Null], out.values());
}
