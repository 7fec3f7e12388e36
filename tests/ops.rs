// パス: tests/ops.rs
// 役割: 演算子ディスパッチ（真偽値化・加算・乗算・床除算・等価）の検証
// 意図: 型ごとの組合せ表と List/Tuple 非互換の厳格拒否が回帰しないようにする
// 関連ファイル: src/ops.rs, tests/test_support.rs
#[path = "test_support.rs"]
mod support;

use pyrt::{add, eq, floor_div, kind, mul, sub, truthy, Mapping, ObjectCell, Value};
use support::{assert_fault, assert_num, assert_str, list_of, num, s, tuple_of, unwrap_value};

#[test]
/// 真偽値化の代表ケースをテーブルドリブンで検証する。
fn truthy_table() {
    let cases: Vec<(Value, bool, &str)> = vec![
        (Value::None, false, "None is falsy"),
        (Value::Bool(false), false, "False is falsy"),
        (Value::Bool(true), true, "True is truthy"),
        (num(0.0), false, "zero is falsy"),
        (num(-2.5), true, "non-zero number is truthy"),
        (s(""), false, "empty str is falsy"),
        (s("x"), true, "non-empty str is truthy"),
        (Value::list(vec![]), false, "empty list is falsy"),
        (list_of(&[1.0]), true, "non-empty list is truthy"),
        (Value::tuple(vec![]), false, "empty tuple is falsy"),
        (tuple_of(&[1.0]), true, "non-empty tuple is truthy"),
        (
            Value::mapping(Mapping::new()),
            true,
            "mapping is always truthy, even empty",
        ),
        (
            Value::object(ObjectCell::new()),
            true,
            "object is always truthy",
        ),
        (
            Value::fault(pyrt::Fault::value_error("boom")),
            true,
            "fault value is truthy",
        ),
    ];
    for (value, expected, note) in cases {
        assert_eq!(truthy(&value), expected, "{note}");
    }
}

#[test]
fn add_numbers_and_strings() {
    assert_num(&unwrap_value(add(&num(2.0), &num(3.5)), "2 + 3.5"), 5.5, "number sum");
    assert_str(
        &unwrap_value(add(&s("foo"), &s("bar")), "str concat"),
        "foobar",
        "str concat",
    );
}

#[test]
fn add_concatenates_same_kind_sequences() {
    let result = unwrap_value(add(&list_of(&[1.0, 2.0]), &list_of(&[3.0, 4.0])), "list + list");
    assert!(eq(&result, &list_of(&[1.0, 2.0, 3.0, 4.0])), "list concat result");

    let result = unwrap_value(
        add(&tuple_of(&[1.0, 2.0]), &tuple_of(&[3.0, 4.0])),
        "tuple + tuple",
    );
    assert!(eq(&result, &tuple_of(&[1.0, 2.0, 3.0, 4.0])), "tuple concat result");
}

#[test]
fn add_produces_a_new_list_not_an_alias() {
    let left = list_of(&[1.0]);
    let result = unwrap_value(add(&left, &list_of(&[2.0])), "list + list");
    if let Value::List(cell) = &left {
        cell.borrow_mut().push(num(99.0));
    }
    assert!(eq(&result, &list_of(&[1.0, 2.0])), "concat result unaffected by source mutation");
}

#[test]
fn add_rejects_mixed_kinds() {
    assert_fault(
        add(&list_of(&[1.0, 2.0]), &tuple_of(&[3.0, 4.0])),
        kind::TYPE_ERROR,
        "list + tuple is never merged",
    );
    assert_fault(
        add(&tuple_of(&[1.0]), &list_of(&[2.0])),
        kind::TYPE_ERROR,
        "tuple + list is never merged",
    );
    assert_fault(add(&s("a"), &num(1.0)), kind::TYPE_ERROR, "str + number");
    assert_fault(add(&Value::None, &num(1.0)), kind::TYPE_ERROR, "None + number");
}

#[test]
fn sub_is_numbers_only() {
    assert_num(&unwrap_value(sub(&num(7.0), &num(2.5)), "7 - 2.5"), 4.5, "number difference");
    assert_fault(sub(&s("a"), &s("b")), kind::TYPE_ERROR, "str - str");
}

#[test]
fn mul_repetition() {
    assert_num(&unwrap_value(mul(&num(3.0), &num(4.0)), "3 * 4"), 12.0, "number product");
    assert_str(&unwrap_value(mul(&s("ab"), &num(3.0)), "str * 3"), "ababab", "str repetition");
    assert_str(&unwrap_value(mul(&num(2.0), &s("xy")), "2 * str"), "xyxy", "commuted str repetition");

    let repeated = unwrap_value(mul(&list_of(&[1.0, 2.0]), &num(2.0)), "list * 2");
    assert!(eq(&repeated, &list_of(&[1.0, 2.0, 1.0, 2.0])), "list repetition");
    let repeated = unwrap_value(mul(&num(2.0), &tuple_of(&[7.0])), "2 * tuple");
    assert!(eq(&repeated, &tuple_of(&[7.0, 7.0])), "tuple repetition keeps tuple kind");
}

#[test]
fn mul_edge_counts_and_faults() {
    assert_str(&unwrap_value(mul(&s("ab"), &num(-1.0)), "str * -1"), "", "negative count yields empty");
    assert!(
        eq(
            &unwrap_value(mul(&list_of(&[1.0]), &num(0.0)), "list * 0"),
            &Value::list(vec![])
        ),
        "zero count yields empty list"
    );
    assert_fault(mul(&s("ab"), &num(1.5)), kind::TYPE_ERROR, "fractional repetition count");
    assert_fault(mul(&list_of(&[1.0]), &s("x")), kind::TYPE_ERROR, "list * str");
    assert_fault(mul(&Value::None, &num(2.0)), kind::TYPE_ERROR, "None * number");
}

#[test]
/// 床除算は負の無限大方向へ丸める。ゼロ方向ではない。
fn floor_div_rounds_toward_negative_infinity() {
    let cases = [
        (7.0, 2.0, 3.0, "7 // 2"),
        (-7.0, 2.0, -4.0, "-7 // 2"),
        (7.0, -2.0, -4.0, "7 // -2"),
        (-7.0, -2.0, 3.0, "-7 // -2"),
        (-6.0, 3.0, -2.0, "exact negative quotient is not pushed past -2"),
        (6.0, 3.0, 2.0, "exact positive quotient"),
        (0.0, 5.0, 0.0, "zero numerator"),
    ];
    for (a, b, expected, note) in cases {
        assert_num(
            &unwrap_value(floor_div(&num(a), &num(b)), note),
            expected,
            note,
        );
    }
    assert_fault(floor_div(&s("8"), &num(2.0)), kind::TYPE_ERROR, "str // number");
}

#[test]
fn eq_primitives() {
    assert!(eq(&num(2.0), &num(2.0)), "equal numbers");
    assert!(!eq(&num(2.0), &num(3.0)), "unequal numbers");
    assert!(eq(&s("a"), &s("a")), "equal strings");
    assert!(eq(&Value::None, &Value::None), "None equals None");
    assert!(!eq(&Value::Bool(true), &num(1.0)), "mismatched primitive tags never equal");
    assert!(!eq(&num(0.0), &Value::None), "zero is not None");
}

#[test]
fn eq_sequences_are_recursive_and_tag_strict() {
    assert!(eq(&tuple_of(&[1.0, 2.0]), &tuple_of(&[1.0, 2.0])), "equal tuples");
    assert!(!eq(&list_of(&[1.0, 2.0]), &tuple_of(&[1.0, 2.0])), "list never equals tuple");
    assert!(!eq(&list_of(&[1.0, 2.0]), &list_of(&[1.0, 2.0, 3.0])), "length mismatch");

    let nested_a = Value::list(vec![list_of(&[1.0]), tuple_of(&[2.0])]);
    let nested_b = Value::list(vec![list_of(&[1.0]), tuple_of(&[2.0])]);
    assert!(eq(&nested_a, &nested_b), "nested recursive equality");
    let nested_c = Value::list(vec![tuple_of(&[1.0]), tuple_of(&[2.0])]);
    assert!(!eq(&nested_a, &nested_c), "nested tag mismatch");
}

#[test]
fn eq_mappings_ignore_insertion_order() {
    let mut left = Mapping::new();
    left.insert("a", num(1.0));
    left.insert("b", num(2.0));
    let mut right = Mapping::new();
    right.insert("b", num(2.0));
    right.insert("a", num(1.0));
    assert!(
        eq(&Value::mapping(left), &Value::mapping(right)),
        "key order does not affect mapping equality"
    );

    let mut shorter = Mapping::new();
    shorter.insert("a", num(1.0));
    let mut longer = Mapping::new();
    longer.insert("a", num(1.0));
    longer.insert("b", num(2.0));
    assert!(
        !eq(&Value::mapping(shorter), &Value::mapping(longer)),
        "key set size mismatch"
    );
}

#[test]
fn eq_identity_fast_path_for_shared_cells() {
    let shared = list_of(&[1.0, 2.0]);
    let alias = shared.clone();
    assert!(eq(&shared, &alias), "aliased cells are identical");
}

#[test]
fn eq_faults_compare_by_kind_and_message() {
    let a = Value::fault(pyrt::Fault::value_error("x"));
    let b = Value::fault(pyrt::Fault::value_error("x"));
    let c = Value::fault(pyrt::Fault::key_error("x"));
    assert!(eq(&a, &b), "same kind and message");
    assert!(!eq(&a, &c), "different kind");
    assert!(!eq(&a, &s("ValueError: x")), "fault never equals an ordinary value");
}
