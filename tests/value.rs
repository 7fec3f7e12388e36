// パス: tests/value.rs
// 役割: 値モデル（Mapping のマージ・挿入順、Object の属性読み書き）の検証
// 意図: キーワード引数マージ相当の上書き規則と属性ヘルパの往復が回帰しないようにする
// 関連ファイル: src/value.rs, tests/test_support.rs
#[path = "test_support.rs"]
mod support;

use pyrt::{eq, stringify, Mapping, ObjectCell, Value};
use support::{assert_num, num, s};

#[test]
/// マージは既存キーを位置を保ったまま上書きし、新規キーを末尾へ足す。
fn merge_overwrites_in_place_and_appends_new_keys() {
    let mut dst = Mapping::new();
    dst.insert("a", num(1.0));
    dst.insert("b", num(2.0));

    let mut src = Mapping::new();
    src.insert("b", num(20.0));
    src.insert("c", num(3.0));
    dst.merge(&src);

    let keys: Vec<&str> = dst.keys().collect();
    assert_eq!(keys, ["a", "b", "c"], "overwritten key keeps its slot, new key appended");
    assert_num(dst.get("b").expect("merged key"), 20.0, "source value wins on collision");
    assert_num(dst.get("a").expect("untouched key"), 1.0, "unrelated keys untouched");
    assert_eq!(
        stringify(&Value::mapping(dst)),
        "{a: 1, b: 20, c: 3}",
        "merged mapping renders in insertion order"
    );
}

#[test]
fn merge_from_an_empty_source_is_a_no_op() {
    let mut dst = Mapping::new();
    dst.insert("a", num(1.0));
    dst.merge(&Mapping::new());
    assert_eq!(dst.len(), 1, "nothing added");
    assert!(
        eq(&Value::mapping(dst), &Value::mapping(Mapping::from_iter([("a".to_string(), num(1.0))]))),
        "contents unchanged"
    );
}

#[test]
/// 属性は書いた値がそのまま読め、上書きも観測できる。
fn object_attributes_round_trip() {
    let cell = ObjectCell::new();
    assert!(cell.get_attr("x").is_none(), "unset attribute reads as absent");

    cell.set_attr("x", num(2.0));
    cell.set_attr("name", s("point"));
    assert_num(&cell.get_attr("x").expect("attr x"), 2.0, "read back what was written");

    cell.set_attr("x", num(9.0));
    assert_num(&cell.get_attr("x").expect("attr x"), 9.0, "overwrite is observable");

    assert_eq!(
        stringify(&Value::object(cell)),
        "{x: 9, name: point}",
        "overwritten attribute keeps its insertion slot"
    );
}

#[test]
fn attributes_are_shared_through_aliases() {
    let obj = Value::object(ObjectCell::new());
    let alias = obj.clone();
    if let Value::Object(cell) = &obj {
        cell.set_attr("flag", Value::Bool(true));
    }
    match &alias {
        Value::Object(cell) => {
            let flag = cell.get_attr("flag").expect("attr via alias");
            assert!(eq(&flag, &Value::Bool(true)), "alias observes the write");
        }
        other => panic!("expected Object, got {other:?}"),
    }
}
