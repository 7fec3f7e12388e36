// パス: src/ops.rs
// 役割: 真偽値化・算術・連結・等価比較の演算子ディスパッチを実装する
// 意図: 変換元言語の演算子規則（型ごとの組合せ表）をタグ照合で忠実に再現する
// 関連ファイル: src/value.rs, src/fault.rs, src/seq.rs
//! 演算子モジュール
//!
//! - ディスパッチは `classify` のタグで行い、全組合せを網羅的に照合する。
//! - List と Tuple は形が同じでも互換ではない。混在オペランドは常に型フォールト。
//!   （元実装の厳格な拒否をそのまま保存する。暗黙の昇格は行わない。）

use std::rc::Rc;

use crate::fault::{Fault, RtResult};
use crate::value::{classify, Mapping, Tag, Value};

/// 条件文脈での真偽値化。全域で失敗しない。
///
/// None・False・数値ゼロ・空の Str/List/Tuple は偽。
/// Mapping と Object は空でも常に真。
pub fn truthy(v: &Value) -> bool {
    match v {
        Value::None => false,
        Value::Bool(b) => *b,
        Value::Number(n) => *n != 0.0,
        Value::Str(s) => !s.is_empty(),
        Value::List(items) => !items.borrow().is_empty(),
        Value::Tuple(items) => !items.is_empty(),
        Value::Mapping(_) | Value::Fault(_) | Value::Object(_) => true,
    }
}

fn binop_fault(op: &str, a: &Value, b: &Value) -> Fault {
    Fault::type_error(format!(
        "unsupported operand type(s) for {op}: {} and {}",
        classify(a).name(),
        classify(b).name()
    ))
}

/// 加算・連結。同種の組合せのみ許す。
pub fn add(a: &Value, b: &Value) -> RtResult<Value> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => Ok(Value::Number(x + y)),
        (Value::Str(x), Value::Str(y)) => {
            let mut out = String::with_capacity(x.len() + y.len());
            out.push_str(x);
            out.push_str(y);
            Ok(Value::Str(out))
        }
        (Value::List(x), Value::List(y)) => {
            let mut out = x.borrow().clone();
            out.extend(y.borrow().iter().cloned());
            Ok(Value::list(out))
        }
        (Value::Tuple(x), Value::Tuple(y)) => {
            let mut out = x.as_ref().clone();
            out.extend(y.iter().cloned());
            Ok(Value::tuple(out))
        }
        (Value::Str(_), _) | (_, Value::Str(_)) => {
            Err(Fault::type_error("can only concatenate str with str"))
        }
        _ => Err(binop_fault("+", a, b)),
    }
}

/// 減算。数値同士のみ。
pub fn sub(a: &Value, b: &Value) -> RtResult<Value> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => Ok(Value::Number(x - y)),
        _ => Err(binop_fault("-", a, b)),
    }
}

/// 列の反復回数。整数でなければ型フォールト、負数は 0 回扱い。
fn repeat_count(n: &Value, seq_tag: Tag) -> RtResult<usize> {
    match n.as_int() {
        Some(count) => Ok(count.max(0) as usize),
        None => Err(Fault::type_error(format!(
            "can't multiply {} by non-integer",
            seq_tag.name()
        ))),
    }
}

fn repeat_items(items: &[Value], count: usize) -> Vec<Value> {
    let mut out = Vec::with_capacity(items.len() * count);
    for _ in 0..count {
        out.extend(items.iter().cloned());
    }
    out
}

/// 乗算・反復。数値×数値のほか、Str/List/Tuple と整数の反復を許す。
pub fn mul(a: &Value, b: &Value) -> RtResult<Value> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => Ok(Value::Number(x * y)),
        (Value::Str(s), n @ Value::Number(_)) | (n @ Value::Number(_), Value::Str(s)) => {
            let count = repeat_count(n, Tag::Str)?;
            Ok(Value::Str(s.repeat(count)))
        }
        (Value::List(items), n @ Value::Number(_)) | (n @ Value::Number(_), Value::List(items)) => {
            let count = repeat_count(n, Tag::List)?;
            Ok(Value::list(repeat_items(&items.borrow(), count)))
        }
        (Value::Tuple(items), n @ Value::Number(_)) | (n @ Value::Number(_), Value::Tuple(items)) => {
            let count = repeat_count(n, Tag::Tuple)?;
            Ok(Value::tuple(repeat_items(items, count)))
        }
        _ => Err(binop_fault("*", a, b)),
    }
}

/// 負の無限大方向へ丸める除算。ゼロ方向ではない。
///
/// 負の商には微小イプシロンを挟んでから floor する。浮動小数点誤差で
/// 「ちょうど負の整数」の商が 1 つ余計に下がってはならない。
pub fn floor_div(a: &Value, b: &Value) -> RtResult<Value> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let q = x / y;
            let rounded = if q >= 0.0 { q.floor() } else { (q + 1e-15).floor() };
            Ok(Value::Number(rounded))
        }
        _ => Err(binop_fault("//", a, b)),
    }
}

fn seq_eq(a: &[Value], b: &[Value]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| eq(x, y))
}

fn mapping_eq(a: &Mapping, b: &Mapping) -> bool {
    // キー集合は順序非依存で比較し、値は再帰的に比較する。
    if a.len() != b.len() {
        return false;
    }
    a.iter().all(|(key, value)| match b.get(key) {
        Some(other) => eq(value, other),
        None => false,
    })
}

/// 構造的等価比較。全域で失敗しない。
///
/// 同一セルを指す List/Mapping/Object は即座に等しい。
/// List と Tuple のタグ違い比較は常に偽。プリミティブの型違いも常に偽。
pub fn eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::None, Value::None) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::Str(x), Value::Str(y)) => x == y,
        (Value::List(x), Value::List(y)) => {
            Rc::ptr_eq(x, y) || seq_eq(&x.borrow(), &y.borrow())
        }
        (Value::Tuple(x), Value::Tuple(y)) => Rc::ptr_eq(x, y) || seq_eq(x, y),
        (Value::Mapping(x), Value::Mapping(y)) => {
            Rc::ptr_eq(x, y) || mapping_eq(&x.borrow(), &y.borrow())
        }
        (Value::Fault(x), Value::Fault(y)) => {
            Rc::ptr_eq(x, y) || (x.kind == y.kind && x.message == y.message)
        }
        (Value::Object(x), Value::Object(y)) => {
            Rc::ptr_eq(x, y) || mapping_eq(&x.fields_snapshot(), &y.fields_snapshot())
        }
        _ => false,
    }
}
