// パス: src/seq.rs
// 役割: 長さ・添字・スライス・包含・反復・展開の列プロトコルを実装する
// 意図: 変換元言語の添字正規化とスライス規則（方向依存の既定値と clamp）を保存する
// 関連ファイル: src/value.rs, src/fault.rs, src/repr.rs
//! 列プロトコルモジュール
//!
//! - 添字は整数のみ。負の添字は長さを足して巻き戻す。
//! - スライスの既定境界は step の符号で変わり、明示された負値だけが巻き戻される。
//! - 反復は有限で再開可能なスナップショットを返す。ライブビューではない。

use crate::fault::{Fault, RtResult};
use crate::repr::stringify;
use crate::value::{classify, Value};

/// Mapping のキー正規化。文字列以外は表現文字列へ強制する。
pub(crate) fn mapping_key(key: &Value) -> String {
    match key {
        Value::Str(s) => s.clone(),
        other => stringify(other),
    }
}

fn not_subscriptable(v: &Value) -> Fault {
    Fault::type_error(format!(
        "'{}' object is not subscriptable",
        classify(v).name()
    ))
}

/// 要素数・文字数・キー数を数える。
pub fn length(v: &Value) -> RtResult<Value> {
    let n = raw_len(v).ok_or_else(|| {
        Fault::type_error(format!(
            "object of type '{}' has no len()",
            classify(v).name()
        ))
    })?;
    Ok(Value::Number(n as f64))
}

fn raw_len(v: &Value) -> Option<usize> {
    match v {
        Value::List(items) => Some(items.borrow().len()),
        Value::Tuple(items) => Some(items.len()),
        Value::Str(s) => Some(s.chars().count()),
        Value::Mapping(map) => Some(map.borrow().len()),
        _ => None,
    }
}

/// 負の添字を巻き戻し、範囲内なら usize で返す。
fn normalize_index(key: &Value, len: usize) -> RtResult<usize> {
    let mut idx = key
        .as_int()
        .ok_or_else(|| Fault::type_error("indices must be integers"))?;
    if idx < 0 {
        idx += len as i64;
    }
    if idx < 0 || idx >= len as i64 {
        return Err(Fault::index_error("index out of range"));
    }
    Ok(idx as usize)
}

/// 添字アクセス。List/Tuple/Str は整数添字、Mapping は文字列強制キー。
pub fn get_item(container: &Value, key: &Value) -> RtResult<Value> {
    match container {
        Value::List(items) => {
            let items = items.borrow();
            let idx = normalize_index(key, items.len())?;
            Ok(items[idx].clone())
        }
        Value::Tuple(items) => {
            let idx = normalize_index(key, items.len())?;
            Ok(items[idx].clone())
        }
        Value::Str(s) => {
            let chars: Vec<char> = s.chars().collect();
            let idx = normalize_index(key, chars.len())?;
            Ok(Value::Str(chars[idx].to_string()))
        }
        Value::Mapping(map) => {
            let k = mapping_key(key);
            map.borrow()
                .get(&k)
                .cloned()
                .ok_or_else(|| Fault::key_error(k))
        }
        other => Err(not_subscriptable(other)),
    }
}

/// 添字への代入。List は in-place 格納、Mapping は挿入。Tuple は不変。
pub fn set_item(container: &Value, key: &Value, value: Value) -> RtResult<Value> {
    match container {
        Value::List(items) => {
            let mut items = items.borrow_mut();
            let len = items.len();
            let idx = normalize_index(key, len)?;
            items[idx] = value;
            Ok(Value::None)
        }
        Value::Mapping(map) => {
            map.borrow_mut().insert(mapping_key(key), value);
            Ok(Value::None)
        }
        Value::Tuple(_) => Err(Fault::type_error(
            "'tuple' object does not support item assignment",
        )),
        other => Err(not_subscriptable(other)),
    }
}

/// 包含判定。全域で失敗せず、対象外の容器では偽を返す。
pub fn contains(value: &Value, container: &Value) -> bool {
    match container {
        Value::List(items) => items.borrow().iter().any(|item| crate::ops::eq(item, value)),
        Value::Tuple(items) => items.iter().any(|item| crate::ops::eq(item, value)),
        Value::Str(s) => match value {
            Value::Str(probe) => s.contains(probe.as_str()),
            _ => false,
        },
        Value::Mapping(map) => map.borrow().contains_key(&mapping_key(value)),
        _ => false,
    }
}

/// 反復スナップショット。要素列・一文字ずつの Str・挿入順キーのいずれか。
pub fn iterate(container: &Value) -> RtResult<Vec<Value>> {
    match container {
        Value::List(items) => Ok(items.borrow().clone()),
        Value::Tuple(items) => Ok(items.as_ref().clone()),
        Value::Str(s) => Ok(s.chars().map(|c| Value::Str(c.to_string())).collect()),
        Value::Mapping(map) => Ok(map
            .borrow()
            .keys()
            .map(|k| Value::Str(k.to_string()))
            .collect()),
        other => Err(Fault::type_error(format!(
            "'{}' object is not iterable",
            classify(other).name()
        ))),
    }
}

/// 多重代入の展開用に平坦な列へ強制する。List/Tuple/Str のみ。
pub fn to_sequence(v: &Value) -> RtResult<Vec<Value>> {
    match v {
        Value::List(_) | Value::Tuple(_) | Value::Str(_) => iterate(v),
        _ => Err(Fault::type_error("can only unpack list, tuple, or str")),
    }
}

fn slice_bound(bound: Option<&Value>) -> RtResult<Option<i64>> {
    match bound {
        None => Ok(None),
        Some(v) => v
            .as_int()
            .map(Some)
            .ok_or_else(|| Fault::type_error("slice indices must be integers or None")),
    }
}

/// スライスの添字列を計算する。
///
/// 既定境界は step の符号で決まる。明示された負の境界だけが長さを足して
/// 巻き戻され、既定のセンチネル値は巻き戻されない。境界は `[-1, len]` へ
/// clamp し、歩いた先で範囲外になった添字は黙って読み飛ばす。
fn slice_indices(len: i64, start: Option<i64>, stop: Option<i64>, step: i64) -> Vec<usize> {
    let mut lo = match start {
        Some(s) if s < 0 => s + len,
        Some(s) => s,
        None if step > 0 => 0,
        None => len - 1,
    };
    let mut hi = match stop {
        Some(s) if s < 0 => s + len,
        Some(s) => s,
        None if step > 0 => len,
        None => -1,
    };
    lo = lo.clamp(-1, len);
    hi = hi.clamp(-1, len);
    let mut out = Vec::new();
    let mut i = lo;
    if step > 0 {
        while i < hi {
            if (0..len).contains(&i) {
                out.push(i as usize);
            }
            i += step;
        }
    } else {
        while i > hi {
            if (0..len).contains(&i) {
                out.push(i as usize);
            }
            i += step;
        }
    }
    out
}

/// スライス。結果は入力と同じ容器種別で再構築される。
pub fn slice(
    seq: &Value,
    start: Option<&Value>,
    stop: Option<&Value>,
    step: Option<&Value>,
) -> RtResult<Value> {
    let step = match step {
        None => 1,
        Some(v) => v
            .as_int()
            .ok_or_else(|| Fault::type_error("slice step must be an integer"))?,
    };
    if step == 0 {
        return Err(Fault::value_error("slice step cannot be zero"));
    }
    let start = slice_bound(start)?;
    let stop = slice_bound(stop)?;
    match seq {
        Value::List(items) => {
            let items = items.borrow();
            let picked = slice_indices(items.len() as i64, start, stop, step)
                .into_iter()
                .map(|i| items[i].clone())
                .collect();
            Ok(Value::list(picked))
        }
        Value::Tuple(items) => {
            let picked = slice_indices(items.len() as i64, start, stop, step)
                .into_iter()
                .map(|i| items[i].clone())
                .collect();
            Ok(Value::tuple(picked))
        }
        Value::Str(s) => {
            let chars: Vec<char> = s.chars().collect();
            let picked: String = slice_indices(chars.len() as i64, start, stop, step)
                .into_iter()
                .map(|i| chars[i])
                .collect();
            Ok(Value::Str(picked))
        }
        other => Err(Fault::type_error(format!(
            "'{}' object is not sliceable",
            classify(other).name()
        ))),
    }
}

/// 整数列を生成する。一引数形式は 0 から数える。
pub fn range(start: &Value, stop: Option<&Value>, step: Option<&Value>) -> RtResult<Value> {
    let first = start
        .as_int()
        .ok_or_else(|| Fault::type_error("range() arguments must be integers"))?;
    let (lo, hi) = match stop {
        Some(v) => (
            first,
            v.as_int()
                .ok_or_else(|| Fault::type_error("range() arguments must be integers"))?,
        ),
        None => (0, first),
    };
    let step = match step {
        None => 1,
        Some(v) => v
            .as_int()
            .ok_or_else(|| Fault::type_error("range() arguments must be integers"))?,
    };
    if step == 0 {
        return Err(Fault::value_error("range() arg 3 must not be zero"));
    }
    let mut out = Vec::new();
    let mut i = lo;
    if step > 0 {
        while i < hi {
            out.push(Value::Number(i as f64));
            i += step;
        }
    } else {
        while i > hi {
            out.push(Value::Number(i as f64));
            i += step;
        }
    }
    Ok(Value::list(out))
}
