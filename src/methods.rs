// パス: src/methods.rs
// 役割: 文字列・リストの組込みメソッドと名前ディスパッチ表を実装する
// 意図: 各メソッドが参加値の型を前置検査し、暗黙の強制なしに契約違反を報告する
// 関連ファイル: src/value.rs, src/fault.rs, src/repr.rs
//! 組込みメソッドモジュール
//!
//! - 文字列メソッドは全参加値を先に検査し、違反したオペランドを名指しする。
//! - `append`/`pop` は List 専用。`append` は in-place 変更で値を返さない。
//! - `call_method` はメソッド名の静的表を引く動的ディスパッチ。受け手の型を
//!   静的に解決できない生成コードが利用する。

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::fault::{Fault, RtResult};
use crate::repr::stringify;
use crate::seq::to_sequence;
use crate::value::Value;

fn expect_str<'a>(v: &'a Value, what: &str) -> RtResult<&'a str> {
    match v {
        Value::Str(s) => Ok(s),
        _ => Err(Fault::type_error(format!("{what} must be str"))),
    }
}

/// 大文字化。
pub fn str_upper(s: &Value) -> RtResult<Value> {
    Ok(Value::Str(expect_str(s, "upper() arg")?.to_uppercase()))
}

/// 小文字化。
pub fn str_lower(s: &Value) -> RtResult<Value> {
    Ok(Value::Str(expect_str(s, "lower() arg")?.to_lowercase()))
}

/// 分割。
///
/// 区切り無しは両端を刈ってから空白の連続で割り、空や空白のみの入力は
/// 空リストになる。区切り有りはリテラル部分文字列で割り、空区切りは
/// 一文字ずつへ分解する。空セグメントは保存される。
pub fn str_split(s: &Value, sep: Option<&Value>) -> RtResult<Value> {
    let s = expect_str(s, "split() arg")?;
    let parts: Vec<Value> = match sep {
        None => s
            .split_whitespace()
            .map(|part| Value::Str(part.to_string()))
            .collect(),
        Some(sep) => {
            let sep = expect_str(sep, "sep")?;
            if sep.is_empty() {
                s.chars().map(|c| Value::Str(c.to_string())).collect()
            } else {
                s.split(sep).map(|part| Value::Str(part.to_string())).collect()
            }
        }
    };
    Ok(Value::list(parts))
}

/// 結合。区切りは文字列必須、要素は必要なら表現文字列へ変換する。
pub fn str_join(sep: &Value, iterable: &Value) -> RtResult<Value> {
    let sep = expect_str(sep, "sep")?;
    let items = to_sequence(iterable)?;
    let parts: Vec<String> = items
        .iter()
        .map(|item| match item {
            Value::Str(s) => s.clone(),
            other => stringify(other),
        })
        .collect();
    Ok(Value::Str(parts.join(sep)))
}

/// 前方一致判定。
pub fn str_startswith(s: &Value, prefix: &Value) -> RtResult<Value> {
    let s = expect_str(s, "startswith() arg")?;
    let prefix = expect_str(prefix, "startswith() prefix")?;
    Ok(Value::Bool(s.starts_with(prefix)))
}

/// 後方一致判定。
pub fn str_endswith(s: &Value, suffix: &Value) -> RtResult<Value> {
    let s = expect_str(s, "endswith() arg")?;
    let suffix = expect_str(suffix, "endswith() suffix")?;
    Ok(Value::Bool(s.ends_with(suffix)))
}

/// 全出現の置換。
pub fn str_replace(s: &Value, old: &Value, new: &Value) -> RtResult<Value> {
    let s = expect_str(s, "replace() arg")?;
    let old = expect_str(old, "replace() old")?;
    let new = expect_str(new, "replace() new")?;
    Ok(Value::Str(s.replace(old, new)))
}

/// 部分文字列の探索。見つかれば文字単位の添字、なければ -1。
pub fn str_find(s: &Value, sub: &Value) -> RtResult<Value> {
    let s = expect_str(s, "find() arg")?;
    let sub = expect_str(sub, "find() sub")?;
    let idx = match s.find(sub) {
        Some(byte_idx) => s[..byte_idx].chars().count() as f64,
        None => -1.0,
    };
    Ok(Value::Number(idx))
}

/// 末尾へ追加。List を in-place 変更し、値は返さない。
pub fn list_append(list: &Value, item: Value) -> RtResult<Value> {
    match list {
        Value::List(items) => {
            items.borrow_mut().push(item);
            Ok(Value::None)
        }
        _ => Err(Fault::type_error("append() on non-list")),
    }
}

/// 末尾を取り除いて返す。空リストは範囲外フォールト。
pub fn list_pop(list: &Value) -> RtResult<Value> {
    match list {
        Value::List(items) => items
            .borrow_mut()
            .pop()
            .ok_or_else(|| Fault::index_error("pop from empty list")),
        _ => Err(Fault::type_error("pop() on non-list")),
    }
}

/// メソッド表の 1 エントリ。引数個数は受け手を除いて数える。
pub struct MethodDef {
    pub name: &'static str,
    pub min_args: usize,
    pub max_args: usize,
    invoke: fn(&Value, &[Value]) -> RtResult<Value>,
}

/// 組込みメソッドの一覧。名前ディスパッチの唯一の情報源。
pub static METHODS: &[MethodDef] = &[
    MethodDef { name: "upper", min_args: 0, max_args: 0, invoke: |r, _| str_upper(r) },
    MethodDef { name: "lower", min_args: 0, max_args: 0, invoke: |r, _| str_lower(r) },
    MethodDef { name: "split", min_args: 0, max_args: 1, invoke: |r, a| str_split(r, a.first()) },
    MethodDef { name: "join", min_args: 1, max_args: 1, invoke: |r, a| str_join(r, &a[0]) },
    MethodDef { name: "startswith", min_args: 1, max_args: 1, invoke: |r, a| str_startswith(r, &a[0]) },
    MethodDef { name: "endswith", min_args: 1, max_args: 1, invoke: |r, a| str_endswith(r, &a[0]) },
    MethodDef { name: "replace", min_args: 2, max_args: 2, invoke: |r, a| str_replace(r, &a[0], &a[1]) },
    MethodDef { name: "find", min_args: 1, max_args: 1, invoke: |r, a| str_find(r, &a[0]) },
    MethodDef { name: "append", min_args: 1, max_args: 1, invoke: |r, a| list_append(r, a[0].clone()) },
    MethodDef { name: "pop", min_args: 0, max_args: 0, invoke: |r, _| list_pop(r) },
];

static METHOD_INDEX: Lazy<HashMap<&'static str, &'static MethodDef>> =
    Lazy::new(|| METHODS.iter().map(|def| (def.name, def)).collect());

/// 名前で組込みメソッドを呼び出す。
///
/// 未知の名前と引数個数の不一致は型フォールト。受け手の型検査は
/// 各メソッド本体が行う。
pub fn call_method(recv: &Value, name: &str, args: &[Value]) -> RtResult<Value> {
    let def = METHOD_INDEX
        .get(name)
        .ok_or_else(|| Fault::type_error(format!("unknown method '{name}'")))?;
    if args.len() < def.min_args || args.len() > def.max_args {
        return Err(Fault::type_error(format!(
            "{name}() takes {} to {} arguments but {} were given",
            def.min_args,
            def.max_args,
            args.len()
        )));
    }
    (def.invoke)(recv, args)
}
