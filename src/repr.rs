// パス: src/repr.rs
// 役割: 値の再帰的な文字列化と print を実装する
// 意図: 表現フックの失敗を飲み込み、印字そのものが落ちないことを保証する
// 関連ファイル: src/value.rs, src/seq.rs, src/methods.rs
//! 表現モジュール
//!
//! - `stringify` は全域。フックの失敗だけは黙って既定表示へ戻す
//!   （この層で唯一の意図的な握り潰し）。
//! - `print` はテスト向けにスレッドローカルの捕捉チャネルを持つ。

use std::cell::RefCell;

use crate::value::{Mapping, Value};

thread_local! {
    static PRINT_CAPTURE: RefCell<Option<Vec<String>>> = const { RefCell::new(None) };
}

/// 数値の表示形。有限の整数値は小数部なしで描く。
fn fmt_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n.fract() == 0.0 && n.abs() < 9.007_199_254_740_992e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

fn fmt_mapping(map: &Mapping) -> String {
    let parts: Vec<String> = map
        .iter()
        .map(|(k, v)| format!("{k}: {}", stringify(v)))
        .collect();
    format!("{{{}}}", parts.join(", "))
}

/// 値を表示用文字列へ再帰的に変換する。失敗しない。
pub fn stringify(v: &Value) -> String {
    match v {
        Value::None => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => fmt_number(*n),
        Value::Str(s) => s.clone(),
        Value::Fault(fault) => format!("{}: {}", fault.kind, fault.message),
        Value::Tuple(items) => {
            let parts: Vec<String> = items.iter().map(stringify).collect();
            if parts.len() == 1 {
                format!("({},)", parts[0])
            } else {
                format!("({})", parts.join(", "))
            }
        }
        Value::List(items) => {
            let parts: Vec<String> = items.borrow().iter().map(stringify).collect();
            format!("[{}]", parts.join(", "))
        }
        Value::Mapping(map) => fmt_mapping(&map.borrow()),
        Value::Object(cell) => {
            if let Some(hook) = cell.repr_hook() {
                // フックの失敗は既定表示へ戻す。印字で落とさない。
                if let Ok(result) = hook(&[]) {
                    return match result {
                        Value::Str(s) => s,
                        other => stringify(&other),
                    };
                }
            }
            fmt_mapping(&cell.fields_snapshot())
        }
    }
}

/// 全引数を文字列化し、単一スペースで結合して 1 行出力する。
pub fn print(args: &[Value]) {
    let line = args.iter().map(stringify).collect::<Vec<_>>().join(" ");
    let captured = PRINT_CAPTURE.with(|cell| {
        let mut slot = cell.borrow_mut();
        match slot.as_mut() {
            Some(lines) => {
                lines.push(line.clone());
                true
            }
            None => false,
        }
    });
    if !captured {
        println!("{line}");
    }
}

/// print の捕捉を開始する。テスト用。
pub fn begin_print_capture() {
    PRINT_CAPTURE.with(|cell| *cell.borrow_mut() = Some(Vec::new()));
}

/// 捕捉を終了し、溜まった行を返す。
pub fn end_print_capture() -> Vec<String> {
    PRINT_CAPTURE.with(|cell| cell.borrow_mut().take().unwrap_or_default())
}
