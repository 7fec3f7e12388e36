// パス: src/ctx.rs
// 役割: コンテキストマネージャの開始・終了フック呼び出しを実装する
// 意図: 型検査ではなく capability 検査で対を要求し、teardown の呼び出し点を提供する
// 関連ファイル: src/value.rs, src/fault.rs
//! コンテキストマネージャモジュール
//!
//! - `enter` は開始・終了フックの両方を要求する。片方でも欠ければ型フォールト。
//! - `exit` は「保留例外なし」の固定三つ組でフックを呼ぶ。フック自身の
//!   フォールトはそのまま呼び出し側へ伝播する。
//! - 管理ブロックが失敗しても teardown が走る保証はこの層には無い。
//!   呼び出し側（生成コード）がスコープ脱出構文で `exit` を包む。

use crate::fault::{Fault, RtResult};
use crate::value::Value;

fn capability_fault() -> Fault {
    Fault::type_error("context manager requires __enter__ and __exit__")
}

/// 開始フックを呼び、その結果を返す。
pub fn enter(mgr: &Value) -> RtResult<Value> {
    match mgr {
        Value::Object(cell) => {
            // 対になる teardown が無い setup は受け付けない。
            if cell.exit_hook().is_none() {
                return Err(capability_fault());
            }
            let hook = cell.enter_hook().ok_or_else(capability_fault)?;
            hook(&[])
        }
        _ => Err(capability_fault()),
    }
}

/// 終了フックを固定の (None, None, None) で呼ぶ。
pub fn exit(mgr: &Value) -> RtResult<Value> {
    match mgr {
        Value::Object(cell) => {
            let hook = cell.exit_hook().ok_or_else(capability_fault)?;
            hook(&[Value::None, Value::None, Value::None])?;
            Ok(Value::None)
        }
        _ => Err(capability_fault()),
    }
}
