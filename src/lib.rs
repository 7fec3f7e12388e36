// パス: src/lib.rs
// 役割: Crate root wiring modules and exports
// 意図: Expose the runtime surface consumed by translator-generated code
// 関連ファイル: src/value.rs, src/ops.rs, src/seq.rs
//! py2rs ランタイム支援層 ルートモジュール
//!
//! 目的:
//! - 動的型付き言語を Rust へ落とす変換器のために、元言語の値モデル
//!   （演算子規則・列プロトコル・例外型付け・文字列化）を忠実に再現する。
//!
//! 方針:
//! - コメント/ドキュメントは日本語、識別子は英語。
//! - 失敗しうる操作はすべて `RtResult` を返し、生成コードは `?` で伝播する。
//! - この層は完全に同期・単一スレッド。唯一の in-place 変更は共有 List と
//!   Mapping のセル越しの書き込み。
//! - 再初期化の安全性はリンク構造で満たす。グローバルな可変レジストリを
//!   持たないため、重複インストールの問題は起き得ない。

pub mod ctx;
pub mod fault;
pub mod methods;
pub mod ops;
pub mod repr;
pub mod seq;
pub mod value;

// 便利な再エクスポート（生成コードが最短パスで届く範囲のみ）
pub use crate::fault::{kind, matches, raise, wrap, Fault, RtResult};
pub use crate::ops::{add, eq, floor_div, mul, sub, truthy};
pub use crate::repr::{print, stringify};
pub use crate::seq::{
    contains, get_item, iterate, length, range, set_item, slice, to_sequence,
};
pub use crate::value::{classify, Mapping, ObjectCell, Tag, Value};
