// パス: src/fault.rs
// 役割: 型付きフォールトの構築・ラップ・名前照合を提供する
// 意図: 変換元言語の例外を「正確な種別名 + 汎用 catch-all」の二段階へ平坦化して扱う
// 関連ファイル: src/value.rs, src/ops.rs, src/seq.rs
//! フォールトモジュール
//!
//! - 例外階層は再構築しない。照合は種別名の完全一致か catch-all のみ。
//! - すべての失敗操作は `RtResult` を返し、生成コードは `?` で伝播する。

use std::error::Error as StdError;

use thiserror::Error;

use crate::value::Value;

/// 既知のフォールト種別名。生成コードはこの識別子で照合する。
pub mod kind {
    pub const TYPE_ERROR: &str = "TypeError";
    pub const VALUE_ERROR: &str = "ValueError";
    pub const INDEX_ERROR: &str = "IndexError";
    pub const KEY_ERROR: &str = "KeyError";
    /// 全種別に一致する catch-all 識別子。
    pub const EXCEPTION: &str = "Exception";
}

/// 型付きフォールト。種別名はそのまま照合対象になる。
#[derive(Clone, Debug, Error)]
#[error("{kind}: {message}")]
pub struct Fault {
    pub kind: String,
    pub message: String,
    pub trace: Option<String>,
}

/// ランタイム操作の結果型。
pub type RtResult<T> = Result<T, Fault>;

impl Fault {
    /// 種別とメッセージからフォールトを作る。
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            trace: None,
        }
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new(kind::TYPE_ERROR, message)
    }

    pub fn value_error(message: impl Into<String>) -> Self {
        Self::new(kind::VALUE_ERROR, message)
    }

    pub fn index_error(message: impl Into<String>) -> Self {
        Self::new(kind::INDEX_ERROR, message)
    }

    pub fn key_error(message: impl Into<String>) -> Self {
        Self::new(kind::KEY_ERROR, message)
    }

    /// 捕捉済みの発生元トレースを添える。
    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = Some(trace.into());
        self
    }

    /// 種別名と照合する。catch-all 名は常に一致する。
    pub fn matches(&self, kind_name: &str) -> bool {
        self.kind == kind_name || kind_name == kind::EXCEPTION
    }
}

/// フォールトを構築して即座に失敗させる。生成コードの `raise` 文が呼ぶ。
pub fn raise(kind: &str, message: &str) -> RtResult<Value> {
    Err(Fault::new(kind, message))
}

/// ホスト側の不透明なエラーをフォールトへ包む。冪等。
///
/// 既にフォールトならそのまま返し、それ以外は catch-all 種別で
/// 説明文をメッセージとして引き継ぐ。原因連鎖があればトレースとして保存する。
pub fn wrap(err: Box<dyn StdError>) -> Fault {
    match err.downcast::<Fault>() {
        Ok(fault) => *fault,
        Err(other) => {
            let mut frames = Vec::new();
            let mut cause = other.source();
            while let Some(err) = cause {
                frames.push(err.to_string());
                cause = err.source();
            }
            let fault = Fault::new(kind::EXCEPTION, other.to_string());
            if frames.is_empty() {
                fault
            } else {
                fault.with_trace(frames.join("\n"))
            }
        }
    }
}

/// except 節の照合。フォールトが無ければ常に不一致。
pub fn matches(fault: Option<&Fault>, kind_name: &str) -> bool {
    fault.is_some_and(|f| f.matches(kind_name))
}
