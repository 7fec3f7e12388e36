// パス: src/value.rs
// 役割: ランタイム値 Value と分類タグ、共有セル、属性付きオブジェクトを定義する
// 意図: 生成コードが扱う動的値を閉じた直和型として表現し、全ディスパッチを網羅的にする
// 関連ファイル: src/fault.rs, src/ops.rs, src/seq.rs
//! 値モデルモジュール
//!
//! - `Value` は変換元言語の動的値を表す閉じた列挙型。
//! - List は共有セル越しに in-place 変更され、エイリアスから観測できる。
//! - Tuple は不変。「変更」する操作は常に新しい値を作る。
//! - Mapping は挿入順を保持する文字列キーのマップ。
//! - Object は明示的な capability フィールド（repr/enter/exit フック）を持ち、
//!   リフレクションによるフック探索は行わない。

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::fault::{Fault, RtResult};

/// 共有リストセル。エイリアスされた束縛は同じ backing storage を観測する。
pub type ListRef = Rc<RefCell<Vec<Value>>>;
/// 共有マッピングセル。
pub type MappingRef = Rc<RefCell<Mapping>>;
/// オブジェクトのフック。引数列を受け取り値かフォールトを返す。
pub type Hook = Rc<dyn Fn(&[Value]) -> RtResult<Value>>;

/// ランタイムが操作する値の閉じた直和型。
#[derive(Clone, Debug)]
pub enum Value {
    None,
    Bool(bool),
    Number(f64),
    Str(String),
    List(ListRef),
    Tuple(Rc<Vec<Value>>),
    Mapping(MappingRef),
    Fault(Rc<Fault>),
    Object(Rc<ObjectCell>),
}

/// `classify` が返す値タグ。List と Tuple は形が同じでもタグは別。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tag {
    None,
    Bool,
    Number,
    Str,
    List,
    Tuple,
    Mapping,
    Fault,
    Object,
}

impl Tag {
    /// フォールトメッセージで用いる識別子を返す。
    pub const fn name(self) -> &'static str {
        match self {
            Tag::None => "NoneType",
            Tag::Bool => "bool",
            Tag::Number => "number",
            Tag::Str => "str",
            Tag::List => "list",
            Tag::Tuple => "tuple",
            Tag::Mapping => "dict",
            Tag::Fault => "exception",
            Tag::Object => "object",
        }
    }
}

/// 任意の値をタグへ分類する。全域・副作用なし・失敗しない。
pub const fn classify(v: &Value) -> Tag {
    match v {
        Value::None => Tag::None,
        Value::Bool(_) => Tag::Bool,
        Value::Number(_) => Tag::Number,
        Value::Str(_) => Tag::Str,
        Value::List(_) => Tag::List,
        Value::Tuple(_) => Tag::Tuple,
        Value::Mapping(_) => Tag::Mapping,
        Value::Fault(_) => Tag::Fault,
        Value::Object(_) => Tag::Object,
    }
}

impl Value {
    /// 数値を作る。
    pub const fn number(n: f64) -> Self {
        Value::Number(n)
    }

    /// 文字列を作る。
    pub fn str(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    /// 要素列から新しい共有リストを作る。
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Rc::new(RefCell::new(items)))
    }

    /// 要素列からタプルを作る。
    pub fn tuple(items: Vec<Value>) -> Self {
        Value::Tuple(Rc::new(items))
    }

    /// マッピングを共有セルへ包んで作る。
    pub fn mapping(map: Mapping) -> Self {
        Value::Mapping(Rc::new(RefCell::new(map)))
    }

    /// オブジェクトセルを値へ包む。
    pub fn object(cell: ObjectCell) -> Self {
        Value::Object(Rc::new(cell))
    }

    /// フォールトを値として保持する（except 節の束縛用）。
    pub fn fault(fault: Fault) -> Self {
        Value::Fault(Rc::new(fault))
    }

    /// 整数とみなせる数値なら i64 として返す。
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Number(n) if n.fract() == 0.0 && n.is_finite() => Some(*n as i64),
            _ => None,
        }
    }
}

/// 挿入順を保持する文字列キーのマッピング。
///
/// コーパスに順序付きマップの crate が無いためペアのベクタで表現する。
/// `insert` は既存キーの位置を保ち、新規キーは末尾へ追加する。
#[derive(Clone, Debug, Default)]
pub struct Mapping {
    entries: Vec<(String, Value)>,
}

impl Mapping {
    /// 空のマッピングを作る。
    pub fn new() -> Self {
        Self::default()
    }

    /// キー数を返す。
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// キーに対応する値を返す。
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// キーの有無を返す。
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// 値を登録する。既存キーは位置を保ったまま上書きされる。
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// 挿入順のキー列を返す。
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// 挿入順の (キー, 値) 列を返す。
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// 別マッピングの全エントリを取り込む（キーワード引数マージ相当）。
    pub fn merge(&mut self, other: &Mapping) {
        for (k, v) in other.iter() {
            self.insert(k, v.clone());
        }
    }
}

impl FromIterator<(String, Value)> for Mapping {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        let mut map = Mapping::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// 属性と capability フックを持つ不透明オブジェクト。
///
/// フックは明示的なフィールドであり、属性テーブル越しには探索しない。
pub struct ObjectCell {
    fields: RefCell<Mapping>,
    repr_hook: Option<Hook>,
    enter_hook: Option<Hook>,
    exit_hook: Option<Hook>,
}

impl ObjectCell {
    /// 空のオブジェクトを作る。
    pub fn new() -> Self {
        Self {
            fields: RefCell::new(Mapping::new()),
            repr_hook: None,
            enter_hook: None,
            exit_hook: None,
        }
    }

    /// 表現フックを設定する。
    pub fn with_repr_hook(mut self, hook: Hook) -> Self {
        self.repr_hook = Some(hook);
        self
    }

    /// コンテキスト開始フックを設定する。
    pub fn with_enter_hook(mut self, hook: Hook) -> Self {
        self.enter_hook = Some(hook);
        self
    }

    /// コンテキスト終了フックを設定する。
    pub fn with_exit_hook(mut self, hook: Hook) -> Self {
        self.exit_hook = Some(hook);
        self
    }

    pub fn repr_hook(&self) -> Option<&Hook> {
        self.repr_hook.as_ref()
    }

    pub fn enter_hook(&self) -> Option<&Hook> {
        self.enter_hook.as_ref()
    }

    pub fn exit_hook(&self) -> Option<&Hook> {
        self.exit_hook.as_ref()
    }

    /// 属性を読む。
    pub fn get_attr(&self, name: &str) -> Option<Value> {
        self.fields.borrow().get(name).cloned()
    }

    /// 属性を書く。
    pub fn set_attr(&self, name: impl Into<String>, value: Value) {
        self.fields.borrow_mut().insert(name, value);
    }

    /// 属性マッピングの複製を返す（表示用スナップショット）。
    pub fn fields_snapshot(&self) -> Mapping {
        self.fields.borrow().clone()
    }
}

impl Default for ObjectCell {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ObjectCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectCell")
            .field("fields", &self.fields)
            .field("repr_hook", &self.repr_hook.is_some())
            .field("enter_hook", &self.enter_hook.is_some())
            .field("exit_hook", &self.exit_hook.is_some())
            .finish()
    }
}
