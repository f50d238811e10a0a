use crate::errors::DomainError;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

/// ToDo アイテムの識別子（UUID v4）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(Uuid);

impl TodoId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(id: &str) -> Result<Self, DomainError> {
        Uuid::parse_str(id)
            .map(Self)
            .map_err(|e| DomainError::InvalidTodoId(format!("{id}: {e}")))
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // ハイフン区切りの小文字表現
        write!(f, "{}", self.0.hyphenated())
    }
}

/// ToDo作成リクエストのボディ
///
/// `task` は受け取った JSON 値をそのまま保持する（型変換、トリム、長さ制限は行わない）。
/// キーが存在しない場合や `null` の場合は `None` になる。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTodoRequest {
    #[serde(default)]
    pub task: Option<Value>,
}

/// 永続化される ToDo アイテム
///
/// 作成時に `id` と `created_at` はサーバー側で生成され、`completed` は常に `false`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: TodoId,
    pub task: Option<Value>,
    pub completed: bool,
    #[serde(with = "iso8601_millis")]
    pub created_at: DateTime<Utc>,
}

impl TodoItem {
    /// リクエストから新しい ToDo アイテムを生成
    ///
    /// 作成時刻は保存形式に合わせてミリ秒に切り詰める。
    pub fn new(request: CreateTodoRequest) -> Self {
        Self::new_at(request, Utc::now().trunc_subsecs(3))
    }

    /// 作成時刻を指定して生成
    pub fn new_at(request: CreateTodoRequest, created_at: DateTime<Utc>) -> Self {
        Self {
            id: TodoId::new(),
            task: request.task,
            completed: false,
            created_at,
        }
    }

    /// `createdAt` の ISO-8601 表現（ミリ秒精度、`Z` サフィックス）
    pub fn created_at_iso(&self) -> String {
        iso8601_millis::format(&self.created_at)
    }

    /// レスポンス用の JSON 表現
    ///
    /// シリアライズと同じ形だが失敗しない。
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("id".to_string(), Value::String(self.id.to_string()));
        map.insert("task".to_string(), self.task.clone().unwrap_or(Value::Null));
        map.insert("completed".to_string(), Value::Bool(self.completed));
        map.insert("createdAt".to_string(), Value::String(self.created_at_iso()));
        Value::Object(map)
    }
}

/// `DateTime<Utc>` を `2024-01-02T03:04:05.678Z` 形式で読み書きする
pub mod iso8601_millis {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn format(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
