use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, Utc};
use domain::{TodoError, TodoId, TodoItem};
use serde_json::{Map, Number, Value};
use std::collections::HashMap;

/// パーティションキー
pub const ATTR_ID: &str = "id";
pub const ATTR_TASK: &str = "task";
pub const ATTR_COMPLETED: &str = "completed";
pub const ATTR_CREATED_AT: &str = "createdAt";

/// ToDo アイテムを DynamoDB の属性マップに変換
///
/// `task` は受け取った JSON 値の型のまま保存し、無い場合は NULL 属性とする。
pub fn todo_item_to_attributes(item: &TodoItem) -> HashMap<String, AttributeValue> {
    let task = match &item.task {
        Some(task) => json_to_attribute(task),
        None => AttributeValue::Null(true),
    };

    HashMap::from([
        (ATTR_ID.to_string(), AttributeValue::S(item.id.to_string())),
        (ATTR_TASK.to_string(), task),
        (
            ATTR_COMPLETED.to_string(),
            AttributeValue::Bool(item.completed),
        ),
        (
            ATTR_CREATED_AT.to_string(),
            AttributeValue::S(item.created_at_iso()),
        ),
    ])
}

/// DynamoDB の属性マップから ToDo アイテムを復元
pub fn todo_item_from_attributes(
    attributes: &HashMap<String, AttributeValue>,
) -> Result<TodoItem, TodoError> {
    let id = string_attr(attributes, ATTR_ID)?;
    let id = TodoId::from_string(id)?;

    let task = match attributes.get(ATTR_TASK) {
        Some(AttributeValue::Null(_)) | None => None,
        Some(task) => Some(attribute_to_json(task)?),
    };

    let completed = attributes
        .get(ATTR_COMPLETED)
        .and_then(|v| v.as_bool().ok())
        .copied()
        .ok_or_else(|| TodoError::Internal(format!("{ATTR_COMPLETED} is missing")))?;

    let created_at = DateTime::parse_from_rfc3339(string_attr(attributes, ATTR_CREATED_AT)?)
        .map_err(|e| TodoError::Internal(format!("{ATTR_CREATED_AT}: {e}")))?
        .with_timezone(&Utc);

    Ok(TodoItem {
        id,
        task,
        completed,
        created_at,
    })
}

/// JSON 値を DynamoDB の属性値に変換（S / N / BOOL / NULL / L / M）
pub fn json_to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(values) => AttributeValue::L(values.iter().map(json_to_attribute).collect()),
        Value::Object(map) => AttributeValue::M(
            map.iter()
                .map(|(k, v)| (k.clone(), json_to_attribute(v)))
                .collect(),
        ),
    }
}

/// DynamoDB の属性値を JSON 値に戻す
///
/// セット型やバイナリは扱わない。
pub fn attribute_to_json(attribute: &AttributeValue) -> Result<Value, TodoError> {
    let value = match attribute {
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::N(n) => Value::Number(
            n.parse::<Number>()
                .map_err(|e| TodoError::Internal(format!("invalid number {n}: {e}")))?,
        ),
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::L(values) => Value::Array(
            values
                .iter()
                .map(attribute_to_json)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        AttributeValue::M(map) => Value::Object(
            map.iter()
                .map(|(k, v)| Ok((k.clone(), attribute_to_json(v)?)))
                .collect::<Result<Map<_, _>, TodoError>>()?,
        ),
        other => {
            return Err(TodoError::Internal(format!(
                "unsupported attribute type: {other:?}"
            )))
        }
    };

    Ok(value)
}

fn string_attr<'a>(
    attributes: &'a HashMap<String, AttributeValue>,
    name: &str,
) -> Result<&'a str, TodoError> {
    attributes
        .get(name)
        .and_then(|v| v.as_s().ok())
        .map(String::as_str)
        .ok_or_else(|| TodoError::Internal(format!("{name} is missing")))
}
