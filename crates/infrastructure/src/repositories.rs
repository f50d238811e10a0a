use crate::{todo_item_to_attributes, DynamoDbClient};
use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use domain::{TodoError, TodoId, TodoItem};
use shared::telemetry::trace_dynamodb_operation;
use std::collections::HashMap;
use std::sync::Mutex;

/// ToDo アイテムの保存先
///
/// 実装は DynamoDB（本番）とインメモリ（テスト用）。
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// アイテムを `id` をキーに保存する（既存は上書き）
    async fn put(&self, item: &TodoItem) -> Result<(), TodoError>;
}

pub struct DynamoDbTodoRepository {
    db: DynamoDbClient,
}

impl DynamoDbTodoRepository {
    pub fn new(db: DynamoDbClient) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TodoRepository for DynamoDbTodoRepository {
    async fn put(&self, item: &TodoItem) -> Result<(), TodoError> {
        let table_name = self
            .db
            .table_name()
            .ok_or_else(|| TodoError::Configuration("TABLE_NAME is not set".to_string()))?;

        let attributes = todo_item_to_attributes(item);

        trace_dynamodb_operation(table_name, "PutItem", || async {
            self.db
                .client()
                .put_item()
                .table_name(table_name)
                .set_item(Some(attributes))
                .send()
                .await
                .map(|_| ())
                .map_err(|e| TodoError::DynamoDb(DisplayErrorContext(&e).to_string()))
        })
        .await
    }
}

/// インメモリ実装
#[derive(Default)]
pub struct InMemoryTodoRepository {
    // put 呼び出しの履歴（テスト観測用）
    puts: Mutex<Vec<TodoItem>>,
    items: Mutex<HashMap<TodoId, TodoItem>>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// これまでに put されたアイテム（呼び出し順）
    pub fn puts(&self) -> Vec<TodoItem> {
        self.puts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.items
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn put(&self, item: &TodoItem) -> Result<(), TodoError> {
        self.puts
            .lock()
            .map_err(|_| TodoError::Internal("repository lock poisoned".to_string()))?
            .push(item.clone());

        self.items
            .lock()
            .map_err(|_| TodoError::Internal("repository lock poisoned".to_string()))?
            .insert(item.id, item.clone());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::config::{BehaviorVersion, Region};
    use domain::CreateTodoRequest;
    use serde_json::json;

    impl InMemoryTodoRepository {
        fn get(&self, id: &TodoId) -> Option<TodoItem> {
            self.items.lock().unwrap().get(id).cloned()
        }
    }

    fn item(task: &str) -> TodoItem {
        TodoItem::new(CreateTodoRequest {
            task: Some(json!(task)),
        })
    }

    /// ネットワークに接続しないクライアント
    fn offline_client() -> aws_sdk_dynamodb::Client {
        let config = aws_sdk_dynamodb::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("ap-northeast-1"))
            .build();
        aws_sdk_dynamodb::Client::from_conf(config)
    }

    #[tokio::test]
    async fn test_dynamodb_put_without_table_name_fails() {
        let repo = DynamoDbTodoRepository::new(DynamoDbClient::from_client(offline_client(), None));

        let result = repo.put(&item("buy milk")).await;
        assert!(matches!(result, Err(TodoError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_in_memory_put_records_items() {
        let repo = InMemoryTodoRepository::new();
        let first = item("buy milk");
        let second = item("buy milk");

        repo.put(&first).await.unwrap();
        repo.put(&second).await.unwrap();

        assert_eq!(repo.puts(), vec![first.clone(), second.clone()]);
        assert_eq!(repo.len(), 2);
        assert_eq!(repo.get(&first.id), Some(first));
    }

    #[tokio::test]
    async fn test_in_memory_put_replaces_same_id() {
        let repo = InMemoryTodoRepository::new();
        let original = item("before");
        let mut replaced = original.clone();
        replaced.task = Some(json!("after"));

        repo.put(&original).await.unwrap();
        repo.put(&replaced).await.unwrap();

        assert_eq!(repo.len(), 1);
        assert_eq!(repo.get(&original.id), Some(replaced));
        assert_eq!(repo.puts().len(), 2);
    }
}
