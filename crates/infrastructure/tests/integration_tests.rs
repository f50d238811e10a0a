//! DynamoDB Local を使った統合テスト
//!
//! 実行例:
//! DYNAMODB_ENDPOINT=http://localhost:8000 cargo test -p infrastructure -- --ignored

use aws_sdk_dynamodb::types::{
    AttributeDefinition, AttributeValue, BillingMode, KeySchemaElement, KeyType,
    ScalarAttributeType,
};
use domain::{CreateTodoRequest, TodoItem};
use infrastructure::{
    todo_item_from_attributes, DynamoDbClient, DynamoDbTodoRepository, TodoRepository, ATTR_ID,
};
use serde_json::json;
use shared::Config;

/// 統合テスト用のセットアップ（テスト毎に専用テーブルを作成）
async fn setup_test_table() -> DynamoDbClient {
    let endpoint =
        std::env::var("DYNAMODB_ENDPOINT").unwrap_or_else(|_| "http://localhost:8000".to_string());
    let table_name = format!("todos_test_{}", uuid::Uuid::new_v4().simple());
    let config = Config::new(table_name.clone()).with_endpoint(endpoint);

    let db = DynamoDbClient::new(&config).await;

    db.client()
        .create_table()
        .table_name(&table_name)
        .attribute_definitions(
            AttributeDefinition::builder()
                .attribute_name(ATTR_ID)
                .attribute_type(ScalarAttributeType::S)
                .build()
                .expect("属性定義の作成に失敗"),
        )
        .key_schema(
            KeySchemaElement::builder()
                .attribute_name(ATTR_ID)
                .key_type(KeyType::Hash)
                .build()
                .expect("キースキーマの作成に失敗"),
        )
        .billing_mode(BillingMode::PayPerRequest)
        .send()
        .await
        .expect("テスト用テーブルの作成に失敗");

    db
}

async fn fetch(db: &DynamoDbClient, id: &str) -> Option<TodoItem> {
    let output = db
        .client()
        .get_item()
        .table_name(db.table_name().expect("テーブル名が必要"))
        .key(ATTR_ID, AttributeValue::S(id.to_string()))
        .consistent_read(true)
        .send()
        .await
        .expect("GetItem に失敗");

    output
        .item()
        .map(|attrs| todo_item_from_attributes(attrs).expect("アイテムの復元に失敗"))
}

#[tokio::test]
#[ignore = "requires DynamoDB Local"]
async fn test_put_persists_item() {
    let db = setup_test_table().await;
    let repo = DynamoDbTodoRepository::new(db.clone());

    let item = TodoItem::new(CreateTodoRequest {
        task: Some(json!("buy milk")),
    });
    repo.put(&item).await.expect("PutItem に失敗");

    assert_eq!(fetch(&db, &item.id.to_string()).await, Some(item));
}

#[tokio::test]
#[ignore = "requires DynamoDB Local"]
async fn test_put_without_task_stores_null() {
    let db = setup_test_table().await;
    let repo = DynamoDbTodoRepository::new(db.clone());

    let item = TodoItem::new(CreateTodoRequest::default());
    repo.put(&item).await.expect("PutItem に失敗");

    let stored = fetch(&db, &item.id.to_string()).await.expect("アイテムが存在しない");
    assert!(stored.task.is_none());
}

#[tokio::test]
#[ignore = "requires DynamoDB Local"]
async fn test_put_keeps_structured_task() {
    let db = setup_test_table().await;
    let repo = DynamoDbTodoRepository::new(db.clone());

    let item = TodoItem::new(CreateTodoRequest {
        task: Some(json!({"title": "buy milk", "count": 2, "tags": ["shop", null]})),
    });
    repo.put(&item).await.expect("PutItem に失敗");

    assert_eq!(fetch(&db, &item.id.to_string()).await, Some(item));
}

#[tokio::test]
#[ignore = "requires DynamoDB Local"]
async fn test_put_to_missing_table_fails() {
    let endpoint =
        std::env::var("DYNAMODB_ENDPOINT").unwrap_or_else(|_| "http://localhost:8000".to_string());
    let config = Config::new("table_that_does_not_exist").with_endpoint(endpoint);
    let repo = DynamoDbTodoRepository::new(DynamoDbClient::new(&config).await);

    let item = TodoItem::new(CreateTodoRequest {
        task: Some(json!("buy milk")),
    });
    let error = repo.put(&item).await.expect_err("存在しないテーブルへの書き込みは失敗する");

    assert!(error.to_string().contains("DynamoDB error"));
}
