use infrastructure::{DynamoDbClient, DynamoDbTodoRepository};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use shared::{
    trace_lambda_handler, tracing::init_tracing, ApiGatewayProxyRequest, ApiGatewayProxyResponse,
    Config,
};
use std::sync::Arc;
use tracing::info;

mod handler;

use handler::CreateTodoHandler;

/// Lambda 呼び出し毎のエントリポイント
async fn function_handler(
    handler: &CreateTodoHandler,
    event: LambdaEvent<ApiGatewayProxyRequest>,
) -> Result<ApiGatewayProxyResponse, Error> {
    let (payload, context) = event.into_parts();

    trace_lambda_handler!(
        "create-todo",
        payload,
        context,
        |payload: ApiGatewayProxyRequest, _context| async move {
            let response = handler.handle(&payload).await;
            info!("create-todo完了: status={}", response.status_code);
            Ok::<_, Error>(response)
        }
    )
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    if let Err(e) = init_tracing() {
        eprintln!("トレーシング初期化エラー: {e}");
        // トレーシング初期化に失敗してもアプリケーションは継続
    }

    // クライアントはコールドスタート時に一度だけ作成し、以降の呼び出しで再利用する
    let config = Config::from_env();
    info!(
        environment = %config.environment,
        table_name = ?config.table_name,
        "設定読み込み完了"
    );

    let db_client = DynamoDbClient::new(&config).await;
    let handler = CreateTodoHandler::new(Arc::new(DynamoDbTodoRepository::new(db_client)));

    run(service_fn(|event: LambdaEvent<ApiGatewayProxyRequest>| {
        let handler = handler.clone();
        async move { function_handler(&handler, event).await }
    }))
    .await
}
