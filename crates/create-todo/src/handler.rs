use domain::{CreateTodoRequest, TodoItem};
use http::StatusCode;
use infrastructure::TodoRepository;
use serde_json::json;
use shared::{ApiGatewayProxyRequest, ApiGatewayProxyResponse, AppError, CREATED_MESSAGE};
use std::sync::Arc;
use tracing::{error, info, warn};

/// ToDo作成ハンドラー
///
/// 保存先はコンストラクタで受け取る。呼び出し間で状態は持たない。
#[derive(Clone)]
pub struct CreateTodoHandler {
    repository: Arc<dyn TodoRepository>,
}

impl CreateTodoHandler {
    pub fn new(repository: Arc<dyn TodoRepository>) -> Self {
        Self { repository }
    }

    /// リクエストを処理してレスポンスを返す
    ///
    /// 失敗もすべてレスポンスとして返す（201 / 400 / 500）。
    pub async fn handle(&self, request: &ApiGatewayProxyRequest) -> ApiGatewayProxyResponse {
        match self.create_todo(request).await {
            Ok(response) => response,
            Err(e) => {
                if e.is_client_error() {
                    warn!(error = %e, request_id = ?request.request_id(), "リクエストボディが不正");
                } else {
                    error!(error = %e, request_id = ?request.request_id(), "ToDo作成エラー");
                }
                ApiGatewayProxyResponse::from_error(&e)
            }
        }
    }

    async fn create_todo(
        &self,
        request: &ApiGatewayProxyRequest,
    ) -> Result<ApiGatewayProxyResponse, AppError> {
        let body = request.decoded_body()?;
        let create_req: CreateTodoRequest = serde_json::from_str(&body)?;

        let item = TodoItem::new(create_req);
        self.repository.put(&item).await?;

        info!(todo_id = %item.id, "ToDo作成完了");

        Ok(created_response(&item))
    }
}

/// 201 レスポンスを作成
///
/// 書き込み後に失敗する処理を挟まない。
fn created_response(item: &TodoItem) -> ApiGatewayProxyResponse {
    ApiGatewayProxyResponse::json(
        StatusCode::CREATED,
        &json!({
            "message": CREATED_MESSAGE,
            "item": item.to_json()
        }),
    )
}
