use domain::TodoError;
use http::StatusCode;
use thiserror::Error;

/// 作成成功時のメッセージ
pub const CREATED_MESSAGE: &str = "To-do item created successfully";
/// 永続化失敗時のメッセージ（原因は含めない）
pub const PERSISTENCE_FAILURE_MESSAGE: &str = "Could not create to-do item";
/// リクエストボディが解釈できない場合のメッセージ
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";

/// ハンドラーで扱うエラー
#[derive(Debug, Clone, Error)]
pub enum AppError {
    // クライアントエラー
    #[error("Missing request body")]
    MissingBody,

    #[error("Invalid body encoding: {0}")]
    Encoding(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // 永続化エラー
    #[error("Persistence error: {0}")]
    Persistence(#[from] TodoError),
}

impl AppError {
    /// HTTPステータスコードを取得
    pub fn http_status_code(&self) -> StatusCode {
        match self {
            AppError::MissingBody | AppError::Encoding(_) | AppError::Deserialization(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// クライアントエラーかどうか
    pub fn is_client_error(&self) -> bool {
        self.http_status_code().is_client_error()
    }

    /// ユーザー向けメッセージを取得
    pub fn user_message(&self) -> &'static str {
        if self.is_client_error() {
            INVALID_BODY_MESSAGE
        } else {
            PERSISTENCE_FAILURE_MESSAGE
        }
    }

    /// レスポンスに含めてよい詳細
    ///
    /// 入力起因のエラーのみ。サーバー側の原因は返さない。
    pub fn client_detail(&self) -> Option<String> {
        self.is_client_error().then(|| self.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Deserialization(e.to_string())
    }
}
