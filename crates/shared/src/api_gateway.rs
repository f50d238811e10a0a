use crate::errors::AppError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;

/// API Gateway プロキシリクエスト構造体
///
/// ハンドラーが使うのは `body` のみ。その他のフィールドはログ用に受け取る。
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayProxyRequest {
    #[serde(default)]
    pub http_method: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
    #[serde(default)]
    pub request_context: Option<RequestContext>,
}

/// リクエストコンテキスト構造体
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    #[serde(default)]
    pub request_id: Option<String>,
}

impl ApiGatewayProxyRequest {
    /// JSON ボディを持つリクエストを作成
    pub fn with_body(body: impl Into<String>) -> Self {
        Self {
            http_method: Some("POST".to_string()),
            body: Some(body.into()),
            ..Self::default()
        }
    }

    /// API Gateway 側のリクエストID
    pub fn request_id(&self) -> Option<&str> {
        self.request_context
            .as_ref()
            .and_then(|ctx| ctx.request_id.as_deref())
    }

    /// ボディを文字列として取り出す
    ///
    /// `isBase64Encoded` が立っている場合はデコードして UTF-8 として解釈する。
    pub fn decoded_body(&self) -> Result<String, AppError> {
        let body = self.body.as_ref().ok_or(AppError::MissingBody)?;

        if !self.is_base64_encoded {
            return Ok(body.clone());
        }

        let bytes = STANDARD
            .decode(body)
            .map_err(|e| AppError::Encoding(format!("base64: {e}")))?;
        String::from_utf8(bytes).map_err(|e| AppError::Encoding(format!("utf-8: {e}")))
    }
}

/// API Gateway プロキシレスポンス構造体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayProxyResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl ApiGatewayProxyResponse {
    /// JSON レスポンスを作成
    pub fn json(status: StatusCode, body: &Value) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Access-Control-Allow-Origin".to_string(), "*".to_string());
        headers.insert(
            "Access-Control-Allow-Headers".to_string(),
            "Content-Type,Authorization".to_string(),
        );

        Self {
            status_code: status.as_u16(),
            headers,
            body: body.to_string(),
            is_base64_encoded: false,
        }
    }

    /// エラーレスポンスを作成
    ///
    /// サーバー側エラーの詳細は含めない。
    pub fn from_error(error: &AppError) -> Self {
        let body = match error.client_detail() {
            Some(detail) => json!({ "message": error.user_message(), "error": detail }),
            None => json!({ "message": error.user_message() }),
        };

        Self::json(error.http_status_code(), &body)
    }
}
