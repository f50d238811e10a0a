use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::config::Region;
use aws_sdk_dynamodb::Client;
use shared::Config;
use tracing::{info, warn};

/// DynamoDB クライアントと書き込み先テーブル名の組
///
/// プロセス起動時に一度だけ作成し、すべての呼び出しで共有する。
#[derive(Clone, Debug)]
pub struct DynamoDbClient {
    client: Client,
    table_name: Option<String>,
}

impl DynamoDbClient {
    pub async fn new(config: &Config) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.aws_region.clone()));

        if let Some(endpoint) = &config.dynamodb_endpoint {
            info!(endpoint = %endpoint, "DynamoDBエンドポイントを上書き");
            loader = loader.endpoint_url(endpoint);
        }

        if config.table_name.is_none() {
            warn!("TABLE_NAME が未設定のため、すべての書き込みが失敗します");
        }

        let aws_config = loader.load().await;

        Self {
            client: Client::new(&aws_config),
            table_name: config.table_name.clone(),
        }
    }

    /// 構築済みの SDK クライアントから作成
    pub fn from_client(client: Client, table_name: Option<String>) -> Self {
        Self { client, table_name }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn table_name(&self) -> Option<&str> {
        self.table_name.as_deref()
    }
}
