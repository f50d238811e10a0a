use std::env;

/// 保存先テーブル名の環境変数
pub const TABLE_NAME_ENV: &str = "TABLE_NAME";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// 未設定の場合、書き込みはすべて失敗する
    pub table_name: Option<String>,
    pub environment: String,
    pub aws_region: String,
    /// DynamoDB Local などのエンドポイント上書き
    pub dynamodb_endpoint: Option<String>,
}

impl Config {
    /// テーブル名を明示して設定を作成
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: non_empty(Some(table_name.into())),
            ..Self::default()
        }
    }

    /// 環境変数から設定を読み込む
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意のキー参照関数から設定を組み立てる
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Config {
            table_name: non_empty(lookup(TABLE_NAME_ENV)),
            environment: lookup("ENVIRONMENT").unwrap_or(defaults.environment),
            aws_region: lookup("AWS_REGION").unwrap_or(defaults.aws_region),
            dynamodb_endpoint: non_empty(lookup("DYNAMODB_ENDPOINT")),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.dynamodb_endpoint = non_empty(Some(endpoint.into()));
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table_name: None,
            environment: "dev".to_string(),
            aws_region: "ap-northeast-1".to_string(),
            dynamodb_endpoint: None,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
