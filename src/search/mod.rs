//! 网络搜索模块 - 为访谈中的专家回答检索依据材料

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::SearchConfig;

/// 搜索服务错误
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("search api key is not configured")]
    MissingApiKey,
    #[error("search request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("search service returned status {status}")]
    Api { status: u16 },
}

/// 搜索请求体（Tavily风格的REST接口）
#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: usize,
}

/// 搜索响应体
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchDocument>,
}

/// 单条检索结果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchDocument {
    #[serde(default)]
    pub title: String,
    pub url: String,
    pub content: String,
}

impl SearchDocument {
    /// 渲染为提示词中可引用的文档块
    pub fn render(&self) -> String {
        format!("<Document href=\"{}\">\n{}\n</Document>", self.url, self.content)
    }
}

/// 网络搜索客户端
#[derive(Clone)]
pub struct SearchClient {
    config: SearchConfig,
    http: reqwest::Client,
}

impl SearchClient {
    pub fn new(config: SearchConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self { config, http })
    }

    /// 搜索是否可用（启用且配置了API KEY）
    pub fn is_available(&self) -> bool {
        self.config.enabled && !self.config.api_key.trim().is_empty()
    }

    /// 针对一个访谈问题执行检索
    pub async fn search(&self, query: &str) -> Result<Vec<SearchDocument>, SearchError> {
        if !self.config.enabled {
            return Ok(Vec::new());
        }
        if self.config.api_key.trim().is_empty() {
            return Err(SearchError::MissingApiKey);
        }

        let request = SearchRequest {
            api_key: &self.config.api_key,
            query,
            max_results: self.config.max_results,
        };

        let url = format!("{}/search", self.config.api_base_url.trim_end_matches('/'));
        let response = self.http.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Api {
                status: status.as_u16(),
            });
        }

        let parsed: SearchResponse = response.json().await?;
        Ok(parsed.results)
    }
}

/// 将检索结果格式化为专家可引用的上下文
pub fn format_documents(documents: &[SearchDocument]) -> String {
    documents
        .iter()
        .map(|doc| doc.render())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config(api_key: &str, enabled: bool) -> SearchConfig {
        SearchConfig {
            enabled,
            api_key: api_key.to_string(),
            api_base_url: "https://api.tavily.com".to_string(),
            max_results: 3,
            timeout_seconds: 5,
        }
    }

    #[test]
    fn test_availability() {
        let client = SearchClient::new(sample_config("tvly-key", true)).unwrap();
        assert!(client.is_available());

        let client = SearchClient::new(sample_config("", true)).unwrap();
        assert!(!client.is_available());

        let client = SearchClient::new(sample_config("tvly-key", false)).unwrap();
        assert!(!client.is_available());
    }

    #[tokio::test]
    async fn test_disabled_search_returns_empty() {
        let client = SearchClient::new(sample_config("tvly-key", false)).unwrap();
        let docs = client.search("anything").await.unwrap();
        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn test_missing_key_is_an_error() {
        let client = SearchClient::new(sample_config("", true)).unwrap();
        let result = client.search("anything").await;
        assert!(matches!(result, Err(SearchError::MissingApiKey)));
    }

    #[test]
    fn test_request_body_shape() {
        let request = SearchRequest {
            api_key: "tvly-key",
            query: "battery recycling",
            max_results: 3,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["api_key"], "tvly-key");
        assert_eq!(json["query"], "battery recycling");
        assert_eq!(json["max_results"], 3);
    }

    #[test]
    fn test_response_parsing() {
        let raw = r#"{
            "query": "battery recycling",
            "results": [
                {"title": "A", "url": "https://a.example", "content": "alpha", "score": 0.9},
                {"url": "https://b.example", "content": "beta"}
            ]
        }"#;
        let parsed: SearchResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.results.len(), 2);
        assert_eq!(parsed.results[0].title, "A");
        // 缺失的title回落为空字符串而不是解析失败
        assert_eq!(parsed.results[1].title, "");
    }

    #[test]
    fn test_format_documents() {
        let docs = vec![
            SearchDocument {
                title: "A".to_string(),
                url: "https://a.example".to_string(),
                content: "alpha".to_string(),
            },
            SearchDocument {
                title: "B".to_string(),
                url: "https://b.example".to_string(),
                content: "beta".to_string(),
            },
        ];
        let formatted = format_documents(&docs);
        assert!(formatted.contains("<Document href=\"https://a.example\">"));
        assert!(formatted.contains("alpha"));
        assert!(formatted.contains("</Document>"));
        assert!(formatted.contains("beta"));
    }
}
