//! Web search client
//!
//! Calls the Tavily search API and formats hits as prompt context.

use crate::agent::error::AgentError;
use crate::agent::types::{SearchRequest, SearchResponse, SearchResult};

/// Number of hits requested per search
pub const MAX_SEARCH_RESULTS: u32 = 2;

/// Run one web search
///
/// # Arguments
/// * `client` - Shared HTTP client
/// * `base_url` - Tavily base URL
/// * `api_key` - Tavily API key
/// * `query` - Search query
///
/// # Returns
/// * `Ok(Vec<SearchResult>)` - Up to `MAX_SEARCH_RESULTS` hits
/// * `Err(AgentError)` - If the key is missing or the call failed
pub async fn web_search(
    client: &reqwest::Client,
    base_url: &str,
    api_key: &str,
    query: &str,
) -> Result<Vec<SearchResult>, AgentError> {
    if api_key.is_empty() {
        return Err(AgentError::MissingApiKey("Tavily".to_string()));
    }

    let url = format!("{}/search", base_url.trim_end_matches('/'));
    let body = SearchRequest {
        api_key: api_key.to_string(),
        query: query.to_string(),
        max_results: MAX_SEARCH_RESULTS,
    };

    tracing::debug!(url = %url, query_len = query.len(), "Running web search");

    let response = client
        .post(&url)
        .json(&body)
        .send()
        .await
        .map_err(|e| AgentError::Search(format!("request failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        let error_body = response.text().await.unwrap_or_default();
        tracing::error!(
            status_code = status.as_u16(),
            error_body = %error_body,
            "Web search returned error status"
        );
        return Err(AgentError::Search(format!(
            "status {}: {}",
            status.as_u16(),
            error_body
        )));
    }

    let parsed: SearchResponse = response
        .json()
        .await
        .map_err(|e| AgentError::Search(format!("invalid response: {}", e)))?;

    let mut results = parsed.results;
    results.truncate(MAX_SEARCH_RESULTS as usize);

    tracing::debug!(hits = results.len(), "Web search complete");
    Ok(results)
}

/// Render search hits as a context block for the system prompt
pub fn format_search_context(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return "Web search returned no results.".to_string();
    }

    let mut context = String::from("Web search results:\n");
    for (i, hit) in results.iter().enumerate() {
        context.push_str(&format!(
            "[{}] {} ({})\n{}\n",
            i + 1,
            hit.title,
            hit.url,
            hit.content.trim()
        ));
    }
    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serial_test::serial;

    #[test]
    fn test_format_search_context() {
        let hits = vec![SearchResult {
            title: "Rust".to_string(),
            url: "https://rust-lang.org".to_string(),
            content: " A language. ".to_string(),
        }];
        let context = format_search_context(&hits);
        assert!(context.starts_with("Web search results:"));
        assert!(context.contains("[1] Rust (https://rust-lang.org)\nA language.\n"));
    }

    #[test]
    fn test_format_empty_context() {
        assert_eq!(format_search_context(&[]), "Web search returned no results.");
    }

    #[tokio::test]
    async fn test_missing_key() {
        let client = reqwest::Client::new();
        let result = web_search(&client, "http://unused", "", "q").await;
        assert!(matches!(result, Err(AgentError::MissingApiKey(_))));
    }

    #[tokio::test]
    #[serial]
    async fn test_search_truncates_results() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/search")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "api_key": "tv-key",
                "query": "latest rust release",
                "max_results": 2
            })))
            .with_status(200)
            .with_body(
                r#"{"results": [
                    {"title": "a", "url": "https://a", "content": "1"},
                    {"title": "b", "url": "https://b", "content": "2"},
                    {"title": "c", "url": "https://c", "content": "3"}
                ]}"#,
            )
            .create_async()
            .await;

        let client = reqwest::Client::new();
        let results = web_search(&client, &server.url(), "tv-key", "latest rust release")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(results.len(), 2);
        assert_eq!(results[1].title, "b");
    }

    #[tokio::test]
    #[serial]
    async fn test_search_error_status() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/search")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let client = reqwest::Client::new();
        let result = web_search(&client, &server.url(), "k", "q").await;

        mock.assert_async().await;
        let error_msg = result.unwrap_err().to_string();
        assert!(error_msg.contains("Web search failed") && error_msg.contains("500"));
    }
}
