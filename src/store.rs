use anyhow::{bail, Context, Result};
use log::info;
use reqwest::{header::CONTENT_TYPE, Client, Response, StatusCode};

/// エラー時に読み込むレスポンスボディの上限。
const MAX_ERROR_BODY: usize = 100_000;

/// worklogをリモートのストレージに保存するためのクライアント。
///
/// # Examples
///
/// ```no_run
/// # async fn push() -> anyhow::Result<()> {
/// use worklog::store::WorklogStore;
///
/// let store = WorklogStore::new("https://example.com/worklog", "secret");
/// store.put(b"# 2 Jan 2006 Monday\n1h Task one\n\n".to_vec()).await?;
/// # Ok(())
/// # }
/// ```
pub struct WorklogStore {
    client: Client,
    url: String,
    token: String,
}

impl WorklogStore {
    /// 新しい`WorklogStore`を返す。
    ///
    /// # Arguments
    ///
    /// * `url` - 保存先のURL
    /// * `token` - 書き込み用のトークン
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            token: token.into(),
        }
    }

    /// worklogのテキストを保存する。
    ///
    /// 401の場合はトークンが不正としてエラーを返す。204より大きいステータスはエラーとする。
    pub async fn put(&self, body: Vec<u8>) -> Result<()> {
        info!("Pushing {} bytes to {}", body.len(), self.url);
        let response = self
            .client
            .put(&self.url)
            .header("write-token", &self.token)
            .header(CONTENT_TYPE, "text/plain")
            .body(body)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", self.url))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            bail!("forbidden: invalid push token");
        }
        if status.as_u16() > 204 {
            let body = read_limited(response, MAX_ERROR_BODY).await;
            bail!("http response: {} {}", status.as_u16(), String::from_utf8_lossy(&body));
        }

        Ok(())
    }
}

// レスポンスボディを先頭から最大`limit`バイトまで読み込む。読み込みに失敗した場合はそこまでの内容を返す。
async fn read_limited(mut response: Response, limit: usize) -> Vec<u8> {
    let mut body = Vec::new();
    while body.len() < limit {
        let Ok(Some(chunk)) = response.chunk().await else {
            break;
        };
        let take = chunk.len().min(limit - body.len());
        body.extend_from_slice(&chunk[..take]);
    }
    body
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{WorklogStore, MAX_ERROR_BODY};

    #[tokio::test]
    async fn test_put() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/worklog")
            .match_header("write-token", "secret")
            .match_header("content-type", "text/plain")
            .match_body("# 2 Jan 2006 Monday\n1h Task one\n\n")
            .with_status(204)
            .create_async()
            .await;
        let store = WorklogStore::new(format!("{}/worklog", server.url()), "secret");

        let result = store
            .put(b"# 2 Jan 2006 Monday\n1h Task one\n\n".to_vec())
            .await;

        mock.assert_async().await;
        assert!(result.is_ok());
    }

    #[rstest]
    #[case::unauthorized(401, "", "forbidden: invalid push token")]
    #[case::server_error(500, "boom", "http response: 500 boom")]
    #[case::not_found(404, "no such log", "http response: 404 no such log")]
    #[tokio::test]
    async fn test_put_error(#[case] status: usize, #[case] body: &str, #[case] expected: &str) {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("PUT", "/worklog")
            .with_status(status)
            .with_body(body)
            .create_async()
            .await;
        let store = WorklogStore::new(format!("{}/worklog", server.url()), "secret");

        let error = store.put(Vec::new()).await.unwrap_err();

        assert_eq!(error.to_string(), expected);
    }

    #[tokio::test]
    async fn test_put_error_body_is_truncated() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("PUT", "/worklog")
            .with_status(500)
            .with_body("x".repeat(MAX_ERROR_BODY + 50))
            .create_async()
            .await;
        let store = WorklogStore::new(format!("{}/worklog", server.url()), "secret");

        let error = store.put(Vec::new()).await.unwrap_err();

        let message = error.to_string();
        assert!(message.starts_with("http response: 500 x"));
        assert_eq!(message.len(), "http response: 500 ".len() + MAX_ERROR_BODY);
    }
}
