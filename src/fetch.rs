use anyhow::{Context, Result};
use reqwest::StatusCode;
use tracing::info;

/// Response for the bulletin page, body already decoded to text.
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    pub fn is_success(&self) -> bool {
        self.status == StatusCode::OK.as_u16()
    }
}

/// Where the bulletin page comes from. Non-200 responses are returned, not
/// raised; only transport failures are errors.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    async fn fetch(&self) -> Result<FetchedPage>;
}

pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

impl PageSource for HttpSource {
    async fn fetch(&self) -> Result<FetchedPage> {
        info!("Fetching bulletin page: {}", self.url);
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("Failed to request {}", self.url))?;

        let status = response.status().as_u16();
        // Decodes using the Content-Type charset, UTF-8 when none is given.
        let body = response
            .text()
            .await
            .context("Failed to read response body")?;
        info!("Received HTTP {} ({} chars)", status, body.len());

        Ok(FetchedPage { status, body })
    }
}

/// Reads a saved copy of the page from disk; always reported as HTTP 200.
pub struct FileSource {
    path: std::path::PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PageSource for FileSource {
    async fn fetch(&self) -> Result<FetchedPage> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        Ok(FetchedPage {
            status: StatusCode::OK.as_u16(),
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Document, Extracted};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves one canned HTTP response on a local port and returns its URL.
    async fn serve_once(status_line: &'static str, content_type: &'static str, body: Vec<u8>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let head = format!(
                "{status_line}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            socket.write_all(head.as_bytes()).await.unwrap();
            socket.write_all(&body).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        format!("http://{addr}/balanco")
    }

    fn source(url: String) -> HttpSource {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        HttpSource::with_client(client, url)
    }

    #[tokio::test]
    async fn latin1_page_is_decoded_by_charset() {
        let body = b"<ul><li>\xd3bitos confirmados: 1.234</li><li>Munic\xedpios afetados: 467</li></ul>".to_vec();
        let url = serve_once("HTTP/1.1 200 OK", "text/html; charset=ISO-8859-1", body).await;

        let page = source(url).fetch().await.unwrap();
        assert!(page.is_success());

        let doc = Document::parse(&page.body);
        assert_eq!(doc.extract("Óbitos confirmados"), Extracted::Value("1,234".into()));
        assert_eq!(doc.extract("Municípios afetados"), Extracted::Value("467".into()));
    }

    #[tokio::test]
    async fn utf8_page_without_charset() {
        let body = "<p>Óbitos confirmados: 163</p>".as_bytes().to_vec();
        let url = serve_once("HTTP/1.1 200 OK", "text/html", body).await;

        let page = source(url).fetch().await.unwrap();
        let doc = Document::parse(&page.body);
        assert_eq!(doc.extract("Óbitos confirmados"), Extracted::Value("163".into()));
    }

    #[tokio::test]
    async fn non_200_is_returned_not_raised() {
        let url = serve_once("HTTP/1.1 404 Not Found", "text/html", b"gone".to_vec()).await;

        let page = source(url).fetch().await.unwrap();
        assert_eq!(page.status, 404);
        assert!(!page.is_success());
    }
}
