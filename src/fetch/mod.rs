// src/fetch/mod.rs

use reqwest::blocking::Client;
use std::{fs, io};
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

/// Everything that can go wrong getting the CSV payload. Each variant carries
/// the URL so the caller can show it back to the user.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL {url}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported URL scheme {scheme:?} in {url}")]
    UnsupportedScheme { url: String, scheme: String },

    #[error("GET {url} failed")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("reading {url} failed")]
    File {
        url: String,
        #[source]
        source: io::Error,
    },
}

impl FetchError {
    pub fn url(&self) -> &str {
        match self {
            FetchError::InvalidUrl { url, .. }
            | FetchError::UnsupportedScheme { url, .. }
            | FetchError::Http { url, .. }
            | FetchError::File { url, .. } => url,
        }
    }
}

/// Fetch the whole body at `url_str`.
///
/// `http`/`https` go through `client` (any non-2xx status is an error);
/// `file://` URLs are read straight from disk.
#[tracing::instrument(level = "info", skip(client))]
pub fn fetch_csv(client: &Client, url_str: &str) -> Result<Vec<u8>, FetchError> {
    let url = Url::parse(url_str).map_err(|source| FetchError::InvalidUrl {
        url: url_str.to_string(),
        source,
    })?;

    let bytes = match url.scheme() {
        "http" | "https" => {
            let http = |source| FetchError::Http {
                url: url_str.to_string(),
                source,
            };
            let resp = client
                .get(url.as_str())
                .send()
                .map_err(http)?
                .error_for_status()
                .map_err(http)?;
            debug!(status = %resp.status(), "response");
            resp.bytes().map_err(http)?.to_vec()
        }
        "file" => {
            let path = url.to_file_path().map_err(|_| FetchError::File {
                url: url_str.to_string(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "not a local file path"),
            })?;
            fs::read(&path).map_err(|source| FetchError::File {
                url: url_str.to_string(),
                source,
            })?
        }
        other => {
            return Err(FetchError::UnsupportedScheme {
                url: url_str.to_string(),
                scheme: other.to_string(),
            })
        }
    };

    info!(bytes = bytes.len(), "fetched");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;
    use tempfile::NamedTempFile;

    /// Answer a single HTTP request on localhost with `response`, then hang up.
    fn serve_once(response: &'static str) -> Result<String> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let addr = listener.local_addr()?;
        thread::spawn(move || {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let mut request: Vec<u8> = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let _ = stream.write_all(response.as_bytes());
        });
        Ok(format!("http://{}/people.csv", addr))
    }

    fn local_client() -> Result<Client> {
        Ok(Client::builder().no_proxy().build()?)
    }

    #[test]
    fn http_body_is_returned() -> Result<()> {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\n\
             Content-Type: text/csv\r\n\
             Content-Length: 32\r\n\
             Connection: close\r\n\
             \r\n\
             id,name,bday\n1,Alice,01/02/2000\n",
        )?;

        let body = fetch_csv(&local_client()?, &url)?;
        assert_eq!(body, b"id,name,bday\n1,Alice,01/02/2000\n");
        Ok(())
    }

    #[test]
    fn http_error_status_keeps_url() -> Result<()> {
        let url = serve_once(
            "HTTP/1.1 404 Not Found\r\n\
             Content-Length: 0\r\n\
             Connection: close\r\n\
             \r\n",
        )?;

        let err = fetch_csv(&local_client()?, &url).unwrap_err();
        match &err {
            FetchError::Http { source, .. } => {
                assert_eq!(source.status(), Some(reqwest::StatusCode::NOT_FOUND));
            }
            other => panic!("expected Http, got {other:?}"),
        }
        assert_eq!(err.url(), url);
        Ok(())
    }

    #[test]
    fn reads_file_urls() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        tmp.write_all(b"id,name,bday\n1,Alice,01/02/2000\n")?;
        let url = Url::from_file_path(tmp.path())
            .map_err(|_| anyhow::anyhow!("temp path is not absolute"))?;

        let body = fetch_csv(&Client::new(), url.as_str())?;
        assert_eq!(body, b"id,name,bday\n1,Alice,01/02/2000\n");
        Ok(())
    }

    #[test]
    fn missing_file_keeps_url() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let url = Url::from_file_path(dir.path().join("nope.csv"))
            .map_err(|_| anyhow::anyhow!("temp path is not absolute"))?;

        let err = fetch_csv(&Client::new(), url.as_str()).unwrap_err();
        assert!(matches!(err, FetchError::File { .. }));
        assert_eq!(err.url(), url.as_str());
        Ok(())
    }

    #[test]
    fn rejects_garbage_and_unknown_schemes() {
        let client = Client::new();

        let err = fetch_csv(&client, "not a url").unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
        assert_eq!(err.url(), "not a url");

        let err = fetch_csv(&client, "ftp://example.com/people.csv").unwrap_err();
        match err {
            FetchError::UnsupportedScheme { scheme, .. } => assert_eq!(scheme, "ftp"),
            other => panic!("expected UnsupportedScheme, got {other:?}"),
        }
    }
}
