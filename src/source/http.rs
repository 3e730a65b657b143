//! Dataset resources fetched over HTTP.
//!
//! `ureq` is blocking, so each request runs on its own worker thread and hands
//! its result back through a oneshot channel. Several fetches awaited jointly
//! therefore overlap instead of running one after another.

use std::thread;

use futures::channel::oneshot;

use crate::source::{FetchError, ResourceSource};

/// Upper bound on a resource body. `image_attribute_labels.txt` alone is
/// around 60 MB, far past ureq's default of 10 MiB.
const MAX_RESOURCE_BYTES: u64 = 1 << 30;

/// Fetches resources relative to a base URL.
#[derive(Debug, Clone)]
pub struct HttpSource {
    base_url: String,
}

impl HttpSource {
    /// Create a source for the given base URL (with or without trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Full URL of a resource.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl ResourceSource for HttpSource {
    fn location(&self) -> String {
        self.base_url.clone()
    }

    async fn fetch(&self, path: &str) -> Result<String, FetchError> {
        let url = self.url_for(path);
        let owned_path = path.to_string();
        let (sender, receiver) = oneshot::channel();

        thread::Builder::new()
            .name("smartbirds-fetch".into())
            .spawn(move || {
                log::debug!("GET {}", url);
                let _ = sender.send(get_text(&url, &owned_path));
            })
            .map_err(|e| FetchError::transport(path, format!("failed to spawn fetch worker: {e}")))?;

        receiver
            .await
            .map_err(|_| FetchError::transport(path, "fetch worker exited without a result"))?
    }
}

fn get_text(url: &str, path: &str) -> Result<String, FetchError> {
    let mut response = ureq::get(url).call().map_err(|e| match e {
        ureq::Error::StatusCode(status) => FetchError::Status {
            path: path.to_string(),
            status,
        },
        other => FetchError::transport(path, other.to_string()),
    })?;

    let bytes = response
        .body_mut()
        .with_config()
        .limit(MAX_RESOURCE_BYTES)
        .read_to_vec()
        .map_err(|e| FetchError::transport(path, e.to_string()))?;
    Ok(super::decode_lossy(path, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    /// Serve one HTTP response with `body` on a local port.
    fn serve_once(body: Vec<u8>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            stream.write_all(head.as_bytes()).unwrap();
            stream.write_all(&body).unwrap();
        });

        format!("http://{}", addr)
    }

    #[test]
    fn test_large_resource_is_read_whole() {
        let line = b"1 1 0 3 27.7080\n";
        let body: Vec<u8> = line.iter().copied().cycle().take(line.len() * 800_000).collect();
        assert!(body.len() > 10 * 1024 * 1024);

        let source = HttpSource::new(serve_once(body.clone()));
        let text = pollster::block_on(source.fetch("image_attribute_labels.txt")).unwrap();
        assert_eq!(text.len(), body.len());
    }

    #[test]
    fn test_invalid_utf8_is_decoded_lossily() {
        let source = HttpSource::new(serve_once(b"1 a.jpg\n2\xffb.jpg\n3 c.jpg\n".to_vec()));
        let text = pollster::block_on(source.fetch("images.txt")).unwrap();

        assert_eq!(text.lines().count(), 3);
        assert!(text.contains('\u{FFFD}'));
        assert!(text.ends_with("3 c.jpg\n"));
    }

    #[test]
    fn test_url_join() {
        let source = HttpSource::new("https://example.org/assets/");
        assert_eq!(
            source.url_for("parts/parts.txt"),
            "https://example.org/assets/parts/parts.txt"
        );
        assert_eq!(
            source.url_for("/classes.txt"),
            "https://example.org/assets/classes.txt"
        );
    }
}
