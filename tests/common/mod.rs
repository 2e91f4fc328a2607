/*!
 * Common test utilities for the lyrictl test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use lyrictl::providers::Provider;
use lyrictl::translation::{PipelineOptions, TranslationService};


/// Spanish lyrics that detect as `es`
pub const SPANISH_LYRICS: &str = "Hola mundo\nte quiero";

/// English lyrics that detect as `en`
pub const ENGLISH_LYRICS: &str = "I love you\nthe night is young";

/// Route library logs to the test output; safe to call more than once
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Lyrics with `stanzas` Spanish stanzas, separated by blank lines
pub fn spanish_song(stanzas: usize) -> String {
    (0..stanzas)
        .map(|i| format!("Hola mundo, estrofa {}\nte quiero con el corazón\npero sin ti no hay canción", i + 1))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Service over `providers` with every delay disabled
pub fn service_without_delays(providers: Vec<Arc<dyn Provider>>, max_chunk_chars: usize) -> TranslationService {
    let mut options = PipelineOptions::default().without_delays();
    options.max_chunk_chars = max_chunk_chars;
    TranslationService::with_providers(providers, options)
}

/// Answer every HTTP request on a local port with a fixed status and body
///
/// Returns the base URL (`http://127.0.0.1:<port>`). The server lives until
/// the test runtime shuts down.
pub async fn serve_fixed_response(status_line: &'static str, body: &'static str) -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let _ = read_request(&mut socket).await;
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    Ok(format!("http://{}", addr))
}

/// Drain one request (headers plus `Content-Length` body) from the socket
async fn read_request(socket: &mut TcpStream) -> std::io::Result<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);

            while buf.len() < end + 4 + length {
                let n = socket.read(&mut chunk).await?;
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            return Ok(());
        }
    }
}
