//! CGI transport
//!
//! One request per process: the body is read from stdin when the request
//! method is POST, and headers plus a single JSON body are written to stdout.

use log::{debug, error};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::config::EndpointConfig;
use crate::protocol::{ActionResult, handle_body};

/// Response headers, in CGI form, terminated by the blank line
pub const RESPONSE_HEADERS: &str = "Content-Type: application/json\n\
Access-Control-Allow-Origin: *\n\
Access-Control-Allow-Methods: GET, POST, OPTIONS\n\
Access-Control-Allow-Headers: Content-Type\n\n";

/// The CGI variables the transport reads
#[derive(Debug, Clone, Default)]
pub struct CgiEnv {
    pub request_method: String,
    pub content_length: String,
}

impl CgiEnv {
    pub fn from_env() -> Self {
        Self {
            request_method: std::env::var("REQUEST_METHOD").unwrap_or_default(),
            content_length: std::env::var("CONTENT_LENGTH").unwrap_or_default(),
        }
    }
}

/// Read the request body, or `None` when the request is not a POST
pub async fn read_body<R>(env: &CgiEnv, input: &mut R) -> std::io::Result<Option<Vec<u8>>>
where
    R: AsyncRead + Unpin,
{
    if env.request_method != "POST" {
        debug!("Request method {:?} carries no body", env.request_method);
        return Ok(None);
    }

    let length: u64 = env.content_length.trim().parse().unwrap_or(0);
    let mut body = Vec::new();
    input.take(length).read_to_end(&mut body).await?;

    Ok(Some(body))
}

/// Handle one CGI request end to end
pub async fn respond<R, W>(
    config: &EndpointConfig,
    env: &CgiEnv,
    input: &mut R,
    output: &mut W,
) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let result = match read_body(env, input).await {
        Ok(body) => handle_body(config, body.as_deref()),
        Err(e) => {
            error!("Failed to read request body: {}", e);
            ActionResult::error(format!("Failed to read request body: {e}"))
        }
    };

    write_response(output, &result).await
}

/// Write headers and the JSON body
pub async fn write_response<W>(output: &mut W, result: &ActionResult) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    output.write_all(RESPONSE_HEADERS.as_bytes()).await?;
    output.write_all(result.to_json().as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await
}
