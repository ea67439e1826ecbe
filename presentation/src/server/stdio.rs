//! Line-delimited transport for the dispatch server.
//!
//! One JSON-RPC message per line in each direction. Requests are handled
//! one at a time in arrival order, so responses come back in the same order.

use super::handler::RequestHandler;
use super::protocol::{JsonRpcResponse, PARSE_ERROR};
use futures::StreamExt;
use serde_json::Value;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio_util::codec::{FramedRead, LinesCodec, LinesCodecError};
use tracing::{debug, info, warn};

/// Longest accepted request line.
pub const MAX_FRAME_BYTES: usize = 4 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("I/O error on the protocol stream: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode response: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Serve requests from `reader` until it reaches end of input.
pub async fn run<R, W>(handler: &RequestHandler, reader: R, mut writer: W) -> Result<(), ServerError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut frames = FramedRead::new(reader, LinesCodec::new_with_max_length(MAX_FRAME_BYTES));
    info!("Dispatch server ready");

    loop {
        let Some(frame) = frames.next().await else {
            break;
        };

        let reply = match frame {
            Ok(line) => handler.handle_line(&line).await,
            Err(LinesCodecError::MaxLineLengthExceeded) => {
                warn!("Dropped request longer than {} bytes", MAX_FRAME_BYTES);
                // The stream is fused after a codec error; rebuilding it keeps
                // the codec discarding up to the next newline.
                let parts = frames.into_parts();
                frames = FramedRead::new(parts.io, parts.codec);
                *frames.read_buffer_mut() = parts.read_buf;
                Some(JsonRpcResponse::failure(
                    Value::Null,
                    PARSE_ERROR,
                    format!("Parse error: request exceeds {MAX_FRAME_BYTES} bytes"),
                ))
            }
            Err(LinesCodecError::Io(e)) => return Err(e.into()),
        };

        if let Some(reply) = reply {
            write_message(&mut writer, &reply).await?;
        }
    }

    debug!("Input closed; dispatch server stopping");
    Ok(())
}

async fn write_message<W>(writer: &mut W, response: &JsonRpcResponse) -> Result<(), ServerError>
where
    W: AsyncWrite + Unpin,
{
    let mut line = serde_json::to_vec(response)?;
    line.push(b'\n');
    writer.write_all(&line).await?;
    writer.flush().await?;
    Ok(())
}
