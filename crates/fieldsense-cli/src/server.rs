//! JSON-lines request loop and the command dispatcher.
//!
//! `serve` reads one request per line and writes one response per line. The
//! one-shot subcommands build a `Request` and call [`handle_request`]
//! directly, so both paths share validation and response shapes.

use anyhow::{Context, Result};
use fieldsense_core::error::ApiError;
use fieldsense_core::protocol::{Command, Request, Response, ResponseData};
use fieldsense_core::Engine;
use tokio::io::{AsyncBufRead, AsyncWrite, AsyncWriteExt};
use tracing::debug;

/// Maximum request size in bytes (1 MB is far above any real form or message).
const MAX_REQUEST_SIZE: usize = 1024 * 1024;

/// Read a line with a maximum size limit to prevent memory DoS.
///
/// Returns the number of bytes read (0 means EOF).
/// Returns an error if the line exceeds max_size before finding a newline.
async fn read_line_bounded<R: AsyncBufRead + Unpin>(
    reader: &mut R,
    buf: &mut String,
    max_size: usize,
) -> Result<usize> {
    use tokio::io::AsyncBufReadExt;

    let mut total = 0;
    let mut bytes = Vec::new();

    loop {
        let available = reader.fill_buf().await.context("Failed to read request")?;

        if available.is_empty() {
            break;
        }

        let newline_pos = available.iter().position(|&b| b == b'\n');
        let bytes_to_consume = newline_pos.map(|p| p + 1).unwrap_or(available.len());

        if total + bytes_to_consume > max_size {
            anyhow::bail!("Request too large: exceeded {} byte limit", max_size);
        }

        // Validate UTF-8 once at the end; a chunk may split a character.
        bytes.extend_from_slice(&available[..bytes_to_consume]);
        total += bytes_to_consume;
        reader.consume(bytes_to_consume);

        if newline_pos.is_some() {
            break;
        }
    }

    let line = std::str::from_utf8(&bytes).context("Invalid UTF-8 in request")?;
    buf.push_str(line);
    Ok(total)
}

async fn write_response<W: AsyncWrite + Unpin>(writer: &mut W, response: &Response) -> Result<()> {
    let response_json = serde_json::to_string(response).context("Failed to serialize response")?;
    debug!("Sending: {} bytes", response_json.len());

    writer
        .write_all(response_json.as_bytes())
        .await
        .context("Failed to write response")?;
    writer
        .write_all(b"\n")
        .await
        .context("Failed to write newline")?;
    writer.flush().await.context("Failed to flush")?;
    Ok(())
}

/// Answer requests until the reader hits EOF.
pub async fn serve<R, W>(engine: &Engine, mut reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = String::new();

    loop {
        line.clear();

        let bytes_read = match read_line_bounded(&mut reader, &mut line, MAX_REQUEST_SIZE).await {
            Ok(n) => n,
            Err(e) => {
                // The stream can't be resynchronized mid-line, so report and stop.
                let response = Response::error(
                    "unknown",
                    ApiError::invalid_input_with_suggestion(
                        format!("{:#}", e),
                        "Send one JSON request per line, each under 1 MiB of UTF-8",
                    ),
                );
                write_response(&mut writer, &response).await?;
                return Err(e);
            }
        };

        if bytes_read == 0 {
            debug!("Input closed");
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        debug!("Received: {} bytes", trimmed.len());

        let response = match serde_json::from_str::<Request>(trimmed) {
            Ok(request) => handle_request(engine, request),
            Err(e) => Response::error(
                "unknown",
                ApiError::invalid_input_with_suggestion(
                    format!("Invalid JSON request: {}", e),
                    "Ensure the request is valid JSON with 'id' and 'command' fields. Example: {\"id\":\"1\",\"command\":{\"action\":\"show_config\"}}",
                ),
            ),
        };

        write_response(&mut writer, &response).await?;
    }

    Ok(())
}

/// Run one request against the engine.
pub fn handle_request(engine: &Engine, request: Request) -> Response {
    debug!(id = %request.id, "Handling command: {:?}", request.command);

    match request.command {
        Command::ClassifyField { field } => {
            if let Err(e) = field.validate() {
                return Response::error(request.id, e);
            }
            let result = engine.classify_field(&field);
            Response::success(request.id, ResponseData::FieldClassification { result })
        }

        Command::ClassifyForm { form } => {
            if let Err(e) = form.validate() {
                return Response::error(request.id, e);
            }
            let detailed = engine.classify_form_detailed(&form);
            Response::success(
                request.id,
                ResponseData::FormClassification {
                    result: detailed.result,
                    fields: detailed.fields,
                },
            )
        }

        Command::ExtractOtp { text, source } => {
            let found = engine.extract_otp(&text);
            Response::success(request.id, ResponseData::OtpExtraction { found, source })
        }

        Command::ShowConfig => Response::success(
            request.id,
            ResponseData::Config {
                thresholds: engine.thresholds(),
            },
        ),
    }
}
