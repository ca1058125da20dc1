use lapse_core::ipc::{ShellRequest, ShellResponse};
use lapse_core::LapseError;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::broadcast::{self, error::RecvError};

use crate::router;
use crate::session::Session;

/// Serve one JSON request per input line, answering with one JSON response
/// per output line, until EOF or shutdown.
///
/// A line that is not valid UTF-8 or not a valid request gets an error
/// response; the loop keeps going.
pub async fn run_shell<R, W>(
    mut reader: R,
    mut writer: W,
    session: &Session,
    mut shutdown: broadcast::Receiver<()>,
) -> Result<(), LapseError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    let mut listening = true;
    tracing::info!("Shell ready for {}", session.user().display_name());

    loop {
        tokio::select! {
            read = reader.read_until(b'\n', &mut buf) => {
                if read? == 0 {
                    tracing::info!("Shell input closed");
                    break;
                }

                let response = match decode_line(&buf) {
                    Ok(line) if line.trim().is_empty() => None,
                    Ok(line) => Some(match serde_json::from_str::<ShellRequest>(line) {
                        Ok(request) => router::handle_request(request, session).await,
                        Err(e) => ShellResponse::err(format!("Deserialization error: {}", e)),
                    }),
                    Err(e) => {
                        tracing::warn!("Rejected non-UTF-8 input line: {}", e);
                        Some(ShellResponse::err(format!("Invalid UTF-8 input: {}", e)))
                    }
                };
                buf.clear();

                if let Some(response) = response {
                    let mut bytes = serde_json::to_vec(&response)?;
                    bytes.push(b'\n');
                    writer.write_all(&bytes).await?;
                    writer.flush().await?;
                }
            }
            signal = shutdown.recv(), if listening => {
                if let Err(RecvError::Closed) = signal {
                    // no signal source left; serve until EOF
                    listening = false;
                    continue;
                }
                tracing::info!("Shutting down shell...");
                break;
            }
        }
    }

    Ok(())
}

fn decode_line(raw: &[u8]) -> Result<&str, std::str::Utf8Error> {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    std::str::from_utf8(raw)
}
