//! Newline-delimited envelope reader shared by all sources.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

use taxoscope_core::error::{Result, TaxoscopeError};
use taxoscope_core::protocol::{decode_envelope, Envelope};

/// Decode envelopes line by line from `reader`.
///
/// Blank lines are skipped. A line that fails to decode is reported on
/// `errors` and reading continues. Stops at end of input, or early when the
/// envelope receiver is gone. Returns the number of envelopes forwarded.
pub async fn pump_lines<R>(
    reader: R,
    envelopes: &mpsc::Sender<Envelope>,
    errors: &mpsc::Sender<TaxoscopeError>,
) -> Result<u64>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut forwarded = 0u64;

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| TaxoscopeError::Source(format!("read failed: {e}")))?
    {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match decode_envelope(line) {
            Ok(env) => {
                if envelopes.send(env).await.is_err() {
                    tracing::debug!("envelope receiver closed; stopping reader");
                    break;
                }
                forwarded += 1;
            }
            Err(e) => {
                // Error logger gone means shutdown; keep draining regardless.
                let _ = errors.send(e).await;
            }
        }
    }

    Ok(forwarded)
}
