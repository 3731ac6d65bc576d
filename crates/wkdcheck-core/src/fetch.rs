//! Single HTTP GET feeding the response body into two sinks.
//!
//! The body is streamed through the curl write callback into the caller's
//! scratch file and an in-memory buffer; both receive identical bytes. The
//! progress callback watches the cancel token so an abort tears the transfer
//! down promptly instead of waiting for a timeout.

use std::fs::File;
use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::control::CancelToken;
use crate::validate::{ValidateOptions, ValidationError};

/// Performs the GET and returns the HTTP status code plus the buffered body.
///
/// The same bytes land in `sink` (for the key tool) and the returned buffer
/// (for the armor scan). A sink write failure aborts the transfer and surfaces
/// as [`ValidationError::Copy`]; cancellation as [`ValidationError::Cancelled`].
pub fn fetch_to_sinks(
    url: &str,
    sink: &File,
    opts: &ValidateOptions,
    cancel: &CancelToken,
) -> Result<(u32, Vec<u8>), ValidationError> {
    let body: Arc<Mutex<Vec<u8>>> = Arc::new(Mutex::new(Vec::new()));
    let body_cb = Arc::clone(&body);
    let sink_error: Arc<Mutex<Option<std::io::Error>>> = Arc::new(Mutex::new(None));
    let sink_error_cb = Arc::clone(&sink_error);
    let mut sink = sink;

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(opts.connect_timeout)?;
    // The transfer timeout is also capped by an approaching check deadline so
    // curl gives up on its own even if no progress callback fires.
    let mut timeout = opts.fetch_timeout;
    if let Some(remaining) = cancel.remaining() {
        timeout = timeout.min(remaining.max(std::time::Duration::from_millis(1)));
    }
    easy.timeout(timeout)?;
    easy.progress(true)?;

    {
        let mut transfer = easy.transfer();
        transfer.progress_function(move |_, _, _, _| !cancel.is_cancelled())?;
        transfer.write_function(move |data| {
            body_cb.lock().unwrap().extend_from_slice(data);
            match sink.write_all(data) {
                Ok(()) => Ok(data.len()),
                Err(e) => {
                    let _ = sink_error_cb.lock().unwrap().replace(e);
                    Ok(0) // abort transfer
                }
            }
        })?;
        if let Err(e) = transfer.perform() {
            if cancel.is_cancelled() {
                return Err(ValidationError::Cancelled);
            }
            if e.is_write_error() {
                if let Some(io_err) = sink_error.lock().unwrap().take() {
                    return Err(ValidationError::Copy(io_err));
                }
            }
            return Err(ValidationError::Fetch(e));
        }
    }

    let code = easy.response_code()?;
    let body = match Arc::try_unwrap(body) {
        Ok(m) => m.into_inner().unwrap(),
        Err(arc) => arc.lock().unwrap().clone(),
    };
    Ok((code, body))
}
