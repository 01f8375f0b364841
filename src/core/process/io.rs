// repo-steward: Git checkout manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! I/O streaming and output capture for processes.
//!
//! ```text
//! run_child()
//!   stdout/stderr reader tasks -> mpsc channels
//!     raw lines: UTF-8, else fallback encoding
//!   wait, or kill on timeout
//!   --> ProcessOutput { stdout, stderr, exit_code }
//! ```

use encoding_rs::Encoding;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Child;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{trace, warn};

use super::builder::{ProcessBuilder, ProcessOutput, StreamFlags};
use crate::error::ProcessError;

/// Decodes one raw output line, without its terminator.
///
/// Valid UTF-8 is taken as is; anything else goes through `fallback`, with
/// unmappable sequences replaced by U+FFFD.
pub(super) fn decode_line(raw: &[u8], fallback: &'static Encoding) -> String {
    let line = raw.strip_suffix(b"\n").unwrap_or(raw);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    match std::str::from_utf8(line) {
        Ok(text) => text.to_string(),
        Err(_) => fallback.decode_without_bom_handling(line).0.into_owned(),
    }
}

struct StreamReader {
    flags: StreamFlags,
    encoding: &'static Encoding,
    process_name: String,
    stream_name: &'static str,
}

fn spawn_reader<R>(
    stream: Option<R>,
    reader: StreamReader,
    tx: mpsc::UnboundedSender<String>,
) -> Option<JoinHandle<()>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let stream = stream?;
    Some(tokio::spawn(async move {
        let mut stream = BufReader::new(stream);
        let mut raw = Vec::new();
        loop {
            raw.clear();
            match stream.read_until(b'\n', &mut raw).await {
                Ok(0) => break,
                Ok(_) => {
                    let line = decode_line(&raw, reader.encoding);
                    if reader.flags.contains(StreamFlags::FORWARD_TO_LOG) {
                        trace!(process = %reader.process_name, stream = reader.stream_name, line = %line, "output");
                    }
                    if reader.flags.contains(StreamFlags::KEEP_IN_STRING) {
                        let _ = tx.send(line);
                    }
                }
                Err(e) => {
                    warn!(process = %reader.process_name, stream = reader.stream_name, error = %e, "error reading stream");
                    break;
                }
            }
        }
    }))
}

fn collect_output(rx: &mut mpsc::UnboundedReceiver<String>) -> String {
    let mut output = String::new();
    while let Ok(line) = rx.try_recv() {
        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str(&line);
    }
    output
}

async fn await_readers(handles: [Option<JoinHandle<()>>; 2]) {
    for handle in handles.into_iter().flatten() {
        let _ = handle.await;
    }
}

impl ProcessBuilder {
    /// Streams the child's output and waits for completion.
    pub(super) async fn run_child(
        &self,
        name: &str,
        cmd_line: &str,
        child: &mut Child,
    ) -> std::result::Result<ProcessOutput, ProcessError> {
        let (stdout_tx, mut stdout_rx) = mpsc::unbounded_channel();
        let (stderr_tx, mut stderr_rx) = mpsc::unbounded_channel();

        let readers = [
            spawn_reader(
                child.stdout.take(),
                StreamReader {
                    flags: self.stdout_config(),
                    encoding: self.encoding(),
                    process_name: name.to_string(),
                    stream_name: "stdout",
                },
                stdout_tx,
            ),
            spawn_reader(
                child.stderr.take(),
                StreamReader {
                    flags: self.stderr_config(),
                    encoding: self.encoding(),
                    process_name: name.to_string(),
                    stream_name: "stderr",
                },
                stderr_tx,
            ),
        ];

        let output_error = |e: std::io::Error| ProcessError::OutputError {
            command: cmd_line.to_string(),
            message: e.to_string(),
        };

        let status = if let Some(timeout) = self.timeout_duration() {
            tokio::select! {
                status = child.wait() => status.map_err(output_error)?,
                () = tokio::time::sleep(timeout) => {
                    warn!(process = %name, timeout = ?timeout, "process timed out");
                    child.kill().await.ok();
                    let _ = child.wait().await;
                    for handle in readers.into_iter().flatten() {
                        handle.abort();
                    }
                    return Err(ProcessError::Timeout {
                        command: cmd_line.to_string(),
                        timeout_secs: timeout.as_secs(),
                    });
                }
            }
        } else {
            child.wait().await.map_err(output_error)?
        };

        await_readers(readers).await;

        Ok(ProcessOutput::new(
            status.code().unwrap_or(-1),
            collect_output(&mut stdout_rx),
            collect_output(&mut stderr_rx),
        ))
    }
}
