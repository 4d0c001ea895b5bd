//! Session Handler
//!
//! Drives one interactive session: read lines, execute them, write replies,
//! until the client quits or the input ends.
//!
//! ## Session Lifecycle
//!
//! ```text
//! ┌──────────────────────────────┐
//! │      Main Loop               │
//! │                              │
//! │  ┌─────────────────────────┐ │
//! │  │ Split complete lines    │◄┼──── read bytes into buffer
//! │  └───────────┬─────────────┘ │
//! │              ▼               │
//! │  ┌─────────────────────────┐ │
//! │  │ Parse + execute         │ │
//! │  └───────────┬─────────────┘ │
//! │              ▼               │
//! │  ┌─────────────────────────┐ │
//! │  │ Write reply, flush      │ │
//! │  └───────────┬─────────────┘ │
//! │              ▼               │
//! │         [Loop back]          │
//! └──────────────────────────────┘
//!        │ QUIT or EOF
//!        ▼
//!   session ends
//! ```
//!
//! ## Buffer Management
//!
//! Input is accumulated in a `BytesMut`: a read may deliver half a line, or
//! several lines at once. A final line without a trailing newline is still
//! executed at end of input.

use crate::commands::RequestHandler;
use crate::protocol::{parse_bytes, Request, Response};
use crate::storage::ItemStore;
use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufWriter};
use tracing::{debug, info, trace, warn};

/// Maximum length of a single command line (64 KB)
pub const MAX_LINE_SIZE: usize = 64 * 1024;

/// Initial buffer capacity
const INITIAL_BUFFER_SIZE: usize = 4096;

/// Statistics for one session
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    /// Command lines executed, including ones that failed to parse
    pub commands_processed: u64,
    /// Total bytes read
    pub bytes_read: u64,
    /// Total bytes written
    pub bytes_written: u64,
}

/// Errors that end a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// I/O error on the input or output stream
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A line exceeded [`MAX_LINE_SIZE`] without a newline
    #[error("line too long: {size} bytes (max: {max})")]
    LineTooLong { size: usize, max: usize },
}

/// Whether the loop should keep going after a line.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Handles a single session over a reader/writer pair.
pub struct SessionHandler<'a, R, W, S> {
    reader: R,
    writer: BufWriter<W>,

    /// Buffer for incoming data
    buffer: BytesMut,

    /// Bytes of `buffer` already searched for a newline
    scanned: usize,

    /// The request handler, borrowed for the session
    request_handler: &'a mut RequestHandler<S>,

    stats: SessionStats,
}

impl<'a, R, W, S> SessionHandler<'a, R, W, S>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
    S: ItemStore,
{
    pub fn new(reader: R, writer: W, request_handler: &'a mut RequestHandler<S>) -> Self {
        Self {
            reader,
            writer: BufWriter::new(writer),
            buffer: BytesMut::with_capacity(INITIAL_BUFFER_SIZE),
            scanned: 0,
            request_handler,
            stats: SessionStats::default(),
        }
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Runs the session until QUIT, end of input, or an error.
    pub async fn run(&mut self) -> Result<(), SessionError> {
        info!("Session started");

        let result = self.main_loop().await;

        match &result {
            Ok(()) => info!(
                commands = self.stats.commands_processed,
                "Session ended"
            ),
            Err(e) => warn!(error = %e, "Session error"),
        }

        result
    }

    /// The main read-execute-respond loop.
    async fn main_loop(&mut self) -> Result<(), SessionError> {
        loop {
            while let Some(line) = self.next_line() {
                if self.process_line(&line).await? == Flow::Quit {
                    return Ok(());
                }
            }

            if !self.read_more_data().await? {
                // End of input: run whatever is left as a final line
                if !self.buffer.is_empty() {
                    let line = self.buffer.split().freeze();
                    self.process_line(&line).await?;
                }
                return Ok(());
            }
        }
    }

    /// Splits the next complete line off the buffer, without its terminator.
    fn next_line(&mut self) -> Option<Bytes> {
        match self.buffer[self.scanned..].iter().position(|&b| b == b'\n') {
            Some(pos) => {
                let mut line = self.buffer.split_to(self.scanned + pos + 1);
                self.scanned = 0;
                line.truncate(line.len() - 1);
                if line.last() == Some(&b'\r') {
                    line.truncate(line.len() - 1);
                }
                Some(line.freeze())
            }
            None => {
                self.scanned = self.buffer.len();
                None
            }
        }
    }

    /// Parses and executes one line, then writes the reply.
    async fn process_line(&mut self, line: &[u8]) -> Result<Flow, SessionError> {
        if line.iter().all(u8::is_ascii_whitespace) {
            return Ok(Flow::Continue);
        }
        trace!(bytes = line.len(), "Parsed line");

        let (response, flow) = match parse_bytes(line) {
            Ok(request) => {
                let flow = if request == Request::Quit {
                    Flow::Quit
                } else {
                    Flow::Continue
                };
                (self.request_handler.execute(request), flow)
            }
            Err(e) => {
                warn!(error = %e, "Parse error");
                (Response::error(format!("ERR {}", e)), Flow::Continue)
            }
        };
        self.stats.commands_processed += 1;

        self.send_response(&response).await?;
        Ok(flow)
    }

    /// Reads more data into the buffer. Returns `false` at end of input.
    async fn read_more_data(&mut self) -> Result<bool, SessionError> {
        if self.buffer.len() >= MAX_LINE_SIZE {
            return Err(SessionError::LineTooLong {
                size: self.buffer.len(),
                max: MAX_LINE_SIZE,
            });
        }

        if self.buffer.capacity() - self.buffer.len() < 1024 {
            self.buffer.reserve(INITIAL_BUFFER_SIZE);
        }

        let n = self.reader.read_buf(&mut self.buffer).await?;
        if n == 0 {
            debug!(buffered = self.buffer.len(), "End of input");
            return Ok(false);
        }

        self.stats.bytes_read += n as u64;
        trace!(bytes = n, "Read data");
        Ok(true)
    }

    async fn send_response(&mut self, response: &Response) -> Result<(), SessionError> {
        let bytes = response.serialize();
        self.writer.write_all(&bytes).await?;
        self.writer.flush().await?;
        self.stats.bytes_written += bytes.len() as u64;
        trace!(bytes = bytes.len(), "Sent response");
        Ok(())
    }
}

/// Runs a session to completion.
///
/// This is a convenience function that creates a [`SessionHandler`] and
/// runs it, returning the session's statistics.
pub async fn run_session<R, W, S>(
    reader: R,
    writer: W,
    request_handler: &mut RequestHandler<S>,
) -> Result<SessionStats, SessionError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
    S: ItemStore,
{
    let mut session = SessionHandler::new(reader, writer, request_handler);
    session.run().await?;
    Ok(session.stats())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::BoundedStore;

    fn create_handler() -> RequestHandler<BoundedStore> {
        RequestHandler::new(BoundedStore::new(10))
    }

    async fn transcript(input: &[u8]) -> (String, SessionStats) {
        let mut handler = create_handler();
        let mut output = Vec::new();
        let stats = run_session(input, &mut output, &mut handler).await.unwrap();
        (String::from_utf8(output).unwrap(), stats)
    }

    #[tokio::test]
    async fn test_session_scenario() {
        let (output, stats) =
            transcript(b"CREATE a\nCREATE b\nDELETE 1\nLIST 10\nCOUNT\nGET 1\n").await;

        assert_eq!(
            output,
            "(integer) 1\n\
             (integer) 2\n\
             (integer) 1\n\
             1) id=2 name=\"b\" category=\"default\"\n\
             (integer) 1\n\
             (nil)\n"
        );
        assert_eq!(stats.commands_processed, 6);
    }

    #[tokio::test]
    async fn test_crlf_and_blank_lines() {
        let (output, stats) = transcript(b"\r\n  \nCREATE a\r\nGET 1\r\n").await;
        assert_eq!(output, "(integer) 1\n\"a\"\n");
        assert_eq!(stats.commands_processed, 2);
    }

    #[tokio::test]
    async fn test_final_line_without_newline() {
        let (output, _) = transcript(b"CREATE a\nGET 1").await;
        assert_eq!(output, "(integer) 1\n\"a\"\n");
    }

    #[tokio::test]
    async fn test_parse_error_does_not_end_session() {
        let (output, stats) = transcript(b"FROB\nGET x\nPING\n").await;
        assert_eq!(
            output,
            "(error) ERR unknown command 'FROB'\n\
             (error) ERR invalid id 'x'\n\
             PONG\n"
        );
        assert_eq!(stats.commands_processed, 3);
    }

    #[tokio::test]
    async fn test_quit_stops_reading() {
        let mut handler = create_handler();
        let mut output = Vec::new();
        run_session(&b"CREATE a\nQUIT\nCREATE b\n"[..], &mut output, &mut handler)
            .await
            .unwrap();

        assert_eq!(output, b"(integer) 1\nOK\n");
        assert_eq!(handler.handle_count(), 1);
    }

    #[tokio::test]
    async fn test_line_split_across_reads() {
        let reader = tokio_test::io::Builder::new()
            .read(b"CRE")
            .read(b"ATE a\nGE")
            .read(b"T 1\n")
            .build();
        let writer = tokio_test::io::Builder::new()
            .write(b"(integer) 1\n")
            .write(b"\"a\"\n")
            .build();

        let mut handler = create_handler();
        let stats = run_session(reader, writer, &mut handler).await.unwrap();
        assert_eq!(stats.commands_processed, 2);
        assert_eq!(stats.bytes_read, 15);
        assert_eq!(stats.bytes_written, 16);
    }

    #[tokio::test]
    async fn test_line_too_long() {
        let input = vec![b'x'; MAX_LINE_SIZE + 10];
        let mut handler = create_handler();
        let mut output = Vec::new();

        let result = run_session(&input[..], &mut output, &mut handler).await;
        assert!(matches!(result, Err(SessionError::LineTooLong { .. })));
    }

    #[tokio::test]
    async fn test_empty_input() {
        let (output, stats) = transcript(b"").await;
        assert!(output.is_empty());
        assert_eq!(stats, SessionStats::default());
    }
}
