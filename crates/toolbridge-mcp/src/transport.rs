//! Stdio transport for the server side of MCP.
//!
//! Reads newline-delimited JSON-RPC messages from a reader (stdin in
//! production) and writes one response per line to a writer (stdout).

use crate::error::McpError;
use crate::jsonrpc::JsonRpcResponse;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, Lines};

/// Line-oriented transport over an async reader/writer pair.
pub struct StdioTransport<R, W> {
    lines: Lines<BufReader<R>>,
    writer: W,
}

impl StdioTransport<tokio::io::Stdin, tokio::io::Stdout> {
    /// Transport over the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(tokio::io::stdin(), tokio::io::stdout())
    }
}

impl<R, W> StdioTransport<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            lines: BufReader::new(reader).lines(),
            writer,
        }
    }

    /// Read the next non-blank line. `None` means the client closed its end.
    ///
    /// Cancel-safe: dropping the future before it completes loses no input.
    pub async fn next_message(&mut self) -> Result<Option<String>, McpError> {
        while let Some(line) = self.lines.next_line().await? {
            if !line.trim().is_empty() {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }

    /// Write one response followed by a newline and flush.
    pub async fn send(&mut self, response: &JsonRpcResponse) -> Result<(), McpError> {
        let mut serialized = serde_json::to_vec(response)?;
        serialized.push(b'\n');
        self.writer.write_all(&serialized).await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Flush and shut down the writer.
    pub async fn close(mut self) -> Result<(), McpError> {
        self.writer.flush().await?;
        self.writer.shutdown().await?;
        Ok(())
    }
}
