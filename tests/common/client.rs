//! Test IRC client.
//!
//! Sends raw lines and reads server lines one at a time. Assertions work on
//! the raw text; [`verb`] pulls out the command or numeric.

use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::time::timeout;

/// The command or numeric of a server line, skipping any prefix.
pub fn verb(line: &str) -> &str {
    let mut words = line.split(' ');
    match words.next() {
        Some(first) if first.starts_with(':') => words.next().unwrap_or(""),
        Some(first) => first,
        None => "",
    }
}

/// A test IRC client.
pub struct TestClient {
    reader: BufReader<OwnedReadHalf>,
    writer: BufWriter<OwnedWriteHalf>,
    nick: String,
}

impl TestClient {
    /// Connect to a test server.
    pub async fn connect(address: &str, nick: &str) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(address).await?;

        // Split stream for reading and writing
        let (read_half, write_half) = stream.into_split();
        Ok(Self {
            reader: BufReader::new(read_half),
            writer: BufWriter::new(write_half),
            nick: nick.to_string(),
        })
    }

    /// Send a raw IRC line, adding CRLF if missing.
    pub async fn send_raw(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        if !line.ends_with('\n') {
            self.writer.write_all(b"\r\n").await?;
        }
        self.writer.flush().await?;
        Ok(())
    }

    /// Send bytes exactly as given.
    #[allow(dead_code)]
    pub async fn send_bytes(&mut self, data: &[u8]) -> anyhow::Result<()> {
        self.writer.write_all(data).await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Receive a single line.
    #[allow(dead_code)]
    pub async fn recv(&mut self) -> anyhow::Result<String> {
        self.recv_timeout(Duration::from_secs(5)).await
    }

    /// Receive a line with a timeout. EOF is an error.
    pub async fn recv_timeout(&mut self, dur: Duration) -> anyhow::Result<String> {
        let mut line = String::new();
        let n = timeout(dur, self.reader.read_line(&mut line)).await??;
        if n == 0 {
            anyhow::bail!("connection closed");
        }
        Ok(line.trim_end().to_string())
    }

    /// Receive lines until one satisfies `predicate`; returns all of them.
    pub async fn recv_until<F>(&mut self, predicate: F) -> anyhow::Result<Vec<String>>
    where
        F: FnMut(&str) -> bool,
    {
        self.recv_until_timeout(Duration::from_secs(5), predicate)
            .await
    }

    /// As [`recv_until`](Self::recv_until) with a per-line timeout.
    pub async fn recv_until_timeout<F>(
        &mut self,
        dur: Duration,
        mut predicate: F,
    ) -> anyhow::Result<Vec<String>>
    where
        F: FnMut(&str) -> bool,
    {
        let mut lines = Vec::new();
        loop {
            let line = self.recv_timeout(dur).await?;
            let done = predicate(&line);
            lines.push(line);
            if done {
                return Ok(lines);
            }
        }
    }

    /// Read until a line with the given verb or numeric arrives.
    #[allow(dead_code)]
    pub async fn expect(&mut self, wanted: &str) -> anyhow::Result<String> {
        let lines = self.recv_until(|l| verb(l) == wanted).await?;
        lines
            .into_iter()
            .last()
            .ok_or_else(|| anyhow::anyhow!("no line with {wanted}"))
    }

    /// Discard whatever arrives within a short window.
    #[allow(dead_code)]
    pub async fn drain(&mut self) {
        while self
            .recv_timeout(Duration::from_millis(200))
            .await
            .is_ok()
        {}
    }

    /// Register with PASS/NICK/USER and wait for the end of the welcome burst.
    pub async fn register(&mut self, password: &str) -> anyhow::Result<Vec<String>> {
        self.send_raw(&format!("PASS {password}")).await?;
        self.send_raw(&format!("NICK {}", self.nick)).await?;
        self.send_raw(&format!("USER {0} 0 * :Test User {0}", self.nick))
            .await?;
        self.recv_until(|l| verb(l) == "004").await
    }

    /// Send QUIT.
    #[allow(dead_code)]
    pub async fn quit(&mut self, reason: Option<&str>) -> anyhow::Result<()> {
        match reason {
            Some(reason) => self.send_raw(&format!("QUIT :{reason}")).await,
            None => self.send_raw("QUIT").await,
        }
    }
}
