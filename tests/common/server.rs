//! Test server management.
//!
//! Spawns and manages ircserv instances for integration testing.

use std::process::{Child, Command, Stdio};
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::sleep;

/// Password every test server is started with.
pub const PASSWORD: &str = "hunter2";

/// Idle policy for a test server, in seconds.
#[derive(Debug, Clone, Copy)]
pub struct Timeouts {
    pub registration: u64,
    pub ping: u64,
    pub timeout: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            registration: 30,
            ping: 60,
            timeout: 60,
        }
    }
}

/// A test server instance.
pub struct TestServer {
    child: Child,
    port: u16,
    // Held so the config outlives the process.
    _dir: TempDir,
}

impl TestServer {
    /// Spawn a server with the default idle policy.
    pub async fn spawn(port: u16) -> anyhow::Result<Self> {
        Self::spawn_with_timeouts(port, Timeouts::default()).await
    }

    /// Spawn a server with custom idle timeouts.
    pub async fn spawn_with_timeouts(port: u16, timeouts: Timeouts) -> anyhow::Result<Self> {
        let dir = tempfile::tempdir()?;
        let config_path = dir.path().join("ircserv.toml");
        let config_content = format!(
            r#"
[server]
name = "ircserv"

[server.idle_timeouts]
registration = {registration}
ping = {ping}
timeout = {timeout}

[listen]
address = "127.0.0.1:{port}"

[limits]
poll_interval_ms = 100
"#,
            registration = timeouts.registration,
            ping = timeouts.ping,
            timeout = timeouts.timeout,
        );
        std::fs::write(&config_path, config_content)?;

        let child = Command::new(env!("CARGO_BIN_EXE_ircserv"))
            .arg(port.to_string())
            .arg(PASSWORD)
            .arg(&config_path)
            .env("RUST_LOG", "warn")
            .stdout(Stdio::null())
            .spawn()?;

        let server = Self {
            child,
            port,
            _dir: dir,
        };
        server.wait_until_ready().await?;
        Ok(server)
    }

    /// Wait until the server is accepting connections.
    async fn wait_until_ready(&self) -> anyhow::Result<()> {
        for _ in 0..50 {
            if tokio::net::TcpStream::connect(("127.0.0.1", self.port))
                .await
                .is_ok()
            {
                return Ok(());
            }
            sleep(Duration::from_millis(100)).await;
        }
        anyhow::bail!("Server failed to start within 5 seconds")
    }

    /// Get the server address.
    pub fn address(&self) -> String {
        format!("127.0.0.1:{}", self.port)
    }

    /// Connect a client without registering it.
    pub async fn connect(&self, nick: &str) -> anyhow::Result<super::client::TestClient> {
        super::client::TestClient::connect(&self.address(), nick).await
    }

    /// Connect and complete registration, discarding the welcome burst.
    #[allow(dead_code)]
    pub async fn register(&self, nick: &str) -> anyhow::Result<super::client::TestClient> {
        let mut client = self.connect(nick).await?;
        client.register(PASSWORD).await?;
        Ok(client)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
