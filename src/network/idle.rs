//! Keepalive and timeout policy.
//!
//! The monitor only decides; the gateway carries out the actions so that
//! evictions go through the normal disconnect path.

use std::time::{Duration, Instant};

use crate::config::IdleTimeoutsConfig;
use crate::state::{ConnId, Matrix};

/// What the gateway should do with one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdleAction {
    /// Send a keepalive PING and start the reply clock.
    Ping(ConnId),
    /// Drop the session with the given reason.
    Evict(ConnId, String),
}

/// Sweeps sessions once per multiplexer cycle.
#[derive(Debug, Clone)]
pub struct IdleMonitor {
    registration: Duration,
    ping: Duration,
    timeout: Duration,
}

impl IdleMonitor {
    pub fn new(config: &IdleTimeoutsConfig) -> Self {
        Self {
            registration: Duration::from_secs(config.registration),
            ping: Duration::from_secs(config.ping),
            timeout: Duration::from_secs(config.timeout),
        }
    }

    /// Collect the actions due at `now`, in connection order.
    pub fn sweep(&self, matrix: &Matrix, now: Instant) -> Vec<IdleAction> {
        let mut actions = Vec::new();
        for id in matrix.session_ids() {
            let Some(session) = matrix.session(id) else {
                continue;
            };

            if !session.is_registered() {
                if now.saturating_duration_since(session.connected_at) > self.registration {
                    actions.push(IdleAction::Evict(id, "Registration timeout".to_string()));
                }
                continue;
            }

            match session.ping_sent_at {
                Some(sent) if session.ping_pending => {
                    if now.saturating_duration_since(sent) > self.timeout {
                        let waited = (self.ping + self.timeout).as_secs();
                        actions.push(IdleAction::Evict(
                            id,
                            format!("Ping timeout: {waited} seconds"),
                        ));
                    }
                }
                _ => {
                    if now.saturating_duration_since(session.last_activity) > self.ping {
                        actions.push(IdleAction::Ping(id));
                    }
                }
            }
        }
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ServerInfo, Session};
    use chrono::Utc;

    fn setup() -> (Matrix, IdleMonitor, Instant) {
        let matrix = Matrix::new(
            ServerInfo {
                name: "ircserv".into(),
                version: "1.0".into(),
                created: Utc::now(),
                password: "pw".into(),
            },
            4096,
        );
        let monitor = IdleMonitor::new(&IdleTimeoutsConfig::default());
        (matrix, monitor, Instant::now())
    }

    fn add(matrix: &mut Matrix, n: usize, at: Instant, registered: bool) -> ConnId {
        let id = ConnId(n);
        let mut session = Session::new(id, "127.0.0.1:6000".parse().unwrap(), at);
        if registered {
            session.registration.password = true;
            session.registration.nick = true;
            session.registration.user = true;
            assert!(session.registration.try_complete());
        }
        matrix.add_session(session);
        id
    }

    #[test]
    fn test_registration_deadline() {
        let (mut matrix, monitor, t0) = setup();
        let id = add(&mut matrix, 2, t0, false);

        assert!(monitor.sweep(&matrix, t0 + Duration::from_secs(30)).is_empty());
        assert_eq!(
            monitor.sweep(&matrix, t0 + Duration::from_secs(31)),
            vec![IdleAction::Evict(id, "Registration timeout".into())]
        );
    }

    #[test]
    fn test_ping_then_timeout() {
        let (mut matrix, monitor, t0) = setup();
        let id = add(&mut matrix, 2, t0, true);

        assert!(monitor.sweep(&matrix, t0 + Duration::from_secs(60)).is_empty());
        let t1 = t0 + Duration::from_secs(61);
        assert_eq!(monitor.sweep(&matrix, t1), vec![IdleAction::Ping(id)]);

        let session = matrix.session_mut(id).unwrap();
        session.ping_pending = true;
        session.ping_sent_at = Some(t1);

        assert!(monitor.sweep(&matrix, t1 + Duration::from_secs(60)).is_empty());
        assert_eq!(
            monitor.sweep(&matrix, t1 + Duration::from_secs(61)),
            vec![IdleAction::Evict(id, "Ping timeout: 120 seconds".into())]
        );
    }

    #[test]
    fn test_activity_settles_ping() {
        let (mut matrix, monitor, t0) = setup();
        let id = add(&mut matrix, 2, t0, true);
        let t1 = t0 + Duration::from_secs(61);

        let session = matrix.session_mut(id).unwrap();
        session.ping_pending = true;
        session.ping_sent_at = Some(t1);
        session.touch(t1 + Duration::from_secs(5));

        assert!(monitor.sweep(&matrix, t1 + Duration::from_secs(61)).is_empty());
    }
}
