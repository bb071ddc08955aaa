use std::fmt;

use super::util::{validate_param, write_cmd, write_cmd_freeform};
use super::Command;

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::NICK(n) => write_cmd_freeform(f, "NICK", &[n]),
            Command::JOIN(c) => write_cmd(f, "JOIN", &[c]),
            Command::PART(c, r) => write_cmd_freeform(f, "PART", &[c, r]),
            Command::QUIT(r) => write_cmd_freeform(f, "QUIT", &[r]),
            Command::PRIVMSG(t, m) => write_cmd_freeform(f, "PRIVMSG", &[t, m]),
            Command::KICK(c, n, r) => write_cmd_freeform(f, "KICK", &[c, n, r]),
            Command::INVITE(n, c) => write_cmd(f, "INVITE", &[n, c]),
            Command::TOPIC(c, t) => write_cmd_freeform(f, "TOPIC", &[c, t]),
            Command::MODE(raw) => {
                validate_param(raw)?;
                f.write_str("MODE ")?;
                f.write_str(raw)
            }
            Command::PING(t) => write_cmd_freeform(f, "PING", &[t]),
            Command::PONG(s, t) => write_cmd_freeform(f, "PONG", &[s, t]),
            Command::CAP(t, sub, caps) => write_cmd_freeform(f, "CAP", &[t, sub, caps]),
            Command::ERROR(m) => write_cmd_freeform(f, "ERROR", &[m]),
            Command::Response(resp, args) => write_cmd(f, &resp.to_string(), args),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::Response;

    #[test]
    fn test_freeform_always_colons() {
        assert_eq!(
            Command::PRIVMSG("#c".into(), "hi".into()).to_string(),
            "PRIVMSG #c :hi"
        );
        assert_eq!(Command::QUIT("bye".into()).to_string(), "QUIT :bye");
        assert_eq!(
            Command::CAP("*".into(), "LS".into(), String::new()).to_string(),
            "CAP * LS :"
        );
        assert_eq!(
            Command::KICK("#c".into(), "bob".into(), "No reason".into()).to_string(),
            "KICK #c bob :No reason"
        );
    }

    #[test]
    fn test_numeric_colon_only_when_needed() {
        let welcome = Command::Response(
            Response::RPL_WELCOME,
            vec!["alice".into(), "Welcome home".into()],
        );
        assert_eq!(welcome.to_string(), "001 alice :Welcome home");

        let umode = Command::Response(Response::RPL_UMODEIS, vec!["alice".into(), "+".into()]);
        assert_eq!(umode.to_string(), "221 alice +");
    }

    #[test]
    fn test_mode_is_relayed_verbatim() {
        assert_eq!(
            Command::MODE("#c +kl secret 5".into()).to_string(),
            "MODE #c +kl secret 5"
        );
    }

    #[test]
    fn test_join_and_invite_plain() {
        assert_eq!(Command::JOIN("#c".into()).to_string(), "JOIN #c");
        assert_eq!(
            Command::INVITE("bob".into(), "#c".into()).to_string(),
            "INVITE bob #c"
        );
    }
}
