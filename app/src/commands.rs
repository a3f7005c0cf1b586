//! Line commands of the interactive signup shell

use std::str::FromStr;

use thiserror::Error;

/// Which verification flow a command targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Email,
    Sms,
}

impl FromStr for Channel {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "email" | "mail" => Ok(Channel::Email),
            "sms" | "phone" => Ok(Channel::Sms),
            other => Err(CommandError::UnknownChannel(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetEmail(String),
    SetPhone(String),
    SetCode(Channel, String),
    Send(Channel),
    Verify(Channel),
    SetNickname(String),
    CheckNickname,
    SetPassword(String),
    ConfirmPassword(String),
    Status,
    /// Form snapshot as JSON
    StatusJson,
    Submit,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command '{0}', type 'help' for the list")]
    Unknown(String),

    #[error("Unknown channel '{0}', expected 'email' or 'sms'")]
    UnknownChannel(String),

    #[error("Usage: {0}")]
    Usage(&'static str),
}

pub const HELP: &str = "\
Commands:
  email <address>          set the email address
  phone <010-1234-5678>    set the phone number
  send email|sms           send a verification code
  code email|sms <code>    enter a received code
  verify email|sms         verify the entered code
  nickname <name>          set the nickname
  check nickname           check nickname availability
  password <password>      set the password
  confirm <password>       repeat the password
  status [json]            show the form
  submit                   create the account
  help                     show this list
  quit                     leave";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        match head.to_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "email" => required(rest, "email <address>").map(Command::SetEmail),
            "phone" => required(rest, "phone <010-1234-5678>").map(Command::SetPhone),
            "send" => parse_channel(rest, "send email|sms").map(Command::Send),
            "verify" => parse_channel(rest, "verify email|sms").map(Command::Verify),
            "code" => {
                let usage = "code email|sms <code>";
                let (channel, code) = rest
                    .split_once(char::is_whitespace)
                    .ok_or(CommandError::Usage(usage))?;
                let code = required(code.trim(), usage)?;
                Ok(Command::SetCode(channel.parse()?, code))
            }
            "nickname" => required(rest, "nickname <name>").map(Command::SetNickname),
            "check" => match rest {
                "nickname" | "" => Ok(Command::CheckNickname),
                _ => Err(CommandError::Usage("check nickname")),
            },
            // Passwords keep inner and surrounding characters as typed
            "password" => required(rest, "password <password>").map(Command::SetPassword),
            "confirm" => required(rest, "confirm <password>").map(Command::ConfirmPassword),
            "status" => match rest {
                "" => Ok(Command::Status),
                "json" => Ok(Command::StatusJson),
                _ => Err(CommandError::Usage("status [json]")),
            },
            "submit" => Ok(Command::Submit),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn required(value: &str, usage: &'static str) -> Result<String, CommandError> {
    if value.is_empty() {
        Err(CommandError::Usage(usage))
    } else {
        Ok(value.to_string())
    }
}

fn parse_channel(value: &str, usage: &'static str) -> Result<Channel, CommandError> {
    if value.is_empty() {
        return Err(CommandError::Usage(usage));
    }
    value.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_commands() {
        assert_eq!(
            "email user@example.com".parse(),
            Ok(Command::SetEmail("user@example.com".to_string()))
        );
        assert_eq!(
            "  phone 010-1234-5678 ".parse(),
            Ok(Command::SetPhone("010-1234-5678".to_string()))
        );
        assert_eq!(
            "code sms 123456".parse(),
            Ok(Command::SetCode(Channel::Sms, "123456".to_string()))
        );
        assert_eq!(
            "password secret 12!".parse(),
            Ok(Command::SetPassword("secret 12!".to_string()))
        );
    }

    #[test]
    fn test_parse_action_commands() {
        assert_eq!("send email".parse(), Ok(Command::Send(Channel::Email)));
        assert_eq!("VERIFY sms".parse(), Ok(Command::Verify(Channel::Sms)));
        assert_eq!("check nickname".parse(), Ok(Command::CheckNickname));
        assert_eq!("check".parse(), Ok(Command::CheckNickname));
        assert_eq!("status".parse(), Ok(Command::Status));
        assert_eq!("status json".parse(), Ok(Command::StatusJson));
        assert_eq!("submit".parse(), Ok(Command::Submit));
        assert_eq!("?".parse(), Ok(Command::Help));
        assert_eq!("exit".parse(), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!(
            "launch".parse::<Command>(),
            Err(CommandError::Unknown("launch".to_string()))
        );
        assert_eq!(
            "send fax".parse::<Command>(),
            Err(CommandError::UnknownChannel("fax".to_string()))
        );
        assert_eq!(
            "send".parse::<Command>(),
            Err(CommandError::Usage("send email|sms"))
        );
        assert_eq!(
            "code email".parse::<Command>(),
            Err(CommandError::Usage("code email|sms <code>"))
        );
        assert_eq!(
            "email".parse::<Command>(),
            Err(CommandError::Usage("email <address>"))
        );
    }
}
