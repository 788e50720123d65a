//! Line-oriented input.
//!
//! Each line is either a short text command (`login a@b.c secret`) or a
//! JSON-encoded [`Command`]. Approve and reject refer to a card of the
//! current view, and the command sent is the one that card carries.

use crate::error::{ConsoleError, Result as ConsoleErrorResult};

use mt_app::{Command, View};

use uuid::Uuid;

pub const HELP: &str = "\
commands:
  toggle                                  switch login / register form
  register <email> <password> <car>       create an account
  login <email> <password>
  logout
  search [text]                           filter the list (empty clears)
  add <car> <date> <type> [description]   admin only, date is YYYY-MM-DD
  approve <n|id>                          approve card n of the list
  reject <n|id>
  car <identifier>                        change your car identifier
  refresh
  help
  quit
  {\"command\": ...}                        any command as JSON";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

/// Which card a decision applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardRef {
    /// 1-based position in the rendered list
    Position(usize),
    Id(Uuid),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Send(Command),
    Decide { card: CardRef, decision: Decision },
    Help,
    Quit,
    Empty,
}

pub fn parse_line(line: &str) -> ConsoleErrorResult<Input> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Input::Empty);
    }
    if line.starts_with('{') {
        return Ok(Input::Send(serde_json::from_str(line)?));
    }

    let (keyword, rest) = match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    let input = match keyword.to_lowercase().as_str() {
        "toggle" => Input::Send(Command::ToggleAuthMode),
        "register" => {
            let [email, password, car @ ..] = args.as_slice() else {
                return Err(usage("register <email> <password> <car>"));
            };
            if car.is_empty() {
                return Err(usage("register <email> <password> <car>"));
            }
            Input::Send(Command::Register {
                email: email.to_string(),
                password: password.to_string(),
                car_identifier: car.join(" "),
            })
        }
        "login" => {
            let [email, password] = args.as_slice() else {
                return Err(usage("login <email> <password>"));
            };
            Input::Send(Command::Login {
                email: email.to_string(),
                password: password.to_string(),
            })
        }
        "logout" => Input::Send(Command::Logout),
        "search" => Input::Send(Command::SearchInput {
            text: rest.to_string(),
        }),
        "add" => {
            let [car, date, record_type, description @ ..] = args.as_slice() else {
                return Err(usage("add <car> <date> <type> [description]"));
            };
            Input::Send(Command::CreateRecord {
                car_identifier: car.to_string(),
                date: date.to_string(),
                record_type: record_type.to_string(),
                description: description.join(" "),
            })
        }
        "approve" => Input::Decide {
            card: parse_card_ref(&args, "approve <n|id>")?,
            decision: Decision::Approve,
        },
        "reject" => Input::Decide {
            card: parse_card_ref(&args, "reject <n|id>")?,
            decision: Decision::Reject,
        },
        "car" => {
            if rest.is_empty() {
                return Err(usage("car <identifier>"));
            }
            Input::Send(Command::ChangeCarIdentifier {
                car_identifier: rest.to_string(),
            })
        }
        "refresh" => Input::Send(Command::Refresh),
        "help" | "?" => Input::Help,
        "quit" | "exit" => Input::Quit,
        other => return Err(ConsoleError::input(format!("unknown command: {other}"))),
    };

    Ok(input)
}

fn parse_card_ref(args: &[&str], usage_text: &str) -> ConsoleErrorResult<CardRef> {
    let [target] = args else {
        return Err(usage(usage_text));
    };
    if let Ok(position) = target.parse::<usize>() {
        return Ok(CardRef::Position(position));
    }
    Uuid::parse_str(target)
        .map(CardRef::Id)
        .map_err(|_| ConsoleError::input(format!("not a card number or id: {target}")))
}

#[track_caller]
fn usage(text: &str) -> ConsoleError {
    ConsoleError::input(format!("usage: {text}"))
}

/// The command carried by the referenced card for `decision`.
pub fn resolve_decision(
    view: &View,
    card: &CardRef,
    decision: Decision,
) -> ConsoleErrorResult<Command> {
    let dashboard = view
        .as_dashboard()
        .ok_or_else(|| ConsoleError::input("sign in first"))?;

    let found = match card {
        CardRef::Position(position) => position
            .checked_sub(1)
            .and_then(|index| dashboard.cards.get(index)),
        CardRef::Id(id) => dashboard.cards.iter().find(|c| c.id == *id),
    }
    .ok_or_else(|| ConsoleError::input("no such card"))?;

    found
        .actions
        .iter()
        .map(|action| &action.command)
        .find(|command| match decision {
            Decision::Approve => matches!(command, Command::Approve { .. }),
            Decision::Reject => matches!(command, Command::Reject { .. }),
        })
        .cloned()
        .ok_or_else(|| ConsoleError::input("this card has no such action"))
}
