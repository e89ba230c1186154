//! Maps the raw argument vector onto exactly one repository call.
//!
//! Token 0 selects the command; anything unrecognized (including no tokens
//! at all) falls back to the help text. Only `add` validates argument
//! presence here, before any connection is opened.

use std::io::{self, BufRead, Write};

pub const HELP: &str = "\
spesa - an expense recording system

Commands:

  add AMOUNT MEMO   record a new expense dated today
  list              list all recorded expenses
  search QUERY      list expenses whose memo contains QUERY
  delete ID         remove the expense with the given id
  clear             remove all expenses and reset the id sequence
";

const USAGE_ADD: &str = "You must provide an amount and memo.";

/// A repository-backed command with its arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    List,
    Add { amount: String, memo: String },
    Search { pattern: String },
    Delete { id: String },
    Clear,
}

/// Outcome of parsing the argument vector. `Usage` and `Help` never reach
/// the repository.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Parsed {
    Command(Command),
    Usage(&'static str),
    Help,
}

pub fn parse(tokens: &[String]) -> Parsed {
    let Some(command) = tokens.first() else {
        return Parsed::Help;
    };

    match command.as_str() {
        "list" => Parsed::Command(Command::List),
        "add" => match (tokens.get(1), tokens.get(2)) {
            (Some(amount), Some(memo)) if !amount.is_empty() && !memo.is_empty() => {
                Parsed::Command(Command::Add {
                    amount: amount.clone(),
                    memo: memo.clone(),
                })
            }
            _ => Parsed::Usage(USAGE_ADD),
        },
        // An absent pattern degenerates to matching everything.
        "search" => Parsed::Command(Command::Search {
            pattern: tokens.get(1).cloned().unwrap_or_default(),
        }),
        // The id is passed through unchanged; anything that is not a valid
        // id simply matches no row.
        "delete" => Parsed::Command(Command::Delete {
            id: tokens.get(1).cloned().unwrap_or_default(),
        }),
        "clear" => Parsed::Command(Command::Clear),
        _ => Parsed::Help,
    }
}

/// Asks for a yes/no confirmation before the irreversible clear. Only an
/// exact case-insensitive `y` proceeds; anything else refuses.
pub fn confirm_clear(input: &mut impl BufRead, out: &mut impl Write) -> io::Result<bool> {
    write!(out, "This will remove all expenses. Are you sure? (y/n) ")?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().eq_ignore_ascii_case("y"))
}
