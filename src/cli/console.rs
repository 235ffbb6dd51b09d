//! Console commands read from stdin in interactive mode

use std::str::FromStr;

use thiserror::Error;

/// One line of console input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Start,
    Stop,
    Save,
    /// `None` shows the current value
    Name(Option<String>),
    Format(Option<String>),
    Output(Option<String>),
    Scan(Option<String>),
    Status,
    Help,
    Quit,
    /// Blank line
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown command: \"{0}\". Type 'help' for the list of commands.")]
pub struct UnknownCommand(pub String);

impl FromStr for ConsoleCommand {
    type Err = UnknownCommand;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let arg = (!rest.is_empty()).then(|| rest.to_string());

        let command = match word.to_lowercase().as_str() {
            "" => Self::Empty,
            "start" | "r" | "record" => Self::Start,
            "stop" | "s" => Self::Stop,
            "save" | "w" => Self::Save,
            "name" | "n" => Self::Name(arg),
            "format" | "f" => Self::Format(arg),
            "output" | "o" => Self::Output(arg),
            "scan" => Self::Scan(arg),
            "status" => Self::Status,
            "help" | "h" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            _ => return Err(UnknownCommand(word.to_string())),
        };
        Ok(command)
    }
}
