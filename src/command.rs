//! Parser for the `:` command line
//!
//! The buffer is matched against a fixed command table. Until Enter is pressed
//! the parser only reports which commands the text could still become.

/// Commands accepted after `:`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `:w` - commit deletions
    Write,
    /// `:wq` - commit deletions, then quit
    WriteQuit,
    /// `:q` - quit unless deletions are pending
    Quit,
    /// `:q!` / `:cq` - quit and discard marks
    ForceQuit,
}

const COMMANDS: &[(&str, Command)] = &[
    ("w", Command::Write),
    ("wq", Command::WriteQuit),
    ("q", Command::Quit),
    ("q!", Command::ForceQuit),
    ("cq", Command::ForceQuit),
];

/// State of a buffer starting with `:`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandState {
    /// More input is expected; holds the command names still reachable
    Pending(Vec<&'static str>),
    /// Enter was pressed on a known command
    Ready(Command),
    /// Enter was pressed on text that is not a command
    Unknown(String),
}

/// Whether `buffer` opens a command line
pub fn is_command_line(buffer: &str) -> bool {
    buffer.starts_with(':')
}

/// Interpret a `:`-prefixed buffer
pub fn parse(buffer: &str, enter: bool) -> CommandState {
    let body = buffer.strip_prefix(':').unwrap_or(buffer).trim();

    if !enter {
        let candidates = COMMANDS
            .iter()
            .map(|(name, _)| *name)
            .filter(|name| name.starts_with(body))
            .collect();
        return CommandState::Pending(candidates);
    }

    COMMANDS
        .iter()
        .find(|(name, _)| *name == body)
        .map(|(_, command)| CommandState::Ready(*command))
        .unwrap_or_else(|| CommandState::Unknown(body.to_string()))
}
