// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Line commands read from stdin.

use thiserror::Error;

/// One user command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Forward,
    Backward,
    Seek(usize),
    ToggleAutoplay,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("`{0}` needs a frame number")]
    MissingIndex(String),
    #[error("`{0}` is not a frame number")]
    BadIndex(String),
}

pub const HELP: &str = "l/next forward | j/prev back | g N seek | r autoplay | q quit";

/// Parse one input line. Blank lines step forward.
pub fn parse(line: &str) -> Result<Command, InputError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(Command::Forward);
    };
    let cmd = match head.to_ascii_lowercase().as_str() {
        "l" | "next" | "f" => Command::Forward,
        "j" | "prev" | "b" => Command::Backward,
        "g" | "seek" | "goto" => {
            let arg = words
                .next()
                .ok_or_else(|| InputError::MissingIndex(head.to_string()))?;
            let index = arg
                .parse()
                .map_err(|_| InputError::BadIndex(arg.to_string()))?;
            Command::Seek(index)
        }
        "r" | "autoplay" | "play" => Command::ToggleAutoplay,
        "h" | "help" | "?" => Command::Help,
        "q" | "quit" | "exit" => Command::Quit,
        _ => return Err(InputError::Unknown(head.to_string())),
    };
    Ok(cmd)
}
