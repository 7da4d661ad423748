//! Parsing of interactive shell lines.
//!
//! A line is a keyword followed by its argument. For `add` and `stop` the
//! argument is the rest of the line, so table names may contain spaces.

use nom::{
    character::complete::{alpha1, digit1, space0},
    combinator::{all_consuming, map_res, opt},
    sequence::delimited,
    IResult,
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Stop(String),
    List,
    Watch(Option<u32>),
    History(Option<usize>),
    Help,
    Quit,
    Empty,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}'")]
    Unknown(String),

    #[error("'{command}' expects a number, got '{argument}'")]
    BadCount { command: String, argument: String },

    #[error("'{0}' takes no argument")]
    UnexpectedArgument(String),
}

fn keyword(input: &str) -> IResult<&str, &str> {
    alpha1(input)
}

fn count<T: std::str::FromStr>(input: &str) -> IResult<&str, Option<T>> {
    all_consuming(delimited(
        space0,
        opt(map_res(digit1, |digits: &str| digits.parse::<T>())),
        space0,
    ))(input)
}

fn parse_count<T: std::str::FromStr>(
    command: &str,
    argument: &str,
) -> Result<Option<T>, CommandError> {
    count(argument)
        .map(|(_, n)| n)
        .map_err(|_| CommandError::BadCount {
            command: command.to_string(),
            argument: argument.trim().to_string(),
        })
}

fn no_argument(command: &str, argument: &str, parsed: Command) -> Result<Command, CommandError> {
    if argument.trim().is_empty() {
        Ok(parsed)
    } else {
        Err(CommandError::UnexpectedArgument(command.to_string()))
    }
}

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Empty);
    }

    let first_word = || line.split_whitespace().next().unwrap_or(line).to_string();

    let (argument, word) = keyword(line).map_err(|_| CommandError::Unknown(first_word()))?;
    // "add5" or "stop:" are not keywords
    if !argument.is_empty() && !argument.starts_with(char::is_whitespace) {
        return Err(CommandError::Unknown(first_word()));
    }

    let command = word.to_ascii_lowercase();
    match command.as_str() {
        "add" => Ok(Command::Add(argument.trim().to_string())),
        "stop" => Ok(Command::Stop(argument.trim().to_string())),
        "list" | "status" => no_argument(&command, argument, Command::List),
        "watch" => parse_count(&command, argument).map(Command::Watch),
        "history" => parse_count(&command, argument).map(Command::History),
        "help" => no_argument(&command, argument, Command::Help),
        "quit" | "exit" => no_argument(&command, argument, Command::Quit),
        _ => Err(CommandError::Unknown(word.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_name_is_rest_of_line() {
        assert_eq!(
            parse_command("add Table 3"),
            Ok(Command::Add("Table 3".to_string()))
        );
        assert_eq!(
            parse_command("  STOP   Big Pool Table  \n"),
            Ok(Command::Stop("Big Pool Table".to_string()))
        );
        assert_eq!(
            parse_command("add Snooker, \"left\""),
            Ok(Command::Add("Snooker, \"left\"".to_string()))
        );
    }

    #[test]
    fn test_missing_table_name_parses_as_empty() {
        assert_eq!(parse_command("add"), Ok(Command::Add(String::new())));
        assert_eq!(parse_command("stop   "), Ok(Command::Stop(String::new())));
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse_command("list"), Ok(Command::List));
        assert_eq!(parse_command("status"), Ok(Command::List));
        assert_eq!(parse_command("Help"), Ok(Command::Help));
        assert_eq!(parse_command("quit"), Ok(Command::Quit));
        assert_eq!(parse_command("exit"), Ok(Command::Quit));
        assert_eq!(parse_command(""), Ok(Command::Empty));
        assert_eq!(parse_command("   \t"), Ok(Command::Empty));
    }

    #[test]
    fn test_counts() {
        assert_eq!(parse_command("watch"), Ok(Command::Watch(None)));
        assert_eq!(parse_command("watch 3"), Ok(Command::Watch(Some(3))));
        assert_eq!(parse_command("history"), Ok(Command::History(None)));
        assert_eq!(parse_command("history 20 "), Ok(Command::History(Some(20))));
        assert_eq!(
            parse_command("history ten"),
            Err(CommandError::BadCount {
                command: "history".to_string(),
                argument: "ten".to_string(),
            })
        );
        assert!(matches!(
            parse_command("watch 99999999999"),
            Err(CommandError::BadCount { .. })
        ));
    }

    #[test]
    fn test_rejected_lines() {
        assert_eq!(
            parse_command("start Table 1"),
            Err(CommandError::Unknown("start".to_string()))
        );
        assert_eq!(
            parse_command("add5"),
            Err(CommandError::Unknown("add5".to_string()))
        );
        assert_eq!(
            parse_command("42"),
            Err(CommandError::Unknown("42".to_string()))
        );
        assert_eq!(
            parse_command("list everything"),
            Err(CommandError::UnexpectedArgument("list".to_string()))
        );
    }
}
