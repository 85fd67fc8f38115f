//! # Line Commands
//!
//! What the cashier types at the `till>` prompt.
//!
//! | Input | Action |
//! |---|---|
//! | `add <id>` | look the product up and add one unit |
//! | `+ <id>` / `- <id>` | quantity up / down by one |
//! | `qty <id> <delta>` | change quantity by any amount |
//! | `cash <amount>` | set the cash field (blank clears it) |
//! | `checkout` | run checkout |
//! | `cart` | show the cart |
//! | `clear` | drop the current sale |
//! | `refresh` | reload stock levels |
//! | `stock` | show the last stock levels |
//! | `reprint` | print the last receipt again |
//! | `help` | list commands |
//! | `quit` | leave |

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PosCommand {
    Add(String),
    ChangeQuantity { id: String, delta: i64 },
    Cash(String),
    Checkout,
    Cart,
    Clear,
    Refresh,
    Stock,
    Reprint,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command '{0}'. Type 'help' for the list.")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("'{0}' is not a whole number")]
    NotANumber(String),
}

pub const HELP: &str = "\
add <id>            add one unit of a product
+ <id> / - <id>     quantity up / down by one
qty <id> <delta>    change quantity by any amount
cash <amount>       set the cash tendered (blank clears)
checkout            record the sale
cart                show the cart
clear               drop the current sale
refresh             reload stock levels
stock               show the last stock levels
reprint             print the last receipt again
quit                leave";

/// Parses one input line. Blank lines are `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<PosCommand>, CommandError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "" => return Ok(None),
        "add" | "a" => PosCommand::Add(single_arg(rest, "add <id>")?),
        "+" => PosCommand::ChangeQuantity {
            id: single_arg(rest, "+ <id>")?,
            delta: 1,
        },
        "-" => PosCommand::ChangeQuantity {
            id: single_arg(rest, "- <id>")?,
            delta: -1,
        },
        "qty" | "q" => {
            let mut args = rest.split_whitespace();
            match (args.next(), args.next(), args.next()) {
                (Some(id), Some(delta), None) => PosCommand::ChangeQuantity {
                    id: id.to_string(),
                    delta: delta
                        .parse()
                        .map_err(|_| CommandError::NotANumber(delta.to_string()))?,
                },
                _ => return Err(CommandError::Usage("qty <id> <delta>")),
            }
        }
        "cash" | "c" => PosCommand::Cash(rest.to_string()),
        "checkout" | "pay" => PosCommand::Checkout,
        "cart" | "ls" => PosCommand::Cart,
        "clear" => PosCommand::Clear,
        "refresh" => PosCommand::Refresh,
        "stock" => PosCommand::Stock,
        "reprint" => PosCommand::Reprint,
        "help" | "?" => PosCommand::Help,
        "quit" | "exit" => PosCommand::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(Some(command))
}

fn single_arg(rest: &str, usage: &'static str) -> Result<String, CommandError> {
    let mut args = rest.split_whitespace();
    match (args.next(), args.next()) {
        (Some(arg), None) => Ok(arg.to_string()),
        _ => Err(CommandError::Usage(usage)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cart_commands() {
        assert_eq!(parse("add 12"), Ok(Some(PosCommand::Add("12".into()))));
        assert_eq!(
            parse("  + p1 "),
            Ok(Some(PosCommand::ChangeQuantity {
                id: "p1".into(),
                delta: 1
            }))
        );
        assert_eq!(
            parse("qty p1 -3"),
            Ok(Some(PosCommand::ChangeQuantity {
                id: "p1".into(),
                delta: -3
            }))
        );
        assert_eq!(parse("CHECKOUT"), Ok(Some(PosCommand::Checkout)));
        assert_eq!(parse("stock"), Ok(Some(PosCommand::Stock)));
    }

    #[test]
    fn test_parse_cash_keeps_raw_text() {
        assert_eq!(parse("cash 300.50"), Ok(Some(PosCommand::Cash("300.50".into()))));
        assert_eq!(parse("cash"), Ok(Some(PosCommand::Cash(String::new()))));
        assert_eq!(parse("cash 12abc"), Ok(Some(PosCommand::Cash("12abc".into()))));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse(""), Ok(None));
        assert_eq!(parse("add"), Err(CommandError::Usage("add <id>")));
        assert_eq!(parse("add 1 2"), Err(CommandError::Usage("add <id>")));
        assert_eq!(parse("qty p1 lots"), Err(CommandError::NotANumber("lots".into())));
        assert!(matches!(parse("dance"), Err(CommandError::Unknown(_))));
    }
}
