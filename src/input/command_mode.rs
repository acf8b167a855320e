use crate::events::EventId;

#[derive(Debug, PartialEq)]
pub enum Command {
    Quit,
    Reload,
    NewEvent(Option<String>),
    Edit(EventId),
    Delete(EventId),
    Theme(String),
    Help,
    Error(String),
}

pub fn parse_command(input: &str) -> Command {
    let trimmed = input.trim();

    let Some(command_text) = trimmed.strip_prefix(':') else {
        return Command::Error("Commands must start with ':'".to_string());
    };

    let parts: Vec<&str> = command_text.split_whitespace().collect();

    if parts.is_empty() {
        return Command::Error("Empty command".to_string());
    }

    match parts[0] {
        "q" | "quit" => Command::Quit,
        "w" | "reload" => Command::Reload,
        "help" => Command::Help,
        "new" => {
            if parts.len() < 2 {
                Command::NewEvent(None)
            } else {
                Command::NewEvent(Some(parts[1..].join(" ")))
            }
        }
        "edit" => parse_id(&parts, "edit").map_or_else(Command::Error, Command::Edit),
        "delete" | "del" => parse_id(&parts, "delete").map_or_else(Command::Error, Command::Delete),
        "theme" => {
            if parts.len() < 2 {
                Command::Error("theme requires a theme name".to_string())
            } else {
                Command::Theme(parts[1].to_string())
            }
        }
        _ => Command::Error(format!("Unknown command: {}", parts[0])),
    }
}

fn parse_id(parts: &[&str], name: &str) -> Result<EventId, String> {
    let raw = parts
        .get(1)
        .ok_or_else(|| format!("{} requires an event id", name))?;
    raw.parse()
        .map_err(|_| format!("Invalid event id: {}", raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quit_command() {
        assert_eq!(parse_command(":q"), Command::Quit);
    }

    #[test]
    fn parse_quit_long_form() {
        assert_eq!(parse_command(":quit"), Command::Quit);
    }

    #[test]
    fn parse_write_reloads() {
        assert_eq!(parse_command(":w"), Command::Reload);
        assert_eq!(parse_command(":reload"), Command::Reload);
    }

    #[test]
    fn parse_new_with_multi_word_name() {
        assert_eq!(
            parse_command(":new Team Offsite"),
            Command::NewEvent(Some("Team Offsite".to_string()))
        );
    }

    #[test]
    fn parse_new_without_name() {
        assert_eq!(parse_command(":new"), Command::NewEvent(None));
    }

    #[test]
    fn parse_edit_with_id() {
        assert_eq!(parse_command(":edit 12"), Command::Edit(EventId(12)));
    }

    #[test]
    fn parse_delete_rejects_bad_id() {
        assert_eq!(
            parse_command(":delete twelve"),
            Command::Error("Invalid event id: twelve".to_string())
        );
    }

    #[test]
    fn parse_delete_requires_id() {
        assert_eq!(
            parse_command(":del"),
            Command::Error("delete requires an event id".to_string())
        );
    }

    #[test]
    fn parse_theme_command() {
        assert_eq!(parse_command(":theme nord"), Command::Theme("nord".to_string()));
    }

    #[test]
    fn command_without_colon_is_an_error() {
        assert!(matches!(parse_command("q"), Command::Error(_)));
    }

    #[test]
    fn unknown_command_is_an_error() {
        assert_eq!(parse_command(":frobnicate"), Command::Error("Unknown command: frobnicate".to_string()));
    }
}
