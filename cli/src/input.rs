//! Line commands read from stdin.

use anyhow::{Context, Result, bail};

use awaken_engine::SubjectId;
use awaken_engine::runtime::Command;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Quit,
}

pub const HELP: &str =
    "commands: next | prev | select N | xp N | endorse ID | sfx on|off | music on|off | dismiss | quit";

/// Parse one line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Input>> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();
    if let Some(extra) = words.next() {
        bail!("unexpected argument `{extra}`");
    }

    let command = match (verb, arg) {
        ("quit" | "exit", None) => return Ok(Some(Input::Quit)),
        ("next", None) => Command::CarouselNext,
        ("prev", None) => Command::CarouselPrevious,
        ("select", Some(index)) => Command::CarouselSelect(
            index
                .parse()
                .with_context(|| format!("invalid slide index `{index}`"))?,
        ),
        ("xp", Some(amount)) => {
            let amount: u64 = amount
                .parse()
                .with_context(|| format!("invalid experience amount `{amount}`"))?;
            if amount == 0 {
                bail!("experience amount must be positive");
            }
            Command::AwardExperience(amount)
        }
        ("endorse", Some(subject)) => Command::Endorse(SubjectId::new(subject)),
        ("sfx", Some(toggle)) => Command::SetSfxMuted(!parse_toggle(toggle)?),
        ("music", Some(toggle)) => Command::SetMusicMuted(!parse_toggle(toggle)?),
        ("dismiss", None) => Command::DismissToast,
        _ => bail!("unknown command `{}`; {HELP}", line.trim()),
    };
    Ok(Some(Input::Command(command)))
}

fn parse_toggle(value: &str) -> Result<bool> {
    match value {
        "on" => Ok(true),
        "off" => Ok(false),
        other => bail!("expected `on` or `off`, got `{other}`"),
    }
}

#[cfg(test)]
mod tests {
    use super::{Input, parse_line};
    use awaken_engine::SubjectId;
    use awaken_engine::runtime::Command;

    fn command(line: &str) -> Command {
        match parse_line(line).unwrap() {
            Some(Input::Command(command)) => command,
            other => panic!("expected command, got {other:?}"),
        }
    }

    #[test]
    fn parses_navigation() {
        assert_eq!(command("next"), Command::CarouselNext);
        assert_eq!(command("  prev "), Command::CarouselPrevious);
        assert_eq!(command("select 2"), Command::CarouselSelect(2));
    }

    #[test]
    fn parses_arguments() {
        assert_eq!(command("xp 250"), Command::AwardExperience(250));
        assert_eq!(
            command("endorse rust"),
            Command::Endorse(SubjectId::new("rust"))
        );
        assert_eq!(command("sfx off"), Command::SetSfxMuted(true));
        assert_eq!(command("music on"), Command::SetMusicMuted(false));
    }

    #[test]
    fn blank_and_quit() {
        assert_eq!(parse_line("   ").unwrap(), None);
        assert_eq!(parse_line("quit").unwrap(), Some(Input::Quit));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_line("xp 0").is_err());
        assert!(parse_line("xp lots").is_err());
        assert!(parse_line("select -1").is_err());
        assert!(parse_line("sfx maybe").is_err());
        assert!(parse_line("next 3").is_err());
        assert!(parse_line("fly").is_err());
    }
}
