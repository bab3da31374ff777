use anyhow::{Context, Result, anyhow, bail};
use sweeper_core::{Coord, Difficulty, Pos};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Pos),
    Flag(Pos),
    /// Start over, optionally switching difficulty.
    New(Option<Difficulty>),
    Scores,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  r ROW COL      reveal a cell
  f ROW COL      flag or unflag a cell
  n [DIFFICULTY] new game (beginner, intermediate, expert)
  s              show high scores
  h              show this help
  q              quit";

impl Command {
    pub fn parse(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            bail!("empty command");
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Self::Reveal(parse_pos(&mut words)?),
            "f" | "flag" => Self::Flag(parse_pos(&mut words)?),
            "n" | "new" => Self::New(words.next().map(str::parse).transpose()?),
            "s" | "scores" => Self::Scores,
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            other => bail!("unknown command {:?}, type h for help", other),
        };

        if let Some(extra) = words.next() {
            bail!("unexpected argument {:?}", extra);
        }
        Ok(command)
    }
}

fn parse_pos<'a>(words: &mut impl Iterator<Item = &'a str>) -> Result<Pos> {
    let mut coord = |axis: &str| -> Result<Coord> {
        let word = words.next().ok_or_else(|| anyhow!("missing {}", axis))?;
        word.parse::<Coord>()
            .with_context(|| format!("invalid {} {:?}", axis, word))
    };
    let row = coord("row")?;
    let col = coord("col")?;
    Ok((row, col))
}
