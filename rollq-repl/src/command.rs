use itertools::Itertools;
use rollq_lib::roll::RegistrySource;
use rollq_lib::roll::Source;
use rollq_lib::DiceTerm;
use rollq_lib::Explode;
use rollq_lib::RollQuery;

pub(crate) const HELP: &str = "\
`<query>` roll a query like `2d6+1d4-3`
`adv <query>` roll every dice group twice and keep the higher
`dis <query>` roll every dice group twice and keep the lower
`multi <n> <query>` roll every dice group `n` times
`hits <t> <query>` count faces at or above `t`
`net <hit> <miss> <query>` faces at or above `hit` minus faces at or below `miss`
`bounds <query>` lowest and highest possible totals
`last` total of the last rolled query
`help` this list";

/// One line typed in the repl
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Roll(RollQuery),
    Advantage(RollQuery),
    Disadvantage(RollQuery),
    Multi(usize, RollQuery),
    Hits(u64, RollQuery),
    NetHits(u64, u64, RollQuery),
    Bounds(RollQuery),
    Last,
    Help,
}

fn query(text: &str) -> Result<RollQuery, String> {
    text.trim()
        .parse::<RollQuery>()
        .map_err(|error| format!("**error** {error}"))
}

fn number<T: std::str::FromStr>(text: &str, name: &str) -> Result<T, String> {
    text.parse::<T>()
        .map_err(|_| format!("**error** *expected a number for* `{name}`"))
}

/// Split off the first word of `text`
fn next_word(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    text.split_once(char::is_whitespace).unwrap_or((text, ""))
}

impl std::str::FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (keyword, rest) = line
            .split_once(char::is_whitespace)
            .unwrap_or((line, ""));
        match keyword.to_ascii_lowercase().as_str() {
            "help" => Ok(Command::Help),
            "last" => Ok(Command::Last),
            "adv" => Ok(Command::Advantage(query(rest)?)),
            "dis" => Ok(Command::Disadvantage(query(rest)?)),
            "bounds" => Ok(Command::Bounds(query(rest)?)),
            "multi" => {
                let (repetitions, rest) = next_word(rest);
                Ok(Command::Multi(number(repetitions, "n")?, query(rest)?))
            }
            "hits" => {
                let (threshold, rest) = next_word(rest);
                Ok(Command::Hits(number(threshold, "t")?, query(rest)?))
            }
            "net" => {
                let (hit, rest) = next_word(rest);
                let (miss, rest) = next_word(rest);
                Ok(Command::NetHits(
                    number(hit, "hit")?,
                    number(miss, "miss")?,
                    query(rest)?,
                ))
            }
            _ => Ok(Command::Roll(query(line)?)),
        }
    }
}

/// Faces of every dice group in the last roll
fn breakdown(query: &RollQuery) -> String {
    let mut parts = query
        .items()
        .iter()
        .map(|item| match item.last_result() {
            Some(result) => format!("{item:#} `{result}`"),
            None => format!("{item:#}"),
        })
        .collect::<Vec<_>>();
    if query.constant() != 0 {
        parts.push(format!("{:+}", query.constant()));
    }
    parts.join(" ")
}

fn multi_lines(
    item: &mut DiceTerm,
    repetitions: usize,
    explode: Explode,
    source: &mut impl Source,
) -> Result<String, String> {
    let multi = item
        .roll_multi_with_source(repetitions, explode, source)
        .map_err(|error| format!("**error** {error}"))?;
    Ok(format!(
        "`{item}`\n{}",
        multi
            .iter()
            .map(|result| format!("`{result}` = **{}**", result.value()))
            .format("\n")
    ))
}

/// Repl state kept between lines
#[derive(Debug, Default)]
pub(crate) struct Session {
    explode: Explode,
    last: Option<RollQuery>,
}

impl Session {
    pub(crate) fn new(explode: Explode) -> Self {
        Session {
            explode,
            last: None,
        }
    }

    pub(crate) fn run(&mut self, command: Command) -> Result<String, String> {
        self.run_with_source(command, &mut RegistrySource)
    }

    pub(crate) fn run_with_source<S: Source>(
        &mut self,
        command: Command,
        source: &mut S,
    ) -> Result<String, String> {
        let explode = self.explode;
        tracing::debug!(?command, %explode, "running command");
        let output = match command {
            Command::Help => HELP.to_owned(),
            Command::Last => match &self.last {
                Some(query) => match query.last_value() {
                    Some(total) => format!("`{query}` = **{total}**"),
                    None => return Err("**error** *no previous rolls*".to_owned()),
                },
                None => return Err("**error** *no previous rolls*".to_owned()),
            },
            Command::Bounds(query) => format!(
                "`{query}` *min* **{}** *max* **{}**",
                query.min(),
                query.max()
            ),
            Command::Roll(mut query) => {
                let total = query.roll_with_source(explode, source);
                self.remember(query, total)
            }
            Command::Advantage(mut query) => {
                let total = query.roll_advantage_with_source(explode, source);
                format!("*advantage* {}", self.remember(query, total))
            }
            Command::Disadvantage(mut query) => {
                let total = query.roll_disadvantage_with_source(explode, source);
                format!("*disadvantage* {}", self.remember(query, total))
            }
            Command::Multi(repetitions, query) => {
                let mut items = query.items().to_vec();
                let lines = items
                    .iter_mut()
                    .map(|item| multi_lines(item, repetitions, explode, source))
                    .collect::<Result<Vec<_>, _>>()?;
                self.last = Some(RollQuery::with_items(items, query.constant()));
                lines.join("\n")
            }
            Command::Hits(threshold, mut query) => {
                query.roll_with_source(explode, source);
                let hits: usize = query
                    .items()
                    .iter()
                    .filter_map(DiceTerm::last_result)
                    .map(|result| result.hits(threshold))
                    .sum();
                let line = format!("{} *hits* **{hits}**", breakdown(&query));
                self.last = Some(query);
                line
            }
            Command::NetHits(hit, miss, mut query) => {
                query.roll_with_source(explode, source);
                let net = query
                    .items()
                    .iter()
                    .filter_map(DiceTerm::last_result)
                    .map(|result| result.net_hits(hit, miss))
                    .sum::<rollq_lib::Result<i64>>()
                    .map_err(|error| format!("**error** {error}"))?;
                let line = format!("{} *net hits* **{net}**", breakdown(&query));
                self.last = Some(query);
                line
            }
        };
        Ok(output)
    }

    fn remember(&mut self, query: RollQuery, total: i64) -> String {
        let line = format!("`{query}` {} = **{total}**", breakdown(&query));
        self.last = Some(query);
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Scripted(std::vec::IntoIter<u64>);

    impl Source for Scripted {
        fn throw(&mut self, _sides: u64) -> u64 {
            self.0.next().expect("script out of faces")
        }
    }

    fn script(faces: &[u64]) -> Scripted {
        Scripted(faces.to_vec().into_iter())
    }

    fn command(line: &str) -> Command {
        line.parse().unwrap()
    }

    #[test]
    fn parses_commands() {
        assert_eq!(Command::Help, command("help"));
        assert_eq!(Command::Last, command(" LAST "));
        assert!(matches!(command("2d6+1"), Command::Roll(_)));
        assert!(matches!(command("adv 1d20"), Command::Advantage(_)));
        assert!(matches!(command("dis 1d20+2"), Command::Disadvantage(_)));
        assert!(matches!(command("bounds 3d8"), Command::Bounds(_)));
        assert!(matches!(command("multi 3 1d6 + 1d4"), Command::Multi(3, _)));
        assert!(matches!(command("hits 5 6d6"), Command::Hits(5, _)));
        assert!(matches!(command("net 5 2 6d6"), Command::NetHits(5, 2, _)));
    }

    #[test]
    fn rejects_bad_lines() {
        assert!("roll some dice".parse::<Command>().is_err());
        assert!("multi x 1d6".parse::<Command>().is_err());
        assert!("net 5 1d6".parse::<Command>().is_err());
        assert!("adv".parse::<Command>().is_err());
    }

    #[test]
    fn roll_prints_breakdown() {
        let mut session = Session::default();
        let output = session
            .run_with_source(command("2d6-1d4+3"), &mut script(&[3, 5, 2]))
            .unwrap();
        assert_eq!("`2d6-1d4+3` +2d6 `[3, 5]` -1d4 `[2]` +3 = **9**", output);
        let output = session.run(Command::Last).unwrap();
        assert_eq!("`2d6-1d4+3` = **9**", output);
    }

    #[test]
    fn last_needs_a_roll() {
        let mut session = Session::default();
        assert!(session.run(Command::Last).is_err());
    }

    #[test]
    fn advantage_keeps_best() {
        let mut session = Session::default();
        let output = session
            .run_with_source(command("adv 1d20"), &mut script(&[4, 15]))
            .unwrap();
        assert_eq!("*advantage* `1d20` +1d20 `[15]` = **15**", output);
    }

    #[test]
    fn explode_rule_applies() {
        let mut session = Session::new(Explode::OnMax);
        let output = session
            .run_with_source(command("1d6"), &mut script(&[6, 6, 2]))
            .unwrap();
        assert_eq!("`1d6` +1d6 `[2]` = **2**", output);
    }

    #[test]
    fn bounds() {
        let mut session = Session::default();
        let output = session.run(command("bounds 2d6-1")).unwrap();
        assert_eq!("`2d6-1` *min* **1** *max* **11**", output);
    }

    #[test]
    fn multi_lists_each_draw() {
        let mut session = Session::default();
        let output = session
            .run_with_source(command("multi 2 1d6"), &mut script(&[1, 5]))
            .unwrap();
        assert_eq!("`1d6`\n`[1]` = **1**\n`[5]` = **5**", output);
        assert_eq!("`1d6` = **5**", session.run(Command::Last).unwrap());
    }

    #[test]
    fn hits_and_net_hits() {
        let mut session = Session::default();
        let output = session
            .run_with_source(command("hits 5 4d6"), &mut script(&[1, 5, 6, 3]))
            .unwrap();
        assert_eq!("+4d6 `[1, 5, 6, 3]` *hits* **2**", output);
        let output = session
            .run_with_source(command("net 5 1 4d6"), &mut script(&[1, 5, 6, 3]))
            .unwrap();
        assert_eq!("+4d6 `[1, 5, 6, 3]` *net hits* **1**", output);
        assert!(session
            .run_with_source(command("net 2 5 1d6"), &mut script(&[3]))
            .is_err());
    }
}
