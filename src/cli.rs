//! Command-line argument parsing

use std::path::PathBuf;

use alias_forge::export::ExportFormat;
use alias_forge::{AliasForgeError, Result, Separator};

/// Options shared by the generating commands
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub chunk_size: Option<usize>,
    pub export: Option<ExportFormat>,
    pub out_dir: PathBuf,
    pub limit: Option<usize>,
    /// Only print results containing this text (case-insensitive)
    pub filter: Option<String>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            chunk_size: None,
            export: None,
            out_dir: PathBuf::from("output"),
            limit: None,
            filter: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HistoryAction {
    List,
    Clear,
    Delete(String),
    Rerun { id: String, options: RunOptions },
}

#[derive(Debug, Clone, PartialEq)]
pub enum FavoriteAction {
    Toggle(Vec<String>),
    List,
    Clear,
    Export { format: ExportFormat, out_dir: PathBuf },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Version,
    Interactive,
    Dots {
        inputs: Vec<String>,
        options: RunOptions,
    },
    Tags {
        inputs: Vec<String>,
        tags: Option<String>,
        separator: Option<Separator>,
        options: RunOptions,
    },
    Stats {
        address: String,
    },
    History(HistoryAction),
    Favorites(FavoriteAction),
}

/// Parse arguments (without the program name)
pub fn parse_args(args: &[String]) -> Result<Command> {
    let Some(first) = args.first() else {
        return Ok(Command::Interactive);
    };
    let rest = &args[1..];

    match first.as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help),
        "-V" | "--version" => Ok(Command::Version),
        "dots" => {
            let (inputs, options, _) = parse_run(rest, &[])?;
            Ok(Command::Dots {
                inputs: require_inputs(inputs)?,
                options,
            })
        }
        "tags" => {
            let (inputs, options, extra) = parse_run(rest, &["--tags", "--separator"])?;
            Ok(Command::Tags {
                inputs: require_inputs(inputs)?,
                tags: extra.tags,
                separator: extra.separator,
                options,
            })
        }
        "stats" => match rest {
            [address] => Ok(Command::Stats {
                address: address.clone(),
            }),
            _ => Err(AliasForgeError::cli("stats takes exactly one address")),
        },
        "history" => parse_history(rest).map(Command::History),
        "fav" => parse_favorites(rest).map(Command::Favorites),
        other => Err(AliasForgeError::cli(format!("Unknown command: {}", other))),
    }
}

const HISTORY_USAGE: &str = "usage: history [clear | delete <ID> | rerun <ID> [OPTIONS]]";
const FAV_USAGE: &str = "usage: fav <EMAIL>... | fav list | fav clear | fav export <FMT> [--out DIR]";

fn parse_history(rest: &[String]) -> Result<HistoryAction> {
    match rest {
        [] => Ok(HistoryAction::List),
        [action] if action == "clear" => Ok(HistoryAction::Clear),
        [action, id] if action == "delete" => Ok(HistoryAction::Delete(id.clone())),
        [action, args @ ..] if action == "rerun" => {
            let (inputs, options, _) = parse_run(args, &[])?;
            match inputs.as_slice() {
                [id] => Ok(HistoryAction::Rerun {
                    id: id.clone(),
                    options,
                }),
                _ => Err(AliasForgeError::cli(HISTORY_USAGE)),
            }
        }
        _ => Err(AliasForgeError::cli(HISTORY_USAGE)),
    }
}

fn parse_favorites(rest: &[String]) -> Result<FavoriteAction> {
    match rest {
        [] => Err(AliasForgeError::cli(FAV_USAGE)),
        [action] if action == "list" => Ok(FavoriteAction::List),
        [action] if action == "clear" => Ok(FavoriteAction::Clear),
        [action, format] if action == "export" => Ok(FavoriteAction::Export {
            format: format.parse()?,
            out_dir: RunOptions::default().out_dir,
        }),
        [action, format, flag, dir] if action == "export" && flag == "--out" => {
            Ok(FavoriteAction::Export {
                format: format.parse()?,
                out_dir: PathBuf::from(dir),
            })
        }
        [action, ..] if action == "export" => Err(AliasForgeError::cli(FAV_USAGE)),
        emails => Ok(FavoriteAction::Toggle(emails.to_vec())),
    }
}

#[derive(Default)]
struct TagOptions {
    tags: Option<String>,
    separator: Option<Separator>,
}

fn parse_run(args: &[String], allowed_extra: &[&str]) -> Result<(Vec<String>, RunOptions, TagOptions)> {
    let mut inputs = Vec::new();
    let mut options = RunOptions::default();
    let mut extra = TagOptions::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if !arg.starts_with("--") {
            inputs.push(arg.clone());
            continue;
        }

        let flag = arg.as_str();
        if matches!(flag, "--tags" | "--separator") && !allowed_extra.contains(&flag) {
            return Err(AliasForgeError::cli(format!("{} is only valid for the tags command", flag)));
        }

        let value = iter
            .next()
            .ok_or_else(|| AliasForgeError::cli(format!("{} requires a value", flag)))?;

        match flag {
            "--chunk-size" => options.chunk_size = Some(parse_count(flag, value)?),
            "--limit" => options.limit = Some(parse_count(flag, value)?),
            "--export" => options.export = Some(value.parse()?),
            "--out" => options.out_dir = PathBuf::from(value),
            "--filter" => options.filter = Some(value.clone()),
            "--tags" => extra.tags = Some(value.clone()),
            "--separator" => extra.separator = Some(value.parse()?),
            _ => return Err(AliasForgeError::cli(format!("Unknown option: {}", flag))),
        }
    }

    Ok((inputs, options, extra))
}

fn require_inputs(inputs: Vec<String>) -> Result<Vec<String>> {
    if inputs.is_empty() {
        Err(AliasForgeError::cli("At least one address is required"))
    } else {
        Ok(inputs)
    }
}

fn parse_count(flag: &str, value: &str) -> Result<usize> {
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(AliasForgeError::cli(format!("{} expects a positive number, got '{}'", flag, value))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_args_is_interactive() {
        assert_eq!(parse_args(&[]).unwrap(), Command::Interactive);
    }

    #[test]
    fn test_dots_with_options() {
        let cmd = parse_args(&args(&["dots", "a@gmail.com", "--limit", "5", "--export", "csv", "b@gmail.com"])).unwrap();
        match cmd {
            Command::Dots { inputs, options } => {
                assert_eq!(inputs, vec!["a@gmail.com", "b@gmail.com"]);
                assert_eq!(options.limit, Some(5));
                assert_eq!(options.export, Some(ExportFormat::Csv));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_tags() {
        let cmd = parse_args(&args(&["tags", "a@gmail.com", "--tags", "x,y", "--separator", "_"])).unwrap();
        assert_eq!(
            cmd,
            Command::Tags {
                inputs: args(&["a@gmail.com"]),
                tags: Some("x,y".to_string()),
                separator: Some(Separator::Underscore),
                options: RunOptions::default(),
            }
        );
    }

    #[test]
    fn test_errors() {
        assert!(parse_args(&args(&["dots"])).is_err());
        assert!(parse_args(&args(&["dots", "a@gmail.com", "--tags", "x"])).is_err());
        assert!(parse_args(&args(&["dots", "a@gmail.com", "--limit"])).is_err());
        assert!(parse_args(&args(&["dots", "a@gmail.com", "--limit", "0"])).is_err());
        assert!(parse_args(&args(&["frobnicate"])).is_err());
    }

    #[test]
    fn test_fav() {
        assert_eq!(
            parse_args(&args(&["fav", "list"])).unwrap(),
            Command::Favorites(FavoriteAction::List)
        );
        assert_eq!(
            parse_args(&args(&["fav", "a@gmail.com"])).unwrap(),
            Command::Favorites(FavoriteAction::Toggle(args(&["a@gmail.com"])))
        );
        assert_eq!(
            parse_args(&args(&["fav", "export", "csv", "--out", "favs"])).unwrap(),
            Command::Favorites(FavoriteAction::Export {
                format: ExportFormat::Csv,
                out_dir: PathBuf::from("favs"),
            })
        );
        assert!(parse_args(&args(&["fav", "export"])).is_err());
        assert!(parse_args(&args(&["fav", "export", "xml"])).is_err());
    }

    #[test]
    fn test_history() {
        assert_eq!(
            parse_args(&args(&["history"])).unwrap(),
            Command::History(HistoryAction::List)
        );
        assert_eq!(
            parse_args(&args(&["history", "delete", "42"])).unwrap(),
            Command::History(HistoryAction::Delete("42".to_string()))
        );

        match parse_args(&args(&["history", "rerun", "42", "--filter", "a.b"])).unwrap() {
            Command::History(HistoryAction::Rerun { id, options }) => {
                assert_eq!(id, "42");
                assert_eq!(options.filter.as_deref(), Some("a.b"));
            }
            other => panic!("unexpected command: {:?}", other),
        }

        assert!(parse_args(&args(&["history", "rerun"])).is_err());
        assert!(parse_args(&args(&["history", "delete"])).is_err());
        assert!(parse_args(&args(&["history", "frobnicate"])).is_err());
    }
}
