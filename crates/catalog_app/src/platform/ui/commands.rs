//! Line commands typed at the prompt.

use catalog_core::{ItemDraft, ItemPatch, Msg, StoreMutation};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  tag <name>            toggle a tag filter
  untag <name>          remove one tag filter
  cleartags             remove all tag filters
  search <text>         edit the search box
  submit                press enter in the search box
  clearsearch           empty the search box
  clear                 remove all filters
  open <id>             show one item
  home | browse | close switch between landing and listing
  download <id>         download an item
  visit <query>         navigate to a new address
  back | forward        walk the address history
  create <title>        add a catalog entry
  rename <id> <title>   retitle an entry
  feature <id>          mark an entry featured
  unfeature <id>        clear the featured flag
  delete <id>           remove an entry
  reload                re-read the catalog file
  show | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Msg),
    Visit(String),
    Back,
    Forward,
    Reload,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command {0:?}; type `help`")]
    Unknown(String),
    #[error("`{0}` needs {1}")]
    MissingArgument(String, &'static str),
}

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "" | "show" => Command::Show,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "tag" => Command::Dispatch(Msg::TagToggled(required(word, rest, "a tag")?)),
        "untag" => Command::Dispatch(Msg::TagCleared(required(word, rest, "a tag")?)),
        "cleartags" => Command::Dispatch(Msg::AllTagsCleared),
        "search" => Command::Dispatch(Msg::SearchChanged(rest.to_string())),
        "submit" => Command::Dispatch(Msg::SearchSubmitted),
        "clearsearch" => Command::Dispatch(Msg::SearchCleared),
        "clear" => Command::Dispatch(Msg::AllFiltersCleared),
        "open" => Command::Dispatch(Msg::ItemSelected(required(word, rest, "an item id")?)),
        "home" => Command::Dispatch(Msg::HomeRequested),
        "browse" => Command::Dispatch(Msg::ListingOpened),
        "close" => Command::Dispatch(Msg::ListingClosed),
        "download" => {
            Command::Dispatch(Msg::DownloadRequested(required(word, rest, "an item id")?))
        }
        "visit" => Command::Visit(rest.to_string()),
        "back" => Command::Back,
        "forward" => Command::Forward,
        "reload" => Command::Reload,
        "create" => mutation(StoreMutation::Create(ItemDraft {
            title: required(word, rest, "a title")?,
            ..ItemDraft::default()
        })),
        "rename" => {
            let (id, title) = rest
                .split_once(char::is_whitespace)
                .map(|(id, title)| (id, title.trim()))
                .filter(|(_, title)| !title.is_empty())
                .ok_or_else(|| {
                    CommandError::MissingArgument(word.to_string(), "an item id and a title")
                })?;
            patch_item(
                id,
                ItemPatch {
                    title: Some(title.to_string()),
                    ..ItemPatch::default()
                },
            )
        }
        "feature" | "unfeature" => patch_item(
            &required(word, rest, "an item id")?,
            ItemPatch {
                is_featured: Some(word == "feature"),
                ..ItemPatch::default()
            },
        ),
        "delete" => mutation(StoreMutation::Delete {
            id: required(word, rest, "an item id")?,
        }),
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(command)
}

fn required(word: &str, rest: &str, what: &'static str) -> Result<String, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::MissingArgument(word.to_string(), what));
    }
    Ok(rest.to_string())
}

fn mutation(mutation: StoreMutation) -> Command {
    Command::Dispatch(Msg::MutationRequested(mutation))
}

fn patch_item(id: &str, patch: ItemPatch) -> Command {
    mutation(StoreMutation::Update {
        id: id.to_string(),
        patch,
    })
}
