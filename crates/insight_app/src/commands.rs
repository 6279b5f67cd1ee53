//! Line-oriented command parsing for the shell.

use insight_client::ClientCommand;
use insight_core::{
    CategoryFilter, FormEdit, IssueFacet, Msg, RecommendationFacet, SortDirection, SortKey,
    SpecChange,
};

#[derive(Debug, PartialEq)]
pub enum Command {
    /// A message for the core update function.
    Dispatch(Msg),
    /// Credential exchange happens outside the core; these go straight to
    /// the client.
    Client(ClientCommand),
    Show,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse(line: &str) -> Command {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Command::Show;
    }
    let mut words = trimmed.split_whitespace();
    let head = words.next().unwrap_or_default();
    let rest: Vec<&str> = words.collect();

    match head {
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "show" => Command::Show,
        "dismiss" => Command::Dispatch(Msg::DismissRequested),
        "run" => Command::Dispatch(Msg::JobSubmitted),
        "logout" => Command::Dispatch(Msg::LogoutRequested),
        "login" => match rest.as_slice() {
            [username, password] => Command::Client(ClientCommand::Login {
                username: (*username).to_string(),
                password: (*password).to_string(),
            }),
            _ => unknown(trimmed),
        },
        "register" => match rest.as_slice() {
            [username, password] => Command::Client(ClientCommand::Register {
                username: (*username).to_string(),
                password: (*password).to_string(),
                email: None,
            }),
            [username, password, email] => Command::Client(ClientCommand::Register {
                username: (*username).to_string(),
                password: (*password).to_string(),
                email: Some((*email).to_string()),
            }),
            _ => unknown(trimmed),
        },
        "subject" => form_list_edit(&rest, trimmed, FormEdit::AddSubject, FormEdit::RemoveSubject),
        "source" => form_list_edit(&rest, trimmed, FormEdit::AddSource, FormEdit::RemoveSource),
        "limit" => match rest.as_slice() {
            [value] => match value.parse::<u32>() {
                Ok(limit) => Command::Dispatch(Msg::JobRequestEdited(FormEdit::LimitChanged(limit))),
                Err(_) => unknown(trimmed),
            },
            _ => unknown(trimmed),
        },
        "window" => match rest.as_slice() {
            [value] => Command::Dispatch(Msg::JobRequestEdited(FormEdit::WindowChanged(
                (*value).to_string(),
            ))),
            _ => unknown(trimmed),
        },
        "ai" => match rest.as_slice() {
            ["on"] => Command::Dispatch(Msg::JobRequestEdited(FormEdit::UseAiChanged(true))),
            ["off"] => Command::Dispatch(Msg::JobRequestEdited(FormEdit::UseAiChanged(false))),
            _ => unknown(trimmed),
        },
        "raw" => Command::Dispatch(Msg::RawIssuesRequested {
            subject: rest.first().map(|subject| (*subject).to_string()),
        }),
        "issues" => issue_spec(&rest, trimmed),
        "recs" => recommendation_spec(&rest, trimmed),
        _ => unknown(trimmed),
    }
}

fn form_list_edit(
    rest: &[&str],
    line: &str,
    add: fn(String) -> FormEdit,
    remove: fn(String) -> FormEdit,
) -> Command {
    match rest {
        ["add", name @ ..] if !name.is_empty() => {
            Command::Dispatch(Msg::JobRequestEdited(add(name.join(" "))))
        }
        ["rm", name @ ..] if !name.is_empty() => {
            Command::Dispatch(Msg::JobRequestEdited(remove(name.join(" "))))
        }
        _ => unknown(line),
    }
}

fn issue_spec(rest: &[&str], line: &str) -> Command {
    let change = match rest {
        ["search", term @ ..] => SpecChange::Search(term.join(" ")),
        ["severity", "all"] => SpecChange::Category(CategoryFilter::All),
        ["severity", value] => SpecChange::Category(CategoryFilter::Only {
            facet: IssueFacet::Severity,
            value: (*value).to_string(),
        }),
        ["sort", "title"] => SpecChange::Sort(SortKey::Title),
        ["sort", "severity"] => SpecChange::Sort(SortKey::Facet(IssueFacet::Severity)),
        ["dir", "asc"] => SpecChange::Direction(SortDirection::Ascending),
        ["dir", "desc"] => SpecChange::Direction(SortDirection::Descending),
        _ => return unknown(line),
    };
    Command::Dispatch(Msg::IssueSpecChanged(change))
}

fn recommendation_spec(rest: &[&str], line: &str) -> Command {
    let change = match rest {
        ["search", term @ ..] => SpecChange::Search(term.join(" ")),
        ["impact", "all"] | ["complexity", "all"] => SpecChange::Category(CategoryFilter::All),
        ["impact", value] => SpecChange::Category(CategoryFilter::Only {
            facet: RecommendationFacet::Impact,
            value: (*value).to_string(),
        }),
        ["complexity", value] => SpecChange::Category(CategoryFilter::Only {
            facet: RecommendationFacet::Complexity,
            value: (*value).to_string(),
        }),
        ["sort", "title"] => SpecChange::Sort(SortKey::Title),
        ["sort", "impact"] => SpecChange::Sort(SortKey::Facet(RecommendationFacet::Impact)),
        ["sort", "complexity"] => {
            SpecChange::Sort(SortKey::Facet(RecommendationFacet::Complexity))
        }
        ["sort", "recency"] => SpecChange::Sort(SortKey::Recency),
        ["dir", "asc"] => SpecChange::Direction(SortDirection::Ascending),
        ["dir", "desc"] => SpecChange::Direction(SortDirection::Descending),
        _ => return unknown(line),
    };
    Command::Dispatch(Msg::RecommendationSpecChanged(change))
}

fn unknown(line: &str) -> Command {
    Command::Unknown(line.to_string())
}
