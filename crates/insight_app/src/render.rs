//! Plain-terminal rendering of the view model.

use chrono::Local;
use insight_core::{AppViewModel, GroupView, SessionState, Severity};

const DESCRIPTION_WIDTH: usize = 100;

pub fn greeting() {
    println!("insight dashboard — type `help` for commands");
}

pub fn render(view: &AppViewModel) {
    println!();
    println!(
        "== insight dashboard @ {} ==",
        Local::now().format("%H:%M:%S")
    );

    if let Some(banner) = &view.notification {
        let tag = match banner.severity {
            Severity::Info => "info",
            Severity::Success => "ok",
            Severity::Error => "error",
        };
        println!("[{tag}] {}", banner.message);
    }

    match view.session {
        SessionState::Loading => {
            println!("session: probing...");
            return;
        }
        SessionState::Unauthenticated => {
            println!("session: signed out — `login <user> <pass>` to begin");
            return;
        }
        SessionState::Authenticated => println!("session: signed in"),
    }

    match &view.status {
        Some(status) => {
            let state = if status.in_progress {
                "collecting"
            } else {
                "idle"
            };
            println!(
                "job: {state} | raw {} | analyzed {} | issues {} | analyses {}",
                status.raw_count, status.analyzed_count, status.issue_count, status.analysis_count
            );
            if let Some(last_run) = &status.last_run_at {
                println!("last run: {last_run}");
            }
            for (name, connected) in &status.upstreams {
                let health = if *connected { "connected" } else { "error" };
                println!("upstream {name}: {health}");
            }
        }
        None => println!("job: no status yet"),
    }

    let form = &view.job_request;
    println!(
        "form: subjects [{}] sources [{}] limit {} window {} ai {}",
        form.subjects.join(", "),
        form.sources.join(", "),
        form.limit,
        form.window,
        if form.use_ai { "on" } else { "off" }
    );

    if view.raw_issues_loading {
        println!("-- raw issues: loading...");
    } else if !view.raw_issues.is_empty() {
        println!("-- top raw issues --");
        for row in &view.raw_issues {
            let subject = row.subject.as_deref().unwrap_or("-");
            println!(
                "  {:5.1}  {}  ({subject}, {} mentions, freq {})",
                row.score, row.name, row.mentions, row.frequency
            );
        }
    }

    render_groups("issues", &view.issues, view.issues_loading);
    render_groups(
        "recommendations",
        &view.recommendations,
        view.recommendations_loading,
    );
}

fn render_groups(label: &str, groups: &[GroupView], loading: bool) {
    if loading {
        println!("-- {label}: loading...");
        return;
    }
    if groups.is_empty() {
        println!("-- {label}: nothing to show");
        return;
    }
    println!("-- {label} --");
    for group in groups {
        println!("  {}", group.subject);
        if let Some(summary) = &group.summary {
            println!("    {}", ellipsize(summary, DESCRIPTION_WIDTH));
        }
        for row in &group.rows {
            match &row.grade {
                Some(grade) => println!("    * {} [{grade}]", row.title),
                None => println!("    * {}", row.title),
            }
            println!("      {}", ellipsize(&row.description, DESCRIPTION_WIDTH));
            if !row.keywords.is_empty() {
                println!("      keywords: {}", row.keywords.join(", "));
            }
        }
    }
}

pub fn help() {
    println!(
        "commands:\n\
         \x20 login <user> <pass> / register <user> <pass> [email] / logout\n\
         \x20 subject add|rm <name>   source add|rm <name>\n\
         \x20 limit <n>   window <day|week|month|year|all>   ai on|off\n\
         \x20 run                 trigger a collection job\n\
         \x20 raw [subject]       top raw issues by severity score\n\
         \x20 issues search <term> | severity <level|all> | sort <title|severity> | dir <asc|desc>\n\
         \x20 recs search <term> | impact <level|all> | complexity <level|all> |\n\
         \x20      sort <title|impact|complexity|recency> | dir <asc|desc>\n\
         \x20 dismiss   show   help   quit"
    );
}

pub fn unknown(line: &str) {
    println!("unrecognized command: {line} — `help` lists what works");
}

fn ellipsize(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{cut}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ellipsize_leaves_short_text_alone() {
        assert_eq!(ellipsize("short", 10), "short");
    }

    #[test]
    fn ellipsize_cuts_on_character_boundaries() {
        let long = "å".repeat(20);
        let cut = ellipsize(&long, 10);
        assert_eq!(cut.chars().count(), 10);
        assert!(cut.ends_with("..."));
    }
}
