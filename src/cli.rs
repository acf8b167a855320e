use std::{
    env,
    io::Write,
    process::{Command, Stdio},
};

use anyhow::Context;

use event_desk::{
    events::{Event, EventCollection},
    sync::event_api::RemoteEventStore,
};

pub const USAGE: &str = "Usage: event-desk [--list] [--sample] [--url EVENTS_URL]";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CliMode {
    Interactive,
    List,
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CliOptions {
    pub mode: CliMode,
    pub sample: bool,
    pub events_url: Option<String>,
}

pub fn parse_cli_mode() -> Result<CliOptions, String> {
    parse_args(env::args().skip(1))
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliOptions, String> {
    let mut options = CliOptions {
        mode: CliMode::Interactive,
        sample: false,
        events_url: None,
    };
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--sample" => options.sample = true,
            "--list" => options.mode = CliMode::List,
            "--url" => {
                let url = args
                    .next()
                    .filter(|next| !next.starts_with("--"))
                    .ok_or_else(|| "--url requires a value".to_string())?;
                options.events_url = Some(url);
            }
            "--help" | "-h" => options.mode = CliMode::Help,
            _ => return Err(format!("Unknown argument: {}", arg)),
        }
    }

    Ok(options)
}

pub async fn run_list_mode<S: RemoteEventStore>(store: S) -> anyhow::Result<()> {
    let mut collection = EventCollection::new(store);
    collection.load().await.context("Failed to fetch events")?;

    let listing = format_event_list(collection.all());
    display_with_pager(&listing)
}

fn format_event_list(events: &[Event]) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Events ({})", events.len()));
    lines.push(String::new());

    if events.is_empty() {
        lines.push("No events.".to_string());
    } else {
        lines.push(format!("{:>5}  {:<10}  {:<10}  {}", "ID", "Start", "End", "Event"));
        for event in events {
            lines.push(build_event_line(event));
        }
    }

    lines.join("\n")
}

fn build_event_line(event: &Event) -> String {
    format!(
        "{:>5}  {:<10}  {:<10}  {}",
        event.id, event.start_date, event.end_date, event.event_name
    )
}

fn display_with_pager(text: &str) -> anyhow::Result<()> {
    let pager_value = env::var("PAGER").unwrap_or_else(|_| "less".to_string());
    let mut parts = pager_value.split_whitespace();
    let Some(cmd) = parts.next() else {
        println!("{text}");
        return Ok(());
    };
    let args: Vec<&str> = parts.collect();

    match Command::new(cmd)
        .args(&args)
        .stdin(Stdio::piped())
        .spawn()
    {
        Ok(mut child) => {
            if let Some(stdin) = child.stdin.as_mut() {
                stdin.write_all(text.as_bytes()).context("Failed to write to pager")?;
            }
            let _ = child.wait();
        }
        Err(_) => {
            println!("{text}");
        }
    }

    Ok(())
}
