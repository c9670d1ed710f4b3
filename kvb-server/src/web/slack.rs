//! Slack slash-command parsing and block-kit formatting.
//!
//! Pure functions over already-normalized departures: formatting the
//! same input twice yields identical output. The command grammar is
//! `<station>`, `<station> -l <line>`, or `help`.

use serde::Serialize;

use crate::kvb::Departure;

/// A parsed slash command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlackCommand {
    /// Static usage text, no resolution or fetch.
    Help,
    /// Departures for a station, optionally filtered to one line.
    Departures {
        station: String,
        line: Option<String>,
    },
}

/// Parse the slash command text.
pub fn parse_command(text: &str) -> SlackCommand {
    let text = text.trim();

    if text.eq_ignore_ascii_case("help") {
        return SlackCommand::Help;
    }

    match text.split_once(" -l ") {
        Some((station, line)) => SlackCommand::Departures {
            station: station.trim().to_string(),
            line: Some(line.trim().to_string()),
        },
        None => SlackCommand::Departures {
            station: text.to_string(),
            line: None,
        },
    }
}

/// One Slack block-kit block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Section { text: SectionText },
    Divider,
}

/// mrkdwn text inside a section block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionText {
    #[serde(rename = "type")]
    pub text_type: String,
    pub text: String,
}

impl Block {
    fn section(text: impl Into<String>) -> Self {
        Block::Section {
            text: SectionText {
                text_type: "mrkdwn".to_string(),
                text: text.into(),
            },
        }
    }
}

/// A complete slash-command response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlackMessage {
    pub response_type: String,
    pub blocks: Vec<Block>,
}

impl SlackMessage {
    fn in_channel(blocks: Vec<Block>) -> Self {
        Self {
            response_type: "in_channel".to_string(),
            blocks,
        }
    }
}

/// Static usage text, returned verbatim for `help`.
pub fn help_message() -> SlackMessage {
    SlackMessage::in_channel(vec![
        Block::section("*KVB departures*"),
        Block::section(
            "`/kvb <station>` — live departures for a station (name or id)\n\
             `/kvb <station> -l <line>` — only one line\n\
             `/kvb help` — this text",
        ),
        Block::Divider,
        Block::section("_Example: `/kvb dom -l 5`_"),
    ])
}

/// Message for an unresolvable station input.
pub fn invalid_station_message(input: &str) -> SlackMessage {
    SlackMessage::in_channel(vec![
        Block::section(format!("input station {input} is invalid")),
        Block::Divider,
        footer(),
    ])
}

/// Render departures grouped by line, preserving the operator's own
/// ordering of both lines and departures within a line.
///
/// With a line filter and zero matching records, an explicit "no
/// schedule record found" section is rendered instead of an empty one.
pub fn departures_message(
    station_name: &str,
    departures: &[Departure],
    line_filter: Option<&str>,
) -> SlackMessage {
    let mut blocks = vec![Block::section(format!("*Departures at {station_name}*"))];

    match line_filter {
        Some(line) => {
            let matching: Vec<&Departure> =
                departures.iter().filter(|d| d.line == line).collect();
            if matching.is_empty() {
                blocks.push(Block::section(format!(
                    "No schedule record found for line {line} at {station_name}."
                )));
            } else {
                blocks.push(line_section(line, &matching));
            }
        }
        None => {
            for (line, group) in group_by_line(departures) {
                blocks.push(line_section(line, &group));
            }
            if departures.is_empty() {
                blocks.push(Block::section(format!(
                    "No schedule record found at {station_name}."
                )));
            }
        }
    }

    blocks.push(Block::Divider);
    blocks.push(footer());
    SlackMessage::in_channel(blocks)
}

/// Group departures by line, first-seen order.
fn group_by_line(departures: &[Departure]) -> Vec<(&str, Vec<&Departure>)> {
    let mut groups: Vec<(&str, Vec<&Departure>)> = Vec::new();
    for departure in departures {
        match groups.iter_mut().find(|(line, _)| *line == departure.line) {
            Some((_, group)) => group.push(departure),
            None => groups.push((&departure.line, vec![departure])),
        }
    }
    groups
}

fn line_section(line: &str, departures: &[&Departure]) -> Block {
    let mut text = format!("*Line {line}*");
    for departure in departures {
        match &departure.departures_at {
            Some(at) => text.push_str(&format!(
                "\n→ {} at {} ({})",
                departure.terminal, at, departure.departures_in
            )),
            None => text.push_str(&format!(
                "\n→ {} ({})",
                departure.terminal, departure.departures_in
            )),
        }
    }
    Block::section(text)
}

fn footer() -> Block {
    Block::section("_Type `/kvb help` for usage._")
}
