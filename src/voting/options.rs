use std::collections::HashSet;

use crate::error::{self, Error};

use super::mode::RankMode;

pub const MAX_OPTIONS: usize = 25;
pub const MAX_LABEL_LEN: usize = 100;

/// One option line after parsing: the display label and, for polls, the
/// optional vote target from the ` /<N>` suffix.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParsedOption {
    pub label: String,
    pub target: Option<i32>,
}

impl ParsedOption {
    pub fn plain(label: &str) -> ParsedOption {
        ParsedOption {
            label: label.to_string(),
            target: None,
        }
    }
}

/// Turns raw multi-line input into poll options, one per non-empty line.
/// A trailing ` /<digits>` on a line becomes the option's vote target.
pub fn parse_poll_options(text: &str) -> Vec<ParsedOption> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let (label, target) = split_target(line);
            ParsedOption {
                label: label.to_string(),
                target,
            }
        })
        .collect()
}

/// Turns raw multi-line input into ranking option labels, one per
/// non-empty line. Rankings have no quota syntax.
pub fn parse_rank_options(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

// A target below 1 is dropped, not reported: the suffix still comes off
// the label.
fn split_target(line: &str) -> (&str, Option<i32>) {
    if let Some(at) = line.rfind(" /") {
        let digits = &line[at + 2..];
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = digits.parse::<i32>() {
                let label = line[..at].trim_end();
                return (label, (n >= 1).then_some(n));
            }
        }
    }
    (line, None)
}

pub fn validate_poll_options(options: &[ParsedOption]) -> Result<(), Error> {
    let limits = 1..=MAX_OPTIONS;
    if !limits.contains(&options.len()) {
        return Err(error::option_count_out_of_range(limits, options.len()));
    }
    for option in options {
        if option.label.chars().count() > MAX_LABEL_LEN {
            return Err(error::option_label_too_long(MAX_LABEL_LEN, &option.label));
        }
        if let Some(target) = option.target {
            if target < 1 {
                return Err(error::invalid_target(&option.label, target));
            }
        }
    }
    check_duplicates(options.iter().map(|o| o.label.as_str()))
}

pub fn validate_rank_options(labels: &[String], mode: RankMode) -> Result<(), Error> {
    let min = match mode {
        RankMode::Star => 1,
        // an ordering of one option says nothing
        RankMode::Order => 2,
    };
    let limits = min..=MAX_OPTIONS;
    if !limits.contains(&labels.len()) {
        return Err(error::option_count_out_of_range(limits, labels.len()));
    }
    for label in labels {
        if label.chars().count() > MAX_LABEL_LEN {
            return Err(error::option_label_too_long(MAX_LABEL_LEN, label));
        }
    }
    check_duplicates(labels.iter().map(String::as_str))
}

fn check_duplicates<'a>(labels: impl Iterator<Item = &'a str>) -> Result<(), Error> {
    let mut seen = HashSet::new();
    let mut duplicates: Vec<String> = vec![];
    for label in labels {
        if !seen.insert(label) && !duplicates.iter().any(|d| d == label) {
            duplicates.push(label.to_string());
        }
    }
    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(error::duplicate_options(&duplicates))
    }
}
