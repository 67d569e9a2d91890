//! Phrase pools and reply rendering
//!
//! Transitions emit semantic [`Reply`] values; the wording, including any
//! random pool pick, happens here at send time. Pools are immutable -
//! example sampling draws without replacement per call and never consumes
//! the master list.

use crate::dialog::Reply;
use rand::seq::SliceRandom;

pub const GREETINGS: &[&str] = &[
    "Hello!",
    "Hi there!",
    "Good day to you!",
    "Hey! Lovely weather for a chat.",
];

pub const THANKS_REPLIES: &[&str] = &[
    "You're welcome!",
    "Any time.",
    "My pleasure.",
    "No problem at all.",
];

pub const GOODBYES: &[&str] = &["Goodbye!", "See you later.", "Bye for now.", "Take care!"];

pub const THINKING: &[&str] = &[
    "Let me have a look...",
    "Just checking...",
    "One moment...",
    "Looking that up for you...",
];

pub const WAITING: &[&str] = &[
    "Crunching the numbers, this can take a little while...",
    "Digging through the records...",
    "Consulting the archive, hang on...",
];

pub const UNKNOWN: &str = "Sorry, I didn't catch that. Try asking me about the weather.";

pub const INFO: &str = "I can tell you the forecast for a place, compare today \
against past records, and find when conditions peaked.";

pub const EXAMPLE_INTRODUCTION: &str = "Here are some things you could ask me:";

pub const ERROR: &str =
    "Something went wrong talking to the data service. Please try again in a bit.";

pub const ASK_LOCATION: &str = "Where?";

pub const EXAMPLES: &[&str] = &[
    "what's the forecast for Exeter",
    "will it be hotter than usual in London",
    "was last july warmer than usual in Cardiff",
    "when was the hottest day last year in Leeds",
    "is it colder than usual in Glasgow",
    "what was the average temperature last week in York",
    "when is the coldest time of year in Aberdeen",
    "what's the weather like in Manchester",
];

fn pick(pool: &[&'static str]) -> &'static str {
    pool.choose(&mut rand::thread_rng()).copied().unwrap_or("")
}

/// Draw `count` distinct examples from the pool.
pub fn sample_examples(count: usize) -> Vec<&'static str> {
    EXAMPLES
        .choose_multiple(&mut rand::thread_rng(), count)
        .copied()
        .collect()
}

/// Render a reply to the sentence actually sent.
pub fn render(reply: &Reply) -> String {
    match reply {
        Reply::Greeting => pick(GREETINGS).to_string(),
        Reply::Thanks => pick(THANKS_REPLIES).to_string(),
        Reply::Goodbye => pick(GOODBYES).to_string(),
        Reply::Thinking => pick(THINKING).to_string(),
        Reply::Waiting => pick(WAITING).to_string(),
        Reply::Info => INFO.to_string(),
        Reply::Unknown => UNKNOWN.to_string(),
        Reply::AskLocation => ASK_LOCATION.to_string(),
        Reply::Trouble => ERROR.to_string(),

        Reply::Examples => {
            let mut out = String::from(EXAMPLE_INTRODUCTION);
            out.push('\n');
            for example in sample_examples(3) {
                out.push_str(" * ");
                out.push_str(example);
                out.push('\n');
            }
            out
        }

        Reply::Forecast { text } | Reply::Raw { body: text } => text.clone(),

        Reply::DidNotUnderstand { detail } => {
            format!("Sorry, I didn't understand that: {detail}.")
        }

        Reply::Comparison {
            affirmative,
            variable,
            site,
            today_value,
            units,
            start,
            end,
            average,
        } => {
            let verdict = if *affirmative { "Yes" } else { "No" };
            format!(
                "{verdict}, today's peak {variable} in {site} is {today_value}{units} \
but the average for this place in the period between {start} and {end} \
is actually {average}{units}"
            )
        }

        Reply::Peak {
            variable,
            operation,
            site,
            value,
            start,
            end,
            peak_start,
            peak_end,
        } => {
            let mut sentence = format!(
                "The peak {operation} {variable} for the period {start} to {end} \
in {site} is {value}"
            );
            match (peak_start, peak_end) {
                (Some(day), Some(same)) if day == same => {
                    sentence.push_str(&format!(" on the date {day}"));
                }
                (Some(from), Some(to)) => {
                    sentence.push_str(&format!(" between the dates {from} and {to}"));
                }
                _ => {}
            }
            sentence
        }
    }
}
