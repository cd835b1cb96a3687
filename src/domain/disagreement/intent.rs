//! Intent Decoder - Turns a free-text decision into a structured intent.
//!
//! The decoder is a set of cheap lexical heuristics. Anything it cannot
//! recognise falls back to the demo defaults so downstream stages always
//! receive a fully populated [`StructuredIntent`].

use serde::{Deserialize, Serialize};

use super::Decision;

/// Actor used when the decision is not phrased in the first person singular.
pub const DEFAULT_ACTOR: &str = "Leadership Team";
/// Actor used for "I ..." decisions.
pub const INDIVIDUAL_ACTOR: &str = "Individual";
/// Action used when no clause survives prefix stripping.
pub const DEFAULT_ACTION: &str = "Launch Product X";
/// Timeframe used when the decision names none.
pub const DEFAULT_TIMEFRAME: &str = "3 months";
/// Goals used when no context is supplied.
pub const DEFAULT_GOALS: &str = "Capture new market, grow revenue";

const ACTION_PREFIXES: &[&str] = &[
    "i think we should ",
    "we really should ",
    "we should ",
    "we will ",
    "we must ",
    "we need to ",
    "let's ",
    "lets ",
];

const FIRST_PERSON_OPENERS: &[&str] = &["i ", "i'm ", "i'll ", "i've ", "my "];

const GOAL_MARKERS: &[&str] = &["priorities:", "priority:", "goals:", "goal:"];

const CERTAINTY_WORDS: &[&str] = &["definitely", "certainly", "guaranteed", "no-brainer"];

const TIME_PREPOSITIONS: &[&str] = &["in", "within", "over", "by"];

/// Decision broken down into who, what, when and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredIntent {
    pub decision: String,
    pub actor: String,
    pub action: String,
    pub timeframe: String,
    pub stated_goals: String,
    pub confidence_clues: Vec<String>,
}

/// Stateless decoder for [`StructuredIntent`].
pub struct IntentDecoder;

impl IntentDecoder {
    /// Decodes a validated decision.
    pub fn decode(decision: &Decision) -> StructuredIntent {
        let text = decision.text();
        let timeframe = find_timeframe(text);

        StructuredIntent {
            decision: text.to_string(),
            actor: Self::actor(text).to_string(),
            action: Self::action(text),
            timeframe: timeframe
                .map(|t| t.phrase)
                .unwrap_or_else(|| DEFAULT_TIMEFRAME.to_string()),
            stated_goals: Self::stated_goals(decision.context()),
            confidence_clues: Self::confidence_clues(text),
        }
    }

    fn actor(text: &str) -> &'static str {
        let opening = text.to_ascii_lowercase();
        if FIRST_PERSON_OPENERS.iter().any(|p| opening.starts_with(p)) {
            INDIVIDUAL_ACTOR
        } else {
            DEFAULT_ACTOR
        }
    }

    fn action(text: &str) -> String {
        let opening = skip_leading_timeframe(text.trim_start());
        let mut clause = strip_action_prefix(first_clause(opening).trim_start());
        clause = skip_leading_timeframe(clause);

        if let Some(tf) = find_timeframe(clause) {
            clause = &clause[..tf.start];
        }
        let clause = clause.trim();

        if clause.is_empty() {
            return DEFAULT_ACTION.to_string();
        }
        capitalize(clause)
    }

    fn stated_goals(context: Option<&str>) -> String {
        let Some(context) = context else {
            return DEFAULT_GOALS.to_string();
        };

        // ASCII lowering keeps byte offsets aligned with `context`
        let lowered = context.to_ascii_lowercase();
        for marker in GOAL_MARKERS {
            if let Some(idx) = lowered.find(marker) {
                let rest = &context[idx + marker.len()..];
                let end = rest.find([';', '\n']).unwrap_or(rest.len());
                let goals = rest[..end].trim();
                if !goals.is_empty() {
                    return goals.to_string();
                }
            }
        }
        context.to_string()
    }

    fn confidence_clues(text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let mut clues = Vec::new();
        if lowered.contains("asap") {
            clues.push("urgent tone".to_string());
        }
        if CERTAINTY_WORDS.iter().any(|w| lowered.contains(w)) {
            clues.push("certainty language".to_string());
        }
        if clues.is_empty() {
            clues.push("neutral".to_string());
        }
        clues
    }
}

fn strip_action_prefix(clause: &str) -> &str {
    for prefix in ACTION_PREFIXES {
        if let Some(head) = clause.get(..prefix.len()) {
            if head.eq_ignore_ascii_case(prefix) {
                return clause[prefix.len()..].trim_start();
            }
        }
    }
    clause
}

/// Drops an opening "In 3 months," so the action that follows survives.
fn skip_leading_timeframe(text: &str) -> &str {
    match find_timeframe(text) {
        Some(tf) if tf.start == 0 => text[tf.end..]
            .trim_start_matches(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | ':')),
        _ => text,
    }
}

/// A timeframe phrase found in text.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TimeframeMatch {
    /// Normalised phrase such as `"3 months"`.
    phrase: String,
    /// Byte offset where the phrase starts, including a leading preposition.
    start: usize,
    /// Byte offset just past the unit word.
    end: usize,
}

fn find_timeframe(text: &str) -> Option<TimeframeMatch> {
    let words = word_spans(text);

    for (i, window) in words.windows(2).enumerate() {
        let (num_start, num_word) = window[0];
        let (unit_start, unit_word) = window[1];

        let Some(amount) = parse_amount(strip_punctuation(num_word)) else {
            continue;
        };
        let Some(unit) = parse_unit(strip_punctuation(unit_word)) else {
            continue;
        };

        let start = i
            .checked_sub(1)
            .map(|p| words[p])
            .filter(|(_, w)| {
                let w = strip_punctuation(w);
                TIME_PREPOSITIONS.iter().any(|p| w.eq_ignore_ascii_case(p))
            })
            .map(|(s, _)| s)
            .unwrap_or(num_start);

        let phrase = if amount == 1 {
            format!("1 {}", unit)
        } else {
            format!("{} {}s", amount, unit)
        };
        return Some(TimeframeMatch {
            phrase,
            start,
            end: unit_start + unit_word.len(),
        });
    }
    None
}

/// Whitespace-separated words paired with their byte offsets.
fn word_spans(text: &str) -> Vec<(usize, &str)> {
    let mut spans = Vec::new();
    let mut start = None;
    for (idx, ch) in text.char_indices() {
        match (ch.is_whitespace(), start) {
            (true, Some(s)) => {
                spans.push((s, &text[s..idx]));
                start = None;
            }
            (false, None) => start = Some(idx),
            _ => {}
        }
    }
    if let Some(s) = start {
        spans.push((s, &text[s..]));
    }
    spans
}

fn strip_punctuation(word: &str) -> &str {
    word.trim_matches(|c: char| !c.is_alphanumeric())
}

fn parse_amount(word: &str) -> Option<u32> {
    if let Ok(n) = word.parse::<u32>() {
        return (n > 0).then_some(n);
    }
    let n = match word.to_ascii_lowercase().as_str() {
        "one" | "a" | "an" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        "eleven" => 11,
        "twelve" => 12,
        _ => return None,
    };
    Some(n)
}

fn parse_unit(word: &str) -> Option<&'static str> {
    let lowered = word.to_ascii_lowercase();
    let singular = lowered.strip_suffix('s').unwrap_or(&lowered);
    match singular {
        "day" => Some("day"),
        "week" => Some("week"),
        "month" => Some("month"),
        "quarter" => Some("quarter"),
        "year" => Some("year"),
        _ => None,
    }
}

fn first_clause(text: &str) -> &str {
    let punct = text.find([';', '.', ',', '\n']).unwrap_or(text.len());
    let conj = text
        .to_ascii_lowercase()
        .find(" and ")
        .unwrap_or(text.len());
    &text[..punct.min(conj)]
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
