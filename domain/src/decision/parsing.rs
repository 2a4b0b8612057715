//! Parsing free-text agent answers into typed decisions.
//!
//! Every bit of leniency toward agent output lives here. Callers get either
//! a typed choice or a [`MalformedDecision`], and treat the latter as "no
//! action" for the seat that answered.
//!
//! # Functions
//!
//! | Function | Decision | Accepts |
//! |----------|----------|---------|
//! | [`parse_target`] | seer check, wolf vote, hunter shot | first number, 1-9 |
//! | [`parse_vote`] | day vote | number, or an abstain token |
//! | [`parse_consent`] | witch antidote | save / decline tokens |
//! | [`parse_poison`] | witch poison | number, or a decline token |
//! | [`parse_award_ballot`] | MVP/LVP ballot | two numbers, e.g. `3-7` |
//! | [`parse_speech`] | discussion, last words | any non-empty text |
//! | [`strip_asides`] | speeches | removes `(...)` and `（...）` asides |

use crate::core::seat::SeatId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const ABSTAIN_TOKENS: &[&str] = &["abstain", "pass", "skip", "none", "弃票"];
const ACCEPT_TOKENS: &[&str] = &["save", "yes", "救"];
const DECLINE_CONSENT_TOKENS: &[&str] = &["no", "decline", "不救"];
const DECLINE_POISON_TOKENS: &[&str] = &["no", "none", "decline", "不用"];

/// An answer that could not be turned into a valid action
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedDecision {
    #[error("empty answer")]
    Empty,

    #[error("no seat number in answer: {0}")]
    NoTarget(String),

    #[error("seat number {0} is out of range")]
    OutOfRange(u64),

    #[error("unrecognized answer: {0}")]
    Unrecognized(String),

    #[error("award ballot needs two seat numbers, found {0}")]
    IncompleteBallot(usize),
}

/// A day-vote answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteChoice {
    Target(SeatId),
    Abstain,
}

impl VoteChoice {
    pub fn target(self) -> Option<SeatId> {
        match self {
            VoteChoice::Target(seat) => Some(seat),
            VoteChoice::Abstain => None,
        }
    }
}

/// An accept/decline answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Consent {
    Accept,
    Decline,
}

/// A witch-poison answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoisonChoice {
    Target(SeatId),
    Decline,
}

/// A best/worst player pick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardPick {
    pub mvp: SeatId,
    pub lvp: SeatId,
}

/// Parse a single seat number from an answer.
///
/// The first run of digits (ASCII or full-width) is taken; anything outside
/// 1-9 is rejected rather than clamped.
///
/// # Examples
///
/// ```
/// use werewolf_domain::decision::parse_target;
///
/// assert_eq!(parse_target("7").unwrap().get(), 7);
/// assert_eq!(parse_target("I check seat 3.").unwrap().get(), 3);
/// assert!(parse_target("10").is_err());
/// assert!(parse_target("nobody").is_err());
/// ```
pub fn parse_target(raw: &str) -> Result<SeatId, MalformedDecision> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(MalformedDecision::Empty);
    }
    let value = digit_runs(trimmed)
        .next()
        .ok_or_else(|| MalformedDecision::NoTarget(trimmed.to_string()))?;
    seat_from(value)
}

/// Parse a day-vote answer: a seat number or an abstain token.
pub fn parse_vote(raw: &str) -> Result<VoteChoice, MalformedDecision> {
    let normalized = normalize(raw);
    if normalized.is_empty() {
        return Err(MalformedDecision::Empty);
    }
    if ABSTAIN_TOKENS.contains(&normalized.as_str()) {
        return Ok(VoteChoice::Abstain);
    }
    match parse_target(raw) {
        Ok(seat) => Ok(VoteChoice::Target(seat)),
        Err(MalformedDecision::NoTarget(_)) if starts_with_token(&normalized, ABSTAIN_TOKENS) => {
            Ok(VoteChoice::Abstain)
        }
        Err(MalformedDecision::NoTarget(_)) => {
            Err(MalformedDecision::Unrecognized(raw.trim().to_string()))
        }
        Err(e) => Err(e),
    }
}

/// Parse an accept/decline answer.
///
/// Decline tokens are checked first, so "不救" never reads as "救".
pub fn parse_consent(raw: &str) -> Result<Consent, MalformedDecision> {
    let normalized = normalize(raw);
    if normalized.is_empty() {
        return Err(MalformedDecision::Empty);
    }
    if starts_with_token(&normalized, DECLINE_CONSENT_TOKENS) {
        Ok(Consent::Decline)
    } else if starts_with_token(&normalized, ACCEPT_TOKENS) {
        Ok(Consent::Accept)
    } else {
        Err(MalformedDecision::Unrecognized(raw.trim().to_string()))
    }
}

/// Parse a poison answer: a seat number or a decline token.
pub fn parse_poison(raw: &str) -> Result<PoisonChoice, MalformedDecision> {
    let normalized = normalize(raw);
    if normalized.is_empty() {
        return Err(MalformedDecision::Empty);
    }
    if starts_with_token(&normalized, DECLINE_POISON_TOKENS) {
        return Ok(PoisonChoice::Decline);
    }
    match parse_target(raw) {
        Ok(seat) => Ok(PoisonChoice::Target(seat)),
        Err(MalformedDecision::NoTarget(_)) => {
            Err(MalformedDecision::Unrecognized(raw.trim().to_string()))
        }
        Err(e) => Err(e),
    }
}

/// Parse an `x-y` award ballot (best player, worst player).
///
/// Any separator works; the first two digit runs are used.
///
/// # Examples
///
/// ```
/// use werewolf_domain::decision::parse_award_ballot;
///
/// let pick = parse_award_ballot("3-7").unwrap();
/// assert_eq!((pick.mvp.get(), pick.lvp.get()), (3, 7));
/// assert!(parse_award_ballot("3").is_err());
/// ```
pub fn parse_award_ballot(raw: &str) -> Result<AwardPick, MalformedDecision> {
    let values: Vec<u64> = digit_runs(raw).take(2).collect();
    match values.as_slice() {
        [mvp, lvp] => Ok(AwardPick {
            mvp: seat_from(*mvp)?,
            lvp: seat_from(*lvp)?,
        }),
        [] if raw.trim().is_empty() => Err(MalformedDecision::Empty),
        other => Err(MalformedDecision::IncompleteBallot(other.len())),
    }
}

/// Remove parenthesized asides, ASCII `(...)` or full-width `（...）`.
///
/// An unterminated opening bracket and everything after it is kept
/// verbatim. The result is trimmed.
pub fn strip_asides(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find(['(', '（']) {
        let close_char = if rest[open..].starts_with('(') { ')' } else { '）' };
        let open_len = rest[open..].chars().next().map_or(1, char::len_utf8);
        match rest[open + open_len..].find(close_char) {
            Some(close) => {
                out.push_str(&rest[..open]);
                rest = &rest[open + open_len + close + close_char.len_utf8()..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out.trim().to_string()
}

/// Parse a speech: asides stripped, and an empty result rejected.
pub fn parse_speech(raw: &str) -> Result<String, MalformedDecision> {
    let text = strip_asides(raw);
    if text.is_empty() {
        Err(MalformedDecision::Empty)
    } else {
        Ok(text)
    }
}

fn seat_from(value: u64) -> Result<SeatId, MalformedDecision> {
    u8::try_from(value)
        .ok()
        .and_then(|n| SeatId::new(n).ok())
        .ok_or(MalformedDecision::OutOfRange(value))
}

fn digit_value(c: char) -> Option<u64> {
    match c {
        '0'..='9' => Some(c as u64 - '0' as u64),
        '０'..='９' => Some(c as u64 - '０' as u64),
        _ => None,
    }
}

/// Numeric values of each run of consecutive digits, saturating on overflow
fn digit_runs(text: &str) -> impl Iterator<Item = u64> + '_ {
    let mut chars = text.chars().peekable();
    std::iter::from_fn(move || {
        while let Some(&c) = chars.peek() {
            if digit_value(c).is_some() {
                break;
            }
            chars.next();
        }
        let mut value: Option<u64> = None;
        while let Some(d) = chars.peek().copied().and_then(digit_value) {
            value = Some(value.unwrap_or(0).saturating_mul(10).saturating_add(d));
            chars.next();
        }
        value
    })
}

/// Lowercase and drop punctuation, keeping letters, digits and whitespace
fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_lowercase()
}

/// Whether `text` begins with one of `tokens` as a whole word.
///
/// ASCII tokens must be followed by a non-alphanumeric character or the end
/// of input; CJK tokens only need to be a prefix.
fn starts_with_token(text: &str, tokens: &[&str]) -> bool {
    tokens.iter().any(|token| {
        text.strip_prefix(token).is_some_and(|rest| {
            !token.is_ascii() || !rest.starts_with(|c: char| c.is_ascii_alphanumeric())
        })
    })
}
