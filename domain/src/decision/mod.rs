//! Decisions requested from seat agents
//!
//! A [`DecisionRequest`] carries the prompt text together with the
//! [`DecisionKind`] it is asking about. Whatever comes back is free text;
//! [`parsing`] turns it into a typed choice or a [`MalformedDecision`].

pub mod parsing;
pub mod request;

pub use parsing::{
    AwardPick, Consent, MalformedDecision, PoisonChoice, VoteChoice, parse_award_ballot,
    parse_consent, parse_poison, parse_speech, parse_target, parse_vote, strip_asides,
};
pub use request::{DecisionKind, DecisionRequest, SeatBriefing};
