//! Prompt and narrative templates for a Werewolf match

use crate::core::seat::SeatId;
use crate::decision::{DecisionKind, DecisionRequest, SeatBriefing};
use crate::game::Death;
use crate::role::{Faction, RoleAssignment};

/// Templates for every question and broadcast a seat receives
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt establishing the rules and the seat's private role
    pub fn system_prompt(briefing: &SeatBriefing) -> String {
        let mut prompt = format!(
            r#"You are a player in a game of Werewolf with 9 players: {}.
There is no sheriff election. Each day, players speak in seat order starting just after the first seat that died during the night.
The wolves win once every villager or every special role (Seer, Witch, Hunter) is dead. Everyone else wins once every wolf is dead.
After the game, every player votes for the best and the worst player of the match.

Rules for the roles:
- The Seer may check one player's side each night.
- Wolves know each other and choose one player to kill each night. Killing a fellow wolf is allowed.
- The Witch has one antidote and one poison for the whole game, and may not use both on the same night.
- The Hunter may shoot one player after being killed by the wolves or executed by vote, but not after being poisoned.

You are seat {}, and your role is {}. Keep your role in mind, think calmly, and do whatever helps your side win, including bluffing."#,
            briefing.composition.summary(),
            briefing.seat,
            briefing.role
        );

        if !briefing.wolf_teammates.is_empty() {
            prompt.push_str(&format!(
                "\nYour fellow wolves are seats {}. Work together, act like a villager in public, and find the special roles.",
                join_seats(&briefing.wolf_teammates)
            ));
        }

        prompt
    }

    /// The question for a given decision kind
    pub fn request(kind: DecisionKind) -> DecisionRequest {
        let prompt = match kind {
            DecisionKind::SeerCheck => Self::seer_check().to_string(),
            DecisionKind::WolfDiscussion => Self::wolf_discussion().to_string(),
            DecisionKind::WolfVote => Self::wolf_vote().to_string(),
            DecisionKind::WitchAntidote { victim } => Self::witch_antidote(victim),
            DecisionKind::WitchPoison => Self::witch_poison().to_string(),
            DecisionKind::HunterShot => Self::hunter_shot().to_string(),
            DecisionKind::Discussion => Self::discussion().to_string(),
            DecisionKind::LastWords => Self::last_words().to_string(),
            DecisionKind::DayVote => Self::day_vote().to_string(),
            DecisionKind::AwardBallot => Self::award_ballot().to_string(),
        };
        DecisionRequest::new(kind, prompt)
    }

    pub fn seer_check() -> &'static str {
        "You may check one player's side tonight. Reply with only the seat number x of the player to check."
    }

    pub fn wolf_discussion() -> &'static str {
        "As a wolf, talk with your teammates: who should die tonight, and why? Keep it short, around 100 words."
    }

    pub fn wolf_vote() -> &'static str {
        "As a wolf, vote for tonight's kill based on everything you know. Reply with only the seat number x."
    }

    pub fn witch_antidote(victim: SeatId) -> String {
        format!(
            "Seat {victim} is about to die tonight. Will you use your antidote to save them? Reply only \"save\" or \"no\"."
        )
    }

    pub fn witch_poison() -> &'static str {
        "Will you use your poison tonight? If so, reply with only the seat number x to poison. If not, reply only \"no\"."
    }

    pub fn hunter_shot() -> &'static str {
        "You are the Hunter and you have died. You may now shoot one player. Reply with only the seat number x."
    }

    pub fn discussion() -> &'static str {
        "It is your turn to speak. Everything you say is shared with all players, so do not reveal private thoughts or put your intentions in parentheses. Speak in your side's interest and keep it short, around 100 words."
    }

    pub fn last_words() -> &'static str {
        "You have died and may now give your last words. They are shared with all players. Do not reveal private thoughts; speak in your side's interest."
    }

    pub fn day_vote() -> &'static str {
        "Vote now for the player to execute today. Reply with only the seat number x, or reply only \"abstain\"."
    }

    pub fn award_ballot() -> &'static str {
        "Based on the whole game, vote for the best player and the worst player of this match. Reply strictly in the format 'x-y', where x is the best seat and y the worst seat."
    }

    // ==================== Narrative ====================

    pub fn night_falls(day: u32) -> String {
        format!("Night falls. (Night {day})")
    }

    pub fn seer_result(target: SeatId, faction: Faction) -> String {
        let side = match faction {
            Faction::Wolves => "a wolf",
            Faction::Villagers => "good",
        };
        format!("Seat {target} is {side}.")
    }

    pub fn wolf_statement(seat: SeatId, text: &str) -> String {
        format!("Seat {seat} thinks: {text}")
    }

    pub fn wolf_target(target: Option<SeatId>) -> String {
        match target {
            Some(seat) => format!("The pack will kill seat {seat} tonight."),
            None => "The pack chose nobody tonight.".to_string(),
        }
    }

    pub fn dawn(day: u32, deaths: &[Death]) -> String {
        if deaths.is_empty() {
            format!("Day breaks. Last night was peaceful. (Day {day})")
        } else {
            let seats: Vec<SeatId> = deaths.iter().map(|d| d.seat).collect();
            let noun = if seats.len() == 1 { "Seat" } else { "Seats" };
            format!(
                "Day breaks. {noun} {} died last night. (Day {day})",
                join_seats(&seats)
            )
        }
    }

    pub fn hunter_shot_announce(hunter: SeatId, target: SeatId) -> String {
        format!("Seat {hunter} was the Hunter and shoots seat {target}.")
    }

    pub fn discussion_begins() -> &'static str {
        "Players will now speak in turn."
    }

    pub fn speech(seat: SeatId, text: &str) -> String {
        format!("Seat {seat} says: {text}")
    }

    pub fn last_words_from(seat: SeatId, text: &str) -> String {
        format!("Seat {seat}'s last words: {text}")
    }

    pub fn votes_cast(ballots: &[(SeatId, Option<SeatId>)]) -> String {
        ballots
            .iter()
            .map(|(voter, target)| match target {
                Some(target) => format!("Seat {voter} voted for seat {target}."),
                None => format!("Seat {voter} abstained."),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn execution(target: Option<SeatId>) -> String {
        match target {
            Some(seat) => format!("Seat {seat} is executed by vote."),
            None => "A tie or too many abstentions: nobody is executed today.".to_string(),
        }
    }

    /// Post-match reveal of every role and the full log
    pub fn match_over(winner: Faction, assignment: &RoleAssignment, log: &str) -> String {
        let roles = assignment
            .iter()
            .map(|(seat, role)| format!("seat {seat}: {role}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "The game is over and the {} win. Roles this match: {roles}.\nFull game log:\n{log}",
            winner.display_name()
        )
    }
}

fn join_seats(seats: &[SeatId]) -> String {
    seats
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(" and ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::{Role, RoleComposition};

    fn seat(n: u8) -> SeatId {
        SeatId::new(n).unwrap()
    }

    #[test]
    fn test_system_prompt_mentions_teammates_for_wolves() {
        let briefing = SeatBriefing {
            seat: seat(2),
            role: Role::Wolf,
            wolf_teammates: vec![seat(5), seat(9)],
            composition: RoleComposition::standard(),
        };
        let prompt = PromptTemplate::system_prompt(&briefing);
        assert!(prompt.contains("You are seat 2"));
        assert!(prompt.contains("Wolf"));
        assert!(prompt.contains("seats 5 and 9"));
        assert!(prompt.contains("3 Wolf, 3 Villager"));
    }

    #[test]
    fn test_system_prompt_for_villager_has_no_teammates() {
        let briefing = SeatBriefing {
            seat: seat(4),
            role: Role::Villager,
            wolf_teammates: vec![],
            composition: RoleComposition::standard(),
        };
        let prompt = PromptTemplate::system_prompt(&briefing);
        assert!(!prompt.contains("fellow wolves"));
    }

    #[test]
    fn test_request_carries_kind() {
        let request = PromptTemplate::request(DecisionKind::WitchAntidote { victim: seat(4) });
        assert_eq!(request.kind, DecisionKind::WitchAntidote { victim: seat(4) });
        assert!(request.prompt.contains("Seat 4"));
    }

    #[test]
    fn test_dawn() {
        assert!(PromptTemplate::dawn(2, &[]).contains("peaceful"));
        let deaths = [
            Death {
                seat: seat(3),
                role: Role::Seer,
                cause: crate::game::DeathCause::WolfKill,
            },
            Death {
                seat: seat(6),
                role: Role::Wolf,
                cause: crate::game::DeathCause::Poison,
            },
        ];
        assert!(PromptTemplate::dawn(2, &deaths).contains("Seats 3 and 6 died"));
    }
}
