use super::*;
use crate::ports::event_channel::event_channel;
use crate::use_cases::testing::ScriptedProvider;
use rand::SeedableRng;
use std::time::Duration;
use werewolf_domain::{DeathCause, Role, VoteOutcome, WitchAction};

fn seat(n: u8) -> SeatId {
    SeatId::new(n).unwrap()
}

/// Wolves 1-3, villagers 4-6, Hunter 7, Witch 8, Seer 9
fn assignment() -> RoleAssignment {
    RoleAssignment::from_roles(vec![
        Role::Wolf,
        Role::Wolf,
        Role::Wolf,
        Role::Villager,
        Role::Villager,
        Role::Villager,
        Role::Hunter,
        Role::Witch,
        Role::Seer,
    ])
    .unwrap()
}

async fn play(
    provider: &ScriptedProvider,
    params: EngineParams,
) -> (Result<MatchReport, MatchError>, Vec<GameEvent>) {
    let (mut tx, mut rx) = event_channel();
    let mut rng = StdRng::seed_from_u64(7);
    let result = PhaseEngine::new(provider, &mut tx, &mut rng, &params, assignment())
        .run()
        .await;
    drop(tx);
    let (events, _) = rx.drain();
    (result, events.into_iter().map(|e| e.event).collect())
}

fn one_day() -> EngineParams {
    EngineParams::default().with_max_days(1)
}

fn speakers(events: &[GameEvent], wanted: SpeechKind) -> Vec<u8> {
    events
        .iter()
        .filter_map(|e| match e {
            GameEvent::Speech { seat, speech, .. } if *speech == wanted => Some(seat.get()),
            _ => None,
        })
        .collect()
}

fn deaths(events: &[GameEvent]) -> Vec<(u8, DeathCause)> {
    events
        .iter()
        .filter_map(|e| match e {
            GameEvent::Death { seat, cause, .. } => Some((seat.get(), *cause)),
            _ => None,
        })
        .collect()
}

fn day_vote_outcomes(events: &[GameEvent]) -> Vec<VoteOutcome> {
    events
        .iter()
        .filter_map(|e| match e {
            GameEvent::VoteTally {
                vote: VoteKind::Execution,
                outcome,
                ..
            } => Some(*outcome),
            _ => None,
        })
        .collect()
}

fn wolves_vote(provider: ScriptedProvider, answers: &[&str]) -> ScriptedProvider {
    (1..=3).fold(provider, |p, wolf| p.script(wolf, "wolf_vote", answers))
}

fn everyone_votes(provider: ScriptedProvider, answers: &[&str]) -> ScriptedProvider {
    (1..=9).fold(provider, |p, voter| p.script(voter, "day_vote", answers))
}

#[tokio::test]
async fn test_wolf_kill_on_villager_without_witch() {
    let provider = wolves_vote(ScriptedProvider::new(), &["4"]);
    let (result, events) = play(&provider, one_day()).await;

    assert!(matches!(result, Err(MatchError::DayLimitExceeded(1))));
    assert_eq!(deaths(&events), vec![(4, DeathCause::WolfKill)]);
    assert!(events.contains(&GameEvent::WitchDecision {
        witch: seat(8),
        decision: WitchAction::LetDie { target: seat(4) },
    }));
    assert_eq!(speakers(&events, SpeechKind::LastWords), vec![4]);
    assert_eq!(
        speakers(&events, SpeechKind::Discussion),
        vec![5, 6, 7, 8, 9, 1, 2, 3]
    );
}

#[tokio::test]
async fn test_hunter_killed_by_wolves_retaliates() {
    let provider = wolves_vote(ScriptedProvider::new(), &["7"]).script(7, "hunter_shot", &["2"]);
    let (_, events) = play(&provider, one_day()).await;

    assert_eq!(
        deaths(&events),
        vec![(7, DeathCause::WolfKill), (2, DeathCause::HunterShot)]
    );
    let shot = events
        .iter()
        .position(|e| matches!(e, GameEvent::Retaliation { hunter, target } if hunter.get() == 7 && target.get() == 2))
        .expect("retaliation event");
    let dawn_death = events
        .iter()
        .position(|e| matches!(e, GameEvent::Death { seat, .. } if seat.get() == 7))
        .unwrap();
    assert!(dawn_death < shot);

    // Both night deaths speak, in ascending seat order
    assert_eq!(speakers(&events, SpeechKind::LastWords), vec![2, 7]);
    assert_eq!(
        speakers(&events, SpeechKind::Discussion),
        vec![8, 9, 1, 3, 4, 5, 6]
    );
    let hunter_asks = provider
        .asked()
        .iter()
        .filter(|(_, k)| *k == DecisionKind::HunterShot)
        .count();
    assert_eq!(hunter_asks, 1);
}

#[tokio::test]
async fn test_poisoned_hunter_does_not_retaliate() {
    let provider = wolves_vote(ScriptedProvider::new(), &["4"])
        .script(8, "witch_poison", &["7"])
        .script(7, "hunter_shot", &["2"]);
    let (_, events) = play(&provider, one_day()).await;

    assert_eq!(
        deaths(&events),
        vec![(4, DeathCause::WolfKill), (7, DeathCause::Poison)]
    );
    assert!(
        !provider
            .asked()
            .iter()
            .any(|(_, k)| *k == DecisionKind::HunterShot)
    );
}

#[tokio::test]
async fn test_wolf_kill_and_poison_on_same_hunter_dies_once_without_shot() {
    let provider = wolves_vote(ScriptedProvider::new(), &["7"])
        .script(8, "witch_poison", &["7"])
        .script(7, "hunter_shot", &["2"]);
    let (_, events) = play(&provider, one_day()).await;

    assert_eq!(deaths(&events), vec![(7, DeathCause::Poison)]);
    assert!(!events.iter().any(|e| matches!(e, GameEvent::Retaliation { .. })));
}

#[tokio::test]
async fn test_antidote_and_poison_never_on_same_night() {
    let provider = wolves_vote(ScriptedProvider::new(), &["4", "5"])
        .script(8, "witch_antidote", &["save"])
        .script(8, "witch_poison", &["no"]);
    let (result, events) = play(&provider, EngineParams::default().with_max_days(2)).await;
    assert!(matches!(result, Err(MatchError::DayLimitExceeded(2))));

    let witch_asks: Vec<DecisionKind> = provider
        .asked()
        .into_iter()
        .filter(|(s, _)| *s == seat(8))
        .map(|(_, k)| k)
        .filter(|k| matches!(k, DecisionKind::WitchAntidote { .. } | DecisionKind::WitchPoison))
        .collect();
    // Night 1: antidote only. Night 2: antidote is spent, poison is offered.
    assert_eq!(
        witch_asks,
        vec![
            DecisionKind::WitchAntidote { victim: seat(4) },
            DecisionKind::WitchPoison
        ]
    );

    // Seat 4 was saved; seat 5 dies on night 2
    assert_eq!(deaths(&events), vec![(5, DeathCause::WolfKill)]);
    // A peaceful first night: nobody gives last words, discussion starts at seat 1
    let first_day_speakers: Vec<u8> = speakers(&events, SpeechKind::Discussion)
        .into_iter()
        .take(9)
        .collect();
    assert_eq!(first_day_speakers, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
}

#[tokio::test]
async fn test_day_vote_tie_executes_nobody() {
    let mut provider = ScriptedProvider::new();
    for voter in [1, 2, 4, 6] {
        provider = provider.script(voter, "day_vote", &["3"]);
    }
    for voter in [3, 5, 7, 8] {
        provider = provider.script(voter, "day_vote", &["5"]);
    }
    provider = provider.script(9, "day_vote", &["abstain"]);

    let (_, events) = play(&provider, one_day()).await;
    let tally = events
        .iter()
        .find_map(|e| match e {
            GameEvent::VoteTally {
                vote: VoteKind::Execution,
                winners,
                max_votes,
                abstain_count,
                outcome,
                ..
            } => Some((winners.clone(), *max_votes, *abstain_count, *outcome)),
            _ => None,
        })
        .unwrap();
    assert_eq!(tally, (vec![seat(3), seat(5)], 4, 1, VoteOutcome::Tie));
    assert!(deaths(&events).is_empty());
}

#[tokio::test]
async fn test_day_vote_abstain_majority_executes_nobody() {
    let mut provider = ScriptedProvider::new();
    for voter in 1..=5 {
        provider = provider.script(voter, "day_vote", &["弃票"]);
    }
    for voter in 6..=9 {
        provider = provider.script(voter, "day_vote", &["1"]);
    }

    let (_, events) = play(&provider, one_day()).await;
    assert_eq!(day_vote_outcomes(&events), vec![VoteOutcome::AbstainMajority]);
    assert!(deaths(&events).is_empty());
}

#[tokio::test]
async fn test_villagers_win_on_the_death_that_empties_the_wolves() {
    // Night 1 poison takes seat 1; days 1 and 2 execute seats 2 and 3
    let provider = everyone_votes(
        ScriptedProvider::new().script(8, "witch_poison", &["1"]),
        &["2", "3"],
    );
    let (result, events) = play(&provider, EngineParams::default()).await;
    let report = result.unwrap();

    assert_eq!(report.winner, Faction::Villagers);
    assert_eq!(report.days, 2);
    assert_eq!(report.state.winner(), Some(Faction::Villagers));
    assert_eq!(
        deaths(&events),
        vec![
            (1, DeathCause::Poison),
            (2, DeathCause::Execution),
            (3, DeathCause::Execution)
        ]
    );

    // Nothing else happens between the final death and the result
    let n = events.len();
    assert!(matches!(events[n - 3], GameEvent::Death { seat, .. } if seat.get() == 3));
    assert_eq!(
        events[n - 2],
        GameEvent::PhaseBoundary {
            day: 2,
            phase: Phase::GameOver
        }
    );
    assert!(matches!(
        events[n - 1],
        GameEvent::FactionResult {
            winner: Faction::Villagers,
            ..
        }
    ));
    assert_eq!(report.log.len(), events.len());

    // A dead seat is only queried for its own last words
    let seat_one: Vec<DecisionKind> = provider
        .asked()
        .into_iter()
        .filter(|(s, _)| *s == seat(1))
        .map(|(_, k)| k)
        .collect();
    assert_eq!(
        seat_one,
        vec![
            DecisionKind::WolfDiscussion,
            DecisionKind::WolfVote,
            DecisionKind::LastWords
        ]
    );
}

#[tokio::test]
async fn test_execution_that_ends_the_game_skips_retaliation() {
    // Seer killed, witch poisons herself, hunter executed: no specials left
    let provider = everyone_votes(
        wolves_vote(ScriptedProvider::new(), &["9"])
            .script(8, "witch_poison", &["8"])
            .script(7, "hunter_shot", &["1"]),
        &["7"],
    );
    let (result, events) = play(&provider, EngineParams::default()).await;
    let report = result.unwrap();

    assert_eq!(report.winner, Faction::Wolves);
    assert_eq!(report.days, 1);
    assert!(!events.iter().any(|e| matches!(e, GameEvent::Retaliation { .. })));
    assert!(
        !provider
            .asked()
            .iter()
            .any(|(_, k)| *k == DecisionKind::HunterShot)
    );
}

#[tokio::test(start_paused = true)]
async fn test_unreliable_answers_become_no_action() {
    let provider = ScriptedProvider::new()
        .slow(9, "seer_check")
        .script(1, "wolf_vote", &["4"])
        .script(2, "wolf_vote", &["banana"])
        .script(3, "wolf_vote", &["4"])
        .failing(8, "witch_antidote")
        .script(5, "day_vote", &["4"])
        .script(6, "discussion", &["(I should not say this)"]);
    let params = one_day().with_decision_timeout(Duration::from_secs(5));
    let (result, events) = play(&provider, params).await;
    assert!(matches!(result, Err(MatchError::DayLimitExceeded(1))));

    let no_actions: Vec<(u8, &'static str)> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::NoAction { seat, decision } => Some((seat.get(), decision.as_str())),
            _ => None,
        })
        .collect();
    assert_eq!(
        no_actions,
        vec![
            (9, "seer_check"),
            (2, "wolf_vote"),
            (8, "witch_antidote"),
            (6, "discussion"),
            (5, "day_vote"),
        ]
    );

    // The malformed wolf ballot counted as an abstention
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::VoteTally {
            vote: VoteKind::WolfKill,
            abstain_count: 1,
            max_votes: 2,
            ..
        }
    )));
    assert_eq!(deaths(&events), vec![(4, DeathCause::WolfKill)]);
    assert!(!events.iter().any(|e| matches!(e, GameEvent::Reveal { .. })));
}

#[tokio::test]
async fn test_seer_reveal_is_private() {
    let provider = ScriptedProvider::new().script(9, "seer_check", &["2"]);
    let (_, events) = play(&provider, one_day()).await;

    assert!(events.contains(&GameEvent::Reveal {
        seer: seat(9),
        target: seat(2),
        faction: Faction::Wolves,
    }));
    assert!(provider.told(seat(9)).iter().any(|m| m == "Seat 2 is a wolf."));
    assert!(!provider.told(seat(4)).iter().any(|m| m.contains("is a wolf")));
}

#[tokio::test]
async fn test_wolf_discussion_is_shared_only_with_wolves() {
    let provider = ScriptedProvider::new().script(1, "wolf_discussion", &["Kill seat 9 (the seer)."]);
    let (_, events) = play(&provider, one_day()).await;

    assert_eq!(speakers(&events, SpeechKind::WolfDiscussion), vec![1, 2, 3]);
    assert!(events.contains(&GameEvent::Speech {
        seat: seat(1),
        speech: SpeechKind::WolfDiscussion,
        text: "Kill seat 9 .".to_string(),
    }));
    let heard = |s: u8| {
        provider
            .told(seat(s))
            .iter()
            .any(|m| m.starts_with("Seat 1 thinks:"))
    };
    assert!(!heard(1));
    assert!(heard(2));
    assert!(heard(3));
    assert!(!heard(4));
    assert!(!heard(9));
}

#[tokio::test]
async fn test_discussion_strips_asides_before_broadcast() {
    let provider =
        ScriptedProvider::new().script(5, "discussion", &["(I am the seer) I am a villager."]);
    let (_, events) = play(&provider, one_day()).await;

    assert!(events.contains(&GameEvent::Speech {
        seat: seat(5),
        speech: SpeechKind::Discussion,
        text: "I am a villager.".to_string(),
    }));
    assert!(
        provider
            .told(seat(1))
            .iter()
            .any(|m| m == "Seat 5 says: I am a villager.")
    );
}

fn entered(events: &[GameEvent], day: u32, phase: Phase) -> bool {
    events.contains(&GameEvent::PhaseBoundary { day, phase })
}

#[tokio::test]
async fn test_dead_seer_is_skipped_on_later_nights() {
    let provider = wolves_vote(ScriptedProvider::new(), &["9"]);
    let (result, events) = play(&provider, EngineParams::default().with_max_days(2)).await;
    assert!(matches!(result, Err(MatchError::DayLimitExceeded(2))));
    assert_eq!(deaths(&events), vec![(9, DeathCause::WolfKill)]);

    let seer_asks = provider
        .asked()
        .iter()
        .filter(|(_, k)| *k == DecisionKind::SeerCheck)
        .count();
    assert_eq!(seer_asks, 1);
    assert!(entered(&events, 1, Phase::NightSeer));
    assert!(!entered(&events, 2, Phase::NightSeer));
    assert!(entered(&events, 2, Phase::NightWolfVote));
}

#[tokio::test]
async fn test_dead_witch_is_skipped_on_later_nights() {
    let provider = wolves_vote(ScriptedProvider::new(), &["8", "4"]);
    let (result, events) = play(&provider, EngineParams::default().with_max_days(2)).await;
    assert!(matches!(result, Err(MatchError::DayLimitExceeded(2))));
    assert_eq!(
        deaths(&events),
        vec![(8, DeathCause::WolfKill), (4, DeathCause::WolfKill)]
    );

    let witch_asks: Vec<DecisionKind> = provider
        .asked()
        .into_iter()
        .filter(|(_, k)| matches!(k, DecisionKind::WitchAntidote { .. } | DecisionKind::WitchPoison))
        .map(|(_, k)| k)
        .collect();
    assert_eq!(
        witch_asks,
        vec![
            DecisionKind::WitchAntidote { victim: seat(8) },
            DecisionKind::WitchPoison
        ]
    );
    assert!(!entered(&events, 2, Phase::NightWitchAntidote));
    assert!(!entered(&events, 2, Phase::NightWitchPoison));
}
