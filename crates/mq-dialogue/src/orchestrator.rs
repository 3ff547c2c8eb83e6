use mq_core::{Character, CharacterId, MqError, MqResult, Role};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::context::StatementContext;
use crate::generator::{GeneratorKind, GeneratorRegistry};
use crate::interaction::{Interaction, InterrogateOption};
use crate::statement::{Statement, StatementKind};

/// Random draws from a pool before falling back to fluff.
pub const PICK_ATTEMPTS: usize = 20;
/// Reputation change for the affirming reply to a direct guess.
pub const GUESS_REWARD: i32 = 1;
/// Reputation change for the denying reply to a direct guess.
pub const GUESS_PENALTY: i32 = -1;
/// Reputation change when a guest refuses an interaction.
pub const REFUSAL_PENALTY: i32 = -1;

/// Which generators serve which interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pools {
    /// Drawn from at random on talk.
    pub talk: Vec<GeneratorKind>,
    /// Drawn from at random on a number question.
    pub interrogate_number: Vec<GeneratorKind>,
    /// Answers "who didn't show?".
    pub interrogate_didnt_show: GeneratorKind,
    /// Answers "who have you talked to?".
    pub interrogate_has_talked: GeneratorKind,
    /// Answers "which three could you be?".
    pub interrogate_one_of_three: GeneratorKind,
    /// Drawn from at random when befriending succeeds.
    pub befriend: Vec<GeneratorKind>,
}

impl Default for Pools {
    fn default() -> Self {
        use GeneratorKind::*;
        Self {
            talk: vec![
                InfluenceParity,
                InfluenceRange,
                WhoDidntAttend,
                HaventContacted,
                OneOfThree,
                WasInLastSwap,
            ],
            interrogate_number: vec![InfluenceParity, InfluenceRange, InfluencePrimality, IsRoyalty],
            interrogate_didnt_show: WhoDidntAttend,
            interrogate_has_talked: HaveContacted,
            interrogate_one_of_three: OneOfThree,
            befriend: vec![IdentityOfNonTarget, LastContacted, TargetMask],
        }
    }
}

/// Reply when a guard stops the interaction. The lying form denies the guard.
pub fn guard_statement(truthful: bool) -> Statement {
    let text = if truthful {
        "I can't do that right now. There's a guard in this room (it may or may not be me)."
    } else {
        "Of course. There definitely isn't a guard present."
    };
    Statement::new(StatementKind::Guard, text, 0)
}

/// Reply when the speaker outranks the player.
pub fn interrogate_refused() -> Statement {
    Statement::new(
        StatementKind::Refusal,
        "(This person refuses to be interrogated... they must have higher reputation than you.)",
        REFUSAL_PENALTY,
    )
}

/// Reply when reputations are too far apart.
pub fn befriend_refused() -> Statement {
    Statement::new(
        StatementKind::Refusal,
        "(This person doesn't want to be your friend... their reputation is too far from yours.)",
        REFUSAL_PENALTY,
    )
}

/// Reply to "are you the `guessed`?".
///
/// The speaker affirms exactly when its truthfulness agrees with the guess
/// being correct, so a truthful speaker never denies a correct guess and a
/// liar never confirms one.
pub fn guess_response(speaker: Role, guessed: Role, truthful: bool) -> Statement {
    if truthful == (speaker == guessed) {
        Statement::new(
            StatementKind::GuessResponse,
            format!("Well guessed! I am indeed the {guessed}"),
            GUESS_REWARD,
        )
    } else {
        Statement::new(
            StatementKind::GuessResponse,
            format!("What!? How dare you insult me, I am NOT the {guessed}!"),
            GUESS_PENALTY,
        )
    }
}

/// Routes interactions to generators and applies gating and reputation.
#[derive(Debug, Default)]
pub struct Orchestrator {
    registry: GeneratorRegistry,
    pools: Pools,
}

impl Orchestrator {
    /// Fresh generators with the standard pools.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh generators with custom pools.
    pub fn with_pools(pools: Pools) -> Self {
        Self {
            registry: GeneratorRegistry::new(),
            pools,
        }
    }

    /// The generators and their disclosure memory.
    pub fn registry(&self) -> &GeneratorRegistry {
        &self.registry
    }

    /// Which generators serve which interaction.
    pub fn pools(&self) -> &Pools {
        &self.pools
    }

    /// Resolve one interaction with `speaker` and apply its reputation delta.
    ///
    /// A speaker lies exactly when its true role always lies. Any interaction
    /// but talk is stopped when a guard shares the speaker's room.
    pub fn resolve(
        &mut self,
        interaction: Interaction,
        ctx: &StatementContext<'_>,
        speaker: CharacterId,
        reputation: &mut i32,
        rng: &mut StdRng,
    ) -> MqResult<Statement> {
        let speaker = ctx
            .manor
            .character(speaker)
            .ok_or(MqError::CharacterNotFound(speaker))?;
        let truthful = !speaker.role_data().abilities.always_lies;

        let statement = if !interaction.is_talk() && ctx.guard_present(speaker) {
            guard_statement(truthful)
        } else {
            self.select(interaction, ctx, speaker, truthful, *reputation, rng)
        };

        log::debug!(
            "{} ({interaction}): {:?} {}",
            speaker.id,
            statement.kind,
            statement.reputation_delta
        );
        *reputation += statement.reputation_delta;
        Ok(statement)
    }

    fn select(
        &mut self,
        interaction: Interaction,
        ctx: &StatementContext<'_>,
        speaker: &Character,
        truthful: bool,
        reputation: i32,
        rng: &mut StdRng,
    ) -> Statement {
        match interaction {
            Interaction::Talk => {
                let pool = self.pools.talk.clone();
                self.from_pool(&pool, ctx, speaker, truthful, rng)
            }
            Interaction::Interrogate(option) => {
                if reputation <= speaker.influence() {
                    return interrogate_refused();
                }
                match option {
                    InterrogateOption::Number => {
                        let pool = self.pools.interrogate_number.clone();
                        self.from_pool(&pool, ctx, speaker, truthful, rng)
                    }
                    InterrogateOption::DidntShow => {
                        let kind = self.pools.interrogate_didnt_show;
                        self.single(kind, ctx, speaker, truthful, rng)
                    }
                    InterrogateOption::HasTalked => {
                        let kind = self.pools.interrogate_has_talked;
                        self.single(kind, ctx, speaker, truthful, rng)
                    }
                    InterrogateOption::OneOfThree => {
                        let kind = self.pools.interrogate_one_of_three;
                        self.single(kind, ctx, speaker, truthful, rng)
                    }
                }
            }
            Interaction::Befriend => {
                if (reputation - speaker.influence()).abs() > 1 {
                    return befriend_refused();
                }
                let pool = self.pools.befriend.clone();
                self.from_pool(&pool, ctx, speaker, truthful, rng)
            }
            Interaction::DirectGuess(guessed) => {
                guess_response(speaker.true_role(), guessed, truthful)
            }
        }
    }

    fn from_pool(
        &mut self,
        pool: &[GeneratorKind],
        ctx: &StatementContext<'_>,
        speaker: &Character,
        truthful: bool,
        rng: &mut StdRng,
    ) -> Statement {
        for _ in 0..PICK_ATTEMPTS {
            let Some(kind) = pool.choose(rng).copied() else {
                break;
            };
            if self.registry.can_use(kind, ctx, speaker) {
                return self.single(kind, ctx, speaker, truthful, rng);
            }
        }
        log::warn!("no eligible generator for {}, using fluff", speaker.id);
        Statement::fluff(rng)
    }

    fn single(
        &mut self,
        kind: GeneratorKind,
        ctx: &StatementContext<'_>,
        speaker: &Character,
        truthful: bool,
        rng: &mut StdRng,
    ) -> Statement {
        match self.registry.get_mut(kind) {
            Some(generator) if generator.can_use(ctx, speaker) => {
                generator.generate(ctx, speaker, truthful, rng)
            }
            _ => Statement::fluff(rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Fixture, rng};
    use mq_core::{MaskType, RoomType};

    fn guarded() -> Fixture {
        Fixture::new(
            &[
                (Role::King, MaskType::Wolf, RoomType::Ballroom),
                (Role::Guard, MaskType::Fox, RoomType::Ballroom),
                (Role::Pope, MaskType::Deer, RoomType::Ballroom),
                (Role::Baron, MaskType::Mouse, RoomType::Study),
            ],
            Role::King,
        )
    }

    #[test]
    fn guard_stops_interrogation_but_not_talk() {
        let fixture = guarded();
        let ctx = fixture.ctx();
        let mut orchestrator = Orchestrator::new();
        let mut reputation = 10;
        let mut r = rng(0);

        let stopped = orchestrator
            .resolve(
                Interaction::Interrogate(InterrogateOption::Number),
                &ctx,
                CharacterId(0),
                &mut reputation,
                &mut r,
            )
            .unwrap();
        assert_eq!(stopped, guard_statement(true));
        assert_eq!(reputation, 10);

        let talk = orchestrator
            .resolve(Interaction::Talk, &ctx, CharacterId(0), &mut reputation, &mut r)
            .unwrap();
        assert_ne!(talk.kind, StatementKind::Guard);
    }

    #[test]
    fn guard_blocks_guessing_too() {
        let fixture = guarded();
        let ctx = fixture.ctx();
        let mut reputation = 5;
        let statement = Orchestrator::new()
            .resolve(
                Interaction::DirectGuess(Role::King),
                &ctx,
                CharacterId(0),
                &mut reputation,
                &mut rng(0),
            )
            .unwrap();
        assert_eq!(statement.kind, StatementKind::Guard);
        assert_eq!(reputation, 5);
    }

    #[test]
    fn pope_denies_the_guard() {
        let fixture = guarded();
        let ctx = fixture.ctx();
        let mut reputation = 10;
        let statement = Orchestrator::new()
            .resolve(
                Interaction::Befriend,
                &ctx,
                CharacterId(2),
                &mut reputation,
                &mut rng(0),
            )
            .unwrap();
        assert_eq!(statement.text, "Of course. There definitely isn't a guard present.");
    }

    #[test]
    fn interrogation_needs_higher_reputation() {
        let fixture = Fixture::party();
        let ctx = fixture.ctx();
        let mut orchestrator = Orchestrator::new();
        // The Baron has influence 3.
        let mut reputation = 3;
        let statement = orchestrator
            .resolve(
                Interaction::Interrogate(InterrogateOption::Number),
                &ctx,
                CharacterId(2),
                &mut reputation,
                &mut rng(0),
            )
            .unwrap();
        assert_eq!(statement, interrogate_refused());
        assert_eq!(reputation, 2);

        let mut reputation = 4;
        let statement = orchestrator
            .resolve(
                Interaction::Interrogate(InterrogateOption::Number),
                &ctx,
                CharacterId(2),
                &mut reputation,
                &mut rng(0),
            )
            .unwrap();
        assert_eq!(statement.kind, StatementKind::Fact);
        assert_eq!(reputation, 4);
    }

    #[test]
    fn befriend_needs_close_reputation() {
        let fixture = Fixture::party();
        let ctx = fixture.ctx();
        let mut orchestrator = Orchestrator::new();
        // The King has influence 9.
        let mut reputation = 7;
        let statement = orchestrator
            .resolve(Interaction::Befriend, &ctx, CharacterId(0), &mut reputation, &mut rng(0))
            .unwrap();
        assert_eq!(statement, befriend_refused());
        assert_eq!(reputation, 6);

        let mut reputation = 8;
        let statement = orchestrator
            .resolve(Interaction::Befriend, &ctx, CharacterId(0), &mut reputation, &mut rng(0))
            .unwrap();
        assert_ne!(statement.kind, StatementKind::Refusal);
    }

    #[test]
    fn direct_guess_rewards_and_penalises() {
        let fixture = Fixture::party();
        let ctx = fixture.ctx();
        let mut orchestrator = Orchestrator::new();
        let mut reputation = 3;

        let right = orchestrator
            .resolve(
                Interaction::DirectGuess(Role::Duke),
                &ctx,
                CharacterId(1),
                &mut reputation,
                &mut rng(0),
            )
            .unwrap();
        assert_eq!(right.text, "Well guessed! I am indeed the Duke");
        assert_eq!(reputation, 4);

        let wrong = orchestrator
            .resolve(
                Interaction::DirectGuess(Role::Baron),
                &ctx,
                CharacterId(1),
                &mut reputation,
                &mut rng(0),
            )
            .unwrap();
        assert_eq!(wrong.text, "What!? How dare you insult me, I am NOT the Baron!");
        assert_eq!(reputation, 3);
    }

    #[test]
    fn pope_inverts_guess_response() {
        assert_eq!(
            guess_response(Role::Pope, Role::Pope, false).text,
            "What!? How dare you insult me, I am NOT the Pope!"
        );
        assert_eq!(
            guess_response(Role::Pope, Role::King, false).text,
            "Well guessed! I am indeed the King"
        );
    }

    #[test]
    fn exhausted_option_falls_back_to_fluff() {
        let fixture = Fixture::party();
        let ctx = fixture.ctx();
        let mut orchestrator = Orchestrator::new();
        let mut reputation = 9;
        let mut r = rng(0);
        let option = Interaction::Interrogate(InterrogateOption::OneOfThree);

        let first = orchestrator
            .resolve(option, &ctx, CharacterId(2), &mut reputation, &mut r)
            .unwrap();
        assert!(first.text.starts_with("I am one of the following roles"));
        let second = orchestrator
            .resolve(option, &ctx, CharacterId(2), &mut reputation, &mut r)
            .unwrap();
        assert_eq!(second.kind, StatementKind::Filler);
        assert_eq!(reputation, 9);
    }

    #[test]
    fn exhausted_pool_falls_back_to_fluff() {
        let fixture = Fixture::party();
        let ctx = fixture.ctx();
        let mut orchestrator = Orchestrator::with_pools(Pools {
            talk: vec![GeneratorKind::InfluenceParity],
            ..Pools::default()
        });
        let mut reputation = 0;
        let mut r = rng(0);
        let first = orchestrator
            .resolve(Interaction::Talk, &ctx, CharacterId(0), &mut reputation, &mut r)
            .unwrap();
        assert!(first.is_fact());
        let second = orchestrator
            .resolve(Interaction::Talk, &ctx, CharacterId(0), &mut reputation, &mut r)
            .unwrap();
        assert_eq!(second.kind, StatementKind::Filler);
    }

    #[test]
    fn unknown_speaker_is_an_error() {
        let fixture = Fixture::party();
        let ctx = fixture.ctx();
        let mut reputation = 0;
        let result = Orchestrator::new().resolve(
            Interaction::Talk,
            &ctx,
            CharacterId(42),
            &mut reputation,
            &mut rng(0),
        );
        assert!(matches!(result, Err(MqError::CharacterNotFound(CharacterId(42)))));
    }
}
