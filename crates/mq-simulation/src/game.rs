use mq_core::{
    Catalogs, Character, CharacterId, Manor, MaskType, MqError, Role, RoleData, RoomGraph,
    RoomType,
};
use mq_dialogue::{Interaction, Orchestrator, Statement, StatementContext};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::{Deserialize, Serialize};

use crate::config::{Difficulty, GameConfig};
use crate::error::{GameError, GameResult};
use crate::event::{EventLog, GameEvent, GameEventKind};
use crate::movement;
use crate::phase::{GamePhase, Outcome};

/// One row of the debug reveal: everything the player is trying to work out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealEntry {
    /// The guest.
    pub character: CharacterId,
    /// Current mask; `None` once unmasked.
    pub mask: Option<MaskType>,
    /// True role.
    pub role: Role,
    /// Influence of the true role.
    pub influence: i32,
    /// Current room.
    pub room: RoomType,
    /// Set on the guest the player must find.
    pub is_target: bool,
}

/// The game facade.
///
/// Owns the manor, the statement orchestrator, the RNG, and the event log.
/// Callers drive it with explicit commands; nothing happens between calls.
pub struct Game {
    config: GameConfig,
    catalogs: Catalogs,
    rng: StdRng,
    manor: Manor,
    orchestrator: Orchestrator,
    events: EventLog,
    phase: GamePhase,
    difficulty: Difficulty,
    round: u32,
    reputation: i32,
    target: Option<Role>,
    used_roles: Vec<Role>,
    unused_roles: Vec<Role>,
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("phase", &self.phase)
            .field("round", &self.round)
            .field("reputation", &self.reputation)
            .field("guests", &self.manor.characters().len())
            .field("events", &self.events.len())
            .finish()
    }
}

impl Game {
    /// Create a game seeded from `config.seed`. No game is running until
    /// [`Game::start_new_game`] is called.
    pub fn new(config: GameConfig, catalogs: Catalogs) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self::with_rng(config, catalogs, rng)
    }

    /// Create a game that draws from an injected RNG.
    pub fn with_rng(config: GameConfig, catalogs: Catalogs, rng: StdRng) -> Self {
        let events = EventLog::new(config.max_events);
        let manor = Manor::new(RoomGraph::new(catalogs.layout.home));
        Self {
            config,
            catalogs,
            rng,
            manor,
            orchestrator: Orchestrator::new(),
            events,
            phase: GamePhase::Setup,
            difficulty: Difficulty::default(),
            round: 0,
            reputation: 0,
            target: None,
            used_roles: Vec::new(),
            unused_roles: Vec::new(),
        }
    }

    /// Discard any running game and set up a fresh one.
    ///
    /// Configuration problems surface here and leave the previous state intact.
    pub fn start_new_game(&mut self, difficulty: Difficulty) -> GameResult<()> {
        let params = difficulty.params();
        self.catalogs.validate(params.cast_size)?;
        let mut manor = Manor::new(self.catalogs.layout.build()?);

        let eligible: Vec<&RoleData> = self
            .catalogs
            .roles
            .roles()
            .iter()
            .filter(|r| !(params.exclude_force_swap && r.abilities.can_force_swap))
            .collect();
        if eligible.len() < params.cast_size {
            return Err(MqError::Config(format!(
                "{difficulty} needs {} eligible roles, catalog offers {}",
                params.cast_size,
                eligible.len()
            ))
            .into());
        }
        let cast: Vec<RoleData> = eligible
            .choose_multiple(&mut self.rng, params.cast_size)
            .copied()
            .cloned()
            .collect();

        let mut used_roles: Vec<Role> = cast.iter().map(|r| r.role).collect();
        used_roles.sort();
        let unused_roles: Vec<Role> = self
            .catalogs
            .roles
            .roles()
            .iter()
            .map(|r| r.role)
            .filter(|r| !used_roles.contains(r))
            .collect();

        let target = self.pick_target(&cast)?;

        let reserved: Vec<MaskType> = cast
            .iter()
            .filter_map(|r| r.abilities.fixed_starting_mask)
            .collect();
        let mut pool: Vec<MaskType> = self
            .catalogs
            .masks
            .kinds()
            .into_iter()
            .filter(|m| !reserved.contains(m))
            .collect();
        pool.shuffle(&mut self.rng);

        let rooms = manor.graph().kinds();
        for role in cast {
            let mask = match role.abilities.fixed_starting_mask {
                Some(mask) => mask,
                None => pool
                    .pop()
                    .ok_or_else(|| MqError::Config("ran out of masks".into()))?,
            };
            let visuals = self
                .catalogs
                .masks
                .get(mask)
                .cloned()
                .ok_or_else(|| MqError::Config(format!("{mask} mask is not catalogued")))?;
            let room = rooms
                .choose(&mut self.rng)
                .copied()
                .ok_or_else(|| MqError::Config("room layout has no rooms".into()))?;
            manor.add_character(role, visuals, room)?;
        }

        self.manor = manor;
        self.orchestrator = Orchestrator::new();
        self.events = EventLog::new(self.config.max_events);
        self.phase = GamePhase::InProgress;
        self.difficulty = difficulty;
        self.round = 0;
        self.reputation = params.starting_reputation;
        self.target = Some(target);
        self.used_roles = used_roles;
        self.unused_roles = unused_roles;

        log::info!(
            "new {difficulty} game: {} guests, target {target}",
            params.cast_size
        );
        self.emit(
            GameEventKind::GameStarted {
                difficulty,
                target,
                cast: params.cast_size,
            },
            format!("Find the {target} among {} guests.", params.cast_size),
        );
        Ok(())
    }

    /// Prefer influential roles; fall back to anyone at the party.
    fn pick_target(&mut self, cast: &[RoleData]) -> GameResult<Role> {
        let influential: Vec<Role> = cast
            .iter()
            .filter(|r| r.influence >= self.config.target_min_influence)
            .map(|r| r.role)
            .collect();
        let everyone: Vec<Role> = cast.iter().map(|r| r.role).collect();
        let pool = if influential.is_empty() {
            &everyone
        } else {
            &influential
        };
        pool.choose(&mut self.rng)
            .copied()
            .ok_or_else(|| MqError::Config("cast is empty".into()).into())
    }

    /// Play one round: advance the counter, move everyone, let guests mingle,
    /// then check for the end of the game or a forced guess.
    pub fn advance_turn(&mut self) -> GameResult<GamePhase> {
        self.ensure_in_progress()?;
        let target = self.target_role_or_err()?;

        self.round += 1;
        self.emit(
            GameEventKind::RoundChanged { round: self.round },
            format!("Round {} begins.", self.round),
        );

        let plan = movement::plan_moves(&self.manor, target, &mut self.rng);
        let outcomes = movement::apply_moves(&mut self.manor, &plan)?;
        for outcome in outcomes {
            let description = if outcome.from == outcome.to {
                format!("{} stayed in the {}.", outcome.character, outcome.to)
            } else {
                format!("{} went from {} to {}.", outcome.character, outcome.from, outcome.to)
            };
            self.emit(
                GameEventKind::RoomChanged {
                    character: outcome.character,
                    from: outcome.from,
                    to: outcome.to,
                },
                description,
            );
            if let Some(other) = outcome.forced_swap {
                self.emit(
                    GameEventKind::MasksSwapped {
                        first: outcome.character,
                        second: other,
                    },
                    format!("Masks changed hands in the {}.", outcome.to),
                );
            }
        }
        self.manor.mingle();

        if self.round >= self.config.max_rounds {
            self.end(Outcome::Won);
        } else if self.config.is_forced_guess_round(self.round) {
            let candidates: Vec<CharacterId> =
                self.manor.masked_characters().iter().map(|c| c.id).collect();
            if candidates.is_empty() {
                log::warn!("forced guess skipped: nobody is masked");
            } else {
                self.emit(
                    GameEventKind::ForcedGuess {
                        candidates: candidates.clone(),
                    },
                    "Time to name someone.",
                );
                self.phase = GamePhase::ForcedGuess { candidates };
            }
        }
        Ok(self.phase.clone())
    }

    /// Force a mask swap between two masked guests.
    ///
    /// Before the chaos round both guests must share a room; afterwards any two
    /// will do. Returns `None` when no valid pair turns up.
    pub fn event_phase(&mut self) -> GameResult<Option<(CharacterId, CharacterId)>> {
        self.ensure_in_progress()?;

        let pair = if self.round < self.config.chaos_round {
            self.same_room_pair()
        } else {
            self.any_pair()
        };
        let Some((first, second)) = pair else {
            log::warn!("event phase in round {} found nobody to swap", self.round);
            return Ok(None);
        };

        self.manor.swap_masks(first, second)?;
        let announced = [first, second]
            .choose(&mut self.rng)
            .and_then(|id| self.manor.character(*id))
            .map(Character::true_role);
        let description = match announced {
            Some(role) => format!("The {role} has swapped masks with someone!"),
            None => "Two guests have swapped masks!".to_string(),
        };
        log::debug!("event swap between {first} and {second}");
        self.emit(GameEventKind::MasksSwapped { first, second }, description);
        Ok(Some((first, second)))
    }

    /// Two masked guests sharing a room, drawn from a random room that holds
    /// at least two of them.
    fn same_room_pair(&mut self) -> Option<(CharacterId, CharacterId)> {
        let crowded: Vec<Vec<CharacterId>> = self
            .manor
            .graph()
            .kinds()
            .into_iter()
            .map(|room| {
                self.manor
                    .characters_in_room(room)
                    .iter()
                    .filter(|c| !c.is_demasked())
                    .map(|c| c.id)
                    .collect::<Vec<_>>()
            })
            .filter(|masked| masked.len() >= 2)
            .collect();
        let masked = crowded.choose(&mut self.rng)?;
        Self::draw_pair(masked, &mut self.rng)
    }

    fn any_pair(&mut self) -> Option<(CharacterId, CharacterId)> {
        let masked: Vec<CharacterId> = self.manor.masked_characters().iter().map(|c| c.id).collect();
        Self::draw_pair(&masked, &mut self.rng)
    }

    fn draw_pair(pool: &[CharacterId], rng: &mut StdRng) -> Option<(CharacterId, CharacterId)> {
        match pool.choose_multiple(rng, 2).copied().collect::<Vec<_>>()[..] {
            [first, second] => Some((first, second)),
            _ => None,
        }
    }

    /// Accuse `id` of being the target. Ends the game either way.
    pub fn make_final_guess(&mut self, id: CharacterId) -> GameResult<Outcome> {
        self.ensure_live()?;
        let target = self.target_role_or_err()?;
        let guessed = self
            .manor
            .character(id)
            .ok_or(MqError::CharacterNotFound(id))?
            .true_role();
        let outcome = if guessed == target {
            Outcome::Won
        } else {
            Outcome::Lost
        };
        log::info!("final guess on {id} ({guessed}): {outcome}");
        self.end(outcome);
        Ok(outcome)
    }

    /// Name `role` for one of the forced-guess candidates.
    ///
    /// A correct guess removes the guest's mask and play resumes; unmasking the
    /// target this way wins outright. A wrong guess loses the game.
    pub fn resolve_forced_guess(&mut self, id: CharacterId, role: Role) -> GameResult<bool> {
        match &self.phase {
            GamePhase::Setup => return Err(GameError::NotStarted),
            GamePhase::Ended(_) => return Err(GameError::GameOver),
            GamePhase::InProgress => return Err(GameError::NoGuessPending),
            GamePhase::ForcedGuess { candidates } => {
                if !candidates.contains(&id) {
                    return Err(GameError::NotGuessable(id));
                }
            }
        }
        let actual = self
            .manor
            .character(id)
            .ok_or(MqError::CharacterNotFound(id))?
            .true_role();

        if actual != role {
            log::info!("forced guess on {id} was wrong ({role}, actually {actual})");
            self.end(Outcome::Lost);
            return Ok(false);
        }

        self.manor.demask(id)?;
        self.emit(
            GameEventKind::Demasked {
                character: id,
                role: actual,
            },
            format!("{id} is unmasked: the {actual}!"),
        );
        if Some(actual) == self.target {
            self.end(Outcome::Won);
        } else {
            self.phase = GamePhase::InProgress;
        }
        Ok(true)
    }

    /// Ask `id` something. The reply's reputation change is applied.
    pub fn interact(&mut self, id: CharacterId, interaction: Interaction) -> GameResult<Statement> {
        self.ensure_in_progress()?;
        let target = self.target_role_or_err()?;
        let ctx = StatementContext {
            manor: &self.manor,
            roles: &self.catalogs.roles,
            masks: &self.catalogs.masks,
            round: self.round,
            target,
            used_roles: &self.used_roles,
            unused_roles: &self.unused_roles,
        };
        let statement =
            self.orchestrator
                .resolve(interaction, &ctx, id, &mut self.reputation, &mut self.rng)?;
        self.emit(
            GameEventKind::Statement {
                character: id,
                interaction,
                statement: statement.clone(),
            },
            format!("{id}: \"{}\"", statement.text),
        );
        Ok(statement)
    }

    /// Where `id` would go next if it were hunting for or fleeing `target`.
    pub fn get_next_room(&mut self, id: CharacterId, target: Role) -> GameResult<Option<RoomType>> {
        Ok(movement::next_room(&self.manor, id, target, &mut self.rng)?)
    }

    /// Everyone in `room`, seen or not.
    pub fn characters_in_room(&self, room: RoomType) -> Vec<&Character> {
        self.manor.characters_in_room(room)
    }

    /// Guests the player can see in `room`; nobody in a blind spot.
    pub fn visible_characters(&self, room: RoomType) -> Vec<&Character> {
        if self.manor.graph().is_blind_spot(room) {
            return Vec::new();
        }
        self.manor.characters_in_room(room)
    }

    /// The guest holding the target role.
    pub fn target_character(&self) -> Option<&Character> {
        let found = self.target.and_then(|t| self.manor.find_by_role(t));
        if found.is_none() && self.phase.is_live() {
            log::warn!("no guest holds the target role");
        }
        found
    }

    /// The role the player is hunting; `None` before setup.
    pub fn target_role(&self) -> Option<Role> {
        self.target
    }

    /// Roles at the party, in catalog order.
    pub fn used_roles(&self) -> &[Role] {
        &self.used_roles
    }

    /// Catalogued roles not at the party.
    pub fn unused_roles(&self) -> &[Role] {
        &self.unused_roles
    }

    /// Return `true` if the guest holding `role` has been unmasked.
    pub fn is_character_guessed(&self, role: Role) -> bool {
        self.manor
            .find_by_role(role)
            .is_some_and(Character::is_demasked)
    }

    /// Note that the player is looking at `id`.
    pub fn select_character(&mut self, id: CharacterId) -> GameResult<()> {
        self.require_character(id)?;
        self.emit(
            GameEventKind::CharacterSelected { character: id },
            format!("{id} selected."),
        );
        Ok(())
    }

    /// Note that the player has picked `id` to name in a guess.
    pub fn select_for_guessing(&mut self, id: CharacterId) -> GameResult<()> {
        self.require_character(id)?;
        self.emit(
            GameEventKind::CharacterSelectedForGuessing { character: id },
            format!("{id} selected for guessing."),
        );
        Ok(())
    }

    /// Every guest's secret, for debugging.
    pub fn reveal(&self) -> Vec<RevealEntry> {
        self.manor
            .characters()
            .iter()
            .map(|c| RevealEntry {
                character: c.id,
                mask: c.mask_type(),
                role: c.true_role(),
                influence: c.influence(),
                room: c.current_room(),
                is_target: Some(c.true_role()) == self.target,
            })
            .collect()
    }

    /// Number of unmasked guests.
    pub fn score(&self) -> usize {
        self.manor
            .characters()
            .iter()
            .filter(|c| c.is_demasked())
            .count()
    }

    /// Rounds played; 0 before the first turn.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Where the game stands.
    pub fn phase(&self) -> &GamePhase {
        &self.phase
    }

    /// Difficulty of the current game.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// The player's standing with the guests.
    pub fn reputation(&self) -> i32 {
        self.reputation
    }

    /// The manor and its guests.
    pub fn manor(&self) -> &Manor {
        &self.manor
    }

    /// Tuning knobs for this game.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Catalogs the game was built from.
    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    /// Everything logged since the game started.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Hand all pending events to the caller.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    fn emit(&mut self, kind: GameEventKind, description: impl Into<String>) {
        self.events.push(GameEvent::new(self.round, kind, description));
    }

    fn end(&mut self, outcome: Outcome) {
        self.phase = GamePhase::Ended(outcome);
        log::info!("game {outcome} in round {}", self.round);
        self.emit(
            GameEventKind::GameEnded {
                won: outcome == Outcome::Won,
            },
            match outcome {
                Outcome::Won => "You won!",
                Outcome::Lost => "You lost.",
            },
        );
    }

    fn ensure_in_progress(&self) -> GameResult<()> {
        match self.phase {
            GamePhase::Setup => Err(GameError::NotStarted),
            GamePhase::InProgress => Ok(()),
            GamePhase::ForcedGuess { .. } => Err(GameError::GuessPending),
            GamePhase::Ended(_) => Err(GameError::GameOver),
        }
    }

    fn ensure_live(&self) -> GameResult<()> {
        match self.phase {
            GamePhase::Setup => Err(GameError::NotStarted),
            GamePhase::Ended(_) => Err(GameError::GameOver),
            GamePhase::InProgress | GamePhase::ForcedGuess { .. } => Ok(()),
        }
    }

    fn target_role_or_err(&self) -> GameResult<Role> {
        self.target.ok_or(GameError::NotStarted)
    }

    fn require_character(&self, id: CharacterId) -> GameResult<()> {
        self.manor
            .character(id)
            .map(|_| ())
            .ok_or_else(|| MqError::CharacterNotFound(id).into())
    }
}
