use std::collections::BTreeMap;
use std::fmt;

use mq_core::Character;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::context::StatementContext;
use crate::generators::{attendance, contact, identity, influence, swap};
use crate::statement::Statement;

/// A source of one kind of clue.
///
/// Generators keep private memory of what they have disclosed so the same fact
/// is not handed out twice. Memory lives as long as the generator, which is one
/// game.
pub trait StatementGenerator: fmt::Debug {
    /// Human-readable name for this generator.
    fn name(&self) -> &str;

    /// Whether the generator still has something to say for `speaker`.
    fn can_use(&self, ctx: &StatementContext<'_>, speaker: &Character) -> bool;

    /// Produce a statement. A truthful statement asserts something that holds;
    /// a deceptive one asserts something that does not. Falls back to
    /// [`Statement::filler`] when no acceptable fact is found.
    fn generate(
        &mut self,
        ctx: &StatementContext<'_>,
        speaker: &Character,
        truthful: bool,
        rng: &mut StdRng,
    ) -> Statement;
}

/// Identifies a generator within a [`GeneratorRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorKind {
    /// Odd or even influence.
    InfluenceParity,
    /// Influence within a small range.
    InfluenceRange,
    /// Prime or composite influence.
    InfluencePrimality,
    /// Royal or not.
    IsRoyalty,
    /// Names a role absent from the party.
    WhoDidntAttend,
    /// A role the speaker has met.
    HaveContacted,
    /// A role the speaker has not met.
    HaventContacted,
    /// Three roles, one of them the speaker's.
    OneOfThree,
    /// Role of the guest the speaker met last.
    LastContacted,
    /// Whether the speaker took part in the latest swap.
    WasInLastSwap,
    /// Exposes some other guest who is not the target.
    IdentityOfNonTarget,
    /// Describes the mask the target wears.
    TargetMask,
}

impl GeneratorKind {
    /// Every generator kind.
    pub const ALL: [GeneratorKind; 12] = [
        GeneratorKind::InfluenceParity,
        GeneratorKind::InfluenceRange,
        GeneratorKind::InfluencePrimality,
        GeneratorKind::IsRoyalty,
        GeneratorKind::WhoDidntAttend,
        GeneratorKind::HaveContacted,
        GeneratorKind::HaventContacted,
        GeneratorKind::OneOfThree,
        GeneratorKind::LastContacted,
        GeneratorKind::WasInLastSwap,
        GeneratorKind::IdentityOfNonTarget,
        GeneratorKind::TargetMask,
    ];

    /// A fresh generator of this kind with empty memory.
    pub fn build(self) -> Box<dyn StatementGenerator> {
        match self {
            Self::InfluenceParity => Box::new(influence::InfluenceParity::new()),
            Self::InfluenceRange => Box::new(influence::InfluenceRange::new(influence::RANGE_SPAN)),
            Self::InfluencePrimality => Box::new(influence::InfluencePrimality::new()),
            Self::IsRoyalty => Box::new(influence::IsRoyalty::new(influence::ROYALTY_THRESHOLD)),
            Self::WhoDidntAttend => Box::new(attendance::WhoDidntAttend::new()),
            Self::HaveContacted => Box::new(contact::HaveContacted::new()),
            Self::HaventContacted => Box::new(contact::HaventContacted::new()),
            Self::OneOfThree => Box::new(identity::OneOfThree::new()),
            Self::LastContacted => Box::new(contact::LastContacted::new()),
            Self::WasInLastSwap => Box::new(swap::WasInLastSwap::new()),
            Self::IdentityOfNonTarget => Box::new(identity::IdentityOfNonTarget::new()),
            Self::TargetMask => Box::new(identity::TargetMask::new()),
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InfluenceParity => "influence-parity",
            Self::InfluenceRange => "influence-in-range",
            Self::InfluencePrimality => "influence-primality",
            Self::IsRoyalty => "is-royalty",
            Self::WhoDidntAttend => "who-didnt-attend",
            Self::HaveContacted => "have-contacted",
            Self::HaventContacted => "havent-contacted",
            Self::OneOfThree => "one-of-three",
            Self::LastContacted => "last-contacted",
            Self::WasInLastSwap => "was-in-last-swap",
            Self::IdentityOfNonTarget => "identity-of-non-target",
            Self::TargetMask => "target-mask",
        };
        write!(f, "{name}")
    }
}

/// One live instance of every generator. Pools refer to generators by kind,
/// so a generator shared by two pools shares its memory between them.
#[derive(Debug)]
pub struct GeneratorRegistry {
    generators: BTreeMap<GeneratorKind, Box<dyn StatementGenerator>>,
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl GeneratorRegistry {
    /// A registry with a fresh instance of every kind.
    pub fn new() -> Self {
        let generators = GeneratorKind::ALL
            .iter()
            .map(|kind| (*kind, kind.build()))
            .collect();
        Self { generators }
    }

    /// Replace the generator registered for `kind`.
    pub fn register(&mut self, kind: GeneratorKind, generator: Box<dyn StatementGenerator>) {
        self.generators.insert(kind, generator);
    }

    /// The generator registered for `kind`.
    pub fn get(&self, kind: GeneratorKind) -> Option<&dyn StatementGenerator> {
        self.generators.get(&kind).map(|g| g.as_ref())
    }

    /// Mutable access to the generator registered for `kind`.
    pub fn get_mut(&mut self, kind: GeneratorKind) -> Option<&mut Box<dyn StatementGenerator>> {
        self.generators.get_mut(&kind)
    }

    /// Return `true` if `kind` is registered and eligible for `speaker`.
    pub fn can_use(
        &self,
        kind: GeneratorKind,
        ctx: &StatementContext<'_>,
        speaker: &Character,
    ) -> bool {
        self.get(kind).is_some_and(|g| g.can_use(ctx, speaker))
    }

    /// Number of registered generators.
    pub fn len(&self) -> usize {
        self.generators.len()
    }

    /// Return `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}
