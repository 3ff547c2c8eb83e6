use std::collections::BTreeSet;

use mq_core::{Character, MaskType, Role};
use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};

use crate::context::StatementContext;
use crate::generator::StatementGenerator;
use crate::statement::Statement;

/// Identities the befriend pool may reveal per game.
pub const IDENTITY_LIMIT: usize = 4;
/// Random draws when looking for a guest to reveal.
pub const IDENTITY_ATTEMPTS: usize = 40;

/// "I am one of the following roles: A, B, or C"
///
/// The truthful form includes the speaker's role; the lie names three others.
#[derive(Debug, Default)]
pub struct OneOfThree {
    disclosed: BTreeSet<Role>,
}

impl OneOfThree {
    /// A generator with no disclosures yet.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatementGenerator for OneOfThree {
    fn name(&self) -> &str {
        "one-of-three"
    }

    fn can_use(&self, _ctx: &StatementContext<'_>, speaker: &Character) -> bool {
        !self.disclosed.contains(&speaker.true_role())
    }

    fn generate(
        &mut self,
        ctx: &StatementContext<'_>,
        speaker: &Character,
        truthful: bool,
        rng: &mut StdRng,
    ) -> Statement {
        let me = speaker.true_role();
        let others: Vec<Role> = ctx.all_roles().into_iter().filter(|r| *r != me).collect();
        let needed = if truthful { 2 } else { 3 };
        if others.len() < needed {
            return Statement::filler();
        }

        let mut named: Vec<Role> = others.choose_multiple(rng, needed).copied().collect();
        if truthful {
            named.push(me);
        }
        named.shuffle(rng);
        self.disclosed.insert(me);
        Statement::fact(format!(
            "I am one of the following roles: {}, {}, or {}",
            named[0], named[1], named[2]
        ))
    }
}

/// "The X is the face behind the Y mask!" about anyone but the target.
///
/// The lie pairs the role with a mask someone else is wearing.
#[derive(Debug, Default)]
pub struct IdentityOfNonTarget {
    revealed: BTreeSet<Role>,
}

impl IdentityOfNonTarget {
    /// A generator with no disclosures yet.
    pub fn new() -> Self {
        Self::default()
    }

    fn mask_for(
        ctx: &StatementContext<'_>,
        subject: &Character,
        truthful: bool,
        rng: &mut StdRng,
    ) -> Option<MaskType> {
        let own = subject.mask_type()?;
        if truthful {
            return Some(own);
        }
        let worn: Vec<MaskType> = ctx
            .manor
            .characters()
            .iter()
            .filter(|c| c.id != subject.id)
            .filter_map(Character::mask_type)
            .filter(|m| *m != own)
            .collect();
        worn.choose(rng).copied()
    }
}

impl StatementGenerator for IdentityOfNonTarget {
    fn name(&self) -> &str {
        "identity-of-non-target"
    }

    fn can_use(&self, _ctx: &StatementContext<'_>, _speaker: &Character) -> bool {
        self.revealed.len() < IDENTITY_LIMIT
    }

    fn generate(
        &mut self,
        ctx: &StatementContext<'_>,
        _speaker: &Character,
        truthful: bool,
        rng: &mut StdRng,
    ) -> Statement {
        for _ in 0..IDENTITY_ATTEMPTS {
            let Some(subject) = ctx.manor.characters().choose(rng) else {
                break;
            };
            let role = subject.true_role();
            if role == ctx.target || subject.is_demasked() || self.revealed.contains(&role) {
                continue;
            }
            let Some(mask) = Self::mask_for(ctx, subject, truthful, rng) else {
                continue;
            };
            self.revealed.insert(role);
            return Statement::fact(format!("The {role} is the face behind the {mask} mask!"));
        }
        log::warn!("no identity left to reveal, using filler");
        Statement::filler()
    }
}

/// "The target is wearing either the A mask or the B mask." Once per game.
#[derive(Debug, Default)]
pub struct TargetMask {
    used: bool,
}

impl TargetMask {
    /// A generator that has not described the target yet.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatementGenerator for TargetMask {
    fn name(&self) -> &str {
        "target-mask"
    }

    fn can_use(&self, _ctx: &StatementContext<'_>, _speaker: &Character) -> bool {
        !self.used
    }

    fn generate(
        &mut self,
        ctx: &StatementContext<'_>,
        _speaker: &Character,
        truthful: bool,
        rng: &mut StdRng,
    ) -> Statement {
        let Some(target_mask) = ctx.target_character().and_then(Character::mask_type) else {
            log::warn!("target is not masked at the party, using filler");
            return Statement::filler();
        };
        let others: Vec<MaskType> = ctx
            .all_masks()
            .into_iter()
            .filter(|m| *m != target_mask)
            .collect();
        let needed = if truthful { 1 } else { 2 };
        if others.len() < needed {
            return Statement::filler();
        }

        let mut named: Vec<MaskType> = others.choose_multiple(rng, needed).copied().collect();
        if truthful {
            named.push(target_mask);
        }
        named.shuffle(rng);
        self.used = true;
        Statement::fact(format!(
            "The target is wearing either the {} mask or the {} mask.",
            named[0], named[1]
        ))
    }
}
