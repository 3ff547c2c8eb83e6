use std::collections::{BTreeMap, BTreeSet};

use mq_core::{Character, CharacterId, Role};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use crate::context::StatementContext;
use crate::generator::StatementGenerator;
use crate::statement::Statement;

/// First round in which contact clues are offered.
pub const CONTACT_MIN_ROUND: u32 = 3;
/// Contact clues each speaking role may give.
pub const CONTACT_LIMIT_PER_SPEAKER: usize = 2;

/// Roles `speaker` has met, itself excluded.
fn met_roles(speaker: &Character) -> Vec<Role> {
    let me = speaker.true_role();
    speaker
        .contacted_roles()
        .iter()
        .copied()
        .filter(|r| *r != me)
        .collect()
}

/// Catalogued roles `speaker` has not met, itself excluded.
fn unmet_roles(ctx: &StatementContext<'_>, speaker: &Character) -> Vec<Role> {
    let me = speaker.true_role();
    ctx.all_roles()
        .into_iter()
        .filter(|r| *r != me && !speaker.has_contacted(*r))
        .collect()
}

/// Per-speaker record of named roles. A speaker's own role stands for the
/// "nobody" line.
#[derive(Debug, Default)]
struct ContactMemory {
    named: BTreeMap<Role, BTreeSet<Role>>,
}

impl ContactMemory {
    fn count(&self, speaker: Role) -> usize {
        self.named.get(&speaker).map_or(0, BTreeSet::len)
    }

    fn contains(&self, speaker: Role, role: Role) -> bool {
        self.named.get(&speaker).is_some_and(|s| s.contains(&role))
    }

    fn record(&mut self, speaker: Role, role: Role) {
        self.named.entry(speaker).or_default().insert(role);
    }

    fn can_use(&self, ctx: &StatementContext<'_>, speaker: &Character) -> bool {
        ctx.round >= CONTACT_MIN_ROUND && self.count(speaker.true_role()) < CONTACT_LIMIT_PER_SPEAKER
    }

    /// Pick an unnamed role from `source`, or say `nobody` if `source` is empty.
    fn disclose(
        &mut self,
        speaker: Role,
        source: Vec<Role>,
        nobody: &str,
        line: impl Fn(Role) -> String,
        rng: &mut StdRng,
    ) -> Statement {
        if source.is_empty() {
            if self.contains(speaker, speaker) {
                return Statement::filler();
            }
            self.record(speaker, speaker);
            return Statement::fact(nobody);
        }
        let fresh: Vec<Role> = source
            .into_iter()
            .filter(|r| !self.contains(speaker, *r))
            .collect();
        match fresh.choose(rng).copied() {
            Some(role) => {
                self.record(speaker, role);
                Statement::fact(line(role))
            }
            None => {
                log::warn!("{speaker} has no new contact to disclose, using filler");
                Statement::filler()
            }
        }
    }
}

/// "I have met up with the X today."
#[derive(Debug, Default)]
pub struct HaveContacted {
    memory: ContactMemory,
}

impl HaveContacted {
    /// A generator with no disclosures yet.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatementGenerator for HaveContacted {
    fn name(&self) -> &str {
        "have-contacted"
    }

    fn can_use(&self, ctx: &StatementContext<'_>, speaker: &Character) -> bool {
        self.memory.can_use(ctx, speaker)
    }

    fn generate(
        &mut self,
        ctx: &StatementContext<'_>,
        speaker: &Character,
        truthful: bool,
        rng: &mut StdRng,
    ) -> Statement {
        let source = if truthful {
            met_roles(speaker)
        } else {
            unmet_roles(ctx, speaker)
        };
        self.memory.disclose(
            speaker.true_role(),
            source,
            "I haven't been in the same room as anyone today.",
            |role| format!("I have met up with the {role} today."),
            rng,
        )
    }
}

/// "Have you seen the X? I have yet to find them today."
#[derive(Debug, Default)]
pub struct HaventContacted {
    memory: ContactMemory,
}

impl HaventContacted {
    /// A generator with no disclosures yet.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatementGenerator for HaventContacted {
    fn name(&self) -> &str {
        "havent-contacted"
    }

    fn can_use(&self, ctx: &StatementContext<'_>, speaker: &Character) -> bool {
        self.memory.can_use(ctx, speaker)
    }

    fn generate(
        &mut self,
        ctx: &StatementContext<'_>,
        speaker: &Character,
        truthful: bool,
        rng: &mut StdRng,
    ) -> Statement {
        let source = if truthful {
            unmet_roles(ctx, speaker)
        } else {
            met_roles(speaker)
        };
        self.memory.disclose(
            speaker.true_role(),
            source,
            "I have introduced myself to everyone at least once today.",
            |role| format!("Have you seen the {role}? I have yet to find them today."),
            rng,
        )
    }
}

/// "I just talked to the X. They were quite agreeable."
///
/// Usable again once the speaker's last contact has changed.
#[derive(Debug, Default)]
pub struct LastContacted {
    disclosed: BTreeMap<Role, Option<CharacterId>>,
}

impl LastContacted {
    /// A generator with no disclosures yet.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatementGenerator for LastContacted {
    fn name(&self) -> &str {
        "last-contacted"
    }

    fn can_use(&self, _ctx: &StatementContext<'_>, speaker: &Character) -> bool {
        self.disclosed.get(&speaker.true_role()) != Some(&speaker.last_contact())
    }

    fn generate(
        &mut self,
        ctx: &StatementContext<'_>,
        speaker: &Character,
        truthful: bool,
        rng: &mut StdRng,
    ) -> Statement {
        let last = speaker
            .last_contact()
            .and_then(|id| ctx.manor.character(id))
            .map(Character::true_role);

        let named = if truthful {
            last
        } else {
            let me = speaker.true_role();
            let lies: Vec<Role> = ctx
                .all_roles()
                .into_iter()
                .filter(|r| Some(*r) != last && *r != me)
                .collect();
            match lies.choose(rng).copied() {
                Some(role) => Some(role),
                None => return Statement::filler(),
            }
        };

        self.disclosed
            .insert(speaker.true_role(), speaker.last_contact());
        match named {
            Some(role) => Statement::fact(format!(
                "I just talked to the {role}. They were quite agreeable."
            )),
            None => Statement::fact("I haven't spoken with anyone today."),
        }
    }
}
