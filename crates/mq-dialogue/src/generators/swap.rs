use std::collections::BTreeSet;

use mq_core::{Character, Role};
use rand::rngs::StdRng;

use crate::context::StatementContext;
use crate::generator::StatementGenerator;
use crate::statement::Statement;

/// "Yes/No, I was in the last mask swap." Once per speaker per round.
#[derive(Debug, Default)]
pub struct WasInLastSwap {
    disclosed: BTreeSet<(Role, u32)>,
}

impl WasInLastSwap {
    /// A generator with no disclosures yet.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatementGenerator for WasInLastSwap {
    fn name(&self) -> &str {
        "was-in-last-swap"
    }

    fn can_use(&self, ctx: &StatementContext<'_>, speaker: &Character) -> bool {
        !self.disclosed.contains(&(speaker.true_role(), ctx.round))
    }

    fn generate(
        &mut self,
        ctx: &StatementContext<'_>,
        speaker: &Character,
        truthful: bool,
        _rng: &mut StdRng,
    ) -> Statement {
        self.disclosed.insert((speaker.true_role(), ctx.round));
        if truthful == speaker.was_in_last_swap() {
            Statement::fact("Yes, I was in the last mask swap.")
        } else {
            Statement::fact("No, I was not in the last mask swap.")
        }
    }
}
