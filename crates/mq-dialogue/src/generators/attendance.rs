use std::collections::BTreeSet;

use mq_core::{Character, Role};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use crate::context::StatementContext;
use crate::generator::StatementGenerator;
use crate::statement::Statement;

/// Disclosures allowed per game.
pub const ATTENDANCE_LIMIT: usize = 2;

/// "I overheard that the X didn't make it to the party."
///
/// Memory is global: once a role has been named, no guest names it again.
#[derive(Debug, Default)]
pub struct WhoDidntAttend {
    named: BTreeSet<Role>,
}

impl WhoDidntAttend {
    /// A generator that has named nobody yet.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatementGenerator for WhoDidntAttend {
    fn name(&self) -> &str {
        "who-didnt-attend"
    }

    fn can_use(&self, _ctx: &StatementContext<'_>, _speaker: &Character) -> bool {
        self.named.len() < ATTENDANCE_LIMIT
    }

    fn generate(
        &mut self,
        ctx: &StatementContext<'_>,
        _speaker: &Character,
        truthful: bool,
        rng: &mut StdRng,
    ) -> Statement {
        let pool = if truthful {
            ctx.unused_roles
        } else {
            ctx.used_roles
        };
        let candidates: Vec<Role> = pool
            .iter()
            .copied()
            .filter(|r| !self.named.contains(r))
            .collect();
        let Some(role) = candidates.choose(rng).copied() else {
            log::warn!("no attendance fact left to disclose, using filler");
            return Statement::filler();
        };
        self.named.insert(role);
        Statement::fact(format!(
            "I overheard that the {role} didn't make it to the party."
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Fixture, rng};

    fn named_role(text: &str) -> Role {
        let rest = text.trim_start_matches("I overheard that the ");
        let name = rest.split(' ').next().unwrap();
        Role::parse(name).unwrap()
    }

    #[test]
    fn truthful_names_absent_role() {
        let fixture = Fixture::party();
        let ctx = fixture.ctx();
        let mut generator = WhoDidntAttend::new();
        let statement = generator.generate(&ctx, fixture.guest(0), true, &mut rng(2));
        assert!(fixture.unused.contains(&named_role(&statement.text)));
    }

    #[test]
    fn lie_names_present_role() {
        let fixture = Fixture::party();
        let ctx = fixture.ctx();
        let mut generator = WhoDidntAttend::new();
        let statement = generator.generate(&ctx, fixture.guest(3), false, &mut rng(2));
        assert!(fixture.used.contains(&named_role(&statement.text)));
    }

    #[test]
    fn never_repeats_and_stops_after_limit() {
        let fixture = Fixture::party();
        let ctx = fixture.ctx();
        let mut generator = WhoDidntAttend::new();
        let mut r = rng(9);
        let first = generator.generate(&ctx, fixture.guest(0), true, &mut r);
        assert!(generator.can_use(&ctx, fixture.guest(1)));
        let second = generator.generate(&ctx, fixture.guest(1), true, &mut r);
        assert_ne!(first.text, second.text);
        assert!(!generator.can_use(&ctx, fixture.guest(2)));
    }

    #[test]
    fn exhausted_pool_degrades_to_filler() {
        let mut fixture = Fixture::party();
        fixture.unused.clear();
        let ctx = fixture.ctx();
        let statement = WhoDidntAttend::new().generate(&ctx, fixture.guest(0), true, &mut rng(0));
        assert_eq!(statement, Statement::filler());
    }
}
