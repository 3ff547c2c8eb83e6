use std::collections::BTreeSet;

use mq_core::{Character, Role};
use rand::Rng;
use rand::rngs::StdRng;

use crate::context::StatementContext;
use crate::generator::StatementGenerator;
use crate::statement::Statement;

/// Width of the disclosed influence range; the bounds are inclusive.
pub const RANGE_SPAN: i32 = 4;
/// Attempts at finding a range before giving up.
pub const RANGE_ATTEMPTS: usize = 100;
/// Influence at which a role counts as royalty.
pub const ROYALTY_THRESHOLD: i32 = 5;

/// Return `true` if `min <= value <= max`.
pub fn in_range(value: i32, min: i32, max: i32) -> bool {
    value >= min && value <= max
}

/// Trial-division primality; anything below 2 is not prime.
pub fn is_prime(n: i32) -> bool {
    if n < 2 {
        return false;
    }
    (2..n).take_while(|d| d * d <= n).all(|d| n % d != 0)
}

/// Search for a range of width `span` whose lower bound lies in
/// `0..=ceiling - span + 1` and that contains `influence` exactly when
/// `truthful` is set.
pub fn pick_range(
    influence: i32,
    span: i32,
    ceiling: i32,
    truthful: bool,
    rng: &mut StdRng,
) -> Option<(i32, i32)> {
    let upper = (ceiling - span + 1).max(0);
    for _ in 0..RANGE_ATTEMPTS {
        let min = rng.random_range(0..=upper);
        let max = min + span;
        if truthful == in_range(influence, min, max) {
            return Some((min, max));
        }
    }
    None
}

/// "My influence is between A and B (inclusive)."
#[derive(Debug)]
pub struct InfluenceRange {
    span: i32,
    disclosed: BTreeSet<Role>,
}

impl InfluenceRange {
    /// Ranges `span` wide.
    pub fn new(span: i32) -> Self {
        Self {
            span,
            disclosed: BTreeSet::new(),
        }
    }
}

impl StatementGenerator for InfluenceRange {
    fn name(&self) -> &str {
        "influence-in-range"
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
        let Some((min, max)) =
            pick_range(speaker.influence(), self.span, ctx.max_influence(), truthful, rng)
        else {
            log::warn!("no influence range found for {}, using filler", speaker.id);
            return Statement::filler();
        };
        self.disclosed.insert(speaker.true_role());
        Statement::fact(format!("My influence is between {min} and {max} (inclusive)."))
    }
}

/// "My influence is an even/odd number."
#[derive(Debug, Default)]
pub struct InfluenceParity {
    disclosed: BTreeSet<Role>,
}

impl InfluenceParity {
    /// A generator with no disclosures yet.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatementGenerator for InfluenceParity {
    fn name(&self) -> &str {
        "influence-parity"
    }

    fn can_use(&self, _ctx: &StatementContext<'_>, speaker: &Character) -> bool {
        !self.disclosed.contains(&speaker.true_role())
    }

    fn generate(
        &mut self,
        _ctx: &StatementContext<'_>,
        speaker: &Character,
        truthful: bool,
        _rng: &mut StdRng,
    ) -> Statement {
        self.disclosed.insert(speaker.true_role());
        let even = speaker.influence() % 2 == 0;
        if truthful == even {
            Statement::fact("My influence is an even number.")
        } else {
            Statement::fact("My influence is an odd number.")
        }
    }
}

/// "My influence is (not) a prime number."
#[derive(Debug, Default)]
pub struct InfluencePrimality {
    disclosed: BTreeSet<Role>,
}

impl InfluencePrimality {
    /// A generator with no disclosures yet.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatementGenerator for InfluencePrimality {
    fn name(&self) -> &str {
        "influence-primality"
    }

    fn can_use(&self, _ctx: &StatementContext<'_>, speaker: &Character) -> bool {
        !self.disclosed.contains(&speaker.true_role())
    }

    fn generate(
        &mut self,
        _ctx: &StatementContext<'_>,
        speaker: &Character,
        truthful: bool,
        _rng: &mut StdRng,
    ) -> Statement {
        self.disclosed.insert(speaker.true_role());
        if truthful == is_prime(speaker.influence()) {
            Statement::fact("My influence is a prime number.")
        } else {
            Statement::fact("My influence is not a prime number.")
        }
    }
}

/// "Yes/No, I am royalty."
#[derive(Debug)]
pub struct IsRoyalty {
    threshold: i32,
    disclosed: BTreeSet<Role>,
}

impl IsRoyalty {
    /// Royalty starts at `threshold` influence.
    pub fn new(threshold: i32) -> Self {
        Self {
            threshold,
            disclosed: BTreeSet::new(),
        }
    }
}

impl StatementGenerator for IsRoyalty {
    fn name(&self) -> &str {
        "is-royalty"
    }

    fn can_use(&self, _ctx: &StatementContext<'_>, speaker: &Character) -> bool {
        !self.disclosed.contains(&speaker.true_role())
    }

    fn generate(
        &mut self,
        _ctx: &StatementContext<'_>,
        speaker: &Character,
        truthful: bool,
        _rng: &mut StdRng,
    ) -> Statement {
        self.disclosed.insert(speaker.true_role());
        let royal = speaker.influence() >= self.threshold;
        if truthful == royal {
            Statement::fact(format!(
                "Yes, I am royalty (my influence is {} or above).",
                self.threshold
            ))
        } else {
            Statement::fact(format!(
                "No, I am not royalty (my influence is below {}).",
                self.threshold
            ))
        }
    }
}
