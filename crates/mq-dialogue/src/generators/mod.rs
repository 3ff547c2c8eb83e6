/// Who did not come to the party.
pub mod attendance;
/// Who the speaker has or has not met.
pub mod contact;
/// Role lists, identity reveals, and the target's mask.
pub mod identity;
/// Facts about the speaker's influence.
pub mod influence;
/// Whether the speaker took part in the latest swap.
pub mod swap;
