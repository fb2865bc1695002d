//! Member state captured at the gateway boundary.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use typed_builder::TypedBuilder;

/// A role together with its rank in the guild hierarchy.
///
/// Higher `position` ranks higher. Roles sharing a position are ordered by
/// id, the older (smaller) id ranking higher, which is how Discord breaks ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct RankedRole {
    id: i64,
    position: u16,
}

impl RankedRole {
    /// Create a ranked role.
    pub const fn new(id: i64, position: u16) -> Self {
        Self { id, position }
    }

    /// The implicit `@everyone` role of a guild, which shares the guild's id.
    pub const fn everyone(guild_id: i64) -> Self {
        Self::new(guild_id, 0)
    }
}

impl Ord for RankedRole {
    fn cmp(&self, other: &Self) -> Ordering {
        self.position
            .cmp(&other.position)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for RankedRole {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Identifies a member to rename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Getters)]
pub struct MemberRef {
    guild_id: i64,
    user_id: i64,
}

impl MemberRef {
    /// Create a member reference.
    pub fn new(guild_id: i64, user_id: i64) -> Self {
        Self { guild_id, user_id }
    }
}

/// State of a guild member before or after an update event.
#[derive(Debug, Clone, PartialEq, Eq, Getters, TypedBuilder)]
pub struct MemberSnapshot {
    /// Guild the member belongs to
    guild_id: i64,
    /// The member's user id
    user_id: i64,
    /// Name currently shown in the guild
    #[builder(setter(into))]
    display_name: String,
    /// Roles held, compared as a set
    #[builder(default)]
    role_set: BTreeSet<i64>,
    /// Highest ranked role held
    top_role: RankedRole,
    /// Whether the member is a bot account
    #[builder(default)]
    is_bot: bool,
}

impl MemberSnapshot {
    /// Reference used when asking the gateway to rename this member.
    pub fn member_ref(&self) -> MemberRef {
        MemberRef::new(self.guild_id, self.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_higher_position_ranks_higher() {
        assert!(RankedRole::new(10, 3) > RankedRole::new(5, 2));
    }

    #[test]
    fn test_equal_position_prefers_older_role() {
        assert!(RankedRole::new(5, 2) > RankedRole::new(10, 2));
    }

    #[test]
    fn test_everyone_ranks_below_any_positioned_role() {
        assert!(RankedRole::everyone(1) < RankedRole::new(99, 1));
    }
}
