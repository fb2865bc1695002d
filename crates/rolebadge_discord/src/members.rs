//! Conversion of serenity members into reconciler snapshots.

use rolebadge_core::{MemberSnapshot, RankedRole};
use serenity::cache::Cache;
use serenity::model::guild::Member;
use serenity::model::id::{GuildId, RoleId};
use std::collections::HashMap;
use std::num::NonZeroU64;

/// Discord snowflake as stored in the badge table.
///
/// Snowflakes fit in 63 bits; anything larger is rejected.
pub fn snowflake_to_i64(id: u64) -> Option<i64> {
    i64::try_from(id).ok()
}

/// Stored id back to a Discord snowflake. Zero and negative values are rejected.
pub fn i64_to_snowflake(id: i64) -> Option<NonZeroU64> {
    u64::try_from(id).ok().and_then(NonZeroU64::new)
}

/// Positions of every role of a cached guild.
///
/// Copied out of the cache so no cache guard is held across an await.
pub fn role_positions(cache: &Cache, guild_id: GuildId) -> Option<HashMap<RoleId, u16>> {
    let guild = cache.guild(guild_id)?;
    Some(
        guild
            .roles
            .iter()
            .map(|(id, role)| (*id, role.position))
            .collect(),
    )
}

/// Build a snapshot from the parts of a member.
///
/// Roles missing from `positions` still count toward the role set but cannot
/// be the top role. A member without ranked roles sits at `@everyone`.
pub fn snapshot_from_parts(
    guild_id: GuildId,
    user_id: u64,
    display_name: &str,
    roles: &[RoleId],
    is_bot: bool,
    positions: &HashMap<RoleId, u16>,
) -> Option<MemberSnapshot> {
    let guild_id = snowflake_to_i64(guild_id.get())?;
    let user_id = snowflake_to_i64(user_id)?;

    let top_role = roles
        .iter()
        .filter_map(|role| {
            let position = positions.get(role)?;
            Some(RankedRole::new(snowflake_to_i64(role.get())?, *position))
        })
        .max()
        .unwrap_or(RankedRole::everyone(guild_id));

    let role_set = roles
        .iter()
        .filter_map(|role| snowflake_to_i64(role.get()))
        .collect();

    Some(
        MemberSnapshot::builder()
            .guild_id(guild_id)
            .user_id(user_id)
            .display_name(display_name)
            .role_set(role_set)
            .top_role(top_role)
            .is_bot(is_bot)
            .build(),
    )
}

/// Snapshot of a guild member.
pub fn member_snapshot(
    member: &Member,
    positions: &HashMap<RoleId, u16>,
) -> Option<MemberSnapshot> {
    snapshot_from_parts(
        member.guild_id,
        member.user.id.get(),
        member.display_name(),
        &member.roles,
        member.user.bot,
        positions,
    )
}
