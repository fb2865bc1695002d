//! Diesel models for the role_badges table.

use derive_builder::Builder;
use derive_getters::Getters;
use diesel::prelude::*;
use rolebadge_core::BadgeMapping;

/// Database row for role_badges table.
#[derive(Debug, Clone, Queryable, Selectable, Getters)]
#[diesel(table_name = crate::schema::role_badges)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RoleBadgeRow {
    guild_id: i64,
    role_id: i64,
    badge: Option<String>,
}

impl From<RoleBadgeRow> for BadgeMapping {
    fn from(row: RoleBadgeRow) -> Self {
        BadgeMapping::new(row.guild_id, row.role_id, row.badge)
    }
}

/// Insertable struct for role_badges table with builder pattern.
#[derive(Debug, Clone, Insertable, Getters, Builder)]
#[diesel(table_name = crate::schema::role_badges)]
#[builder(setter(into))]
pub struct NewRoleBadge {
    /// Guild the role belongs to
    guild_id: i64,
    /// Role the badge decorates
    role_id: i64,
    /// Badge text; empty means no visible badge
    #[builder(default)]
    badge: Option<String>,
}
