//! Display name reconciliation on member role changes.
//!
//! When a member's highest role goes up, the member's nickname is rewritten to
//! `"<base name> <badge>"`, where the badge is looked up for the new top role.
//! A top role without a badge resets the nickname to the bare base name.
//! Downgrades leave the nickname untouched.

use crate::{BadgeStore, MemberRenamer, MemberSnapshot, badged_name, base_name};
use rolebadge_error::RenameError;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Why an update event did not lead to a rename attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SkipReason {
    /// The member is a bot account
    #[display("member is a bot")]
    Bot,
    /// Something other than the role set changed
    #[display("role set unchanged")]
    RolesUnchanged,
    /// Roles changed but the highest one did not
    #[display("top role unchanged")]
    TopRoleUnchanged,
    /// The new top role does not outrank the previous one
    #[display("top role not upgraded")]
    NotUpgraded,
}

/// Outcome of reconciling one update event.
#[derive(Debug, Clone)]
pub enum Reconciliation {
    /// The event did not qualify for processing
    Skipped(SkipReason),
    /// The member already carries the target name
    Unchanged {
        /// Name the member already has
        name: String,
    },
    /// The member was renamed
    Renamed {
        /// Previous display name
        from: String,
        /// New display name
        to: String,
    },
    /// The rename request failed and was dropped
    RenameFailed {
        /// Name that was requested
        target: String,
        /// Why the platform refused
        error: RenameError,
    },
}

impl Reconciliation {
    /// Whether a rename request was sent to the platform.
    pub fn attempted_rename(&self) -> bool {
        matches!(self, Self::Renamed { .. } | Self::RenameFailed { .. })
    }
}

/// Recomputes a member's badge suffix from their top role.
///
/// Holds no state between events; everything is derived from the snapshot
/// pair and a badge lookup.
#[derive(Clone)]
pub struct Reconciler {
    store: Arc<dyn BadgeStore>,
    renamer: Arc<dyn MemberRenamer>,
}

impl Reconciler {
    /// Create a reconciler over a badge store and a rename transport.
    pub fn new(store: Arc<dyn BadgeStore>, renamer: Arc<dyn MemberRenamer>) -> Self {
        Self { store, renamer }
    }

    /// Decide whether an update qualifies for a rename.
    ///
    /// The checks run in order: bot accounts, unchanged role set, unchanged
    /// top role, then upgrade direction.
    pub fn check_trigger(
        before: &MemberSnapshot,
        after: &MemberSnapshot,
    ) -> Result<(), SkipReason> {
        if *after.is_bot() {
            return Err(SkipReason::Bot);
        }
        if before.role_set() == after.role_set() {
            return Err(SkipReason::RolesUnchanged);
        }
        if before.top_role().id() == after.top_role().id() {
            return Err(SkipReason::TopRoleUnchanged);
        }
        if after.top_role() <= before.top_role() {
            return Err(SkipReason::NotUpgraded);
        }
        Ok(())
    }

    /// Name `after` should carry given the badge of its top role.
    pub fn target_name(after: &MemberSnapshot, badge: Option<&str>) -> String {
        badged_name(&base_name(after.display_name()), badge)
    }

    /// Badge for the member's top role.
    ///
    /// Storage failures fall back to "no badge" so the event is still handled.
    #[instrument(
        skip(self, after),
        fields(guild_id = after.guild_id(), role_id = after.top_role().id())
    )]
    async fn badge_for(&self, after: &MemberSnapshot) -> Option<String> {
        match self
            .store
            .lookup(*after.guild_id(), *after.top_role().id())
            .await
        {
            Ok(badge) => badge,
            Err(e) => {
                warn!(error = %e, "Badge lookup failed, treating top role as unbadged");
                None
            }
        }
    }

    /// Handle one member update event.
    ///
    /// Never fails: rename errors are logged and reported in the returned
    /// [`Reconciliation`].
    #[instrument(
        skip(self, before, after),
        fields(guild_id = after.guild_id(), user_id = after.user_id())
    )]
    pub async fn reconcile(
        &self,
        before: &MemberSnapshot,
        after: &MemberSnapshot,
    ) -> Reconciliation {
        if let Err(reason) = Self::check_trigger(before, after) {
            debug!(%reason, "Skipping member update");
            return Reconciliation::Skipped(reason);
        }

        let badge = self.badge_for(after).await;
        let target = Self::target_name(after, badge.as_deref());

        if after.display_name() == &target {
            debug!(name = %target, "Display name already up to date");
            return Reconciliation::Unchanged { name: target };
        }

        match self.renamer.rename(&after.member_ref(), &target).await {
            Ok(()) => {
                info!(from = %after.display_name(), to = %target, "Renamed member");
                Reconciliation::Renamed {
                    from: after.display_name().clone(),
                    to: target,
                }
            }
            Err(error) => {
                warn!(error = %error, target = %target, "Rename failed, ignoring");
                Reconciliation::RenameFailed { target, error }
            }
        }
    }
}
