//! Gateway event handler wiring Discord events to the reconciler and commands.

use crate::interactions::{command_definitions, invoker, parse_invocation, respond};
use crate::{AdminCommands, SerenityRenamer, member_snapshot, role_positions, snapshot_from_parts};
use rolebadge_core::{BadgeStore, MemberSnapshot, Reconciler, Reconciliation};
use serenity::all::{Command, GuildMemberUpdateEvent, Interaction, Member, Ready, RoleId};
use serenity::async_trait;
use serenity::client::{Context, EventHandler};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Discord event handler for role badges.
pub struct BadgeHandler {
    store: Arc<dyn BadgeStore>,
    commands: Arc<AdminCommands>,
}

impl BadgeHandler {
    /// Create a handler sharing one badge store between events and commands.
    pub fn new(store: Arc<dyn BadgeStore>, commands: Arc<AdminCommands>) -> Self {
        Self { store, commands }
    }

    fn updated_snapshot(
        new: Option<&Member>,
        event: &GuildMemberUpdateEvent,
        positions: &HashMap<RoleId, u16>,
    ) -> Option<MemberSnapshot> {
        match new {
            Some(member) => member_snapshot(member, positions),
            None => snapshot_from_parts(
                event.guild_id,
                event.user.id.get(),
                event
                    .nick
                    .as_deref()
                    .unwrap_or_else(|| event.user.display_name()),
                &event.roles,
                event.user.bot,
                positions,
            ),
        }
    }
}

#[async_trait]
impl EventHandler for BadgeHandler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(
            user = %ready.user.name,
            guilds = ready.guilds.len(),
            "Connected to Discord"
        );

        let definitions = command_definitions(*self.commands.settings().max_badge_len());
        match Command::set_global_commands(&ctx.http, definitions).await {
            Ok(registered) => info!(count = registered.len(), "Registered slash commands"),
            Err(e) => error!(error = %e, "Failed to register slash commands"),
        }
    }

    async fn guild_member_update(
        &self,
        ctx: Context,
        old_if_available: Option<Member>,
        new: Option<Member>,
        event: GuildMemberUpdateEvent,
    ) {
        // Without the previous state there is nothing to compare against
        let Some(old) = old_if_available else {
            debug!(user_id = %event.user.id, "Previous member state not cached, skipping");
            return;
        };
        let Some(positions) = role_positions(&ctx.cache, event.guild_id) else {
            debug!(guild_id = %event.guild_id, "Guild roles not cached, skipping");
            return;
        };

        let before = member_snapshot(&old, &positions);
        let after = Self::updated_snapshot(new.as_ref(), &event, &positions);
        let (Some(before), Some(after)) = (before, after) else {
            warn!(user_id = %event.user.id, "Member ids out of range, skipping");
            return;
        };

        let renamer = Arc::new(SerenityRenamer::new(ctx.http.clone()));
        let reconciler = Reconciler::new(self.store.clone(), renamer);
        match reconciler.reconcile(&before, &after).await {
            Reconciliation::Renamed { from, to } => {
                debug!(%from, %to, "Member update reconciled");
            }
            Reconciliation::RenameFailed { target, error } => {
                debug!(%target, %error, "Member update left unreconciled");
            }
            Reconciliation::Skipped(_) | Reconciliation::Unchanged { .. } => {}
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            return;
        };
        let Some(invoker) = invoker(&command) else {
            warn!(user_id = %command.user.id, "Invoker id out of range, ignoring");
            return;
        };

        let reply = match parse_invocation(&command) {
            Ok(invocation) => self.commands.dispatch(&invoker, invocation).await,
            Err(e) => self.commands.error_reply(&e),
        };

        if let Err(e) = respond(&ctx, &command, reply).await {
            error!(command = %command.data.name, error = %e, "Failed to send command reply");
        }
    }
}
