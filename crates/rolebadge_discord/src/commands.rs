//! Admin commands for managing role badges.
//!
//! Commands take a platform-neutral [`Invoker`] and produce a [`CommandReply`];
//! the interaction layer translates both to and from Discord types.
//!
//! - `add_role_badge` - set the badge for a role (administrators only)
//! - `list_role_badges` - show all badges of the guild (per-user cooldown)
//! - `remove_role_badge` - delete the badge of a role (administrators only)

use crate::{CommandSettings, Cooldown};
use derive_getters::Getters;
use rolebadge_core::{BadgeMapping, BadgeStore};
use rolebadge_error::{CommandError, CommandErrorKind, CommandResult};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, instrument, warn};

/// Slash command name for setting a badge.
pub const ADD_ROLE_BADGE: &str = "add_role_badge";
/// Slash command name for listing badges.
pub const LIST_ROLE_BADGES: &str = "list_role_badges";
/// Slash command name for removing a badge.
pub const REMOVE_ROLE_BADGE: &str = "remove_role_badge";

/// Discord caps embed field values at 1024 characters.
const EMBED_FIELD_LIMIT: usize = 1024;

/// Who ran a command and where.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct Invoker {
    user_id: i64,
    guild_id: Option<i64>,
    is_admin: bool,
}

impl Invoker {
    /// Create an invoker.
    pub fn new(user_id: i64, guild_id: Option<i64>, is_admin: bool) -> Self {
        Self {
            user_id,
            guild_id,
            is_admin,
        }
    }

    fn guild(&self) -> CommandResult<i64> {
        self.guild_id
            .ok_or_else(|| CommandError::new(CommandErrorKind::NotInGuild))
    }

    fn require_admin(&self) -> CommandResult<()> {
        if self.is_admin {
            Ok(())
        } else {
            Err(CommandError::new(CommandErrorKind::MissingPermission))
        }
    }
}

/// A parsed admin command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Set the badge for a role
    AddRoleBadge {
        /// Role to decorate
        role_id: i64,
        /// Badge text
        badge: String,
    },
    /// List the guild's badges
    ListRoleBadges,
    /// Remove the badge of a role
    RemoveRoleBadge {
        /// Role to clear
        role_id: i64,
    },
}

/// Role and badge columns for the listing embed.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct BadgeListing {
    title: String,
    roles: String,
    badges: String,
}

impl BadgeListing {
    /// Render mappings as two aligned columns of role mentions and badges.
    ///
    /// Rows that would overflow an embed field are replaced by a count.
    pub fn from_mappings(mappings: &[BadgeMapping]) -> Self {
        let title = "Roles and their Badges".to_string();
        if mappings.is_empty() {
            return Self {
                title,
                roles: "None".to_string(),
                badges: "None".to_string(),
            };
        }

        let mut roles = Vec::new();
        let mut badges = Vec::new();
        let (mut roles_len, mut badges_len) = (0, 0);
        for (shown, mapping) in mappings.iter().enumerate() {
            let role = format!("<@&{}>", mapping.role_id());
            let badge = mapping.visible_badge().unwrap_or("(none)").to_string();
            let overflow = format!("…and {} more", mappings.len() - shown);
            // Leave room for the overflow line in both columns
            let fits = |used: usize, line: &str| {
                used + line.chars().count() + 1 + overflow.chars().count() <= EMBED_FIELD_LIMIT
            };
            if !fits(roles_len, &role) || !fits(badges_len, &badge) {
                roles.push(overflow.clone());
                badges.push(overflow);
                break;
            }
            roles_len += role.chars().count() + 1;
            badges_len += badge.chars().count() + 1;
            roles.push(role);
            badges.push(badge);
        }

        Self {
            title,
            roles: roles.join("\n"),
            badges: badges.join("\n"),
        }
    }
}

/// Body of a command reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyBody {
    /// Plain text message
    Text(String),
    /// Badge listing rendered as an embed
    Listing(BadgeListing),
}

/// What to send back to the invoker.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct CommandReply {
    body: ReplyBody,
    /// Only visible to the invoker
    ephemeral: bool,
    /// Delete the reply after this long
    dismiss_after: Option<Duration>,
}

impl CommandReply {
    fn text(content: impl Into<String>) -> Self {
        Self {
            body: ReplyBody::Text(content.into()),
            ephemeral: false,
            dismiss_after: None,
        }
    }

    fn notice(content: impl Into<String>, dismiss_after: Duration) -> Self {
        Self {
            body: ReplyBody::Text(content.into()),
            ephemeral: true,
            dismiss_after: Some(dismiss_after),
        }
    }

    fn listing(listing: BadgeListing) -> Self {
        Self {
            body: ReplyBody::Listing(listing),
            ephemeral: false,
            dismiss_after: None,
        }
    }
}

/// Executes admin commands against the badge store.
pub struct AdminCommands {
    store: Arc<dyn BadgeStore>,
    list_cooldown: Cooldown,
    settings: CommandSettings,
}

impl AdminCommands {
    /// Create the command surface over a badge store.
    pub fn new(store: Arc<dyn BadgeStore>, settings: CommandSettings) -> Self {
        let list_cooldown = Cooldown::new(*settings.list_cooldown_uses(), settings.list_cooldown());
        Self {
            store,
            list_cooldown,
            settings,
        }
    }

    /// Command settings in effect.
    pub fn settings(&self) -> &CommandSettings {
        &self.settings
    }

    /// Set the badge shown for a role.
    #[instrument(
        skip(self, badge),
        fields(user_id = invoker.user_id, guild_id = ?invoker.guild_id)
    )]
    pub async fn add_role_badge(
        &self,
        invoker: &Invoker,
        role_id: i64,
        badge: &str,
    ) -> CommandResult<CommandReply> {
        invoker.require_admin()?;
        let guild_id = invoker.guild()?;
        let badge = badge.trim();
        let max_len = usize::from(*self.settings.max_badge_len());
        if badge.chars().count() > max_len {
            return Err(CommandError::new(CommandErrorKind::InvalidArgument {
                name: "badge".to_string(),
                reason: format!("must be at most {max_len} characters"),
            }));
        }

        self.store.upsert(guild_id, role_id, badge).await?;
        info!(role_id, badge, "Role badge updated");
        Ok(CommandReply::text("Badge updated"))
    }

    /// List every badge configured in the invoker's guild.
    #[instrument(skip(self), fields(user_id = invoker.user_id, guild_id = ?invoker.guild_id))]
    pub async fn list_role_badges(&self, invoker: &Invoker) -> CommandResult<CommandReply> {
        let guild_id = invoker.guild()?;
        self.list_cooldown
            .check(invoker.user_id)
            .map_err(|retry_after| CommandError::new(CommandErrorKind::Cooldown { retry_after }))?;

        let mappings = self.store.list(guild_id).await?;
        Ok(CommandReply::listing(BadgeListing::from_mappings(&mappings)))
    }

    /// Delete the badge of a role.
    #[instrument(skip(self), fields(user_id = invoker.user_id, guild_id = ?invoker.guild_id))]
    pub async fn remove_role_badge(
        &self,
        invoker: &Invoker,
        role_id: i64,
    ) -> CommandResult<CommandReply> {
        invoker.require_admin()?;
        let guild_id = invoker.guild()?;

        if self.store.remove(guild_id, role_id).await? {
            info!(role_id, "Role badge removed");
            Ok(CommandReply::text("Badge removed"))
        } else {
            Ok(CommandReply::text("No badge was configured for that role"))
        }
    }

    /// Run a parsed command, turning any failure into a user-facing reply.
    pub async fn dispatch(&self, invoker: &Invoker, invocation: Invocation) -> CommandReply {
        let result = match invocation {
            Invocation::AddRoleBadge { role_id, badge } => {
                self.add_role_badge(invoker, role_id, &badge).await
            }
            Invocation::ListRoleBadges => self.list_role_badges(invoker).await,
            Invocation::RemoveRoleBadge { role_id } => {
                self.remove_role_badge(invoker, role_id).await
            }
        };
        result.unwrap_or_else(|e| self.error_reply(&e))
    }

    /// User-facing reply for a failed command. Internal details are only logged.
    pub fn error_reply(&self, err: &CommandError) -> CommandReply {
        match err.kind() {
            CommandErrorKind::MissingPermission => {
                warn!(error = %err, "Command rejected");
                CommandReply::notice("Missing Permission!", self.settings.notice_dismiss())
            }
            CommandErrorKind::Cooldown { retry_after } => CommandReply::notice(
                format!(
                    "Slow down! Try again in {}s.",
                    retry_after.as_secs_f64().ceil()
                ),
                self.settings.notice_dismiss(),
            ),
            CommandErrorKind::NotInGuild => CommandReply::notice(
                "This command only works in a server.",
                self.settings.notice_dismiss(),
            ),
            CommandErrorKind::InvalidArgument { name, reason } => CommandReply::notice(
                format!("Invalid {name}: {reason}"),
                self.settings.error_dismiss(),
            ),
            CommandErrorKind::Storage(_) => {
                error!(error = %err, "Command failed");
                CommandReply::notice("An Unknown Error Occured!", self.settings.error_dismiss())
            }
        }
    }
}
