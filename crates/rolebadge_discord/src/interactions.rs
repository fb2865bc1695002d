//! Slash command registration and interaction plumbing.

use crate::commands::{ADD_ROLE_BADGE, LIST_ROLE_BADGES, REMOVE_ROLE_BADGE};
use crate::{CommandReply, Invocation, Invoker, ReplyBody, snowflake_to_i64};
use rolebadge_error::{CommandError, CommandErrorKind, CommandResult};
use serenity::all::{
    CommandInteraction, CommandOptionType, CreateCommand, CreateCommandOption, CreateEmbed,
    CreateInteractionResponse, CreateInteractionResponseMessage, Permissions, ResolvedValue,
};
use serenity::client::Context;
use tracing::{debug, instrument};

/// Slash command definitions registered at startup.
pub fn command_definitions(max_badge_len: u16) -> Vec<CreateCommand> {
    vec![
        CreateCommand::new(ADD_ROLE_BADGE)
            .description("Set the badge shown next to members whose top role is this role")
            .default_member_permissions(Permissions::ADMINISTRATOR)
            .dm_permission(false)
            .add_option(
                CreateCommandOption::new(CommandOptionType::Role, "role", "Role to decorate")
                    .required(true),
            )
            .add_option(
                CreateCommandOption::new(CommandOptionType::String, "badge", "Emoji or text")
                    .required(true)
                    .max_length(max_badge_len),
            ),
        CreateCommand::new(LIST_ROLE_BADGES)
            .description("List the roles that carry a badge")
            .dm_permission(false),
        CreateCommand::new(REMOVE_ROLE_BADGE)
            .description("Stop showing a badge for this role")
            .default_member_permissions(Permissions::ADMINISTRATOR)
            .dm_permission(false)
            .add_option(
                CreateCommandOption::new(CommandOptionType::Role, "role", "Role to clear")
                    .required(true),
            ),
    ]
}

/// Who invoked an interaction.
///
/// Administrator status comes from the permissions Discord resolved for the
/// invoking member in the interaction's channel.
pub fn invoker(command: &CommandInteraction) -> Option<Invoker> {
    let user_id = snowflake_to_i64(command.user.id.get())?;
    let guild_id = command
        .guild_id
        .and_then(|guild_id| snowflake_to_i64(guild_id.get()));
    let is_admin = command
        .member
        .as_ref()
        .and_then(|member| member.permissions)
        .is_some_and(|permissions| permissions.administrator());
    Some(Invoker::new(user_id, guild_id, is_admin))
}

fn invalid(name: &str, reason: &str) -> CommandError {
    CommandError::new(CommandErrorKind::InvalidArgument {
        name: name.to_string(),
        reason: reason.to_string(),
    })
}

/// Parse the command name and options into an [`Invocation`].
pub fn parse_invocation(command: &CommandInteraction) -> CommandResult<Invocation> {
    let mut role_id = None;
    let mut badge = None;
    for option in command.data.options() {
        match (option.name, option.value) {
            ("role", ResolvedValue::Role(role)) => role_id = snowflake_to_i64(role.id.get()),
            ("badge", ResolvedValue::String(text)) => badge = Some(text.to_string()),
            (name, _) => debug!(option = name, "Ignoring unexpected option"),
        }
    }

    match command.data.name.as_str() {
        ADD_ROLE_BADGE => Ok(Invocation::AddRoleBadge {
            role_id: role_id.ok_or_else(|| invalid("role", "a role is required"))?,
            badge: badge.ok_or_else(|| invalid("badge", "a badge is required"))?,
        }),
        LIST_ROLE_BADGES => Ok(Invocation::ListRoleBadges),
        REMOVE_ROLE_BADGE => Ok(Invocation::RemoveRoleBadge {
            role_id: role_id.ok_or_else(|| invalid("role", "a role is required"))?,
        }),
        other => Err(invalid("command", &format!("unknown command '{other}'"))),
    }
}

/// Send `reply` as the interaction response, scheduling its deletion if asked.
#[instrument(skip(ctx, command, reply), fields(command = %command.data.name))]
pub async fn respond(
    ctx: &Context,
    command: &CommandInteraction,
    reply: CommandReply,
) -> serenity::Result<()> {
    let message = match reply.body() {
        ReplyBody::Text(content) => CreateInteractionResponseMessage::new().content(content),
        ReplyBody::Listing(listing) => CreateInteractionResponseMessage::new().embed(
            CreateEmbed::new()
                .title(listing.title())
                .field("Roles", listing.roles(), true)
                .field("Badges", listing.badges(), true),
        ),
    }
    .ephemeral(*reply.ephemeral());

    command
        .create_response(ctx, CreateInteractionResponse::Message(message))
        .await?;

    if let Some(delay) = *reply.dismiss_after() {
        let http = ctx.http.clone();
        let token = command.token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = http.delete_original_interaction_response(&token).await {
                debug!(error = %e, "Failed to dismiss interaction response");
            }
        });
    }

    Ok(())
}
