//! Nickname changes through the Discord HTTP API.

use crate::i64_to_snowflake;
use async_trait::async_trait;
use rolebadge_core::{MemberRef, MemberRenamer};
use rolebadge_error::{RenameError, RenameErrorKind, RenameResult};
use serenity::builder::EditMember;
use serenity::http::{Http, HttpError};
use serenity::model::ModelError;
use serenity::model::id::{GuildId, UserId};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Reason recorded in the guild audit log.
const AUDIT_LOG_REASON: &str = "Role badge update";

/// Renames members with serenity's HTTP client.
///
/// Shares the gateway client's `Http` so rate limits are coordinated.
#[derive(Clone)]
pub struct SerenityRenamer {
    http: Arc<Http>,
}

impl SerenityRenamer {
    /// Create a renamer over an HTTP client.
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

/// Sort a serenity failure into the rename error taxonomy.
///
/// HTTP 403 and local permission or hierarchy checks mean the bot may not
/// touch this member; everything else is a transport failure.
pub fn classify_rename_error(err: &serenity::Error) -> RenameErrorKind {
    let denied = match err {
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) => {
            response.status_code.as_u16() == 403
        }
        serenity::Error::Model(ModelError::InvalidPermissions { .. } | ModelError::Hierarchy) => {
            true
        }
        _ => false,
    };

    if denied {
        RenameErrorKind::PermissionDenied(err.to_string())
    } else {
        RenameErrorKind::Transport(err.to_string())
    }
}

#[async_trait]
impl MemberRenamer for SerenityRenamer {
    #[instrument(
        skip(self, nickname),
        fields(guild_id = member.guild_id(), user_id = member.user_id())
    )]
    async fn rename(&self, member: &MemberRef, nickname: &str) -> RenameResult<()> {
        let (Some(guild_id), Some(user_id)) = (
            i64_to_snowflake(*member.guild_id()),
            i64_to_snowflake(*member.user_id()),
        ) else {
            return Err(RenameError::new(RenameErrorKind::Transport(
                "member reference is not a valid snowflake".to_string(),
            )));
        };

        debug!("Sending nickname change to Discord");
        GuildId::from(guild_id)
            .edit_member(
                &self.http,
                UserId::from(user_id),
                EditMember::new()
                    .nickname(nickname)
                    .audit_log_reason(AUDIT_LOG_REASON),
            )
            .await
            .map(|_| ())
            .map_err(|e| RenameError::new(classify_rename_error(&e)))
    }
}
