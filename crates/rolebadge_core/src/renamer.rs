//! Member rename interface.

use crate::MemberRef;
use async_trait::async_trait;
use rolebadge_error::RenameResult;

/// Sets a member's guild nickname through the chat platform.
#[async_trait]
pub trait MemberRenamer: Send + Sync {
    /// Change the member's display name to `nickname`.
    async fn rename(&self, member: &MemberRef, nickname: &str) -> RenameResult<()>;
}
