//! Core logic of the rolebadge bot.
//!
//! - [`MemberSnapshot`] / [`RankedRole`] - member state captured at the gateway boundary
//! - [`BadgeStore`] - durable (guild, role) to badge mapping
//! - [`MemberRenamer`] - platform call that sets a nickname
//! - [`Reconciler`] - decides and applies the nickname for a role change

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod memory;
mod name;
mod reconciler;
mod renamer;
mod snapshot;
mod store;

pub use memory::MemoryBadgeStore;
pub use name::{badged_name, base_name};
pub use reconciler::{Reconciler, Reconciliation, SkipReason};
pub use renamer::MemberRenamer;
pub use snapshot::{MemberRef, MemberSnapshot, RankedRole};
pub use store::{BadgeMapping, BadgeStore};
