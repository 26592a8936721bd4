//! Stateless permission predicates.
//!
//! Every predicate takes the acting identity (if any) and the relevant
//! fields of the target entity. Nothing here touches storage; handlers
//! load the entity first and translate a `false` into a 403.

use crate::post::PostStatus;
use crate::roles::Role;
use crate::types::DbId;

/// Read access to a post: the owner always, anyone else only when published.
pub fn can_read_post(requester: Option<DbId>, owner: Option<DbId>, status: PostStatus) -> bool {
    status.is_published() || is_owner(requester, owner)
}

/// Strict identity match between the requester and an entity's owner.
///
/// An anonymous requester or an ownerless entity never matches.
pub fn is_owner(requester: Option<DbId>, owner: Option<DbId>) -> bool {
    matches!((requester, owner), (Some(r), Some(o)) if r == o)
}

/// Comment mutation is reserved to the comment's author.
pub fn is_comment_author(requester: DbId, author: Option<DbId>) -> bool {
    is_owner(Some(requester), author)
}

/// A missing role record grants nothing.
pub fn is_admin(role: Option<Role>) -> bool {
    role == Some(Role::Admin)
}

pub fn is_moderator(role: Option<Role>) -> bool {
    role == Some(Role::Moderator)
}

/// Admin or moderator.
pub fn is_staff(role: Option<Role>) -> bool {
    is_admin(role) || is_moderator(role)
}
