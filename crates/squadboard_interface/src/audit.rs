//! Audit notification events.

use serde::{Deserialize, Serialize};
use squadboard_core::{ActorId, PostId};

/// Structured event kinds delivered to the audit collaborator.
///
/// All audit notifications are best-effort; a failed notification never
/// rolls back the operation that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum AuditEvent {
    /// A post was created.
    #[display("post {} created by {}", post_id, actor_id)]
    PostCreated {
        /// The new post.
        post_id: PostId,
        /// The creating actor.
        actor_id: ActorId,
        /// The classified category.
        category: String,
    },
    /// A post's body (and possibly category) was edited.
    #[display("post {} edited by {}", post_id, actor_id)]
    PostEdited {
        /// The edited post.
        post_id: PostId,
        /// The editing actor.
        actor_id: ActorId,
    },
    /// A post was deleted by an actor or a privileged requester.
    #[display("post {} deleted by {}", post_id, by)]
    PostDeleted {
        /// The retired post.
        post_id: PostId,
        /// Who requested the deletion.
        by: ActorId,
    },
    /// A post expired and was retired by the sweeper.
    #[display("post {} expired", post_id)]
    PostExpired {
        /// The retired post.
        post_id: PostId,
    },
    /// A post's delivery disappeared out-of-band and the post was retired
    /// during reconciliation.
    #[display("post {} reconciled after external removal", post_id)]
    PostReconciled {
        /// The retired post.
        post_id: PostId,
    },
}
