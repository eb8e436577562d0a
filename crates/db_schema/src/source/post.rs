use crate::newtypes::{PersonId, PostId, PostLikeId};
#[cfg(feature = "full")]
use crate::schema::{post, post_like};
use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "full", derive(Queryable, Selectable, Identifiable))]
#[cfg_attr(feature = "full", diesel(table_name = post))]
#[cfg_attr(feature = "full", diesel(check_for_backend(diesel::pg::Pg)))]
/// A post.
pub struct Post {
  pub id: PostId,
  pub creator_id: PersonId,
  pub content: String,
  /// The source post when this post is a repost. Nulled out when the source
  /// is deleted.
  pub reposted_from: Option<PostId>,
  pub published: chrono::NaiveDateTime,
  /// Cached count of post_like rows for this post. Only mutated through
  /// [`Likeable`][crate::traits::Likeable] and reconciliation.
  pub likes: i64,
  /// Cached count of comments (including replies) on this post.
  pub comment_count: i64,
  /// Cached count of live reposts of this post.
  pub shares: i64,
}

impl Post {
  pub fn is_repost(&self) -> bool {
    self.reposted_from.is_some()
  }
}

#[derive(Debug, Clone, derive_new::new)]
#[cfg_attr(feature = "full", derive(Insertable, AsChangeset))]
#[cfg_attr(feature = "full", diesel(table_name = post))]
pub struct PostInsertForm {
  pub creator_id: PersonId,
  pub content: String,
  #[new(default)]
  pub reposted_from: Option<PostId>,
  #[new(default)]
  pub published: Option<chrono::NaiveDateTime>,
}

#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "full", derive(AsChangeset))]
#[cfg_attr(feature = "full", diesel(table_name = post))]
pub struct PostUpdateForm {
  pub content: Option<String>,
}

#[derive(PartialEq, Eq, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "full", derive(Queryable, Selectable, Identifiable, Associations))]
#[cfg_attr(feature = "full", diesel(belongs_to(crate::source::post::Post)))]
#[cfg_attr(feature = "full", diesel(table_name = post_like))]
#[cfg_attr(feature = "full", diesel(check_for_backend(diesel::pg::Pg)))]
/// A join row saying "person liked post". At most one row exists per
/// (post, person) pair.
pub struct PostLike {
  pub id: PostLikeId,
  pub post_id: PostId,
  pub person_id: PersonId,
  pub published: chrono::NaiveDateTime,
}

#[derive(Debug, Clone, derive_new::new)]
#[cfg_attr(feature = "full", derive(Insertable, AsChangeset))]
#[cfg_attr(feature = "full", diesel(table_name = post_like))]
pub struct PostLikeForm {
  pub post_id: PostId,
  pub person_id: PersonId,
}
