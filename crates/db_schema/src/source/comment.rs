use crate::newtypes::{CommentId, CommentLikeId, PersonId, PostId};
#[cfg(feature = "full")]
use crate::schema::{comment, comment_like};
use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "full", derive(Queryable, Selectable, Identifiable, Associations))]
#[cfg_attr(feature = "full", diesel(belongs_to(crate::source::post::Post)))]
#[cfg_attr(feature = "full", diesel(table_name = comment))]
#[cfg_attr(feature = "full", diesel(check_for_backend(diesel::pg::Pg)))]
/// A comment on a post. Comments form a tree through `parent_id`; deleting a
/// comment deletes its whole reply subtree.
pub struct Comment {
  pub id: CommentId,
  pub post_id: PostId,
  pub creator_id: PersonId,
  pub parent_id: Option<CommentId>,
  pub content: String,
  pub published: chrono::NaiveDateTime,
  /// Refreshed on every content update.
  pub updated: Option<chrono::NaiveDateTime>,
  /// Cached count of comment_like rows for this comment.
  pub likes: i64,
}

impl Comment {
  pub fn is_reply(&self) -> bool {
    self.parent_id.is_some()
  }
}

#[derive(Debug, Clone, derive_new::new)]
#[cfg_attr(feature = "full", derive(Insertable, AsChangeset))]
#[cfg_attr(feature = "full", diesel(table_name = comment))]
pub struct CommentInsertForm {
  pub creator_id: PersonId,
  pub post_id: PostId,
  pub content: String,
  #[new(default)]
  pub parent_id: Option<CommentId>,
  #[new(default)]
  pub published: Option<chrono::NaiveDateTime>,
}

#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "full", derive(AsChangeset))]
#[cfg_attr(feature = "full", diesel(table_name = comment))]
pub struct CommentUpdateForm {
  pub content: Option<String>,
}

#[derive(PartialEq, Eq, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "full", derive(Queryable, Selectable, Identifiable, Associations))]
#[cfg_attr(feature = "full", diesel(belongs_to(crate::source::comment::Comment)))]
#[cfg_attr(feature = "full", diesel(table_name = comment_like))]
#[cfg_attr(feature = "full", diesel(check_for_backend(diesel::pg::Pg)))]
/// A join row saying "person liked comment", unique per (comment, person)
/// pair.
pub struct CommentLike {
  pub id: CommentLikeId,
  pub comment_id: CommentId,
  pub person_id: PersonId,
  pub published: chrono::NaiveDateTime,
}

#[derive(Debug, Clone, derive_new::new)]
#[cfg_attr(feature = "full", derive(Insertable, AsChangeset))]
#[cfg_attr(feature = "full", diesel(table_name = comment_like))]
pub struct CommentLikeForm {
  pub comment_id: CommentId,
  pub person_id: PersonId,
}
