use crate::newtypes::{DbUrl, PostId, PostMediaId};
#[cfg(feature = "full")]
use crate::schema::post_media;
use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "full", derive(Queryable, Selectable, Identifiable, Associations))]
#[cfg_attr(feature = "full", diesel(belongs_to(crate::source::post::Post)))]
#[cfg_attr(feature = "full", diesel(table_name = post_media))]
#[cfg_attr(feature = "full", diesel(check_for_backend(diesel::pg::Pg)))]
/// An image attached to a post. A post can have any number of these, and they
/// are deleted together with it.
pub struct PostMedia {
  pub id: PostMediaId,
  pub post_id: PostId,
  pub image: DbUrl,
}

#[derive(Debug, Clone, derive_new::new)]
#[cfg_attr(feature = "full", derive(Insertable, AsChangeset))]
#[cfg_attr(feature = "full", diesel(table_name = post_media))]
pub struct PostMediaInsertForm {
  pub post_id: PostId,
  pub image: DbUrl,
}
