use crate::{
  newtypes::{CommentId, PersonId},
  schema::{comment, comment_like, post},
  source::comment::{Comment, CommentInsertForm, CommentLike, CommentLikeForm, CommentUpdateForm},
  traits::{Crud, Likeable},
  utils::{functions::greatest, get_conn, naive_now, DbConn, DbPool},
};
use async_trait::async_trait;
use chirp_utils::error::{ChirpError, ChirpErrorType, ChirpResult};
use diesel::{
  dsl::{count_star, insert_into},
  result::{DatabaseErrorKind, Error},
  sql_query,
  sql_types::{BigInt, Integer},
  ExpressionMethods,
  QueryDsl,
};
use diesel_async::{scoped_futures::ScopedFutureExt, AsyncConnection, RunQueryDsl};

#[async_trait]
impl Crud for Comment {
  type InsertForm = CommentInsertForm;
  type UpdateForm = CommentUpdateForm;
  type IdType = CommentId;

  /// Bumps the post's comment counter in the same transaction, for replies
  /// too, since the counter covers the whole tree.
  async fn create(pool: &mut DbPool<'_>, form: &Self::InsertForm) -> Result<Self, Error> {
    let conn = &mut get_conn(pool).await?;
    conn
      .transaction::<_, Error, _>(|conn| {
        async move {
          let comment = insert_into(comment::table)
            .values(form)
            .get_result::<Self>(conn)
            .await?;
          diesel::update(post::table.find(comment.post_id))
            .set(post::comment_count.eq(post::comment_count + 1))
            .execute(conn)
            .await?;
          Ok(comment)
        }
        .scope_boxed()
      })
      .await
  }

  async fn read(pool: &mut DbPool<'_>, comment_id: CommentId) -> Result<Self, Error> {
    let conn = &mut get_conn(pool).await?;
    comment::table.find(comment_id).first::<Self>(conn).await
  }

  async fn update(
    pool: &mut DbPool<'_>,
    comment_id: CommentId,
    form: &Self::UpdateForm,
  ) -> Result<Self, Error> {
    let conn = &mut get_conn(pool).await?;
    diesel::update(comment::table.find(comment_id))
      .set((form, comment::updated.eq(naive_now())))
      .get_result::<Self>(conn)
      .await
  }

  /// The whole reply subtree goes with the comment, and the post's comment
  /// counter drops by the subtree size in one floored subtraction. Returns the
  /// number of comments removed.
  async fn delete(pool: &mut DbPool<'_>, comment_id: CommentId) -> Result<usize, Error> {
    let conn = &mut get_conn(pool).await?;
    conn
      .transaction::<_, Error, _>(|conn| {
        async move {
          // Lock the root so a new reply (whose foreign key takes a share
          // lock on it) can't land between the subtree count and the delete.
          let comment = comment::table
            .find(comment_id)
            .for_update()
            .first::<Self>(conn)
            .await?;
          let subtree_size = Comment::subtree_size(conn, comment_id).await?;
          diesel::delete(comment::table.find(comment_id))
            .execute(conn)
            .await?;
          diesel::update(post::table.find(comment.post_id))
            .set(post::comment_count.eq(greatest(post::comment_count - subtree_size, 0)))
            .execute(conn)
            .await?;
          Ok(subtree_size as usize)
        }
        .scope_boxed()
      })
      .await
  }
}

impl Comment {
  /// Size of the reply tree rooted at `comment_id`, the root included. Has to
  /// be measured before the delete, the cascade doesn't report what it
  /// removed.
  async fn subtree_size(conn: &mut DbConn<'_>, comment_id: CommentId) -> Result<i64, Error> {
    #[derive(QueryableByName)]
    struct SubtreeSize {
      #[diesel(sql_type = BigInt)]
      subtree_size: i64,
    }

    let row = sql_query(
      "WITH RECURSIVE comment_tree AS (
         SELECT id FROM comment WHERE id = $1
         UNION ALL
         SELECT c.id FROM comment c INNER JOIN comment_tree ct ON c.parent_id = ct.id
       )
       SELECT count(*) AS subtree_size FROM comment_tree",
    )
    .bind::<Integer, _>(comment_id)
    .get_result::<SubtreeSize>(conn)
    .await?;
    Ok(row.subtree_size)
  }

  /// Recomputes the cached like counter from the comment_like rows.
  pub async fn reconcile_counts(
    pool: &mut DbPool<'_>,
    comment_id: CommentId,
  ) -> Result<Self, Error> {
    let conn = &mut get_conn(pool).await?;
    conn
      .transaction::<_, Error, _>(|conn| {
        async move {
          let like_count = comment_like::table
            .filter(comment_like::comment_id.eq(comment_id))
            .select(count_star())
            .first::<i64>(conn)
            .await?;
          diesel::update(comment::table.find(comment_id))
            .set(comment::likes.eq(like_count))
            .get_result::<Self>(conn)
            .await
        }
        .scope_boxed()
      })
      .await
  }
}

#[async_trait]
impl Likeable for CommentLike {
  type Form = CommentLikeForm;
  type IdType = CommentId;

  async fn like(pool: &mut DbPool<'_>, form: &CommentLikeForm) -> ChirpResult<Self> {
    let conn = &mut get_conn(pool).await?;
    conn
      .transaction::<_, ChirpError, _>(|conn| {
        async move {
          let comment_like = insert_into(comment_like::table)
            .values(form)
            .get_result::<Self>(conn)
            .await
            .map_err(|e| match e {
              Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                ChirpError::from(ChirpErrorType::AlreadyLikedComment)
              }
              e => ChirpError::from(e),
            })?;
          diesel::update(comment::table.find(form.comment_id))
            .set(comment::likes.eq(comment::likes + 1))
            .execute(conn)
            .await?;
          Ok(comment_like)
        }
        .scope_boxed()
      })
      .await
  }

  async fn remove_like(
    pool: &mut DbPool<'_>,
    person_id: PersonId,
    comment_id: CommentId,
  ) -> ChirpResult<usize> {
    let conn = &mut get_conn(pool).await?;
    conn
      .transaction::<_, ChirpError, _>(|conn| {
        async move {
          let count = diesel::delete(
            comment_like::table
              .filter(comment_like::comment_id.eq(comment_id))
              .filter(comment_like::person_id.eq(person_id)),
          )
          .execute(conn)
          .await?;
          if count == 0 {
            return Err(Error::NotFound.into());
          }
          diesel::update(comment::table.find(comment_id).filter(comment::likes.gt(0)))
            .set(comment::likes.eq(comment::likes - 1))
            .execute(conn)
            .await?;
          Ok(count)
        }
        .scope_boxed()
      })
      .await
  }
}
