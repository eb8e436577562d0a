use crate::{
  newtypes::{PersonId, PostId},
  schema::{comment, post, post_like},
  source::post::{Post, PostInsertForm, PostLike, PostLikeForm, PostUpdateForm},
  traits::{Crud, Likeable},
  utils::{get_conn, DbPool},
};
use async_trait::async_trait;
use chirp_utils::error::{ChirpError, ChirpErrorType, ChirpResult};
use diesel::{
  dsl::{count_star, insert_into},
  result::{DatabaseErrorKind, Error},
  ExpressionMethods,
  QueryDsl,
};
use diesel_async::{scoped_futures::ScopedFutureExt, AsyncConnection, RunQueryDsl};

#[async_trait]
impl Crud for Post {
  type InsertForm = PostInsertForm;
  type UpdateForm = PostUpdateForm;
  type IdType = PostId;

  /// When the form marks the new post as a repost, the source post's shares
  /// counter goes up in the same transaction.
  async fn create(pool: &mut DbPool<'_>, form: &Self::InsertForm) -> Result<Self, Error> {
    let conn = &mut get_conn(pool).await?;
    conn
      .transaction::<_, Error, _>(|conn| {
        async move {
          let post = insert_into(post::table)
            .values(form)
            .get_result::<Self>(conn)
            .await?;
          if let Some(source_id) = post.reposted_from {
            diesel::update(post::table.find(source_id))
              .set(post::shares.eq(post::shares + 1))
              .execute(conn)
              .await?;
          }
          Ok(post)
        }
        .scope_boxed()
      })
      .await
  }

  async fn read(pool: &mut DbPool<'_>, post_id: PostId) -> Result<Self, Error> {
    let conn = &mut get_conn(pool).await?;
    post::table.find(post_id).first::<Self>(conn).await
  }

  async fn update(
    pool: &mut DbPool<'_>,
    post_id: PostId,
    form: &Self::UpdateForm,
  ) -> Result<Self, Error> {
    let conn = &mut get_conn(pool).await?;
    diesel::update(post::table.find(post_id))
      .set(form)
      .get_result::<Self>(conn)
      .await
  }

  /// Media, likes and comments go with the post through foreign key cascades.
  /// Deleting a repost takes it out of its source's shares counter, never
  /// dropping below zero.
  async fn delete(pool: &mut DbPool<'_>, post_id: PostId) -> Result<usize, Error> {
    let conn = &mut get_conn(pool).await?;
    conn
      .transaction::<_, Error, _>(|conn| {
        async move {
          let post = post::table.find(post_id).first::<Self>(conn).await?;
          let count = diesel::delete(post::table.find(post_id))
            .execute(conn)
            .await?;
          if let Some(source_id) = post.reposted_from {
            diesel::update(post::table.find(source_id).filter(post::shares.gt(0)))
              .set(post::shares.eq(post::shares - 1))
              .execute(conn)
              .await?;
          }
          Ok(count)
        }
        .scope_boxed()
      })
      .await
  }
}

impl Post {
  /// Creates a repost of `source_id`.
  pub async fn repost(
    pool: &mut DbPool<'_>,
    creator_id: PersonId,
    source_id: PostId,
    content: String,
  ) -> Result<Self, Error> {
    let form = PostInsertForm {
      reposted_from: Some(source_id),
      ..PostInsertForm::new(creator_id, content)
    };
    Self::create(pool, &form).await
  }

  /// Recomputes the cached counters from the rows they summarize. Normal
  /// writes keep the counters consistent on their own, this is a repair
  /// operation for externally caused drift.
  pub async fn reconcile_counts(pool: &mut DbPool<'_>, post_id: PostId) -> Result<Self, Error> {
    let conn = &mut get_conn(pool).await?;
    conn
      .transaction::<_, Error, _>(|conn| {
        async move {
          let like_count = post_like::table
            .filter(post_like::post_id.eq(post_id))
            .select(count_star())
            .first::<i64>(conn)
            .await?;
          let comment_count = comment::table
            .filter(comment::post_id.eq(post_id))
            .select(count_star())
            .first::<i64>(conn)
            .await?;
          let share_count = post::table
            .filter(post::reposted_from.eq(post_id))
            .select(count_star())
            .first::<i64>(conn)
            .await?;
          diesel::update(post::table.find(post_id))
            .set((
              post::likes.eq(like_count),
              post::comment_count.eq(comment_count),
              post::shares.eq(share_count),
            ))
            .get_result::<Self>(conn)
            .await
        }
        .scope_boxed()
      })
      .await
  }
}

#[async_trait]
impl Likeable for PostLike {
  type Form = PostLikeForm;
  type IdType = PostId;

  /// Inserting the like row and bumping the post's likes counter happen in
  /// one transaction, so a rejected duplicate cannot move the counter.
  async fn like(pool: &mut DbPool<'_>, form: &PostLikeForm) -> ChirpResult<Self> {
    let conn = &mut get_conn(pool).await?;
    conn
      .transaction::<_, ChirpError, _>(|conn| {
        async move {
          let post_like = insert_into(post_like::table)
            .values(form)
            .get_result::<Self>(conn)
            .await
            .map_err(|e| match e {
              Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                ChirpError::from(ChirpErrorType::AlreadyLikedPost)
              }
              e => ChirpError::from(e),
            })?;
          diesel::update(post::table.find(form.post_id))
            .set(post::likes.eq(post::likes + 1))
            .execute(conn)
            .await?;
          Ok(post_like)
        }
        .scope_boxed()
      })
      .await
  }

  /// Removing a like that isn't there fails with NotFound and leaves the
  /// counter alone. The decrement is floored at zero.
  async fn remove_like(
    pool: &mut DbPool<'_>,
    person_id: PersonId,
    post_id: PostId,
  ) -> ChirpResult<usize> {
    let conn = &mut get_conn(pool).await?;
    conn
      .transaction::<_, ChirpError, _>(|conn| {
        async move {
          let count = diesel::delete(
            post_like::table
              .filter(post_like::post_id.eq(post_id))
              .filter(post_like::person_id.eq(person_id)),
          )
          .execute(conn)
          .await?;
          if count == 0 {
            return Err(Error::NotFound.into());
          }
          diesel::update(post::table.find(post_id).filter(post::likes.gt(0)))
            .set(post::likes.eq(post::likes - 1))
            .execute(conn)
            .await?;
          Ok(count)
        }
        .scope_boxed()
      })
      .await
  }
}

#[cfg(test)]
mod tests {
  use crate::{
    schema::post,
    source::{
      person::{Person, PersonInsertForm},
      post::{Post, PostInsertForm, PostLike, PostLikeForm},
    },
    traits::{Crud, Likeable},
    utils::{build_db_pool_for_tests, get_conn, DbPool},
  };
  use chirp_utils::error::{ChirpErrorType, ChirpResult};
  use diesel::ExpressionMethods;
  use diesel_async::RunQueryDsl;
  use pretty_assertions::assert_eq;
  use serial_test::serial;

  #[tokio::test]
  #[serial]
  async fn test_likes_counter_follows_like_rows() -> ChirpResult<()> {
    let pool = &build_db_pool_for_tests().await;
    let pool = &mut pool.into();

    let author = Person::create(pool, &PersonInsertForm::new("dee_author".into())).await?;
    let fan = Person::create(pool, &PersonInsertForm::new("dee_fan".into())).await?;
    let inserted_post =
      Post::create(pool, &PostInsertForm::new(author.id, "counted post".into())).await?;
    assert_eq!(0, inserted_post.likes);

    PostLike::like(pool, &PostLikeForm::new(inserted_post.id, fan.id)).await?;
    PostLike::like(pool, &PostLikeForm::new(inserted_post.id, author.id)).await?;
    assert_eq!(2, Post::read(pool, inserted_post.id).await?.likes);

    // a duplicate like is rejected and must not move the counter
    match PostLike::like(pool, &PostLikeForm::new(inserted_post.id, fan.id)).await {
      Err(e) => assert_eq!(ChirpErrorType::AlreadyLikedPost, e.error_type),
      Ok(_) => panic!("duplicate like was accepted"),
    }
    assert_eq!(2, Post::read(pool, inserted_post.id).await?.likes);

    let removed = PostLike::remove_like(pool, fan.id, inserted_post.id).await?;
    assert_eq!(1, removed);
    assert_eq!(1, Post::read(pool, inserted_post.id).await?.likes);

    // unliking twice fails and leaves the counter alone
    match PostLike::remove_like(pool, fan.id, inserted_post.id).await {
      Err(e) => assert_eq!(ChirpErrorType::NotFound, e.error_type),
      Ok(_) => panic!("removed a like that wasn't there"),
    }
    assert_eq!(1, Post::read(pool, inserted_post.id).await?.likes);

    Person::delete(pool, author.id).await?;
    Person::delete(pool, fan.id).await?;

    Ok(())
  }

  #[tokio::test]
  #[serial]
  async fn test_likes_decrement_floors_at_zero() -> ChirpResult<()> {
    let pool = &build_db_pool_for_tests().await;
    let pool = &mut pool.into();

    let person = Person::create(pool, &PersonInsertForm::new("eli_floor".into())).await?;
    let inserted_post =
      Post::create(pool, &PostInsertForm::new(person.id, "floored".into())).await?;
    PostLike::like(pool, &PostLikeForm::new(inserted_post.id, person.id)).await?;

    // force the counter out of sync, as if an increment had been lost
    {
      let conn = &mut get_conn(pool).await?;
      diesel::update(post::table)
        .filter(post::id.eq(inserted_post.id))
        .set(post::likes.eq(0))
        .execute(conn)
        .await?;
    }

    PostLike::remove_like(pool, person.id, inserted_post.id).await?;
    assert_eq!(0, Post::read(pool, inserted_post.id).await?.likes);

    Person::delete(pool, person.id).await?;

    Ok(())
  }

  #[tokio::test]
  #[serial]
  async fn test_concurrent_likes_all_counted() -> ChirpResult<()> {
    let actual_pool = build_db_pool_for_tests().await;
    let pool = &mut (&actual_pool).into();

    let author = Person::create(pool, &PersonInsertForm::new("fay_racing".into())).await?;
    let rival = Person::create(pool, &PersonInsertForm::new("gus_racing".into())).await?;
    let inserted_post =
      Post::create(pool, &PostInsertForm::new(author.id, "contended".into())).await?;

    let mut pool_a: DbPool = (&actual_pool).into();
    let mut pool_b: DbPool = (&actual_pool).into();
    let form_a = PostLikeForm::new(inserted_post.id, author.id);
    let form_b = PostLikeForm::new(inserted_post.id, rival.id);
    let (liked_a, liked_b) = tokio::join!(
      PostLike::like(&mut pool_a, &form_a),
      PostLike::like(&mut pool_b, &form_b),
    );
    liked_a?;
    liked_b?;

    assert_eq!(2, Post::read(pool, inserted_post.id).await?.likes);

    Person::delete(pool, author.id).await?;
    Person::delete(pool, rival.id).await?;

    Ok(())
  }

  #[tokio::test]
  #[serial]
  async fn test_repost_maintains_shares() -> ChirpResult<()> {
    let pool = &build_db_pool_for_tests().await;
    let pool = &mut pool.into();

    let author = Person::create(pool, &PersonInsertForm::new("hal_source".into())).await?;
    let sharer = Person::create(pool, &PersonInsertForm::new("ida_sharer".into())).await?;
    let source = Post::create(pool, &PostInsertForm::new(author.id, "original".into())).await?;

    let repost = Post::repost(pool, sharer.id, source.id, "look at this".into()).await?;
    assert!(repost.is_repost());
    assert_eq!(1, Post::read(pool, source.id).await?.shares);

    Post::delete(pool, repost.id).await?;
    assert_eq!(0, Post::read(pool, source.id).await?.shares);

    // deleting the source orphans the repost instead of cascading into it
    let surviving = Post::repost(pool, sharer.id, source.id, "still here".into()).await?;
    Post::delete(pool, source.id).await?;
    assert_eq!(None, Post::read(pool, surviving.id).await?.reposted_from);

    Person::delete(pool, author.id).await?;
    Person::delete(pool, sharer.id).await?;

    Ok(())
  }

  #[tokio::test]
  #[serial]
  async fn test_reconcile_repairs_drifted_counters() -> ChirpResult<()> {
    let pool = &build_db_pool_for_tests().await;
    let pool = &mut pool.into();

    let person = Person::create(pool, &PersonInsertForm::new("jo_reconcile".into())).await?;
    let inserted_post =
      Post::create(pool, &PostInsertForm::new(person.id, "drifted".into())).await?;
    PostLike::like(pool, &PostLikeForm::new(inserted_post.id, person.id)).await?;

    {
      let conn = &mut get_conn(pool).await?;
      diesel::update(post::table)
        .filter(post::id.eq(inserted_post.id))
        .set((
          post::likes.eq(40),
          post::comment_count.eq(7),
          post::shares.eq(3),
        ))
        .execute(conn)
        .await?;
    }

    let repaired = Post::reconcile_counts(pool, inserted_post.id).await?;
    assert_eq!(1, repaired.likes);
    assert_eq!(0, repaired.comment_count);
    assert_eq!(0, repaired.shares);

    Person::delete(pool, person.id).await?;

    Ok(())
  }
}
