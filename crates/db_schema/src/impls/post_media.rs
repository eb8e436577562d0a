use crate::{
  newtypes::{PostId, PostMediaId},
  schema::post_media,
  source::post_media::{PostMedia, PostMediaInsertForm},
  utils::{get_conn, DbPool},
};
use diesel::{dsl::insert_into, result::Error, ExpressionMethods, QueryDsl};
use diesel_async::RunQueryDsl;

impl PostMedia {
  pub async fn create(pool: &mut DbPool<'_>, form: &PostMediaInsertForm) -> Result<Self, Error> {
    let conn = &mut get_conn(pool).await?;
    insert_into(post_media::table)
      .values(form)
      .get_result::<Self>(conn)
      .await
  }

  /// All media for a post, in attachment order.
  pub async fn for_post(pool: &mut DbPool<'_>, post_id: PostId) -> Result<Vec<Self>, Error> {
    let conn = &mut get_conn(pool).await?;
    post_media::table
      .filter(post_media::post_id.eq(post_id))
      .order_by(post_media::id)
      .load::<Self>(conn)
      .await
  }

  pub async fn delete(pool: &mut DbPool<'_>, media_id: PostMediaId) -> Result<usize, Error> {
    let conn = &mut get_conn(pool).await?;
    let count = diesel::delete(post_media::table.find(media_id))
      .execute(conn)
      .await?;
    if count == 0 {
      return Err(Error::NotFound);
    }
    Ok(count)
  }
}
