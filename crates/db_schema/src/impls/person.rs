use crate::{
  newtypes::PersonId,
  schema::{person, profile},
  source::{
    person::{Person, PersonInsertForm},
    profile::ProfileInsertForm,
  },
  traits::Crud,
  utils::{get_conn, DbPool},
};
use async_trait::async_trait;
use diesel::{dsl::insert_into, result::Error, QueryDsl};
use diesel_async::{scoped_futures::ScopedFutureExt, AsyncConnection, RunQueryDsl};

#[async_trait]
impl Crud for Person {
  type InsertForm = PersonInsertForm;
  type UpdateForm = PersonInsertForm;
  type IdType = PersonId;

  /// Also creates an empty [`Profile`][crate::source::profile::Profile] for
  /// the new person, in the same transaction.
  async fn create(pool: &mut DbPool<'_>, form: &Self::InsertForm) -> Result<Self, Error> {
    let conn = &mut get_conn(pool).await?;
    conn
      .transaction::<_, Error, _>(|conn| {
        async move {
          let person = insert_into(person::table)
            .values(form)
            .get_result::<Self>(conn)
            .await?;
          insert_into(profile::table)
            .values(ProfileInsertForm::new(person.id))
            .execute(conn)
            .await?;
          Ok(person)
        }
        .scope_boxed()
      })
      .await
  }

  async fn read(pool: &mut DbPool<'_>, person_id: PersonId) -> Result<Self, Error> {
    let conn = &mut get_conn(pool).await?;
    person::table.find(person_id).first::<Self>(conn).await
  }

  async fn update(
    pool: &mut DbPool<'_>,
    person_id: PersonId,
    form: &Self::UpdateForm,
  ) -> Result<Self, Error> {
    let conn = &mut get_conn(pool).await?;
    diesel::update(person::table.find(person_id))
      .set(form)
      .get_result::<Self>(conn)
      .await
  }

  /// The profile and all of the person's posts, likes and comments go with it
  /// through foreign key cascades. Cascades don't adjust the cached counters
  /// on other people's surviving posts and comments; callers that care should
  /// follow up with `reconcile_counts` on the affected rows.
  async fn delete(pool: &mut DbPool<'_>, person_id: PersonId) -> Result<usize, Error> {
    let conn = &mut get_conn(pool).await?;
    let count = diesel::delete(person::table.find(person_id))
      .execute(conn)
      .await?;
    if count == 0 {
      return Err(Error::NotFound);
    }
    Ok(count)
  }
}
