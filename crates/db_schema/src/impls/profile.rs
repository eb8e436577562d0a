use crate::{
  newtypes::{PersonId, ProfileId},
  schema::profile,
  source::profile::{Profile, ProfileUpdateForm},
  utils::{get_conn, DbPool},
};
use diesel::{result::Error, ExpressionMethods, QueryDsl};
use diesel_async::RunQueryDsl;

impl Profile {
  /// There is exactly one profile per person, so this is a unique lookup.
  pub async fn read_for_person(
    pool: &mut DbPool<'_>,
    person_id: PersonId,
  ) -> Result<Self, Error> {
    let conn = &mut get_conn(pool).await?;
    profile::table
      .filter(profile::person_id.eq(person_id))
      .first::<Self>(conn)
      .await
  }

  pub async fn update(
    pool: &mut DbPool<'_>,
    profile_id: ProfileId,
    form: &ProfileUpdateForm,
  ) -> Result<Self, Error> {
    let conn = &mut get_conn(pool).await?;
    diesel::update(profile::table.find(profile_id))
      .set(form)
      .get_result::<Self>(conn)
      .await
  }
}
