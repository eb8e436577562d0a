use crate::newtypes::PersonId;
#[cfg(feature = "full")]
use crate::schema::person;
use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "full", derive(Queryable, Selectable, Identifiable))]
#[cfg_attr(feature = "full", diesel(table_name = person))]
#[cfg_attr(feature = "full", diesel(check_for_backend(diesel::pg::Pg)))]
/// A registered user identity. Creating one also creates its [`Profile`][
/// crate::source::profile::Profile] row.
pub struct Person {
  pub id: PersonId,
  pub name: String,
  pub published: chrono::NaiveDateTime,
}

#[derive(Debug, Clone, derive_new::new)]
#[cfg_attr(feature = "full", derive(Insertable, AsChangeset))]
#[cfg_attr(feature = "full", diesel(table_name = person))]
pub struct PersonInsertForm {
  pub name: String,
  #[new(default)]
  pub published: Option<chrono::NaiveDateTime>,
}
