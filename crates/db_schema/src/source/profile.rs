use crate::newtypes::{DbUrl, PersonId, ProfileId};
#[cfg(feature = "full")]
use crate::schema::profile;
use chrono::NaiveDate;
#[cfg(feature = "full")]
use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(EnumString, Display, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "full", derive(DbEnum))]
#[cfg_attr(
  feature = "full",
  ExistingTypePath = "crate::schema::sql_types::GenderType"
)]
#[cfg_attr(feature = "full", DbValueStyle = "verbatim")]
pub enum Gender {
  Male,
  Female,
  Other,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "full", derive(Queryable, Selectable, Identifiable, Associations))]
#[cfg_attr(feature = "full", diesel(belongs_to(crate::source::person::Person)))]
#[cfg_attr(feature = "full", diesel(table_name = profile))]
#[cfg_attr(feature = "full", diesel(check_for_backend(diesel::pg::Pg)))]
/// A person's profile, one-to-one with [`Person`][crate::source::person::Person].
/// It is created together with the person and only ever deleted by the person
/// cascade.
pub struct Profile {
  pub id: ProfileId,
  pub person_id: PersonId,
  pub gender: Option<Gender>,
  /// A free-text biography.
  pub bio: Option<String>,
  /// An optional profile image reference.
  pub image: Option<DbUrl>,
  pub date_of_birth: Option<NaiveDate>,
}

#[derive(Debug, Clone, derive_new::new)]
#[cfg_attr(feature = "full", derive(Insertable, AsChangeset))]
#[cfg_attr(feature = "full", diesel(table_name = profile))]
pub struct ProfileInsertForm {
  pub person_id: PersonId,
  #[new(default)]
  pub gender: Option<Gender>,
  #[new(default)]
  pub bio: Option<String>,
  #[new(default)]
  pub image: Option<DbUrl>,
  #[new(default)]
  pub date_of_birth: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "full", derive(AsChangeset))]
#[cfg_attr(feature = "full", diesel(table_name = profile))]
pub struct ProfileUpdateForm {
  pub gender: Option<Option<Gender>>,
  pub bio: Option<Option<String>>,
  pub image: Option<Option<DbUrl>>,
  pub date_of_birth: Option<Option<NaiveDate>>,
}
