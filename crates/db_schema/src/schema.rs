pub mod sql_types {
  #[derive(diesel::query_builder::QueryId, diesel::sql_types::SqlType)]
  #[diesel(postgres_type(name = "gender_type"))]
  pub struct GenderType;
}

table! {
    person (id) {
        id -> Int4,
        name -> Varchar,
        published -> Timestamp,
    }
}

table! {
    use diesel::sql_types::*;
    use super::sql_types::GenderType;

    profile (id) {
        id -> Int4,
        person_id -> Int4,
        gender -> Nullable<GenderType>,
        bio -> Nullable<Text>,
        image -> Nullable<Text>,
        date_of_birth -> Nullable<Date>,
    }
}

table! {
    post (id) {
        id -> Int4,
        creator_id -> Int4,
        content -> Text,
        reposted_from -> Nullable<Int4>,
        published -> Timestamp,
        likes -> Int8,
        comment_count -> Int8,
        shares -> Int8,
    }
}

table! {
    post_media (id) {
        id -> Int4,
        post_id -> Int4,
        image -> Text,
    }
}

table! {
    post_like (id) {
        id -> Int4,
        post_id -> Int4,
        person_id -> Int4,
        published -> Timestamp,
    }
}

table! {
    comment (id) {
        id -> Int4,
        post_id -> Int4,
        creator_id -> Int4,
        parent_id -> Nullable<Int4>,
        content -> Text,
        published -> Timestamp,
        updated -> Nullable<Timestamp>,
        likes -> Int8,
    }
}

table! {
    comment_like (id) {
        id -> Int4,
        comment_id -> Int4,
        person_id -> Int4,
        published -> Timestamp,
    }
}

joinable!(profile -> person (person_id));
joinable!(post -> person (creator_id));
joinable!(post_media -> post (post_id));
joinable!(post_like -> post (post_id));
joinable!(post_like -> person (person_id));
joinable!(comment -> post (post_id));
joinable!(comment -> person (creator_id));
joinable!(comment_like -> comment (comment_id));
joinable!(comment_like -> person (person_id));

allow_tables_to_appear_in_same_query!(
  person,
  profile,
  post,
  post_media,
  post_like,
  comment,
  comment_like,
);
