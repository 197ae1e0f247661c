//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation. Accounts are partitioned across three tables, one per role;
//! email uniqueness is a per-table constraint.

diesel::table! {
    /// Administrator accounts.
    admins (id) {
        id -> Uuid,
        name -> Varchar,
        email -> Varchar,
        password_hash -> Varchar,
        bio -> Nullable<Text>,
        avatar_ref -> Nullable<Varchar>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Student accounts with enrolment details.
    students (id) {
        id -> Uuid,
        name -> Varchar,
        email -> Varchar,
        password_hash -> Varchar,
        bio -> Nullable<Text>,
        avatar_ref -> Nullable<Varchar>,
        student_number -> Varchar,
        year -> Varchar,
        department -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Alumni accounts with graduation and employment details.
    alumni (id) {
        id -> Uuid,
        name -> Varchar,
        email -> Varchar,
        password_hash -> Varchar,
        bio -> Nullable<Text>,
        avatar_ref -> Nullable<Varchar>,
        batch -> Varchar,
        department -> Varchar,
        company -> Nullable<Varchar>,
        designation -> Nullable<Varchar>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Work-history entries; the serial key preserves append order.
    experiences (id) {
        id -> Int8,
        alumnus_id -> Uuid,
        company -> Varchar,
        position -> Varchar,
        start_date -> Varchar,
        end_date -> Nullable<Varchar>,
        description -> Text,
    }
}

diesel::table! {
    /// Feed posts; `likes` only ever increments.
    posts (id) {
        id -> Uuid,
        author_id -> Uuid,
        author_role -> Varchar,
        caption -> Text,
        image_ref -> Nullable<Varchar>,
        likes -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Comments; the serial key gives a stable FIFO order per post.
    comments (id) {
        id -> Int8,
        post_id -> Uuid,
        author_name -> Varchar,
        body -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Job-board listings.
    jobs (id) {
        id -> Uuid,
        title -> Varchar,
        company -> Varchar,
        location -> Varchar,
        description -> Text,
        apply_link -> Varchar,
        posted_by -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Notifications; created unread, no read path in scope.
    notifications (id) {
        id -> Uuid,
        recipient_id -> Uuid,
        message -> Text,
        read -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(experiences -> alumni (alumnus_id));
diesel::joinable!(comments -> posts (post_id));

diesel::allow_tables_to_appear_in_same_query!(
    admins, students, alumni, experiences, posts, comments, jobs, notifications
);
