//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly; migrations
//! themselves are owned by the deployment, not this crate. The slot
//! exclusivity invariant is backed by a partial unique index on
//! `appointments (provider_id, date) WHERE canceled_at IS NULL`, which
//! Diesel cannot express here but the insert path relies on.

diesel::table! {
    /// User accounts as mirrored from the identity store.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Human-readable display name.
        display_name -> Varchar,
        /// Contact email address.
        email -> Varchar,
        /// Whether the user offers bookable slots.
        is_provider -> Bool,
        /// Optional avatar URL for listing display.
        avatar_url -> Nullable<Varchar>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (auto-updated by trigger).
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Booked slots; rows are soft-canceled, never deleted.
    appointments (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Booking client.
        client_id -> Uuid,
        /// Targeted provider.
        provider_id -> Uuid,
        /// Slot start, always the top of an hour.
        date -> Timestamptz,
        /// Cancellation stamp; null while the booking is active.
        canceled_at -> Nullable<Timestamptz>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (auto-updated by trigger).
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only provider notification feed.
    notifications (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Recipient provider.
        provider_user_id -> Uuid,
        /// Free-text feed content.
        content -> Text,
        /// Read flag, false on insert.
        read -> Bool,
        /// Insertion timestamp; the feed orders by this, descending.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Job submissions drained by the external worker.
    queued_jobs (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Worker routing key.
        key -> Varchar,
        /// Job arguments as free-form JSON.
        data -> Jsonb,
        /// Submission timestamp.
        created_at -> Timestamptz,
    }
}
