//! Domain entities - the core business objects.

mod post;

pub use post::{
    MAX_TITLE_LEN, Post, PostDraft, PostId, PostInput, current_timestamp, revision_timestamp,
};
