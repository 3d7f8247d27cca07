//! In-memory adapters.

mod store;

pub use store::{
    InMemoryStore, UQ_ACCOUNTS_EMAIL, UQ_ACCOUNTS_HANDLE, UQ_ACCOUNTS_SUBJECT, UQ_FOLLOWS_PAIR,
    UQ_LIKES_AUTHOR_POST, UQ_RESHARES_AUTHOR_POST,
};
