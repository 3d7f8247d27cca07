//! SeaORM entities, one per table.

pub mod account;
pub mod follow;
pub mod like;
pub mod post;
pub mod reply;
pub mod reshare;
