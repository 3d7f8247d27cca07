//! Like entity for SeaORM. `(author_id, post_id)` is unique.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use chirp_core::domain::{Like, NewLike};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "likes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub author_id: i64,
    pub post_id: i64,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::AuthorId",
        to = "super::account::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Author,
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::PostId",
        to = "super::post::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Post,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Like {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            author_id: model.author_id,
            post_id: model.post_id,
            created_at: model.created_at.into(),
        }
    }
}

impl From<NewLike> for ActiveModel {
    fn from(like: NewLike) -> Self {
        Self {
            id: NotSet,
            author_id: Set(like.author_id),
            post_id: Set(like.post_id),
            created_at: Set(like.created_at.into()),
        }
    }
}
