//! Follow edge entity for SeaORM. `(follower_id, followed_id)` is unique and the
//! two ends must differ.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use chirp_core::domain::{FollowEdge, NewFollow};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "follows")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub follower_id: i64,
    pub followed_id: i64,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::FollowerId",
        to = "super::account::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Follower,
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::FollowedId",
        to = "super::account::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Followed,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for FollowEdge {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            follower_id: model.follower_id,
            followed_id: model.followed_id,
            created_at: model.created_at.into(),
        }
    }
}

impl From<NewFollow> for ActiveModel {
    fn from(follow: NewFollow) -> Self {
        Self {
            id: NotSet,
            follower_id: Set(follow.follower_id),
            followed_id: Set(follow.followed_id),
            created_at: Set(follow.created_at.into()),
        }
    }
}
