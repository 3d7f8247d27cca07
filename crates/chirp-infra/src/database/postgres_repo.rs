//! PostgreSQL repository implementations.
//!
//! Visible reads inner-join `accounts` so soft-deleted rows and rows of inactive
//! authors never leave the database.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use chirp_core::domain::{
    Account, AccountId, FollowEdge, Like, NewAccount, NewFollow, NewLike, NewPost, NewReply,
    NewReshare, Post, PostId, Reply, ReplyId, Reshare,
};
use chirp_core::error::RepoError;
use chirp_core::ports::{
    AccountRepository, FollowRepository, LikeRepository, PostRepository, ReplyRepository,
    ReshareRepository,
};

use super::entity::account::{self, Entity as AccountEntity};
use super::entity::follow::{self, Entity as FollowEntity};
use super::entity::like::{self, Entity as LikeEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::reply::{self, Entity as ReplyEntity};
use super::entity::reshare::{self, Entity as ReshareEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL account repository.
pub type PostgresAccountRepository = PostgresBaseRepository<AccountEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL reply repository.
pub type PostgresReplyRepository = PostgresBaseRepository<ReplyEntity>;

/// PostgreSQL reshare repository.
pub type PostgresReshareRepository = PostgresBaseRepository<ReshareEntity>;

/// PostgreSQL like repository.
pub type PostgresLikeRepository = PostgresBaseRepository<LikeEntity>;

/// PostgreSQL follow-graph repository.
pub type PostgresFollowRepository = PostgresBaseRepository<FollowEntity>;

fn page(limit: usize) -> u64 {
    u64::try_from(limit).unwrap_or(u64::MAX)
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn find_by_subject(&self, subject: &str) -> Result<Option<Account>, RepoError> {
        tracing::debug!(subject, "Finding account by subject");

        let result = AccountEntity::find()
            .filter(account::Column::Subject.eq(subject))
            .one(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_handle(&self, handle: &str) -> Result<Option<Account>, RepoError> {
        let result = AccountEntity::find()
            .filter(account::Column::Handle.eq(handle))
            .one(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn insert(&self, account: NewAccount) -> Result<Account, RepoError> {
        let model = account::ActiveModel::from(account)
            .insert(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn list_all(&self) -> Result<Vec<Account>, RepoError> {
        let result = AccountEntity::find()
            .order_by_asc(account::Column::Id)
            .all(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
        let model = post::ActiveModel::from(post)
            .insert(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn mark_deleted(&self, id: PostId) -> Result<(), RepoError> {
        let result = PostEntity::update_many()
            .col_expr(post::Column::Deleted, Expr::value(true))
            .filter(post::Column::Id.eq(id))
            .exec(self.conn())
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn visible_by_authors(
        &self,
        authors: &[AccountId],
        limit: usize,
    ) -> Result<Vec<Post>, RepoError> {
        if authors.is_empty() {
            return Ok(Vec::new());
        }

        let result = PostEntity::find()
            .inner_join(AccountEntity)
            .filter(post::Column::AuthorId.is_in(authors.iter().copied()))
            .filter(post::Column::Deleted.eq(false))
            .filter(account::Column::Active.eq(true))
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .limit(page(limit))
            .all(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn visible_recent(&self, limit: usize) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .inner_join(AccountEntity)
            .filter(post::Column::Deleted.eq(false))
            .filter(account::Column::Active.eq(true))
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .limit(page(limit))
            .all(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl ReplyRepository for PostgresReplyRepository {
    async fn insert(&self, reply: NewReply) -> Result<Reply, RepoError> {
        let model = reply::ActiveModel::from(reply)
            .insert(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn mark_deleted(&self, id: ReplyId) -> Result<(), RepoError> {
        let result = ReplyEntity::update_many()
            .col_expr(reply::Column::Deleted, Expr::value(true))
            .filter(reply::Column::Id.eq(id))
            .exec(self.conn())
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn visible_for_post(&self, post: PostId) -> Result<Vec<Reply>, RepoError> {
        let result = ReplyEntity::find()
            .inner_join(AccountEntity)
            .filter(reply::Column::PostId.eq(post))
            .filter(reply::Column::Deleted.eq(false))
            .filter(account::Column::Active.eq(true))
            .order_by_asc(reply::Column::CreatedAt)
            .order_by_asc(reply::Column::Id)
            .all(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl ReshareRepository for PostgresReshareRepository {
    async fn insert(&self, reshare: NewReshare) -> Result<Reshare, RepoError> {
        let model = reshare::ActiveModel::from(reshare)
            .insert(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn find_by_pair(
        &self,
        author: AccountId,
        post: PostId,
    ) -> Result<Option<Reshare>, RepoError> {
        let result = ReshareEntity::find()
            .filter(reshare::Column::AuthorId.eq(author))
            .filter(reshare::Column::PostId.eq(post))
            .one(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn by_authors(
        &self,
        authors: &[AccountId],
        limit: usize,
    ) -> Result<Vec<Reshare>, RepoError> {
        if authors.is_empty() {
            return Ok(Vec::new());
        }

        let result = ReshareEntity::find()
            .filter(reshare::Column::AuthorId.is_in(authors.iter().copied()))
            .order_by_desc(reshare::Column::CreatedAt)
            .order_by_desc(reshare::Column::Id)
            .limit(page(limit))
            .all(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl LikeRepository for PostgresLikeRepository {
    async fn insert(&self, like: NewLike) -> Result<Like, RepoError> {
        let model = like::ActiveModel::from(like)
            .insert(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn find_by_pair(
        &self,
        author: AccountId,
        post: PostId,
    ) -> Result<Option<Like>, RepoError> {
        let result = LikeEntity::find()
            .filter(like::Column::AuthorId.eq(author))
            .filter(like::Column::PostId.eq(post))
            .one(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn delete_by_pair(&self, author: AccountId, post: PostId) -> Result<bool, RepoError> {
        let result = LikeEntity::delete_many()
            .filter(like::Column::AuthorId.eq(author))
            .filter(like::Column::PostId.eq(post))
            .exec(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn for_post(&self, post: PostId) -> Result<Vec<Like>, RepoError> {
        let result = LikeEntity::find()
            .filter(like::Column::PostId.eq(post))
            .order_by_asc(like::Column::CreatedAt)
            .order_by_asc(like::Column::Id)
            .all(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl FollowRepository for PostgresFollowRepository {
    async fn insert(&self, follow: NewFollow) -> Result<FollowEdge, RepoError> {
        let model = follow::ActiveModel::from(follow)
            .insert(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn exists(&self, follower: AccountId, followed: AccountId) -> Result<bool, RepoError> {
        let count = FollowEntity::find()
            .filter(follow::Column::FollowerId.eq(follower))
            .filter(follow::Column::FollowedId.eq(followed))
            .count(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(count > 0)
    }

    async fn delete_by_pair(
        &self,
        follower: AccountId,
        followed: AccountId,
    ) -> Result<bool, RepoError> {
        let result = FollowEntity::delete_many()
            .filter(follow::Column::FollowerId.eq(follower))
            .filter(follow::Column::FollowedId.eq(followed))
            .exec(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn followed_ids(&self, follower: AccountId) -> Result<Vec<AccountId>, RepoError> {
        FollowEntity::find()
            .select_only()
            .column(follow::Column::FollowedId)
            .filter(follow::Column::FollowerId.eq(follower))
            .into_tuple::<i64>()
            .all(self.conn())
            .await
            .map_err(map_db_err)
    }

    async fn follower_ids(&self, followed: AccountId) -> Result<Vec<AccountId>, RepoError> {
        FollowEntity::find()
            .select_only()
            .column(follow::Column::FollowerId)
            .filter(follow::Column::FollowedId.eq(followed))
            .into_tuple::<i64>()
            .all(self.conn())
            .await
            .map_err(map_db_err)
    }
}
