use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Accounts {
    Table,
    Id,
    Subject,
    Handle,
    Email,
    Active,
    RegisteredAt,
}

#[derive(DeriveIden)]
enum Posts {
    Table,
    Id,
    AuthorId,
    Body,
    CreatedAt,
    Deleted,
}

#[derive(DeriveIden)]
enum Replies {
    Table,
    Id,
    AuthorId,
    PostId,
    Body,
    CreatedAt,
    Deleted,
}

#[derive(DeriveIden)]
enum Reshares {
    Table,
    Id,
    AuthorId,
    PostId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Likes {
    Table,
    Id,
    AuthorId,
    PostId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Follows {
    Table,
    Id,
    FollowerId,
    FollowedId,
    CreatedAt,
}

fn id_column<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .big_integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

fn fk(
    name: &str,
    from_table: impl IntoIden + 'static,
    from_col: impl IntoIden,
    to_table: impl IntoIden + 'static,
    to_col: impl IntoIden,
) -> ForeignKeyCreateStatement {
    ForeignKey::create()
        .name(name)
        .from(from_table, from_col)
        .to(to_table, to_col)
        .on_delete(ForeignKeyAction::Cascade)
        .on_update(ForeignKeyAction::Cascade)
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(&mut id_column(Accounts::Id))
                    .col(ColumnDef::new(Accounts::Subject).string().not_null())
                    .col(ColumnDef::new(Accounts::Handle).string_len(25).not_null())
                    .col(ColumnDef::new(Accounts::Email).string().not_null())
                    .col(
                        ColumnDef::new(Accounts::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Accounts::RegisteredAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            ("uq_accounts_subject", Accounts::Subject),
            ("uq_accounts_handle", Accounts::Handle),
            ("uq_accounts_email", Accounts::Email),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Accounts::Table)
                        .col(column)
                        .unique()
                        .to_owned(),
                )
                .await?;
        }

        manager
            .create_table(
                Table::create()
                    .table(Posts::Table)
                    .if_not_exists()
                    .col(&mut id_column(Posts::Id))
                    .col(ColumnDef::new(Posts::AuthorId).big_integer().not_null())
                    .col(ColumnDef::new(Posts::Body).text().not_null())
                    .col(
                        ColumnDef::new(Posts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Posts::Deleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(&mut fk(
                        "fk_posts_author",
                        Posts::Table,
                        Posts::AuthorId,
                        Accounts::Table,
                        Accounts::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_posts_author_created")
                    .table(Posts::Table)
                    .col(Posts::AuthorId)
                    .col(Posts::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_posts_created")
                    .table(Posts::Table)
                    .col(Posts::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Replies::Table)
                    .if_not_exists()
                    .col(&mut id_column(Replies::Id))
                    .col(ColumnDef::new(Replies::AuthorId).big_integer().not_null())
                    .col(ColumnDef::new(Replies::PostId).big_integer().not_null())
                    .col(ColumnDef::new(Replies::Body).text().not_null())
                    .col(
                        ColumnDef::new(Replies::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Replies::Deleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(&mut fk(
                        "fk_replies_author",
                        Replies::Table,
                        Replies::AuthorId,
                        Accounts::Table,
                        Accounts::Id,
                    ))
                    .foreign_key(&mut fk(
                        "fk_replies_post",
                        Replies::Table,
                        Replies::PostId,
                        Posts::Table,
                        Posts::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_replies_post")
                    .table(Replies::Table)
                    .col(Replies::PostId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Reshares::Table)
                    .if_not_exists()
                    .col(&mut id_column(Reshares::Id))
                    .col(ColumnDef::new(Reshares::AuthorId).big_integer().not_null())
                    .col(ColumnDef::new(Reshares::PostId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Reshares::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(&mut fk(
                        "fk_reshares_author",
                        Reshares::Table,
                        Reshares::AuthorId,
                        Accounts::Table,
                        Accounts::Id,
                    ))
                    .foreign_key(&mut fk(
                        "fk_reshares_post",
                        Reshares::Table,
                        Reshares::PostId,
                        Posts::Table,
                        Posts::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_reshares_author_post")
                    .table(Reshares::Table)
                    .col(Reshares::AuthorId)
                    .col(Reshares::PostId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reshares_author_created")
                    .table(Reshares::Table)
                    .col(Reshares::AuthorId)
                    .col(Reshares::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Likes::Table)
                    .if_not_exists()
                    .col(&mut id_column(Likes::Id))
                    .col(ColumnDef::new(Likes::AuthorId).big_integer().not_null())
                    .col(ColumnDef::new(Likes::PostId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Likes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(&mut fk(
                        "fk_likes_author",
                        Likes::Table,
                        Likes::AuthorId,
                        Accounts::Table,
                        Accounts::Id,
                    ))
                    .foreign_key(&mut fk(
                        "fk_likes_post",
                        Likes::Table,
                        Likes::PostId,
                        Posts::Table,
                        Posts::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_likes_author_post")
                    .table(Likes::Table)
                    .col(Likes::AuthorId)
                    .col(Likes::PostId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Follows::Table)
                    .if_not_exists()
                    .col(&mut id_column(Follows::Id))
                    .col(ColumnDef::new(Follows::FollowerId).big_integer().not_null())
                    .col(ColumnDef::new(Follows::FollowedId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Follows::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(&mut fk(
                        "fk_follows_follower",
                        Follows::Table,
                        Follows::FollowerId,
                        Accounts::Table,
                        Accounts::Id,
                    ))
                    .foreign_key(&mut fk(
                        "fk_follows_followed",
                        Follows::Table,
                        Follows::FollowedId,
                        Accounts::Table,
                        Accounts::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_follows_pair")
                    .table(Follows::Table)
                    .col(Follows::FollowerId)
                    .col(Follows::FollowedId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_follows_followed")
                    .table(Follows::Table)
                    .col(Follows::FollowedId)
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "ALTER TABLE follows ADD CONSTRAINT ck_follows_distinct \
                 CHECK (follower_id <> followed_id)",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [
            Follows::Table.into_iden(),
            Likes::Table.into_iden(),
            Reshares::Table.into_iden(),
            Replies::Table.into_iden(),
            Posts::Table.into_iden(),
            Accounts::Table.into_iden(),
        ] {
            manager
                .drop_table(Table::drop().table(table).if_exists().to_owned())
                .await?;
        }

        Ok(())
    }
}
