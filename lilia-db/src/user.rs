use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, IntoActiveModel, Set, TransactionTrait,
};
use tracing::{debug, info, instrument};

use crate::entity::user;
use crate::{ExternalIdentity, LiliaDb, SeaDbErr};

/// Looks up the record for `identity` on `conn`, inserting a default one if
/// none exists yet.
///
/// Nothing is committed here. When `conn` is a transaction the insert only
/// becomes durable once the caller commits it.
#[instrument(level = "debug", skip_all, fields(discord_id = identity.discord_id()))]
pub async fn get_or_create_user_in<C>(
    conn: &C,
    identity: &impl ExternalIdentity,
) -> Result<user::Model, SeaDbErr>
where
    C: ConnectionTrait,
{
    let discord_id = identity.discord_id();
    if let Some(user) = user::Entity::find_by_id(discord_id as i64).one(conn).await? {
        return Ok(user);
    }
    debug!("no record yet, inserting defaults");
    user::ActiveModel::with_defaults(discord_id)
        .insert(conn)
        .await
}

impl LiliaDb {
    /// Returns the record for `identity`, creating it with default fields on
    /// first sight. Runs in its own transaction and commits only that.
    #[instrument(skip(self, identity), fields(discord_id = identity.discord_id()))]
    pub async fn get_or_create_user(
        &self,
        identity: &impl ExternalIdentity,
    ) -> Result<user::Model, SeaDbErr> {
        let txn = self.db.begin().await?;
        let user = get_or_create_user_in(&txn, identity).await?;
        txn.commit().await?;
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn find_user(&self, discord_id: u64) -> Result<Option<user::Model>, SeaDbErr> {
        user::Entity::find_by_id(discord_id as i64)
            .one(&self.db)
            .await
    }

    #[instrument(skip(self, identity), fields(discord_id = identity.discord_id()))]
    pub async fn add_warning(
        &self,
        identity: &impl ExternalIdentity,
    ) -> Result<user::Model, SeaDbErr> {
        let user = self
            .update_user(identity, |user| {
                let warn_count = user.warn_count.saturating_add(1);
                let mut active = user.into_active_model();
                active.warn_count = Set(warn_count);
                active
            })
            .await?;
        info!(warn_count = user.warn_count, "warning added");
        Ok(user)
    }

    #[instrument(skip(self, identity), fields(discord_id = identity.discord_id()))]
    pub async fn clear_warnings(
        &self,
        identity: &impl ExternalIdentity,
    ) -> Result<user::Model, SeaDbErr> {
        self.update_user(identity, |user| {
            let mut active = user.into_active_model();
            active.warn_count = Set(0);
            active
        })
        .await
    }

    #[instrument(skip(self, identity), fields(discord_id = identity.discord_id()))]
    pub async fn set_osu_profile(
        &self,
        identity: &impl ExternalIdentity,
        username: String,
        mode: String,
    ) -> Result<user::Model, SeaDbErr> {
        self.update_user(identity, move |user| {
            let mut active = user.into_active_model();
            active.osu_username = Set(username);
            active.osu_mode = Set(mode);
            active
        })
        .await
    }

    /// Get-or-create followed by an update, behind one commit.
    async fn update_user<F>(
        &self,
        identity: &impl ExternalIdentity,
        change: F,
    ) -> Result<user::Model, SeaDbErr>
    where
        F: FnOnce(user::Model) -> user::ActiveModel,
    {
        let txn = self.db.begin().await?;
        let user = get_or_create_user_in(&txn, identity).await?;
        let user = change(user).update(&txn).await?;
        txn.commit().await?;
        Ok(user)
    }
}
