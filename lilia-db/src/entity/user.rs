use sea_orm::entity::prelude::*;
use sea_orm::Set;

/// A Discord user known to the bot. Rows are created lazily the first time
/// a user is looked up.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub discord_id: i64,
    pub warn_count: i16,
    pub osu_username: String,
    pub osu_mode: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn user_id(&self) -> u64 {
        self.discord_id as u64
    }

    /// `None` until the user links an osu! account.
    pub fn osu_profile(&self) -> Option<(&str, &str)> {
        if self.osu_username.is_empty() {
            None
        } else {
            Some((&self.osu_username, &self.osu_mode))
        }
    }
}

impl ActiveModel {
    /// A fresh record carrying only the Discord id and default fields.
    pub fn with_defaults(discord_id: u64) -> Self {
        Self {
            discord_id: Set(discord_id as i64),
            warn_count: Set(0),
            osu_username: Set(String::new()),
            osu_mode: Set(String::new()),
        }
    }
}
