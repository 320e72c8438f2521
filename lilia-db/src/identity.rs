/// Anything that can name a Discord user.
pub trait ExternalIdentity {
    fn discord_id(&self) -> u64;

    fn display_name(&self) -> &str {
        ""
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscordIdentity {
    pub id: u64,
    pub name: String,
}

impl DiscordIdentity {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl ExternalIdentity for DiscordIdentity {
    fn discord_id(&self) -> u64 {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

impl ExternalIdentity for u64 {
    fn discord_id(&self) -> u64 {
        *self
    }
}
