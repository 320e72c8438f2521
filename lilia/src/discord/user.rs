use lilia_db::entity::user;
use poise::serenity_prelude::{self as serenity, Mentionable};

use super::{identity_of, Context, Error};

const MAX_OSU_USERNAME_LEN: usize = 32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, poise::ChoiceParameter)]
pub(crate) enum OsuMode {
    #[name = "osu"]
    Osu,
    #[name = "taiko"]
    Taiko,
    #[name = "fruits"]
    Fruits,
    #[name = "mania"]
    Mania,
}

impl OsuMode {
    fn as_str(self) -> &'static str {
        match self {
            OsuMode::Osu => "osu",
            OsuMode::Taiko => "taiko",
            OsuMode::Fruits => "fruits",
            OsuMode::Mania => "mania",
        }
    }
}

fn validate_osu_username(value: &str) -> Option<String> {
    let value = value.trim();
    let len = value.chars().count();
    if !(1..=MAX_OSU_USERNAME_LEN).contains(&len) {
        return None;
    }
    Some(value.to_string())
}

fn describe(record: &user::Model) -> String {
    let osu = match record.osu_profile() {
        Some((username, mode)) if !mode.is_empty() => format!("{username} ({mode})"),
        Some((username, _)) => username.to_string(),
        None => "not linked".to_string(),
    };
    format!("Warnings: {}\nosu!: {osu}", record.warn_count)
}

/// Show the stored profile for yourself or another user
#[poise::command(slash_command, prefix_command)]
pub(crate) async fn profile(
    ctx: Context<'_>,
    #[description = "Selected user"] user: Option<serenity::User>,
) -> Result<(), Error> {
    let target = user.as_ref().unwrap_or_else(|| ctx.author());
    let record = ctx
        .data()
        .db
        .get_or_create_user(&identity_of(target))
        .await?;
    let title = format!("{}'s profile", target.name);
    let body = describe(&record);
    ctx.send(|r| r.embed(|e| e.title(title).description(body)))
        .await?;
    Ok(())
}

#[poise::command(slash_command, prefix_command, subcommands("add", "clear"))]
pub(crate) async fn warn(ctx: Context<'_>) -> Result<(), Error> {
    ctx.say("Use `warn add` or `warn clear`").await?;
    Ok(())
}

/// Warn a member
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "KICK_MEMBERS"
)]
async fn add(
    ctx: Context<'_>,
    #[description = "Member to warn"] user: serenity::User,
    #[description = "Reason for the warning"] reason: Option<String>,
) -> Result<(), Error> {
    let record = ctx.data().db.add_warning(&identity_of(&user)).await?;
    let mut reply = format!(
        "{} has been warned, they now have {} warning(s).",
        user.mention(),
        record.warn_count
    );
    if let Some(reason) = reason {
        reply.push_str(&format!("\nReason: {reason}"));
    }
    ctx.say(reply).await?;
    Ok(())
}

/// Clear every warning of a member
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "KICK_MEMBERS"
)]
async fn clear(
    ctx: Context<'_>,
    #[description = "Member to pardon"] user: serenity::User,
) -> Result<(), Error> {
    ctx.data().db.clear_warnings(&identity_of(&user)).await?;
    ctx.say(format!("Cleared all warnings of {}.", user.mention()))
        .await?;
    Ok(())
}

#[poise::command(slash_command, prefix_command, subcommands("set"))]
pub(crate) async fn osu(ctx: Context<'_>) -> Result<(), Error> {
    ctx.say("Use `osu set` to link your osu! account").await?;
    Ok(())
}

/// Link your osu! account
#[poise::command(slash_command, prefix_command)]
async fn set(
    ctx: Context<'_>,
    #[description = "osu! username"] username: String,
    #[description = "Default game mode"] mode: OsuMode,
) -> Result<(), Error> {
    ctx.defer_ephemeral().await?;
    let Some(username) = validate_osu_username(&username) else {
        ctx.say(format!(
            "osu! usernames are 1 to {MAX_OSU_USERNAME_LEN} characters long"
        ))
        .await?;
        return Ok(());
    };
    let record = ctx
        .data()
        .db
        .set_osu_profile(
            &identity_of(ctx.author()),
            username,
            mode.as_str().to_string(),
        )
        .await?;
    ctx.say(format!("Linked! {}", describe(&record).replace('\n', ", ")))
        .await?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn record(osu_username: &str, osu_mode: &str, warn_count: i16) -> user::Model {
        user::Model {
            discord_id: 1,
            warn_count,
            osu_username: osu_username.to_string(),
            osu_mode: osu_mode.to_string(),
        }
    }

    #[test]
    fn usernames_are_trimmed() {
        assert_eq!(
            validate_osu_username("  peppy "),
            Some("peppy".to_string())
        );
    }

    #[test]
    fn username_length_bounds() {
        assert_eq!(validate_osu_username("   "), None);
        assert!(validate_osu_username(&"a".repeat(32)).is_some());
        assert_eq!(validate_osu_username(&"a".repeat(33)), None);
    }

    #[test]
    fn fresh_record_reads_as_unlinked() {
        assert_eq!(describe(&record("", "", 0)), "Warnings: 0\nosu!: not linked");
    }

    #[test]
    fn linked_record_shows_mode() {
        assert_eq!(
            describe(&record("peppy", "taiko", 3)),
            "Warnings: 3\nosu!: peppy (taiko)"
        );
    }

    #[test]
    fn modes_store_api_names() {
        let names: Vec<_> = [OsuMode::Osu, OsuMode::Taiko, OsuMode::Fruits, OsuMode::Mania]
            .into_iter()
            .map(OsuMode::as_str)
            .collect();

        assert_eq!(names, ["osu", "taiko", "fruits", "mania"]);
    }
}
