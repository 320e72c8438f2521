mod user;

use std::collections::HashSet;

use lilia_db::{DiscordIdentity, LiliaDb};
use poise::{builtins::HelpConfiguration, serenity_prelude as serenity};
use tracing::{error, info, warn};

use crate::config::Config;

type Error = Box<dyn std::error::Error + Send + Sync>;
type Context<'a> = poise::Context<'a, Data, Error>;
// User data, which is stored and accessible in all command invocations

pub(crate) struct Data {
    db: LiliaDb,
    blacklisted_users: HashSet<u64>,
}

impl Data {
    fn is_blacklisted(&self, user_id: u64) -> bool {
        self.blacklisted_users.contains(&user_id)
    }
}

fn identity_of(user: &serenity::User) -> DiscordIdentity {
    DiscordIdentity::new(user.id.0, user.name.clone())
}

#[poise::command(slash_command, prefix_command)]
async fn help(
    ctx: Context<'_>,
    #[description = "Specific command to show help for"] command: Option<String>,
) -> Result<(), Error> {
    let config = HelpConfiguration {
        extra_text_at_bottom: "lilia",
        ..Default::default()
    };
    poise::builtins::help(ctx, command.as_deref(), config).await?;
    Ok(())
}

#[poise::command(prefix_command, owners_only)]
async fn register(ctx: Context<'_>) -> Result<(), Error> {
    poise::builtins::register_application_commands_buttons(ctx).await?;
    Ok(())
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx } => {
            error!(
                command = %ctx.command().qualified_name,
                user = ctx.author().id.0,
                "command failed: {error}"
            );
            if let Err(e) = ctx.say("Something went wrong, try again later.").await {
                error!("unable to report command failure {e:?}");
            }
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                error!("error while handling framework error {e:?}");
            }
        }
    }
}

pub(crate) async fn start_discord(db: LiliaDb, config: Config) -> Result<(), serenity::Error> {
    let Config {
        discord_token,
        prefix,
        blacklisted_users,
        ..
    } = config;
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                help(),
                register(),
                user::profile(),
                user::warn(),
                user::osu(),
            ],
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(prefix),
                ..Default::default()
            },
            command_check: Some(|ctx| {
                Box::pin(async move {
                    let blocked = ctx.data().is_blacklisted(ctx.author().id.0);
                    if blocked {
                        warn!(user = ctx.author().id.0, "ignoring blacklisted user");
                    }
                    Ok(!blocked)
                })
            }),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .token(discord_token)
        .intents(
            serenity::GatewayIntents::non_privileged() | serenity::GatewayIntents::MESSAGE_CONTENT,
        )
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!(user = %ready.user.name, "connected to discord");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(Data {
                    db,
                    blacklisted_users,
                })
            })
        });

    framework.run().await
}

