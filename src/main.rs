use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use interfaith_guide::GuidanceService;
use interfaith_guide::config::Config;
use interfaith_guide::content;
use interfaith_guide::fetchers::Source;
use interfaith_guide::models::{Language, Preferences, Religion, Role, Theme};
use interfaith_guide::session::{SessionContext, TurnOutcome};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::load().context("failed to load configuration")?;
    let service = GuidanceService::new(&config).context("failed to initialize service")?;

    let mut session = SessionContext::new(Preferences::default());
    tracing::info!(session = %session.id, "Session started");

    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(
            b"Multi-religious guidance. Type a question, or /help for commands.\n",
        )
        .await?;

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let line = line.trim().to_string();
        let output = if let Some(rest) = line.strip_prefix('/') {
            let (cmd, arg) = match rest.split_once(' ') {
                Some((cmd, arg)) => (cmd, arg.trim()),
                None => (rest, ""),
            };
            match run_command(&service, &mut session, cmd, arg).await {
                Ok(Some(text)) => text,
                Ok(None) => break,
                Err(e) => format!("error: {e:#}"),
            }
        } else {
            match service.handle_user_turn(&mut session, &line).await {
                Ok(TurnOutcome::Ignored) => continue,
                Ok(TurnOutcome::Replied) => session
                    .transcript
                    .last()
                    .filter(|m| m.role == Role::Assistant)
                    .map(|m| m.content.clone())
                    .unwrap_or_default(),
                Err(e) => format!("error: {e}"),
            }
        };

        stdout.write_all(output.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
    }

    tracing::info!(session = %session.id, "Session ended");
    Ok(())
}

async fn run_command(
    service: &GuidanceService,
    session: &mut SessionContext,
    cmd: &str,
    arg: &str,
) -> Result<Option<String>> {
    let religion = session.preferences.religion;
    let language = session.preferences.language;

    let output = match cmd {
        "help" => HELP.to_string(),
        "prayer" => service.prayer_of_the_day(religion, language).await?,
        "quote" => content::quote(religion).to_string(),
        "meditate" => content::meditation_guide(religion).to_string(),
        "verse" => {
            let verse = service.daily_verse(religion).await;
            annotate(verse.value, verse.source)
        }
        "news" => {
            let news = service.news(religion).await;
            annotate(news.value.join("\n"), news.source)
        }
        "music" => {
            let music = service.background_music(religion).await;
            annotate(music.value, music.source)
        }
        "events" => {
            let events = content::upcoming_events(religion);
            if events.is_empty() {
                "No upcoming events available.".to_string()
            } else {
                events.join("\n")
            }
        }
        "times" => {
            let times = content::prayer_times(religion);
            if times.is_empty() {
                format!("No fixed prayer times for {religion}.")
            } else {
                times.join("\n")
            }
        }
        "links" => format!(
            "Donate: {}\nForum: {}\nVideo: {}",
            content::donation_link(religion),
            content::forum_link(religion),
            content::video_url(religion),
        ),
        "religion" => match Religion::parse(arg) {
            Some(r) => {
                session.preferences.religion = r;
                format!("Religion set to {r}.")
            }
            None => format!("Unknown religion '{arg}'."),
        },
        "language" => match Language::parse(arg) {
            Some(l) => {
                session.preferences.language = l;
                format!("Language set to {l}.")
            }
            None => format!("Unknown language '{arg}'."),
        },
        "theme" => match Theme::parse(arg) {
            Some(t) => {
                session.preferences.theme = t;
                format!("Theme set to {}.", t.as_str())
            }
            None => format!("Unknown theme '{arg}'."),
        },
        "profile" => {
            if arg.is_empty() {
                format!("Welcome, {}!", session.profile.username)
            } else {
                session.save_username(arg);
                "Profile saved!".to_string()
            }
        }
        "quit" | "exit" => return Ok(None),
        other => format!("Unknown command '/{other}'. Try /help."),
    };

    Ok(Some(output))
}

fn annotate(value: String, source: Source) -> String {
    match source {
        Source::Live => value,
        Source::Fallback => format!("{value}\n(offline fallback)"),
    }
}

const HELP: &str = "\
Commands:
  /prayer              Prayer of the Day for your religion and language
  /quote               Inspirational quote
  /meditate            Guided meditation text
  /verse               Daily verse or scripture
  /news                Recent religious news
  /events              Upcoming religious events
  /times               Daily prayer times
  /links               Donation, forum and video links
  /music               Background music URL
  /religion <name>     Select religion
  /language <name>     Select language
  /theme <name>        Select theme (Light, Dark, Blue, Green)
  /profile [name]      Show or save your profile name
  /quit                Exit
Anything else is sent to the assistant as a question.";
