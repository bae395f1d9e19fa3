use anyhow::Context;
use mimalloc::MiMalloc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use seat_booking::{
    commands::Command,
    config::{AppConfig, Config},
    page::{Flow, Page},
    services::BookingApi,
    AppState,
};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

// Без слайдера таймер всё равно нужен select!, просто тикает редко
const IDLE_TICK: Duration = Duration::from_secs(3600);

fn init_tracing(app: &AppConfig) {
    let registry = tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(&app.rust_log));
    // stdout занят страницей, логи уходят в stderr
    if app.log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn flush<A: BookingApi + 'static>(page: &mut Page<A>, redraw: bool) {
    for line in page.take_feedback() {
        println!("{line}");
    }
    if redraw {
        print!("{}", page.render());
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env().context("Failed to load configuration")?;
    init_tracing(&config.app);

    info!(
        environment = %config.app.environment,
        movie_id = config.page.movie_id,
        api = %config.api.base_url,
        "Starting seat booking page"
    );

    let state = AppState::new(config).context("Failed to create booking API client")?;
    let mut page = state.into_page().await.context("Failed to load booked seats")?;

    let mut ticker = tokio::time::interval(page.tick_interval().unwrap_or(IDLE_TICK));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    flush(&mut page, true);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    // Ввод закончился, но начатый платёж доводим до ответа сервера
                    while page.request_in_flight() {
                        let event = page.next_event().await;
                        debug!(?event, "Background work finished");
                        flush(&mut page, true);
                    }
                    break;
                };
                match line.parse::<Command>() {
                    Ok(command) => {
                        let redraw = !matches!(command, Command::Help);
                        if page.handle(command) == Flow::Quit {
                            break;
                        }
                        flush(&mut page, redraw);
                    }
                    Err(e) => {
                        warn!(%line, "Rejected command");
                        println!("{e}");
                    }
                }
            }
            event = page.next_event() => {
                debug!(?event, "Background work finished");
                flush(&mut page, true);
            }
            _ = ticker.tick() => {
                if page.tick() {
                    debug!("Banner rotated");
                }
            }
        }
    }

    info!("Bye");
    Ok(())
}
