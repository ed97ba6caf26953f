use std::io::{BufRead, Write};

use anyhow::Result;
use chess_client::board::CoordinateMapper;
use chess_client::game::UserCommand;
use chess_client::network::WsSession;
use chess_client::settings::ClientSettings;
use chess_client::storage::{JsonFileStore, MemoryStore, PreferenceStore, DISPLAY_NAME_KEY};
use chess_client::theme::ColorTheme;
use chess_client::ui::{compose_screen, parse_line, surface_mapper, ConsoleInput, ParseError, HELP_TEXT};
use protocol::Color;
use tokio::sync::{mpsc, watch};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = ClientSettings::load();
    let save_result = ClientSettings::save_default_if_missing();
    let settings = settings.with_args(std::env::args().skip(1));

    // 初始化日志（输出到 stderr，stdout 留给棋盘）
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(settings.log_directive())),
        )
        .init();

    if let Err(e) = save_result {
        tracing::warn!("Failed to write default settings: {:#}", e);
    }

    info!("Connecting to {}", settings.server_url);
    let mut session = WsSession::connect(&settings.server_url, settings.keepalive_interval()).await?;

    let store: Box<dyn PreferenceStore + Send> = match JsonFileStore::open_default() {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::warn!("Preferences unavailable, keeping them in memory: {:#}", e);
            Box::new(MemoryStore::new())
        }
    };

    let (command_tx, command_rx) = mpsc::channel(32);
    let (color_tx, color_rx) = watch::channel(None::<Color>);
    let mapper = surface_mapper(&settings);

    // 阻塞读取放在独立线程，主循环结束时不需要等待它
    std::thread::spawn(move || read_console(command_tx, color_rx, store, mapper));

    let theme = ColorTheme::classic();
    session
        .run(command_rx, |machine| {
            color_tx.send_replace(machine.session().color);
            print!("\x1b[2J\x1b[H{}", compose_screen(machine, &settings, &theme));
            if let Err(e) = std::io::stdout().flush() {
                tracing::warn!("Failed to flush stdout: {}", e);
            }
        })
        .await?;

    info!("客户端已退出");
    Ok(())
}

/// 逐行读取终端命令并交给会话；输入结束时退出
fn read_console(
    commands: mpsc::Sender<UserCommand>,
    color: watch::Receiver<Option<Color>>,
    mut store: Box<dyn PreferenceStore + Send>,
    mapper: CoordinateMapper,
) {
    for line in std::io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::error!("Failed to read stdin: {}", e);
                break;
            }
        };

        let current_color = *color.borrow();
        let batch = match parse_line(&line, &mapper, current_color) {
            Ok(ConsoleInput::Send(batch)) => batch,
            Ok(ConsoleInput::Create) => vec![UserCommand::CreateRoom {
                name: store.display_name(),
            }],
            Ok(ConsoleInput::SetName(name)) => {
                match store.set(DISPLAY_NAME_KEY, &name) {
                    Ok(()) => println!("display name set to {}", name),
                    Err(e) => tracing::warn!("Failed to save display name: {:#}", e),
                }
                continue;
            }
            Ok(ConsoleInput::Help) => {
                println!("{}", HELP_TEXT);
                continue;
            }
            Err(ParseError::Empty) => continue,
            Err(e) => {
                println!("{} (type `help` for commands)", e);
                continue;
            }
        };

        for cmd in batch {
            if commands.blocking_send(cmd).is_err() {
                return;
            }
        }
    }

    let _ = commands.blocking_send(UserCommand::Exit);
}
