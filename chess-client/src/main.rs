use anyhow::Result;
use protocol::{Position, POLL_INTERVAL};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chess_client::render;
use chess_client::{ClickOutcome, ClientConfig, SyncClient};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("chess_client=info".parse()?))
        .init();

    let config = ClientConfig::load();
    let mut client = SyncClient::new(&config)?;

    println!("{}", render::board_text(client.session().state()));
    println!("{}", client.status());
    print_help();

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    let mut poll = tokio::time::interval(POLL_INTERVAL);
    poll.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !handle_command(&mut client, line.trim()).await {
                    break;
                }
            }
            _ = poll.tick(), if client.is_online() => {
                if client.poll_once().await {
                    println!("{}", render::board_text(client.session().state()));
                    println!("{}", client.status());
                }
            }
        }
    }

    Ok(())
}

/// Execute one command line; false means quit
async fn handle_command(client: &mut SyncClient, input: &str) -> bool {
    let mut parts = input.split_whitespace();
    let command = parts.next().unwrap_or("");

    match command {
        "" => {}
        "quit" | "exit" => return false,
        "help" => print_help(),
        "create" => {
            if client.create_room().await {
                if let Some(room_id) = client.room_id() {
                    println!("Share this code: {room_id}");
                }
            }
            println!("{}", client.status());
        }
        "join" => {
            let code = parts.next().unwrap_or("");
            if client.join_room(code).await {
                println!("{}", render::board_text(client.session().state()));
            }
            println!("{}", client.status());
        }
        "leave" => {
            client.leave();
            println!("{}", client.status());
        }
        "reset" => {
            client.reset().await;
            println!("{}", render::board_text(client.session().state()));
            println!("{}", client.status());
        }
        "room" => match client.room_id() {
            Some(room_id) => println!("Room code: {room_id}"),
            None => println!("Not in a room"),
        },
        "log" => {
            let state = client.session().state();
            if state.move_log.is_empty() {
                println!("No moves yet");
            } else {
                println!("{}", render::log_tail(state, state.move_log.len()));
            }
        }
        "board" => println!("{}", render::board_text(client.session().state())),
        square => match Position::from_algebraic(square) {
            Some(position) => {
                let outcome = client.click(position).await;
                report_outcome(client, &outcome);
            }
            None => println!("Unknown command: {square} (try help)"),
        },
    }
    true
}

fn report_outcome(client: &SyncClient, outcome: &ClickOutcome) {
    match outcome {
        ClickOutcome::Selected(position) => {
            let targets = render::square_list(client.session().targets());
            if targets.is_empty() {
                println!("Selected {position} (no moves)");
            } else {
                println!("Selected {position} -> {targets}");
            }
        }
        ClickOutcome::Moved(_) => {
            println!("{}", render::board_text(client.session().state()));
            if let Some(entry) = client.session().state().move_log.last() {
                println!("{entry}");
            }
            println!("{}", client.status());
        }
        ClickOutcome::Locked => println!("{}", client.status()),
        ClickOutcome::Cleared => println!("Selection cleared"),
        ClickOutcome::Ignored => {}
    }
}

fn print_help() {
    println!("Commands:");
    println!("  e2          select a piece or a target square");
    println!("  create      create an online room");
    println!("  join CODE   join a room by code");
    println!("  leave       leave the room (local only)");
    println!("  reset       reset the board");
    println!("  room        show the current room code");
    println!("  log         show the move log");
    println!("  board       redraw the board");
    println!("  quit        exit");
}
