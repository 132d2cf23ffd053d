//! # tutorboard
//!
//! Terminal slideshow client with an assistant support chat. Pages through a
//! fixed set of images and, on request, opens a conversation about the
//! active image over one long-lived WebSocket connection to the assistant
//! service.

mod controller;
mod images;
mod net;
mod state;

use std::path::PathBuf;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::controller::{Controller, FrameSink};
use crate::images::ImageSet;
use crate::net::session::ConnectionSession;
use crate::state::slideshow::Direction;

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Images(#[from] images::ImageError),
    #[error("failed to read stdin: {0}")]
    Stdin(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "tutorboard", about = "Slideshow with an assistant support chat")]
struct Cli {
    /// Assistant WebSocket endpoint.
    #[arg(
        long,
        env = "TUTORBOARD_ENDPOINT",
        default_value = "ws://127.0.0.1:8000/ask/"
    )]
    endpoint: String,

    /// Directory holding the slideshow images, ordered by file name.
    #[arg(long, env = "TUTORBOARD_IMAGES", default_value = "images")]
    images: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let image_set = ImageSet::from_dir(&cli.images).await?;
    let (session, mut inbound) = ConnectionSession::connect(&cli.endpoint);
    let mut app = Controller::new(image_set, session.clone());

    println!("slide 1/{}", app.image_count());
    println!("commands: /left /right /support /quit; anything else is a chat message");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut inbound_done = false;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !handle_line(&mut app, line.trim()).await {
                    break;
                }
            }
            payload = inbound.recv(), if !inbound_done => {
                match payload {
                    Some(payload) => {
                        app.on_inbound_frame(&payload);
                        print_last(&app);
                    }
                    None => {
                        tracing::info!("inbound stream ended");
                        inbound_done = true;
                    }
                }
            }
        }
    }

    session.close();
    Ok(())
}

/// Apply one REPL line to the controller. Returns `false` on `/quit`.
async fn handle_line<S: FrameSink>(app: &mut Controller<S>, line: &str) -> bool {
    match line {
        "/quit" => return false,
        "/left" => {
            app.navigate(Direction::Left);
            print_slide(app);
        }
        "/right" => {
            app.navigate(Direction::Right);
            print_slide(app);
        }
        "/support" => {
            app.request_support().await;
            if app.conversation().is_active() {
                println!("support session started, ask away");
            } else {
                println!("support request failed, try again");
            }
        }
        "" => {}
        text => {
            if app.conversation().is_active() {
                app.send_user_message(text);
                print_last(app);
            } else {
                println!("no support session; use /support first");
            }
        }
    }
    true
}

fn print_slide<S: FrameSink>(app: &Controller<S>) {
    println!("slide {}/{}", app.active_index() + 1, app.image_count());
}

fn print_last<S: FrameSink>(app: &Controller<S>) {
    if let Some(message) = app.conversation().messages().last() {
        let who = if message.is_user { "you" } else { "assistant" };
        println!("{who}> {}", message.text);
    }
}
