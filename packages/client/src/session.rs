//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use liar_auction_server::infrastructure::dto::websocket::ServerMessage;

use crate::{
    command::{InputCommand, parse_command},
    error::ClientError,
    formatter::MessageFormatter,
    ui::{redisplay_prompt, spawn_line_reader},
};

/// Render one text frame from the server
fn render_frame(text: &str) -> String {
    match serde_json::from_str::<ServerMessage>(text) {
        Ok(event) => MessageFormatter::format_server_message(&event),
        Err(_) => MessageFormatter::format_raw_message(text),
    }
}

/// Run the WebSocket client session until the player quits or the connection drops
pub async fn run_client_session(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to Liar Auction server!");
    println!("\nType `help` for the list of commands. Press Ctrl+C to exit.\n");

    let (mut write, mut read) = ws_stream.split();

    // Server events → terminal. Resolves to true when the connection was lost.
    let mut read_task = tokio::spawn(async move {
        loop {
            match read.next().await {
                Some(Ok(Message::Text(text))) => {
                    print!("{}", render_frame(text.as_str()));
                    redisplay_prompt();
                }
                Some(Ok(Message::Close(_))) | None => {
                    tracing::info!("Server closed the connection");
                    return true;
                }
                Some(Err(e)) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    return true;
                }
                Some(Ok(_)) => {}
            }
        }
    });

    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();
    spawn_line_reader(input_tx);

    // Typed commands → server. Resolves to true when sending failed.
    let mut write_task = tokio::spawn(async move {
        while let Some(line) = input_rx.recv().await {
            let message = match parse_command(&line) {
                Ok(InputCommand::Send(message)) => message,
                Ok(InputCommand::Help) => {
                    print!("{}", MessageFormatter::format_help());
                    continue;
                }
                Ok(InputCommand::Quit) => break,
                Err(e) => {
                    println!("{}", e);
                    continue;
                }
            };

            let json = match serde_json::to_string(&message) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize {:?}: {}", message, e);
                    continue;
                }
            };
            if let Err(e) = write.send(Message::Text(json.into())).await {
                tracing::warn!("Failed to send command: {}", e);
                return true;
            }
        }

        write.close().await.ok();
        false
    });

    // Whichever side finishes first ends the session
    let connection_lost = tokio::select! {
        lost = &mut read_task => {
            write_task.abort();
            lost.unwrap_or(false)
        }
        lost = &mut write_task => {
            read_task.abort();
            lost.unwrap_or(false)
        }
    };

    if connection_lost {
        return Err(Box::new(ClientError::ConnectionError(
            "Connection lost".to_string(),
        )));
    }
    Ok(())
}
