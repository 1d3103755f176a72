//! Conversation history command.

use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use crate::state::AppState;

/// Print the messages exchanged between two users, oldest first.
pub async fn show_history(
    state: &AppState,
    user_a: &str,
    user_b: &str,
    limit: u32,
    json: bool,
) -> anyhow::Result<()> {
    let messages = state
        .chat_service
        .conversation_history(user_a, user_b, limit)
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&messages)?);
        return Ok(());
    }

    if messages.is_empty() {
        println!();
        println!(
            "  No messages between {} and {}",
            style(user_a).cyan(),
            style(user_b).cyan()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Sent").fg(Color::White),
        Cell::new("From").fg(Color::White),
        Cell::new("To").fg(Color::White),
        Cell::new("Message").fg(Color::White),
    ]);

    for msg in &messages {
        table.add_row(vec![
            Cell::new(msg.sent_at.format("%Y-%m-%d %H:%M:%S").to_string()),
            Cell::new(&msg.sender).fg(Color::Cyan),
            Cell::new(&msg.recipient),
            Cell::new(&msg.content),
        ]);
    }

    println!("{table}");
    Ok(())
}
