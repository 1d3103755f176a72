//! User account commands.

use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::Password;

use crate::state::AppState;

/// Register a user, prompting for the password when not given.
pub async fn register_user(
    state: &AppState,
    username: &str,
    email: Option<&str>,
    password: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let password = match password {
        Some(p) => p,
        None => Password::new()
            .with_prompt(format!("Password for {}", style(username).bold()))
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()?,
    };

    let user = state
        .auth_service
        .register(username, &password, email)
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&user)?);
    } else {
        println!();
        println!(
            "  {} Registered {} (id {})",
            style("✓").green().bold(),
            style(&user.username).cyan(),
            user.id
        );
        println!();
    }

    Ok(())
}

/// List all registered users.
pub async fn list_users(state: &AppState, json: bool) -> anyhow::Result<()> {
    let users = state.auth_service.list_users().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&users)?);
        return Ok(());
    }

    if users.is_empty() {
        println!();
        println!("  No users yet. Register one with {}", style("chatapp register <name>").cyan());
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("ID").fg(Color::White),
        Cell::new("Username").fg(Color::White),
        Cell::new("Email").fg(Color::White),
        Cell::new("Status").fg(Color::White),
        Cell::new("Created").fg(Color::White),
    ]);

    for user in &users {
        let status = if user.is_active {
            Cell::new("● active").fg(Color::Green)
        } else {
            Cell::new("○ inactive").fg(Color::DarkGrey)
        };
        table.add_row(vec![
            Cell::new(user.id),
            Cell::new(&user.username),
            Cell::new(user.email.as_deref().unwrap_or("-")),
            status,
            Cell::new(user.created_at.format("%Y-%m-%d %H:%M").to_string()),
        ]);
    }

    println!("{table}");
    Ok(())
}
