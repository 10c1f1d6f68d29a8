//! CLI output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::auth::models::UserInfo;

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn warn(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Print the signed-in identity
pub fn print_user_detail(user: &UserInfo) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Field").fg(Color::Cyan),
            Cell::new("Value").fg(Color::Cyan),
        ]);

    table.add_row(vec![
        Cell::new("Name"),
        Cell::new(format!("{} {}", user.first_name, user.last_name)),
    ]);
    table.add_row(vec![Cell::new("Email"), Cell::new(&user.email)]);
    table.add_row(vec![Cell::new("Role"), Cell::new(&user.role)]);
    table.add_row(vec![Cell::new("Id"), Cell::new(&user.id)]);

    println!("{table}");
}
