//! `loglens history`: print the persisted transcript.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use loglens_core::transcript::TranscriptRepository;
use loglens_types::chat::{ChatTurn, TurnRole, TurnView};

use crate::state::AppState;

/// Longest content shown per row before truncation.
const PREVIEW_CHARS: usize = 80;

pub async fn show_history(state: &AppState, json: bool) -> Result<()> {
    let turns = state.chat_service.history().await?;

    if json {
        let views: Vec<TurnView> = turns.into_iter().map(TurnView::from).collect();
        println!("{}", serde_json::to_string_pretty(&views)?);
        return Ok(());
    }

    if turns.is_empty() {
        println!();
        println!(
            "  No chat history yet. Upload a log with {} and ask a question.",
            style("POST /upload").cyan()
        );
        println!();
        return Ok(());
    }

    println!("{}", render_table(&turns));

    let count = state.chat_service.transcript().count().await?;
    println!();
    println!("  {} turns in {}", style(count).bold(), state.data_dir.display());
    println!();
    Ok(())
}

fn render_table(turns: &[ChatTurn]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("#").fg(Color::White),
        Cell::new("Role").fg(Color::White),
        Cell::new("Content").fg(Color::White),
    ]);

    for turn in turns {
        let role_cell = match turn.role {
            TurnRole::User => Cell::new("user").fg(Color::Cyan),
            TurnRole::Assistant => Cell::new("assistant").fg(Color::Green),
        };
        table.add_row(vec![
            Cell::new(turn.id),
            role_cell,
            Cell::new(preview(&turn.content)),
        ]);
    }

    table
}

/// First line of `content`, cut to [`PREVIEW_CHARS`] characters.
fn preview(content: &str) -> String {
    let first_line = content.lines().next().unwrap_or("");
    let truncated = first_line.chars().count() > PREVIEW_CHARS || content.lines().nth(1).is_some();

    let mut text: String = first_line.chars().take(PREVIEW_CHARS).collect();
    if truncated {
        text.push_str("...");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_single_line() {
        assert_eq!(preview("what failed?"), "what failed?");
    }

    #[test]
    fn test_preview_multiline_is_marked() {
        assert_eq!(preview("## Errors\n- ERROR at 10:02"), "## Errors...");
    }

    #[test]
    fn test_preview_long_line_is_cut_on_char_boundary() {
        let long = "é".repeat(100);
        let shown = preview(&long);
        assert_eq!(shown.chars().count(), PREVIEW_CHARS + 3);
        assert!(shown.ends_with("..."));
    }

    #[test]
    fn test_render_table_has_a_row_per_turn() {
        let turns = vec![
            ChatTurn {
                id: 1,
                role: TurnRole::User,
                content: "what failed?".to_string(),
            },
            ChatTurn {
                id: 2,
                role: TurnRole::Assistant,
                content: "It looks like an error.".to_string(),
            },
        ];
        let table = render_table(&turns);
        assert_eq!(table.row_iter().count(), 2);
        let rendered = table.to_string();
        assert!(rendered.contains("assistant"));
        assert!(rendered.contains("It looks like an error."));
    }
}
