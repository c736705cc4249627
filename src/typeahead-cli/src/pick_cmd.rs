//! `typeahead pick`: interactive picker in the alternate screen.

use std::io::{Stdout, stdout};
use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, Event, EventStream, KeyEventKind,
};
use futures::StreamExt;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Clear, Paragraph};
use tracing::info;
use typeahead::{DefaultFormatter, Typeahead};
use typeahead_tui::theme::TEXT_MUTED;
use typeahead_tui::{KeyAction, Picker, PickerStatus, map_key};

use crate::build_provider;
use crate::cli::PickArgs;
use crate::config::AppConfig;

const HELP: &str = "enter select   tab accept   esc cancel   ctrl+u clear";

pub async fn run(args: PickArgs, config: AppConfig) -> Result<()> {
    let provider = build_provider(&config)?;
    if provider.is_none() {
        info!("No search source configured; typing will not search");
    }

    let mut selector = Typeahead::new(config.selector.clone(), provider, Arc::new(DefaultFormatter));
    selector.set_props(args.value.as_deref(), args.display_value.as_deref());
    let mut picker = Picker::new(selector, args.label);

    let status = run_terminal(&mut picker).await?;
    info!(?status, "Picker finished");

    if status == PickerStatus::Done
        && let Some(change) = picker.last_change()
    {
        println!("{}", serde_json::to_string(&change)?);
    }
    Ok(())
}

async fn run_terminal(picker: &mut Picker) -> Result<PickerStatus> {
    crossterm::terminal::enable_raw_mode()?;
    let mut stdout = stdout();
    crossterm::execute!(
        stdout,
        crossterm::terminal::EnterAlternateScreen,
        EnableBracketedPaste,
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_loop(&mut terminal, picker).await;

    // Cleanup
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        crossterm::terminal::LeaveAlternateScreen,
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    picker: &mut Picker,
) -> Result<PickerStatus> {
    let mut events = EventStream::new();
    picker.focus();

    loop {
        terminal.draw(|f| render(f, picker))?;

        let action = tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind != KeyEventKind::Release => map_key(key),
                Some(Ok(Event::Paste(text))) => Some(KeyAction::Paste(text)),
                Some(Ok(_)) => None,
                Some(Err(e)) => return Err(e.into()),
                None => return Ok(PickerStatus::Cancelled),
            },
            _ = picker.next_wakeup(), if picker.has_pending() => None,
        };

        if let Some(action) = action {
            let status = picker.handle_action(action);
            if status != PickerStatus::Editing {
                return Ok(status);
            }
        }
    }
}

fn render(f: &mut ratatui::Frame, picker: &Picker) {
    let area = f.area();
    f.render_widget(Clear, area);
    if area.height < 3 || area.width < 10 {
        return;
    }

    let content = Rect::new(area.x + 2, area.y + 1, area.width - 4, area.height - 2);
    let view = picker.view();
    let height = view.desired_height().min(content.height.saturating_sub(2)).max(1);
    f.render_widget(view, Rect::new(content.x, content.y, content.width, height));

    let help = Paragraph::new(Line::styled(HELP, Style::default().fg(TEXT_MUTED)));
    f.render_widget(help, Rect::new(content.x, content.bottom() - 1, content.width, 1));
}
