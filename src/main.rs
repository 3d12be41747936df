use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers}, execute, terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen}};
use ratatui::{backend::CrosstermBackend, Terminal, widgets::{Block, Borders, List, ListItem, Paragraph}, layout::{Layout, Constraint, Direction}, style::{Style, Modifier, Color}};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use todoapp::application::controller::TodoListController;
use todoapp::domain::{api::TodoApi, todo::{Todo, UpdateTodo}};
use todoapp::infrastructure::http_api::HttpTodoApi;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let base_url = std::env::var("TODO_API_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    let user_id: i64 = std::env::var("TODO_USER_ID").ok().and_then(|v| v.parse().ok()).unwrap_or(1);
    let api = Arc::new(HttpTodoApi::new(&base_url)?);

    let mut controller = TodoListController::new(user_id);
    match api.list_todos().await {
        Ok(todos) => controller.load(todos),
        Err(err) => tracing::warn!(error = %err, "initial todo load failed, starting empty"),
    }

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, controller, api).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    res
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Filter { All, Active, Completed }

impl Filter {
    fn label(self) -> &'static str {
        match self { Filter::All => "All", Filter::Active => "Active", Filter::Completed => "Completed" }
    }

    fn next(self) -> Self {
        match self { Filter::All => Filter::Active, Filter::Active => Filter::Completed, Filter::Completed => Filter::All }
    }

    fn prev(self) -> Self {
        match self { Filter::All => Filter::Completed, Filter::Active => Filter::All, Filter::Completed => Filter::Active }
    }

    fn admits(self, todo: &Todo) -> bool {
        match self { Filter::All => true, Filter::Active => !todo.completed, Filter::Completed => todo.completed }
    }
}

struct App<A: TodoApi> {
    api: Arc<A>,
    controller: TodoListController,
    filter: Filter,
    submit_tx: mpsc::UnboundedSender<Result<Todo>>,
    submit_rx: mpsc::UnboundedReceiver<Result<Todo>>,
    input_focused: bool,
    last_tick: Instant,
}

impl<A: TodoApi> App<A> {
    fn submit(&mut self) {
        let Some(payload) = self.controller.begin_submit() else { return };
        // Input is disabled until the result arrives; focus follows it away.
        self.input_focused = false;
        let api = Arc::clone(&self.api);
        let tx = self.submit_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(api.create_todo(payload).await);
        });
    }

    fn toggle_all(&mut self) {
        let completed = self.controller.toggle_all();
        // Local flip is authoritative; backend sync is best-effort.
        for todo in self.controller.todos() {
            let api = Arc::clone(&self.api);
            let id = todo.id;
            tokio::spawn(async move {
                let patch = UpdateTodo { title: None, completed: Some(completed) };
                if let Err(err) = api.update_todo(id, patch).await {
                    tracing::warn!(id, error = %err, "toggle sync failed");
                }
            });
        }
    }

    fn clear_completed(&mut self) {
        if !self.controller.has_completed() {
            return;
        }
        for todo in self.controller.delete_completed() {
            let api = Arc::clone(&self.api);
            tokio::spawn(async move {
                if let Err(err) = api.delete_todo(todo.id).await {
                    tracing::warn!(id = todo.id, error = %err, "delete sync failed");
                }
            });
        }
    }
}

async fn run_app<A: TodoApi>(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, controller: TodoListController, api: Arc<A>) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let (submit_tx, submit_rx) = mpsc::unbounded_channel();
    let mut app = App { api, controller, filter: Filter::All, submit_tx, submit_rx, input_focused: false, last_tick: Instant::now() };

    loop {
        // Deliver finished create requests back into the controller.
        while let Ok(result) = app.submit_rx.try_recv() {
            app.controller.finish_submit(result);
        }
        if app.controller.take_focus_request() {
            app.input_focused = true;
        }

        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Length(1),
                    Constraint::Min(1),
                    Constraint::Length(3),
                ])
                .split(f.size());

            let input_style = if app.controller.input_disabled() {
                Style::default().add_modifier(Modifier::DIM)
            } else {
                Style::default()
            };
            let input = Paragraph::new(app.controller.title())
                .style(input_style)
                .block(Block::default().borders(Borders::ALL).title("What needs to be done?"));
            f.render_widget(input, chunks[0]);
            if app.input_focused && !app.controller.input_disabled() {
                let col = chunks[0].x + 1 + app.controller.title().chars().count() as u16;
                f.set_cursor(col.min(chunks[0].right().saturating_sub(2)), chunks[0].y + 1);
            }

            let error_text = app.controller.error().map(|e| e.to_string()).unwrap_or_default();
            let error_line = Paragraph::new(error_text).style(Style::default().fg(Color::Red));
            f.render_widget(error_line, chunks[1]);

            let mut items: Vec<ListItem> = app
                .controller
                .todos()
                .iter()
                .filter(|t| app.filter.admits(t))
                .map(|t| {
                    let mark = if t.completed { "[x]" } else { "[ ]" };
                    ListItem::new(format!("{} {}", mark, t.title))
                })
                .collect();
            // The in-flight placeholder renders under the list, visibly tentative.
            if let Some(pending) = app.controller.pending() {
                items.push(
                    ListItem::new(format!("[ ] {} …", pending.title))
                        .style(Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC)),
                );
            }
            let list = List::new(items)
                .block(Block::default().borders(Borders::ALL).title(format!("todos [{}]", app.filter.label())));
            f.render_widget(list, chunks[2]);

            // Footer and toggle-all only exist once there is at least one todo.
            let footer_text = if app.controller.todos().is_empty() {
                "Esc: quit".to_string()
            } else {
                let clear = if app.controller.has_completed() {
                    "Ctrl-D: clear completed"
                } else {
                    "Ctrl-D: clear completed (none)"
                };
                format!(
                    "{} items left  |  Filter: {} (←/→)  |  Ctrl-A: toggle all{}  |  {}  |  Esc: quit",
                    app.controller.remaining_count(),
                    app.filter.label(),
                    if app.controller.all_completed() { " *" } else { "" },
                    clear,
                )
            };
            let footer = Paragraph::new(footer_text)
                .block(Block::default().borders(Borders::ALL).title("footer"));
            f.render_widget(footer, chunks[3]);
        })?;

        let timeout = tick_rate.saturating_sub(app.last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only act on key presses; ignore repeats and releases to prevent duplicate input
                if key.kind != KeyEventKind::Press { continue; }
                let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
                match key.code {
                    KeyCode::Esc => break,
                    KeyCode::Enter => app.submit(),
                    KeyCode::Left => app.filter = app.filter.prev(),
                    KeyCode::Right => app.filter = app.filter.next(),
                    KeyCode::Char('a') if ctrl => {
                        if !app.controller.todos().is_empty() {
                            app.toggle_all();
                        }
                    }
                    KeyCode::Char('d') if ctrl => app.clear_completed(),
                    KeyCode::Backspace => {
                        let mut title = app.controller.title().to_owned();
                        title.pop();
                        app.controller.set_title(title);
                    }
                    KeyCode::Char(c) if !ctrl => {
                        let mut title = app.controller.title().to_owned();
                        title.push(c);
                        app.controller.set_title(title);
                    }
                    _ => {}
                }
            }
        }
        if app.last_tick.elapsed() >= tick_rate {
            app.last_tick = Instant::now();
        }
    }
    Ok(())
}
