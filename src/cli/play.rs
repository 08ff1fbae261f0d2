//! Play command implementation - Interactive TUI front line.
//!
//! The human commands faction 0; the heuristic flies every other faction.
//! Orders accumulate between keypresses and the turn only advances on
//! demand, with each combat event redrawn and held on screen briefly.

// CLI play uses intentional casts for display and timing
#![allow(clippy::cast_possible_truncation)]

use super::{CliError, ScenarioArg, resolve_seed};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io::{Stdout, stdout};
use std::thread;
use std::time::Duration;
use tessera::runner::{factions, standings, winner};
use tessera::scenario::Scenario;
use tessera::sim::process_turn;
use tessera::{BattleEvent, Board, Coord, Direction, NEUTRAL, TeamId, Tile};

/// The faction the keyboard commands.
const PLAYER_TEAM: TeamId = 0;

/// Troops added to an order per direction keypress.
const ORDER_STEP: i32 = 1;

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the TUI fails.
pub(crate) fn execute(
    scenario: ScenarioArg,
    seed: Option<u64>,
    turns: u32,
    speed: u64,
) -> Result<(), CliError> {
    let app = App::new(scenario.scenario(), resolve_seed(seed), turns, speed);
    run_tui(app)
}

/// App state for the TUI.
struct App {
    board: Board,
    rng: ChaCha8Rng,
    scenario: Scenario,
    seed: u64,
    teams: Vec<TeamId>,
    turn: u32,
    max_turns: u32,
    speed_ms: u64,
    battle_log: Vec<String>,
    over: bool,
}

/// Frame-scoped view of the app, usable mid-turn while the board itself
/// is lent out to the turn processor.
struct Hud<'a> {
    scenario: Scenario,
    seed: u64,
    turn: u32,
    max_turns: u32,
    speed_ms: u64,
    status: &'static str,
    over: bool,
    teams: &'a [TeamId],
    log: &'a [String],
}

impl App {
    fn new(scenario: Scenario, seed: u64, max_turns: u32, speed_ms: u64) -> Self {
        let board = scenario.build(seed);
        let teams = factions(&board);
        Self {
            board,
            rng: ChaCha8Rng::seed_from_u64(seed),
            scenario,
            seed,
            teams,
            turn: 0,
            max_turns,
            speed_ms: speed_ms.clamp(50, 2000),
            battle_log: Vec::new(),
            over: false,
        }
    }

    fn hud(&self, status: &'static str) -> Hud<'_> {
        Hud {
            scenario: self.scenario,
            seed: self.seed,
            turn: self.turn,
            max_turns: self.max_turns,
            speed_ms: self.speed_ms,
            status,
            over: self.over,
            teams: &self.teams,
            log: &self.battle_log,
        }
    }

    fn move_selection(&mut self, dir: Direction) {
        let next = dir.step(self.board.selection(), self.board.width(), self.board.height());
        if let Some(next) = next {
            self.board.set_selection(next).ok();
        }
    }

    /// Commit (or top up) an order from the selected tile. Keys only
    /// command the player's own tiles; everything else is inert.
    fn commit(&mut self, dir: Direction, amount: i32) {
        if self.over {
            return;
        }
        let source = self.board.selection();
        if !self
            .board
            .get(source)
            .is_some_and(|tile| tile.team == PLAYER_TEAM)
        {
            return;
        }
        self.board.submit_order_dir(source, dir, amount).ok();
    }

    /// Recall every standing order on the selected tile.
    fn recall(&mut self) {
        if self.over {
            return;
        }
        let source = self.board.selection();
        if !self
            .board
            .get(source)
            .is_some_and(|tile| tile.team == PLAYER_TEAM)
        {
            return;
        }
        for dir in Direction::ALL {
            self.board.submit_order_dir(source, dir, 0).ok();
        }
    }

    fn faster(&mut self) {
        self.speed_ms = self.speed_ms.saturating_sub(100).max(50);
    }

    fn slower(&mut self) {
        self.speed_ms = (self.speed_ms + 100).min(2000);
    }
}

/// Process one turn, redrawing and pausing after each combat event so
/// battles land one at a time instead of all at once.
fn advance_turn(
    app: &mut App,
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
) -> Result<(), CliError> {
    if app.over {
        return Ok(());
    }

    let scenario = app.scenario;
    let seed = app.seed;
    let turn = app.turn;
    let max_turns = app.max_turns;
    let speed_ms = app.speed_ms;
    let delay = Duration::from_millis(speed_ms);

    app.battle_log.push(format!("turn {}:", turn + 1));

    let App {
        board,
        rng,
        battle_log,
        teams,
        ..
    } = &mut *app;

    let mut draw_err = None;
    process_turn(board, rng, |mid, event| {
        battle_log.push(format!("  {}", describe_event(event)));
        if draw_err.is_some() {
            return;
        }
        let hud = Hud {
            scenario,
            seed,
            turn,
            max_turns,
            speed_ms,
            status: "RESOLVING",
            over: false,
            teams: teams.as_slice(),
            log: battle_log.as_slice(),
        };
        match terminal.draw(|f| ui(f, mid, &hud)) {
            Ok(_) => thread::sleep(delay),
            Err(e) => draw_err = Some(e),
        }
    });
    if let Some(e) = draw_err {
        return Err(CliError::new(e.to_string()));
    }

    // A turn with no contact leaves the marker dangling; say so.
    if app.battle_log.last().is_some_and(|l| l.ends_with(':')) {
        app.battle_log.push("  all quiet".to_string());
    }

    app.turn += 1;
    let rows = standings(&app.board, &app.teams);
    let alive = rows.iter().filter(|s| s.tiles > 0).count();
    if alive <= 1 || app.turn >= app.max_turns {
        app.over = true;
    }
    Ok(())
}

fn describe_event(event: &BattleEvent) -> String {
    match *event {
        BattleEvent::Reinforce { from, to, troops } => {
            format!("({},{}) reinforces ({},{}) with {troops}", from.x, from.y, to.x, to.y)
        }
        BattleEvent::Skirmish { from, to } => {
            format!("({},{}) column spent short of ({},{})", from.x, from.y, to.x, to.y)
        }
        BattleEvent::Repelled { from, to, defenders } => {
            format!(
                "({},{}) repelled at ({},{}), {defenders} still defending",
                from.x, from.y, to.x, to.y
            )
        }
        BattleEvent::Captured { from, to, garrison } => {
            format!("({},{}) captures ({},{}), {garrison} move in", from.x, from.y, to.x, to.y)
        }
        BattleEvent::Razed { from, to } => {
            format!("({},{}) razes ({},{}), ground left bare", from.x, from.y, to.x, to.y)
        }
    }
}

fn run_tui(mut app: App) -> Result<(), CliError> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| CliError::new(e.to_string()))?;

    loop {
        // Draw
        let status = if app.over { "GAME OVER" } else { "ORDERS" };
        let hud = app.hud(status);
        terminal
            .draw(|f| ui(f, &app.board, &hud))
            .map_err(|e| CliError::new(e.to_string()))?;

        // Handle input with timeout
        if event::poll(Duration::from_millis(50)).map_err(|e| CliError::new(e.to_string()))?
            && let Event::Key(key) = event::read().map_err(|e| CliError::new(e.to_string()))?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Up => app.move_selection(Direction::Up),
                KeyCode::Down => app.move_selection(Direction::Down),
                KeyCode::Left => app.move_selection(Direction::Left),
                KeyCode::Right => app.move_selection(Direction::Right),
                KeyCode::Char('w') => app.commit(Direction::Up, ORDER_STEP),
                KeyCode::Char('s') => app.commit(Direction::Down, ORDER_STEP),
                KeyCode::Char('a') => app.commit(Direction::Left, ORDER_STEP),
                KeyCode::Char('d') => app.commit(Direction::Right, ORDER_STEP),
                KeyCode::Char('W') => app.commit(Direction::Up, i32::MAX),
                KeyCode::Char('S') => app.commit(Direction::Down, i32::MAX),
                KeyCode::Char('A') => app.commit(Direction::Left, i32::MAX),
                KeyCode::Char('D') => app.commit(Direction::Right, i32::MAX),
                KeyCode::Char('x') => app.recall(),
                KeyCode::Enter | KeyCode::Char('n') => advance_turn(&mut app, &mut terminal)?,
                KeyCode::Char('+' | '=') => app.faster(),
                KeyCode::Char('-') => app.slower(),
                _ => {}
            }
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}

fn ui(f: &mut Frame, board: &Board, hud: &Hud) {
    let chunks = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    // Header
    render_header(f, chunks[0], hud);

    // Main content - map and side panels
    let main_chunks = Layout::default()
        .direction(LayoutDirection::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(chunks[1]);

    render_map(f, main_chunks[0], board);

    let side_chunks = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([
            Constraint::Length(9),
            Constraint::Length(hud.teams.len() as u16 + 4),
            Constraint::Min(4),
        ])
        .split(main_chunks[1]);

    render_tile(f, side_chunks[0], board);
    render_factions(f, side_chunks[1], board, hud);
    render_battles(f, side_chunks[2], hud);

    // Footer
    render_footer(f, chunks[2], hud);
}

fn render_header(f: &mut Frame, area: Rect, hud: &Hud) {
    let title = format!(
        " Tessera | {} (seed {}) | Turn {}/{} | {} | Delay: {}ms ",
        hud.scenario.name(),
        hud.seed,
        hud.turn,
        hud.max_turns,
        hud.status,
        hud.speed_ms
    );

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn render_map(f: &mut Frame, area: Rect, board: &Board) {
    // Three columns per tile; show the portion of the board that fits
    let visible_width = ((area.width as usize).saturating_sub(2) / 3).min(board.width() as usize);
    let visible_height = (area.height as usize).saturating_sub(2).min(board.height() as usize);
    let selection = board.selection();

    let mut lines: Vec<Line> = Vec::new();
    for y in 0..visible_height {
        let mut spans = Vec::new();
        for x in 0..visible_width {
            let coord = Coord::new(x as u16, y as u16);
            if let Some(tile) = board.get(coord) {
                let mut style = Style::default().fg(team_color(tile.team));
                if coord == selection {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                spans.push(Span::styled(tile_cell(tile), style));
            } else {
                spans.push(Span::raw("   "));
            }
        }
        lines.push(Line::from(spans));
    }

    let map_widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Map "));

    f.render_widget(map_widget, area);
}

fn tile_cell(tile: &Tile) -> String {
    if tile.garrison > 0 {
        format!("{:>2} ", tile.garrison.min(99))
    } else {
        format!(" {} ", terrain_glyph(tile))
    }
}

fn terrain_glyph(tile: &Tile) -> char {
    match tile.assigned.first().map(|p| p.name) {
        Some("Plains") => '"',
        Some("Forest") => 'f',
        Some("Hills") => 'h',
        Some("Mountains") => 'A',
        Some("Marsh") => 'w',
        Some("Village") => 'o',
        _ => '.',
    }
}

fn team_color(team: TeamId) -> Color {
    match team {
        0 => Color::Cyan,
        1 => Color::Red,
        2 => Color::Green,
        3 => Color::Yellow,
        4 => Color::Magenta,
        5 => Color::Blue,
        _ => Color::DarkGray,
    }
}

fn team_label(team: TeamId) -> String {
    if team == NEUTRAL {
        "neutral".to_string()
    } else {
        format!("{team}")
    }
}

fn render_tile(f: &mut Frame, area: Rect, board: &Board) {
    let selection = board.selection();
    let mut lines: Vec<Line> = Vec::new();

    if let Ok(tile) = board.select_tile(selection) {
        let terrain = if tile.assigned.is_empty() {
            "open ground".to_string()
        } else {
            tile.assigned
                .iter()
                .map(|p| p.name)
                .collect::<Vec<_>>()
                .join(", ")
        };

        lines.push(Line::from(format!("({}, {})  {terrain}", selection.x, selection.y)));
        lines.push(Line::from(format!(
            "team {}  occupier {}",
            team_label(tile.team),
            team_label(tile.occupier)
        )));
        lines.push(Line::from(format!(
            "garrison {}  regen {:+}  defence {:+}",
            tile.garrison,
            tile.effective_regen(),
            tile.effective_defence()
        )));
        lines.push(Line::from(format!(
            "move cap {}  supply cap {}",
            tile.effective_maxmove().max(0),
            tile.effective_maxsup().max(0)
        )));
        lines.push(Line::from(format!(
            "stores: food {} wood {} iron {} gold {}",
            tile.stockpile.food, tile.stockpile.wood, tile.stockpile.iron, tile.stockpile.gold
        )));
        let out = [
            tile.pending(Direction::Up),
            tile.pending(Direction::Down),
            tile.pending(Direction::Left),
            tile.pending(Direction::Right),
        ];
        lines.push(Line::from(format!("out: {}", format_orders(out))));
        if let Ok(inbound) = board.pending_inbound(selection) {
            lines.push(Line::from(format!("in:  {}", format_orders(inbound))));
        }
    }

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Tile "))
        .wrap(Wrap { trim: false });

    f.render_widget(widget, area);
}

fn format_orders(by_dir: [u32; 4]) -> String {
    format!(
        "up {} down {} left {} right {}",
        by_dir[Direction::Up.index()],
        by_dir[Direction::Down.index()],
        by_dir[Direction::Left.index()],
        by_dir[Direction::Right.index()]
    )
}

fn render_factions(f: &mut Frame, area: Rect, board: &Board, hud: &Hud) {
    let rows = standings(board, hud.teams);
    let mut lines: Vec<Line> = Vec::new();

    for standing in &rows {
        let style = Style::default()
            .fg(team_color(standing.team))
            .add_modifier(Modifier::BOLD);
        let mut text = format!("  {} tiles, {} troops", standing.tiles, standing.troops);
        if standing.tiles == 0 {
            text.push_str("  [wiped out]");
        }
        lines.push(Line::from(vec![
            Span::styled(format!("Team {}", standing.team), style),
            Span::raw(text),
        ]));
    }

    if hud.over {
        lines.push(Line::from(""));
        match winner(&rows) {
            Some(team) => lines.push(Line::from(Span::styled(
                format!("Team {team} takes the field"),
                Style::default().fg(team_color(team)).add_modifier(Modifier::BOLD),
            ))),
            None => lines.push(Line::from("The field is drawn")),
        }
    }

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Factions "))
        .wrap(Wrap { trim: false });

    f.render_widget(widget, area);
}

fn render_battles(f: &mut Frame, area: Rect, hud: &Hud) {
    let visible = (area.height as usize).saturating_sub(2);
    let skip = hud.log.len().saturating_sub(visible);
    let lines: Vec<Line> = hud.log[skip..].iter().map(|entry| Line::from(entry.as_str())).collect();

    let widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Battles "));

    f.render_widget(widget, area);
}

fn render_footer(f: &mut Frame, area: Rect, hud: &Hud) {
    let controls = if hud.over {
        " [q] Quit "
    } else {
        " [q] Quit  [arrows] Select  [wasd] Commit  [WASD] Commit all  [x] Recall  [Enter] End turn  [+/-] Delay "
    };

    let footer = Paragraph::new(controls)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}
