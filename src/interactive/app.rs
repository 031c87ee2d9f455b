//! TUI application state and logic

use crate::config::SizeClass;
use crate::core::Orientation;
use crate::generator::{Generator, StrategyType};
use crate::lexicon::{Lexicon, ThemeBank};
use crate::session::{Arrow, GameState, Session};
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::seq::IndexedRandom;
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::cell::Cell;
use std::io;
use std::time::{Duration, Instant};

/// Poll interval so the error highlight can expire without a key press
const TICK: Duration = Duration::from_millis(250);

/// What the player is choosing on the setup screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicChoice {
    Random,
    Theme(usize),
    Custom,
}

/// Setup screen form
#[derive(Debug, Clone)]
pub struct SetupForm {
    /// Index into `[Random, themes.., Custom]`
    pub cursor: usize,
    pub size: SizeClass,
    pub custom_topic: String,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

#[derive(Debug, Default, Clone)]
pub struct Statistics {
    pub games_started: usize,
    pub games_won: usize,
    pub words_revealed: usize,
}

/// Grid placement on screen, recorded by the renderer for mouse hits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridGeometry {
    pub area: Rect,
    pub cell_width: u16,
    pub cell_height: u16,
}

/// Application state
pub struct App<'a> {
    pub session: Session,
    pub generator: Generator<StrategyType>,
    pub lexicon: &'a dyn Lexicon,
    pub theme_names: Vec<String>,
    pub setup: SetupForm,
    pub messages: Vec<Message>,
    pub stats: Statistics,
    pub should_quit: bool,
    pub grid_geometry: Cell<GridGeometry>,
    /// Set when a new puzzle should be generated after the next draw
    pub pending_generation: bool,
}

impl<'a> App<'a> {
    #[must_use]
    pub fn new(
        lexicon: &'a dyn Lexicon,
        themes: &ThemeBank,
        generator: Generator<StrategyType>,
        size: SizeClass,
    ) -> Self {
        Self {
            session: Session::new(),
            generator,
            lexicon,
            theme_names: themes.themes().iter().map(|t| t.name().to_string()).collect(),
            setup: SetupForm {
                cursor: 0,
                size,
                custom_topic: String::new(),
            },
            messages: vec![Message {
                text: "Pick a theme and size, then press Enter.".to_string(),
                style: MessageStyle::Info,
            }],
            stats: Statistics::default(),
            should_quit: false,
            grid_geometry: Cell::new(GridGeometry::default()),
            pending_generation: false,
        }
    }

    /// Number of rows in the setup topic list
    #[must_use]
    pub fn topic_rows(&self) -> usize {
        self.theme_names.len() + 2
    }

    #[must_use]
    pub fn topic_choice(&self) -> TopicChoice {
        match self.setup.cursor {
            0 => TopicChoice::Random,
            i if i <= self.theme_names.len() => TopicChoice::Theme(i - 1),
            _ => TopicChoice::Custom,
        }
    }

    /// Topic to request, resolving a random pick
    fn chosen_topic(&self) -> Option<String> {
        match self.topic_choice() {
            TopicChoice::Random => self.theme_names.choose(&mut rand::rng()).cloned(),
            TopicChoice::Theme(i) => self.theme_names.get(i).cloned(),
            TopicChoice::Custom => {
                let topic = self.setup.custom_topic.trim();
                (!topic.is_empty()).then(|| topic.to_string())
            }
        }
    }

    /// Move to `Loading`; the puzzle is built after the loading screen is drawn
    pub fn request_game(&mut self) {
        let Some(topic) = self.chosen_topic() else {
            self.add_message("Type a custom topic first.", MessageStyle::Error);
            return;
        };
        self.session.begin_loading(&topic, self.setup.size);
        self.pending_generation = true;
    }

    /// Run the generation pipeline for the loading session
    pub fn generate_pending(&mut self) {
        if !self.pending_generation {
            return;
        }
        self.pending_generation = false;

        let topic = self.session.topic().to_string();
        let size = self.session.size();
        let result = self.generator.generate_themed(self.lexicon, &topic, size);
        self.session.finish_loading(result);

        match self.session.state() {
            GameState::Playing => {
                self.stats.games_started += 1;
                let count = self.session.puzzle().map_or(0, |p| p.entries().len());
                self.add_message(
                    &format!("{topic}: {count} words. Good luck!"),
                    MessageStyle::Success,
                );
            }
            GameState::Error { received, needed } => {
                self.add_message(
                    &format!("Generation failed ({received} of {needed} words). Enter to retry."),
                    MessageStyle::Error,
                );
            }
            _ => {}
        }
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 5 messages
        if self.messages.len() > 5 {
            self.messages.remove(0);
        }
    }

    /// Grid cell under a terminal position
    #[must_use]
    pub fn cell_at(&self, column: u16, row: u16) -> Option<(usize, usize)> {
        let geometry = self.grid_geometry.get();
        let area = geometry.area;
        if geometry.cell_width == 0
            || geometry.cell_height == 0
            || column < area.x
            || row < area.y
            || column >= area.x + area.width
            || row >= area.y + area.height
        {
            return None;
        }
        Some((
            usize::from((row - area.y) / geometry.cell_height),
            usize::from((column - area.x) / geometry.cell_width),
        ))
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if let Some((row, col)) = self.cell_at(mouse.column, mouse.row) {
            self.session.select(row, col);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.session.state() {
            GameState::Setup => self.handle_setup_key(key),
            GameState::Loading => {}
            GameState::Playing => self.handle_playing_key(key),
            GameState::Won => match key.code {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('n') | KeyCode::Enter | KeyCode::Esc => self.session.reset(),
                _ => {}
            },
            GameState::Error { .. } => match key.code {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Enter => {
                    let topic = self.session.topic().to_string();
                    let size = self.session.size();
                    self.session.begin_loading(&topic, size);
                    self.pending_generation = true;
                }
                KeyCode::Esc | KeyCode::Char('n') => self.session.reset(),
                _ => {}
            },
        }
    }

    fn handle_setup_key(&mut self, key: KeyEvent) {
        let editing = self.topic_choice() == TopicChoice::Custom;
        match key.code {
            KeyCode::Up => {
                self.setup.cursor = self.setup.cursor.saturating_sub(1);
            }
            KeyCode::Down => {
                self.setup.cursor = (self.setup.cursor + 1).min(self.topic_rows() - 1);
            }
            KeyCode::Left => {
                self.setup.size = previous_size(self.setup.size);
            }
            KeyCode::Right | KeyCode::Tab => {
                self.setup.size = self.setup.size.next();
            }
            KeyCode::Enter => self.request_game(),
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Backspace if editing => {
                self.setup.custom_topic.pop();
            }
            KeyCode::Char(c) if editing => {
                if self.setup.custom_topic.len() < 40 {
                    self.setup.custom_topic.push(c);
                }
            }
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_playing_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('l') if ctrl => {
                self.session.reveal_letter();
            }
            KeyCode::Char('w') if ctrl => {
                if self.session.reveal_word() {
                    self.stats.words_revealed += 1;
                }
            }
            KeyCode::Char('e') if ctrl => {
                let wrong = self.session.check_errors(Instant::now());
                let text = match wrong {
                    0 => "No mistakes so far.".to_string(),
                    1 => "1 letter is wrong.".to_string(),
                    n => format!("{n} letters are wrong."),
                };
                self.add_message(&text, MessageStyle::Info);
            }
            KeyCode::Char('x') if ctrl => {
                self.session.clear_progress();
                self.add_message("Progress cleared.", MessageStyle::Info);
            }
            KeyCode::Char('n') if ctrl => self.session.reset(),
            KeyCode::Char(' ') => {
                self.session.toggle_direction();
            }
            KeyCode::Char(c) if !ctrl => {
                self.session.type_char(c);
            }
            KeyCode::Backspace | KeyCode::Delete => {
                self.session.backspace();
            }
            KeyCode::Up => {
                self.session.move_cursor(Arrow::Up);
            }
            KeyCode::Down => {
                self.session.move_cursor(Arrow::Down);
            }
            KeyCode::Left => {
                self.session.move_cursor(Arrow::Left);
            }
            KeyCode::Right => {
                self.session.move_cursor(Arrow::Right);
            }
            KeyCode::Tab | KeyCode::BackTab => self.jump_clue(key.code == KeyCode::Tab),
            KeyCode::Esc => self.session.reset(),
            _ => {}
        }

        if self.session.state() == GameState::Won {
            self.stats.games_won += 1;
            self.add_message("Solved! Press 'n' for a new puzzle.", MessageStyle::Success);
        }
    }

    /// Move to the next (or previous) clue in number order, across before down
    fn jump_clue(&mut self, forward: bool) {
        let Some(puzzle) = self.session.puzzle() else {
            return;
        };
        let order: Vec<(u32, Orientation)> = puzzle
            .across()
            .iter()
            .chain(puzzle.down())
            .map(|clue| (clue.number, clue.orientation))
            .collect();
        if order.is_empty() {
            return;
        }

        let current = self
            .session
            .active_entry()
            .and_then(|e| e.number.map(|n| (n, e.orientation)))
            .and_then(|key| order.iter().position(|k| *k == key));
        let next = match (current, forward) {
            (Some(i), true) => (i + 1) % order.len(),
            (Some(i), false) => (i + order.len() - 1) % order.len(),
            (None, _) => 0,
        };

        let (number, orientation) = order[next];
        self.session.select_clue(number, orientation);
    }
}

const fn previous_size(size: SizeClass) -> SizeClass {
    match size {
        SizeClass::Tiny => SizeClass::Massive,
        SizeClass::Bite => SizeClass::Tiny,
        SizeClass::Normal => SizeClass::Bite,
        SizeClass::Large => SizeClass::Normal,
        SizeClass::Massive => SizeClass::Large,
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui(app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if app.pending_generation {
            app.generate_pending();
            continue;
        }

        if !event::poll(TICK)? {
            continue;
        }

        match event::read()? {
            // Only process key press events (fixes Windows double-input bug)
            Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            _ => {}
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::core::Candidate;
    use crate::errors::LexiconError;
    use crate::lexicon::EmbeddedLexicon;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn app(lexicon: &EmbeddedLexicon) -> App<'_> {
        let generator = Generator::new(
            StrategyType::default(),
            GeneratorConfig::default().with_seed(Some(9)),
        );
        App::new(lexicon, lexicon.bank(), generator, SizeClass::Tiny)
    }

    #[test]
    fn setup_list_has_random_themes_and_custom() {
        let lexicon = EmbeddedLexicon::new();
        let mut app = app(&lexicon);
        assert_eq!(app.topic_choice(), TopicChoice::Random);

        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.topic_choice(), TopicChoice::Theme(0));

        for _ in 0..50 {
            app.handle_key(key(KeyCode::Down));
        }
        assert_eq!(app.topic_choice(), TopicChoice::Custom);
        app.handle_key(key(KeyCode::Char('o')));
        app.handle_key(key(KeyCode::Char('x')));
        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.setup.custom_topic, "o");
    }

    #[test]
    fn size_cycles_both_ways() {
        let lexicon = EmbeddedLexicon::new();
        let mut app = app(&lexicon);
        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.setup.size, SizeClass::Massive);
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.setup.size, SizeClass::Tiny);
    }

    #[test]
    fn empty_custom_topic_does_not_start() {
        let lexicon = EmbeddedLexicon::new();
        let mut app = app(&lexicon);
        app.setup.cursor = app.topic_rows() - 1;
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.session.state(), GameState::Setup);
        assert!(!app.pending_generation);
    }

    #[test]
    fn enter_loads_then_plays_or_reports() {
        let lexicon = EmbeddedLexicon::new().with_seed(Some(3));
        let mut app = app(&lexicon);
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.session.state(), GameState::Loading);
        assert!(app.pending_generation);

        app.generate_pending();
        assert!(!app.pending_generation);
        assert!(matches!(
            app.session.state(),
            GameState::Playing | GameState::Error { .. }
        ));
    }

    /// Seven words that interlock well on a tiny grid
    struct LetterWords;

    impl Lexicon for LetterWords {
        fn fetch_candidates(
            &self,
            _topic: &str,
            target: usize,
        ) -> Result<Vec<Candidate>, LexiconError> {
            Ok(["easter", "arrest", "stare", "treats", "resets", "terse", "tastes"]
                .iter()
                .take(target)
                .map(|w| Candidate::new(*w, format!("Clue for {w}")).unwrap())
                .collect())
        }
    }

    #[test]
    fn playing_keys_drive_session() {
        let generator = Generator::new(
            StrategyType::default(),
            GeneratorConfig::default().with_seed(Some(2024)),
        );
        let mut app = App::new(&LetterWords, &ThemeBank::default(), generator, SizeClass::Tiny);
        app.setup.cursor = app.topic_rows() - 1;
        for c in "letters".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.session.state(), GameState::Loading);

        app.generate_pending();
        assert_eq!(app.session.state(), GameState::Playing);
        assert_eq!(app.stats.games_started, 1);

        let start = app.session.cursor();
        let direction = app.session.direction();
        app.handle_key(key(KeyCode::Char('q')));
        assert_eq!(app.session.letter_at(start.0, start.1), Some(b'Q'));

        app.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(app.session.direction(), direction.other());

        app.handle_key(ctrl('x'));
        assert_eq!(app.session.progress().0, 0);

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.session.state(), GameState::Setup);
    }

    #[test]
    fn ctrl_c_quits_anywhere() {
        let lexicon = EmbeddedLexicon::new();
        let mut app = app(&lexicon);
        app.handle_key(ctrl('c'));
        assert!(app.should_quit);
    }

    #[test]
    fn mouse_hits_map_to_cells() {
        let lexicon = EmbeddedLexicon::new();
        let app = app(&lexicon);
        assert_eq!(app.cell_at(5, 5), None);

        app.grid_geometry.set(GridGeometry {
            area: Rect::new(10, 4, 30, 20),
            cell_width: 3,
            cell_height: 2,
        });
        assert_eq!(app.cell_at(10, 4), Some((0, 0)));
        assert_eq!(app.cell_at(14, 7), Some((1, 1)));
        assert_eq!(app.cell_at(39, 23), Some((9, 9)));
        assert_eq!(app.cell_at(40, 4), None);
        assert_eq!(app.cell_at(9, 4), None);
    }
}
