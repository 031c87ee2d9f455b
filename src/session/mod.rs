//! Puzzle session
//!
//! Tracks one game from setup to completion: the player's letters, the
//! cursor and typing direction, and the win condition. Every operation that
//! addresses a block or an out-of-range cell is ignored and reports `false`.

use crate::config::SizeClass;
use crate::core::{Orientation, PlacedEntry};
use crate::errors::GenerateError;
use crate::generator::{Generator, PlacementStrategy, Puzzle};
use crate::lexicon::Lexicon;
use std::time::{Duration, Instant};

/// How long `check_errors` keeps wrong cells highlighted
pub const ERROR_HIGHLIGHT: Duration = Duration::from_secs(3);

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Setup,
    Loading,
    Playing,
    Won,
    /// Generation failed; counts are words received vs. needed
    Error { received: usize, needed: usize },
}

/// Arrow-key movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrow {
    Up,
    Down,
    Left,
    Right,
}

impl Arrow {
    const fn delta(self) -> (isize, isize) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }
}

/// One player's game
#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
    topic: String,
    size: SizeClass,
    puzzle: Option<Puzzle>,
    letters: Vec<Option<u8>>,
    cursor: (usize, usize),
    direction: Orientation,
    errors_until: Option<Instant>,
    failure: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: GameState::Setup,
            topic: String::new(),
            size: SizeClass::Bite,
            puzzle: None,
            letters: Vec::new(),
            cursor: (0, 0),
            direction: Orientation::Across,
            errors_until: None,
            failure: None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn state(&self) -> GameState {
        self.state
    }

    #[inline]
    #[must_use]
    pub const fn puzzle(&self) -> Option<&Puzzle> {
        self.puzzle.as_ref()
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub const fn size(&self) -> SizeClass {
        self.size
    }

    #[must_use]
    pub const fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    #[must_use]
    pub const fn direction(&self) -> Orientation {
        self.direction
    }

    /// Message describing the last generation failure
    #[must_use]
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Enter `Loading` for a new game on `topic`
    pub fn begin_loading(&mut self, topic: &str, size: SizeClass) {
        self.topic = topic.trim().to_string();
        self.size = size;
        self.puzzle = None;
        self.letters.clear();
        self.errors_until = None;
        self.failure = None;
        self.state = GameState::Loading;
    }

    /// Leave `Loading` with the pipeline's outcome
    ///
    /// Ignored unless the session is loading, so a result that arrives after
    /// a reset is discarded.
    pub fn finish_loading(&mut self, result: Result<Puzzle, GenerateError>) {
        if self.state != GameState::Loading {
            return;
        }

        match result {
            Ok(puzzle) => self.start(puzzle),
            Err(err) => {
                let (received, needed) = err.counts().unwrap_or((0, self.size.min_words()));
                log::warn!("generation for '{}' failed: {err}", self.topic);
                self.failure = Some(err.to_string());
                self.state = GameState::Error { received, needed };
            }
        }
    }

    /// Run the whole pipeline for `topic` and land in `Playing` or `Error`
    ///
    /// Returns whether a puzzle is ready to play.
    pub fn new_game<L, S>(
        &mut self,
        lexicon: &L,
        generator: &Generator<S>,
        topic: &str,
        size: SizeClass,
    ) -> bool
    where
        L: Lexicon + ?Sized,
        S: PlacementStrategy + Sync,
    {
        self.begin_loading(topic, size);
        let result = generator.generate_themed(lexicon, &self.topic, size);
        self.finish_loading(result);
        self.state == GameState::Playing
    }

    /// Start playing a ready puzzle with an empty grid
    ///
    /// The cursor starts on entry 1, across when both directions begin there.
    pub fn start(&mut self, puzzle: Puzzle) {
        let cells = puzzle.size() * puzzle.size();
        self.letters = vec![None; cells];
        if let Some(first) = puzzle.entries().first() {
            self.cursor = (first.row, first.col);
            self.direction = first.orientation;
        } else {
            self.cursor = (0, 0);
            self.direction = Orientation::Across;
        }
        self.errors_until = None;
        self.failure = None;
        self.puzzle = Some(puzzle);
        self.state = GameState::Playing;
    }

    /// Back to `Setup` from any state
    pub fn reset(&mut self) {
        let topic = std::mem::take(&mut self.topic);
        let size = self.size;
        *self = Self::new();
        self.topic = topic;
        self.size = size;
    }

    /// Letter the player has entered at `(row, col)`
    #[must_use]
    pub fn letter_at(&self, row: usize, col: usize) -> Option<u8> {
        let puzzle = self.puzzle.as_ref()?;
        if row < puzzle.size() && col < puzzle.size() {
            self.letters[row * puzzle.size() + col]
        } else {
            None
        }
    }

    /// Entry being typed into
    ///
    /// Prefers the current direction; falls back to the other one when the
    /// cursor cell only belongs to a perpendicular entry.
    #[must_use]
    pub fn active_entry(&self) -> Option<&PlacedEntry> {
        let puzzle = self.puzzle.as_ref()?;
        let (row, col) = self.cursor;
        puzzle
            .entry_at(row, col, self.direction)
            .or_else(|| puzzle.entry_at(row, col, self.direction.other()))
    }

    /// Whether every cell of `entry` holds the correct letter
    #[must_use]
    pub fn is_entry_complete(&self, entry: &PlacedEntry) -> bool {
        entry
            .cells()
            .enumerate()
            .all(|(i, (row, col))| self.letter_at(row, col) == Some(entry.letter(i)))
    }

    /// Whether `(row, col)` should show as wrong right now
    #[must_use]
    pub fn is_marked_wrong(&self, row: usize, col: usize, now: Instant) -> bool {
        let Some(puzzle) = &self.puzzle else {
            return false;
        };
        self.errors_until.is_some_and(|until| now < until)
            && self
                .letter_at(row, col)
                .is_some_and(|letter| puzzle.solution_at(row, col) != Some(letter))
    }

    /// Whether an error highlight is currently showing
    #[must_use]
    pub fn showing_errors(&self, now: Instant) -> bool {
        self.errors_until.is_some_and(|until| now < until)
    }

    /// Select a cell
    ///
    /// Selecting the current cell toggles direction. Selecting another cell
    /// moves there and, if only one direction has an entry at that cell,
    /// switches to it.
    pub fn select(&mut self, row: usize, col: usize) -> bool {
        if !self.is_playable_cell(row, col) {
            return false;
        }

        if self.cursor == (row, col) {
            self.toggle_direction();
            return true;
        }

        self.cursor = (row, col);
        if let Some(puzzle) = &self.puzzle {
            let has_current = puzzle.entry_at(row, col, self.direction).is_some();
            let has_other = puzzle.entry_at(row, col, self.direction.other()).is_some();
            if !has_current && has_other {
                self.direction = self.direction.other();
            }
        }
        true
    }

    /// Jump to the start of a numbered entry and type in its direction
    pub fn select_clue(&mut self, number: u32, orientation: Orientation) -> bool {
        if self.state != GameState::Playing {
            return false;
        }
        let Some(entry) = self
            .puzzle
            .as_ref()
            .and_then(|p| p.entry_numbered(number, orientation))
        else {
            return false;
        };
        self.cursor = (entry.row, entry.col);
        self.direction = orientation;
        true
    }

    pub fn toggle_direction(&mut self) -> bool {
        if self.state != GameState::Playing {
            return false;
        }
        self.direction = self.direction.other();
        true
    }

    /// Move the cursor one cell if that cell holds a letter
    pub fn move_cursor(&mut self, arrow: Arrow) -> bool {
        if self.state != GameState::Playing {
            return false;
        }
        let (dr, dc) = arrow.delta();
        match self.neighbour(dr, dc) {
            Some(cell) => {
                self.cursor = cell;
                true
            }
            None => false,
        }
    }

    /// Enter a letter at the cursor and advance
    ///
    /// Anything but an ASCII letter is ignored.
    pub fn type_char(&mut self, ch: char) -> bool {
        if self.state != GameState::Playing || !ch.is_ascii_alphabetic() {
            return false;
        }

        let (row, col) = self.cursor;
        self.write(row, col, Some(ch.to_ascii_uppercase() as u8));

        let (dr, dc) = self.direction.step();
        if let Some(next) = self.neighbour(dr, dc) {
            self.cursor = next;
        }

        self.check_win();
        true
    }

    /// Clear the cursor cell, or step back and clear the previous cell
    pub fn backspace(&mut self) -> bool {
        if self.state != GameState::Playing {
            return false;
        }

        let (row, col) = self.cursor;
        if self.letter_at(row, col).is_some() {
            self.write(row, col, None);
            return true;
        }

        let (dr, dc) = self.direction.step();
        if let Some((prev_row, prev_col)) = self.neighbour(-dr, -dc) {
            self.cursor = (prev_row, prev_col);
            self.write(prev_row, prev_col, None);
        }
        true
    }

    /// Fill the cursor cell with its answer
    pub fn reveal_letter(&mut self) -> bool {
        if self.state != GameState::Playing {
            return false;
        }
        let (row, col) = self.cursor;
        let Some(answer) = self.puzzle.as_ref().and_then(|p| p.solution_at(row, col)) else {
            return false;
        };
        self.write(row, col, Some(answer));
        self.check_win();
        true
    }

    /// Fill every cell of the active entry with its answer
    pub fn reveal_word(&mut self) -> bool {
        if self.state != GameState::Playing {
            return false;
        }
        let Some(entry) = self.active_entry() else {
            return false;
        };
        let cells: Vec<((usize, usize), u8)> = entry
            .cells()
            .enumerate()
            .map(|(i, cell)| (cell, entry.letter(i)))
            .collect();

        for ((row, col), letter) in cells {
            self.write(row, col, Some(letter));
        }
        self.check_win();
        true
    }

    /// Highlight wrong letters until `now + ERROR_HIGHLIGHT`
    ///
    /// Returns the number of filled cells that are wrong. Any edit clears
    /// the highlight early.
    pub fn check_errors(&mut self, now: Instant) -> usize {
        if self.state != GameState::Playing {
            return 0;
        }
        self.errors_until = Some(now + ERROR_HIGHLIGHT);
        self.wrong_cells().count()
    }

    /// Empty every cell
    pub fn clear_progress(&mut self) -> bool {
        if self.state != GameState::Playing {
            return false;
        }
        self.letters.fill(None);
        self.errors_until = None;
        true
    }

    /// Filled cells whose letter does not match the answer
    pub fn wrong_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.puzzle.iter().flat_map(move |puzzle| {
            puzzle
                .layout()
                .grid()
                .letters()
                .filter(move |&(row, col, answer)| {
                    self.letter_at(row, col).is_some_and(|letter| letter != answer)
                })
                .map(|(row, col, _)| (row, col))
        })
    }

    /// Filled letter cells vs. all letter cells
    #[must_use]
    pub fn progress(&self) -> (usize, usize) {
        let Some(puzzle) = &self.puzzle else {
            return (0, 0);
        };
        let total = puzzle.layout().grid().filled_count();
        let filled = puzzle
            .layout()
            .grid()
            .letters()
            .filter(|&(row, col, _)| self.letter_at(row, col).is_some())
            .count();
        (filled, total)
    }

    fn is_playable_cell(&self, row: usize, col: usize) -> bool {
        self.state == GameState::Playing
            && self
                .puzzle
                .as_ref()
                .is_some_and(|p| p.is_letter_cell(row, col))
    }

    /// Letter cell next to the cursor, if any
    fn neighbour(&self, dr: isize, dc: isize) -> Option<(usize, usize)> {
        let puzzle = self.puzzle.as_ref()?;
        let (row, col) = self.cursor;
        let (r, c) = puzzle.layout().grid().offset(row, col, dr, dc)?;
        puzzle.is_letter_cell(r, c).then_some((r, c))
    }

    fn write(&mut self, row: usize, col: usize, letter: Option<u8>) {
        let Some(size) = self.puzzle.as_ref().map(Puzzle::size) else {
            return;
        };
        self.letters[row * size + col] = letter;
        self.errors_until = None;
    }

    fn check_win(&mut self) {
        let Some(puzzle) = &self.puzzle else {
            return;
        };
        let solved = puzzle
            .layout()
            .grid()
            .letters()
            .all(|(row, col, answer)| self.letter_at(row, col) == Some(answer));
        if solved {
            log::info!("puzzle solved");
            self.state = GameState::Won;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Candidate, Layout};

    /// SUN across and STAR down from (3, 3); GALAXY across row 5
    fn sample_puzzle() -> Puzzle {
        let mut layout = Layout::new(10);
        for (word, row, col, orientation, crossings) in [
            ("galaxy", 5, 2, Orientation::Across, 0),
            ("star", 3, 3, Orientation::Down, 1),
            ("sun", 3, 3, Orientation::Across, 1),
        ] {
            let candidate = Candidate::new(word, format!("{word} clue")).unwrap();
            layout.place(&candidate, row, col, orientation, crossings);
        }
        Puzzle::from_layout(layout)
    }

    fn playing() -> Session {
        let mut session = Session::new();
        session.start(sample_puzzle());
        session
    }

    fn type_word(session: &mut Session, word: &str) {
        for ch in word.chars() {
            session.type_char(ch);
        }
    }

    #[test]
    fn starts_on_first_entry() {
        let session = playing();
        assert_eq!(session.state(), GameState::Playing);
        assert_eq!(session.cursor(), (3, 3));
        assert_eq!(session.direction(), Orientation::Across);
        assert_eq!(session.active_entry().unwrap().word, "SUN");
        assert_eq!(session.progress(), (0, 11));
    }

    #[test]
    fn typing_advances_across() {
        let mut session = playing();
        assert!(session.type_char('s'));
        assert_eq!(session.letter_at(3, 3), Some(b'S'));
        assert_eq!(session.cursor(), (3, 4));
    }

    #[test]
    fn typing_stays_put_at_block() {
        let mut session = playing();
        type_word(&mut session, "SUN");
        // (3, 6) is a block, so the cursor stays on N
        assert_eq!(session.cursor(), (3, 5));
        assert_eq!(session.letter_at(3, 5), Some(b'N'));
    }

    #[test]
    fn typing_stays_put_at_edge() {
        let mut layout = Layout::new(5);
        layout.place(&Candidate::new("stars", "clue").unwrap(), 2, 0, Orientation::Across, 0);
        let mut session = Session::new();
        session.start(Puzzle::from_layout(layout));
        assert!(session.select(2, 4));
        session.type_char('S');
        assert_eq!(session.cursor(), (2, 4));
    }

    #[test]
    fn non_letters_are_ignored() {
        let mut session = playing();
        assert!(!session.type_char('3'));
        assert!(!session.type_char(' '));
        assert_eq!(session.letter_at(3, 3), None);
        assert_eq!(session.cursor(), (3, 3));
    }

    #[test]
    fn full_correct_grid_wins() {
        let mut session = playing();
        type_word(&mut session, "SUN");
        session.select_clue(1, Orientation::Down);
        type_word(&mut session, "STAR");
        session.select_clue(2, Orientation::Across);
        type_word(&mut session, "GALAX");
        assert_eq!(session.state(), GameState::Playing);

        session.type_char('Y');
        assert_eq!(session.state(), GameState::Won);
        assert!(!session.type_char('A'));
    }

    #[test]
    fn all_but_one_does_not_win() {
        let mut session = playing();
        type_word(&mut session, "SUN");
        session.select_clue(1, Orientation::Down);
        type_word(&mut session, "STAR");
        session.select_clue(2, Orientation::Across);
        type_word(&mut session, "GALAXQ");
        assert_eq!(session.state(), GameState::Playing);
        assert_eq!(session.wrong_cells().collect::<Vec<_>>(), vec![(5, 7)]);
    }

    #[test]
    fn backspace_clears_then_steps_back() {
        let mut session = playing();
        type_word(&mut session, "SU");
        assert_eq!(session.cursor(), (3, 5));

        // Current cell empty: step back and clear U
        session.backspace();
        assert_eq!(session.cursor(), (3, 4));
        assert_eq!(session.letter_at(3, 4), None);

        session.type_char('X');
        session.select(3, 4);
        // Filled cell is cleared in place
        session.backspace();
        assert_eq!(session.cursor(), (3, 4));
        assert_eq!(session.letter_at(3, 4), None);
        assert_eq!(session.letter_at(3, 3), Some(b'S'));
    }

    #[test]
    fn backspace_at_entry_start_stays() {
        let mut session = playing();
        session.backspace();
        assert_eq!(session.cursor(), (3, 3));
    }

    #[test]
    fn arrows_only_land_on_letters() {
        let mut session = playing();
        assert!(session.move_cursor(Arrow::Down));
        assert_eq!(session.cursor(), (4, 3));
        assert!(!session.move_cursor(Arrow::Right));
        assert_eq!(session.cursor(), (4, 3));
        assert!(session.move_cursor(Arrow::Down));
        assert!(session.move_cursor(Arrow::Left));
        assert_eq!(session.cursor(), (5, 2));
        assert!(!session.move_cursor(Arrow::Left));
        assert!(!session.move_cursor(Arrow::Up));
    }

    #[test]
    fn reselecting_toggles_direction() {
        let mut session = playing();
        assert!(session.select(3, 3));
        assert_eq!(session.direction(), Orientation::Down);
        assert_eq!(session.active_entry().unwrap().word, "STAR");
        assert!(session.select(3, 3));
        assert_eq!(session.direction(), Orientation::Across);
    }

    #[test]
    fn selecting_single_direction_cell_snaps() {
        let mut session = playing();
        // (4, 3) is only in STAR
        assert!(session.select(4, 3));
        assert_eq!(session.direction(), Orientation::Down);
        // (5, 6) is only in GALAXY
        assert!(session.select(5, 6));
        assert_eq!(session.direction(), Orientation::Across);
        // (5, 3) is in both; keep the current direction
        assert!(session.select(5, 3));
        assert_eq!(session.direction(), Orientation::Across);
    }

    #[test]
    fn toggled_direction_without_entry_falls_back() {
        let mut session = playing();
        session.select(5, 6);
        session.select(5, 6);
        assert_eq!(session.direction(), Orientation::Down);
        assert_eq!(session.active_entry().unwrap().word, "GALAXY");
    }

    #[test]
    fn invalid_selection_is_a_no_op() {
        let mut session = playing();
        assert!(!session.select(0, 0));
        assert!(!session.select(42, 3));
        assert_eq!(session.cursor(), (3, 3));
        assert_eq!(session.state(), GameState::Playing);
    }

    #[test]
    fn reveal_word_fills_active_entry() {
        let mut session = playing();
        session.select_clue(2, Orientation::Across);
        assert!(session.reveal_word());
        let galaxy = session.puzzle().unwrap().entry_numbered(2, Orientation::Across).unwrap().clone();
        assert!(session.is_entry_complete(&galaxy));
        assert_eq!(session.progress(), (6, 11));
    }

    #[test]
    fn reveal_letter_fills_cursor_only() {
        let mut session = playing();
        assert!(session.reveal_letter());
        assert_eq!(session.letter_at(3, 3), Some(b'S'));
        assert_eq!(session.letter_at(3, 4), None);
        assert_eq!(session.cursor(), (3, 3));
    }

    #[test]
    fn revealing_everything_wins() {
        let mut session = playing();
        session.reveal_word();
        session.select_clue(1, Orientation::Down);
        session.reveal_word();
        session.select_clue(2, Orientation::Across);
        session.reveal_word();
        assert_eq!(session.state(), GameState::Won);
    }

    #[test]
    fn error_highlight_expires_and_clears_on_edit() {
        let mut session = playing();
        type_word(&mut session, "SAN");
        let now = Instant::now();

        assert_eq!(session.check_errors(now), 1);
        assert!(session.is_marked_wrong(3, 4, now));
        assert!(!session.is_marked_wrong(3, 3, now));
        assert!(!session.is_marked_wrong(3, 4, now + ERROR_HIGHLIGHT));

        session.check_errors(now);
        session.backspace();
        assert!(!session.showing_errors(now));
    }

    #[test]
    fn clear_progress_empties_grid() {
        let mut session = playing();
        type_word(&mut session, "SUN");
        assert!(session.clear_progress());
        assert_eq!(session.progress(), (0, 11));
        assert_eq!(session.state(), GameState::Playing);
    }

    #[test]
    fn failed_generation_reports_counts() {
        let mut session = Session::new();
        session.begin_loading("space", SizeClass::Bite);
        assert_eq!(session.state(), GameState::Loading);

        session.finish_loading(Err(GenerateError::InsufficientCandidates {
            received: 2,
            needed: 9,
        }));
        assert_eq!(
            session.state(),
            GameState::Error {
                received: 2,
                needed: 9
            }
        );
        assert!(session.failure().unwrap().contains("received 2"));
    }

    #[test]
    fn late_result_after_reset_is_dropped() {
        let mut session = Session::new();
        session.begin_loading("space", SizeClass::Tiny);
        session.reset();
        session.finish_loading(Ok(sample_puzzle()));
        assert_eq!(session.state(), GameState::Setup);
        assert!(session.puzzle().is_none());
        assert_eq!(session.topic(), "space");
    }

    #[test]
    fn operations_outside_play_are_ignored() {
        let mut session = Session::new();
        assert!(!session.type_char('A'));
        assert!(!session.backspace());
        assert!(!session.move_cursor(Arrow::Up));
        assert!(!session.reveal_word());
        assert_eq!(session.check_errors(Instant::now()), 0);
        assert_eq!(session.state(), GameState::Setup);
    }

    /// Seven words that interlock well on a tiny grid
    struct LetterWords;

    impl crate::lexicon::Lexicon for LetterWords {
        fn fetch_candidates(
            &self,
            _topic: &str,
            target: usize,
        ) -> Result<Vec<Candidate>, crate::errors::LexiconError> {
            Ok(["easter", "arrest", "stare", "treats", "resets", "terse", "tastes"]
                .iter()
                .take(target)
                .map(|w| Candidate::new(*w, format!("Clue for {w}")).unwrap())
                .collect())
        }
    }

    #[test]
    fn successful_load_starts_play() {
        let mut session = Session::new();
        session.begin_loading("space", SizeClass::Tiny);
        assert_eq!(session.state(), GameState::Loading);

        session.finish_loading(Ok(sample_puzzle()));
        assert_eq!(session.state(), GameState::Playing);
        assert_eq!(session.cursor(), (3, 3));
        assert_eq!(session.direction(), Orientation::Across);
        assert_eq!(session.progress(), (0, 11));
        assert!(session.failure().is_none());
    }

    #[test]
    fn new_game_runs_pipeline() {
        use crate::config::GeneratorConfig;
        use crate::generator::StrategyType;

        let generator = Generator::new(
            StrategyType::default(),
            GeneratorConfig::default().with_seed(Some(2024)),
        );
        let mut session = Session::new();

        assert!(session.new_game(&LetterWords, &generator, "letters", SizeClass::Tiny));
        assert_eq!(session.state(), GameState::Playing);
        assert_eq!(session.topic(), "letters");

        let puzzle = session.puzzle().unwrap();
        assert_eq!(puzzle.size(), SizeClass::Tiny.grid_dimension());
        assert!(puzzle.entries().len() >= SizeClass::Tiny.min_words());
        assert_eq!(session.progress().0, 0);

        session.reset();
        assert_eq!(session.state(), GameState::Setup);
    }
}
