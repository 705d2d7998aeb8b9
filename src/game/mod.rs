//! Core phrase-guessing state machine.
//!
//! Everything in this module is pure Rust with no browser APIs so it runs
//! under `cargo test` on the host. UI bindings (see `crate::web`) translate
//! raw clicks / keydowns into [`InputEvent`]s, feed them through
//! [`GameController::dispatch`], and redraw from the [`ViewModel`] snapshot.

mod phrases;
pub use phrases::PHRASES;

/// Misses allowed before the round is lost.
pub const MAX_MISSES: u8 = 5;

/// Number of guessable keys ('a' through 'z').
pub const KEY_COUNT: usize = 26;

// --- Tiles -------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TileKind {
    Letter,
    Space,
}

/// One displayed unit of the active phrase. Spaces are never "revealed";
/// the win scan covers letter tiles only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Tile {
    pub ch: char,
    pub kind: TileKind,
    pub revealed: bool,
}

impl Tile {
    fn new(ch: char) -> Self {
        let kind = if ch == ' ' {
            TileKind::Space
        } else {
            TileKind::Letter
        };
        Self {
            ch,
            kind,
            revealed: false,
        }
    }
}

// --- Phase / Events ----------------------------------------------------------

/// Round lifecycle. `Idle` shows the overlay with the start control; the
/// overlay is hidden only while `InProgress`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Phase {
    Idle,
    InProgress,
    Won,
    Lost,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Outcome {
    Won,
    Lost,
}

/// Synchronous input events. Any front end (DOM, terminal, test harness)
/// produces these; the controller consumes them via [`GameController::dispatch`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Start,
    Guess(char),
    Reset,
}

// --- View snapshot -----------------------------------------------------------

/// Declarative render state handed to the presentation layer after every
/// dispatch: tile list, chosen-key flags, miss count, and phase (from which
/// the overlay state follows).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ViewModel {
    pub tiles: Vec<Tile>,
    pub chosen_keys: [bool; KEY_COUNT],
    pub misses: u8,
    pub max_misses: u8,
    pub phase: Phase,
}

// --- Controller --------------------------------------------------------------

/// Owns all round state: active phrase tiles, keyboard flags, miss counter,
/// and phase. Constructed idle; `reset` returns it to the same state.
pub struct GameController {
    tiles: Vec<Tile>,
    chosen: [bool; KEY_COUNT],
    misses: u8,
    phase: Phase,
}

impl Default for GameController {
    fn default() -> Self {
        Self::new()
    }
}

impl GameController {
    pub fn new() -> Self {
        Self {
            tiles: Vec::new(),
            chosen: [false; KEY_COUNT],
            misses: 0,
            phase: Phase::Idle,
        }
    }

    /// Apply one input event. Guards make stray events no-ops: `Start` only
    /// from idle, `Guess` only mid-round, `Reset` from anywhere (idempotent).
    pub fn dispatch(&mut self, event: InputEvent) {
        match event {
            InputEvent::Start => {
                if self.phase == Phase::Idle {
                    self.start_round();
                }
            }
            InputEvent::Guess(letter) => {
                self.guess(letter);
            }
            InputEvent::Reset => self.reset(),
        }
    }

    /// Start a round with a phrase picked uniformly at random.
    pub fn start_round(&mut self) {
        self.start_round_with(rand_index(PHRASES.len()));
    }

    /// Start a round with a specific phrase-list index (wraps). Deterministic
    /// entry point used by tests and scripted harnesses.
    pub fn start_round_with(&mut self, index: usize) {
        self.load_phrase(PHRASES[index % PHRASES.len()]);
    }

    fn load_phrase(&mut self, phrase: &str) {
        self.tiles = phrase.chars().map(Tile::new).collect();
        self.chosen = [false; KEY_COUNT];
        self.misses = 0;
        self.phase = Phase::InProgress;
    }

    /// Guess one letter. Case-insensitive; non-alphabetic input and
    /// already-chosen keys are ignored. Returns whether any tile matched.
    /// Misses count toward `MAX_MISSES` and end the round as lost; a hit
    /// that reveals the last letter tile ends it as won.
    pub fn guess(&mut self, letter: char) -> bool {
        if self.phase != Phase::InProgress {
            return false;
        }
        let letter = letter.to_ascii_lowercase();
        let Some(slot) = key_slot(letter) else {
            return false;
        };
        if self.chosen[slot] {
            return false;
        }
        self.chosen[slot] = true;

        let mut matched = false;
        for tile in self.tiles.iter_mut() {
            if tile.kind == TileKind::Letter && tile.ch.to_ascii_lowercase() == letter {
                tile.revealed = true;
                matched = true;
            }
        }

        if matched {
            if self.is_solved() {
                self.phase = Phase::Won;
            }
        } else {
            self.misses += 1;
            if self.misses >= MAX_MISSES {
                self.phase = Phase::Lost;
            }
        }
        matched
    }

    /// Clear tiles, re-enable every key, zero the miss counter, return to
    /// idle. Safe to call repeatedly from any phase.
    pub fn reset(&mut self) {
        self.tiles.clear();
        self.chosen = [false; KEY_COUNT];
        self.misses = 0;
        self.phase = Phase::Idle;
    }

    /// All letter tiles revealed. Vacuously true for a phrase with no letter
    /// tiles, so an all-space phrase would count as solved.
    pub fn is_solved(&self) -> bool {
        self.tiles
            .iter()
            .filter(|t| t.kind == TileKind::Letter)
            .all(|t| t.revealed)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn misses(&self) -> u8 {
        self.misses
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Won => Some(Outcome::Won),
            Phase::Lost => Some(Outcome::Lost),
            _ => None,
        }
    }

    /// Whether the given key has already been used this round. Non-letter
    /// input reports `true` (never clickable).
    pub fn key_chosen(&self, letter: char) -> bool {
        key_slot(letter.to_ascii_lowercase())
            .map(|slot| self.chosen[slot])
            .unwrap_or(true)
    }

    pub fn view(&self) -> ViewModel {
        ViewModel {
            tiles: self.tiles.clone(),
            chosen_keys: self.chosen,
            misses: self.misses,
            max_misses: MAX_MISSES,
            phase: self.phase,
        }
    }
}

// --- Helpers -----------------------------------------------------------------

/// Keyboard slot for an ASCII lowercase letter; `None` for anything else.
fn key_slot(letter: char) -> Option<usize> {
    letter
        .is_ascii_lowercase()
        .then(|| letter as usize - 'a' as usize)
}

fn rand_index(len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => (u64::from_le_bytes(buf) % len as u64) as usize,
        Err(_) => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters(game: &GameController) -> Vec<&Tile> {
        game.tiles()
            .iter()
            .filter(|t| t.kind == TileKind::Letter)
            .collect()
    }

    #[test]
    fn key_slot_maps_alphabet_only() {
        assert_eq!(key_slot('a'), Some(0));
        assert_eq!(key_slot('z'), Some(25));
        assert_eq!(key_slot('A'), None);
        assert_eq!(key_slot('1'), None);
        assert_eq!(key_slot(' '), None);
    }

    #[test]
    fn start_classifies_tiles() {
        let mut game = GameController::new();
        for (i, phrase) in PHRASES.iter().enumerate() {
            game.start_round_with(i);
            assert_eq!(game.tiles().len(), phrase.chars().count());
            for (tile, ch) in game.tiles().iter().zip(phrase.chars()) {
                assert_eq!(tile.ch, ch);
                let expected = if ch == ' ' {
                    TileKind::Space
                } else {
                    TileKind::Letter
                };
                assert_eq!(tile.kind, expected, "phrase {phrase:?} char {ch:?}");
                assert!(!tile.revealed);
            }
            assert_eq!(game.phase(), Phase::InProgress);
            assert_eq!(game.misses(), 0);
        }
    }

    #[test]
    fn guess_is_case_insensitive_and_reveals_all_matches() {
        let mut game = GameController::new();
        game.load_phrase("Right Off the Bat");
        // 't' appears three times, all lowercase.
        assert!(game.guess('t'));
        let revealed: Vec<char> = game
            .tiles()
            .iter()
            .filter(|t| t.revealed)
            .map(|t| t.ch)
            .collect();
        assert_eq!(revealed, vec!['t', 't', 't']);
        // Lowercase guess reveals the uppercase 'O' in "Off".
        assert!(game.guess('o'));
        assert!(game.tiles().iter().any(|t| t.ch == 'O' && t.revealed));
        assert_eq!(game.misses(), 0);
    }

    #[test]
    fn uppercase_guess_input_is_normalized() {
        let mut game = GameController::new();
        game.load_phrase("Right Off the Bat");
        assert!(game.guess('R'));
        assert!(game.key_chosen('r'));
    }

    #[test]
    fn repeated_guess_is_a_no_op() {
        let mut game = GameController::new();
        game.load_phrase("Par For the Course");
        assert!(!game.guess('z'));
        assert_eq!(game.misses(), 1);
        // Key already chosen: no second miss, no match either.
        assert!(!game.guess('z'));
        assert_eq!(game.misses(), 1);
        // A chosen hit key stays a no-op too.
        assert!(game.guess('p'));
        assert!(!game.guess('p'));
        assert_eq!(game.misses(), 1);
    }

    #[test]
    fn non_letter_guess_is_ignored() {
        let mut game = GameController::new();
        game.load_phrase("Par For the Course");
        assert!(!game.guess('3'));
        assert!(!game.guess(' '));
        assert!(!game.guess('é'));
        assert_eq!(game.misses(), 0);
        assert_eq!(game.phase(), Phase::InProgress);
    }

    #[test]
    fn win_on_last_required_letter_in_any_order() {
        let required = ['r', 'i', 'g', 'h', 't', 'o', 'f', 'e', 'b', 'a'];
        let orders: [&[char]; 2] = [
            &['r', 'i', 'g', 'h', 't', 'o', 'f', 'e', 'b', 'a'],
            &['a', 'b', 'e', 'f', 'o', 't', 'h', 'g', 'i', 'r'],
        ];
        for order in orders {
            let mut game = GameController::new();
            game.load_phrase("Right Off the Bat");
            assert_eq!(letters(&game).len(), 14);
            for (i, &c) in order.iter().enumerate() {
                assert!(game.guess(c), "guess {c:?} should match");
                if i + 1 < required.len() {
                    assert_eq!(game.phase(), Phase::InProgress, "won early at {c:?}");
                }
            }
            assert_eq!(game.phase(), Phase::Won);
            assert_eq!(game.misses(), 0);
            assert!(game.is_solved());
        }
    }

    #[test]
    fn loss_on_fifth_miss_and_not_before() {
        let mut game = GameController::new();
        game.load_phrase("Par For the Course");
        for (i, c) in ['z', 'x', 'q', 'j', 'v'].into_iter().enumerate() {
            assert_eq!(game.phase(), Phase::InProgress);
            assert!(!game.guess(c));
            assert_eq!(game.misses(), i as u8 + 1);
        }
        assert_eq!(game.phase(), Phase::Lost);
        assert_eq!(game.outcome(), Some(Outcome::Lost));
        // Further guesses after the round ended do nothing.
        assert!(!game.guess('p'));
        assert_eq!(game.misses(), 5);
    }

    #[test]
    fn all_space_phrase_is_trivially_solved() {
        let mut game = GameController::new();
        game.load_phrase("   ");
        assert!(game.is_solved());
    }

    #[test]
    fn reset_is_idempotent() {
        let mut game = GameController::new();
        game.load_phrase("Dropping Like Flies");
        game.guess('z');
        game.guess('d');
        for _ in 0..3 {
            game.reset();
            assert_eq!(game.phase(), Phase::Idle);
            assert_eq!(game.misses(), 0);
            assert!(game.tiles().is_empty());
            for c in 'a'..='z' {
                assert!(!game.key_chosen(c), "key {c:?} still chosen after reset");
            }
        }
    }

    #[test]
    fn dispatch_guards_phases() {
        let mut game = GameController::new();
        // Guess before start: ignored.
        game.dispatch(InputEvent::Guess('a'));
        assert_eq!(game.phase(), Phase::Idle);
        game.dispatch(InputEvent::Start);
        assert_eq!(game.phase(), Phase::InProgress);
        let tile_count = game.tiles().len();
        // Start mid-round: ignored, tiles untouched.
        game.dispatch(InputEvent::Start);
        assert_eq!(game.tiles().len(), tile_count);
        game.dispatch(InputEvent::Reset);
        assert_eq!(game.phase(), Phase::Idle);
        assert!(game.tiles().is_empty());
    }

    #[test]
    fn view_snapshot_tracks_state() {
        let mut game = GameController::new();
        game.load_phrase("Right Off the Bat");
        game.guess('z');
        game.guess('r');
        let vm = game.view();
        assert_eq!(vm.misses, 1);
        assert_eq!(vm.max_misses, MAX_MISSES);
        assert_eq!(vm.phase, Phase::InProgress);
        assert_eq!(vm.tiles.len(), game.tiles().len());
        assert!(vm.chosen_keys[25]); // z
        assert!(vm.chosen_keys[17]); // r
        assert!(!vm.chosen_keys[0]);
    }
}
