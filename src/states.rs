//! Screen state machine
//!
//! Six screens share one [`GameContext`]. The [`StateManager`] owns all of
//! them, keeps exactly one active and runs the exit/enter hooks around every
//! switch.

use std::path::PathBuf;

use crate::audio::SoundEffect;
use crate::config::GameConfig;
use crate::highscores::HighScores;
use crate::platform;
use crate::renderer::{Frame, Hud, MenuView, WorldSnapshot};
use crate::sim::{GameSession, TickInput, TickOutcome, tick};

/// Screen identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateId {
    MainMenu,
    HighScores,
    Playing,
    Paused,
    LevelTransition,
    GameOver,
}

impl StateId {
    pub const ALL: [StateId; 6] = [
        StateId::MainMenu,
        StateId::HighScores,
        StateId::Playing,
        StateId::Paused,
        StateId::LevelTransition,
        StateId::GameOver,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Discrete input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Up,
    Down,
    Confirm,
    Pause,
    Back,
}

/// Shared state every screen works on
pub struct GameContext {
    /// Owns the game config (`session.config`)
    pub session: GameSession,
    pub high_scores: HighScores,
    /// Where high scores are saved; `None` keeps them in memory
    pub scores_path: Option<PathBuf>,
    /// Cleared to end the host loop
    pub running: bool,
}

impl GameContext {
    pub fn new(config: GameConfig, seed: u64, high_scores: HighScores) -> Self {
        Self {
            session: GameSession::new(config, seed),
            high_scores,
            scores_path: None,
            running: true,
        }
    }

    fn world_frame(&self, id: StateId) -> Frame {
        let mut frame = Frame::new(id);
        frame.hud = Some(Hud::from(&self.session));
        frame.world = Some(WorldSnapshot::from(&self.session));
        frame
    }
}

/// One screen of the game
pub trait GameScreen {
    fn id(&self) -> StateId;

    fn on_enter(&mut self, _ctx: &mut GameContext) {}

    fn on_exit(&mut self, _ctx: &mut GameContext) {}

    /// React to a discrete action; `Some` requests a switch
    fn handle_input(&mut self, ctx: &mut GameContext, action: InputAction) -> Option<StateId>;

    /// Per-frame update with held input
    fn update(&mut self, _ctx: &mut GameContext, _held: &TickInput, _dt: f32) -> Option<StateId> {
        None
    }

    fn draw(&self, ctx: &GameContext) -> Frame;
}

/// Wrapping menu selection
#[derive(Debug, Clone)]
struct Menu {
    title: &'static str,
    items: &'static [&'static str],
    selected: usize,
}

impl Menu {
    const fn new(title: &'static str, items: &'static [&'static str]) -> Self {
        Self {
            title,
            items,
            selected: 0,
        }
    }

    /// Handle Up/Down; returns true if the action was a move
    fn navigate(&mut self, ctx: &mut GameContext, action: InputAction) -> bool {
        let n = self.items.len();
        match action {
            InputAction::Up => self.selected = (self.selected + n - 1) % n,
            InputAction::Down => self.selected = (self.selected + 1) % n,
            _ => return false,
        }
        ctx.session.sound(SoundEffect::MenuMove);
        true
    }

    fn view(&self) -> MenuView {
        MenuView {
            title: self.title.to_string(),
            items: self.items.iter().map(|s| s.to_string()).collect(),
            selected: self.selected,
        }
    }
}

const MAIN_START: usize = 0;
const MAIN_HIGH_SCORES: usize = 1;
const MAIN_EXIT: usize = 2;

pub struct MainMenuState {
    menu: Menu,
}

impl Default for MainMenuState {
    fn default() -> Self {
        Self {
            menu: Menu::new("NEON BREAKOUT", &["Start Game", "High Scores", "Exit"]),
        }
    }
}

impl GameScreen for MainMenuState {
    fn id(&self) -> StateId {
        StateId::MainMenu
    }

    fn handle_input(&mut self, ctx: &mut GameContext, action: InputAction) -> Option<StateId> {
        if self.menu.navigate(ctx, action) {
            return None;
        }
        match action {
            InputAction::Confirm => match self.menu.selected {
                MAIN_START => {
                    ctx.session.new_game();
                    ctx.session.sound(SoundEffect::MenuSelect);
                    Some(StateId::Playing)
                }
                MAIN_HIGH_SCORES => {
                    ctx.session.sound(SoundEffect::MenuSelect);
                    Some(StateId::HighScores)
                }
                MAIN_EXIT => {
                    ctx.running = false;
                    None
                }
                _ => None,
            },
            InputAction::Back => {
                ctx.running = false;
                None
            }
            _ => None,
        }
    }

    fn draw(&self, _ctx: &GameContext) -> Frame {
        Frame::new(StateId::MainMenu).with_menu(self.menu.view())
    }
}

#[derive(Default)]
pub struct HighScoresState;

impl GameScreen for HighScoresState {
    fn id(&self) -> StateId {
        StateId::HighScores
    }

    fn handle_input(&mut self, ctx: &mut GameContext, action: InputAction) -> Option<StateId> {
        match action {
            InputAction::Confirm | InputAction::Back => {
                ctx.session.sound(SoundEffect::MenuSelect);
                Some(StateId::MainMenu)
            }
            _ => None,
        }
    }

    fn draw(&self, ctx: &GameContext) -> Frame {
        let mut frame = Frame::new(StateId::HighScores).with_line("HIGH SCORES");
        if ctx.high_scores.is_empty() {
            frame = frame.with_line("No scores yet");
        }
        let now = platform::now_millis();
        for (i, e) in ctx.high_scores.entries().iter().enumerate() {
            frame = frame.with_line(format!(
                "{:>2}. {:>8}  Level {:<3} {}",
                i + 1,
                e.score,
                e.level,
                platform::format_relative(e.timestamp, now)
            ));
        }
        frame.with_line("Press Enter to return")
    }
}

#[derive(Default)]
pub struct PlayingState;

impl GameScreen for PlayingState {
    fn id(&self) -> StateId {
        StateId::Playing
    }

    fn handle_input(&mut self, _ctx: &mut GameContext, action: InputAction) -> Option<StateId> {
        match action {
            InputAction::Pause | InputAction::Back => Some(StateId::Paused),
            _ => None,
        }
    }

    fn update(&mut self, ctx: &mut GameContext, held: &TickInput, dt: f32) -> Option<StateId> {
        match tick(&mut ctx.session, held, dt) {
            TickOutcome::Continue => None,
            TickOutcome::LevelCleared => Some(StateId::LevelTransition),
            TickOutcome::GameOver => Some(StateId::GameOver),
        }
    }

    fn draw(&self, ctx: &GameContext) -> Frame {
        ctx.world_frame(StateId::Playing)
    }
}

const PAUSE_CONTINUE: usize = 0;
const PAUSE_MAIN_MENU: usize = 1;

pub struct PausedState {
    menu: Menu,
}

impl Default for PausedState {
    fn default() -> Self {
        Self {
            menu: Menu::new("PAUSED", &["Continue", "Main Menu"]),
        }
    }
}

impl GameScreen for PausedState {
    fn id(&self) -> StateId {
        StateId::Paused
    }

    fn on_enter(&mut self, _ctx: &mut GameContext) {
        self.menu.selected = 0;
    }

    fn handle_input(&mut self, ctx: &mut GameContext, action: InputAction) -> Option<StateId> {
        if self.menu.navigate(ctx, action) {
            return None;
        }
        match action {
            InputAction::Confirm => {
                ctx.session.sound(SoundEffect::MenuSelect);
                match self.menu.selected {
                    PAUSE_CONTINUE => Some(StateId::Playing),
                    PAUSE_MAIN_MENU => Some(StateId::MainMenu),
                    _ => None,
                }
            }
            InputAction::Pause | InputAction::Back => Some(StateId::Playing),
            _ => None,
        }
    }

    fn draw(&self, ctx: &GameContext) -> Frame {
        ctx.world_frame(StateId::Paused).with_menu(self.menu.view())
    }
}

#[derive(Default)]
pub struct LevelTransitionState;

impl GameScreen for LevelTransitionState {
    fn id(&self) -> StateId {
        StateId::LevelTransition
    }

    fn handle_input(&mut self, ctx: &mut GameContext, action: InputAction) -> Option<StateId> {
        match action {
            InputAction::Confirm => {
                ctx.session.setup_level();
                Some(StateId::Playing)
            }
            _ => None,
        }
    }

    fn draw(&self, ctx: &GameContext) -> Frame {
        let s = &ctx.session;
        Frame::new(StateId::LevelTransition)
            .with_line(format!("LEVEL {} COMPLETE", s.level.saturating_sub(1)))
            .with_line(format!("Score: {}", s.score))
            .with_line(format!("Lives: {}", s.lives))
            .with_line(format!("Press Enter for level {}", s.level))
    }
}

#[derive(Default)]
pub struct GameOverState {
    /// Decided on entry, before the score is submitted
    new_high_score: bool,
}

impl GameScreen for GameOverState {
    fn id(&self) -> StateId {
        StateId::GameOver
    }

    fn on_enter(&mut self, ctx: &mut GameContext) {
        self.new_high_score = ctx.high_scores.is_high_score(ctx.session.score);
        log::info!(
            "Game over: score {}, level {}",
            ctx.session.score,
            ctx.session.level
        );
    }

    fn handle_input(&mut self, ctx: &mut GameContext, action: InputAction) -> Option<StateId> {
        if action != InputAction::Confirm {
            return None;
        }
        let (score, level) = (ctx.session.score, ctx.session.level);
        let rank = ctx
            .high_scores
            .add_score(score, level, platform::now_millis());
        if let (Some(_), Some(path)) = (rank, &ctx.scores_path) {
            ctx.high_scores.save_to(path);
        }
        ctx.session.sound(SoundEffect::MenuSelect);
        Some(StateId::MainMenu)
    }

    fn draw(&self, ctx: &GameContext) -> Frame {
        let mut frame = Frame::new(StateId::GameOver)
            .with_line("GAME OVER")
            .with_line(format!("Final score: {}", ctx.session.score))
            .with_line(format!("Level reached: {}", ctx.session.level));
        if self.new_high_score {
            frame = frame.with_line("NEW HIGH SCORE!");
        }
        frame.with_line("Press Enter to continue")
    }
}

/// Owns every screen and the active one
pub struct StateManager {
    states: Vec<Box<dyn GameScreen>>,
    current: StateId,
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}

impl StateManager {
    /// All six screens, starting at the main menu
    pub fn new() -> Self {
        let states: Vec<Box<dyn GameScreen>> = vec![
            Box::new(MainMenuState::default()),
            Box::new(HighScoresState),
            Box::new(PlayingState),
            Box::new(PausedState::default()),
            Box::new(LevelTransitionState),
            Box::new(GameOverState::default()),
        ];
        debug_assert!(
            states
                .iter()
                .zip(StateId::ALL)
                .all(|(s, id)| s.id() == id)
        );
        Self {
            states,
            current: StateId::MainMenu,
        }
    }

    /// Replace the screen registered under its id
    pub fn register(&mut self, screen: Box<dyn GameScreen>) {
        let index = screen.id().index();
        self.states[index] = screen;
    }

    pub fn current(&self) -> StateId {
        self.current
    }

    /// Run the first state's enter hook
    pub fn start(&mut self, ctx: &mut GameContext) {
        self.states[self.current.index()].on_enter(ctx);
    }

    pub fn change_state(&mut self, ctx: &mut GameContext, next: StateId) {
        log::info!("State {:?} -> {:?}", self.current, next);
        self.states[self.current.index()].on_exit(ctx);
        self.current = next;
        self.states[next.index()].on_enter(ctx);
    }

    pub fn handle_input(&mut self, ctx: &mut GameContext, action: InputAction) {
        if let Some(next) = self.states[self.current.index()].handle_input(ctx, action) {
            self.change_state(ctx, next);
        }
    }

    pub fn update(&mut self, ctx: &mut GameContext, held: &TickInput, dt: f32) {
        if let Some(next) = self.states[self.current.index()].update(ctx, held, dt) {
            self.change_state(ctx, next);
        }
    }

    pub fn draw(&self, ctx: &GameContext) -> Frame {
        self.states[self.current.index()].draw(ctx)
    }
}
