use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::info;
use rand::rngs::ThreadRng;

use crate::audio::{AudioManager, SoundId};
use crate::input::direction_for_key;
use crate::menu::SelectList;
use crate::render;
use crate::round::{Mode, Round, TickOutcome};
use crate::scheduler::Scheduler;
use crate::store::{LeaderboardEntry, Store};

const POLL_TIMEOUT: Duration = Duration::from_millis(10);
const MAX_NAME_LEN: usize = 16;
const VOLUME_STEP: u8 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Screen {
    MainMenu,
    ModeSelect,
    InGame,
    Paused,
    Leaderboards,
    Options,
    Credits,
}

pub fn validate_name(name: &str) -> Result<(), &'static str> {
    if name.len() < 3 {
        return Err("A minimum of 3 characters are required");
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err("Only alphanumeric characters are allowed");
    }
    Ok(())
}

fn is_quit_combo(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

pub struct App {
    store: Store,
    audio: AudioManager,
    round: Round,
    scheduler: Scheduler,
    rng: ThreadRng,
    screen: Screen,
    previous: Screen,
    main_menu: SelectList,
    mode_menu: SelectList,
    pause_menu: SelectList,
    board_tabs: SelectList,
    options_menu: SelectList,
    credits_menu: SelectList,
    boards: [Vec<LeaderboardEntry>; 2],
    shown_board: usize,
    quit: bool,
    dirty: bool,
}

impl App {
    pub fn new(store: Store, audio: AudioManager) -> Self {
        let mut rng = rand::thread_rng();
        let round = Round::new(Mode::Portal, &mut rng);
        App {
            store,
            audio,
            round,
            scheduler: Scheduler::new(crate::round::START_INTERVAL_MS),
            rng,
            screen: Screen::MainMenu,
            previous: Screen::MainMenu,
            main_menu: SelectList::new(&["Play", "Leaderboards", "Options", "Credits", "Quit"]),
            mode_menu: SelectList::new(&["Portal Mode", "Wall Mode", "Back"]),
            pause_menu: SelectList::new(&["Resume", "Leaderboards", "Options", "Main Menu"]),
            board_tabs: SelectList::new(&["Portal Mode", "Wall Mode", "Back"]),
            options_menu: SelectList::new(&["Music volume", "SFX volume", "Back"]),
            credits_menu: SelectList::new(&["Back"]),
            boards: [Vec::new(), Vec::new()],
            shown_board: 0,
            quit: false,
            dirty: true,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        self.audio.play(SoundId::MenuMusic);
        while !self.quit {
            if event::poll(POLL_TIMEOUT)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        if is_quit_combo(&key) {
                            self.quit = true;
                            continue;
                        }
                        self.handle_key(key)?;
                    }
                }
            }

            if self.scheduler.poll(Instant::now()) && self.screen == Screen::InGame {
                self.step()?;
            }

            if self.dirty {
                self.draw()?;
                self.dirty = false;
            }
        }
        info!("quit requested, shutting down");
        Ok(())
    }

    fn draw(&self) -> std::io::Result<()> {
        match self.screen {
            Screen::MainMenu => render::draw_menu("slinker", &self.main_menu),
            Screen::ModeSelect => render::draw_menu("Select mode", &self.mode_menu),
            Screen::InGame => render::draw_playfield(&self.round),
            Screen::Paused => render::draw_menu("Paused", &self.pause_menu),
            Screen::Leaderboards => {
                let mode = if self.shown_board == 0 { Mode::Portal } else { Mode::Wall };
                render::draw_leaderboard(
                    &self.board_tabs,
                    mode.label(),
                    &self.boards[self.shown_board],
                )
            }
            Screen::Options => render::draw_options(
                &self.options_menu,
                self.audio.music_volume,
                self.audio.sfx_volume,
            ),
            Screen::Credits => render::draw_credits(&self.credits_menu),
        }
    }

    // One simulation tick plus its consequences outside the core.
    fn step(&mut self) -> Result<()> {
        let outcome = self.round.tick(&mut self.rng);
        self.dirty = true;
        match outcome {
            TickOutcome::Moved => {}
            TickOutcome::Ate(value) => {
                self.audio.play(SoundId::Eat);
                self.scheduler.set_interval(self.round.interval_ms, Instant::now());
                info!(
                    "ate a {}-point item, score {}, interval {} ms",
                    value, self.round.score, self.round.interval_ms
                );
            }
            TickOutcome::HitSelf => {
                self.audio.stop(SoundId::GameMusic);
                self.audio.play(SoundId::DeathBySelf);
                self.finish_round()?;
            }
            TickOutcome::HitWall => {
                self.audio.stop(SoundId::GameMusic);
                self.audio.play(SoundId::DeathByWall);
                self.finish_round()?;
            }
        }
        Ok(())
    }

    // Terminal game-over sub-state: the prompt owns the event queue until a
    // valid name arrives or the process is asked to quit.
    fn finish_round(&mut self) -> Result<()> {
        self.scheduler.disable();
        info!(
            "round over in {} mode with {} points",
            self.round.mode.label(),
            self.round.score
        );
        match self.prompt_name()? {
            Some(name) => {
                self.store.add_entry(self.round.mode, &name, self.round.score)?;
                self.round.reset(&mut self.rng);
                self.go_to(Screen::MainMenu);
                self.audio.play(SoundId::MenuMusic);
            }
            None => self.quit = true,
        }
        Ok(())
    }

    fn prompt_name(&mut self) -> Result<Option<String>> {
        let mut message = "Enter your username".to_string();
        let mut input = String::new();
        loop {
            render::draw_name_prompt(&message, &input)?;
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if is_quit_combo(&key) {
                    return Ok(None);
                }
                match key.code {
                    KeyCode::Enter => match validate_name(&input) {
                        Ok(()) => return Ok(Some(input)),
                        Err(correction) => message = correction.to_string(),
                    },
                    KeyCode::Backspace => {
                        input.pop();
                    }
                    KeyCode::Char(c) => {
                        if input.len() < MAX_NAME_LEN {
                            input.push(c);
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    fn go_to(&mut self, screen: Screen) {
        self.previous = self.screen;
        self.screen = screen;
        self.dirty = true;
    }

    fn go_back(&mut self) {
        self.screen = self.previous;
        self.dirty = true;
    }

    fn start_round(&mut self, mode: Mode) -> Result<()> {
        self.round.set_mode(mode);
        self.round.reset(&mut self.rng);
        self.scheduler.set_interval(self.round.interval_ms, Instant::now());
        self.scheduler.enable(Instant::now());
        self.audio.stop(SoundId::MenuMusic);
        self.audio.play(SoundId::GameMusic);
        self.go_to(Screen::InGame);
        info!("starting a round in {} mode", mode.label());
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.screen {
            Screen::MainMenu => self.main_menu_key(key),
            Screen::ModeSelect => self.mode_select_key(key),
            Screen::InGame => self.in_game_key(key),
            Screen::Paused => self.pause_menu_key(key),
            Screen::Leaderboards => self.leaderboards_key(key),
            Screen::Options => self.options_key(key),
            Screen::Credits => self.credits_key(key),
        }
    }

    fn navigate(list: &mut SelectList, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::Char('w') => {
                list.previous();
                true
            }
            KeyCode::Down | KeyCode::Char('s') => {
                list.next();
                true
            }
            _ => false,
        }
    }

    fn main_menu_key(&mut self, key: KeyEvent) -> Result<()> {
        if Self::navigate(&mut self.main_menu, &key) {
            self.dirty = true;
        }
        if key.code == KeyCode::Enter {
            match self.main_menu.selected_item() {
                "Play" => self.go_to(Screen::ModeSelect),
                "Leaderboards" => self.open_leaderboards()?,
                "Options" => self.go_to(Screen::Options),
                "Credits" => self.go_to(Screen::Credits),
                _ => self.quit = true,
            }
        }
        Ok(())
    }

    fn mode_select_key(&mut self, key: KeyEvent) -> Result<()> {
        if Self::navigate(&mut self.mode_menu, &key) {
            self.dirty = true;
        }
        match key.code {
            KeyCode::Enter => {
                let choice = self.mode_menu.selected_item();
                self.mode_menu.reset();
                match choice {
                    "Portal Mode" => self.start_round(Mode::Portal)?,
                    "Wall Mode" => self.start_round(Mode::Wall)?,
                    _ => self.go_back(),
                }
            }
            KeyCode::Esc => self.go_back(),
            _ => {}
        }
        Ok(())
    }

    fn in_game_key(&mut self, key: KeyEvent) -> Result<()> {
        if let Some(direction) = direction_for_key(key.code) {
            self.round.queue_direction(direction);
        } else if key.code == KeyCode::Esc {
            self.scheduler.disable();
            self.go_to(Screen::Paused);
        }
        Ok(())
    }

    fn pause_menu_key(&mut self, key: KeyEvent) -> Result<()> {
        if Self::navigate(&mut self.pause_menu, &key) {
            self.dirty = true;
        }
        match key.code {
            KeyCode::Enter => {
                let choice = self.pause_menu.selected_item();
                self.pause_menu.reset();
                match choice {
                    "Resume" => self.resume_round(),
                    "Leaderboards" => self.open_leaderboards()?,
                    "Options" => self.go_to(Screen::Options),
                    _ => {
                        // Abandoning the round resets it without recording.
                        self.round.reset(&mut self.rng);
                        self.audio.stop(SoundId::GameMusic);
                        self.audio.play(SoundId::MenuMusic);
                        self.go_to(Screen::MainMenu);
                    }
                }
            }
            KeyCode::Esc => self.resume_round(),
            _ => {}
        }
        Ok(())
    }

    fn resume_round(&mut self) {
        self.scheduler.set_interval(self.round.interval_ms, Instant::now());
        self.scheduler.enable(Instant::now());
        self.go_to(Screen::InGame);
    }

    // Board data is loaded once per visit.
    fn open_leaderboards(&mut self) -> Result<()> {
        self.boards = [
            self.store.leaderboard(Mode::Portal)?,
            self.store.leaderboard(Mode::Wall)?,
        ];
        self.board_tabs.reset();
        self.shown_board = 0;
        self.go_to(Screen::Leaderboards);
        Ok(())
    }

    fn leaderboards_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Left | KeyCode::Char('a') => {
                self.board_tabs.previous();
                self.dirty = true;
            }
            KeyCode::Right | KeyCode::Char('d') => {
                self.board_tabs.next();
                self.dirty = true;
            }
            KeyCode::Enter => {
                if self.board_tabs.selected_item() == "Back" {
                    self.board_tabs.reset();
                    self.go_back();
                }
            }
            KeyCode::Esc => {
                self.board_tabs.reset();
                self.go_back();
            }
            _ => {}
        }
        // The Back tab keeps showing whichever board was open last.
        if self.board_tabs.selected_index() < 2 {
            self.shown_board = self.board_tabs.selected_index();
        }
        Ok(())
    }

    fn options_key(&mut self, key: KeyEvent) -> Result<()> {
        if Self::navigate(&mut self.options_menu, &key) {
            self.dirty = true;
        }
        match key.code {
            KeyCode::Left | KeyCode::Char('a') => self.adjust_volume(false)?,
            KeyCode::Right | KeyCode::Char('d') => self.adjust_volume(true)?,
            KeyCode::Enter => {
                if self.options_menu.selected_item() == "Back" {
                    self.options_menu.reset();
                    self.go_back();
                }
            }
            KeyCode::Esc => {
                self.options_menu.reset();
                self.go_back();
            }
            _ => {}
        }
        Ok(())
    }

    // Volume changes apply immediately and persist on every step.
    fn adjust_volume(&mut self, increase: bool) -> Result<()> {
        match self.options_menu.selected_index() {
            0 => {
                let volume = stepped(self.audio.music_volume, increase);
                self.audio.set_music_volume(volume);
            }
            1 => {
                let volume = stepped(self.audio.sfx_volume, increase);
                self.audio.set_sfx_volume(volume);
            }
            _ => return Ok(()),
        }
        self.store.save_settings(crate::store::Settings {
            music_volume: self.audio.music_volume,
            sfx_volume: self.audio.sfx_volume,
        })?;
        self.dirty = true;
        Ok(())
    }

    fn credits_key(&mut self, key: KeyEvent) -> Result<()> {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            self.go_back();
        }
        Ok(())
    }
}

fn stepped(volume: u8, increase: bool) -> u8 {
    if increase {
        (volume + VOLUME_STEP).min(100)
    } else {
        volume.saturating_sub(VOLUME_STEP)
    }
}
