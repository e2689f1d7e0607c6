use std::{thread::sleep, time::{Duration, Instant}};

use crate::{Coords, GridInt};
use crate::render::render;
use crate::snake::{Player, Direction::{self, *}};
use crate::term::{TermManager, key_to_input};

use log::info;
use rand::Rng;

pub const GRID_WIDTH: GridInt = 30;
pub const GRID_HEIGHT: GridInt = 20;

const TICK_INTERVAL: Duration = Duration::from_micros(16_667);
const MOVE_INTERVAL_MS: u64 = 100;
const NEW_FOOD_INTERVAL_MS: u64 = 2000;

pub const MAX_FOOD_COUNT: usize = 3;
const FOOD_SCORE: u64 = 100;
// Food never lands on the walls or on the ring of cells right inside them
const FOOD_MARGIN: GridInt = 2;

const INITIAL_DIRECTION: Direction = Left;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    Waiting,
    Playing,
    Over,
}

/// Discrete commands delivered by the input collaborator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Move(Direction),
    Start,
    Quit,
    ForceQuit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Everything the update engine owns: the player, food slots, score,
/// timers, direction and the state machine.
pub struct GameSession {
    state: GameState,
    direction: Direction,
    player: Player,
    foods: [Option<Coords>; MAX_FOOD_COUNT],
    score: u64,
    time_since_last_food: u64,
    time_since_last_move: u64,
}

impl GameSession {
    pub fn new() -> Self {
        GameSession {
            state: GameState::Waiting,
            direction: INITIAL_DIRECTION,
            player: Player::new(grid_center()),
            foods: [None; MAX_FOOD_COUNT],
            score: 0,
            time_since_last_food: 0,
            time_since_last_move: 0,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn foods(&self) -> impl Iterator<Item = Coords> + '_ {
        self.foods.iter().flatten().copied()
    }

    pub fn food_count(&self) -> usize {
        self.foods().count()
    }

    pub fn is_food(&self, pos: Coords) -> bool {
        self.foods().any(|food| food == pos)
    }

    pub fn handle_input(&mut self, input: Input) -> Flow {
        if input == Input::ForceQuit {
            info!("Force quit requested");
            return Flow::Exit;
        }

        match (self.state, input) {
            (GameState::Playing, Input::Move(dir)) => {
                if !dir.is_opposite(self.direction) {
                    self.direction = dir;
                }
            },
            (GameState::Playing, _) => {},
            (_, Input::Start) => self.start(),
            (_, Input::Quit) => {
                info!("Quit from {:?} screen", self.state);
                return Flow::Exit;
            },
            _ => {},
        }

        Flow::Continue
    }

    /// Advances the simulation by `delta_ms` milliseconds of wall-clock time.
    pub fn update<R: Rng>(&mut self, delta_ms: u64, rng: &mut R) {
        if self.state != GameState::Playing {
            return;
        }

        self.time_since_last_food += delta_ms;
        self.time_since_last_move += delta_ms;

        if self.food_count() < MAX_FOOD_COUNT && self.time_since_last_food > NEW_FOOD_INTERVAL_MS {
            let candidate = (
                rng.gen_range(1 + FOOD_MARGIN..=GRID_WIDTH - FOOD_MARGIN),
                rng.gen_range(1 + FOOD_MARGIN..=GRID_HEIGHT - FOOD_MARGIN),
            );
            self.place_food(candidate);
            self.time_since_last_food = 0;
        }

        if self.time_since_last_move > MOVE_INTERVAL_MS {
            self.player.step(self.direction);
            self.eat_food();
            self.check_collisions();
            self.time_since_last_move = 0;
        }
    }

    #[cfg(test)]
    pub fn set_board(&mut self, player: Player, foods: &[Coords]) {
        self.player = player;
        self.foods = [None; MAX_FOOD_COUNT];
        for (slot, food) in self.foods.iter_mut().zip(foods) {
            *slot = Some(*food);
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn start(&mut self) {
        info!("Starting a new game");
        self.player = Player::new(grid_center());
        self.score = 0;
        self.foods = [None; MAX_FOOD_COUNT];
        self.time_since_last_food = 0;
        self.time_since_last_move = 0;
        self.direction = INITIAL_DIRECTION;
        self.state = GameState::Playing;
    }

    fn place_food(&mut self, pos: Coords) -> bool {
        if self.player.occupies(pos) {
            info!("Food candidate {:?} is under the player, dropped", pos);
            return false;
        }

        match self.foods.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                info!("Food spawned at {:?}", pos);
                *slot = Some(pos);
                true
            },
            None => false,
        }
    }

    fn eat_food(&mut self) {
        let head = self.player.head();
        let eaten = self.foods.iter_mut().find(|slot| **slot == Some(head));

        if let Some(slot) = eaten {
            *slot = None;
            self.player.grow(self.direction);
            self.score += FOOD_SCORE;
            info!("Food eaten at {:?}, score {}", head, self.score);
        }
    }

    fn check_collisions(&mut self) {
        let (x, y) = self.player.head();

        if x == 1 || x == GRID_WIDTH || y == 1 || y == GRID_HEIGHT {
            info!("Hit the wall at {:?}, length {}, score {}", (x, y), self.player.len(), self.score);
            self.state = GameState::Over;
        } else if self.player.hit_itself() {
            info!("Hit itself at {:?}, length {}, score {}", (x, y), self.player.len(), self.score);
            self.state = GameState::Over;
        }
    }
}

/// Ticks the session at a fixed rate until the player quits.
pub fn run(term: &mut TermManager) -> crossterm::Result<()> {
    let mut session = GameSession::new();
    let mut rng = rand::thread_rng();
    let mut last_update = Instant::now();
    let mut ticker = Ticker::new(last_update);

    term.draw_frame(&render(&session))?;

    loop {
        sleep(ticker.wait_time(Instant::now()));

        for key_ev in term.read_key_events_queue()? {
            if let Some(input) = key_to_input(&key_ev) {
                if session.handle_input(input) == Flow::Exit {
                    return Ok(());
                }
            }
        }

        // Whole milliseconds only; the remainder rolls over to the next tick
        let delta_ms = last_update.elapsed().as_millis() as u64;
        last_update += Duration::from_millis(delta_ms);

        session.update(delta_ms, &mut rng);
        term.draw_frame(&render(&session))?;
    }
}

/// Interval timer for the driver loop. The next tick is due one interval
/// after the current one fired; ticks missed during a stall are dropped.
struct Ticker {
    next_tick: Instant,
}

impl Ticker {
    fn new(now: Instant) -> Self {
        Ticker { next_tick: now + TICK_INTERVAL }
    }

    /// How long to sleep before the tick due at `now`, scheduling the one after it.
    fn wait_time(&mut self, now: Instant) -> Duration {
        let wait = self.next_tick.saturating_duration_since(now);
        self.next_tick = now + wait + TICK_INTERVAL;
        wait
    }
}

fn grid_center() -> Coords {
    (rounded_half(GRID_WIDTH), rounded_half(GRID_HEIGHT))
}

/// `n / 2`, rounding halves up.
pub fn rounded_half(n: GridInt) -> GridInt {
    (n + 1) / 2
}
