//! Engine-free snake rules: grid, snake, food, score and the run state.

use std::{collections::VecDeque, ops};
use log::{debug, info};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use serde::{Serialize, Deserialize};

/// Number of cells along each side of the square board.
pub const GRID_SIZE: i16 = 25;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Debug, Default)]
pub struct GridPoint {
    pub x: i16,
    pub y: i16,
}

impl GridPoint {
    pub const fn new(x: i16, y: i16) -> Self {
        Self {
            x, y
        }
    }

    pub fn is_on_grid(self) -> bool {
        self.x >= 0 && self.y >= 0 && self.x < GRID_SIZE && self.y < GRID_SIZE
    }
}

impl ops::Add<Self> for GridPoint {
    type Output = Self;
    fn add(self, rhs:Self) -> Self::Output {
        GridPoint { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}


/// Heading of the snake. `y` grows downward, so `Up` is `(0, -1)`.
#[derive(Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn to_point(self) -> GridPoint {
        match self {
            Direction::Up    => GridPoint { x:  0, y: -1, },
            Direction::Down  => GridPoint { x:  0, y:  1, },
            Direction::Left  => GridPoint { x: -1, y:  0, },
            Direction::Right => GridPoint { x:  1, y:  0, },
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up    => Direction::Down,
            Direction::Down  => Direction::Up,
            Direction::Left  => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}


#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct Snake {
    body: VecDeque<GridPoint>,
    direction: Direction,
    pending_growth: bool,
}

impl Snake {
    pub const INITIAL_BODY: [GridPoint; 3] = [
        GridPoint::new(6, 9),
        GridPoint::new(5, 9),
        GridPoint::new(4, 9),
    ];
    pub const INITIAL_DIRECTION: Direction = Direction::Right;

    #[allow(clippy::new_without_default)]
    pub fn new() -> Snake {
        let body = VecDeque::<GridPoint>::with_capacity((GRID_SIZE * GRID_SIZE) as usize);
        let mut new_snake = Snake { body, direction: Self::INITIAL_DIRECTION, pending_growth: false };
        new_snake.reset();
        new_snake
    }

    /// Builds a snake from an explicit body, head first. Panics on an empty body.
    #[cfg(test)]
    pub(crate) fn with_body(body: impl IntoIterator<Item = GridPoint>, direction: Direction) -> Snake {
        let body: VecDeque<GridPoint> = body.into_iter().collect();
        assert!(!body.is_empty(), "snake body needs at least one cell");
        Snake { body, direction, pending_growth: false }
    }

    pub fn reset(&mut self) {
        self.body.clear();
        self.body.extend(Self::INITIAL_BODY);
        self.direction = Self::INITIAL_DIRECTION;
        self.pending_growth = false;
    }

    /// Moves one cell along the current heading. The tail is kept if growth was pending.
    pub fn advance(&mut self) {
        let new_head = self.head() + self.direction.to_point();
        self.body.push_front(new_head);
        if self.pending_growth {
            self.pending_growth = false;
        } else {
            self.body.pop_back();
        }
    }

    /// Changes heading unless `direction` would turn the snake straight back
    /// onto its neck. Returns whether the heading changed.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if direction == self.direction.opposite() || direction == self.direction {
            return false;
        }
        self.direction = direction;
        true
    }

    pub fn mark_growth(&mut self) {
        self.pending_growth = true;
    }

    pub fn head(&self) -> GridPoint {
        // Never empty: every constructor and `advance` keep at least one cell.
        self.body[0]
    }

    pub fn body(&self) -> &VecDeque<GridPoint> {
        &self.body
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn has_pending_growth(&self) -> bool {
        self.pending_growth
    }

    pub fn length(&self) -> usize {
        self.body.len()
    }

    /// True when the head shares a cell with any later segment.
    pub fn head_hits_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&segment| segment == head)
    }
}


#[derive(Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct Food {
    pub position: GridPoint,
}

impl Food {
    /// Random samples tried before falling back to enumerating the free cells.
    const MAX_SAMPLES: usize = 1_000;

    pub fn new<R: Rng>(snake_body: &VecDeque<GridPoint>, rng: &mut R) -> Food {
        // The initial body is three cells, the board has 625 of them.
        let position = Self::regenerate(snake_body, rng).unwrap_or_default();
        Food { position }
    }

    /// Picks a uniformly random cell not in `occupied`. Returns `None` only when
    /// the whole board is occupied.
    pub fn regenerate<R: Rng>(occupied: &VecDeque<GridPoint>, rng: &mut R) -> Option<GridPoint> {
        for _ in 0..Self::MAX_SAMPLES {
            let candidate = GridPoint {
                x: rng.gen_range(0..GRID_SIZE),
                y: rng.gen_range(0..GRID_SIZE),
            };
            if !occupied.contains(&candidate) {
                return Some(candidate);
            }
        }
        // A very long snake leaves few free cells, so scan for them instead.
        let free: Vec<GridPoint> = (0..GRID_SIZE)
            .flat_map(|y| (0..GRID_SIZE).map(move |x| GridPoint { x, y }))
            .filter(|pt| !occupied.contains(pt))
            .collect();
        free.choose(rng).copied()
    }
}


#[derive(Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Debug, Default)]
pub enum GameState {
    #[default]
    Stopped,
    Running,
}

/// Side effects of a tick that the presentation layer reacts to.
#[derive(Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub enum GameEvent {
    /// The head reached the food.
    Eat,
    /// The round ended on a wall, the snake's own body, or a full board.
    WallHit,
}


#[derive(Debug)]
pub struct SnakeGame {
    snake: Snake,
    food: Food,
    state: GameState,
    score: u32,
    rng: StdRng,
}

impl SnakeGame {
    pub fn new(seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let snake = Snake::new();
        let food = Food::new(snake.body(), &mut rng);
        Self {
            snake,
            food,
            state: GameState::Stopped,
            score: 0,
            rng,
        }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    #[cfg(test)]
    pub(crate) fn place_food(&mut self, position: GridPoint) {
        self.food.position = position;
    }

    /// Applies a directional key press. While stopped, the first press starts a
    /// new round and clears the previous score.
    pub fn handle_direction(&mut self, direction: Direction) {
        match self.state {
            GameState::Stopped => {
                self.state = GameState::Running;
                self.score = 0;
                info!("round started");
            }
            GameState::Running => {}
        }
        self.snake.request_direction(direction);
    }

    /// Runs one simulation tick and returns what happened, in order.
    /// Does nothing while stopped.
    pub fn update(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        match self.state {
            GameState::Stopped => return events,
            GameState::Running => {}
        }

        self.snake.advance();

        if self.snake.head() == self.food.position {
            self.snake.mark_growth();
            self.score += 1;
            events.push(GameEvent::Eat);
            debug!("ate food at {:?}, score {}", self.food.position, self.score);
            match Food::regenerate(self.snake.body(), &mut self.rng) {
                Some(position) => self.food.position = position,
                None => {
                    info!("board is full");
                    self.game_over(&mut events);
                    return events;
                }
            }
        }

        if !self.snake.head().is_on_grid() {
            debug!("hit the wall at {:?}", self.snake.head());
            self.game_over(&mut events);
            return events;
        }

        if self.snake.head_hits_body() {
            debug!("hit own body at {:?}", self.snake.head());
            self.game_over(&mut events);
        }

        events
    }

    fn game_over(&mut self, events: &mut Vec<GameEvent>) {
        info!("game over with score {}", self.score);
        self.snake.reset();
        // The reset body leaves 622 free cells.
        self.food.position = Food::regenerate(self.snake.body(), &mut self.rng).unwrap_or_default();
        self.state = GameState::Stopped;
        events.push(GameEvent::WallHit);
    }
}
