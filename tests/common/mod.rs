//! The 4x3 world from Russell & Norvig, Artificial Intelligence: A Modern
//! Approach (4th ed.), p. 562.
//!
//! Squares are indexed `[x][y]` with `(0, 0)` bottom left. `(1, 1)` is a wall,
//! `(3, 2)` pays +1 and `(3, 1)` pays -1; both goals are terminal. A move goes
//! the intended way with probability 0.8 and slips to either side with 0.1.
//! Bumping into the wall or the edge leaves the agent where it is.

#![allow(dead_code)]

use mdp_solver::{Process, ProcessBuilder, StateId, Transition};

pub const WIDTH: usize = 4;
pub const HEIGHT: usize = 3;
pub const DISCOUNT: f64 = 0.99;

pub struct World {
    pub process: Process,
    squares: [[StateId; HEIGHT]; WIDTH],
}

impl World {
    pub fn square(&self, x: usize, y: usize) -> StateId {
        self.squares[x][y]
    }

    /// Name of the action `policy` takes at `(x, y)`.
    pub fn move_at(&self, policy: &mdp_solver::Policy, x: usize, y: usize) -> Option<&str> {
        self.process
            .chosen_action(policy, self.square(x, y))
            .map(|a| a.name())
    }
}

fn is_wall(x: usize, y: usize) -> bool {
    (x, y) == (1, 1)
}

fn is_positive_goal(x: usize, y: usize) -> bool {
    (x, y) == (3, 2)
}

fn is_negative_goal(x: usize, y: usize) -> bool {
    (x, y) == (3, 1)
}

#[derive(Clone, Copy)]
enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    fn name(self) -> &'static str {
        match self {
            Direction::Up => "UP",
            Direction::Right => "RIGHT",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
        }
    }

    // The two directions an intended move can slip into.
    fn slips(self) -> [Direction; 2] {
        match self {
            Direction::Up => [Direction::Left, Direction::Right],
            Direction::Right => [Direction::Up, Direction::Down],
            Direction::Down => [Direction::Right, Direction::Left],
            Direction::Left => [Direction::Down, Direction::Up],
        }
    }

    fn step(self, x: usize, y: usize) -> Option<(usize, usize)> {
        let (nx, ny) = match self {
            Direction::Up => (Some(x), y.checked_add(1)),
            Direction::Right => (x.checked_add(1), Some(y)),
            Direction::Down => (Some(x), y.checked_sub(1)),
            Direction::Left => (x.checked_sub(1), Some(y)),
        };
        let (nx, ny) = (nx?, ny?);
        (nx < WIDTH && ny < HEIGHT && !is_wall(nx, ny)).then_some((nx, ny))
    }
}

/// Builds the world where every non-goal square pays `reward_to_move`.
pub fn four_by_three(reward_to_move: f64) -> World {
    let reward = |x: usize, y: usize| {
        if is_positive_goal(x, y) {
            1.0
        } else if is_negative_goal(x, y) {
            -1.0
        } else {
            reward_to_move
        }
    };

    let mut builder = ProcessBuilder::new();
    let mut squares = [[StateId::new(0); HEIGHT]; WIDTH];
    for (x, column) in squares.iter_mut().enumerate() {
        for (y, square) in column.iter_mut().enumerate() {
            *square = builder.add_state(format!("Square {x},{y}")).unwrap();
        }
    }

    let outcome = |x: usize, y: usize, direction: Direction, probability: f64| {
        let (tx, ty) = direction.step(x, y).unwrap_or((x, y));
        Transition::new(squares[tx][ty], probability, reward(tx, ty))
    };

    for x in 0..WIDTH {
        for y in 0..HEIGHT {
            if is_wall(x, y) || is_positive_goal(x, y) || is_negative_goal(x, y) {
                continue;
            }
            for direction in [Direction::Up, Direction::Right, Direction::Down, Direction::Left] {
                let [first, second] = direction.slips();
                builder
                    .add_action(
                        squares[x][y],
                        direction.name(),
                        vec![
                            outcome(x, y, direction, 0.8),
                            outcome(x, y, first, 0.1),
                            outcome(x, y, second, 0.1),
                        ],
                    )
                    .unwrap();
            }
        }
    }

    World {
        process: builder.build(DISCOUNT).unwrap(),
        squares,
    }
}
