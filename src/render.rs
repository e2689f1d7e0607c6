use crate::Coords;
use crate::game::{GameSession, GameState, GRID_WIDTH, GRID_HEIGHT, rounded_half};

// Every grid cell takes two terminal columns, so the board looks square
const CELL_COLUMNS: usize = 2;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Block {
    Wall,
    Food,
    PlayerHead,
    PlayerTail,
    Empty,
}

impl Block {
    pub fn glyph(&self) -> &'static str {
        match self {
            Block::Wall => "##",
            Block::Food => "<>",
            Block::PlayerHead => "@@",
            Block::PlayerTail => "oo",
            Block::Empty => "  ",
        }
    }
}

/// Builds the whole frame for the current session, one line per grid row.
pub fn render(session: &GameSession) -> String {
    let lines = match session.state() {
        GameState::Waiting => message_screen(&[
            "Press space to play!".to_string(),
            "Press escape to exit".to_string(),
        ]),
        GameState::Playing => game_screen(session),
        GameState::Over => message_screen(&[
            "Game Over".to_string(),
            format!("Your Score is {}", session.score()),
            "Press space to play again!".to_string(),
            "Press escape to exit".to_string(),
        ]),
    };

    lines.join("\n")
}

pub fn block_at(session: &GameSession, pos: Coords) -> Block {
    let (x, y) = pos;
    let player = session.player();

    if x == 1 || x == GRID_WIDTH || y == 1 || y == GRID_HEIGHT {
        Block::Wall
    } else if session.is_food(pos) {
        Block::Food
    } else if player.is_head(pos) {
        Block::PlayerHead
    } else if player.is_tail(pos) {
        Block::PlayerTail
    } else {
        Block::Empty
    }
}

///////////////////////////////////////////////////////////////////////////////

fn game_screen(session: &GameSession) -> Vec<String> {
    (1..=GRID_HEIGHT)
        .map(|y| {
            let mut line: String = (1..=GRID_WIDTH)
                .map(|x| block_at(session, (x, y)).glyph())
                .collect();

            if y == GRID_HEIGHT {
                line.push_str(&format!("Your Score: {}", session.score()));
            }

            line
        })
        .collect()
}

/// Blank rows with `msg` centered horizontally, starting at the middle row.
fn message_screen(msg: &[String]) -> Vec<String> {
    let width = GRID_WIDTH as usize * CELL_COLUMNS;
    let first_row = rounded_half(GRID_HEIGHT) as usize;
    let mut lines = vec![String::new(); GRID_HEIGHT as usize];

    for (i, text) in msg.iter().enumerate() {
        let padded = format!("{line: ^width$}", line = text, width = width);
        lines[first_row - 1 + i] = padded.trim_end().to_string();
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Input;
    use crate::snake::Player;
    use rand::{SeedableRng, rngs::StdRng};

    fn lines(frame: &str) -> Vec<&str> {
        frame.split('\n').collect()
    }

    #[test]
    fn waiting_frame() {
        let session = GameSession::new();
        let frame = render(&session);
        let rows = lines(&frame);

        assert_eq!(rows.len(), GRID_HEIGHT as usize);
        assert_eq!(rows[9].trim(), "Press space to play!");
        assert_eq!(rows[10].trim(), "Press escape to exit");
        assert!(rows[9].starts_with(' '));
        assert!(rows.iter().enumerate().all(|(i, row)| i == 9 || i == 10 || row.is_empty()));
    }

    #[test]
    fn game_over_frame() {
        let mut session = GameSession::new();
        session.handle_input(Input::Start);
        let mut rng = StdRng::seed_from_u64(1);
        while session.state() == GameState::Playing {
            session.update(101, &mut rng);
        }

        let frame = render(&session);
        let rows = lines(&frame);
        assert_eq!(rows.len(), GRID_HEIGHT as usize);
        assert_eq!(rows[9].trim(), "Game Over");
        assert_eq!(rows[10].trim(), "Your Score is 0");
        assert_eq!(rows[11].trim(), "Press space to play again!");
        assert_eq!(rows[12].trim(), "Press escape to exit");
        assert!(rows[13].is_empty());
    }

    #[test]
    fn playing_frame() {
        let mut session = GameSession::new();
        session.handle_input(Input::Start);

        let frame = render(&session);
        let rows = lines(&frame);
        let row_width = GRID_WIDTH as usize * CELL_COLUMNS;

        assert_eq!(rows.len(), GRID_HEIGHT as usize);
        assert_eq!(rows[0], "##".repeat(GRID_WIDTH as usize));
        assert!(rows[1].starts_with("##  "));
        assert!(rows[1].ends_with("  ##"));
        assert_eq!(rows[9].len(), row_width);
        assert_eq!(&rows[9][14 * CELL_COLUMNS..15 * CELL_COLUMNS], "@@");
        assert_eq!(rows[19], format!("{}Your Score: 0", "##".repeat(GRID_WIDTH as usize)));
    }

    #[test]
    fn glyph_precedence() {
        let mut session = GameSession::new();
        session.handle_input(Input::Start);
        session.set_board(
            Player::from_segments(vec![(5, 5), (6, 5), (7, 5)]),
            &[(1, 1), (5, 5), (7, 5), (10, 10)],
        );

        assert_eq!(block_at(&session, (1, 1)), Block::Wall);
        assert_eq!(block_at(&session, (1, 10)), Block::Wall);
        assert_eq!(block_at(&session, (5, 5)), Block::Food);
        assert_eq!(block_at(&session, (7, 5)), Block::Food);
        assert_eq!(block_at(&session, (6, 5)), Block::PlayerTail);
        assert_eq!(block_at(&session, (10, 10)), Block::Empty);

        session.set_board(Player::from_segments(vec![(5, 5), (6, 5)]), &[]);
        assert_eq!(block_at(&session, (5, 5)), Block::PlayerHead);
        assert_eq!(block_at(&session, (6, 5)), Block::PlayerTail);
        assert_eq!(block_at(&session, (15, 10)), Block::Empty);
    }
}
