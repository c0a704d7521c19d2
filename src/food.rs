use log::{debug, warn};
use rand::Rng;

use crate::snake::Snake;
use crate::{Coords, Field};

/// Random draws before falling back to a scan of the whole field.
const ATTEMPTS_PER_CELL: usize = 4;

/// The two cells the head will enter next if the player does nothing.
pub fn lookahead(field: &Field, snake: &Snake) -> [Coords; 2] {
    let dir = snake.next_direction();
    let one = field.step(snake.head(), dir);
    [one, field.step(one, dir)]
}

pub fn is_free(pos: Coords, snake: &Snake, ahead: &[Coords; 2]) -> bool {
    !ahead.contains(&pos) && !snake.contains(pos)
}

/// Picks a food cell off the snake and out of the head's straight path.
/// Returns `None` when no such cell is left.
pub fn place_food<R: Rng + ?Sized>(field: &Field, snake: &Snake, rng: &mut R) -> Option<Coords> {
    let ahead = lookahead(field, snake);

    for _ in 0..field.cell_count() * ATTEMPTS_PER_CELL {
        let pos = Coords::new(rng.gen_range(0..field.width()), rng.gen_range(0..field.height()));
        if is_free(pos, snake, &ahead) {
            debug!("food placed at {}", pos);
            return Some(pos);
        }
    }

    warn!("random food placement gave up, scanning {} cells", field.cell_count());
    let pos = field.cells().find(|pos| is_free(*pos, snake, &ahead));
    if let Some(pos) = pos {
        debug!("food placed at {} by scan", pos);
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::Direction::{self, *};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn random_snake(rng: &mut StdRng, field: &Field) -> Snake {
        let dirs = [Up, Right, Down, Left];
        let head = Coords::new(rng.gen_range(0..field.width()), rng.gen_range(0..field.height()));
        let dir: Direction = dirs[rng.gen_range(0..4)];
        let len = rng.gen_range(1..30);
        let mut snake = Snake::new(head, len, dir, field, &Settings::default());
        let turn = dirs[rng.gen_range(0..4)];
        snake.set_direction(turn);
        snake
    }

    #[test]
    fn never_on_body_or_in_path() {
        let field = Field::new(40, 40);
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for _ in 0..1000 {
            let snake = random_snake(&mut rng, &field);
            let food = place_food(&field, &snake, &mut rng).unwrap();
            let ahead = lookahead(&field, &snake);

            assert!(field.contains(food));
            assert!(!snake.contains(food));
            assert!(!ahead.contains(&food));
        }
    }

    #[test]
    fn lookahead_wraps() {
        let field = Field::new(40, 40);
        let snake = Snake::new(Coords::new(39, 3), 5, Right, &field, &Settings::default());
        assert_eq!(lookahead(&field, &snake), [Coords::new(0, 3), Coords::new(1, 3)]);
    }

    #[test]
    fn finds_the_last_free_cell() {
        // 3x3 field, snake covers the top row plus (1,1) and (2,1); head at (0,0)
        // going Up puts (0,2) and (0,1) in the lookahead, leaving (1,2) and (2,2)
        let field = Field::new(3, 3);
        let body = vec![
            Coords::new(0, 0),
            Coords::new(1, 0),
            Coords::new(1, 1),
            Coords::new(2, 1),
            Coords::new(2, 0),
        ];
        let snake = Snake::from_body(body, Up, &Settings::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..20 {
            let food = place_food(&field, &snake, &mut rng).unwrap();
            assert!([Coords::new(1, 2), Coords::new(2, 2)].contains(&food));
        }
    }

    #[test]
    fn none_when_field_is_full() {
        let field = Field::new(3, 1);
        let body = vec![Coords::new(0, 0), Coords::new(1, 0), Coords::new(2, 0)];
        let snake = Snake::from_body(body, Left, &Settings::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        assert_eq!(place_food(&field, &snake, &mut rng), None);
    }
}
