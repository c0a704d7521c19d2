use std::collections::VecDeque;
use std::time::Duration;

use crate::config::Settings;
use crate::{Coords, Direction, Field};
use MoveResult::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveResult {
    Moved { new_head: Coords, old_tail: Option<Coords>, ate: bool },
    Crashed { at: Coords },
}

#[derive(Debug, Clone)]
pub struct Snake {
    /// Head first.
    body: VecDeque<Coords>,
    direction: Direction,
    next_direction: Direction,
    pending_growth: u32,
    growth_per_food: u32,
    period: Duration,
    speedup: Duration,
    min_period: Duration,
    elapsed: Duration,
}

impl Snake {
    /// A straight snake with its head at `head`, trailing `size - 1` cells
    /// behind it against `direction`.
    pub fn new(
        head: Coords,
        size: usize,
        direction: Direction,
        field: &Field,
        settings: &Settings,
    ) -> Self {
        let mut body = VecDeque::with_capacity(size);
        let mut pos = head;
        for _ in 0..size.max(1) {
            body.push_back(pos);
            pos = field.step(pos, direction.opposite());
        }

        Self::with_body(body, direction, settings)
    }

    /// Builds a snake from explicit cells, head first. `None` for no cells.
    pub fn from_body(body: Vec<Coords>, direction: Direction, settings: &Settings) -> Option<Self> {
        if body.is_empty() {
            return None;
        }
        Some(Self::with_body(body.into(), direction, settings))
    }

    fn with_body(body: VecDeque<Coords>, direction: Direction, settings: &Settings) -> Self {
        Snake {
            body,
            direction,
            next_direction: direction,
            pending_growth: 0,
            growth_per_food: settings.growth_per_food,
            period: settings.snake_period,
            speedup: settings.snake_speedup,
            min_period: settings.snake_min_period,
            elapsed: Duration::ZERO,
        }
    }

    pub fn body(&self) -> &VecDeque<Coords> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn contains(&self, pos: Coords) -> bool {
        self.body.contains(&pos)
    }

    pub fn get_direction(&self) -> Direction {
        self.direction
    }

    pub fn next_direction(&self) -> Direction {
        self.next_direction
    }

    pub fn pending_growth(&self) -> u32 {
        self.pending_growth
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Queues a turn for the next step. Turning straight back against the
    /// direction already applied is refused, since the head would land on the
    /// neck. A later valid call overwrites an earlier one.
    pub fn set_direction(&mut self, new_direction: Direction) -> bool {
        if new_direction.is_reverse_of(self.direction) {
            return false;
        }
        self.next_direction = new_direction;
        true
    }

    /// Adds `delta` to the movement clock and takes a step when a full period
    /// has built up, carrying the remainder.
    pub fn advance(&mut self, delta: Duration, field: &Field, food: Coords) -> Option<MoveResult> {
        self.elapsed += delta;
        if self.elapsed < self.period {
            return None;
        }
        self.elapsed -= self.period;

        Some(self.move_step(field, food))
    }

    pub fn move_step(&mut self, field: &Field, food: Coords) -> MoveResult {
        let old_head = self.head();

        let old_tail = if self.pending_growth > 0 {
            self.pending_growth -= 1;
            None
        } else {
            self.body.pop_back()
        };

        let new_head = field.step(old_head, self.next_direction);
        self.direction = self.next_direction;

        let ate = new_head == food;
        if ate {
            self.grow();
        }

        if self.body.contains(&new_head) {
            return Crashed { at: new_head };
        }

        self.body.push_front(new_head);

        Moved { new_head, old_tail, ate }
    }

    pub fn grow(&mut self) {
        self.pending_growth += self.growth_per_food;
        self.period = self.period.saturating_sub(self.speedup).max(self.min_period);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::*;

    const NO_FOOD: Coords = Coords::new(-1, -1);

    fn field() -> Field {
        Field::new(40, 40)
    }

    fn snake() -> Snake {
        Snake::new(Coords::new(20, 30), 5, Up, &field(), &Settings::default())
    }

    #[test]
    fn starts_straight_behind_the_head() {
        let s = snake();
        let body: Vec<_> = s.body().iter().copied().collect();
        assert_eq!(body, (30..35).map(|y| Coords::new(20, y)).collect::<Vec<_>>());
    }

    #[test]
    fn refuses_reversal() {
        let mut s = Snake::new(Coords::new(10, 10), 5, Right, &field(), &Settings::default());
        assert!(!s.set_direction(Left));
        assert_eq!(s.next_direction(), Right);
        assert!(s.set_direction(Up));
        assert_eq!(s.next_direction(), Up);
        assert!(s.set_direction(Down));
        assert_eq!(s.next_direction(), Down);
    }

    #[test]
    fn reversal_is_judged_against_applied_direction() {
        let mut s = snake();
        assert!(s.set_direction(Left));
        // Right reverses the queued Left but not the applied Up
        assert!(s.set_direction(Right));
        assert_eq!(s.next_direction(), Right);
    }

    #[test]
    fn turn_waits_for_period() {
        let mut s = snake();
        assert!(!s.set_direction(Down));
        assert!(s.set_direction(Left));
        assert_eq!(s.head(), Coords::new(20, 30));

        assert_eq!(s.advance(Duration::from_millis(50), &field(), NO_FOOD), None);
        let res = s.advance(Duration::from_millis(50), &field(), NO_FOOD);
        let tail = Some(Coords::new(20, 34));
        assert_eq!(res, Some(Moved { new_head: Coords::new(19, 30), old_tail: tail, ate: false }));
        assert_eq!(s.head(), Coords::new(19, 30));
        assert_eq!(s.get_direction(), Left);
        assert_eq!(s.len(), 5);
    }

    #[test]
    fn growth_keeps_the_tail() {
        let mut s = snake();
        let food = Coords::new(20, 29);
        let res = s.move_step(&field(), food);
        assert_eq!(res, Moved { new_head: food, old_tail: Some(Coords::new(20, 34)), ate: true });
        assert_eq!(s.len(), 5);
        assert_eq!(s.pending_growth(), 2);

        assert!(matches!(s.move_step(&field(), NO_FOOD), Moved { old_tail: None, .. }));
        assert_eq!(s.len(), 6);
        assert!(matches!(s.move_step(&field(), NO_FOOD), Moved { old_tail: None, .. }));
        assert_eq!(s.len(), 7);
        assert!(matches!(s.move_step(&field(), NO_FOOD), Moved { old_tail: Some(_), .. }));
        assert_eq!(s.len(), 7);
    }

    #[test]
    fn period_never_drops_below_floor() {
        let mut s = snake();
        let start = s.period();
        s.grow();
        assert_eq!(s.period(), start - Duration::from_millis(10));
        for _ in 0..100 {
            let before = s.period();
            s.grow();
            assert!(s.period() <= before);
            assert!(s.period() >= Duration::from_millis(50));
        }
        assert_eq!(s.period(), Duration::from_millis(50));
    }

    #[test]
    fn period_unchanged_without_food() {
        let mut s = snake();
        for _ in 0..20 {
            s.move_step(&field(), NO_FOOD);
        }
        assert_eq!(s.period(), Duration::from_millis(100));
    }

    #[test]
    fn wraps_across_the_top() {
        let mut s = Snake::new(Coords::new(5, 0), 3, Up, &field(), &Settings::default());
        let res = s.move_step(&field(), NO_FOOD);
        assert!(matches!(res, Moved { new_head: Coords { x: 5, y: 39 }, .. }));
    }

    #[test]
    fn crashes_into_itself() {
        // Head at (5,5) heading Left, body curls round so (4,5) is occupied:
        //   (4,4) (5,4)
        //   (4,5) (5,5)<- head
        //   (4,6)
        let body = vec![
            Coords::new(5, 5),
            Coords::new(5, 4),
            Coords::new(4, 4),
            Coords::new(4, 5),
            Coords::new(4, 6),
        ];
        let mut s = Snake::from_body(body, Down, &Settings::default()).unwrap();
        assert!(s.set_direction(Left));
        let res = s.move_step(&field(), NO_FOOD);
        assert_eq!(res, Crashed { at: Coords::new(4, 5) });
        // head not inserted
        assert_eq!(s.head(), Coords::new(5, 5));
    }

    #[test]
    fn chasing_own_tail_is_safe() {
        // 2x2 loop: the head moves into the cell the tail is leaving
        let body = vec![Coords::new(5, 5), Coords::new(5, 4), Coords::new(4, 4), Coords::new(4, 5)];
        let mut s = Snake::from_body(body, Down, &Settings::default()).unwrap();
        assert!(s.set_direction(Left));
        let res = s.move_step(&field(), NO_FOOD);
        let cell = Coords::new(4, 5);
        assert_eq!(res, Moved { new_head: cell, old_tail: Some(cell), ate: false });
        assert_eq!(s.len(), 4);
    }

    #[test]
    fn needs_at_least_one_cell() {
        assert!(Snake::from_body(vec![], Up, &Settings::default()).is_none());
    }

    #[test]
    fn single_cell_snake_moves() {
        let mut s = Snake::from_body(vec![Coords::new(1, 1)], Right, &Settings::default()).unwrap();
        let res = s.move_step(&field(), NO_FOOD);
        let tail = Some(Coords::new(1, 1));
        assert_eq!(res, Moved { new_head: Coords::new(2, 1), old_tail: tail, ate: false });
        assert_eq!(s.len(), 1);
    }
}
