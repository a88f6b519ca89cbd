use chrono::{DateTime, Utc};
use rand::Rng;

const WEEK_SECONDS: i64 = 60 * 60 * 24 * 7;

/// Uniform integer generator used for random picks.
pub trait RandomSource {
    /// Index in `0..bound`. `bound` is never zero.
    fn next_index(&mut self, bound: usize) -> usize;
}

/// Backed by the thread-local generator
#[derive(Debug, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_index(&mut self, bound: usize) -> usize {
        rand::thread_rng().gen_range(0..bound)
    }
}

pub fn pick_first<T>(items: &[T]) -> Option<&T> {
    items.first()
}

pub fn pick_random<'a, T, R: RandomSource + ?Sized>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.next_index(items.len()))
}

/// Same item for a whole week, rotating through `items` as weeks pass
pub fn pick_weekly<T>(items: &[T], now: DateTime<Utc>) -> Option<&T> {
    if items.is_empty() {
        return None;
    }
    let week = now.timestamp().div_euclid(WEEK_SECONDS);
    items.get(week.rem_euclid(items.len() as i64) as usize)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::VecDeque;

    /// Replays a fixed list of indices
    pub struct Scripted(pub VecDeque<usize>);

    impl Scripted {
        pub fn new(indices: &[usize]) -> Self {
            Scripted(indices.iter().copied().collect())
        }
    }

    impl RandomSource for Scripted {
        fn next_index(&mut self, bound: usize) -> usize {
            let i = self.0.pop_front().expect("scripted source exhausted");
            assert!(i < bound, "scripted index {} out of bound {}", i, bound);
            i
        }
    }

    #[test]
    fn first_of_empty_is_none() {
        let empty: Vec<u8> = vec![];
        assert_eq!(pick_first(&empty), None);
        assert_eq!(pick_first(&[3, 4]), Some(&3));
    }

    #[test]
    fn random_of_empty_is_none() {
        let empty: Vec<u8> = vec![];
        assert_eq!(pick_random(&empty, &mut ThreadRandom), None);
    }

    #[test]
    fn random_of_single_is_that_item() {
        for _ in 0..50 {
            assert_eq!(pick_random(&["only"], &mut ThreadRandom), Some(&"only"));
        }
    }

    #[test]
    fn random_uses_injected_index() {
        let mut rng = Scripted::new(&[2, 0]);
        let items = ["a", "b", "c"];
        assert_eq!(pick_random(&items, &mut rng), Some(&"c"));
        assert_eq!(pick_random(&items, &mut rng), Some(&"a"));
    }

    #[test]
    fn thread_random_stays_in_bounds() {
        let mut rng = ThreadRandom;
        for _ in 0..200 {
            assert!(rng.next_index(3) < 3);
        }
    }

    #[test]
    fn weekly_rotates_by_week() {
        let items = ["a", "b", "c"];
        let epoch = Utc.timestamp_opt(0, 0).unwrap();
        assert_eq!(pick_weekly(&items, epoch), Some(&"a"));
        let next = Utc.timestamp_opt(WEEK_SECONDS, 0).unwrap();
        assert_eq!(pick_weekly(&items, next), Some(&"b"));
        let same = Utc.timestamp_opt(WEEK_SECONDS * 2 - 1, 0).unwrap();
        assert_eq!(pick_weekly(&items, same), Some(&"b"));
        assert_eq!(pick_weekly::<u8>(&[], epoch), None);
    }
}
