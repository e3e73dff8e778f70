use chrono::NaiveDate;

use crate::models::{PICK_COUNT, POOL_SIZE};
use crate::repository::DrawRepository;

/// One number occupying one slot of one draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Appearance {
    pub number: u8,
    pub draw_id: u32,
    pub date: NaiveDate,
    /// 1-based extraction position.
    pub slot: u8,
}

/// Appearances grouped by number, each group in repository order (most recent first).
#[derive(Debug, Clone)]
pub struct AppearanceIndex {
    by_number: Vec<Vec<Appearance>>,
}

impl AppearanceIndex {
    pub fn build(repository: &DrawRepository) -> Self {
        let mut by_number = vec![Vec::new(); POOL_SIZE as usize];

        for draw in repository.draws() {
            for (i, &number) in draw.numbers.iter().enumerate() {
                by_number[(number - 1) as usize].push(Appearance {
                    number,
                    draw_id: draw.draw_id,
                    date: draw.date,
                    slot: i as u8 + 1,
                });
            }
        }

        Self { by_number }
    }

    /// Empty for numbers outside 1..=60.
    pub fn appearances_of(&self, number: u8) -> &[Appearance] {
        match number {
            1..=POOL_SIZE => &self.by_number[(number - 1) as usize],
            _ => &[],
        }
    }

    pub fn count_of(&self, number: u8) -> usize {
        self.appearances_of(number).len()
    }

    pub fn total(&self) -> usize {
        self.by_number.iter().map(Vec::len).sum()
    }

    pub fn last_seen(&self, number: u8) -> Option<NaiveDate> {
        self.appearances_of(number).iter().map(|a| a.date).max()
    }

    /// Occurrences per slot, zero-filled.
    pub fn slot_counts(&self, number: u8) -> [u32; PICK_COUNT] {
        let mut counts = [0u32; PICK_COUNT];
        for a in self.appearances_of(number) {
            counts[(a.slot - 1) as usize] += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{make_test_records, DrawRecord};

    fn repo() -> DrawRepository {
        DrawRepository::load(vec![
            DrawRecord {
                draw_id: 1,
                date: "2024-01-06".to_string(),
                numbers: vec![5, 12, 23, 34, 45, 56],
            },
            DrawRecord {
                draw_id: 2,
                date: "2024-01-10".to_string(),
                numbers: vec![3, 12, 27, 34, 41, 60],
            },
        ])
        .unwrap()
    }

    #[test]
    fn test_appearances_ordered_most_recent_first() {
        let index = AppearanceIndex::build(&repo());
        let twelve = index.appearances_of(12);
        assert_eq!(twelve.len(), 2);
        assert_eq!(twelve[0].draw_id, 2);
        assert_eq!(twelve[1].draw_id, 1);
        assert!(twelve.iter().all(|a| a.slot == 2 && a.number == 12));
    }

    #[test]
    fn test_counts() {
        let index = AppearanceIndex::build(&repo());
        assert_eq!(index.count_of(34), 2);
        assert_eq!(index.count_of(60), 1);
        assert_eq!(index.count_of(1), 0);
        assert_eq!(index.count_of(0), 0);
        assert_eq!(index.count_of(61), 0);
        assert_eq!(index.total(), 12);
    }

    #[test]
    fn test_slot_counts_and_last_seen() {
        let index = AppearanceIndex::build(&repo());
        assert_eq!(index.slot_counts(34), [0, 0, 0, 2, 0, 0]);
        assert_eq!(index.slot_counts(60), [0, 0, 0, 0, 0, 1]);
        assert_eq!(index.slot_counts(1), [0; 6]);
        assert_eq!(
            index.last_seen(12),
            Some(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap())
        );
        assert_eq!(index.last_seen(1), None);
    }

    #[test]
    fn test_total_is_six_per_draw() {
        let repository = DrawRepository::load(make_test_records(25)).unwrap();
        let index = AppearanceIndex::build(&repository);
        assert_eq!(index.total(), 6 * 25);
    }
}
