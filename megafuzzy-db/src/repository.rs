use chrono::NaiveDate;

use crate::error::DataError;
use crate::models::{validate_draw, Draw, DrawRecord};

/// Immutable draw history, most recent (highest draw id) first.
#[derive(Debug, Clone)]
pub struct DrawRepository {
    draws: Vec<Draw>,
}

impl DrawRepository {
    /// Validates every record and sorts by draw id, descending, whatever the input order.
    pub fn load<I>(records: I) -> Result<Self, DataError>
    where
        I: IntoIterator<Item = DrawRecord>,
    {
        let draws = records
            .into_iter()
            .map(Draw::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_draws(draws)
    }

    /// Draws built by hand are checked again: the appearance index relies on
    /// every number being in 1..=60 and distinct within its draw.
    pub fn from_draws(mut draws: Vec<Draw>) -> Result<Self, DataError> {
        if draws.is_empty() {
            return Err(DataError::Empty);
        }
        for draw in &draws {
            validate_draw(draw.draw_id, &draw.numbers)?;
        }
        draws.sort_by(|a, b| b.draw_id.cmp(&a.draw_id));
        tracing::debug!(draws = draws.len(), "repository loaded");
        Ok(Self { draws })
    }

    pub fn draws(&self) -> &[Draw] {
        &self.draws
    }

    pub fn len(&self) -> usize {
        self.draws.len()
    }

    /// Always false: an empty repository cannot be built.
    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    /// Date of the draw with the highest id.
    pub fn latest_date(&self) -> NaiveDate {
        self.draws[0].date
    }

    pub fn earliest_date(&self) -> NaiveDate {
        self.draws
            .iter()
            .map(|d| d.date)
            .min()
            .unwrap_or_else(|| self.latest_date())
    }

    pub fn newest_date(&self) -> NaiveDate {
        self.draws
            .iter()
            .map(|d| d.date)
            .max()
            .unwrap_or_else(|| self.latest_date())
    }

    /// The first `k` draws, or all of them when fewer exist.
    pub fn most_recent(&self, k: usize) -> &[Draw] {
        &self.draws[..k.min(self.draws.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::make_test_records;

    fn record(id: u32, date: &str, numbers: [u8; 6]) -> DrawRecord {
        DrawRecord {
            draw_id: id,
            date: date.to_string(),
            numbers: numbers.to_vec(),
        }
    }

    #[test]
    fn test_load_sorts_descending() {
        let repo = DrawRepository::load(vec![
            record(2, "2024-01-10", [3, 12, 27, 34, 41, 60]),
            record(1, "2024-01-06", [5, 12, 23, 34, 45, 56]),
            record(3, "2024-01-13", [8, 19, 27, 33, 45, 52]),
        ])
        .unwrap();
        let ids: Vec<u32> = repo.draws().iter().map(|d| d.draw_id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        assert_eq!(repo.latest_date(), NaiveDate::from_ymd_opt(2024, 1, 13).unwrap());
        assert_eq!(repo.earliest_date(), NaiveDate::from_ymd_opt(2024, 1, 6).unwrap());
    }

    #[test]
    fn test_load_empty_fails() {
        assert!(matches!(
            DrawRepository::load(Vec::new()),
            Err(DataError::Empty)
        ));
    }

    #[test]
    fn test_load_rejects_invalid_draw() {
        let err = DrawRepository::load(vec![
            record(1, "2024-01-06", [5, 12, 23, 34, 45, 56]),
            record(2, "2024-01-10", [3, 3, 27, 34, 41, 60]),
        ])
        .unwrap_err();
        assert!(matches!(err, DataError::Duplicate { draw_id: 2, number: 3 }));
    }

    #[test]
    fn test_from_draws_rejects_hand_built_draws() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap();
        let out_of_range = Draw {
            draw_id: 7,
            date,
            numbers: [61, 1, 1, 2, 3, 4],
        };
        assert!(matches!(
            DrawRepository::from_draws(vec![out_of_range]),
            Err(DataError::OutOfRange { draw_id: 7, number: 61 })
        ));

        let zero = Draw {
            draw_id: 8,
            date,
            numbers: [0, 1, 2, 3, 4, 5],
        };
        assert!(matches!(
            DrawRepository::from_draws(vec![zero]),
            Err(DataError::OutOfRange { draw_id: 8, number: 0 })
        ));

        let repeated = Draw {
            draw_id: 9,
            date,
            numbers: [1, 2, 2, 3, 4, 5],
        };
        assert!(matches!(
            DrawRepository::from_draws(vec![repeated]),
            Err(DataError::Duplicate { draw_id: 9, number: 2 })
        ));
    }

    #[test]
    fn test_load_rejects_short_draw() {
        let short = DrawRecord {
            draw_id: 1,
            date: "2024-01-06".to_string(),
            numbers: vec![1, 2, 3],
        };
        assert!(matches!(
            DrawRepository::load(vec![short]),
            Err(DataError::WrongCount { found: 3, .. })
        ));
    }

    #[test]
    fn test_most_recent() {
        let repo = DrawRepository::load(make_test_records(30)).unwrap();
        let recent = repo.most_recent(20);
        assert_eq!(recent.len(), 20);
        assert_eq!(recent[0].draw_id, 30);
        assert_eq!(recent[19].draw_id, 11);

        assert_eq!(repo.most_recent(50).len(), 30);
        assert_eq!(repo.most_recent(0).len(), 0);
    }

    #[test]
    fn test_latest_date_follows_draw_id() {
        // Highest id wins even when an older id carries a later date.
        let repo = DrawRepository::load(vec![
            record(10, "2024-02-01", [1, 2, 3, 4, 5, 6]),
            record(9, "2024-03-01", [7, 8, 9, 10, 11, 12]),
        ])
        .unwrap();
        assert_eq!(repo.latest_date(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(repo.newest_date(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }
}
