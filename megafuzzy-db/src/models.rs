use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// Numbers in play: 1..=60.
pub const POOL_SIZE: u8 = 60;
/// Numbers drawn per contest.
pub const PICK_COUNT: usize = 6;

/// One row of the dataset, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawRecord {
    pub draw_id: u32,
    pub date: String,
    pub numbers: Vec<u8>,
}

/// A validated draw. `numbers` keeps the extraction order: index 0 is slot 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Draw {
    pub draw_id: u32,
    pub date: NaiveDate,
    pub numbers: [u8; PICK_COUNT],
}

impl Draw {
    pub fn sum(&self) -> u32 {
        self.numbers.iter().map(|&n| n as u32).sum()
    }

    pub fn even_count(&self) -> usize {
        self.numbers.iter().filter(|&&n| n % 2 == 0).count()
    }
}

impl TryFrom<DrawRecord> for Draw {
    type Error = DataError;

    fn try_from(record: DrawRecord) -> Result<Self, Self::Error> {
        validate_draw(record.draw_id, &record.numbers)?;
        let date = parse_date(&record.date).ok_or_else(|| DataError::InvalidDate {
            draw_id: record.draw_id,
            raw: record.date.clone(),
        })?;

        let mut numbers = [0u8; PICK_COUNT];
        numbers.copy_from_slice(&record.numbers);

        Ok(Draw {
            draw_id: record.draw_id,
            date,
            numbers,
        })
    }
}

/// Canonical form for storage: ISO date, extraction order kept.
impl From<&Draw> for DrawRecord {
    fn from(draw: &Draw) -> Self {
        DrawRecord {
            draw_id: draw.draw_id,
            date: draw.date.format("%Y-%m-%d").to_string(),
            numbers: draw.numbers.to_vec(),
        }
    }
}

pub fn validate_draw(draw_id: u32, numbers: &[u8]) -> Result<(), DataError> {
    if numbers.len() != PICK_COUNT {
        return Err(DataError::WrongCount {
            draw_id,
            expected: PICK_COUNT,
            found: numbers.len(),
        });
    }
    for &n in numbers {
        if n < 1 || n > POOL_SIZE {
            return Err(DataError::OutOfRange { draw_id, number: n });
        }
    }
    for i in 0..numbers.len() {
        for j in (i + 1)..numbers.len() {
            if numbers[i] == numbers[j] {
                return Err(DataError::Duplicate {
                    draw_id,
                    number: numbers[i],
                });
            }
        }
    }
    Ok(())
}

/// Accepts `YYYY-MM-DD`, and `DD/MM/YYYY` as found in official result exports.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"))
        .ok()
}

/// Synthetic, valid history for tests: draw ids 1..=n, one draw every 3 days,
/// returned oldest first so loaders have to sort.
pub fn make_test_records(n: usize) -> Vec<DrawRecord> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();
    (0..n)
        .map(|i| {
            let date = start
                .checked_add_days(Days::new(3 * i as u64))
                .unwrap_or(start);
            let offset = (i * 7) % 60;
            DrawRecord {
                draw_id: i as u32 + 1,
                date: date.format("%Y-%m-%d").to_string(),
                numbers: (0..PICK_COUNT)
                    .map(|k| ((offset + k * 11) % 60) as u8 + 1)
                    .collect(),
            }
        })
        .collect()
}
