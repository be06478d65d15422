//! Pick distribution per fixture, folded from stored submissions.

use super::fixtures::FixtureSpec;
use super::pick::{Pick, Picks};
use super::FIXTURE_COUNT;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PickCounts {
    pub home: u32,
    pub draw: u32,
    pub away: u32,
}

/// Shares of each outcome in percent; all zero when nobody picked.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Percentages {
    pub home: f64,
    pub draw: f64,
    pub away: f64,
}

impl PickCounts {
    pub fn record(&mut self, pick: Pick) {
        match pick {
            Pick::Home => self.home += 1,
            Pick::Draw => self.draw += 1,
            Pick::Away => self.away += 1,
        }
    }

    pub fn get(&self, pick: Pick) -> u32 {
        match pick {
            Pick::Home => self.home,
            Pick::Draw => self.draw,
            Pick::Away => self.away,
        }
    }

    pub fn total(&self) -> u32 {
        self.home + self.draw + self.away
    }

    pub fn percentages(&self) -> Percentages {
        let total = self.total();
        if total == 0 {
            return Percentages::default();
        }
        let pct = |n: u32| f64::from(n) / f64::from(total) * 100.0;
        Percentages {
            home: pct(self.home),
            draw: pct(self.draw),
            away: pct(self.away),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FixtureStatistics {
    /// 1-based.
    pub position: usize,
    pub home_label: String,
    pub away_label: String,
    pub counts: PickCounts,
    pub percentages: Percentages,
    pub no_picks: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoundStatistics {
    pub round_id: i64,
    pub total_participants: usize,
    pub fixtures: Vec<FixtureStatistics>,
}

/// Count outcomes per fixture across all pick sets.
pub fn tally<'a, I>(picks: I) -> [PickCounts; FIXTURE_COUNT]
where
    I: IntoIterator<Item = &'a Picks>,
{
    picks
        .into_iter()
        .fold([PickCounts::default(); FIXTURE_COUNT], |mut acc, set| {
            for (counts, pick) in acc.iter_mut().zip(set.iter()) {
                counts.record(*pick);
            }
            acc
        })
}

/// Build the per-fixture report. `None` when there are no submissions.
pub fn summarize(
    round_id: i64,
    fixtures: &[FixtureSpec],
    submissions: &[Picks],
) -> Option<RoundStatistics> {
    if submissions.is_empty() {
        return None;
    }

    let counts = tally(submissions);
    let fixtures = counts
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let (home_label, away_label) = fixtures
                .get(i)
                .map(|f| (f.home.clone(), f.away.clone()))
                .unwrap_or_default();
            FixtureStatistics {
                position: i + 1,
                home_label,
                away_label,
                counts: *c,
                percentages: c.percentages(),
                no_picks: c.total() == 0,
            }
        })
        .collect();

    Some(RoundStatistics {
        round_id,
        total_participants: submissions.len(),
        fixtures,
    })
}
