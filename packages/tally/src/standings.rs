//! Rankings built from judges' scoresheets.

use std::collections::HashMap;

use serde::Serialize;

use crate::candidate::Candidate;
use crate::competition::Competition;
use crate::scoresheet::Scoresheet;
use crate::scoring::round1;

/// One row of a results table.
#[derive(Clone, Debug, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Standing {
    pub candidate_id: String,
    pub candidate_number: u32,
    pub full_name: String,
    /// Mean of the judges' totals. 0 when nobody has scored yet.
    pub average: f64,
    /// `average` times the competition multiplier, or the event sum.
    pub weighted: f64,
    /// Number of scoresheets the row is built from.
    pub judges: usize,
    /// 1-based. Tied scores share a rank.
    pub rank: u32,
    /// Whether the candidate made the finalists cut.
    pub is_finalist: bool,
}

impl Standing {
    fn new(candidate: &Candidate, average: f64, weighted: f64, judges: usize) -> Self {
        Self {
            candidate_id: candidate.id.clone(),
            candidate_number: candidate.number,
            full_name: candidate.full_name.clone(),
            average,
            weighted,
            judges,
            rank: 0,
            is_finalist: false,
        }
    }
}

/// Standings of one competition.
///
/// Only candidates of the competition's event are ranked. When the
/// competition sets `finalists`, candidates ranked within that many places
/// are flagged; a tie at the cut lets every tied candidate through.
pub fn competition_standings(
    competition: &Competition,
    candidates: &[Candidate],
    scoresheets: &[Scoresheet],
) -> Vec<Standing> {
    let mut totals: HashMap<&str, Vec<f64>> = HashMap::new();
    for sheet in scoresheets
        .iter()
        .filter(|s| s.competition_id == competition.id)
    {
        totals
            .entry(sheet.candidate_id.as_str())
            .or_default()
            .push(sheet.total);
    }

    let mut rows: Vec<Standing> = candidates
        .iter()
        .filter(|c| c.event_id == competition.event_id)
        .map(|candidate| {
            let sheets = totals.get(candidate.id.as_str()).map(Vec::as_slice).unwrap_or_default();
            let average = if sheets.is_empty() {
                0.0
            } else {
                round1(sheets.iter().sum::<f64>() / sheets.len() as f64)
            };
            let weighted = round1(average * competition.multiplier);
            Standing::new(candidate, average, weighted, sheets.len())
        })
        .collect();

    assign_ranks(&mut rows);
    if competition.finalists > 0 {
        for row in &mut rows {
            row.is_finalist = row.rank <= competition.finalists;
        }
    }

    tracing::debug!(
        competition_id = %competition.id,
        candidates = rows.len(),
        "Computed competition standings"
    );
    rows
}

/// Overall event standings: the sum of each candidate's weighted scores over
/// the preliminary competitions. Finals rounds are ranked on their own.
pub fn event_standings(
    competitions: &[Competition],
    candidates: &[Candidate],
    scoresheets: &[Scoresheet],
) -> Vec<Standing> {
    let preliminaries: Vec<&Competition> =
        competitions.iter().filter(|c| !c.is_finalist).collect();

    let mut sums: HashMap<String, (f64, usize)> = HashMap::new();
    for competition in &preliminaries {
        for row in competition_standings(competition, candidates, scoresheets) {
            let entry = sums.entry(row.candidate_id).or_default();
            entry.0 += row.weighted;
            entry.1 += row.judges;
        }
    }

    let mut rows: Vec<Standing> = candidates
        .iter()
        .filter_map(|candidate| {
            let &(sum, judges) = sums.get(&candidate.id)?;
            let weighted = round1(sum);
            Some(Standing::new(candidate, weighted, weighted, judges))
        })
        .collect();

    assign_ranks(&mut rows);
    rows
}

/// Sort by weighted score (highest first, then candidate number) and assign
/// competition ranks: 1, 2, 2, 4.
fn assign_ranks(rows: &mut [Standing]) {
    rows.sort_by(|a, b| {
        b.weighted
            .total_cmp(&a.weighted)
            .then(a.candidate_number.cmp(&b.candidate_number))
    });

    let mut previous: Option<f64> = None;
    let mut rank = 0;
    for (position, row) in rows.iter_mut().enumerate() {
        if previous != Some(row.weighted) {
            rank = position as u32 + 1;
            previous = Some(row.weighted);
        }
        row.rank = rank;
    }
}
