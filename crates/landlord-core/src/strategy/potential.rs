//! Enumerates the combinations a hand could put on the table.
//!
//! Cores (runs, triples, quads) are enumerated exhaustively. Attachments are
//! chosen greedily: exact-size ranks first, then ranks that do not break a
//! bomb or the rocket, lowest rank first. Results are deduplicated by card
//! identity and returned in a stable order.

use crate::model::beat::can_beat;
use crate::model::card::{Card, CardId};
use crate::model::combination::{Combination, CombinationKind, classify};
use crate::model::rank::Rank;
use std::collections::HashSet;

/// Cards of a hand grouped by rank, lowest rank first.
struct RankGroups {
    groups: Vec<(Rank, Vec<Card>)>,
    has_rocket: bool,
}

impl RankGroups {
    fn new(cards: &[Card]) -> Self {
        let mut sorted = cards.to_vec();
        sorted.sort_by(|a, b| a.rank.cmp(&b.rank).then(a.suit.cmp(&b.suit)));

        let mut groups: Vec<(Rank, Vec<Card>)> = Vec::new();
        for card in sorted {
            match groups.last_mut() {
                Some((rank, group)) if *rank == card.rank => group.push(card),
                _ => groups.push((card.rank, vec![card])),
            }
        }
        let has_rocket = [Rank::SmallJoker, Rank::BigJoker]
            .iter()
            .all(|joker| groups.iter().any(|(rank, _)| rank == joker));
        Self { groups, has_rocket }
    }

    fn group(&self, rank: Rank) -> &[Card] {
        self.groups
            .iter()
            .find(|(r, _)| *r == rank)
            .map(|(_, cards)| cards.as_slice())
            .unwrap_or(&[])
    }

    fn take(&self, rank: Rank, width: usize) -> Option<&[Card]> {
        let group = self.group(rank);
        (group.len() >= width).then(|| &group[..width])
    }

    fn ranks_with_at_least(&self, width: usize) -> impl Iterator<Item = Rank> + '_ {
        self.groups
            .iter()
            .filter(move |(_, cards)| cards.len() >= width)
            .map(|(rank, _)| *rank)
    }

    /// Maximal runs of consecutive chainable ranks holding at least `width` cards each.
    fn runs(&self, width: usize) -> Vec<Vec<Rank>> {
        let mut runs = Vec::new();
        let mut current: Vec<Rank> = Vec::new();
        for rank in Rank::ORDERED.iter().copied().filter(|rank| rank.chains()) {
            if self.group(rank).len() >= width {
                current.push(rank);
            } else if !current.is_empty() {
                runs.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            runs.push(current);
        }
        runs
    }

    /// `count` attachments of `width` cards each, all from distinct ranks outside `core`.
    fn kickers(&self, core: &[Rank], width: usize, count: usize) -> Option<Vec<Card>> {
        let mut eligible: Vec<(&Rank, &Vec<Card>)> = self
            .groups
            .iter()
            .filter(|(rank, cards)| !core.contains(rank) && cards.len() >= width)
            .map(|(rank, cards)| (rank, cards))
            .collect();
        if eligible.len() < count {
            return None;
        }
        eligible.sort_by_key(|(rank, cards)| {
            let breaks_bomb = cards.len() == 4 || (rank.is_joker() && self.has_rocket);
            (cards.len() != width, breaks_bomb, **rank)
        });
        Some(
            eligible
                .into_iter()
                .take(count)
                .flat_map(|(_, cards)| cards[..width].iter().copied())
                .collect(),
        )
    }
}

/// Every valid combination that can be formed from `cards`.
pub fn potential_combinations(cards: &[Card]) -> Vec<Combination> {
    let groups = RankGroups::new(cards);
    let mut shapes: Vec<Vec<Card>> = Vec::new();

    for (_, group) in &groups.groups {
        for width in 1..=group.len().min(4) {
            shapes.push(group[..width].to_vec());
        }
    }

    if groups.has_rocket {
        let mut rocket = groups.group(Rank::SmallJoker)[..1].to_vec();
        rocket.extend_from_slice(&groups.group(Rank::BigJoker)[..1]);
        shapes.push(rocket);
    }

    for rank in groups.ranks_with_at_least(3) {
        let Some(core) = groups.take(rank, 3) else {
            continue;
        };
        for width in 1..=2 {
            if let Some(kickers) = groups.kickers(&[rank], width, 1) {
                shapes.push([core, kickers.as_slice()].concat());
            }
        }
    }

    for rank in groups.ranks_with_at_least(4) {
        let core = groups.group(rank);
        for width in 1..=2 {
            if let Some(kickers) = groups.kickers(&[rank], width, 2) {
                shapes.push([core, kickers.as_slice()].concat());
            }
        }
    }

    for (width, min_len) in [
        (1, CombinationKind::MIN_STRAIGHT),
        (2, CombinationKind::MIN_PAIR_RUN),
        (3, CombinationKind::MIN_PLANE),
    ] {
        for run in groups.runs(width) {
            for segment in segments(&run, min_len) {
                let core: Vec<Card> = segment
                    .iter()
                    .filter_map(|rank| groups.take(*rank, width))
                    .flatten()
                    .copied()
                    .collect();
                if width == 3 {
                    for wing in 1..=2 {
                        if let Some(kickers) = groups.kickers(segment, wing, segment.len()) {
                            shapes.push([core.as_slice(), kickers.as_slice()].concat());
                        }
                    }
                }
                shapes.push(core);
            }
        }
    }

    let mut seen: HashSet<Vec<CardId>> = HashSet::new();
    let mut combinations: Vec<Combination> = shapes
        .iter()
        .map(|shape| classify(shape.as_slice()))
        .filter(|combination| combination.is_valid())
        .filter(|combination| seen.insert(combination.card_ids()))
        .collect();
    combinations.sort_by(|a, b| {
        a.kind()
            .cmp(&b.kind())
            .then(a.len().cmp(&b.len()))
            .then(a.power().cmp(&b.power()))
    });
    combinations
}

/// Combinations from `cards` that may be played against `reference`; any potential
/// combination when leading.
pub fn legal_candidates(cards: &[Card], reference: Option<&Combination>) -> Vec<Combination> {
    let candidates = potential_combinations(cards);
    match reference {
        None => candidates,
        Some(reference) => candidates
            .into_iter()
            .filter(|candidate| can_beat(candidate, reference))
            .collect(),
    }
}

/// Every contiguous sub-run of at least `min_len` ranks.
fn segments(run: &[Rank], min_len: usize) -> Vec<&[Rank]> {
    let mut out = Vec::new();
    for start in 0..run.len() {
        for end in (start + min_len)..=run.len() {
            out.push(&run[start..end]);
        }
    }
    out
}
