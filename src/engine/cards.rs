use std::{
    collections::BTreeMap,
    fmt::{self, Display, Formatter},
    ops::{Add, AddAssign},
};

use itertools::Itertools;
use rand::Rng;

use super::card::CardKind;
use crate::error::Error;

/// Largest pile for which every outcome weight stays exact: all binomials up
/// to C(62, 31) and their running products fit in a u64.
pub const MAX_PILE_SIZE: u32 = 62;

/// An unordered collection of cards, counted per kind.
///
/// Entries with count zero are deleted on removal, so two multisets holding
/// the same cards are always structurally equal and hash alike no matter how
/// they were built. The map is keyed by kind id, which also fixes the
/// iteration order within a process.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cards<'c> {
    counts: BTreeMap<&'c CardKind, u32>,
    total: u32,
}

impl<'c> Cards<'c> {
    pub fn new() -> Cards<'c> {
        Cards::default()
    }

    pub fn from_pairs(pairs: &[(&'c CardKind, u32)]) -> Cards<'c> {
        let mut cards = Cards::new();
        for &(kind, count) in pairs {
            Cards::add(&mut cards, kind, count);
        }
        cards
    }

    pub fn size(&self) -> u32 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn count(&self, kind: &CardKind) -> u32 {
        *self.counts.get(kind).unwrap_or(&0)
    }

    /// Distinct kinds present, in id order.
    pub fn kinds(&self) -> impl Iterator<Item = &'c CardKind> + '_ {
        self.counts.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'c CardKind, u32)> + '_ {
        self.counts.iter().map(|(&kind, &count)| (kind, count))
    }

    pub fn add(&mut self, kind: &'c CardKind, n: u32) {
        if n == 0 {
            return;
        }
        *self.counts.entry(kind).or_insert(0) += n;
        self.total += n;
    }

    /// Removes one card of `kind`.
    pub fn remove(&mut self, kind: &CardKind) -> Result<(), Error> {
        self.remove_n(kind, 1)
    }

    /// Removes `n` cards of `kind`, deleting the entry when it reaches zero.
    pub fn remove_n(&mut self, kind: &CardKind, n: u32) -> Result<(), Error> {
        let have = self.count(kind);
        if have < n {
            return Err(Error::NotEnoughCards {
                kind: String::from(kind.get_name()),
                want: n,
                have,
            });
        }
        if have == n {
            self.counts.remove(kind);
        } else if n > 0 {
            *self.counts.get_mut(kind).unwrap() -= n;
        }
        self.total -= n;
        Ok(())
    }

    /// Removes every card of `kind`, returning how many were removed.
    pub fn remove_all(&mut self, kind: &CardKind) -> Result<u32, Error> {
        match self.counts.remove(kind) {
            Some(count) => {
                self.total -= count;
                Ok(count)
            }
            None => Err(Error::NotEnoughCards {
                kind: String::from(kind.get_name()),
                want: 1,
                have: 0,
            }),
        }
    }

    /// Invokes `f(remaining, drawn, probability)` once per distinguishable
    /// outcome of drawing `n` cards uniformly at random without replacement.
    ///
    /// Outcomes are equivalence classes of drawn multisets; the reported
    /// probabilities follow the multivariate hypergeometric law and sum to 1.
    /// Drawing from an empty pile is a no-op reported as a single certain
    /// outcome, and `n` past the pile size drains the whole pile. The order
    /// in which outcomes are reported is unspecified.
    pub fn for_each_draw<F>(&self, n: u32, mut f: F) -> Result<(), Error>
    where
        F: FnMut(&Cards<'c>, &Cards<'c>, f64) -> Result<(), Error>,
    {
        if self.total > MAX_PILE_SIZE {
            return Err(Error::DeckTooLarge { size: self.total });
        }
        if self.total == 0 && n > 0 {
            return f(&Cards::new(), &Cards::new(), 1.0);
        }
        let n = n.min(self.total);
        if n == 0 {
            return f(self, &Cards::new(), 1.0);
        }

        let kinds: Vec<(&'c CardKind, u32)> = self.iter().collect();
        let denominator = binomial(u64::from(self.total), u64::from(n)) as f64;
        let mut remaining = self.clone();
        let mut drawn = Cards::new();
        visit_draws(
            &kinds,
            0,
            n,
            1,
            denominator,
            &mut remaining,
            &mut drawn,
            &mut f,
        )
    }

    /// Samples one outcome from the same distribution `for_each_draw`
    /// enumerates. Used by playouts, never by the exact solver.
    pub fn draw_random<R: Rng + ?Sized>(&self, n: u32, rng: &mut R) -> (Cards<'c>, Cards<'c>) {
        let mut remaining = self.clone();
        let mut drawn = Cards::new();
        for _ in 0..n.min(self.total) {
            let mut index = rng.gen_range(0..remaining.size());
            let mut picked = None;
            for (kind, count) in remaining.iter() {
                if index < count {
                    picked = Some(kind);
                    break;
                }
                index -= count;
            }
            let kind = picked.expect("drawn index must land on a kind");
            remaining.remove(kind).unwrap();
            Cards::add(&mut drawn, kind, 1);
        }
        (remaining, drawn)
    }

    /// Letters grouped by kind in `sort_order`, each group wrapped in the
    /// kind's ANSI color escape.
    pub fn to_console_string(&self) -> String {
        if self.is_empty() {
            return String::from("\u{1b}[90m<no cards>\u{1b}[0m");
        }
        self.iter()
            .sorted_by_key(|(kind, _)| kind.get_sort_order())
            .map(|(kind, count)| {
                let letters: String = (0..count).map(|_| kind.get_letter()).collect();
                format!("\u{1b}[{}m{}\u{1b}[0m", kind.get_color(), letters)
            })
            .collect()
    }
}

impl<'c> Display for Cards<'c> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for (kind, count) in self.iter() {
            for _ in 0..count {
                write!(f, "{}", kind.get_letter())?;
            }
        }
        Ok(())
    }
}

impl<'c> AddAssign<&Cards<'c>> for Cards<'c> {
    fn add_assign(&mut self, rhs: &Cards<'c>) {
        for (kind, count) in rhs.iter() {
            self.add(kind, count);
        }
    }
}

impl<'c> Add<&Cards<'c>> for Cards<'c> {
    type Output = Cards<'c>;

    fn add(mut self, rhs: &Cards<'c>) -> Cards<'c> {
        self += rhs;
        self
    }
}

/// Recurses over how many copies of `kinds[index]` end up drawn. `ways`
/// carries the running product of per-kind binomials; an outcome is emitted
/// as soon as the cumulative draw reaches the requested amount.
#[allow(clippy::too_many_arguments)]
fn visit_draws<'c, F>(
    kinds: &[(&'c CardKind, u32)],
    index: usize,
    left: u32,
    ways: u64,
    denominator: f64,
    remaining: &mut Cards<'c>,
    drawn: &mut Cards<'c>,
    f: &mut F,
) -> Result<(), Error>
where
    F: FnMut(&Cards<'c>, &Cards<'c>, f64) -> Result<(), Error>,
{
    if left == 0 {
        return f(remaining, drawn, ways as f64 / denominator);
    }
    if index >= kinds.len() {
        // This branch drew fewer cards than requested; a sibling covers it.
        return Ok(());
    }
    let (kind, available) = kinds[index];
    for take in 0..=available.min(left) {
        if take > 0 {
            drawn.add(kind, take);
            remaining.remove_n(kind, take)?;
        }
        let ways = ways * binomial(u64::from(available), u64::from(take));
        visit_draws(
            kinds,
            index + 1,
            left - take,
            ways,
            denominator,
            remaining,
            drawn,
            f,
        )?;
        if take > 0 {
            remaining.add(kind, take);
            drawn.remove_n(kind, take)?;
        }
    }
    Ok(())
}

/// C(n, k) with the symmetric identity and an incremental product whose
/// divisions are always exact. Fits in a u64 for every n <= MAX_PILE_SIZE.
fn binomial(n: u64, k: u64) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut c: u64 = 1;
    for i in 0..k {
        c = c * (n - i) / (i + 1);
    }
    c
}
