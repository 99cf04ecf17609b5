//! Temporal bucketing of dated items.
//!
//! Items are grouped into a fixed four-level hierarchy:
//!
//! ```text
//! Century (21)
//! └── Cycle (2021–2040)
//!     └── Year (2024)
//!         └── Month (3)
//!             └── [items...]
//! ```
//!
//! Centuries are 1-indexed (years 1–100 are century 1). Each century is split
//! into five renewal cycles of [`CYCLE_YEARS`] years, aligned to the first year
//! of the century, so 2001–2020, 2021–2040, ... 2081–2100.
//!
//! ## Ordering
//!
//! The tree is built in one pass with nodes created on demand, then a
//! normalization pass sorts every level by key, newest first. Sibling order is
//! therefore a function of the keys alone: rebuilding from a permutation of the
//! same items produces the same sibling order at every level.
//!
//! Inside a month, items keep the order they were given in. Callers that need a
//! specific order within a month feed the items pre-sorted (the scan stage hands
//! over issues sorted by serial, newest first).
//!
//! ## Invalid dates
//!
//! An item is placed only when its date starts with a 4-digit year and has a
//! 2-digit month at bytes 5–6 (`YYYY-MM...`). Anything else is left out of the
//! tree. It still takes part in [`crate::recent::select_recent`].

/// Number of years in one renewal cycle.
pub const CYCLE_YEARS: i32 = 20;

const CENTURY_YEARS: i32 = 100;

/// An item that carries an optional date string, nominally ISO-8601.
pub trait Dated {
    /// The raw date string, or `None` when the item has no date.
    fn date(&self) -> Option<&str>;
}

/// The four levels of the bucket hierarchy, root first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Century,
    Cycle,
    Year,
    Month,
}

impl Level {
    /// Top level of every tree.
    pub const ROOT: Level = Level::Century;

    /// The level below this one, or `None` for `Month` (whose children are items).
    pub fn next(self) -> Option<Level> {
        match self {
            Level::Century => Some(Level::Cycle),
            Level::Cycle => Some(Level::Year),
            Level::Year => Some(Level::Month),
            Level::Month => None,
        }
    }

    /// Stable lowercase name, used as the `data-level` attribute in markup.
    pub fn name(self) -> &'static str {
        match self {
            Level::Century => "century",
            Level::Cycle => "cycle",
            Level::Year => "year",
            Level::Month => "month",
        }
    }

    /// Extract this level's key from a full bucket path.
    pub fn key(self, path: &BucketPath) -> PeriodKey {
        match self {
            Level::Century => PeriodKey::Century(path.century),
            Level::Cycle => PeriodKey::Cycle {
                start: path.cycle_start,
                end: path.cycle_end,
            },
            Level::Year => PeriodKey::Year(path.year),
            Level::Month => PeriodKey::Month(path.month),
        }
    }
}

/// Key of one bucket. Keys at the same level always share a variant, so the
/// derived ordering compares the period values (cycles by start year).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PeriodKey {
    Century(i32),
    Cycle { start: i32, end: i32 },
    Year(i32),
    Month(u32),
}

impl PeriodKey {
    pub fn level(&self) -> Level {
        match self {
            PeriodKey::Century(_) => Level::Century,
            PeriodKey::Cycle { .. } => Level::Cycle,
            PeriodKey::Year(_) => Level::Year,
            PeriodKey::Month(_) => Level::Month,
        }
    }
}

/// The four keys locating one item in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketPath {
    pub century: i32,
    pub cycle_start: i32,
    pub cycle_end: i32,
    pub year: i32,
    pub month: u32,
}

impl BucketPath {
    /// Derive the century and cycle for a year/month pair.
    pub fn new(year: i32, month: u32) -> Self {
        let century = (year - 1).div_euclid(CENTURY_YEARS) + 1;
        let century_start = century_start(century);
        let cycle_index = (year - century_start) / CYCLE_YEARS;
        let cycle_start = century_start + cycle_index * CYCLE_YEARS;
        Self {
            century,
            cycle_start,
            cycle_end: cycle_start + CYCLE_YEARS - 1,
            year,
            month,
        }
    }
}

/// First year of a 1-indexed century (`21` → `2001`).
pub fn century_start(century: i32) -> i32 {
    (century - 1) * CENTURY_YEARS + 1
}

/// Parse the bucket path out of a `YYYY-MM...` date string.
///
/// Returns `None` for strings shorter than 7 bytes, non-digit year or month
/// fields, and months outside 1–12.
pub fn bucket_path(date: &str) -> Option<BucketPath> {
    let year = parse_digits(date.get(0..4)?)?;
    let month = parse_digits(date.get(5..7)?)?;
    if !(1..=12).contains(&month) {
        return None;
    }
    Some(BucketPath::new(year as i32, month))
}

fn parse_digits(field: &str) -> Option<u32> {
    if field.bytes().all(|b| b.is_ascii_digit()) {
        field.parse().ok()
    } else {
        None
    }
}

/// One node of the tree: a period key and what lies beneath it.
#[derive(Debug)]
pub struct Bucket<'a, T> {
    pub key: PeriodKey,
    pub contents: Contents<'a, T>,
}

/// Children of a bucket: sub-periods for the upper levels, items for months.
#[derive(Debug)]
pub enum Contents<'a, T> {
    Periods(Vec<Bucket<'a, T>>),
    Items(Vec<&'a T>),
}

impl<'a, T> Bucket<'a, T> {
    fn empty(key: PeriodKey) -> Self {
        let contents = match key.level().next() {
            Some(_) => Contents::Periods(Vec::new()),
            None => Contents::Items(Vec::new()),
        };
        Self { key, contents }
    }

    pub fn level(&self) -> Level {
        self.key.level()
    }

    /// Number of items anywhere below this bucket.
    pub fn len(&self) -> usize {
        match &self.contents {
            Contents::Periods(children) => children.iter().map(Bucket::len).sum(),
            Contents::Items(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Child buckets, empty for month buckets.
    pub fn children(&self) -> &[Bucket<'a, T>] {
        match &self.contents {
            Contents::Periods(children) => children,
            Contents::Items(_) => &[],
        }
    }

    /// Items held directly by this bucket, empty above month level.
    pub fn items(&self) -> &[&'a T] {
        match &self.contents {
            Contents::Periods(_) => &[],
            Contents::Items(items) => items,
        }
    }

    /// Keys of the direct children, in iteration order.
    pub fn child_keys(&self) -> Vec<PeriodKey> {
        self.children().iter().map(|b| b.key).collect()
    }
}

/// Century-rooted bucket tree borrowing its items from the caller's snapshot.
#[derive(Debug)]
pub struct BucketTree<'a, T> {
    centuries: Vec<Bucket<'a, T>>,
}

impl<'a, T: Dated> BucketTree<'a, T> {
    /// Group `items` by century, cycle, year and month, newest first.
    pub fn build(items: &'a [T]) -> Self {
        let mut centuries = Vec::new();
        for item in items {
            let Some(path) = item.date().and_then(bucket_path) else {
                continue;
            };
            insert(&mut centuries, Level::ROOT, &path, item);
        }
        sort_newest_first(&mut centuries);
        Self { centuries }
    }
}

impl<'a, T> BucketTree<'a, T> {
    /// Century buckets, newest first.
    pub fn centuries(&self) -> &[Bucket<'a, T>] {
        &self.centuries
    }

    /// Number of items placed in the tree.
    pub fn len(&self) -> usize {
        self.centuries.iter().map(Bucket::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.centuries.is_empty()
    }
}

fn insert<'a, T>(siblings: &mut Vec<Bucket<'a, T>>, level: Level, path: &BucketPath, item: &'a T) {
    let key = level.key(path);
    let idx = match siblings.iter().position(|b| b.key == key) {
        Some(idx) => idx,
        None => {
            siblings.push(Bucket::empty(key));
            siblings.len() - 1
        }
    };
    match &mut siblings[idx].contents {
        Contents::Items(items) => items.push(item),
        Contents::Periods(children) => {
            if let Some(next) = level.next() {
                insert(children, next, path, item);
            }
        }
    }
}

/// Sort every level by key, descending. Item order inside months is untouched.
fn sort_newest_first<T>(buckets: &mut [Bucket<'_, T>]) {
    buckets.sort_by(|a, b| b.key.cmp(&a.key));
    for bucket in buckets.iter_mut() {
        if let Contents::Periods(children) = &mut bucket.contents {
            sort_newest_first(children);
        }
    }
}
