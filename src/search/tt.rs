use crate::board::Move;
use crate::search::eval::Score;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

/// A cached search result. `score` is only meaningful for probes asking for
/// `depth` or less.
#[derive(Clone, Copy, Debug)]
pub struct Entry {
    pub key: u64,
    pub depth: u32,
    pub score: Score,
    pub best: Option<Move>,
    pub bound: Bound,
    pub gen: u32,
}

const DEFAULT_WAYS: usize = 4;

#[derive(Default, Clone, Copy)]
struct Bucket {
    slots: [Option<Entry>; DEFAULT_WAYS],
}

/// Set-associative transposition table with depth-preferred replacement and
/// generation aging.
#[derive(Default)]
pub struct Tt {
    buckets: Vec<Bucket>,
    gen: u32,
}

impl Tt {
    pub fn new() -> Self { Self { buckets: Vec::new(), gen: 0 } }

    pub fn clear(&mut self) {
        for b in &mut self.buckets { *b = Bucket::default(); }
    }

    fn bucket_index(&self, key: u64) -> usize {
        let mixed = key ^ (key >> 32);
        (mixed as usize) % self.buckets.len().max(1)
    }

    pub fn get(&self, key: u64) -> Option<Entry> {
        if self.buckets.is_empty() { return None; }
        let b = &self.buckets[self.bucket_index(key)];
        b.slots.iter().flatten().find(|e| e.key == key).copied()
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(|b| b.slots.iter().flatten().count()).sum()
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn capacity(&self) -> usize { self.buckets.len() * DEFAULT_WAYS }

    pub fn set_capacity_entries(&mut self, cap: usize) {
        let entries = cap.max(DEFAULT_WAYS);
        let buckets = (entries + DEFAULT_WAYS - 1) / DEFAULT_WAYS;
        self.buckets.clear();
        self.buckets.resize_with(buckets, Bucket::default);
    }

    pub fn set_capacity_mb(&mut self, mb: usize) {
        // Heuristic: ~48 bytes per entry
        let entries = ((mb.saturating_mul(1024) * 1024) / 48).max(DEFAULT_WAYS);
        self.set_capacity_entries(entries);
    }

    pub fn put(&mut self, e: Entry) {
        if self.buckets.is_empty() { return; }
        let idx = self.bucket_index(e.key);
        let cur_gen = self.gen;
        let bucket = &mut self.buckets[idx];
        let e = Entry { gen: cur_gen, ..e };
        // Same key: keep the deeper result
        for slot in bucket.slots.iter_mut() {
            if let Some(cur) = slot {
                if cur.key == e.key {
                    if e.depth >= cur.depth { *slot = Some(e); }
                    return;
                }
            }
        }
        if let Some(slot) = bucket.slots.iter_mut().find(|s| s.is_none()) {
            *slot = Some(e);
            return;
        }
        // Evict lowest depth, then oldest generation
        let victim = bucket
            .slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.map(|cur| (i, (cur.depth, cur.gen))))
            .min_by_key(|&(_, k)| k)
            .map(|(i, _)| i)
            .unwrap_or(0);
        bucket.slots[victim] = Some(e);
    }

    pub fn bump_generation(&mut self) { self.gen = self.gen.wrapping_add(1); }
}
