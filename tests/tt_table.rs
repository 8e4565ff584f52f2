use edgebot::search::tt::{Bound, Entry, Tt};
use edgebot::Move;

fn entry(key: u64, depth: u32, score: i32) -> Entry {
    Entry { key, depth, score, best: None, bound: Bound::Exact, gen: 0 }
}

fn one_bucket() -> Tt {
    let mut tt = Tt::new();
    tt.set_capacity_entries(4);
    tt
}

#[test]
fn capacity_is_a_hard_limit() {
    let mut tt = Tt::new();
    tt.set_capacity_entries(16);
    for k in 0..200u64 {
        tt.put(entry(k.wrapping_mul(0x9E37_79B9_7F4A_7C15), (k % 7) as u32, k as i32));
    }
    assert!(tt.len() <= 16, "{} entries in a 16-entry table", tt.len());
    assert!(!tt.is_empty());
}

#[test]
fn unsized_table_stores_nothing() {
    let mut tt = Tt::new();
    tt.put(entry(5, 3, 0));
    assert!(tt.get(5).is_none());
    assert_eq!(tt.len(), 0);
}

#[test]
fn shallow_entry_evicted_before_deep_ones() {
    let mut tt = one_bucket();
    tt.put(entry(10, 8, 0));
    tt.put(entry(11, 2, 0));
    tt.put(entry(12, 6, 0));
    tt.put(entry(13, 7, 0));
    tt.put(entry(14, 5, 0));
    assert!(tt.get(11).is_none(), "depth-2 entry survived");
    for k in [10, 12, 13, 14] {
        assert!(tt.get(k).is_some(), "key {k} missing");
    }
}

#[test]
fn older_generation_goes_first_at_equal_depth() {
    let mut tt = one_bucket();
    for k in 1..=4u64 {
        tt.put(entry(k, 4, 0));
        tt.bump_generation();
    }
    // Refresh key 1 so key 2 becomes the oldest
    tt.put(entry(1, 4, 1));
    tt.put(entry(50, 4, 0));
    assert!(tt.get(2).is_none());
    assert_eq!(tt.get(1).map(|e| e.score), Some(1));
    assert!(tt.get(50).is_some());
}

#[test]
fn same_key_keeps_the_deeper_result() {
    let mut tt = one_bucket();
    let d3 = Move::new(2, 3).unwrap();
    tt.put(Entry { best: Some(d3), ..entry(7, 4, 30) });
    tt.put(Entry { bound: Bound::Upper, ..entry(7, 1, -5) });
    let e = tt.get(7).unwrap();
    assert_eq!((e.depth, e.score, e.best, e.bound), (4, 30, Some(d3), Bound::Exact));

    tt.put(Entry { bound: Bound::Lower, ..entry(7, 6, 12) });
    let e = tt.get(7).unwrap();
    assert_eq!((e.depth, e.score, e.bound), (6, 12, Bound::Lower));
    assert_eq!(tt.len(), 1);
}

#[test]
fn capacity_in_megabytes_and_clear() {
    let mut tt = Tt::new();
    tt.set_capacity_mb(1);
    for k in 0..1000u64 {
        tt.put(entry(k, 1, 0));
    }
    assert!(tt.len() > 0);
    tt.clear();
    assert!(tt.is_empty());
    assert!(tt.get(3).is_none());
}
