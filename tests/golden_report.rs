mod common;

use common::assert_snapshot;
use dbkeys::{KeyStyle, MemStore, ScanConfig, Scanner};

fn sample_store() -> MemStore {
    [
        ("alpha", String::new()),
        ("beta", "x".repeat(3)),
        ("gamma", "x".repeat(4)),
        ("delta", "x".repeat(16)),
        ("epsilon", "x".repeat(100)),
    ]
    .into_iter()
    .collect()
}

#[test]
fn scan_output_matches_golden() {
    let mut out = Vec::new();
    Scanner::new(ScanConfig::default())
        .scan(&sample_store(), &mut out)
        .expect("scan succeeds");
    assert_snapshot("report/mixed_sizes.txt", &String::from_utf8_lossy(&out));
}

#[test]
fn escaped_keys_match_golden() {
    let mut store = MemStore::new();
    store.insert(&b"plain"[..], &b"v"[..]);
    store.insert(&b"quote\"d"[..], &b"v"[..]);
    store.insert(&b"tab\there"[..], &b"v"[..]);
    store.insert(&b"\xffbinary"[..], &b"v"[..]);

    let mut out = Vec::new();
    Scanner::new(
        ScanConfig::default()
            .with_key_style(KeyStyle::Backquoted)
            .with_bar_width(10),
    )
    .scan(&store, &mut out)
    .expect("scan succeeds");
    assert_snapshot("report/backquoted_keys.txt", &String::from_utf8_lossy(&out));
}
