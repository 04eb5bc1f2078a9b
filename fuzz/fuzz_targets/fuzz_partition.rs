#![no_main]

use libfuzzer_sys::fuzz_target;

use chunkbench_core::partition::{chunk_ranges, threshold, WorkerBudget};
use chunkbench_core::split_tree::SplitTree;

fuzz_target!(|data: &[u8]| {
    if data.len() < 6 {
        return;
    }
    // len and T from the first bytes, capped to keep the trees small
    let len = usize::from(u16::from_le_bytes([data[0], data[1]])) % 20_000;
    let workers = usize::from(u16::from_le_bytes([data[2], data[3]])).max(1);
    let rows = usize::from(data[4]) % 64;
    let cols = usize::from(data[5]) % 64;
    let Ok(budget) = WorkerBudget::new(workers) else {
        return;
    };

    let mut next = 0;
    for chunk in chunk_ranges(len, budget) {
        assert_eq!(chunk.start, next);
        assert!(!chunk.is_empty());
        next = chunk.end;
    }
    assert_eq!(next, len);

    let limit = threshold(len, budget);
    let tree = SplitTree::linear(len, limit);
    let mut next = 0;
    for range in tree.leaves() {
        assert_eq!(range.start, next);
        assert!(range.len() <= limit);
        next = range.end;
    }
    assert_eq!(next, len);

    let limit = threshold(rows * cols, budget);
    let mut hits = vec![0u8; rows * cols];
    for block in SplitTree::quad(rows, cols, limit).leaves() {
        for r in block.rows() {
            for c in block.cols() {
                hits[r * cols + c] += 1;
            }
        }
    }
    assert!(hits.iter().all(|&h| h == 1));
});
