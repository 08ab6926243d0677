//! Loom concurrency tests for the allocators.
//!
//! These tests explore the thread interleavings of concurrent allocation
//! and release to verify that no id is ever handed out twice.
//!
//! # Running Loom Tests
//!
//! ```bash
//! RUSTFLAGS="--cfg loom" cargo test --features loom --test loom_tests --release
//! ```
//!
//! ## References
//!
//! - [Loom crate](https://github.com/tokio-rs/loom)

#![cfg(loom)]

use dbids_core::sync::{thread, Arc};
use dbids_core::{DbidAllocator, ReusingDbidAllocator, SimpleDbidAllocator, TrivialDbidAllocator};

fn two_singles_are_distinct<A>(make: fn() -> A)
where
    A: DbidAllocator + 'static,
{
    loom::model(move || {
        let alloc = Arc::new(make());
        let other = Arc::clone(&alloc);

        let handle = thread::spawn(move || other.generate_single().expect("ok"));
        let mine = alloc.generate_single().expect("ok");
        let theirs = handle.join().expect("thread panicked");

        assert_ne!(mine, theirs);
    });
}

#[test]
fn loom_trivial_singles() {
    two_singles_are_distinct(TrivialDbidAllocator::new);
}

#[test]
fn loom_simple_singles() {
    two_singles_are_distinct(SimpleDbidAllocator::new);
}

#[test]
fn loom_reusing_singles() {
    two_singles_are_distinct(ReusingDbidAllocator::new);
}

#[test]
fn loom_reusing_release_and_reuse() {
    loom::model(|| {
        let alloc = Arc::new(ReusingDbidAllocator::new());
        let first = alloc.generate_single().expect("ok");

        let other = Arc::clone(&alloc);
        let handle = thread::spawn(move || other.generate_single().expect("ok"));
        alloc.deallocate_single(&first).expect("allocated");
        let reused = alloc.generate_single().expect("ok");
        let theirs = handle.join().expect("thread panicked");

        assert_ne!(reused, theirs);
    });
}

#[test]
fn loom_simple_ranges_disjoint() {
    loom::model(|| {
        let alloc = Arc::new(SimpleDbidAllocator::new());
        let other = Arc::clone(&alloc);

        let handle = thread::spawn(move || other.generate_range(3).expect("ok"));
        let mine = alloc.generate_range(2).expect("ok");
        let theirs = handle.join().expect("thread panicked");

        assert!(!mine.overlaps(&theirs));
    });
}
