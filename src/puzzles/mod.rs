//! Puzzle engines: pure, synchronous step generators
//!
//! Each module turns validated parameters into a complete history before
//! anything is shown:
//!
//! - [`hanoi`]: recursive move solver, tower replay, narrated move frames
//! - [`two_sum`]: brute force, two pointers and hash map over one array
//! - [`fibonacci`]: call-tree recursion, iteration and memoization
//! - [`river`]: farmer/fox/hen/grain crossing found by breadth-first search
//!
//! Generators never know about timing; playback is layered on top by
//! [`crate::playback`].

pub mod fibonacci;
pub mod hanoi;
pub mod river;
pub mod two_sum;
