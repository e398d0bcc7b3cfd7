//! Property-based tests for qreftag
//!
//! Property tests verify invariants that should hold for all inputs, rather
//! than testing specific cases.
//!
//! ## Running Property Tests
//!
//! ```sh
//! cargo test property --release
//! ```
//!
//! ## Test Modules
//!
//! - `edit_distance_props`: Levenshtein distance
//!   - Symmetric
//!   - Zero against itself
//!   - Distance from empty is the character count
//!   - Triangle inequality
//!
//! - `classifier_props`: the detector cascade and similarity engine
//!   - Classification never panics, empty strings included
//!   - A query compared with itself is always `same`
//!   - Cache resets never change a category
//!   - Query similarity stays within [0, 1]
//!   - addWords and removeWords mirror each other
//!
//! ## Configuration
//!
//! By default, proptest runs 256 cases per property. This can be configured
//! via the `PROPTEST_CASES` environment variable.

mod classifier_props;
mod edit_distance_props;
