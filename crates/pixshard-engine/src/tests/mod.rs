//! Tests for the pixshard-engine crate.

mod helpers;
