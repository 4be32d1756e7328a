//! Performance suite scenarios.

mod scenarios;
mod test_helpers;
