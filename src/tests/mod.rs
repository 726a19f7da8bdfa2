//! Consolidated test modules.
//!
//! Scenario tests exercise the public matchers end to end against fixture
//! policies; property tests check the set-algebra laws over generated
//! policies.
