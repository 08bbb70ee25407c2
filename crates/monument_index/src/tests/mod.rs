//! End-to-end index scenarios against an in-memory world

mod index_scenarios;
