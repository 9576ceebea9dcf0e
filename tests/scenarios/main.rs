//! Scenario-based tests for trainflow

mod helpers;

mod end_to_end;
