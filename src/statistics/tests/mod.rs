//! Unit tests for statistics computations and queries.
