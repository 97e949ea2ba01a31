//! Unit tests for the ordinance save record.
