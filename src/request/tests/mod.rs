//! Request accessor tests, one file per concern.

mod body;
mod form;
mod proptest;
mod query;
