//! Storage layer tests

mod test_jsonl;
