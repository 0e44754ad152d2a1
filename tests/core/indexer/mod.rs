//! Indexer layer tests
//!
//! End-to-end pipeline behaviour and UTF-8 safety of the splitter on
//! real files.

mod test_pipeline;
mod test_scan;
mod test_unicode;
