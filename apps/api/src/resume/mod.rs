// Resume intake: PDF text extraction and the per-session text memo.

pub mod cache;
pub mod extractor;
