// Line-based rules that turn raw evaluator text into structure.
// - segmenter.rs: title/item segmentation of raw feedback

pub mod segmenter;

pub use segmenter::{content_lines, segment, TITLE_MARKER};
