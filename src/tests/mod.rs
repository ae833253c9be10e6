//! Unit tests for the encoder modules
//!
//! Tests are organized by module and functionality.

pub mod encoder_tests;
pub mod frame_tests;
pub mod huffman_tests;
pub mod mdct_tests;
pub mod pcm_utils_tests;
pub mod sink_tests;
