//! The tools module provides the helpers around the codec used by the command line program.
//!
//! The tools are:
//! - cli: Command line interface and the HufOpts settings it produces.
//! - freq_count: Byte frequency count used to build a tree for each input.
//! - report: Size and ratio summary for the user.
//!
pub mod cli;
pub mod freq_count;
pub mod report;
