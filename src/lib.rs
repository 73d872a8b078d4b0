//! `access-operators` is a command line tool that generates the inputs for
//! the MSK-ACCESS workflows from a sequencing lab's metadata export. This
//! package is composed of both a library crate, as well as a binary crate.
//!
//! This documentation generally refers to the library crate documentation for
//! use by developers of `access-operators`. The library exposes each stage of
//! the input generation so that it can be run without going through the
//! command line.
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]

pub mod errors;
pub mod fastq_to_bam;
pub mod utils;
