//! Command-line interface for sampling graphs stored as text files.
//!
//! The `sample` command reads an edge list or adjacency list, reduces it with
//! one of the sampling strategies and optionally writes the sample back out as
//! an edge list.

mod commands;

pub use commands::{
    Cli, CliError, Command, InputFormat, SampleCommand, SampleSummary, TuningArgs,
    render_summary, run_cli,
};
