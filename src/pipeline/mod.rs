//! Processing pipeline components.

mod coordinator;
mod processor;

pub use coordinator::{ProcessCheck, collect_input_files, output_path_for, should_process};
pub use processor::{
    FileOutcome, ProcessOptions, format_result_line, format_skip_line, process_file,
};
