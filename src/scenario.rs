//! The reference walkthrough, written as a `.vops` script so it runs through
//! the same parser and runner as user scripts.

use crate::script::{Report, Runner, ScriptError};

pub const WALKTHROUGH: &str = "\
# three appends, growing 1 -> 2 -> 4
push 10
push 20
push 30
size
front
back
expect capacity 4

# insert before the second element, then drop the first
insert 1 15
expect [10, 15, 20, 30]
erase 0
expect [15, 20, 30]

# clearing keeps the buffer
clear
size
expect []
expect capacity 4
";

pub fn run_walkthrough(verbose: u8) -> Result<Report, ScriptError> {
    Runner::new(verbose).run_source(WALKTHROUGH)
}
