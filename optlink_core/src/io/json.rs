//! JSON snapshot writing for solver tasks
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::io::IoError;
use crate::optimize::task::Task;

/// Write a populated task as pretty printed JSON, for inspection of what
/// the loader actually registered.
pub fn write_task<W: Write>(task: &Task, writer: W) -> Result<(), IoError> {
    serde_json::to_writer_pretty(writer, task)?;
    Ok(())
}

/// Write a task snapshot to a file path
pub fn write_task_to_path<P: AsRef<Path>>(task: &Task, path: P) -> Result<(), IoError> {
    let file = File::create(path)?;
    write_task(task, BufWriter::new(file))
}
