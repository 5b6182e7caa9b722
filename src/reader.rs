use crate::error::{Result, ViewerError};
use crate::system_io::LogFs;
use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::path::Path;

/// Yields each line of `reader` decoded lossily with trailing whitespace removed.
///
/// `\n`, `\r\n` and a lone `\r` all end a line, so progress-bar redraws in
/// raw terminal captures count as separate lines.
pub fn for_each_line<R, F>(mut reader: R, mut f: F) -> std::io::Result<()>
where
    R: BufRead,
    F: FnMut(String) -> bool,
{
    let mut buf = Vec::new();
    // A `\r` ended the previous line; swallow a `\n` that directly follows it.
    let mut after_cr = false;
    loop {
        let (used, ended) = {
            let available = reader.fill_buf()?;
            if available.is_empty() {
                if !buf.is_empty() {
                    f(String::from_utf8_lossy(&buf).trim_end().to_string());
                }
                return Ok(());
            }
            if after_cr && available[0] == b'\n' {
                (1, None)
            } else {
                match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                    Some(i) => {
                        buf.extend_from_slice(&available[..i]);
                        (i + 1, Some(available[i]))
                    }
                    None => {
                        buf.extend_from_slice(available);
                        (available.len(), None)
                    }
                }
            }
        };
        reader.consume(used);
        after_cr = false;

        if let Some(terminator) = ended {
            after_cr = terminator == b'\r';
            let line = String::from_utf8_lossy(&buf).trim_end().to_string();
            buf.clear();
            if !f(line) {
                return Ok(());
            }
        }
    }
}

/// Read a log file, keeping only the last `tail` lines when given.
/// A tail of zero means the whole file.
pub fn read_log_lines(fs: &dyn LogFs, path: &Path, tail: Option<usize>) -> Result<Vec<String>> {
    let reader = fs.open_for_read(path).map_err(|e| ViewerError::io(path, e))?;

    let lines: Vec<String> = match tail.filter(|&n| n > 0) {
        Some(n) => {
            let mut window = VecDeque::with_capacity(n);
            for_each_line(reader, |line| {
                if window.len() == n {
                    window.pop_front();
                }
                window.push_back(line);
                true
            })
            .map_err(|e| ViewerError::io(path, e))?;
            window.into()
        }
        None => {
            let mut all = Vec::new();
            for_each_line(reader, |line| {
                all.push(line);
                true
            })
            .map_err(|e| ViewerError::io(path, e))?;
            all
        }
    };

    log::debug!("Read {} lines from {}", lines.len(), path.display());
    Ok(lines)
}

/// Print a log file (or its tail) to `out`. Nothing is written if the read fails.
pub fn show_log(
    fs: &dyn LogFs,
    path: &Path,
    tail: Option<usize>,
    out: &mut dyn Write,
) -> Result<()> {
    if !fs.exists(path) {
        return Err(ViewerError::NotFound(path.to_path_buf()));
    }
    let lines = read_log_lines(fs, path, tail)?;
    for line in lines {
        writeln!(out, "{line}").map_err(|e| ViewerError::io(path, e))?;
    }
    Ok(())
}
