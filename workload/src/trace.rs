//! Pagelist Traces
//!
//! Reading the per-process pagelist files. Each line is one request in
//! the form `"PP C"`: a zero-padded two-digit page ID, a space, and a
//! single R or W.

use crate::error::WorkloadError;
use crate::source::RequestSource;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use vmsim_mm::{IoRequest, Operation, ProcId, PROC_COUNT, PROC_MAX_PAGES};

/// Name of the pagelist file for a process
pub fn pagelist_file(proc_id: ProcId) -> String {
    format!("pagelist_P{}.txt", proc_id.get())
}

/// Decode one trace line into `(page_id, op)`
pub fn parse_line(line: &str) -> Option<(u8, Operation)> {
    let (page, op) = line.trim_end().split_once(' ')?;

    let page_id: u8 = page.parse().ok()?;
    if page_id as usize >= PROC_MAX_PAGES {
        return None;
    }

    let mut chars = op.chars();
    let op = Operation::from_char(chars.next()?)?;
    if chars.next().is_some() {
        return None;
    }

    Some((page_id, op))
}

/// Parse a whole trace, reporting the offending line on failure
pub fn parse_trace<R: BufRead>(
    reader: R,
    file: &str,
) -> Result<Vec<(u8, Operation)>, WorkloadError> {
    let mut requests = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.is_empty() {
            continue;
        }

        let request = parse_line(&line).ok_or_else(|| WorkloadError::Parse {
            file: file.to_string(),
            line: index + 1,
            text: line.clone(),
        })?;
        requests.push(request);
    }

    Ok(requests)
}

/// Load one pagelist file
pub fn load_trace(path: &Path) -> Result<Vec<(u8, Operation)>, WorkloadError> {
    let file = File::open(path)?;
    parse_trace(BufReader::new(file), &path.display().to_string())
}

/// Request source backed by the four pagelist trace files
#[derive(Debug)]
pub struct TraceSource {
    traces: [Vec<(u8, Operation)>; PROC_COUNT],
    cursors: [usize; PROC_COUNT],
}

impl TraceSource {
    /// Open and parse `pagelist_P1.txt`..`pagelist_P4.txt` in `dir`
    pub fn open(dir: &Path) -> Result<Self, WorkloadError> {
        let mut traces: [Vec<(u8, Operation)>; PROC_COUNT] = Default::default();
        for proc_id in ProcId::all() {
            traces[proc_id.index()] = load_trace(&dir.join(pagelist_file(proc_id)))?;
        }

        Ok(TraceSource {
            traces,
            cursors: [0; PROC_COUNT],
        })
    }

    /// Requests left for the shortest trace; an upper bound on rounds
    pub fn rounds_available(&self) -> usize {
        self.traces
            .iter()
            .zip(self.cursors.iter())
            .map(|(trace, cursor)| trace.len() - cursor)
            .min()
            .unwrap_or(0)
    }
}

impl RequestSource for TraceSource {
    fn next_request(&mut self, proc_id: ProcId) -> Result<IoRequest, WorkloadError> {
        let cursor = &mut self.cursors[proc_id.index()];
        let (page_id, op) =
            *self.traces[proc_id.index()]
                .get(*cursor)
                .ok_or(WorkloadError::Exhausted {
                    proc_id: proc_id.get(),
                })?;
        *cursor += 1;

        // pages were range-checked at parse time
        IoRequest::new(proc_id, page_id, op).map_err(|_| WorkloadError::Exhausted {
            proc_id: proc_id.get(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::io::Write as _;

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("07 R"), Some((7, Operation::Read)));
        assert_eq!(parse_line("31 W"), Some((31, Operation::Write)));
        assert_eq!(parse_line("00 R\n"), Some((0, Operation::Read)));
    }

    #[test]
    fn test_parse_line_rejects_garbage() {
        assert_eq!(parse_line("32 R"), None); // page out of range
        assert_eq!(parse_line("ab R"), None);
        assert_eq!(parse_line("07 X"), None);
        assert_eq!(parse_line("07"), None);
        assert_eq!(parse_line("07 RW"), None);
        assert_eq!(parse_line(""), None);
    }

    #[test]
    fn test_parse_trace() {
        let input = "00 R\n17 W\n31 R\n";
        let trace = parse_trace(Cursor::new(input), "test").unwrap();
        assert_eq!(
            trace,
            vec![
                (0, Operation::Read),
                (17, Operation::Write),
                (31, Operation::Read)
            ]
        );
    }

    #[test]
    fn test_parse_trace_reports_line_number() {
        let input = "00 R\nbroken\n31 R\n";
        let err = parse_trace(Cursor::new(input), "pagelist_P1.txt").unwrap_err();
        match err {
            WorkloadError::Parse { file, line, text } => {
                assert_eq!(file, "pagelist_P1.txt");
                assert_eq!(line, 2);
                assert_eq!(text, "broken");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_trace_source_round_robin() {
        let dir = tempfile::tempdir().unwrap();
        for proc in 1..=4u8 {
            let mut file = File::create(dir.path().join(format!("pagelist_P{}.txt", proc))).unwrap();
            writeln!(file, "{:02} R", proc).unwrap();
            writeln!(file, "{:02} W", proc + 10).unwrap();
        }

        let mut source = TraceSource::open(dir.path()).unwrap();
        assert_eq!(source.rounds_available(), 2);

        for proc_id in ProcId::all() {
            let req = source.next_request(proc_id).unwrap();
            assert_eq!(req.page_id, proc_id.get());
            assert_eq!(req.op, Operation::Read);
        }
        for proc_id in ProcId::all() {
            let req = source.next_request(proc_id).unwrap();
            assert_eq!(req.page_id, proc_id.get() + 10);
            assert_eq!(req.op, Operation::Write);
        }

        let err = source.next_request(ProcId::new(1).unwrap()).unwrap_err();
        assert!(matches!(err, WorkloadError::Exhausted { proc_id: 1 }));
    }

    #[test]
    fn test_missing_file_is_a_file_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TraceSource::open(dir.path()).unwrap_err();
        assert!(matches!(err, WorkloadError::File(_)));
    }
}
