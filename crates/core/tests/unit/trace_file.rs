//! Trace files on disk and the end-to-end driver.

use std::io::Write;

use oosim_core::common::{SimError, TraceError, TraceErrorKind};
use oosim_core::config::Config;
use oosim_core::sim::load_trace;
use oosim_core::Simulator;
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

fn write_trace(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const SAMPLE: &str = "\
# pc      op dst s1 s2
bc020064  0  1  2  3
bc020068  2  4  1 -1

0xbc02006c 3  5  4  1
bc020070  1 -1  5 -1
";

#[test]
fn load_trace_reads_records_in_order() {
    let file = write_trace(SAMPLE);
    let records = load_trace(file.path()).unwrap();

    assert_eq!(records.len(), 4);
    assert_eq!(records[0].pc, 0xbc02_0064);
    assert_eq!(records[2].pc, 0xbc02_006c);
    assert_eq!(records[2].opcode, 3);
    assert_eq!(records[3].dst, None);
    assert_eq!(records[3].src1, Some(5));
}

#[test]
fn simulator_runs_trace_file_to_completion() {
    let file = write_trace(SAMPLE);
    let mut sim = Simulator::from_trace_file(&Config::new(8, 4, 2), file.path()).unwrap();
    let stats = sim.run().clone();

    assert_eq!(stats.instructions_fetched, 4);
    assert_eq!(stats.instructions_retired, 4);
    assert!(stats.ipc() > 0.0);
    assert!(sim.is_done());
}

#[test]
fn malformed_line_reports_position() {
    let file = write_trace("bc020064 0 1 2 3\n\nbc020068 0 1 two 3\n");
    let err = Simulator::from_trace_file(&Config::new(4, 4, 1), file.path()).unwrap_err();

    match err {
        SimError::Trace(TraceError::Malformed { line, kind }) => {
            assert_eq!(line, 3);
            assert_eq!(
                kind,
                TraceErrorKind::InvalidNumber {
                    field: "src1",
                    value: "two".to_string(),
                }
            );
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.trace");
    let err = load_trace(&path).unwrap_err();

    assert!(matches!(err, TraceError::Io { .. }));
    assert!(err.to_string().contains("absent.trace"));
}

#[test]
fn empty_file_simulates_one_cycle() {
    let file = write_trace("# nothing here\n");
    let mut sim = Simulator::from_trace_file(&Config::new(4, 4, 1), file.path()).unwrap();
    let stats = sim.run();

    assert_eq!(stats.instructions_retired, 0);
    assert_eq!(stats.cycles(), 0);
    assert!(stats.ipc().abs() < f64::EPSILON);
}
