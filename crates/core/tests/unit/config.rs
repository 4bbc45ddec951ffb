//! Configuration validation and JSON loading.

use oosim_core::common::{ConfigError, SimError};
use oosim_core::config::Config;
use oosim_core::{Pipeline, TraceRecord};
use rstest::rstest;

#[rstest]
#[case::zero_rob(0, 4, 1, ConfigError::ZeroRobSize)]
#[case::zero_iq(4, 0, 1, ConfigError::ZeroIqSize)]
#[case::zero_width(4, 4, 0, ConfigError::ZeroWidth)]
#[case::rob_below_width(1, 4, 2, ConfigError::RobSmallerThanWidth { rob_size: 1, width: 2 })]
#[case::iq_below_width(4, 3, 4, ConfigError::IqSmallerThanWidth { iq_size: 3, width: 4 })]
fn invalid_sizes_rejected_at_construction(
    #[case] rob: usize,
    #[case] iq: usize,
    #[case] width: usize,
    #[case] expected: ConfigError,
) {
    let err = Pipeline::new(&Config::new(rob, iq, width), Vec::new()).unwrap_err();
    match err {
        SimError::Config(e) => assert_eq!(e, expected),
        other => panic!("unexpected error: {other}"),
    }
}

#[rstest]
#[case(1, 1, 1)]
#[case(2, 2, 2)]
#[case(64, 32, 4)]
fn minimal_and_typical_sizes_accepted(#[case] rob: usize, #[case] iq: usize, #[case] width: usize) {
    assert!(Pipeline::new(&Config::new(rob, iq, width), Vec::new()).is_ok());
}

#[test]
fn register_outside_file_rejected() {
    let mut config = Config::new(4, 4, 1);
    config.arch.num_regs = 8;
    let trace = vec![
        TraceRecord {
            pc: 0,
            opcode: 0,
            dst: Some(7),
            src1: None,
            src2: None,
        },
        TraceRecord {
            pc: 4,
            opcode: 0,
            dst: None,
            src1: Some(2),
            src2: Some(8),
        },
    ];
    let err = Pipeline::new(&config, trace).unwrap_err();
    assert!(matches!(
        err,
        SimError::RegisterOutOfRange {
            seq: 1,
            reg: 8,
            limit: 8
        }
    ));
}

#[test]
fn json_document_overrides_sections() {
    let config = Config::from_json(
        r#"{
            "pipeline": { "rob_size": 32, "iq_size": 16, "width": 2 },
            "latency": { "base": 2, "overrides": { "3": 9 } },
            "arch": { "num_regs": 128 }
        }"#,
    )
    .unwrap();

    assert_eq!(config.pipeline.rob_size, 32);
    assert_eq!(config.pipeline.iq_size, 16);
    assert_eq!(config.latency.latency_for(0), 2);
    assert_eq!(config.latency.latency_for(3), 9);
    assert_eq!(config.arch.num_regs, 128);
    assert!(config.validate().is_ok());
}

#[test]
fn empty_json_is_default() {
    assert_eq!(Config::from_json("{}").unwrap(), Config::default());
}

#[test]
fn zero_register_file_rejected() {
    let config = Config::from_json(r#"{ "arch": { "num_regs": 0 } }"#).unwrap();
    assert_eq!(config.validate(), Err(ConfigError::ZeroRegisters));
}

#[test]
fn error_messages_name_the_parameter() {
    let msg = ConfigError::IqSmallerThanWidth {
        iq_size: 2,
        width: 4,
    }
    .to_string();
    assert!(msg.contains('2') && msg.contains('4'), "{msg}");
}
