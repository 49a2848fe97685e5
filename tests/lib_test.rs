//! Library integration tests.

use hasprobe::HasprobeError;

#[test]
fn error_types_are_public() {
    let err = HasprobeError::CircularProbe {
        name: "test".into(),
    };
    assert!(err.to_string().contains("test"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> hasprobe::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn logging_init_is_repeatable() {
    let _ = hasprobe::logging::init_tracing(Some("hasprobe=debug"), false);
    assert!(!hasprobe::logging::init_tracing(None, true));
}
