use student_type_core::ClassifierState;
use student_type_core::PipelineError;
use student_type_core::RawInput;
use student_type_core::assess;

use super::fixture;

#[test]
fn missing_encoder_leaves_the_model_unavailable() {
    let dir = tempfile::tempdir().expect("tempdir");
    let state = ClassifierState::load(
        &fixture("student_model.json"),
        &dir.path().join("label_encoder.json"),
    );

    assert!(!state.is_available());
    let first = assess(&state, &RawInput::new());
    for _ in 0..3 {
        assert_eq!(assess(&state, &RawInput::new()), first);
    }
    assert!(matches!(first, Err(PipelineError::ModelUnavailable { .. })));
}

#[test]
fn corrupt_model_is_unavailable_rather_than_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let model_path = dir.path().join("student_model.json");
    std::fs::write(&model_path, b"\x80\x04\x95pickle").expect("write");

    let state = ClassifierState::load(&model_path, &fixture("label_encoder.json"));
    match state {
        ClassifierState::Unavailable { reason } => {
            assert!(reason.starts_with("failed to parse"), "{reason}");
        }
        ClassifierState::Ready(_) => panic!("binary garbage must not load"),
    }
}

#[test]
fn encoder_with_too_few_classes_is_unavailable() {
    let dir = tempfile::tempdir().expect("tempdir");
    let encoder_path = dir.path().join("label_encoder.json");
    std::fs::write(&encoder_path, r#"{"classes": ["Topper"]}"#).expect("write");

    let state = ClassifierState::load(&fixture("student_model.json"), &encoder_path);
    match state {
        ClassifierState::Unavailable { reason } => {
            assert!(reason.contains("4 classes"), "{reason}");
        }
        ClassifierState::Ready(_) => panic!("class counts disagree"),
    }
}
