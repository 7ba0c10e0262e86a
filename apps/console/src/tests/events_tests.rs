use super::*;

fn status(status: u16) -> ClientError {
    ClientError::Status {
        status,
        message: "nope".into(),
    }
}

#[test]
fn client_errors_are_classified_by_status() {
    let classify = |err: ClientError| UiError::from_client_error(UiErrorContext::Save, &err).category();
    assert_eq!(classify(status(404)), UiErrorCategory::NotFound);
    assert_eq!(classify(status(409)), UiErrorCategory::Rejected);
    assert_eq!(classify(status(400)), UiErrorCategory::Rejected);
    assert_eq!(classify(status(503)), UiErrorCategory::Server);
    assert_eq!(
        classify(ClientError::Transport("connection refused".into())),
        UiErrorCategory::Transport
    );
    assert_eq!(
        classify(ClientError::Decode("expected array".into())),
        UiErrorCategory::Decode
    );
}

#[test]
fn transport_summary_points_at_the_server() {
    let err = UiError::from_client_error(
        UiErrorContext::Load,
        &ClientError::Transport("connection refused".into()),
    );
    let summary = err.summary();
    assert!(summary.starts_with("Connection: "));
    assert!(summary.contains("is the API server running?"));
    assert_eq!(err.context(), UiErrorContext::Load);
}

#[test]
fn missing_record_on_save_suggests_refresh() {
    let err = UiError::from_client_error(UiErrorContext::Delete, &status(404));
    assert!(err.summary().contains("refresh the list"));

    let load = UiError::from_client_error(UiErrorContext::Load, &status(404));
    assert!(!load.summary().contains("refresh the list"));
}

#[test]
fn classifies_backend_command_processor_disconnect_as_transport_error() {
    let err = UiError::from_message(
        UiErrorContext::General,
        "Backend command processor disconnected; restart the console",
    );
    assert_eq!(err.category(), UiErrorCategory::Transport);

    let other = UiError::from_message(UiErrorContext::General, "something odd");
    assert_eq!(other.category(), UiErrorCategory::Unknown);
}

#[test]
fn outcome_actions_map_to_contexts() {
    assert_eq!(UiErrorContext::from(OutcomeAction::Load), UiErrorContext::Load);
    assert_eq!(UiErrorContext::from(OutcomeAction::Save), UiErrorContext::Save);
    assert_eq!(
        UiErrorContext::from(OutcomeAction::Delete),
        UiErrorContext::Delete
    );
}
