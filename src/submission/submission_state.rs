/// The only failure text ever shown to the user
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred, please try again later";

/// Lifecycle of a submission
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    /// Last submit attempt had empty or whitespace-only text
    InputInvalid,
    /// Waiting for the debounce timer or the backend response
    Pending,
    /// Title-cased suggestions from the last applied response
    Success(Vec<String>),
    Failed(String),
}

impl SubmissionState {
    pub fn is_pending(&self) -> bool {
        matches!(self, SubmissionState::Pending)
    }

    pub fn is_input_invalid(&self) -> bool {
        matches!(self, SubmissionState::InputInvalid)
    }

    pub fn results(&self) -> &[String] {
        match self {
            SubmissionState::Success(results) => results,
            _ => &[],
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            SubmissionState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Read-only view of the controller for rendering
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionSnapshot {
    pub query_text: String,
    pub is_input_invalid: bool,
    pub is_pending: bool,
    pub results: Vec<String>,
    pub error_message: Option<String>,
}

impl SubmissionSnapshot {
    pub fn new(query_text: &str, state: &SubmissionState) -> Self {
        Self {
            query_text: query_text.to_string(),
            is_input_invalid: state.is_input_invalid(),
            is_pending: state.is_pending(),
            results: state.results().to_vec(),
            error_message: state.error_message().map(str::to_string),
        }
    }
}
