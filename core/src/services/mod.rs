//! Services containing the client-side signup logic.

pub mod signup;
pub mod verification;

// Re-export commonly used types
pub use signup::{
    NicknameChecker, Requirement, SignupApi, SignupError, SignupForm, SignupMessages,
    SignupSettings, SignupSubmission,
};
pub use verification::{
    ActionStatus, BusyFlag, BusyGuard, FieldError, FlowConfig, FlowMessages, FlowSnapshot,
    FlowState, IdentityRejection, SendOutcome, VerificationChannel, VerificationFlow,
    VerifyOutcome,
};
