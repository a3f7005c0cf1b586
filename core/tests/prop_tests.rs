//! Property tests for the verification flow state machine

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use proptest::prelude::*;

use eq_core::services::verification::{
    ActionStatus, BusyFlag, FlowConfig, FlowMessages, IdentityRejection, VerificationChannel,
    VerificationFlow, VerifyOutcome,
};
use eq_core::{ChannelError, FormFields, FormValue};
use eq_shared::email::is_valid_email;

const TTL_SECONDS: u64 = 300;
const GOOD_CODE: &str = "123456";
const IDENTITIES: [&str; 3] = ["a@example.com", "b@example.com", "not-an-email"];

struct EchoChannel;

#[async_trait]
impl VerificationChannel for EchoChannel {
    type Response = String;

    fn validate_identity(&self, identity: &str) -> Result<(), IdentityRejection> {
        if is_valid_email(identity) {
            Ok(())
        } else {
            Err(IdentityRejection::broadcast())
        }
    }

    async fn send_code(&self, _identity: &str) -> Result<(), ChannelError> {
        Ok(())
    }

    async fn verify_code(&self, identity: &str, code: &str) -> Result<String, ChannelError> {
        if code == GOOD_CODE {
            Ok(format!("tok-{identity}"))
        } else {
            Err(ChannelError::bad_format("mismatch"))
        }
    }

    fn token(&self, response: &String) -> String {
        response.clone()
    }
}

#[derive(Debug, Clone)]
enum Op {
    SetIdentity(usize),
    SetCode(bool),
    Send,
    Verify,
    Advance(u64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..IDENTITIES.len()).prop_map(Op::SetIdentity),
        any::<bool>().prop_map(Op::SetCode),
        Just(Op::Send),
        Just(Op::Verify),
        (0u64..400).prop_map(Op::Advance),
    ]
}

fn run(ops: Vec<Op>) -> Result<(), TestCaseError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .unwrap();

    runtime.block_on(async move {
        let identity = FormValue::default();
        let code = FormValue::default();
        let flow = VerificationFlow::new(
            Arc::new(EchoChannel),
            FlowConfig::new(TTL_SECONDS, ["email"], "emailCode", FlowMessages::default()),
            BusyFlag::new(),
            FormFields::new(),
            identity.subscribe(),
            code.subscribe(),
        )
        .unwrap();

        // Identity edits are applied without reading the flow in between, so
        // a sequence like a -> b -> a has to reset just like a -> b
        let mut mutated = false;
        for op in ops {
            if let Op::SetIdentity(index) = op {
                let next = IDENTITIES[index];
                mutated |= identity.get() != next;
                identity.set(next);
                continue;
            }

            let before = flow.snapshot();
            if mutated {
                prop_assert!(!before.verified);
                prop_assert!(before.token.is_none());
                prop_assert!(!before.code_sent);
                prop_assert_eq!(before.remaining_seconds, 0);
                prop_assert_eq!(before.send_status, ActionStatus::Idle);
                prop_assert_eq!(before.verify_status, ActionStatus::Idle);
                mutated = false;
            }

            match op {
                Op::SetIdentity(_) => {}
                Op::SetCode(good) => code.set(if good { GOOD_CODE } else { "000000" }),
                Op::Send => {
                    let outcome = flow.on_send_code().await;
                    let after = flow.snapshot();
                    prop_assert_eq!(outcome.is_success(), before.identity_valid);
                    prop_assert_eq!(after.code_sent, before.identity_valid);
                    prop_assert!(!after.verified);
                    if after.code_sent {
                        prop_assert_eq!(after.remaining_seconds, TTL_SECONDS);
                    }
                }
                Op::Verify => {
                    let outcome = flow.on_verify_code().await;
                    let expected_ok = before.is_running() && before.code == GOOD_CODE;
                    prop_assert_eq!(outcome == VerifyOutcome::Verified, expected_ok);
                }
                Op::Advance(seconds) => {
                    tokio::time::advance(Duration::from_secs(seconds)).await;
                }
            }

            let now = flow.snapshot();
            prop_assert_eq!(now.token.is_some(), now.verified);
            prop_assert!(now.remaining_seconds <= TTL_SECONDS);
            if let Some(token) = &now.token {
                prop_assert_eq!(token, &format!("tok-{}", now.identity));
            }
        }

        if mutated {
            let last = flow.snapshot();
            prop_assert!(!last.verified);
            prop_assert!(!last.code_sent);
            prop_assert_eq!(last.remaining_seconds, 0);
        }
        Ok(())
    })
}

proptest! {
    /// The token always belongs to the current identity and exists exactly
    /// when the flow is verified.
    #[test]
    fn flow_invariants_hold(ops in prop::collection::vec(op(), 1..40)) {
        run(ops)?;
    }
}
