//! View authorization gate
//!
//! Each protected page declares an [`AccessPolicy`] and owns an
//! [`AuthGate`]. The gate starts in `Unknown` (the session check is
//! asynchronous relative to first paint) and resolves exactly once to
//! `Authorized` or `Unauthorized`. The decision is pure; performing the
//! redirect is the caller's effect.
//!
//! A session that exists but cannot be parsed is treated identically to
//! no session at all: the gate fails closed.

use crate::session::Session;

/// What a page requires before rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPolicy {
    /// Any valid session
    RequiresLogin,
    /// A valid session whose admin flag coerces to true
    RequiresAdmin,
}

/// Where an unauthorized visitor is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    SignIn,
    Home,
}

/// Gate lifecycle: `Unknown` until the session check resolves, then
/// terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Unknown,
    Authorized,
    Unauthorized(Redirect),
}

/// What the page should render right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderDecision {
    /// Neutral "checking permissions" placeholder. Never protected
    /// content, never the redirect target's content.
    Placeholder,
    /// The page's protected content
    Content,
    /// Nothing; the caller navigates
    Redirect(Redirect),
}

/// Evaluate a policy against a session check result
pub fn evaluate(policy: AccessPolicy, session: Option<&Session>) -> GateState {
    let Some(session) = session else {
        return GateState::Unauthorized(Redirect::SignIn);
    };
    match policy {
        AccessPolicy::RequiresLogin => GateState::Authorized,
        AccessPolicy::RequiresAdmin => {
            if session.is_admin() {
                GateState::Authorized
            } else {
                GateState::Unauthorized(Redirect::Home)
            }
        }
    }
}

/// Per-page authorization state machine
#[derive(Debug)]
pub struct AuthGate {
    policy: AccessPolicy,
    state: GateState,
}

impl AuthGate {
    pub fn new(policy: AccessPolicy) -> Self {
        Self {
            policy,
            state: GateState::Unknown,
        }
    }

    /// Feed the session check result in. The first call decides; the
    /// transition is terminal for the page's lifetime and later calls
    /// are ignored.
    pub fn resolve(&mut self, session: Option<&Session>) -> GateState {
        if self.state == GateState::Unknown {
            self.state = evaluate(self.policy, session);
        }
        self.state
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn decision(&self) -> RenderDecision {
        match self.state {
            GateState::Unknown => RenderDecision::Placeholder,
            GateState::Authorized => RenderDecision::Content,
            GateState::Unauthorized(target) => RenderDecision::Redirect(target),
        }
    }
}
