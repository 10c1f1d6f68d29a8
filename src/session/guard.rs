//! Route guarding as a pure predicate over session state
//!
//! The policy lives here; the navigation side effect belongs to whatever
//! routing layer consumes the decision. Evaluation is synchronous and never
//! triggers a status check.

use crate::session::store::SessionState;

/// Who may see a view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewAccess {
    /// Requires an authenticated session (dashboard, calendar, groups)
    Protected,
    /// Only sensible while signed out (login, register, forgot-password)
    PublicOnly,
    /// Visible regardless of session state
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin,
    RedirectToDashboard,
    /// Initial credential check still in flight: show a neutral loading
    /// indicator, render nothing gated
    Pending,
}

pub fn evaluate(access: ViewAccess, state: &SessionState) -> GuardDecision {
    if matches!(state, SessionState::CheckingAuth) {
        return GuardDecision::Pending;
    }

    match access {
        ViewAccess::Protected => {
            if state.is_authenticated() {
                GuardDecision::Allow
            } else {
                GuardDecision::RedirectToLogin
            }
        }
        ViewAccess::PublicOnly => {
            if state.is_authenticated() {
                GuardDecision::RedirectToDashboard
            } else {
                GuardDecision::Allow
            }
        }
        ViewAccess::Open => GuardDecision::Allow,
    }
}
