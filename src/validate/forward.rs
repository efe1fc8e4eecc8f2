//! `+f <channel>` forward target checks.
//!
//! Forwarding sends overflow and invite-only joiners to another channel, so
//! an unprivileged user must not be able to point it at a channel they do not
//! control unless that channel opted in with the free-target mode.

use slirc_modes::{ChannelExt, ChannelModes, StatusLevel};
use tracing::trace;

use crate::context::{AccessFlags, ValidationContext};

/// Longest accepted forward target, in bytes.
pub const FORWARD_TARGET_MAX: usize = 50;

/// Validator for mode `f`.
pub fn check_forward(value: &str, ctx: &ValidationContext<'_>) -> bool {
    if !value.is_global_channel() || value.len() > FORWARD_TARGET_MAX {
        trace!(channel = value, "forward target is not a global channel name");
        return false;
    }

    // Server and services restoring modes carry no actor to check.
    if ctx.is_internal() {
        return true;
    }

    let lookup = ctx.lookup;
    let target = lookup.channel(value);
    let target_reg = lookup.registration(value);
    if target.is_none() && target_reg.is_none() {
        trace!(channel = value, "forward target does not exist");
        return false;
    }

    if target
        .as_ref()
        .is_some_and(|c| c.modes.contains(ChannelModes::FREE_TARGET))
    {
        return true;
    }
    if target_reg
        .as_ref()
        .is_some_and(|r| r.mlock.on.contains(ChannelModes::FREE_TARGET))
    {
        return true;
    }

    let allowed = if let Some(user) = ctx.user {
        // Owner and protect count as op even without +o.
        let opped = target.is_some()
            && lookup
                .member_status(value, user)
                .is_some_and(|status| status.at_least(StatusLevel::Op));
        opped
            || target_reg
                .as_ref()
                .is_some_and(|r| lookup.user_access(r, user).contains(AccessFlags::SET))
    } else if let Some(account) = ctx.account {
        target_reg
            .as_ref()
            .is_some_and(|r| lookup.account_access(r, account).contains(AccessFlags::SET))
    } else {
        false
    };

    if !allowed {
        trace!(channel = value, ?ctx, "no privilege on forward target");
    }
    allowed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{
        AccountRef, ChannelLookup, ChannelRegistration, ChannelState, ModeLock, NoLookup, UserRef,
    };
    use slirc_modes::StatusModes;

    /// One target channel, optionally live, optionally registered, with one
    /// member.
    #[derive(Default)]
    struct Fixture {
        live: Option<ChannelState>,
        reg: Option<ChannelRegistration>,
        member: Option<(String, StatusModes)>,
    }

    impl ChannelLookup for Fixture {
        fn channel(&self, name: &str) -> Option<ChannelState> {
            self.live.clone().filter(|c| c.name == name)
        }

        fn registration(&self, name: &str) -> Option<ChannelRegistration> {
            self.reg.clone().filter(|r| r.name == name)
        }

        fn member_status(&self, channel: &str, user: &UserRef) -> Option<StatusModes> {
            self.live.as_ref().filter(|c| c.name == channel)?;
            self.member
                .as_ref()
                .filter(|(nick, _)| *nick == user.nick)
                .map(|(_, status)| *status)
        }
    }

    fn live(modes: ChannelModes) -> Fixture {
        Fixture {
            live: Some(ChannelState::new("#target", modes)),
            ..Fixture::default()
        }
    }

    #[test]
    fn bad_names_rejected_for_everyone() {
        let user = UserRef::new("alice");
        let internal = ValidationContext::internal(&NoLookup);
        let by_user = ValidationContext::for_user(&NoLookup, &user);

        for value in ["notachannel", "&local", "#has space", ""] {
            assert!(!check_forward(value, &internal), "{value}");
            assert!(!check_forward(value, &by_user), "{value}");
        }
        let long = format!("#{}", "x".repeat(FORWARD_TARGET_MAX));
        assert!(!check_forward(&long, &internal));
    }

    #[test]
    fn internal_changes_skip_existence() {
        let ctx = ValidationContext::internal(&NoLookup);
        assert!(check_forward("#target", &ctx));
        assert!(check_forward("#nowhere", &ctx));
    }

    #[test]
    fn missing_target_rejected() {
        let user = UserRef::new("alice");
        let ctx = ValidationContext::for_user(&NoLookup, &user);
        assert!(!check_forward("#target", &ctx));
    }

    #[test]
    fn free_target_live_or_locked() {
        let user = UserRef::new("alice");

        let host = live(ChannelModes::FREE_TARGET);
        assert!(check_forward("#target", &ValidationContext::for_user(&host, &user)));

        let host = Fixture {
            reg: Some(ChannelRegistration::new("#target").with_mlock(ModeLock {
                on: ChannelModes::FREE_TARGET,
                ..ModeLock::default()
            })),
            ..Fixture::default()
        };
        assert!(check_forward("#target", &ValidationContext::for_user(&host, &user)));
    }

    #[test]
    fn unprivileged_user_rejected_op_accepted() {
        let user = UserRef::new("alice");

        let mut host = live(ChannelModes::NO_EXTERNAL);
        host.member = Some(("alice".into(), StatusModes::VOICE));
        assert!(!check_forward("#target", &ValidationContext::for_user(&host, &user)));

        host.member = Some(("alice".into(), StatusModes::OP));
        assert!(check_forward("#target", &ValidationContext::for_user(&host, &user)));

        host.member = Some(("alice".into(), StatusModes::OWNER));
        assert!(check_forward("#target", &ValidationContext::for_user(&host, &user)));
    }

    #[test]
    fn set_access_accepted_for_user_and_account() {
        let host = Fixture {
            reg: Some(ChannelRegistration::new("#target").with_access("carol", AccessFlags::SET)),
            ..Fixture::default()
        };

        let carol = UserRef::new("c4rol").logged_in("carol");
        let stranger = UserRef::new("mallory");
        assert!(check_forward("#target", &ValidationContext::for_user(&host, &carol)));
        assert!(!check_forward("#target", &ValidationContext::for_user(&host, &stranger)));

        let account = AccountRef::new("carol");
        let other = AccountRef::new("dave");
        assert!(check_forward("#target", &ValidationContext::for_account(&host, &account)));
        assert!(!check_forward("#target", &ValidationContext::for_account(&host, &other)));
    }

    #[test]
    fn account_actor_ignores_membership() {
        let mut host = live(ChannelModes::empty());
        host.member = Some(("carol".into(), StatusModes::OP));
        let account = AccountRef::new("carol");
        assert!(!check_forward("#target", &ValidationContext::for_account(&host, &account)));
    }

    #[test]
    fn user_takes_precedence_over_account() {
        let host = Fixture {
            reg: Some(ChannelRegistration::new("#target").with_access("carol", AccessFlags::SET)),
            ..Fixture::default()
        };
        let user = UserRef::new("mallory");
        let account = AccountRef::new("carol");
        let ctx = ValidationContext {
            account: Some(&account),
            ..ValidationContext::for_user(&host, &user)
        };
        assert!(!check_forward("#target", &ctx));
    }
}
