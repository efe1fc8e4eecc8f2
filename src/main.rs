//! modecheck - offline mode translation against a configured dialect.
//!
//! Reads MODE lines from stdin and prints how the dialect translates them:
//!
//! ```text
//! #chan +ntf #overflow            internal change
//! alice #chan +o bob              change by user alice
//! c=carol #chan +f #overflow      change by user c, logged in as carol
//! $carol #chan +f #overflow       change by account carol
//! umode +iDx                      user modes
//! ```

use std::io::{self, BufRead, Write};

use anyhow::Context as _;
use slirc_dialects::config::{self, Config};
use slirc_dialects::context::{AccountRef, ChannelLookup, UserRef, ValidationContext};
use slirc_dialects::dialects::builtin_modules;
use slirc_dialects::state::Snapshot;
use slirc_dialects::telemetry::{self, spans};
use slirc_dialects::{ModeTranslator, ProtocolRegistry};
use slirc_modes::ChannelExt;
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    let config_path = std::env::args().nth(1);
    let config = match &config_path {
        Some(path) => Config::load(path).with_context(|| format!("loading {}", path))?,
        None => Config::default(),
    };

    telemetry::init(&config.log)
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {}", e))?;

    let mut registry = ProtocolRegistry::new();
    for module in builtin_modules() {
        let _span = spans::dialect_load(module.name()).entered();
        registry.register(module.as_ref())?;
    }

    if let Err(errors) = config::validate(&config, &registry) {
        for e in &errors {
            error!(error = %e, "invalid configuration");
        }
        anyhow::bail!("{} configuration error(s)", errors.len());
    }

    let descriptor = registry
        .get(&config.dialect.name)
        .with_context(|| format!("dialect {} not registered", config.dialect.name))?;
    let translator = ModeTranslator::new(&descriptor);

    let snapshot = Snapshot::new(config.dialect.casemapping);
    let rejected = snapshot.seed(&config.channels, &translator);
    info!(
        dialect = descriptor.name(),
        channels = snapshot.channel_count(),
        rejected = rejected.len(),
        chanmodes = %descriptor.chanmodes_token(),
        prefix = %descriptor.prefix_token(),
        "modecheck ready"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in stdin.lock().lines() {
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            continue;
        }
        check_line(&mut out, &words, &translator, &snapshot)?;
    }

    Ok(())
}

fn check_line(
    out: &mut impl Write,
    words: &[&str],
    translator: &ModeTranslator<'_>,
    snapshot: &Snapshot,
) -> io::Result<()> {
    if words[0] == "umode" {
        let t = translator.user(words.get(1).copied().unwrap_or_default());
        let table = translator.descriptor().user_modes();
        writeln!(out, "+{} -{}", table.encode(t.add), table.encode(t.remove))?;
        for rejection in t.rejections() {
            writeln!(out, "  {} {}", rejection.numeric(), rejection)?;
        }
        return Ok(());
    }

    let (actor, rest) = if words[0].is_channel_name() {
        (None, words)
    } else {
        (Some(words[0]), &words[1..])
    };
    let (Some(channel), Some(modes)) = (rest.first(), rest.get(1)) else {
        writeln!(out, "  usage: [nick[=account]|$account] <channel> <modes> [params...]")?;
        return Ok(());
    };
    let params = &rest[2..];

    let user;
    let account;
    let live = snapshot.channel(channel);
    let registration = snapshot.registration(channel);
    let ctx = match actor {
        Some(name) if name.starts_with('$') => {
            account = AccountRef::new(&name[1..]);
            ValidationContext::for_account(snapshot, &account)
        }
        Some(actor) => {
            user = match actor.split_once('=') {
                Some((nick, account)) => UserRef::new(nick).logged_in(account),
                None => UserRef::new(actor),
            };
            ValidationContext::for_user(snapshot, &user)
        }
        None => ValidationContext::internal(snapshot),
    }
    .in_channel(live.as_ref(), registration.as_ref());

    let _span = spans::mode_change(channel, actor).entered();
    let t = translator.channel(modes, params, &ctx);
    let (wire, wire_params) = translator.render(&t.changes);
    let mut parts = vec![*channel];
    if !wire.is_empty() {
        parts.push(wire.as_str());
        parts.extend(wire_params.iter().map(String::as_str));
    }
    writeln!(out, "{}", parts.join(" "))?;
    for rejection in &t.rejected {
        writeln!(out, "  {} {}", rejection.numeric(), rejection)?;
    }
    Ok(())
}
