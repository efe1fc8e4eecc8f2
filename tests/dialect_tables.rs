//! Table properties of every built-in dialect.

use common::{charybdis, juno, registry};
use proptest::prelude::*;
use proptest::sample::Subsequence;
use slirc_dialects::{DialectCaps, DialectError, ProtocolDescriptor};
use slirc_dialects::dialects::{Juno, charybdis::Charybdis};
use slirc_dialects::registry::ProtocolRegistry;
use slirc_modes::{ChannelModes, ModeFlag, ModeTable, StatusLevel, UserModes};

mod common;

fn dialects() -> Vec<std::sync::Arc<ProtocolDescriptor>> {
    vec![charybdis(), juno()]
}

#[test]
fn test_bijection_for_every_table() {
    for d in dialects() {
        for entry in d.channel_modes().entries() {
            assert_eq!(d.channel_modes().flag_for(entry.letter), Some(entry.flag));
            assert_eq!(d.channel_modes().char_for(entry.flag), Some(entry.letter));
        }
        for entry in d.user_modes().entries() {
            assert_eq!(d.user_modes().flag_for(entry.letter), Some(entry.flag));
            assert_eq!(d.user_modes().char_for(entry.flag), Some(entry.letter));
        }
        for entry in d.prefixes().entries() {
            assert_eq!(d.prefixes().level_for_status_char(entry.letter), Some(entry.level));
            assert_eq!(d.prefixes().level_for_prefix_char(entry.prefix), Some(entry.level));
        }
    }
}

#[test]
fn test_status_order_is_strictly_decreasing() {
    for d in dialects() {
        let letters: String = d.prefixes().entries().iter().map(|e| e.letter).collect();
        let levels: Vec<StatusLevel> = letters
            .chars()
            .filter_map(|c| d.prefixes().level_for_status_char(c))
            .collect();
        assert_eq!(levels.len(), letters.len());
        assert!(levels.windows(2).all(|w| w[0] > w[1]), "{}: {:?}", d.name(), levels);
    }
    let levels: Vec<StatusLevel> = juno().prefixes().levels().collect();
    assert_eq!(levels, StatusLevel::ALL.to_vec());
}

#[test]
fn test_juno_overlay_differs_from_base() {
    let base = charybdis();
    let j = juno();

    assert_eq!(base.channel_modes().flag_for('C'), Some(ChannelModes::NO_CTCP));
    assert_eq!(j.channel_modes().flag_for('C'), None);
    assert_eq!(base.channel_modes().flag_for('O'), None);
    assert_eq!(j.channel_modes().flag_for('O'), Some(ChannelModes::OPER_ONLY));
    assert_eq!(base.user_modes().flag_for('a'), Some(UserModes::ADMIN));
    assert_eq!(j.user_modes().flag_for('a'), None);
    assert!(j.is_list_mode('A') && !base.is_list_mode('A'));
    assert_eq!(base.prefix_token(), "(ov)@+");
    assert_eq!(j.prefix_token(), "(yaohv)~&@%+");
    for d in [&base, &j] {
        assert!(d.has_cap(DialectCaps::CIDR_BANS));
        assert!(d.has_cap(DialectCaps::HOLD_NICK));
    }
}

#[test]
fn test_juno_requires_charybdis() {
    let mut registry = ProtocolRegistry::new();
    assert_eq!(
        registry.register(&Juno).unwrap_err(),
        DialectError::MissingDependency {
            dialect: "protocol/juno".into(),
            dependency: "protocol/charybdis".into(),
        }
    );
    registry.register(&Charybdis).unwrap();
    registry.register(&Juno).unwrap();
    assert_eq!(registry.len(), 2);
}

#[test]
fn test_juno_is_never_unloaded() {
    let mut registry = registry();
    assert_eq!(
        registry.unload("juno").unwrap_err(),
        DialectError::Unloadable("protocol/juno".into())
    );
    assert!(matches!(
        registry.unload("charybdis"),
        Err(DialectError::InUse { .. })
    ));
    assert!(registry.get("juno").is_some());
}

#[test]
fn test_descriptors_are_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ProtocolDescriptor>();
    assert_send_sync::<ProtocolRegistry>();

    let d = juno();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let d = std::sync::Arc::clone(&d);
            std::thread::spawn(move || d.channel_modes().decode("nt").flags)
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), ChannelModes::NO_EXTERNAL | ChannelModes::TOPIC);
    }
}

fn subset_strategy<F: ModeFlag + 'static>(table: &ModeTable<F>) -> Subsequence<F> {
    let flags: Vec<F> = table.entries().iter().map(|e| e.flag).collect();
    let len = flags.len();
    proptest::sample::subsequence(flags, 0..=len)
}

proptest! {
    #[test]
    fn channel_round_trip_every_dialect(
        picks_base in subset_strategy(charybdis().channel_modes()),
        picks_juno in subset_strategy(juno().channel_modes()),
    ) {
        for (d, picks) in [(charybdis(), picks_base), (juno(), picks_juno)] {
            let flags = picks.iter().fold(ChannelModes::empty(), |acc, f| acc | *f);
            let decoded = d.channel_modes().decode(&d.channel_modes().encode(flags));
            prop_assert_eq!(decoded.flags, flags);
            prop_assert!(decoded.unknown.is_empty());
        }
    }

    #[test]
    fn user_round_trip_every_dialect(
        picks_base in subset_strategy(charybdis().user_modes()),
        picks_juno in subset_strategy(juno().user_modes()),
    ) {
        for (d, picks) in [(charybdis(), picks_base), (juno(), picks_juno)] {
            let flags = picks.iter().fold(UserModes::empty(), |acc, f| acc | *f);
            let decoded = d.user_modes().decode(&d.user_modes().encode(flags));
            prop_assert_eq!(decoded.flags, flags);
        }
    }
}
