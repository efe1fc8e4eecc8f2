//! Protocol descriptors: everything the services side knows about one ircd
//! dialect's mode vocabulary.
//!
//! A descriptor is assembled once when the dialect module initializes and is
//! immutable afterwards. Dialects derived from another dialect are built by
//! applying a [`DialectOverlay`] to the base descriptor; the merged tables are
//! validated again, so composition can never produce a descriptor that a
//! direct build would have rejected.

use std::fmt;

use bitflags::bitflags;
use slirc_modes::{ChannelModes, ModeTable, PrefixTable, StatusLevel, TableOverlay, UserModes};

use crate::error::DialectError;
use crate::extmode::{ExtModeRegistry, Validator};

/// Channel key letter. Fixed across every supported dialect.
pub const KEY_LETTER: char = 'k';
/// Channel limit letter. Fixed across every supported dialect.
pub const LIMIT_LETTER: char = 'l';

bitflags! {
    /// Dialect capability bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DialectCaps: u32 {
        /// Bans may use CIDR host masks.
        const CIDR_BANS = 0x01;
        /// Registered nicks must be held with an enforcer after a kill.
        const HOLD_NICK = 0x02;
    }
}

/// Closest protocol family, used by the host for link-level quirks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProtocolType {
    #[default]
    Generic,
    Charybdis,
    Elemental,
}

/// Scalar facts about a dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrcdInfo {
    /// Human name, e.g. `juno`.
    pub name: String,
    /// Prefix for network-wide message targets.
    pub tld_prefix: String,
    pub uses_uid: bool,
    pub uses_rcommand: bool,
    pub uses_p10: bool,
    pub uses_vhost: bool,
    /// Channel modes only IRC operators may set.
    pub oper_only_modes: ChannelModes,
    /// The single mode that keeps an empty channel alive.
    pub perm_mode: ChannelModes,
    /// User mode that makes operators immune to channel restrictions.
    pub oimmune_mode: UserModes,
    /// List modes taking a mask, e.g. `beIq`.
    pub ban_like_modes: String,
    pub except_letter: Option<char>,
    pub invex_letter: Option<char>,
    pub protocol: ProtocolType,
    pub caps: DialectCaps,
}

impl IrcdInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tld_prefix: "$$".to_string(),
            uses_uid: true,
            uses_rcommand: false,
            uses_p10: false,
            uses_vhost: false,
            oper_only_modes: ChannelModes::empty(),
            perm_mode: ChannelModes::empty(),
            oimmune_mode: UserModes::empty(),
            ban_like_modes: "b".to_string(),
            except_letter: None,
            invex_letter: None,
            protocol: ProtocolType::Generic,
            caps: DialectCaps::empty(),
        }
    }
}

/// An immutable, validated description of one dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolDescriptor {
    info: IrcdInfo,
    channel_modes: ModeTable<ChannelModes>,
    user_modes: ModeTable<UserModes>,
    ext_modes: ExtModeRegistry,
    prefixes: PrefixTable,
}

impl ProtocolDescriptor {
    /// Start a descriptor from its scalars.
    pub fn builder(info: IrcdInfo) -> DescriptorBuilder {
        DescriptorBuilder::new(info)
    }

    /// Scalar dialect settings.
    pub fn info(&self) -> &IrcdInfo {
        &self.info
    }

    /// Dialect name, e.g. `juno`.
    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// Simple channel modes.
    pub fn channel_modes(&self) -> &ModeTable<ChannelModes> {
        &self.channel_modes
    }

    /// User modes.
    pub fn user_modes(&self) -> &ModeTable<UserModes> {
        &self.user_modes
    }

    /// Parameterized modes with value validators.
    pub fn ext_modes(&self) -> &ExtModeRegistry {
        &self.ext_modes
    }

    /// Member status letters and prefixes.
    pub fn prefixes(&self) -> &PrefixTable {
        &self.prefixes
    }

    /// Whether the dialect advertises `cap`.
    pub fn has_cap(&self, cap: DialectCaps) -> bool {
        self.info.caps.contains(cap)
    }

    /// Owner status (`~`) exists in this dialect.
    pub fn uses_owner(&self) -> bool {
        self.prefixes.supports(StatusLevel::Owner)
    }

    /// Protect status (`&`) exists in this dialect.
    pub fn uses_protect(&self) -> bool {
        self.prefixes.supports(StatusLevel::Protect)
    }

    /// Halfop status (`%`) exists in this dialect.
    pub fn uses_halfops(&self) -> bool {
        self.prefixes.supports(StatusLevel::Halfop)
    }

    /// Signed mode string granting `level`, e.g. `+y` for owner on juno.
    pub fn status_mchar(&self, level: StatusLevel) -> Option<String> {
        self.prefixes
            .status_char_for(level)
            .map(|c| format!("+{}", c))
    }

    /// Returns true if `letter` is a ban-like list mode.
    pub fn is_list_mode(&self, letter: char) -> bool {
        self.info.ban_like_modes.contains(letter)
    }

    /// Returns true if any mode in `modes` is restricted to IRC operators.
    pub fn is_oper_only(&self, modes: ChannelModes) -> bool {
        self.info.oper_only_modes.intersects(modes)
    }

    /// ISUPPORT `CHANMODES` value: list modes, always-parameter modes,
    /// set-only parameter modes, flag modes.
    pub fn chanmodes_token(&self) -> String {
        format!(
            "{},{},{}{},{}",
            self.info.ban_like_modes,
            KEY_LETTER,
            LIMIT_LETTER,
            self.ext_modes.letters(),
            self.channel_modes.letters()
        )
    }

    /// ISUPPORT `PREFIX` value.
    pub fn prefix_token(&self) -> String {
        self.prefixes.isupport_prefix()
    }

    /// Build a derived dialect from this one.
    pub fn overlay(&self, overlay: &DialectOverlay) -> Result<ProtocolDescriptor, DialectError> {
        let mut info = self.info.clone();
        if let Some(name) = &overlay.name {
            info.name = name.clone();
        }
        for apply in &overlay.scalars {
            apply(&mut info);
        }

        let prefixes = overlay
            .prefixes
            .clone()
            .unwrap_or_else(|| self.prefixes.clone());

        ProtocolDescriptor::builder(info)
            .channel_modes(self.channel_modes.overlay(&overlay.channel_modes)?)
            .user_modes(self.user_modes.overlay(&overlay.user_modes)?)
            .ext_modes(self.ext_modes.overlay(&overlay.ext_remove, &overlay.ext_set)?)
            .prefixes(prefixes)
            .build()
    }
}

/// Assembles and cross-checks a [`ProtocolDescriptor`].
#[derive(Debug, Clone)]
pub struct DescriptorBuilder {
    info: IrcdInfo,
    channel_modes: ModeTable<ChannelModes>,
    user_modes: ModeTable<UserModes>,
    ext_modes: ExtModeRegistry,
    prefixes: Option<PrefixTable>,
}

impl DescriptorBuilder {
    pub fn new(info: IrcdInfo) -> Self {
        Self {
            info,
            channel_modes: ModeTable::empty(),
            user_modes: ModeTable::empty(),
            ext_modes: ExtModeRegistry::default(),
            prefixes: None,
        }
    }

    pub fn channel_modes(mut self, table: ModeTable<ChannelModes>) -> Self {
        self.channel_modes = table;
        self
    }

    pub fn user_modes(mut self, table: ModeTable<UserModes>) -> Self {
        self.user_modes = table;
        self
    }

    pub fn ext_modes(mut self, registry: ExtModeRegistry) -> Self {
        self.ext_modes = registry;
        self
    }

    pub fn prefixes(mut self, table: PrefixTable) -> Self {
        self.prefixes = Some(table);
        self
    }

    /// Validate cross-table invariants and freeze the descriptor.
    ///
    /// A dialect without a prefix table gets the RFC 1459 `(ov)@+` pair.
    pub fn build(self) -> Result<ProtocolDescriptor, DialectError> {
        let prefixes = match self.prefixes {
            Some(table) => table,
            None => PrefixTable::new(
                &[('o', StatusLevel::Op), ('v', StatusLevel::Voice)],
                &[('@', StatusLevel::Op), ('+', StatusLevel::Voice)],
            )?,
        };

        let descriptor = ProtocolDescriptor {
            info: self.info,
            channel_modes: self.channel_modes,
            user_modes: self.user_modes,
            ext_modes: self.ext_modes,
            prefixes,
        };
        descriptor.check_letters()?;
        descriptor.check_scalars()?;
        Ok(descriptor)
    }
}

impl ProtocolDescriptor {
    /// Every channel-side letter must resolve to exactly one table.
    fn check_letters(&self) -> Result<(), DialectError> {
        let mut claimed: Vec<(char, &'static str)> = Vec::new();
        let sources = self
            .channel_modes
            .entries()
            .iter()
            .map(|e| (e.letter, "channel mode"))
            .chain([(KEY_LETTER, "key"), (LIMIT_LETTER, "limit")])
            .chain(self.info.ban_like_modes.chars().map(|c| (c, "ban-like")))
            .chain(self.ext_modes.entries().iter().map(|(c, _)| (*c, "extended mode")))
            .chain(self.prefixes.entries().iter().map(|e| (e.letter, "status")));

        for (letter, table) in sources {
            if let Some((_, first)) = claimed.iter().find(|(c, _)| *c == letter) {
                return Err(DialectError::ConflictingLetter {
                    letter,
                    first: *first,
                    second: table,
                });
            }
            claimed.push((letter, table));
        }
        Ok(())
    }

    fn check_scalars(&self) -> Result<(), DialectError> {
        let mapped = self.channel_modes.all_flags();
        for (field, flags) in [
            ("perm_mode", self.info.perm_mode),
            ("oper_only_modes", self.info.oper_only_modes),
        ] {
            let unmapped = flags.difference(mapped);
            if !unmapped.is_empty() {
                return Err(DialectError::UnmappedFlag {
                    field,
                    flag: unmapped.bits(),
                });
            }
        }
        if self.info.perm_mode.bits().count_ones() > 1 {
            return Err(DialectError::UnmappedFlag {
                field: "perm_mode",
                flag: self.info.perm_mode.bits(),
            });
        }
        if !self.user_modes.all_flags().contains(self.info.oimmune_mode) {
            return Err(DialectError::UnmappedFlag {
                field: "oimmune_mode",
                flag: self.info.oimmune_mode.bits(),
            });
        }

        for (field, letter) in [
            ("except", self.info.except_letter),
            ("invex", self.info.invex_letter),
        ] {
            match letter {
                Some(letter) if !self.is_list_mode(letter) => {
                    return Err(DialectError::NotListMode { field, letter });
                }
                _ => {}
            }
        }
        Ok(())
    }
}

type ScalarOverride = Box<dyn Fn(&mut IrcdInfo) + Send + Sync>;

/// Changes a derived dialect applies on top of its base.
#[derive(Default)]
pub struct DialectOverlay {
    name: Option<String>,
    channel_modes: TableOverlay<ChannelModes>,
    user_modes: TableOverlay<UserModes>,
    ext_remove: String,
    ext_set: Vec<(char, Validator)>,
    prefixes: Option<PrefixTable>,
    scalars: Vec<ScalarOverride>,
}

impl DialectOverlay {
    /// Start an overlay that renames the dialect.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn channel_modes(mut self, overlay: TableOverlay<ChannelModes>) -> Self {
        self.channel_modes = overlay;
        self
    }

    pub fn user_modes(mut self, overlay: TableOverlay<UserModes>) -> Self {
        self.user_modes = overlay;
        self
    }

    /// Drop the extended modes in `remove`, then replace or append `set`.
    pub fn ext_modes(mut self, remove: &str, set: &[(char, Validator)]) -> Self {
        self.ext_remove = remove.to_string();
        self.ext_set = set.to_vec();
        self
    }

    /// Replace the status table wholesale.
    pub fn prefixes(mut self, table: PrefixTable) -> Self {
        self.prefixes = Some(table);
        self
    }

    /// Adjust scalar facts of the base dialect.
    pub fn scalars<F>(mut self, apply: F) -> Self
    where
        F: Fn(&mut IrcdInfo) + Send + Sync + 'static,
    {
        self.scalars.push(Box::new(apply));
        self
    }
}

impl fmt::Debug for DialectOverlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialectOverlay")
            .field("name", &self.name)
            .field("channel_modes", &self.channel_modes)
            .field("user_modes", &self.user_modes)
            .field("ext_remove", &self.ext_remove)
            .field("ext_set", &self.ext_set)
            .field("prefixes", &self.prefixes)
            .field("scalars", &self.scalars.len())
            .finish()
    }
}
