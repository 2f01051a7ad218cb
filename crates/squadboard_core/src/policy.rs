//! Per-venue policy configuration.
//!
//! A venue's policy controls where and how posts may be created: the trigger
//! mode, the channel allow-list with optional default categories, role
//! requirements, cooldown and expiry durations, category presets, and
//! feature toggles. Policies are lazily created with defaults on first
//! access and mutated only by administrative operations.

use crate::{ChannelId, OriginKind, RoleId, VenueId};
use derive_builder::Builder;
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which creation paths a venue accepts.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TriggerMode {
    /// Only explicit commands create posts.
    Interactive,
    /// Only heuristic text detection creates posts.
    Ambient,
    /// Both paths are accepted.
    Both,
}

impl TriggerMode {
    /// Whether this mode permits posts of the given origin.
    pub fn permits(&self, origin: OriginKind) -> bool {
        match (self, origin) {
            (TriggerMode::Both, _) => true,
            (TriggerMode::Interactive, OriginKind::Interactive) => true,
            (TriggerMode::Ambient, OriginKind::Ambient) => true,
            _ => false,
        }
    }
}

/// An allow-listed channel with its optional default category.
///
/// Historically the allow-list stored bare channel ids; entries are
/// normalized to this shape at the data-access boundary so read sites never
/// branch on shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct AllowedChannel {
    /// The allow-listed channel.
    channel_id: ChannelId,
    /// Category assigned to unclassifiable posts created in this channel.
    default_category: Option<String>,
}

/// A venue-defined category preset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct CategoryPreset {
    /// Preset name, also usable as a classifier hint.
    name: String,
    /// Optional icon shown by the renderer.
    icon: Option<String>,
    /// Optional accent color shown by the renderer.
    color: Option<String>,
    /// Optional body template for command shortcuts.
    default_body: Option<String>,
}

/// Cooldown settings for post creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct CooldownConfig {
    /// Whether the cooldown applies at all.
    #[serde(default = "default_cooldown_enabled")]
    enabled: bool,
    /// Cooldown duration in seconds, captured onto each ledger record at
    /// write time.
    #[serde(default = "default_cooldown_secs")]
    duration_secs: u64,
}

impl CooldownConfig {
    /// Create a cooldown config.
    pub fn new(enabled: bool, duration_secs: u64) -> Self {
        Self {
            enabled,
            duration_secs,
        }
    }

    /// The configured duration.
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs)
    }
}

fn default_cooldown_enabled() -> bool {
    true
}

fn default_cooldown_secs() -> u64 {
    600 // 10 minutes
}

impl Default for CooldownConfig {
    fn default() -> Self {
        Self {
            enabled: default_cooldown_enabled(),
            duration_secs: default_cooldown_secs(),
        }
    }
}

/// Expiration settings for posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ExpirationConfig {
    /// Whether posts expire at all.
    #[serde(default = "default_expiration_enabled")]
    enabled: bool,
    /// Post lifetime in seconds, fixed at creation.
    #[serde(default = "default_expiration_secs")]
    duration_secs: u64,
}

impl ExpirationConfig {
    /// Create an expiration config.
    pub fn new(enabled: bool, duration_secs: u64) -> Self {
        Self {
            enabled,
            duration_secs,
        }
    }

    /// The configured lifetime.
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs)
    }
}

fn default_expiration_enabled() -> bool {
    false
}

fn default_expiration_secs() -> u64 {
    7200 // 2 hours
}

impl Default for ExpirationConfig {
    fn default() -> Self {
        Self {
            enabled: default_expiration_enabled(),
            duration_secs: default_expiration_secs(),
        }
    }
}

/// Per-venue feature toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct FeatureToggles {
    /// Render embeds for ambient-created posts.
    #[serde(default = "default_toggle")]
    ambient_embeds: bool,
    /// Render embeds for command-created posts.
    #[serde(default = "default_toggle")]
    interactive_embeds: bool,
    /// Allow actors to edit their own posts.
    #[serde(default = "default_toggle")]
    allow_edit: bool,
    /// Allow actors to delete their own posts.
    #[serde(default = "default_toggle")]
    allow_delete: bool,
}

impl FeatureToggles {
    /// Create a toggle set.
    pub fn new(
        ambient_embeds: bool,
        interactive_embeds: bool,
        allow_edit: bool,
        allow_delete: bool,
    ) -> Self {
        Self {
            ambient_embeds,
            interactive_embeds,
            allow_edit,
            allow_delete,
        }
    }
}

fn default_toggle() -> bool {
    true
}

impl Default for FeatureToggles {
    fn default() -> Self {
        Self {
            ambient_embeds: true,
            interactive_embeds: true,
            allow_edit: true,
            allow_delete: true,
        }
    }
}

/// Policy for one venue.
///
/// # Examples
///
/// ```
/// use squadboard_core::{ChannelId, OriginKind, VenuePolicy, VenueId};
///
/// let policy = VenuePolicy::defaults(VenueId(1));
/// assert!(policy.trigger_mode().permits(OriginKind::Interactive));
/// // An empty allow-list means all channels are allowed.
/// assert!(policy.channel_allowed(ChannelId(42)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, Builder)]
#[builder(setter(into))]
pub struct VenuePolicy {
    /// Venue this policy belongs to.
    venue_id: VenueId,
    /// Which creation paths the venue accepts.
    #[serde(default = "default_trigger_mode")]
    #[builder(default = "default_trigger_mode()")]
    trigger_mode: TriggerMode,
    /// Channels scanned by the ambient path. Empty means all channels are
    /// scanned. Only meaningful when the trigger mode includes ambient.
    #[serde(default)]
    #[builder(default)]
    monitored_channels: Vec<ChannelId>,
    /// Channel allow-list. Empty means all channels are allowed.
    #[serde(default)]
    #[builder(default)]
    allowed_channels: Vec<AllowedChannel>,
    /// Role an actor must hold to create posts, if any.
    #[serde(default)]
    #[builder(default)]
    required_role: Option<RoleId>,
    /// Role granted to actors on successful creation, if auto-assign is on.
    #[serde(default)]
    #[builder(default)]
    auto_assign_role: Option<RoleId>,
    /// Whether to grant `auto_assign_role` on creation.
    #[serde(default)]
    #[builder(default)]
    auto_assign: bool,
    /// Creation cooldown settings.
    #[serde(default)]
    #[builder(default)]
    cooldown: CooldownConfig,
    /// Post expiration settings.
    #[serde(default)]
    #[builder(default)]
    expiration: ExpirationConfig,
    /// Venue-defined category presets.
    #[serde(default)]
    #[builder(default)]
    category_presets: Vec<CategoryPreset>,
    /// Feature toggles.
    #[serde(default)]
    #[builder(default)]
    features: FeatureToggles,
}

fn default_trigger_mode() -> TriggerMode {
    TriggerMode::Interactive
}

impl VenuePolicy {
    /// The default policy lazily created on first access for a venue:
    /// interactive-only triggers, cooldown on at the default duration,
    /// expiration off, no presets, all features enabled.
    pub fn defaults(venue_id: VenueId) -> Self {
        Self {
            venue_id,
            trigger_mode: default_trigger_mode(),
            monitored_channels: Vec::new(),
            allowed_channels: Vec::new(),
            required_role: None,
            auto_assign_role: None,
            auto_assign: false,
            cooldown: CooldownConfig::default(),
            expiration: ExpirationConfig::default(),
            category_presets: Vec::new(),
            features: FeatureToggles::default(),
        }
    }

    /// Whether the channel may host posts. An empty allow-list allows all.
    pub fn channel_allowed(&self, channel: ChannelId) -> bool {
        self.allowed_channels.is_empty()
            || self
                .allowed_channels
                .iter()
                .any(|entry| *entry.channel_id() == channel)
    }

    /// Default category for a channel, from its allow-list entry.
    pub fn default_category_for(&self, channel: ChannelId) -> Option<&str> {
        self.allowed_channels
            .iter()
            .find(|entry| *entry.channel_id() == channel)
            .and_then(|entry| entry.default_category().as_deref())
    }

    /// Whether the ambient path scans this channel.
    pub fn monitors(&self, channel: ChannelId) -> bool {
        self.monitored_channels.contains(&channel)
    }
}
