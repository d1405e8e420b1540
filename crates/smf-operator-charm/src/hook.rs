// crates/smf-operator-charm/src/hook.rs
// ============================================================================
// Module: Hook Event Parsing
// Description: Translation of Juju dispatch paths into typed hook events.
// Purpose: Give the dispatch table a closed event vocabulary to route on.
// ============================================================================

//! ## Overview
//! Juju invokes the charm with the triggering hook encoded in
//! `JUJU_DISPATCH_PATH` as `hooks/<name>`. Hook names compose the affected
//! entity with the event kind, such as `smf-pebble-ready` or
//! `certificates-relation-broken`. Unknown names parse to
//! [`HookEvent::Other`] rather than failing, because Juju may deliver hooks
//! this operator does not act on.

// ============================================================================
// SECTION: Event Types
// ============================================================================

/// Event kind without the affected entity, used as the dispatch table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// First install of the charm.
    Install,
    /// Charm code upgraded in place.
    UpgradeCharm,
    /// Periodic tick.
    UpdateStatus,
    /// Workload container became operable.
    PebbleReady,
    /// A storage mount became available.
    StorageAttached,
    /// A relation gained a remote unit.
    RelationJoined,
    /// Relation data changed.
    RelationChanged,
    /// A remote unit left a relation.
    RelationDeparted,
    /// A relation was removed entirely.
    RelationBroken,
    /// Juju is collecting the unit status.
    CollectUnitStatus,
    /// Hook this operator does not act on.
    Other,
}

/// One parsed hook event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookEvent {
    /// First install of the charm.
    Install,
    /// Charm code upgraded in place.
    UpgradeCharm,
    /// Periodic tick.
    UpdateStatus,
    /// Workload container became operable.
    PebbleReady {
        /// Container name the event refers to.
        container: String,
    },
    /// A storage mount became available.
    StorageAttached {
        /// Storage name the event refers to.
        storage: String,
    },
    /// A relation gained a remote unit.
    RelationJoined {
        /// Relation endpoint the event refers to.
        endpoint: String,
    },
    /// Relation data changed.
    RelationChanged {
        /// Relation endpoint the event refers to.
        endpoint: String,
    },
    /// A remote unit left a relation.
    RelationDeparted {
        /// Relation endpoint the event refers to.
        endpoint: String,
    },
    /// A relation was removed entirely.
    RelationBroken {
        /// Relation endpoint the event refers to.
        endpoint: String,
    },
    /// Juju is collecting the unit status.
    CollectUnitStatus,
    /// Hook this operator does not act on.
    Other {
        /// Raw hook name as delivered.
        name: String,
    },
}

impl HookEvent {
    /// Parses a hook name or `hooks/<name>` dispatch path.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let name = raw.strip_prefix("hooks/").unwrap_or(raw);
        match name {
            "install" => return Self::Install,
            "upgrade-charm" => return Self::UpgradeCharm,
            "update-status" => return Self::UpdateStatus,
            "collect-unit-status" => return Self::CollectUnitStatus,
            _ => {}
        }
        if let Some(container) = name.strip_suffix("-pebble-ready") {
            return Self::PebbleReady {
                container: container.to_string(),
            };
        }
        if let Some(storage) = name.strip_suffix("-storage-attached") {
            return Self::StorageAttached {
                storage: storage.to_string(),
            };
        }
        if let Some(endpoint) = name.strip_suffix("-relation-joined") {
            return Self::RelationJoined {
                endpoint: endpoint.to_string(),
            };
        }
        if let Some(endpoint) = name.strip_suffix("-relation-changed") {
            return Self::RelationChanged {
                endpoint: endpoint.to_string(),
            };
        }
        if let Some(endpoint) = name.strip_suffix("-relation-departed") {
            return Self::RelationDeparted {
                endpoint: endpoint.to_string(),
            };
        }
        if let Some(endpoint) = name.strip_suffix("-relation-broken") {
            return Self::RelationBroken {
                endpoint: endpoint.to_string(),
            };
        }
        Self::Other {
            name: name.to_string(),
        }
    }

    /// Returns the event kind used for dispatch table lookup.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Install => EventKind::Install,
            Self::UpgradeCharm => EventKind::UpgradeCharm,
            Self::UpdateStatus => EventKind::UpdateStatus,
            Self::PebbleReady {
                ..
            } => EventKind::PebbleReady,
            Self::StorageAttached {
                ..
            } => EventKind::StorageAttached,
            Self::RelationJoined {
                ..
            } => EventKind::RelationJoined,
            Self::RelationChanged {
                ..
            } => EventKind::RelationChanged,
            Self::RelationDeparted {
                ..
            } => EventKind::RelationDeparted,
            Self::RelationBroken {
                ..
            } => EventKind::RelationBroken,
            Self::CollectUnitStatus => EventKind::CollectUnitStatus,
            Self::Other {
                ..
            } => EventKind::Other,
        }
    }

    /// Returns the relation endpoint the event refers to, when any.
    #[must_use]
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            Self::RelationJoined {
                endpoint,
            }
            | Self::RelationChanged {
                endpoint,
            }
            | Self::RelationDeparted {
                endpoint,
            }
            | Self::RelationBroken {
                endpoint,
            } => Some(endpoint),
            _ => None,
        }
    }
}
