//! Configuration Model
//!
//! Document kinds and typed section views.

pub mod kind;
pub mod sections;

pub use kind::ConfigKind;
pub use sections::{
    ActorDef, CollectorDef, DashboardNetwork, HubConnections, ModifierDef, NamespaceDef,
    TargetDef, UpstreamHub,
};
