//! Cluster connection flags and kubeconfig lookups

pub mod config_flags;
pub mod kubeconfig;

pub use config_flags::KubeConfigArgs;
pub use kubeconfig::{Kubeconfig, KubeconfigError};
