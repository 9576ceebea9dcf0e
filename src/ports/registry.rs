//! Port registry - built-in capability names and their required interfaces

/// A single operation an interface requires (name plus arity)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub name: &'static str,
    pub arity: usize,
}

impl Operation {
    pub const fn new(name: &'static str, arity: usize) -> Self {
        Self { name, arity }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.name, self.arity)
    }
}

/// Interface descriptor a bound implementation must satisfy
#[derive(Debug, Clone, Copy)]
pub struct PortInterface {
    /// Capability name this interface is registered under
    pub name: &'static str,

    /// Full required-operation set
    pub operations: &'static [Operation],
}

/// Capability name for the training backend client
pub const TRAINING_CLIENT: &str = "training_client";
/// Capability name for the dataset store
pub const DATASET_STORE: &str = "dataset_store";
/// Capability name for the blob/checkpoint store
pub const BLOB_STORE: &str = "blob_store";
/// Capability name for the model hub client
pub const HUB_CLIENT: &str = "hub_client";
/// Capability name for the metrics store
pub const METRICS_STORE: &str = "metrics_store";

static TRAINING_CLIENT_INTERFACE: PortInterface = PortInterface {
    name: TRAINING_CLIENT,
    operations: &[
        Operation::new("start_session", 1),
        Operation::new("forward_backward", 2),
        Operation::new("optim_step", 2),
        Operation::new("save_state", 2),
        Operation::new("sample", 2),
    ],
};

static DATASET_STORE_INTERFACE: PortInterface = PortInterface {
    name: DATASET_STORE,
    operations: &[
        Operation::new("get_dataset", 1),
        Operation::new("list_datasets", 0),
        Operation::new("put_dataset", 2),
    ],
};

static BLOB_STORE_INTERFACE: PortInterface = PortInterface {
    name: BLOB_STORE,
    operations: &[
        Operation::new("put_blob", 2),
        Operation::new("get_blob", 1),
        Operation::new("delete_blob", 1),
    ],
};

static HUB_CLIENT_INTERFACE: PortInterface = PortInterface {
    name: HUB_CLIENT,
    operations: &[
        Operation::new("pull_model", 1),
        Operation::new("push_model", 2),
    ],
};

static METRICS_STORE_INTERFACE: PortInterface = PortInterface {
    name: METRICS_STORE,
    operations: &[Operation::new("record", 3), Operation::new("flush", 0)],
};

/// Look up the interface a capability name requires
///
/// Returns `None` for names the registry does not know; those capabilities
/// are treated as unchecked rather than invalid, so hosts can bind
/// capabilities the core cannot validate structurally.
pub fn lookup_interface(capability: &str) -> Option<&'static PortInterface> {
    match capability {
        TRAINING_CLIENT => Some(&TRAINING_CLIENT_INTERFACE),
        DATASET_STORE => Some(&DATASET_STORE_INTERFACE),
        BLOB_STORE => Some(&BLOB_STORE_INTERFACE),
        HUB_CLIENT => Some(&HUB_CLIENT_INTERFACE),
        METRICS_STORE => Some(&METRICS_STORE_INTERFACE),
        _ => None,
    }
}
