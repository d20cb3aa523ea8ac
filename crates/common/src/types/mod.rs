use serde::Serialize;

/// Body returned by the root health route.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub status: &'static str,
}

impl Health {
    pub const fn ready() -> Self {
        Self { status: "Ready" }
    }
}
