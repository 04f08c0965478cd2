use std::fmt::{Display, Formatter};

/// Strongly typed dispatch identifier backed by ULID.
///
/// Every call to [`Dispatcher::dispatch`](crate::dispatcher::Dispatcher::dispatch)
/// gets one so its log lines can be correlated.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct DispatchId(pub ulid::Ulid);

impl DispatchId {
    pub fn new() -> Self {
        Self(ulid::Ulid::new())
    }
}

impl Default for DispatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for DispatchId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::DispatchId;

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(DispatchId::new(), DispatchId::new());
    }

    #[test]
    fn test_display_is_canonical_ulid() {
        let id = DispatchId::new();
        let shown = id.to_string();
        assert_eq!(shown.len(), 26);
        assert_eq!(shown, id.0.to_string());
    }
}
