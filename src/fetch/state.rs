//! View state shared by the fetch hooks

/// `{data, loading, error}` triple exposed to a view
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub loading: bool,
    /// User-facing message of the last failure, cleared when a call starts
    pub error: Option<String>,
}

impl<T> FetchState<T> {
    /// Nothing loaded, nothing in flight
    pub fn idle() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }

    /// Waiting for the first load, showing `data` meanwhile
    pub fn pending(data: Option<T>) -> Self {
        Self {
            data,
            loading: true,
            error: None,
        }
    }
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::idle()
    }
}
