use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A wrapper for sensitive contact data (the client's phone number) that
/// hides all but the last four characters in Debug output, so log macros
/// like `tracing::info!("{:?}", order)` never leak it. Serialization passes
/// the real value through, since API responses need it.
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct Masked<T>(pub T);

impl<T: fmt::Display> Masked<T> {
    fn tail(&self) -> String {
        let full = self.0.to_string();
        let chars: Vec<char> = full.chars().collect();
        let keep = chars.len().min(4);
        chars[chars.len() - keep..].iter().collect()
    }
}

impl<T: fmt::Display> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "****{}", self.tail())
    }
}

impl<T: fmt::Display> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "****{}", self.tail())
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<T> Masked<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}
