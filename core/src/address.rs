//! Slash-delimited field addresses.
//!
//! Operations that change one field of one component describe their target
//! as `entity/path/Component/field`. [`FieldAddress`] splits that string
//! without knowing anything about the document behind it.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error produced by [`FieldAddress::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// The address does not have at least `component/field`.
    #[error("invalid address \"{address}\": expected component/field, found {segments} segment(s)")]
    InvalidAddress {
        /// The rejected input.
        address: String,
        /// How many `/`-separated segments it had.
        segments: usize,
    },
}

/// A parsed `entity/path/Component/field` address.
///
/// # Example
///
/// ```
/// use rewind_core::FieldAddress;
///
/// let addr = FieldAddress::parse("World/Props/Chair/Transform/PositionX").unwrap();
/// assert_eq!(addr.entity_path, "World/Props/Chair");
/// assert_eq!(addr.component, "Transform");
/// assert_eq!(addr.field, "PositionX");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldAddress {
    /// Every segment before the last two, joined with `/`. Empty when the
    /// address names only a component and a field.
    pub entity_path: String,
    /// Second-to-last segment.
    pub component: String,
    /// Last segment.
    pub field: String,
}

impl FieldAddress {
    /// Splits `address` into entity path, component and field.
    ///
    /// Returns [`AddressError::InvalidAddress`] if there are fewer than two
    /// segments.
    pub fn parse(address: &str) -> Result<Self, AddressError> {
        let mut parts = address.rsplitn(3, '/');
        let field = parts.next();
        let component = parts.next();
        let (Some(field), Some(component)) = (field, component) else {
            return Err(AddressError::InvalidAddress {
                address: address.to_owned(),
                segments: address.split('/').count(),
            });
        };
        Ok(Self {
            entity_path: parts.next().unwrap_or_default().to_owned(),
            component: component.to_owned(),
            field: field.to_owned(),
        })
    }

    /// Returns `true` if the address names an entity path.
    pub fn has_entity_path(&self) -> bool {
        !self.entity_path.is_empty()
    }
}

impl FromStr for FieldAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FieldAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_entity_path() {
            write!(f, "{}/", self.entity_path)?;
        }
        write!(f, "{}/{}", self.component, self.field)
    }
}
