//! FROST participant identifiers.

use core::{
    cmp::Ordering,
    fmt::{self, Debug},
    hash::{Hash, Hasher},
};

use crate::{Ciphersuite, Error, Field, Group, Scalar};

/// A FROST participant identifier.
///
/// An `Identifier<C>` is a non-zero element of the ciphersuite's scalar field, used both
/// as the Shamir x-coordinate of a participant's share and as the map key under which
/// that participant's public material and protocol messages are indexed. Constructing
/// one from `0` is rejected, which statically rules out the "zero x-coordinate leaks the
/// secret at Lagrange interpolation" failure mode rather than checking for it at
/// interpolation time.
#[derive(Clone, Copy)]
pub struct Identifier<C: Ciphersuite>(Scalar<C>);

impl<C> Identifier<C>
where
    C: Ciphersuite,
{
    /// Derives an [`Identifier`] from a `u16` in `1..=65535`.
    pub fn try_from(n: u16) -> Result<Self, Error<C>> {
        if n == 0 {
            Err(Error::MalformedIdentifier)
        } else {
            Ok(Self(<<C::Group as Group>::Field>::from_u16(n)))
        }
    }

    /// Serializes this identifier using the ciphersuite's scalar encoding.
    pub fn serialize(&self) -> <<C::Group as Group>::Field as Field>::Serialization {
        <<C::Group as Group>::Field>::serialize(&self.0)
    }

    /// Deserializes an identifier from a ciphersuite scalar encoding, rejecting zero.
    pub fn deserialize(
        bytes: &<<C::Group as Group>::Field as Field>::Serialization,
    ) -> Result<Self, Error<C>> {
        let scalar = <<C::Group as Group>::Field>::deserialize(bytes)
            .map_err(Error::<C>::from)?;
        if scalar == <<C::Group as Group>::Field>::zero() {
            return Err(Error::MalformedIdentifier);
        }
        Ok(Self(scalar))
    }

    /// Returns the scalar this identifier wraps.
    pub(crate) fn to_scalar(self) -> Scalar<C> {
        self.0
    }
}

impl<C> Debug for Identifier<C>
where
    C: Ciphersuite,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Identifier")
            .field(&hex::encode(self.serialize()))
            .finish()
    }
}

impl<C> PartialEq for Identifier<C>
where
    C: Ciphersuite,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<C> Eq for Identifier<C> where C: Ciphersuite {}

impl<C> Hash for Identifier<C>
where
    C: Ciphersuite,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.serialize().as_ref().hash(state);
    }
}

impl<C> PartialOrd for Identifier<C>
where
    C: Ciphersuite,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C> Ord for Identifier<C>
where
    C: Ciphersuite,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.serialize().as_ref().cmp(other.serialize().as_ref())
    }
}

impl<C> TryFrom<u16> for Identifier<C>
where
    C: Ciphersuite,
{
    type Error = Error<C>;

    fn try_from(n: u16) -> Result<Self, Self::Error> {
        Identifier::try_from(n)
    }
}

#[cfg(feature = "serde")]
impl<C> serde::Serialize for Identifier<C>
where
    C: Ciphersuite,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&hex::encode(self.serialize().as_ref()))
    }
}

#[cfg(feature = "serde")]
impl<'de, C> serde::Deserialize<'de> for Identifier<C>
where
    C: Ciphersuite,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        let bytes = hex::decode(s).map_err(serde::de::Error::custom)?;
        let serialization =
            <<C::Group as Group>::Field as Field>::Serialization::try_from(bytes.as_slice())
                .map_err(|_| serde::de::Error::custom("malformed identifier encoding"))?;
        Identifier::deserialize(&serialization).map_err(serde::de::Error::custom)
    }
}
