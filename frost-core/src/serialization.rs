//! `serde` (de)serialization helpers, enabled by the `serde` feature.
//!
//! `Scalar<C>`/`Element<C>` are opaque associated types with no `serde` impl of their
//! own, so every serializable type in this crate round-trips through one of the wrapper
//! types below instead of deriving `Serialize`/`Deserialize` directly on its fields.

use serde::{Deserialize, Serialize};

use crate::{Ciphersuite, Element, Error, Field, Group, Scalar};

/// A scalar's fixed-length encoding, serialized as a hex string.
#[derive(Clone)]
pub(crate) struct ScalarSerialization<C: Ciphersuite>(pub(crate) <<C::Group as Group>::Field as Field>::Serialization);

impl<C> Serialize for ScalarSerialization<C>
where
    C: Ciphersuite,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&hex::encode(self.0.as_ref()))
    }
}

impl<'de, C> Deserialize<'de> for ScalarSerialization<C>
where
    C: Ciphersuite,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(s).map_err(serde::de::Error::custom)?;
        let serialization = <<C::Group as Group>::Field as Field>::Serialization::try_from(
            bytes.as_slice(),
        )
        .map_err(|_| serde::de::Error::custom("malformed scalar encoding"))?;
        Ok(Self(serialization))
    }
}

/// Reads a scalar out of its wire encoding, for use in `try_from` conversions on
/// serializable wrapper structs throughout this crate.
pub(crate) fn scalar_from_serialization<C: Ciphersuite>(
    serialization: ScalarSerialization<C>,
) -> Result<Scalar<C>, Error<C>> {
    <<C::Group as Group>::Field>::deserialize(&serialization.0).map_err(Error::from)
}

/// An element's fixed-length compressed encoding, serialized as a hex string.
#[derive(Clone)]
pub(crate) struct ElementSerialization<C: Ciphersuite>(pub(crate) <C::Group as Group>::Serialization);

impl<C> Serialize for ElementSerialization<C>
where
    C: Ciphersuite,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&hex::encode(self.0.as_ref()))
    }
}

impl<'de, C> Deserialize<'de> for ElementSerialization<C>
where
    C: Ciphersuite,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(s).map_err(serde::de::Error::custom)?;
        let serialization = <C::Group as Group>::Serialization::try_from(bytes.as_slice())
            .map_err(|_| serde::de::Error::custom("malformed element encoding"))?;
        Ok(Self(serialization))
    }
}

/// Reads an element out of its wire encoding.
pub(crate) fn element_from_serialization<C: Ciphersuite>(
    serialization: ElementSerialization<C>,
) -> Result<Element<C>, Error<C>> {
    <C::Group>::deserialize(&serialization.0).map_err(Error::from)
}
