//! The Ristretto255 ciphersuite for FROST threshold Schnorr signatures
//! (`FROST-RISTRETTO255-SHA512-v5`).
//!
//! This crate monomorphizes [`frost_core`] to `curve25519-dalek`'s Ristretto255 group and
//! SHA-512, and re-exports every `frost_core` type specialized to [`Ristretto255Sha512`]
//! so downstream users never need to name `frost_core` directly.

#![deny(missing_docs)]

use curve25519_dalek::{
    ristretto::{CompressedRistretto, RistrettoPoint},
    scalar::Scalar,
    traits::Identity,
};
use rand_core::{CryptoRng, RngCore};
use sha2::{Digest, Sha512};

use frost_core::{Ciphersuite, Field, FieldError, Group, GroupError};

/// Re-exported so downstream crates can depend on `frost-ristretto255` alone.
pub use frost_core;

const CONTEXT_STRING: &str = "FROST-RISTRETTO255-SHA512-v5";

/// The Ristretto255 scalar field, i.e. the field of integers modulo the group order `l`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Ristretto255ScalarField;

impl Field for Ristretto255ScalarField {
    type Scalar = Scalar;

    type Serialization = [u8; 32];

    fn zero() -> Self::Scalar {
        Scalar::ZERO
    }

    fn one() -> Self::Scalar {
        Scalar::ONE
    }

    fn invert(scalar: &Self::Scalar) -> Result<Self::Scalar, FieldError> {
        if *scalar == Scalar::ZERO {
            Err(FieldError::InvalidZeroScalar)
        } else {
            Ok(scalar.invert())
        }
    }

    fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self::Scalar {
        let mut bytes = [0u8; 64];
        rng.fill_bytes(&mut bytes);
        Scalar::from_bytes_mod_order_wide(&bytes)
    }

    fn from_u16(n: u16) -> Self::Scalar {
        Scalar::from(n)
    }

    fn serialize(scalar: &Self::Scalar) -> Self::Serialization {
        scalar.to_bytes()
    }

    fn deserialize(buf: &Self::Serialization) -> Result<Self::Scalar, FieldError> {
        Option::from(Scalar::from_canonical_bytes(*buf)).ok_or(FieldError::MalformedScalar)
    }
}

/// The Ristretto255 group.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Ristretto255Group;

impl Group for Ristretto255Group {
    type Field = Ristretto255ScalarField;

    type Element = RistrettoPoint;

    type Serialization = [u8; 32];

    fn identity() -> Self::Element {
        RistrettoPoint::identity()
    }

    fn generator() -> Self::Element {
        curve25519_dalek::constants::RISTRETTO_BASEPOINT_POINT
    }

    fn serialize(element: &Self::Element) -> Result<Self::Serialization, GroupError> {
        Ok(element.compress().to_bytes())
    }

    fn deserialize(buf: &Self::Serialization) -> Result<Self::Element, GroupError> {
        let point = CompressedRistretto(*buf)
            .decompress()
            .ok_or(GroupError::MalformedElement)?;
        if point == RistrettoPoint::identity() {
            Err(GroupError::InvalidIdentity)
        } else {
            Ok(point)
        }
    }
}

/// Hashes `ctx_string || domain_label || msg` to a uniformly distributed scalar via wide
/// (64-byte) reduction, per §4.3.
fn hash_to_scalar(domain_label: &[u8], msg: &[u8]) -> Scalar {
    let mut input = Vec::with_capacity(CONTEXT_STRING.len() + domain_label.len() + msg.len());
    input.extend_from_slice(CONTEXT_STRING.as_bytes());
    input.extend_from_slice(domain_label);
    input.extend_from_slice(msg);
    Scalar::hash_from_bytes::<Sha512>(&input)
}

/// `FROST-RISTRETTO255-SHA512-v5`: FROST instantiated over Ristretto255 with SHA-512.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Ristretto255Sha512;

impl Ciphersuite for Ristretto255Sha512 {
    const ID: &'static str = CONTEXT_STRING;

    type Group = Ristretto255Group;

    type HashOutput = [u8; 64];

    fn h1(m: &[u8]) -> Scalar {
        hash_to_scalar(b"rho", m)
    }

    fn h2(m: &[u8]) -> Scalar {
        hash_to_scalar(b"chal", m)
    }

    fn h3(m: &[u8]) -> Self::HashOutput {
        let mut h = Sha512::new();
        h.update(CONTEXT_STRING.as_bytes());
        h.update(b"digest");
        h.update(m);
        h.finalize().into()
    }

    fn h4(m: &[u8]) -> Scalar {
        hash_to_scalar(b"nonce", m)
    }
}

/// A [`frost_core::SigningKey`] over [`Ristretto255Sha512`].
pub type SigningKey = frost_core::SigningKey<Ristretto255Sha512>;
/// A [`frost_core::VerifyingKey`] over [`Ristretto255Sha512`].
pub type VerifyingKey = frost_core::VerifyingKey<Ristretto255Sha512>;
/// A [`frost_core::Signature`] over [`Ristretto255Sha512`].
pub type Signature = frost_core::Signature<Ristretto255Sha512>;
/// An [`frost_core::Identifier`] over [`Ristretto255Sha512`].
pub type Identifier = frost_core::Identifier<Ristretto255Sha512>;
/// A [`frost_core::round1::SigningNonces`] over [`Ristretto255Sha512`].
pub type SigningNonces = frost_core::round1::SigningNonces<Ristretto255Sha512>;
/// A [`frost_core::round1::SigningCommitments`] over [`Ristretto255Sha512`].
pub type SigningCommitments = frost_core::round1::SigningCommitments<Ristretto255Sha512>;
/// A [`frost_core::round1::SigningPackage`] over [`Ristretto255Sha512`].
pub type SigningPackage = frost_core::round1::SigningPackage<Ristretto255Sha512>;
/// A [`frost_core::round2::SignatureShare`] over [`Ristretto255Sha512`].
pub type SignatureShare = frost_core::round2::SignatureShare<Ristretto255Sha512>;
/// A [`frost_core::keys::SecretShare`] over [`Ristretto255Sha512`].
pub type SecretShare = frost_core::keys::SecretShare<Ristretto255Sha512>;
/// A [`frost_core::keys::KeyPackage`] over [`Ristretto255Sha512`].
pub type KeyPackage = frost_core::keys::KeyPackage<Ristretto255Sha512>;
/// A [`frost_core::keys::PublicKeyPackage`] over [`Ristretto255Sha512`].
pub type PublicKeyPackage = frost_core::keys::PublicKeyPackage<Ristretto255Sha512>;
/// An [`frost_core::Error`] over [`Ristretto255Sha512`].
pub type Error = frost_core::Error<Ristretto255Sha512>;

/// Performs Round 1 of FROST signing for a single signer. See [`frost_core::round1::commit`].
pub fn round1_commit<R: RngCore + CryptoRng>(
    identifier: Identifier,
    signing_share: &frost_core::keys::SigningShare<Ristretto255Sha512>,
    rng: &mut R,
) -> (SigningNonces, SigningCommitments) {
    frost_core::round1::commit(identifier, signing_share, rng)
}

/// Performs Round 2 of FROST signing for a single signer. See [`frost_core::round2::sign`].
pub fn sign(
    signing_package: &SigningPackage,
    signer_nonces: SigningNonces,
    key_package: &KeyPackage,
) -> Result<SignatureShare, Error> {
    frost_core::round2::sign(signing_package, signer_nonces, key_package)
}

/// Aggregates signature shares into a final [`Signature`]. See [`frost_core::aggregate`].
pub fn aggregate(
    signing_package: &SigningPackage,
    signature_shares: &std::collections::BTreeMap<Identifier, SignatureShare>,
    public_key_package: &PublicKeyPackage,
) -> Result<Signature, Error> {
    frost_core::aggregate(signing_package, signature_shares, public_key_package)
}
