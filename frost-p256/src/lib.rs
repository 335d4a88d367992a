//! The NIST P-256 ciphersuite for FROST threshold Schnorr signatures
//! (`FROST-P256-SHA256-v5`).
//!
//! This crate monomorphizes [`frost_core`] to the `p256` crate's P-256 group and
//! SHA-256, deriving `H1`/`H2`/`H4` via RFC 9380's `hash_to_field` (through
//! [`elliptic_curve::hash2curve::GroupDigest`]) rather than the wide-reduction scheme
//! used by curves without a native hash-to-field construction.

#![deny(missing_docs)]

use p256::{
    elliptic_curve::{
        group::GroupEncoding,
        hash2curve::{ExpandMsgXmd, GroupDigest},
        ff::{Field as _, PrimeField},
    },
    NistP256, ProjectivePoint, Scalar,
};
use rand_core::{CryptoRng, RngCore};
use sha2::{Digest, Sha256};

use frost_core::{Ciphersuite, Field, FieldError, Group, GroupError};

/// Re-exported so downstream crates can depend on `frost-p256` alone.
pub use frost_core;

const CONTEXT_STRING: &str = "FROST-P256-SHA256-v5";

/// The P-256 scalar field, i.e. the field of integers modulo the curve's prime order.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct P256ScalarField;

impl Field for P256ScalarField {
    type Scalar = Scalar;

    type Serialization = [u8; 32];

    fn zero() -> Self::Scalar {
        Scalar::ZERO
    }

    fn one() -> Self::Scalar {
        Scalar::ONE
    }

    fn invert(scalar: &Self::Scalar) -> Result<Self::Scalar, FieldError> {
        Option::from(scalar.invert()).ok_or(FieldError::InvalidZeroScalar)
    }

    fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self::Scalar {
        Scalar::random(rng)
    }

    fn serialize(scalar: &Self::Scalar) -> Self::Serialization {
        let repr = scalar.to_repr();
        let mut out = [0u8; 32];
        out.copy_from_slice(repr.as_ref());
        out
    }

    fn deserialize(buf: &Self::Serialization) -> Result<Self::Scalar, FieldError> {
        let mut repr = p256::FieldBytes::default();
        repr.as_mut().copy_from_slice(buf.as_ref());
        Option::from(Scalar::from_repr(repr)).ok_or(FieldError::MalformedScalar)
    }
}

/// The P-256 group (the prime-order subgroup of the NIST P-256 curve).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct P256Group;

impl Group for P256Group {
    type Field = P256ScalarField;

    type Element = ProjectivePoint;

    type Serialization = [u8; 33];

    fn identity() -> Self::Element {
        ProjectivePoint::IDENTITY
    }

    fn generator() -> Self::Element {
        ProjectivePoint::GENERATOR
    }

    fn serialize(element: &Self::Element) -> Result<Self::Serialization, GroupError> {
        let repr = element.to_bytes();
        let mut out = [0u8; 33];
        out.copy_from_slice(repr.as_ref());
        Ok(out)
    }

    fn deserialize(buf: &Self::Serialization) -> Result<Self::Element, GroupError> {
        let mut repr = <ProjectivePoint as GroupEncoding>::Repr::default();
        repr.as_mut().copy_from_slice(buf.as_ref());
        let point: ProjectivePoint =
            Option::from(ProjectivePoint::from_bytes(&repr)).ok_or(GroupError::MalformedElement)?;
        if point == ProjectivePoint::IDENTITY {
            Err(GroupError::InvalidIdentity)
        } else {
            Ok(point)
        }
    }
}

/// `FROST-P256-SHA256-v5`: FROST instantiated over P-256 with SHA-256.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct P256Sha256;

impl Ciphersuite for P256Sha256 {
    const ID: &'static str = CONTEXT_STRING;

    type Group = P256Group;

    type HashOutput = [u8; 32];

    fn h1(m: &[u8]) -> Scalar {
        let dst = [CONTEXT_STRING.as_bytes(), b"rho"].concat();
        NistP256::hash_to_scalar::<ExpandMsgXmd<Sha256>>(&[m], &[&dst])
            .expect("hash_to_field never fails for a fixed, well-formed DST")
    }

    fn h2(m: &[u8]) -> Scalar {
        let dst = [CONTEXT_STRING.as_bytes(), b"chal"].concat();
        NistP256::hash_to_scalar::<ExpandMsgXmd<Sha256>>(&[m], &[&dst])
            .expect("hash_to_field never fails for a fixed, well-formed DST")
    }

    fn h3(m: &[u8]) -> Self::HashOutput {
        let mut h = Sha256::new();
        h.update(CONTEXT_STRING.as_bytes());
        h.update(b"digest");
        h.update(m);
        h.finalize().into()
    }

    fn h4(m: &[u8]) -> Scalar {
        let dst = [CONTEXT_STRING.as_bytes(), b"nonce"].concat();
        NistP256::hash_to_scalar::<ExpandMsgXmd<Sha256>>(&[m], &[&dst])
            .expect("hash_to_field never fails for a fixed, well-formed DST")
    }
}

/// A [`frost_core::SigningKey`] over [`P256Sha256`].
pub type SigningKey = frost_core::SigningKey<P256Sha256>;
/// A [`frost_core::VerifyingKey`] over [`P256Sha256`].
pub type VerifyingKey = frost_core::VerifyingKey<P256Sha256>;
/// A [`frost_core::Signature`] over [`P256Sha256`].
pub type Signature = frost_core::Signature<P256Sha256>;
/// An [`frost_core::Identifier`] over [`P256Sha256`].
pub type Identifier = frost_core::Identifier<P256Sha256>;
/// A [`frost_core::round1::SigningNonces`] over [`P256Sha256`].
pub type SigningNonces = frost_core::round1::SigningNonces<P256Sha256>;
/// A [`frost_core::round1::SigningCommitments`] over [`P256Sha256`].
pub type SigningCommitments = frost_core::round1::SigningCommitments<P256Sha256>;
/// A [`frost_core::round1::SigningPackage`] over [`P256Sha256`].
pub type SigningPackage = frost_core::round1::SigningPackage<P256Sha256>;
/// A [`frost_core::round2::SignatureShare`] over [`P256Sha256`].
pub type SignatureShare = frost_core::round2::SignatureShare<P256Sha256>;
/// A [`frost_core::keys::SecretShare`] over [`P256Sha256`].
pub type SecretShare = frost_core::keys::SecretShare<P256Sha256>;
/// A [`frost_core::keys::KeyPackage`] over [`P256Sha256`].
pub type KeyPackage = frost_core::keys::KeyPackage<P256Sha256>;
/// A [`frost_core::keys::PublicKeyPackage`] over [`P256Sha256`].
pub type PublicKeyPackage = frost_core::keys::PublicKeyPackage<P256Sha256>;
/// An [`frost_core::Error`] over [`P256Sha256`].
pub type Error = frost_core::Error<P256Sha256>;

/// Performs Round 1 of FROST signing for a single signer. See [`frost_core::round1::commit`].
pub fn round1_commit<R: RngCore + CryptoRng>(
    identifier: Identifier,
    signing_share: &frost_core::keys::SigningShare<P256Sha256>,
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
