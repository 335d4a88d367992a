//! A generic implementation of FROST (Flexible Round-Optimized Schnorr Threshold
//! signatures), parameterized over a prime-order [`Group`]/[`Field`] pair via the
//! [`Ciphersuite`] trait.
//!
//! Concrete ciphersuites (`frost-p256`, `frost-ristretto255`) implement [`Ciphersuite`]
//! for a specific curve and hash function and re-export the types in this crate
//! monomorphized to that curve, so downstream users generally depend on a concrete
//! ciphersuite crate rather than on `frost-core` directly.
//!
//! The protocol has three phases:
//! - [`keys::dealer::generate_with_dealer`] (or [`keys::split`]) distributes a secret
//!   key among `max_signers` participants such that any `min_signers` of them can later
//!   cooperate to sign.
//! - [`round1::commit`] followed by [`round2::sign`] is run independently by each
//!   signer in a ceremony.
//! - [`aggregate`] combines the resulting [`round2::SignatureShare`]s into a final
//!   [`Signature`], verifiable with [`VerifyingKey::verify`].
//!
//! ## Feature flags
#![doc = document_features::document_features!()]

#![deny(missing_docs)]

use std::{
    collections::BTreeMap,
    fmt::{self, Debug},
    ops::{Add, Mul, Sub},
};

use derive_getters::Getters;
use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroize;

pub mod error;
pub mod identifier;
pub mod keys;
pub(crate) mod polynomial;
pub mod round1;
pub mod round2;
#[cfg(feature = "serde")]
pub(crate) mod serialization;
#[cfg(any(test, feature = "test-impl"))]
pub mod tests;

pub use error::{Error, FieldError, GroupError};
pub use identifier::Identifier;
pub use round1::SigningPackage;
pub use round2::SignatureShare;

/// A prime order finite field GF(q) over which a [`Group`]'s scalars are defined.
///
/// This trait does not need to be implemented directly for the curve library's own
/// scalar type; a ciphersuite crate typically implements it as a thin pass-through to
/// that type's existing arithmetic.
pub trait Field: Copy + Clone + PartialEq {
    /// An element of the scalar field.
    ///
    /// The `Eq`/`PartialEq` implementation on this type MUST be constant-time.
    type Scalar: Add<Output = Self::Scalar>
        + Copy
        + Clone
        + Debug
        + Eq
        + Mul<Output = Self::Scalar>
        + PartialEq
        + Sub<Output = Self::Scalar>
        + Zeroize;

    /// A fixed-length byte encoding of a [`Field::Scalar`].
    type Serialization: AsRef<[u8]> + Clone + Debug + for<'a> TryFrom<&'a [u8]>;

    /// The additive identity of the field.
    fn zero() -> Self::Scalar;

    /// The multiplicative identity of the field.
    fn one() -> Self::Scalar;

    /// Computes the multiplicative inverse of `scalar`, failing if it is zero.
    fn invert(scalar: &Self::Scalar) -> Result<Self::Scalar, FieldError>;

    /// Samples a scalar uniformly at random.
    fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self::Scalar;

    /// Maps `n` to the corresponding element of the field.
    ///
    /// The default implementation builds the value via double-and-add from the field's
    /// `zero`/`one`/`Add`; ciphersuites SHOULD override this with a native, faster
    /// conversion when the underlying scalar type provides one (e.g. `Scalar::from(u64)`).
    fn from_u16(n: u16) -> Self::Scalar {
        let one = Self::one();
        (0..16).rev().fold(Self::zero(), |acc, i| {
            let acc = acc + acc;
            if (n >> i) & 1 == 1 {
                acc + one
            } else {
                acc
            }
        })
    }

    /// Serializes a scalar to its fixed-length encoding.
    fn serialize(scalar: &Self::Scalar) -> Self::Serialization;

    /// Deserializes a scalar from its fixed-length encoding.
    fn deserialize(buf: &Self::Serialization) -> Result<Self::Scalar, FieldError>;
}

/// A prime-order group (or prime-order subgroup of a curve with cofactor) that provides
/// everything needed to create and verify FROST Schnorr signatures.
pub trait Group: Copy + Clone + PartialEq {
    /// The scalar field over which this group's [`Group::Element`] is a vector space.
    type Field: Field;

    /// An element of this group.
    type Element: Add<Output = Self::Element>
        + Copy
        + Clone
        + Debug
        + Eq
        + Mul<<Self::Field as Field>::Scalar, Output = Self::Element>
        + PartialEq
        + Sub<Output = Self::Element>;

    /// A fixed-length, compressed byte encoding of a [`Group::Element`].
    type Serialization: AsRef<[u8]> + Clone + Debug + for<'a> TryFrom<&'a [u8]>;

    /// The additive identity of the group.
    fn identity() -> Self::Element;

    /// The group's fixed generator.
    fn generator() -> Self::Element;

    /// Serializes `element` to its fixed-length compressed encoding.
    fn serialize(element: &Self::Element) -> Result<Self::Serialization, GroupError>;

    /// Deserializes `buf` to a [`Group::Element`], rejecting the identity element.
    fn deserialize(buf: &Self::Serialization) -> Result<Self::Element, GroupError>;
}

/// An element of the [`Ciphersuite`] `C`'s scalar field.
pub type Scalar<C> = <<<C as Ciphersuite>::Group as Group>::Field as Field>::Scalar;

/// An element of the [`Ciphersuite`] `C`'s [`Group`].
pub type Element<C> = <<C as Ciphersuite>::Group as Group>::Element;

/// A FROST ciphersuite: a prime-order [`Group`] together with four domain-separated
/// hash functions.
///
/// `ID` is used verbatim as the domain-separation context string; each hash function
/// appends its own fixed label (`"rho"`, `"chal"`, `"nonce"`, `"digest"`) to `ID` before
/// hashing, per the FROST specification.
pub trait Ciphersuite: Copy + Clone + PartialEq + Debug {
    /// The ciphersuite's context string, e.g. `"FROST-P256-SHA256-v5"`.
    const ID: &'static str;

    /// The prime-order group this ciphersuite operates over.
    type Group: Group;

    /// The fixed-length output of this ciphersuite's plain digest, `H3`.
    type HashOutput: AsRef<[u8]> + Clone + Debug;

    /// `H1`: maps arbitrary bytes to a scalar, domain-separated with label `"rho"`. Used
    /// to derive binding factors.
    fn h1(m: &[u8]) -> Scalar<Self>;

    /// `H2`: maps arbitrary bytes to a scalar, domain-separated with label `"chal"`.
    /// Used for the Schnorr challenge.
    fn h2(m: &[u8]) -> Scalar<Self>;

    /// `H3`: a plain, variable-consumer, fixed-output digest domain-separated with label
    /// `"digest"`. Used to hash the message and the encoded commitment set before they
    /// are folded into the binding factor input.
    fn h3(m: &[u8]) -> Self::HashOutput;

    /// `H4`: maps arbitrary bytes to a scalar, domain-separated with label `"nonce"`.
    /// Used to derive signing nonces.
    fn h4(m: &[u8]) -> Scalar<Self>;
}

/// A signing key: a single scalar from which a [`VerifyingKey`] and, via
/// [`keys::split`], a set of [`keys::SecretShare`]s are derived.
///
/// Held only by a trusted dealer (or reconstructed transiently by
/// [`keys::reconstruct`] for testing); individual signers hold a
/// [`keys::KeyPackage`]'s [`keys::SigningShare`] instead, never this type.
#[derive(Clone, Copy, zeroize::Zeroize, zeroize::ZeroizeOnDrop)]
pub struct SigningKey<C: Ciphersuite> {
    pub(crate) scalar: Scalar<C>,
}

impl<C> SigningKey<C>
where
    C: Ciphersuite,
{
    /// Generates a new, uniformly random signing key.
    pub fn new<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut scalar = <<C::Group as Group>::Field>::random(rng);
        while scalar == <<C::Group as Group>::Field>::zero() {
            scalar = <<C::Group as Group>::Field>::random(rng);
        }
        Self { scalar }
    }

    /// Derives the [`VerifyingKey`] corresponding to this signing key.
    pub fn to_verifying_key(&self) -> VerifyingKey<C> {
        VerifyingKey {
            element: <C::Group>::generator() * self.scalar,
        }
    }

    /// Serializes this signing key to its scalar encoding.
    pub fn serialize(&self) -> <<C::Group as Group>::Field as Field>::Serialization {
        <<C::Group as Group>::Field>::serialize(&self.scalar)
    }

    /// Deserializes a signing key from a scalar encoding.
    pub fn deserialize(
        bytes: &<<C::Group as Group>::Field as Field>::Serialization,
    ) -> Result<Self, Error<C>> {
        <<C::Group as Group>::Field>::deserialize(bytes)
            .map(|scalar| Self { scalar })
            .map_err(|_| Error::MalformedSigningKey)
    }
}

/// The long-term public key against which a threshold signature's validity is checked.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct VerifyingKey<C: Ciphersuite> {
    pub(crate) element: Element<C>,
}

impl<C> VerifyingKey<C>
where
    C: Ciphersuite,
{
    /// Serializes this verifying key to its compressed element encoding.
    pub fn serialize(&self) -> Result<<C::Group as Group>::Serialization, Error<C>> {
        <C::Group>::serialize(&self.element).map_err(Error::from)
    }

    /// Deserializes a verifying key from a compressed element encoding.
    pub fn deserialize(bytes: &<C::Group as Group>::Serialization) -> Result<Self, Error<C>> {
        <C::Group>::deserialize(bytes)
            .map(|element| Self { element })
            .map_err(|_| Error::MalformedVerifyingKey)
    }

    /// Verifies a standard Schnorr `signature` over `msg` under this verifying key.
    ///
    /// This is the final check any caller — not just a FROST coordinator — performs
    /// against a FROST-produced signature; from the verifier's perspective it is
    /// indistinguishable from a single-party Schnorr signature.
    pub fn verify(&self, msg: &[u8], signature: &Signature<C>) -> Result<(), Error<C>> {
        let c = challenge::<C>(&signature.group_commitment, self, msg)?;

        let lhs = <C::Group>::generator() * signature.z;
        let rhs = self.element * c + signature.group_commitment;

        if lhs == rhs {
            Ok(())
        } else {
            Err(Error::InvalidSignature)
        }
    }
}

#[cfg(feature = "serde")]
impl<C> serde::Serialize for VerifyingKey<C>
where
    C: Ciphersuite,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let bytes = self.serialize().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&hex::encode(bytes.as_ref()))
    }
}

#[cfg(feature = "serde")]
impl<'de, C> serde::Deserialize<'de> for VerifyingKey<C>
where
    C: Ciphersuite,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        let bytes = hex::decode(s).map_err(serde::de::Error::custom)?;
        let serialization = <C::Group as Group>::Serialization::try_from(bytes.as_slice())
            .map_err(|_| serde::de::Error::custom("malformed verifying key encoding"))?;
        VerifyingKey::deserialize(&serialization).map_err(serde::de::Error::custom)
    }
}

impl<C> Debug for VerifyingKey<C>
where
    C: Ciphersuite,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("VerifyingKey")
            .field(
                &self
                    .serialize()
                    .map(|b| hex::encode(b.as_ref()))
                    .unwrap_or_else(|_| "<invalid>".into()),
            )
            .finish()
    }
}

/// The Schnorr challenge `H2(compress(R) || compress(verifying_key) || msg)`.
pub(crate) fn challenge<C: Ciphersuite>(
    group_commitment: &Element<C>,
    verifying_key: &VerifyingKey<C>,
    msg: &[u8],
) -> Result<Scalar<C>, Error<C>> {
    let r_enc = <C::Group>::serialize(group_commitment)?;
    let pk_enc = <C::Group>::serialize(&verifying_key.element)?;

    let mut input = Vec::with_capacity(r_enc.as_ref().len() + pk_enc.as_ref().len() + msg.len());
    input.extend_from_slice(r_enc.as_ref());
    input.extend_from_slice(pk_enc.as_ref());
    input.extend_from_slice(msg);

    Ok(C::h2(&input))
}

/// A final, aggregated Schnorr signature: `(R, z)` serialized as
/// `compress(R) || encode(z)`.
#[derive(Clone, Copy, Getters)]
pub struct Signature<C: Ciphersuite> {
    /// The group commitment `R`.
    pub(crate) group_commitment: Element<C>,
    /// The aggregated response `z`.
    pub(crate) z: Scalar<C>,
}

impl<C> Signature<C>
where
    C: Ciphersuite,
{
    /// Serializes this signature as `compress(R) || encode(z)`.
    pub fn serialize(&self) -> Result<Vec<u8>, Error<C>> {
        let r_enc = <C::Group>::serialize(&self.group_commitment)?;
        let z_enc = <<C::Group as Group>::Field>::serialize(&self.z);

        let mut bytes = Vec::with_capacity(r_enc.as_ref().len() + z_enc.as_ref().len());
        bytes.extend_from_slice(r_enc.as_ref());
        bytes.extend_from_slice(z_enc.as_ref());
        Ok(bytes)
    }

    /// Deserializes a signature from `compress(R) || encode(z)`, failing if `bytes` is
    /// short or either half fails to decode.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, Error<C>> {
        // `Group::Serialization` is a fixed-width but opaque associated type, so its
        // length is read off a freshly-serialized sample rather than assumed via
        // `size_of`.
        let sample_r = <C::Group>::serialize(&<C::Group>::generator())?;
        let ne = sample_r.as_ref().len();

        if bytes.len() <= ne {
            return Err(Error::MalformedSignature);
        }

        let r_enc = &bytes[..ne];
        let z_enc = &bytes[ne..];

        let r_serialization = <C::Group as Group>::Serialization::try_from(r_enc)
            .map_err(|_| Error::MalformedSignature)?;
        let group_commitment =
            <C::Group>::deserialize(&r_serialization).map_err(|_| Error::MalformedSignature)?;

        let z_serialization =
            <<C::Group as Group>::Field as Field>::Serialization::try_from(z_enc)
                .map_err(|_| Error::MalformedSignature)?;
        let z = <<C::Group as Group>::Field>::deserialize(&z_serialization)
            .map_err(|_| Error::MalformedSignature)?;

        Ok(Self { group_commitment, z })
    }
}

#[cfg(feature = "serde")]
impl<C> serde::Serialize for Signature<C>
where
    C: Ciphersuite,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let bytes = Signature::serialize(self).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&hex::encode(bytes))
    }
}

#[cfg(feature = "serde")]
impl<'de, C> serde::Deserialize<'de> for Signature<C>
where
    C: Ciphersuite,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        let bytes = hex::decode(s).map_err(serde::de::Error::custom)?;
        Signature::deserialize(&bytes).map_err(serde::de::Error::custom)
    }
}

impl<C> Debug for Signature<C>
where
    C: Ciphersuite,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Signature")
            .field(
                &self
                    .serialize()
                    .map(hex::encode)
                    .unwrap_or_else(|_| "<invalid>".into()),
            )
            .finish()
    }
}

/// Aggregates individual [`round2::SignatureShare`]s into a final [`Signature`].
///
/// Every signature share is verified against `public_key_package` before being summed,
/// so that a malicious or buggy participant's bad share is reported with its identifier
/// rather than silently producing a signature that later fails to verify.
pub fn aggregate<C>(
    signing_package: &SigningPackage<C>,
    signature_shares: &BTreeMap<Identifier<C>, round2::SignatureShare<C>>,
    public_key_package: &keys::PublicKeyPackage<C>,
) -> Result<Signature<C>, Error<C>>
where
    C: Ciphersuite,
{
    if signature_shares.len() < *public_key_package.min_signers() as usize {
        return Err(Error::IncorrectNumberOfCommitments);
    }

    let binding_factor_list =
        round1::compute_binding_factor_list(signing_package, public_key_package.verifying_key())?;
    let group_commitment = round1::compute_group_commitment(signing_package, &binding_factor_list)?;
    let challenge = challenge::<C>(
        &group_commitment.0,
        public_key_package.verifying_key(),
        &signing_package.message,
    )?;

    let identifiers: std::collections::BTreeSet<Identifier<C>> =
        signing_package.signing_commitments.keys().copied().collect();

    for (identifier, share) in signature_shares {
        let commitment = signing_package
            .signing_commitments
            .get(identifier)
            .ok_or(Error::UnknownIdentifier)?;
        let verifying_share = public_key_package
            .verifying_shares()
            .get(identifier)
            .ok_or(Error::UnknownIdentifier)?;
        let binding_factor = binding_factor_list.get(identifier)?;
        let lambda_i = polynomial::compute_lagrange_coefficient(&identifiers, *identifier);

        share
            .verify(
                *identifier,
                commitment,
                verifying_share,
                binding_factor,
                lambda_i,
                &challenge,
            )
            .map_err(|_| Error::InvalidSignatureShare {
                culprit: *identifier,
            })?;
    }

    let z = signature_shares
        .values()
        .fold(<<C::Group as Group>::Field>::zero(), |acc, share| {
            acc + *share.share()
        });

    Ok(Signature {
        group_commitment: group_commitment.0,
        z,
    })
}
