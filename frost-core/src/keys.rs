//! FROST key material: the output of a trusted-dealer keygen, and the types each
//! participant and the coordinator hold afterwards.

use std::{collections::BTreeMap, fmt::Debug};

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{
    identifier::Identifier, Ciphersuite, Element, Error, Field, Group, Scalar, SigningKey,
    VerifyingKey,
};

pub mod dealer;

/// A single signer's share of the group secret key.
///
/// Unlike [`SigningKey`], which only a dealer (or [`dealer::reconstruct`], for testing)
/// ever holds, every participant in a signing ceremony holds one of these as part of its
/// [`KeyPackage`].
#[derive(Clone, Copy, Zeroize, ZeroizeOnDrop)]
pub struct SigningShare<C: Ciphersuite> {
    pub(crate) scalar: Scalar<C>,
}

impl<C> SigningShare<C>
where
    C: Ciphersuite,
{
    pub(crate) fn new(scalar: Scalar<C>) -> Self {
        Self { scalar }
    }

    /// Returns the scalar this share wraps.
    pub(crate) fn to_scalar(self) -> Scalar<C> {
        self.scalar
    }

    /// Serializes this share to its scalar encoding.
    pub fn serialize(&self) -> <<C::Group as Group>::Field as Field>::Serialization {
        <<C::Group as Group>::Field>::serialize(&self.scalar)
    }

    /// Deserializes a share from its scalar encoding.
    pub fn deserialize(
        bytes: &<<C::Group as Group>::Field as Field>::Serialization,
    ) -> Result<Self, Error<C>> {
        <<C::Group as Group>::Field>::deserialize(bytes)
            .map(Self::new)
            .map_err(Error::from)
    }
}

impl<C> Debug for SigningShare<C>
where
    C: Ciphersuite,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_tuple("SigningShare").field(&"<redacted>").finish()
    }
}

/// The public counterpart to a [`SigningShare`]: `g^signing_share`.
///
/// The coordinator collects every signer's `VerifyingShare` (in a [`PublicKeyPackage`])
/// so that it can check each [`crate::round2::SignatureShare`] against the specific
/// signer that produced it, before combining them.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct VerifyingShare<C: Ciphersuite> {
    pub(crate) element: Element<C>,
}

#[cfg(feature = "serde")]
impl<C> serde::Serialize for VerifyingShare<C>
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
impl<'de, C> serde::Deserialize<'de> for VerifyingShare<C>
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
            .map_err(|_| serde::de::Error::custom("malformed verifying share encoding"))?;
        VerifyingShare::deserialize(&serialization).map_err(serde::de::Error::custom)
    }
}

impl<C> VerifyingShare<C>
where
    C: Ciphersuite,
{
    pub(crate) fn new(element: Element<C>) -> Self {
        Self { element }
    }

    pub(crate) fn to_element(self) -> Element<C> {
        self.element
    }

    /// Serializes this verifying share to its compressed element encoding.
    pub fn serialize(&self) -> Result<<C::Group as Group>::Serialization, Error<C>> {
        <C::Group>::serialize(&self.element).map_err(Error::from)
    }

    /// Deserializes a verifying share from a compressed element encoding.
    pub fn deserialize(bytes: &<C::Group as Group>::Serialization) -> Result<Self, Error<C>> {
        <C::Group>::deserialize(bytes)
            .map(Self::new)
            .map_err(Error::from)
    }
}

impl<C> Debug for VerifyingShare<C>
where
    C: Ciphersuite,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_tuple("VerifyingShare")
            .field(
                &self
                    .serialize()
                    .map(|b| hex::encode(b.as_ref()))
                    .unwrap_or_else(|_| "<invalid>".into()),
            )
            .finish()
    }
}

/// A public commitment to a single coefficient of the dealer's secret polynomial, i.e.
/// `g^a_k`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct CoefficientCommitment<C: Ciphersuite>(pub(crate) Element<C>);

/// The dealer's public commitments to every coefficient of its secret polynomial, lowest
/// degree first (`commitments()[0]` is `g^secret`).
///
/// Every participant uses the same `VerifiableSecretSharingCommitment` to check its own
/// [`SecretShare`] via [`SecretShare::verify`], which is what makes the sharing
/// *verifiable*: a participant does not have to trust the dealer's word that a given
/// share lies on the shared polynomial.
#[derive(Clone)]
pub struct VerifiableSecretSharingCommitment<C: Ciphersuite>(
    pub(crate) Vec<CoefficientCommitment<C>>,
);

impl<C> VerifiableSecretSharingCommitment<C>
where
    C: Ciphersuite,
{
    /// The commitment to the constant term, `g^secret`, i.e. this commitment's implied
    /// [`VerifyingKey`].
    pub(crate) fn verifying_key(&self) -> VerifyingKey<C> {
        VerifyingKey {
            element: self.0[0].0,
        }
    }
}

/// A single participant's share of the group secret, as produced by
/// [`dealer::generate_with_dealer`] or [`dealer::split`].
///
/// Distinct from [`KeyPackage`]: a `SecretShare` is the raw output a dealer hands to a
/// participant, who MUST call [`SecretShare::verify`] (turning it into a [`KeyPackage`])
/// before trusting it — a compromised or buggy dealer can otherwise hand out a share
/// that is inconsistent with the group's public key.
#[derive(Clone)]
pub struct SecretShare<C: Ciphersuite> {
    pub(crate) identifier: Identifier<C>,
    pub(crate) signing_share: SigningShare<C>,
    pub(crate) commitment: VerifiableSecretSharingCommitment<C>,
}

impl<C> SecretShare<C>
where
    C: Ciphersuite,
{
    /// This share's identifier.
    pub fn identifier(&self) -> Identifier<C> {
        self.identifier
    }

    /// Checks that this share actually lies on the polynomial committed to by
    /// `self.commitment`, via Horner's rule evaluated in the exponent:
    ///
    /// `g^signing_share == sum_k commitment[k] * identifier^k`
    pub fn verify(&self) -> Result<KeyPackage<C>, Error<C>> {
        let x = self.identifier.to_scalar();

        let (_, result) = self.commitment.0.iter().fold(
            (<<C::Group as Group>::Field>::one(), <C::Group>::identity()),
            |(x_to_the_k, sum_so_far), commitment_k| {
                (x_to_the_k * x, sum_so_far + commitment_k.0 * x_to_the_k)
            },
        );

        let f_result = <C::Group>::generator() * self.signing_share.scalar;

        if f_result != result {
            return Err(Error::InvalidSecretShare);
        }

        Ok(KeyPackage {
            identifier: self.identifier,
            signing_share: self.signing_share,
            verifying_share: VerifyingShare::new(f_result),
            verifying_key: self.commitment.verifying_key(),
            min_signers: self.commitment.0.len() as u16,
        })
    }
}

/// Everything a single signing participant needs to hold between keygen and signing: its
/// own share, the corresponding public pieces, and the threshold it must respect.
///
/// Obtained by calling [`SecretShare::verify`] on the [`SecretShare`] a dealer handed
/// out — never constructed directly from untrusted input.
#[derive(Clone, Copy)]
pub struct KeyPackage<C: Ciphersuite> {
    pub(crate) identifier: Identifier<C>,
    pub(crate) signing_share: SigningShare<C>,
    pub(crate) verifying_share: VerifyingShare<C>,
    pub(crate) verifying_key: VerifyingKey<C>,
    pub(crate) min_signers: u16,
}

impl<C> KeyPackage<C>
where
    C: Ciphersuite,
{
    /// This participant's identifier.
    pub fn identifier(&self) -> &Identifier<C> {
        &self.identifier
    }

    /// This participant's secret key share.
    pub fn signing_share(&self) -> &SigningShare<C> {
        &self.signing_share
    }

    /// This participant's public verifying share, `g^signing_share`.
    pub fn verifying_share(&self) -> &VerifyingShare<C> {
        &self.verifying_share
    }

    /// The group's public verifying key.
    pub fn verifying_key(&self) -> &VerifyingKey<C> {
        &self.verifying_key
    }

    /// The number of signers required to produce a valid signature.
    pub fn min_signers(&self) -> &u16 {
        &self.min_signers
    }
}

/// Public data a coordinator needs to verify signature shares and combine them: every
/// signer's [`VerifyingShare`], the group's [`VerifyingKey`], and the threshold.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "C: Ciphersuite"))]
pub struct PublicKeyPackage<C: Ciphersuite> {
    pub(crate) verifying_shares: BTreeMap<Identifier<C>, VerifyingShare<C>>,
    pub(crate) verifying_key: VerifyingKey<C>,
    pub(crate) min_signers: u16,
}

impl<C> PublicKeyPackage<C>
where
    C: Ciphersuite,
{
    /// Every signer's public verifying share, keyed by identifier.
    pub fn verifying_shares(&self) -> &BTreeMap<Identifier<C>, VerifyingShare<C>> {
        &self.verifying_shares
    }

    /// The group's public verifying key.
    pub fn verifying_key(&self) -> &VerifyingKey<C> {
        &self.verifying_key
    }

    /// The number of signers required to produce a valid signature.
    pub fn min_signers(&self) -> &u16 {
        &self.min_signers
    }
}
