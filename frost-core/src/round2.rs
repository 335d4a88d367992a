//! FROST Round 2 functionality and types, for signature share generation and
//! verification.

use std::fmt::{self, Debug};

use derive_getters::Getters;

use crate::{
    challenge,
    keys::{KeyPackage, VerifyingShare},
    polynomial, round1, Ciphersuite, Error, Field, Group, Identifier, Scalar,
};

#[cfg(feature = "serde")]
use crate::serialization::{scalar_from_serialization, ScalarSerialization};

/// Helper so a bare `Scalar<C>` field can round-trip through serde via
/// [`ScalarSerialization`], since `Scalar<C>` itself has no `serde` impl.
#[cfg(feature = "serde")]
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "C: Ciphersuite"))]
#[cfg_attr(feature = "serde", serde(try_from = "ScalarSerialization<C>"))]
#[cfg_attr(feature = "serde", serde(into = "ScalarSerialization<C>"))]
struct SignatureShareHelper<C: Ciphersuite>(Scalar<C>);

#[cfg(feature = "serde")]
impl<C> TryFrom<ScalarSerialization<C>> for SignatureShareHelper<C>
where
    C: Ciphersuite,
{
    type Error = Error<C>;

    fn try_from(value: ScalarSerialization<C>) -> Result<Self, Self::Error> {
        scalar_from_serialization::<C>(value).map(Self)
    }
}

#[cfg(feature = "serde")]
impl<C> From<SignatureShareHelper<C>> for ScalarSerialization<C>
where
    C: Ciphersuite,
{
    fn from(value: SignatureShareHelper<C>) -> Self {
        ScalarSerialization(<<C::Group as Group>::Field>::serialize(&value.0))
    }
}

/// A participant's signature share over a message, to be combined by a coordinator with
/// every other signer's share into the final [`crate::Signature`].
#[derive(Clone, Copy, Eq, PartialEq, Getters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "C: Ciphersuite"))]
#[cfg_attr(feature = "serde", serde(try_from = "SignatureShareHelper<C>"))]
#[cfg_attr(feature = "serde", serde(into = "SignatureShareHelper<C>"))]
pub struct SignatureShare<C: Ciphersuite> {
    /// This signer's contribution to the aggregated response `z`.
    pub(crate) share: Scalar<C>,
}

#[cfg(feature = "serde")]
impl<C> TryFrom<SignatureShareHelper<C>> for SignatureShare<C>
where
    C: Ciphersuite,
{
    type Error = Error<C>;

    fn try_from(value: SignatureShareHelper<C>) -> Result<Self, Self::Error> {
        Ok(Self { share: value.0 })
    }
}

#[cfg(feature = "serde")]
impl<C> From<SignatureShare<C>> for SignatureShareHelper<C>
where
    C: Ciphersuite,
{
    fn from(value: SignatureShare<C>) -> Self {
        Self(value.share)
    }
}

impl<C> SignatureShare<C>
where
    C: Ciphersuite,
{
    /// Serializes this signature share to its scalar encoding.
    pub fn serialize(&self) -> <<C::Group as Group>::Field as Field>::Serialization {
        <<C::Group as Group>::Field>::serialize(&self.share)
    }

    /// Deserializes a signature share from its scalar encoding.
    pub fn deserialize(
        bytes: &<<C::Group as Group>::Field as Field>::Serialization,
    ) -> Result<Self, Error<C>> {
        <<C::Group as Group>::Field>::deserialize(bytes)
            .map(|share| Self { share })
            .map_err(Error::from)
    }

    /// Checks that this signature share is consistent with `commitment` and
    /// `verifying_share` under the given `binding_factor`/`challenge`/`lambda_i`, per
    /// §4.8:
    ///
    /// `g^share == (hiding + binding * binding_factor) + verifying_share * (challenge * lambda_i)`
    ///
    /// Called by [`crate::aggregate`] against every share before they are summed, and
    /// usable directly by a coordinator that wants to identify a bad share as soon as it
    /// arrives rather than waiting for aggregation.
    ///
    /// Only `pub(crate)` by default; built with `internals`, it is exported so that a
    /// coordinator built directly against this crate's traits can check a share the
    /// moment it arrives rather than waiting for [`crate::aggregate`] to do it.
    #[allow(clippy::too_many_arguments)]
    #[cfg_attr(feature = "internals", visibility::make(pub))]
    pub(crate) fn verify(
        &self,
        identifier: Identifier<C>,
        commitment: &round1::SigningCommitments<C>,
        verifying_share: &VerifyingShare<C>,
        binding_factor: Scalar<C>,
        lambda_i: Scalar<C>,
        challenge: &Scalar<C>,
    ) -> Result<(), Error<C>> {
        let commitment_share = *commitment.hiding() + *commitment.binding() * binding_factor;

        let lhs = <C::Group>::generator() * self.share;
        let rhs = commitment_share + verifying_share.to_element() * (*challenge * lambda_i);

        if lhs == rhs {
            Ok(())
        } else {
            Err(Error::InvalidSignatureShare { culprit: identifier })
        }
    }
}

/// Computes the signature share for a signing operation:
///
/// `share = hiding + binding * binding_factor + lambda_i * signing_share * challenge`
pub(crate) fn compute_signature_share<C: Ciphersuite>(
    signer_nonces: &round1::SigningNonces<C>,
    binding_factor: Scalar<C>,
    lambda_i: Scalar<C>,
    key_package: &KeyPackage<C>,
    challenge: Scalar<C>,
) -> SignatureShare<C> {
    let z_share = signer_nonces.hiding.0
        + (signer_nonces.binding.0 * binding_factor)
        + (lambda_i * key_package.signing_share().to_scalar() * challenge);

    SignatureShare { share: z_share }
}

/// Performed once by each participant selected for a signing ceremony: produces this
/// signer's [`SignatureShare`] over `signing_package.message()`.
///
/// Consumes `signer_nonces` by value, so a given [`round1::SigningNonces`] can be fed
/// into `sign` at most once; reuse across two calls is a compile error, not a runtime
/// check.
pub fn sign<C: Ciphersuite>(
    signing_package: &round1::SigningPackage<C>,
    signer_nonces: round1::SigningNonces<C>,
    key_package: &KeyPackage<C>,
) -> Result<SignatureShare<C>, Error<C>> {
    if signing_package.signing_commitments().len() < *key_package.min_signers() as usize {
        return Err(Error::IncorrectNumberOfCommitments);
    }

    let commitment = signing_package
        .signing_commitments()
        .get(key_package.identifier())
        .ok_or(Error::MissingCommitment)?;

    if &signer_nonces.commitments != commitment {
        return Err(Error::IncorrectCommitment);
    }

    let binding_factor_list =
        round1::compute_binding_factor_list(signing_package, key_package.verifying_key())?;
    let binding_factor = binding_factor_list.get(key_package.identifier())?;

    let group_commitment =
        round1::compute_group_commitment(signing_package, &binding_factor_list)?;

    let identifiers = signing_package
        .signing_commitments()
        .keys()
        .copied()
        .collect();
    let lambda_i =
        polynomial::compute_lagrange_coefficient(&identifiers, *key_package.identifier());

    let challenge = challenge::<C>(
        &group_commitment.0,
        key_package.verifying_key(),
        signing_package.message(),
    )?;

    Ok(compute_signature_share(
        &signer_nonces,
        binding_factor,
        lambda_i,
        key_package,
        challenge,
    ))
}

impl<C> Debug for SignatureShare<C>
where
    C: Ciphersuite,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SignatureShare")
            .field("share", &hex::encode(self.serialize()))
            .finish()
    }
}
