//! FROST Round 1 functionality and types: nonce/commitment generation, binding factors,
//! and the group commitment.

use std::{
    collections::BTreeMap,
    fmt::{self, Debug},
};

use derive_getters::Getters;
use rand_core::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{keys::SigningShare, Ciphersuite, Element, Error, Field, Group, Identifier, Scalar};

#[cfg(feature = "serde")]
use crate::serialization::{element_from_serialization, ElementSerialization};

/// A single secret nonce, as generated by [`nonce_generate`].
///
/// Derives `Zeroize` directly so a caller holding a bare `Nonce` can wipe it explicitly
/// with `.zeroize()`. This is `Clone, Copy` and has no `Drop` impl of its own, so a stray
/// copy made outside its containing [`SigningNonces`] is NOT wiped automatically — only
/// the fields still owned by a `SigningNonces` get that guarantee, via its own
/// `ZeroizeOnDrop`.
#[derive(Clone, Copy, Zeroize)]
pub(crate) struct Nonce<C: Ciphersuite>(pub(crate) Scalar<C>);

/// Generates a fresh nonce scalar bound to `secret`, per
/// `H4(32 fresh random bytes || encode(secret))`.
///
/// Binding the nonce to the signer's own key share means that two signers drawing the
/// same 32 random bytes (e.g. a broken RNG) still end up with different nonces — but
/// this is *not* a substitute for a good RNG, and a given [`SigningNonces`] MUST still
/// never be used to sign more than one message.
fn nonce_generate<C: Ciphersuite, R: RngCore + CryptoRng>(
    rng: &mut R,
    secret: &SigningShare<C>,
) -> Nonce<C> {
    let mut k = [0u8; 32];
    rng.fill_bytes(&mut k);

    let secret_enc = <<C::Group as Group>::Field>::serialize(&secret.to_scalar());

    let mut input = Vec::with_capacity(32 + secret_enc.as_ref().len());
    input.extend_from_slice(&k);
    input.extend_from_slice(secret_enc.as_ref());

    k.zeroize();

    Nonce(C::h4(&input))
}

/// A signer's Round 1 secret state: hiding and binding nonces, and the commitments they
/// were published as.
///
/// `SigningNonces` is `ZeroizeOnDrop`, and [`crate::round2::sign`] consumes it by value,
/// so a given value can be fed into at most one signing call — reuse is a compile error,
/// not a runtime check.
#[derive(Clone, ZeroizeOnDrop)]
pub struct SigningNonces<C: Ciphersuite> {
    pub(crate) hiding: Nonce<C>,
    pub(crate) binding: Nonce<C>,
    #[zeroize(skip)]
    pub(crate) commitments: SigningCommitments<C>,
}

/// A signer's Round 1 public output: commitments to its hiding and binding nonces.
#[derive(Clone, Copy, Eq, PartialEq, Getters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "C: Ciphersuite"))]
#[cfg_attr(feature = "serde", serde(try_from = "SigningCommitmentsHelper<C>"))]
#[cfg_attr(feature = "serde", serde(into = "SigningCommitmentsHelper<C>"))]
pub struct SigningCommitments<C: Ciphersuite> {
    /// The identifier of the signer that produced this commitment.
    identifier: Identifier<C>,
    /// Commitment to the hiding nonce: `g^hiding_nonce`.
    hiding: Element<C>,
    /// Commitment to the binding nonce: `g^binding_nonce`.
    binding: Element<C>,
}

/// A wire-friendly mirror of [`SigningCommitments`], whose `Element<C>` fields round-trip
/// through [`ElementSerialization`] instead of deriving `serde` directly.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(bound = "C: Ciphersuite")]
pub(crate) struct SigningCommitmentsHelper<C: Ciphersuite> {
    identifier: Identifier<C>,
    hiding: ElementSerialization<C>,
    binding: ElementSerialization<C>,
}

#[cfg(feature = "serde")]
impl<C> TryFrom<SigningCommitmentsHelper<C>> for SigningCommitments<C>
where
    C: Ciphersuite,
{
    type Error = Error<C>;

    fn try_from(value: SigningCommitmentsHelper<C>) -> Result<Self, Self::Error> {
        Ok(Self {
            identifier: value.identifier,
            hiding: element_from_serialization::<C>(value.hiding)?,
            binding: element_from_serialization::<C>(value.binding)?,
        })
    }
}

#[cfg(feature = "serde")]
impl<C> From<SigningCommitments<C>> for SigningCommitmentsHelper<C>
where
    C: Ciphersuite,
{
    fn from(value: SigningCommitments<C>) -> Self {
        Self {
            identifier: value.identifier,
            hiding: ElementSerialization(
                <C::Group>::serialize(&value.hiding).expect("a live element always serializes"),
            ),
            binding: ElementSerialization(
                <C::Group>::serialize(&value.binding).expect("a live element always serializes"),
            ),
        }
    }
}

impl<C> SigningCommitments<C>
where
    C: Ciphersuite,
{
    /// Serializes this commitment as `identifier.serialize() || compress(hiding) ||
    /// compress(binding)`.
    pub fn serialize(&self) -> Result<Vec<u8>, Error<C>> {
        let id_enc = self.identifier.serialize();
        let hiding_enc = <C::Group>::serialize(&self.hiding)?;
        let binding_enc = <C::Group>::serialize(&self.binding)?;

        let mut out = Vec::with_capacity(
            id_enc.as_ref().len() + hiding_enc.as_ref().len() + binding_enc.as_ref().len(),
        );
        out.extend_from_slice(id_enc.as_ref());
        out.extend_from_slice(hiding_enc.as_ref());
        out.extend_from_slice(binding_enc.as_ref());
        Ok(out)
    }
}

impl<C> Debug for SigningCommitments<C>
where
    C: Ciphersuite,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SigningCommitments")
            .field("identifier", &self.identifier)
            .finish_non_exhaustive()
    }
}

/// Builds [`SigningNonces`]/[`SigningCommitments`] from already-derived hiding/binding
/// nonce scalars, bypassing [`nonce_generate`] entirely.
///
/// Only `pub(crate)` by default; built with `internals`, it is exported so that test
/// vectors and other callers that already have externally-supplied nonces (e.g. replaying
/// a published test vector's recorded hiding/binding nonces) can commit against them
/// directly instead of going through a fresh RNG draw. [`commit`] is the ordinary,
/// RNG-driven entry point and should be preferred outside of such replay scenarios.
#[cfg_attr(feature = "internals", visibility::make(pub))]
pub(crate) fn commit_with_nonces<C: Ciphersuite>(
    identifier: Identifier<C>,
    hiding_nonce: Scalar<C>,
    binding_nonce: Scalar<C>,
) -> (SigningNonces<C>, SigningCommitments<C>) {
    let hiding = Nonce(hiding_nonce);
    let binding = Nonce(binding_nonce);

    let commitments = SigningCommitments {
        identifier,
        hiding: <C::Group>::generator() * hiding.0,
        binding: <C::Group>::generator() * binding.0,
    };

    (
        SigningNonces {
            hiding,
            binding,
            commitments,
        },
        commitments,
    )
}

/// Performs Round 1 for a signer: draws fresh hiding and binding nonces bound to
/// `signing_share`, and returns both the secret [`SigningNonces`] and the public
/// [`SigningCommitments`] to publish.
pub fn commit<C: Ciphersuite, R: RngCore + CryptoRng>(
    identifier: Identifier<C>,
    signing_share: &SigningShare<C>,
    rng: &mut R,
) -> (SigningNonces<C>, SigningCommitments<C>) {
    let hiding_nonce = nonce_generate::<C, R>(rng, signing_share).0;
    let binding_nonce = nonce_generate::<C, R>(rng, signing_share).0;

    commit_with_nonces(identifier, hiding_nonce, binding_nonce)
}

/// The message and set of signing commitments for one signing ceremony.
///
/// Commitments are stored in a [`BTreeMap`] keyed by [`Identifier`], which gives the
/// ascending-identifier canonical order §4.9 requires "for free": there is no
/// unsorted-`SigningPackage` state to reject, because a `BTreeMap` always iterates in
/// key order regardless of insertion order.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "C: Ciphersuite"))]
pub struct SigningPackage<C: Ciphersuite> {
    pub(crate) message: Vec<u8>,
    pub(crate) signing_commitments: BTreeMap<Identifier<C>, SigningCommitments<C>>,
}

impl<C> SigningPackage<C>
where
    C: Ciphersuite,
{
    /// Builds a new signing package from a message and a set of commitments collected
    /// from Round 1.
    pub fn new(
        signing_commitments: BTreeMap<Identifier<C>, SigningCommitments<C>>,
        message: &[u8],
    ) -> Self {
        Self {
            message: message.to_vec(),
            signing_commitments,
        }
    }

    /// The message being signed.
    pub fn message(&self) -> &[u8] {
        &self.message
    }

    /// The set of signing commitments, in canonical (ascending-identifier) order.
    pub fn signing_commitments(&self) -> &BTreeMap<Identifier<C>, SigningCommitments<C>> {
        &self.signing_commitments
    }

    /// Encodes the commitment set as the concatenation, in ascending-identifier order,
    /// of each commitment's wire encoding.
    fn encode_commitments(&self) -> Result<Vec<u8>, Error<C>> {
        let mut out = Vec::new();
        for commitments in self.signing_commitments.values() {
            out.extend_from_slice(&commitments.serialize()?);
        }
        Ok(out)
    }
}

/// A single signer's binding factor, tagged with the identifier it belongs to.
#[derive(Clone, Copy)]
pub struct BindingFactor<C: Ciphersuite>(pub(crate) Scalar<C>);

/// The full set of binding factors for one signing package, keyed by identifier.
#[derive(Clone)]
pub struct BindingFactorList<C: Ciphersuite>(BTreeMap<Identifier<C>, BindingFactor<C>>);

impl<C> BindingFactorList<C>
where
    C: Ciphersuite,
{
    /// Looks up the binding factor for `identifier`.
    pub(crate) fn get(&self, identifier: &Identifier<C>) -> Result<Scalar<C>, Error<C>> {
        self.0
            .get(identifier)
            .map(|bf| bf.0)
            .ok_or(Error::UnknownIdentifier)
    }
}

/// Computes the binding factor for every commitment in `signing_package`, per §4.9:
///
/// 1. `msg_hash = H3(msg)`
/// 2. `commitments_hash = H3(encode(signing_commitments))`
/// 3. `rho_input_prefix = msg_hash || commitments_hash`
/// 4. `binding_factor[id] = H1(rho_input_prefix || id.serialize())`
pub fn compute_binding_factor_list<C: Ciphersuite>(
    signing_package: &SigningPackage<C>,
    _verifying_key: &crate::VerifyingKey<C>,
) -> Result<BindingFactorList<C>, Error<C>> {
    let msg_hash = C::h3(&signing_package.message);
    let commitments_hash = C::h3(&signing_package.encode_commitments()?);

    let mut rho_input_prefix =
        Vec::with_capacity(msg_hash.as_ref().len() + commitments_hash.as_ref().len());
    rho_input_prefix.extend_from_slice(msg_hash.as_ref());
    rho_input_prefix.extend_from_slice(commitments_hash.as_ref());

    let mut map = BTreeMap::new();
    for identifier in signing_package.signing_commitments.keys() {
        let mut input = rho_input_prefix.clone();
        input.extend_from_slice(identifier.serialize().as_ref());
        map.insert(*identifier, BindingFactor(C::h1(&input)));
    }

    Ok(BindingFactorList(map))
}

/// The group commitment `R = sum_id (hiding_id + binding_id * binding_factor_id)`.
#[derive(Clone, Copy)]
pub struct GroupCommitment<C: Ciphersuite>(pub(crate) Element<C>);

/// Computes the group commitment `R` for `signing_package`, given its already-computed
/// [`BindingFactorList`].
pub fn compute_group_commitment<C: Ciphersuite>(
    signing_package: &SigningPackage<C>,
    binding_factor_list: &BindingFactorList<C>,
) -> Result<GroupCommitment<C>, Error<C>> {
    let mut acc = <C::Group>::identity();
    for (identifier, commitments) in &signing_package.signing_commitments {
        let binding_factor = binding_factor_list.get(identifier)?;
        acc = acc + (commitments.hiding + commitments.binding * binding_factor);
    }
    Ok(GroupCommitment(acc))
}
