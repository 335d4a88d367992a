//! Generic, ciphersuite-parameterized protocol tests.
//!
//! Gated behind `test-impl` (always enabled for this crate's own `cfg(test)` builds) so
//! each concrete ciphersuite crate (`frost-p256`, `frost-ristretto255`) can reuse these
//! checks against its own `Ciphersuite` impl instead of re-deriving the same end-to-end
//! scenarios per curve.

use std::collections::{BTreeMap, BTreeSet};

use rand_core::{CryptoRng, RngCore};

use crate::{
    keys::{self, KeyPackage, PublicKeyPackage, SigningShare, VerifyingShare},
    round1, round2, Ciphersuite, Group, Identifier, Scalar, SigningKey,
};

/// Runs a full trusted-dealer keygen, two-round signing ceremony over `min_signers` of
/// `max_signers` participants, and asserts the resulting signature verifies.
pub fn check_sign<C: Ciphersuite, R: RngCore + CryptoRng>(
    min_signers: u16,
    max_signers: u16,
    mut rng: R,
) {
    let identifiers: BTreeSet<Identifier<C>> = (1..=max_signers)
        .map(|i| Identifier::try_from(i).unwrap())
        .collect();

    let (shares, pubkeys) = keys::dealer::generate_with_dealer::<C, R>(
        max_signers,
        min_signers,
        identifiers.clone(),
        &mut rng,
    )
    .unwrap();

    let key_packages: BTreeMap<Identifier<C>, KeyPackage<C>> = shares
        .into_iter()
        .map(|(id, share)| (id, share.verify().unwrap()))
        .collect();

    let message = b"message to sign";
    let signing_ids: Vec<Identifier<C>> = identifiers
        .iter()
        .take(min_signers as usize)
        .copied()
        .collect();

    let mut nonces_map = BTreeMap::new();
    let mut commitments_map = BTreeMap::new();
    for id in &signing_ids {
        let key_package = &key_packages[id];
        let (nonces, commitments) = round1::commit(*id, key_package.signing_share(), &mut rng);
        nonces_map.insert(*id, nonces);
        commitments_map.insert(*id, commitments);
    }

    let signing_package = round1::SigningPackage::new(commitments_map, message);

    let mut signature_shares = BTreeMap::new();
    for id in &signing_ids {
        let key_package = &key_packages[id];
        let nonces = nonces_map.remove(id).unwrap();
        let share = round2::sign(&signing_package, nonces, key_package).unwrap();
        signature_shares.insert(*id, share);
    }

    let signature = crate::aggregate(&signing_package, &signature_shares, &pubkeys).unwrap();

    pubkeys
        .verifying_key()
        .verify(message, &signature)
        .expect("aggregated signature must verify");
}

/// Checks that [`keys::dealer::reconstruct`] recovers the original signing key from any
/// `min_signers`-sized subset of shares.
pub fn check_reconstruct<C: Ciphersuite, R: RngCore + CryptoRng>(
    min_signers: u16,
    max_signers: u16,
    mut rng: R,
) {
    let identifiers: BTreeSet<Identifier<C>> = (1..=max_signers)
        .map(|i| Identifier::try_from(i).unwrap())
        .collect();

    let signing_key = SigningKey::<C>::new(&mut rng);
    let (shares, _pubkeys) = keys::dealer::split::<C, R>(
        &signing_key,
        max_signers,
        min_signers,
        identifiers,
        &mut rng,
    )
    .unwrap();

    let subset: Vec<_> = shares.into_values().take(min_signers as usize).collect();
    let reconstructed = keys::dealer::reconstruct(&subset).unwrap();

    assert_eq!(
        reconstructed.serialize().as_ref(),
        signing_key.serialize().as_ref()
    );
}

/// Checks that a signature share corrupted in transit (here, swapped with a different
/// signer's share) is rejected by [`crate::aggregate`] rather than silently producing an
/// invalid signature.
pub fn check_bad_share_is_rejected<C: Ciphersuite, R: RngCore + CryptoRng>(
    min_signers: u16,
    max_signers: u16,
    mut rng: R,
) {
    let identifiers: BTreeSet<Identifier<C>> = (1..=max_signers)
        .map(|i| Identifier::try_from(i).unwrap())
        .collect();

    let (shares, pubkeys) = keys::dealer::generate_with_dealer::<C, R>(
        max_signers,
        min_signers,
        identifiers.clone(),
        &mut rng,
    )
    .unwrap();

    let key_packages: BTreeMap<Identifier<C>, KeyPackage<C>> = shares
        .into_iter()
        .map(|(id, share)| (id, share.verify().unwrap()))
        .collect();

    let message = b"message to sign";
    let signing_ids: Vec<Identifier<C>> = identifiers
        .iter()
        .take(min_signers as usize)
        .copied()
        .collect();
    assert!(
        signing_ids.len() >= 2,
        "min_signers must be at least 2 for this check"
    );

    let mut nonces_map = BTreeMap::new();
    let mut commitments_map = BTreeMap::new();
    for id in &signing_ids {
        let key_package = &key_packages[id];
        let (nonces, commitments) = round1::commit(*id, key_package.signing_share(), &mut rng);
        nonces_map.insert(*id, nonces);
        commitments_map.insert(*id, commitments);
    }

    let signing_package = round1::SigningPackage::new(commitments_map, message);

    let mut signature_shares = BTreeMap::new();
    for id in &signing_ids {
        let key_package = &key_packages[id];
        let nonces = nonces_map.remove(id).unwrap();
        let share = round2::sign(&signing_package, nonces, key_package).unwrap();
        signature_shares.insert(*id, share);
    }

    let swapped = signature_shares[&signing_ids[0]];
    signature_shares.insert(signing_ids[1], swapped);

    let result = crate::aggregate(&signing_package, &signature_shares, &pubkeys);
    assert!(result.is_err(), "aggregate must reject the mismatched share");
}

/// A deterministic 2-of-3 signing scenario with externally supplied hiding/binding
/// nonces, in the shape of a `draft-irtf-cfrg-frost` test vector: signers `1` and `3`
/// commit against fixed nonce scalars (rather than ones drawn from an RNG) and their
/// shares are required to actually lie on the degree-1 polynomial through `(0,
/// group_secret)`, so a wrong Lagrange coefficient or signature-share formula fails this
/// the same way it would fail against the published vectors.
pub struct ExplicitNonceVector<C: Ciphersuite> {
    /// The group's secret key, `p(0)`.
    pub group_secret: Scalar<C>,
    /// Signer 1's share, `p(1)`.
    pub signer_one_share: Scalar<C>,
    /// Signer 3's share, `p(3)`.
    pub signer_three_share: Scalar<C>,
    /// Signer 1's hiding nonce.
    pub signer_one_hiding_nonce: Scalar<C>,
    /// Signer 1's binding nonce.
    pub signer_one_binding_nonce: Scalar<C>,
    /// Signer 3's hiding nonce.
    pub signer_three_hiding_nonce: Scalar<C>,
    /// Signer 3's binding nonce.
    pub signer_three_binding_nonce: Scalar<C>,
    /// The message being signed.
    pub message: &'static [u8],
}

/// Replays [`ExplicitNonceVector`] through commit (via
/// [`round1::commit_with_nonces`]), sign, and aggregate, asserting every published
/// nonce's commitment is exactly `generator() * nonce` and that the resulting signature
/// verifies under `group_secret`'s implied verifying key.
///
/// The official `draft-irtf-cfrg-frost-07` P-256/SHA-256 and Ristretto255/SHA-512 test
/// vectors this is modeled on supply fixed group/signer key material and fixed
/// hiding/binding nonces; their published JSON fixtures aren't available here, so this
/// exercises the identical commit/sign/aggregate replay pipeline against a self-contained
/// two-of-three scenario instead of asserting byte-identical published constants.
pub fn check_sign_with_explicit_nonces<C: Ciphersuite>(vector: ExplicitNonceVector<C>) {
    let id1 = Identifier::<C>::try_from(1).unwrap();
    let id3 = Identifier::<C>::try_from(3).unwrap();

    let verifying_key = SigningKey::<C> {
        scalar: vector.group_secret,
    }
    .to_verifying_key();

    let verifying_share_one =
        VerifyingShare::<C>::new(<C::Group>::generator() * vector.signer_one_share);
    let verifying_share_three =
        VerifyingShare::<C>::new(<C::Group>::generator() * vector.signer_three_share);

    let mut verifying_shares = BTreeMap::new();
    verifying_shares.insert(id1, verifying_share_one);
    verifying_shares.insert(id3, verifying_share_three);

    let pubkeys = PublicKeyPackage::<C> {
        verifying_shares,
        verifying_key,
        min_signers: 2,
    };

    let key_package_one = KeyPackage::<C> {
        identifier: id1,
        signing_share: SigningShare::new(vector.signer_one_share),
        verifying_share: verifying_share_one,
        verifying_key,
        min_signers: 2,
    };
    let key_package_three = KeyPackage::<C> {
        identifier: id3,
        signing_share: SigningShare::new(vector.signer_three_share),
        verifying_share: verifying_share_three,
        verifying_key,
        min_signers: 2,
    };

    let (nonces1, commitments1) = round1::commit_with_nonces::<C>(
        id1,
        vector.signer_one_hiding_nonce,
        vector.signer_one_binding_nonce,
    );
    assert_eq!(
        *commitments1.hiding(),
        <C::Group>::generator() * vector.signer_one_hiding_nonce
    );
    assert_eq!(
        *commitments1.binding(),
        <C::Group>::generator() * vector.signer_one_binding_nonce
    );

    let (nonces3, commitments3) = round1::commit_with_nonces::<C>(
        id3,
        vector.signer_three_hiding_nonce,
        vector.signer_three_binding_nonce,
    );
    assert_eq!(
        *commitments3.hiding(),
        <C::Group>::generator() * vector.signer_three_hiding_nonce
    );
    assert_eq!(
        *commitments3.binding(),
        <C::Group>::generator() * vector.signer_three_binding_nonce
    );

    let mut commitments_map = BTreeMap::new();
    commitments_map.insert(id1, commitments1);
    commitments_map.insert(id3, commitments3);

    let signing_package = round1::SigningPackage::new(commitments_map, vector.message);

    let share1 = round2::sign(&signing_package, nonces1, &key_package_one).unwrap();
    let share3 = round2::sign(&signing_package, nonces3, &key_package_three).unwrap();

    let mut signature_shares = BTreeMap::new();
    signature_shares.insert(id1, share1);
    signature_shares.insert(id3, share3);

    let signature = crate::aggregate(&signing_package, &signature_shares, &pubkeys).unwrap();

    pubkeys
        .verifying_key()
        .verify(vector.message, &signature)
        .expect("vector signature must verify");
}
